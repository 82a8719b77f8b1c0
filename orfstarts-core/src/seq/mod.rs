pub mod codon;
pub mod dna;
pub mod feature;
pub mod record;

pub use dna::DnaSeq;
pub use feature::{FeatureLocation, GenomeFeature, Strand};
pub use record::Contig;
