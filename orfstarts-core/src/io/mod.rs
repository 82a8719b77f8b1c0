pub mod fasta;
pub mod genome;
pub mod table;

pub use table::{Column, TableReader};
