//! Command-line argument definitions for the orfstarts CLI.

use clap::{ArgAction, Parser, Subcommand};
use orfstarts_core::seq::Strand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "orfstarts")]
#[command(about = "Start-codon training data and final start calls for ORF start classifiers")]
#[command(
    long_about = "orfstarts: feature tables and best-start arbitration for a translation-start classifier.

WORKFLOW:
  1. Build unlabeled features:  orfstarts predict genome.fa stops.tbl -o starts.tbl
  2. Build labeled features:    orfstarts test genome.fa features.tbl stops.tbl -o labeled.tbl
  3. Pick one start per ORF:    orfstarts finish stops.tbl scored.tbl --alt

INPUT FORMATS:
  Contigs come from FASTA; ids are the first whitespace-delimited header token.
  Tables are tab-separated with a header row. Locations are written <contig>;<position>.
  - stop/start predictions: location, codon, predicted, confidence
  - annotated features: contig, begin, strand, function
  - scored starts (finish): location, predicted, confidence"
)]
pub struct Cli {
    /// Progress output on stderr; repeat for per-contig detail
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Worker threads for feature extraction (default: all cores)
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Feature vectors for every start codon inside a predicted ORF
    Predict {
        /// Contig FASTA file
        fasta: PathBuf,

        /// Stop/start prediction table
        predictions: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Feature vectors labeled against annotated feature starts
    Test {
        /// Contig FASTA file
        fasta: PathBuf,

        /// Annotated feature table
        features: PathBuf,

        /// Stop/start prediction table
        predictions: PathBuf,

        /// Role map (roleId<TAB>roleName); report role ids instead of names
        #[arg(short, long)]
        roles: Option<PathBuf>,

        /// Strand of the annotated features counted as true starts
        #[arg(short, long, default_value = "+", allow_hyphen_values = true)]
        strand: Strand,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pick the best scored start in each ORF
    Finish {
        /// Stop/start prediction table used to find the ORFs
        predictions: PathBuf,

        /// Scored starts from the start classifier
        calls: PathBuf,

        /// Compact output: contig, start, stop, confidence, strand, type
        #[arg(short, long)]
        alt: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
