pub mod composition;
pub mod motifs;
pub mod scanner;

pub use composition::{aa_content, gc_content};
pub use motifs::{pribnow_box, pribnow_score, rbs_length};
pub use scanner::StartScanner;

use crate::alphabets::protein::PROFILE_SYMBOLS;
use crate::seq::codon::{START_CODONS, STOP_CODONS};
use std::fmt;

pub const GC_IDX: usize = 0;
pub const ORF_LEN_IDX: usize = 1;
pub const REGION_LEN_IDX: usize = 2;
pub const RBS_LEN_IDX: usize = 3;
pub const RBS_GAP_IDX: usize = 4;
pub const START_CONF_IDX: usize = 5;
/// First of three start-codon one-hot slots.
pub const START_CODON_IDX: usize = 6;
pub const STOP_CONF_IDX: usize = 9;
/// First of three stop-codon one-hot slots.
pub const STOP_CODON_IDX: usize = 10;
pub const PRIBNOW_IDX: usize = 13;
/// First of the amino-acid profile slots.
pub const AA_PROFILE_IDX: usize = 14;
pub const AA_COUNT: usize = PROFILE_SYMBOLS.len();
pub const FEATURE_COUNT: usize = AA_PROFILE_IDX + AA_COUNT;

/// Column names of a feature vector, in slot order.
pub fn feature_names() -> Vec<String> {
    let mut names = vec![String::new(); FEATURE_COUNT];
    names[GC_IDX] = "gc_content".into();
    names[ORF_LEN_IDX] = "orf_len".into();
    names[REGION_LEN_IDX] = "region_len".into();
    names[RBS_LEN_IDX] = "rbs_len".into();
    names[RBS_GAP_IDX] = "rbs_gap".into();
    names[START_CONF_IDX] = "start_conf".into();
    names[STOP_CONF_IDX] = "stop_conf".into();
    for (i, codon) in START_CODONS.iter().enumerate() {
        names[START_CODON_IDX + i] = String::from_utf8_lossy(&codon[..]).into_owned();
    }
    for (i, codon) in STOP_CODONS.iter().enumerate() {
        names[STOP_CODON_IDX + i] = String::from_utf8_lossy(&codon[..]).into_owned();
    }
    names[PRIBNOW_IDX] = "pribnow_score".into();
    for (i, &aa) in PROFILE_SYMBOLS.iter().enumerate() {
        names[AA_PROFILE_IDX + i] = (aa as char).to_string();
    }
    names
}

/// Header line of a feature table: `location` followed by the feature columns.
pub fn header() -> String {
    let mut line = String::from("location");
    for name in feature_names() {
        line.push('\t');
        line.push_str(&name);
    }
    line
}

/// A start codon inside a known ORF together with its feature vector.
#[derive(Clone, Debug, PartialEq)]
pub struct StartCandidate {
    contig_id: Box<str>,
    position: usize,
    features: [f64; FEATURE_COUNT],
}

impl StartCandidate {
    pub fn new(contig_id: impl Into<Box<str>>, position: usize, features: [f64; FEATURE_COUNT]) -> Self {
        Self {
            contig_id: contig_id.into(),
            position,
            features,
        }
    }

    pub fn contig_id(&self) -> &str {
        &self.contig_id
    }

    /// 1-based position of the start codon.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn features(&self) -> &[f64; FEATURE_COUNT] {
        &self.features
    }

    /// `contig;position`, the key used by the prediction tables.
    pub fn location(&self) -> String {
        format!("{};{}", self.contig_id, self.position)
    }
}

/// Tab-separated row: location, then every feature.
impl fmt::Display for StartCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.contig_id, self.position)?;
        for value in &self.features {
            write!(f, "\t{value}")?;
        }
        Ok(())
    }
}
