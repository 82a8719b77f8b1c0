use crate::error::{StartsError, StartsResult};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strand {
    #[default]
    Plus,
    Minus,
}

impl Strand {
    pub fn as_char(self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
        }
    }
}

impl FromStr for Strand {
    type Err = StartsError;

    fn from_str(s: &str) -> StartsResult<Self> {
        match s.trim() {
            "+" => Ok(Strand::Plus),
            "-" => Ok(Strand::Minus),
            other => Err(StartsError::InvalidStrand {
                strand: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Where an annotated feature begins: the contig, the 1-based position of its
/// first base in transcription order, and the strand.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FeatureLocation {
    contig: Box<str>,
    begin: usize,
    strand: Strand,
}

impl FeatureLocation {
    pub fn new(contig: impl Into<Box<str>>, begin: usize, strand: Strand) -> Self {
        Self {
            contig: contig.into(),
            begin,
            strand,
        }
    }

    pub fn contig(&self) -> &str {
        &self.contig
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }
}

/// An annotated genome feature and its functional assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenomeFeature {
    location: FeatureLocation,
    function: Box<str>,
}

impl GenomeFeature {
    pub fn new(location: FeatureLocation, function: impl Into<Box<str>>) -> Self {
        Self {
            location,
            function: function.into(),
        }
    }

    pub fn location(&self) -> &FeatureLocation {
        &self.location
    }

    pub fn function(&self) -> &str {
        &self.function
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strand_parsing() {
        assert_eq!("+".parse::<Strand>().unwrap(), Strand::Plus);
        assert_eq!(" - ".parse::<Strand>().unwrap(), Strand::Minus);
        assert!("x".parse::<Strand>().is_err());
        assert_eq!(Strand::Minus.to_string(), "-");
    }

    #[test]
    fn genome_feature_basics() {
        let loc = FeatureLocation::new("c1", 120, Strand::Plus);
        let feat = GenomeFeature::new(loc.clone(), "DNA polymerase III beta subunit");
        assert_eq!(feat.location(), &loc);
        assert_eq!(feat.location().begin(), 120);
        assert_eq!(feat.function(), "DNA polymerase III beta subunit");
    }
}
