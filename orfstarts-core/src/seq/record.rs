use crate::seq::dna::DnaSeq;

/// A named contig sequence supplied by the genome provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contig {
    pub id: Box<str>,
    pub desc: Option<Box<str>>,
    pub seq: DnaSeq,
}

impl Contig {
    pub fn new(id: impl Into<Box<str>>, seq: DnaSeq) -> Self {
        Self {
            id: id.into(),
            desc: None,
            seq,
        }
    }

    pub fn with_desc(mut self, desc: impl Into<Box<str>>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    pub fn seq(&self) -> &DnaSeq {
        &self.seq
    }
}
