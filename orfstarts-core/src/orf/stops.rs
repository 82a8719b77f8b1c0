use crate::seq::codon;
use std::collections::btree_map::{self, BTreeMap};

/// A candidate stop codon in one reading frame.
#[derive(Clone, Debug, PartialEq)]
pub struct StopCodon {
    position: usize,
    codon: Box<str>,
    confidence: f64,
}

impl StopCodon {
    /// `confidence` is the predictor's confidence in `predicted`; it is stored
    /// as the probability that the codon really is a stop.
    pub fn new(position: usize, codon: &str, predicted: &str, confidence: f64) -> Self {
        let confidence = if predicted == "stop" {
            confidence
        } else {
            1.0 - confidence
        };
        Self {
            position,
            codon: codon.to_ascii_lowercase().into_boxed_str(),
            confidence,
        }
    }

    /// 1-based contig position of the codon's first base.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Lowercase codon text.
    pub fn codon(&self) -> &str {
        &self.codon
    }

    /// Probability that this is a true stop.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Index in the stop one-hot (`taa`, `tag`, `tga`), if canonical.
    pub fn stop_index(&self) -> Option<usize> {
        codon::stop_index(self.codon.as_bytes())
    }
}

/// A stop codon together with the interior length of the ORF it closes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrfHit<'a> {
    pub stop: &'a StopCodon,
    pub orf_len: usize,
}

/// Interior length of the ORF closed by a stop at `position`, given the
/// previous stop in the same frame.
#[inline]
pub fn orf_length(position: usize, previous: Option<usize>) -> usize {
    match previous {
        Some(prev) => position.saturating_sub(prev + 3),
        None => position.saturating_sub(1) / 3 * 3,
    }
}

/// Stop codons of a single reading frame, ordered by position.
#[derive(Clone, Debug, Default)]
pub struct StopCodonIndex {
    stops: BTreeMap<usize, StopCodon>,
}

impl StopCodonIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a stop; a later stop at the same position replaces the earlier one.
    pub fn add_stop(&mut self, position: usize, codon: &str, predicted: &str, confidence: f64) {
        self.stops
            .insert(position, StopCodon::new(position, codon, predicted, confidence));
    }

    /// The first stop at or after `position`, i.e. the end of the ORF containing
    /// it. `None` when `position` lies in the unterminated tail of the frame.
    pub fn find_enclosing_orf(&self, position: usize) -> Option<OrfHit<'_>> {
        let (&found, stop) = self.stops.range(position..).next()?;
        let previous = self.stops.range(..found).next_back().map(|(&p, _)| p);
        Some(OrfHit {
            stop,
            orf_len: orf_length(found, previous),
        })
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// All stops in ascending order, each with the ORF length it closes.
    pub fn iter(&self) -> OrfIter<'_> {
        OrfIter {
            inner: self.stops.values(),
            previous: None,
        }
    }
}

impl<'a> IntoIterator for &'a StopCodonIndex {
    type Item = OrfHit<'a>;
    type IntoIter = OrfIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct OrfIter<'a> {
    inner: btree_map::Values<'a, usize, StopCodon>,
    previous: Option<usize>,
}

impl<'a> Iterator for OrfIter<'a> {
    type Item = OrfHit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let stop = self.inner.next()?;
        let orf_len = orf_length(stop.position, self.previous);
        self.previous = Some(stop.position);
        Some(OrfHit { stop, orf_len })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for OrfIter<'_> {}
