use crate::alphabets::dna;
use crate::error::{StartsError, StartsResult};

/// Contig nucleotides, stored lowercase.
///
/// Positions handed to the accessors are 1-based contig coordinates, the
/// convention used by the prediction tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DnaSeq {
    bytes: Vec<u8>,
}

impl DnaSeq {
    pub fn new(mut bytes: Vec<u8>) -> StartsResult<Self> {
        if let Some((pos, b)) = dna::iupac_alphabet().first_foreign(&bytes) {
            return Err(StartsError::InvalidChar { ch: b as char, pos });
        }
        bytes.make_ascii_lowercase();
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Up to `len` bases starting at 1-based `position`, clipped at the contig end.
    /// Positions before the contig start yield an empty window.
    pub fn window(&self, position: usize, len: usize) -> &[u8] {
        window(&self.bytes, position, len)
    }

    /// The full 3-base codon at `position`, if it fits inside the contig.
    pub fn codon(&self, position: usize) -> Option<&[u8]> {
        let w = self.window(position, 3);
        (w.len() == 3).then_some(w)
    }
}

#[inline]
pub(crate) fn window(bytes: &[u8], position: usize, len: usize) -> &[u8] {
    if position == 0 {
        return &[];
    }
    let start = (position - 1).min(bytes.len());
    let end = (start + len).min(bytes.len());
    &bytes[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_on_construction() {
        let s = DnaSeq::new(b"ACgtN".to_vec()).unwrap();
        assert_eq!(s.as_bytes(), b"acgtn");
        assert_eq!(s.len(), 5);
    }

    #[test]
    fn rejects_foreign_bytes() {
        let err = DnaSeq::new(b"AC#T".to_vec()).unwrap_err();
        match err {
            StartsError::InvalidChar { ch, pos } => {
                assert_eq!(ch, '#');
                assert_eq!(pos, 2);
            }
            other => panic!("expected invalid char error, got {other:?}"),
        }
    }

    #[test]
    fn window_clips_at_end() {
        let s = DnaSeq::new(b"acgtac".to_vec()).unwrap();
        assert_eq!(s.window(1, 4), b"acgt");
        assert_eq!(s.window(5, 4), b"ac");
        assert_eq!(s.window(7, 4), b"");
        assert_eq!(s.window(0, 4), b"");
    }

    #[test]
    fn codon_requires_three_bases() {
        let s = DnaSeq::new(b"atgca".to_vec()).unwrap();
        assert_eq!(s.codon(1), Some(&b"atg"[..]));
        assert_eq!(s.codon(3), Some(&b"gca"[..]));
        assert_eq!(s.codon(4), None);
    }
}
