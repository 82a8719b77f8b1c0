use crate::alphabets::Alphabet;

/// IUPAC nucleotides plus the gap characters assemblies sometimes carry.
pub fn iupac_alphabet() -> Alphabet {
    Alphabet::new(b"ACGTRYSWKMBDHVNZacgtryswkmbdhvnz-")
}

#[inline]
pub fn is_gc(base: u8) -> bool {
    matches!(base, b'g' | b'c' | b'G' | b'C')
}
