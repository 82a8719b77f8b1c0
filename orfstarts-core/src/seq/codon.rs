//! Codon classification and translation under genetic code 11.

use std::sync::LazyLock;

/// Canonical start codons, in one-hot order.
pub const START_CODONS: [&[u8; 3]; 3] = [b"atg", b"gtg", b"ttg"];

/// Canonical stop codons, in one-hot order.
pub const STOP_CODONS: [&[u8; 3]; 3] = [b"taa", b"tag", b"tga"];

/// Index of `codon` in [`START_CODONS`]; comparison ignores case.
pub fn start_index(codon: &[u8]) -> Option<usize> {
    START_CODONS
        .iter()
        .position(|start| codon.eq_ignore_ascii_case(&start[..]))
}

/// Index of `codon` in [`STOP_CODONS`]; comparison ignores case.
pub fn stop_index(codon: &[u8]) -> Option<usize> {
    STOP_CODONS
        .iter()
        .position(|stop| codon.eq_ignore_ascii_case(&stop[..]))
}

pub fn is_start(codon: &[u8]) -> bool {
    start_index(codon).is_some()
}

/// Translate one codon. Stops translate to `*`; codons with ambiguity
/// characters have no translation.
pub fn translate(codon: &[u8]) -> Option<u8> {
    if codon.len() != 3 {
        return None;
    }
    let i1 = BASE_INDEX[codon[0] as usize];
    let i2 = BASE_INDEX[codon[1] as usize];
    let i3 = BASE_INDEX[codon[2] as usize];
    if i1 < 4 && i2 < 4 && i3 < 4 {
        let idx = ((i1 as usize) << 4) | ((i2 as usize) << 2) | (i3 as usize);
        Some(CODON_TABLE_11[idx])
    } else {
        None
    }
}

static BASE_INDEX: LazyLock<[u8; 256]> = LazyLock::new(|| {
    let mut map = [255u8; 256];
    map[b'A' as usize] = 0;
    map[b'C' as usize] = 1;
    map[b'G' as usize] = 2;
    map[b'T' as usize] = 3;
    map[b'a' as usize] = 0;
    map[b'c' as usize] = 1;
    map[b'g' as usize] = 2;
    map[b't' as usize] = 3;
    map
});

// ACGT-ranked; table 11 shares its amino-acid assignments with the standard code.
const CODON_TABLE_11: [u8; 64] = *b"KNKNTTTTRSRSIIMIQHQHPPPPRRRRLLLLEDEDAAAAGGGGVVVV*Y*YSSSS*CWCLFLF";
