use crate::alphabets::Alphabet;

/// Symbols of the amino-acid composition profile: the twenty canonical residues
/// plus `X` for ambiguous codons, in rank order.
pub const PROFILE_SYMBOLS: &[u8; 21] = b"ACDEFGHIKLMNPQRSTVWXY";

pub fn profile_alphabet() -> Alphabet {
    Alphabet::new(&PROFILE_SYMBOLS[..])
}
