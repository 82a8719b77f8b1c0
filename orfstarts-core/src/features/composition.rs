use crate::alphabets::dna::is_gc;
use crate::alphabets::protein::profile_alphabet;
use crate::alphabets::RankTransform;
use crate::features::AA_COUNT;
use crate::seq::codon::translate;
use crate::seq::dna::window;
use std::sync::LazyLock;

static PROFILE_RANKS: LazyLock<RankTransform> =
    LazyLock::new(|| RankTransform::new(&profile_alphabet()));

/// Fraction of G/C among the `length` bases ending just before 1-based
/// `end_position`. An empty region yields `0.0`.
pub fn gc_content(seq: &[u8], end_position: usize, length: usize) -> f64 {
    if length == 0 {
        return 0.0;
    }
    let first = end_position.saturating_sub(length);
    let region = window(seq, first, length);
    let gc = region.iter().filter(|&&b| is_gc(b)).count();
    gc as f64 / length as f64
}

/// Amino-acid percentages for the codons from 1-based `start_position` up to,
/// not including, `end_position`.
///
/// Every codon counts toward the total; stops and codons with ambiguity
/// characters count toward no symbol. No codons at all yields all zeros.
pub fn aa_content(seq: &[u8], start_position: usize, end_position: usize) -> [f64; AA_COUNT] {
    let mut counts = [0usize; AA_COUNT];
    let mut total = 0usize;
    let mut position = start_position;
    while position < end_position {
        let rank = translate(window(seq, position, 3)).and_then(|aa| PROFILE_RANKS.get(aa));
        if let Some(rank) = rank {
            counts[rank as usize] += 1;
        }
        total += 1;
        position += 3;
    }

    let mut profile = [0.0; AA_COUNT];
    if total > 0 {
        for (pct, &count) in profile.iter_mut().zip(&counts) {
            *pct = count as f64 * 100.0 / total as f64;
        }
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORF: &[u8] = b"atggcctgcaaataa";

    #[test]
    fn gc_over_interior() {
        assert!((gc_content(ORF, 13, 12) - 0.5).abs() < 1e-12);
        // tgcaaa
        assert!((gc_content(ORF, 13, 6) - 2.0 / 6.0).abs() < 1e-12);
        assert_eq!(gc_content(b"aaaa", 5, 4), 0.0);
    }

    #[test]
    fn gc_of_empty_region_is_zero() {
        assert_eq!(gc_content(ORF, 13, 0), 0.0);
    }

    #[test]
    fn aa_profile_percentages() {
        let profile = aa_content(ORF, 1, 13);
        // A C K M each once out of four codons.
        assert_eq!(profile[0], 25.0);
        assert_eq!(profile[1], 25.0);
        assert_eq!(profile[8], 25.0);
        assert_eq!(profile[10], 25.0);
        assert_eq!(profile.iter().sum::<f64>(), 100.0);
    }

    #[test]
    fn stops_and_ambiguity_count_only_in_total() {
        let profile = aa_content(b"atgnnntaaccc", 1, 10);
        // M, untranslatable, stop
        assert!((profile[10] - 100.0 / 3.0).abs() < 1e-9);
        assert!((profile.iter().sum::<f64>() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_region_has_zero_profile() {
        assert_eq!(aa_content(ORF, 13, 13), [0.0; AA_COUNT]);
        assert_eq!(aa_content(ORF, 13, 1), [0.0; AA_COUNT]);
    }
}
