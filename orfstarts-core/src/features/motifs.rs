//! Upstream motif detectors: Shine-Dalgarno (RBS) and Pribnow box.

use crate::seq::dna::window;
use memchr::memmem;

/// Shine-Dalgarno consensus sequences.
pub const RBS_CONSENSUS: [&[u8; 10]; 4] = [b"aggaggtgat", b"agggggtgat", b"gggaggtgat", b"ggggggtgat"];

/// Bases of the 4-mer seed that anchors an RBS match.
const RBS_SEED: usize = 4;

pub const PRIBNOW: &[u8; 6] = b"tataat";
pub const PRIBNOW_WEIGHTS: [f64; 6] = [0.82, 0.89, 0.52, 0.59, 0.49, 0.89];

/// Upstream offsets, relative to the start codon, probed for a Pribnow box.
pub const PRIBNOW_OFFSETS: std::ops::RangeInclusive<isize> = -12..=-8;

/// Length of the longest RBS match beginning at 1-based `position`, or 0.
///
/// The 4-mer at `position` is located in each consensus (overlapping hits
/// included) and the match is extended as far as the contig agrees with the
/// rest of that consensus.
pub fn rbs_length(seq: &[u8], position: usize) -> usize {
    let seed = window(seq, position, RBS_SEED);
    if seed.len() < RBS_SEED {
        return 0;
    }
    let finder = memmem::Finder::new(seed);
    let mut best = 0;
    for consensus in RBS_CONSENSUS {
        let mut from = 0;
        while let Some(hit) = finder.find(&consensus[from..]) {
            let offset = from + hit;
            let tail = &consensus[offset..];
            let len = window(seq, position, tail.len())
                .iter()
                .zip(tail)
                .take_while(|(a, b)| a == b)
                .count();
            best = best.max(len);
            from = offset + 1;
        }
    }
    best
}

/// Weighted match of the hexamer at 1-based `position` against `tataat`.
/// A hexamer running off the contig end scores 0.
pub fn pribnow_box(seq: &[u8], position: usize) -> f64 {
    let hexamer = window(seq, position, PRIBNOW.len());
    if hexamer.len() < PRIBNOW.len() {
        return 0.0;
    }
    hexamer
        .iter()
        .zip(PRIBNOW)
        .zip(PRIBNOW_WEIGHTS)
        .filter(|((a, b), _)| a.eq_ignore_ascii_case(b))
        .map(|(_, w)| w)
        .sum()
}

/// Sum of the Pribnow box scores upstream of a start at `position`.
pub fn pribnow_score(seq: &[u8], position: usize) -> f64 {
    PRIBNOW_OFFSETS
        .filter_map(|offset| position.checked_add_signed(offset).filter(|&p| p >= 1))
        .map(|p| pribnow_box(seq, p))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(seq: &[u8]) -> Vec<usize> {
        (1..=seq.len()).map(|pos| rbs_length(seq, pos)).collect()
    }

    #[test]
    fn full_consensus_match() {
        assert_eq!(
            profile(b"aggaggtgatccc"),
            [10, 9, 8, 7, 6, 5, 4, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn partial_matches() {
        assert_eq!(
            profile(b"ggtgcgtgactgatcggtgatcggtgacgtgatccc"),
            [
                4, 0, 0, 0, 0, 4, 0, 0, 0, 0, 4, 0, 0, 0, 0, 6, 5, 4, 0, 0, 0, 0, 5, 4, 0, 0, 0,
                0, 5, 4, 0, 0, 0, 0, 0, 0
            ]
        );
        assert_eq!(
            profile(b"ggaggtgcaggaggtcggggggtgatcggggtgcaggtgat"),
            [
                7, 6, 5, 4, 0, 0, 0, 0, 7, 6, 5, 4, 0, 0, 0, 0, 10, 9, 8, 7, 6, 5, 4, 0, 0, 0, 0,
                6, 5, 4, 0, 0, 0, 0, 7, 6, 5, 4, 0, 0, 0
            ]
        );
    }

    #[test]
    fn every_consensus_chunk_matches_itself() {
        for consensus in RBS_CONSENSUS {
            for i in 0..7 {
                for j in (4..=10 - i).rev() {
                    let chunk = &consensus[i..i + j];
                    assert_eq!(
                        rbs_length(chunk, 1),
                        j,
                        "chunk {:?}",
                        String::from_utf8_lossy(chunk)
                    );
                }
            }
        }
    }

    #[test]
    fn overlapping_seed_hits_are_tried() {
        // "gggg" sits at offsets 0, 1 and 2 of ggggggtgat; only offset 2 extends fully.
        assert_eq!(rbs_length(b"ggggtgatcc", 1), 8);
    }

    #[test]
    fn pribnow_hexamers() {
        let seq = b"tataataattctaatcaacct";
        assert!((pribnow_box(seq, 1) - 4.2).abs() < 1e-4);
        assert!((pribnow_box(seq, 4) - 3.38).abs() < 1e-4);
        assert_eq!(pribnow_box(seq, 17), 0.0);
        assert!((pribnow_box(b"tatagc", 1) - 2.82).abs() < 1e-4);
        assert!((pribnow_box(b"TATAAT", 1) - 4.2).abs() < 1e-4);
    }

    #[test]
    fn pribnow_upstream_sum() {
        let seq = b"tataataattctaatcaacct";
        // Offsets -12..=-8 from 13 cover positions 1..=5.
        assert!((pribnow_score(seq, 13) - 11.85).abs() < 1e-4);
        // Only position 1 is on the contig.
        assert!((pribnow_score(seq, 9) - 4.2).abs() < 1e-4);
        assert_eq!(pribnow_score(seq, 8), 0.0);
        assert_eq!(pribnow_score(seq, 1), 0.0);
    }
}
