use crate::features::composition::{aa_content, gc_content};
use crate::features::motifs::{pribnow_score, rbs_length};
use crate::features::*;
use crate::orf::{FrameOrfIndex, OrfHit};
use crate::seq::codon::start_index;
use crate::seq::dna::{window, DnaSeq};

/// Bases past the last scanned position that the motif windows need.
const SCAN_MARGIN: usize = 5;

/// Forward-only scan of one contig for start codons inside known ORFs.
///
/// Each candidate carries a feature vector built from the enclosing ORF, the
/// most recent retained RBS match and the upstream sequence. The scan cannot
/// be rewound; once it returns `None` it stays exhausted.
pub struct StartScanner<'a> {
    contig_id: &'a str,
    seq: &'a [u8],
    orfs: &'a FrameOrfIndex,
    cursor: usize,
    last_pos: usize,
    rbs_pos: usize,
    rbs_len: usize,
    done: bool,
}

impl<'a> StartScanner<'a> {
    pub fn new(contig_id: &'a str, seq: &'a DnaSeq, orfs: &'a FrameOrfIndex) -> Self {
        Self {
            contig_id,
            seq: seq.as_bytes(),
            orfs,
            cursor: 0,
            last_pos: seq.len().saturating_sub(SCAN_MARGIN),
            rbs_pos: 0,
            rbs_len: 0,
            done: false,
        }
    }

    /// Keep a new RBS match unless it starts inside the retained one.
    fn track_rbs(&mut self, pos: usize) {
        let len = rbs_length(self.seq, pos);
        if len > 0 && pos > self.rbs_pos + self.rbs_len {
            self.rbs_pos = pos;
            self.rbs_len = len;
        }
    }

    fn features(&self, pos: usize, start: usize, hit: OrfHit<'_>) -> [f64; FEATURE_COUNT] {
        let stop = hit.stop;
        let mut data = [0.0; FEATURE_COUNT];
        data[GC_IDX] = gc_content(self.seq, stop.position(), hit.orf_len);
        data[ORF_LEN_IDX] = hit.orf_len as f64;
        data[REGION_LEN_IDX] = stop.position() as f64 - pos as f64;
        data[RBS_LEN_IDX] = self.rbs_len as f64;
        data[RBS_GAP_IDX] = pos as f64 - (self.rbs_pos + self.rbs_len) as f64;
        data[START_CONF_IDX] = self.orfs.start_confidence(pos);
        data[START_CODON_IDX + start] = 1.0;
        data[STOP_CONF_IDX] = stop.confidence();
        if let Some(i) = stop.stop_index() {
            data[STOP_CODON_IDX + i] = 1.0;
        }
        data[PRIBNOW_IDX] = pribnow_score(self.seq, pos);
        data[AA_PROFILE_IDX..].copy_from_slice(&aa_content(self.seq, pos, stop.position()));
        data
    }
}

impl Iterator for StartScanner<'_> {
    type Item = StartCandidate;

    fn next(&mut self) -> Option<StartCandidate> {
        if self.done {
            return None;
        }
        while self.cursor < self.last_pos {
            self.cursor += 1;
            let pos = self.cursor;
            self.track_rbs(pos);
            let Some(start) = start_index(window(self.seq, pos, 3)) else {
                continue;
            };
            if let Some(hit) = self.orfs.find_enclosing_orf(pos) {
                let features = self.features(pos, start, hit);
                return Some(StartCandidate::new(self.contig_id, pos, features));
            }
        }
        self.done = true;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQ: &[u8] = b"tataatcaggaggtgattcatgaaagcctgcggctaagcctttgatgtaaccccgggtttaa";

    fn orfs(with_frame_one: bool) -> FrameOrfIndex {
        let mut orfs = FrameOrfIndex::new();
        orfs.add_stop(21, "tga", "stop", 0.5);
        orfs.add_stop(48, "taa", "other", 0.4);
        orfs.add_stop(35, "taa", "stop", 0.9);
        if with_frame_one {
            orfs.add_stop(43, "tga", "stop", 0.8);
        }
        orfs.add_start(20, "start", 0.7);
        orfs
    }

    fn scan(orfs: &FrameOrfIndex) -> Vec<StartCandidate> {
        let seq = DnaSeq::new(SEQ.to_vec()).unwrap();
        StartScanner::new("c1", &seq, orfs).collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn emits_starts_inside_orfs() {
        let cands = scan(&orfs(true));
        let positions: Vec<usize> = cands.iter().map(|c| c.position()).collect();
        assert_eq!(positions, [13, 20, 42, 45]);
        assert!(cands.iter().all(|c| c.contig_id() == "c1"));
    }

    #[test]
    fn start_without_orf_is_skipped() {
        let positions: Vec<usize> = scan(&orfs(false)).iter().map(|c| c.position()).collect();
        assert_eq!(positions, [20, 42, 45]);
    }

    #[test]
    fn gtg_inside_rbs() {
        let cands = scan(&orfs(true));
        let f = cands[0].features();
        assert!(close(f[GC_IDX], 19.0 / 42.0));
        assert_eq!(f[ORF_LEN_IDX], 42.0);
        assert_eq!(f[REGION_LEN_IDX], 30.0);
        assert_eq!(f[RBS_LEN_IDX], 10.0);
        // The start overlaps the RBS at 8..=17.
        assert_eq!(f[RBS_GAP_IDX], -5.0);
        assert_eq!(f[START_CONF_IDX], 0.0);
        assert_eq!(&f[START_CODON_IDX..START_CODON_IDX + 3], [0.0, 1.0, 0.0]);
        assert!(close(f[STOP_CONF_IDX], 0.8));
        assert_eq!(&f[STOP_CODON_IDX..STOP_CODON_IDX + 3], [0.0, 0.0, 1.0]);
        assert!(close(f[PRIBNOW_IDX], 8.99));
        // L is the tenth profile symbol.
        assert!(close(f[AA_PROFILE_IDX + 9], 30.0));
    }

    #[test]
    fn atg_with_start_confidence() {
        let cands = scan(&orfs(true));
        let f = cands[1].features();
        assert!(close(f[GC_IDX], 16.0 / 33.0));
        assert_eq!(f[ORF_LEN_IDX], 33.0);
        assert_eq!(f[REGION_LEN_IDX], 15.0);
        assert_eq!(f[RBS_GAP_IDX], 2.0);
        assert!(close(f[START_CONF_IDX], 0.7));
        assert_eq!(&f[START_CODON_IDX..START_CODON_IDX + 3], [1.0, 0.0, 0.0]);
        assert!(close(f[STOP_CONF_IDX], 0.9));
        assert_eq!(&f[STOP_CODON_IDX..STOP_CODON_IDX + 3], [1.0, 0.0, 0.0]);
        assert!(close(f[PRIBNOW_IDX], 4.27));
        let profile = &f[AA_PROFILE_IDX..];
        for aa in [0, 1, 5, 8, 10] {
            assert!(close(profile[aa], 20.0), "symbol {aa}");
        }
    }

    #[test]
    fn orf_after_preceding_stop() {
        let cands = scan(&orfs(true));
        let f = cands[2].features();
        assert_eq!(f[ORF_LEN_IDX], 24.0);
        assert_eq!(f[REGION_LEN_IDX], 6.0);
        assert!(close(f[STOP_CONF_IDX], 0.6));
        assert_eq!(&f[START_CODON_IDX..START_CODON_IDX + 3], [0.0, 0.0, 1.0]);

        let f = cands[3].features();
        assert_eq!(f[RBS_LEN_IDX], 4.0);
        assert!(close(f[AA_PROFILE_IDX + 10], 100.0));
    }

    #[test]
    fn exhaustion_is_permanent() {
        let seq = DnaSeq::new(SEQ.to_vec()).unwrap();
        let orfs = orfs(true);
        let mut scanner = StartScanner::new("c1", &seq, &orfs);
        assert_eq!(scanner.by_ref().count(), 4);
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn rescanning_is_deterministic() {
        let orfs = orfs(true);
        assert_eq!(scan(&orfs), scan(&orfs));
    }

    #[test]
    fn short_contigs_yield_nothing() {
        let seq = DnaSeq::new(b"atgaa".to_vec()).unwrap();
        let mut orfs = FrameOrfIndex::new();
        orfs.add_stop(4, "taa", "stop", 1.0);
        assert_eq!(StartScanner::new("c1", &seq, &orfs).count(), 0);
    }
}
