use crate::error::StartsResult;
use crate::io::table::TableReader;
use crate::orf::stops::{OrfHit, StopCodonIndex};
use crate::seq::codon;
use csv::StringRecord;
use log::debug;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Frame of a 1-based contig position.
#[inline]
pub fn frame_of(position: usize) -> usize {
    position % 3
}

/// ORF tracking for one contig: a stop index per frame plus the start-codon
/// confidences reported by the start/stop predictor.
#[derive(Clone, Debug, Default)]
pub struct FrameOrfIndex {
    frames: [StopCodonIndex; 3],
    starts: HashMap<usize, f64>,
}

impl FrameOrfIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stop(&mut self, position: usize, codon: &str, predicted: &str, confidence: f64) {
        self.frames[frame_of(position)].add_stop(position, codon, predicted, confidence);
    }

    /// Record a start codon; the stored value is the probability of a true start.
    pub fn add_start(&mut self, position: usize, predicted: &str, confidence: f64) {
        let confidence = if predicted == "start" {
            confidence
        } else {
            1.0 - confidence
        };
        self.starts.insert(position, confidence);
    }

    pub fn find_enclosing_orf(&self, position: usize) -> Option<OrfHit<'_>> {
        self.frames[frame_of(position)].find_enclosing_orf(position)
    }

    /// Confidence of a true start at `position`, `0.0` if the predictor never scored it.
    pub fn start_confidence(&self, position: usize) -> f64 {
        self.starts.get(&position).copied().unwrap_or(0.0)
    }

    pub(crate) fn frame(&self, frame: usize) -> &StopCodonIndex {
        &self.frames[frame % 3]
    }

    pub fn stop_count(&self) -> usize {
        self.frames.iter().map(StopCodonIndex::len).sum()
    }

    pub fn start_count(&self) -> usize {
        self.starts.len()
    }

    /// Read a start/stop prediction table into one index per contig.
    pub fn read_prediction_file(
        path: impl AsRef<Path>,
    ) -> StartsResult<HashMap<String, FrameOrfIndex>> {
        Self::read_predictions(TableReader::from_path(path)?)
    }

    /// Rows need `location`, `codon`, `predicted` and `confidence` columns.
    /// Start codons feed the start map, every other codon is treated as a stop.
    pub fn read_predictions<R: Read>(
        mut table: TableReader<R>,
    ) -> StartsResult<HashMap<String, FrameOrfIndex>> {
        let loc_col = table.column("location")?;
        let codon_col = table.column("codon")?;
        let pred_col = table.column("predicted")?;
        let conf_col = table.column("confidence")?;

        let mut contigs: HashMap<String, FrameOrfIndex> = HashMap::new();
        let mut record = StringRecord::new();
        while table.read_row(&mut record)? {
            let (contig, position) = table.location_field(&record, &loc_col)?;
            let codon = table.field(&record, &codon_col)?;
            let predicted = table.field(&record, &pred_col)?;
            let confidence = table.f64_field(&record, &conf_col)?;

            let index = contigs.entry(contig.to_string()).or_default();
            if codon::is_start(codon.as_bytes()) {
                index.add_start(position, predicted, confidence);
            } else {
                index.add_stop(position, codon, predicted, confidence);
            }
        }
        debug!(
            "read {} prediction rows for {} contigs from {}",
            table.row(),
            contigs.len(),
            table.path()
        );
        Ok(contigs)
    }
}
