//! End-to-end runs: feature tables for the classifier and final start calls.

use crate::config::StartsConfig;
use crate::error::StartsResult;
use crate::features::{self, StartCandidate, StartScanner};
use crate::io::{fasta, genome, TableReader};
use crate::orf::FrameOrfIndex;
use crate::resolve::{self, CallSummary};
use crate::roles::StartRoleIndex;
use crate::seq::Contig;
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Counts reported by the feature-table writers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatureSummary {
    /// Contigs scanned.
    pub contigs: usize,
    /// Contigs with no stop predictions.
    pub skipped: usize,
    pub candidates: usize,
    /// Candidates matching an annotated start (labeled tables only).
    pub true_starts: usize,
}

/// Warn about prediction contigs the genome does not contain.
fn warn_unknown_contigs(contigs: &[Contig], orfs: &HashMap<String, FrameOrfIndex>) {
    let known: HashSet<&str> = contigs.iter().map(Contig::id).collect();
    let mut unknown: Vec<&str> = orfs
        .keys()
        .map(String::as_str)
        .filter(|id| !known.contains(id))
        .collect();
    unknown.sort_unstable();
    for id in unknown {
        warn!("predictions for contig {id} ignored: not in the genome");
    }
}

/// Contigs scanned per batch: one per worker thread.
fn scan_batch_len() -> usize {
    #[cfg(feature = "parallel")]
    {
        rayon::current_num_threads().max(1)
    }
    #[cfg(not(feature = "parallel"))]
    {
        1
    }
}

/// Scan one batch of contigs, one worker per contig. `None` marks a contig
/// without stop predictions.
fn scan_batch(
    batch: &[Contig],
    orfs: &HashMap<String, FrameOrfIndex>,
) -> Vec<Option<Vec<StartCandidate>>> {
    par_map!(batch, |contig: &Contig| {
        orfs.get(contig.id()).map(|index| {
            let found: Vec<StartCandidate> =
                StartScanner::new(contig.id(), contig.seq(), index).collect();
            debug!(
                "contig {}: {} stops, {} scored starts, {} start candidates",
                contig.id(),
                index.stop_count(),
                index.start_count(),
                found.len()
            );
            found
        })
    })
}

fn write_candidates<W: Write>(
    contigs: &[Contig],
    orfs: &HashMap<String, FrameOrfIndex>,
    writer: W,
    batch_len: usize,
    extra_header: &str,
    mut extra: impl FnMut(&StartCandidate, &mut FeatureSummary) -> String,
) -> StartsResult<FeatureSummary> {
    warn_unknown_contigs(contigs, orfs);
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "{}{extra_header}", features::header())?;

    let mut summary = FeatureSummary::default();
    for batch in contigs.chunks(batch_len.max(1)) {
        for (contig, scan) in batch.iter().zip(scan_batch(batch, orfs)) {
            summary.contigs += 1;
            let Some(candidates) = scan else {
                info!("skipping contig {}: no stop predictions", contig.id());
                summary.skipped += 1;
                continue;
            };
            for cand in &candidates {
                let suffix = extra(cand, &mut summary);
                writeln!(writer, "{cand}{suffix}")?;
                summary.candidates += 1;
            }
        }
    }
    writer.flush()?;
    Ok(summary)
}

/// Unlabeled feature table for every start candidate.
pub fn write_feature_table<W: Write>(
    contigs: &[Contig],
    orfs: &HashMap<String, FrameOrfIndex>,
    writer: W,
) -> StartsResult<FeatureSummary> {
    write_candidates(contigs, orfs, writer, scan_batch_len(), "", |_, _| {
        String::new()
    })
}

/// Feature table with `expect` and `roles` columns taken from the annotated
/// starts.
pub fn write_labeled_table<W: Write>(
    contigs: &[Contig],
    orfs: &HashMap<String, FrameOrfIndex>,
    roles: &HashMap<String, StartRoleIndex>,
    writer: W,
) -> StartsResult<FeatureSummary> {
    write_candidates(
        contigs,
        orfs,
        writer,
        scan_batch_len(),
        "\texpect\troles",
        |cand, summary| match roles
            .get(cand.contig_id())
            .and_then(|index| index.roles(cand.position()))
        {
            Some(found) => {
                summary.true_starts += 1;
                format!("\tstart\t{found}")
            }
            None => "\tother\t".to_string(),
        },
    )
}

/// `predict`: contig FASTA and start/stop predictions to an unlabeled table.
pub fn predict<W: Write>(
    fasta_path: &Path,
    predictions_path: &Path,
    writer: W,
) -> StartsResult<FeatureSummary> {
    let contigs = fasta::read_contigs_from_path(fasta_path)?;
    info!("{} contigs read from {}", contigs.len(), fasta_path.display());
    let orfs = FrameOrfIndex::read_prediction_file(predictions_path)?;
    write_feature_table(&contigs, &orfs, writer)
}

/// `test`: as [`predict`], labeled against the annotated features.
pub fn label<W: Write>(
    fasta_path: &Path,
    features_path: &Path,
    predictions_path: &Path,
    config: &StartsConfig,
    writer: W,
) -> StartsResult<FeatureSummary> {
    let contigs = fasta::read_contigs_from_path(fasta_path)?;
    info!("{} contigs read from {}", contigs.len(), fasta_path.display());
    let features = genome::read_features_from_path(features_path)?;
    let role_map = match &config.role_map {
        Some(path) => {
            let map = genome::read_role_map_from_path(path)?;
            info!("{} roles read from {}", map.len(), path.display());
            Some(map)
        }
        None => None,
    };
    let roles = StartRoleIndex::build(&features, config.strand, role_map.as_ref());
    let orfs = FrameOrfIndex::read_prediction_file(predictions_path)?;
    write_labeled_table(&contigs, &orfs, &roles, writer)
}

/// `finish`: arbitrate the secondary predictor's calls, one start per ORF.
pub fn finish<W: Write>(
    predictions_path: &Path,
    calls_path: &Path,
    config: &StartsConfig,
    writer: W,
) -> StartsResult<CallSummary> {
    let orfs = FrameOrfIndex::read_prediction_file(predictions_path)?;
    info!("ORFs for {} contigs read from {}", orfs.len(), predictions_path.display());
    let table = TableReader::from_path(calls_path)?;
    let mut writer = resolve::call_writer(config.call_format, BufWriter::new(writer));
    resolve::resolve(&orfs, table, writer.as_mut())
}
