//! Best-start arbitration: one accepted start per ORF from a scored stream.

use crate::config::CallFormat;
use crate::error::StartsResult;
use crate::io::table::{join_record, TableReader};
use crate::orf::FrameOrfIndex;
use csv::StringRecord;
use log::{debug, warn};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::{self, Read, Write};

/// An ORF identified by its contig and terminal stop position.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrfKey {
    pub contig: Box<str>,
    pub stop: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Start,
    Other,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Start => "start",
            Verdict::Other => "other",
        }
    }
}

/// One scored start candidate from the secondary predictor.
#[derive(Clone, Debug, PartialEq)]
pub struct GoodStart {
    line: String,
    confidence: f64,
    position: usize,
    orf_key: Option<OrfKey>,
}

impl GoodStart {
    pub fn new(line: String, confidence: f64, position: usize, orf_key: Option<OrfKey>) -> Self {
        Self {
            line,
            confidence,
            position,
            orf_key,
        }
    }

    /// The input row, tab-joined.
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// `None` when the candidate lies outside every known ORF.
    pub fn orf_key(&self) -> Option<&OrfKey> {
        self.orf_key.as_ref()
    }

    /// Higher confidence wins; ties go to the leftmost start.
    pub fn beats(&self, other: &GoodStart) -> bool {
        self.confidence > other.confidence
            || (self.confidence == other.confidence && self.position < other.position)
    }
}

/// Output side of the resolver.
pub trait CallWriter {
    /// Called once, before any call, with the input's header line.
    fn header(&mut self, input_header: &str) -> io::Result<()>;

    fn call(&mut self, verdict: Verdict, start: &GoodStart) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

/// Echo every input row behind its verdict.
pub struct FullEcho<W: Write> {
    out: W,
}

impl<W: Write> FullEcho<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> CallWriter for FullEcho<W> {
    fn header(&mut self, input_header: &str) -> io::Result<()> {
        writeln!(self.out, "final\t{input_header}")
    }

    fn call(&mut self, verdict: Verdict, start: &GoodStart) -> io::Result<()> {
        writeln!(self.out, "{}\t{}", verdict.as_str(), start.line())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Accepted starts only, as plus-strand CDS coordinates.
pub struct Compact<W: Write> {
    out: W,
}

impl<W: Write> Compact<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> CallWriter for Compact<W> {
    fn header(&mut self, _input_header: &str) -> io::Result<()> {
        writeln!(self.out, "contig\tstart\tstop\tconfidence\tstrand\ttype")
    }

    fn call(&mut self, verdict: Verdict, start: &GoodStart) -> io::Result<()> {
        match (verdict, start.orf_key()) {
            (Verdict::Start, Some(key)) => writeln!(
                self.out,
                "{}\t{}\t{}\t{:8.6}\t+\tCDS",
                key.contig,
                start.position(),
                key.stop,
                start.confidence()
            ),
            _ => Ok(()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Writer for the configured call format.
pub fn call_writer<'w, W: Write + 'w>(format: CallFormat, out: W) -> Box<dyn CallWriter + 'w> {
    match format {
        CallFormat::Full => Box::new(FullEcho::new(out)),
        CallFormat::Compact => Box::new(Compact::new(out)),
    }
}

/// Keeps the best start seen so far for every ORF.
pub struct BestStartResolver<'a> {
    orfs: &'a HashMap<String, FrameOrfIndex>,
    best: BTreeMap<OrfKey, GoodStart>,
    unknown_contigs: HashSet<String>,
}

impl<'a> BestStartResolver<'a> {
    pub fn new(orfs: &'a HashMap<String, FrameOrfIndex>) -> Self {
        Self {
            orfs,
            best: BTreeMap::new(),
            unknown_contigs: HashSet::new(),
        }
    }

    /// Key of the ORF enclosing `position`, if any.
    pub fn orf_key(&mut self, contig: &str, position: usize) -> Option<OrfKey> {
        let Some(index) = self.orfs.get(contig) else {
            if self.unknown_contigs.insert(contig.to_string()) {
                warn!("no stop predictions for contig {contig}; its starts are rejected");
            }
            return None;
        };
        index.find_enclosing_orf(position).map(|hit| OrfKey {
            contig: contig.into(),
            stop: hit.stop.position(),
        })
    }

    /// Consider one candidate. Returns the record rejected by this step, if any:
    /// the candidate itself when it is predicted `other`, has no ORF or loses
    /// to the retained start, otherwise the start it displaced.
    pub fn offer(&mut self, predicted: &str, candidate: GoodStart) -> Option<GoodStart> {
        if predicted == "other" {
            return Some(candidate);
        }
        let Some(key) = candidate.orf_key.clone() else {
            return Some(candidate);
        };
        match self.best.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
                None
            }
            Entry::Occupied(mut slot) => {
                if candidate.beats(slot.get()) {
                    Some(slot.insert(candidate))
                } else {
                    Some(candidate)
                }
            }
        }
    }

    /// Number of ORFs with a retained start.
    pub fn retained(&self) -> usize {
        self.best.len()
    }

    /// The accepted starts, ordered by contig and stop position.
    pub fn into_accepted(self) -> impl Iterator<Item = GoodStart> {
        self.best.into_values()
    }
}

/// Counts reported by [`resolve`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallSummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// Stream a scored start table (`location`, `predicted`, `confidence`
/// columns) through the resolver. Rejections are written as they happen,
/// accepted starts once the input is exhausted.
pub fn resolve<R: Read>(
    orfs: &HashMap<String, FrameOrfIndex>,
    mut table: TableReader<R>,
    writer: &mut dyn CallWriter,
) -> StartsResult<CallSummary> {
    let loc_col = table.column("location")?;
    let pred_col = table.column("predicted")?;
    let conf_col = table.column("confidence")?;

    writer.header(&table.header_line())?;
    let mut resolver = BestStartResolver::new(orfs);
    let mut summary = CallSummary::default();
    let mut record = StringRecord::new();
    while table.read_row(&mut record)? {
        let (contig, position) = table.location_field(&record, &loc_col)?;
        let predicted = table.field(&record, &pred_col)?;
        let confidence = table.f64_field(&record, &conf_col)?;
        let orf_key = resolver.orf_key(contig, position);
        let candidate = GoodStart::new(join_record(&record), confidence, position, orf_key);
        if let Some(rejected) = resolver.offer(predicted, candidate) {
            writer.call(Verdict::Other, &rejected)?;
            summary.rejected += 1;
        }
    }
    debug!(
        "{} candidates read from {}, {} ORFs with a retained start",
        table.row(),
        table.path(),
        resolver.retained()
    );
    for accepted in resolver.into_accepted() {
        writer.call(Verdict::Start, &accepted)?;
        summary.accepted += 1;
    }
    writer.flush()?;
    Ok(summary)
}
