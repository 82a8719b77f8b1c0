//! Stop-codon indexing and ORF lookup.
//!
//! Each contig gets a [`FrameOrfIndex`] holding one [`StopCodonIndex`] per
//! reading frame (`position % 3`). A query for a position returns the first
//! stop at or after it in the same frame together with the interior length of
//! the ORF that stop closes.

pub mod frames;
pub mod stops;

pub use frames::{frame_of, FrameOrfIndex};
pub use stops::{orf_length, OrfHit, OrfIter, StopCodon, StopCodonIndex};
