use crate::error::{StartsError, StartsResult};
use crate::seq::dna::DnaSeq;
use crate::seq::record::Contig;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

/// Streaming FASTA reader producing validated, lowercased contigs.
pub struct FastaContigs<R> {
    reader: R,
    line_no: usize,
    pending_header: Option<(String, usize)>,
    buf_line: String,
    seq_buf: Vec<u8>,
}

impl<R: BufRead> FastaContigs<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            pending_header: None,
            buf_line: String::new(),
            seq_buf: Vec::new(),
        }
    }

    fn next_header(&mut self) -> Option<StartsResult<(String, usize)>> {
        if let Some(pending) = self.pending_header.take() {
            return Some(Ok(pending));
        }

        loop {
            self.buf_line.clear();
            match self.reader.read_line(&mut self.buf_line) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_no += 1;
                    let line_no = self.line_no;
                    if self.buf_line.starts_with('>') {
                        return Some(Ok((self.buf_line.clone(), line_no)));
                    }
                    if self.buf_line.trim().is_empty() {
                        continue;
                    }
                    return Some(Err(StartsError::FastaFormat {
                        msg: "expected header line starting with '>'",
                        line: line_no,
                    }));
                }
                Err(err) => return Some(Err(StartsError::Io(err))),
            }
        }
    }
}

impl<R: BufRead> Iterator for FastaContigs<R> {
    type Item = StartsResult<Contig>;

    fn next(&mut self) -> Option<Self::Item> {
        let (header_line, header_line_no) = match self.next_header()? {
            Ok(header) => header,
            Err(err) => return Some(Err(err)),
        };

        let (id, desc) = match parse_header(&header_line, header_line_no) {
            Ok(parsed) => parsed,
            Err(err) => return Some(Err(err)),
        };

        self.seq_buf.clear();

        loop {
            self.buf_line.clear();
            match self.reader.read_line(&mut self.buf_line) {
                Ok(0) => break,
                Ok(_) => {
                    self.line_no += 1;
                    let line_no = self.line_no;
                    if self.buf_line.starts_with('>') {
                        self.pending_header = Some((self.buf_line.clone(), line_no));
                        break;
                    }
                    self.seq_buf.extend(
                        self.buf_line
                            .bytes()
                            .filter(|b| !b.is_ascii_whitespace()),
                    );
                }
                Err(err) => return Some(Err(StartsError::Io(err))),
            }
        }

        let capacity = self.seq_buf.capacity();
        let bytes = std::mem::take(&mut self.seq_buf);
        let seq = match DnaSeq::new(bytes) {
            Ok(seq) => seq,
            Err(err) => return Some(Err(err)),
        };
        self.seq_buf = Vec::with_capacity(capacity);

        let mut contig = Contig::new(id, seq);
        if let Some(desc) = desc {
            contig = contig.with_desc(desc);
        }
        Some(Ok(contig))
    }
}

pub fn read_contigs_from_reader<R: BufRead>(reader: R) -> StartsResult<Vec<Contig>> {
    FastaContigs::new(reader).collect()
}

pub fn read_contigs_from_path(path: impl AsRef<Path>) -> StartsResult<Vec<Contig>> {
    let file = File::open(path)?;
    read_contigs_from_reader(BufReader::new(file))
}

pub fn read_contigs_from_bytes(data: &[u8]) -> StartsResult<Vec<Contig>> {
    read_contigs_from_reader(BufReader::new(Cursor::new(data)))
}

fn parse_header(header_line: &str, line_no: usize) -> StartsResult<(Box<str>, Option<Box<str>>)> {
    let header = header_line.strip_prefix('>').ok_or(StartsError::FastaFormat {
        msg: "expected header line starting with '>'",
        line: line_no,
    })?;

    let header = header.trim_end_matches(&['\n', '\r'][..]).trim_start();
    if header.is_empty() {
        return Err(StartsError::FastaFormat {
            msg: "empty header",
            line: line_no,
        });
    }

    let (id, desc) = match header.find(|c: char| c.is_whitespace()) {
        Some(idx) => {
            let id = &header[..idx];
            let desc = header[idx..].trim();
            let desc = if desc.is_empty() { None } else { Some(desc) };
            (id, desc)
        }
        None => (header, None),
    };

    Ok((id.into(), desc.map(|s| s.into())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_contig() {
        let contigs = read_contigs_from_bytes(b">NC_004347\nACGT\n").unwrap();
        assert_eq!(contigs.len(), 1);
        assert_eq!(contigs[0].id(), "NC_004347");
        assert_eq!(contigs[0].desc(), None);
        assert_eq!(contigs[0].seq().as_bytes(), b"acgt");
    }

    #[test]
    fn header_description_is_split_off() {
        let contigs = read_contigs_from_bytes(b">c1 plasmid pXO1\nAC\nGT\n").unwrap();
        assert_eq!(contigs[0].id(), "c1");
        assert_eq!(contigs[0].desc(), Some("plasmid pXO1"));
        assert_eq!(contigs[0].seq().as_bytes(), b"acgt");
    }

    #[test]
    fn multiple_contigs_keep_file_order() {
        let contigs = read_contigs_from_bytes(b">c2\nAC\n>c1\nGT\n").unwrap();
        let ids: Vec<&str> = contigs.iter().map(|c| c.id()).collect();
        assert_eq!(ids, ["c2", "c1"]);
    }

    #[test]
    fn empty_sequence_allowed() {
        let contigs = read_contigs_from_bytes(b">c1\n>c2\nA\n").unwrap();
        assert_eq!(contigs.len(), 2);
        assert!(contigs[0].seq().is_empty());
    }

    #[test]
    fn sequence_before_header_is_an_error() {
        let err = read_contigs_from_bytes(b"ACGT\n>c1\nAC\n").unwrap_err();
        assert!(matches!(err, StartsError::FastaFormat { line: 1, .. }));
    }

    #[test]
    fn invalid_sequence_char() {
        let err = read_contigs_from_bytes(b">c1\nAC#\n").unwrap_err();
        assert!(matches!(err, StartsError::InvalidChar { ch: '#', .. }));
    }
}
