//! Tab-delimited tables with a header row.

use crate::error::{StartsError, StartsResult};
use csv::{ReaderBuilder, StringRecord};
use memchr::memchr;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A header column resolved to its index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    name: Box<str>,
    idx: usize,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> usize {
        self.idx
    }
}

pub struct TableReader<R: Read> {
    reader: csv::Reader<R>,
    headers: StringRecord,
    path: String,
    row: usize,
}

impl TableReader<File> {
    pub fn from_path(path: impl AsRef<Path>) -> StartsResult<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.display().to_string();
        let file = File::open(path_ref).map_err(|e| StartsError::TableParse {
            path: path_str.clone(),
            source: csv::Error::from(e),
        })?;
        Self::from_reader(file, path_str)
    }
}

impl<R: Read> TableReader<R> {
    /// `label` names the source in error messages.
    pub fn from_reader(rdr: R, label: impl Into<String>) -> StartsResult<Self> {
        let path = label.into();
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .from_reader(rdr);
        let headers = reader
            .headers()
            .map_err(|e| StartsError::TableParse {
                path: path.clone(),
                source: e,
            })?
            .clone();
        Ok(Self {
            reader,
            headers,
            path,
            row: 0,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// The header row as it appeared in the input.
    pub fn header_line(&self) -> String {
        join_record(&self.headers)
    }

    /// 1-based number of the data row most recently read.
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self, name: &str) -> StartsResult<Column> {
        self.headers
            .iter()
            .position(|h| h == name)
            .map(|idx| Column {
                name: name.into(),
                idx,
            })
            .ok_or_else(|| StartsError::MissingColumn {
                name: name.to_string(),
                headers: self.headers.iter().map(|s| s.to_string()).collect(),
                path: self.path.clone(),
            })
    }

    /// Read the next data row into `record`; `false` at end of input.
    pub fn read_row(&mut self, record: &mut StringRecord) -> StartsResult<bool> {
        let more = self
            .reader
            .read_record(record)
            .map_err(|e| StartsError::TableParse {
                path: self.path.clone(),
                source: e,
            })?;
        if more {
            self.row += 1;
        }
        Ok(more)
    }

    pub fn field<'r>(&self, record: &'r StringRecord, col: &Column) -> StartsResult<&'r str> {
        record
            .get(col.idx)
            .map(str::trim)
            .ok_or_else(|| StartsError::MissingField {
                row: self.row,
                column: col.name.to_string(),
                path: self.path.clone(),
            })
    }

    pub fn f64_field(&self, record: &StringRecord, col: &Column) -> StartsResult<f64> {
        let value = self.field(record, col)?;
        value.parse().map_err(|_| self.invalid_number(col, value))
    }

    pub fn usize_field(&self, record: &StringRecord, col: &Column) -> StartsResult<usize> {
        let value = self.field(record, col)?;
        value.parse().map_err(|_| self.invalid_number(col, value))
    }

    /// Split a `<contig>;<position>` field.
    pub fn location_field<'r>(
        &self,
        record: &'r StringRecord,
        col: &Column,
    ) -> StartsResult<(&'r str, usize)> {
        let value = self.field(record, col)?;
        let malformed = || StartsError::MalformedLocation {
            row: self.row,
            value: value.to_string(),
            path: self.path.clone(),
        };
        let (contig, position) = split_location(value).ok_or_else(|| malformed())?;
        let position = position.parse::<usize>().map_err(|_| malformed())?;
        if contig.is_empty() || position == 0 {
            return Err(malformed());
        }
        Ok((contig, position))
    }

    fn invalid_number(&self, col: &Column, value: &str) -> StartsError {
        StartsError::InvalidNumber {
            row: self.row,
            column: col.name.to_string(),
            value: value.to_string(),
            path: self.path.clone(),
        }
    }
}

fn split_location(value: &str) -> Option<(&str, &str)> {
    let idx = memchr(b';', value.as_bytes())?;
    Some((&value[..idx], value[idx + 1..].trim()))
}

/// Re-join a record with tabs, reproducing an unquoted input line.
pub fn join_record(record: &StringRecord) -> String {
    let mut out = String::with_capacity(record.as_slice().len() + record.len());
    for (i, field) in record.iter().enumerate() {
        if i > 0 {
            out.push('\t');
        }
        out.push_str(field);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(contents: &str) -> TableReader<&[u8]> {
        TableReader::from_reader(contents.as_bytes(), "test.tbl").unwrap()
    }

    #[test]
    fn reads_named_columns() {
        let mut t = table("location\tcodon\tconfidence\nc1;30\ttaa\t0.25\n");
        let loc = t.column("location").unwrap();
        let conf = t.column("confidence").unwrap();
        assert_eq!(conf.index(), 2);
        let mut record = StringRecord::new();
        assert!(t.read_row(&mut record).unwrap());
        assert_eq!(t.row(), 1);
        assert_eq!(t.location_field(&record, &loc).unwrap(), ("c1", 30));
        assert!((t.f64_field(&record, &conf).unwrap() - 0.25).abs() < 1e-12);
        assert!(!t.read_row(&mut record).unwrap());
    }

    #[test]
    fn missing_column_name() {
        let t = table("location\tcodon\n");
        match t.column("predicted").unwrap_err() {
            StartsError::MissingColumn { name, headers, .. } => {
                assert_eq!(name, "predicted");
                assert_eq!(headers, vec!["location", "codon"]);
            }
            other => panic!("expected missing column error, got {other:?}"),
        }
    }

    #[test]
    fn location_without_delimiter_is_fatal() {
        let mut t = table("location\nc1_30\n");
        let loc = t.column("location").unwrap();
        let mut record = StringRecord::new();
        t.read_row(&mut record).unwrap();
        match t.location_field(&record, &loc).unwrap_err() {
            StartsError::MalformedLocation { row, value, .. } => {
                assert_eq!(row, 1);
                assert_eq!(value, "c1_30");
            }
            other => panic!("expected malformed location error, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_position_is_fatal() {
        let mut t = table("location\nc1;abc\n");
        let loc = t.column("location").unwrap();
        let mut record = StringRecord::new();
        t.read_row(&mut record).unwrap();
        assert!(matches!(
            t.location_field(&record, &loc),
            Err(StartsError::MalformedLocation { .. })
        ));
    }

    #[test]
    fn invalid_number_reports_column() {
        let mut t = table("confidence\nhigh\n");
        let conf = t.column("confidence").unwrap();
        let mut record = StringRecord::new();
        t.read_row(&mut record).unwrap();
        match t.f64_field(&record, &conf).unwrap_err() {
            StartsError::InvalidNumber { column, value, .. } => {
                assert_eq!(column, "confidence");
                assert_eq!(value, "high");
            }
            other => panic!("expected invalid number error, got {other:?}"),
        }
    }

    #[test]
    fn missing_field_error() {
        let mut t = table("location\tconfidence\nc1;3\n");
        let conf = t.column("confidence").unwrap();
        let mut record = StringRecord::new();
        t.read_row(&mut record).unwrap();
        assert!(matches!(
            t.field(&record, &conf),
            Err(StartsError::MissingField { row: 1, .. })
        ));
    }

    #[test]
    fn header_and_rows_round_trip_as_text() {
        let mut t = table("location\tpredicted\tconfidence\nc1;3\tstart\t0.9\n");
        assert_eq!(t.header_line(), "location\tpredicted\tconfidence");
        let mut record = StringRecord::new();
        t.read_row(&mut record).unwrap();
        assert_eq!(join_record(&record), "c1;3\tstart\t0.9");
    }
}
