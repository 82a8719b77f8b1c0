//! Loaders for the genome provider's annotation tables.

use crate::error::{StartsError, StartsResult};
use crate::io::table::TableReader;
use crate::roles::RoleMap;
use crate::seq::feature::{FeatureLocation, GenomeFeature, Strand};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a feature table with `contig`, `begin`, `strand` and `function` columns.
pub fn read_features_from_path(path: impl AsRef<Path>) -> StartsResult<Vec<GenomeFeature>> {
    read_features(TableReader::from_path(path)?)
}

pub fn read_features<R: Read>(mut table: TableReader<R>) -> StartsResult<Vec<GenomeFeature>> {
    let contig_col = table.column("contig")?;
    let begin_col = table.column("begin")?;
    let strand_col = table.column("strand")?;
    let function_col = table.column("function")?;

    let mut features = Vec::new();
    let mut record = StringRecord::new();
    while table.read_row(&mut record)? {
        let contig = table.field(&record, &contig_col)?;
        let begin = table.usize_field(&record, &begin_col)?;
        let strand: Strand = table.field(&record, &strand_col)?.parse()?;
        // Hypothetical proteins and RNAs may carry an empty function.
        let function = record.get(function_col.index()).unwrap_or("").trim();
        features.push(GenomeFeature::new(
            FeatureLocation::new(contig, begin, strand),
            function,
        ));
    }
    Ok(features)
}

/// Read a headerless `roleId <TAB> roleName` file.
pub fn read_role_map_from_path(path: impl AsRef<Path>) -> StartsResult<RoleMap> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref)?;
    read_role_map(file, path_ref.display().to_string())
}

pub fn read_role_map<R: Read>(rdr: R, label: impl Into<String>) -> StartsResult<RoleMap> {
    let path = label.into();
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(rdr);

    let mut roles = RoleMap::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| StartsError::TableParse {
            path: path.clone(),
            source: e,
        })?;
        let row = row_idx + 1;
        let id = record.get(0).map(str::trim).unwrap_or("");
        // Some role files carry a checksum between the id and the name.
        let name = record.iter().last().map(str::trim).unwrap_or("");
        if record.len() < 2 || id.is_empty() || name.is_empty() {
            return Err(StartsError::MissingField {
                row,
                column: "role name".to_string(),
                path: path.clone(),
            });
        }
        roles.insert(name, id);
    }
    Ok(roles)
}
