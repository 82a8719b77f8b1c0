//! Ground-truth start annotations: which functional roles begin at a position.

use crate::seq::feature::{GenomeFeature, Strand};
use log::debug;
use memchr::memchr2;
use std::collections::HashMap;

/// Separators between the roles of a multi-role function.
const ROLE_SEPARATORS: [&str; 3] = [" / ", " @ ", "; "];

/// Separator used when several roles share a start position.
pub const ROLE_JOIN: &str = " / ";

/// Role name to role id lookup.
#[derive(Clone, Debug, Default)]
pub struct RoleMap {
    ids: HashMap<Box<str>, Box<str>>,
}

impl RoleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`; a repeated name keeps its latest id.
    pub fn insert(&mut self, name: &str, id: &str) {
        self.ids.insert(name.into(), id.into());
    }

    pub fn id_of(&self, name: &str) -> Option<&str> {
        self.ids.get(name).map(|id| &**id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Split a functional assignment into its role names.
///
/// Comments introduced by `#` or `!` are dropped first.
pub fn roles_of_function(function: &str) -> Vec<&str> {
    let body = match memchr2(b'#', b'!', function.as_bytes()) {
        Some(cut) => &function[..cut],
        None => function,
    };
    let mut roles = vec![body.trim()];
    for sep in ROLE_SEPARATORS {
        roles = roles
            .into_iter()
            .flat_map(|part| part.split(sep))
            .map(str::trim)
            .collect();
    }
    roles.retain(|role| !role.is_empty());
    roles
}

/// Start positions of annotated features on one contig, with their roles.
///
/// A position with an annotated start but no usable role maps to an empty
/// string; it is still a true start.
#[derive(Clone, Debug, Default)]
pub struct StartRoleIndex {
    starts: HashMap<usize, String>,
}

impl StartRoleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the features on `strand`, keyed by contig id.
    ///
    /// With a role map, role names are replaced by their ids; names the map
    /// does not know are kept as they are.
    pub fn build(
        features: &[GenomeFeature],
        strand: Strand,
        role_map: Option<&RoleMap>,
    ) -> HashMap<String, StartRoleIndex> {
        let mut contigs: HashMap<String, StartRoleIndex> = HashMap::new();
        let mut indexed = 0usize;
        for feature in features {
            let location = feature.location();
            if location.strand() != strand {
                continue;
            }
            let roles = roles_of_function(feature.function())
                .into_iter()
                .map(|name| role_map.and_then(|map| map.id_of(name)).unwrap_or(name));
            contigs
                .entry(location.contig().to_string())
                .or_default()
                .add_start(location.begin(), roles);
            indexed += 1;
        }
        debug!(
            "indexed {indexed} feature starts on strand {strand} across {} contigs",
            contigs.len()
        );
        contigs
    }

    /// Append roles at `position`, in order and without deduplication.
    pub fn add_start<'r>(&mut self, position: usize, roles: impl IntoIterator<Item = &'r str>) {
        let entry = self.starts.entry(position).or_default();
        for role in roles {
            if !entry.is_empty() {
                entry.push_str(ROLE_JOIN);
            }
            entry.push_str(role);
        }
    }

    pub fn roles(&self, position: usize) -> Option<&str> {
        self.starts.get(&position).map(String::as_str)
    }

    pub fn is_start(&self, position: usize) -> bool {
        self.starts.contains_key(&position)
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::feature::FeatureLocation;

    fn feature(contig: &str, begin: usize, strand: Strand, function: &str) -> GenomeFeature {
        GenomeFeature::new(FeatureLocation::new(contig, begin, strand), function)
    }

    #[test]
    fn split_multi_role_functions() {
        assert_eq!(roles_of_function("Thioredoxin"), ["Thioredoxin"]);
        assert_eq!(
            roles_of_function("Alpha / Beta @ Gamma; Delta"),
            ["Alpha", "Beta", "Gamma", "Delta"]
        );
        assert_eq!(
            roles_of_function("Thioredoxin # frameshift"),
            ["Thioredoxin"]
        );
        assert_eq!(roles_of_function("Kinase ! curated / ignored"), ["Kinase"]);
        assert!(roles_of_function("").is_empty());
        assert!(roles_of_function("  # only a comment").is_empty());
    }

    #[test]
    fn roles_join_in_encounter_order() {
        let features = vec![
            feature("c1", 100, Strand::Plus, "Alpha / Beta"),
            feature("c1", 100, Strand::Plus, "Alpha"),
            feature("c1", 400, Strand::Minus, "Reverse"),
            feature("c2", 7, Strand::Plus, "Gamma"),
        ];
        let index = StartRoleIndex::build(&features, Strand::Plus, None);
        assert_eq!(index.len(), 2);
        assert_eq!(index["c1"].roles(100), Some("Alpha / Beta / Alpha"));
        assert_eq!(index["c1"].roles(400), None);
        assert_eq!(index["c2"].roles(7), Some("Gamma"));
        assert_eq!(index["c2"].roles(8), None);
    }

    #[test]
    fn minus_strand_index() {
        let features = vec![
            feature("c1", 100, Strand::Plus, "Alpha"),
            feature("c1", 400, Strand::Minus, "Reverse"),
        ];
        let index = StartRoleIndex::build(&features, Strand::Minus, None);
        assert!(!index["c1"].is_start(100));
        assert_eq!(index["c1"].roles(400), Some("Reverse"));
    }

    #[test]
    fn role_map_translates_known_names() {
        let mut map = RoleMap::new();
        map.insert("Alpha", "RoleA");
        let features = vec![feature("c1", 10, Strand::Plus, "Alpha / Unmapped")];
        let index = StartRoleIndex::build(&features, Strand::Plus, Some(&map));
        assert_eq!(index["c1"].roles(10), Some("RoleA / Unmapped"));
    }

    #[test]
    fn unnamed_feature_is_still_a_start() {
        let features = vec![feature("c1", 10, Strand::Plus, "")];
        let index = StartRoleIndex::build(&features, Strand::Plus, None);
        assert!(index["c1"].is_start(10));
        assert_eq!(index["c1"].roles(10), Some(""));
    }
}
