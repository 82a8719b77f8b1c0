use crate::error::StartsResult;
use crate::seq::feature::Strand;
use std::path::PathBuf;

/// Layout of the final start calls written by the resolver.
///
/// # Examples
///
/// ```rust
/// use orfstarts_core::config::{CallFormat, StartsConfig};
///
/// let config = StartsConfig {
///     call_format: CallFormat::Compact,
///     ..Default::default()
/// };
/// assert_eq!(config.call_format, CallFormat::Compact);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallFormat {
    /// Every input row echoed behind a `start`/`other` label, under a
    /// `final` column prepended to the input header.
    #[default]
    Full,

    /// One line per accepted start: contig, start, stop, confidence, strand
    /// and feature type.
    Compact,
}

/// Settings shared by the feature and call pipelines.
///
/// # Examples
///
/// ```rust
/// use orfstarts_core::config::StartsConfig;
/// use orfstarts_core::seq::Strand;
///
/// let config = StartsConfig::default();
/// assert_eq!(config.strand, Strand::Plus);
/// assert!(config.role_map.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct StartsConfig {
    /// Strand whose annotated features count as true starts when labeling.
    ///
    /// **Default**: [`Strand::Plus`]
    pub strand: Strand,

    /// Output layout for final start calls.
    ///
    /// **Default**: [`CallFormat::Full`]
    pub call_format: CallFormat,

    /// Role map file (`roleId <TAB> roleName`). When set, labeled tables
    /// report role ids instead of role names.
    ///
    /// **Default**: `None`
    pub role_map: Option<PathBuf>,

    /// Worker threads for per-contig feature extraction.
    ///
    /// **Default**: `None` (use all available cores)
    pub num_threads: Option<usize>,
}

impl Default for StartsConfig {
    fn default() -> Self {
        Self {
            strand: Strand::Plus,
            call_format: CallFormat::Full,
            role_map: None,
            num_threads: None,
        }
    }
}

impl StartsConfig {
    /// Size the global rayon pool from `num_threads`. A no-op when unset or
    /// when built without the `parallel` feature.
    pub fn configure_threads(&self) -> StartsResult<()> {
        #[cfg(feature = "parallel")]
        if let Some(num_threads) = self.num_threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build_global()
                .map_err(|e| crate::error::StartsError::ThreadPool(e.to_string()))?;
        }
        Ok(())
    }
}
