//! Configuration constants and runtime configuration for the DCAT writer.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DcatError, Result};

/// Schema version the catalog conforms to.
pub const CONFORMS_TO: &str = "https://project-open-data.cio.gov/v1.1/schema";

/// JSON Schema describing the catalog document.
pub const DESCRIBED_BY: &str = "https://project-open-data.cio.gov/v1.1/schema/catalog.json";

/// JSON-LD context of the catalog document.
pub const JSONLD_CONTEXT: &str = "https://project-open-data.cio.gov/v1.1/schema/catalog.jsonld";

/// `@type` of the catalog envelope.
pub const CATALOG_TYPE: &str = "dcat:Catalog";

/// `@type` of every dataset record.
pub const DATASET_TYPE: &str = "dcat:Dataset";

/// `@type` of every distribution.
pub const DISTRIBUTION_TYPE: &str = "dcat:Distribution";

/// Placeholder for required text fields the source item does not provide.
pub const UNKNOWN_PLACEHOLDER: &str = "<unknown>";

/// Cache location relative to the user's home directory.
pub const DEFAULT_CACHE_SUBDIR: &str = "dcat/cache";

/// Timestamp format embedded in cache file names.
pub const CACHE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H-%M";

/// Environment variable overriding the cache directory.
pub const ENV_CACHE_DIR: &str = "DCAT_CACHE_DIR";

/// Environment variable pointing at a YAML file with catalog defaults.
pub const ENV_DEFAULTS_FILE: &str = "DCAT_DEFAULTS_FILE";

/// Committed cache files: `cache*.dcat`, case-insensitive, no extra dots.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub static CACHE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^cache[^.]*\.dcat$").expect("valid regex"));

/// Default cache directory (`$HOME/dcat/cache`).
///
/// Falls back to a path relative to the working directory when no home
/// directory is known.
pub fn default_cache_dir() -> PathBuf {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(DEFAULT_CACHE_SUBDIR)
}

/// Runtime configuration, resolved from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DcatConfig {
    /// Directory holding cached catalogs.
    pub cache_dir: Option<PathBuf>,

    /// YAML file with catalog defaults.
    pub defaults_file: Option<PathBuf>,
}

impl DcatConfig {
    /// Read `DCAT_CACHE_DIR` and `DCAT_DEFAULTS_FILE`.
    ///
    /// Unset or empty variables leave the corresponding field empty.
    pub fn from_env() -> Result<Self> {
        let cache_dir = non_empty_env(ENV_CACHE_DIR)?.map(PathBuf::from);
        let defaults_file = non_empty_env(ENV_DEFAULTS_FILE)?.map(PathBuf::from);

        Ok(Self {
            cache_dir,
            defaults_file,
        })
    }

    /// Override the cache directory.
    #[must_use]
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    /// Override the defaults file.
    #[must_use]
    pub fn with_defaults_file(mut self, defaults_file: impl Into<PathBuf>) -> Self {
        self.defaults_file = Some(defaults_file.into());
        self
    }

    /// Cache directory to use, falling back to [`default_cache_dir`].
    pub fn resolved_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(default_cache_dir)
    }

    /// Defaults file, if one is configured.
    pub fn defaults_path(&self) -> Option<&Path> {
        self.defaults_file.as_deref()
    }
}

fn non_empty_env(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(DcatError::Config(format!(
            "{name} is not valid unicode"
        ))),
    }
}
