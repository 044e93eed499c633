//! Catalog-level defaults merged into every dataset record.
//!
//! A `DcatDefaults` value is built once at startup (either the built-in
//! table or a YAML override file) and then shared read-only by every
//! transformation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default license URI (U.S. public domain label).
pub const DEFAULT_LICENSE: &str = "http://www.usa.gov/publicdomain/label/1.0/";

/// Default access level.
pub const DEFAULT_ACCESS_LEVEL: &str = "public";

/// Default bureau code.
pub const DEFAULT_BUREAU_CODE: &str = "010:04";

/// Default program code.
pub const DEFAULT_PROGRAM_CODE: &str = "010:000";

/// Default publisher name.
pub const DEFAULT_PUBLISHER_NAME: &str = "Your Publisher";

/// JSON-LD type of the publisher record.
pub const PUBLISHER_TYPE: &str = "org:Organization";

/// Keyword used when an item carries none.
pub const DEFAULT_KEYWORD: &str = "metadata";

/// Publishing organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    /// JSON-LD type, `org:Organization`.
    #[serde(rename = "@type", default = "publisher_type")]
    pub kind: String,

    /// Organization name.
    #[serde(default = "publisher_name")]
    pub name: String,
}

fn publisher_type() -> String {
    PUBLISHER_TYPE.to_string()
}

fn publisher_name() -> String {
    DEFAULT_PUBLISHER_NAME.to_string()
}

impl Publisher {
    /// Create an organization publisher.
    #[must_use]
    pub fn organization(name: impl Into<String>) -> Self {
        Self {
            kind: publisher_type(),
            name: name.into(),
        }
    }
}

impl Default for Publisher {
    fn default() -> Self {
        Self::organization(DEFAULT_PUBLISHER_NAME)
    }
}

/// Catalog defaults.
///
/// Every field is optional in a YAML override file; missing keys keep
/// their built-in values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DcatDefaults {
    pub access_level: String,
    pub license: String,
    pub bureau_code: Vec<String>,
    pub program_code: Vec<String>,
    pub publisher: Publisher,
    pub keyword: Vec<String>,
}

impl Default for DcatDefaults {
    fn default() -> Self {
        Self {
            access_level: DEFAULT_ACCESS_LEVEL.to_string(),
            license: DEFAULT_LICENSE.to_string(),
            bureau_code: vec![DEFAULT_BUREAU_CODE.to_string()],
            program_code: vec![DEFAULT_PROGRAM_CODE.to_string()],
            publisher: Publisher::default(),
            keyword: vec![DEFAULT_KEYWORD.to_string()],
        }
    }
}

impl DcatDefaults {
    /// Parse defaults from YAML text.
    ///
    /// # Examples
    /// ```
    /// use geoportal_dcat::defaults::DcatDefaults;
    ///
    /// let defaults = DcatDefaults::from_yaml_str("accessLevel: restricted public\n").unwrap();
    /// assert_eq!(defaults.access_level, "restricted public");
    /// assert_eq!(defaults.keyword, vec!["metadata".to_string()]);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load defaults from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        let defaults = Self::from_yaml_str(&yaml)?;
        tracing::debug!(path = %path.display(), "Loaded catalog defaults");
        Ok(defaults)
    }

    /// Load from `path` when given, else use the built-in table.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_defaults() {
        let defaults = DcatDefaults::default();
        assert_eq!(defaults.access_level, "public");
        assert_eq!(defaults.license, "http://www.usa.gov/publicdomain/label/1.0/");
        assert_eq!(defaults.bureau_code, vec!["010:04"]);
        assert_eq!(defaults.program_code, vec!["010:000"]);
        assert_eq!(defaults.publisher.kind, "org:Organization");
        assert_eq!(defaults.publisher.name, "Your Publisher");
        assert_eq!(defaults.keyword, vec!["metadata"]);
    }

    #[test]
    fn test_partial_yaml_keeps_builtins() {
        let yaml = "publisher:\n  name: Department of Examples\nbureauCode:\n  - \"015:11\"\n";
        let defaults = DcatDefaults::from_yaml_str(yaml).unwrap();

        assert_eq!(defaults.publisher, Publisher::organization("Department of Examples"));
        assert_eq!(defaults.bureau_code, vec!["015:11"]);
        assert_eq!(defaults.program_code, vec!["010:000"]);
        assert_eq!(defaults.license, DEFAULT_LICENSE);
    }

    #[test]
    fn test_publisher_without_name_keeps_default_name() {
        let defaults = DcatDefaults::from_yaml_str("publisher: {}\n").unwrap();
        assert_eq!(defaults.publisher, Publisher::default());

        let yaml = "publisher:\n  \"@type\": org:Organization\n";
        let defaults = DcatDefaults::from_yaml_str(yaml).unwrap();
        assert_eq!(defaults.publisher.name, "Your Publisher");
    }

    #[test]
    fn test_empty_yaml_is_builtin() {
        assert_eq!(DcatDefaults::from_yaml_str("").unwrap(), DcatDefaults::default());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(DcatDefaults::from_yaml_str("keyword: {unclosed").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "keyword: [geospatial, catalog]").unwrap();

        let defaults = DcatDefaults::load(Some(file.path())).unwrap();
        assert_eq!(defaults.keyword, vec!["geospatial", "catalog"]);
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(DcatDefaults::load(None).unwrap(), DcatDefaults::default());
    }

    #[test]
    fn test_publisher_serialization() {
        let json = serde_json::to_value(Publisher::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"@type": "org:Organization", "name": "Your Publisher"})
        );
    }
}
