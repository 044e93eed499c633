//! Geoportal DCAT writer - Convert catalog search results to DCAT-US JSON-LD.
//!
//! This crate turns one page of generic search-result items into a
//! `dcat:Catalog` document conforming to the Project Open Data v1.1 schema.
//!
//! # Example
//!
//! ```
//! use geoportal_dcat::{assemble, DcatDefaults, JsonProjector, SearchPage};
//! use serde_json::json;
//!
//! let page = SearchPage::new(
//!     vec![json!({"id": "x1", "title": "Parks", "updated": "2021-06-01T00:00:00Z"})],
//!     1,
//!     1,
//!     10,
//! );
//! let catalog = assemble(&page, &JsonProjector, &DcatDefaults::default());
//!
//! assert_eq!(catalog.num, 1);
//! assert_eq!(catalog.dataset[0].modified, "2021-06-01T00:00:00.000Z");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Schema constants and runtime configuration
//! - [`defaults`]: Catalog-level defaults (license, publisher, ...)
//! - [`types`]: Lenient item projection input types
//! - [`date`]: Date parsing and first-valid date selection
//! - [`distribution`]: Distribution extraction
//! - [`entry`]: Item to dataset transformation
//! - [`catalog`]: Catalog envelope assembly
//! - [`writer`]: JSON output
//! - [`cache`]: On-disk catalog cache
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod date;
pub mod defaults;
pub mod distribution;
pub mod entry;
pub mod error;
pub mod types;
pub mod writer;

// Re-export main functions
pub use catalog::assemble;
pub use date::select_valid_date;
pub use distribution::extract;
pub use entry::transform_entry;

// Re-export commonly used items
pub use cache::DcatCache;
pub use catalog::{CatalogEnvelope, ItemProjector, JsonProjector, SearchPage, SearchResponse};
pub use config::DcatConfig;
pub use defaults::{DcatDefaults, Publisher};
pub use distribution::Distribution;
pub use entry::DcatDataset;
pub use error::{DcatError, Result};
pub use types::{ItemProjection, Link, SourceFields};
