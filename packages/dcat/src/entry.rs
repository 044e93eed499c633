//! Conversion of one item projection into a DCAT dataset record.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{DATASET_TYPE, UNKNOWN_PLACEHOLDER};
use crate::date::{select_valid_date, to_iso_string};
use crate::defaults::{DcatDefaults, Publisher};
use crate::distribution::{extract, Distribution};
use crate::types::ItemProjection;

/// A `dcat:Dataset` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DcatDataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub title: String,
    pub description: String,
    pub modified: String,
    pub keyword: Vec<String>,
    pub distribution: Vec<Distribution>,

    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub license: String,
    pub access_level: String,
    pub bureau_code: Vec<String>,
    pub program_code: Vec<String>,
    pub publisher: Publisher,
}

/// Transform one item into a dataset, using the current time when the
/// item carries no usable date.
///
/// # Examples
/// ```
/// use geoportal_dcat::defaults::DcatDefaults;
/// use geoportal_dcat::entry::transform_entry;
/// use geoportal_dcat::types::ItemProjection;
///
/// let dataset = transform_entry(&ItemProjection::default(), &DcatDefaults::default());
/// assert_eq!(dataset.title, "<unknown>");
/// assert_eq!(dataset.keyword, vec!["metadata".to_string()]);
/// ```
#[must_use]
pub fn transform_entry(item: &ItemProjection, defaults: &DcatDefaults) -> DcatDataset {
    transform_entry_with_clock(item, defaults, Utc::now)
}

/// Transform one item, sampling `now` only if no source date is usable.
#[must_use]
pub fn transform_entry_with_clock<F>(
    item: &ItemProjection,
    defaults: &DcatDefaults,
    now: F,
) -> DcatDataset
where
    F: FnOnce() -> DateTime<Utc>,
{
    let modified = select_valid_date(&[item.updated.as_deref(), item.published.as_deref()])
        .unwrap_or_else(|| {
            tracing::debug!(
                id = item.id.as_deref().unwrap_or_default(),
                "No valid source date, using current time"
            );
            to_iso_string(&now())
        });

    let keyword = item
        .source
        .keywords
        .as_ref()
        .filter(|keywords| !keywords.is_empty())
        .cloned()
        .unwrap_or_else(|| defaults.keyword.clone());

    DcatDataset {
        identifier: item.id.clone(),
        title: text_or_placeholder(item.title.as_deref()),
        description: text_or_placeholder(item.description.as_deref()),
        modified,
        keyword,
        distribution: extract(item),
        kind: DATASET_TYPE,
        license: defaults.license.clone(),
        access_level: defaults.access_level.clone(),
        bureau_code: defaults.bureau_code.clone(),
        program_code: defaults.program_code.clone(),
        publisher: defaults.publisher.clone(),
    }
}

fn text_or_placeholder(text: Option<&str>) -> String {
    match text {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => UNKNOWN_PLACEHOLDER.to_string(),
    }
}
