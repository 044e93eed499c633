//! Catalog assembly: one search-result page in, one DCAT catalog out.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::config::{CATALOG_TYPE, CONFORMS_TO, DESCRIBED_BY, JSONLD_CONTEXT};
use crate::defaults::DcatDefaults;
use crate::entry::{transform_entry, DcatDataset};
use crate::types::ItemProjection;

/// Projects an engine item to its generic JSON form.
///
/// Returning `None` means the projection failed; the item is then treated
/// as an empty object.
pub trait ItemProjector<T> {
    fn item_to_json(&self, item: &T) -> Option<Value>;
}

/// Projector for items that already are JSON projections.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonProjector;

impl ItemProjector<Value> for JsonProjector {
    fn item_to_json(&self, item: &Value) -> Option<Value> {
        Some(item.clone())
    }
}

/// One page of search results, as exposed by the search engine.
pub trait SearchResponse {
    type Item;

    /// Items on this page; `None` when the engine returned no item list.
    fn items(&self) -> Option<&[Self::Item]>;

    /// 1-based index of the first item on this page.
    fn start_index(&self) -> Number;

    /// Total hits available upstream.
    fn total_hits(&self) -> Number;

    /// Requested page size, if the request carried a numeric one.
    fn items_per_page(&self) -> Option<f64>;

    /// Start index of the next page, or `-1` when there is none.
    fn calc_next_record(&self) -> i64;
}

/// A search-result page read from JSON.
///
/// Counters that are missing, `null` or not numbers are absent; an item
/// list that is not an array is absent too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default, deserialize_with = "lenient_items")]
    pub items: Option<Vec<Value>>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub start_index: Option<Number>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub total_hits: Option<Number>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub items_per_page: Option<Number>,

    /// Cursor supplied by the engine; computed when absent.
    #[serde(default, deserialize_with = "lenient_number")]
    pub next_start: Option<Number>,
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => Some(n),
        _ => None,
    })
}

fn lenient_items<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items),
        _ => None,
    })
}

/// Integral view of a counter; fractions are truncated.
fn as_index(n: &Number) -> Option<i64> {
    n.as_i64()
        .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}

impl SearchPage {
    /// Create a page holding `items`.
    #[must_use]
    pub fn new(items: Vec<Value>, start_index: u64, total_hits: u64, items_per_page: u64) -> Self {
        Self {
            items: Some(items),
            start_index: Some(start_index.into()),
            total_hits: Some(total_hits.into()),
            items_per_page: Some(items_per_page.into()),
            next_start: None,
        }
    }

    /// Parse a page from JSON text.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl SearchResponse for SearchPage {
    type Item = Value;

    fn items(&self) -> Option<&[Value]> {
        self.items.as_deref()
    }

    fn start_index(&self) -> Number {
        self.start_index.clone().unwrap_or_else(|| Number::from(1))
    }

    fn total_hits(&self) -> Number {
        self.total_hits.clone().unwrap_or_else(|| Number::from(0))
    }

    fn items_per_page(&self) -> Option<f64> {
        self.items_per_page.as_ref().and_then(Number::as_f64)
    }

    fn calc_next_record(&self) -> i64 {
        if let Some(next) = self.next_start.as_ref().and_then(as_index) {
            return next;
        }

        let returned = i64::try_from(self.items.as_ref().map_or(0, Vec::len)).unwrap_or(i64::MAX);
        let total = self.total_hits.as_ref().and_then(as_index).unwrap_or(0);
        let start = self.start_index.as_ref().and_then(as_index).unwrap_or(1);
        let page_requested = self.items_per_page().is_some_and(|n| n > 0.0);
        if total <= 0 || returned == 0 || !page_requested {
            return -1;
        }

        let next = start.saturating_add(returned);
        if next > total {
            -1
        } else {
            next
        }
    }
}

/// The `dcat:Catalog` envelope for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEnvelope {
    pub conforms_to: &'static str,
    pub described_by: &'static str,
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub start: Number,
    pub num: usize,
    pub total: Number,
    pub next_start: i64,
    pub dataset: Vec<DcatDataset>,
}

/// Assemble the catalog for one search-result page.
///
/// A page requested with `itemsPerPage == 0` reports `num = 0` and an empty
/// dataset list even when the engine returned items. Datasets are only
/// produced when the page size is known and positive; a missing or negative
/// page size counts the items but produces no datasets.
pub fn assemble<S, P>(search_result: &S, projector: &P, defaults: &DcatDefaults) -> CatalogEnvelope
where
    S: SearchResponse,
    P: ItemProjector<S::Item>,
{
    let items = search_result.items().unwrap_or_default();
    let items_per_page = search_result.items_per_page();

    let num = if items_per_page.is_some_and(|n| n == 0.0) {
        0
    } else {
        items.len()
    };

    let dataset: Vec<DcatDataset> = if items_per_page.is_some_and(|n| n > 0.0) {
        items
            .iter()
            .map(|item| {
                let json = projector.item_to_json(item);
                transform_entry(&ItemProjection::from_optional(json.as_ref()), defaults)
            })
            .collect()
    } else {
        if !items.is_empty() {
            tracing::warn!(
                items = items.len(),
                items_per_page = ?items_per_page,
                "Page size is not positive, returning an empty dataset list"
            );
        }
        Vec::new()
    };

    let envelope = CatalogEnvelope {
        conforms_to: CONFORMS_TO,
        described_by: DESCRIBED_BY,
        context: JSONLD_CONTEXT,
        kind: CATALOG_TYPE,
        start: search_result.start_index(),
        num,
        total: search_result.total_hits(),
        next_start: search_result.calc_next_record(),
        dataset,
    };

    tracing::debug!(
        start = %envelope.start,
        num = envelope.num,
        total = %envelope.total,
        next_start = envelope.next_start,
        "Assembled DCAT catalog page"
    );

    envelope
}
