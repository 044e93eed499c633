//! Input data types: the generic item projection of a search hit.
//!
//! Projections come from an external search engine, so they are read
//! leniently. A field that is missing or holds the wrong JSON type is simply
//! absent; nothing in here fails.

use serde_json::{Map, Value};

/// A link attached to a search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    /// Media type of the linked resource (the link's `type`).
    pub media_type: Option<String>,

    /// Target URL (the link's `href`).
    pub href: Option<String>,
}

impl Link {
    /// Create a link with both fields set.
    #[must_use]
    pub fn new(media_type: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            media_type: Some(media_type.into()),
            href: Some(href.into()),
        }
    }

    /// A non-object entry still counts as a link, with neither field set.
    fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            media_type: string_field(obj, "type"),
            href: string_field(obj, "href"),
        }
    }
}

/// Engine-specific fields from the `_source` bag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFields {
    /// `keywords_s`: keywords indexed for the item.
    pub keywords: Option<Vec<String>>,

    /// `fileid`: identifier of an uploaded data file.
    pub file_id: Option<String>,
}

impl SourceFields {
    fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let keywords = match obj.get("keywords_s") {
            Some(Value::Array(values)) => Some(
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            Some(Value::String(single)) => Some(vec![single.clone()]),
            _ => None,
        };

        Self {
            keywords,
            file_id: string_field(obj, "fileid"),
        }
    }
}

/// The generic JSON projection of one search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemProjection {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub updated: Option<String>,
    pub published: Option<String>,
    pub source: SourceFields,
    pub links: Vec<Link>,
}

impl ItemProjection {
    /// Read a projection from JSON.
    ///
    /// Anything other than an object yields an empty projection.
    ///
    /// # Examples
    /// ```
    /// use geoportal_dcat::types::ItemProjection;
    /// use serde_json::json;
    ///
    /// let item = ItemProjection::from_value(&json!({"id": 42, "title": "Parks"}));
    /// assert_eq!(item.id.as_deref(), Some("42"));
    /// assert_eq!(item.title.as_deref(), Some("Parks"));
    ///
    /// assert_eq!(ItemProjection::from_value(&json!(null)), ItemProjection::default());
    /// ```
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let id = match obj.get("id") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        let links = obj
            .get("links")
            .and_then(Value::as_array)
            .map(|links| links.iter().map(Link::from_value).collect())
            .unwrap_or_default();

        Self {
            id,
            title: string_field(obj, "title"),
            description: string_field(obj, "description"),
            updated: string_field(obj, "updated"),
            published: string_field(obj, "published"),
            source: obj
                .get("_source")
                .map(SourceFields::from_value)
                .unwrap_or_default(),
            links,
        }
    }

    /// Read a projection that may be missing altogether.
    #[must_use]
    pub fn from_optional(value: Option<&Value>) -> Self {
        value.map(Self::from_value).unwrap_or_default()
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}
