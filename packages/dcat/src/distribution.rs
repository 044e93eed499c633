//! Distribution extraction: the download and access points of a dataset.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::DISTRIBUTION_TYPE;
use crate::types::ItemProjection;

/// One access mechanism for a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Distribution {
    /// A data file stored with the item, addressed by its file id.
    Download { download_url: String },

    /// A resource referenced by one of the item's links.
    Access {
        media_type: Option<String>,
        access_url: Option<String>,
    },
}

impl Distribution {
    /// Create a download distribution.
    #[must_use]
    pub fn download(download_url: impl Into<String>) -> Self {
        Self::Download {
            download_url: download_url.into(),
        }
    }

    /// Create an access distribution with both fields set.
    #[must_use]
    pub fn access(media_type: impl Into<String>, access_url: impl Into<String>) -> Self {
        Self::Access {
            media_type: Some(media_type.into()),
            access_url: Some(access_url.into()),
        }
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("@type", DISTRIBUTION_TYPE)?;
        match self {
            Self::Download { download_url } => {
                map.serialize_entry("downloadURL", download_url)?;
            }
            Self::Access {
                media_type,
                access_url,
            } => {
                if let Some(media_type) = media_type {
                    map.serialize_entry("mediaType", media_type)?;
                }
                if let Some(access_url) = access_url {
                    map.serialize_entry("accessURL", access_url)?;
                }
            }
        }
        map.end()
    }
}

/// Build the distribution list of an item.
///
/// The file id (if any) comes first, then one entry per link in link order.
/// Nothing is deduplicated or validated.
#[must_use]
pub fn extract(item: &ItemProjection) -> Vec<Distribution> {
    let file = item
        .source
        .file_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .map(Distribution::download);

    let links = item.links.iter().map(|link| Distribution::Access {
        media_type: link.media_type.clone(),
        access_url: link.href.clone(),
    });

    file.into_iter().chain(links).collect()
}
