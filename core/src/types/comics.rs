//! Records returned by the comics backend (`/characters`).

use serde::{Deserialize, Serialize};

use super::{null_as_default, CharacterSummary};

/// Response envelope wrapping every comics payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicsEnvelope {
    pub code: i64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub attribution_text: Option<String>,
    pub data: ComicsPage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComicsPage {
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<ComicCharacter>,
}

/// One character from the comics backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComicCharacter {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub thumbnail: Thumbnail,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comics: Option<ResourceList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<ResourceList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stories: Option<ResourceList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<ResourceList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

impl CharacterSummary for ComicCharacter {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn image_url(&self) -> String {
        self.thumbnail.url()
    }
}

/// Image reference split into a path and a file extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub path: String,
    pub extension: String,
}

impl Thumbnail {
    pub fn new(path: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            extension: extension.into(),
        }
    }

    /// `path.extension`, with plain `http:` upgraded to `https:`.
    pub fn url(&self) -> String {
        let path = match self.path.strip_prefix("http:") {
            Some(rest) => format!("https:{rest}"),
            None => self.path.clone(),
        };
        format!("{path}.{}", self.extension)
    }
}

/// Cross-reference list (comics, series, stories, events). Decorative only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub available: Option<i64>,
    #[serde(default)]
    pub returned: Option<i64>,
    #[serde(default, rename = "collectionURI")]
    pub collection_uri: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<ResourceItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceItem {
    #[serde(default, rename = "resourceURI")]
    pub resource_uri: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}
