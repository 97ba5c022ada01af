//! Domain DTOs for both character backends.
//!
//! # Design
//! The two backends share nothing beyond an id, a name and an image, so each
//! gets its own record type and only [`CharacterSummary`] spans both. Decoding
//! is forward-compatible: unknown keys are ignored and absent optional keys
//! become `None` rather than empty strings.

pub mod comics;
pub mod roster;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

pub use comics::{ComicCharacter, ComicsEnvelope, ComicsPage, ResourceItem, ResourceList, Thumbnail};
pub use roster::{Ability, AbilityGroup, Costume, RosterCharacter, Transformation};

/// The subset of a character both backends agree on.
pub trait CharacterSummary {
    fn id(&self) -> String;
    fn name(&self) -> &str;
    /// Fully resolved image URL.
    fn image_url(&self) -> String;
}

/// Offset/limit pair for paginated backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    offset: u32,
    limit: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 20;
    /// Largest page the comics backend accepts.
    pub const MAX_LIMIT: u32 = 100;

    /// Builds a page, clamping `limit` to `1..=MAX_LIMIT`.
    ///
    /// A `limit` of 0 becomes 1 and anything above [`Page::MAX_LIMIT`]
    /// becomes `MAX_LIMIT`, so `Page::new(0, 500)` fetches at most 100
    /// characters. Use [`Page::try_new`] to reject such limits instead.
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset,
            limit: limit.clamp(1, Self::MAX_LIMIT),
        }
    }

    /// Like [`Page::new`] but returns `None` when `limit` is outside
    /// `1..=MAX_LIMIT`.
    pub fn try_new(offset: u32, limit: u32) -> Option<Self> {
        (1..=Self::MAX_LIMIT)
            .contains(&limit)
            .then_some(Self { offset, limit })
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn is_first(&self) -> bool {
        self.offset == 0
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(s) => s,
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// `null` decodes as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `"12"` or `12` and yields `"12"`.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(String::from)
}

pub(crate) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

/// Free-form string map; scalar values are stringified and nulls dropped.
pub(crate) fn opt_string_map<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw.map(|map| {
        map.into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some((key, s)),
                other => Some((key, other.to_string())),
            })
            .collect()
    }))
}
