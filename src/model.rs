//! Value types for content items, languages and identifiers.
//!
//! All of these are owned by the hosting content store; the router only
//! reads them and decides which one the current request should point at.

use {
    crate::{Error, Result},
    serde::{Deserialize, Deserializer},
    std::{
        fmt,
        hash::{Hash, Hasher},
        str::FromStr,
    },
    uuid::Uuid,
};

/// Identifier of a content item.
///
/// Accepts the plain, hyphenated and braced (`{...}`) UUID forms and
/// displays in the braced upper-case form used by content editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generates a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for ItemId {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0.braced())
    }
}

/// How configuration refers to an item: by identifier or by content path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRef {
    Id(ItemId),
    Path(String),
}

impl FromStr for ItemRef {
    type Err = Error;

    /// Anything starting with `/` is a content path, everything else must
    /// parse as an [`ItemId`].
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::invalid_input("empty item reference"));
        }
        if s.starts_with('/') {
            return Ok(ItemRef::Path(s.to_string()));
        }
        Ok(ItemRef::Id(s.parse()?))
    }
}

impl From<ItemId> for ItemRef {
    fn from(id: ItemId) -> Self {
        ItemRef::Id(id)
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemRef::Id(id) => write!(f, "{id}"),
            ItemRef::Path(path) => write!(f, "{path}"),
        }
    }
}

/// A content language such as `en`, `fr` or `fr-CA`.
///
/// Language names compare case-insensitively: `EN-us` and `en-US` are the
/// same language.
#[derive(Debug, Clone, Eq)]
pub struct Language(String);

impl Language {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// True when `tag` names this language, ignoring case.
    pub fn matches(&self, tag: &str) -> bool {
        self.0.eq_ignore_ascii_case(tag)
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

impl Hash for Language {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Language)
    }
}

/// One language version of a content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub id: ItemId,
    /// Full content path, e.g. `/sitecore/content/home/products`.
    pub path: String,
    /// Language of this version.
    pub language: Language,
    /// Number of versions that exist in `language`. Zero means the item has
    /// no translation in that language.
    pub version_count: usize,
}

impl ContentItem {
    pub fn has_versions(&self) -> bool {
        self.version_count > 0
    }
}

/// Whether generated URLs carry the content language as a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageEmbedding {
    Never,
    #[default]
    AsNeeded,
    Always,
}
