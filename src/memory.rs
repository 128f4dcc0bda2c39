//! In-process content store.
//!
//! [`MemoryContentStore`] implements [`ContentHost`] over concurrent maps so
//! the router can run without an external content platform, for demos,
//! tests and small sites whose content tree is built at startup.

use {
    crate::{
        ContentHost, ContentItem, ItemId, ItemRef, Language, LanguageEmbedding, SiteConfig,
        utils::strip_prefix_ignore_case,
    },
    dashmap::DashMap,
    std::collections::HashMap,
};

#[derive(Debug, Clone)]
struct StoredItem {
    path: String,
    versions: HashMap<Language, usize>,
}

/// Concurrent in-memory implementation of [`ContentHost`].
///
/// ```
/// use splash_router::{ContentHost, ItemRef, Language, MemoryContentStore};
///
/// let store = MemoryContentStore::new("en");
/// store.add_language("fr");
/// let home = store.add_item("/sitecore/content/home");
/// store.add_version(home, "en");
///
/// let item = store.get_item(&ItemRef::Id(home), Some(&Language::new("fr"))).unwrap();
/// assert_eq!(item.version_count, 0);
/// ```
#[derive(Debug)]
pub struct MemoryContentStore {
    default_language: Language,
    languages: DashMap<String, Language>,
    items: DashMap<ItemId, StoredItem>,
    paths: DashMap<String, ItemId>,
}

impl MemoryContentStore {
    /// Creates an empty store whose default (and first configured) language
    /// is `default_language`.
    pub fn new(default_language: impl Into<Language>) -> Self {
        let default_language = default_language.into();
        let store = Self {
            default_language: default_language.clone(),
            languages: DashMap::new(),
            items: DashMap::new(),
            paths: DashMap::new(),
        };
        store.add_language(default_language);
        store
    }

    /// Configures a language on the content database.
    pub fn add_language(&self, language: impl Into<Language>) {
        let language = language.into();
        self.languages
            .insert(language.name().to_ascii_lowercase(), language);
    }

    /// Adds an item at `path` under a fresh identifier.
    pub fn add_item(&self, path: &str) -> ItemId {
        let id = ItemId::random();
        self.add_item_with_id(id, path);
        id
    }

    /// Adds (or moves) the item `id` to `path`. Existing versions are kept.
    pub fn add_item_with_id(&self, id: ItemId, path: &str) {
        let path = normalize_path(path);
        let previous = self
            .items
            .get(&id)
            .map(|stored| stored.path.to_lowercase());
        if let Some(previous) = previous {
            self.paths.remove(&previous);
        }
        self.paths.insert(path.to_lowercase(), id);
        self.items
            .entry(id)
            .and_modify(|stored| stored.path = path.clone())
            .or_insert_with(|| StoredItem {
                path: path.clone(),
                versions: HashMap::new(),
            });
    }

    /// Adds one version of `id` in `language`. Returns false when the item
    /// does not exist.
    pub fn add_version(&self, id: ItemId, language: impl Into<Language>) -> bool {
        let Some(mut stored) = self.items.get_mut(&id) else {
            return false;
        };
        *stored.versions.entry(language.into()).or_insert(0) += 1;
        true
    }

    pub fn default_language(&self) -> &Language {
        &self.default_language
    }

    fn find(&self, item: &ItemRef) -> Option<(ItemId, StoredItem)> {
        let id = match item {
            ItemRef::Id(id) => *id,
            ItemRef::Path(path) => *self.paths.get(&normalize_path(path).to_lowercase())?,
        };
        let stored = self.items.get(&id)?;
        Some((id, stored.clone()))
    }

    fn configured_language(&self, tag: &str) -> Option<Language> {
        self.languages
            .get(&tag.to_ascii_lowercase())
            .map(|entry| entry.value().clone())
    }
}

impl ContentHost for MemoryContentStore {
    fn get_item(&self, item: &ItemRef, language: Option<&Language>) -> Option<ContentItem> {
        let (id, stored) = self.find(item)?;
        let language = language.unwrap_or(&self.default_language).clone();
        let version_count = stored.versions.get(&language).copied().unwrap_or(0);
        Some(ContentItem {
            id,
            path: stored.path,
            language,
            version_count,
        })
    }

    /// Item paths below the site's start path map to lower-cased URL paths,
    /// the start item itself to `/`. Items outside the site keep their full
    /// content path.
    fn canonical_url(
        &self,
        site: &SiteConfig,
        item: &ContentItem,
        embedding: LanguageEmbedding,
    ) -> String {
        let url = relative_to_start(&item.path, &site.start_path)
            .unwrap_or(&item.path)
            .to_lowercase();
        let url = if url.is_empty() { "/".to_string() } else { url };

        let embed = match embedding {
            LanguageEmbedding::Never => false,
            LanguageEmbedding::Always => true,
            LanguageEmbedding::AsNeeded => site
                .language
                .as_ref()
                .unwrap_or(&self.default_language)
                != &item.language,
        };

        if embed {
            let lang = item.language.name().to_lowercase();
            if url == "/" {
                format!("/{lang}/")
            } else {
                format!("/{lang}{url}")
            }
        } else {
            url
        }
    }

    fn languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self
            .languages
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        languages.sort_by_key(|language| language.name().to_ascii_lowercase());
        languages
    }

    /// A leading path segment naming a configured language selects that
    /// language and is stripped before the lookup.
    fn resolve_item(
        &self,
        site: &SiteConfig,
        path: &str,
        language: Option<&Language>,
    ) -> Option<ContentItem> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_matches('/');
        let embedded = self.embedded_language(trimmed);
        let rest = match embedded {
            Some(_) => trimmed.split_once('/').map_or("", |(_, rest)| rest),
            None => trimmed,
        };

        let full_path = if rest.is_empty() {
            site.start_path.clone()
        } else {
            format!("{}/{}", site.start_path.trim_end_matches('/'), rest)
        };

        let language = embedded
            .as_ref()
            .or(language)
            .or(site.language.as_ref());
        self.get_item(&ItemRef::Path(full_path), language)
    }

    fn embedded_language(&self, path: &str) -> Option<Language> {
        let first = path.trim_start_matches('/').split(['/', '?', '#']).next()?;
        if first.is_empty() {
            return None;
        }
        self.configured_language(first)
    }
}

/// Path of `item_path` relative to `start_path` (`""` for the start item
/// itself), or `None` when the item lies outside the start path.
fn relative_to_start<'a>(item_path: &'a str, start_path: &str) -> Option<&'a str> {
    let start_path = start_path.trim_end_matches('/');
    let rest = strip_prefix_ignore_case(item_path, start_path)?;
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
