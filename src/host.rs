//! The boundary between the router and the hosting content platform.

use crate::{ContentItem, ItemRef, Language, LanguageEmbedding, SiteConfig};

/// Content lookups the hosting platform provides.
///
/// Every lookup is synchronous and expected to be served from memory or a
/// host-side cache; the router calls them at most a handful of times per
/// request. Absence is a normal answer and is never an error.
pub trait ContentHost: Send + Sync {
    /// Fetches an item by identifier or path. `None` as language means the
    /// host's default language for the item.
    fn get_item(&self, item: &ItemRef, language: Option<&Language>) -> Option<ContentItem>;

    /// Canonical URL path of `item` within `site`, e.g. `/products`.
    fn canonical_url(
        &self,
        site: &SiteConfig,
        item: &ContentItem,
        embedding: LanguageEmbedding,
    ) -> String;

    /// Languages configured on the content database.
    fn languages(&self) -> Vec<Language>;

    /// Resolves a request path to the item it addresses within `site`.
    fn resolve_item(
        &self,
        site: &SiteConfig,
        path: &str,
        language: Option<&Language>,
    ) -> Option<ContentItem>;

    /// Language the request path selects by itself, such as `fr` in
    /// `/fr/products`. The default reads the first path segment.
    fn embedded_language(&self, path: &str) -> Option<Language> {
        let first = path.trim_start_matches('/').split(['/', '?', '#']).next()?;
        if first.is_empty() {
            return None;
        }
        self.languages()
            .into_iter()
            .find(|language| language.matches(first))
    }
}

impl<H: ContentHost + ?Sized> ContentHost for std::sync::Arc<H> {
    fn get_item(&self, item: &ItemRef, language: Option<&Language>) -> Option<ContentItem> {
        (**self).get_item(item, language)
    }

    fn canonical_url(
        &self,
        site: &SiteConfig,
        item: &ContentItem,
        embedding: LanguageEmbedding,
    ) -> String {
        (**self).canonical_url(site, item, embedding)
    }

    fn languages(&self) -> Vec<Language> {
        (**self).languages()
    }

    fn resolve_item(
        &self,
        site: &SiteConfig,
        path: &str,
        language: Option<&Language>,
    ) -> Option<ContentItem> {
        (**self).resolve_item(site, path, language)
    }

    fn embedded_language(&self, path: &str) -> Option<Language> {
        (**self).embedded_language(path)
    }
}
