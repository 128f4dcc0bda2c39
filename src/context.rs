//! Explicit per-request state the router reads and rewrites.

use {
    crate::{
        ContentItem, Culture, Language, SiteConfig,
        cookie::{CookieExpiry, SetCookie},
    },
    std::collections::HashMap,
};

/// Request bag key under which the originally requested item is kept while
/// the splash item is shown in its place.
pub const REQUESTED_ITEM_KEY: &str = "requestedItem";

/// Everything the router knows about one in-flight request.
///
/// The host fills in the read side (site, resolved item, URL, headers,
/// cookies) before routing; the router may then rebind `item`, set the
/// language and culture, add entries to the request bag and queue cookies.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Site bound to the request. `None` disables routing entirely.
    pub site: Option<SiteConfig>,
    /// Active content item; initially the item resolved from the URL.
    pub item: Option<ContentItem>,
    /// Requested path and query, exactly as received.
    pub raw_url: String,
    /// Raw `Accept-Language` header value.
    pub accept_language: Option<String>,
    /// Active content language.
    pub language: Option<Language>,
    /// Culture applied to the response, if any.
    pub culture: Option<Culture>,
    /// Request-scoped values for downstream handlers.
    pub items: HashMap<String, ContentItem>,
    cookies: HashMap<String, String>,
    set_cookies: Vec<SetCookie>,
}

impl RequestContext {
    pub fn new(site: Option<SiteConfig>, raw_url: impl Into<String>) -> Self {
        Self {
            site,
            raw_url: raw_url.into(),
            ..Default::default()
        }
    }

    pub fn with_item(mut self, item: Option<ContentItem>) -> Self {
        self.item = item;
        self
    }

    pub fn with_accept_language(mut self, header: impl Into<String>) -> Self {
        self.accept_language = Some(header.into());
        self
    }

    pub fn with_language(mut self, language: Option<Language>) -> Self {
        self.language = language;
        self
    }

    /// Adds an incoming request cookie.
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Value of a request cookie, or `""` when the cookie is absent.
    pub fn cookie_value(&self, name: &str) -> &str {
        self.cookies.get(name).map_or("", String::as_str)
    }

    /// Queues a cookie for the response. The new value is also visible to
    /// later [`cookie_value`](Self::cookie_value) calls on this context.
    pub fn set_cookie(&mut self, name: &str, value: &str, expiry: CookieExpiry) {
        self.cookies.insert(name.to_string(), value.to_string());
        self.set_cookies.push(SetCookie::new(name, value, expiry));
    }

    /// Cookies queued for the response, in the order they were set.
    pub fn set_cookies(&self) -> &[SetCookie] {
        &self.set_cookies
    }

    /// Makes `language` the active content language and, when asked to,
    /// the response culture.
    pub fn set_language(&mut self, language: Language, update_culture: bool) {
        if update_culture {
            self.culture = Some(Culture::for_language(&language));
        }
        self.language = Some(language);
    }

    /// The item originally resolved from the URL, when the splash item has
    /// been shown in its place.
    pub fn requested_item(&self) -> Option<&ContentItem> {
        self.items.get(REQUESTED_ITEM_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_cookie_reads_as_empty() {
        let ctx = RequestContext::new(None, "/");
        assert_eq!(ctx.cookie_value("website#lang"), "");
    }

    #[test]
    fn written_cookie_is_visible_to_later_reads() {
        let mut ctx = RequestContext::new(None, "/").with_cookie("other", "1");
        ctx.set_cookie("website#lang", "fr", CookieExpiry::Permanent);
        assert_eq!(ctx.cookie_value("website#lang"), "fr");
        assert_eq!(ctx.cookie_value("other"), "1");
        assert_eq!(ctx.set_cookies().len(), 1);
        assert_eq!(ctx.set_cookies()[0].value, "fr");
    }

    #[test]
    fn set_language_optionally_updates_culture() {
        let mut ctx = RequestContext::default();
        ctx.set_language(Language::new("de"), false);
        assert_eq!(ctx.language, Some(Language::new("de")));
        assert!(ctx.culture.is_none());

        ctx.set_language(Language::new("fr"), true);
        assert_eq!(ctx.culture.as_ref().map(|c| c.specific.as_str()), Some("fr-FR"));
    }
}
