//! Splash page and language routing.
//!
//! [`SplashRouter::route`] runs once per request, after the host has
//! resolved the requested item. It decides whether the visitor should see
//! the splash item instead, or whether their browser language can be used
//! right away, and records that decision on the [`RequestContext`].
//!
//! Routing is split in two steps:
//!
//! - [`SplashRouter::decide`] only reads. It walks [`RULES`] in order and
//!   returns the first outcome a rule claims.
//! - `apply` writes the outcome back to the context (active item, language,
//!   culture, request bag, cookie).
//!
//! # Example
//!
//! ```rust
//! use splash_router::{
//!     MemoryContentStore, RequestContext, RoutingOutcome, SiteConfig, SplashConfig,
//!     SplashRouter,
//! };
//!
//! let store = MemoryContentStore::new("en");
//! store.add_language("fr");
//! let products = store.add_item("/home/products");
//! store.add_version(products, "fr");
//! let splash = store.add_item("/splash");
//!
//! let router = SplashRouter::new(
//!     SplashConfig::default()
//!         .with_splash_item_id(splash.to_string())
//!         .with_lang_from_browser_preferences(true),
//! );
//!
//! let site = SiteConfig::new("website", "/home");
//! let item = splash_router::ContentHost::resolve_item(&store, &site, "/products", None);
//! let mut ctx = RequestContext::new(Some(site), "/products")
//!     .with_item(item)
//!     .with_accept_language("fr;q=0.9,en;q=0.5");
//!
//! let outcome = router.route(&store, &mut ctx);
//! assert!(matches!(outcome, RoutingOutcome::LanguageNegotiated { .. }));
//! assert_eq!(ctx.cookie_value("website#lang"), "fr");
//! ```

mod rules;

pub use rules::{RULES, Rule};

use {
    crate::{
        ContentHost, ContentItem, ItemRef, Language, RequestContext, SplashConfig,
        context::REQUESTED_ITEM_KEY,
    },
    rules::RuleInput,
};

/// What routing did to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingOutcome {
    /// Nothing changed.
    NoOp,
    /// The bare site URL was requested and the splash item replaces the
    /// home item.
    BaseUrlSplash { splash: ContentItem },
    /// A browser language was accepted; `item` is the requested item in
    /// that language.
    LanguageNegotiated { language: Language, item: ContentItem },
    /// The splash item replaces `requested` on a first visit.
    Splash {
        splash: ContentItem,
        requested: ContentItem,
    },
}

impl RoutingOutcome {
    pub fn is_noop(&self) -> bool {
        matches!(self, RoutingOutcome::NoOp)
    }

    /// True when the splash item is shown instead of the requested item.
    pub fn shows_splash(&self) -> bool {
        matches!(
            self,
            RoutingOutcome::BaseUrlSplash { .. } | RoutingOutcome::Splash { .. }
        )
    }
}

/// Decides, per request, between the splash item, a negotiated language
/// and leaving the request alone.
#[derive(Debug, Clone)]
pub struct SplashRouter {
    config: SplashConfig,
    splash_item: Option<ItemRef>,
}

impl SplashRouter {
    pub fn new(config: SplashConfig) -> Self {
        let splash_item = config.splash_item();
        Self {
            config,
            splash_item,
        }
    }

    pub fn config(&self) -> &SplashConfig {
        &self.config
    }

    /// Routes one request: decides, then applies the decision to `ctx`.
    pub fn route(&self, host: &dyn ContentHost, ctx: &mut RequestContext) -> RoutingOutcome {
        let outcome = self.decide(host, ctx);
        self.apply(ctx, &outcome);
        outcome
    }

    /// Computes the outcome for `ctx` without changing it.
    pub fn decide(&self, host: &dyn ContentHost, ctx: &RequestContext) -> RoutingOutcome {
        let Some(site) = ctx.site.as_ref() else {
            tracing::debug!(url = %ctx.raw_url, "No site bound to request, skipping splash routing");
            return RoutingOutcome::NoOp;
        };

        let language = ctx.language.as_ref();
        let input = RuleInput {
            host,
            ctx,
            site,
            splash: self
                .splash_item
                .as_ref()
                .and_then(|item| host.get_item(item, language)),
            start: host.get_item(&ItemRef::Path(site.start_path.clone()), language),
        };

        for rule in RULES {
            if let Some(outcome) = rule.evaluate(&self.config, &input) {
                tracing::debug!(
                    site = %site.name,
                    url = %ctx.raw_url,
                    rule = rule.name(),
                    outcome = ?outcome,
                    "Splash routing decided"
                );
                return outcome;
            }
        }

        tracing::debug!(site = %site.name, url = %ctx.raw_url, "No splash routing rule applied");
        RoutingOutcome::NoOp
    }

    fn apply(&self, ctx: &mut RequestContext, outcome: &RoutingOutcome) {
        match outcome {
            RoutingOutcome::NoOp => {}
            RoutingOutcome::BaseUrlSplash { splash } => {
                ctx.item = Some(splash.clone());
            }
            RoutingOutcome::LanguageNegotiated { language, item } => {
                ctx.set_language(language.clone(), self.config.set_culture);
                ctx.item = Some(item.clone());
                if let Some(cookie_key) = ctx.site.as_ref().map(|site| site.language_cookie_key()) {
                    ctx.set_cookie(
                        &cookie_key,
                        language.name(),
                        self.config.cookie_lifetime.into(),
                    );
                }
                tracing::info!(language = %language, "Language set from browser preferences");
            }
            RoutingOutcome::Splash { splash, requested } => {
                ctx.item = Some(splash.clone());
                ctx.items
                    .insert(REQUESTED_ITEM_KEY.to_string(), requested.clone());
            }
        }
    }
}
