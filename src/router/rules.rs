//! The ordered routing rules.
//!
//! Each rule either claims the request by returning an outcome or passes
//! it on. Rules are tried top to bottom and the first claim wins, so the
//! precedence is: base-URL override, then the applicability guard, then
//! browser-language negotiation, then the splash fallback.

use {
    super::RoutingOutcome,
    crate::{
        ContentHost, ContentItem, ItemRef, LanguageEmbedding, RequestContext, SiteConfig,
        SplashConfig, accept_language, utils::starts_with_ignore_case,
    },
};

/// One step of the routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Show the splash item on the bare site URL, whatever the visitor's
    /// language cookie says.
    BaseUrlOverride,
    /// Stop when there is no item, the item lies outside the site's home
    /// subtree, or the visitor already has a language cookie.
    NotApplicable,
    /// Pick the first browser language the item is translated into.
    BrowserLanguage,
    /// Show the splash item and remember what was requested.
    SplashFallback,
}

/// Evaluation order of the rules.
pub const RULES: [Rule; 4] = [
    Rule::BaseUrlOverride,
    Rule::NotApplicable,
    Rule::BrowserLanguage,
    Rule::SplashFallback,
];

/// Lookups shared by all rules for one request.
pub(crate) struct RuleInput<'a> {
    pub host: &'a dyn ContentHost,
    pub ctx: &'a RequestContext,
    pub site: &'a SiteConfig,
    pub splash: Option<ContentItem>,
    pub start: Option<ContentItem>,
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Rule::BaseUrlOverride => "base_url_override",
            Rule::NotApplicable => "not_applicable",
            Rule::BrowserLanguage => "browser_language",
            Rule::SplashFallback => "splash_fallback",
        }
    }

    /// Returns the outcome if this rule claims the request.
    pub(crate) fn evaluate(
        self,
        config: &SplashConfig,
        input: &RuleInput<'_>,
    ) -> Option<RoutingOutcome> {
        match self {
            Rule::BaseUrlOverride => base_url_override(config, input),
            Rule::NotApplicable => not_applicable(input),
            Rule::BrowserLanguage => browser_language(config, input),
            Rule::SplashFallback => splash_fallback(input),
        }
    }
}

fn base_url_override(config: &SplashConfig, input: &RuleInput<'_>) -> Option<RoutingOutcome> {
    if !config.always_show_for_base_url {
        return None;
    }
    let splash = input.splash.as_ref()?;
    let start = input.start.as_ref()?;

    let start_url = input
        .host
        .canonical_url(input.site, start, LanguageEmbedding::Never)
        .to_lowercase();
    let raw_url = input.ctx.raw_url.to_lowercase();

    (start_url == raw_url).then(|| RoutingOutcome::BaseUrlSplash {
        splash: splash.clone(),
    })
}

fn not_applicable(input: &RuleInput<'_>) -> Option<RoutingOutcome> {
    let Some(item) = input.ctx.item.as_ref() else {
        return Some(RoutingOutcome::NoOp);
    };
    if !starts_with_ignore_case(&item.path, &input.site.start_path) {
        return Some(RoutingOutcome::NoOp);
    }
    if !input
        .ctx
        .cookie_value(&input.site.language_cookie_key())
        .is_empty()
    {
        return Some(RoutingOutcome::NoOp);
    }
    None
}

/// Negotiates for the request's active item only. The version check and
/// the rebinding both use that same item; negotiating for any other item
/// would need its own lookup.
fn browser_language(config: &SplashConfig, input: &RuleInput<'_>) -> Option<RoutingOutcome> {
    if !config.set_lang_from_browser_preferences {
        return None;
    }
    let header = input.ctx.accept_language.as_deref()?;
    let item = input.ctx.item.as_ref()?;
    let languages = input.host.languages();

    accept_language::parse(header).iter().find_map(|tag| {
        languages
            .iter()
            .filter(|language| language.matches(tag))
            .find_map(|language| {
                let localized = input
                    .host
                    .get_item(&ItemRef::Id(item.id), Some(language))?;
                localized
                    .has_versions()
                    .then(|| RoutingOutcome::LanguageNegotiated {
                        language: language.clone(),
                        item: localized,
                    })
            })
    })
}

fn splash_fallback(input: &RuleInput<'_>) -> Option<RoutingOutcome> {
    Some(RoutingOutcome::Splash {
        splash: input.splash.clone()?,
        requested: input.ctx.item.clone()?,
    })
}
