//! Tower middleware that runs the splash router on every request.
//!
//! [`SplashLayer`] binds the request to a site by its `Host` header, lets
//! the [`ContentHost`] resolve the requested item, routes the request and
//! hands the result to downstream handlers as request extensions. A
//! language embedded in the URL (`/fr/products`) is stored in the site's
//! language cookie before routing, so it counts as the visitor's choice.
//!
//! | Extension | Present when |
//! |-----------|--------------|
//! | [`RoutingOutcome`] | always |
//! | [`RoutedItem`] | an item is active (splash, localized or requested) |
//! | [`RequestedItem`] | the splash item replaced the requested item |
//! | [`ActiveLanguage`] | a content language is known |
//! | [`Culture`] | a culture was applied |
//!
//! On the way out, queued cookies become `Set-Cookie` headers and an
//! applied culture becomes the `Content-Language` header.
//!
//! ```rust,no_run
//! use axum::{Router, routing::get};
//! use splash_router::{Config, MemoryContentStore, SplashLayer};
//! use std::sync::Arc;
//!
//! # fn build() -> splash_router::Result<Router> {
//! let config = Config::from_env_or_default();
//! let store = Arc::new(MemoryContentStore::new("en"));
//!
//! let app = Router::new()
//!     .route("/", get(|| async { "home" }))
//!     .layer(SplashLayer::new(&config, store)?);
//! # Ok(app)
//! # }
//! ```

use {
    crate::{
        Config, ContentHost, ContentItem, Culture, Language, RequestContext, Result,
        RoutingOutcome, SiteConfig, SplashRouter, cookie::{SetCookie, parse_cookie_header},
    },
    axum::{extract::Request, response::Response},
    http::{
        HeaderMap, HeaderValue,
        header::{ACCEPT_LANGUAGE, CONTENT_LANGUAGE, COOKIE, HOST, SET_COOKIE},
    },
    std::sync::Arc,
    tower::{Layer, Service},
};

/// The item the request should render after routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedItem(pub ContentItem);

/// The item originally requested, while the splash item is shown instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedItem(pub ContentItem);

/// The request's content language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveLanguage(pub Language);

struct SplashState {
    router: SplashRouter,
    config: Config,
    host: Arc<dyn ContentHost>,
}

/// What the response needs from the routing step.
struct ResponseEffects {
    set_cookies: Vec<SetCookie>,
    culture: Option<Culture>,
}

impl SplashState {
    fn site_for(&self, headers: &HeaderMap, request_host: Option<&str>) -> Option<SiteConfig> {
        let host = headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .or(request_host)
            .unwrap_or_default();
        self.config.site_for_host(host).cloned()
    }

    /// Builds the request context, routes it and records the result in the
    /// request extensions.
    fn route_request(&self, req: &mut Request) -> ResponseEffects {
        let site = self.site_for(req.headers(), req.uri().host());
        let raw_url = req
            .uri()
            .path_and_query()
            .map_or("/", |pq| pq.as_str())
            .to_string();

        let mut ctx = RequestContext::new(site.clone(), raw_url);
        for value in req.headers().get_all(COOKIE) {
            let Ok(value) = value.to_str() else {
                tracing::debug!("Ignoring non-ASCII cookie header");
                continue;
            };
            for (name, value) in parse_cookie_header(value) {
                ctx = ctx.with_cookie(name, value);
            }
        }
        if let Some(header) = req
            .headers()
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
        {
            ctx = ctx.with_accept_language(header);
        }

        if let Some(site) = site.as_ref() {
            let language = self.preferred_language(site, &ctx);
            let item = self
                .host
                .resolve_item(site, req.uri().path(), language.as_ref());
            let language = item.as_ref().map(|item| item.language.clone()).or(language);
            ctx = ctx.with_item(item).with_language(language);

            if let Some(language) = self.host.embedded_language(req.uri().path()) {
                self.remember_language(site, &mut ctx, language);
            }
        }

        let outcome = self.router.route(&*self.host, &mut ctx);

        let extensions = req.extensions_mut();
        if let Some(item) = ctx.item.clone() {
            extensions.insert(RoutedItem(item));
        }
        if let Some(requested) = ctx.requested_item() {
            extensions.insert(RequestedItem(requested.clone()));
        }
        if let Some(language) = ctx.language.clone() {
            extensions.insert(ActiveLanguage(language));
        }
        if let Some(culture) = ctx.culture.clone() {
            extensions.insert(culture);
        }
        extensions.insert(outcome);

        ResponseEffects {
            set_cookies: ctx.set_cookies().to_vec(),
            culture: ctx.culture,
        }
    }

    /// A language picked through the URL becomes the visitor's choice, so
    /// links from the splash page lead past it on the next request.
    fn remember_language(&self, site: &SiteConfig, ctx: &mut RequestContext, language: Language) {
        let splash = self.router.config();
        let key = site.language_cookie_key();
        let changed = !language.matches(ctx.cookie_value(&key));
        if changed {
            tracing::debug!(site = %site.name, language = %language, "Language chosen through URL");
            ctx.set_cookie(&key, language.name(), splash.cookie_lifetime.into());
        }
        ctx.set_language(language, splash.set_culture);
    }

    /// Language the host resolves the item in: the visitor's recorded
    /// choice when it names a configured language, else the site default.
    fn preferred_language(&self, site: &SiteConfig, ctx: &RequestContext) -> Option<Language> {
        let chosen = ctx.cookie_value(&site.language_cookie_key());
        if !chosen.is_empty()
            && let Some(language) = self
                .host
                .languages()
                .into_iter()
                .find(|language| language.matches(chosen))
        {
            return Some(language);
        }
        site.language.clone()
    }
}

/// Layer that applies the splash routing middleware.
#[derive(Clone)]
pub struct SplashLayer {
    state: Arc<SplashState>,
}

impl SplashLayer {
    /// Creates the layer from a validated configuration and a content host.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `config` fails validation.
    pub fn new(config: &Config, host: Arc<dyn ContentHost>) -> Result<Self> {
        config.validate()?;
        if config.sites.is_empty() {
            tracing::warn!("No sites configured, splash routing will never apply");
        }
        Ok(Self {
            state: Arc::new(SplashState {
                router: SplashRouter::new(config.splash.clone()),
                config: config.clone(),
                host,
            }),
        })
    }
}

impl<S> Layer<S> for SplashLayer {
    type Service = SplashService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SplashService {
            inner,
            state: self.state.clone(),
        }
    }
}

/// Service that routes each request before handing it to `inner`.
#[derive(Clone)]
pub struct SplashService<S> {
    inner: S,
    state: Arc<SplashState>,
}

impl<S> Service<Request> for SplashService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let effects = self.state.route_request(&mut req);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let mut response = inner.call(req).await?;
            let headers = response.headers_mut();

            for cookie in &effects.set_cookies {
                match HeaderValue::from_str(&cookie.to_header_value()) {
                    Ok(value) => {
                        headers.append(SET_COOKIE, value);
                    }
                    Err(err) => tracing::warn!(
                        cookie = %cookie.name,
                        error = %err,
                        "Cannot encode cookie, not sent"
                    ),
                }
            }

            if let Some(culture) = effects.culture
                && let Ok(value) = HeaderValue::from_str(&culture.ui)
            {
                headers.insert(CONTENT_LANGUAGE, value);
            }

            Ok(response)
        })
    }
}
