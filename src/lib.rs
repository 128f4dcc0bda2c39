//! # splash-router
//!
//! Request middleware for content-managed sites: on a visitor's first
//! request it either picks their language from the browser's
//! `Accept-Language` header or shows a splash page (typically a language
//! chooser) in place of the requested page.
//!
//! The decision is made once per request by [`SplashRouter::route`], in
//! this order:
//!
//! 1. **Base-URL override**: with `always_show_for_base_url`, a request for
//!    the bare site URL always gets the splash item.
//! 2. **Guard**: nothing happens when no item was resolved, the item lies
//!    outside the site's home tree, or the visitor already has a language
//!    cookie for the site.
//! 3. **Browser language**: with `set_lang_from_browser_preferences`, the
//!    first browser language the item is translated into becomes the
//!    request language and is stored in the site's language cookie.
//! 4. **Splash fallback**: the splash item is shown and the requested item
//!    is kept under `"requestedItem"` so the splash page can link back.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use axum::{Router, routing::get};
//! use splash_router::{Config, MemoryContentStore, Result, SplashLayer};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_env_or_default(); // config/{RUST_ENV}.toml
//!     config.setup_tracing();
//!
//!     let store = Arc::new(MemoryContentStore::new("en"));
//!     let app = Router::new()
//!         .route("/", get(|| async { "Hello" }))
//!         .layer(SplashLayer::new(&config, store)?);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! With `config/dev.toml`:
//! ```toml
//! [splash]
//! splash_item_id = "{{ SPLASH_ITEM_ID }}"
//! set_lang_from_browser_preferences = true
//! set_culture = true
//!
//! [[sites]]
//! name = "website"
//! host_name = "*"
//! start_path = "/sitecore/content/home"
//! ```
//!
//! # Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | Configuration loading and validation ([`Config`]) |
//! | `router` | The routing decision ([`SplashRouter`], [`RoutingOutcome`]) |
//! | `layer` | Tower middleware ([`SplashLayer`]) |
//! | `host` | The content platform boundary ([`ContentHost`]) |
//! | `memory` | In-process content store ([`MemoryContentStore`]) |
//! | [`accept_language`] | `Accept-Language` parsing |
//! | `error` | Error types ([`Error`]) |
mod config;
mod context;
mod cookie;
mod culture;
mod error;
mod host;
mod layer;
mod memory;
mod model;
mod router;
mod utils;

pub mod accept_language;

pub use config::*;
pub use context::*;
pub use cookie::*;
pub use culture::*;
pub use error::*;
pub use host::*;
pub use layer::*;
pub use memory::*;
pub use model::*;
pub use router::*;
pub use utils::*;

pub type Result<T> = std::result::Result<T, Error>;
