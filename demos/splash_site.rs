//! A small multilingual site behind the splash router.
//!
//! Run with:
//!
//! ```sh
//! RUST_ENV=dev RUST_LOG=splash_router=debug cargo run --example splash_site
//! ```
//!
//! Then try:
//!
//! ```sh
//! curl -i -H 'Accept-Language: fr;q=0.9,en;q=0.5' http://127.0.0.1:3000/products
//! curl -i -H 'Accept-Language: it' http://127.0.0.1:3000/products
//! curl -i -H 'Cookie: website#lang=de' http://127.0.0.1:3000/
//! ```

use axum::{Extension, Router, extract::Request, response::Html};
use splash_router::{
    ActiveLanguage, Config, ContentHost, ItemRef, LanguageEmbedding, MemoryContentStore, RequestedItem,
    Result, RoutedItem, SiteConfig,
};
use std::sync::Arc;

fn seed_store() -> MemoryContentStore {
    let store = MemoryContentStore::new("en");
    store.add_language("fr");
    store.add_language("de");

    let home = store.add_item("/sitecore/content/home");
    for language in ["en", "fr", "de"] {
        store.add_version(home, language);
    }

    let products = store.add_item("/sitecore/content/home/products");
    store.add_version(products, "en");
    store.add_version(products, "fr");

    let about = store.add_item("/sitecore/content/home/about");
    store.add_version(about, "en");

    let splash = store.add_item("/sitecore/content/splash");
    store.add_version(splash, "en");

    store
}

fn default_config() -> Config {
    Config::default()
        .with_splash_item_id("/sitecore/content/splash")
        .with_lang_from_browser_preferences(true)
        .with_culture(true)
        .with_site(SiteConfig::new("website", "/sitecore/content/home").with_language("en"))
}

async fn render(
    Extension(store): Extension<Arc<MemoryContentStore>>,
    Extension(site): Extension<SiteConfig>,
    request: Request,
) -> Html<String> {
    let extensions = request.extensions();
    let language = extensions
        .get::<ActiveLanguage>()
        .map(|language| language.0.to_string())
        .unwrap_or_else(|| "?".into());

    let Some(RoutedItem(item)) = extensions.get::<RoutedItem>() else {
        return Html("<h1>Not found</h1>".into());
    };

    // The splash page offers the requested page in every language.
    if let Some(RequestedItem(requested)) = extensions.get::<RequestedItem>() {
        let links: String = store
            .languages()
            .iter()
            .filter_map(|language| {
                let localized = store.get_item(&ItemRef::Id(requested.id), Some(language))?;
                localized.has_versions().then(|| {
                    let url = store.canonical_url(&site, &localized, LanguageEmbedding::Always);
                    format!("<li><a href=\"{url}\">{language}</a></li>")
                })
            })
            .collect();
        return Html(format!("<h1>Choose your language</h1><ul>{links}</ul>"));
    }

    Html(format!("<h1>{}</h1><p>language: {language}</p>", item.path))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_rust_env().unwrap_or_else(|_| default_config());
    config.setup_tracing();

    let site = config
        .sites
        .first()
        .cloned()
        .ok_or_else(|| splash_router::Error::config("at least one site is required"))?;
    let store = Arc::new(seed_store());

    let app = Router::new()
        .fallback(render)
        .layer(splash_router::SplashLayer::new(&config, store.clone())?)
        .layer(Extension(site))
        .layer(Extension(store));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("Listening on http://127.0.0.1:3000");
    axum::serve(listener, app).await?;
    Ok(())
}
