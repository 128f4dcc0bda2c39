//! Integration tests for the splash router running behind a real server.
//!
//! These tests start a server on a random port and make real HTTP requests
//! with a cookie-keeping client, so the language cookie written on the
//! first visit is sent back on the following ones.
//!
//! ## Test Coverage
//!
//! - `test_language_cookie_round_trip`: a negotiated language sticks on later visits
//! - `test_splash_then_requested_item`: the splash page knows which item was requested
//! - `test_base_url_always_shows_splash`: the base-URL override beats the cookie
//! - `test_language_link_leads_past_splash`: following a language link from the splash page sticks

use axum::{Router, extract::Request};
use reqwest::Client;
use splash_router::{
    ActiveLanguage, Config, MemoryContentStore, RequestedItem, RoutedItem, SplashLayer,
};
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;

/// Creates a test config with a wildcard site and a one-hour language cookie
fn create_config() -> Config {
    let toml_str = r#"
[splash]
splash_item_id = "/sitecore/content/splash"
set_lang_from_browser_preferences = true
set_culture = true
cookie_lifetime = "1h"

[[sites]]
name = "website"
host_name = "*"
start_path = "/sitecore/content/home"
language = "en"

[logging]
format = "json"
    "#;

    toml_str.parse().expect("Failed to parse test config TOML")
}

fn create_store() -> Arc<MemoryContentStore> {
    let store = MemoryContentStore::new("en");
    store.add_language("fr");

    let home = store.add_item("/sitecore/content/home");
    store.add_version(home, "en");
    store.add_version(home, "fr");

    let products = store.add_item("/sitecore/content/home/products");
    store.add_version(products, "en");
    store.add_version(products, "fr");

    let about = store.add_item("/sitecore/content/home/about");
    store.add_version(about, "en");

    let splash = store.add_item("/sitecore/content/splash");
    store.add_version(splash, "en");

    Arc::new(store)
}

/// Handler that describes the routed request
async fn page_handler(request: Request) -> String {
    let extensions = request.extensions();
    let item = extensions
        .get::<RoutedItem>()
        .map(|item| item.0.path.clone())
        .unwrap_or_default();
    let language = extensions
        .get::<ActiveLanguage>()
        .map(|language| language.0.to_string())
        .unwrap_or_default();
    match extensions.get::<RequestedItem>() {
        Some(requested) => format!("splash for {} ({language})", requested.0.path),
        None => format!("{item} ({language})"),
    }
}

/// Start a test server with the given config
async fn start_test_server(config: Config) -> (u16, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");

    let port = listener.local_addr().unwrap().port();

    let app = Router::new().fallback(page_handler).layer(
        SplashLayer::new(&config, create_store()).expect("Failed to create splash layer"),
    );

    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to run");
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    (port, handle)
}

fn cookie_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client")
}

#[tokio::test]
async fn test_language_cookie_round_trip() {
    let (port, server_handle) = start_test_server(create_config()).await;
    let client = cookie_client();

    let response = client
        .get(format!("http://127.0.0.1:{port}/products"))
        .header("Accept-Language", "fr;q=0.9,en;q=0.5")
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-language"], "fr");
    let set_cookie = response.headers()["set-cookie"].to_str().unwrap().to_string();
    assert_eq!(set_cookie, "website#lang=fr; Path=/; Max-Age=3600");
    assert_eq!(
        response.text().await.unwrap(),
        "/sitecore/content/home/products (fr)"
    );

    // The cookie now pins French, even for a page without a French version
    // and a browser asking for English.
    let response = client
        .get(format!("http://127.0.0.1:{port}/about"))
        .header("Accept-Language", "en")
        .send()
        .await
        .expect("Request failed");

    assert!(response.headers().get("set-cookie").is_none());
    assert_eq!(
        response.text().await.unwrap(),
        "/sitecore/content/home/about (fr)"
    );

    server_handle.abort();
}

#[tokio::test]
async fn test_splash_then_requested_item() {
    let (port, server_handle) = start_test_server(create_config()).await;
    let client = cookie_client();

    let response = client
        .get(format!("http://127.0.0.1:{port}/about"))
        .header("Accept-Language", "fr")
        .send()
        .await
        .expect("Request failed");

    assert!(response.headers().get("set-cookie").is_none());
    assert_eq!(
        response.text().await.unwrap(),
        "splash for /sitecore/content/home/about (en)"
    );

    server_handle.abort();
}

#[tokio::test]
async fn test_language_link_leads_past_splash() {
    let (port, server_handle) = start_test_server(create_config()).await;
    let client = cookie_client();

    let response = client
        .get(format!("http://127.0.0.1:{port}/products"))
        .header("Accept-Language", "it")
        .send()
        .await
        .expect("Request failed");
    assert_eq!(
        response.text().await.unwrap(),
        "splash for /sitecore/content/home/products (en)"
    );

    let response = client
        .get(format!("http://127.0.0.1:{port}/fr/products"))
        .header("Accept-Language", "it")
        .send()
        .await
        .expect("Request failed");
    assert_eq!(
        response.headers()["set-cookie"],
        "website#lang=fr; Path=/; Max-Age=3600"
    );
    assert_eq!(
        response.text().await.unwrap(),
        "/sitecore/content/home/products (fr)"
    );

    let response = client
        .get(format!("http://127.0.0.1:{port}/products"))
        .header("Accept-Language", "it")
        .send()
        .await
        .expect("Request failed");
    assert_eq!(
        response.text().await.unwrap(),
        "/sitecore/content/home/products (fr)"
    );

    server_handle.abort();
}

#[tokio::test]
async fn test_base_url_always_shows_splash() {
    let config = create_config().with_always_show_for_base_url(true);
    let (port, server_handle) = start_test_server(config).await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{port}/"))
        .header("Cookie", "website#lang=fr")
        .send()
        .await
        .expect("Request failed");

    assert_eq!(
        response.text().await.unwrap(),
        "/sitecore/content/splash (fr)"
    );

    server_handle.abort();
}
