//! HTTP Search Integration Tests
//!
//! Serves the data indexes from an in-process axum server and runs the
//! search page against it, including a source that fails.

use std::net::SocketAddr;

use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use labcontext::pages::{PageController, SearchController, SearchState};
use labcontext::render::Node;
use labcontext::{Document, HttpFetcher, ResolvedConfig, SiteFetcher, SourceKind};
use serde_json::{json, Value};
use url::Url;

fn posts() -> Value {
    json!([
        {"title": "Rust async in practice", "summary": "Executors and wakers", "tags": ["rust", "async"], "date": "2024-02-01", "link": "/posts/rust-async/"},
        {"title": "Field notes", "tags": ["travel"], "date": "2023-11-12", "link": "/posts/field-notes/"}
    ])
}

fn issues() -> Value {
    json!([
        {"title": "February roundup", "themes": ["rust", "policy"], "date": "2024-02-29", "link": "/in-context/monthly/2024-02/"},
        {"title": "January roundup", "themes": ["policy"], "date": "2024-01-31"}
    ])
}

/// Rejects requests that would let a cache answer
fn uncached(headers: &HeaderMap, body: Value) -> Result<Json<Value>, StatusCode> {
    let cache_control = headers
        .get(header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if cache_control.contains("no-store") {
        Ok(Json(body))
    } else {
        Err(StatusCode::BAD_REQUEST)
    }
}

/// Start a server for a project site under /LabContext/ with a broken library index
async fn serve() -> SocketAddr {
    let app = Router::new()
        .route(
            "/LabContext/data/posts.json",
            get(|headers: HeaderMap| async move { uncached(&headers, posts()) }),
        )
        .route(
            "/LabContext/data/in_context_library.json",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route(
            "/LabContext/data/in_context_issues.json",
            get(|headers: HeaderMap| async move { uncached(&headers, issues()) }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config_for(addr: SocketAddr) -> ResolvedConfig {
    let site = Url::parse(&format!("http://{}/LabContext/", addr)).unwrap();
    ResolvedConfig::default().with_site(site)
}

async fn search_page(config: &ResolvedConfig, query: Option<&str>) -> SearchController {
    let mut page = config.page_url(&config.pages.search).unwrap();
    if let Some(query) = query {
        page.query_pairs_mut().append_pair("q", query);
    }

    let doc = Document::from_ids(config.hooks.all_ids());
    let mut search = SearchController::from_document(&doc, config, &page).unwrap();
    search.start(&SiteFetcher::new()).await.unwrap();
    search
}

#[tokio::test]
async fn test_search_survives_failed_source() {
    let addr = serve().await;
    let config = config_for(addr);

    let search = search_page(&config, None).await;

    assert_eq!(search.failed_sources(), &[SourceKind::Library]);
    assert_eq!(search.records().len(), 4);
    assert_eq!(search.state(), SearchState::Idle);
    assert_eq!(
        search.status().text(),
        "Type a keyword to search (or choose a section)."
    );
    assert_eq!(
        search.mount().card_titles(),
        vec![
            "February roundup",
            "Rust async in practice",
            "January roundup",
            "Field notes"
        ]
    );

    // No "unavailable" placeholder anywhere on the search page
    assert!(search
        .mount()
        .nodes()
        .iter()
        .all(|node| matches!(node, Node::Card(_))));
}

#[tokio::test]
async fn test_search_seeds_query_from_url() {
    let addr = serve().await;
    let config = config_for(addr);

    let search = search_page(&config, Some("Rust")).await;

    assert_eq!(search.input().value(), "Rust");
    assert_eq!(search.status().text(), "2 results for “rust”");
    assert_eq!(
        search.mount().card_titles(),
        vec!["February roundup", "Rust async in practice"]
    );
}

#[tokio::test]
async fn test_search_sections_and_chips() {
    let addr = serve().await;
    let config = config_for(addr);

    let mut search = search_page(&config, None).await;

    assert_eq!(search.section().options(), &["Blog", "Blog: Monthly"]);
    assert_eq!(search.chips().chips(), &["rust", "policy", "async", "travel"]);

    assert!(search.on_change("Blog: Monthly"));
    assert_eq!(search.status().text(), "2 results");

    search.on_chip("policy");
    assert_eq!(search.status().text(), "2 results for “policy”");
    assert_eq!(search.location().get_param("q"), "policy");

    search.on_input("energy");
    search.on_input("   ");
    assert!(search.location().current().query().is_none());
    assert_eq!(search.location().entries().len(), 1);
    assert_eq!(
        search.location().entries()[0].as_str(),
        format!("http://{}/LabContext/search/", addr)
    );

    search.on_input("nothing matches this");
    assert!(matches!(
        search.mount().nodes(),
        [Node::Empty(message)] if message == "No matches. Try a different keyword or clear filters."
    ));
}

#[tokio::test]
async fn test_http_fetcher_reports_status() {
    let addr = serve().await;
    let url = Url::parse(&format!(
        "http://{}/LabContext/data/in_context_library.json",
        addr
    ))
    .unwrap();

    let err = labcontext::adapters::fetch_items(&HttpFetcher::new(), &url)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        labcontext::FetchError::Status { status: 500, .. }
    ));
}
