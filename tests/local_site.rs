//! Local Site Integration Tests
//!
//! Boots page controllers against a site checked out on disk and drives
//! them the way a visitor would.

use std::fs;

use labcontext::pages::{boot, Document, ListingController, PageController};
use labcontext::render::Node;
use labcontext::{LocalFetcher, ResolvedConfig, SourceKind};
use serde_json::{json, Value};
use tempfile::TempDir;
use url::Url;

/// Write `data/<file>` under the site root
fn write_index(dir: &TempDir, file: &str, value: Value) {
    let data = dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join(file), serde_json::to_vec(&value).unwrap()).unwrap();
}

fn config_for(dir: &TempDir) -> ResolvedConfig {
    let root = Url::from_directory_path(dir.path().canonicalize().unwrap()).unwrap();
    ResolvedConfig::default().with_site(root)
}

fn library_fixture(dir: &TempDir) {
    write_index(
        dir,
        "in_context_library.json",
        json!([
            {"title": "Alpha", "summary": "first entry", "tags": ["x"], "updated": "2024-01-01", "link": "/a"},
            {"title": "Beta", "tags": ["x", "y"], "date": "2024-02-01", "link": "/b"},
            {"title": "Gamma", "tags": ["z"], "date": "2023-06-01"},
            {"title": "Delta", "tags": ["y"], "date": "2024-03-15"}
        ]),
    );
}

async fn library_listing(config: &ResolvedConfig) -> ListingController {
    let doc = Document::from_ids(config.hooks.all_ids());
    let page = config.page_url(&config.pages.library).unwrap();
    let mut listing =
        ListingController::from_document(&doc, SourceKind::Library, config, &page).unwrap();
    listing.start(&LocalFetcher::new()).await.unwrap();
    listing
}

fn placeholder(nodes: &[Node]) -> Option<&str> {
    match nodes {
        [Node::Empty(message)] => Some(message.as_str()),
        _ => None,
    }
}

#[tokio::test]
async fn test_library_listing_filters_and_sorts() {
    let dir = TempDir::new().unwrap();
    library_fixture(&dir);
    let config = config_for(&dir);

    let mut listing = library_listing(&config).await;

    // Initial view: everything, newest first
    assert_eq!(
        listing.mount().card_titles(),
        vec!["Delta", "Beta", "Alpha", "Gamma"]
    );
    assert_eq!(listing.category().options(), &["x", "y", "z"]);
    assert_eq!(listing.chips().chips(), &["x", "y", "z"]);

    assert!(listing.on_change("x"));
    assert_eq!(listing.mount().card_titles(), vec!["Beta", "Alpha"]);

    listing.on_input("  FIRST ");
    assert_eq!(listing.mount().card_titles(), vec!["Alpha"]);

    listing.on_input("nothing like this");
    assert_eq!(
        placeholder(listing.mount().nodes()),
        Some("No matches. Try clearing filters.")
    );

    // Unknown tags fall back to "All"
    listing.on_input("");
    assert!(!listing.on_change("does-not-exist"));
    assert_eq!(listing.mount().card_count(), 4);

    listing.on_chip("y");
    assert_eq!(listing.category().value(), "y");
    assert_eq!(listing.mount().card_titles(), vec!["Delta", "Beta"]);
}

#[tokio::test]
async fn test_restart_rewires_from_new_index() {
    let dir = TempDir::new().unwrap();
    library_fixture(&dir);
    let config = config_for(&dir);

    let mut listing = library_listing(&config).await;
    assert!(listing.on_change("z"));

    write_index(
        &dir,
        "in_context_library.json",
        json!([
            {"title": "Epsilon", "tags": ["w", "x"], "date": "2024-04-01"}
        ]),
    );
    listing.start(&LocalFetcher::new()).await.unwrap();

    assert_eq!(listing.category().options(), &["w", "x"]);
    assert_eq!(listing.chips().chips(), &["w", "x"]);
    // "z" is gone, so the selector is back on "All"
    assert_eq!(listing.category().value(), "");
    assert_eq!(listing.mount().card_titles(), vec!["Epsilon"]);
}

#[tokio::test]
async fn test_issue_listing_uses_themes() {
    let dir = TempDir::new().unwrap();
    write_index(
        &dir,
        "in_context_issues.json",
        json!([
            {"title": "January", "themes": ["energy"], "date": "2024-01-31"},
            {"title": "February", "themes": ["policy", "energy"], "date": "2024-02-29"}
        ]),
    );
    let config = config_for(&dir);

    let doc = Document::from_ids(config.hooks.all_ids());
    let page = config.page_url(&config.pages.issues).unwrap();
    let mut issues =
        ListingController::from_document(&doc, SourceKind::Issue, &config, &page).unwrap();
    issues.start(&LocalFetcher::new()).await.unwrap();

    assert_eq!(issues.mount().id(), "ic-issues");
    assert!(issues.on_change("policy"));
    assert_eq!(issues.mount().card_titles(), vec!["February"]);
}

#[tokio::test]
async fn test_missing_index_renders_placeholder() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);

    let doc = Document::from_ids(config.hooks.all_ids());
    let page = config.page_url(&config.pages.library).unwrap();
    let mut listing =
        ListingController::from_document(&doc, SourceKind::Library, &config, &page).unwrap();

    assert!(listing.start(&LocalFetcher::new()).await.is_err());
    assert_eq!(
        placeholder(listing.mount().nodes()),
        Some("Content list unavailable right now.")
    );
    assert!(!listing.is_wired());
}

#[tokio::test]
async fn test_boot_home_page() {
    let dir = TempDir::new().unwrap();
    library_fixture(&dir);
    write_index(
        &dir,
        "in_context_issues.json",
        json!([
            {"title": "", "themes": ["energy"], "date": "2024-02-29"},
            {"title": "January", "date": "2024-01-31"}
        ]),
    );
    let config = config_for(&dir);

    let html = r#"
        <main>
          <section id="home-featured" class="cards"></section>
          <section id='home-monthly'></section>
        </main>
    "#;
    let doc = Document::from_html(html);
    let page = config.page_url(&config.pages.home).unwrap();

    let site = boot(&doc, &config, &page, &LocalFetcher::new()).await.unwrap();

    assert!(site.library.is_none());
    assert!(site.search.is_none());

    let featured = site.home_featured.as_ref().unwrap();
    assert_eq!(featured.mount().card_titles(), vec!["Delta", "Beta", "Alpha"]);

    let issue = site.home_issue.as_ref().unwrap();
    match issue.mount().nodes() {
        [Node::Card(card)] => {
            assert_eq!(card.title, "Latest issue");
            assert_eq!(card.classes, vec!["issue-card"]);
            assert_eq!(card.tags, vec!["energy"]);
        }
        other => panic!("unexpected issue teaser: {:?}", other),
    }
}

#[tokio::test]
async fn test_boot_home_without_issues() {
    let dir = TempDir::new().unwrap();
    write_index(&dir, "in_context_library.json", json!([]));
    write_index(&dir, "in_context_issues.json", json!(null));
    let config = config_for(&dir);

    let doc = Document::from_ids(["home-featured", "home-monthly"]);
    let page = config.page_url("index.html").unwrap();
    let site = boot(&doc, &config, &page, &LocalFetcher::new()).await.unwrap();

    let featured = site.home_featured.as_ref().unwrap();
    assert_eq!(placeholder(featured.mount().nodes()), Some("No featured posts yet."));

    let issue = site.home_issue.as_ref().unwrap();
    assert!(matches!(
        issue.mount().nodes(),
        [Node::Quiet { title, .. }] if title == "No issues yet."
    ));
}

#[tokio::test]
async fn test_boot_continues_past_failed_listing() {
    let dir = TempDir::new().unwrap();
    write_index(
        &dir,
        "in_context_issues.json",
        json!([{"title": "March", "themes": ["water"], "date": "2024-03-31"}]),
    );
    let config = config_for(&dir);

    // Both listings on one page; only the library index is missing
    let doc = Document::from_ids(config.hooks.all_ids());
    let page = config.page_url(&config.pages.issues).unwrap();
    let site = boot(&doc, &config, &page, &LocalFetcher::new()).await.unwrap();

    let library = site.library.as_ref().unwrap();
    assert_eq!(
        placeholder(library.mount().nodes()),
        Some("Content list unavailable right now.")
    );

    let issues = site.issues.as_ref().unwrap();
    assert_eq!(issues.mount().card_titles(), vec!["March"]);
}

#[tokio::test]
async fn test_boot_page_without_hooks() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);

    let doc = Document::from_html("<p id=\"about\">Nothing dynamic here</p>");
    let page = config.page_url("about/").unwrap();
    let site = boot(&doc, &config, &page, &LocalFetcher::new()).await.unwrap();

    assert!(site.is_empty());
}
