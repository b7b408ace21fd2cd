//! Canonical site paths and relative base-path resolution.
//!
//! Every page of the site loads the same data files, but pages live at
//! different folder depths. [`resolve_base`] turns the current page path into
//! a relative prefix so that `prefix + "data/x.json"` always points at the
//! site root.
//!
//! ## Usage
//!
//! ```rust
//! use labcontext::config::paths;
//!
//! assert_eq!(paths::resolve_base("/LabContext/in-context/index.html", "LabContext"), "../");
//! assert_eq!(paths::resolve_base("/LabContext/", "LabContext"), "./");
//! ```

use url::Url;

// ============================================================================
// Site layout
// ============================================================================

/// Default name of the folder the site is published under (project pages)
pub const DEFAULT_ROOT_FOLDER: &str = "LabContext";

/// Blog posts index
pub const POSTS_JSON: &str = "data/posts.json";

/// Library entries index
pub const LIBRARY_JSON: &str = "data/in_context_library.json";

/// Monthly issues index
pub const ISSUES_JSON: &str = "data/in_context_issues.json";

/// Search page, relative to the site root
pub const SEARCH_PAGE: &str = "search/";

// ============================================================================
// Base-path resolution
// ============================================================================

/// Compute the relative prefix ("./", "../", "../../", ...) for a page path.
///
/// The leading `root_folder` segment is stripped (compared case-insensitively)
/// when present, so the same site works as a project page
/// (`/LabContext/...`) and at a domain root. A trailing segment containing a
/// dot is a file and does not count as a folder level.
pub fn resolve_base(pathname: &str, root_folder: &str) -> String {
    let parts: Vec<&str> = pathname.split('/').filter(|p| !p.is_empty()).collect();

    let is_project_site = parts
        .first()
        .map(|first| first.eq_ignore_ascii_case(root_folder))
        .unwrap_or(false);

    let rel_parts = if is_project_site { &parts[1..] } else { &parts[..] };

    let ends_with_file = rel_parts.last().map(|last| last.contains('.')).unwrap_or(false);

    let depth = if ends_with_file {
        rel_parts.len().saturating_sub(1)
    } else {
        rel_parts.len()
    };

    if depth == 0 {
        "./".to_string()
    } else {
        "../".repeat(depth)
    }
}

/// Resolve a site-relative file (e.g. [`LIBRARY_JSON`]) against a page URL.
///
/// Equivalent to the browser resolving `base + file` relative to the page.
pub fn site_url(
    site: Option<&Url>,
    page: &Url,
    root_folder: &str,
    file: &str,
) -> Result<Url, url::ParseError> {
    let prefix = resolve_base(&page_path_within(site, page), root_folder);
    page.join(&format!("{}{}", prefix, file))
}

/// Page path as seen from the site root.
///
/// A site served from a local checkout lives under an arbitrary directory;
/// the resolver must only count folders below the site root.
pub fn page_path_within(site: Option<&Url>, page: &Url) -> String {
    match site {
        Some(site) if page.as_str().starts_with(site.as_str()) => {
            let rest = page.path().get(site.path().len()..).unwrap_or("");
            format!("/{}", rest.trim_start_matches('/'))
        }
        _ => page.path().to_string(),
    }
}

/// Build the search page route for a header/home search submission.
///
/// Returns `None` for a blank query, matching a form that refuses to submit.
pub fn search_route(prefix: &str, query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    Some(format!("{}{}?q={}", prefix, SEARCH_PAGE, encoded))
}

// ============================================================================
// Tests
// ============================================================================
