//! Page controllers.
//!
//! Each controller is built from a [`Document`] (the element ids the page
//! markup provides), the resolved configuration and the page URL. A page
//! without a controller's hooks yields [`PageError::MissingElement`]; the
//! [`boot`] sequence treats that as "not on this page" and moves on.
//!
//! # Controllers
//!
//! - [`HomeFeatured`], [`HomeIssue`]: home page teasers
//! - [`ListingController`]: library and monthly-issue listings
//! - [`SearchController`]: aggregated search with `?q=` state

pub mod document;
pub mod home;
pub mod hooks;
pub mod listing;
pub mod search;
pub mod url_state;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::adapters::{ContentFetcher, FetchError};
use crate::config::{paths, ResolvedConfig};
use crate::library::SourceKind;
use crate::render::Mount;

pub use document::Document;
pub use home::{HomeFeatured, HomeIssue};
pub use hooks::{ChipStrip, Select, StatusLine, TextInput};
pub use listing::ListingController;
pub use search::{SearchController, SearchState, QUERY_PARAM};
pub use url_state::PageUrl;

/// Errors raised while wiring a controller to a page
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Page has no element with id \"{id}\"")]
    MissingElement { id: String },

    #[error("Cannot resolve data file {file}: {source}")]
    DataUrl {
        file: String,
        source: url::ParseError,
    },

    #[error("No listing page exists for {kind}")]
    NoListing { kind: SourceKind },
}

/// Shared lifecycle of every page controller
#[async_trait]
pub trait PageController: Send {
    /// Short name for logs
    fn name(&self) -> &str;

    /// The render target this controller owns
    fn mount(&self) -> &Mount;

    /// Load content and render the initial view.
    ///
    /// A fetch failure is rendered into the mount as a placeholder before
    /// it is returned; callers only need to log it.
    async fn start(&mut self, fetcher: &dyn ContentFetcher) -> Result<(), FetchError>;
}

/// Resolve a source's data file against the page the controller runs on
pub(crate) fn data_url(
    config: &ResolvedConfig,
    page: &Url,
    kind: SourceKind,
) -> Result<Url, PageError> {
    let file = config.data_file(kind);
    paths::site_url(config.site.as_ref(), page, &config.root_folder, file).map_err(|source| {
        PageError::DataUrl {
            file: file.to_string(),
            source,
        }
    })
}

/// Every controller that found its hooks on a page
#[derive(Debug, Default)]
pub struct Site {
    pub home_featured: Option<HomeFeatured>,
    pub home_issue: Option<HomeIssue>,
    pub library: Option<ListingController>,
    pub issues: Option<ListingController>,
    pub search: Option<SearchController>,
}

impl Site {
    /// Mounts of the running controllers, in boot order
    pub fn mounts(&self) -> Vec<&Mount> {
        let mut mounts = Vec::new();
        if let Some(c) = &self.home_featured {
            mounts.push(c.mount());
        }
        if let Some(c) = &self.home_issue {
            mounts.push(c.mount());
        }
        if let Some(c) = &self.library {
            mounts.push(c.mount());
        }
        if let Some(c) = &self.issues {
            mounts.push(c.mount());
        }
        if let Some(c) = &self.search {
            mounts.push(c.mount());
        }
        mounts
    }

    pub fn is_empty(&self) -> bool {
        self.mounts().is_empty()
    }
}

/// Construct a controller, mapping "hooks not on this page" to `None`
fn present<C>(built: Result<C, PageError>, name: &str) -> Result<Option<C>, PageError> {
    match built {
        Ok(controller) => Ok(Some(controller)),
        Err(PageError::MissingElement { id }) => {
            debug!(controller = name, missing = %id, "Controller not on this page");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Start a controller; a failure has already been rendered, so just log it
async fn start<C: PageController>(controller: &mut C, fetcher: &dyn ContentFetcher) {
    if let Err(e) = controller.start(fetcher).await {
        warn!(controller = controller.name(), error = %e, "Controller started with placeholder");
    }
}

/// Run every controller whose hooks exist on the page, in order.
///
/// Content failures never abort the sequence. Only configuration problems
/// (an unresolvable data file) are returned as errors.
pub async fn boot(
    doc: &Document,
    config: &ResolvedConfig,
    page: &Url,
    fetcher: &dyn ContentFetcher,
) -> Result<Site, PageError> {
    let mut site = Site {
        home_featured: present(HomeFeatured::from_document(doc, config, page), "home-featured")?,
        home_issue: present(HomeIssue::from_document(doc, config, page), "home-monthly")?,
        library: present(
            ListingController::from_document(doc, SourceKind::Library, config, page),
            "library",
        )?,
        issues: present(
            ListingController::from_document(doc, SourceKind::Issue, config, page),
            "issues",
        )?,
        search: present(SearchController::from_document(doc, config, page), "search")?,
    };

    if let Some(c) = site.home_featured.as_mut() {
        start(c, fetcher).await;
    }
    if let Some(c) = site.home_issue.as_mut() {
        start(c, fetcher).await;
    }
    if let Some(c) = site.library.as_mut() {
        start(c, fetcher).await;
    }
    if let Some(c) = site.issues.as_mut() {
        start(c, fetcher).await;
    }
    if let Some(c) = site.search.as_mut() {
        start(c, fetcher).await;
    }

    Ok(site)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_from_home() {
        let config = ResolvedConfig::default();
        let page = Url::parse("https://x.example/LabContext/index.html").unwrap();

        let url = data_url(&config, &page, SourceKind::Library).unwrap();
        assert_eq!(
            url.as_str(),
            "https://x.example/LabContext/data/in_context_library.json"
        );
    }

    #[test]
    fn test_present_skips_missing_hooks_only() {
        let missing: Result<(), PageError> = Err(PageError::MissingElement {
            id: "ic-library".to_string(),
        });
        assert!(present(missing, "library").unwrap().is_none());

        let other: Result<(), PageError> = Err(PageError::NoListing {
            kind: SourceKind::Post,
        });
        assert!(present(other, "posts").is_err());
    }
}
