//! Aggregated search across posts, library entries and issues.
//!
//! All three indexes load concurrently. A source that fails to load
//! contributes nothing; the page still works with the others. The query is
//! mirrored into the `q` URL parameter with history replacement, so the
//! current search can be bookmarked.

use async_trait::async_trait;
use tracing::{debug, info, warn};
use url::Url;

use super::hooks::{ChipStrip, Select, StatusLine, TextInput};
use super::url_state::PageUrl;
use super::{data_url, Document, PageController, PageError};
use crate::adapters::{fetch_items, ContentFetcher, FetchError};
use crate::config::ResolvedConfig;
use crate::library::{normalize_all, Catalog, DisplayRecord, SearchScope, SourceKind};
use crate::render::{render_cards, Mount};

/// URL parameter holding the query
pub const QUERY_PARAM: &str = "q";

const IDLE_PROMPT: &str = "Type a keyword to search (or choose a section).";
const NO_MATCHES: &str = "No matches. Try a different keyword or clear filters.";

/// Sources in concatenation order
const SOURCES: [SourceKind; 3] = [SourceKind::Post, SourceKind::Library, SourceKind::Issue];

/// Whether anything is being searched for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// No query and no section: show the prompt
    Idle,

    /// Query and/or section applied: show the match count
    Filtered,
}

/// One index feeding the search page
#[derive(Debug, Clone)]
struct SearchSource {
    kind: SourceKind,
    url: Url,
    label: String,
}

/// Controller for the aggregated search page
#[derive(Debug)]
pub struct SearchController {
    mount: Mount,
    status: StatusLine,
    input: TextInput,
    section: Select,
    chips: ChipStrip,
    location: PageUrl,
    sources: Vec<SearchSource>,
    limit: usize,
    chip_limit: usize,
    tag_limit: usize,
    catalog: Catalog,
    /// Sources that failed on the last load
    failed: Vec<SourceKind>,
    /// Selector options and chips have been populated
    wired: bool,
}

impl SearchController {
    pub fn from_document(
        doc: &Document,
        config: &ResolvedConfig,
        page: &Url,
    ) -> Result<Self, PageError> {
        let hooks = &config.hooks.search;
        doc.require(&[
            hooks.mount.as_str(),
            hooks.status.as_str(),
            hooks.input.as_str(),
            hooks.section.as_str(),
            hooks.chips.as_str(),
        ])?;

        let sources = SOURCES
            .iter()
            .map(|&kind| {
                Ok(SearchSource {
                    kind,
                    url: data_url(config, page, kind)?,
                    label: config.section_label(kind).to_string(),
                })
            })
            .collect::<Result<Vec<_>, PageError>>()?;

        Ok(Self {
            mount: Mount::new(hooks.mount.as_str()),
            status: StatusLine::new(hooks.status.as_str()),
            input: TextInput::new(hooks.input.as_str()),
            section: Select::new(hooks.section.as_str()),
            chips: ChipStrip::new(hooks.chips.as_str()),
            location: PageUrl::new(page.clone()),
            sources,
            limit: config.limits.search_results,
            chip_limit: config.limits.chips,
            tag_limit: config.limits.card_tags,
            catalog: Catalog::new(),
            failed: Vec::new(),
            wired: false,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn section(&self) -> &Select {
        &self.section
    }

    pub fn chips(&self) -> &ChipStrip {
        &self.chips
    }

    pub fn location(&self) -> &PageUrl {
        &self.location
    }

    /// Sources that could not be loaded
    pub fn failed_sources(&self) -> &[SourceKind] {
        &self.failed
    }

    pub fn is_wired(&self) -> bool {
        self.wired
    }

    /// Trimmed, lowercased query as matched and displayed
    fn query(&self) -> String {
        self.input.value().trim().to_lowercase()
    }

    pub fn state(&self) -> SearchState {
        if self.query().is_empty() && self.section.value().is_empty() {
            SearchState::Idle
        } else {
            SearchState::Filtered
        }
    }

    /// Populate the section selector and tag chips. Runs once per load.
    pub fn wire(&mut self) {
        if self.wired {
            return;
        }

        self.section.set_options(self.catalog.sections());
        let top = self.catalog.top_tags(self.chip_limit);
        self.chips.set(&top, self.chip_limit);
        self.wired = true;
    }

    /// Filter, sort, cap and render; update the status line
    pub fn run(&mut self) {
        let query = self.query();
        let matches = self.catalog.filter(
            &query,
            self.section.value(),
            SearchScope::aggregated(self.limit),
        );

        let status = match self.state() {
            SearchState::Idle => IDLE_PROMPT.to_string(),
            SearchState::Filtered => {
                let plural = if matches.total == 1 { "" } else { "s" };
                if query.is_empty() {
                    format!("{} result{}", matches.total, plural)
                } else {
                    format!("{} result{} for “{}”", matches.total, plural, query)
                }
            }
        };
        self.status.set_text(status);

        debug!(total = matches.total, shown = matches.records.len(), "Search filtered");
        render_cards(&mut self.mount, matches.records, self.tag_limit, NO_MATCHES);
    }

    /// Query box input: mirror into the URL, then re-run
    pub fn on_input(&mut self, value: &str) {
        self.input.set_value(value);
        self.location.set_param(QUERY_PARAM, value.trim());
        self.run();
    }

    /// Section change; returns whether the value was a known option
    pub fn on_change(&mut self, value: &str) -> bool {
        let selected = self.section.set_value(value);
        self.run();
        selected
    }

    /// Chip click: search for that tag
    pub fn on_chip(&mut self, value: &str) {
        self.input.set_value(value);
        self.location.set_param(QUERY_PARAM, value);
        self.run();
    }

    /// Load every source concurrently; a failed source becomes empty
    async fn load(&mut self, fetcher: &dyn ContentFetcher) {
        let [posts, library, issues] = [&self.sources[0], &self.sources[1], &self.sources[2]];

        let (posts_res, library_res, issues_res) = tokio::join!(
            fetch_items(fetcher, &posts.url),
            fetch_items(fetcher, &library.url),
            fetch_items(fetcher, &issues.url),
        );

        let mut catalog = Catalog::new();
        let mut failed = Vec::new();

        for (source, result) in [
            (posts, posts_res),
            (library, library_res),
            (issues, issues_res),
        ] {
            match result {
                Ok(items) => catalog.extend(normalize_all(items, &source.label)),
                Err(e) => {
                    warn!(source = %source.kind, url = %e.url(), error = %e, "Search source unavailable, treating as empty");
                    failed.push(source.kind);
                }
            }
        }

        info!(records = catalog.len(), failed = failed.len(), "Search index loaded");
        self.catalog = catalog;
        self.failed = failed;
        self.wired = false;
    }

    /// Records currently rendered, in order
    pub fn results(&self) -> Vec<&str> {
        self.mount.card_titles()
    }

    /// Every record the search runs over
    pub fn records(&self) -> &[DisplayRecord] {
        self.catalog.records()
    }
}

#[async_trait]
impl PageController for SearchController {
    fn name(&self) -> &str {
        "search"
    }

    fn mount(&self) -> &Mount {
        &self.mount
    }

    /// Never fails: unavailable sources are logged and skipped
    async fn start(&mut self, fetcher: &dyn ContentFetcher) -> Result<(), FetchError> {
        self.load(fetcher).await;
        self.wire();

        let initial = self.location.get_param(QUERY_PARAM);
        if !initial.is_empty() {
            self.input.set_value(initial);
        }

        self.run();
        Ok(())
    }
}
