//! Library and monthly-issues listings.
//!
//! Both pages are the same controller: a query box, a tag (or theme)
//! selector, a chip strip and a card list. They differ only in the data file
//! and the element ids they are wired to.

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use super::hooks::{ChipStrip, Select, TextInput};
use super::{data_url, Document, PageController, PageError};
use crate::adapters::{fetch_items, ContentFetcher, FetchError};
use crate::config::{ListingHooks, ResolvedConfig};
use crate::library::{normalize_all, Catalog, SearchScope, SourceKind};
use crate::render::{render_cards, render_empty, Mount};

const LIST_UNAVAILABLE: &str = "Content list unavailable right now.";
const NO_MATCHES: &str = "No matches. Try clearing filters.";

/// Searchable, filterable card listing for one index
#[derive(Debug)]
pub struct ListingController {
    kind: SourceKind,
    mount: Mount,
    search: TextInput,
    category: Select,
    chips: ChipStrip,
    data_url: Url,
    label: String,
    chip_limit: usize,
    tag_limit: usize,
    catalog: Catalog,
    /// Selector options and chips have been populated
    wired: bool,
}

impl ListingController {
    /// Wire a listing for `kind` (library or issues) to the page's hooks
    pub fn from_document(
        doc: &Document,
        kind: SourceKind,
        config: &ResolvedConfig,
        page: &Url,
    ) -> Result<Self, PageError> {
        let hooks: &ListingHooks = match kind {
            SourceKind::Library => &config.hooks.library,
            SourceKind::Issue => &config.hooks.issues,
            SourceKind::Post => return Err(PageError::NoListing { kind }),
        };

        doc.require(&[
            hooks.mount.as_str(),
            hooks.search.as_str(),
            hooks.category.as_str(),
            hooks.chips.as_str(),
        ])?;

        Ok(Self {
            kind,
            mount: Mount::new(hooks.mount.as_str()),
            search: TextInput::new(hooks.search.as_str()),
            category: Select::new(hooks.category.as_str()),
            chips: ChipStrip::new(hooks.chips.as_str()),
            data_url: data_url(config, page, kind)?,
            label: config.section_label(kind).to_string(),
            chip_limit: config.limits.chips,
            tag_limit: config.limits.card_tags,
            catalog: Catalog::new(),
            wired: false,
        })
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn search(&self) -> &TextInput {
        &self.search
    }

    pub fn category(&self) -> &Select {
        &self.category
    }

    pub fn chips(&self) -> &ChipStrip {
        &self.chips
    }

    pub fn is_wired(&self) -> bool {
        self.wired
    }

    /// Populate the selector and chips from the full vocabulary. Runs once
    /// per loaded catalog.
    pub fn wire(&mut self) {
        if self.wired {
            return;
        }

        let vocabulary = self.catalog.vocabulary();
        self.category.set_options(vocabulary.iter().cloned());
        self.chips.set(&vocabulary, self.chip_limit);
        self.wired = true;
    }

    /// Filter, sort and render the current view
    pub fn run(&mut self) {
        let matches = self.catalog.filter(
            self.search.value(),
            self.category.value(),
            SearchScope::LISTING,
        );

        debug!(listing = %self.kind, total = matches.total, "Listing filtered");
        render_cards(&mut self.mount, matches.records, self.tag_limit, NO_MATCHES);
    }

    /// Query box input
    pub fn on_input(&mut self, value: &str) {
        self.search.set_value(value);
        self.run();
    }

    /// Selector change; returns whether the value was a known option
    pub fn on_change(&mut self, value: &str) -> bool {
        let selected = self.category.set_value(value);
        self.run();
        selected
    }

    /// Chip click: select that tag and re-run
    pub fn on_chip(&mut self, value: &str) {
        self.on_change(value);
    }
}

#[async_trait]
impl PageController for ListingController {
    fn name(&self) -> &str {
        self.mount.id()
    }

    fn mount(&self) -> &Mount {
        &self.mount
    }

    async fn start(&mut self, fetcher: &dyn ContentFetcher) -> Result<(), FetchError> {
        let items = match fetch_items(fetcher, &self.data_url).await {
            Ok(items) => items,
            Err(e) => {
                warn!(url = %e.url(), error = %e, "Content list unavailable");
                render_empty(&mut self.mount, LIST_UNAVAILABLE);
                return Err(e);
            }
        };

        self.catalog = Catalog::from(normalize_all(items, &self.label));
        self.wired = false;
        self.wire();
        self.run();
        Ok(())
    }
}
