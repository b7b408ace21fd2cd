//! Home page: featured library entries and the latest monthly issue.

use async_trait::async_trait;
use tracing::warn;
use url::Url;

use super::{data_url, Document, PageController, PageError};
use crate::adapters::{fetch_items, ContentFetcher, FetchError};
use crate::config::ResolvedConfig;
use crate::library::{normalize_all, Catalog, SourceKind};
use crate::render::{make_card, render_cards, render_empty, Mount, Node};

const FEATURED_UNAVAILABLE: &str = "Featured unavailable right now.";
const FEATURED_EMPTY: &str = "No featured posts yet.";
const MONTHLY_UNAVAILABLE: &str = "Monthly unavailable right now.";
const ISSUE_FALLBACK_TITLE: &str = "Latest issue";

/// The newest few library entries
#[derive(Debug)]
pub struct HomeFeatured {
    mount: Mount,
    data_url: Url,
    label: String,
    count: usize,
    tag_limit: usize,
}

impl HomeFeatured {
    pub fn from_document(
        doc: &Document,
        config: &ResolvedConfig,
        page: &Url,
    ) -> Result<Self, PageError> {
        let id = &config.hooks.home.featured;
        doc.require(&[id.as_str()])?;

        Ok(Self {
            mount: Mount::new(id.as_str()),
            data_url: data_url(config, page, SourceKind::Library)?,
            label: config.section_label(SourceKind::Library).to_string(),
            count: config.limits.featured,
            tag_limit: config.limits.card_tags,
        })
    }
}

#[async_trait]
impl PageController for HomeFeatured {
    fn name(&self) -> &str {
        "home-featured"
    }

    fn mount(&self) -> &Mount {
        &self.mount
    }

    async fn start(&mut self, fetcher: &dyn ContentFetcher) -> Result<(), FetchError> {
        let items = match fetch_items(fetcher, &self.data_url).await {
            Ok(items) => items,
            Err(e) => {
                warn!(url = %e.url(), error = %e, "Featured list unavailable");
                render_empty(&mut self.mount, FEATURED_UNAVAILABLE);
                return Err(e);
            }
        };

        let catalog = Catalog::from(normalize_all(items, &self.label));
        render_cards(
            &mut self.mount,
            catalog.latest(self.count),
            self.tag_limit,
            FEATURED_EMPTY,
        );
        Ok(())
    }
}

/// Teaser card for the newest monthly issue
#[derive(Debug)]
pub struct HomeIssue {
    mount: Mount,
    data_url: Url,
    label: String,
    tag_limit: usize,
}

impl HomeIssue {
    pub fn from_document(
        doc: &Document,
        config: &ResolvedConfig,
        page: &Url,
    ) -> Result<Self, PageError> {
        let id = &config.hooks.home.monthly;
        doc.require(&[id.as_str()])?;

        Ok(Self {
            mount: Mount::new(id.as_str()),
            data_url: data_url(config, page, SourceKind::Issue)?,
            label: config.section_label(SourceKind::Issue).to_string(),
            tag_limit: config.limits.card_tags,
        })
    }
}

#[async_trait]
impl PageController for HomeIssue {
    fn name(&self) -> &str {
        "home-monthly"
    }

    fn mount(&self) -> &Mount {
        &self.mount
    }

    async fn start(&mut self, fetcher: &dyn ContentFetcher) -> Result<(), FetchError> {
        let items = match fetch_items(fetcher, &self.data_url).await {
            Ok(items) => items,
            Err(e) => {
                warn!(url = %e.url(), error = %e, "Monthly teaser unavailable");
                render_empty(&mut self.mount, MONTHLY_UNAVAILABLE);
                return Err(e);
            }
        };

        let catalog = Catalog::from(normalize_all(items, &self.label));
        let node = match catalog.latest(1).first() {
            Some(issue) => {
                let mut card = make_card(issue, self.tag_limit).with_class("issue-card");
                if card.title.is_empty() {
                    card = card.with_title(ISSUE_FALLBACK_TITLE);
                }
                Node::Card(card)
            }
            None => Node::Quiet {
                title: "No issues yet.".to_string(),
                description: "Monthly issues will appear here once published.".to_string(),
            },
        };

        self.mount.replace([node]);
        Ok(())
    }
}
