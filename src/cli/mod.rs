//! Command-line interface for labcontext.
//!
//! Drives the page controllers against a published site or a local
//! checkout, printing the rendered mounts as text or HTML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::adapters::{fetch_items, SiteFetcher};
use crate::config::{self, paths, ResolvedConfig};
use crate::library::{normalize_all, Catalog, DisplayRecord, SourceKind};
use crate::pages::{
    self, Document, HomeFeatured, HomeIssue, ListingController, PageController, SearchController,
    QUERY_PARAM,
};
use crate::render::{html, make_card, text, Card, Mount, Node};

/// labcontext - search and render the LabContext content indexes
#[derive(Parser, Debug)]
#[command(name = "labcontext")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Site root: http(s) URL or local directory (overrides LABCONTEXT_SITE)
    #[arg(long, global = true)]
    pub site: Option<String>,

    /// Output format for rendered cards
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the relative base prefix for a page path
    Base {
        /// Page path, e.g. /LabContext/in-context/index.html
        path: String,
    },

    /// Print the search route a header search would navigate to
    Route {
        /// Search query
        query: String,

        /// Path of the page the search is submitted from
        #[arg(long, default_value = "/")]
        from: String,
    },

    /// Home page: featured entries and the latest issue
    Home,

    /// Library listing
    Library {
        /// Free-text query
        #[arg(short, long)]
        query: Option<String>,

        /// Exact tag filter
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Monthly issues listing
    Issues {
        /// Free-text query
        #[arg(short, long)]
        query: Option<String>,

        /// Exact theme filter
        #[arg(short, long)]
        theme: Option<String>,
    },

    /// Search posts, library and issues together
    Search {
        /// Free-text query (becomes ?q=)
        #[arg(short, long)]
        query: Option<String>,

        /// Exact section filter
        #[arg(short, long)]
        section: Option<String>,
    },

    /// Dump one normalized index, newest first, with section and date
    Index {
        /// Index to load: posts, library or issues
        source: SourceKind,

        /// Show at most this many records
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Run every controller whose hooks appear in an HTML page
    Render {
        /// Page markup to scan for element ids
        file: PathBuf,

        /// Page location relative to the site root
        #[arg(long, default_value = "")]
        page: String,
    },

    /// Show resolved configuration (debug)
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for the terminal
    Text,

    /// The site's card markup
    Html,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let mut config = config::load_config()?;
        if let Some(site) = &self.site {
            config = config.with_site(config::parse_site(site)?);
        }

        let format = self.format;
        match self.command {
            Commands::Base { path } => {
                println!("{}", paths::resolve_base(&path, &config.root_folder));
                Ok(())
            }
            Commands::Route { query, from } => show_route(&config, &query, &from),
            Commands::Home => show_home(&config, format).await,
            Commands::Library { query, tag } => {
                show_listing(&config, SourceKind::Library, query, tag, format).await
            }
            Commands::Issues { query, theme } => {
                show_listing(&config, SourceKind::Issue, query, theme, format).await
            }
            Commands::Search { query, section } => {
                show_search(&config, query, section, format).await
            }
            Commands::Index { source, limit } => show_index(&config, source, limit, format).await,
            Commands::Render { file, page } => render_page(&config, &file, &page, format).await,
            Commands::Config => show_config(&config),
        }
    }
}

fn print_mount(mount: &Mount, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", text::mount_text(mount)),
        OutputFormat::Html => println!("{}", html::mount_html(mount)),
    }
}

fn show_route(config: &ResolvedConfig, query: &str, from: &str) -> Result<()> {
    let prefix = paths::resolve_base(from, &config.root_folder);
    match paths::search_route(&prefix, query) {
        Some(route) => {
            println!("{}", route);
            Ok(())
        }
        None => anyhow::bail!("Query is empty"),
    }
}

/// Home page: featured list, then the issue teaser
async fn show_home(config: &ResolvedConfig, format: OutputFormat) -> Result<()> {
    let page = config.page_url(&config.pages.home)?;
    let doc = Document::from_ids(config.hooks.all_ids());
    let fetcher = SiteFetcher::new();

    let mut featured = HomeFeatured::from_document(&doc, config, &page)?;
    let mut issue = HomeIssue::from_document(&doc, config, &page)?;

    // Failures are already rendered as placeholders
    let featured_result = featured.start(&fetcher).await;
    let issue_result = issue.start(&fetcher).await;

    println!("== Featured ==");
    print_mount(featured.mount(), format);
    println!("\n== Monthly ==");
    print_mount(issue.mount(), format);

    featured_result.context("Featured list unavailable")?;
    issue_result.context("Monthly teaser unavailable")?;
    Ok(())
}

/// Library or issues listing with optional query and category
async fn show_listing(
    config: &ResolvedConfig,
    kind: SourceKind,
    query: Option<String>,
    category: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let page_path = match kind {
        SourceKind::Issue => &config.pages.issues,
        _ => &config.pages.library,
    };
    let page = config.page_url(page_path)?;
    let doc = Document::from_ids(config.hooks.all_ids());
    let fetcher = SiteFetcher::new();

    let mut listing = ListingController::from_document(&doc, kind, config, &page)?;

    if let Err(e) = listing.start(&fetcher).await {
        print_mount(listing.mount(), format);
        return Err(e).with_context(|| format!("Failed to load {} listing", kind));
    }

    if let Some(query) = query {
        listing.on_input(&query);
    }
    if let Some(category) = category {
        if !listing.on_change(&category) {
            eprintln!("Unknown filter '{}', showing all", category);
        }
    }

    if !listing.chips().chips().is_empty() {
        eprintln!("Quick filters: {}", listing.chips().chips().join(", "));
    }
    print_mount(listing.mount(), format);
    Ok(())
}

/// Aggregated search; the query travels through the page URL like a bookmark
async fn show_search(
    config: &ResolvedConfig,
    query: Option<String>,
    section: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let mut page = config.page_url(&config.pages.search)?;
    if let Some(query) = query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        page.query_pairs_mut().append_pair(QUERY_PARAM, query);
    }

    let doc = Document::from_ids(config.hooks.all_ids());
    let fetcher = SiteFetcher::new();

    let mut search = SearchController::from_document(&doc, config, &page)?;
    search.start(&fetcher).await?;

    if let Some(section) = section {
        if !search.on_change(&section) {
            eprintln!("Unknown section '{}', searching all", section);
        }
    }

    for source in search.failed_sources() {
        eprintln!("Warning: {} index unavailable, searched without it", source);
    }

    println!("{}", search.status().text());
    print_mount(search.mount(), format);
    eprintln!("URL: {}", search.location().current());
    Ok(())
}

/// "Section · date" line shown above an index card
fn index_card(record: &DisplayRecord, tag_limit: usize) -> Card {
    let meta = [record.section.as_str(), record.date.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" · ");

    make_card(record, tag_limit).with_meta(meta)
}

/// Every record of one index, as the normalizer sees it
async fn show_index(
    config: &ResolvedConfig,
    kind: SourceKind,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let page = config.page_url(&config.pages.home)?;
    let url = pages::data_url(config, &page, kind)?;

    let items = fetch_items(&SiteFetcher::new(), &url)
        .await
        .with_context(|| format!("Failed to load {} index", kind))?;
    let catalog = Catalog::from(normalize_all(items, config.section_label(kind)));

    let records = catalog.latest(limit.unwrap_or(catalog.len()));
    eprintln!("{}: {} of {} records", url, records.len(), catalog.len());

    let mut mount = Mount::new(kind.to_string());
    mount.replace(
        records
            .into_iter()
            .map(|record| Node::Card(index_card(record, config.limits.card_tags))),
    );
    print_mount(&mount, format);
    Ok(())
}

/// Boot every controller the page markup has hooks for
async fn render_page(
    config: &ResolvedConfig,
    file: &Path,
    page_path: &str,
    format: OutputFormat,
) -> Result<()> {
    let markup = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read page: {}", file.display()))?;

    let doc = Document::from_html(&markup);
    let page = config.page_url(page_path)?;
    let fetcher = SiteFetcher::new();

    let site = pages::boot(&doc, config, &page, &fetcher).await?;

    if site.is_empty() {
        println!("No content hooks found in {}", file.display());
        return Ok(());
    }

    if let Some(search) = &site.search {
        println!("#{} {}", search.status().id(), search.status().text());
    }
    for mount in site.mounts() {
        println!("#{}", mount.id());
        print_mount(mount, format);
        println!();
    }

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) -> Result<()> {
    println!("labcontext configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!(
        "Site:        {}",
        cfg.site
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!("Root folder: {}", cfg.root_folder);
    println!();
    println!("Data files:");
    for kind in [SourceKind::Post, SourceKind::Library, SourceKind::Issue] {
        println!(
            "  {:<8} {} (section \"{}\")",
            kind.to_string(),
            cfg.data_file(kind),
            cfg.section_label(kind)
        );
    }
    println!();
    println!("Pages:");
    println!("  home:    /{}", cfg.pages.home);
    println!("  library: /{}", cfg.pages.library);
    println!("  issues:  /{}", cfg.pages.issues);
    println!("  search:  /{}", cfg.pages.search);
    println!();
    println!("Limits:");
    println!("  Search results: {}", cfg.limits.search_results);
    println!("  Chips:          {}", cfg.limits.chips);
    println!("  Tags per card:  {}", cfg.limits.card_tags);
    println!("  Featured:       {}", cfg.limits.featured);
    println!();
    println!("Mount ids: {}", cfg.hooks.mount_ids().join(", "));

    Ok(())
}
