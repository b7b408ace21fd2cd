//! Configuration for the site pipeline.
//!
//! Configuration sources (highest priority first):
//! 1. CLI flags (`--site`)
//! 2. Environment variables (LABCONTEXT_SITE, LABCONTEXT_ROOT)
//! 3. Config file (.labcontext/config.yaml)
//! 4. Defaults (root folder "LabContext", data/*.json)
//!
//! Config file discovery:
//! - Searches current directory and parents for .labcontext/config.yaml
//! - Falls back to `<config dir>/labcontext/config.yaml`
//!
//! The resolved configuration is a plain value handed to each page
//! controller; nothing here is global.

pub mod paths;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

use crate::library::SourceKind;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub data: DataFiles,
    #[serde(default)]
    pub sections: SectionLabels,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub pages: PagePaths,
    /// Element id overrides, keyed "<controller>.<hook>" (e.g. "search.mount")
    #[serde(default)]
    pub hooks: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteSection {
    /// Site root URL (http, https or file)
    pub url: Option<String>,
    /// Folder name the site is published under
    pub root_folder: Option<String>,
}

/// Data file locations, relative to the site root
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DataFiles {
    pub posts: String,
    pub library: String,
    pub issues: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            posts: paths::POSTS_JSON.to_string(),
            library: paths::LIBRARY_JSON.to_string(),
            issues: paths::ISSUES_JSON.to_string(),
        }
    }
}

/// Section label applied to items that carry none, per source
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SectionLabels {
    pub posts: String,
    pub library: String,
    pub issues: String,
}

impl Default for SectionLabels {
    fn default() -> Self {
        Self {
            posts: "Blog".to_string(),
            library: "Blog".to_string(),
            issues: "Blog: Monthly".to_string(),
        }
    }
}

/// Display caps
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Limits {
    /// Maximum cards on the search page
    pub search_results: usize,
    /// Maximum quick-filter chips
    pub chips: usize,
    /// Maximum tag chips on a single card
    pub card_tags: usize,
    /// Cards in the home featured list
    pub featured: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            search_results: 50,
            chips: 10,
            card_tags: 5,
            featured: 3,
        }
    }
}

/// Page locations, relative to the site root
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PagePaths {
    pub home: String,
    pub library: String,
    pub issues: String,
    pub search: String,
}

impl Default for PagePaths {
    fn default() -> Self {
        Self {
            home: String::new(),
            library: "in-context/".to_string(),
            issues: "in-context/monthly/".to_string(),
            search: paths::SEARCH_PAGE.to_string(),
        }
    }
}

/// Element ids each controller expects in the page markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookIds {
    pub home: HomeHooks,
    pub library: ListingHooks,
    pub issues: ListingHooks,
    pub search: SearchHooks,
}

impl Default for HookIds {
    fn default() -> Self {
        Self {
            home: HomeHooks::default(),
            library: ListingHooks::library(),
            issues: ListingHooks::issues(),
            search: SearchHooks::default(),
        }
    }
}

impl HookIds {
    /// Apply one "<controller>.<hook>" override
    pub fn set(&mut self, key: &str, id: String) -> Result<()> {
        let slot = match key {
            "home.featured" => &mut self.home.featured,
            "home.monthly" => &mut self.home.monthly,
            "library.mount" => &mut self.library.mount,
            "library.search" => &mut self.library.search,
            "library.category" => &mut self.library.category,
            "library.chips" => &mut self.library.chips,
            "issues.mount" => &mut self.issues.mount,
            "issues.search" => &mut self.issues.search,
            "issues.category" => &mut self.issues.category,
            "issues.chips" => &mut self.issues.chips,
            "search.mount" => &mut self.search.mount,
            "search.status" => &mut self.search.status,
            "search.input" => &mut self.search.input,
            "search.section" => &mut self.search.section,
            "search.chips" => &mut self.search.chips,
            _ => anyhow::bail!("Unknown hook key: {}", key),
        };
        *slot = id;
        Ok(())
    }

    /// Every mount id, in boot order
    pub fn mount_ids(&self) -> Vec<&str> {
        vec![
            self.home.featured.as_str(),
            self.home.monthly.as_str(),
            self.library.mount.as_str(),
            self.issues.mount.as_str(),
            self.search.mount.as_str(),
        ]
    }

    /// Every id known to any controller
    pub fn all_ids(&self) -> Vec<&str> {
        let mut ids = vec![self.home.featured.as_str(), self.home.monthly.as_str()];
        for listing in [&self.library, &self.issues] {
            ids.extend([
                listing.mount.as_str(),
                listing.search.as_str(),
                listing.category.as_str(),
                listing.chips.as_str(),
            ]);
        }
        ids.extend([
            self.search.mount.as_str(),
            self.search.status.as_str(),
            self.search.input.as_str(),
            self.search.section.as_str(),
            self.search.chips.as_str(),
        ]);
        ids
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeHooks {
    pub featured: String,
    pub monthly: String,
}

impl Default for HomeHooks {
    fn default() -> Self {
        Self {
            featured: "home-featured".to_string(),
            monthly: "home-monthly".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingHooks {
    pub mount: String,
    pub search: String,
    pub category: String,
    pub chips: String,
}

impl ListingHooks {
    pub fn library() -> Self {
        Self {
            mount: "ic-library".to_string(),
            search: "ic-search".to_string(),
            category: "ic-tag".to_string(),
            chips: "ic-tag-chips".to_string(),
        }
    }

    pub fn issues() -> Self {
        Self {
            mount: "ic-issues".to_string(),
            search: "ic-issue-search".to_string(),
            category: "ic-issue-theme".to_string(),
            chips: "ic-issue-chips".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHooks {
    pub mount: String,
    pub status: String,
    pub input: String,
    pub section: String,
    pub chips: String,
}

impl Default for SearchHooks {
    fn default() -> Self {
        Self {
            mount: "search-results".to_string(),
            status: "search-status".to_string(),
            input: "global-search".to_string(),
            section: "global-section".to_string(),
            chips: "global-chips".to_string(),
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Site root URL, if one was configured
    pub site: Option<Url>,
    /// Folder name stripped by the base-path resolver
    pub root_folder: String,
    pub data: DataFiles,
    pub sections: SectionLabels,
    pub limits: Limits,
    pub pages: PagePaths,
    pub hooks: HookIds,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            site: None,
            root_folder: paths::DEFAULT_ROOT_FOLDER.to_string(),
            data: DataFiles::default(),
            sections: SectionLabels::default(),
            limits: Limits::default(),
            pages: PagePaths::default(),
            hooks: HookIds::default(),
            config_file: None,
        }
    }
}

impl ResolvedConfig {
    /// Replace the site URL (CLI override)
    pub fn with_site(mut self, site: Url) -> Self {
        self.site = Some(site);
        self
    }

    /// The configured site root, or an error explaining how to set one
    pub fn require_site(&self) -> Result<&Url> {
        self.site.as_ref().context(
            "No site configured. Pass --site <url|dir>, set LABCONTEXT_SITE, or add site.url to .labcontext/config.yaml",
        )
    }

    /// Site-relative data file for a source
    pub fn data_file(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::Post => &self.data.posts,
            SourceKind::Library => &self.data.library,
            SourceKind::Issue => &self.data.issues,
        }
    }

    /// Section label for items of a source that carry none
    pub fn section_label(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::Post => &self.sections.posts,
            SourceKind::Library => &self.sections.library,
            SourceKind::Issue => &self.sections.issues,
        }
    }

    /// URL of a page (one of [`PagePaths`]) under the site root
    pub fn page_url(&self, page_path: &str) -> Result<Url> {
        let site = self.require_site()?;
        site.join(page_path)
            .with_context(|| format!("Invalid page path: {}", page_path))
    }
}

/// Parse a site location: a URL, or a local directory turned into a file URL
pub fn parse_site(location: &str) -> Result<Url> {
    if let Ok(url) = Url::parse(location) {
        if url.scheme().len() > 1 {
            return Ok(ensure_trailing_slash(url));
        }
    }

    let path = std::fs::canonicalize(location)
        .with_context(|| format!("Site is neither a URL nor an existing directory: {}", location))?;

    Url::from_directory_path(&path)
        .map_err(|_| anyhow::anyhow!("Cannot convert to file URL: {}", path.display()))
}

/// Site roots are directories; `join` needs the trailing slash to keep the last segment.
///
/// An explicit `index.html` is dropped. Any other last segment, dotted or
/// not, is a folder.
fn ensure_trailing_slash(mut url: Url) -> Url {
    let path = url.path().to_string();
    let dir = match path.rsplit_once('/') {
        Some((parent, last)) if last.eq_ignore_ascii_case("index.html") => format!("{}/", parent),
        _ if path.ends_with('/') => return url,
        _ => format!("{}/", path),
    };
    url.set_path(&dir);
    url
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".labcontext").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let user_config = dirs::config_dir()?.join("labcontext").join("config.yaml");
    user_config.exists().then_some(user_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Merge a parsed config file and environment overrides over the defaults
fn resolve(
    file: Option<(ConfigFile, PathBuf)>,
    env_site: Option<String>,
    env_root: Option<String>,
) -> Result<ResolvedConfig> {
    let mut config = ResolvedConfig::default();
    let mut site_str = None;

    if let Some((file, path)) = file {
        site_str = file.site.url;
        if let Some(root) = file.site.root_folder {
            config.root_folder = root;
        }
        config.data = file.data;
        config.sections = file.sections;
        config.limits = file.limits;
        config.pages = file.pages;
        for (key, id) in file.hooks {
            config.hooks.set(&key, id)?;
        }
        config.config_file = Some(path);
    }

    if let Some(site) = env_site {
        site_str = Some(site);
    }
    if let Some(root) = env_root {
        config.root_folder = root;
    }

    if let Some(site) = site_str {
        config.site = Some(parse_site(&site)?);
    }

    Ok(config)
}

/// Load configuration from all sources
pub fn load_config() -> Result<ResolvedConfig> {
    let file = match find_config_file() {
        Some(path) => Some((load_config_file(&path)?, path)),
        None => None,
    };

    resolve(
        file,
        std::env::var("LABCONTEXT_SITE").ok(),
        std::env::var("LABCONTEXT_ROOT").ok(),
    )
}
