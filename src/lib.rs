//! labcontext - content index search for the LabContext static site
//!
//! The site publishes small JSON indexes (blog posts, library entries,
//! monthly issues). This crate loads them, normalizes them into one record
//! shape, filters them by free text and tag/section, and renders summary
//! cards, the same way on every page of the site.
//!
//! # Modules
//!
//! - `config`: configuration and base-path resolution
//! - `adapters`: JSON fetchers (HTTP and local checkout)
//! - `library`: normalization and the filter/search catalog
//! - `render`: cards, mounts, HTML and text output
//! - `pages`: page controllers and the boot sequence
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Library listing filtered by tag
//! labcontext --site https://user.github.io/LabContext/ library --tag policy
//!
//! # Aggregated search against a local checkout
//! labcontext --site ./site search -q "climate"
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod library;
pub mod pages;
pub mod render;

// Re-export main types at crate root for convenience
pub use adapters::{ContentFetcher, FetchError, HttpFetcher, LocalFetcher, SiteFetcher};
pub use config::ResolvedConfig;
pub use library::{Catalog, DisplayRecord, RawItem, SearchScope, SourceKind};
pub use pages::{boot, Document, ListingController, PageError, SearchController, Site};
pub use render::{Card, Mount, Node};
