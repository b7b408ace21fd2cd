//! Content indexes: normalization and search.
//!
//! The site publishes three JSON indexes with slightly different item
//! shapes. Each is normalized into [`DisplayRecord`]s and searched through a
//! [`Catalog`].
//!
//! # Data Layout
//!
//! ```text
//! <site>/data/
//! ├── posts.json                 # {title, summary, tags[], date, link}
//! ├── in_context_library.json    # {title, summary, tags[], updated, link}
//! └── in_context_issues.json     # {title, summary, themes[], date, link}
//! ```

pub mod catalog;
pub mod record;

pub use catalog::{sort_by_date_desc, Catalog, CategoryField, Matches, SearchScope};
pub use record::{normalize, normalize_all, DisplayRecord, RawItem, SourceKind};
