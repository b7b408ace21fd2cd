//! In-memory catalog of display records.
//!
//! Linear filtering by free-text query and category, then a stable sort by
//! date (newest first). Collections are a few hundred records at most, so
//! every query is a full scan.

use std::collections::{BTreeSet, HashMap};

use super::record::DisplayRecord;

/// Which record field the categorical filter is tested against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    /// Membership in the tag (or theme) list
    Tags,

    /// Equality with the section label
    Section,
}

/// How a page searches its catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchScope {
    /// Field the category filter applies to
    pub category_field: CategoryField,

    /// Whether the section label is part of the free-text haystack
    pub match_section: bool,

    /// Cap applied after sorting
    pub limit: Option<usize>,
}

impl SearchScope {
    /// Library / issues listings: tag filter, no section text, no cap
    pub const LISTING: SearchScope = SearchScope {
        category_field: CategoryField::Tags,
        match_section: false,
        limit: None,
    };

    /// Aggregated search: section filter, section text, capped output
    pub fn aggregated(limit: usize) -> Self {
        Self {
            category_field: CategoryField::Section,
            match_section: true,
            limit: Some(limit),
        }
    }
}

/// Result of a filter pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matches<'a> {
    /// Number of matching records before any cap
    pub total: usize,

    /// Matching records, newest first, capped
    pub records: Vec<&'a DisplayRecord>,
}

impl Matches<'_> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Catalog of normalized records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<DisplayRecord>,
}

impl From<Vec<DisplayRecord>> for Catalog {
    fn from(records: Vec<DisplayRecord>) -> Self {
        Self { records }
    }
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Append records from another source, keeping source order
    pub fn extend(&mut self, records: impl IntoIterator<Item = DisplayRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[DisplayRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Filter by query and category, sort newest first, then cap.
    ///
    /// The query is trimmed and matched case-insensitively as a substring of
    /// title, summary and tags (and section when the scope says so). The
    /// category is matched verbatim. Empty query or category match everything.
    pub fn filter(&self, query: &str, category: &str, scope: SearchScope) -> Matches<'_> {
        let needle = query.trim().to_lowercase();

        let mut records: Vec<&DisplayRecord> = self
            .records
            .iter()
            .filter(|record| {
                matches_query(record, &needle, scope.match_section)
                    && matches_category(record, category, scope.category_field)
            })
            .collect();

        sort_by_date_desc(&mut records);

        let total = records.len();
        if let Some(limit) = scope.limit {
            records.truncate(limit);
        }

        Matches { total, records }
    }

    /// The `limit` newest records
    pub fn latest(&self, limit: usize) -> Vec<&DisplayRecord> {
        let mut records: Vec<&DisplayRecord> = self.records.iter().collect();
        sort_by_date_desc(&mut records);
        records.truncate(limit);
        records
    }

    /// Distinct tags across the whole catalog, sorted
    pub fn vocabulary(&self) -> Vec<String> {
        self.records
            .iter()
            .flat_map(|record| record.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct non-empty section labels, sorted
    pub fn sections(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|record| record.section.clone())
            .filter(|section| !section.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The `limit` most frequent tags; ties keep first-seen order
    pub fn top_tags(&self, limit: usize) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();

        for tag in self.records.iter().flat_map(|record| record.tags.iter()) {
            let count = counts.entry(tag.as_str()).or_insert(0);
            if *count == 0 {
                order.push(tag.as_str());
            }
            *count += 1;
        }

        // Stable sort keeps first-seen order among equal counts
        order.sort_by(|a, b| counts[b].cmp(&counts[a]));
        order.into_iter().take(limit).map(String::from).collect()
    }
}

/// Free-text haystack for a record
fn haystack(record: &DisplayRecord, include_section: bool) -> String {
    let mut hay = format!("{} {} {}", record.title, record.summary, record.tags.join(" "));
    if include_section {
        hay.push(' ');
        hay.push_str(&record.section);
    }
    hay.to_lowercase()
}

/// `needle` must already be trimmed and lowercased
fn matches_query(record: &DisplayRecord, needle: &str, include_section: bool) -> bool {
    needle.is_empty() || haystack(record, include_section).contains(needle)
}

fn matches_category(record: &DisplayRecord, category: &str, field: CategoryField) -> bool {
    if category.is_empty() {
        return true;
    }

    match field {
        CategoryField::Tags => record.tags.iter().any(|tag| tag == category),
        CategoryField::Section => record.section == category,
    }
}

/// Stable sort, newest first.
///
/// Dates compare as plain strings, which orders ISO-8601 dates correctly and
/// puts records without a date last.
pub fn sort_by_date_desc(records: &mut [&DisplayRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}
