//! Source item shapes and the display record they normalize into.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Which index a raw item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Blog post (`data/posts.json`)
    Post,

    /// Long-lived library entry tagged by topic
    Library,

    /// Monthly roundup tagged by theme
    Issue,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Post => write!(f, "posts"),
            SourceKind::Library => write!(f, "library"),
            SourceKind::Issue => write!(f, "issues"),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "post" | "posts" | "blog" => Ok(SourceKind::Post),
            "library" | "lib" => Ok(SourceKind::Library),
            "issue" | "issues" | "monthly" => Ok(SourceKind::Issue),
            _ => anyhow::bail!("Unknown source: {}", s),
        }
    }
}

/// An item as it appears in any of the JSON indexes.
///
/// Posts and library entries carry `tags` and `date`/`updated`; issues carry
/// `themes` and `date`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub themes: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub section: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub updated: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub link: Option<String>,
}

/// Scalar as text: strings as-is, numbers and booleans printed, anything else absent
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Any JSON value; non-scalars read as absent
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_text))
}

/// A list keeps its scalar entries; a lone scalar becomes a one-item list
fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(items.into_iter().filter_map(scalar_text).collect()),
        Some(other) => scalar_text(other).map(|one| vec![one]),
        None => None,
    })
}

/// One card-ready record, whatever index it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub title: String,
    pub summary: String,
    /// Tags or themes, in source order
    pub tags: Vec<String>,
    pub section: String,
    /// ISO-8601 date, empty when the source has none
    pub date: String,
    /// Target URL, `#` when the source has none
    pub link: String,
}

impl DisplayRecord {
    /// Create a record with just a title (builder entry point)
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: String::new(),
            tags: Vec::new(),
            section: String::new(),
            date: String::new(),
            link: "#".to_string(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Map a raw index item into a [`DisplayRecord`].
///
/// Tag-like field: `tags`, then `themes`, then empty. A present but empty
/// `tags` array still wins over `themes`. Date-like field: `date`, then
/// `updated`, then empty. `section` falls back to `source_label`.
pub fn normalize(raw: RawItem, source_label: &str) -> DisplayRecord {
    DisplayRecord {
        title: raw.title.unwrap_or_default(),
        summary: raw.summary.unwrap_or_default(),
        tags: raw.tags.or(raw.themes).unwrap_or_default(),
        section: non_empty(raw.section).unwrap_or_else(|| source_label.to_string()),
        date: non_empty(raw.date)
            .or_else(|| non_empty(raw.updated))
            .unwrap_or_default(),
        link: non_empty(raw.link).unwrap_or_else(|| "#".to_string()),
    }
}

/// Normalize a whole index
pub fn normalize_all(items: Vec<RawItem>, source_label: &str) -> Vec<DisplayRecord> {
    items
        .into_iter()
        .map(|item| normalize(item, source_label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawItem {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_normalize_library_entry() {
        let record = normalize(
            raw(r#"{"title":"A","summary":"s","tags":["x","y"],"updated":"2024-01-01","link":"a.html"}"#),
            "Blog",
        );

        assert_eq!(record.title, "A");
        assert_eq!(record.summary, "s");
        assert_eq!(record.tags, vec!["x", "y"]);
        assert_eq!(record.section, "Blog");
        assert_eq!(record.date, "2024-01-01");
        assert_eq!(record.link, "a.html");
    }

    #[test]
    fn test_normalize_issue_uses_themes() {
        let record = normalize(
            raw(r#"{"title":"March","themes":["policy"],"date":"2024-03-01"}"#),
            "Blog: Monthly",
        );

        assert_eq!(record.tags, vec!["policy"]);
        assert_eq!(record.section, "Blog: Monthly");
        assert_eq!(record.date, "2024-03-01");
    }

    #[test]
    fn test_normalize_field_priority() {
        let record = normalize(
            raw(r#"{"tags":[],"themes":["t"],"date":"","updated":"2023-05-05","section":"Essays"}"#),
            "Blog",
        );

        // Present-but-empty tags still win; empty date falls through
        assert!(record.tags.is_empty());
        assert_eq!(record.date, "2023-05-05");
        assert_eq!(record.section, "Essays");
    }

    #[test]
    fn test_normalize_missing_fields() {
        let record = normalize(RawItem::default(), "Blog");

        assert_eq!(record.title, "");
        assert_eq!(record.summary, "");
        assert!(record.tags.is_empty());
        assert_eq!(record.date, "");
        assert_eq!(record.link, "#");
        assert_eq!(record.section, "Blog");
    }

    #[test]
    fn test_raw_item_tolerates_odd_scalars() {
        let item = raw(
            r#"{"title":2024,"date":20240301,"tags":["rust",7,null,{"x":1},true],"themes":"policy","link":null,"summary":["no"]}"#,
        );

        assert_eq!(item.title.as_deref(), Some("2024"));
        assert_eq!(item.date.as_deref(), Some("20240301"));
        assert_eq!(
            item.tags,
            Some(vec!["rust".to_string(), "7".to_string(), "true".to_string()])
        );
        assert_eq!(item.themes, Some(vec!["policy".to_string()]));
        assert!(item.link.is_none());
        assert!(item.summary.is_none());
    }

    #[test]
    fn test_source_kind_from_str() {
        assert_eq!("posts".parse::<SourceKind>().unwrap(), SourceKind::Post);
        assert_eq!("LIBRARY".parse::<SourceKind>().unwrap(), SourceKind::Library);
        assert_eq!("monthly".parse::<SourceKind>().unwrap(), SourceKind::Issue);
        assert!("podcasts".parse::<SourceKind>().is_err());
    }
}
