//! Which element ids a page's markup provides.

use std::collections::HashSet;

use super::PageError;

/// The element ids present on a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    ids: HashSet<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document providing exactly these ids
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Collect every `id` attribute from page markup.
    ///
    /// Attribute names match case-insensitively and may have whitespace
    /// around `=`. Values may be double-quoted, single-quoted or bare.
    pub fn from_html(html: &str) -> Self {
        let lower = html.to_ascii_lowercase();
        let bytes = lower.as_bytes();
        let mut ids = HashSet::new();
        let mut from = 0;

        while let Some(found) = lower[from..].find("id") {
            let start = from + found;
            from = start + 2;

            if start == 0 || !bytes[start - 1].is_ascii_whitespace() {
                continue;
            }

            let mut at = skip_space(bytes, start + 2);
            if bytes.get(at) != Some(&b'=') {
                continue;
            }
            at = skip_space(bytes, at + 1);

            let (value_start, value_end) = match bytes.get(at) {
                Some(&quote @ (b'"' | b'\'')) => {
                    let value_start = at + 1;
                    match bytes[value_start..].iter().position(|&b| b == quote) {
                        Some(len) => (value_start, value_start + len),
                        None => break,
                    }
                }
                Some(_) => {
                    let len = bytes[at..]
                        .iter()
                        .position(|&b| b.is_ascii_whitespace() || b == b'>')
                        .unwrap_or(bytes.len() - at);
                    (at, at + len)
                }
                None => break,
            };

            if value_end > value_start {
                ids.insert(html[value_start..value_end].to_string());
            }
            from = value_end;
        }

        Self { ids }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Fail with the first id that is not present
    pub fn require(&self, ids: &[&str]) -> Result<(), PageError> {
        match ids.iter().find(|id| !self.contains(id)) {
            Some(missing) => Err(PageError::MissingElement {
                id: missing.to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn skip_space(bytes: &[u8], mut at: usize) -> usize {
    while bytes.get(at).is_some_and(u8::is_ascii_whitespace) {
        at += 1;
    }
    at
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_html_collects_ids() {
        let doc = Document::from_html(
            r#"<main>
  <input id="ic-search" type="search">
  <select id='ic-tag'><option value="">All</option></select>
  <div data-id="not-an-id" class="x" id="ic-library"></div>
</main>"#,
        );

        assert!(doc.contains("ic-search"));
        assert!(doc.contains("ic-tag"));
        assert!(doc.contains("ic-library"));
        assert!(!doc.contains("not-an-id"));
    }

    #[test]
    fn test_from_html_attribute_spelling() {
        let doc = Document::from_html(
            "<section ID=\"home-featured\"></section>\n\
             <div id = 'home-monthly' hidden></div>\n\
             <ul class=list\n    Id=search-results></ul>\n\
             <p valid=\"no\" data-id=\"nope\"></p>",
        );

        assert!(doc.contains("home-featured"));
        assert!(doc.contains("home-monthly"));
        assert!(doc.contains("search-results"));
        assert!(!doc.contains("no"));
        assert!(!doc.contains("nope"));
    }

    #[test]
    fn test_require_reports_first_missing() {
        let doc = Document::from_ids(["a", "c"]);

        assert!(doc.require(&["a", "c"]).is_ok());
        match doc.require(&["a", "b", "d"]) {
            Err(PageError::MissingElement { id }) => assert_eq!(id, "b"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
