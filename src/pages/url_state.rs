//! Query-string state for the search page.
//!
//! Updates replace the current history entry instead of pushing a new one,
//! so typing into the search box never grows the back/forward stack.

use url::Url;

/// Session history of the page; the last entry is the current URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrl {
    entries: Vec<Url>,
}

impl PageUrl {
    pub fn new(current: Url) -> Self {
        Self {
            entries: vec![current],
        }
    }

    pub fn current(&self) -> &Url {
        // `entries` is never empty
        &self.entries[self.entries.len() - 1]
    }

    /// Every history entry, oldest first
    pub fn entries(&self) -> &[Url] {
        &self.entries
    }

    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    /// First value of a query parameter, or empty
    pub fn get_param(&self, name: &str) -> String {
        self.current()
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default()
    }

    /// Set (or, for an empty value, delete) a query parameter in place
    pub fn set_param(&mut self, name: &str, value: &str) {
        let mut next = self.current().clone();
        let mut placed = false;
        let mut pairs: Vec<(String, String)> = Vec::new();

        for (key, existing) in self.current().query_pairs().into_owned() {
            if key != name {
                pairs.push((key, existing));
            } else if !placed && !value.is_empty() {
                pairs.push((key, value.to_string()));
                placed = true;
            }
        }

        if !placed && !value.is_empty() {
            pairs.push((name.to_string(), value.to_string()));
        }

        if pairs.is_empty() {
            next.set_query(None);
        } else {
            next.query_pairs_mut().clear().extend_pairs(pairs);
        }

        self.replace_state(next);
    }

    /// Overwrite the current entry without adding history
    pub fn replace_state(&mut self, url: Url) {
        if let Some(last) = self.entries.last_mut() {
            *last = url;
        }
    }
}
