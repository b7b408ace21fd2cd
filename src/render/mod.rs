//! Card rendering.
//!
//! A [`Mount`] is a render target owned by one page controller. Every render
//! replaces the mount's contents, so rendering the same input twice leaves
//! exactly one copy of it.
//!
//! Nodes serialize to the site's HTML classes (`post-card`, `post-title`,
//! `muted`, ...) or to plain text for the terminal.

pub mod html;
pub mod text;

use crate::library::DisplayRecord;

/// A clickable summary card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Optional line above the title
    pub meta: Option<String>,
    pub title: String,
    pub summary: Option<String>,
    /// Tag chips, already capped
    pub tags: Vec<String>,
    /// Navigation target, `#` when the record has none
    pub href: String,
    /// Extra CSS classes after `post-card`
    pub classes: Vec<String>,
}

impl Card {
    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        let meta = meta.into();
        self.meta = (!meta.is_empty()).then_some(meta);
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Build a card from a record, showing at most `tag_limit` tags
pub fn make_card(record: &DisplayRecord, tag_limit: usize) -> Card {
    Card {
        meta: None,
        title: record.title.clone(),
        summary: (!record.summary.is_empty()).then(|| record.summary.clone()),
        tags: record.tags.iter().take(tag_limit).cloned().collect(),
        href: if record.link.is_empty() {
            "#".to_string()
        } else {
            record.link.clone()
        },
        classes: Vec::new(),
    }
}

/// Anything a mount can hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Card(Card),

    /// Single muted placeholder line
    Empty(String),

    /// Boxed placeholder with a title and description
    Quiet { title: String, description: String },
}

/// Render target identified by an element id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    id: String,
    nodes: Vec<Node>,
}

impl Mount {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nodes: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of cards currently mounted
    pub fn card_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Card(_)))
            .count()
    }

    /// Titles of mounted cards, in order
    pub fn card_titles(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Card(card) => Some(card.title.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replace the contents with `nodes`
    pub fn replace(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.nodes.clear();
        self.nodes.extend(nodes);
    }
}

/// Replace the mount with a single muted placeholder line
pub fn render_empty(mount: &mut Mount, message: &str) {
    mount.replace([Node::Empty(message.to_string())]);
}

/// Replace the mount with one card per record, or `empty_message` if none
pub fn render_cards<'a>(
    mount: &mut Mount,
    records: impl IntoIterator<Item = &'a DisplayRecord>,
    tag_limit: usize,
    empty_message: &str,
) {
    let cards: Vec<Node> = records
        .into_iter()
        .map(|record| Node::Card(make_card(record, tag_limit)))
        .collect();

    if cards.is_empty() {
        render_empty(mount, empty_message);
    } else {
        mount.replace(cards);
    }
}
