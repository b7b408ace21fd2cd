//! Plain-text rendering for the terminal.

use super::{Card, Mount, Node};

pub fn card_text(card: &Card) -> String {
    let mut lines = Vec::new();

    if let Some(meta) = &card.meta {
        lines.push(format!("  {}", meta));
    }
    lines.push(card.title.clone());
    if let Some(summary) = &card.summary {
        lines.push(format!("  {}", summary));
    }
    if !card.tags.is_empty() {
        lines.push(format!("  [{}]", card.tags.join("] [")));
    }
    lines.push(format!("  -> {}", card.href));

    lines.join("\n")
}

pub fn node_text(node: &Node) -> String {
    match node {
        Node::Card(card) => card_text(card),
        Node::Empty(message) => format!("({})", message),
        Node::Quiet { title, description } => format!("{}\n  {}", title, description),
    }
}

/// Mount contents separated by blank lines
pub fn mount_text(mount: &Mount) -> String {
    mount
        .nodes()
        .iter()
        .map(node_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}
