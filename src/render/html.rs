//! HTML serialization using the site's stylesheet classes.

use super::{Card, Mount, Node};

/// Escape text for element content and double-quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn card_html(card: &Card) -> String {
    let mut class = String::from("post-card");
    for extra in &card.classes {
        class.push(' ');
        class.push_str(extra);
    }

    let mut html = format!(
        r#"<a class="{}" href="{}">"#,
        escape_html(&class),
        escape_html(&card.href)
    );

    if let Some(meta) = &card.meta {
        html.push_str(&format!(r#"<div class="post-meta">{}</div>"#, escape_html(meta)));
    }

    html.push_str(&format!(
        r#"<div class="post-title">{}</div>"#,
        escape_html(&card.title)
    ));

    if let Some(summary) = &card.summary {
        html.push_str(&format!(
            r#"<div class="post-summary">{}</div>"#,
            escape_html(summary)
        ));
    }

    if !card.tags.is_empty() {
        html.push_str(r#"<div class="post-tags">"#);
        for tag in &card.tags {
            html.push_str(&format!(r#"<span class="tag">{}</span>"#, escape_html(tag)));
        }
        html.push_str("</div>");
    }

    html.push_str("</a>");
    html
}

pub fn node_html(node: &Node) -> String {
    match node {
        Node::Card(card) => card_html(card),
        Node::Empty(message) => format!(r#"<div class="muted">{}</div>"#, escape_html(message)),
        Node::Quiet { title, description } => format!(
            r#"<div class="quiet-card"><div class="quiet-card-title">{}</div><div class="quiet-card-desc">{}</div></div>"#,
            escape_html(title),
            escape_html(description)
        ),
    }
}

/// Inner HTML of a mount, one node per line
pub fn mount_html(mount: &Mount) -> String {
    mount
        .nodes()
        .iter()
        .map(node_html)
        .collect::<Vec<_>>()
        .join("\n")
}
