// ABOUTME: XML serialization for document subtrees, compact and pretty forms.
// ABOUTME: Escapes text and attribute values and emits self-closing tags for empty elements.

use crate::node::{Document, NodeId, NodeKind};

/// Escapes character data for use as XML text content.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a string for use inside a double-quoted attribute value.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serializes the node and its subtree to compact XML.
pub(crate) fn node_xml(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    push_node(doc, id, &mut out);
    out
}

/// Serializes only the node's content: own text followed by children.
pub(crate) fn content_xml(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    push_content(doc, id, &mut out);
    out
}

/// Serializes the node and its subtree with one tab of indentation per depth.
pub(crate) fn pretty_xml(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    push_pretty(doc, id, 0, &mut out);
    out
}

fn has_text(text: &Option<String>) -> bool {
    text.as_deref().is_some_and(|t| !t.is_empty())
}

fn push_open_tag(name: &str, attributes: &[(String, String)], out: &mut String) {
    out.push('<');
    out.push_str(name);
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
}

fn push_node(doc: &Document, id: NodeId, out: &mut String) {
    match &doc.data(id).kind {
        NodeKind::Text { content } => out.push_str(&escape_text(content)),
        NodeKind::Element {
            name,
            attributes,
            children,
            text,
        } => {
            push_open_tag(name, attributes, out);
            if children.is_empty() && !has_text(text) {
                out.push_str("/>");
            } else {
                out.push('>');
                push_content(doc, id, out);
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}

fn push_content(doc: &Document, id: NodeId, out: &mut String) {
    match &doc.data(id).kind {
        NodeKind::Text { content } => out.push_str(&escape_text(content)),
        NodeKind::Element { children, text, .. } => {
            if let Some(text) = text {
                out.push_str(&escape_text(text));
            }
            for child in children {
                push_node(doc, *child, out);
            }
        }
    }
}

fn push_pretty(doc: &Document, id: NodeId, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push('\t');
    }
    match &doc.data(id).kind {
        NodeKind::Text { content } => {
            out.push_str(&escape_text(content));
            out.push('\n');
        }
        NodeKind::Element {
            name,
            attributes,
            children,
            text,
        } => {
            push_open_tag(name, attributes, out);
            if children.is_empty() && !has_text(text) {
                out.push_str("/>\n");
            } else if children.is_empty() {
                // Text-only elements stay on one line
                out.push('>');
                out.push_str(&escape_text(text.as_deref().unwrap_or("")));
                out.push_str("</");
                out.push_str(name);
                out.push_str(">\n");
            } else {
                out.push_str(">\n");
                if has_text(text) {
                    for _ in 0..=depth {
                        out.push('\t');
                    }
                    out.push_str(&escape_text(text.as_deref().unwrap_or("")));
                    out.push('\n');
                }
                for child in children {
                    push_pretty(doc, *child, depth + 1, out);
                }
                for _ in 0..depth {
                    out.push('\t');
                }
                out.push_str("</");
                out.push_str(name);
                out.push_str(">\n");
            }
        }
    }
}
