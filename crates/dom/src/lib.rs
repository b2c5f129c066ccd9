// ABOUTME: Core XML/HTML document-object-model library for xmlkit.
// ABOUTME: Provides the arena tree, event-driven parser, and XML serialization.

//! xmlkit-dom - A small mutable XML/HTML tree built from streaming parse events.
//!
//! Documents are parsed synchronously into an arena-backed tree, queried
//! through typed accessors, and serialized back to XML in compact or pretty
//! form. Round-trips are structurally equivalent, not byte-identical.
//!
//! # Example
//!
//! ```
//! use xmlkit_dom::parse_xml;
//!
//! let doc = parse_xml(r#"<root attr="5"><child>42</child></root>"#).unwrap();
//! let root = doc.root().unwrap();
//! assert_eq!(root.num_attr("attr"), Some(5.0));
//! assert_eq!(root.child_named("child").unwrap().text(), Some("42"));
//! assert_eq!(root.xml(), r#"<root attr="5"><child>42</child></root>"#);
//! ```

pub mod error;
pub mod node;
pub mod parser;
pub mod serialize;

pub use error::{ParseError, TreeError};
pub use node::{Document, Node, NodeId};
pub use parser::{parse_html, parse_xml, ParseEvent, TreeBuilder};
pub use serialize::{escape_attr, escape_text};
