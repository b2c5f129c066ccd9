// ABOUTME: Error types for XML parsing and tree mutation.
// ABOUTME: Provides ParseError for document failures and TreeError for invalid tree edits.

use thiserror::Error;

/// Errors that can occur while parsing a document into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input text is empty or contains only whitespace.
    #[error("document is empty")]
    EmptyInput,

    /// Start/end tags do not nest properly, or the document ended with open elements.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// The input could not be interpreted as valid character data for the parse mode.
    #[error("invalid character data: {0}")]
    Encoding(String),
}

impl ParseError {
    /// Creates a Malformed error with a custom message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        ParseError::Malformed(msg.into())
    }

    /// Creates an Encoding error from an underlying decoding failure.
    pub fn encoding(err: impl std::fmt::Display) -> Self {
        ParseError::Encoding(err.to_string())
    }
}

/// Errors raised by invalid tree edits.
///
/// These signal caller mistakes, not data problems, and are deliberately a
/// separate type from [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Text nodes cannot have children.
    #[error("text nodes cannot have children")]
    TextChild,

    /// The node is already attached to a parent.
    #[error("node already has a parent")]
    Attached,

    /// Attaching here would make the node an ancestor of itself.
    #[error("node cannot be attached inside its own subtree")]
    Cycle,
}
