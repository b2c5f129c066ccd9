// ABOUTME: Event-driven XML/HTML parsing that assembles a Document from lexical events.
// ABOUTME: TreeBuilder manages the open-element stack; quick-xml supplies the event stream.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::ParseError;
use crate::node::{Document, NodeId};

/// A low-level lexical event, as produced by the tokenizer.
///
/// The builder consumes these instead of talking to a tokenizer directly, so
/// its stack management can be exercised with synthetic event sequences.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent {
    StartElement {
        name: String,
        attributes: Vec<(String, String)>,
    },
    EndElement {
        name: String,
    },
    Characters(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Building,
    Done,
    Failed,
}

/// Assembles a [`Document`] from a stream of [`ParseEvent`]s.
///
/// Maintains an explicit stack of open elements plus a per-element text
/// buffer. The first StartElement establishes the root; the builder is done
/// once the stack returns to empty. Any malformation is fatal: the builder
/// stays failed for all subsequent calls.
#[derive(Debug)]
pub struct TreeBuilder {
    doc: Document,
    stack: Vec<NodeId>,
    buffers: Vec<String>,
    root: Option<NodeId>,
    state: State,
    html_mode: bool,
}

impl TreeBuilder {
    /// Creates a builder. In html mode accumulated text is kept verbatim;
    /// otherwise it is trimmed when the enclosing element closes.
    pub fn new(html_mode: bool) -> Self {
        Self {
            doc: Document::new(),
            stack: Vec::new(),
            buffers: Vec::new(),
            root: None,
            state: State::Idle,
            html_mode,
        }
    }

    /// Feeds one event into the builder.
    pub fn handle_event(&mut self, event: ParseEvent) -> Result<(), ParseError> {
        if self.state == State::Failed {
            return Err(ParseError::malformed("parse already failed"));
        }
        let result = self.dispatch(event);
        if result.is_err() {
            self.state = State::Failed;
        }
        result
    }

    fn dispatch(&mut self, event: ParseEvent) -> Result<(), ParseError> {
        match event {
            ParseEvent::StartElement { name, attributes } => {
                if name.is_empty() {
                    return Err(ParseError::malformed("element with empty name"));
                }
                if self.state == State::Done {
                    return Err(ParseError::malformed(format!(
                        "unexpected element <{name}> after the document element"
                    )));
                }
                let node = self.doc.new_element(name, attributes);
                if let Some(&parent) = self.stack.last() {
                    // Fresh nodes are detached and acyclic, so this cannot fail
                    let _ = self.doc.append_child(parent, node);
                } else {
                    self.root = Some(node);
                }
                self.stack.push(node);
                self.buffers.push(String::new());
                self.state = State::Building;
                Ok(())
            }
            ParseEvent::Characters(text) => {
                match self.buffers.last_mut() {
                    Some(buffer) => buffer.push_str(&text),
                    // Whitespace between the prolog and the root, or after the
                    // document element, carries no content
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(ParseError::malformed(
                            "character data outside the document element",
                        ));
                    }
                }
                Ok(())
            }
            ParseEvent::EndElement { name } => {
                let node = self.stack.pop().ok_or_else(|| {
                    ParseError::malformed(format!("unmatched end tag </{name}>"))
                })?;
                let buffer = self.buffers.pop().unwrap_or_default();

                let open_name = self
                    .doc
                    .node(node)
                    .name()
                    .unwrap_or_default()
                    .to_string();
                if open_name != name {
                    return Err(ParseError::malformed(format!(
                        "mismatched end tag: expected </{open_name}>, found </{name}>"
                    )));
                }

                let text = if self.html_mode {
                    buffer
                } else {
                    buffer.trim().to_string()
                };
                if !text.is_empty() {
                    self.doc.set_text(node, text);
                }

                if self.stack.is_empty() {
                    self.state = State::Done;
                }
                Ok(())
            }
        }
    }

    /// Finishes the stream and yields the completed document.
    pub fn finish(self) -> Result<Document, ParseError> {
        match self.state {
            State::Failed => Err(ParseError::malformed("parse already failed")),
            State::Idle => Err(ParseError::malformed("no document element found")),
            State::Building => {
                let open = self
                    .stack
                    .last()
                    .and_then(|id| self.doc.node(*id).name())
                    .unwrap_or_default()
                    .to_string();
                Err(ParseError::malformed(format!(
                    "unclosed element <{open}> at end of input"
                )))
            }
            State::Done => {
                let mut doc = self.doc;
                if let Some(root) = self.root {
                    doc.set_root(root);
                }
                Ok(doc)
            }
        }
    }
}

/// Parses a complete XML document.
///
/// Blocks until the whole input is consumed; there is no partial result.
/// Surrounding whitespace in text content is trimmed, and whitespace-only
/// text contributes nothing.
pub fn parse_xml(input: &str) -> Result<Document, ParseError> {
    parse_with_mode(input, false)
}

/// Parses an HTML-ish document leniently.
///
/// Text content is preserved verbatim, and entities that fail to resolve
/// fall back to their raw form instead of failing the parse.
pub fn parse_html(input: &str) -> Result<Document, ParseError> {
    parse_with_mode(input, true)
}

fn parse_with_mode(input: &str, html_mode: bool) -> Result<Document, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut builder = TreeBuilder::new(html_mode);
    let mut reader = Reader::from_str(input);
    // Tag nesting is validated by the builder, which owns the error report
    reader.config_mut().check_end_names = false;
    if html_mode {
        reader.config_mut().allow_dangling_amp = true;
    }

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                builder.handle_event(start_event(&e, html_mode)?)?;
            }
            Ok(Event::Empty(e)) => {
                // A self-closing tag opens and immediately closes
                let event = start_event(&e, html_mode)?;
                let name = match &event {
                    ParseEvent::StartElement { name, .. } => name.clone(),
                    _ => unreachable!(),
                };
                builder.handle_event(event)?;
                builder.handle_event(ParseEvent::EndElement { name })?;
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                builder.handle_event(ParseEvent::EndElement { name })?;
            }
            Ok(Event::Text(e)) => {
                let raw = e.decode().map_err(ParseError::encoding)?;
                let text = unescape_text(&raw, html_mode)?;
                builder.handle_event(ParseEvent::Characters(text))?;
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                builder.handle_event(ParseEvent::Characters(text))?;
            }
            Ok(Event::GeneralRef(e)) => {
                let name = e.decode().map_err(ParseError::encoding)?;
                let text = resolve_reference(&name, html_mode)?;
                builder.handle_event(ParseEvent::Characters(text))?;
            }
            Ok(Event::Decl(_)) | Ok(Event::Comment(_)) | Ok(Event::PI(_))
            | Ok(Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(err) => return Err(ParseError::malformed(err.to_string())),
        }
    }

    builder.finish()
}

fn start_event(e: &BytesStart, html_mode: bool) -> Result<ParseEvent, ParseError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = match attr {
            Ok(attr) => attr,
            // Lenient mode drops attributes the tokenizer cannot make sense of
            Err(_) if html_mode => continue,
            Err(err) => return Err(ParseError::malformed(err.to_string())),
        };
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value).into_owned();
        let value = unescape_text(&raw, html_mode)?;
        attributes.push((key, value));
    }
    Ok(ParseEvent::StartElement { name, attributes })
}

/// Expands entity and character references in already-decoded text.
/// In html mode unresolvable input is passed through raw.
fn unescape_text(raw: &str, html_mode: bool) -> Result<String, ParseError> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }
    match quick_xml::escape::unescape(raw) {
        Ok(unescaped) => Ok(unescaped.into_owned()),
        Err(_) if html_mode => Ok(raw.to_string()),
        Err(err) => Err(ParseError::encoding(err)),
    }
}

/// Resolves a general reference (the payload between '&' and ';') to its
/// character value, covering the predefined named entities and numeric ones.
fn resolve_reference(name: &str, html_mode: bool) -> Result<String, ParseError> {
    if let Some(resolved) = quick_xml::escape::resolve_xml_entity(name) {
        return Ok(resolved.to_string());
    }
    let char_ref = name.strip_prefix('#').and_then(|digits| {
        let code = match digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => digits.parse().ok()?,
        };
        char::from_u32(code)
    });
    match char_ref {
        Some(c) => Ok(c.to_string()),
        None if html_mode => Ok(format!("&{name};")),
        None => Err(ParseError::Encoding(format!(
            "unknown entity reference &{name};"
        ))),
    }
}
