//! Tag/body scanner: splits template text into plain text and component tags.
//!
//! Closing tags are found by a literal search for `</name>`, so a component
//! nested inside a body of the same name ends that body early.

use regex::Regex;
use std::sync::LazyLock;

use minicomp_types::{Component, ErrorCode, SLOT_PREFIX};

use crate::attrs::{parse_attributes, WHITESPACE};
use crate::TagError;

static TAG_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<(c-[a-z0-9-]+)").unwrap());

/// One piece of scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'src> {
    /// Text outside any component tag, to be copied verbatim.
    Text(&'src str),
    /// A component tag with its attributes and raw body.
    Tag(ScannedTag<'src>),
}

/// A component tag occurrence. All offsets are relative to the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedTag<'src> {
    pub component: Component<'src>,
    /// Offset of the opening `<`.
    pub offset: usize,
    /// Offset of the first non-whitespace byte after the tag name.
    pub attrs_offset: usize,
    /// Offset where the raw body starts.
    pub body_offset: usize,
    pub self_closed: bool,
    /// First scanning error for this tag, if any.
    pub error: Option<TagError>,
}

impl<'src> ScannedTag<'src> {
    pub fn name(&self) -> &'src str {
        self.component.name
    }

    /// For `<c-slot-NAME>`, the slot name.
    pub fn slot_name(&self) -> Option<&'src str> {
        self.component.name.strip_prefix(SLOT_PREFIX)
    }
}

/// Iterator over the [`Segment`]s of a template text.
#[derive(Debug, Clone)]
pub struct TagScanner<'src> {
    text: &'src str,
    pos: usize,
}

impl<'src> TagScanner<'src> {
    pub fn new(text: &'src str) -> Self {
        Self { text, pos: 0 }
    }

    /// The unscanned remainder.
    pub fn rest(&self) -> &'src str {
        &self.text[self.pos..]
    }

    fn scan_tag(&mut self, name: &'src str, name_end: usize) -> ScannedTag<'src> {
        let offset = self.pos;
        let after_name = &self.text[name_end..];
        let interior = after_name.trim_start_matches(WHITESPACE);
        let attrs_offset = self.text.len() - interior.len();

        let attrs = parse_attributes(interior, interior.len() != after_name.len());
        let mut error = attrs.error.map(|e| e.offset_by(attrs_offset));
        let mut pos = attrs_offset + attrs.consumed;
        let body_offset = pos;
        let mut body = "";

        if !attrs.self_closed {
            let closing = format!("</{name}>");
            let after = &self.text[pos..];
            match after.find(&closing) {
                Some(end) => {
                    body = &after[..end];
                    pos += end + closing.len();
                }
                None => {
                    if error.is_none() {
                        error = Some(TagError::new(
                            ErrorCode::MISSING_CLOSING_TAG,
                            pos,
                            format!("missing {closing}"),
                        ));
                    }
                    pos = self.text.len();
                }
            }
        }

        tracing::debug!(
            tag = name,
            offset,
            args = attrs.args.len(),
            body_len = body.len(),
            self_closed = attrs.self_closed,
            "scanned component tag"
        );

        self.pos = pos;
        ScannedTag {
            component: Component {
                name,
                body,
                args: attrs.args,
            },
            offset,
            attrs_offset,
            body_offset,
            self_closed: attrs.self_closed,
            error,
        }
    }
}

impl<'src> Iterator for TagScanner<'src> {
    type Item = Segment<'src>;

    fn next(&mut self) -> Option<Segment<'src>> {
        let rest = self.rest();
        if rest.is_empty() {
            return None;
        }

        let Some(caps) = TAG_START.captures(rest) else {
            self.pos = self.text.len();
            return Some(Segment::Text(rest));
        };
        let (Some(open), Some(name)) = (caps.get(0), caps.get(1)) else {
            self.pos = self.text.len();
            return Some(Segment::Text(rest));
        };

        if open.start() > 0 {
            self.pos += open.start();
            return Some(Segment::Text(&rest[..open.start()]));
        }

        let name_end = self.pos + name.end();
        Some(Segment::Tag(self.scan_tag(name.as_str(), name_end)))
    }
}
