//! Attribute grammar: parses the interior of a component tag after its name.
//!
//! The scan is a two-mode machine. In [`Mode::Normal`] the tag must end
//! right where the attribute list ends; after a syntax error the scan
//! switches to [`Mode::Resync`], where the tag ends at the first `>` or
//! `/>` found anywhere ahead.

use regex::Regex;
use std::sync::LazyLock;

use minicomp_types::{Arg, ErrorCode};

use crate::interpolation::compile_interpolated;
use crate::quote::quote;
use crate::TagError;

/// Characters skipped between attributes.
pub const WHITESPACE: &[char] = &[' ', '\t', '\n', '\r'];

const TRUE_LITERAL: &str = "true";
const NIL_LITERAL: &str = "nil";

static TAG_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/?>").unwrap());
static TAG_END_ANYWHERE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/?>").unwrap());

static ATTR_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([a-z0-9-]+)([=\s/>])").unwrap());
static DOUBLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^"([^"]*)""#).unwrap());
static SINGLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^'([^']*)'").unwrap());
static ACTION_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\{\{(.+?)\}\}").unwrap());
static NAKED_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^[^\s/<>"']+"#).unwrap());
static VALUE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s|/?>").unwrap());

/// Attribute scan mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Attributes are expected back to back, then `>` or `/>`.
    Normal,
    /// Attribute structure is broken; look for the tag end anywhere.
    Resync,
}

impl Mode {
    fn terminator(self) -> &'static Regex {
        match self {
            Mode::Normal => &TAG_END,
            Mode::Resync => &TAG_END_ANYWHERE,
        }
    }
}

/// Result of scanning a tag interior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrScan {
    pub args: Vec<Arg>,
    /// The tag ended with `/>`.
    pub self_closed: bool,
    /// Bytes of the input consumed, including the terminator when found.
    pub consumed: usize,
    /// First error, with its offset relative to the scanned input.
    pub error: Option<TagError>,
}

/// Parse attributes from `input`, which starts right after the tag name.
///
/// `preceded_by_space` tells whether whitespace was skipped to reach
/// `input`; an attribute is only accepted after whitespace.
pub fn parse_attributes(input: &str, preceded_by_space: bool) -> AttrScan {
    let mut scan = AttrScanner {
        input,
        rest: input,
        mode: Mode::Normal,
        preceded_by_space,
        error: None,
    };
    let mut args = Vec::new();
    let mut self_closed = false;

    loop {
        if let Some(m) = scan.mode.terminator().find(scan.rest) {
            self_closed = m.as_str() == "/>";
            scan.rest = &scan.rest[m.end()..];
            break;
        }

        let caps = if scan.preceded_by_space {
            ATTR_START.captures(scan.rest)
        } else {
            None
        };
        let Some(caps) = caps else {
            match scan.mode {
                Mode::Normal => {
                    scan.fail(ErrorCode::UNTERMINATED_TAG, "invalid syntax or missing end of tag");
                    scan.enter_resync();
                    continue;
                }
                Mode::Resync => {
                    scan.fail(ErrorCode::UNTERMINATED_TAG, "missing end of tag");
                    break;
                }
            }
        };

        let Some((name, sep)) = caps.get(1).zip(caps.get(2)) else {
            break;
        };
        let name = name.as_str();
        let value = if sep.as_str() == "=" {
            scan.rest = scan.rest[sep.end()..].trim_start_matches(WHITESPACE);
            match scan.attr_value(name) {
                Some(value) => value,
                None => {
                    scan.enter_resync();
                    continue;
                }
            }
        } else {
            scan.rest = &scan.rest[sep.start()..];
            TRUE_LITERAL.to_string()
        };
        tracing::trace!(attr = name, value = %value, "parsed attribute");
        args.push(Arg::new(name, value));
        scan.skip_space();
    }

    AttrScan {
        args,
        self_closed,
        consumed: input.len() - scan.rest.len(),
        error: scan.error,
    }
}

struct AttrScanner<'src> {
    input: &'src str,
    rest: &'src str,
    mode: Mode,
    preceded_by_space: bool,
    error: Option<TagError>,
}

impl AttrScanner<'_> {
    fn offset(&self) -> usize {
        self.input.len() - self.rest.len()
    }

    /// Record an error unless one is already recorded for this tag.
    fn fail(&mut self, code: ErrorCode, message: impl Into<String>) {
        if self.error.is_none() {
            self.error = Some(TagError::new(code, self.offset(), message));
        }
    }

    fn enter_resync(&mut self) {
        self.mode = Mode::Resync;
        self.preceded_by_space = false;
    }

    fn skip_space(&mut self) {
        let trimmed = self.rest.trim_start_matches(WHITESPACE);
        self.preceded_by_space = trimmed.len() != self.rest.len();
        self.rest = trimmed;
    }

    fn consume(&mut self, len: usize) {
        self.rest = &self.rest[len..];
    }

    /// Parse the value after `name=`. `None` means the attribute syntax is
    /// broken beyond recovery.
    fn attr_value(&mut self, name: &str) -> Option<String> {
        let quoted = DOUBLE_QUOTED
            .captures(self.rest)
            .or_else(|| SINGLE_QUOTED.captures(self.rest));
        if let Some(caps) = quoted {
            let raw = caps.get(1).map_or("", |m| m.as_str());
            let end = caps.get(0).map_or(0, |m| m.end());
            self.consume(end);
            return Some(match compile_interpolated(raw) {
                Some(value) => value,
                None => {
                    self.fail(
                        ErrorCode::UNREPRESENTABLE_VALUE,
                        format!(
                            "cannot represent attr {} value {} as a single call",
                            quote(name),
                            raw
                        ),
                    );
                    String::new()
                }
            });
        }

        if let Some(caps) = ACTION_VALUE.captures(self.rest) {
            let raw = caps.get(1).map_or("", |m| m.as_str());
            let end = caps.get(0).map_or(0, |m| m.end());
            self.consume(end);
            return Some(format!("({raw})"));
        }

        if let Some(m) = NAKED_VALUE.find(self.rest) {
            self.consume(m.end());
            return Some(quote(m.as_str()));
        }

        if let Some(m) = VALUE_END.find(self.rest) {
            self.fail(ErrorCode::MISSING_ATTR_VALUE, format!("missing value for attr {name}"));
            self.consume(m.start());
            return Some(NIL_LITERAL.to_string());
        }

        self.fail(ErrorCode::INVALID_ATTR_SYNTAX, format!("invalid syntax of attr {name}"));
        None
    }
}
