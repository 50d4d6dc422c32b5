//! minicomp lexer: finds component tags in template text.
//!
//! Recognition is deliberately shallow. Only the `<c-…>` tag family is
//! tracked; all other markup passes through as plain text.
//!
//! - [`scanner`] locates tag starts and extracts raw bodies
//! - [`attrs`] parses the attribute list of a tag
//! - [`interpolation`] compiles `{{ … }}`-bearing text into one expression

pub mod attrs;
pub mod interpolation;
pub mod quote;
pub mod scanner;

use minicomp_types::ErrorCode;

pub use attrs::{parse_attributes, AttrScan};
pub use interpolation::compile_interpolated;
pub use quote::quote;
pub use scanner::{ScannedTag, Segment, TagScanner};

/// An error found while scanning one tag, positioned by byte offset.
///
/// Offsets are relative to the text handed to the scanner; the compiler
/// resolves them to document lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagError {
    pub code: ErrorCode,
    pub offset: usize,
    pub message: String,
}

impl TagError {
    pub fn new(code: ErrorCode, offset: usize, message: impl Into<String>) -> Self {
        Self {
            code,
            offset,
            message: message.into(),
        }
    }

    /// Shift the offset by `base` bytes.
    pub fn offset_by(mut self, base: usize) -> Self {
        self.offset += base;
        self
    }
}
