use crate::{Position, SourceFile};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum number of errors stored per rewrite. Further errors are only counted.
pub const MAX_ERRORS: usize = 20;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Component,
    Attribute,
    Tag,
}

/// Numeric error code (E100–E399).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Component errors (E100–E199) ──
    pub const UNKNOWN_COMPONENT: Self = Self(100);

    // ── Attribute errors (E200–E299) ──
    pub const MISSING_ATTR_VALUE: Self = Self(200);
    pub const INVALID_ATTR_SYNTAX: Self = Self(201);
    pub const UNREPRESENTABLE_VALUE: Self = Self(202);

    // ── Tag structure errors (E300–E399) ──
    pub const UNTERMINATED_TAG: Self = Self(300);
    pub const MISSING_CLOSING_TAG: Self = Self(301);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Component,
            200..=299 => ErrorCategory::Attribute,
            _ => ErrorCategory::Tag,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component => write!(f, "component"),
            Self::Attribute => write!(f, "attribute"),
            Self::Tag => write!(f, "tag"),
        }
    }
}

/// A failure attributed to one position of the document being rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("line {}: {message}", .position.line)]
pub struct ParseError {
    pub code: ErrorCode,
    pub category: ErrorCategory,
    /// Human-readable message; also the text of the inline error placeholder.
    pub message: String,
    #[serde(flatten)]
    pub position: Position,
    /// The exact source line for context.
    pub source_line: String,
}

impl ParseError {
    /// Create an error at a byte offset of `source`.
    pub fn at(source: &SourceFile, offset: usize, code: ErrorCode, message: impl Into<String>) -> Self {
        let position = source.locate(offset);
        Self {
            code,
            category: code.category(),
            message: message.into(),
            position,
            source_line: source.line(position.line).unwrap_or("").to_string(),
        }
    }

    /// 1-based line number of the failure.
    pub fn line(&self) -> u32 {
        self.position.line
    }
}

/// A [`ParseError`] tagged with the component tag it occurred in.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{component}: {error}")]
pub struct RewriteError {
    pub component: String,
    #[source]
    pub error: ParseError,
}

impl RewriteError {
    pub fn new(component: impl Into<String>, error: ParseError) -> Self {
        Self {
            component: component.into(),
            error,
        }
    }

    pub fn message(&self) -> &str {
        &self.error.message
    }
}

/// Every error recorded during one rewrite, in document order of discovery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewriteErrors {
    pub errors: Vec<RewriteError>,
    pub total_errors: usize,
}

impl RewriteErrors {
    /// Create an empty result (no errors).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    /// The first error encountered; the one reported to callers.
    pub fn first(&self) -> Option<&RewriteError> {
        self.errors.first()
    }

    /// Add an error, respecting the MAX_ERRORS limit.
    pub fn push_error(&mut self, error: RewriteError) {
        if self.errors.len() < MAX_ERRORS {
            self.errors.push(error);
        }
        self.total_errors += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(source: &SourceFile, offset: usize) -> RewriteError {
        RewriteError::new(
            "c-xxx",
            ParseError::at(source, offset, ErrorCode::UNKNOWN_COMPONENT, "unknown component <c-xxx>"),
        )
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::UNKNOWN_COMPONENT.category(), ErrorCategory::Component);
        assert_eq!(ErrorCode::MISSING_ATTR_VALUE.category(), ErrorCategory::Attribute);
        assert_eq!(ErrorCode::UNREPRESENTABLE_VALUE.category(), ErrorCategory::Attribute);
        assert_eq!(ErrorCode::MISSING_CLOSING_TAG.category(), ErrorCategory::Tag);
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::UNKNOWN_COMPONENT), "E100");
        assert_eq!(format!("{}", ErrorCode::MISSING_CLOSING_TAG), "E301");
    }

    #[test]
    fn test_parse_error_position() {
        let src = SourceFile::new("page", "one\ntwo <c-xxx />");
        let err = ParseError::at(&src, 14, ErrorCode::UNKNOWN_COMPONENT, "unknown component <c-xxx>");
        assert_eq!(err.line(), 2);
        assert_eq!(err.position.column, 11);
        assert_eq!(err.source_line, "two <c-xxx />");
        assert_eq!(err.to_string(), "line 2: unknown component <c-xxx>");
    }

    #[test]
    fn test_rewrite_error_display_names_component() {
        let src = SourceFile::new("page", "foo <c-xxx /> bar");
        let err = sample(&src, 11);
        assert_eq!(err.to_string(), "c-xxx: line 1: unknown component <c-xxx>");
        assert_eq!(err.message(), "unknown component <c-xxx>");
    }

    #[test]
    fn test_rewrite_error_json_serialization() {
        let src = SourceFile::new("page", "foo <c-xxx /> bar");
        let json = serde_json::to_string(&sample(&src, 11)).unwrap();
        assert!(json.contains("\"component\":\"c-xxx\""));
        assert!(json.contains("\"line\":1"));
        assert!(json.contains("\"category\":\"component\""));
    }

    #[test]
    fn test_rewrite_errors_keep_first() {
        let src = SourceFile::new("page", "foo <c-xxx /> bar");
        let mut errs = RewriteErrors::empty();
        assert!(errs.first().is_none());
        for i in 0..25 {
            errs.push_error(sample(&src, i));
        }
        assert_eq!(errs.errors.len(), MAX_ERRORS);
        assert_eq!(errs.total_errors, 25);
        assert_eq!(errs.first().map(|e| e.error.position.offset), Some(0));
    }
}
