//! Interpolation compiler: turns text with embedded `{{ expr }}` actions into
//! a single value expression.
//!
//! ```text
//! bar              →  "bar"
//! ba{{.v}}r        →  (print "ba" .v "r")
//! ba {{- .v -}} r  →  (print "ba" .v "r")
//! {{if .x}}…       →  cannot inline
//! ```

use regex::Regex;
use std::sync::LazyLock;

use crate::quote::quote;

const ACTION_OPEN: &str = "{{";
const ACTION_CLOSE: &str = "}}";
const TRIM_LEFT: &str = "- ";
const TRIM_RIGHT: &str = "-";
const COMMENT_OPEN: &str = "/*";
const ASSIGNMENT: &str = ":=";
const COMPONENT_OPEN: &str = "<c-";

/// Action keywords that can never appear inside a value expression.
pub const CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "range", "break", "continue", "with", "end", "template", "block", "define",
];

/// Field chains and identifiers that need no parentheses.
static BARE_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[.A-Za-z0-9_]+$").unwrap());

/// Compile `text` into a single expression.
///
/// Returns a quoted string constant when `text` has no actions, a
/// `(print ...)` concatenation otherwise, or `None` when the text holds
/// control constructs, assignments or nested components and so has to be
/// executed as a template of its own.
pub fn compile_interpolated(text: &str) -> Option<String> {
    if text.contains(COMPONENT_OPEN) {
        return None;
    }
    if !text.contains(ACTION_OPEN) {
        return Some(quote(text));
    }

    let mut buf = String::from("(print");
    let mut rest = text;
    while let Some(open) = rest.find(ACTION_OPEN) {
        let mut prefix = &rest[..open];
        let after_open = &rest[open + ACTION_OPEN.len()..];
        let (after_open, trim_prefix) = match after_open.strip_prefix(TRIM_LEFT) {
            Some(stripped) => (stripped, true),
            None => (after_open, false),
        };

        let Some(close) = after_open.find(ACTION_CLOSE) else {
            // Unterminated action: keep it as literal text.
            break;
        };

        if trim_prefix {
            prefix = prefix.trim_end();
        }
        push_literal(&mut buf, prefix);

        let raw = &after_open[..close];
        let (raw, trim_suffix) = match raw.strip_suffix(TRIM_RIGHT) {
            Some(stripped) => (stripped, true),
            None => (raw, false),
        };
        let expr = raw.trim();

        if !is_comment(expr) {
            if !is_value_expr(expr) {
                return None;
            }
            buf.push(' ');
            buf.push_str(&parenthesize_if_necessary(expr));
        }

        rest = &after_open[close + ACTION_CLOSE.len()..];
        if trim_suffix {
            rest = rest.trim_start();
        }
    }
    push_literal(&mut buf, rest);
    buf.push(')');
    Some(buf)
}

fn push_literal(buf: &mut String, literal: &str) {
    if !literal.is_empty() {
        buf.push(' ');
        buf.push_str(&quote(literal));
    }
}

fn is_comment(expr: &str) -> bool {
    expr.starts_with(COMMENT_OPEN)
}

/// `false` for assignments and control-construct actions.
pub fn is_value_expr(expr: &str) -> bool {
    if expr.contains(ASSIGNMENT) {
        return false;
    }
    let first_word = expr.split_whitespace().next().unwrap_or("");
    !CONTROL_KEYWORDS.contains(&first_word)
}

/// Wrap `expr` in parentheses unless it is a bare path like `.a.b`.
pub fn parenthesize_if_necessary(expr: &str) -> String {
    if BARE_PATH.is_match(expr) {
        expr.to_string()
    } else {
        format!("({expr})")
    }
}
