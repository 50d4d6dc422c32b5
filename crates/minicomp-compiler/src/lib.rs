//! minicomp compiler: rewrites component tags into template directives.
//!
//! ```text
//! foo <c-test abc="x"/> bar  →  foo {{template "c-test" ($.Bind nil "abc" "x")}} bar
//! ```
//!
//! Bodies that cannot be passed as a single expression are moved into
//! `{{define}}` blocks ("trailers") appended after the main output.

mod emit;
mod rewriter;

use serde::Serialize;

use minicomp_types::{ComponentRegistry, RewriteError, RewriteErrors, SourceFile};

use crate::rewriter::Rewriter;

/// Shorthand for the current component's arguments.
const ARGS_SHORTHAND: &str = "$@";
const ARGS_EXPANSION: &str = "$.Args.";
/// Start of the first trailer in rewritten output.
const DEFINE_OPEN: &str = "{{define";

/// Output of one rewrite: always produced, even when errors were recorded.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteResult {
    pub output: String,
    pub errors: RewriteErrors,
}

impl RewriteResult {
    /// The first error in the document, if any.
    pub fn error(&self) -> Option<&RewriteError> {
        self.errors.first()
    }

    pub fn is_ok(&self) -> bool {
        !self.errors.has_errors()
    }

    /// The output and the first error, as a pair.
    pub fn into_parts(self) -> (String, Option<RewriteError>) {
        let error = self.errors.errors.into_iter().next();
        (self.output, error)
    }
}

/// Rewrite every component tag in `source`.
///
/// `base_name` names the document; deferred body templates are named
/// after it. Unknown or malformed tags become `{{error "..."}}`
/// placeholders and scanning carries on.
pub fn rewrite(source: &str, base_name: &str, registry: &ComponentRegistry) -> RewriteResult {
    let source_file = SourceFile::new(base_name, expand_shorthand(source));
    let (output, errors) = Rewriter::new(registry, &source_file).run(base_name);
    if let Some(first) = errors.first() {
        tracing::debug!(
            document = base_name,
            total_errors = errors.total_errors,
            first = %first,
            "rewrite finished with errors"
        );
    }
    RewriteResult { output, errors }
}

/// Expand `$@name` to `$.Args.name`.
pub fn expand_shorthand(source: &str) -> String {
    source.replace(ARGS_SHORTHAND, ARGS_EXPANSION)
}

/// Surround the main part of rewritten `code` with `prefix` and `suffix`,
/// keeping any trailer definitions at the very end.
pub fn wrap_template(code: &str, prefix: &str, suffix: &str) -> String {
    let (main, defines) = match code.find(DEFINE_OPEN) {
        Some(i) => code.split_at(i),
        None => (code, ""),
    };
    let mut out = String::with_capacity(prefix.len() + code.len() + suffix.len());
    out.push_str(prefix);
    out.push_str(main);
    out.push_str(suffix);
    out.push_str(defines);
    out
}
