//! The rewrite pass: walks scanned segments, dispatches each tag and defers
//! bodies that cannot be inlined into trailer templates.

use minicomp_lexer::{compile_interpolated, quote, ScannedTag, Segment, TagError, TagScanner};
use minicomp_types::{
    Arg, ComponentRegistry, ErrorCode, ParseError, RewriteError, RewriteErrors, SourceFile,
};

use crate::emit::{self, Dispatch, BIND, CURRENT_DATA};

/// Separates the enclosing scope name from the tag name in body templates.
const SCOPE_SEPARATOR: &str = "___";
/// Separates the tag name from the counter in body templates.
const BODY_INFIX: &str = "__body__";

/// One level of rewriting: the whole document or one deferred body.
#[derive(Debug)]
struct Scope<'a> {
    name: &'a str,
    /// Offset of this scope's text in the document.
    base: usize,
    next_body_index: u32,
}

impl<'a> Scope<'a> {
    fn new(name: &'a str, base: usize) -> Self {
        Self {
            name,
            base,
            next_body_index: 1,
        }
    }

    fn next_body_template_name(&mut self, tag: &str) -> String {
        let index = self.next_body_index;
        self.next_body_index += 1;
        format!("{}{SCOPE_SEPARATOR}{tag}{BODY_INFIX}{index}", self.name)
    }
}

/// Per-call rewrite state shared by all scopes of one document.
pub(crate) struct Rewriter<'src> {
    registry: &'src ComponentRegistry,
    source_file: &'src SourceFile,
    /// Deferred body definitions, in the order their bodies were deferred.
    trailers: Vec<String>,
    errors: RewriteErrors,
}

impl<'src> Rewriter<'src> {
    pub(crate) fn new(registry: &'src ComponentRegistry, source_file: &'src SourceFile) -> Self {
        Self {
            registry,
            source_file,
            trailers: Vec::new(),
            errors: RewriteErrors::empty(),
        }
    }

    /// Rewrite the whole document; trailers follow the main output.
    pub(crate) fn run(mut self, base_name: &str) -> (String, RewriteErrors) {
        let source_file = self.source_file;
        let mut output = String::with_capacity(source_file.source.len());
        self.rewrite_scope(&mut output, &source_file.source, Scope::new(base_name, 0));
        for trailer in &self.trailers {
            output.push_str(trailer);
        }
        (output, self.errors)
    }

    fn rewrite_scope(&mut self, out: &mut String, text: &'src str, mut scope: Scope<'_>) {
        for segment in TagScanner::new(text) {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Tag(tag) => self.rewrite_tag(out, &mut scope, tag),
            }
        }
    }

    fn rewrite_tag(&mut self, out: &mut String, scope: &mut Scope<'_>, tag: ScannedTag<'src>) {
        let registry = self.registry;
        let dispatch = match tag.slot_name() {
            Some(slot) => Some(Dispatch::Slot(slot)),
            None => registry.get(tag.name()).map(Dispatch::Component),
        };
        let ScannedTag {
            component: mut comp,
            attrs_offset,
            body_offset,
            error,
            ..
        } = tag;
        let name = comp.name;
        let error = match dispatch {
            Some(_) => error,
            None => Some(TagError::new(
                ErrorCode::UNKNOWN_COMPONENT,
                attrs_offset,
                format!("unknown component <{name}>"),
            )),
        };

        // Record before descending into the body so errors stay in document order.
        let error_message = error.map(|e| self.record_error(name, e.offset_by(scope.base)));

        let has_slots = dispatch.is_some_and(|d| d.has_slots());
        let mut inline_body = None;
        let mut deferred = has_slots;
        if !has_slots && !comp.body.is_empty() {
            match compile_interpolated(comp.body.trim()) {
                Some(expr) => inline_body = Some(expr),
                None => deferred = true,
            }
        }

        if deferred {
            let template_name = scope.next_body_template_name(name);
            self.define_body_template(&template_name, comp.body, scope.base + body_offset);
            if has_slots {
                comp.args.push(Arg::new("bodyTemplate", quote(&template_name)));
            } else {
                comp.args.push(Arg::new(
                    "body",
                    format!("(eval {} ({BIND} {CURRENT_DATA}))", quote(&template_name)),
                ));
            }
        } else if let Some(expr) = inline_body {
            comp.args.push(Arg::new("body", expr));
        }

        if let Some(message) = error_message {
            emit::write_error(out, &message);
        } else if let Some(dispatch) = dispatch {
            emit::write_call(out, dispatch, &comp, deferred);
        }
    }

    /// Rewrite `body` as a template named `template_name` and queue it as a
    /// trailer.
    ///
    /// The trailer slot is reserved before the body is rewritten, so a
    /// parent definition precedes the definitions found inside it. Appending
    /// each definition only once its body is finished would give the
    /// reverse, children-first order.
    fn define_body_template(&mut self, template_name: &str, body: &'src str, base: usize) {
        tracing::debug!(template = template_name, "deferring component body");
        let slot = self.trailers.len();
        self.trailers.push(String::new());

        let mut def = format!("{{{{define {}}}}}{{{{with .Data}}}}", quote(template_name));
        self.rewrite_scope(&mut def, body, Scope::new(template_name, base));
        def.push_str("{{end}}{{end}}");
        self.trailers[slot] = def;
    }

    /// Record a tag error and return the placeholder message.
    fn record_error(&mut self, component: &str, error: TagError) -> String {
        let parse_error =
            ParseError::at(self.source_file, error.offset, error.code, error.message);
        tracing::debug!(
            component,
            code = %parse_error.code,
            line = parse_error.line(),
            message = %parse_error.message,
            "component tag error"
        );
        let message = parse_error.message.clone();
        self.errors.push_error(RewriteError::new(component, parse_error));
        message
    }
}
