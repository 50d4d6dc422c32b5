//! Directive emission for matched components.

use minicomp_lexer::quote;
use minicomp_types::{Component, ComponentDef, RenderMethod};

/// Name of the binding method available on every render context.
pub const BIND: &str = "$.Bind";
/// Data expression when the caller passes nothing.
pub const NIL_DATA: &str = "nil";
/// Data expression for the current context.
pub const CURRENT_DATA: &str = ".";
/// Data expression slots default to.
pub const SLOT_DATA: &str = "$.Data";

/// How a matched tag is rendered.
#[derive(Debug, Clone, Copy)]
pub enum Dispatch<'a> {
    /// A registered component.
    Component(&'a ComponentDef),
    /// A `<c-slot-NAME>` reference.
    Slot(&'a str),
}

impl Dispatch<'_> {
    pub fn has_slots(&self) -> bool {
        match self {
            Dispatch::Component(def) => def.has_slots,
            Dispatch::Slot(_) => false,
        }
    }
}

/// Write the call directive for `comp`.
///
/// `deferred` tells whether the body was moved into a trailer, which makes
/// the current context the default data.
pub fn write_call(out: &mut String, dispatch: Dispatch<'_>, comp: &Component<'_>, deferred: bool) {
    let data = if deferred { CURRENT_DATA } else { NIL_DATA };
    match dispatch {
        Dispatch::Slot(slot) => {
            out.push_str("{{eval $.Args.");
            out.push_str(slot);
            out.push_str("Template");
            write_bind(out, comp, SLOT_DATA);
            out.push_str("}}");
        }
        Dispatch::Component(def) => match def.render_method {
            RenderMethod::Template => {
                out.push_str("{{template ");
                out.push_str(&quote(&def.template_for(comp.name)));
                write_bind(out, comp, data);
                out.push_str("}}");
            }
            RenderMethod::Function => {
                out.push_str("{{");
                out.push_str(&def.function_for(comp.name));
                write_bind(out, comp, data);
                out.push_str("}}");
            }
            RenderMethod::FunctionThenTemplate => {
                out.push_str("{{template ");
                out.push_str(&quote(&def.template_for(comp.name)));
                out.push_str(" (");
                out.push_str(BIND);
                out.push_str(" (");
                out.push_str(&def.function_for(comp.name));
                write_bind(out, comp, data);
                out.push_str("))}}");
            }
        },
    }
}

/// Write ` ($.Bind DATA "k" v ...)`. A `data` argument replaces `default_data`.
pub fn write_bind(out: &mut String, comp: &Component<'_>, default_data: &str) {
    let data_idx = comp.find_arg("data");
    let data = data_idx.map_or(default_data, |i| comp.args[i].value.as_str());

    out.push_str(" (");
    out.push_str(BIND);
    out.push(' ');
    out.push_str(data);
    for (i, arg) in comp.args.iter().enumerate() {
        if Some(i) == data_idx {
            continue;
        }
        out.push(' ');
        out.push_str(&quote(&arg.name));
        out.push(' ');
        out.push_str(&arg.value);
    }
    out.push(')');
}

/// Write the inline placeholder for a tag that failed to parse.
pub fn write_error(out: &mut String, message: &str) {
    out.push_str("{{error ");
    out.push_str(&quote(message));
    out.push_str("}}");
}
