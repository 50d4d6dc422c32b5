//! Component registration metadata and the per-occurrence component model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Prefix of tag names that reference a caller-filled slot.
pub const SLOT_PREFIX: &str = "c-slot-";

/// How a registered component is turned into a template directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMethod {
    /// `{{template "NAME" (...)}}`
    Template,
    /// `{{FUNC (...)}}`
    Function,
    /// `{{template "NAME" ($.Bind (FUNC (...)))}}`
    FunctionThenTemplate,
}

/// Registration metadata for one component tag name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDef {
    pub render_method: RenderMethod,
    /// Function to call instead of the one derived from the tag name.
    #[serde(default, alias = "impl_name", skip_serializing_if = "Option::is_none")]
    pub func_name: Option<String>,
    /// Template to invoke instead of the tag name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    /// The component's own template contains slot references, so its body
    /// must always be passed as a named template.
    #[serde(default)]
    pub has_slots: bool,
}

impl ComponentDef {
    pub fn new(render_method: RenderMethod) -> Self {
        Self {
            render_method,
            func_name: None,
            template_name: None,
            has_slots: false,
        }
    }

    pub fn template() -> Self {
        Self::new(RenderMethod::Template)
    }

    pub fn function() -> Self {
        Self::new(RenderMethod::Function)
    }

    pub fn with_func_name(mut self, name: impl Into<String>) -> Self {
        self.func_name = Some(name.into());
        self
    }

    pub fn with_template_name(mut self, name: impl Into<String>) -> Self {
        self.template_name = Some(name.into());
        self
    }

    pub fn with_slots(mut self) -> Self {
        self.has_slots = true;
        self
    }

    /// Describe a template-rendered component from its template source.
    pub fn scan_template(code: &str) -> Self {
        Self {
            has_slots: code.contains(SLOT_PREFIX),
            ..Self::template()
        }
    }

    /// The function invoked for `tag`: the explicit name, else the tag name
    /// with hyphens turned into underscores.
    pub fn function_for(&self, tag: &str) -> String {
        match &self.func_name {
            Some(name) => name.clone(),
            None => tag.replace('-', "_"),
        }
    }

    /// The template invoked for `tag`: the explicit name, else the tag name.
    pub fn template_for(&self, tag: &str) -> String {
        self.template_name.clone().unwrap_or_else(|| tag.to_string())
    }
}

/// Read-only lookup from tag name to [`ComponentDef`].
///
/// Serializes as a JSON object keyed by tag name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentRegistry {
    components: HashMap<String, ComponentDef>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from its JSON form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn register(&mut self, tag: impl Into<String>, def: ComponentDef) -> &mut Self {
        self.components.insert(tag.into(), def);
        self
    }

    pub fn get(&self, tag: &str) -> Option<&ComponentDef> {
        self.components.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.components.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, ComponentDef)> for ComponentRegistry {
    fn from_iter<I: IntoIterator<Item = (S, ComponentDef)>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A named argument whose value is already target-syntax text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arg {
    pub name: String,
    pub value: String,
}

impl Arg {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One matched tag occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component<'src> {
    pub name: &'src str,
    /// Raw, un-rewritten body text.
    pub body: &'src str,
    pub args: Vec<Arg>,
}

impl Component<'_> {
    /// Index of the first argument called `name`.
    pub fn find_arg(&self, name: &str) -> Option<usize> {
        self.args.iter().position(|arg| arg.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_func_name_defaults_to_underscored_tag() {
        let def = ComponentDef::function();
        assert_eq!(def.function_for("c-foo-bar"), "c_foo_bar");
        let def = ComponentDef::function().with_func_name("render_foo");
        assert_eq!(def.function_for("c-foo"), "render_foo");
    }

    #[test]
    fn test_template_name_defaults_to_tag() {
        assert_eq!(ComponentDef::template().template_for("c-box"), "c-box");
        let def = ComponentDef::template().with_template_name("box.html");
        assert_eq!(def.template_for("c-box"), "box.html");
    }

    #[test]
    fn test_scan_template_detects_slots() {
        let plain = ComponentDef::scan_template("<b>{{.Args.body}}</b>");
        assert_eq!(plain.render_method, RenderMethod::Template);
        assert!(!plain.has_slots);
        let slotted = ComponentDef::scan_template("<div><c-slot-body /></div>");
        assert!(slotted.has_slots);
    }

    #[test]
    fn test_registry_from_json() {
        let registry = ComponentRegistry::from_json(
            r#"{
                "c-test": { "render_method": "template" },
                "c-foo": { "render_method": "function", "impl_name": "render_foo" },
                "c-box": { "render_method": "function_then_template", "has_slots": true }
            }"#,
        )
        .unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("c-test"), Some(&ComponentDef::template()));
        assert_eq!(registry.get("c-foo").unwrap().function_for("c-foo"), "render_foo");
        let bx = registry.get("c-box").unwrap();
        assert_eq!(bx.render_method, RenderMethod::FunctionThenTemplate);
        assert!(bx.has_slots);
        assert!(!registry.contains("c-xxx"));
    }

    #[test]
    fn test_registry_rejects_unknown_render_method() {
        assert!(ComponentRegistry::from_json(r#"{"c-x": {"render_method": "slot"}}"#).is_err());
    }

    #[test]
    fn test_find_arg_returns_first_match() {
        let comp = Component {
            name: "c-test",
            body: "",
            args: vec![Arg::new("a", "1"), Arg::new("data", "(x)"), Arg::new("data", "(y)")],
        };
        assert_eq!(comp.find_arg("data"), Some(1));
        assert_eq!(comp.find_arg("missing"), None);
    }
}
