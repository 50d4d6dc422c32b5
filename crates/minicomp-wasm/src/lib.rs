//! minicomp rewriter as a WASM module for browser environments.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { rewrite } from 'minicomp-wasm';
//!
//! await init();
//!
//! const registry = JSON.stringify({ "c-test": { render_method: "template" } });
//! const result = JSON.parse(rewrite("foo <c-test/> bar", "page", registry));
//! // { output: 'foo {{template "c-test" ($.Bind nil)}} bar', errors: { ... } }
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use minicomp_types::{ComponentDef, ComponentRegistry};

/// Rewrite a template with the registry given as JSON.
///
/// Returns a JSON string containing a `RewriteResult`:
/// ```json
/// {
///   "output": "...",
///   "errors": { "errors": [], "total_errors": 0 }
/// }
/// ```
///
/// An unreadable registry yields `{"output": null, "registry_error": "..."}`.
#[wasm_bindgen]
pub fn rewrite(source: &str, base_name: &str, registry_json: &str) -> String {
    rewrite_to_json(source, base_name, registry_json)
}

/// Wrap the main part of rewritten code, keeping trailers at the end.
#[wasm_bindgen]
pub fn wrap_template(code: &str, prefix: &str, suffix: &str) -> String {
    minicomp_compiler::wrap_template(code, prefix, suffix)
}

/// Describe a component template as a JSON `ComponentDef`.
#[wasm_bindgen]
pub fn scan_template(code: &str) -> String {
    to_json(&ComponentDef::scan_template(code))
}

/// Return the rewriter version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[derive(Serialize)]
struct RegistryFailure {
    output: Option<String>,
    registry_error: String,
}

fn rewrite_to_json(source: &str, base_name: &str, registry_json: &str) -> String {
    match ComponentRegistry::from_json(registry_json) {
        Ok(registry) => to_json(&minicomp_compiler::rewrite(source, base_name, &registry)),
        Err(e) => to_json(&RegistryFailure {
            output: None,
            registry_error: e.to_string(),
        }),
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        format!(
            r#"{{"output":null,"registry_error":"Serialization error: {}"}}"#,
            e
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_rewrite_to_json() {
        let json = rewrite_to_json(
            "foo <c-test/> <c-xxx/>",
            "page",
            r#"{"c-test": {"render_method": "template"}}"#,
        );
        let v: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            v["output"],
            r#"foo {{template "c-test" ($.Bind nil)}} {{error "unknown component <c-xxx>"}}"#
        );
        assert_eq!(v["errors"]["total_errors"], 1);
        assert_eq!(v["errors"]["errors"][0]["component"], "c-xxx");
        assert_eq!(v["errors"]["errors"][0]["error"]["line"], 1);
    }

    #[test]
    fn test_rewrite_to_json_bad_registry() {
        let json = rewrite_to_json("foo", "page", "not json");
        let v: Value = serde_json::from_str(&json).unwrap();
        assert!(v["output"].is_null());
        assert!(v["registry_error"].is_string());
    }

    #[test]
    fn test_scan_template_json() {
        let v: Value = serde_json::from_str(&scan_template("<c-slot-body/>")).unwrap();
        assert_eq!(v["render_method"], "template");
        assert_eq!(v["has_slots"], true);
    }
}
