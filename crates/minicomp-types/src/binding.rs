//! The value a host engine's binding call produces at render time.
//!
//! Rewritten templates call `($.Bind DATA "k1" v1 "k2" v2 ...)`; hosts that
//! implement that call can use [`Binding::bind`] to build the value handed
//! to the component template.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from assembling a binding out of a flat key/value list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("odd number of arguments {0}")]
    OddArguments(usize),

    #[error("argument {index} must be a string, got {found}")]
    NonStringKey { index: usize, found: String },
}

/// A data value paired with named arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Binding {
    pub data: Value,
    pub args: Map<String, Value>,
}

impl Binding {
    /// Pair `data` with alternating key/value arguments.
    pub fn bind(data: Value, pairs: &[Value]) -> Result<Self, BindError> {
        if pairs.len() % 2 != 0 {
            return Err(BindError::OddArguments(pairs.len()));
        }
        let mut args = Map::new();
        for (i, pair) in pairs.chunks_exact(2).enumerate() {
            match &pair[0] {
                Value::String(key) => {
                    args.insert(key.clone(), pair[1].clone());
                }
                other => {
                    return Err(BindError::NonStringKey {
                        index: i * 2,
                        found: other.to_string(),
                    })
                }
            }
        }
        Ok(Self { data, args })
    }

    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bind_pairs_keys_with_values() {
        let b = Binding::bind(json!("hello"), &[json!("answer"), json!(42), json!("ok"), json!(true)])
            .unwrap();
        assert_eq!(b.data, json!("hello"));
        assert_eq!(b.arg("answer"), Some(&json!(42)));
        assert_eq!(b.arg("ok"), Some(&json!(true)));
        assert_eq!(b.arg("missing"), None);
    }

    #[test]
    fn test_bind_without_args() {
        let b = Binding::bind(Value::Null, &[]).unwrap();
        assert!(b.args.is_empty());
        assert_eq!(b.data, Value::Null);
    }

    #[test]
    fn test_bind_odd_arguments() {
        let err = Binding::bind(Value::Null, &[json!("a")]).unwrap_err();
        assert_eq!(err, BindError::OddArguments(1));
        assert_eq!(err.to_string(), "odd number of arguments 1");
    }

    #[test]
    fn test_bind_non_string_key() {
        let err = Binding::bind(Value::Null, &[json!("a"), json!(1), json!(2), json!(3)]).unwrap_err();
        assert_eq!(
            err,
            BindError::NonStringKey {
                index: 2,
                found: "2".into()
            }
        );
    }

    #[test]
    fn test_binding_serializes_like_render_data() {
        let b = Binding::bind(json!({"Good": true}), &[json!("body"), json!("x")]).unwrap();
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json, json!({"Data": {"Good": true}, "Args": {"body": "x"}}));
    }
}
