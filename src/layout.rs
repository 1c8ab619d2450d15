//! Layout value sources and the known-layout advisory.
use crate::combine::read_document;
use crate::error::{CombineError, DocumentRole};
use serde_json::Value;
use std::path::PathBuf;

/// Layout names accepted by the Cairo VM runner.
pub const KNOWN_LAYOUTS: &[&str] = &[
    "plain",
    "small",
    "dex",
    "recursive",
    "starknet",
    "starknet_with_keccak",
    "recursive_large_output",
    "recursive_with_poseidon",
    "all_solidity",
    "all_cairo",
    "dynamic",
];

/// Where the layout value comes from.
///
/// `Literal` embeds the argument as a JSON string, which is what the prover
/// expects (`"layout": "recursive"`). `Json` and `File` allow a structured
/// layout value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutSource {
    Literal(String),
    Json(String),
    File(PathBuf),
}

impl LayoutSource {
    pub fn resolve(&self) -> Result<Value, CombineError> {
        match self {
            LayoutSource::Literal(text) => Ok(Value::String(text.clone())),
            LayoutSource::Json(text) => {
                serde_json::from_str(text).map_err(|source| CombineError::Parse {
                    role: DocumentRole::Layout,
                    origin: "layout argument".to_string(),
                    source,
                })
            }
            LayoutSource::File(path) => read_document(path, DocumentRole::Layout),
        }
    }
}

/// Layout name carried by a value: the string itself, or an object's `name`.
pub fn layout_name(value: &Value) -> Option<&str> {
    match value {
        Value::String(name) => Some(name),
        Value::Object(map) => map.get("name").and_then(Value::as_str),
        _ => None,
    }
}

pub fn is_known_layout(name: &str) -> bool {
    KNOWN_LAYOUTS.contains(&name)
}

/// Warn when a named layout is not one the prover knows. The value is still
/// embedded unchanged.
pub fn warn_if_unknown(value: &Value) {
    let Some(name) = layout_name(value) else {
        tracing::debug!("layout value carries no name; skipping layout check");
        return;
    };
    if !is_known_layout(name) {
        tracing::warn!(
            layout = name,
            known = %KNOWN_LAYOUTS.join(","),
            "layout is not a known Cairo layout; embedding it verbatim"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literal_layout_resolves_to_json_string() {
        let layout = LayoutSource::Literal("row-major".to_string());
        assert_eq!(layout.resolve().expect("resolve"), json!("row-major"));
    }

    #[test]
    fn json_layout_keeps_structure() {
        let layout = LayoutSource::Json(r#"{"name":"dynamic","cpu_component_step":8}"#.into());
        let value = layout.resolve().expect("resolve");
        assert_eq!(value, json!({"name": "dynamic", "cpu_component_step": 8}));
        assert_eq!(layout_name(&value), Some("dynamic"));
    }

    #[test]
    fn malformed_json_layout_is_a_parse_error() {
        let layout = LayoutSource::Json("{not json".to_string());
        let err = layout.resolve().expect_err("malformed layout");
        assert!(matches!(
            err,
            CombineError::Parse {
                role: DocumentRole::Layout,
                ..
            }
        ));
    }

    #[test]
    fn missing_layout_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let layout = LayoutSource::File(dir.path().join("missing.json"));
        let err = layout.resolve().expect_err("missing layout file");
        assert!(matches!(
            err,
            CombineError::Read {
                role: DocumentRole::Layout,
                ..
            }
        ));
    }

    #[test]
    fn known_layouts_cover_prover_defaults() {
        assert!(is_known_layout("recursive"));
        assert!(is_known_layout("starknet_with_keccak"));
        assert!(!is_known_layout("row-major"));
        assert!(!is_known_layout("Recursive"));
    }

    #[test]
    fn layout_name_ignores_non_string_values() {
        assert_eq!(layout_name(&json!(7)), None);
        assert_eq!(layout_name(&json!({"name": 7})), None);
        assert_eq!(layout_name(&json!(["recursive"])), None);
    }
}
