//! Data models for grailx manifests
//!
//! These represent the JSON documents read from the base manifest and
//! from plugin manifests. Every collection defaults to empty, so any
//! decoded manifest can be merged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::null_as_default;

/// A loosely-structured command record
///
/// Expected to carry a `name` and optionally a `desc`; any other fields
/// pass through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct CommandRecord(pub Map<String, Value>);

impl CommandRecord {
    pub fn new(name: &str, desc: Option<&str>) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.to_string()));
        if let Some(desc) = desc {
            fields.insert("desc".to_string(), Value::String(desc.to_string()));
        }
        Self(fields)
    }

    /// Command name; non-string values count as absent
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Command description; non-string values count as absent
    pub fn desc(&self) -> Option<&str> {
        self.0.get("desc").and_then(Value::as_str)
    }
}

/// A tool manifest (base or plugin)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub commands: Vec<CommandRecord>,

    /// Environment hint key -> description
    #[serde(default, deserialize_with = "null_as_default")]
    pub env: IndexMap<String, String>,

    /// Opaque schema payloads keyed by schema name
    #[serde(default, deserialize_with = "null_as_default")]
    pub schemas: IndexMap<String, Map<String, Value>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub examples: Vec<String>,
}

impl Manifest {
    /// True when there is nothing an agent could use
    ///
    /// Examples alone don't count.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.env.is_empty() && self.schemas.is_empty()
    }

    /// Description, if present and non-empty
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let m: Manifest = serde_json::from_str("{}").unwrap();
        assert_eq!(m, Manifest::default());
        assert!(m.is_empty());
    }

    #[test]
    fn test_null_fields_default_to_empty() {
        let m: Manifest = serde_json::from_str(
            r#"{"commands": null, "env": null, "schemas": null, "examples": null}"#,
        )
        .unwrap();
        assert!(m.commands.is_empty());
        assert!(m.examples.is_empty());
        assert!(m.is_empty());
    }

    #[test]
    fn test_loose_command_records() {
        let m: Manifest = serde_json::from_str(
            r#"{"commands": [{"name": "web.search", "desc": "search docs", "args": ["q"]}, {"name": 7}]}"#,
        )
        .unwrap();
        assert_eq!(m.commands[0].name(), Some("web.search"));
        assert_eq!(m.commands[0].desc(), Some("search docs"));
        assert_eq!(m.commands[1].name(), None);
    }

    #[test]
    fn test_non_object_schema_is_rejected() {
        let result = serde_json::from_str::<Manifest>(r#"{"schemas": {"page": 3}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_examples_alone_are_empty() {
        let m = Manifest {
            examples: vec!["grailx prompt".to_string()],
            ..Default::default()
        };
        assert!(m.is_empty());
    }

    #[test]
    fn test_env_keeps_document_order() {
        let m: Manifest = serde_json::from_str(r#"{"env": {"ZED": "z", "ALPHA": "a"}}"#).unwrap();
        let keys: Vec<_> = m.env.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ZED", "ALPHA"]);
    }
}
