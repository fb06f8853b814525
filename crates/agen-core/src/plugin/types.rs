//! Plugin type definitions
//!
//! The installed-plugin record, its kind, and the on-disk registry shape.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Kind of content a plugin provides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginType {
    /// Single agent definition
    Agent,
    /// Single skill directory
    Skill,
    /// Single workflow definition
    Workflow,
    /// Mixture of agents, skills, and workflows
    #[default]
    Bundle,
}

impl std::fmt::Display for PluginType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Agent => write!(f, "agent"),
            Self::Skill => write!(f, "skill"),
            Self::Workflow => write!(f, "workflow"),
            Self::Bundle => write!(f, "bundle"),
        }
    }
}

/// Installed plugin record (also the plugin.json manifest shape)
///
/// `name` is required; every other key takes its empty value when absent.
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    /// Plugin name (unique registry key)
    pub name: String,
    /// Free-form version string
    #[serde(default)]
    pub version: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Author
    #[serde(default)]
    pub author: String,
    /// Original source reference, retained for re-install
    #[serde(default)]
    pub source: String,
    /// Plugin kind
    #[serde(default, rename = "type")]
    pub plugin_type: PluginType,
    /// RFC 3339 installation timestamp
    #[serde(default)]
    pub installed_at: String,
    /// Names of agents contained in the plugin
    #[serde(default)]
    pub agents: Vec<String>,
    /// Names of skills contained in the plugin
    #[serde(default)]
    pub skills: Vec<String>,
    /// Names of workflows contained in the plugin
    #[serde(default)]
    pub workflows: Vec<String>,
    /// Open extension map
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// registry.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Plugins map: plugin name -> record
    #[serde(default)]
    pub plugins: HashMap<String, Plugin>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest_minimal() {
        let json = r#"{"name": "myplugin", "version": "1.2.0", "type": "skill"}"#;

        let plugin: Plugin = serde_json::from_str(json).unwrap();
        assert_eq!(plugin.name, "myplugin");
        assert_eq!(plugin.version, "1.2.0");
        assert_eq!(plugin.plugin_type, PluginType::Skill);
        assert!(plugin.agents.is_empty());
        assert!(plugin.metadata.is_empty());
    }

    #[test]
    fn test_parse_manifest_unknown_keys_ignored() {
        let json = r#"{"name": "p", "homepage": "https://example.com", "stars": 4}"#;

        let plugin: Plugin = serde_json::from_str(json).unwrap();
        assert_eq!(plugin.name, "p");
        assert_eq!(plugin.plugin_type, PluginType::Bundle);
    }

    #[test]
    fn test_parse_manifest_missing_name_fails() {
        let json = r#"{"version": "1.0.0"}"#;

        assert!(serde_json::from_str::<Plugin>(json).is_err());
    }

    #[test]
    fn test_parse_registry_file() {
        let json = r#"{
            "plugins": {
                "demo": {
                    "name": "demo",
                    "version": "0.1.0",
                    "type": "agent",
                    "agents": ["demo"]
                }
            }
        }"#;

        let file: RegistryFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.plugins.len(), 1);
        assert_eq!(file.plugins["demo"].agents, vec!["demo"]);
    }

    #[test]
    fn test_plugin_type_roundtrip() {
        for (ty, s) in [
            (PluginType::Agent, "\"agent\""),
            (PluginType::Skill, "\"skill\""),
            (PluginType::Workflow, "\"workflow\""),
            (PluginType::Bundle, "\"bundle\""),
        ] {
            assert_eq!(serde_json::to_string(&ty).unwrap(), s);
            assert_eq!(serde_json::from_str::<PluginType>(s).unwrap(), ty);
        }
    }
}
