//! Metadata Resolver
//!
//! Derives a Plugin record from a staged directory: an explicit plugin.json
//! manifest at the root wins; otherwise identity and contents are inferred
//! by directory convention.

use std::fs;
use std::path::Path;

use crate::error::{AgenError, Result};
use crate::plugin::types::{Plugin, PluginType};

/// Manifest filename expected at a plugin's root
pub const MANIFEST_FILE: &str = "plugin.json";

const AGENTS_DIR: &str = "agents";
const SKILLS_DIR: &str = "skills";
const WORKFLOWS_DIR: &str = "workflows";
const MARKDOWN_EXT: &str = "md";

/// Resolve plugin metadata for a staged directory.
///
/// Inference never fails: a directory with no manifest and none of the
/// conventional subdirectories yields a valid, empty-content Bundle.
pub fn resolve_metadata(staged: &Path) -> Result<Plugin> {
    let manifest_path = staged.join(MANIFEST_FILE);
    if manifest_path.exists() {
        let content = fs::read_to_string(&manifest_path)?;
        let plugin: Plugin =
            serde_json::from_str(&content).map_err(|e| AgenError::InvalidManifest {
                path: manifest_path.clone(),
                message: e.to_string(),
            })?;
        return Ok(plugin);
    }

    Ok(infer_metadata(staged))
}

/// Infer a Plugin record from the directory name and conventional
/// subdirectories
fn infer_metadata(staged: &Path) -> Plugin {
    let name = staged
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| staged.display().to_string());

    Plugin {
        name,
        version: "0.0.0".to_string(),
        plugin_type: PluginType::Bundle,
        source: staged.display().to_string(),
        agents: markdown_entries(&staged.join(AGENTS_DIR)),
        skills: directory_entries(&staged.join(SKILLS_DIR)),
        workflows: markdown_entries(&staged.join(WORKFLOWS_DIR)),
        ..Plugin::default()
    }
}

/// Stems of markdown files directly under `dir`; empty if `dir` is absent
fn markdown_entries(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let path = e.path();
            if path.is_dir() {
                return None;
            }
            if path.extension().and_then(|x| x.to_str()) != Some(MARKDOWN_EXT) {
                return None;
            }
            path.file_stem().map(|s| s.to_string_lossy().to_string())
        })
        .collect();
    names.sort();
    names
}

/// Names of directories directly under `dir`; empty if `dir` is absent
fn directory_entries(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_manifest_wins_over_inference() {
        let temp = TempDir::new().unwrap();
        let staged = temp.path().join("some-dir");
        fs::create_dir_all(staged.join("agents")).unwrap();
        fs::write(staged.join("agents/a.md"), "# a").unwrap();
        fs::write(
            staged.join(MANIFEST_FILE),
            r#"{"name": "explicit", "version": "2.0.0", "type": "agent"}"#,
        )
        .unwrap();

        let plugin = resolve_metadata(&staged).unwrap();
        assert_eq!(plugin.name, "explicit");
        assert_eq!(plugin.version, "2.0.0");
        assert_eq!(plugin.plugin_type, PluginType::Agent);
        // manifest contents are taken as-is, no convention scan
        assert!(plugin.agents.is_empty());
    }

    #[test]
    fn test_malformed_manifest_fails() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(MANIFEST_FILE), "{not json").unwrap();

        let result = resolve_metadata(temp.path());
        assert!(matches!(result, Err(AgenError::InvalidManifest { .. })));
    }

    #[test]
    fn test_inference_scans_conventions() {
        let temp = TempDir::new().unwrap();
        let staged = temp.path().join("myplugin");
        fs::create_dir_all(staged.join("agents")).unwrap();
        fs::create_dir_all(staged.join("skills/review")).unwrap();
        fs::create_dir_all(staged.join("workflows")).unwrap();
        fs::write(staged.join("agents/a.md"), "").unwrap();
        fs::write(staged.join("agents/b.txt"), "").unwrap();
        fs::write(staged.join("workflows/deploy.md"), "").unwrap();
        fs::write(staged.join("skills/notes.md"), "").unwrap();

        let plugin = resolve_metadata(&staged).unwrap();
        assert_eq!(plugin.name, "myplugin");
        assert_eq!(plugin.version, "0.0.0");
        assert_eq!(plugin.plugin_type, PluginType::Bundle);
        assert_eq!(plugin.source, staged.display().to_string());
        // non-markdown files ignored, files under skills/ ignored
        assert_eq!(plugin.agents, vec!["a"]);
        assert_eq!(plugin.skills, vec!["review"]);
        assert_eq!(plugin.workflows, vec!["deploy"]);
    }

    #[test]
    fn test_inference_never_fails_on_empty_dir() {
        let temp = TempDir::new().unwrap();
        let staged = temp.path().join("bare");
        fs::create_dir_all(&staged).unwrap();

        let plugin = resolve_metadata(&staged).unwrap();
        assert_eq!(plugin.name, "bare");
        assert!(plugin.agents.is_empty());
        assert!(plugin.skills.is_empty());
        assert!(plugin.workflows.is_empty());
    }
}
