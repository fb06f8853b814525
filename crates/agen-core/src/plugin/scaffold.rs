//! Plugin Scaffolder
//!
//! Generates a new, empty plugin project skeleton: manifest, README, and
//! the per-type sample files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AgenError, Result};
use crate::plugin::metadata::MANIFEST_FILE;
use crate::plugin::types::{Plugin, PluginType};

const AGENTS_DIR: &str = "agents";
const SKILLS_DIR: &str = "skills";
const WORKFLOWS_DIR: &str = "workflows";

/// Scaffold a plugin skeleton at `<parent>/<name>`, returning the created
/// directory.
///
/// Pre-existing unrelated files in the target directory are left alone;
/// only the skeleton files are (re)written.
pub fn scaffold_plugin(parent: &Path, name: &str, plugin_type: PluginType) -> Result<PathBuf> {
    let root = parent.join(name);
    fs::create_dir_all(&root)?;

    write_manifest(&root, name, plugin_type)?;
    write_readme(&root, name, plugin_type)?;

    match plugin_type {
        PluginType::Agent => {
            let dir = root.join(AGENTS_DIR);
            fs::create_dir_all(&dir)?;
            fs::write(dir.join(format!("{}.md", name)), sample_markdown(name))?;
        }
        PluginType::Skill => {
            let dir = root.join(SKILLS_DIR).join(name);
            fs::create_dir_all(&dir)?;
            fs::write(dir.join("SKILL.md"), sample_markdown(name))?;
        }
        PluginType::Workflow => {
            let dir = root.join(WORKFLOWS_DIR);
            fs::create_dir_all(&dir)?;
            fs::write(dir.join(format!("{}.md", name)), sample_markdown(name))?;
        }
        PluginType::Bundle => {
            fs::create_dir_all(root.join(AGENTS_DIR))?;
            fs::create_dir_all(root.join(SKILLS_DIR))?;
            fs::create_dir_all(root.join(WORKFLOWS_DIR))?;
        }
    }

    Ok(root)
}

fn write_manifest(root: &Path, name: &str, plugin_type: PluginType) -> Result<()> {
    let manifest = Plugin {
        name: name.to_string(),
        version: "0.1.0".to_string(),
        description: format!("The {} plugin", name),
        plugin_type,
        ..Plugin::default()
    };

    let path = root.join(MANIFEST_FILE);
    let content = serde_json::to_string_pretty(&manifest).map_err(|e| AgenError::InvalidManifest {
        path: path.clone(),
        message: e.to_string(),
    })?;
    fs::write(path, content)?;

    Ok(())
}

fn write_readme(root: &Path, name: &str, plugin_type: PluginType) -> Result<()> {
    let content = format!(
        "# {name}\n\nA {plugin_type} plugin for agen.\n\n## Install\n\n```\nagen install ./{name}\n```\n"
    );
    fs::write(root.join("README.md"), content)?;
    Ok(())
}

/// Two-field header block followed by placeholder instructions
fn sample_markdown(name: &str) -> String {
    format!(
        "---\nname: {name}\ndescription: Describe what {name} does\n---\n\nAdd instructions here.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scaffold_agent() {
        let temp = TempDir::new().unwrap();
        let root = scaffold_plugin(temp.path(), "demo", PluginType::Agent).unwrap();

        assert_eq!(root, temp.path().join("demo"));
        assert!(root.join("README.md").exists());
        assert!(root.join("agents/demo.md").exists());

        let manifest = fs::read_to_string(root.join(MANIFEST_FILE)).unwrap();
        let plugin: Plugin = serde_json::from_str(&manifest).unwrap();
        assert_eq!(plugin.name, "demo");
        assert_eq!(plugin.plugin_type, PluginType::Agent);
    }

    #[test]
    fn test_scaffold_skill_layout() {
        let temp = TempDir::new().unwrap();
        let root = scaffold_plugin(temp.path(), "review", PluginType::Skill).unwrap();
        assert!(root.join("skills/review/SKILL.md").exists());

        let content = fs::read_to_string(root.join("skills/review/SKILL.md")).unwrap();
        assert!(content.starts_with("---\nname: review\n"));
        assert!(content.contains("description:"));
    }

    #[test]
    fn test_scaffold_bundle_dirs() {
        let temp = TempDir::new().unwrap();
        let root = scaffold_plugin(temp.path(), "kit", PluginType::Bundle).unwrap();
        assert!(root.join("agents").is_dir());
        assert!(root.join("skills").is_dir());
        assert!(root.join("workflows").is_dir());
    }

    #[test]
    fn test_scaffold_keeps_unrelated_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("demo");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("notes.txt"), "keep me").unwrap();

        scaffold_plugin(temp.path(), "demo", PluginType::Agent).unwrap();

        assert_eq!(fs::read_to_string(root.join("notes.txt")).unwrap(), "keep me");
        assert!(root.join("agents/demo.md").exists());
    }
}
