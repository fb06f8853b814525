//! Registry Store
//!
//! The durable mapping of plugin name to installed Plugin record, backed
//! by a registry.json file under the plugin store root.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{AgenError, Result};
use crate::plugin::types::{Plugin, RegistryFile};

/// Registry filename under the plugin store root
pub const REGISTRY_FILE: &str = "registry.json";

/// Registry of installed plugins
///
/// Loaded once at construction, mutated in memory, and rewritten wholesale
/// by [`RegistryStore::save`] after every mutation. There is no locking:
/// concurrent writers clobber each other and the last save wins.
pub struct RegistryStore {
    path: PathBuf,
    plugins: HashMap<String, Plugin>,
}

impl RegistryStore {
    /// Load the registry from `path`.
    ///
    /// Fails if the file is missing or does not parse. Callers wanting the
    /// documented empty-registry recovery use [`RegistryStore::open`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let file: RegistryFile =
            serde_json::from_str(&content).map_err(|e| AgenError::RegistryParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            plugins: file.plugins,
        })
    }

    /// Load from `path`, substituting a fresh empty registry when the file
    /// is missing or unreadable.
    pub fn open(path: &Path) -> Self {
        match Self::load(path) {
            Ok(store) => store,
            Err(err) => {
                if path.exists() {
                    warn!(path = %path.display(), error = %err, "registry unreadable, starting empty");
                }
                Self {
                    path: path.to_path_buf(),
                    plugins: HashMap::new(),
                }
            }
        }
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the full mapping and overwrite the backing file
    pub fn save(&self) -> Result<()> {
        let write_err = |e: String| AgenError::RegistryWrite {
            path: self.path.clone(),
            message: e,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }

        let file = RegistryFile {
            plugins: self.plugins.clone(),
        };
        let content =
            serde_json::to_string_pretty(&file).map_err(|e| write_err(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| write_err(e.to_string()))?;

        Ok(())
    }

    /// Unconditional upsert under the plugin's name
    pub fn put(&mut self, plugin: Plugin) {
        self.plugins.insert(plugin.name.clone(), plugin);
    }

    /// Remove an entry; no-op if absent
    pub fn remove(&mut self, name: &str) {
        self.plugins.remove(name);
    }

    /// Get a plugin by name
    pub fn get(&self, name: &str) -> Result<&Plugin> {
        self.plugins.get(name).ok_or_else(|| AgenError::PluginNotFound {
            name: name.to_string(),
        })
    }

    /// Check whether a plugin is registered
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Snapshot of all records; iteration order is not stable across calls
    pub fn list(&self) -> Vec<Plugin> {
        self.plugins.values().cloned().collect()
    }

    /// Number of registered plugins
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
