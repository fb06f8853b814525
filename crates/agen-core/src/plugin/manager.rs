//! Plugin Manager
//!
//! High-level API over source resolution, fetching, metadata resolution,
//! and registry persistence. Owns the registry for the lifetime of one
//! process invocation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{AgenError, Result};
use crate::plugin::fetcher::{GitOps, PluginFetcher};
use crate::plugin::metadata::resolve_metadata;
use crate::plugin::registry::{RegistryStore, REGISTRY_FILE};
use crate::plugin::scaffold::scaffold_plugin;
use crate::plugin::source::PluginSource;
use crate::plugin::types::{Plugin, PluginType};

/// Plugin Manager - install, uninstall, list, get, and scaffold plugins
pub struct PluginManager {
    store_dir: PathBuf,
    registry: RegistryStore,
    fetcher: PluginFetcher,
}

impl PluginManager {
    /// Create a manager rooted at `<configDir>/agen/plugins`
    pub fn new() -> Result<Self> {
        let config = dirs::config_dir().ok_or(AgenError::ConfigDirNotFound)?;
        Ok(Self::with_dir(config.join("agen").join("plugins")))
    }

    /// Create with a custom plugin store directory (for testing)
    pub fn with_dir(store_dir: PathBuf) -> Self {
        let registry = RegistryStore::open(&store_dir.join(REGISTRY_FILE));
        let fetcher = PluginFetcher::new(&store_dir);
        Self {
            store_dir,
            registry,
            fetcher,
        }
    }

    /// Create with a custom git implementation (for testing)
    pub fn with_git(store_dir: PathBuf, git: Box<dyn GitOps>) -> Self {
        let registry = RegistryStore::open(&store_dir.join(REGISTRY_FILE));
        let fetcher = PluginFetcher::with_git(&store_dir, git);
        Self {
            store_dir,
            registry,
            fetcher,
        }
    }

    /// Get the plugin store directory
    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    /// Get the registry
    pub fn registry(&self) -> &RegistryStore {
        &self.registry
    }

    /// Install a plugin from a source reference.
    ///
    /// Resolves the source, fetches it into a staged directory, resolves
    /// its metadata, and registers the result under the plugin's name
    /// (last write wins). The registry is persisted before returning.
    pub fn install(&mut self, source: &str) -> Result<Plugin> {
        let resolved = PluginSource::resolve(source)?;
        debug!(source = source, "installing plugin");

        let staged = self.fetcher.fetch(&resolved)?;
        let mut plugin = resolve_metadata(&staged)?;

        if plugin.source.is_empty() {
            plugin.source = source.to_string();
        }
        if plugin.installed_at.is_empty() {
            plugin.installed_at = chrono::Utc::now().to_rfc3339();
        }

        self.registry.put(plugin.clone());
        self.registry.save()?;

        info!(name = %plugin.name, version = %plugin.version, "plugin installed");
        Ok(plugin)
    }

    /// Re-install an installed plugin from its recorded source
    pub fn update(&mut self, name: &str) -> Result<Plugin> {
        let source = self.registry.get(name)?.source.clone();
        self.install(&source)
    }

    /// Uninstall a plugin by name.
    ///
    /// Removes the plugin's store directory first (tolerating its absence;
    /// local-source plugins were never copied there). If removal fails the
    /// registry is left untouched and the plugin stays listed.
    pub fn uninstall(&mut self, name: &str) -> Result<()> {
        if !self.registry.contains(name) {
            return Err(AgenError::PluginNotFound {
                name: name.to_string(),
            });
        }

        let plugin_dir = self.store_dir.join(name);
        if plugin_dir.exists() {
            fs::remove_dir_all(&plugin_dir)?;
        }

        self.registry.remove(name);
        self.registry.save()?;

        info!(name = name, "plugin uninstalled");
        Ok(())
    }

    /// List installed plugins
    pub fn list(&self) -> Vec<Plugin> {
        self.registry.list()
    }

    /// Get an installed plugin by name
    pub fn get(&self, name: &str) -> Result<Plugin> {
        self.registry.get(name).cloned()
    }

    /// Scaffold a new plugin project under `parent`, returning its path
    pub fn create(&self, name: &str, plugin_type: PluginType, parent: &Path) -> Result<PathBuf> {
        scaffold_plugin(parent, name, plugin_type)
    }
}
