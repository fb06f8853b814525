pub mod error;
pub mod plugin;

pub use error::{AgenError, Result};
pub use plugin::{
    resolve_metadata, scaffold_plugin, GitCli, GitOps, Plugin, PluginFetcher, PluginManager,
    PluginSource, PluginType, RegistryFile, RegistryStore, MANIFEST_FILE, REGISTRY_FILE,
};
