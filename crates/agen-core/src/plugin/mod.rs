//! Plugin Module
//!
//! Plugin acquisition and registry: resolving a source reference to a
//! concrete artifact, fetching it, deriving metadata, and persisting the
//! local registry of installed plugins.
//!
//! - `source`: source string classification
//! - `fetcher`: the three fetch strategies (git, archive URL, local path)
//! - `archive`: zip extraction
//! - `metadata`: manifest parsing and convention inference
//! - `registry`: the durable name -> Plugin store
//! - `manager`: install/uninstall/list/get façade
//! - `scaffold`: new-plugin skeleton generation

pub mod archive;
pub mod fetcher;
pub mod manager;
pub mod metadata;
pub mod registry;
pub mod scaffold;
pub mod source;
pub mod types;

// Re-exports
pub use fetcher::{GitCli, GitOps, PluginFetcher};
pub use manager::PluginManager;
pub use metadata::{resolve_metadata, MANIFEST_FILE};
pub use registry::{RegistryStore, REGISTRY_FILE};
pub use scaffold::scaffold_plugin;
pub use source::PluginSource;
pub use types::{Plugin, PluginType, RegistryFile};
