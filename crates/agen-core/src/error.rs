use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgenError {
    #[error("Invalid source '{input}': {reason}")]
    InvalidSource { input: String, reason: String },

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Extraction failed: {0}")]
    Extract(String),

    #[error("Unsupported archive format: {filename}")]
    UnsupportedFormat { filename: String },

    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Invalid manifest at {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    #[error("Failed to parse registry at {path}: {message}")]
    RegistryParse { path: PathBuf, message: String },

    #[error("Failed to write registry at {path}: {message}")]
    RegistryWrite { path: PathBuf, message: String },

    #[error("Plugin not found: {name}")]
    PluginNotFound { name: String },

    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AgenError>;

impl AgenError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::PluginNotFound { .. } => 2,
            Self::PathNotFound { .. } | Self::NotADirectory { .. } => 3,
            Self::InvalidSource { .. } => 4,
            Self::InvalidManifest { .. } => 5,
            Self::UnsupportedFormat { .. } => 6,
            _ => 1,
        }
    }
}
