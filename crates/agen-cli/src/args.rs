use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use agen_core::PluginType;

#[derive(Parser)]
#[command(name = "agen")]
#[command(about = "Local plugin manager for AI agent templates")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Plugin store directory (default: <config dir>/agen/plugins)
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PluginKind {
    Agent,
    Skill,
    Workflow,
    Bundle,
}

impl From<PluginKind> for PluginType {
    fn from(kind: PluginKind) -> Self {
        match kind {
            PluginKind::Agent => PluginType::Agent,
            PluginKind::Skill => PluginType::Skill,
            PluginKind::Workflow => PluginType::Workflow,
            PluginKind::Bundle => PluginType::Bundle,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install a plugin from github.com/<owner>/<repo>[@ref], an archive URL, or a local path
    Install {
        /// Plugin source reference
        source: String,
    },

    /// Uninstall an installed plugin
    Uninstall {
        /// Plugin name
        name: String,
    },

    /// Re-install a plugin from its recorded source
    Update {
        /// Plugin name
        name: String,
    },

    /// List installed plugins
    List,

    /// Show details for an installed plugin
    Info {
        /// Plugin name
        name: String,
    },

    /// Scaffold a new plugin project in the current directory
    New {
        /// Plugin name
        name: String,

        /// Plugin kind
        #[arg(short = 't', long = "type", value_enum, default_value = "bundle")]
        kind: PluginKind,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
