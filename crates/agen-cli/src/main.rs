use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use agen_core::{Plugin, PluginManager, Result};

mod args;
use args::{Cli, Commands, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("agen_core=debug,agen_cli=debug")
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut manager = match cli.store_dir {
        Some(dir) => PluginManager::with_dir(dir),
        None => PluginManager::new()?,
    };

    match cli.command {
        Commands::Install { source } => {
            let plugin = manager.install(&source)?;
            println!(
                "{} {} {}",
                "Installed:".green(),
                plugin.name.cyan().bold(),
                plugin.version
            );
            Ok(())
        }
        Commands::Uninstall { name } => {
            manager.uninstall(&name)?;
            println!("{} {}", "Uninstalled:".green(), name.cyan().bold());
            Ok(())
        }
        Commands::Update { name } => {
            let plugin = manager.update(&name)?;
            println!(
                "{} {} {}",
                "Updated:".green(),
                plugin.name.cyan().bold(),
                plugin.version
            );
            Ok(())
        }
        Commands::List => {
            handle_list(&manager);
            Ok(())
        }
        Commands::Info { name } => {
            let plugin = manager.get(&name)?;
            print_plugin(&plugin);
            Ok(())
        }
        Commands::New { name, kind } => {
            let cwd = std::env::current_dir()?;
            let path = manager.create(&name, kind.into(), &cwd)?;
            println!("{} {}", "Created:".green(), path.display());
            println!();
            println!("Next steps:");
            println!("  1. Edit {}/plugin.json", name);
            println!("  2. Add agents/skills/workflows as needed");
            println!("  3. Install: agen install ./{}", name);
            Ok(())
        }
        Commands::Completions { shell } => {
            handle_completions(shell);
            Ok(())
        }
    }
}

fn handle_list(manager: &PluginManager) {
    let mut plugins = manager.list();
    if plugins.is_empty() {
        println!("No plugins installed.");
        println!();
        println!("Install one with: agen install <source>");
        return;
    }

    plugins.sort_by(|a, b| a.name.cmp(&b.name));

    println!();
    println!("Installed plugins:");
    println!();
    for plugin in plugins {
        println!(
            "  {} {} ({})",
            plugin.name.cyan().bold(),
            plugin.version,
            plugin.plugin_type
        );
        if !plugin.description.is_empty() {
            println!("    {}", plugin.description);
        }
    }
    println!();
}

fn print_plugin(plugin: &Plugin) {
    println!();
    println!("Plugin: {}", plugin.name.cyan().bold());
    println!("Version: {}", plugin.version);
    println!("Type: {}", plugin.plugin_type);
    if !plugin.description.is_empty() {
        println!("Description: {}", plugin.description);
    }
    if !plugin.author.is_empty() {
        println!("Author: {}", plugin.author);
    }
    println!("Source: {}", plugin.source);
    println!("Installed: {}", plugin.installed_at);

    print_components("Agents", &plugin.agents);
    print_components("Skills", &plugin.skills);
    print_components("Workflows", &plugin.workflows);
    println!();
}

fn print_components(label: &str, names: &[String]) {
    if names.is_empty() {
        return;
    }
    println!("{}: {}", label, names.join(", "));
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "agen", &mut io::stdout());
}
