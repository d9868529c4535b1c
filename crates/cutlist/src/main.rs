// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cutlist - inspect the adapters and media linkers registered by plugin
//! manifests.
//!
//! This is the binary entry point for the `cutlist` command.

mod config_cmd;
mod inspect;

use std::io::IsTerminal;

use clap::{Parser, Subcommand};

/// Cutlist - plugin manifest inspection.
#[derive(Parser, Debug)]
#[command(name = "cutlist", version, about, long_about = None)]
struct Cli {
    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered adapters and media linkers.
    List {
        /// Output JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// Print the manifest files that contributed, in load order.
    Sources,
    /// Show the adapter that handles a file suffix or path.
    Which {
        /// A suffix such as `edl`, or a file name such as `reel1.edl`.
        target: String,
    },
    /// Inspect Cutlist configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Validate the configuration files and environment.
    Check,
    /// Print the effective configuration as TOML.
    Show,
}

fn main() {
    let cli = Cli::parse();

    let config = match cutlist_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            cutlist_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level.to_ascii_lowercase());
    let use_color = !cli.plain && std::io::stdout().is_terminal();

    let result = match cli.command {
        Some(Commands::List { json }) => inspect::run_list(json, use_color),
        Some(Commands::Sources) => inspect::run_sources(),
        Some(Commands::Which { target }) => match inspect::run_which(&target, use_color) {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(1),
            Err(err) => Err(err),
        },
        Some(Commands::Config {
            action: ConfigCommands::Check,
        }) => config_cmd::run_check(&config, use_color),
        Some(Commands::Config {
            action: ConfigCommands::Show,
        }) => config_cmd::run_show(&config),
        None => {
            println!("cutlist: use --help for available commands");
            Ok(())
        }
    };

    if let Err(err) = result {
        if std::io::stderr().is_terminal() && !cli.plain {
            use colored::Colorize;
            eprintln!("{} {err}", "error:".red().bold());
        } else {
            eprintln!("error: {err}");
        }
        std::process::exit(1);
    }
}

/// Installs the fmt subscriber. `RUST_LOG` takes precedence over the
/// configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn default_filter(log_level: &str) -> String {
    format!("cutlist={log_level},cutlist_plugin={log_level},cutlist_config={log_level},warn")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_json() {
        let cli = Cli::try_parse_from(["cutlist", "list", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { json: true })));
        assert!(!cli.plain);
    }

    #[test]
    fn parses_which_with_global_plain() {
        let cli = Cli::try_parse_from(["cutlist", "which", "edl", "--plain"]).unwrap();
        assert!(cli.plain);
        match cli.command {
            Some(Commands::Which { target }) => assert_eq!(target, "edl"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_config_check() {
        let cli = Cli::try_parse_from(["cutlist", "config", "check"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigCommands::Check
            })
        ));
    }

    #[test]
    fn default_filter_covers_workspace_crates() {
        let filter = default_filter("debug");
        assert!(filter.starts_with("cutlist=debug"));
        assert!(filter.contains("cutlist_plugin=debug"));
        assert!(filter.ends_with(",warn"));
    }
}
