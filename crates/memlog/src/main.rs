// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! memlog - a personal memory log with full-text search and question answering.
//!
//! This is the binary entry point: the Discord bot and the terminal commands.

mod commands;
mod doctor;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use memlog_config::MemlogConfig;
use tracing::error;

/// memlog - a personal memory log with full-text search and question answering.
#[derive(Parser, Debug)]
#[command(name = "memlog", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the Discord bot.
    Serve,
    /// Store a memory.
    Log {
        /// Text to remember.
        text: String,
        /// Owner recorded with the memory.
        #[arg(long, default_value = commands::DEFAULT_CLI_USER)]
        user: String,
    },
    /// Full-text search over stored memories.
    Search {
        query: String,
        /// Maximum number of results.
        #[arg(long, default_value_t = commands::DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// Ask a question answered from your memories.
    Ask { question: String },
    /// Show how many memories are stored and when the last one was logged.
    Stats,
    /// Run diagnostic checks.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            memlog_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    serve::init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Log { text, user }) => commands::run_log(&config, &user, &text).await,
        Some(Commands::Search { query, limit }) => {
            commands::run_search(&config, &query, limit).await
        }
        Some(Commands::Ask { question }) => commands::run_ask(&config, &question).await,
        Some(Commands::Stats) => commands::run_stats(&config).await,
        Some(Commands::Doctor { plain }) => {
            doctor::run_doctor(&config, cli.config.as_deref(), plain).await
        }
        None => {
            println!("memlog: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        error!(error = %e, "command failed");
        eprintln!("memlog: {e}");
        std::process::exit(1);
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<MemlogConfig, Vec<memlog_config::ConfigError>> {
    match path {
        Some(path) => memlog_config::load_and_validate_path(path),
        None => memlog_config::load_and_validate(),
    }
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
    fn search_limit_defaults() {
        let cli = Cli::parse_from(["memlog", "search", "budget"]);
        match cli.command {
            Some(Commands::Search { query, limit }) => {
                assert_eq!(query, "budget");
                assert_eq!(limit, commands::DEFAULT_SEARCH_LIMIT);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["memlog", "stats", "--config", "/tmp/memlog.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/memlog.toml")));
        assert!(matches!(cli.command, Some(Commands::Stats)));
    }

    #[test]
    fn log_user_defaults() {
        let cli = Cli::parse_from(["memlog", "log", "bought milk"]);
        match cli.command {
            Some(Commands::Log { text, user }) => {
                assert_eq!(text, "bought milk");
                assert_eq!(user, commands::DEFAULT_CLI_USER);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn explicit_config_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memlog.toml");
        std::fs::write(&path, "[display]\ntimezone = \"Europe/Paris\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.display.timezone, "Europe/Paris");
    }
}
