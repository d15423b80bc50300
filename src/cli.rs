//! Command-line interface for tab-switcher.
//!
//! This module handles CLI argument parsing and the diagnostic subcommands.

use crate::policy::PolicyRegistry;
use crate::scenario::Scenario;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tab_switcher_config::{Config, LogLevel};

/// tab-switcher - next/previous document switching for docking workspaces
#[derive(Parser)]
#[command(name = "tab-switcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level for the debug log file (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", global = true, value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available switching policies
    Policies,

    /// Replay a scenario file and print the resulting trace
    Simulate {
        /// Scenario YAML file
        scenario: PathBuf,

        /// Policy identifier, overriding the scenario and config.yaml
        #[arg(short, long, value_name = "ID")]
        strategy: Option<String>,
    },
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::from_name(value).ok_or_else(|| format!("unknown log level '{value}'"))
}

/// Run the parsed command
///
/// Returns the process exit code.
pub fn run(cli: Cli, config: &Config) -> anyhow::Result<i32> {
    let registry = PolicyRegistry::new();

    match cli.command {
        Commands::Policies => {
            let configured = registry.resolve_kind(&config.tab_switch_strategy);
            for descriptor in registry.list() {
                let marker = if descriptor.kind == configured { '*' } else { ' ' };
                println!("{marker} {:<20} {}", descriptor.id, descriptor.description);
            }
            Ok(0)
        }
        Commands::Simulate { scenario, strategy } => {
            if let Some(id) = strategy.as_deref()
                && let Err(e) = registry.lookup(id)
            {
                // Still runs with the default policy, like a garbled config value
                eprintln!("tab-switcher: warning: {e}, using {}", registry.default_kind());
            }

            let scenario = Scenario::load(&scenario)?;
            let strategy = strategy
                .as_deref()
                .or(scenario.strategy.as_deref())
                .unwrap_or(config.tab_switch_strategy.as_str());
            for entry in scenario.run(&registry, Some(strategy))? {
                println!("{entry}");
            }
            Ok(0)
        }
    }
}
