use anyhow::Result;
use clap::Parser;
use tab_switcher::cli::{self, Cli};
use tab_switcher_config::Config;

fn main() -> Result<()> {
    // Parse CLI arguments first (before logging init for cleaner output)
    let cli = Cli::parse();

    // A broken config should not stop the diagnostics from running
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("tab-switcher: warning: failed to load config, using defaults: {e:#}");
            Config::default()
        }
    };

    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config
    tab_switcher::debug::init_log_bridge(cli.log_level, config.log_level);
    log::info!("Starting tab-switcher {}", tab_switcher::VERSION);

    match cli::run(cli, &config) {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(e) => {
            log::error!("tab-switcher failed: {e:#}");
            eprintln!("tab-switcher: error: {e:#}");
            Err(e)
        }
    }
}
