use clap::Parser;
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use std::path::Path;
use std::process;

use flat_bank_cli::bank::Bank;
use flat_bank_cli::{cli, config};

/// Flat-File Banking CLI - a terminal-based banking system backed by a
/// flat-file record store
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Sets the configuration file
    #[clap(short, long, value_name = "FILE", default_value = "config.toml")]
    config: String,

    /// Overrides the directory holding the account and ledger files
    #[clap(short, long, value_name = "DIR")]
    data_dir: Option<String>,
}

fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = config::load_config(&cli.config) {
        error!("Failed to load configuration: {}", e);
        process::exit(1);
    }

    if let Some(dir) = cli.data_dir {
        let mut config = config::get_config();
        config.store.accounts_path = join_file(&dir, &config.store.accounts_path);
        config.ledger.log_path = join_file(&dir, &config.ledger.log_path);
        if let Err(e) = config::update_config(config) {
            error!("Failed to apply data directory override: {}", e);
            process::exit(1);
        }
    }

    let config = config::get_config();
    info!("Starting {} v{}", config.app_name, config.version);

    let bank = Bank::from_config();
    if let Err(e) = cli::menu::run(&bank) {
        error!("Fatal error: {}", e);
        process::exit(1);
    }

    info!("Shutting down {}", config.app_name);
}

/// Re-root a configured file path under the override directory,
/// keeping only its file name.
fn join_file(dir: &str, configured: &str) -> String {
    let file_name = Path::new(configured)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| configured.to_string());
    Path::new(dir).join(file_name).display().to_string()
}
