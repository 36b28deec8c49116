//! # vinyl-cli
//!
//! The `vinyl` command-line tool:
//! - `serve`: seed the catalog and run the HTTP API (default)
//! - `seed`: write a seeded catalog's album covers under a web root
//! - `art`: render a single placeholder cover
//! - `config`: inspect and edit the TOML configuration

#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod logging;

pub use cli::{Cli, Command, ConfigAction};
pub use config::VinylConfig;
pub use error::{Error, Result};

/// Run the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command.unwrap_or_default() {
        Command::Serve { host, port } => {
            let mut config = VinylConfig::load(config_path)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            logging::init_logging(&config.logging.level)?;
            commands::serve(&config).await
        }
        Command::Seed { web_root, recreate } => {
            let config = VinylConfig::load(config_path)?;
            logging::init_logging(&config.logging.level)?;
            let report = commands::seed(&web_root, recreate)?;
            println!(
                "Seeded {}; wrote {} cover(s) under {}",
                report.summary,
                report.covers,
                web_root.display()
            );
            Ok(())
        }
        Command::Art { genre, index, out } => {
            let path = commands::art(&genre, index, &out)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Command::Config { action } => config_handlers::handle_config_command(config_path, action),
    }
}
