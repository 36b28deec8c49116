//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Vinyl - a small online music storefront
#[derive(Parser, Debug)]
#[command(name = "vinyl", version)]
#[command(about = "Run and administer the Vinyl music storefront", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "VINYL_CONFIG")]
    pub config: Option<String>,

    /// Subcommand; `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Seed the catalog and serve the HTTP API
    Serve {
        /// Host or address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Seed a fresh catalog and write every album cover under a web root
    Seed {
        /// Directory that receives `Images/AlbumArt/`
        #[arg(long)]
        web_root: PathBuf,
        /// Delete existing covers first
        #[arg(long)]
        recreate: bool,
    },
    /// Write one placeholder album cover
    Art {
        /// Genre name picking the base color
        #[arg(long)]
        genre: String,
        /// Position of the album within its genre
        #[arg(long, allow_negative_numbers = true)]
        index: i64,
        /// Output PNG file
        #[arg(long)]
        out: PathBuf,
    },
    /// Inspect or edit the configuration file
    Config {
        /// What to do with the configuration
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve {
            host: None,
            port: None,
        }
    }
}

/// `vinyl config` subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print a value by dotted key, e.g. `server.port`
    Get {
        /// Dotted key
        key: String,
    },
    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value; booleans and numbers are detected
        value: String,
    },
    /// Write a default config file
    Init {
        /// Target file instead of the default location
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the settings as VINYL_* environment variables
    Export {
        /// Format as `--env KEY=VALUE` for `docker run`
        #[arg(long)]
        docker_env: bool,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["vinyl"]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Command::default());
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from(["vinyl", "serve", "--host", "0.0.0.0", "-p", "9000"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Serve {
                host: Some("0.0.0.0".to_string()),
                port: Some(9000),
            })
        );
    }

    #[test]
    fn test_seed_requires_web_root() {
        assert!(Cli::try_parse_from(["vinyl", "seed"]).is_err());
        let cli = Cli::try_parse_from(["vinyl", "seed", "--web-root", "site", "--recreate"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Seed {
                web_root: PathBuf::from("site"),
                recreate: true,
            })
        );
    }

    #[test]
    fn test_art_accepts_negative_index() {
        let cli = Cli::try_parse_from([
            "vinyl", "art", "--genre", "Jazz", "--index", "-3", "--out", "x.png",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Art {
                genre: "Jazz".to_string(),
                index: -3,
                out: PathBuf::from("x.png"),
            })
        );
    }

    #[test]
    fn test_global_config_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["vinyl", "config", "get", "server.port", "-c", "/etc/v.toml"])
                .unwrap();
        assert_eq!(cli.config.as_deref(), Some("/etc/v.toml"));
        assert_eq!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Get {
                    key: "server.port".to_string()
                }
            })
        );
    }
}
