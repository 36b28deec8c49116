//! Vinyl CLI
//!
//! Command-line entry point for the Vinyl music storefront.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use vinyl_cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    vinyl_cli::run(Cli::parse()).await?;
    Ok(())
}
