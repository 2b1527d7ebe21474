//! Swagger from routes - Command-line tool for generating API documents from a route manifest.
//!
//! # Usage
//!
//! ```bash
//! swagger-from-routes [OPTIONS] <MANIFEST>
//! ```
//!
//! # Examples
//!
//! Generate a Swagger 2.0 YAML document:
//! ```bash
//! swagger-from-routes routes.yaml -o swagger.yaml
//! ```
//!
//! Generate an OpenAPI 3 JSON document plus the viewer page:
//! ```bash
//! swagger-from-routes routes.yaml -d openapi:3.0 -f json -o doc/swagger.json --viewer doc/index.html
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! swagger-from-routes routes.yaml -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use swagger_from_routes::cli;

fn main() -> Result<()> {
    let args_for_verbose = cli::CliArgs::parse();

    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Swagger from routes starting...");

    let args = cli::parse_args_from_parsed(args_for_verbose)?;
    cli::run(args)?;

    info!("Document generation completed successfully");

    Ok(())
}
