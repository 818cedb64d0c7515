use clap::Parser;
use tracing::debug;

use viteloader::cli::{Cli, execute};
use viteloader::config::ViteConfig;
use viteloader::errors::ViteError;
use viteloader::system::logging::init_logging;

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String, ViteError> {
    let config = match cli.env_file.as_deref() {
        Some(path) => ViteConfig::load_with_env_file(path)?,
        None => ViteConfig::load()?,
    };

    // Guard must outlive command execution so buffered logs are flushed
    let _guard = init_logging(&config.logging)
        .map_err(|e| ViteError::config_invalid(format!("Cannot open log file: {}", e)))?;

    debug!(command = ?cli.command, "Running viteloader command");
    execute(&cli.command, config)
}
