//! Command-line interface definitions using clap
//!
//! The `viteloader` binary renders exactly what the template helpers would
//! for the current environment, which makes it handy for checking a
//! deployment's manifest and `VITE_*` settings.

use clap::{Parser, Subcommand};

use crate::config::ViteConfig;
use crate::errors::{Result, ViteError};
use crate::loader::{AssetLoader, ScriptAttrs};

/// viteloader - Vite manifest to HTML tags
#[derive(Parser, Debug)]
#[command(name = "viteloader")]
#[command(version)]
#[command(about = "Render Vite assets into <script>/<link> tags", long_about = None)]
pub struct Cli {
    /// Load environment from this file instead of ./.env
    #[arg(long, global = true)]
    pub env_file: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print all tags for an asset and its dependencies
    Tags {
        /// Logical asset path (manifest key), e.g. src/main.ts
        path: String,

        /// Script attribute, repeatable; replaces the default set
        #[arg(long = "attr", value_name = "KEY=VALUE", value_parser = parse_attr)]
        attrs: Vec<(String, String)>,

        /// Skip imported chunks
        #[arg(long)]
        no_imports: bool,
    },

    /// Print the URL of a single asset
    Url {
        /// Logical asset path (manifest key)
        path: String,
    },

    /// Print the dev-server HMR client tags (empty in production)
    Hmr,

    /// List manifest entry points
    Entries,

    /// Show the resolved configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse `KEY=VALUE`; a bare `KEY` becomes a boolean attribute.
fn parse_attr(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw.split_once('=').unwrap_or((raw, ""));
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Invalid attribute '{}': empty name", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Run a command against `config`, returning what should be printed.
pub fn execute(command: &Commands, config: ViteConfig) -> Result<String> {
    match command {
        Commands::Config { json } => Ok(render_config(&config, *json)),
        Commands::Tags {
            path,
            attrs,
            no_imports,
        } => {
            let loader = AssetLoader::new(config)?;
            let attrs: Option<ScriptAttrs> =
                (!attrs.is_empty()).then(|| attrs.iter().cloned().collect());
            loader.asset_tags_with(path, attrs.as_ref(), !no_imports)
        }
        Commands::Url { path } => AssetLoader::new(config)?.asset_url(path),
        Commands::Hmr => Ok(AssetLoader::new(config)?.hmr_client()),
        Commands::Entries => {
            let loader = AssetLoader::new(config)?;
            let manifest = loader.manifest().ok_or_else(|| {
                ViteError::config_invalid("Entry points are only available without hot reload")
            })?;
            Ok(manifest.entry_points().join("\n"))
        }
    }
}

fn render_config(config: &ViteConfig, json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(config)
            .unwrap_or_else(|e| format!("Error serializing config: {}", e));
    }

    let rows = [
        ("hot_reload", config.hot_reload.to_string()),
        ("static_url", config.static_url.clone()),
        ("static_path", config.static_path.display().to_string()),
        ("assets_path", config.assets_path.display().to_string()),
        ("manifest_path", config.manifest_path.display().to_string()),
        ("is_react", config.is_react.to_string()),
        ("dev_server", config.dev_server_origin()),
        ("ws_client", config.ws_client.clone()),
        ("log_level", config.logging.level.clone()),
        ("log_format", config.logging.format.clone()),
    ];
    rows.iter()
        .map(|(k, v)| format!("{:<14} {}", k, v))
        .collect::<Vec<_>>()
        .join("\n")
}
