use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment};
use tracing::{debug, warn};

use super::structs::MANIFEST_FILE_NAME;
use super::validators;
use super::{LoggingConfig, ViteConfig, ViteSettings};
use crate::errors::{Result, ViteError};

/// Environment variable prefix, `VITE_SERVER_PORT` → `server_port`.
pub const ENV_PREFIX: &str = "VITE";

/// Unprefixed flag used as the `hot_reload` fallback.
pub const DEBUG_VAR: &str = "DEBUG";

impl ViteSettings {
    /// Deserialize raw settings from an explicit variable map.
    ///
    /// Only `VITE_*` keys are considered; unknown `VITE_*` keys (the ones
    /// the frontend itself consumes) are ignored.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let source: config::Map<String, String> =
            vars.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

        let settings = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .ignore_empty(true)
                    .try_parsing(true)
                    .source(Some(source)),
            )
            .build()?;

        Ok(settings.try_deserialize::<ViteSettings>()?)
    }

    /// Apply derived defaults and validate.
    ///
    /// `debug` is the ambient debug flag, used only when `hot_reload` was
    /// not set explicitly.
    pub fn resolve(self, debug: bool) -> Result<ViteConfig> {
        let hot_reload = self.hot_reload.unwrap_or(debug);
        let static_url = validators::normalize_static_url(self.static_url.as_deref());
        let static_path = PathBuf::from(&self.static_path);
        let assets_path = PathBuf::from(&self.assets_path);

        let manifest_path = match self.manifest_path.as_deref().map(str::trim) {
            Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
            _ => default_manifest_path(hot_reload, &assets_path, &static_path),
        };

        let errors: Vec<String> = [
            validators::validate_protocol(&self.server_protocol),
            validators::validate_host(&self.server_host),
            validators::validate_port(self.server_port),
            validators::validate_log_format(&self.log_format),
        ]
        .into_iter()
        .filter_map(|r| r.err())
        .collect();

        if !errors.is_empty() {
            return Err(ViteError::config_invalid(errors.join("; ")));
        }

        Ok(ViteConfig {
            hot_reload,
            static_url,
            static_path,
            assets_path,
            manifest_path,
            is_react: self.is_react,
            server_host: self.server_host,
            server_protocol: self.server_protocol,
            server_port: self.server_port,
            ws_client: self.ws_client,
            logging: LoggingConfig {
                level: self.log_level,
                format: self.log_format.to_ascii_lowercase(),
                file: self.log_file.filter(|f| !f.is_empty()),
            },
        })
    }
}

impl ViteConfig {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if present;
    /// variables already set in the environment win.
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => debug!("No .env file found, using process environment"),
            Err(e) => return Err(ViteError::config_invalid(format!("Invalid .env file: {}", e))),
        }
        Self::from_vars(&std::env::vars().collect())
    }

    /// Same as [`ViteConfig::load`] but with an explicit env file, which
    /// must exist.
    pub fn load_with_env_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        dotenvy::from_path(path).map_err(|e| {
            ViteError::config_invalid(format!("Cannot load env file {}: {}", path.display(), e))
        })?;
        debug!("Loaded environment from {}", path.display());
        Self::from_vars(&std::env::vars().collect())
    }

    /// Resolve configuration from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let debug = vars.get(DEBUG_VAR).is_some_and(|value| ambient_debug(value));

        let config = ViteSettings::from_vars(vars)?.resolve(debug)?;
        debug!(
            hot_reload = config.hot_reload,
            static_url = %config.static_url,
            manifest_path = %config.manifest_path.display(),
            "Vite configuration resolved"
        );
        Ok(config)
    }

    /// `<protocol>://<host>:<port>` of the dev server.
    pub fn dev_server_origin(&self) -> String {
        format!(
            "{}://{}:{}",
            self.server_protocol, self.server_host, self.server_port
        )
    }
}

/// `DEBUG` is shared with other tooling (`DEBUG=vite:*` namespace filters),
/// so anything that is not a boolean counts as off.
fn ambient_debug(value: &str) -> bool {
    validators::parse_flag(DEBUG_VAR, value).unwrap_or_else(|e| {
        warn!("{}; treating {} as false", e, DEBUG_VAR);
        false
    })
}

fn default_manifest_path(hot_reload: bool, assets_path: &Path, static_path: &Path) -> PathBuf {
    let dir = if hot_reload { assets_path } else { static_path };
    dir.join(MANIFEST_FILE_NAME)
}
