use std::sync::{Arc, OnceLock};
use tracing::{debug, trace, warn};

use super::manifest::{Manifest, ManifestEntry};
use super::tags::{ScriptAttrs, script_tag, stylesheet_tag};
use super::url::join_url;
use crate::config::ViteConfig;
use crate::errors::{Result, ViteError};

/// Where assets are served from, fixed when the loader is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServeMode {
    /// Assets come straight from the Vite dev server; no manifest.
    DevServer,
    /// Assets come from the build output, looked up in the manifest.
    Manifest(Manifest),
}

enum Resolved<'a> {
    DevServer(String),
    Entry(&'a ManifestEntry),
}

/// Resolves logical asset paths to URLs and HTML tags.
///
/// Built once per process and shared read-only: in production mode the
/// manifest is parsed in [`AssetLoader::new`] and never re-read.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    config: Arc<ViteConfig>,
    mode: ServeMode,
}

impl AssetLoader {
    /// Build a loader for `config`, parsing the manifest unless the config
    /// is in hot-reload mode.
    pub fn new(config: impl Into<Arc<ViteConfig>>) -> Result<Self> {
        let config = config.into();
        let mode = if config.hot_reload {
            debug!(
                "Vite dev server mode, serving assets from {}",
                config.dev_server_origin()
            );
            ServeMode::DevServer
        } else {
            ServeMode::Manifest(Manifest::load(&config.manifest_path)?)
        };
        Ok(Self { config, mode })
    }

    /// Build a production-mode loader around an already parsed manifest,
    /// ignoring `hot_reload` and `manifest_path`.
    pub fn with_manifest(config: impl Into<Arc<ViteConfig>>, manifest: Manifest) -> Self {
        Self {
            config: config.into(),
            mode: ServeMode::Manifest(manifest),
        }
    }

    pub fn config(&self) -> &ViteConfig {
        &self.config
    }

    pub fn mode(&self) -> &ServeMode {
        &self.mode
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        match &self.mode {
            ServeMode::Manifest(manifest) => Some(manifest),
            ServeMode::DevServer => None,
        }
    }

    pub fn is_dev_server(&self) -> bool {
        matches!(self.mode, ServeMode::DevServer)
    }

    /// URL of a single asset, without its dependencies.
    pub fn asset_url(&self, path: &str) -> Result<String> {
        match self.resolve(path)? {
            Resolved::DevServer(url) => Ok(url),
            Resolved::Entry(entry) => {
                let file = output_file(path, entry)?;
                Ok(join_url(&self.config.static_url, file))
            }
        }
    }

    /// All tags needed to load `path`, one per line: stylesheets first, then
    /// imported chunks depth-first, then the asset's own script.
    ///
    /// `attrs` replaces the default `type="module" async="" defer=""` on
    /// every generated script tag.
    pub fn asset_tags(&self, path: &str, attrs: Option<&ScriptAttrs>) -> Result<String> {
        self.asset_tags_with(path, attrs, true)
    }

    /// Like [`AssetLoader::asset_tags`], optionally skipping imported chunks.
    pub fn asset_tags_with(
        &self,
        path: &str,
        attrs: Option<&ScriptAttrs>,
        with_imports: bool,
    ) -> Result<String> {
        let default_attrs = ScriptAttrs::default();
        let attrs = attrs.unwrap_or(&default_attrs);

        match self.resolve(path)? {
            Resolved::DevServer(url) => Ok(script_tag(&url, attrs)),
            Resolved::Entry(entry) => {
                let mut tags = Vec::new();
                let mut chain = vec![path];
                self.expand(path, entry, attrs, with_imports, &mut chain, &mut tags)?;
                Ok(tags.join("\n"))
            }
        }
    }

    /// Dev-server client runtime tags, preceded by the React refresh
    /// preamble when enabled. Empty outside hot-reload mode.
    pub fn hmr_client(&self) -> String {
        if !self.is_dev_server() {
            return String::new();
        }

        let mut tags = Vec::with_capacity(2);
        if self.config.is_react {
            tags.push(react_refresh_preamble(&self.dev_server_url("")));
        }
        tags.push(script_tag(
            &self.dev_server_url(&self.config.ws_client),
            &ScriptAttrs::module(),
        ));
        tags.join("\n")
    }

    fn resolve(&self, path: &str) -> Result<Resolved<'_>> {
        match &self.mode {
            ServeMode::DevServer => {
                let url = self.dev_server_url(path);
                trace!("Resolved {} to dev server URL {}", path, url);
                Ok(Resolved::DevServer(url))
            }
            ServeMode::Manifest(manifest) => self.lookup(manifest, path).map(Resolved::Entry),
        }
    }

    fn lookup<'a>(&self, manifest: &'a Manifest, path: &str) -> Result<&'a ManifestEntry> {
        manifest.get(path).ok_or_else(|| {
            warn!("Asset {} not found in Vite manifest", path);
            ViteError::asset_not_found(format!(
                "Cannot find {} in Vite manifest at {}",
                path,
                self.config.manifest_path.display()
            ))
        })
    }

    fn expand<'a>(
        &'a self,
        key: &str,
        entry: &'a ManifestEntry,
        attrs: &ScriptAttrs,
        with_imports: bool,
        chain: &mut Vec<&'a str>,
        tags: &mut Vec<String>,
    ) -> Result<()> {
        for css in &entry.css {
            tags.push(stylesheet_tag(&join_url(&self.config.static_url, css)));
        }

        if with_imports && let ServeMode::Manifest(manifest) = &self.mode {
            for import in &entry.imports {
                if chain.contains(&import.as_str()) {
                    return Err(ViteError::dependency_cycle(format!(
                        "{} -> {}",
                        chain.join(" -> "),
                        import
                    )));
                }
                let dependency = self.lookup(manifest, import)?;
                chain.push(import);
                self.expand(import, dependency, attrs, with_imports, chain, tags)?;
                chain.pop();
            }
        }

        let file = output_file(key, entry)?;
        tags.push(script_tag(&join_url(&self.config.static_url, file), attrs));
        Ok(())
    }

    fn dev_server_url(&self, path: &str) -> String {
        join_url(
            &self.config.dev_server_origin(),
            &join_url(&self.config.static_url, path),
        )
    }
}

fn output_file<'a>(key: &str, entry: &'a ManifestEntry) -> Result<&'a str> {
    entry.file.as_deref().ok_or_else(|| {
        warn!("Vite manifest entry {} has no output file", key);
        ViteError::manifest_malformed(format!("Manifest entry {} has no `file`", key))
    })
}

fn react_refresh_preamble(dev_server_url: &str) -> String {
    format!(
        r#"<script type="module">
import RefreshRuntime from '{}@react-refresh'
RefreshRuntime.injectIntoGlobalHook(window)
window.$RefreshReg$ = () => {{}}
window.$RefreshSig$ = () => (type) => type
window.__vite_plugin_react_preamble_installed__=true
</script>"#,
        dev_server_url
    )
}

/// An [`AssetLoader`] built on first use.
///
/// The first asset request parses the manifest (or settles on dev-server
/// mode); concurrent first requests wait on the same initialization. A
/// failed initialization is kept, so every later request reports the same
/// error instead of retrying.
#[derive(Debug)]
pub struct LazyAssetLoader {
    config: Arc<ViteConfig>,
    cell: OnceLock<Result<AssetLoader>>,
}

impl LazyAssetLoader {
    pub fn new(config: impl Into<Arc<ViteConfig>>) -> Self {
        Self {
            config: config.into(),
            cell: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &ViteConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// The loader, initializing it on the first call.
    pub fn get(&self) -> Result<&AssetLoader> {
        self.cell
            .get_or_init(|| {
                debug!("Initializing Vite asset loader");
                AssetLoader::new(Arc::clone(&self.config))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn asset_url(&self, path: &str) -> Result<String> {
        self.get()?.asset_url(path)
    }

    pub fn asset_tags(&self, path: &str, attrs: Option<&ScriptAttrs>) -> Result<String> {
        self.get()?.asset_tags(path, attrs)
    }

    pub fn asset_tags_with(
        &self,
        path: &str,
        attrs: Option<&ScriptAttrs>,
        with_imports: bool,
    ) -> Result<String> {
        self.get()?.asset_tags_with(path, attrs, with_imports)
    }

    /// Empty in production mode, including when the manifest failed to load.
    pub fn hmr_client(&self) -> String {
        if !self.config.hot_reload {
            return String::new();
        }
        self.get().map(AssetLoader::hmr_client).unwrap_or_default()
    }
}
