//! Template helpers
//!
//! Thin functions meant to be registered as globals in whatever template
//! engine renders the pages. They take the loader explicitly, so the host
//! application decides where it lives (usually in its shared app state).
//!
//! ```no_run
//! use viteloader::config::ViteConfig;
//! use viteloader::loader::LazyAssetLoader;
//! use viteloader::template::{vite_asset, vite_hmr_client};
//!
//! let loader = LazyAssetLoader::new(ViteConfig::load()?);
//! let head = format!(
//!     "{}\n{}",
//!     vite_hmr_client(&loader),
//!     vite_asset(&loader, "src/main.ts", None)?
//! );
//! # Ok::<(), viteloader::errors::ViteError>(())
//! ```

use std::fmt;

use crate::errors::Result;
use crate::loader::{AssetSource, ScriptAttrs};

/// HTML that must be inserted without escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Markup {
    fn from(html: String) -> Self {
        Self(html)
    }
}

impl AsRef<str> for Markup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// All include tags for `path` and its dependencies.
///
/// Place it in `<head>`; scripts are marked `async` and `defer` unless
/// `attrs` says otherwise.
pub fn vite_asset<S: AssetSource + ?Sized>(
    source: &S,
    path: &str,
    attrs: Option<&ScriptAttrs>,
) -> Result<Markup> {
    source.asset_tags_with(path, attrs, true).map(Markup)
}

/// Only the URL of `path`, e.g. for `<img src>`. Dependencies are not
/// included.
pub fn vite_asset_url<S: AssetSource + ?Sized>(source: &S, path: &str) -> Result<String> {
    source.asset_url(path)
}

/// Dev-server client (and React refresh preamble), once per page.
pub fn vite_hmr_client<S: AssetSource + ?Sized>(source: &S) -> Markup {
    Markup(source.hmr_client())
}
