//! viteloader - Vite build manifest integration for server-rendered HTML
//!
//! Resolves a logical asset name (a Vite entry point such as `src/main.ts`)
//! to the `<script>` / `<link>` tags a page needs:
//!
//! - **Development** (`VITE_HOT_RELOAD=true`): URLs point at the running
//!   Vite dev server, and the HMR client (plus the optional React refresh
//!   preamble) is injected.
//! - **Production**: URLs are read from the `manifest.json` written by
//!   `vite build`, with CSS and imported chunks expanded recursively.
//!
//! # Features
//! - **cli**: the `viteloader` inspection binary (default)
//!
//! # Architecture
//! - `config`: `VITE_*` environment settings and derived defaults
//! - `loader`: manifest parsing, URL joining, tag generation
//! - `template`: helpers to register with a template engine
//! - `errors`: error type shared by all of the above

pub mod config;
pub mod errors;
pub mod loader;
pub mod template;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod system;

pub use config::ViteConfig;
pub use errors::{Result, ViteError};
pub use loader::{AssetLoader, AssetSource, LazyAssetLoader, Manifest, ManifestEntry, ScriptAttrs};
pub use template::{Markup, vite_asset, vite_asset_url, vite_hmr_client};
