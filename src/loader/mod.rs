//! Vite manifest loading and tag generation.
//!
//! - `manifest`: serde model of `manifest.json`
//! - `tags`: `<script>` / `<link>` rendering
//! - `url`: relative URL joining
//! - `asset_loader`: mode selection and recursive dependency expansion

pub mod asset_loader;
pub mod manifest;
pub mod tags;
pub mod traits;
pub mod url;

pub use asset_loader::{AssetLoader, LazyAssetLoader, ServeMode};
pub use manifest::{Manifest, ManifestEntry};
pub use tags::ScriptAttrs;
pub use traits::AssetSource;
