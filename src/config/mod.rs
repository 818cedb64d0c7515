//! Configuration management
//!
//! ```text
//! process env / .env
//!     → ViteSettings (raw, VITE_* prefix, serde defaults)
//!     → ViteSettings::resolve (derived defaults + validation)
//!     → ViteConfig (immutable, shared by the loader)
//! ```

mod r#impl;
mod structs;
pub mod validators;

pub use r#impl::{DEBUG_VAR, ENV_PREFIX};
pub use structs::*;
