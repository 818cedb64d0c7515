//! System-level modules
//!
//! Process setup used by the `viteloader` binary.

pub mod logging;
