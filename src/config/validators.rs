//! 配置值验证模块
//!
//! Pure helpers used while resolving [`super::ViteSettings`]. Each validator
//! returns a human-readable message on failure; the caller wraps it into
//! `ViteError::ConfigInvalid`.

use super::structs::DEFAULT_STATIC_URL;

const VALID_PROTOCOLS: [&str; 2] = ["http", "https"];
const VALID_LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Normalize the static URL prefix so it always ends with `/`.
///
/// Missing or empty values fall back to `/static/`.
pub fn normalize_static_url(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if v.ends_with('/') => v.to_string(),
        Some(v) if !v.is_empty() => format!("{}/", v),
        _ => DEFAULT_STATIC_URL.to_string(),
    }
}

/// Parse a boolean flag the way `.env` files usually spell them.
///
/// An empty value counts as unset (`false`).
pub fn parse_flag(name: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(format!(
            "Invalid boolean for {}: '{}'. Valid: true, false, 1, 0, yes, no, on, off",
            name, value
        )),
    }
}

pub fn validate_protocol(protocol: &str) -> Result<(), String> {
    if VALID_PROTOCOLS.contains(&protocol) {
        Ok(())
    } else {
        Err(format!(
            "Invalid server_protocol '{}'. Valid options: {:?}",
            protocol, VALID_PROTOCOLS
        ))
    }
}

pub fn validate_host(host: &str) -> Result<(), String> {
    if host.trim().is_empty() {
        return Err("server_host must not be empty".to_string());
    }
    if host.contains('/') || host.contains(char::is_whitespace) {
        return Err(format!("Invalid server_host '{}'", host));
    }
    Ok(())
}

pub fn validate_port(port: u16) -> Result<(), String> {
    if port == 0 {
        return Err("server_port must be between 1 and 65535".to_string());
    }
    Ok(())
}

pub fn validate_log_format(format: &str) -> Result<(), String> {
    if VALID_LOG_FORMATS.iter().any(|f| f.eq_ignore_ascii_case(format)) {
        Ok(())
    } else {
        Err(format!(
            "Invalid log_format '{}'. Valid options: {:?}",
            format, VALID_LOG_FORMATS
        ))
    }
}
