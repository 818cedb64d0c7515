//! URL joining with browser-style relative resolution.
//!
//! `join_url("/static/", "main.js")` gives `/static/main.js`, an absolute
//! reference replaces the base entirely, and relative bases (the usual
//! shape of a static prefix) keep their relative form in the output:
//! `static/` stays unrooted, `//cdn.example.com/` stays scheme-relative.

use url::{Position, Url};

// Host used to resolve rooted bases; stripped again before returning.
const RELATIVE_BASE: &str = "http://relative.invalid/";

/// Resolve `reference` against `base`.
///
/// Absolute, scheme-relative and rooted bases go through the `url` crate,
/// so non-ASCII or space characters come back percent-encoded
/// (`assets/ü b.js` → `assets/%C3%BC%20b.js`). Browsers treat both forms
/// alike. Unrooted bases such as `static/` or `../build/` are joined
/// textually and echo the reference unchanged.
///
/// Falls back to plain concatenation if either side cannot be parsed as a
/// URL reference.
pub fn join_url(base: &str, reference: &str) -> String {
    if Url::parse(reference).is_ok() {
        return reference.to_string();
    }

    if let Ok(base_url) = Url::parse(base) {
        return match base_url.join(reference) {
            Ok(joined) => joined.to_string(),
            Err(_) => concat(base, reference),
        };
    }

    if base.starts_with("//") {
        return join_scheme_relative(base, reference);
    }

    if base.starts_with('/') {
        return join_rooted(base, reference);
    }

    // 相对路径前缀：保持相对形式
    if reference.starts_with('/') {
        return reference.to_string();
    }
    match base.rfind('/') {
        Some(idx) => concat(&base[..=idx], reference),
        None => reference.to_string(),
    }
}

fn join_scheme_relative(base: &str, reference: &str) -> String {
    match Url::parse(&format!("http:{}", base)).and_then(|b| b.join(reference)) {
        Ok(joined) => format!("//{}", &joined[Position::BeforeUsername..]),
        Err(_) => concat(base, reference),
    }
}

fn join_rooted(base: &str, reference: &str) -> String {
    let Ok(placeholder) = Url::parse(RELATIVE_BASE) else {
        return concat(base, reference);
    };

    match placeholder.join(base).and_then(|b| b.join(reference)) {
        Ok(joined) if joined.host_str() == placeholder.host_str() => {
            joined[Position::BeforePath..].to_string()
        }
        // scheme-relative reference moved us to another host
        Ok(joined) => format!("//{}", &joined[Position::BeforeUsername..]),
        Err(_) => concat(base, reference),
    }
}

fn concat(base: &str, reference: &str) -> String {
    format!("{}{}", base, reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_base() {
        assert_eq!(join_url("/static/", "main.js"), "/static/main.js");
        assert_eq!(
            join_url("/static/", "assets/main.abc123.js"),
            "/static/assets/main.abc123.js"
        );
        assert_eq!(join_url("/static/", ""), "/static/");
    }

    #[test]
    fn test_absolute_reference_replaces_base_path() {
        assert_eq!(join_url("/static/", "/other/x.js"), "/other/x.js");
        assert_eq!(
            join_url("/static/", "https://cdn.example.com/x.js"),
            "https://cdn.example.com/x.js"
        );
        assert_eq!(
            join_url("/static/", "//cdn.example.com/x.js"),
            "//cdn.example.com/x.js"
        );
    }

    #[test]
    fn test_absolute_base() {
        assert_eq!(
            join_url("http://localhost:3000", "/static/src/main.js"),
            "http://localhost:3000/static/src/main.js"
        );
        assert_eq!(
            join_url("https://cdn.example.com/build/", "main.js"),
            "https://cdn.example.com/build/main.js"
        );
    }

    #[test]
    fn test_scheme_relative_base_keeps_scheme_relative() {
        assert_eq!(
            join_url("//cdn.example.com/assets/", "main.js"),
            "//cdn.example.com/assets/main.js"
        );
        assert_eq!(
            join_url("//cdn.example.com/assets/", "/root.js"),
            "//cdn.example.com/root.js"
        );
    }

    #[test]
    fn test_unrooted_base_stays_relative() {
        assert_eq!(join_url("static/", "main.js"), "static/main.js");
        assert_eq!(join_url("../build/", "main.js"), "../build/main.js");
        assert_eq!(join_url("static/", "/main.js"), "/main.js");
        assert_eq!(join_url("static", "main.js"), "main.js");
    }

    #[test]
    fn test_rooted_base_percent_encodes() {
        assert_eq!(
            join_url("/static/", "assets/ü b.js"),
            "/static/assets/%C3%BC%20b.js"
        );
    }

    #[test]
    fn test_base_without_trailing_slash_drops_last_segment() {
        // 与浏览器一致：最后一段被替换
        assert_eq!(join_url("/static", "main.js"), "/main.js");
    }
}
