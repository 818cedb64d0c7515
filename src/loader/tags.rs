//! HTML tag rendering for scripts and stylesheets.

use std::borrow::Cow;

/// Ordered attribute set for generated `<script>` tags.
///
/// Attributes render in insertion order as `key="value"`; boolean
/// attributes carry an empty value and render as `key=""`. The default set
/// is `type="module" async="" defer=""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptAttrs {
    attrs: Vec<(String, String)>,
}

impl ScriptAttrs {
    /// An empty attribute set, rendering a bare `<script src="…">`.
    pub fn new() -> Self {
        Self { attrs: Vec::new() }
    }

    /// `type="module"` only, as used for the dev client runtime.
    pub fn module() -> Self {
        Self::new().with("type", "module")
    }

    /// Set an attribute, replacing an existing one in place.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a boolean attribute (`key=""`).
    pub fn flag(self, key: impl Into<String>) -> Self {
        self.with(key, "")
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    fn render(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, escape_attr(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for ScriptAttrs {
    fn default() -> Self {
        Self::module().flag("async").flag("defer")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ScriptAttrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

/// `<script {attrs} src="{src}"></script>`
pub fn script_tag(src: &str, attrs: &ScriptAttrs) -> String {
    if attrs.is_empty() {
        format!("<script src=\"{}\"></script>", escape_attr(src))
    } else {
        format!(
            "<script {} src=\"{}\"></script>",
            attrs.render(),
            escape_attr(src)
        )
    }
}

/// `<link rel="stylesheet" href="{href}" />`
pub fn stylesheet_tag(href: &str) -> String {
    format!("<link rel=\"stylesheet\" href=\"{}\" />", escape_attr(href))
}

fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '"', '<', '>']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_script_tag() {
        assert_eq!(
            script_tag("/static/main.abc123.js", &ScriptAttrs::default()),
            r#"<script type="module" async="" defer="" src="/static/main.abc123.js"></script>"#
        );
    }

    #[test]
    fn test_empty_attrs() {
        assert_eq!(
            script_tag("/static/a.js", &ScriptAttrs::new()),
            r#"<script src="/static/a.js"></script>"#
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let attrs = ScriptAttrs::default().with("type", "text/javascript");
        assert_eq!(attrs.get("type"), Some("text/javascript"));
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["type", "async", "defer"]);
    }

    #[test]
    fn test_from_iterator_keeps_order() {
        let attrs: ScriptAttrs = [("nonce", "abc"), ("crossorigin", "")].into_iter().collect();
        assert_eq!(
            script_tag("/x.js", &attrs),
            r#"<script nonce="abc" crossorigin="" src="/x.js"></script>"#
        );
    }

    #[test]
    fn test_stylesheet_tag() {
        assert_eq!(
            stylesheet_tag("/static/main.def456.css"),
            r#"<link rel="stylesheet" href="/static/main.def456.css" />"#
        );
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let attrs = ScriptAttrs::new().with("data-x", r#"a"b"#);
        assert_eq!(
            script_tag("/x.js?a=1&b=2", &attrs),
            r#"<script data-x="a&quot;b" src="/x.js?a=1&amp;b=2"></script>"#
        );
    }
}
