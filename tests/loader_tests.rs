//! AssetLoader tests
//!
//! Production (manifest) and dev-server resolution, recursive dependency
//! expansion and the lazily initialized loader.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use viteloader::config::ViteConfig;
use viteloader::errors::ViteError;
use viteloader::loader::{AssetLoader, LazyAssetLoader, ScriptAttrs};

// =============================================================================
// Test Setup
// =============================================================================

const APP_MANIFEST: &str = r#"{
    "src/main.js": {
        "file": "assets/main.4889e940.js",
        "src": "src/main.js",
        "isEntry": true,
        "css": ["assets/main.a.css", "assets/main.b.css"],
        "imports": ["_vendor.js", "_utils.js"]
    },
    "src/admin.js": {
        "file": "assets/admin.77aa01.js",
        "isEntry": true,
        "imports": ["_vendor.js"]
    },
    "_vendor.js": {
        "file": "assets/vendor.1f2e3d.js",
        "css": ["assets/vendor.css"]
    },
    "_utils.js": {
        "file": "assets/utils.9c8b7a.js",
        "imports": ["_vendor.js"]
    },
    "src/broken.js": {
        "file": "assets/broken.js",
        "css": ["assets/broken.css"],
        "imports": ["_missing.js"]
    },
    "plain.js": {
        "file": "plain.0001.js"
    }
}"#;

struct Fixture {
    _dir: TempDir,
    manifest_path: PathBuf,
}

fn write_manifest(content: &str) -> Fixture {
    let dir = TempDir::new().unwrap();
    let manifest_path = dir.path().join("manifest.json");
    fs::write(&manifest_path, content).unwrap();
    Fixture {
        _dir: dir,
        manifest_path,
    }
}

fn production_config(manifest_path: PathBuf) -> ViteConfig {
    ViteConfig {
        hot_reload: false,
        manifest_path,
        ..ViteConfig::default()
    }
}

fn dev_config() -> ViteConfig {
    ViteConfig {
        hot_reload: true,
        static_url: "/".to_string(),
        server_host: "localhost".to_string(),
        server_port: 3000,
        ..ViteConfig::default()
    }
}

fn app_loader() -> (Fixture, AssetLoader) {
    let fixture = write_manifest(APP_MANIFEST);
    let loader = AssetLoader::new(production_config(fixture.manifest_path.clone())).unwrap();
    (fixture, loader)
}

fn script(src: &str) -> String {
    format!(
        r#"<script type="module" async="" defer="" src="{}"></script>"#,
        src
    )
}

fn link(href: &str) -> String {
    format!(r#"<link rel="stylesheet" href="{}" />"#, href)
}

// =============================================================================
// Production mode
// =============================================================================

#[cfg(test)]
mod production_tests {
    use super::*;

    #[test]
    fn test_single_entry_without_dependencies() {
        let (_fixture, loader) = app_loader();
        let tags = loader.asset_tags("plain.js", None).unwrap();
        assert_eq!(tags, script("/static/plain.0001.js"));
    }

    #[test]
    fn test_manifest_example_output() {
        let fixture = write_manifest(
            r#"{"main.js": {"file": "main.abc123.js", "css": ["main.def456.css"]}}"#,
        );
        let loader = AssetLoader::new(production_config(fixture.manifest_path.clone())).unwrap();

        assert_eq!(
            loader.asset_tags("main.js", None).unwrap(),
            "<link rel=\"stylesheet\" href=\"/static/main.def456.css\" />\n\
             <script type=\"module\" async=\"\" defer=\"\" src=\"/static/main.abc123.js\"></script>"
        );
    }

    #[test]
    fn test_full_expansion_order() {
        let (_fixture, loader) = app_loader();
        let tags = loader.asset_tags("src/main.js", None).unwrap();

        let expected = [
            // 自身的 CSS 在最前
            link("/static/assets/main.a.css"),
            link("/static/assets/main.b.css"),
            // _vendor.js
            link("/static/assets/vendor.css"),
            script("/static/assets/vendor.1f2e3d.js"),
            // _utils.js，其依赖 _vendor.js 再次完整输出
            link("/static/assets/vendor.css"),
            script("/static/assets/vendor.1f2e3d.js"),
            script("/static/assets/utils.9c8b7a.js"),
            // 入口本身
            script("/static/assets/main.4889e940.js"),
        ]
        .join("\n");

        assert_eq!(tags, expected);
    }

    #[test]
    fn test_import_emitted_before_own_tag() {
        let (_fixture, loader) = app_loader();
        let tags = loader.asset_tags("src/admin.js", None).unwrap();
        let lines: Vec<&str> = tags.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], link("/static/assets/vendor.css"));
        assert_eq!(lines[1], script("/static/assets/vendor.1f2e3d.js"));
        assert_eq!(lines[2], script("/static/assets/admin.77aa01.js"));
    }

    #[test]
    fn test_without_imports() {
        let (_fixture, loader) = app_loader();
        let tags = loader.asset_tags_with("src/main.js", None, false).unwrap();

        assert_eq!(
            tags,
            [
                link("/static/assets/main.a.css"),
                link("/static/assets/main.b.css"),
                script("/static/assets/main.4889e940.js"),
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_custom_attrs_apply_to_imports() {
        let (_fixture, loader) = app_loader();
        let attrs = ScriptAttrs::new().with("type", "module").with("nonce", "r4nd0m");
        let tags = loader.asset_tags("src/admin.js", Some(&attrs)).unwrap();

        assert_eq!(
            tags,
            [
                link("/static/assets/vendor.css"),
                r#"<script type="module" nonce="r4nd0m" src="/static/assets/vendor.1f2e3d.js"></script>"#
                    .to_string(),
                r#"<script type="module" nonce="r4nd0m" src="/static/assets/admin.77aa01.js"></script>"#
                    .to_string(),
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_asset_url() {
        let (_fixture, loader) = app_loader();
        assert_eq!(
            loader.asset_url("src/main.js").unwrap(),
            "/static/assets/main.4889e940.js"
        );
    }

    #[test]
    fn test_missing_asset() {
        let (_fixture, loader) = app_loader();

        let err = loader.asset_tags("src/nope.js", None).unwrap_err();
        assert!(matches!(err, ViteError::AssetNotFound(_)));
        assert!(err.message().contains("src/nope.js"));

        let err = loader.asset_url("src/nope.js").unwrap_err();
        assert!(matches!(err, ViteError::AssetNotFound(_)));

        // 单次查找失败不影响后续请求
        assert!(loader.asset_url("plain.js").is_ok());
    }

    #[test]
    fn test_missing_import_aborts_whole_resolution() {
        let (_fixture, loader) = app_loader();
        let err = loader.asset_tags("src/broken.js", None).unwrap_err();

        assert!(matches!(err, ViteError::AssetNotFound(_)));
        assert!(err.message().contains("_missing.js"));
    }

    #[test]
    fn test_idempotent_output() {
        let (_fixture, loader) = app_loader();
        let first = loader.asset_tags("src/main.js", None).unwrap();
        let second = loader.asset_tags("src/main.js", None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_absolute_static_url() {
        let fixture = write_manifest(APP_MANIFEST);
        let config = ViteConfig {
            static_url: "https://cdn.example.com/build/".to_string(),
            ..production_config(fixture.manifest_path.clone())
        };
        let loader = AssetLoader::new(config).unwrap();

        assert_eq!(
            loader.asset_url("plain.js").unwrap(),
            "https://cdn.example.com/build/plain.0001.js"
        );
    }

    #[test]
    fn test_scheme_relative_static_url() {
        let fixture = write_manifest(APP_MANIFEST);
        let config = ViteConfig {
            static_url: "//cdn.example.com/assets/".to_string(),
            ..production_config(fixture.manifest_path.clone())
        };
        let loader = AssetLoader::new(config).unwrap();

        assert_eq!(
            loader.asset_url("plain.js").unwrap(),
            "//cdn.example.com/assets/plain.0001.js"
        );
    }

    #[test]
    fn test_unrooted_static_url() {
        let fixture = write_manifest(APP_MANIFEST);
        let config = ViteConfig {
            static_url: "../build/".to_string(),
            ..production_config(fixture.manifest_path.clone())
        };
        let loader = AssetLoader::new(config).unwrap();

        assert_eq!(
            loader.asset_url("plain.js").unwrap(),
            "../build/plain.0001.js"
        );
    }

    #[test]
    fn test_entry_without_file_leaves_others_usable() {
        let fixture = write_manifest(
            r#"{"main.js": {"file": "main.abc.js"}, "odd.css": {"css": ["x.css"]}}"#,
        );
        let loader = AssetLoader::new(production_config(fixture.manifest_path.clone())).unwrap();

        assert!(matches!(
            loader.asset_tags("odd.css", None),
            Err(ViteError::ManifestMalformed(_))
        ));
        assert_eq!(
            loader.asset_tags("main.js", None).unwrap(),
            script("/static/main.abc.js")
        );
    }

    #[test]
    fn test_hmr_client_empty_in_production() {
        let (_fixture, loader) = app_loader();
        assert_eq!(loader.hmr_client(), "");
    }

    #[test]
    fn test_manifest_errors() {
        let missing = production_config(PathBuf::from("/nonexistent/dir/manifest.json"));
        assert!(matches!(
            AssetLoader::new(missing),
            Err(ViteError::ManifestUnreadable(_))
        ));

        let fixture = write_manifest("{ definitely not json");
        let malformed = production_config(fixture.manifest_path.clone());
        assert!(matches!(
            AssetLoader::new(malformed),
            Err(ViteError::ManifestMalformed(_))
        ));
    }
}

// =============================================================================
// Dev server mode
// =============================================================================

#[cfg(test)]
mod dev_server_tests {
    use super::*;

    #[test]
    fn test_dev_asset_url() {
        let loader = AssetLoader::new(dev_config()).unwrap();
        assert_eq!(
            loader.asset_url("src/main.js").unwrap(),
            "http://localhost:3000/src/main.js"
        );
    }

    #[test]
    fn test_dev_asset_url_with_static_prefix() {
        let config = ViteConfig {
            static_url: "/static/".to_string(),
            ..dev_config()
        };
        let loader = AssetLoader::new(config).unwrap();
        assert_eq!(
            loader.asset_url("src/main.js").unwrap(),
            "http://localhost:3000/static/src/main.js"
        );
    }

    #[test]
    fn test_dev_tags_single_module_script() {
        let loader = AssetLoader::new(dev_config()).unwrap();
        assert_eq!(
            loader.asset_tags("src/main.js", None).unwrap(),
            script("http://localhost:3000/src/main.js")
        );

        let attrs = ScriptAttrs::module();
        assert_eq!(
            loader.asset_tags("src/main.js", Some(&attrs)).unwrap(),
            r#"<script type="module" src="http://localhost:3000/src/main.js"></script>"#
        );
    }

    #[test]
    fn test_dev_mode_never_reads_manifest() {
        // 如果被读取，这个 "manifest" 会解析失败
        let fixture = write_manifest("this would fail to parse");
        let config = ViteConfig {
            manifest_path: fixture.manifest_path.clone(),
            ..dev_config()
        };

        let loader = AssetLoader::new(config).unwrap();
        assert!(loader.is_dev_server());
        assert!(loader.manifest().is_none());
        assert!(loader.asset_tags("anything/at/all.ts", None).is_ok());
        assert!(loader.asset_url("anything/at/all.ts").is_ok());
    }

    #[test]
    fn test_hmr_client_without_react() {
        let loader = AssetLoader::new(dev_config()).unwrap();
        assert_eq!(
            loader.hmr_client(),
            r#"<script type="module" src="http://localhost:3000/@vite/client"></script>"#
        );
    }

    #[test]
    fn test_hmr_client_with_react_and_custom_client() {
        let config = ViteConfig {
            is_react: true,
            ws_client: "@vite/client?v=2".to_string(),
            ..dev_config()
        };
        let loader = AssetLoader::new(config).unwrap();
        let html = loader.hmr_client();

        let preamble_end = html.find("</script>").unwrap();
        assert!(html.starts_with("<script type=\"module\">\n"));
        assert!(html.contains("import RefreshRuntime from 'http://localhost:3000/@react-refresh'"));
        assert!(html.contains("window.$RefreshReg$ = () => {}"));
        assert!(html.contains("window.$RefreshSig$ = () => (type) => type"));
        assert!(html.contains("window.__vite_plugin_react_preamble_installed__=true"));
        // 预加载脚本在客户端脚本之前
        assert!(html.find("@vite/client").unwrap() > preamble_end);
        assert!(html.ends_with(
            r#"<script type="module" src="http://localhost:3000/@vite/client?v=2"></script>"#
        ));
    }
}

// =============================================================================
// Lazy loader
// =============================================================================

#[cfg(test)]
mod lazy_loader_tests {
    use super::*;

    #[test]
    fn test_initializes_on_first_request() {
        let fixture = write_manifest(APP_MANIFEST);
        let lazy = LazyAssetLoader::new(production_config(fixture.manifest_path.clone()));

        assert!(!lazy.is_initialized());
        assert_eq!(
            lazy.asset_url("plain.js").unwrap(),
            "/static/plain.0001.js"
        );
        assert!(lazy.is_initialized());
    }

    #[test]
    fn test_manifest_parsed_only_once() {
        let fixture = write_manifest(APP_MANIFEST);
        let lazy = LazyAssetLoader::new(production_config(fixture.manifest_path.clone()));

        assert!(lazy.asset_url("plain.js").is_ok());
        // 删除文件后仍然使用缓存的 manifest
        fs::remove_file(&fixture.manifest_path).unwrap();
        assert!(lazy.asset_tags("src/main.js", None).is_ok());
    }

    #[test]
    fn test_failed_initialization_is_permanent() {
        let dir = TempDir::new().unwrap();
        let manifest_path = dir.path().join("manifest.json");
        let lazy = LazyAssetLoader::new(production_config(manifest_path.clone()));

        let first = lazy.asset_tags("plain.js", None).unwrap_err();
        assert!(matches!(first, ViteError::ManifestUnreadable(_)));

        // 文件出现后也不会重试
        fs::write(&manifest_path, APP_MANIFEST).unwrap();
        let second = lazy.asset_url("plain.js").unwrap_err();
        assert_eq!(first, second);
        assert_eq!(lazy.hmr_client(), "");
    }

    #[test]
    fn test_dev_mode_lazy_loader() {
        let lazy = LazyAssetLoader::new(ViteConfig {
            manifest_path: PathBuf::from("/nonexistent/manifest.json"),
            ..dev_config()
        });

        assert_eq!(
            lazy.asset_url("src/main.js").unwrap(),
            "http://localhost:3000/src/main.js"
        );
        assert!(lazy.hmr_client().contains("@vite/client"));
    }

    #[test]
    fn test_concurrent_first_use() {
        let fixture = write_manifest(APP_MANIFEST);
        let lazy = Arc::new(LazyAssetLoader::new(production_config(
            fixture.manifest_path.clone(),
        )));

        let results: Vec<String> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let lazy = Arc::clone(&lazy);
                    s.spawn(move || lazy.asset_tags("src/main.js", None).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert!(lazy.is_initialized());
    }
}
