use super::asset_loader::{AssetLoader, LazyAssetLoader};
use super::tags::ScriptAttrs;
use crate::errors::Result;

/// 模板层使用的资源解析接口
///
/// Implemented by both the eager [`AssetLoader`] and the lazily
/// initialized [`LazyAssetLoader`], so template helpers work with either.
pub trait AssetSource: Send + Sync {
    /// 生成资源及其依赖的全部标签
    fn asset_tags_with(
        &self,
        path: &str,
        attrs: Option<&ScriptAttrs>,
        with_imports: bool,
    ) -> Result<String>;

    /// 仅生成资源 URL，不含依赖
    fn asset_url(&self, path: &str) -> Result<String>;

    /// 开发模式下的 HMR 客户端标签，生产模式返回空字符串
    fn hmr_client(&self) -> String;
}

impl AssetSource for AssetLoader {
    fn asset_tags_with(
        &self,
        path: &str,
        attrs: Option<&ScriptAttrs>,
        with_imports: bool,
    ) -> Result<String> {
        AssetLoader::asset_tags_with(self, path, attrs, with_imports)
    }

    fn asset_url(&self, path: &str) -> Result<String> {
        AssetLoader::asset_url(self, path)
    }

    fn hmr_client(&self) -> String {
        AssetLoader::hmr_client(self)
    }
}

impl AssetSource for LazyAssetLoader {
    fn asset_tags_with(
        &self,
        path: &str,
        attrs: Option<&ScriptAttrs>,
        with_imports: bool,
    ) -> Result<String> {
        LazyAssetLoader::asset_tags_with(self, path, attrs, with_imports)
    }

    fn asset_url(&self, path: &str) -> Result<String> {
        LazyAssetLoader::asset_url(self, path)
    }

    fn hmr_client(&self) -> String {
        LazyAssetLoader::hmr_client(self)
    }
}

impl<T: AssetSource + ?Sized> AssetSource for std::sync::Arc<T> {
    fn asset_tags_with(
        &self,
        path: &str,
        attrs: Option<&ScriptAttrs>,
        with_imports: bool,
    ) -> Result<String> {
        (**self).asset_tags_with(path, attrs, with_imports)
    }

    fn asset_url(&self, path: &str) -> Result<String> {
        (**self).asset_url(path)
    }

    fn hmr_client(&self) -> String {
        (**self).hmr_client()
    }
}
