use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViteError {
    ManifestUnreadable(String),
    ManifestMalformed(String),
    AssetNotFound(String),
    ConfigInvalid(String),
    DependencyCycle(String),
}

impl ViteError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ViteError::ManifestUnreadable(_) => "E001",
            ViteError::ManifestMalformed(_) => "E002",
            ViteError::AssetNotFound(_) => "E003",
            ViteError::ConfigInvalid(_) => "E004",
            ViteError::DependencyCycle(_) => "E005",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ViteError::ManifestUnreadable(_) => "Manifest Unreadable",
            ViteError::ManifestMalformed(_) => "Manifest Malformed",
            ViteError::AssetNotFound(_) => "Asset Not Found",
            ViteError::ConfigInvalid(_) => "Invalid Configuration",
            ViteError::DependencyCycle(_) => "Dependency Cycle",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ViteError::ManifestUnreadable(msg) => msg,
            ViteError::ManifestMalformed(msg) => msg,
            ViteError::AssetNotFound(msg) => msg,
            ViteError::ConfigInvalid(msg) => msg,
            ViteError::DependencyCycle(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 CLI 模式）
    #[cfg(feature = "cli")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ViteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ViteError {}

// 便捷的构造函数
impl ViteError {
    pub fn manifest_unreadable<T: Into<String>>(msg: T) -> Self {
        ViteError::ManifestUnreadable(msg.into())
    }

    pub fn manifest_malformed<T: Into<String>>(msg: T) -> Self {
        ViteError::ManifestMalformed(msg.into())
    }

    pub fn asset_not_found<T: Into<String>>(msg: T) -> Self {
        ViteError::AssetNotFound(msg.into())
    }

    pub fn config_invalid<T: Into<String>>(msg: T) -> Self {
        ViteError::ConfigInvalid(msg.into())
    }

    pub fn dependency_cycle<T: Into<String>>(msg: T) -> Self {
        ViteError::DependencyCycle(msg.into())
    }
}

impl From<config::ConfigError> for ViteError {
    fn from(err: config::ConfigError) -> Self {
        ViteError::ConfigInvalid(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ViteError>;
