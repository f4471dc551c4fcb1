// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 远程 REST API 配置
    pub api: ApiSettings,
    /// 社区页面配置
    pub community: CommunitySettings,
    /// 浏览器渲染配置
    pub browser: BrowserSettings,
    /// 目录文件配置
    pub catalog: CatalogSettings,
    /// `.config.json` 中的 `key`
    #[serde(default)]
    pub key: Option<String>,
    /// `.config.json` 中的 `file`
    #[serde(default)]
    pub file: Option<String>,
}

/// REST API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// API 密钥
    pub key: Option<String>,
    /// API 基础地址
    pub base_url: String,
    /// 单次请求超时时间（秒）
    pub request_timeout_secs: u64,
}

/// 社区页面配置
#[derive(Debug, Clone, Deserialize)]
pub struct CommunitySettings {
    /// 条目详情页所在站点
    pub base_url: String,
}

/// 渲染引擎类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderEngineKind {
    /// 无头 Chrome
    Chromium,
    /// 纯 HTTP 获取 + 选择器解析
    Static,
}

/// 浏览器渲染配置
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// 渲染引擎
    pub engine: RenderEngineKind,
    /// 远程调试地址，设置后连接已有浏览器而不是启动新的
    pub remote_debugging_url: Option<String>,
    /// 页面导航超时（秒），未设置时无限等待
    pub navigation_timeout_secs: Option<u64>,
    /// 窗口宽度
    pub window_width: u32,
    /// 窗口高度
    pub window_height: u32,
}

/// 目录配置
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    /// CSV 目录文件路径
    pub file: Option<String>,
    /// 列表接口每页条目数
    pub page_size: u32,
    /// 是否分页获取完整列表
    pub paginate: bool,
}

impl ApiSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl BrowserSettings {
    pub fn navigation_timeout(&self) -> Option<Duration> {
        self.navigation_timeout_secs.map(Duration::from_secs)
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/` 目录下的配置文件、工作目录中的
    /// `.config.json` 以及 `WORKSHOP__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name(".config.json").required(false))
            .add_source(Environment::with_prefix("WORKSHOP").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Defaults only; no files or environment are read.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("api.base_url", "https://api.steampowered.com")?
            .set_default("api.request_timeout_secs", 30)?
            .set_default("community.base_url", "https://steamcommunity.com")?
            .set_default("browser.engine", "chromium")?
            .set_default("browser.window_width", 1080)?
            .set_default("browser.window_height", 920)?
            .set_default("catalog.page_size", 500)?
            .set_default("catalog.paginate", false)
    }

    /// Effective API key: `api.key` wins over the legacy top-level `key`.
    pub fn api_key(&self) -> Option<&str> {
        self.api.key.as_deref().or(self.key.as_deref())
    }

    /// Effective catalog file: `catalog.file` wins over the legacy top-level `file`.
    pub fn catalog_file(&self) -> Option<&str> {
        self.catalog.file.as_deref().or(self.file.as_deref())
    }
}
