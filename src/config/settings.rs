// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::token::Tagset;
use crate::domain::services::extraction_service::{
    DEFAULT_CONTENT_SELECTORS, DEFAULT_IGNORED_TAGS,
};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// 默认的浏览器 User-Agent，部分新闻站点会拒绝非浏览器请求
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 应用程序配置设置
///
/// 包含服务器、抓取、正文提取、分析和指标等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 抓取配置
    pub fetch: FetchSettings,
    /// 正文提取配置
    pub extraction: ExtractionSettings,
    /// 分析配置
    pub analysis: AnalysisSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    pub user_agent: String,
    /// 最多跟随的重定向次数
    pub max_redirects: usize,
    /// 响应体大小上限（字节）
    pub max_body_bytes: usize,
    /// 是否拒绝解析到内网地址的主机
    pub block_private_hosts: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 5,
            max_body_bytes: 5 * 1024 * 1024,
            block_private_hosts: true,
        }
    }
}

/// 正文提取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    /// 正文候选选择器，按优先级排列
    pub content_selectors: Vec<String>,
    /// 忽略的样板元素标签名
    pub ignored_tags: Vec<String>,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            content_selectors: DEFAULT_CONTENT_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ignored_tags: DEFAULT_IGNORED_TAGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// 分析配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSettings {
    /// 默认标签集
    pub tagset: Tagset,
    /// 报告中展示的高频标签数
    pub top_n: usize,
    /// 每个标签保留的示例词数
    pub samples_per_tag: usize,
    /// 正文预览字符数
    pub preview_chars: usize,
    /// 可标注的最大文本长度（字符）
    pub max_text_chars: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            tagset: Tagset::Penn,
            top_n: 10,
            samples_per_tag: 5,
            preview_chars: 500,
            max_text_chars: 1_000_000,
        }
    }
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出器
    pub enabled: bool,
    /// 导出器监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 以及 `NEWSPOS__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("NEWSPOS").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// 只含默认值的配置构建器，可在其上叠加其他来源
    pub fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let fetch = FetchSettings::default();
        let extraction = ExtractionSettings::default();
        let analysis = AnalysisSettings::default();

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("fetch.timeout_secs", fetch.timeout_secs)?
            .set_default("fetch.user_agent", fetch.user_agent)?
            .set_default("fetch.max_redirects", fetch.max_redirects as u64)?
            .set_default("fetch.max_body_bytes", fetch.max_body_bytes as u64)?
            .set_default("fetch.block_private_hosts", fetch.block_private_hosts)?
            .set_default("extraction.content_selectors", extraction.content_selectors)?
            .set_default("extraction.ignored_tags", extraction.ignored_tags)?
            .set_default("analysis.tagset", analysis.tagset.as_str())?
            .set_default("analysis.top_n", analysis.top_n as u64)?
            .set_default("analysis.samples_per_tag", analysis.samples_per_tag as u64)?
            .set_default("analysis.preview_chars", analysis.preview_chars as u64)?
            .set_default("analysis.max_text_chars", analysis.max_text_chars as u64)?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
