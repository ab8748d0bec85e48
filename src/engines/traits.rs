// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 抓取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// URL 无法解析或缺少主机
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// 仅支持 http/https
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// 主机指向本机或内网地址
    #[error("Blocked host: {0}")]
    BlockedHost(String),

    /// DNS 解析失败
    #[error("Failed to resolve host '{host}'")]
    HostLookup {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// 超时
    #[error("Timeout")]
    Timeout,

    /// 上游返回非 2xx 状态码
    #[error("Upstream responded with status {0}")]
    Status(u16),

    /// 响应体超过上限
    #[error("Response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),
}

impl FetchError {
    /// 请求本身有问题（而非上游故障）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FetchError::InvalidUrl { .. }
                | FetchError::UnsupportedScheme(_)
                | FetchError::BlockedHost(_)
        )
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::RequestFailed(err)
        }
    }
}

/// 抓取结果
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// 跟随重定向之后的最终地址
    pub final_url: String,
    /// HTTP状态码
    pub status_code: u16,
    /// 内容类型
    pub content_type: Option<String>,
    /// 解码为 UTF-8 的页面内容
    pub html: String,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
}

/// 页面抓取器特质
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 抓取页面，一次请求，不重试
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;

    /// 抓取器名称
    fn name(&self) -> &'static str;
}
