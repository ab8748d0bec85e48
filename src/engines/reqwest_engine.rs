// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::FetchSettings;
use crate::engines::traits::{FetchError, FetchedPage, PageFetcher};
use crate::engines::validators::{self, PublicOnlyResolver};
use crate::utils::text_encoding;
use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::error::Error as _;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;
use tracing::{debug, info};

/// 抓取引擎
///
/// 基于reqwest实现的HTTP页面抓取器。客户端在创建时构建一次，
/// 之后在所有请求间共享（连接池只读共享）。
pub struct ReqwestFetcher {
    client: reqwest::Client,
    max_body_bytes: usize,
    block_private_hosts: bool,
}

impl ReqwestFetcher {
    /// 根据抓取配置创建
    ///
    /// # 参数
    ///
    /// * `settings` - 超时、User-Agent、重定向和响应体上限
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .redirect(redirect_policy(
                settings.max_redirects,
                settings.block_private_hosts,
            ));
        if settings.block_private_hosts {
            builder = builder.dns_resolver(Arc::new(PublicOnlyResolver));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            max_body_bytes: settings.max_body_bytes,
            block_private_hosts: settings.block_private_hosts,
        })
    }
}

/// 重定向策略：限制次数，且开启防护时不跟随到本机或内网地址
///
/// 域名目标由 [`PublicOnlyResolver`] 在连接前检查，这里只拦截字面量。
fn redirect_policy(max_redirects: usize, block_private_hosts: bool) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() > max_redirects {
            attempt.error(format!("too many redirects (limit {})", max_redirects))
        } else if block_private_hosts && validators::is_blocked_literal(attempt.url()) {
            let target = attempt.url().host_str().unwrap_or_default().to_string();
            attempt.error(FetchError::BlockedHost(target))
        } else {
            attempt.follow()
        }
    })
}

/// 重定向钩子和解析器拒绝的主机会被 reqwest 包进错误链，这里取回来
fn blocked_host(err: &reqwest::Error) -> Option<String> {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(FetchError::BlockedHost(host)) = cause.downcast_ref::<FetchError>() {
            return Some(host.clone());
        }
        source = cause.source();
    }
    None
}

fn classify(err: reqwest::Error) -> FetchError {
    match blocked_host(&err) {
        Some(host) => FetchError::BlockedHost(host),
        None => FetchError::from(err),
    }
}

#[async_trait]
impl PageFetcher for ReqwestFetcher {
    /// 执行HTTP抓取
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchedPage)` - 2xx 响应，页面已解码为 UTF-8
    /// * `Err(FetchError)` - URL 非法、主机被拦截、网络失败、非 2xx、超时或响应体过大
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let target = validators::validate_url(url, self.block_private_hosts).await?;
        self.download(target).await
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

impl ReqwestFetcher {
    /// 下载已校验的地址
    async fn download(&self, target: Url) -> Result<FetchedPage, FetchError> {
        let url = target.to_string();
        let start = Instant::now();
        let mut response = self.client.get(target).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            info!(url = %url, status = status.as_u16(), "Upstream returned error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if response
            .content_length()
            .is_some_and(|len| len > self.max_body_bytes as u64)
        {
            return Err(FetchError::BodyTooLarge {
                limit: self.max_body_bytes,
            });
        }

        // Content-Length may be absent or lie, so count while reading
        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(FetchError::BodyTooLarge {
                    limit: self.max_body_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        let html = text_encoding::decode_html(&body, content_type.as_deref());
        let response_time_ms = start.elapsed().as_millis() as u64;

        debug!(
            url = %url,
            final_url = %final_url,
            bytes = body.len(),
            elapsed_ms = response_time_ms,
            "Page fetched"
        );

        Ok(FetchedPage {
            final_url,
            status_code: status.as_u16(),
            content_type,
            html,
            response_time_ms,
        })
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
