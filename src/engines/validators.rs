// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::FetchError;
use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use std::net::{IpAddr, SocketAddr};
use tokio::net::lookup_host;
use url::{Host, Url};

/// 校验目标 URL
///
/// 语法和协议总是检查；`block_private_hosts` 开启时还会解析主机，
/// 拒绝环回、内网、链路本地和组播地址 (防止 SSRF)
pub async fn validate_url(url_str: &str, block_private_hosts: bool) -> Result<Url, FetchError> {
    let url = Url::parse(url_str.trim()).map_err(|e| FetchError::InvalidUrl {
        url: url_str.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(FetchError::UnsupportedScheme(url.scheme().to_string()));
    }

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| FetchError::InvalidUrl {
            url: url_str.to_string(),
            reason: "missing host".to_string(),
        })?
        .to_string();

    if !block_private_hosts {
        return Ok(url);
    }

    if is_blocked_literal(&url) {
        return Err(FetchError::BlockedHost(host));
    }

    // 域名需要解析后逐个检查
    if let Some(Host::Domain(domain)) = url.host() {
        let port = url.port_or_known_default().unwrap_or(80);
        let addrs = lookup_host((domain, port))
            .await
            .map_err(|source| FetchError::HostLookup {
                host: host.clone(),
                source,
            })?;

        for addr in addrs {
            if is_private_ip(addr.ip()) {
                return Err(FetchError::BlockedHost(format!("{} ({})", host, addr.ip())));
            }
        }
    }

    Ok(url)
}

/// 不做 DNS 解析即可判定的拦截：`localhost` 和私有 IP 字面量
pub fn is_blocked_literal(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.trim_end_matches('.').to_ascii_lowercase();
            domain == "localhost" || domain.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => is_private_ip(IpAddr::V4(ip)),
        Some(Host::Ipv6(ip)) => is_private_ip(IpAddr::V6(ip)),
        None => false,
    }
}

/// 只保留公网地址；全部被过滤时返回 [`FetchError::BlockedHost`]
pub fn public_addrs<I>(host: &str, addrs: I) -> Result<Vec<SocketAddr>, FetchError>
where
    I: IntoIterator<Item = SocketAddr>,
{
    let public: Vec<SocketAddr> = addrs
        .into_iter()
        .filter(|addr| !is_private_ip(addr.ip()))
        .collect();

    if public.is_empty() {
        return Err(FetchError::BlockedHost(host.to_string()));
    }
    Ok(public)
}

/// 只连接公网地址的 DNS 解析器
///
/// 安装在 HTTP 客户端上，首跳和每次重定向都经过它，
/// 连接使用的正是这里检查过的地址。
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicOnlyResolver;

impl Resolve for PublicOnlyResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(resolve_public(name.as_str().to_string()))
    }
}

async fn resolve_public(host: String) -> Result<Addrs, Box<dyn std::error::Error + Send + Sync>> {
    let resolved = lookup_host((host.as_str(), 0)).await?;
    let public = public_addrs(&host, resolved)?;
    let addrs: Addrs = Box::new(public.into_iter());
    Ok(addrs)
}

fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            let octets = ipv4.octets();
            ipv4.is_private()
                || ipv4.is_loopback()
                || ipv4.is_link_local()
                || ipv4.is_unspecified()
                // 224.0.0.0/4 (Multicast)
                || ipv4.is_multicast()
                // 100.64.0.0/10 (Carrier-grade NAT)
                || (octets[0] == 100 && (octets[1] & 0xc0) == 64)
        }
        IpAddr::V6(ipv6) => {
            if let Some(mapped) = ipv6.to_ipv4_mapped() {
                return is_private_ip(IpAddr::V4(mapped));
            }
            let first = ipv6.segments()[0];
            ipv6.is_loopback()
                || ipv6.is_unspecified()
                // Unique Local Address (fc00::/7)
                || (first & 0xfe00) == 0xfc00
                // Link-local (fe80::/10)
                || (first & 0xffc0) == 0xfe80
                // Multicast (ff00::/8)
                || (first & 0xff00) == 0xff00
        }
    }
}
