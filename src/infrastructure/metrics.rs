// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use anyhow::Context;
use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

pub const ANALYSES_TOTAL: &str = "analyses_total";
pub const ANALYSES_FAILED_TOTAL: &str = "analyses_failed_total";
pub const FETCH_DURATION_SECONDS: &str = "fetch_duration_seconds";
pub const ANALYSIS_DURATION_SECONDS: &str = "analysis_duration_seconds";
pub const TOKENS_PER_ARTICLE: &str = "tokens_per_article";

/// 初始化指标系统
///
/// 安装 Prometheus 导出器并注册分析流水线的各项指标。
/// 未启用时直接返回，指标宏调用为空操作。
pub fn init_metrics(settings: &MetricsSettings) -> anyhow::Result<()> {
    if !settings.enabled {
        return Ok(());
    }

    let addr: SocketAddr = settings
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid metrics address: {}", settings.listen_addr))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("Failed to install Prometheus recorder")?;

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
    Ok(())
}

/// 注册指标描述
pub fn describe_metrics() {
    describe_counter!(ANALYSES_TOTAL, "Total number of article analyses requested");
    describe_counter!(
        ANALYSES_FAILED_TOTAL,
        "Total number of analyses that failed, labelled by pipeline stage"
    );
    describe_histogram!(
        FETCH_DURATION_SECONDS,
        Unit::Seconds,
        "Duration of upstream page fetches"
    );
    describe_histogram!(
        ANALYSIS_DURATION_SECONDS,
        Unit::Seconds,
        "End-to-end duration of an analysis"
    );
    describe_histogram!(
        TOKENS_PER_ARTICLE,
        Unit::Count,
        "Number of tagged tokens per analysed text"
    );
}
