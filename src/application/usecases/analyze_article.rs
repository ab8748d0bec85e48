// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{debug, info, warn};

use crate::application::dto::analysis_report::{build_report, AnalysisReport, ReportOptions};
use crate::domain::services::extraction_service::ExtractionService;
use crate::domain::services::tagging_service::PosTagger;
use crate::engines::traits::PageFetcher;
use crate::infrastructure::metrics::{
    ANALYSES_FAILED_TOTAL, ANALYSES_TOTAL, ANALYSIS_DURATION_SECONDS, FETCH_DURATION_SECONDS,
    TOKENS_PER_ARTICLE,
};
use crate::utils::errors::{AnalysisError, PipelineStage};

// === Section: Use Case Definition ===

/// 文章词性分析用例
///
/// 按 抓取 → 提取 → 标注 → 汇总 的顺序执行，任一阶段失败立即中止。
/// 共享的组件都是只读的，每个请求的中间状态互不影响。
pub struct AnalyzeArticleUseCase {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<ExtractionService>,
    tagger: Arc<dyn PosTagger>,
}

// === Section: Implementation ===

impl AnalyzeArticleUseCase {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<ExtractionService>,
        tagger: Arc<dyn PosTagger>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            tagger,
        }
    }

    /// 分析一篇在线文章
    pub async fn execute(
        &self,
        url: &str,
        options: ReportOptions,
    ) -> Result<AnalysisReport, AnalysisError> {
        let started = Instant::now();
        counter!(ANALYSES_TOTAL).increment(1);

        let result = self.run(url, options).await;
        self.record_outcome(Some(url), started, &result);
        result
    }

    /// 直接分析给定文本，跳过抓取和提取
    pub async fn analyze_text(
        &self,
        text: String,
        options: ReportOptions,
    ) -> Result<AnalysisReport, AnalysisError> {
        let started = Instant::now();
        counter!(ANALYSES_TOTAL).increment(1);

        let result = self.tag_and_summarize(None, text, options).await;
        self.record_outcome(None, started, &result);
        result
    }

    async fn run(&self, url: &str, options: ReportOptions) -> Result<AnalysisReport, AnalysisError> {
        // Fetching
        let page = self.fetcher.fetch(url).await?;
        histogram!(FETCH_DURATION_SECONDS).record(page.response_time_ms as f64 / 1000.0);
        debug!(
            url = %url,
            fetcher = self.fetcher.name(),
            bytes = page.html.len(),
            elapsed_ms = page.response_time_ms,
            "Fetch stage finished"
        );

        // Extracting
        let extractor = Arc::clone(&self.extractor);
        let final_url = page.final_url;
        let html = page.html;
        let article = run_blocking(PipelineStage::Extracting, move || {
            extractor.extract_article(&final_url, html)
        })
        .await??;
        debug!(url = %article.url, chars = article.char_count(), "Extract stage finished");

        self.tag_and_summarize(Some(article.url), article.text, options)
            .await
    }

    async fn tag_and_summarize(
        &self,
        url: Option<String>,
        text: String,
        options: ReportOptions,
    ) -> Result<AnalysisReport, AnalysisError> {
        // Tagging
        let tagger = Arc::clone(&self.tagger);
        let (text, tokens) = run_blocking(PipelineStage::Tagging, move || {
            let tokens = tagger.tag(&text);
            (text, tokens)
        })
        .await?;
        let tokens = tokens?;
        histogram!(TOKENS_PER_ARTICLE).record(tokens.len() as f64);
        debug!(tagger = self.tagger.name(), tokens = tokens.len(), "Tag stage finished");

        // Summarizing
        run_blocking(PipelineStage::Summarizing, move || {
            build_report(url.as_deref(), &text, tokens, &options)
        })
        .await
    }

    fn record_outcome(
        &self,
        url: Option<&str>,
        started: Instant,
        result: &Result<AnalysisReport, AnalysisError>,
    ) {
        let elapsed = started.elapsed();
        match result {
            Ok(report) => {
                histogram!(ANALYSIS_DURATION_SECONDS).record(elapsed.as_secs_f64());
                info!(
                    url = url.unwrap_or("-"),
                    report_id = %report.id,
                    tokens = report.metrics.total_tokens,
                    unique_tags = report.metrics.unique_tags,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Analysis completed"
                );
            }
            Err(e) => {
                let stage = e.stage();
                counter!(ANALYSES_FAILED_TOTAL, "stage" => stage.as_str()).increment(1);
                warn!(
                    url = url.unwrap_or("-"),
                    stage = %stage,
                    error = %e,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Analysis failed"
                );
            }
        }
    }
}

/// 在阻塞线程池上执行 CPU 密集的阶段
async fn run_blocking<F, R>(stage: PipelineStage, f: F) -> Result<R, AnalysisError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AnalysisError::Worker {
            stage,
            message: e.to_string(),
        })
}

#[cfg(test)]
#[path = "analyze_article_test.rs"]
mod tests;
