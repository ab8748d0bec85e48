// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置设置测试模块
///
/// 测试默认配置能被正确加载并装配出完整的分析流水线
use newspos::config::settings::Settings;
use newspos::domain::services::extraction_service::ExtractionService;
use newspos::engines::reqwest_engine::ReqwestFetcher;
use newspos::presentation::handlers::analyze_handler::AnalysisState;

#[test]
fn test_default_settings_build_pipeline() {
    let settings = Settings::with_defaults()
        .and_then(|b| b.build())
        .and_then(|c| c.try_deserialize::<Settings>())
        .unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.metrics.listen_addr, "0.0.0.0:9000");

    assert!(ReqwestFetcher::new(&settings.fetch).is_ok());
    assert!(ExtractionService::from_settings(&settings.extraction).is_ok());

    let state = AnalysisState::from_settings(&settings).unwrap();
    assert_eq!(state.defaults.top_n, 10);
}

#[test]
fn test_invalid_selector_in_settings_fails_startup() {
    let mut settings = Settings::with_defaults()
        .and_then(|b| b.build())
        .and_then(|c| c.try_deserialize::<Settings>())
        .unwrap();
    settings.extraction.content_selectors.push("div[".to_string());

    let err = AnalysisState::from_settings(&settings).err().unwrap();
    assert!(err.to_string().contains("Invalid content selector"));
}
