// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use newspos::utils::telemetry;

#[test]
fn test_telemetry_initialization() {
    // 初始化遥测系统
    telemetry::init_telemetry();
    // 重复初始化不应 panic
    telemetry::init_telemetry();

    // 测试结构化日志
    tracing::info!(
        url = "https://example.com/news",
        stage = "fetching",
        elapsed_ms = 12u64,
        "Fetch stage finished"
    );

    let error_result: Result<(), &str> = Err("Test error");
    if let Err(e) = error_result {
        tracing::error!(error = e, "Operation failed");
    }
}
