// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_app_with, create_test_app, post_json, ARTICLE_HTML};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use newspos::config::settings::Settings;
use newspos::presentation::routes::text_body_limit;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_site() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/news/budget"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(ARTICLE_HTML, "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/news/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><body><script>paywall()</script></body></html>",
            "text/html",
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/news/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    server
}

fn tag_counts(rows: &Value) -> Vec<(String, u64)> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|r| {
            (
                r["tag"].as_str().unwrap().to_string(),
                r["count"].as_u64().unwrap(),
            )
        })
        .collect()
}

/// 完整流水线：抓取 → 提取 → 标注 → 汇总
#[tokio::test]
async fn analyze_article_end_to_end() {
    let server = mock_site().await;
    let url = format!("{}/news/budget", server.uri());

    let (status, body) = post_json(create_test_app(), "/v1/analyze", json!({ "url": url })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let data = &body["data"];
    assert_eq!(data["url"], url);
    assert_eq!(data["tagset"], "penn");

    let preview = data["text_preview"].as_str().unwrap();
    assert!(preview.starts_with("Council approves budget The city council"));
    assert!(!preview.contains("Daily Example"));
    assert!(!preview.contains("analytics"));

    let total = data["metrics"]["total_tokens"].as_u64().unwrap();
    assert!(total > 30);
    let counts = tag_counts(&data["tags"]);
    assert_eq!(counts.iter().map(|(_, c)| c).sum::<u64>(), total);
    assert_eq!(
        data["metrics"]["unique_tags"].as_u64().unwrap() as usize,
        counts.len()
    );
    assert_eq!(data["metrics"]["most_common_tag"], counts[0].0.as_str());

    // ranked by count, descending
    assert!(counts.windows(2).all(|w| w[0].1 >= w[1].1));
    assert!(data["top"].as_array().unwrap().len() <= 10);
    assert!(data.get("text").is_none());
    assert!(data.get("tokens").is_none());
}

#[tokio::test]
async fn analyze_article_with_options() {
    let server = mock_site().await;

    let (status, body) = post_json(
        create_test_app(),
        "/v1/analyze",
        json!({
            "url": format!("{}/news/budget", server.uri()),
            "tagset": "universal",
            "top_n": 3,
            "include_text": true,
            "include_tokens": true
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["tagset"], "universal");
    assert_eq!(data["top"].as_array().unwrap().len(), 3);
    assert_eq!(data["samples"].as_array().unwrap().len(), 3);
    assert!(data["text"].as_str().unwrap().ends_with("the mayor told reporters."));

    let tokens = data["tokens"].as_array().unwrap();
    assert_eq!(
        tokens.len() as u64,
        data["metrics"]["total_tokens"].as_u64().unwrap()
    );
    assert_eq!(tokens[0]["surface_form"], "Council");

    let universal_codes = [
        "ADJ", "ADP", "ADV", "CONJ", "DET", "NOUN", "NUM", "PRT", "PRON", "VERB", "PUNCT", "X",
    ];
    for (tag, _) in tag_counts(&data["tags"]) {
        assert!(universal_codes.contains(&tag.as_str()), "unexpected tag {}", tag);
    }
}

/// 相同的静态页面得到相同的统计
#[tokio::test]
async fn analyze_article_is_idempotent() {
    let server = mock_site().await;
    let request = json!({ "url": format!("{}/news/budget", server.uri()) });

    let (_, first) = post_json(create_test_app(), "/v1/analyze", request.clone()).await;
    let (_, second) = post_json(create_test_app(), "/v1/analyze", request).await;

    assert_eq!(first["data"]["tags"], second["data"]["tags"]);
    assert_eq!(first["data"]["samples"], second["data"]["samples"]);
    assert_ne!(first["data"]["id"], second["data"]["id"]);
}

#[tokio::test]
async fn invalid_url_fails_in_fetch_stage() {
    let (status, body) =
        post_json(create_test_app(), "/v1/analyze", json!({ "url": "not-a-url" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["stage"], "fetching");
    assert!(body["error"].as_str().unwrap().contains("Invalid URL"));
}

#[tokio::test]
async fn unsupported_scheme_is_rejected() {
    let (status, body) = post_json(
        create_test_app(),
        "/v1/analyze",
        json!({ "url": "ftp://example.com/news" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["stage"], "fetching");
}

#[tokio::test]
async fn upstream_error_status_is_bad_gateway() {
    let server = mock_site().await;

    let (status, body) = post_json(
        create_test_app(),
        "/v1/analyze",
        json!({ "url": format!("{}/news/gone", server.uri()) }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["stage"], "fetching");
    assert!(body["error"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn page_without_text_fails_in_extract_stage() {
    let server = mock_site().await;

    let (status, body) = post_json(
        create_test_app(),
        "/v1/analyze",
        json!({ "url": format!("{}/news/empty", server.uri()) }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["stage"], "extracting");
}

#[tokio::test]
async fn private_hosts_are_blocked_by_default() {
    let server = mock_site().await;
    let settings = Settings::with_defaults()
        .and_then(|b| b.build())
        .and_then(|c| c.try_deserialize::<Settings>())
        .unwrap();
    assert!(settings.fetch.block_private_hosts);

    let (status, body) = post_json(
        create_app_with(&settings),
        "/v1/analyze",
        json!({ "url": format!("{}/news/budget", server.uri()) }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Blocked host"));
}

#[tokio::test]
async fn request_validation_errors() {
    let (status, body) = post_json(
        create_test_app(),
        "/v1/analyze",
        json!({ "url": "https://example.com", "top_n": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["stage"], "validation");

    let (status, body) = post_json(create_test_app(), "/v1/analyze", json!({ "link": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = post_json(create_test_app(), "/v1/analyze", json!({ "url": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_text_simple_sentence() {
    let (status, body) = post_json(
        create_test_app(),
        "/v1/analyze/text",
        json!({ "text": "The cat sat.", "tagset": "universal", "include_tokens": true }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert!(data["url"].is_null());

    let mut counts = tag_counts(&data["tags"]);
    counts.sort();
    assert_eq!(
        counts,
        vec![
            ("DET".to_string(), 1),
            ("NOUN".to_string(), 1),
            ("PUNCT".to_string(), 1),
            ("VERB".to_string(), 1),
        ]
    );

    let tokens: Vec<(String, String)> = data["tokens"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| {
            (
                t["surface_form"].as_str().unwrap().to_string(),
                t["pos_tag"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        tokens,
        vec![
            ("The".to_string(), "DT".to_string()),
            ("cat".to_string(), "NN".to_string()),
            ("sat".to_string(), "VBD".to_string()),
            (".".to_string(), ".".to_string()),
        ]
    );
}

#[tokio::test]
async fn analyze_empty_text_is_not_an_error() {
    let (status, body) =
        post_json(create_test_app(), "/v1/analyze/text", json!({ "text": "" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["metrics"]["total_tokens"], 0);
    assert!(body["data"]["metrics"]["most_common_tag"].is_null());
}

#[tokio::test]
async fn oversized_text_is_rejected() {
    let mut settings = Settings::with_defaults()
        .and_then(|b| b.build())
        .and_then(|c| c.try_deserialize::<Settings>())
        .unwrap();
    settings.analysis.max_text_chars = 10;

    let (status, body) = post_json(
        create_app_with(&settings),
        "/v1/analyze/text",
        json!({ "text": "This sentence is longer than ten characters." }),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["stage"], "tagging");
}

/// 文本未超出字符上限时，即使请求体超过 axum 默认的 2 MB 也能完成标注
#[tokio::test]
async fn large_text_within_char_limit_is_tagged() {
    let text = "日".repeat(800_000);

    let (status, body) =
        post_json(create_test_app(), "/v1/analyze/text", json!({ "text": text })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_characters"], 800_000);
    assert_eq!(body["data"]["metrics"]["total_tokens"], 1);
}

#[tokio::test]
async fn body_over_text_limit_is_payload_too_large() {
    let mut settings = Settings::with_defaults()
        .and_then(|b| b.build())
        .and_then(|c| c.try_deserialize::<Settings>())
        .unwrap();
    settings.analysis.max_text_chars = 10;
    assert!(text_body_limit(10) < 100_000);

    let (status, body) = post_json(
        create_app_with(&settings),
        "/v1/analyze/text",
        json!({ "text": "a".repeat(100_000) }),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["success"], false);
    assert_eq!(body["stage"], "validation");
}

#[tokio::test]
async fn missing_content_type_is_unsupported_media_type() {
    let response = create_test_app()
        .oneshot(
            Request::builder()
                .uri("/v1/analyze/text")
                .method("POST")
                .body(Body::from(r#"{"text":"The cat sat."}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["stage"], "validation");
}

/// 并发请求互不干扰
#[tokio::test]
async fn concurrent_requests_are_independent() {
    let server = mock_site().await;
    let app = create_test_app();
    let url = format!("{}/news/budget", server.uri());

    let requests = (0..4).map(|_| post_json(app.clone(), "/v1/analyze", json!({ "url": url })));
    let results = futures::future::join_all(requests).await;

    let first_tags = &results[0].1["data"]["tags"];
    for (status, body) in &results {
        assert_eq!(*status, StatusCode::OK);
        assert_eq!(&body["data"]["tags"], first_tags);
    }
}
