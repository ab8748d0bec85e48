// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use tracing::{debug, warn};

/// `<meta charset>` 只在文档开头查找
const META_SCAN_BYTES: usize = 4096;

static CONTENT_TYPE_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?\s*([A-Za-z0-9_.:\-]+)"#).unwrap());

static META_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?\s*([A-Za-z0-9_.:\-]+)"#).unwrap()
});

/// 将页面字节解码为 UTF-8 字符串
///
/// 编码来源依次为：`Content-Type` 头、`<meta charset>` 声明、
/// 合法 UTF-8 直接采用，最后才用 chardetng 统计检测。无法解码的字节以替换字符代替。
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> String {
    let (encoding, source) = if let Some(enc) = content_type.and_then(charset_from_content_type) {
        (enc, "header")
    } else if let Some(enc) = charset_from_meta(bytes) {
        (enc, "meta")
    } else if std::str::from_utf8(bytes).is_ok() {
        (UTF_8, "utf8")
    } else {
        (detect(bytes), "detected")
    };

    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(encoding = actual.name(), source, "Page contained malformed byte sequences");
    } else {
        debug!(encoding = actual.name(), source, bytes = bytes.len(), "Page decoded");
    }
    text.into_owned()
}

/// 从 `Content-Type` 头中取出字符集
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    CONTENT_TYPE_CHARSET
        .captures(content_type.as_bytes())
        .and_then(|caps| caps.get(1))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
}

/// 从文档开头的 `<meta>` 声明中取出字符集
pub fn charset_from_meta(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SCAN_BYTES)];
    META_CHARSET
        .captures(head)
        .and_then(|caps| caps.get(1))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        // A UTF-16 label in an ASCII-compatible byte stream is always wrong
        .map(|enc| if enc.is_ascii_compatible() { enc } else { UTF_8 })
}

fn detect(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}
