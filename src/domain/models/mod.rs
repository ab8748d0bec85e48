// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 文章（article）：抓取并提取出的正文
/// - 词性汇总（tag_summary）：标签到计数的映射
/// - 词元（token）：词及其词性标签，以及标签集定义
///
/// 这些实体只在单个请求内存在，不做持久化。
pub mod article;
pub mod tag_summary;
pub mod token;
