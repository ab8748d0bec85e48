// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务，均为纯函数或只读共享的对象。
///
/// 包含的服务：
/// - 统计服务（aggregation_service）：按标签计数、排序并收集示例词
/// - 提取服务（extraction_service）：从 HTML 中剥离样板内容，提取正文
/// - 词典（lexicon）：标注器使用的内置词性词典
/// - 标注服务（tagging_service）：分句、分词并标注词性
/// - 分词器（tokenizer）：Treebank 风格的分词和分句
pub mod aggregation_service;
pub mod extraction_service;
pub mod lexicon;
pub mod tagging_service;
pub mod tokenizer;
