// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 元数据中记录原始请求URL的键
pub const ORIGINAL_URL_KEY: &str = "original_url";

/// 内容文档
///
/// 抓取器产生的一个内容单元：正文文本加上一组元数据。
/// 元数据至少包含 `original_url`，用于日志和错误上下文。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// 页面正文（markdown 或纯文本）
    pub page_content: String,
    /// 元数据
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// 创建文档并记录原始URL
    pub fn new(page_content: impl Into<String>, original_url: impl Into<String>) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert(ORIGINAL_URL_KEY.to_string(), original_url.into());
        Self {
            page_content: page_content.into(),
            metadata,
        }
    }

    /// 追加一条元数据
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// 原始URL，缺失时返回 `"<unknown>"`
    pub fn original_url(&self) -> &str {
        self.metadata
            .get(ORIGINAL_URL_KEY)
            .map(String::as_str)
            .unwrap_or("<unknown>")
    }
}
