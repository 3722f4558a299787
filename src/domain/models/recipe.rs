// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::url_utils;

/// 菜谱实体
///
/// 由语言模型从网页内容中提取的结构化菜谱数据。所有字段均可缺失，
/// 缺失表示"内容中没有找到"，而不是"需要猜测"。
///
/// 字段上的文档注释会作为 JSON Schema 的 `description` 一并发送给模型。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Cooking recipe extracted from a website")]
pub struct Recipe {
    /// The exact title/name of the recipe as it appears on the website. Do not modify or guess.
    #[serde(default)]
    pub name: Option<String>,

    /// List of ingredients exactly as written on the website, including quantities and
    /// measurements. Each ingredient should be a separate list item. Do not modify the text or format.
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,

    /// Cooking time, baking temperature, or any time/temperature information as stated on the
    /// website. Combine cooking and time information into a single string if multiple values are
    /// provided. Isolate from other instructions.
    #[serde(default)]
    pub cooking_time_temperature: Option<String>,

    /// Step-by-step cooking instructions exactly as written on the website. Each step should be a
    /// separate list item. Preserve the original wording and formatting.
    #[serde(default)]
    pub instructions: Option<Vec<String>>,

    /// Additional instructions and/or hints on top of the main instructions.
    #[serde(default)]
    pub hints: Option<String>,

    /// URL of the main recipe image if explicitly provided. Only include if a clear image URL is
    /// present in the content.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// 补全错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentError {
    /// URL中没有主机段
    #[error("URL has no host segment: {0}")]
    MissingDomain(String),
}

/// 补全后的菜谱
///
/// 在提取成功后由编排器构建，附带来源 URL 和域名。这两个字段从不由模型提取。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    /// 处理的原始URL
    pub url: String,
    /// URL的主机段
    pub domain: String,
}

impl EnrichedRecipe {
    /// 用来源 URL 补全已提取的菜谱
    ///
    /// 只接受一个已存在的 `Recipe`，因此无法从缺失的提取结果构建。
    ///
    /// # 错误
    ///
    /// URL 没有第三个 `/` 分隔段时返回 `EnrichmentError::MissingDomain`
    pub fn from_recipe(recipe: Recipe, url: &str) -> Result<Self, EnrichmentError> {
        let domain = url_utils::domain_of(url)
            .ok_or_else(|| EnrichmentError::MissingDomain(url.to_string()))?;

        Ok(Self {
            recipe,
            url: url.to_string(),
            domain: domain.to_string(),
        })
    }

    /// 笔记标题，名称缺失或为空白时使用给定的占位标题
    pub fn title_or<'a>(&'a self, untitled: &'a str) -> &'a str {
        self.recipe
            .name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(untitled)
    }
}
