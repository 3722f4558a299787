// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;
use tracing::{error, info};

use crate::domain::models::document::Document;
use crate::domain::models::recipe::Recipe;
use crate::domain::services::llm_service::{ChatMessage, ChatModel, OutputSchema};

/// 结构化输出模式名称
pub const RECIPE_SCHEMA_NAME: &str = "Recipe";

pub const SYSTEM_PROMPT: &str = r#"
You are a precise recipe extraction assistant. Your task is to extract cooking recipe information from scraped website content and return it in the specified structured format.

CRITICAL EXTRACTION RULES:
1. IGNORE ALL BOILERPLATE: Skip navigation menus, headers, footers, advertisements, social media links, related articles, comments, author bios, and any non-recipe content.

2. EXTRACT LITERALLY: Copy recipe information exactly as written. Do not:
   - Rephrase or rewrite instructions
   - Convert measurements or units
   - Standardize formatting
   - Correct grammar or spelling
   - Add missing information

3. NO GUESSING: If information is not explicitly provided in the content:
   - Leave the field as null/empty
   - Do not infer or estimate values
   - Do not use placeholder text
   - Do not combine partial information to create complete entries

4. FOCUS ON RECIPE CONTENT ONLY: Look for:
   - Recipe title/name (usually in headings)
   - Ingredient lists (with exact quantities and descriptions)
   - Step-by-step cooking instructions
   - Cooking times, temperatures
   - Suggestions and/or hints
   - Recipe images (actual URLs, not placeholders)

5. PRESERVE ORIGINAL FORMAT:
   - Keep ingredients as separate list items exactly as listed
   - Maintain instruction steps as separate items
   - Preserve original wording and punctuation
   - Include quantities, measurements, and descriptive details as written

6. QUALITY CHECKS:
   - Ensure extracted content is actually recipe-related
   - Verify ingredient lists contain real ingredients, not navigation items
   - Confirm instructions are cooking steps, not website instructions
   - Only include image URLs that are actual recipe photos

Extract only what is clearly present and recipe-specific. When in doubt, omit the information rather than guess.
"#;

/// 提取前置条件错误
///
/// 提取例程只接受恰好一个文档，其他情况属于调用方违反契约。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("No documents provided")]
    NoDocuments,
    #[error("Multiple documents provided ({0}), expected exactly one")]
    MultipleDocuments(usize),
}

/// 构建提取提示：固定的系统指令加上文档原文
pub fn build_messages(document: &Document) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(document.page_content.clone()),
    ]
}

/// 从抓取的文档中提取结构化菜谱
///
/// # 参数
/// * `model` - 支持结构化输出的对话模型
/// * `documents` - 必须恰好包含一个文档
///
/// # 返回值
/// * `Ok(Some(Recipe))` - 提取成功
/// * `Ok(None)` - 模型调用或模式校验失败，错误已记录
///
/// # 错误
/// * 文档数量不为一时返回 `ExtractionError`，此时不会调用模型
pub async fn extract_schema(
    model: &dyn ChatModel,
    documents: &[Document],
) -> Result<Option<Recipe>, ExtractionError> {
    let document = match documents {
        [] => return Err(ExtractionError::NoDocuments),
        [document] => document,
        _ => return Err(ExtractionError::MultipleDocuments(documents.len())),
    };

    let source = document.original_url();
    let messages = build_messages(document);
    let schema = OutputSchema::of::<Recipe>(RECIPE_SCHEMA_NAME);

    info!("Extracting schema from {}", source);
    let value = match model.invoke_structured(&messages, &schema).await {
        Ok(value) => value,
        Err(e) => {
            error!("Error extracting schema from {}: {}", source, e);
            return Ok(None);
        }
    };

    match serde_json::from_value::<Recipe>(value) {
        Ok(recipe) => {
            info!("Extracted schema from {}", source);
            Ok(Some(recipe))
        }
        Err(e) => {
            error!(
                "Error extracting schema from {}: output does not match schema: {}",
                source, e
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "schema_extraction_test.rs"]
mod tests;
