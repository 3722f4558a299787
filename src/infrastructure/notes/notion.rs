// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::settings::NotionSettings;
use crate::domain::models::recipe::EnrichedRecipe;
use crate::domain::repositories::notes_repository::{NotesApp, NotesError};
use crate::infrastructure::notes::labels::{Language, NoteLabels};
use crate::utils::errors::ConfigurationError;

/// Notion API 版本
pub const NOTION_VERSION: &str = "2022-06-28";

/// 标题属性名称
const TITLE_PROPERTY: &str = "Name";

/// 单个 rich_text 对象的最大字符数
const MAX_TEXT_LEN: usize = 2000;

/// 单次请求可提交的最大子块数量
const MAX_CHILDREN_PER_REQUEST: usize = 100;

/// Notion 笔记应用
///
/// 在构造时按名称解析目标数据库，之后以页面标题作为 upsert 的键：
/// 已存在的页面会被完整替换属性、封面和内容，否则新建页面。
pub struct NotionNotesApp {
    client: reqwest::Client,
    api_base_url: String,
    database_id: String,
    language: Language,
}

impl NotionNotesApp {
    /// 连接 Notion 并解析数据库ID
    ///
    /// # 错误
    ///
    /// * 令牌缺失或为空时返回 `ConfigurationError::MissingCredential`
    /// * 找不到同名数据库时返回 `ConfigurationError::DatabaseNotFound`
    pub async fn connect(settings: &NotionSettings) -> Result<Self, ConfigurationError> {
        let token = settings
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ConfigurationError::MissingCredential("NOTION_TOKEN"))?;

        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            ConfigurationError::InvalidValue {
                key: "notion.token",
                value: "<redacted>".to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert("Notion-Version", HeaderValue::from_static(NOTION_VERSION));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        let mut app = Self {
            client,
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            database_id: String::new(),
            language: Language::from_code(&settings.language),
        };
        app.database_id = app.find_database(&settings.database_name).await?;
        info!(
            "Using Notion database '{}' ({})",
            settings.database_name, app.database_id
        );

        Ok(app)
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    pub fn labels(&self) -> &'static NoteLabels {
        self.language.labels()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.api_base_url, path)
    }

    async fn find_database(&self, database_name: &str) -> Result<String, ConfigurationError> {
        let request = self.client.post(self.endpoint("search")).json(&json!({
            "query": database_name,
            "filter": { "property": "object", "value": "database" }
        }));
        let body = send(request)
            .await
            .map_err(|e| ConfigurationError::Other(format!("Notion search failed: {}", e)))?;

        let results = body["results"].as_array().cloned().unwrap_or_default();
        // Search is fuzzy; prefer an exact title match before taking the first hit.
        let exact = results
            .iter()
            .find(|db| database_title(db).as_deref() == Some(database_name));

        exact
            .or_else(|| results.first())
            .and_then(|db| db["id"].as_str())
            .map(str::to_string)
            .ok_or_else(|| ConfigurationError::DatabaseNotFound(database_name.to_string()))
    }

    /// 按标题查找页面，返回第一个匹配的页面ID
    async fn find_page(&self, page_name: &str) -> Result<Option<String>, NotesError> {
        let request = self
            .client
            .post(self.endpoint(&format!("databases/{}/query", self.database_id)))
            .json(&json!({
                "filter": {
                    "property": TITLE_PROPERTY,
                    "title": { "equals": page_name }
                }
            }));
        let body = send(request).await?;

        Ok(body["results"]
            .as_array()
            .and_then(|results| results.first())
            .and_then(|page| page["id"].as_str())
            .map(str::to_string))
    }

    async fn create_page(&self, recipe: &EnrichedRecipe) -> Result<String, NotesError> {
        let labels = self.labels();
        let children = page_content(recipe, labels);
        let mut batches = children.chunks(MAX_CHILDREN_PER_REQUEST);

        let mut payload = json!({
            "parent": { "database_id": self.database_id },
            "properties": page_properties(recipe, labels),
            "children": batches.next().unwrap_or(&[]),
        });
        if let Some(cover) = page_cover(recipe) {
            payload["cover"] = cover;
        }

        let page = send(self.client.post(self.endpoint("pages")).json(&payload)).await?;
        let page_id = page["id"]
            .as_str()
            .ok_or_else(|| NotesError::InvalidResponse("created page has no id".to_string()))?
            .to_string();

        for batch in batches {
            self.append_children(&page_id, batch).await?;
        }

        Ok(page_id)
    }

    async fn update_page(&self, page_id: &str, recipe: &EnrichedRecipe) -> Result<(), NotesError> {
        let labels = self.labels();
        let payload = json!({
            "properties": page_properties(recipe, labels),
            "cover": page_cover(recipe),
        });
        send(
            self.client
                .patch(self.endpoint(&format!("pages/{}", page_id)))
                .json(&payload),
        )
        .await?;

        let existing = self.list_children(page_id).await?;
        debug!("Removing {} blocks from page {}", existing.len(), page_id);
        for block_id in existing {
            send(self.client.delete(self.endpoint(&format!("blocks/{}", block_id)))).await?;
        }

        let children = page_content(recipe, labels);
        for batch in children.chunks(MAX_CHILDREN_PER_REQUEST) {
            self.append_children(page_id, batch).await?;
        }

        Ok(())
    }

    async fn list_children(&self, block_id: &str) -> Result<Vec<String>, NotesError> {
        let mut ids = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(self.endpoint(&format!("blocks/{}/children", block_id)))
                .query(&[("page_size", "100")]);
            if let Some(cursor) = &cursor {
                request = request.query(&[("start_cursor", cursor.as_str())]);
            }

            let body = send(request).await?;
            if let Some(results) = body["results"].as_array() {
                ids.extend(
                    results
                        .iter()
                        .filter_map(|block| block["id"].as_str())
                        .map(str::to_string),
                );
            }

            match (body["has_more"].as_bool(), body["next_cursor"].as_str()) {
                (Some(true), Some(next)) => cursor = Some(next.to_string()),
                _ => break,
            }
        }

        Ok(ids)
    }

    async fn append_children(&self, block_id: &str, children: &[Value]) -> Result<(), NotesError> {
        if children.is_empty() {
            return Ok(());
        }
        send(
            self.client
                .patch(self.endpoint(&format!("blocks/{}/children", block_id)))
                .json(&json!({ "children": children })),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl NotesApp for NotionNotesApp {
    async fn create_note(&self, recipe: &EnrichedRecipe) -> Result<(), NotesError> {
        let page_name = recipe.title_or(self.labels().untitled_recipe);

        let existing = self.find_page(page_name).await.map_err(|e| {
            error!("Failed to check if page '{}' exists: {}", page_name, e);
            e
        })?;

        match existing {
            Some(page_id) => {
                info!("Updating existing page '{}' with ID: {}", page_name, page_id);
                self.update_page(&page_id, recipe).await.map_err(|e| {
                    error!("Failed to update Notion page {}: {}", page_id, e);
                    e
                })?;
                info!("Successfully updated Notion page: {}", page_id);
            }
            None => {
                info!("Creating new page '{}'", page_name);
                let page_id = self.create_page(recipe).await.map_err(|e| {
                    error!("Failed to create Notion page '{}': {}", page_name, e);
                    e
                })?;
                info!("Successfully created Notion page: {}", page_id);
            }
        }

        Ok(())
    }
}

/// 发送请求并把非成功响应映射为 `NotesError::Api`
async fn send(request: RequestBuilder) -> Result<Value, NotesError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        return Err(NotesError::Api {
            status: status.as_u16(),
            code: body["code"].as_str().unwrap_or("unknown").to_string(),
            message: body["message"]
                .as_str()
                .map(str::to_string)
                .unwrap_or(text),
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| NotesError::InvalidResponse(e.to_string()))
}

fn database_title(database: &Value) -> Option<String> {
    database["title"].as_array().map(|parts| {
        parts
            .iter()
            .filter_map(|part| part["plain_text"].as_str())
            .collect::<String>()
    })
}

/// 构建 rich_text 数组，超长文本按字符切分
pub fn rich_text(content: &str) -> Value {
    let chars: Vec<char> = content.chars().collect();
    let parts: Vec<Value> = chars
        .chunks(MAX_TEXT_LEN)
        .map(|chunk| {
            json!({
                "type": "text",
                "text": { "content": chunk.iter().collect::<String>() }
            })
        })
        .collect();
    Value::Array(parts)
}

fn block(kind: &str, content: &str) -> Value {
    let mut value = json!({ "object": "block", "type": kind });
    value[kind] = json!({ "rich_text": rich_text(content) });
    value
}

/// 页面属性：标题和来源URL
pub fn page_properties(recipe: &EnrichedRecipe, labels: &NoteLabels) -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert(
        TITLE_PROPERTY.to_string(),
        json!({ "title": rich_text(recipe.title_or(labels.untitled_recipe)) }),
    );
    if !recipe.url.is_empty() {
        properties.insert(labels.url.to_string(), json!({ "url": recipe.url }));
    }
    Value::Object(properties)
}

/// 页面封面，仅在菜谱带有非空图片地址时设置
pub fn page_cover(recipe: &EnrichedRecipe) -> Option<Value> {
    recipe
        .recipe
        .image_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(|url| {
            json!({
                "type": "external",
                "external": { "url": url }
            })
        })
}

/// 页面内容块，只包含菜谱中存在的部分
pub fn page_content(recipe: &EnrichedRecipe, labels: &NoteLabels) -> Vec<Value> {
    let recipe = &recipe.recipe;
    let mut children = Vec::new();

    if let Some(ingredients) = recipe.ingredients.as_ref().filter(|i| !i.is_empty()) {
        children.push(block("heading_2", labels.ingredients));
        children.extend(
            ingredients
                .iter()
                .map(|ingredient| block("bulleted_list_item", ingredient)),
        );
    }

    if let Some(time) = recipe
        .cooking_time_temperature
        .as_deref()
        .filter(|t| !t.is_empty())
    {
        children.push(block("heading_2", labels.cooking_time_temperature));
        children.push(block("paragraph", time));
    }

    if let Some(instructions) = recipe.instructions.as_ref().filter(|i| !i.is_empty()) {
        children.push(block("heading_2", labels.instructions));
        children.extend(
            instructions
                .iter()
                .map(|step| block("numbered_list_item", step)),
        );
    }

    if let Some(hints) = recipe.hints.as_deref().filter(|h| !h.is_empty()) {
        children.push(block("heading_2", labels.hints));
        children.push(block("paragraph", hints));
    }

    children
}

#[cfg(test)]
#[path = "notion_test.rs"]
mod tests;
