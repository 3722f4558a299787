// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde_json::Value;
use spider_client::shapes::request::{ReturnFormat, ReturnFormatHandling};
use spider_client::{RequestParams, Spider};
use tracing::{error, info, warn};

use crate::domain::models::document::Document;
use crate::engines::traits::Scraper;
use crate::utils::errors::ConfigurationError;

/// Spider Cloud 抓取器
///
/// 通过 spider.cloud API 抓取页面，默认返回 markdown 格式的内容。
pub struct SpiderScraper {
    client: Spider,
    params: RequestParams,
}

impl SpiderScraper {
    /// 创建 Spider 抓取器
    ///
    /// # 参数
    ///
    /// * `api_key` - Spider API 密钥，缺失或为空时返回配置错误
    /// * `params` - 可选的请求参数，未设置返回格式时使用 markdown
    pub fn new(
        api_key: Option<String>,
        params: Option<RequestParams>,
    ) -> Result<Self, ConfigurationError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigurationError::MissingCredential("SPIDER_API_KEY"))?;

        let client = Spider::new(Some(api_key))
            .map_err(|e| ConfigurationError::Other(format!("Failed to create Spider client: {}", e)))?;

        let mut params = params.unwrap_or_default();
        if params.return_format.is_none() {
            params.return_format = Some(ReturnFormatHandling::Single(ReturnFormat::Markdown));
        }

        Ok(Self { client, params })
    }
}

#[async_trait]
impl Scraper for SpiderScraper {
    async fn scrape(&self, url: &str) -> Vec<Document> {
        info!("Scraping {}", url);
        let response = self
            .client
            .scrape_url(url, Some(self.params.clone()), "application/json")
            .await;

        match response {
            Ok(value) => {
                let documents = documents_from_response(value, url);
                info!("Scraped {} documents from {}", documents.len(), url);
                documents
            }
            Err(e) => {
                error!("Error scraping {}: {}", url, e);
                Vec::new()
            }
        }
    }

    fn name(&self) -> &'static str {
        "spider"
    }
}

/// 将 Spider 响应转换为文档列表
///
/// 响应可能是JSON数组、单个对象，或被编码为字符串的JSON。
/// 没有内容或带有错误信息的页面会被跳过。
pub fn documents_from_response(value: Value, original_url: &str) -> Vec<Document> {
    let parsed = match value {
        Value::String(s) => serde_json::from_str(&s).unwrap_or(Value::String(s)),
        other => other,
    };

    let pages = match parsed {
        Value::Array(pages) => pages,
        page @ Value::Object(_) => vec![page],
        other => {
            warn!("Unexpected Spider response for {}: {}", original_url, other);
            return Vec::new();
        }
    };

    pages
        .iter()
        .filter_map(|page| {
            if let Some(err) = page.get("error").and_then(Value::as_str) {
                if !err.is_empty() {
                    warn!("Spider reported error for {}: {}", original_url, err);
                    return None;
                }
            }

            let content = page.get("content").and_then(Value::as_str)?;
            if content.trim().is_empty() {
                return None;
            }

            let mut document = Document::new(content, original_url);
            if let Some(page_url) = page.get("url").and_then(Value::as_str) {
                document = document.with_metadata("url", page_url);
            }
            if let Some(status) = page.get("status").and_then(Value::as_i64) {
                document = document.with_metadata("status", status.to_string());
            }
            Some(document)
        })
        .collect()
}
