// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::document::Document;
use crate::engines::traits::Scraper;
use crate::utils::errors::ConfigurationError;
use crate::utils::html_text::extract_page_text;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use url::Url;

/// 默认的 User-Agent
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; recipes-to-notes/0.1; +https://github.com/Kirky-X)";

/// 抓取器
///
/// 基于reqwest实现的直接HTTP抓取器，不依赖第三方抓取服务。
/// HTML会被转换为每块一行的纯文本。
pub struct ReqwestScraper {
    client: reqwest::Client,
}

impl ReqwestScraper {
    /// 创建抓取器
    ///
    /// # 参数
    ///
    /// * `timeout` - 单次请求超时时间
    /// * `user_agent` - 请求使用的 User-Agent
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ConfigurationError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    async fn fetch(&self, url: &str) -> Result<Option<(String, u16)>, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Scraping {} returned HTTP {}", url, status.as_u16());
            return Ok(None);
        }
        let body = response.text().await?;
        Ok(Some((body, status.as_u16())))
    }
}

#[async_trait]
impl Scraper for ReqwestScraper {
    /// 抓取页面并转换为单个文档
    ///
    /// 非成功状态码或传输错误只记录日志，返回空列表
    async fn scrape(&self, url: &str) -> Vec<Document> {
        info!("Scraping {}", url);
        let start = Instant::now();

        let (body, status) = match self.fetch(url).await {
            Ok(Some(page)) => page,
            Ok(None) => return Vec::new(),
            Err(e) => {
                error!("Error scraping {}: {}", url, e);
                return Vec::new();
            }
        };

        let base = Url::parse(url).ok();
        let page = extract_page_text(&body, base.as_ref());
        let title = page.title.clone();
        let content = page.into_content();
        if content.trim().is_empty() {
            warn!("No readable content found at {}", url);
            return Vec::new();
        }

        let mut document = Document::new(content, url)
            .with_metadata("status", status.to_string())
            .with_metadata("response_time_ms", start.elapsed().as_millis().to_string());
        if let Some(title) = title {
            document = document.with_metadata("title", title);
        }

        info!("Scraped 1 documents from {}", url);
        vec![document]
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
