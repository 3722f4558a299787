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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含抓取器、LLM、Notion 和运行器的所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 抓取器配置
    pub scraper: ScraperSettings,
    /// LLM配置
    pub llm: LlmSettings,
    /// Notion配置
    pub notion: NotionSettings,
    /// 运行器配置
    pub runner: RunnerSettings,
}

/// 抓取器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScraperKind {
    Spider,
    Reqwest,
}

/// 抓取器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    /// 使用的抓取器
    pub provider: ScraperKind,
    /// Spider API 密钥
    pub spider_api_key: Option<String>,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 直接抓取时使用的 User-Agent
    pub user_agent: String,
}

/// LLM提供者类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmKind {
    OpenAi,
    Azure,
}

impl LlmKind {
    /// 该提供者常用的 API 密钥环境变量
    pub fn api_key_var(&self) -> &'static str {
        match self {
            LlmKind::OpenAi => "OPENAI_API_KEY",
            LlmKind::Azure => "AZURE_OPENAI_API_KEY",
        }
    }
}

/// LLM配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// 使用的提供者
    pub provider: LlmKind,
    /// API 密钥
    pub api_key: Option<String>,
    /// 模型名称（OpenAI）
    pub model: String,
    /// API 基础URL（OpenAI 及兼容服务）
    pub api_base_url: String,
    /// Azure 端点
    pub azure_endpoint: Option<String>,
    /// Azure 部署名称
    pub azure_deployment: Option<String>,
    /// Azure API 版本
    pub api_version: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

/// Notion配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct NotionSettings {
    /// 集成令牌
    pub token: Option<String>,
    /// 目标数据库名称
    pub database_name: String,
    /// 笔记语言代码
    pub language: String,
    /// API 基础URL
    pub api_base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

/// 运行器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerSettings {
    /// 同时处理的URL数量
    pub concurrency: usize,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 按以下顺序加载，后者覆盖前者：默认值、`config/default`、
    /// `config/{APP_ENVIRONMENT}`、`RECIPES_TO_NOTES__*` 环境变量，
    /// 以及 `SPIDER_API_KEY`、`NOTION_TOKEN` 等常用凭据变量。
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("RECIPES_TO_NOTES").separator("__"));

        Self::load(builder)
    }

    /// 在已分层的配置上叠加凭据变量并反序列化
    ///
    /// LLM 密钥变量按合并后的 `llm.provider` 选择。
    fn load(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let provider: LlmKind = builder.build_cloned()?.get("llm.provider")?;
        let builder = Self::with_credential_overrides(builder, provider)?;
        builder.build()?.try_deserialize()
    }

    /// 切换 LLM 提供者，并在对应的密钥变量已设置时使用它
    pub fn set_llm_provider(&mut self, provider: LlmKind) {
        self.llm.provider = provider;
        if let Some(key) = non_empty_var(provider.api_key_var()) {
            self.llm.api_key = Some(key);
        }
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            // Default scraper settings
            .set_default("scraper.provider", "spider")?
            .set_default("scraper.timeout_secs", 30)?
            .set_default(
                "scraper.user_agent",
                crate::engines::reqwest_engine::DEFAULT_USER_AGENT,
            )?
            // Default LLM settings
            .set_default("llm.provider", "openai")?
            .set_default("llm.model", "gpt-4o-mini")?
            .set_default(
                "llm.api_base_url",
                crate::infrastructure::llm::openai::DEFAULT_API_BASE_URL,
            )?
            .set_default("llm.api_version", "2024-08-01-preview")?
            .set_default("llm.timeout_secs", 60)?
            // Default Notion settings
            .set_default("notion.database_name", "Recipes")?
            .set_default("notion.language", "en")?
            .set_default("notion.api_base_url", "https://api.notion.com")?
            .set_default("notion.timeout_secs", 30)?
            // Default runner settings
            .set_default("runner.concurrency", 4)
    }

    /// 常用凭据变量，仅在已设置时覆盖
    fn with_credential_overrides(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        provider: LlmKind,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_override_option("scraper.spider_api_key", non_empty_var("SPIDER_API_KEY"))?
            .set_override_option("notion.token", non_empty_var("NOTION_TOKEN"))?
            .set_override_option("llm.api_key", non_empty_var(provider.api_key_var()))?
            .set_override_option("llm.azure_endpoint", non_empty_var("AZURE_OPENAI_ENDPOINT"))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
