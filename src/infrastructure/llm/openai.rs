// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::domain::services::llm_service::{
    ChatMessage, ChatModel, LlmError, OutputSchema, SchemaExtractionProvider,
};
use crate::utils::errors::ConfigurationError;

/// OpenAI 默认 API 地址
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

/// 请求端点及认证方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEndpoint {
    /// OpenAI 兼容接口，`Authorization: Bearer` 认证
    OpenAi { api_base_url: String, model: String },
    /// Azure OpenAI 部署，`api-key` 头认证
    Azure {
        endpoint: String,
        deployment: String,
        api_version: String,
    },
}

impl ChatEndpoint {
    fn url(&self) -> String {
        match self {
            ChatEndpoint::OpenAi { api_base_url, .. } => {
                format!("{}/chat/completions", api_base_url.trim_end_matches('/'))
            }
            ChatEndpoint::Azure {
                endpoint,
                deployment,
                api_version,
            } => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                endpoint.trim_end_matches('/'),
                deployment,
                api_version
            ),
        }
    }

    fn model(&self) -> Option<&str> {
        match self {
            ChatEndpoint::OpenAi { model, .. } => Some(model),
            ChatEndpoint::Azure { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

/// OpenAI 对话模型
///
/// 使用 Chat Completions 的 `json_schema` 响应格式请求结构化输出，温度固定为 0。
pub struct OpenAiChatModel {
    client: reqwest::Client,
    api_key: String,
    endpoint: ChatEndpoint,
}

impl OpenAiChatModel {
    pub fn new(
        api_key: &str,
        endpoint: ChatEndpoint,
        timeout: Duration,
    ) -> Result<Self, ConfigurationError> {
        if api_key.trim().is_empty() {
            return Err(ConfigurationError::MissingCredential(match endpoint {
                ChatEndpoint::OpenAi { .. } => "OPENAI_API_KEY",
                ChatEndpoint::Azure { .. } => "AZURE_OPENAI_API_KEY",
            }));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.trim().to_string(),
            endpoint,
        })
    }

    /// 构建请求体
    pub fn request_body(&self, messages: &[ChatMessage], schema: &OutputSchema) -> Value {
        let mut body = json!({
            "messages": messages,
            "temperature": 0.0,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": schema.name,
                    "schema": schema.schema,
                    "strict": false
                }
            }
        });
        if let Some(model) = self.endpoint.model() {
            body["model"] = Value::String(model.to_string());
        }
        body
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn invoke_structured(
        &self,
        messages: &[ChatMessage],
        schema: &OutputSchema,
    ) -> Result<Value, LlmError> {
        let request = self.client.post(self.endpoint.url());
        let request = match self.endpoint {
            ChatEndpoint::OpenAi { .. } => request.bearer_auth(&self.api_key),
            ChatEndpoint::Azure { .. } => request.header("api-key", &self.api_key),
        };

        let response = request
            .json(&self.request_body(messages, schema))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let body: ChatResponse = response.json().await?;
        if let Some(usage) = &body.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "LLM token usage"
            );
        }

        let message = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| LlmError::InvalidResponse("no choices in response".to_string()))?;

        if let Some(refusal) = message.refusal.filter(|r| !r.is_empty()) {
            return Err(LlmError::InvalidResponse(format!("model refused: {}", refusal)));
        }

        let content = message
            .content
            .ok_or_else(|| LlmError::InvalidResponse("message has no content".to_string()))?;

        parse_structured_content(&content)
    }
}

/// 解析模型返回的 JSON，去除可能存在的 markdown 代码块标记
pub fn parse_structured_content(content: &str) -> Result<Value, LlmError> {
    let clean_content = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    Ok(serde_json::from_str::<Value>(clean_content)?)
}

/// OpenAI 模式提取提供者
pub struct OpenAiProvider {
    model: Arc<OpenAiChatModel>,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, model: &str) -> Result<Self, ConfigurationError> {
        Self::with_base_url(api_key, model, DEFAULT_API_BASE_URL, Duration::from_secs(60))
    }

    /// 使用自定义 API 地址（兼容 OpenAI 的服务）
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        api_base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ConfigurationError> {
        info!("Initializing OpenAI with model: {}", model);
        let endpoint = ChatEndpoint::OpenAi {
            api_base_url: api_base_url.to_string(),
            model: model.to_string(),
        };
        Ok(Self {
            model: Arc::new(OpenAiChatModel::new(api_key, endpoint, timeout)?),
        })
    }
}

impl SchemaExtractionProvider for OpenAiProvider {
    fn get_model(&self) -> Arc<dyn ChatModel> {
        self.model.clone()
    }
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
