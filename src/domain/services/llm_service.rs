// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// LLM错误类型
#[derive(Error, Debug)]
pub enum LlmError {
    /// 请求失败
    #[error("Request to LLM API failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// API返回非成功状态
    #[error("LLM API returned error: {status} - {body}")]
    Api { status: u16, body: String },
    /// 响应格式无效
    #[error("Invalid response format from LLM API: {0}")]
    InvalidResponse(String),
    /// 结构化输出不是合法JSON
    #[error("Failed to parse structured output: {0}")]
    Json(#[from] serde_json::Error),
}

/// 消息角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// 对话消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// 结构化输出的目标模式
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    /// 模式名称，供应商要求 `^[a-zA-Z0-9_-]+$`
    pub name: String,
    /// JSON Schema
    pub schema: Value,
}

impl OutputSchema {
    /// 从实现了 `JsonSchema` 的类型生成输出模式
    pub fn of<T: JsonSchema>(name: &str) -> Self {
        let schema = serde_json::to_value(schemars::schema_for!(T)).unwrap_or(Value::Null);
        Self {
            name: name.to_string(),
            schema,
        }
    }
}

/// 对话模型特质
///
/// 接受一组提示消息和目标模式，返回符合该模式的 JSON 值。
/// 调用方负责把返回值反序列化为具体类型。
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn invoke_structured(
        &self,
        messages: &[ChatMessage],
        schema: &OutputSchema,
    ) -> Result<Value, LlmError>;
}

/// 模式提取提供者特质
///
/// 编排器在构造时调用一次 `get_model`，之后每次运行复用同一个模型句柄。
pub trait SchemaExtractionProvider: Send + Sync {
    fn get_model(&self) -> Arc<dyn ChatModel>;
}
