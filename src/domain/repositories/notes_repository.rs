// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::recipe::EnrichedRecipe;

/// 笔记存储错误类型
#[derive(Error, Debug)]
pub enum NotesError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 笔记服务返回错误
    #[error("Notes API returned {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    /// 响应格式无效
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 笔记应用特质
///
/// 实现必须执行 upsert：按菜谱名称（缺失时使用本地化的"无标题"占位名）查找笔记，
/// 已存在则完整替换其属性和内容，否则新建。失败时记录足以定位笔记的上下文后返回错误。
#[async_trait]
pub trait NotesApp: Send + Sync {
    /// 根据补全后的菜谱创建或更新笔记
    async fn create_note(&self, recipe: &EnrichedRecipe) -> Result<(), NotesError>;
}
