// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 配置错误类型
///
/// 在协作者构造时抛出，属于致命错误，从不重试。
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("缺少凭据: {0}")]
    MissingCredential(&'static str),

    #[error("未找到数据库: {0}")]
    DatabaseNotFound(String),

    #[error("无效配置 {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("HTTP客户端错误: {0}")]
    Http(#[from] reqwest::Error),

    #[error("初始化失败: {0}")]
    Other(String),
}
