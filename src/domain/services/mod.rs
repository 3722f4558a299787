// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - LLM服务（llm_service）：聊天模型与模型提供者的契约
/// - 模式提取（schema_extraction）：从单个文档中提取结构化菜谱
pub mod llm_service;
pub mod schema_extraction;
