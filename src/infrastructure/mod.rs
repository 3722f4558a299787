// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 包含的子模块：
/// - LLM（llm）：OpenAI 与 Azure OpenAI 的模型提供者
/// - 笔记（notes）：Notion 笔记应用及其多语言标签
///
/// 基础设施层依赖于领域层的抽象接口。
pub mod llm;
pub mod notes;
