// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// LLM 提供者模块
///
/// - OpenAI（openai）：OpenAI 及兼容接口的结构化输出模型
/// - Azure OpenAI（azure_openai）：Azure 部署，复用同一个模型实现
pub mod azure_openai;
pub mod openai;
