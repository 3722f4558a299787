// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含菜谱转笔记的用例编排
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含菜谱与文档模型、笔记应用接口和模式提取服务
pub mod domain;

/// 引擎模块
///
/// 实现网页抓取器
pub mod engines;

/// 基础设施模块
///
/// 提供外部服务集成，如 OpenAI、Azure OpenAI 和 Notion
pub mod infrastructure;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
