// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：菜谱、补全后的菜谱和抓取文档
/// - 仓库接口（repositories）：笔记应用的抽象接口
/// - 服务（services）：聊天模型契约和菜谱模式提取
///
/// 领域层不依赖于任何具体的抓取器、模型或笔记应用。
pub mod models;
pub mod repositories;
pub mod services;
