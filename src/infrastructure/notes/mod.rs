// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 笔记应用模块
///
/// - 标签（labels）：笔记段落标题的多语言表
/// - Notion（notion）：基于 Notion API 的笔记应用实现
pub mod labels;
pub mod notion;
