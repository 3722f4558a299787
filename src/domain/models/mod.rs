// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 文档（document）：抓取器产出的页面内容及元数据
/// - 菜谱（recipe）：模型提取出的菜谱及补全了来源信息的菜谱
pub mod document;
pub mod recipe;
