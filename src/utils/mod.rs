// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
/// 包括错误类型、HTML 文本提取、日志初始化和URL处理
pub mod errors;
pub mod html_text;
pub mod telemetry;
pub mod url_utils;
