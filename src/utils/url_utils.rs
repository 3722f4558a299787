// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 返回URL中第三个以 `/` 分隔的段，即 `scheme://` 之后的主机部分
///
/// 不做任何规范化：端口和用户信息会原样保留。段不存在或为空时返回 `None`。
pub fn domain_of(url: &str) -> Option<&str> {
    url.split('/').nth(2).filter(|segment| !segment.is_empty())
}
