// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;

use crate::domain::models::document::Document;

/// 抓取器特质
///
/// 给定一个绝对URL，返回零个或多个内容文档。正常的抓取失败不应返回错误，
/// 而是记录日志并返回空列表；缺少凭据等配置问题应在构造时失败。
#[async_trait]
pub trait Scraper: Send + Sync {
    /// 执行抓取
    async fn scrape(&self, url: &str) -> Vec<Document>;

    /// 抓取器名称
    fn name(&self) -> &'static str;
}
