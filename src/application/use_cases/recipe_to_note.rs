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

use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, info_span, Instrument};

use crate::{
    domain::{
        models::recipe::{EnrichedRecipe, EnrichmentError},
        repositories::notes_repository::{NotesApp, NotesError},
        services::{
            llm_service::{ChatModel, SchemaExtractionProvider},
            schema_extraction::{extract_schema, ExtractionError},
        },
    },
    engines::traits::Scraper,
    utils::url_utils,
};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No URL set, call url() before run()")]
    UrlNotSet,
    #[error("Invalid URL {0}: no host segment")]
    InvalidUrl(String),
    #[error("Schema extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("No recipe could be extracted from {url}")]
    NothingExtracted { url: String },
    #[error("Note creation failed: {0}")]
    Persistence(#[from] NotesError),
}

/// 流水线阶段，严格按顺序推进
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Configured,
    Scraped,
    SchemaExtracted,
    NoteCreated,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Configured => "configured",
            PipelineStage::Scraped => "scraped",
            PipelineStage::SchemaExtracted => "schema_extracted",
            PipelineStage::NoteCreated => "note_created",
        };
        f.write_str(name)
    }
}

/// 菜谱转笔记用例
///
/// 持有抓取器、模型和笔记应用各一个实例，对单个URL执行
/// 抓取 → 模式提取 → 补全并保存。阶段之间不并发，也不重试；
/// 任一阶段失败都会返回给 `run()` 的调用方。
#[derive(Clone)]
pub struct RecipeToNote {
    scraper: Arc<dyn Scraper>,
    model: Arc<dyn ChatModel>,
    notes_app: Arc<dyn NotesApp>,
    pending_url: Option<String>,
}

impl RecipeToNote {
    /// 绑定协作者，并立即向提供者获取一次模型句柄
    pub fn new(
        scraper: Arc<dyn Scraper>,
        schema_extraction_provider: &dyn SchemaExtractionProvider,
        notes_app: Arc<dyn NotesApp>,
    ) -> Self {
        Self {
            scraper,
            model: schema_extraction_provider.get_model(),
            notes_app,
            pending_url: None,
        }
    }

    /// 设置下一次运行的目标URL，重复调用时以最后一次为准
    pub fn url(&mut self, value: impl Into<String>) -> &mut Self {
        self.pending_url = Some(value.into());
        self
    }

    pub fn pending_url(&self) -> Option<&str> {
        self.pending_url.as_deref()
    }

    /// 执行完整流水线
    ///
    /// # 返回值
    ///
    /// * `Ok(EnrichedRecipe)` - 已写入笔记应用的菜谱
    /// * `Err(PipelineError)` - 任一阶段失败；抓取为空或提取为空时不会调用笔记应用
    pub async fn run(&self) -> Result<EnrichedRecipe, PipelineError> {
        let url = self.pending_url.as_deref().ok_or(PipelineError::UrlNotSet)?;
        if url_utils::domain_of(url).is_none() {
            return Err(PipelineError::InvalidUrl(url.to_string()));
        }

        self.execute(url)
            .instrument(info_span!("recipe_to_note", url = %url))
            .await
    }

    async fn execute(&self, url: &str) -> Result<EnrichedRecipe, PipelineError> {
        let mut stage = PipelineStage::Configured;
        debug!(%stage, scraper = self.scraper.name(), "Starting pipeline");

        let documents = self.scraper.scrape(url).await;
        stage = PipelineStage::Scraped;
        debug!(%stage, documents = documents.len());

        let recipe = extract_schema(self.model.as_ref(), &documents)
            .await?
            .ok_or_else(|| PipelineError::NothingExtracted {
                url: url.to_string(),
            })?;
        stage = PipelineStage::SchemaExtracted;
        debug!(%stage, name = ?recipe.name);

        let enriched = EnrichedRecipe::from_recipe(recipe, url).map_err(
            |EnrichmentError::MissingDomain(url)| PipelineError::InvalidUrl(url),
        )?;
        self.notes_app.create_note(&enriched).await?;
        stage = PipelineStage::NoteCreated;
        info!(%stage, domain = %enriched.domain, "Recipe saved as note");

        Ok(enriched)
    }
}

#[cfg(test)]
#[path = "recipe_to_note_test.rs"]
mod tests;
