// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use recipes_to_notes::domain::models::document::Document;
use recipes_to_notes::domain::models::recipe::EnrichedRecipe;
use recipes_to_notes::domain::repositories::notes_repository::{NotesApp, NotesError};
use recipes_to_notes::domain::services::llm_service::{
    ChatMessage, ChatModel, LlmError, OutputSchema, SchemaExtractionProvider,
};
use recipes_to_notes::engines::traits::Scraper;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// 按URL返回固定内容的抓取器，未知URL返回空结果
#[derive(Default)]
pub struct StaticScraper {
    pages: HashMap<String, String>,
    pub calls: AtomicUsize,
}

impl StaticScraper {
    pub fn with_page(mut self, url: &str, content: &str) -> Self {
        self.pages.insert(url.to_string(), content.to_string());
        self
    }
}

#[async_trait]
impl Scraper for StaticScraper {
    async fn scrape(&self, url: &str) -> Vec<Document> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(url)
            .map(|content| vec![Document::new(content.clone(), url)])
            .unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// 按页面内容中的关键字返回预设 JSON 的模型
///
/// 没有匹配的关键字时返回错误。
#[derive(Default)]
pub struct KeywordModel {
    answers: Vec<(String, Value)>,
    pub calls: AtomicUsize,
}

impl KeywordModel {
    pub fn answer(mut self, keyword: &str, value: Value) -> Self {
        self.answers.push((keyword.to_string(), value));
        self
    }
}

#[async_trait]
impl ChatModel for KeywordModel {
    async fn invoke_structured(
        &self,
        messages: &[ChatMessage],
        _schema: &OutputSchema,
    ) -> Result<Value, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let content = messages.last().map(|m| m.content.as_str()).unwrap_or_default();
        self.answers
            .iter()
            .find(|(keyword, _)| content.contains(keyword.as_str()))
            .map(|(_, value)| value.clone())
            .ok_or_else(|| LlmError::InvalidResponse("no answer".to_string()))
    }
}

pub struct StaticProvider(pub Arc<dyn ChatModel>);

impl SchemaExtractionProvider for StaticProvider {
    fn get_model(&self) -> Arc<dyn ChatModel> {
        self.0.clone()
    }
}

/// 以标题为键的内存笔记应用
#[derive(Default)]
pub struct InMemoryNotes {
    notes: Mutex<HashMap<String, EnrichedRecipe>>,
    pub writes: AtomicUsize,
}

impl InMemoryNotes {
    pub fn len(&self) -> usize {
        self.notes.lock().unwrap().len()
    }

    pub fn get(&self, title: &str) -> Option<EnrichedRecipe> {
        self.notes.lock().unwrap().get(title).cloned()
    }
}

#[async_trait]
impl NotesApp for InMemoryNotes {
    async fn create_note(&self, recipe: &EnrichedRecipe) -> Result<(), NotesError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let title = recipe.title_or("Untitled Recipe").to_string();
        self.notes.lock().unwrap().insert(title, recipe.clone());
        Ok(())
    }
}
