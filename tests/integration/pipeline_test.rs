// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{InMemoryNotes, KeywordModel, StaticProvider, StaticScraper};
use futures::stream::{self, StreamExt};
use recipes_to_notes::application::use_cases::recipe_to_note::{PipelineError, RecipeToNote};
use recipes_to_notes::domain::services::schema_extraction::ExtractionError;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

const PASTA_URL: &str = "https://cooking.example/pasta";
const SOUP_URL: &str = "https://www.soups.example/recipes/tomato";

struct Fixture {
    scraper: Arc<StaticScraper>,
    model: Arc<KeywordModel>,
    notes: Arc<InMemoryNotes>,
    pipeline: RecipeToNote,
}

fn fixture(scraper: StaticScraper, model: KeywordModel) -> Fixture {
    let scraper = Arc::new(scraper);
    let model = Arc::new(model);
    let notes = Arc::new(InMemoryNotes::default());
    let pipeline = RecipeToNote::new(
        scraper.clone(),
        &StaticProvider(model.clone()),
        notes.clone(),
    );
    Fixture {
        scraper,
        model,
        notes,
        pipeline,
    }
}

fn pasta_scraper() -> StaticScraper {
    StaticScraper::default().with_page(PASTA_URL, "Pasta: boil water, add pasta, 10 minutes.")
}

fn pasta_model() -> KeywordModel {
    KeywordModel::default().answer(
        "Pasta",
        json!({
            "name": "Pasta",
            "instructions": ["boil water", "add pasta"],
            "cooking_time_temperature": "10 minutes"
        }),
    )
}

#[tokio::test]
async fn test_pasta_page_becomes_one_note() {
    let mut f = fixture(pasta_scraper(), pasta_model());

    f.pipeline.url(PASTA_URL);
    let enriched = f.pipeline.run().await.unwrap();

    assert_eq!(enriched.domain, "cooking.example");
    assert_eq!(f.notes.len(), 1);
    let stored = f.notes.get("Pasta").unwrap();
    assert_eq!(stored.url, PASTA_URL);
    assert_eq!(stored.domain, "cooking.example");
    assert_eq!(
        stored.recipe.instructions,
        Some(vec!["boil water".to_string(), "add pasta".to_string()])
    );
    assert_eq!(stored.recipe.cooking_time_temperature.as_deref(), Some("10 minutes"));
    assert_eq!(stored.recipe.ingredients, None);
    assert_eq!(f.scraper.calls.load(Ordering::SeqCst), 1);
    assert_eq!(f.model.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_rerun_with_same_name_replaces_note() {
    let model = KeywordModel::default()
        .answer("first", json!({ "name": "Pasta", "hints": "use salt" }))
        .answer("second", json!({ "name": "Pasta", "hints": "use more salt" }));
    let scraper = StaticScraper::default()
        .with_page(PASTA_URL, "Pasta, first version")
        .with_page("https://cooking.example/pasta-v2", "Pasta, second version");
    let mut f = fixture(scraper, model);

    f.pipeline.url(PASTA_URL);
    f.pipeline.run().await.unwrap();
    f.pipeline.url("https://cooking.example/pasta-v2");
    f.pipeline.run().await.unwrap();

    assert_eq!(f.notes.len(), 1);
    assert_eq!(f.notes.writes.load(Ordering::SeqCst), 2);
    let stored = f.notes.get("Pasta").unwrap();
    assert_eq!(stored.recipe.hints.as_deref(), Some("use more salt"));
    assert_eq!(stored.url, "https://cooking.example/pasta-v2");
}

#[tokio::test]
async fn test_unscrapable_page_leaves_notes_untouched() {
    let mut f = fixture(StaticScraper::default(), pasta_model());

    f.pipeline.url(PASTA_URL);
    let err = f.pipeline.run().await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Extraction(ExtractionError::NoDocuments)
    ));
    assert_eq!(f.model.calls.load(Ordering::SeqCst), 0);
    assert_eq!(f.notes.writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failed_extraction_leaves_notes_untouched() {
    let scraper = StaticScraper::default().with_page(PASTA_URL, "Just a blog post");
    let mut f = fixture(scraper, pasta_model());

    f.pipeline.url(PASTA_URL);
    let err = f.pipeline.run().await.unwrap_err();

    assert!(matches!(err, PipelineError::NothingExtracted { .. }));
    assert_eq!(f.model.calls.load(Ordering::SeqCst), 1);
    assert_eq!(f.notes.writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_cloned_pipelines_process_urls_concurrently() {
    let scraper = pasta_scraper().with_page(SOUP_URL, "Tomato soup: blend tomatoes.");
    let model = pasta_model().answer("Tomato", json!({ "name": "Tomato soup" }));
    let f = fixture(scraper, model);
    let urls = vec![
        PASTA_URL.to_string(),
        SOUP_URL.to_string(),
        "https://missing.example/nothing".to_string(),
    ];

    let results: Vec<(String, bool)> = stream::iter(urls)
        .map(|url| {
            let mut pipeline = f.pipeline.clone();
            async move {
                pipeline.url(url.clone());
                let ok = pipeline.run().await.is_ok();
                (url, ok)
            }
        })
        .buffer_unordered(2)
        .collect()
        .await;

    assert_eq!(results.len(), 3);
    assert_eq!(results.iter().filter(|(_, ok)| *ok).count(), 2);
    assert_eq!(f.notes.len(), 2);
    assert_eq!(f.notes.get("Tomato soup").unwrap().domain, "www.soups.example");
    assert_eq!(f.scraper.calls.load(Ordering::SeqCst), 3);
}
