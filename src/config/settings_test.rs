// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;

fn defaults_only() -> Settings {
    Settings::with_defaults(Config::builder())
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap()
}

#[test]
fn test_defaults_deserialize() {
    let settings = defaults_only();

    assert_eq!(settings.scraper.provider, ScraperKind::Spider);
    assert_eq!(settings.scraper.timeout_secs, 30);
    assert!(settings.scraper.spider_api_key.is_none());

    assert_eq!(settings.llm.provider, LlmKind::OpenAi);
    assert_eq!(settings.llm.model, "gpt-4o-mini");
    assert_eq!(settings.llm.api_base_url, "https://api.openai.com/v1");
    assert_eq!(settings.llm.api_version, "2024-08-01-preview");
    assert!(settings.llm.api_key.is_none());

    assert_eq!(settings.notion.database_name, "Recipes");
    assert_eq!(settings.notion.language, "en");
    assert_eq!(settings.notion.api_base_url, "https://api.notion.com");

    assert_eq!(settings.runner.concurrency, 4);
}

#[test]
fn test_environment_overrides_defaults() {
    std::env::set_var("RECIPES_TO_NOTES__NOTION__LANGUAGE", "pl");
    std::env::set_var("RECIPES_TO_NOTES__SCRAPER__PROVIDER", "reqwest");

    let settings = Settings::new();

    std::env::remove_var("RECIPES_TO_NOTES__NOTION__LANGUAGE");
    std::env::remove_var("RECIPES_TO_NOTES__SCRAPER__PROVIDER");

    let settings = settings.unwrap();
    assert_eq!(settings.notion.language, "pl");
    assert_eq!(settings.scraper.provider, ScraperKind::Reqwest);
}

#[test]
fn test_unknown_provider_is_rejected() {
    let result = Settings::with_defaults(Config::builder())
        .unwrap()
        .set_override("llm.provider", "anthropic")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize::<Settings>();
    assert!(result.is_err());
}

#[test]
fn test_empty_variable_is_ignored() {
    assert!(non_empty_var("RECIPES_TO_NOTES_TEST_SURELY_UNSET_VARIABLE").is_none());
}

#[test]
fn test_llm_key_follows_resolved_provider() {
    std::env::set_var("AZURE_OPENAI_API_KEY", "azure-key-from-env");

    let from_config = Settings::load(
        Settings::with_defaults(Config::builder())
            .unwrap()
            .set_override("llm.provider", "azure")
            .unwrap(),
    );

    let mut switched = defaults_only();
    switched.set_llm_provider(LlmKind::Azure);

    std::env::remove_var("AZURE_OPENAI_API_KEY");

    let from_config = from_config.unwrap();
    assert_eq!(from_config.llm.provider, LlmKind::Azure);
    assert_eq!(from_config.llm.api_key.as_deref(), Some("azure-key-from-env"));

    assert_eq!(switched.llm.provider, LlmKind::Azure);
    assert_eq!(switched.llm.api_key.as_deref(), Some("azure-key-from-env"));
}

#[test]
fn test_api_key_variable_per_provider() {
    assert_eq!(LlmKind::OpenAi.api_key_var(), "OPENAI_API_KEY");
    assert_eq!(LlmKind::Azure.api_key_var(), "AZURE_OPENAI_API_KEY");
}
