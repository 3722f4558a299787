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

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use futures::stream::{self, StreamExt};
use recipes_to_notes::application::use_cases::recipe_to_note::RecipeToNote;
use recipes_to_notes::config::settings::{LlmKind, ScraperKind, Settings};
use recipes_to_notes::domain::services::llm_service::SchemaExtractionProvider;
use recipes_to_notes::engines::reqwest_engine::ReqwestScraper;
use recipes_to_notes::engines::spider_engine::SpiderScraper;
use recipes_to_notes::engines::traits::Scraper;
use recipes_to_notes::infrastructure::llm::azure_openai::AzureOpenAiProvider;
use recipes_to_notes::infrastructure::llm::openai::OpenAiProvider;
use recipes_to_notes::infrastructure::notes::notion::NotionNotesApp;
use recipes_to_notes::utils::telemetry;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "recipes-to-notes",
    about = "Scrape recipe pages, extract them with an LLM and save them as Notion notes"
)]
struct Cli {
    /// Recipe page URLs
    #[arg(required = true, num_args = 1..)]
    urls: Vec<String>,
    /// Note language code (en, pl)
    #[arg(short, long)]
    language: Option<String>,
    /// Notion database name
    #[arg(short, long)]
    database: Option<String>,
    /// Scraper to use
    #[arg(long, value_enum)]
    scraper: Option<ScraperArg>,
    /// LLM provider to use
    #[arg(long, value_enum)]
    provider: Option<ProviderArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScraperArg {
    Spider,
    Reqwest,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderArg {
    Openai,
    Azure,
}

/// 主函数
///
/// 加载配置、构建协作者，并以有限并发处理所有URL
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    let t0 = Instant::now();
    let cli = Cli::parse();

    // 2. Load configuration
    let mut settings = Settings::new().context("Failed to load configuration")?;
    apply_cli_overrides(&mut settings, &cli);
    info!("Configuration loaded");

    // 3. Build collaborators
    let scraper = build_scraper(&settings)?;
    let provider = build_provider(&settings)?;
    let notes_app = NotionNotesApp::connect(&settings.notion)
        .await
        .context("Failed to connect to Notion")?;
    let pipeline = RecipeToNote::new(scraper, provider.as_ref(), Arc::new(notes_app));

    // 4. Process URLs
    let concurrency = settings.runner.concurrency.max(1);
    info!("Processing {} URLs (concurrency {})", cli.urls.len(), concurrency);

    let results: Vec<(String, bool)> = stream::iter(cli.urls.iter().cloned())
        .map(|url| {
            let mut pipeline = pipeline.clone();
            async move {
                pipeline.url(url.clone());
                match pipeline.run().await {
                    Ok(recipe) => {
                        info!("OK   {} -> {}", url, recipe.title_or("<untitled>"));
                        (url, true)
                    }
                    Err(e) => {
                        error!("FAIL {}: {}", url, e);
                        (url, false)
                    }
                }
            }
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    let failed: Vec<&str> = results
        .iter()
        .filter(|(_, ok)| !ok)
        .map(|(url, _)| url.as_str())
        .collect();
    info!(
        "Done: {} processed ({} ok, {} failed) in {:.1}s",
        results.len(),
        results.len() - failed.len(),
        failed.len(),
        t0.elapsed().as_secs_f64()
    );

    if !failed.is_empty() {
        bail!("{} URL(s) failed: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}

fn apply_cli_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(language) = &cli.language {
        settings.notion.language = language.clone();
    }
    if let Some(database) = &cli.database {
        settings.notion.database_name = database.clone();
    }
    if let Some(scraper) = cli.scraper {
        settings.scraper.provider = match scraper {
            ScraperArg::Spider => ScraperKind::Spider,
            ScraperArg::Reqwest => ScraperKind::Reqwest,
        };
    }
    if let Some(provider) = cli.provider {
        settings.set_llm_provider(match provider {
            ProviderArg::Openai => LlmKind::OpenAi,
            ProviderArg::Azure => LlmKind::Azure,
        });
    }
}

fn build_scraper(settings: &Settings) -> anyhow::Result<Arc<dyn Scraper>> {
    let scraper: Arc<dyn Scraper> = match settings.scraper.provider {
        ScraperKind::Spider => Arc::new(
            SpiderScraper::new(settings.scraper.spider_api_key.clone(), None)
                .context("Failed to initialize Spider scraper")?,
        ),
        ScraperKind::Reqwest => Arc::new(
            ReqwestScraper::new(
                Duration::from_secs(settings.scraper.timeout_secs),
                &settings.scraper.user_agent,
            )
            .context("Failed to initialize reqwest scraper")?,
        ),
    };
    info!("Using scraper: {}", scraper.name());
    Ok(scraper)
}

fn build_provider(settings: &Settings) -> anyhow::Result<Box<dyn SchemaExtractionProvider>> {
    let llm = &settings.llm;
    let api_key = llm.api_key.as_deref().unwrap_or_default();
    let timeout = Duration::from_secs(llm.timeout_secs);

    let provider: Box<dyn SchemaExtractionProvider> = match llm.provider {
        LlmKind::OpenAi => Box::new(
            OpenAiProvider::with_base_url(api_key, &llm.model, &llm.api_base_url, timeout)
                .context("Failed to initialize OpenAI provider")?,
        ),
        LlmKind::Azure => Box::new(
            AzureOpenAiProvider::with_timeout(
                llm.azure_endpoint.as_deref().unwrap_or_default(),
                api_key,
                llm.azure_deployment.as_deref().unwrap_or_default(),
                &llm.api_version,
                timeout,
            )
            .context("Failed to initialize Azure OpenAI provider")?,
        ),
    };
    Ok(provider)
}
