// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::domain::services::llm_service::{ChatModel, SchemaExtractionProvider};
use crate::infrastructure::llm::openai::{ChatEndpoint, OpenAiChatModel};
use crate::utils::errors::ConfigurationError;

/// Azure OpenAI 模式提取提供者
pub struct AzureOpenAiProvider {
    model: Arc<OpenAiChatModel>,
}

impl AzureOpenAiProvider {
    pub fn new(
        azure_endpoint: &str,
        api_key: &str,
        azure_deployment: &str,
        api_version: &str,
    ) -> Result<Self, ConfigurationError> {
        Self::with_timeout(
            azure_endpoint,
            api_key,
            azure_deployment,
            api_version,
            Duration::from_secs(60),
        )
    }

    pub fn with_timeout(
        azure_endpoint: &str,
        api_key: &str,
        azure_deployment: &str,
        api_version: &str,
        timeout: Duration,
    ) -> Result<Self, ConfigurationError> {
        if azure_endpoint.trim().is_empty() {
            return Err(ConfigurationError::MissingCredential("AZURE_OPENAI_ENDPOINT"));
        }
        if azure_deployment.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue {
                key: "llm.azure_deployment",
                value: azure_deployment.to_string(),
            });
        }

        info!("Initializing Azure OpenAI with deployment: {}", azure_deployment);
        let endpoint = ChatEndpoint::Azure {
            endpoint: azure_endpoint.to_string(),
            deployment: azure_deployment.to_string(),
            api_version: api_version.to_string(),
        };
        Ok(Self {
            model: Arc::new(OpenAiChatModel::new(api_key, endpoint, timeout)?),
        })
    }
}

impl SchemaExtractionProvider for AzureOpenAiProvider {
    fn get_model(&self) -> Arc<dyn ChatModel> {
        self.model.clone()
    }
}
