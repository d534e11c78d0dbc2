use std::sync::Arc;

use crate::config::Config;
use content_service::ContentService;
use gemini::GeminiProvider;
use provider::ContentProvider;

pub struct AppState {
    pub config: Config,
    pub content: ContentService,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        tracing::info!(
            "Initializing Gemini provider: model={}, base_url={}",
            config.provider.model,
            config.provider.base_url
        );
        let provider = GeminiProvider::new(&config.provider)?;
        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    /// The server never memoizes: every request reaches the provider.
    pub fn with_provider(config: Config, provider: Arc<dyn ContentProvider>) -> Self {
        Self {
            config,
            content: ContentService::new(provider),
        }
    }
}

pub mod content_cache;
pub mod content_service;
pub mod gemini;
pub mod lesson_renderer;
pub mod prompts;
pub mod provider;
pub mod quiz_parser;
