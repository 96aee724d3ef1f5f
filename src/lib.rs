// Declare the modules
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod seed;
pub mod state;
pub mod storage;
pub mod studio;

use crate::api::{IdeaProvider, MockIdeaProvider};
use config::StudioConfig;
use state::AppState;
use std::sync::Arc;
use storage::StorageManager;
use studio::Studio;

pub use error::{Result, StudioError};

/// Installs the `env_logger` backend, defaulting to `info`. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Connects storage, loads persisted state and wraps it for the frontend.
pub async fn bootstrap(config: &StudioConfig) -> anyhow::Result<AppState> {
    let storage_manager = StorageManager::new(config).await?;

    // Generation always takes the mock path, whatever the provider settings say.
    let provider: Arc<dyn IdeaProvider> = Arc::new(MockIdeaProvider::new());

    let studio = Studio::load(storage_manager, provider).await;
    Ok(AppState::new(studio))
}
