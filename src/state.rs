use crate::studio::Studio;
use std::sync::Arc;
use tokio::sync::Mutex;

// Application state shared with the frontend layer
#[derive(Clone)]
pub struct AppState {
    // A single lock serializes every operation, so there is one writer at a time.
    pub studio: Arc<Mutex<Studio>>,
}

impl AppState {
    pub fn new(studio: Studio) -> Self {
        Self {
            studio: Arc::new(Mutex::new(studio)),
        }
    }
}
