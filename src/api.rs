use crate::generator;
use crate::models::{BrandContext, GenerationRequest, Template};
use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Mutex;

// Trait defining the interface for idea providers.
// A remote provider would introduce a real network round-trip here.
#[async_trait]
pub trait IdeaProvider: Send + Sync {
    async fn generate_ideas(
        &self,
        request: &GenerationRequest,
        template: &Template,
        context: &BrandContext,
    ) -> Result<Vec<String>>;

    fn name(&self) -> &str;
}

// --- Mock Provider Implementation ---

pub struct MockIdeaProvider {
    rng: Mutex<StdRng>,
}

impl MockIdeaProvider {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic provider for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for MockIdeaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdeaProvider for MockIdeaProvider {
    async fn generate_ideas(
        &self,
        request: &GenerationRequest,
        template: &Template,
        context: &BrandContext,
    ) -> Result<Vec<String>> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| anyhow::anyhow!("Mock provider random source is poisoned"))?;
        let ideas = generator::mock_ideas(request, template, context, &mut *rng);
        log::debug!(
            "Mock provider produced {} ideas for template '{}'",
            ideas.len(),
            template.name
        );
        Ok(ideas)
    }

    fn name(&self) -> &str {
        "MockIdeaProvider"
    }
}
