//! Ordered provider fallback.
//!
//! Providers are tried in priority order; when a later provider serves a
//! request a `DegradationEvent` is recorded for the caller to drain.

use audience_core::errors::{AudienceResult, EmbeddingError};
use audience_core::models::DegradationEvent;
use audience_core::traits::IEmbeddingProvider;
use tracing::warn;

const COMPONENT: &str = "embeddings";

#[derive(Default)]
pub struct DegradationChain {
    providers: Vec<Box<dyn IEmbeddingProvider>>,
    events: Vec<DegradationEvent>,
}

impl DegradationChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider with lower priority than those already present.
    pub fn push(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.providers.push(provider);
    }

    /// Record a degradation noticed outside the chain, such as a
    /// misconfigured provider name.
    pub fn record(&mut self, event: DegradationEvent) {
        self.events.push(event);
    }

    /// Embed with the first provider that succeeds. Returns the provider name.
    pub fn embed(&mut self, text: &str) -> AudienceResult<(Vec<f32>, String)> {
        self.run(|p| p.embed(text))
    }

    pub fn embed_batch(&mut self, texts: &[String]) -> AudienceResult<(Vec<Vec<f32>>, String)> {
        self.run(|p| p.embed_batch(texts))
    }

    fn run<T, F>(&mut self, f: F) -> AudienceResult<(T, String)>
    where
        F: Fn(&dyn IEmbeddingProvider) -> AudienceResult<T>,
    {
        let mut last_error = None;
        for (i, provider) in self.providers.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }
            match f(provider.as_ref()) {
                Ok(value) => {
                    let name = provider.name().to_string();
                    if i > 0 {
                        let primary = self.providers[0].name().to_string();
                        self.events.push(DegradationEvent::now(
                            COMPONENT,
                            format!("{primary} failed or unavailable"),
                            name.clone(),
                        ));
                    }
                    return Ok((value, name));
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "embedding provider failed, trying next");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: "all providers exhausted".to_string(),
            }
            .into()
        }))
    }

    /// Name of the first available provider.
    pub fn active_provider_name(&self) -> &str {
        self.providers
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    pub fn drain_events(&mut self) -> Vec<DegradationEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
