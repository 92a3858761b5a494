//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    CorpusConfig, EmbeddingConfig, ObservabilityConfig, RetrievalConfig, SegmentationConfig,
    StorageConfig,
};
use crate::errors::ConfigError;

/// Env var overriding `storage.db_path`.
pub const ENV_DB_PATH: &str = "AUDIENCE_DB_PATH";
/// Env var overriding `corpus.path`.
pub const ENV_CORPUS_PATH: &str = "AUDIENCE_CORPUS_PATH";
/// Env var overriding `retrieval.default_top_k`.
pub const ENV_TOP_K: &str = "AUDIENCE_TOP_K";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`AUDIENCE_*`)
/// 2. Config file passed to [`AudienceConfig::load`]
/// 3. Compiled defaults
///
/// Tier tables (`[segmentation.primary]`, `[segmentation.secondary]`) must
/// list all three parameters when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AudienceConfig {
    pub storage: StorageConfig,
    pub corpus: CorpusConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub segmentation: SegmentationConfig,
    pub observability: ObservabilityConfig,
}

impl AudienceConfig {
    /// Load configuration from an optional TOML file, then apply env overrides
    /// and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    })?;
                toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?
            }
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string and validate it.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration for tests: in-memory index, defaults elsewhere.
    pub fn in_memory() -> Self {
        let mut config = Self::default();
        config.storage.in_memory = true;
        config
    }

    /// Apply `AUDIENCE_*` overrides. `lookup` resolves a variable name.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(db_path) = lookup(ENV_DB_PATH) {
            self.storage.db_path = db_path;
        }
        if let Some(corpus_path) = lookup(ENV_CORPUS_PATH) {
            self.corpus.path = corpus_path;
        }
        if let Some(top_k) = lookup(ENV_TOP_K) {
            self.retrieval.default_top_k =
                top_k.trim().parse().map_err(|_| ConfigError::ValidationFailed {
                    field: ENV_TOP_K.to_string(),
                    message: format!("expected a positive integer, got {top_k:?}"),
                })?;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.storage.in_memory && self.storage.db_path.trim().is_empty() {
            return Err(invalid("storage.db_path", "must not be empty"));
        }
        if !(1..=8).contains(&self.storage.read_pool_size) {
            return Err(invalid("storage.read_pool_size", "must be between 1 and 8"));
        }
        if self.embedding.dimensions == 0 {
            return Err(invalid("embedding.dimensions", "must be greater than 0"));
        }
        if self.retrieval.default_top_k == 0 {
            return Err(invalid("retrieval.default_top_k", "must be greater than 0"));
        }
        if !self.retrieval.semantic_scale.is_finite() || self.retrieval.semantic_scale < 0.0 {
            return Err(invalid("retrieval.semantic_scale", "must be a non-negative number"));
        }
        let seg = &self.segmentation;
        if seg.segment_size == 0 {
            return Err(invalid("segmentation.segment_size", "must be greater than 0"));
        }
        if !(seg.income_sensitivity > 0.0) {
            return Err(invalid(
                "segmentation.income_sensitivity",
                "must be greater than 0",
            ));
        }
        for (name, tier) in [("primary", &seg.primary), ("secondary", &seg.secondary)] {
            if !(0.0..=1.0).contains(&tier.conversion_rate) {
                return Err(invalid(
                    &format!("segmentation.{name}.conversion_rate"),
                    "must be between 0.0 and 1.0",
                ));
            }
            if !(0.0..=1.0).contains(&tier.confidence) {
                return Err(invalid(
                    &format!("segmentation.{name}.confidence"),
                    "must be between 0.0 and 1.0",
                ));
            }
            if tier.base_reach < 0.0 {
                return Err(invalid(
                    &format!("segmentation.{name}.base_reach"),
                    "must not be negative",
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
