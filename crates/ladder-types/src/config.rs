//! Configuration types for ranking engine instances.

use serde::{Deserialize, Serialize};

use crate::{LadderError, Result, constants};

/// Configuration for a single ranking engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Members per page for `get_leaders`, and the width of the
    /// around-me window. Must be > 0.
    pub page_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: constants::DEFAULT_PAGE_SIZE,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self { page_size }
    }

    /// Parse a config from a JSON document. Missing fields take defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations no engine can run with.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(LadderError::InvalidPageSize(self.page_size));
        }
        Ok(())
    }
}
