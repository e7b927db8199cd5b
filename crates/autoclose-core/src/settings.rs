//! User-configurable behavior.
//!
//! Settings are read-only to the engine and live for the editing session. Hosts typically
//! persist them as JSON:
//!
//! ```json
//! { "enabled": true, "batchSize": 50 }
//! ```

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use thiserror::Error;

/// Default number of rows the resolver's scan window grows by per step.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(n) => n,
    None => unreachable!(),
};

/// Errors produced while loading [`AutoCloseSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings document is not valid JSON or has a field of the wrong type
    /// (including a zero batch size).
    #[error("invalid autoclose settings: {0}")]
    Json(#[from] serde_json::Error),

    /// A batch size of zero was supplied programmatically.
    #[error("batch size must be a positive integer")]
    ZeroBatchSize,
}

/// Closing-tag completion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoCloseSettings {
    /// Whether `</` triggers completion at all.
    pub enabled: bool,
    /// Row-count increment for the resolver's backward scan.
    pub batch_size: NonZeroUsize,
}

impl Default for AutoCloseSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl AutoCloseSettings {
    /// Parse settings from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize settings to a JSON document.
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Set the batch size, rejecting zero.
    pub fn with_batch_size(mut self, batch_size: usize) -> Result<Self, SettingsError> {
        self.batch_size = NonZeroUsize::new(batch_size).ok_or(SettingsError::ZeroBatchSize)?;
        Ok(self)
    }

    /// Enable or disable completion.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Batch size as a plain row count.
    pub fn batch_rows(&self) -> usize {
        self.batch_size.get()
    }
}
