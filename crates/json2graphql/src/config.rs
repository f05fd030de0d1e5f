//! Schema assembly options.
//!
//! Options only shape the assembled artifact (query limits, introspection);
//! they never change how declarations are resolved.

use serde::{Deserialize, Serialize};

/// Options applied when assembling the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaOptions {
    /// Maximum query depth allowed by the engine. Unlimited when absent.
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Maximum query complexity allowed by the engine. Unlimited when absent.
    #[serde(default)]
    pub max_complexity: Option<usize>,

    /// Enable introspection queries.
    /// Default: true (development-friendly)
    #[serde(default = "default_introspection")]
    pub introspection: bool,
}

fn default_introspection() -> bool {
    true
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            max_complexity: None,
            introspection: default_introspection(),
        }
    }
}

impl SchemaOptions {
    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns an error if option values are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == Some(0) {
            return Err("max_depth must be > 0 when set".into());
        }
        if self.max_complexity == Some(0) {
            return Err("max_complexity must be > 0 when set".into());
        }
        Ok(())
    }
}
