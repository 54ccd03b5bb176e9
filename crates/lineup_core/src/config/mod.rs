//! Editor configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

mod env;

pub use env::{load_config_from_env, CONFIG_PATH_ENV};

use crate::engine::{TieBreak, VeteranPolicy};
use crate::error::{LineupError, Result};
use crate::models::Formation;
use serde::{Deserialize, Serialize};

/// Pixel geometry of the field box and player tokens, used by drag clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldBounds {
    pub width: f32,
    pub height: f32,
    pub token_size: f32,
    /// Pointer offset inside the token when the host does not report one.
    pub grab_offset: f32,
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self { width: 600.0, height: 800.0, token_size: 64.0, grab_offset: 32.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub default_formation: String,
    pub veteran_policy: VeteranPolicy,
    pub tie_break: TieBreak,
    pub field: FieldBounds,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_formation: Formation::default().code().to_string(),
            veteran_policy: VeteranPolicy::default(),
            tie_break: TieBreak::default(),
            field: FieldBounds::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if Formation::from_code(&self.default_formation).is_none() {
            return Err(LineupError::InvalidConfig(format!(
                "default_formation '{}' is not in the catalog",
                self.default_formation
            )));
        }
        let field = &self.field;
        if !(field.width > 0.0 && field.height > 0.0) {
            return Err(LineupError::InvalidConfig(format!(
                "field must have positive size, got {}x{}",
                field.width, field.height
            )));
        }
        if !(field.token_size > 0.0) || field.token_size > field.width.min(field.height) {
            return Err(LineupError::InvalidConfig(format!(
                "token_size must be in (0, {}], got {}",
                field.width.min(field.height),
                field.token_size
            )));
        }
        if field.grab_offset < 0.0 || field.grab_offset > field.token_size {
            return Err(LineupError::InvalidConfig(format!(
                "grab_offset must be 0-{}, got {}",
                field.token_size, field.grab_offset
            )));
        }
        Ok(())
    }

    pub fn formation(&self) -> Formation {
        Formation::resolve(&self.default_formation)
    }
}
