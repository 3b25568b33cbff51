// Model configuration: weight table, opt-in miscue recipes, TOML loading.

use std::path::Path;

use miscue_core::{Category, WeightTable};
use serde::{Deserialize, Serialize};

use crate::LmError;

/// Default maximum number of words a jump may cover.
pub const DEFAULT_JUMP_SPAN: usize = 3;

/// Configuration for building a prompt model.
///
/// Example TOML:
///
/// ```toml
/// extensions = ["jump-forward", "premature-end"]
/// jump_span = 4
///
/// [weights]
/// correct = 100
/// repeat = 20
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LmConfig {
    pub weights: WeightTable,
    /// Miscue categories to run on top of the core recipes (correct, rubbish,
    /// skip, repeat).
    pub extensions: Vec<Category>,
    /// Maximum number of words covered by a jump-forward or jump-backward path.
    pub jump_span: usize,
}

impl Default for LmConfig {
    fn default() -> Self {
        Self {
            weights: WeightTable::default(),
            extensions: Vec::new(),
            jump_span: DEFAULT_JUMP_SPAN,
        }
    }
}

impl LmConfig {
    /// Parse a configuration from TOML text. Missing fields take their defaults.
    pub fn from_toml(text: &str) -> Result<Self, LmError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load_from(path: &Path) -> Result<Self, LmError> {
        let text = std::fs::read_to_string(path).map_err(|source| LmError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Enable an extended miscue category.
    pub fn with_extension(mut self, category: Category) -> Self {
        if !self.extensions.contains(&category) {
            self.extensions.push(category);
        }
        self
    }

    pub fn with_weights(mut self, weights: WeightTable) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self) -> Result<(), LmError> {
        self.weights.validate()?;
        Ok(())
    }

    pub fn is_extension_enabled(&self, category: Category) -> bool {
        self.extensions.contains(&category)
    }
}
