use fr_lang::{CheckMode, Options};
use serde::Deserialize;

/// The `[validation]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub mode: CheckMode,
    /// Treat warnings like errors when deciding the exit status.
    pub deny_warnings: bool,
    /// Warn about types and constants declared after an interface contract.
    pub element_order: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            mode: CheckMode::Normal,
            deny_warnings: false,
            element_order: true,
        }
    }
}

impl From<ValidationConfig> for Options {
    fn from(config: ValidationConfig) -> Self {
        Options {
            mode: config.mode,
            element_order: config.element_order,
        }
    }
}
