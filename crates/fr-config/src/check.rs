use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::logging::LoggingConfig;
use crate::validate;
use crate::validation::ValidationConfig;

// ---------------------------------------------------------------------------
// Raw TOML structure (intermediate representation)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CheckConfigRaw {
    validation: ValidationConfig,
    logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// CheckConfig (resolved, validated)
// ---------------------------------------------------------------------------

/// Contents of `franca-check.toml`; every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckConfig {
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
}

impl CheckConfig {
    /// Read and parse a `franca-check.toml` file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.as_ref().display()))?;
        content.parse()
    }
}

impl FromStr for CheckConfig {
    type Err = anyhow::Error;

    /// Parse a TOML string into a validated [`CheckConfig`].
    fn from_str(toml_str: &str) -> anyhow::Result<Self> {
        let raw: CheckConfigRaw = toml::from_str(toml_str)?;
        let config = CheckConfig {
            validation: raw.validation,
            logging: raw.logging,
        };
        validate::validate(&config)?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
