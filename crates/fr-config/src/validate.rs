use crate::check::CheckConfig;

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Internal validation, called automatically during `CheckConfig::from_str` / `load`.
pub(crate) fn validate(config: &CheckConfig) -> anyhow::Result<()> {
    let logging = &config.logging;
    if logging.level.trim().is_empty() {
        anyhow::bail!("logging.level must not be empty");
    }
    if !is_level(&logging.level) {
        anyhow::bail!(
            "logging.level: unknown level {:?}, expected one of {}",
            logging.level,
            LEVELS.join(", "),
        );
    }

    for (module, level) in &logging.modules {
        if module.trim().is_empty() {
            anyhow::bail!("logging.modules: module name must not be empty");
        }
        if !is_level(level) {
            anyhow::bail!("logging.modules.{module:?}: unknown level {level:?}");
        }
    }

    if let Some(file) = &logging.file
        && file.file_name().is_none()
    {
        anyhow::bail!("logging.file {:?} has no file name", file);
    }

    Ok(())
}

fn is_level(level: &str) -> bool {
    LEVELS.contains(&level.to_ascii_lowercase().as_str())
}
