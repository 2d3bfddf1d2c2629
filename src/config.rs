use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

/// Environment variable naming an optional JSON settings file.
pub const CONFIG_ENV: &str = "DEPLETION_CONFIG";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PredictorConfig {
    /// Histories shorter than this are reported as indeterminate.
    pub min_samples: usize,
    /// Log the fitted line at info level instead of debug.
    pub log_fit: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            min_samples: 1,
            log_fit: false,
        }
    }
}

impl PredictorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("invalid config JSON in {}", path.display()))
    }

    /// Settings from the file named by `DEPLETION_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => {
                let cfg = Self::load(&path)?;
                tracing::debug!("loaded config from {:?}: {:?}", path, cfg);
                Ok(cfg)
            }
            _ => Ok(Self::default()),
        }
    }
}
