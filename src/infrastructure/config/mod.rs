use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::import::ResolverConfig;
use crate::domain::llm_config::LLMConfig;
use crate::domain::summary::SummaryConfig;

pub const DEFAULT_CONFIG_FILE: &str = "sitepulse.toml";
pub const ENV_PREFIX: &str = "SITEPULSE_";

/// Everything configurable, threaded into the use cases at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LLMConfig,
    pub summary: SummaryConfig,
    pub import: ResolverConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.import
            .validate()
            .map_err(|e| AppError::ConfigError(format!("import: {}", e)))?;
        if self.llm.base_url.trim().is_empty() {
            return Err(AppError::ConfigError("llm.base_url must not be empty".to_string()));
        }
        if self.llm.model.trim().is_empty() {
            return Err(AppError::ConfigError("llm.model must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Layers defaults, an optional TOML file and the environment:
///
/// 1. built-in defaults
/// 2. `sitepulse.toml` in the working directory (parent directories are not
///    searched), or an explicit file
/// 3. `SITEPULSE_*` variables, `__` separating nested keys
///    (`SITEPULSE_LLM__MODEL=gpt-4o`)
/// 4. `OPENAI_API_KEY` as `llm.api_key`
pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    /// Build the layered sources. An explicit file must exist; the default
    /// file is optional.
    pub fn new(config_file: Option<&Path>) -> Result<Self> {
        let file = match config_file {
            Some(path) if !path.exists() => {
                return Err(AppError::ConfigError(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };
        debug!(file = %file.display(), "Loading configuration");

        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file_exact(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&["OPENAI_API_KEY"])
                    .map(|_| "llm.api_key".into()),
            );

        Ok(Self { figment })
    }

    /// Load `.env` into the process environment, if present
    pub fn load_dotenv() {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env");
        }
    }

    pub fn load(&self) -> Result<AppConfig> {
        let config: AppConfig = self.figment.extract()?;
        config.validate()?;
        Ok(config)
    }
}
