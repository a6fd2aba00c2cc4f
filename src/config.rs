//! Runtime configuration from environment variables.
//!
//! `main` merges a `.env` file with `dotenv` before [`Config::from_env`] runs,
//! so either source works:
//! - `IP_KIT_LOG_CONFIG` - log4rs YAML file (default `log4rs.yml`)
//! - `IP_KIT_OUTPUT` - `text` or `json`
//! - `IP_KIT_COLOR` - `0`, `false` or `no` disables colors

use std::env;

pub const LOG_CONFIG_VAR: &str = "IP_KIT_LOG_CONFIG";
pub const OUTPUT_VAR: &str = "IP_KIT_OUTPUT";
pub const COLOR_VAR: &str = "IP_KIT_COLOR";

pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Quoted, right-aligned fields.
    #[default]
    Text,
    /// Pretty printed JSON.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_config: String,
    pub output: OutputFormat,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_config: DEFAULT_LOG_CONFIG.to_string(),
            output: OutputFormat::Text,
            color: true,
        }
    }
}

/// log4rs file to load. Read on its own so logging can start before [`Config`] is built.
pub fn log_config_path<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(LOG_CONFIG_VAR)
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_CONFIG.to_string())
}

impl Config {
    /// Read the process environment.
    pub fn from_env() -> Config {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config {
            log_config: log_config_path(&lookup),
            ..Config::default()
        };

        if let Some(output) = lookup(OUTPUT_VAR) {
            config.output = match output.trim().to_ascii_lowercase().as_str() {
                "json" => OutputFormat::Json,
                "text" | "" => OutputFormat::Text,
                other => {
                    log::warn!("Unknown {OUTPUT_VAR}={other}, using text");
                    OutputFormat::Text
                }
            };
        }

        if let Some(color) = lookup(COLOR_VAR) {
            config.color = !matches!(
                color.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "no"
            );
        }

        log::debug!("config={config:?}");
        config
    }
}
