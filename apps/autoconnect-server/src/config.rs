//! Configuration management for the AutoConnect server

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::ocr::{Backoff, PollPolicy, DEFAULT_MAX_ATTEMPTS};

/// Default upload limit: 10MB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub vision: VisionConfig,
    pub llm: LlmConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub endpoint: String,
    pub api_key: String,
    pub poll: PollPolicy,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let interval = Duration::from_millis(parse_or(&var, "OCR_POLL_INTERVAL_MS", 1000u64)?);
        let backoff = match var("OCR_BACKOFF").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("fixed") => Backoff::Fixed,
            Some("exponential") => Backoff::Exponential {
                factor: parse_or(&var, "OCR_BACKOFF_FACTOR", 2.0f64)?,
                max_interval: Duration::from_millis(parse_or(&var, "OCR_BACKOFF_MAX_MS", 8000u64)?),
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "OCR_BACKOFF",
                    value: other.to_string(),
                })
            }
        };

        Ok(Config {
            server: ServerConfig {
                host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&var, "SERVER_PORT", 5000u16)?,
            },
            vision: VisionConfig {
                endpoint: required("AZURE_VISION_ENDPOINT")?,
                api_key: required("AZURE_VISION_KEY")?,
                poll: PollPolicy {
                    max_attempts: parse_or(&var, "OCR_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?,
                    interval,
                    backoff,
                },
            },
            llm: LlmConfig {
                base_url: var("LLM_BASE_URL").unwrap_or_else(|| "http://localhost:11434".to_string()),
                model: var("LLM_MODEL").unwrap_or_else(|| "llama3.1".to_string()),
            },
            upload: UploadConfig {
                max_bytes: parse_or(&var, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            },
        })
    }
}

fn parse_or<T, F>(var: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
