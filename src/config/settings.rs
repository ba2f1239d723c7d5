// src/config/settings.rs
// Typed runtime settings and their validation

use crate::llm::DEFAULT_BASE_URL;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Low, but not zero: favors focused answers over creative variation
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;

/// How completions are requested
#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    pub model: String,
    pub temperature: f32,
    /// Upper bound on a single model call
    pub timeout: Duration,
    pub base_url: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl LlmSettings {
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if self.model.trim().is_empty() {
            validation.add_error("model must not be empty");
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            validation.add_error(format!(
                "temperature must be between 0.0 and 2.0 (got {})",
                self.temperature
            ));
        } else if self.temperature == 0.0 {
            validation.add_warning("temperature 0.0 makes answers fully greedy");
        } else if self.temperature > 1.0 {
            validation.add_warning(format!(
                "temperature {} favors creative variation over focused answers",
                self.temperature
            ));
        }
        if self.timeout.is_zero() {
            validation.add_error("timeout must be greater than zero");
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            validation.add_error(format!(
                "base URL must start with http:// or https:// (got {})",
                self.base_url
            ));
        }

        validation
    }
}

/// Where the web form listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration validation result
#[derive(Debug)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Default for ConfigValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warn in &self.warnings {
                lines.push(format!("  - {}", warn));
            }
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}
