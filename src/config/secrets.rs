// src/config/secrets.rs
// Model-API credential resolution: secrets file first, then environment

use crate::error::{ExpertError, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the credential in both the secrets file and the environment
pub const API_KEY_NAME: &str = "OPENAI_API_KEY";

/// Environment variable that points at an explicit secrets file
pub const SECRETS_PATH_ENV: &str = "LLM_EXPERT_SECRETS";

/// Directory (relative to cwd or home) holding `secrets.toml`
const SECRETS_DIR: &str = ".llm-expert";
const SECRETS_FILE: &str = "secrets.toml";

/// Model-API credential. Debug output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Where the credential was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    SecretsFile(PathBuf),
    Environment,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::SecretsFile(path) => write!(f, "secrets file {}", path.display()),
            KeySource::Environment => write!(f, "environment variable {}", API_KEY_NAME),
        }
    }
}

/// Flat `KEY = "value"` TOML table of secrets
#[derive(Debug, Default)]
pub struct SecretsStore {
    values: HashMap<String, String>,
}

impl SecretsStore {
    /// Parse secrets from TOML text. Non-string values are ignored.
    pub fn parse(contents: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(contents)
            .map_err(|e| ExpertError::Config(format!("invalid secrets file: {}", e)))?;

        let values = table
            .into_iter()
            .filter_map(|(k, v)| match v {
                toml::Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect();

        Ok(Self { values })
    }

    /// Load a secrets file. A missing file is `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ExpertError::Config(format!(
                "cannot read secrets file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Get a non-blank value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

/// Secrets files to search, in priority order.
///
/// An explicit path replaces the defaults entirely.
pub fn secrets_search_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }

    let mut paths = vec![PathBuf::from(SECRETS_DIR).join(SECRETS_FILE)];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(SECRETS_DIR).join(SECRETS_FILE));
    }
    paths
}

/// Resolve the credential. The first match wins: each secrets file in order,
/// then `env_lookup(OPENAI_API_KEY)`.
///
/// Unreadable or malformed secrets files are skipped with a warning.
pub fn resolve_api_key<F>(secrets_paths: &[PathBuf], env_lookup: F) -> Result<(ApiKey, KeySource)>
where
    F: Fn(&str) -> Option<String>,
{
    for path in secrets_paths {
        match SecretsStore::load(path) {
            Ok(Some(store)) => {
                if let Some(value) = store.get(API_KEY_NAME) {
                    info!(path = %path.display(), "Model API key loaded from secrets file");
                    return Ok((ApiKey::new(value), KeySource::SecretsFile(path.clone())));
                }
                debug!(path = %path.display(), "Secrets file has no {}", API_KEY_NAME);
            }
            Ok(None) => {
                debug!(path = %path.display(), "Secrets file not found");
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping secrets file");
            }
        }
    }

    if let Some(value) = env_lookup(API_KEY_NAME).filter(|v| !v.trim().is_empty()) {
        info!("Model API key loaded from environment");
        return Ok((ApiKey::new(value), KeySource::Environment));
    }

    Err(ExpertError::Config(missing_key_message(secrets_paths)))
}

/// Operator-facing message for a missing credential
fn missing_key_message(secrets_paths: &[PathBuf]) -> String {
    let searched = secrets_paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} not found. Set it as an environment variable or add `{} = \"...\"` to a secrets file (searched: {}).",
        API_KEY_NAME, API_KEY_NAME, searched
    )
}
