// src/config/mod.rs
// Configuration: credential resolution and runtime settings

pub mod secrets;
pub mod settings;

pub use secrets::{
    API_KEY_NAME, ApiKey, KeySource, SECRETS_PATH_ENV, SecretsStore, resolve_api_key,
    secrets_search_paths,
};
pub use settings::{ConfigValidation, LlmSettings, ServerSettings};
