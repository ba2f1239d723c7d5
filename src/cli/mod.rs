// src/cli/mod.rs
// CLI module for llm-expert commands

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use llm_expert::config::settings::{
    DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};
use llm_expert::config::{
    LlmSettings, SECRETS_PATH_ENV, ServerSettings, resolve_api_key, secrets_search_paths,
};
use llm_expert::experts::{ExpertClient, ExpertRegistry};
use llm_expert::llm::{DEFAULT_BASE_URL, OpenAiClient};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub mod ask;
pub mod serve;

pub use ask::{run_ask, run_personas};
pub use serve::run_server;

#[derive(Parser)]
#[command(name = "llm-expert")]
#[command(about = "Ask a hosted LLM through a selectable expert persona")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Secrets file holding OPENAI_API_KEY (default: ./.llm-expert/secrets.toml, then ~/.llm-expert/secrets.toml)
    #[arg(long, global = true, env = SECRETS_PATH_ENV)]
    pub secrets: Option<PathBuf>,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub server: ServerArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the web form (default)
    Serve,

    /// Ask one question from the command line and print the answer
    Ask {
        /// Persona key (see `personas`)
        #[arg(short, long)]
        persona: String,

        /// Question or request text
        #[arg(index = 1)]
        text: String,
    },

    /// List the available expert personas
    Personas,
}

/// Model call settings
#[derive(Args, Debug, Clone)]
pub struct LlmArgs {
    /// Chat model identifier
    #[arg(long, global = true, env = "LLM_EXPERT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(long, global = true, env = "LLM_EXPERT_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Upper bound for one model call, in seconds
    #[arg(long, global = true, env = "LLM_EXPERT_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, global = true, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

impl LlmArgs {
    pub fn to_settings(&self) -> LlmSettings {
        LlmSettings {
            model: self.model.clone(),
            temperature: self.temperature,
            timeout: Duration::from_secs(self.timeout_secs),
            base_url: self.base_url.clone(),
        }
    }
}

/// Listen address for `serve`
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// Host to bind
    #[arg(long, global = true, env = "LLM_EXPERT_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short = 'P', long, global = true, env = "LLM_EXPERT_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl ServerArgs {
    pub fn to_settings(&self) -> ServerSettings {
        ServerSettings {
            host: self.host.clone(),
            port: self.port,
        }
    }
}

/// Validate settings, resolve the credential and assemble the completion client.
///
/// Fails before anything is served when the configuration is unusable.
pub fn build_client(cli: &Cli) -> Result<ExpertClient> {
    let settings = cli.llm.to_settings();

    let validation = settings.validate();
    for warning in &validation.warnings {
        warn!("Config: {}", warning);
    }
    if !validation.is_valid() {
        bail!("invalid configuration\n{}", validation.report());
    }

    let paths = secrets_search_paths(cli.secrets.as_deref());
    let (api_key, source) = resolve_api_key(&paths, |name| std::env::var(name).ok())?;
    info!(source = %source, "Model API credential resolved");

    let model = OpenAiClient::from_settings(api_key, &settings);

    info!(
        model = %settings.model,
        temperature = settings.temperature,
        timeout_secs = settings.timeout.as_secs(),
        "Completion client ready"
    );

    Ok(ExpertClient::new(
        Arc::new(ExpertRegistry::builtin()),
        Arc::new(model),
        settings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["llm-expert"]).unwrap();
        assert!(cli.command.is_none());
        let settings = cli.llm.to_settings();
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(cli.server.to_settings().port, DEFAULT_PORT);
    }

    #[test]
    fn test_ask_parses_persona_and_text() {
        let cli = Cli::try_parse_from([
            "llm-expert",
            "ask",
            "--persona",
            "B",
            "--temperature",
            "0.5",
            "How do I run a usability test?",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Ask { persona, text }) => {
                assert_eq!(persona, "B");
                assert_eq!(text, "How do I run a usability test?");
            }
            _ => panic!("expected ask"),
        }
        assert!((cli.llm.temperature - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_serve_port_override() {
        let cli = Cli::try_parse_from(["llm-expert", "serve", "--port", "9000"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve)));
        assert_eq!(cli.server.to_settings().bind_address(), "127.0.0.1:9000");
    }
}
