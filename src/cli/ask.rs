// src/cli/ask.rs
// One-shot question from the command line, and persona listing

use super::{Cli, build_client};
use anyhow::Result;
use llm_expert::experts::{ExpertRegistry, Submission};

pub async fn run_ask(cli: &Cli, persona: &str, text: &str) -> Result<()> {
    let submission = Submission::new(persona, text);
    submission.validate()?;

    // Unknown keys are rejected before the credential is even needed
    ExpertRegistry::builtin().lookup(&submission.persona_key)?;

    let client = build_client(cli)?;
    let answer = client
        .complete(&submission.user_text, &submission.persona_key)
        .await?;

    println!("{}", answer);
    Ok(())
}

pub fn run_personas() {
    for persona in ExpertRegistry::builtin().list_all() {
        println!("{}\t{}", persona.key, persona.label);
    }
}
