//! One-shot prompt without the interactive loop.

use std::path::PathBuf;

use vibeops_config::Config;
use vibeops_conversation::{ConversationManager, render};
use vibeops_query::IntentMatcher;

use super::{access_gate, build_conversation_config, load_store};

/// Input parameters for the Ask command strategy.
#[derive(Debug, Clone)]
pub struct AskInput {
    /// The free-text prompt
    pub prompt: String,
    /// Optional data file overriding the configured one
    pub data: Option<PathBuf>,
    /// Emit JSON instead of the rendered answer
    pub json: bool,
    /// Account name checked against the access gate
    pub username: String,
    /// Account password checked against the access gate
    pub password: String,
}

/// Strategy for answering a single prompt.
///
/// Checks the credentials first, then answers without the thinking pause.
#[derive(Debug, Clone, Copy)]
pub struct AskStrategy;

impl super::CommandStrategy for AskStrategy {
    type Input = AskInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default();
        access_gate(&config).verify(&input.username, &input.password)?;

        let store = load_store(&config, input.data);

        let mut manager = ConversationManager::new(
            store,
            IntentMatcher::new(config.matcher.clone()),
            build_conversation_config(&config, true).with_username(&input.username),
        );
        let turn = manager.process_turn(&input.prompt).await;

        if input.json {
            println!("{}", serde_json::to_string_pretty(&turn.result)?);
        } else {
            println!(
                "{}",
                render::answer(&turn.result, &manager.store().fields())
            );
        }

        Ok(())
    }
}
