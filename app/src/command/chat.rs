//! Interactive dashboard session behind the access gate.

use std::path::PathBuf;

use tracing::info;
use vibeops_config::Config;
use vibeops_conversation::{ConversationManager, SessionEnd};
use vibeops_query::IntentMatcher;

use super::{access_gate, build_conversation_config, load_store};

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Optional data file overriding the configured one
    pub data: Option<PathBuf>,
    /// Username and password given on the command line
    pub credentials: Option<(String, String)>,
    /// Skip the thinking pause
    pub no_delay: bool,
}

/// Strategy for the interactive session:
/// - Verifies the single configured credential pair
/// - Loads the record store (falling back on failure)
/// - Runs the prompt loop until the user exits
/// - Shows the login gate again after `/logout`, keeping the store
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default();
        let gate = access_gate(&config);

        let mut username = match input.credentials {
            Some((username, password)) => {
                gate.verify(&username, &password)?;
                username
            }
            None => gate.prompt()?,
        };

        let mut store = load_store(&config, input.data);

        loop {
            let conversation_config =
                build_conversation_config(&config, input.no_delay).with_username(&username);

            info!(
                "Starting session {} for {username}",
                conversation_config.session_id
            );

            let mut manager = ConversationManager::new(
                store,
                IntentMatcher::new(config.matcher.clone()),
                conversation_config,
            );
            let end = manager.run_interactive().await?;

            info!(
                "Session ended: {} total messages",
                manager.session().message_count()
            );

            match end {
                SessionEnd::Exit => return Ok(()),
                SessionEnd::Logout => {
                    store = manager.into_store();
                    username = gate.prompt()?;
                }
            }
        }
    }
}
