//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input, dispatched
//! statically from `main`.

use std::path::PathBuf;
use std::time::Duration;

use tracing::info;
use vibeops_config::Config;
use vibeops_conversation::{AccessGate, ConversationConfig};
use vibeops_store::RecordStore;

mod ask;
mod chat;
mod info;
mod init;
mod version;

pub use ask::{AskInput, AskStrategy};
pub use chat::{ChatInput, ChatStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use version::VersionStrategy;

/// Contract shared by all command strategies.
///
/// Each strategy names its own input type, so arguments are passed without
/// boxing or runtime casting.
pub trait CommandStrategy: Send + Sync + 'static {
    type Input;

    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// The single account allowed to use the dashboard.
fn access_gate(config: &Config) -> AccessGate {
    AccessGate::new(&config.access.username, &config.access.password)
}

/// Load the record store, preferring the CLI path over the configured one.
///
/// Never fails: an unreadable source yields the configured fallback cohort.
fn load_store(config: &Config, data: Option<PathBuf>) -> RecordStore {
    let path = data.unwrap_or_else(|| config.data.path.clone());
    info!("Loading patient data from {}", path.display());
    RecordStore::load(&path, config.data.fallback)
}

fn build_conversation_config(config: &Config, no_delay: bool) -> ConversationConfig {
    let delay = if no_delay {
        Duration::ZERO
    } else {
        Duration::from_millis(config.chat.thinking_delay_ms)
    };

    ConversationConfig::default()
        .with_thinking_delay(delay)
        .with_history_limit(config.chat.history_limit)
        .with_duplicate_policy(config.chat.duplicate_policy)
}
