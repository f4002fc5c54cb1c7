//! Conversation log for a dashboard session.
//!
//! The log is purely presentational: the matcher never reads it.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use vibeops_core::{ChatMessage, QueryResult, Role};

/// One user's session: an ordered log of prompts and answers.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    /// Session identifier
    pub id: Uuid,
    /// Signed-in user, if the gate was passed
    pub username: Option<String>,
    /// Entries in chronological order
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationSession {
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(Uuid::now_v7())
    }

    #[must_use]
    pub fn with_id(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: None,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn add_message(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role,
            content: content.into(),
        });
        self.updated_at = Utc::now();
    }

    /// Log the assistant side of a turn the way the dashboard shows it.
    pub fn add_answer(&mut self, result: &QueryResult) {
        self.add_message(
            Role::Assistant,
            format!("Executed: `{}`", result.synthetic_query),
        );
    }

    #[must_use]
    pub fn last_n_messages(&self, n: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    /// Number of prompts the user has submitted.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.messages.iter().filter(|m| m.role == Role::User).count()
    }

    #[must_use]
    pub const fn message_count(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Log as `role: content` lines.
    #[must_use]
    pub fn transcript(&self, limit: usize) -> String {
        self.last_n_messages(limit)
            .iter()
            .map(|m| format!("{}: {}", m.role.as_str(), m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}
