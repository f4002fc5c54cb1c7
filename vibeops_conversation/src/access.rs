//! Single-credential access gate.

use tracing::{info, warn};

use crate::ConversationError;
use crate::manager::read_line;

/// The one username/password pair allowed into the dashboard.
#[derive(Debug, Clone)]
pub struct AccessGate {
    username: String,
    password: String,
}

impl AccessGate {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Ask for credentials on stdin and verify them. Returns the username.
    pub fn prompt(&self) -> Result<String, ConversationError> {
        println!("VibeOps Enterprise | NLP-to-SQL Healthcare Interface");
        println!("Access Restricted: available to authorized beta testers only.\n");

        let username = read_line("Username: ")?;
        let password = read_line("Password: ")?;
        self.verify(&username, &password)?;

        Ok(username)
    }

    pub fn verify(&self, username: &str, password: &str) -> Result<(), ConversationError> {
        if username == self.username && password == self.password {
            info!("User {username} signed in");
            Ok(())
        } else {
            warn!("Rejected sign-in attempt for user {username}");
            Err(ConversationError::AccessDenied)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate() {
        let gate = AccessGate::new("demo", "harvard2026");

        assert!(gate.verify("demo", "harvard2026").is_ok());
        assert!(matches!(
            gate.verify("demo", "wrong"),
            Err(ConversationError::AccessDenied)
        ));
        assert!(gate.verify("Demo", "harvard2026").is_err());
        assert!(gate.verify("", "").is_err());
    }
}
