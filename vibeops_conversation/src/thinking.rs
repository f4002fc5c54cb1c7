//! Scripted "thinking" steps shown before each answer.
//!
//! Purely cosmetic latency; no work happens during the pause.

use std::time::Duration;

/// Status lines shown in order while the answer is "computed".
pub const THINKING_STEPS: [&str; 3] = [
    "Tokenizing input...",
    "Mapping intent to schema...",
    "Generating SQL...",
];

#[derive(Debug, Clone, Copy)]
pub struct ThinkingScript {
    step_delay: Duration,
}

impl ThinkingScript {
    #[must_use]
    pub const fn new(step_delay: Duration) -> Self {
        Self { step_delay }
    }

    /// A script that reports steps without pausing.
    #[must_use]
    pub const fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Report each step, pausing after it.
    pub async fn play(&self, mut on_step: impl FnMut(&str)) {
        for step in THINKING_STEPS {
            on_step(step);
            if !self.step_delay.is_zero() {
                tokio::time::sleep(self.step_delay).await;
            }
        }
    }
}
