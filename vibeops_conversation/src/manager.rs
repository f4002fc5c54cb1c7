//! Conversation manager for the query dashboard.
//!
//! The `ConversationManager` owns everything a session needs: the record
//! store, the matcher and the conversation log. Nothing is held globally;
//! each turn reads the store and appends to the log explicitly.

use std::io::Write;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use vibeops_core::{PatientRecord, QueryResult, Role};
use vibeops_query::IntentMatcher;
use vibeops_store::{
    DuplicatePolicy, GENDER_OPTIONS, IntakeError, NewRecord, RecordStore, StoreError,
};

use crate::render;
use crate::session::ConversationSession;
use crate::thinking::ThinkingScript;

/// Configuration for a dashboard session.
#[derive(Debug, Clone)]
pub struct ConversationConfig {
    /// Session identifier
    pub session_id: Uuid,
    /// Signed-in user
    pub username: Option<String>,
    /// Pause after each thinking step
    pub thinking_delay: Duration,
    /// Entries shown by `/history`
    pub history_limit: usize,
    /// How intake treats a reused patient ID
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            session_id: Uuid::now_v7(),
            username: None,
            thinking_delay: Duration::from_millis(500),
            history_limit: 20,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl ConversationConfig {
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub const fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay = delay;
        self
    }

    #[must_use]
    pub const fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    #[must_use]
    pub const fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}

/// Errors that can occur during a dashboard session.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("Invalid credentials. Please contact administrator.")]
    AccessDenied,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Intake error: {0}")]
    Intake(#[from] IntakeError),

    #[error("Invalid {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    #[error("Input closed")]
    InputClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of processing one prompt.
#[derive(Debug, Clone)]
pub struct TurnResult {
    pub result: QueryResult,
    /// 1-based turn number
    pub turn_number: usize,
}

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user quit, or input closed.
    Exit,
    /// The user signed out and the login gate should be shown again.
    Logout,
}

/// One line of interactive input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command<'a> {
    Exit,
    Logout,
    Help,
    History,
    Stats,
    Add,
    Empty,
    Prompt(&'a str),
}

impl<'a> Command<'a> {
    fn parse(input: &'a str) -> Self {
        match input {
            "exit" | "quit" | "q" => Self::Exit,
            "/logout" => Self::Logout,
            "/help" => Self::Help,
            "/history" => Self::History,
            "/stats" => Self::Stats,
            "/add" => Self::Add,
            "" => Self::Empty,
            prompt => Self::Prompt(prompt),
        }
    }
}

/// Single-user dashboard session.
pub struct ConversationManager {
    store: RecordStore,
    matcher: IntentMatcher,
    session: ConversationSession,
    thinking: ThinkingScript,
    config: ConversationConfig,
}

impl ConversationManager {
    #[must_use]
    pub fn new(store: RecordStore, matcher: IntentMatcher, config: ConversationConfig) -> Self {
        info!(
            "Creating conversation session {} over {} records",
            config.session_id,
            store.len()
        );

        let mut session = ConversationSession::with_id(config.session_id);
        session.username.clone_from(&config.username);

        Self {
            store,
            matcher,
            session,
            thinking: ThinkingScript::new(config.thinking_delay),
            config,
        }
    }

    /// Answer one prompt, logging both sides of the turn.
    pub async fn process_turn(&mut self, prompt: &str) -> TurnResult {
        self.process_turn_with(prompt, |_| {}).await
    }

    /// Like [`process_turn`](Self::process_turn), reporting each thinking step.
    pub async fn process_turn_with(
        &mut self,
        prompt: &str,
        on_step: impl FnMut(&str),
    ) -> TurnResult {
        self.session.add_message(Role::User, prompt);
        let turn_number = self.session.turn_count();
        info!("Processing turn {turn_number} for session {}", self.session.id);

        self.thinking.play(on_step).await;

        let result = self.matcher.match_prompt(prompt, &self.store);
        debug!(
            "Turn {turn_number} resolved as {} with {} rows",
            result.intent,
            result.row_count()
        );

        self.session.add_answer(&result);

        TurnResult {
            result,
            turn_number,
        }
    }

    /// Validate an intake form and append it to the store.
    pub fn add_record(&mut self, form: NewRecord) -> Result<PatientRecord, ConversationError> {
        let record = form.into_record()?;
        self.store = self
            .store
            .try_append(record.clone(), self.config.duplicate_policy)?;

        Ok(record)
    }

    #[must_use]
    pub const fn store(&self) -> &RecordStore {
        &self.store
    }

    #[must_use]
    pub const fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// End the session, keeping the store for whoever signs in next.
    #[must_use]
    pub fn into_store(self) -> RecordStore {
        info!(
            "Closing session {} after {} turns",
            self.session.id,
            self.session.turn_count()
        );
        self.store
    }

    /// Run the interactive prompt loop on stdin/stdout.
    pub async fn run_interactive(&mut self) -> Result<SessionEnd, ConversationError> {
        println!("=== Intelligent Query Interface ===");
        println!("Ask questions about patient data in natural language.");
        println!("Ex: 'Influenza', 'count patients', 'average bill', 'P-001'");
        println!("Commands: /add, /history, /stats, /logout, /help. Type 'exit' to quit.\n");

        loop {
            let input = match read_line("> ") {
                Ok(line) => line,
                Err(ConversationError::InputClosed) => "exit".to_string(),
                Err(e) => return Err(e),
            };

            match Command::parse(&input) {
                Command::Exit => {
                    println!(
                        "\nSession ended. Total turns: {}",
                        self.session.turn_count()
                    );
                    return Ok(SessionEnd::Exit);
                }
                Command::Logout => {
                    println!("\nSigned out.\n");
                    return Ok(SessionEnd::Logout);
                }
                Command::Empty => {}
                Command::Help => print_help(),
                Command::History => {
                    println!("{}\n", self.session.transcript(self.config.history_limit));
                }
                Command::Stats => self.print_stats(),
                Command::Add => match read_intake().and_then(|form| self.add_record(form)) {
                    Ok(record) => println!(
                        "\nAdded patient {}. Store now holds {} records.\n",
                        record.patient_id,
                        self.store.len()
                    ),
                    Err(e) => eprintln!("Error: {e}"),
                },
                Command::Prompt(prompt) => {
                    let turn = self
                        .process_turn_with(prompt, |step| println!("  ... {step}"))
                        .await;
                    println!("  Query Executed Successfully\n");
                    println!("{}\n", render::answer(&turn.result, &self.store.fields()));
                }
            }
        }
    }

    fn print_stats(&self) {
        let summary = self.store.summary();
        println!("Status: Connected (in-memory)");
        println!("Records: {}", summary.total);
        for (status, count) in &summary.by_status {
            let label = if status.is_empty() { "(none)" } else { status };
            println!("  {label}: {count}");
        }
        println!("Total billed: ${:.2}", summary.total_billed);
        println!("Turns this session: {}\n", self.session.turn_count());
    }
}

fn print_help() {
    println!("Prompts are matched in this order:");
    println!("  count                  -> total record count");
    println!("  average bill | age     -> mean of the column");
    println!("  any text               -> diagnosis or clinical notes containing it");
    println!("  P-<digits>             -> exact patient ID lookup");
    println!("  anything else          -> most recent records");
    println!("Type /logout to sign out or 'exit' to quit.\n");
}

pub(crate) fn read_line(label: &str) -> Result<String, ConversationError> {
    print!("{label}");
    std::io::stdout().flush()?;

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input)? == 0 {
        return Err(ConversationError::InputClosed);
    }
    Ok(input.trim().to_string())
}

fn parse_field<T: std::str::FromStr>(
    field: &'static str,
    value: String,
) -> Result<T, ConversationError> {
    value
        .parse()
        .map_err(|_| ConversationError::InvalidInput { field, value })
}

/// Prompt for each intake field on stdin.
fn read_intake() -> Result<NewRecord, ConversationError> {
    println!("New patient record (admission date defaults to today)");
    let patient_id = read_line("  Patient ID (P-<digits>): ")?;
    let age = parse_field("age", read_line("  Age: ")?)?;
    let gender = read_line(&format!("  Gender ({}): ", GENDER_OPTIONS.join("/")))?;
    let diagnosis = read_line("  Diagnosis: ")?;
    let clinical_notes = read_line("  Clinical notes: ")?;
    let status = read_line("  Status (Active/ICU/Outpatient/Discharged): ")?;
    let bill_amount = parse_field("bill amount", read_line("  Bill amount: ")?)?;

    Ok(NewRecord {
        patient_id,
        age,
        gender,
        diagnosis,
        clinical_notes,
        status,
        bill_amount,
        admission_date: None,
    })
}
