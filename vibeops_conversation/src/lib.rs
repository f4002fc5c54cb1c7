#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Chat session around the intent matcher.
//!
//! This crate is the presentation boundary: it gates access, keeps the
//! conversation log, plays the scripted "thinking" steps, and renders each
//! answer as a query block, an explanation line and an optional table.
//!
//! # Key Features
//! - Explicit session state (store, matcher, log) owned by one manager
//! - Single-credential access gate
//! - Configurable thinking pause
//! - Intake of new records during a session

mod access;
mod manager;
pub mod render;
mod session;
mod thinking;

pub use access::AccessGate;
pub use manager::{
    ConversationConfig, ConversationError, ConversationManager, SessionEnd, TurnResult,
};
pub use session::ConversationSession;
pub use thinking::{THINKING_STEPS, ThinkingScript};
