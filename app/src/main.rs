#![deny(
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

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;

use command::{
    AskInput, AskStrategy, ChatInput, ChatStrategy, CommandStrategy, InfoStrategy, InitStrategy,
    VersionStrategy,
};

#[derive(Parser)]
#[command(name = "vibeops")]
#[command(about = "Natural-language query demo over a patient table", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and start an interactive query session
    Chat {
        /// Patient data file (CSV or JSON)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Username (prompted if omitted)
        #[arg(short, long, requires = "password")]
        username: Option<String>,

        /// Password (prompted if omitted)
        #[arg(short, long, requires = "username")]
        password: Option<String>,

        /// Skip the scripted thinking pause
        #[arg(long)]
        no_delay: bool,
    },
    /// Answer a single prompt and exit
    Ask {
        /// Free-text prompt
        prompt: String,

        /// Patient data file (CSV or JSON)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Username checked against the access gate
        #[arg(short, long)]
        username: String,

        /// Password checked against the access gate
        #[arg(short, long)]
        password: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Initialize configuration
    Init,
    /// Show configuration and data summary
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            data,
            username,
            password,
            no_delay,
        } => {
            let credentials = username.zip(password);
            ChatStrategy
                .execute(ChatInput {
                    data,
                    credentials,
                    no_delay,
                })
                .await
        }
        Commands::Ask {
            prompt,
            data,
            username,
            password,
            json,
        } => {
            AskStrategy
                .execute(AskInput {
                    prompt,
                    data,
                    json,
                    username,
                    password,
                })
                .await
        }
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
