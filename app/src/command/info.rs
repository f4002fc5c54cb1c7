use vibeops_config::Config;
use vibeops_core::Field;
use vibeops_query::RuleKind;
use vibeops_store::StoreOrigin;

use super::load_store;

/// Strategy for displaying configuration information.
///
/// Outputs:
/// - Config file location and access user (password masked)
/// - Data source, fallback cohort and loaded store summary
/// - Matcher rule order and keywords
/// - Chat settings
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default();

        println!("=== vibeops Configuration ===\n");

        println!("Config File: {}", Config::config_path()?.display());
        println!();

        println!("Access:");
        println!("  Username: {}", config.access.username);
        println!("  Password: {}", mask(&config.access.password));
        println!();

        println!("Data:");
        println!("  Path: {}", config.data.path.display());
        println!("  Fallback: {:?}", config.data.fallback);

        let store = load_store(&config, None);
        let source = match store.origin() {
            StoreOrigin::File(path) => format!("file ({})", path.display()),
            StoreOrigin::Fallback(cohort) => format!("fallback ({cohort:?})"),
            StoreOrigin::Memory => "in-memory".to_string(),
        };
        let summary = store.summary();
        println!("  Loaded From: {source}");
        println!("  Records: {}", summary.total);
        for (status, count) in &summary.by_status {
            println!("    {status}: {count}");
        }
        let columns: Vec<&str> = store.fields().iter().map(Field::column).collect();
        println!("  Columns: {}", columns.join(", "));
        println!();

        println!("Matcher:");
        let rules: Vec<&str> = config.matcher.rules.iter().map(RuleKind::as_str).collect();
        println!("  Rule Order: {} -> fallback", rules.join(" -> "));
        println!("  Count Keywords: {}", config.matcher.count_keywords.join(", "));
        println!("  Average Keywords: {}", config.matcher.average_keywords.join(", "));
        println!("  Fallback Limit: {}", config.matcher.fallback_limit);
        println!();

        println!("Chat:");
        println!("  Thinking Delay: {}ms", config.chat.thinking_delay_ms);
        println!("  History Limit: {}", config.chat.history_limit);
        println!("  Duplicate Policy: {:?}", config.chat.duplicate_policy);

        Ok(())
    }
}

fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    if count > 4 {
        let head: String = secret.chars().take(2).collect();
        format!("{head}{}", "*".repeat(count - 2))
    } else {
        "***".to_string()
    }
}
