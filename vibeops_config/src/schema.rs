use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// Matcher and store settings live next to the code that reads them.
use vibeops_query::MatcherConfig;
use vibeops_store::{DuplicatePolicy, FallbackCohort};

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DataConfig {
    #[serde(default = "DataConfig::default_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub fallback: FallbackCohort,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            fallback: FallbackCohort::default(),
        }
    }
}

impl DataConfig {
    fn default_path() -> PathBuf {
        PathBuf::from("patients_dummy.csv")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AccessConfig {
    #[serde(default = "AccessConfig::default_username")]
    pub username: String,
    #[serde(default = "AccessConfig::default_password")]
    pub password: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            username: Self::default_username(),
            password: Self::default_password(),
        }
    }
}

impl AccessConfig {
    fn default_username() -> String {
        "demo".to_string()
    }

    fn default_password() -> String {
        "harvard2026".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Pause after each scripted "thinking" step. `0` disables it.
    #[serde(default = "ChatConfig::default_thinking_delay_ms")]
    pub thinking_delay_ms: u64,
    /// Entries shown by `/history`.
    #[serde(default = "ChatConfig::default_history_limit")]
    pub history_limit: usize,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: Self::default_thinking_delay_ms(),
            history_limit: Self::default_history_limit(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl ChatConfig {
    const fn default_thinking_delay_ms() -> u64 {
        500
    }

    const fn default_history_limit() -> usize {
        20
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("vibeops"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'vibeops init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Load the config file, or use built-in defaults if it is missing or broken.
    #[must_use]
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => {
                info!("Loaded config from ~/vibeops/config.json");
                config
            }
            Err(e) => {
                warn!("{e}. Using default configuration");
                Self::default()
            }
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, Self::template()?)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Point data.path at your patient CSV or JSON file");
        println!("   2. Change access.username / access.password for your demo");
        println!("   3. Run 'vibeops chat' to start a session");
        println!();
        println!("🔧 Configuration options:");
        println!("   - data.fallback: cohort used when the data file cannot be read (seed, empty)");
        println!("   - matcher.rules: rule evaluation order (count, average, free_text, id_lookup)");
        println!("   - chat.thinking_delay_ms: pause per scripted thinking step (0 disables)");
        println!("   - chat.duplicate_policy: allow, warn or reject duplicate patient IDs");
        println!();
        Ok(())
    }

    /// Default configuration rendered as pretty JSON.
    pub fn template() -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&Self::default())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let Ok(config) = serde_json::from_str::<Config>("{}") else {
            panic!("empty object should parse");
        };

        assert_eq!(config, Config::default());
        assert_eq!(config.access.username, "demo");
        assert_eq!(config.chat.thinking_delay_ms, 500);
    }

    #[test]
    fn test_partial_sections() {
        let json = r#"{
            "data": { "path": "cohort.json", "fallback": "empty" },
            "chat": { "duplicate_policy": "reject" }
        }"#;
        let Ok(config) = serde_json::from_str::<Config>(json) else {
            panic!("partial config should parse");
        };

        assert_eq!(config.data.path, PathBuf::from("cohort.json"));
        assert_eq!(config.data.fallback, FallbackCohort::Empty);
        assert_eq!(config.chat.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(config.chat.history_limit, 20);
        assert_eq!(config.matcher, MatcherConfig::default());
    }

    #[test]
    fn test_template_round_trips() {
        let Ok(template) = Config::template() else {
            panic!("template should render");
        };
        let parsed: Result<Config, _> = serde_json::from_str(&template);
        assert!(matches!(parsed, Ok(ref c) if *c == Config::default()));
    }
}
