//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.mood-diary/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::mood::{Mood, resolve_date_arg};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DiaryConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_mood: Option<Mood>,
    pub default_date: Option<String>,
    pub markdown: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_LOG_FILE: &str = "mood-diary.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub mood: Mood,
    pub date: String,
    pub markdown: bool,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub mood: Option<Mood>,
    pub date: Option<String>,
    pub log_file: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Startup log
// ============================================================================

/// Messages raised while loading and resolving config. The file logger is
/// only installed once the config names its file and level, so `main`
/// replays these after `WriteLogger::init`.
#[derive(Debug, Default)]
pub struct StartupLog {
    entries: Vec<(Level, String)>,
}

impl StartupLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug(&mut self, message: impl Into<String>) {
        self.entries.push((Level::Debug, message.into()));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.entries.push((Level::Info, message.into()));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.entries.push((Level::Warn, message.into()));
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, message)| message.as_str())
    }

    /// Emits every collected message through the `log` facade.
    pub fn replay(self) {
        for (level, message) in self.entries {
            log::log!(level, "{}", message);
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.mood-diary/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".mood-diary").join("config.toml"))
}

/// Load config from `path`, or from `~/.mood-diary/config.toml` when `None`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DiaryConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(
    path: Option<&Path>,
    startup: &mut StartupLog,
) -> Result<DiaryConfig, ConfigError> {
    let path = match path.map(Path::to_path_buf).or_else(config_path) {
        Some(p) => p,
        None => {
            startup.warn("Could not determine home directory, using default config");
            return Ok(DiaryConfig::default());
        }
    };

    if !path.exists() {
        startup.info(format!(
            "No config file found, generating default at {}",
            path.display()
        ));
        generate_default_config(&path, startup);
        return Ok(DiaryConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    startup.info(format!("Loaded config from {}", path.display()));
    startup.debug(format!("Config: {:?}", config));
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<DiaryConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path, startup: &mut StartupLog) {
    let default_content = r#"# Mood Diary Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_mood = "happy"             # happy, sad, angry, anxious, calm, tired
# default_date = "today"             # "today", "YYYY-MM-DD", or "" for empty
# markdown = false                   # Render the analysis as markdown

# [server]
# base_url = "http://localhost:3000" # Or set MOOD_DIARY_BASE_URL env var

# [logging]
# level = "debug"                    # Or set MOOD_DIARY_LOG_LEVEL env var
# file = "mood-diary.log"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        startup.warn(format!("Failed to create config directory: {}", e));
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        startup.warn(format!("Failed to write default config: {}", e));
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(
    config: &DiaryConfig,
    cli: &CliOverrides,
    startup: &mut StartupLog,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("MOOD_DIARY_BASE_URL").ok())
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let mood = cli.mood.or(config.general.default_mood).unwrap_or_default();

    // Date: CLI → config → empty. Bad values fall back to an empty field.
    let date = cli
        .date
        .as_deref()
        .or(config.general.default_date.as_deref())
        .map(|arg| {
            resolve_date_arg(arg).unwrap_or_else(|e| {
                startup.warn(format!("Ignoring default date: {}", e));
                String::new()
            })
        })
        .unwrap_or_default();

    // Log level: env → config → default
    let log_level = std::env::var("MOOD_DIARY_LOG_LEVEL")
        .ok()
        .or_else(|| config.logging.level.clone())
        .and_then(|level| parse_level(&level, startup))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        base_url,
        mood,
        date,
        markdown: config.general.markdown.unwrap_or(false),
        log_level,
        log_file: PathBuf::from(log_file),
    }
}

fn parse_level(level: &str, startup: &mut StartupLog) -> Option<LevelFilter> {
    match level.trim().parse() {
        Ok(filter) => Some(filter),
        Err(_) => {
            startup.warn(format!("Unknown log level '{}', using default", level));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = DiaryConfig::default();
        assert!(config.server.base_url.is_none());
        assert!(config.general.default_mood.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(
            &DiaryConfig::default(),
            &CliOverrides::default(),
            &mut StartupLog::new(),
        );
        assert_eq!(resolved.mood, Mood::Happy);
        assert_eq!(resolved.date, "");
        assert!(!resolved.markdown);
        assert_eq!(resolved.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = DiaryConfig {
            general: GeneralConfig {
                default_mood: Some(Mood::Tired),
                default_date: Some("2024-06-01".to_string()),
                markdown: Some(true),
            },
            logging: LoggingConfig {
                level: Some("warn".to_string()),
                file: Some("/tmp/diary.log".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default(), &mut StartupLog::new());
        assert_eq!(resolved.mood, Mood::Tired);
        assert_eq!(resolved.date, "2024-06-01");
        assert!(resolved.markdown);
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/diary.log"));
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = DiaryConfig {
            general: GeneralConfig {
                default_mood: Some(Mood::Sad),
                ..Default::default()
            },
            server: ServerConfig {
                base_url: Some("http://config.example".to_string()),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            base_url: Some("http://cli.example".to_string()),
            mood: Some(Mood::Calm),
            ..Default::default()
        };
        let resolved = resolve(&config, &cli, &mut StartupLog::new());
        assert_eq!(resolved.base_url, "http://cli.example");
        assert_eq!(resolved.mood, Mood::Calm);
    }

    #[test]
    fn test_resolve_invalid_date_falls_back_to_empty() {
        let cli = CliOverrides {
            date: Some("not-a-date".to_string()),
            ..Default::default()
        };
        let mut startup = StartupLog::new();
        let resolved = resolve(&DiaryConfig::default(), &cli, &mut startup);
        assert_eq!(resolved.date, "");
        let warnings: Vec<&str> = startup.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("not-a-date"));
    }

    #[test]
    fn test_unknown_config_level_is_recorded() {
        let config = DiaryConfig {
            logging: LoggingConfig {
                level: Some("loud".to_string()),
                file: None,
            },
            ..Default::default()
        };
        let mut startup = StartupLog::new();
        let resolved = resolve(&config, &CliOverrides::default(), &mut startup);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert!(startup.warnings().any(|w| w.contains("loud")));
    }

    #[test]
    fn test_toml_parses_all_sections() {
        let toml_str = r#"
[general]
default_mood = "anxious"
default_date = "today"
markdown = true

[server]
base_url = "https://diary.example.com"

[logging]
level = "info"
file = "diary.log"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.general.default_mood, Some(Mood::Anxious));
        assert_eq!(config.general.default_date.as_deref(), Some("today"));
        assert_eq!(
            config.server.base_url.as_deref(),
            Some("https://diary.example.com")
        );
        assert_eq!(config.logging.level.as_deref(), Some("info"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config = parse_config("[server]\nbase_url = \"http://x\"\n").unwrap();
        assert_eq!(config.server.base_url.as_deref(), Some("http://x"));
        assert!(config.general.markdown.is_none());
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_unknown_mood_is_parse_error() {
        let result = parse_config("[general]\ndefault_mood = \"grumpy\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_parse_level() {
        let mut startup = StartupLog::new();
        assert_eq!(parse_level("INFO", &mut startup), Some(LevelFilter::Info));
        assert_eq!(parse_level("off", &mut startup), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud", &mut startup), None);
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = std::env::temp_dir().join(format!("mood-diary-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let mut startup = StartupLog::new();
        let config = load_config(Some(&path), &mut startup).unwrap();
        assert!(config.server.base_url.is_none());
        assert!(path.exists());
        assert_eq!(startup.warnings().count(), 0);

        // The generated file is all comments, so it loads as defaults.
        let reloaded = load_config(Some(&path), &mut StartupLog::new()).unwrap();
        assert!(reloaded.general.default_mood.is_none());

        let _ = fs::remove_dir_all(&dir);
    }
}
