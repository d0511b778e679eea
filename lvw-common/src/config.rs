//! Configuration loading and resolution
//!
//! Every setting resolves through the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! The webhook endpoint has no usable default: startup refuses to run with
//! a missing or placeholder value rather than degrade.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Default check interval, in minutes.
pub const DEFAULT_CHECK_INTERVAL_MINUTES: f64 = 10.0;

/// Default published-sheet TSV export URL.
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRrZEUcAFIiGmzFAjjdUVKWhDSLue_SvTQIxT4ZbhlvBa6yc4l4juAZn3HREfvO0VIv2ms98453VItI/pub?gid=0&single=true&output=tsv";

/// Marker left in unconfigured webhook URLs.
const WEBHOOK_PLACEHOLDER: &str = "YOUR_WEBHOOK";

pub const WEBHOOK_URL_ENV: &str = "LVW_WEBHOOK_URL";
pub const SHEET_URL_ENV: &str = "LVW_SHEET_URL";
pub const CHECK_INTERVAL_ENV: &str = "LVW_CHECK_INTERVAL";

/// Values supplied on the command line; both binaries expose the same
/// override surface.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub webhook_url: Option<String>,
    pub sheet_url: Option<String>,
    pub check_interval_minutes: Option<f64>,
}

/// On-disk config file model (`lvw/config.toml`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub webhook_url: Option<String>,
    pub sheet_url: Option<String>,
    pub check_interval_minutes: Option<f64>,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Notification transport endpoint
    pub webhook_url: String,
    /// Published sheet TSV export URL
    pub sheet_url: String,
    /// Poll interval in (possibly fractional) minutes
    pub check_interval_minutes: f64,
}

impl Config {
    /// Resolve configuration from CLI overrides, the environment, and the
    /// config file, then validate it.
    pub fn resolve(overrides: &Overrides) -> Result<Config> {
        let file = load_toml_config(overrides.config_path.as_deref())?;
        Config::from_sources(overrides, &file)
    }

    /// Resolution without file loading; exercised directly by tests.
    pub fn from_sources(overrides: &Overrides, file: &TomlConfig) -> Result<Config> {
        let webhook_url = pick_string(
            "webhook_url",
            overrides.webhook_url.clone(),
            WEBHOOK_URL_ENV,
            file.webhook_url.clone(),
        )
        .ok_or_else(|| {
            Error::Config(format!(
                "webhook URL not configured. Supply one of:\n\
                 1. --webhook-url <url>\n\
                 2. Environment: {WEBHOOK_URL_ENV}=<url>\n\
                 3. TOML config: webhook_url = \"<url>\""
            ))
        })?;

        let sheet_url = pick_string(
            "sheet_url",
            overrides.sheet_url.clone(),
            SHEET_URL_ENV,
            file.sheet_url.clone(),
        )
        .unwrap_or_else(|| DEFAULT_SHEET_URL.to_string());

        let check_interval_minutes = match (
            overrides.check_interval_minutes,
            env_interval()?,
            file.check_interval_minutes,
        ) {
            (Some(cli), _, _) => cli,
            (None, Some(env), _) => env,
            (None, None, Some(file)) => file,
            (None, None, None) => DEFAULT_CHECK_INTERVAL_MINUTES,
        };

        let config = Config {
            webhook_url,
            sheet_url,
            check_interval_minutes,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the process must not start with.
    pub fn validate(&self) -> Result<()> {
        if self.webhook_url.trim().is_empty() || self.webhook_url.contains(WEBHOOK_PLACEHOLDER) {
            return Err(Error::Config(
                "webhook URL is not configured (placeholder value detected)".to_string(),
            ));
        }
        if !(self.check_interval_minutes.is_finite() && self.check_interval_minutes > 0.0) {
            return Err(Error::Config(format!(
                "check interval must be a positive number of minutes, got {}",
                self.check_interval_minutes
            )));
        }
        Ok(())
    }

    /// Poll interval as a `Duration`. Sub-minute fractions convert to
    /// seconds exactly.
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs_f64(self.check_interval_minutes * 60.0)
    }

    /// Webhook URL shortened for the startup banner.
    pub fn webhook_display(&self) -> &str {
        match self.webhook_url.char_indices().nth(50) {
            Some((idx, _)) => &self.webhook_url[..idx],
            None => &self.webhook_url,
        }
    }
}

/// Resolve one string setting through CLI → ENV → TOML, warning when more
/// than one source supplies a value.
fn pick_string(
    name: &str,
    cli: Option<String>,
    env_name: &str,
    file: Option<String>,
) -> Option<String> {
    let cli = cli.filter(|v| !v.trim().is_empty());
    let env = env_var(env_name);
    let file = file.filter(|v| !v.trim().is_empty());

    let mut sources = Vec::new();
    if cli.is_some() {
        sources.push("command line");
    }
    if env.is_some() {
        sources.push("environment");
    }
    if file.is_some() {
        sources.push("TOML");
    }
    if sources.len() > 1 {
        warn!(
            "{} found in multiple sources: {}. Using {} (highest priority).",
            name,
            sources.join(", "),
            sources[0]
        );
    }
    if let Some(source) = sources.first() {
        debug!("{} loaded from {}", name, source);
    }

    cli.or(env).or(file)
}

/// Non-empty environment variable, trimmed.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Check interval from the environment; a value that does not parse as a
/// number is a configuration error, not a silent fallback.
fn env_interval() -> Result<Option<f64>> {
    match env_var(CHECK_INTERVAL_ENV) {
        None => Ok(None),
        Some(raw) => raw.parse::<f64>().map(Some).map_err(|_| {
            Error::Config(format!(
                "{CHECK_INTERVAL_ENV} is not a number of minutes: {raw:?}"
            ))
        }),
    }
}

/// Load the TOML config file.
///
/// An explicitly given path must exist and parse. The default path
/// (platform config dir, `lvw/config.toml`) is optional: missing means
/// defaults, unreadable or malformed means a configuration error.
pub fn load_toml_config(explicit_path: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit_path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(TomlConfig::default()),
        },
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;
    debug!("config file loaded: {}", path.display());
    Ok(config)
}

/// Platform config file location (`~/.config/lvw/config.toml` on Linux).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lvw").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        std::env::remove_var(WEBHOOK_URL_ENV);
        std::env::remove_var(SHEET_URL_ENV);
        std::env::remove_var(CHECK_INTERVAL_ENV);
    }

    fn overrides_with_webhook() -> Overrides {
        Overrides {
            webhook_url: Some("https://hooks.example/abc".to_string()),
            ..Overrides::default()
        }
    }

    #[test]
    #[serial]
    fn cli_beats_env_beats_file() {
        clear_env();
        std::env::set_var(WEBHOOK_URL_ENV, "https://hooks.example/from-env");
        let file = TomlConfig {
            webhook_url: Some("https://hooks.example/from-file".to_string()),
            sheet_url: Some("https://sheets.example/from-file".to_string()),
            check_interval_minutes: Some(3.0),
        };

        let config = Config::from_sources(&overrides_with_webhook(), &file).unwrap();
        assert_eq!(config.webhook_url, "https://hooks.example/abc");
        // no CLI/env for these: file wins
        assert_eq!(config.sheet_url, "https://sheets.example/from-file");
        assert_eq!(config.check_interval_minutes, 3.0);

        let config = Config::from_sources(&Overrides::default(), &file).unwrap();
        assert_eq!(config.webhook_url, "https://hooks.example/from-env");
        clear_env();
    }

    #[test]
    #[serial]
    fn defaults_apply_when_nothing_is_supplied() {
        clear_env();
        let config =
            Config::from_sources(&overrides_with_webhook(), &TomlConfig::default()).unwrap();
        assert_eq!(config.sheet_url, DEFAULT_SHEET_URL);
        assert_eq!(config.check_interval_minutes, DEFAULT_CHECK_INTERVAL_MINUTES);
    }

    #[test]
    #[serial]
    fn missing_webhook_is_a_config_error() {
        clear_env();
        let err = Config::from_sources(&Overrides::default(), &TomlConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    #[serial]
    fn placeholder_webhook_is_rejected() {
        clear_env();
        let overrides = Overrides {
            webhook_url: Some(
                "https://discordapp.com/api/webhooks/YOUR_WEBHOOK_ID/YOUR_WEBHOOK_TOKEN"
                    .to_string(),
            ),
            ..Overrides::default()
        };
        let err = Config::from_sources(&overrides, &TomlConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    #[serial]
    fn non_positive_interval_is_rejected() {
        clear_env();
        let mut overrides = overrides_with_webhook();
        overrides.check_interval_minutes = Some(0.0);
        assert!(Config::from_sources(&overrides, &TomlConfig::default()).is_err());
        overrides.check_interval_minutes = Some(-5.0);
        assert!(Config::from_sources(&overrides, &TomlConfig::default()).is_err());
    }

    #[test]
    #[serial]
    fn unparseable_interval_env_is_a_config_error() {
        clear_env();
        std::env::set_var(CHECK_INTERVAL_ENV, "ten");
        let err =
            Config::from_sources(&overrides_with_webhook(), &TomlConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        clear_env();
    }

    #[test]
    fn sub_minute_intervals_convert_to_seconds() {
        let config = Config {
            webhook_url: "https://hooks.example/abc".to_string(),
            sheet_url: DEFAULT_SHEET_URL.to_string(),
            check_interval_minutes: 0.5,
        };
        assert_eq!(config.check_interval(), Duration::from_secs(30));

        let config = Config {
            check_interval_minutes: 2.0,
            ..config
        };
        assert_eq!(config.check_interval(), Duration::from_secs(120));
    }

    #[test]
    fn webhook_display_truncates_long_urls() {
        let config = Config {
            webhook_url: format!("https://hooks.example/{}", "x".repeat(100)),
            sheet_url: DEFAULT_SHEET_URL.to_string(),
            check_interval_minutes: 1.0,
        };
        assert_eq!(config.webhook_display().len(), 50);

        let config = Config {
            webhook_url: "https://short.example".to_string(),
            ..config
        };
        assert_eq!(config.webhook_display(), "https://short.example");
    }

    #[test]
    #[serial]
    fn explicit_config_file_is_loaded_and_must_exist() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "webhook_url = \"https://hooks.example/from-file\"").unwrap();
        writeln!(file, "check_interval_minutes = 0.25").unwrap();

        let loaded = load_toml_config(Some(&path)).unwrap();
        assert_eq!(
            loaded.webhook_url.as_deref(),
            Some("https://hooks.example/from-file")
        );
        assert_eq!(loaded.check_interval_minutes, Some(0.25));

        let missing = dir.path().join("nope.toml");
        assert!(load_toml_config(Some(&missing)).is_err());
    }

    #[test]
    fn malformed_config_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "webhook_url = [not toml").unwrap();
        assert!(load_toml_config(Some(&path)).is_err());
    }
}
