use std::fmt;
use std::path::PathBuf;

/// Environment variable holding the bot token.
pub const TOKEN_VAR: &str = "TELEGRAM_TOKEN";

/// Environment variable for the state directory (logs).
pub const DATA_DIR_VAR: &str = "BOT_DATA_DIR";

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Required variable is not set.
    MissingVar(&'static str),
    /// Validation error.
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVar(name) => {
                write!(f, "{} is not set (environment or .env file)", name)
            }
            Self::Validation(msg) => write!(f, "config validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub telegram_token: String,
    /// Directory for state files (logs). Defaults to current directory.
    pub data_dir: PathBuf,
}

impl Config {
    /// Load from the process environment, after reading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Variables already in the environment take precedence over .env
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let telegram_token = lookup(TOKEN_VAR)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingVar(TOKEN_VAR))?;

        // Telegram tokens are formatted as {bot_id}:{secret} where bot_id is numeric
        let token_parts: Vec<&str> = telegram_token.split(':').collect();
        if token_parts.len() != 2 || token_parts[0].parse::<u64>().is_err() || token_parts[1].is_empty() {
            return Err(ConfigError::Validation(format!(
                "{} appears invalid (expected format: 123456789:ABCdefGHI...)",
                TOKEN_VAR
            )));
        }

        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            telegram_token,
            data_dir,
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    fn assert_err<T>(result: Result<T, ConfigError>) -> ConfigError {
        match result {
            Ok(_) => panic!("expected error, got Ok"),
            Err(e) => e,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = load(&[("TELEGRAM_TOKEN", "123456789:ABCdefGHIjklMNOpqrsTUVwxyz")])
            .expect("should load valid config");
        assert_eq!(config.telegram_token, "123456789:ABCdefGHIjklMNOpqrsTUVwxyz");
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.log_dir(), PathBuf::from("./logs"));
    }

    #[test]
    fn test_missing_token() {
        let err = assert_err(load(&[]));
        assert!(matches!(err, ConfigError::MissingVar("TELEGRAM_TOKEN")));
        assert!(err.to_string().contains("TELEGRAM_TOKEN"));
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let err = assert_err(load(&[("TELEGRAM_TOKEN", "   ")]));
        assert!(matches!(err, ConfigError::MissingVar(_)));
    }

    #[test]
    fn test_token_is_trimmed() {
        let config = load(&[("TELEGRAM_TOKEN", " 42:secret\n")]).unwrap();
        assert_eq!(config.telegram_token, "42:secret");
    }

    #[test]
    fn test_invalid_token_format_no_colon() {
        let err = assert_err(load(&[("TELEGRAM_TOKEN", "invalid_token_no_colon")]));
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("invalid"));
    }

    #[test]
    fn test_invalid_token_format_non_numeric_id() {
        let err = assert_err(load(&[("TELEGRAM_TOKEN", "notanumber:ABCdef")]));
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_invalid_token_format_empty_secret() {
        let err = assert_err(load(&[("TELEGRAM_TOKEN", "123456789:")]));
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_custom_data_dir() {
        let config = load(&[
            ("TELEGRAM_TOKEN", "1:x"),
            ("BOT_DATA_DIR", "/var/lib/servicebot"),
        ])
        .unwrap();
        assert_eq!(config.log_dir(), PathBuf::from("/var/lib/servicebot/logs"));
    }
}
