use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Secret keys refused outside development.
const PLACEHOLDER_SECRETS: &[&str] = &["development key", "change-me", ""];

const DEFAULT_DB_PATH: &str = "main.db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MESSENGER_ENV must be `development` or `production`, got {0:?}")]
    UnknownEnvironment(String),
    #[error("{var} is not a valid {expected}: {value:?}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("{0} must be set in production")]
    Missing(&'static str),
    #[error("MESSENGER_SECRET_KEY is unset or still a placeholder")]
    PlaceholderSecret,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

/// Application settings. Built once at startup and handed to the router;
/// handlers only ever see it through `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub database_path: PathBuf,
    pub debug: bool,
    pub secret_key: String,
    pub admin_username: String,
    pub admin_password: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database_path: PathBuf::from(DEFAULT_DB_PATH),
            debug: true,
            secret_key: "development key".into(),
            admin_username: "admin".into(),
            admin_password: "123".into(),
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
        }
    }

    /// Production variant. Secret and admin credentials have no defaults and
    /// must come from the environment.
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database_path: PathBuf::from(DEFAULT_DB_PATH),
            debug: false,
            secret_key: String::new(),
            admin_username: String::new(),
            admin_password: String::new(),
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Select the variant from `MESSENGER_ENV`, then apply `MESSENGER_*`
    /// overrides read through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("MESSENGER_ENV") {
            Some(v) => v.parse()?,
            None => Environment::Development,
        };

        let mut config = match environment {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
        };

        if let Some(v) = lookup("MESSENGER_DB_PATH") {
            config.database_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("MESSENGER_DEBUG") {
            config.debug = parse_bool("MESSENGER_DEBUG", &v)?;
        }
        if let Some(v) = lookup("MESSENGER_SECRET_KEY") {
            config.secret_key = v;
        }
        if let Some(v) = lookup("MESSENGER_ADMIN_USERNAME") {
            config.admin_username = v;
        }
        if let Some(v) = lookup("MESSENGER_ADMIN_PASSWORD") {
            config.admin_password = v;
        }
        if let Some(v) = lookup("MESSENGER_HOST") {
            config.host = v;
        }
        if let Some(v) = lookup("MESSENGER_PORT") {
            config.port = v.parse().map_err(|_| ConfigError::Invalid {
                var: "MESSENGER_PORT",
                value: v.clone(),
                expected: "port number",
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.environment != Environment::Production {
            return Ok(());
        }
        if PLACEHOLDER_SECRETS.contains(&self.secret_key.as_str()) {
            return Err(ConfigError::PlaceholderSecret);
        }
        if self.admin_username.is_empty() {
            return Err(ConfigError::Missing("MESSENGER_ADMIN_USERNAME"));
        }
        if self.admin_password.is_empty() {
            return Err(ConfigError::Missing("MESSENGER_ADMIN_PASSWORD"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            expected: "boolean",
        }),
    }
}
