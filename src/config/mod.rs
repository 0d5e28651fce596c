//! Configuration module - environment variable parsing

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::bot::BotConfig;
use crate::util::time::DEFAULT_TICK_BUDGET_MS;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Server binding address
    pub server_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit JSON log lines instead of human readable ones
    pub log_json: bool,

    /// Names of the bots this process hosts
    pub bot_names: Vec<String>,
    /// Time the engine allows per tick decision
    pub tick_budget: Duration,
    /// Move to the nearest coin when no enemy is present
    pub seek_coins: bool,
    /// Mirror bot state into Save actions
    pub persist_state: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // PORT wins over SERVER_ADDR when a platform provides it
        let server_addr = if let Ok(port) = env::var("PORT") {
            format!("0.0.0.0:{}", port)
        } else {
            env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string())
        };

        let bot_names = parse_names(
            &env::var("BOT_NAMES").map_err(|_| ConfigError::Missing("BOT_NAMES"))?,
        );
        if bot_names.is_empty() {
            return Err(ConfigError::Invalid("BOT_NAMES"));
        }

        let tick_budget_ms = match env::var("TICK_BUDGET_MS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("TICK_BUDGET_MS"))?,
            Err(_) => DEFAULT_TICK_BUDGET_MS,
        };

        Ok(Self {
            server_addr: server_addr
                .parse()
                .map_err(|_| ConfigError::InvalidAddress)?,

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_json: env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),

            bot_names,
            tick_budget: Duration::from_millis(tick_budget_ms),
            seek_coins: parse_flag("SEEK_COINS")?,
            persist_state: parse_flag("PERSIST_STATE")?,
        })
    }

    /// Defaults for the given bot names, without touching the environment
    pub fn with_bots<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            server_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_level: "info".to_string(),
            log_json: false,
            bot_names: names.into_iter().map(Into::into).collect(),
            tick_budget: Duration::from_millis(DEFAULT_TICK_BUDGET_MS),
            seek_coins: false,
            persist_state: false,
        }
    }

    /// Per-bot settings derived from this configuration
    pub fn bot_config(&self, name: &str) -> BotConfig {
        BotConfig {
            name: name.to_string(),
            seek_coins: self.seek_coins,
            persist_state: self.persist_state,
            tick_budget: self.tick_budget,
        }
    }
}

/// Split a comma separated list, dropping blanks and duplicates
fn parse_names(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

fn parse_flag(key: &'static str) -> Result<bool, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::Invalid(key)),
        },
        Err(_) => Ok(false),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Invalid server address format")]
    InvalidAddress,
}
