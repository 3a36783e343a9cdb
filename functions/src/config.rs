use std::net::SocketAddr;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("BIND_ADDR is not a socket address: {0}")]
    BindAddr(#[from] std::net::AddrParseError),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub chat_id: String,
    /// Used when the group description carries no date.
    pub start_date: Option<String>,
    pub api_base: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            bot_token: require("TELEGRAM_BOT_TOKEN")?,
            chat_id: require("TELEGRAM_CHAT_ID")?,
            start_date: get("START_DATE"),
            api_base: get("TELEGRAM_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            bind_addr: get("BIND_ADDR")
                .as_deref()
                .unwrap_or(DEFAULT_BIND_ADDR)
                .parse::<SocketAddr>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn minimal_environment_uses_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "-100500"),
        ]))
        .unwrap();

        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.chat_id, "-100500");
        assert_eq!(config.start_date, None);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
    }

    #[test]
    fn missing_token_is_reported_by_name() {
        let err = Config::from_lookup(lookup(&[("TELEGRAM_CHAT_ID", "-100500")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("TELEGRAM_BOT_TOKEN")));
        assert_eq!(err.to_string(), "TELEGRAM_BOT_TOKEN must be set");
    }

    #[test]
    fn blank_chat_id_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("TELEGRAM_CHAT_ID")));
    }

    #[test]
    fn optional_values_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "-100500"),
            ("START_DATE", "15 декабря"),
            ("TELEGRAM_API_BASE", "http://localhost:8081"),
            ("BIND_ADDR", "0.0.0.0:8080"),
        ]))
        .unwrap();

        assert_eq!(config.start_date.as_deref(), Some("15 декабря"));
        assert_eq!(config.api_base, "http://localhost:8081");
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn bad_bind_addr_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "-100500"),
            ("BIND_ADDR", "not-an-address"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::BindAddr(_)));
    }
}
