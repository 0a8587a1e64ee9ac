use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::EditorError;
use crate::sync::engine::DEFAULT_QUIET_PERIOD;

#[derive(Clone, Debug)]
pub struct EditorConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub quiet_period: Duration,
}

impl EditorConfig {
    pub fn new_from_env() -> Result<Self, EditorError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EditorError> {
        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| "sqlite://course_editor.db".to_string());

        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw
                .parse()
                .map_err(|e| EditorError::Config(format!("BIND_ADDR {:?}: {}", raw, e)))?,
            None => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        let quiet_period = match lookup("EDITOR_DEBOUNCE_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| EditorError::Config(format!("EDITOR_DEBOUNCE_MS {:?}: {}", raw, e)))?,
            None => DEFAULT_QUIET_PERIOD,
        };

        Ok(Self {
            database_url,
            bind_addr,
            quiet_period,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<EditorConfig, EditorError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EditorConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.database_url, "sqlite://course_editor.db");
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.quiet_period, Duration::from_millis(1000));
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("EDITOR_DEBOUNCE_MS", "250"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.quiet_period, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_debounce_is_rejected() {
        assert!(matches!(
            config(&[("EDITOR_DEBOUNCE_MS", "soon")]),
            Err(EditorError::Config(_))
        ));
    }
}
