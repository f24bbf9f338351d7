//! Server configuration loaded from environment variables.

use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL URL. `None` runs the server on the in-memory store.
    pub database_url: Option<String>,
    pub database_schema: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window: Duration,
    pub body_limit_bytes: usize,
    pub admin_email: String,
    pub admin_password: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: None,
            database_schema: "public".into(),
            database_max_connections: 5,
            host: "0.0.0.0".into(),
            port: 3000,
            rate_limit_max_requests: 100,
            rate_limit_window: Duration::from_secs(15 * 60),
            body_limit_bytes: 1024 * 1024,
            admin_email: "admin@presentation-site.local".into(),
            admin_password: "admin123".into(),
        }
    }
}

impl AppConfig {
    /// | Env Var                    | Default                          |
    /// |----------------------------|----------------------------------|
    /// | `DATABASE_URL`             | unset (in-memory store)          |
    /// | `DATABASE_SCHEMA`          | `public`                         |
    /// | `DATABASE_MAX_CONNECTIONS` | `5`                              |
    /// | `HOST`                     | `0.0.0.0`                        |
    /// | `PORT`                     | `3000`                           |
    /// | `RATE_LIMIT_MAX_REQUESTS`  | `100`                            |
    /// | `RATE_LIMIT_WINDOW_SECS`   | `900`                            |
    /// | `BODY_LIMIT_BYTES`         | `1048576`                        |
    /// | `ADMIN_EMAIL`              | `admin@presentation-site.local`  |
    /// | `ADMIN_PASSWORD`           | `admin123`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let d = AppConfig::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };
        Ok(AppConfig {
            database_url: lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()),
            database_schema: text("DATABASE_SCHEMA", d.database_schema),
            database_max_connections: parse(&lookup, "DATABASE_MAX_CONNECTIONS", d.database_max_connections)?,
            host: text("HOST", d.host),
            port: parse(&lookup, "PORT", d.port)?,
            rate_limit_max_requests: parse(&lookup, "RATE_LIMIT_MAX_REQUESTS", d.rate_limit_max_requests)?,
            rate_limit_window: Duration::from_secs(parse(
                &lookup,
                "RATE_LIMIT_WINDOW_SECS",
                d.rate_limit_window.as_secs(),
            )?),
            body_limit_bytes: parse(&lookup, "BODY_LIMIT_BYTES", d.body_limit_bytes)?,
            admin_email: text("ADMIN_EMAIL", d.admin_email),
            admin_password: text("ADMIN_PASSWORD", d.admin_password),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = load(&[]).unwrap();
        assert!(cfg.database_url.is_none());
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
        assert_eq!(cfg.rate_limit_max_requests, 100);
        assert_eq!(cfg.rate_limit_window, Duration::from_secs(900));
        assert_eq!(cfg.admin_email, "admin@presentation-site.local");
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = load(&[
            ("DATABASE_URL", "postgres://localhost/site"),
            ("PORT", "8080"),
            ("RATE_LIMIT_WINDOW_SECS", "60"),
            ("DATABASE_SCHEMA", "cms"),
        ])
        .unwrap();
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/site"));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.rate_limit_window, Duration::from_secs(60));
        assert_eq!(cfg.database_schema, "cms");
    }

    #[test]
    fn invalid_number_is_an_error() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
    }
}
