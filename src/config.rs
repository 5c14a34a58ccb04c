use crate::errors::{EngineError, EngineResult};

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    /// Allowed browser origins. Empty means any origin (`CORS_ORIGINS=*`).
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> EngineResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let server_port = var_or("SERVER_PORT", "8000")
            .trim()
            .parse::<u16>()
            .map_err(|e| EngineError::Config(format!("SERVER_PORT: {e}")))?;

        let server_host = var_or("SERVER_HOST", "127.0.0.1").trim().to_string();
        if server_host.is_empty() {
            return Err(EngineError::Config("SERVER_HOST: empty".into()));
        }

        let cors_origins = parse_origins(&var_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS));

        Ok(Self {
            server_host,
            server_port,
            cors_origins,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".into(),
            server_port: 8000,
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    if raw.trim() == "*" {
        return Vec::new();
    }
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8000");
        assert_eq!(cfg.cors_origins.len(), 2);
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("SERVER_HOST", "0.0.0.0"),
            ("SERVER_PORT", "9100"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
        ]))
        .unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9100");
        assert_eq!(cfg.cors_origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_wildcard_origins() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("CORS_ORIGINS", "*")])).unwrap();
        assert!(cfg.cors_origins.is_empty());
    }

    #[test]
    fn test_bad_port() {
        let err = AppConfig::from_lookup(lookup_from(&[("SERVER_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, EngineError::Config(ref m) if m.starts_with("SERVER_PORT")));
    }
}
