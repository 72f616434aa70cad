use std::env;
use std::time::Duration;

use crate::services::{OverlapPolicy, Policies, ReturnPolicy};

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the booking backend the client talks to
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Listening port of the demo backend
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub overlap_policy: OverlapPolicy,
    pub return_policy: ReturnPolicy,
    pub seed_demo: bool,
}

fn parsed_or_default<T: std::str::FromStr + Default>(key: &str) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={}, using default", key, raw);
            T::default()
        }),
        Err(_) => T::default(),
    }
}

impl Config {
    pub fn from_env() -> Self {
        let api_base_url = env::var("API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

        Self {
            api_base_url,
            request_timeout: Duration::from_secs(
                env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(Vec::new),
            overlap_policy: parsed_or_default("OVERLAP_POLICY"),
            return_policy: parsed_or_default("RETURN_POLICY"),
            seed_demo: env::var("SEED_DEMO").is_ok(),
        }
    }

    pub fn policies(&self) -> Policies {
        Policies {
            overlap: self.overlap_policy,
            returns: self.return_policy,
        }
    }
}
