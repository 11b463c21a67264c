use anyhow::Result;

/// Fallback scoring service address when no base URL is configured.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Log level when RUST_LOG is unset. Failures are logged below it.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Client configuration loaded from environment variables.
/// Nothing is required; every value has a fallback.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base: resolve_api_base(
                optional_env("MATCHER_API_BASE").or_else(|| optional_env("NEXT_PUBLIC_API_BASE")),
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    /// Replaces the configured base URL, e.g. from a command-line flag.
    pub fn with_api_base(mut self, api_base: Option<String>) -> Self {
        if let Some(base) = api_base {
            self.api_base = resolve_api_base(Some(base));
        }
        self
    }
}

/// Picks the configured base URL or the loopback default, without a trailing slash.
fn resolve_api_base(configured: Option<String>) -> String {
    let base = configured
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    base.trim_end_matches('/').to_string()
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
