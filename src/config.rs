use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_CHANGELOG_PAGE_SIZE: usize = 10;

/// Server-side maximum for `page_size` on the changelog listing. The whole
/// changelog is fetched in one request of this size and paged client-side.
pub const CHANGELOG_FETCH_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub lang: String,
    pub request_timeout: Duration,
    pub changelog_page_size: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        let api_base_url = env_string("ADMIN_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let api_token = env_string("ADMIN_API_TOKEN");

        let lang = env_string("ADMIN_LANG").unwrap_or_else(|| DEFAULT_LANG.to_string());

        let request_timeout = Duration::from_millis(
            std::env::var("ADMIN_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        );

        let changelog_page_size = std::env::var("ADMIN_CHANGELOG_PAGE_SIZE")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|size| *size >= 1)
            .unwrap_or(DEFAULT_CHANGELOG_PAGE_SIZE);

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            api_base_url,
            api_token,
            lang,
            request_timeout,
            changelog_page_size,
            log_level,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: None,
            lang: DEFAULT_LANG.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            changelog_page_size: DEFAULT_CHANGELOG_PAGE_SIZE,
            log_level: "info".to_string(),
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
