/// Runtime settings shared with every component through a context provider.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Prefix for every API path. Empty means same-origin relative URLs.
    pub api_base_url: String,
    pub notice_timeout_ms: u32,
    pub auth_redirect_delay_ms: u32,
    pub clock_refresh_ms: u32,
}

pub const DEFAULT_NOTICE_TIMEOUT_MS: u32 = 3_000;
pub const DEFAULT_AUTH_REDIRECT_DELAY_MS: u32 = 500;
pub const DEFAULT_CLOCK_REFRESH_MS: u32 = 60_000;

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_base_url: String::new(),
            notice_timeout_ms: DEFAULT_NOTICE_TIMEOUT_MS,
            auth_redirect_delay_ms: DEFAULT_AUTH_REDIRECT_DELAY_MS,
            clock_refresh_ms: DEFAULT_CLOCK_REFRESH_MS,
        }
    }
}

impl AppConfig {
    /// Reads build-time overrides (`FINANCE_API_BASE`) on top of the defaults.
    pub fn from_build_env() -> Self {
        Self::with_api_base(option_env!("FINANCE_API_BASE"))
    }

    fn with_api_base(base: Option<&str>) -> Self {
        let mut config = AppConfig::default();
        if let Some(base) = base {
            config.api_base_url = base.trim().trim_end_matches('/').to_string();
        }
        config
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_relative_urls() {
        let config = AppConfig::default();
        assert_eq!(config.url("/api/goals"), "/api/goals");
        assert_eq!(config.notice_timeout_ms, 3_000);
    }

    #[test]
    fn api_base_trailing_slash_is_dropped() {
        let config = AppConfig::with_api_base(Some("http://localhost:5000/ "));
        assert_eq!(config.url("/api/budgets"), "http://localhost:5000/api/budgets");
    }
}
