use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SCRAPE_DOMAIN: &str = "sonyliv.com";
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.6422.112 Safari/537.36";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Outbound request settings shared by both extractors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
    pub accept_language: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            user_agent: DESKTOP_USER_AGENT.to_string(),
            accept_language: ACCEPT_LANGUAGE.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub fetch: FetchConfig,
    /// Substring every `/scrape` URL must contain.
    pub scrape_domain: String,
}

impl AppConfig {
    /// Reads OTT_BIND, OTT_FETCH_TIMEOUT_SECS, OTT_SCRAPE_DOMAIN and OTT_USER_AGENT.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("OTT_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind_raw.parse().with_context(|| format!("OTT_BIND is not a socket address: {}", bind_raw))?;

        let timeout_secs = match lookup("OTT_FETCH_TIMEOUT_SECS") {
            Some(v) => v.trim().parse::<u64>().with_context(|| format!("OTT_FETCH_TIMEOUT_SECS is not a number: {}", v))?,
            None => DEFAULT_FETCH_TIMEOUT_SECS,
        };

        let mut fetch = FetchConfig { timeout: Duration::from_secs(timeout_secs.max(1)), ..FetchConfig::default() };
        if let Some(ua) = lookup("OTT_USER_AGENT").filter(|s| !s.trim().is_empty()) { fetch.user_agent = ua; }

        let scrape_domain = lookup("OTT_SCRAPE_DOMAIN")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SCRAPE_DOMAIN.to_string());

        Ok(AppConfig { bind, fetch, scrape_domain })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cfg(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let c = cfg(&[]).unwrap();
        assert_eq!(c.bind.to_string(), DEFAULT_BIND);
        assert_eq!(c.fetch.timeout, Duration::from_secs(10));
        assert_eq!(c.scrape_domain, "sonyliv.com");
        assert_eq!(c.fetch.user_agent, DESKTOP_USER_AGENT);
    }

    #[test]
    fn overrides_are_applied() {
        let c = cfg(&[
            ("OTT_BIND", "127.0.0.1:8080"),
            ("OTT_FETCH_TIMEOUT_SECS", "3"),
            ("OTT_SCRAPE_DOMAIN", "example.tv"),
            ("OTT_USER_AGENT", "test-agent"),
        ]).unwrap();
        assert_eq!(c.bind.port(), 8080);
        assert_eq!(c.fetch.timeout, Duration::from_secs(3));
        assert_eq!(c.scrape_domain, "example.tv");
        assert_eq!(c.fetch.user_agent, "test-agent");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(cfg(&[("OTT_BIND", "not-an-addr")]).is_err());
        assert!(cfg(&[("OTT_FETCH_TIMEOUT_SECS", "ten")]).is_err());
    }
}
