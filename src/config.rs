use std::env;
use std::time::Duration;

pub const DPMA_BASE: &str = "https://register.dpma.de/DPMAregister/marke/basis";

/// Runtime settings, all overridable via environment.
///
/// The settle delays exist because the register keeps rendering client-side
/// after the last network request; network-idle alone returns too early.
/// They are tuning knobs, not part of any contract.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base search page of the register.
    pub register_url: String,
    /// Browser pool API, e.g. "https://api.example.com".
    pub browser_api_url: String,
    /// Bearer token for the browser pool API.
    pub browser_api_token: String,
    /// Hard ceiling for a single page navigation.
    pub nav_timeout: Duration,
    /// Extra wait after the search results page goes quiet.
    pub search_settle: Duration,
    /// Extra wait after a detail page goes quiet.
    pub detail_settle: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            register_url: env::var("REGISTER_URL").unwrap_or_else(|_| DPMA_BASE.to_string()),
            browser_api_url: env::var("BROWSER_API_URL")
                .unwrap_or_else(|_| "https://api.onkernel.com".to_string()),
            browser_api_token: env::var("BROWSER_API_TOKEN").unwrap_or_default(),
            nav_timeout: secs_from_env("NAV_TIMEOUT_SECS", 30),
            search_settle: secs_from_env("SEARCH_SETTLE_SECS", 3),
            detail_settle: secs_from_env("DETAIL_SETTLE_SECS", 2),
        }
    }
}

fn secs_from_env(key: &str, default: u64) -> Duration {
    let secs = env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default);
    Duration::from_secs(secs)
}
