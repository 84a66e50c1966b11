use thiserror::Error;

/// Failure taxonomy for one search request.
///
/// Only `InvalidQuery`, `Session` and `SearchNavigation` abort the whole
/// request. A `DetailFetch` failure is recovered locally by substituting a
/// degraded record built from the originating hit. `Cancelled` means the
/// consumer went away; no further events are owed to anyone.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Suchbegriff fehlt")]
    InvalidQuery,

    #[error("browser session error: {0}")]
    Session(String),

    #[error("search navigation failed: {0}")]
    SearchNavigation(String),

    #[error("detail page fetch failed: {0}")]
    DetailFetch(String),

    #[error("request cancelled by consumer")]
    Cancelled,
}
