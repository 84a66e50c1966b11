//! Markengreifer — DPMA trademark register scraper.
//!
//! Drives a remote, stealth-capable browser session over CDP, runs a mark
//! search on the register's web interface, harvests result links across its
//! unstable layouts and streams canonical trademark records back over SSE.

pub mod browser;
pub mod config;
pub mod detail;
pub mod error;
pub mod events;
pub mod nizza;
pub mod orchestrator;
pub mod results;
pub mod types;
