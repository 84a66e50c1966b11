//! Remote browser provisioning and the CDP-driven register session.
//!
//! The pool API is a Kernel-style HTTP service: `POST /browsers` with
//! `{"stealth": true}` yields a billable session plus a CDP websocket
//! endpoint, `DELETE /browsers/{id}` tears it down. The orchestrator only
//! sees the two traits below, so tests substitute mocks and the automation
//! library stays an implementation detail.

use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::debug;

use crate::config::Config;
use crate::error::ScrapeError;

/// One connected browser tab pointed at the register. Strictly sequential:
/// the single shared tab is not safely concurrently navigable.
pub trait RegisterSession {
    /// Submit the query on the search form and return the rendered results
    /// page. Failure here is request-fatal.
    async fn run_search(&mut self, query: &str) -> Result<String, ScrapeError>;

    /// Navigate to one detail page and return the rendered DOM. Failure
    /// here is per-item only.
    async fn fetch_detail(&mut self, url: &str) -> Result<String, ScrapeError>;
}

/// Creates and destroys remote browser sessions. Both operations are
/// network-bound and fallible.
pub trait BrowserProvisioner {
    type Session: RegisterSession;

    /// Create a session (stealth mode requested) and connect to it.
    /// Returns the session id needed for release.
    async fn acquire(&self) -> Result<(String, Self::Session), ScrapeError>;

    /// Destroy the session by id.
    async fn release(&self, session_id: &str) -> Result<(), ScrapeError>;
}

#[derive(Deserialize)]
struct CreateBrowserResponse {
    session_id: String,
    cdp_ws_url: String,
}

/// HTTP client for the browser pool API.
#[derive(Clone)]
pub struct KernelClient {
    http: reqwest::Client,
    cfg: Config,
}

impl KernelClient {
    pub fn new(cfg: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            cfg,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.cfg.browser_api_url.trim_end_matches('/'), path)
    }
}

impl BrowserProvisioner for KernelClient {
    type Session = CdpSession;

    async fn acquire(&self) -> Result<(String, CdpSession), ScrapeError> {
        let session_err = |e: reqwest::Error| ScrapeError::Session(e.to_string());

        let created: CreateBrowserResponse = self
            .http
            .post(self.endpoint("/browsers"))
            .bearer_auth(&self.cfg.browser_api_token)
            .json(&serde_json::json!({ "stealth": true }))
            .send()
            .await
            .map_err(session_err)?
            .error_for_status()
            .map_err(session_err)?
            .json()
            .await
            .map_err(session_err)?;

        let session = CdpSession::connect(&created.cdp_ws_url, &self.cfg).await?;
        Ok((created.session_id, session))
    }

    async fn release(&self, session_id: &str) -> Result<(), ScrapeError> {
        let session_err = |e: reqwest::Error| ScrapeError::Session(e.to_string());
        self.http
            .delete(self.endpoint(&format!("/browsers/{session_id}")))
            .bearer_auth(&self.cfg.browser_api_token)
            .send()
            .await
            .map_err(session_err)?
            .error_for_status()
            .map_err(session_err)?;
        Ok(())
    }
}

/// Real session over chromiumoxide, connected to the remote endpoint.
pub struct CdpSession {
    _browser: Browser,
    page: Page,
    register_url: String,
    nav_timeout: Duration,
    search_settle: Duration,
    detail_settle: Duration,
}

impl CdpSession {
    async fn connect(ws_url: &str, cfg: &Config) -> Result<Self, ScrapeError> {
        let (browser, mut handler) = Browser::connect(ws_url)
            .await
            .map_err(|e| ScrapeError::Session(format!("CDP connect failed: {e}")))?;

        tokio::spawn(async move { while handler.next().await.is_some() {} });

        let existing = browser
            .pages()
            .await
            .map_err(|e| ScrapeError::Session(format!("page enumeration failed: {e}")))?;
        let page = match existing.into_iter().next() {
            Some(p) => p,
            None => browser
                .new_page("about:blank")
                .await
                .map_err(|e| ScrapeError::Session(format!("page creation failed: {e}")))?,
        };

        Ok(Self {
            _browser: browser,
            page,
            register_url: cfg.register_url.clone(),
            nav_timeout: cfg.nav_timeout,
            search_settle: cfg.search_settle,
            detail_settle: cfg.detail_settle,
        })
    }

    async fn goto(&self, url: &str) -> Result<(), String> {
        timeout(self.nav_timeout, self.page.goto(url))
            .await
            .map_err(|_| format!("navigation timeout after {:?}", self.nav_timeout))?
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Best-effort quiescence wait followed by the fixed settle delay. The
    /// register keeps rendering client-side after the last network request,
    /// so the idle signal alone returns too early.
    async fn settle(&self, delay: Duration) {
        let _ = timeout(Duration::from_secs(10), self.page.wait_for_navigation()).await;
        sleep(delay).await;
    }

    async fn rendered_content(&self) -> Result<String, String> {
        self.page.content().await.map_err(|e| e.to_string())
    }
}

impl RegisterSession for CdpSession {
    async fn run_search(&mut self, query: &str) -> Result<String, ScrapeError> {
        let url = self.register_url.clone();
        self.goto(&url).await.map_err(ScrapeError::SearchNavigation)?;
        self.settle(self.search_settle).await;

        // JSON string literal doubles as a JS string literal.
        let quoted = serde_json::to_string(query)
            .map_err(|e| ScrapeError::SearchNavigation(e.to_string()))?;
        self.page
            .evaluate(format!(
                r#"document.querySelector('input#marke[type="text"]').value = {quoted}"#
            ))
            .await
            .map_err(|e| ScrapeError::SearchNavigation(format!("search field fill failed: {e}")))?;

        self.page
            .find_element("input#rechercheStarten")
            .await
            .map_err(|e| ScrapeError::SearchNavigation(format!("search button not found: {e}")))?
            .click()
            .await
            .map_err(|e| ScrapeError::SearchNavigation(format!("search click failed: {e}")))?;

        self.settle(self.search_settle).await;
        debug!("search submitted, results page settled");
        self.rendered_content()
            .await
            .map_err(ScrapeError::SearchNavigation)
    }

    async fn fetch_detail(&mut self, url: &str) -> Result<String, ScrapeError> {
        self.goto(url).await.map_err(ScrapeError::DetailFetch)?;
        self.settle(self.detail_settle).await;
        self.rendered_content().await.map_err(ScrapeError::DetailFetch)
    }
}
