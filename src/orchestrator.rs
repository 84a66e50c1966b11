//! Per-request session lifecycle: acquire → search → sequential detail
//! fetches → aggregate → release.
//!
//! The remote session is billable and leak-prone, so release happens exactly
//! once on every exit path, including cancellation, and its own failure is
//! logged but never surfaced. A single bad detail page never aborts the
//! batch; it degrades to a record built from the originating hit.

use scraper::Html;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use url::Url;

use crate::browser::{BrowserProvisioner, RegisterSession};
use crate::config::Config;
use crate::detail;
use crate::error::ScrapeError;
use crate::events::ProgressEvent;
use crate::results;
use crate::types::{SearchHit, TrademarkRecord};

/// Run one search request to completion, reporting progress on `tx`.
///
/// Emits exactly one terminal event (`done` or `error`) unless the consumer
/// has already gone away, then drops the sender, closing the stream.
pub async fn run<P: BrowserProvisioner>(
    provisioner: &P,
    cfg: &Config,
    query: &str,
    tx: mpsc::Sender<ProgressEvent>,
) {
    let query = query.trim();
    if query.is_empty() {
        let _ = emit(
            &tx,
            ProgressEvent::Error {
                message: ScrapeError::InvalidQuery.to_string(),
            },
        )
        .await;
        return;
    }

    let base_url = match Url::parse(&cfg.register_url) {
        Ok(u) => u,
        Err(e) => {
            let _ = emit(
                &tx,
                ProgressEvent::Error {
                    message: format!("invalid register url: {e}"),
                },
            )
            .await;
            return;
        }
    };

    if emit(&tx, status("Starte Browser-Session…".to_string(), None))
        .await
        .is_err()
    {
        return;
    }

    let (session_id, mut session) = match provisioner.acquire().await {
        Ok(pair) => pair,
        Err(e) => {
            warn!(error = %e, "browser session acquisition failed");
            // Nothing was acquired, so there is nothing to release.
            let _ = emit(
                &tx,
                ProgressEvent::Error {
                    message: e.to_string(),
                },
            )
            .await;
            return;
        }
    };
    info!(%session_id, query, "browser session acquired");

    let outcome = drive(&mut session, &base_url, query, &tx).await;

    match outcome {
        Ok(records) => {
            let _ = emit(&tx, ProgressEvent::Done { records }).await;
        }
        Err(ScrapeError::Cancelled) => {
            debug!(%session_id, "consumer gone, abandoning request");
        }
        Err(e) => {
            let _ = emit(
                &tx,
                ProgressEvent::Error {
                    message: e.to_string(),
                },
            )
            .await;
        }
    }

    // Release exactly once. A cleanup failure must never mask or override
    // the outcome already reported above.
    match provisioner.release(&session_id).await {
        Ok(()) => info!(%session_id, "browser session released"),
        Err(e) => warn!(%session_id, error = %e, "browser session release failed"),
    }
}

async fn drive<S: RegisterSession>(
    session: &mut S,
    base_url: &Url,
    query: &str,
    tx: &mpsc::Sender<ProgressEvent>,
) -> Result<Vec<TrademarkRecord>, ScrapeError> {
    emit(tx, status(format!("Suche nach \"{query}\" im Register…"), None)).await?;

    let results_page = session.run_search(query).await?;
    let hits = results::extract_results(&Html::parse_document(&results_page), base_url);

    if hits.is_empty() {
        emit(tx, status("Keine Treffer gefunden.".to_string(), None)).await?;
        return Ok(Vec::new());
    }
    emit(
        tx,
        status(format!("{} Treffer gefunden.", hits.len()), Some(0.0)),
    )
    .await?;

    let total = hits.len();
    let mut records = Vec::with_capacity(total);
    for (i, hit) in hits.iter().enumerate() {
        let fraction = i as f32 / total as f32;

        if hit.detail_url.is_empty() {
            emit(
                tx,
                status(
                    format!(
                        "Treffer {}/{total}: {} – keine Detailseite verfügbar",
                        i + 1,
                        hit_label(hit)
                    ),
                    Some(fraction),
                ),
            )
            .await?;
            continue;
        }

        emit(
            tx,
            status(
                format!("Lade Detailseite {}/{total}: {}", i + 1, hit_label(hit)),
                Some(fraction),
            ),
        )
        .await?;

        let record = match session.fetch_detail(&hit.detail_url).await {
            Ok(page) => detail::extract_detail(&Html::parse_document(&page)),
            Err(ScrapeError::Cancelled) => return Err(ScrapeError::Cancelled),
            Err(e) => {
                warn!(url = %hit.detail_url, error = %e, "detail fetch failed, degrading");
                TrademarkRecord::from_hit(hit)
            }
        };

        emit(
            tx,
            ProgressEvent::Result {
                record: record.clone(),
            },
        )
        .await?;
        records.push(record);
    }

    Ok(records)
}

fn status(message: String, progress: Option<f32>) -> ProgressEvent {
    ProgressEvent::Status { message, progress }
}

fn hit_label(hit: &SearchHit) -> &str {
    if !hit.case_number.is_empty() {
        &hit.case_number
    } else {
        &hit.mark_name
    }
}

/// A closed channel means the consumer disconnected; treat it as
/// cancellation so the caller can skip straight to session release.
async fn emit(
    tx: &mpsc::Sender<ProgressEvent>,
    event: ProgressEvent,
) -> Result<(), ScrapeError> {
    tx.send(event).await.map_err(|_| ScrapeError::Cancelled)
}
