//! Progress events and their SSE wire framing.
//!
//! One request owns one ordered `tokio::sync::mpsc` channel of these. The
//! orchestrator is the sole producer; it emits any number of `Status` and
//! `Result` events followed by exactly one terminal `Done` or `Error`, then
//! drops its sender, which closes the stream.

use bytes::Bytes;
use serde::Serialize;

use crate::types::TrademarkRecord;

#[derive(Clone, Debug)]
pub enum ProgressEvent {
    /// Human-readable phase message, with an optional completed/total
    /// fraction while detail pages are being fetched.
    Status {
        message: String,
        progress: Option<f32>,
    },
    /// A single finished (or degraded) record, streamed as soon as it
    /// exists so consumers can render partial results.
    Result { record: TrademarkRecord },
    /// Terminal success. `records` is the authoritative full aggregate;
    /// consumers replace any state accumulated from `Result` events.
    Done { records: Vec<TrademarkRecord> },
    /// Terminal failure.
    Error { message: String },
}

#[derive(Serialize)]
struct StatusPayload<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    progress: Option<f32>,
}

#[derive(Serialize)]
struct ResultPayload<'a> {
    record: &'a TrademarkRecord,
}

#[derive(Serialize)]
struct DonePayload<'a> {
    records: &'a [TrademarkRecord],
}

#[derive(Serialize)]
struct ErrorPayload<'a> {
    message: &'a str,
}

impl ProgressEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Status { .. } => "status",
            Self::Result { .. } => "result",
            Self::Done { .. } => "done",
            Self::Error { .. } => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Error { .. })
    }

    fn payload_json(&self) -> String {
        let json = match self {
            Self::Status { message, progress } => serde_json::to_string(&StatusPayload {
                message,
                progress: *progress,
            }),
            Self::Result { record } => serde_json::to_string(&ResultPayload { record }),
            Self::Done { records } => serde_json::to_string(&DonePayload { records }),
            Self::Error { message } => serde_json::to_string(&ErrorPayload { message }),
        };
        json.unwrap_or_else(|_| "{}".to_string())
    }

    /// Frame as `event: <kind>\ndata: <JSON>\n\n`.
    pub fn to_sse_frame(&self) -> Bytes {
        Bytes::from(format!("event: {}\ndata: {}\n\n", self.kind(), self.payload_json()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_frame_omits_absent_progress() {
        let ev = ProgressEvent::Status {
            message: "Suche läuft".to_string(),
            progress: None,
        };
        let frame = String::from_utf8(ev.to_sse_frame().to_vec()).unwrap();
        assert_eq!(frame, "event: status\ndata: {\"message\":\"Suche läuft\"}\n\n");
    }

    #[test]
    fn status_frame_carries_progress_fraction() {
        let ev = ProgressEvent::Status {
            message: "1/2".to_string(),
            progress: Some(0.5),
        };
        let frame = String::from_utf8(ev.to_sse_frame().to_vec()).unwrap();
        assert!(frame.starts_with("event: status\ndata: "));
        assert!(frame.contains("\"progress\":0.5"));
        assert!(frame.ends_with("\n\n"));
    }

    #[test]
    fn done_frame_wraps_records() {
        let ev = ProgressEvent::Done { records: vec![] };
        let frame = String::from_utf8(ev.to_sse_frame().to_vec()).unwrap();
        assert_eq!(frame, "event: done\ndata: {\"records\":[]}\n\n");
    }

    #[test]
    fn result_frame_uses_camel_case_fields() {
        let ev = ProgressEvent::Result {
            record: crate::types::TrademarkRecord {
                case_number: "302023000001".to_string(),
                ..Default::default()
            },
        };
        let frame = String::from_utf8(ev.to_sse_frame().to_vec()).unwrap();
        assert!(frame.starts_with("event: result\ndata: {\"record\":{"));
        assert!(frame.contains("\"caseNumber\":\"302023000001\""));
        assert!(frame.contains("\"goodsAndServices\""));
    }

    #[test]
    fn terminal_kinds() {
        assert!(ProgressEvent::Done { records: vec![] }.is_terminal());
        assert!(
            ProgressEvent::Error {
                message: String::new()
            }
            .is_terminal()
        );
        assert!(
            !ProgressEvent::Status {
                message: String::new(),
                progress: None
            }
            .is_terminal()
        );
    }
}
