use actix_web::{App, HttpResponse, HttpServer, Responder, get, post, web};
use bytes::Bytes;
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use markengreifer::browser::KernelClient;
use markengreifer::config::Config;
use markengreifer::events::ProgressEvent;
use markengreifer::orchestrator;

// -------------------------
// Request / Response Types
// -------------------------

#[derive(Deserialize)]
struct SearchReq {
    query: String,
}

#[derive(Deserialize)]
struct StreamParams {
    query: String,
}

struct AppState {
    config: Config,
    provisioner: KernelClient,
}

// -------------------------
// HTTP Handlers
// -------------------------

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().body(
        "Markengreifer online.\n\
         JSON:\n  POST /search {\"query\":\"Anker\"}\n\
         Stream:\n  GET  /search/stream?query=Anker (SSE)",
    )
}

#[get("/healthz")]
async fn healthz() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

/// Non-streaming entry point: runs the whole request and answers with the
/// final aggregate only.
#[post("/search")]
async fn search_endpoint(
    body: web::Json<SearchReq>,
    state: web::Data<AppState>,
) -> impl Responder {
    let (tx, mut rx) = mpsc::channel::<ProgressEvent>(32);
    let query = body.query.clone();
    let state2 = state.clone();
    actix_web::rt::spawn(async move {
        orchestrator::run(&state2.provisioner, &state2.config, &query, tx).await;
    });

    let mut outcome = None;
    while let Some(ev) = rx.recv().await {
        match ev {
            ProgressEvent::Done { records } => outcome = Some(Ok(records)),
            ProgressEvent::Error { message } => outcome = Some(Err(message)),
            _ => {}
        }
    }

    match outcome {
        Some(Ok(records)) => HttpResponse::Ok().json(serde_json::json!({ "records": records })),
        Some(Err(message)) => {
            HttpResponse::BadGateway().json(serde_json::json!({ "error": message }))
        }
        None => HttpResponse::InternalServerError()
            .json(serde_json::json!({ "error": "stream ended without terminal event" })),
    }
}

// --------------
// SSE streaming
// --------------

#[get("/search/stream")]
async fn search_stream(
    q: web::Query<StreamParams>,
    state: web::Data<AppState>,
) -> impl Responder {
    let (tx, mut rx) = mpsc::channel::<ProgressEvent>(32);
    let query = q.query.clone();
    let state2 = state.clone();

    actix_web::rt::spawn(async move {
        orchestrator::run(&state2.provisioner, &state2.config, &query, tx).await;
    });

    let stream = async_stream::stream! {
        while let Some(ev) = rx.recv().await {
            yield Ok::<Bytes, actix_web::Error>(ev.to_sse_frame());
        }
    };

    HttpResponse::Ok()
        .insert_header(("Content-Type", "text/event-stream"))
        .insert_header(("Cache-Control", "no-cache"))
        .insert_header(("Connection", "keep-alive"))
        .streaming(stream)
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();
    info!(register_url = %config.register_url, "starting Markengreifer on 0.0.0.0:8080");

    HttpServer::new(move || {
        let config = config.clone();
        App::new()
            .app_data(web::Data::new(AppState {
                provisioner: KernelClient::new(config.clone()),
                config,
            }))
            .service(index)
            .service(healthz)
            .service(search_endpoint)
            .service(search_stream)
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
