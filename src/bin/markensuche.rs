//! CLI front-end: one search against the live register, progress printed as
//! it streams, then a formatted report. `--json` appends the raw aggregate.

use std::process::ExitCode;

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use markengreifer::browser::KernelClient;
use markengreifer::config::Config;
use markengreifer::events::ProgressEvent;
use markengreifer::orchestrator;
use markengreifer::types::TrademarkRecord;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let want_json = args.iter().any(|a| a == "--json");
    let Some(query) = args.iter().skip(1).find(|a| !a.starts_with("--")) else {
        eprintln!("Usage: markensuche <suchbegriff> [--json]");
        return ExitCode::from(2);
    };

    println!("\nDPMA Markensuche: \"{query}\"");
    println!("{RULE}");

    let config = Config::from_env();
    let provisioner = KernelClient::new(config.clone());
    let (tx, mut rx) = mpsc::channel::<ProgressEvent>(32);

    let query2 = query.clone();
    let worker = tokio::spawn(async move {
        orchestrator::run(&provisioner, &config, &query2, tx).await;
    });

    let mut outcome: Option<Result<Vec<TrademarkRecord>, String>> = None;
    while let Some(ev) = rx.recv().await {
        match ev {
            ProgressEvent::Status { message, .. } => println!("{message}"),
            ProgressEvent::Result { record } => {
                println!(
                    "  ✓ {}",
                    if record.mark_name.is_empty() {
                        &record.case_number
                    } else {
                        &record.mark_name
                    }
                );
            }
            ProgressEvent::Done { records } => outcome = Some(Ok(records)),
            ProgressEvent::Error { message } => outcome = Some(Err(message)),
        }
    }
    let _ = worker.await;

    match outcome {
        Some(Ok(records)) => {
            print_report(query, &records);
            if want_json {
                println!("\n--- JSON ---");
                match serde_json::to_string_pretty(&records) {
                    Ok(json) => println!("{json}"),
                    Err(e) => eprintln!("JSON-Ausgabe fehlgeschlagen: {e}"),
                }
            }
            ExitCode::SUCCESS
        }
        Some(Err(message)) => {
            eprintln!("Fehler: {message}");
            ExitCode::FAILURE
        }
        None => {
            eprintln!("Fehler: Stream endete ohne Ergebnis");
            ExitCode::FAILURE
        }
    }
}

fn print_report(query: &str, records: &[TrademarkRecord]) {
    println!("\n\nDPMA Markensuche: \"{query}\"");
    println!("{RULE}");

    if records.is_empty() {
        println!("\nKeine Treffer gefunden.");
        return;
    }

    for (i, record) in records.iter().enumerate() {
        let title = [&record.mark_name, &record.case_number]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
            .unwrap_or("Unbekannt");
        println!("\nTreffer {}: {title}", i + 1);

        print_field("Aktenzeichen", &record.case_number);
        print_field("Markenform", &record.mark_form);
        print_field("Markenkategorie", &record.mark_category);
        print_field("Status", &record.status);
        print_field("Anmeldetag", &record.filing_date);
        if !record.holder_name.is_empty() {
            let holder = if record.holder_address.is_empty() {
                record.holder_name.clone()
            } else {
                format!("{}, {}", record.holder_name, record.holder_address)
            };
            print_field("Inhaber", &holder);
        }

        if !record.classes.is_empty() {
            println!("\n  Nizza-Klassen:");
            for class in &record.classes {
                println!("    {} - {}", class.class_number, class.description);
            }
        }

        if !record.goods_and_services.is_empty() {
            println!("\n  Waren/Dienstleistungen:");
            println!("    {}", record.goods_and_services);
        }

        println!("\n{RULE}");
    }
}

fn print_field(label: &str, value: &str) {
    if !value.is_empty() {
        println!("  {label:<16} {value}");
    }
}
