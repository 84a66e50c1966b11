//! Result-list extraction.
//!
//! The register renders search results differently depending on result count
//! and entry type: sometimes as plain detail links, sometimes as a table,
//! sometimes as matrix cards. There is no single stable selector, so
//! extraction runs a prioritized strategy chain and the first strategy that
//! yields anything wins. Degraded field population beats zero results.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

use crate::nizza;
use crate::types::SearchHit;

type Strategy = fn(&Html, &Url) -> Vec<SearchHit>;

/// Harvest candidate hits from a rendered results page. Output order is
/// document order within the winning strategy; no further sorting.
pub fn extract_results(doc: &Html, page_url: &Url) -> Vec<SearchHit> {
    let strategies: [Strategy; 4] = [direct_links, table_rows, matrix_cards, generic_links];
    for strategy in strategies {
        let hits = strategy(doc, page_url);
        if !hits.is_empty() {
            return hits;
        }
    }
    Vec::new()
}

/// Links straight to the register view. Link text doubles as case number and
/// mark name placeholder; nothing else is derivable from a bare link.
fn direct_links(doc: &Html, page_url: &Url) -> Vec<SearchHit> {
    let link_sel = Selector::parse(r#"a[href*="marke/register"]"#).unwrap();

    let mut seen: HashSet<String> = HashSet::new();
    let mut hits = Vec::new();
    for link in doc.select(&link_sel) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Ok(resolved) = page_url.join(href) else {
            continue;
        };
        let detail_url = resolved.to_string();
        if !seen.insert(detail_url.clone()) {
            continue;
        }
        let text = link.text().collect::<String>().trim().to_string();
        hits.push(SearchHit {
            case_number: text.clone(),
            mark_name: text,
            detail_url,
            ..SearchHit::default()
        });
    }
    hits
}

/// Classic table rendering: one row per hit, columns in register order
/// (Aktenzeichen, Marke, Status, Inhaber, Klassen).
fn table_rows(doc: &Html, page_url: &Url) -> Vec<SearchHit> {
    let row_sel = Selector::parse("table tbody tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();
    let link_sel = Selector::parse("a").unwrap();

    let mut hits = Vec::new();
    for row in doc.select(&row_sel) {
        let cells: Vec<String> = row
            .select(&cell_sel)
            .map(|c| c.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() < 2 {
            continue;
        }

        let detail_url = row
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|h| page_url.join(h).ok())
            .map(|u| u.to_string())
            .unwrap_or_default();

        let case_number = cells[0].clone();
        if case_number.is_empty() && detail_url.is_empty() {
            continue;
        }

        let mark_name = if cells[1].is_empty() {
            cells[0].clone()
        } else {
            cells[1].clone()
        };

        hits.push(SearchHit {
            case_number,
            mark_name,
            status: cells.get(2).cloned().unwrap_or_default(),
            holder: cells.get(3).cloned().unwrap_or_default(),
            classes: nizza::parse_class_numbers(cells.get(4).map(String::as_str).unwrap_or("")),
            detail_url,
        });
    }
    hits
}

/// Matrix/card view used for image-heavy result sets.
fn matrix_cards(doc: &Html, page_url: &Url) -> Vec<SearchHit> {
    let card_sel =
        Selector::parse(".dpma-matrixcard, .card, [class*=matrix], [class*=treffer]").unwrap();
    let link_sel = Selector::parse("a").unwrap();

    let mut hits = Vec::new();
    for card in doc.select(&card_sel) {
        let Some(link) = card.select(&link_sel).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Ok(resolved) = page_url.join(href) else {
            continue;
        };

        let card_text = card
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        hits.push(SearchHit {
            case_number: card_text.chars().take(100).collect(),
            mark_name: link.text().collect::<String>().trim().to_string(),
            detail_url: resolved.to_string(),
            ..SearchHit::default()
        });
    }
    hits
}

/// Last resort: any link on the page that looks like a register entry but
/// is not the search form itself.
fn generic_links(doc: &Html, page_url: &Url) -> Vec<SearchHit> {
    let link_sel = Selector::parse("a[href]").unwrap();

    let mut hits = Vec::new();
    for link in doc.select(&link_sel) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Ok(resolved) = page_url.join(href) else {
            continue;
        };
        let target = resolved.to_string();
        if !target.contains("register")
            || !target.contains("marke")
            || target.contains("basis")
            || target.contains("javascript")
        {
            continue;
        }
        let text = link.text().collect::<String>().trim().to_string();
        hits.push(SearchHit {
            case_number: text.clone(),
            mark_name: text,
            detail_url: target,
            ..SearchHit::default()
        });
    }
    hits
}
