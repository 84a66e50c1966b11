//! Detail-page field extraction.
//!
//! A register detail page labels the same fact three different ways
//! depending on the entry's register type: a numeric INID code (language
//! independent), a short field code ("AKZ", "AT", ...), or a human-readable
//! German label. All three are collected into one [`RawFieldTable`] and each
//! output field resolves through an explicit key priority list, INID first.

use scraper::{Html, Selector};
use std::collections::HashMap;

use crate::nizza;
use crate::types::TrademarkRecord;

/// One lookup step for a logical field.
#[derive(Clone, Copy, Debug)]
pub enum FieldKey {
    /// Standardized numeric tag, e.g. "210" for the case number.
    Inid(&'static str),
    /// Short alphabetic code, e.g. "AKZ".
    Code(&'static str),
    /// Display label, e.g. "Aktenzeichen".
    Label(&'static str),
}

/// Triple-keyed view of a detail page's tabular markup. Request-scoped:
/// built once per extraction call and discarded with it.
#[derive(Default)]
pub struct RawFieldTable {
    by_inid: HashMap<String, String>,
    by_code: HashMap<String, String>,
    by_label: HashMap<String, String>,
}

impl RawFieldTable {
    /// Scan every table row. Rows with at least four cells carry the full
    /// (INID, criterion label, field code, value) layout and populate all
    /// three keyings; 2–3 cell rows fall back to (first cell, last cell)
    /// keyed by label only.
    pub fn from_document(doc: &Html) -> Self {
        let row_sel = Selector::parse("table tr").unwrap();
        let cell_sel = Selector::parse("td").unwrap();

        let mut table = Self::default();
        for row in doc.select(&row_sel) {
            let cells: Vec<String> = row
                .select(&cell_sel)
                .map(|c| c.text().collect::<String>().trim().to_string())
                .collect();

            if cells.len() >= 4 {
                let (inid, label, code, value) = (&cells[0], &cells[1], &cells[2], &cells[3]);
                if !inid.is_empty() {
                    table.by_inid.insert(inid.clone(), value.clone());
                }
                if !code.is_empty() {
                    table.by_code.insert(code.clone(), value.clone());
                }
                if !label.is_empty() {
                    table.by_label.insert(label.clone(), value.clone());
                }
            } else if cells.len() >= 2 {
                let label = &cells[0];
                let value = &cells[cells.len() - 1];
                if !label.is_empty() && !value.is_empty() {
                    table.by_label.insert(label.clone(), value.clone());
                }
            }
        }
        table
    }

    /// First non-empty match along the priority list; empty string if no
    /// keying knows the field. Never an error.
    pub fn resolve(&self, keys: &[FieldKey]) -> String {
        for key in keys {
            let hit = match key {
                FieldKey::Inid(k) => self.by_inid.get(*k),
                FieldKey::Code(k) => self.by_code.get(*k),
                FieldKey::Label(k) => self.by_label.get(*k),
            };
            if let Some(value) = hit {
                if !value.is_empty() {
                    return value.clone();
                }
            }
        }
        String::new()
    }
}

use FieldKey::{Code, Inid, Label};

const CASE_NUMBER: &[FieldKey] = &[Inid("210"), Code("AKZ"), Label("Aktenzeichen")];
const FILING_DATE: &[FieldKey] = &[Inid("220"), Code("AT"), Label("Anmeldetag")];
const STATUS: &[FieldKey] = &[Code("AST"), Label("Aktenzustand")];
const MARK_NAME: &[FieldKey] = &[Inid("540"), Code("MD"), Label("Markendarstellung")];
const MARK_FORM: &[FieldKey] = &[Inid("550"), Code("MF"), Label("Markenform")];
const MARK_CATEGORY: &[FieldKey] = &[Inid("551"), Code("MK"), Label("Markenkategorie")];
const HOLDER: &[FieldKey] = &[
    Inid("730"),
    Code("INH"),
    Code("ANM"),
    Label("Inhaber"),
    Label("Anmelder"),
];
const CLASSES: &[FieldKey] = &[Inid("511"), Code("KL"), Label("Klasse(n)")];
const GOODS: &[FieldKey] = &[Inid("510"), Code("WDV"), Label("Waren/Dienstleistungen")];

/// Build the canonical record from a rendered detail page. Every field
/// degrades independently to empty; this function cannot fail.
pub fn extract_detail(doc: &Html) -> TrademarkRecord {
    let table = RawFieldTable::from_document(doc);

    let holder_raw = table.resolve(HOLDER);
    let mut holder_parts = holder_raw.split(',').map(str::trim);
    let holder_name = holder_parts.next().unwrap_or("").to_string();
    let holder_address = holder_parts.collect::<Vec<_>>().join(", ");

    // The token parser keeps duplicates; the record does not.
    let mut class_numbers = nizza::parse_class_numbers(&table.resolve(CLASSES));
    let mut seen = std::collections::HashSet::new();
    class_numbers.retain(|n| seen.insert(*n));

    TrademarkRecord {
        case_number: table.resolve(CASE_NUMBER),
        filing_date: table.resolve(FILING_DATE),
        status: table.resolve(STATUS),
        mark_name: table.resolve(MARK_NAME),
        mark_form: table.resolve(MARK_FORM),
        mark_category: table.resolve(MARK_CATEGORY),
        holder_name,
        holder_address,
        classes: nizza::enrich(&class_numbers),
        goods_and_services: table.resolve(GOODS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_page(rows: &str) -> Html {
        Html::parse_document(&format!("<table><tbody>{rows}</tbody></table>"))
    }

    #[test]
    fn four_column_rows_populate_all_keyings() {
        let doc = detail_page(
            "<tr><td>210</td><td>Aktenzeichen</td><td>AKZ</td><td>302023000001</td></tr>\
             <tr><td>220</td><td>Anmeldetag</td><td>AT</td><td>01.02.2023</td></tr>\
             <tr><td>511</td><td>Klasse(n)</td><td>KL</td><td>9, 42</td></tr>\
             <tr><td>730</td><td>Inhaber</td><td>INH</td><td>Test GmbH, Musterstr. 1, 80331 München</td></tr>",
        );
        let record = extract_detail(&doc);
        assert_eq!(record.case_number, "302023000001");
        assert_eq!(record.filing_date, "01.02.2023");
        assert_eq!(record.holder_name, "Test GmbH");
        assert_eq!(record.holder_address, "Musterstr. 1, 80331 München");
        assert_eq!(record.classes.len(), 2);
        assert_eq!(record.classes[0].class_number, 9);
        assert!(record.classes[0].description.contains("Computer"));
        assert_eq!(record.classes[1].class_number, 42);
    }

    #[test]
    fn inid_beats_label_when_they_disagree() {
        let doc = detail_page(
            "<tr><td>210</td><td>Irrelevant</td><td></td><td>FROM-INID</td></tr>\
             <tr><td>Aktenzeichen</td><td>FROM-LABEL</td></tr>",
        );
        let record = extract_detail(&doc);
        assert_eq!(record.case_number, "FROM-INID");
    }

    #[test]
    fn code_beats_label_when_inid_missing() {
        let doc = detail_page(
            "<tr><td></td><td>Quatsch</td><td>AT</td><td>FROM-CODE</td></tr>\
             <tr><td>Anmeldetag</td><td>FROM-LABEL</td></tr>",
        );
        let record = extract_detail(&doc);
        assert_eq!(record.filing_date, "FROM-CODE");
    }

    #[test]
    fn two_column_rows_key_by_label_only() {
        let doc = detail_page(
            "<tr><td>Aktenzustand</td><td>eingetragen</td></tr>\
             <tr><td>Markenform</td><td>mid</td><td>Wortmarke</td></tr>",
        );
        let record = extract_detail(&doc);
        assert_eq!(record.status, "eingetragen");
        // 3-cell fallback takes the last cell as the value
        assert_eq!(record.mark_form, "Wortmarke");
    }

    #[test]
    fn missing_fields_resolve_empty_without_error() {
        let record = extract_detail(&detail_page(""));
        assert_eq!(record, TrademarkRecord::default());
    }

    #[test]
    fn anm_code_is_holder_fallback() {
        let doc = detail_page("<tr><td></td><td></td><td>ANM</td><td>Anmelderin AG</td></tr>");
        let record = extract_detail(&doc);
        assert_eq!(record.holder_name, "Anmelderin AG");
        assert_eq!(record.holder_address, "");
    }

    #[test]
    fn record_classes_are_unique_by_number() {
        let doc = detail_page(
            "<tr><td>511</td><td>Klasse(n)</td><td>KL</td><td>9, 9, 42, 9</td></tr>",
        );
        let record = extract_detail(&doc);
        let numbers: Vec<u32> = record.classes.iter().map(|c| c.class_number).collect();
        assert_eq!(numbers, vec![9, 42]);
    }

    #[test]
    fn goods_text_kept_as_resolved() {
        let doc = detail_page(
            "<tr><td>510</td><td>Waren/Dienstleistungen</td><td>WDV</td>\
             <td>Klasse 9: Software; Klasse 42: Entwicklung von Software</td></tr>",
        );
        let record = extract_detail(&doc);
        assert_eq!(
            record.goods_and_services,
            "Klasse 9: Software; Klasse 42: Entwicklung von Software"
        );
    }
}
