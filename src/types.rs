use serde::{Deserialize, Serialize};

/// One candidate entry harvested from the search-results page, prior to
/// detail enrichment. Fields the winning layout strategy could not derive
/// stay empty.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub case_number: String,
    pub mark_name: String,
    pub status: String,
    pub holder: String,
    pub classes: Vec<u32>,
    pub detail_url: String,
}

/// A Nice classification entry with its resolved description.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NiceClass {
    pub class_number: u32,
    pub description: String,
}

/// The canonical output unit: one fully resolved register entry.
/// Constructed once per hit and immutable afterwards; unknown fields are
/// empty strings, never errors.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrademarkRecord {
    pub case_number: String,
    pub filing_date: String,
    pub status: String,
    pub mark_name: String,
    pub mark_form: String,
    pub mark_category: String,
    pub holder_name: String,
    pub holder_address: String,
    pub classes: Vec<NiceClass>,
    pub goods_and_services: String,
}

impl TrademarkRecord {
    /// Degraded fallback when a detail page cannot be fetched: carry over
    /// whatever the results page already told us, leave the rest empty.
    pub fn from_hit(hit: &SearchHit) -> Self {
        Self {
            case_number: hit.case_number.clone(),
            status: hit.status.clone(),
            mark_name: hit.mark_name.clone(),
            holder_name: hit.holder.clone(),
            classes: {
                let mut seen = std::collections::HashSet::new();
                hit.classes
                    .iter()
                    .filter(|&&n| seen.insert(n))
                    .map(|&n| NiceClass {
                        class_number: n,
                        description: String::new(),
                    })
                    .collect()
            },
            ..Self::default()
        }
    }
}
