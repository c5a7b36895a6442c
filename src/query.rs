// 🔗 URL Query Codec - FilterState <-> "?search=..&consultation=..&specialty=..&sort=.."
//
// Recognized parameters:
//   search        → search_query
//   consultation  → consultation_type ("Video Consult" | "In Clinic")
//   specialty     → specialties (repeatable)
//   sort          → sort_by ("fees" | "experience")
//
// Unknown parameters and invalid values are treated as absent, never errors.

use crate::model::{dedup_in_order, ConsultationMode, FilterState, SortOption};
use tracing::debug;

pub const PARAM_SEARCH: &str = "search";
pub const PARAM_CONSULTATION: &str = "consultation";
pub const PARAM_SPECIALTY: &str = "specialty";
pub const PARAM_SORT: &str = "sort";

/// Split a query string into decoded (key, value) pairs, in order.
/// Pairs whose percent-encoding is malformed are dropped.
pub fn parse_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);

    query
        .split('&')
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            match (decode_component(key), decode_component(value)) {
                (Some(k), Some(v)) => Some((k, v)),
                _ => {
                    debug!(pair = part, "ignoring malformed query parameter");
                    None
                }
            }
        })
        .collect()
}

/// Build a FilterState from a query string. First occurrence wins for scalar
/// parameters; every `specialty` occurrence is collected.
pub fn parse_query(query: &str) -> FilterState {
    let mut state = FilterState::default();
    let mut seen_search = false;
    let mut seen_consultation = false;
    let mut seen_sort = false;
    let mut specialties = Vec::new();

    for (key, value) in parse_pairs(query) {
        match key.as_str() {
            PARAM_SEARCH if !seen_search => {
                seen_search = true;
                state.search_query = value;
            }
            PARAM_CONSULTATION if !seen_consultation => {
                seen_consultation = true;
                state.consultation_type = ConsultationMode::parse(&value);
                if state.consultation_type.is_none() && !value.is_empty() {
                    debug!(value = %value, "invalid consultation parameter treated as absent");
                }
            }
            PARAM_SPECIALTY => specialties.push(value),
            PARAM_SORT if !seen_sort => {
                seen_sort = true;
                state.sort_by = SortOption::parse(&value);
                if state.sort_by.is_none() && !value.is_empty() {
                    debug!(value = %value, "invalid sort parameter treated as absent");
                }
            }
            PARAM_SEARCH | PARAM_CONSULTATION | PARAM_SORT => {}
            other => debug!(param = other, "ignoring unrecognized query parameter"),
        }
    }

    state.specialties = dedup_in_order(specialties);
    state
}

/// Serialize a FilterState from scratch. Defaults are omitted entirely, so a
/// default state serializes to the empty string.
pub fn to_query(state: &FilterState) -> String {
    let mut pairs: Vec<(&str, &str)> = Vec::new();

    if !state.search_query.is_empty() {
        pairs.push((PARAM_SEARCH, &state.search_query));
    }
    if let Some(mode) = state.consultation_type {
        pairs.push((PARAM_CONSULTATION, mode.as_str()));
    }
    for specialty in &state.specialties {
        pairs.push((PARAM_SPECIALTY, specialty));
    }
    if let Some(sort) = state.sort_by {
        pairs.push((PARAM_SORT, sort.as_str()));
    }

    pairs
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Form-style decoding: '+' is a space, then percent escapes
fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|s| s.into_owned())
}

// ============================================================================
// TESTS
// ============================================================================
