// 📡 Record Source Adapter - endpoint JSON → Doctor
//
// One GET, one JSON array, one normalization pass.
// Bad numeric fields are coerced to 0 and unreadable items are skipped
// (never reject the batch for one record).

use crate::model::{ConsultationMode, Doctor};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_API_URL: &str = "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("record endpoint {url} returned HTTP {status}")]
    Status { status: u16, url: String },

    #[error("could not reach record endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("record endpoint returned an unexpected body: {0}")]
    Decode(String),
}

impl FetchError {
    /// HTTP status, when the endpoint answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport(e) => e.status().map(|s| s.as_u16()),
            FetchError::Decode(_) => None,
        }
    }
}

// ============================================================================
// RAW SHAPE
// ============================================================================

/// RawDoctor - one item as the endpoint sends it.
/// Every field is loosely typed; normalize() decides what it means.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDoctor {
    #[serde(default)]
    pub id: Option<Value>,

    #[serde(default)]
    pub name: Option<Value>,

    /// Usually `[{"name": ..}]`; bare strings are accepted too
    #[serde(default)]
    pub specialities: Option<Value>,

    #[serde(default)]
    pub video_consult: Option<Value>,

    #[serde(default)]
    pub in_clinic: Option<Value>,

    #[serde(default)]
    pub experience: Option<Value>,

    #[serde(default)]
    pub fees: Option<Value>,

    #[serde(default)]
    pub photo: Option<Value>,
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Normalize a single raw item. Returns None when the item cannot become a
/// valid Doctor (no usable name). A missing id stays empty here;
/// normalize_all() assigns one.
pub fn normalize(raw: &RawDoctor) -> Option<Doctor> {
    let id = raw
        .id
        .as_ref()
        .and_then(value_text)
        .map(|id| id.trim().to_string())
        .unwrap_or_default();

    let name = raw.name.as_ref().and_then(value_text).unwrap_or_default();
    if name.trim().is_empty() {
        warn!(id = %id, "skipping record without a name");
        return None;
    }

    let specialties = raw
        .specialities
        .as_ref()
        .map(|value| speciality_names(&id, value))
        .unwrap_or_default();

    let mut doctor = Doctor::new(id.clone(), name).with_specialties(specialties);

    if raw.video_consult.as_ref().is_some_and(is_truthy) {
        doctor = doctor.with_mode(ConsultationMode::VideoConsult);
    }
    if raw.in_clinic.as_ref().is_some_and(is_truthy) {
        doctor = doctor.with_mode(ConsultationMode::InClinic);
    }

    let experience_text = raw.experience.as_ref().and_then(value_text);
    doctor.experience_years = match experience_text.as_deref().and_then(parse_experience) {
        Some(years) => years,
        None => {
            if experience_text.is_some() {
                warn!(id = %id, field = "experience", raw = ?experience_text, "malformed field coerced to 0");
            }
            0
        }
    };

    let fee_text = raw.fees.as_ref().and_then(value_text);
    doctor.fee_amount = match fee_text.as_deref().and_then(parse_fee) {
        Some(fee) => fee,
        None => {
            if fee_text.is_some() {
                warn!(id = %id, field = "fees", raw = ?fee_text, "malformed field coerced to 0");
            }
            0
        }
    };

    doctor.image_url = match &raw.photo {
        None | Some(Value::Null) => None,
        Some(Value::String(url)) => Some(url.clone()).filter(|u| !u.is_empty()),
        Some(other) => {
            warn!(id = %id, field = "photo", raw = %other, "malformed field dropped");
            None
        }
    };

    Some(doctor)
}

/// Normalize a whole batch. Nameless items are skipped. Items without an id
/// get `#<index>`; repeated source ids are skipped so the snapshot keeps `id`
/// unique.
pub fn normalize_all(raw: &[RawDoctor]) -> Vec<Doctor> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut doctors = Vec::with_capacity(raw.len());

    for (index, item) in raw.iter().enumerate() {
        let Some(mut doctor) = normalize(item) else {
            continue;
        };
        if doctor.id.is_empty() {
            let mut assigned = format!("#{index}");
            while seen.contains(&assigned) {
                assigned.push('#');
            }
            warn!(index, id = %assigned, "record without an id");
            doctor.id = assigned;
        } else if seen.contains(&doctor.id) {
            warn!(id = %doctor.id, "skipping record with duplicate id");
            continue;
        }
        seen.insert(doctor.id.clone());
        doctors.push(doctor);
    }

    doctors
}

/// Decode an endpoint body (a JSON array of raw items) and normalize it.
/// Only a body that is not an array fails; unreadable items are skipped.
pub fn parse_records(body: &str) -> Result<Vec<Doctor>, FetchError> {
    let items: Vec<Value> =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let raw: Vec<RawDoctor> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<RawDoctor>(item) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!(index, error = %e, "skipping unreadable record");
                None
            }
        })
        .collect();

    Ok(normalize_all(&raw))
}

/// "12 Years" → 12. Leading integer of the first space-separated token.
/// None when there is no leading digit.
pub fn parse_experience(text: &str) -> Option<u32> {
    let token = text.split(' ').next().unwrap_or_default().trim_start();
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// "₹ 1,500" → 1500. Every non-digit is dropped before parsing.
pub fn parse_fee(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Textual form of a scalar JSON value (strings verbatim, numbers printed)
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Speciality names from `[{"name": ..}]` or `["..."]`; anything else is dropped
fn speciality_names(id: &str, value: &Value) -> Vec<String> {
    let Value::Array(entries) = value else {
        if !value.is_null() {
            warn!(id = %id, field = "specialities", raw = %value, "malformed field dropped");
        }
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(name) => Some(name.clone()),
            Value::Object(fields) => fields.get("name").and_then(value_text),
            _ => None,
        })
        .filter(|name| !name.trim().is_empty())
        .collect()
}

/// Loose truthiness for the capability flags
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ============================================================================
// SOURCES
// ============================================================================

/// Anything that can produce the record collection
#[async_trait]
pub trait DoctorSource: Send + Sync {
    async fn fetch_records(&self) -> Result<Vec<Doctor>, FetchError>;
}

/// The remote JSON endpoint
pub struct HttpDoctorSource {
    http: reqwest::Client,
    url: String,
}

impl HttpDoctorSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DoctorSource for HttpDoctorSource {
    async fn fetch_records(&self) -> Result<Vec<Doctor>, FetchError> {
        info!(url = %self.url, "fetching doctors");

        let response = self.http.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        let doctors = parse_records(&body)?;

        debug!(count = doctors.len(), "normalized doctors");
        Ok(doctors)
    }
}

/// Fixed in-memory collection (tests, offline demos)
pub struct StaticDoctorSource {
    doctors: Vec<Doctor>,
}

impl StaticDoctorSource {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self { doctors }
    }
}

#[async_trait]
impl DoctorSource for StaticDoctorSource {
    async fn fetch_records(&self) -> Result<Vec<Doctor>, FetchError> {
        Ok(self.doctors.clone())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawDoctor {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_full_record() {
        let item = raw(json!({
            "id": "111",
            "name": "Dr. Alice",
            "specialities": [{"name": "Dentist"}, {"name": "Orthodontist"}],
            "video_consult": true,
            "in_clinic": false,
            "experience": "12 Years of experience",
            "fees": "₹ 500",
            "photo": "https://example.com/a.png"
        }));

        let doctor = normalize(&item).unwrap();
        assert_eq!(doctor.id, "111");
        assert_eq!(doctor.name, "Dr. Alice");
        assert_eq!(doctor.specialties, vec!["Dentist", "Orthodontist"]);
        assert_eq!(doctor.consultation_modes, vec![ConsultationMode::VideoConsult]);
        assert_eq!(doctor.experience_years, 12);
        assert_eq!(doctor.fee_amount, 500);
        assert_eq!(doctor.rating, None);
        assert_eq!(doctor.image_url.as_deref(), Some("https://example.com/a.png"));
    }

    #[test]
    fn test_malformed_numbers_coerce_to_zero() {
        let item = raw(json!({
            "id": "2",
            "name": "Bob",
            "experience": "N/A",
            "fees": null
        }));

        let doctor = normalize(&item).unwrap();
        assert_eq!(doctor.experience_years, 0);
        assert_eq!(doctor.fee_amount, 0);
    }

    #[test]
    fn test_missing_optional_fields() {
        let item = raw(json!({"id": "3", "name": "Carol", "specialities": null, "photo": ""}));

        let doctor = normalize(&item).unwrap();
        assert!(doctor.specialties.is_empty());
        assert!(doctor.consultation_modes.is_empty());
        assert_eq!(doctor.image_url, None);
    }

    #[test]
    fn test_both_modes_and_loose_flags() {
        let item = raw(json!({"id": 4, "name": "Dan", "video_consult": 1, "in_clinic": "yes"}));

        let doctor = normalize(&item).unwrap();
        assert_eq!(doctor.id, "4");
        assert!(doctor.offers(ConsultationMode::VideoConsult));
        assert!(doctor.offers(ConsultationMode::InClinic));

        let item = raw(json!({"id": 5, "name": "Eve", "video_consult": 0, "in_clinic": ""}));
        assert!(normalize(&item).unwrap().consultation_modes.is_empty());
    }

    #[test]
    fn test_nameless_record_is_skipped() {
        assert!(normalize(&raw(json!({"id": "6"}))).is_none());
        assert!(normalize(&raw(json!({"id": "6", "name": "   "}))).is_none());
    }

    #[test]
    fn test_parse_experience() {
        assert_eq!(parse_experience("12 Years"), Some(12));
        assert_eq!(parse_experience("7+ Years"), Some(7));
        assert_eq!(parse_experience("15"), Some(15));
        assert_eq!(parse_experience("N/A"), None);
        assert_eq!(parse_experience(""), None);
        assert_eq!(parse_experience("Years 12"), None);
    }

    #[test]
    fn test_parse_fee() {
        assert_eq!(parse_fee("₹ 500"), Some(500));
        assert_eq!(parse_fee("₹1,200"), Some(1200));
        assert_eq!(parse_fee("800"), Some(800));
        assert_eq!(parse_fee("free"), None);
        assert_eq!(parse_fee(""), None);
    }

    #[test]
    fn test_numeric_json_fields() {
        let item = raw(json!({"id": "7", "name": "Finn", "experience": 9, "fees": 450}));
        let doctor = normalize(&item).unwrap();
        assert_eq!(doctor.experience_years, 9);
        assert_eq!(doctor.fee_amount, 450);
    }

    #[test]
    fn test_normalize_all_drops_duplicate_ids() {
        let items = vec![
            raw(json!({"id": "1", "name": "Alice"})),
            raw(json!({"id": "1", "name": "Alice again"})),
            raw(json!({"id": "2"})),
            raw(json!({"id": "3", "name": "Bob"})),
        ];

        let doctors = normalize_all(&items);
        let names: Vec<&str> = doctors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_id_less_records_are_kept() {
        let doctors =
            parse_records(r#"[{"name":"Alice"},{"name":"Bob"},{"id":"","name":"Carol"}]"#).unwrap();

        let names: Vec<&str> = doctors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);

        let ids: HashSet<&str> = doctors.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(|id| !id.is_empty()));
        assert_eq!(doctors[0].id, "#0");
    }

    #[test]
    fn test_assigned_id_does_not_collide_with_source_id() {
        let doctors = parse_records(r##"[{"id":"#1","name":"Alice"},{"name":"Bob"}]"##).unwrap();
        assert_eq!(doctors.len(), 2);
        assert_ne!(doctors[0].id, doctors[1].id);
    }

    #[test]
    fn test_one_bad_record_does_not_fail_the_batch() {
        let body = r#"[
            {"id":"1","name":"Alice","fees":"500"},
            null,
            42,
            {"id":"2","name":"Bob","specialities":["Dentist", {"name":"Orthodontist"}, 7]},
            {"id":"3","name":"Carol","photo":7,"specialities":"Dentist"}
        ]"#;

        let doctors = parse_records(body).unwrap();
        let names: Vec<&str> = doctors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);

        assert_eq!(doctors[0].fee_amount, 500);
        assert_eq!(doctors[1].specialties, vec!["Dentist", "Orthodontist"]);
        assert!(doctors[2].specialties.is_empty());
        assert_eq!(doctors[2].image_url, None);
    }

    #[test]
    fn test_parse_records_rejects_non_array() {
        let result = parse_records(r#"{"doctors": []}"#);
        assert!(matches!(result, Err(FetchError::Decode(_))));

        let result = parse_records("[]").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_fetch_error_status() {
        let err = FetchError::Status {
            status: 500,
            url: DEFAULT_API_URL.to_string(),
        };
        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("HTTP 500"));
        assert_eq!(FetchError::Decode("x".into()).status(), None);
    }
}
