// 🩺 Doctor Model - canonical record + filter state
//
// A Doctor is a VALUE once normalized: nothing in the crate mutates it.
// FilterState is the single piece of mutable session state, and it only
// changes through FilterState::merge (driven by FilterController::update_filter).

use serde::{Deserialize, Serialize};

// ============================================================================
// CONSULTATION MODE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsultationMode {
    #[serde(rename = "Video Consult")]
    VideoConsult,

    #[serde(rename = "In Clinic")]
    InClinic,
}

impl ConsultationMode {
    pub const ALL: [ConsultationMode; 2] = [ConsultationMode::VideoConsult, ConsultationMode::InClinic];

    /// Wire label, as it appears in the URL and in API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationMode::VideoConsult => "Video Consult",
            ConsultationMode::InClinic => "In Clinic",
        }
    }

    /// Parse a wire label. Anything unknown is None, never an error.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Video Consult" => Some(ConsultationMode::VideoConsult),
            "In Clinic" => Some(ConsultationMode::InClinic),
            _ => None,
        }
    }
}

// ============================================================================
// SORT OPTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOption {
    /// Fees, low to high
    #[serde(rename = "fees")]
    ByFeeAscending,

    /// Experience, high to low
    #[serde(rename = "experience")]
    ByExperienceDescending,
}

impl SortOption {
    pub const ALL: [SortOption; 2] = [SortOption::ByFeeAscending, SortOption::ByExperienceDescending];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::ByFeeAscending => "fees",
            SortOption::ByExperienceDescending => "experience",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fees" => Some(SortOption::ByFeeAscending),
            "experience" => Some(SortOption::ByExperienceDescending),
            _ => None,
        }
    }

    /// Human-readable label for the filter panel
    pub fn label(&self) -> &'static str {
        match self {
            SortOption::ByFeeAscending => "Fees (Low to High)",
            SortOption::ByExperienceDescending => "Experience (High to Low)",
        }
    }
}

// ============================================================================
// DOCTOR (the Record)
// ============================================================================

/// One practitioner, already normalized from the raw endpoint shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,

    #[serde(rename = "specialty")]
    pub specialties: Vec<String>,

    #[serde(rename = "consultation_type")]
    pub consultation_modes: Vec<ConsultationMode>,

    #[serde(rename = "experience")]
    pub experience_years: u32,

    #[serde(rename = "fees")]
    pub fee_amount: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Doctor {
    /// Minimal constructor; optional attributes are added with the builder methods
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Doctor {
            id: id.into(),
            name: name.into(),
            specialties: Vec::new(),
            consultation_modes: Vec::new(),
            experience_years: 0,
            fee_amount: 0,
            rating: None,
            image_url: None,
        }
    }

    /// Builder pattern: add specialties
    pub fn with_specialties<I, S>(mut self, specialties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specialties = specialties.into_iter().map(Into::into).collect();
        self
    }

    /// Builder pattern: add a consultation mode (duplicates are ignored)
    pub fn with_mode(mut self, mode: ConsultationMode) -> Self {
        if !self.consultation_modes.contains(&mode) {
            self.consultation_modes.push(mode);
        }
        self
    }

    pub fn with_experience(mut self, years: u32) -> Self {
        self.experience_years = years;
        self
    }

    pub fn with_fee(mut self, fee: u64) -> Self {
        self.fee_amount = fee;
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn offers(&self, mode: ConsultationMode) -> bool {
        self.consultation_modes.contains(&mode)
    }

    pub fn has_specialty(&self, specialty: &str) -> bool {
        self.specialties.iter().any(|s| s == specialty)
    }

    /// "Dr. <name>" as shown on the card
    pub fn display_name(&self) -> String {
        format!("Dr. {}", self.name)
    }
}

// ============================================================================
// FILTER STATE
// ============================================================================

/// Combined search / filter / sort criteria (persisted in the URL)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_query: String,
    pub consultation_type: Option<ConsultationMode>,
    /// Insertion-ordered, no duplicates. OR semantics when filtering.
    pub specialties: Vec<String>,
    pub sort_by: Option<SortOption>,
}

impl FilterState {
    /// True when every field holds its default (nothing to filter, nothing to sort)
    pub fn is_default(&self) -> bool {
        self.search_query.is_empty()
            && self.consultation_type.is_none()
            && self.specialties.is_empty()
            && self.sort_by.is_none()
    }

    /// Shallow per-field merge. Returns a new state; fields the update does not
    /// name are carried over untouched.
    pub fn merge(&self, update: FilterUpdate) -> FilterState {
        FilterState {
            search_query: update.search_query.unwrap_or_else(|| self.search_query.clone()),
            consultation_type: update.consultation_type.unwrap_or(self.consultation_type),
            specialties: match update.specialties {
                Some(specialties) => dedup_in_order(specialties),
                None => self.specialties.clone(),
            },
            sort_by: update.sort_by.unwrap_or(self.sort_by),
        }
    }

    /// Checkbox semantics: checked appends (if missing), unchecked removes
    pub fn toggled_specialties(&self, specialty: &str, checked: bool) -> Vec<String> {
        if checked {
            let mut next = self.specialties.clone();
            if !next.iter().any(|s| s == specialty) {
                next.push(specialty.to_string());
            }
            next
        } else {
            self.specialties
                .iter()
                .filter(|s| s.as_str() != specialty)
                .cloned()
                .collect()
        }
    }
}

/// Drop repeated entries, keeping the first occurrence's position
pub(crate) fn dedup_in_order(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

// ============================================================================
// FILTER UPDATE (partial FilterState)
// ============================================================================

/// A partial FilterState. `None` = leave the field alone.
/// Nullable fields use `Some(None)` to reset them to absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub search_query: Option<String>,
    pub consultation_type: Option<Option<ConsultationMode>>,
    pub specialties: Option<Vec<String>>,
    pub sort_by: Option<Option<SortOption>>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update that resets every field to its default
    pub fn reset() -> Self {
        FilterUpdate {
            search_query: Some(String::new()),
            consultation_type: Some(None),
            specialties: Some(Vec::new()),
            sort_by: Some(None),
        }
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn consultation(mut self, mode: Option<ConsultationMode>) -> Self {
        self.consultation_type = Some(mode);
        self
    }

    pub fn specialties<I, S>(mut self, specialties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specialties = Some(specialties.into_iter().map(Into::into).collect());
        self
    }

    pub fn sort(mut self, sort: Option<SortOption>) -> Self {
        self.sort_by = Some(sort);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search_query.is_none()
            && self.consultation_type.is_none()
            && self.specialties.is_none()
            && self.sort_by.is_none()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consultation_mode_labels() {
        assert_eq!(ConsultationMode::VideoConsult.as_str(), "Video Consult");
        assert_eq!(ConsultationMode::InClinic.as_str(), "In Clinic");
        assert_eq!(ConsultationMode::parse("In Clinic"), Some(ConsultationMode::InClinic));
        assert_eq!(ConsultationMode::parse("in clinic"), None);
        assert_eq!(ConsultationMode::parse(""), None);
    }

    #[test]
    fn test_sort_option_labels() {
        assert_eq!(SortOption::parse("fees"), Some(SortOption::ByFeeAscending));
        assert_eq!(SortOption::parse("experience"), Some(SortOption::ByExperienceDescending));
        assert_eq!(SortOption::parse("rating"), None);
        assert_eq!(SortOption::ByFeeAscending.as_str(), "fees");
    }

    #[test]
    fn test_doctor_json_shape() {
        let doctor = Doctor::new("1", "Alice")
            .with_specialties(["Dentist"])
            .with_mode(ConsultationMode::VideoConsult)
            .with_experience(3)
            .with_fee(500);

        let json = serde_json::to_value(&doctor).unwrap();
        assert_eq!(json["specialty"][0], "Dentist");
        assert_eq!(json["consultation_type"][0], "Video Consult");
        assert_eq!(json["experience"], 3);
        assert_eq!(json["fees"], 500);
        assert!(json.get("rating").is_none());
        assert!(json.get("image_url").is_none());

        let back: Doctor = serde_json::from_value(json).unwrap();
        assert_eq!(back, doctor);
    }

    #[test]
    fn test_with_mode_ignores_duplicates() {
        let doctor = Doctor::new("1", "Alice")
            .with_mode(ConsultationMode::InClinic)
            .with_mode(ConsultationMode::InClinic);
        assert_eq!(doctor.consultation_modes, vec![ConsultationMode::InClinic]);
    }

    #[test]
    fn test_merge_only_replaces_named_fields() {
        let state = FilterState {
            search_query: "ali".to_string(),
            consultation_type: Some(ConsultationMode::InClinic),
            specialties: vec!["Dentist".to_string()],
            sort_by: Some(SortOption::ByFeeAscending),
        };

        let merged = state.merge(FilterUpdate::new().sort(Some(SortOption::ByExperienceDescending)));

        assert_eq!(merged.search_query, "ali");
        assert_eq!(merged.consultation_type, Some(ConsultationMode::InClinic));
        assert_eq!(merged.specialties, vec!["Dentist".to_string()]);
        assert_eq!(merged.sort_by, Some(SortOption::ByExperienceDescending));
        // Original untouched
        assert_eq!(state.sort_by, Some(SortOption::ByFeeAscending));
    }

    #[test]
    fn test_merge_can_clear_nullable_fields() {
        let state = FilterState {
            consultation_type: Some(ConsultationMode::VideoConsult),
            sort_by: Some(SortOption::ByFeeAscending),
            ..Default::default()
        };

        let merged = state.merge(FilterUpdate::new().consultation(None).sort(None));
        assert!(merged.is_default());
    }

    #[test]
    fn test_merge_dedups_specialties() {
        let merged = FilterState::default()
            .merge(FilterUpdate::new().specialties(["ENT", "Dentist", "ENT"]));
        assert_eq!(merged.specialties, vec!["ENT".to_string(), "Dentist".to_string()]);
    }

    #[test]
    fn test_reset_update() {
        let state = FilterState {
            search_query: "bob".to_string(),
            specialties: vec!["ENT".to_string()],
            ..Default::default()
        };
        assert!(state.merge(FilterUpdate::reset()).is_default());
        assert!(FilterUpdate::new().is_empty());
        assert!(!FilterUpdate::reset().is_empty());
    }

    #[test]
    fn test_toggled_specialties() {
        let state = FilterState {
            specialties: vec!["ENT".to_string()],
            ..Default::default()
        };

        assert_eq!(
            state.toggled_specialties("Dentist", true),
            vec!["ENT".to_string(), "Dentist".to_string()]
        );
        assert_eq!(state.toggled_specialties("ENT", true), vec!["ENT".to_string()]);
        assert!(state.toggled_specialties("ENT", false).is_empty());
    }
}
