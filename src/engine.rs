// 🔎 Filter / Sort / Search Engine
//
// compute_visible(records, state) → visible set.
// Pure and deterministic: search → consultation → specialty → sort.
// The three filters are AND-combined; sort always runs last and is stable.

use crate::model::{ConsultationMode, Doctor, FilterState, SortOption};
use std::cmp::Reverse;

/// Autocomplete shows at most this many names
pub const SUGGESTION_LIMIT: usize = 3;

/// Derive the visible set. Never mutates `records`.
pub fn compute_visible(records: &[Doctor], state: &FilterState) -> Vec<Doctor> {
    let query = state.search_query.to_lowercase();

    let mut result: Vec<Doctor> = records
        .iter()
        .filter(|d| matches_search(d, &query))
        .filter(|d| matches_consultation(d, state.consultation_type))
        .filter(|d| matches_specialties(d, &state.specialties))
        .cloned()
        .collect();

    if let Some(sort) = state.sort_by {
        sort_doctors(&mut result, sort);
    }

    result
}

/// Case-insensitive substring match on the name. Empty query matches all.
/// `query` must already be lowercased.
fn matches_search(doctor: &Doctor, query: &str) -> bool {
    query.is_empty() || doctor.name.to_lowercase().contains(query)
}

fn matches_consultation(doctor: &Doctor, mode: Option<ConsultationMode>) -> bool {
    match mode {
        Some(mode) => doctor.offers(mode),
        None => true,
    }
}

/// OR semantics: at least one selected specialty
fn matches_specialties(doctor: &Doctor, selected: &[String]) -> bool {
    selected.is_empty() || selected.iter().any(|s| doctor.has_specialty(s))
}

/// Stable sort (slice::sort_by_key is stable): ties keep incoming order
pub fn sort_doctors(doctors: &mut [Doctor], sort: SortOption) {
    match sort {
        SortOption::ByFeeAscending => doctors.sort_by_key(|d| d.fee_amount),
        SortOption::ByExperienceDescending => doctors.sort_by_key(|d| Reverse(d.experience_years)),
    }
}

/// Autocomplete: first `limit` names containing `query`, in source order
pub fn suggestions<'a>(records: &'a [Doctor], query: &str, limit: usize) -> Vec<&'a Doctor> {
    if query.is_empty() {
        return Vec::new();
    }

    let query = query.to_lowercase();
    records
        .iter()
        .filter(|d| matches_search(d, &query))
        .take(limit)
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterUpdate;

    fn alice_bob() -> Vec<Doctor> {
        vec![
            Doctor::new("a", "Alice").with_fee(500).with_experience(3),
            Doctor::new("b", "Bob").with_fee(300).with_experience(10),
        ]
    }

    fn names(doctors: &[Doctor]) -> Vec<&str> {
        doctors.iter().map(|d| d.name.as_str()).collect()
    }

    fn sample() -> Vec<Doctor> {
        vec![
            Doctor::new("1", "Alice Rao")
                .with_specialties(["Dentist"])
                .with_mode(ConsultationMode::VideoConsult)
                .with_fee(500)
                .with_experience(3),
            Doctor::new("2", "Bob Singh")
                .with_specialties(["ENT", "General Physician"])
                .with_mode(ConsultationMode::InClinic)
                .with_fee(300)
                .with_experience(10),
            Doctor::new("3", "Carol Alison")
                .with_specialties(["Cardiologist"])
                .with_mode(ConsultationMode::VideoConsult)
                .with_mode(ConsultationMode::InClinic)
                .with_fee(300)
                .with_experience(10),
            Doctor::new("4", "Dan Kumar").with_fee(100).with_experience(1),
        ]
    }

    #[test]
    fn test_default_state_is_identity() {
        let doctors = sample();
        let visible = compute_visible(&doctors, &FilterState::default());
        assert_eq!(visible, doctors);
    }

    #[test]
    fn test_empty_input() {
        let state = FilterState::default().merge(FilterUpdate::new().search("x"));
        assert!(compute_visible(&[], &state).is_empty());
    }

    #[test]
    fn test_scenario_sort_by_fee() {
        let state = FilterState {
            sort_by: Some(SortOption::ByFeeAscending),
            ..Default::default()
        };
        let visible = compute_visible(&alice_bob(), &state);
        assert_eq!(names(&visible), vec!["Bob", "Alice"]);
        assert_eq!(visible[0].fee_amount, 300);
    }

    #[test]
    fn test_scenario_sort_by_experience() {
        let state = FilterState {
            sort_by: Some(SortOption::ByExperienceDescending),
            ..Default::default()
        };
        let visible = compute_visible(&alice_bob(), &state);
        assert_eq!(names(&visible), vec!["Bob", "Alice"]);
        assert_eq!(visible[0].experience_years, 10);
    }

    #[test]
    fn test_scenario_search_is_case_insensitive() {
        for query in ["ali", "ALI", "aLi"] {
            let state = FilterState {
                search_query: query.to_string(),
                ..Default::default()
            };
            assert_eq!(names(&compute_visible(&alice_bob(), &state)), vec!["Alice"]);
        }
    }

    #[test]
    fn test_search_matches_substring_anywhere() {
        let state = FilterState {
            search_query: "ali".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&compute_visible(&sample(), &state)), vec!["Alice Rao", "Carol Alison"]);
    }

    #[test]
    fn test_consultation_filter() {
        let state = FilterState {
            consultation_type: Some(ConsultationMode::InClinic),
            ..Default::default()
        };
        assert_eq!(names(&compute_visible(&sample(), &state)), vec!["Bob Singh", "Carol Alison"]);

        let state = FilterState {
            consultation_type: Some(ConsultationMode::VideoConsult),
            ..Default::default()
        };
        assert_eq!(names(&compute_visible(&sample(), &state)), vec!["Alice Rao", "Carol Alison"]);
    }

    #[test]
    fn test_specialty_filter_is_or() {
        let state = FilterState {
            specialties: vec!["Dentist".to_string(), "ENT".to_string()],
            ..Default::default()
        };
        let visible = compute_visible(&sample(), &state);
        assert_eq!(names(&visible), vec!["Alice Rao", "Bob Singh"]);

        for doctor in &visible {
            assert!(doctor.specialties.iter().any(|s| state.specialties.contains(s)));
        }
    }

    #[test]
    fn test_all_specialties_excludes_doctors_without_any() {
        // Dan has no specialties, so selecting every known specialty is NOT a no-op
        let doctors = sample();
        let state = FilterState {
            specialties: crate::specialties::list_specialties(&doctors),
            ..Default::default()
        };
        let visible = compute_visible(&doctors, &state);
        assert_eq!(visible.len(), 3);
        assert!(!names(&visible).contains(&"Dan Kumar"));
    }

    #[test]
    fn test_all_specialties_is_identity_when_everyone_has_one() {
        let doctors: Vec<Doctor> = sample().into_iter().filter(|d| !d.specialties.is_empty()).collect();
        let state = FilterState {
            specialties: crate::specialties::list_specialties(&doctors),
            ..Default::default()
        };
        assert_eq!(compute_visible(&doctors, &state), doctors);
    }

    #[test]
    fn test_fee_sort_is_stable() {
        let state = FilterState {
            sort_by: Some(SortOption::ByFeeAscending),
            ..Default::default()
        };
        let visible = compute_visible(&sample(), &state);
        assert_eq!(names(&visible), vec!["Dan Kumar", "Bob Singh", "Carol Alison", "Alice Rao"]);

        for pair in visible.windows(2) {
            assert!(pair[0].fee_amount <= pair[1].fee_amount);
        }
    }

    #[test]
    fn test_experience_sort_is_stable() {
        let state = FilterState {
            sort_by: Some(SortOption::ByExperienceDescending),
            ..Default::default()
        };
        let visible = compute_visible(&sample(), &state);
        // Bob and Carol tie on 10 years and keep source order
        assert_eq!(names(&visible), vec!["Bob Singh", "Carol Alison", "Alice Rao", "Dan Kumar"]);
    }

    #[test]
    fn test_combined_stages() {
        let state = FilterState {
            search_query: "a".to_string(),
            consultation_type: Some(ConsultationMode::VideoConsult),
            specialties: vec!["Cardiologist".to_string(), "Dentist".to_string()],
            sort_by: Some(SortOption::ByFeeAscending),
        };
        assert_eq!(names(&compute_visible(&sample(), &state)), vec!["Carol Alison", "Alice Rao"]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let state = FilterState {
            search_query: "zzz".to_string(),
            ..Default::default()
        };
        assert!(compute_visible(&sample(), &state).is_empty());
    }

    #[test]
    fn test_input_not_mutated() {
        let doctors = sample();
        let before = doctors.clone();
        let state = FilterState {
            sort_by: Some(SortOption::ByFeeAscending),
            ..Default::default()
        };
        let _ = compute_visible(&doctors, &state);
        assert_eq!(doctors, before);
    }

    #[test]
    fn test_suggestions() {
        let doctors = sample();
        assert!(suggestions(&doctors, "", SUGGESTION_LIMIT).is_empty());

        let found: Vec<&str> = suggestions(&doctors, "A", SUGGESTION_LIMIT)
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(found, vec!["Alice Rao", "Carol Alison", "Dan Kumar"]);

        let found: Vec<&str> = suggestions(&doctors, "a", 2).iter().map(|d| d.name.as_str()).collect();
        assert_eq!(found, vec!["Alice Rao", "Carol Alison"]);

        assert_eq!(suggestions(&doctors, "kumar", SUGGESTION_LIMIT).len(), 1);
    }
}
