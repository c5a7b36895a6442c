// 🏷️ Specialty Index - distinct specialty tags, sorted

use crate::model::Doctor;
use std::collections::BTreeSet;

/// Union of every doctor's specialties, deduplicated, ascending.
/// Recomputed from scratch each time; collections are small.
pub fn list_specialties(doctors: &[Doctor]) -> Vec<String> {
    doctors
        .iter()
        .flat_map(|d| d.specialties.iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
