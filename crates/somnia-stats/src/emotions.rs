//! Normalized emotional distribution

use serde::{Deserialize, Serialize};
use somnia_journal::{DreamRecord, MAX_INTENSITY};
use std::collections::BTreeMap;

/// Emotions kept in the distribution
pub const TOP_EMOTIONS: usize = 5;

/// Average intensity of one emotion, scaled into [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionShare {
    pub label: String,
    pub normalized: f64,
}

/// Sum intensities per label, divide by occurrences * 10, keep the top five
pub fn compute_emotion_distribution(records: &[DreamRecord]) -> Vec<EmotionShare> {
    // label -> (intensity sum, occurrences)
    let mut totals: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for emotion in records.iter().flat_map(|r| &r.emotions) {
        let entry = totals.entry(emotion.category.as_str()).or_insert((0, 0));
        entry.0 += u64::from(emotion.intensity.min(MAX_INTENSITY));
        entry.1 += 1;
    }

    let mut shares: Vec<EmotionShare> = totals
        .into_iter()
        .map(|(label, (sum, occurrences))| EmotionShare {
            label: label.to_string(),
            normalized: sum as f64 / (occurrences as f64 * f64::from(MAX_INTENSITY)),
        })
        .collect();

    shares.sort_by(|a, b| b.normalized.total_cmp(&a.normalized));
    shares.truncate(TOP_EMOTIONS);
    shares
}
