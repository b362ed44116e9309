//! Bundled aggregate recomputed from the full record set

use crate::emotions::{compute_emotion_distribution, EmotionShare};
use crate::symbols::{compute_pattern_summary, compute_symbol_frequency, SymbolPattern};
use crate::time_patterns::{compute_time_patterns, TimePatterns};
use serde::{Deserialize, Serialize};
use somnia_journal::DreamRecord;
use std::collections::{BTreeMap, HashMap};

/// Fraction of records flagged lucid; 0 for an empty journal
pub fn compute_lucidity_rate(records: &[DreamRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let lucid = records.iter().filter(|r| r.is_lucid).count();
    lucid as f64 / records.len() as f64
}

/// Most frequent non-empty main theme, ties broken alphabetically
pub fn compute_dominant_theme(records: &[DreamRecord]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let theme = record.theme.trim();
        if !theme.is_empty() {
            *counts.entry(theme).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|(a_theme, a_count), (b_theme, b_count)| {
            a_count.cmp(b_count).then_with(|| b_theme.cmp(a_theme))
        })
        .map(|(theme, _)| theme.to_string())
}

/// Everything the insight generator is told about the journal.
///
/// Ephemeral: recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsAggregate {
    pub record_count: usize,
    pub symbol_frequency: BTreeMap<String, usize>,
    pub emotion_distribution: Vec<EmotionShare>,
    pub time_patterns: TimePatterns,
    pub lucidity_rate: f64,
    pub pattern_summary: Vec<SymbolPattern>,
    pub dominant_theme: Option<String>,
}

impl StatsAggregate {
    pub fn compute(records: &[DreamRecord]) -> Self {
        Self {
            record_count: records.len(),
            symbol_frequency: compute_symbol_frequency(records),
            emotion_distribution: compute_emotion_distribution(records),
            time_patterns: compute_time_patterns(records),
            lucidity_rate: compute_lucidity_rate(records),
            pattern_summary: compute_pattern_summary(records),
            dominant_theme: compute_dominant_theme(records),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}
