//! Symbol frequency and recurring-pattern ranking

use serde::{Deserialize, Serialize};
use somnia_journal::DreamRecord;
use std::collections::BTreeMap;

/// Patterns kept in the ranked summary
pub const TOP_PATTERNS: usize = 5;

/// A recurring symbol and the share of dreams it appears in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolPattern {
    pub symbol: String,
    /// occurrences / total records * 100
    pub frequency_percent: f64,
}

/// Count every symbol occurrence across all records
pub fn compute_symbol_frequency(records: &[DreamRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        for symbol in &record.symbols {
            *counts.entry(symbol.name.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Top recurring symbols by frequency percent, descending
pub fn compute_pattern_summary(records: &[DreamRecord]) -> Vec<SymbolPattern> {
    if records.is_empty() {
        return Vec::new();
    }

    let total = records.len() as f64;
    let mut patterns: Vec<SymbolPattern> = compute_symbol_frequency(records)
        .into_iter()
        .map(|(symbol, count)| SymbolPattern {
            symbol,
            frequency_percent: count as f64 / total * 100.0,
        })
        .collect();

    // BTreeMap order makes ties alphabetical after the stable sort
    patterns.sort_by(|a, b| b.frequency_percent.total_cmp(&a.frequency_percent));
    patterns.truncate(TOP_PATTERNS);
    patterns
}
