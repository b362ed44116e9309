//! Insight snapshot and feed types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubInsight {
    pub title: String,
    pub body: String,
}

/// Fields parsed from one generator reply, before stamping
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeneratedInsight {
    pub main_insight: String,
    pub sub_insights: Vec<SubInsight>,
    pub pattern: String,
    pub suggestion: String,
    pub next_focus: Vec<String>,
}

/// Persisted result of one regeneration. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSnapshot {
    pub main_insight: String,
    #[serde(default)]
    pub sub_insights: Vec<SubInsight>,
    #[serde(default)]
    pub pattern: String,
    #[serde(default)]
    pub suggestion: String,
    #[serde(default)]
    pub next_focus: Vec<String>,
    pub dream_count_at_generation: usize,
    pub generated_at: DateTime<Utc>,
}

impl InsightSnapshot {
    pub fn stamp(generated: GeneratedInsight, record_count: usize, at: DateTime<Utc>) -> Self {
        Self {
            main_insight: generated.main_insight,
            sub_insights: generated.sub_insights,
            pattern: generated.pattern,
            suggestion: generated.suggestion,
            next_focus: generated.next_focus,
            dream_count_at_generation: record_count,
            generated_at: at,
        }
    }
}

/// One card of the insight feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    Theme {
        title: String,
        body: String,
    },
    Reflection {
        title: String,
        body: String,
    },
    Symbol {
        name: String,
        frequency_percent: f64,
    },
    Emotion {
        label: String,
        normalized: f64,
    },
    Pattern {
        body: String,
    },
    Lucidity {
        rate: f64,
    },
    Suggestion {
        body: String,
        next_focus: Vec<String>,
    },
}

impl Insight {
    /// Heading shown on the card
    pub fn title(&self) -> String {
        match self {
            Insight::Theme { title, .. } | Insight::Reflection { title, .. } => title.clone(),
            Insight::Symbol { name, .. } => format!("Recurring symbol: {name}"),
            Insight::Emotion { label, .. } => format!("Emotional tone: {label}"),
            Insight::Pattern { .. } => "Detected pattern".to_string(),
            Insight::Lucidity { .. } => "Lucid dreaming".to_string(),
            Insight::Suggestion { .. } => "Suggestion".to_string(),
        }
    }

    /// Card text
    pub fn body(&self) -> String {
        match self {
            Insight::Theme { body, .. }
            | Insight::Reflection { body, .. }
            | Insight::Pattern { body }
            | Insight::Suggestion { body, .. } => body.clone(),
            Insight::Symbol {
                frequency_percent, ..
            } => format!("Appears in {frequency_percent:.0}% of your dreams"),
            Insight::Emotion { normalized, .. } => {
                format!("Average intensity {:.0}%", normalized * 100.0)
            }
            Insight::Lucidity { rate } => {
                format!("{:.0}% of your dreams were lucid", rate * 100.0)
            }
        }
    }
}
