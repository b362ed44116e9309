#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{FixedOffset, TimeZone};
use somnia_insight::{GeneratedInsight, InsightError, InsightGenerator, InsightRequest, SubInsight};
use somnia_journal::{DreamRecord, Emotion, Symbol};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Generator that echoes what it was asked about
pub struct EchoGenerator {
    pub calls: AtomicUsize,
}

impl EchoGenerator {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InsightGenerator for EchoGenerator {
    async fn generate(&self, request: &InsightRequest) -> Result<GeneratedInsight, InsightError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let theme = request
            .aggregate
            .dominant_theme
            .clone()
            .unwrap_or_else(|| "nothing".to_string());
        Ok(GeneratedInsight {
            main_insight: format!("{} dreams, mostly about {}", request.record_count, theme),
            sub_insights: vec![SubInsight {
                title: "Water".to_string(),
                body: "Water keeps coming back.".to_string(),
            }],
            pattern: "Night dreams run longer".to_string(),
            suggestion: "Keep a notebook by the bed".to_string(),
            next_focus: vec!["Notice the tides".to_string()],
        })
    }
}

/// A dream captured on 2024-03-04 at the given local hour, UTC+2
pub fn dream_at(hour: u32, content: &str) -> DreamRecord {
    let offset = FixedOffset::east_opt(2 * 3600).unwrap();
    DreamRecord::new(content)
        .captured_at(offset.with_ymd_and_hms(2024, 3, 4, hour, 15, 0).unwrap())
        .with_symbol(Symbol::new("water"))
        .with_emotion(Emotion::new("calm", 6))
        .with_theme("the sea")
}
