//! Statistical aggregates over the dream journal

mod aggregate;
mod emotions;
mod milestone;
mod quotes;
mod symbols;
mod time_patterns;

pub use aggregate::{compute_dominant_theme, compute_lucidity_rate, StatsAggregate};
pub use emotions::{compute_emotion_distribution, EmotionShare, TOP_EMOTIONS};
pub use milestone::{next_milestone, records_until_next_milestone, MILESTONE_STEP};
pub use quotes::{Quote, QuoteRotator, DREAM_QUOTES, HISTORY_CAPACITY};
pub use symbols::{compute_pattern_summary, compute_symbol_frequency, SymbolPattern, TOP_PATTERNS};
pub use time_patterns::{compute_time_patterns, Bucket, Histogram, TimePatterns, TimeSlot};
