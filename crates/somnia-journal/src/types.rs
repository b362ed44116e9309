//! Dream record types

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};

/// Top of the emotion intensity scale
pub const MAX_INTENSITY: u8 = 10;

/// An emotion felt during a dream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emotion {
    pub category: String,
    /// 0-10
    #[serde(deserialize_with = "deserialize_intensity")]
    pub intensity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Emotion {
    pub fn new(category: impl Into<String>, intensity: u8) -> Self {
        Self {
            category: category.into(),
            intensity: intensity.min(MAX_INTENSITY),
            context: None,
        }
    }
}

/// A symbol that appeared in a dream, optionally interpreted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meaning: None,
        }
    }

    pub fn with_meaning(name: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meaning: Some(meaning.into()),
        }
    }
}

/// One journaled dream. Immutable once appended to the journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DreamRecord {
    pub id: String,
    pub content: String,
    /// Capture time with the offset it was recorded in
    #[serde(
        rename = "timestamp",
        deserialize_with = "crate::timestamp::deserialize_lenient"
    )]
    pub captured_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub is_lucid: bool,
    #[serde(default)]
    pub emotions: Vec<Emotion>,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
    #[serde(default)]
    pub theme: String,
}

impl DreamRecord {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            captured_at: Local::now().fixed_offset(),
            is_lucid: false,
            emotions: Vec::new(),
            symbols: Vec::new(),
            theme: String::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn captured_at(mut self, at: DateTime<FixedOffset>) -> Self {
        self.captured_at = at;
        self
    }

    pub fn lucid(mut self, is_lucid: bool) -> Self {
        self.is_lucid = is_lucid;
        self
    }

    pub fn with_emotion(mut self, emotion: Emotion) -> Self {
        self.emotions.push(emotion);
        self
    }

    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.symbols.push(symbol);
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }
}

fn deserialize_intensity<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Ok(0);
    }
    Ok(raw.round().clamp(0.0, MAX_INTENSITY as f64) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = DreamRecord::new("flying over the sea")
            .lucid(true)
            .with_emotion(Emotion::new("joy", 8))
            .with_symbol(Symbol::with_meaning("water", "the unconscious"))
            .with_theme("freedom");

        assert!(record.is_lucid);
        assert_eq!(record.emotions[0].category, "joy");
        assert_eq!(record.symbols[0].meaning.as_deref(), Some("the unconscious"));
        assert_eq!(record.theme, "freedom");
        assert!(!record.id.is_empty());
    }

    #[test]
    fn test_emotion_intensity_capped() {
        assert_eq!(Emotion::new("fear", 42).intensity, MAX_INTENSITY);
    }

    #[test]
    fn test_record_roundtrip() {
        let record = DreamRecord::new("a locked door").with_emotion(Emotion::new("fear", 4));
        let json = serde_json::to_string(&record).unwrap();
        let parsed: DreamRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_record_backwards_compatible() {
        let old_json = r#"{"id":"d1","content":"falling","timestamp":"2024-03-01T06:30:00+01:00"}"#;
        let parsed: DreamRecord = serde_json::from_str(old_json).unwrap();
        assert!(!parsed.is_lucid);
        assert!(parsed.emotions.is_empty());
        assert!(parsed.symbols.is_empty());
        assert_eq!(parsed.theme, "");
    }

    #[test]
    fn test_out_of_range_intensity_clamped() {
        let json = r#"{"category":"anger","intensity":14.6}"#;
        let emotion: Emotion = serde_json::from_str(json).unwrap();
        assert_eq!(emotion.intensity, 10);

        let json = r#"{"category":"calm","intensity":-3}"#;
        let emotion: Emotion = serde_json::from_str(json).unwrap();
        assert_eq!(emotion.intensity, 0);
    }
}
