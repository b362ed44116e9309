//! Insight generator adapter: aggregates in, structured insight out

use crate::client::{ChatCompletionClient, ChatMessage, TextCompletion};
use crate::config::{ApiKey, GeneratorConfig};
use crate::error::InsightError;
use crate::types::{GeneratedInsight, SubInsight};
use async_trait::async_trait;
use serde::Deserialize;
use somnia_stats::StatsAggregate;
use std::fmt::Write;
use std::sync::Arc;

/// What the generator is told about the journal
#[derive(Debug, Clone, PartialEq)]
pub struct InsightRequest {
    pub aggregate: StatsAggregate,
    pub record_count: usize,
}

/// Produces insight text from aggregates. Slow and costly; may fail.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(&self, request: &InsightRequest) -> Result<GeneratedInsight, InsightError>;
}

const SYSTEM_PROMPT: &str = "You are a thoughtful dream analyst. You read statistics \
about a person's dream journal and reflect back meaningful, gentle, non-clinical \
observations. Respond only with a single JSON object.";

const REPLY_SCHEMA: &str = r#"Return JSON with exactly these fields:
{"mainInsight": "<2-3 sentences on the dominant theme>",
 "subInsights": [{"title": "<short title>", "content": "<1-2 sentences>"}],
 "pattern": "<one recurring pattern>",
 "suggestion": "<one personalized suggestion>",
 "nextFocus": ["<prompt for the next dream entry>", ...]}"#;

/// Build the system and user messages for one request
pub fn build_messages(request: &InsightRequest) -> Vec<ChatMessage> {
    let aggregate = &request.aggregate;
    let mut prompt = format!(
        "Dream journal summary ({} dreams recorded).\n",
        request.record_count
    );

    if let Some(theme) = &aggregate.dominant_theme {
        let _ = writeln!(prompt, "Dominant theme: {theme}");
    }

    if !aggregate.pattern_summary.is_empty() {
        let symbols: Vec<String> = aggregate
            .pattern_summary
            .iter()
            .map(|p| format!("{} ({:.0}%)", p.symbol, p.frequency_percent))
            .collect();
        let _ = writeln!(prompt, "Recurring symbols: {}", symbols.join(", "));
    }

    if !aggregate.emotion_distribution.is_empty() {
        let emotions: Vec<String> = aggregate
            .emotion_distribution
            .iter()
            .map(|e| format!("{} ({:.0}%)", e.label, e.normalized * 100.0))
            .collect();
        let _ = writeln!(prompt, "Emotional intensity: {}", emotions.join(", "));
    }

    if let Some(day) = aggregate.time_patterns.day_of_week.peak() {
        let _ = writeln!(prompt, "Most dreams recorded on: {} ({})", day.name, day.count);
    }
    if let Some(slot) = aggregate.time_patterns.time_of_day.peak() {
        let _ = writeln!(prompt, "Most dreams recorded during: {} ({})", slot.name, slot.count);
    }

    let _ = writeln!(
        prompt,
        "Lucid dream rate: {:.0}%\n",
        aggregate.lucidity_rate * 100.0
    );
    prompt.push_str(REPLY_SCHEMA);

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)]
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReply {
    main_insight: Option<String>,
    #[serde(default)]
    sub_insights: Vec<RawSubInsight>,
    #[serde(default)]
    pattern: String,
    #[serde(default)]
    suggestion: String,
    #[serde(default)]
    next_focus: Vec<String>,
}

#[derive(Deserialize)]
struct RawSubInsight {
    #[serde(default)]
    title: String,
    #[serde(default, alias = "body")]
    content: String,
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the language tag line, if any
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().trim_end_matches("```").trim()
}

/// Parse a generator reply into insight fields
pub fn parse_reply(text: &str) -> Result<GeneratedInsight, InsightError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(InsightError::EmptyReply);
    }

    let raw: RawReply =
        serde_json::from_str(body).map_err(|e| InsightError::InvalidReply(e.to_string()))?;

    let main_insight = raw
        .main_insight
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| InsightError::InvalidReply("missing mainInsight".to_string()))?;

    Ok(GeneratedInsight {
        main_insight,
        sub_insights: raw
            .sub_insights
            .into_iter()
            .filter(|s| !s.title.trim().is_empty() || !s.content.trim().is_empty())
            .map(|s| SubInsight {
                title: s.title,
                body: s.content,
            })
            .collect(),
        pattern: raw.pattern,
        suggestion: raw.suggestion,
        next_focus: raw
            .next_focus
            .into_iter()
            .filter(|f| !f.trim().is_empty())
            .collect(),
    })
}

/// Generator backed by a chat-completion service
pub struct LlmInsightGenerator {
    completion: Arc<dyn TextCompletion>,
    temperature: f32,
    max_tokens: u32,
}

impl LlmInsightGenerator {
    pub fn new(completion: Arc<dyn TextCompletion>, config: &GeneratorConfig) -> Self {
        Self {
            completion,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Generator talking to the configured HTTP endpoint
    pub fn from_config(config: &GeneratorConfig, api_key: ApiKey) -> Result<Self, InsightError> {
        let client = ChatCompletionClient::new(config, api_key)?;
        Ok(Self::new(Arc::new(client), config))
    }
}

#[async_trait]
impl InsightGenerator for LlmInsightGenerator {
    async fn generate(&self, request: &InsightRequest) -> Result<GeneratedInsight, InsightError> {
        let messages = build_messages(request);
        let reply = self
            .completion
            .complete(&messages, self.temperature, self.max_tokens)
            .await?;
        parse_reply(&reply)
    }
}
