//! Insight aggregation, caching and single-flight regeneration

mod cache;
mod client;
mod config;
mod coordinator;
mod error;
mod feed;
mod generator;
mod types;

pub use cache::{InsightCache, StalenessPolicy, SNAPSHOT_KEY};
pub use client::{wants_json, ChatCompletionClient, ChatMessage, Role, TextCompletion};
pub use config::{ApiKey, EngineConfig, GeneratorConfig, API_KEY_ENV, FALLBACK_API_KEY_ENV};
pub use coordinator::RefreshCoordinator;
pub use error::{ConfigError, InsightError};
pub use feed::build_feed;
pub use generator::{build_messages, parse_reply, InsightGenerator, InsightRequest, LlmInsightGenerator};
pub use types::{GeneratedInsight, Insight, InsightSnapshot, SubInsight};
