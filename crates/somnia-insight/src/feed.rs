//! Insight cards for the UI

use crate::types::{Insight, InsightSnapshot};
use somnia_stats::StatsAggregate;

const FEED_SYMBOLS: usize = 3;

/// Ordered cards combining the generated snapshot with fresh aggregates
pub fn build_feed(snapshot: &InsightSnapshot, aggregate: &StatsAggregate) -> Vec<Insight> {
    let mut feed = vec![Insight::Theme {
        title: aggregate
            .dominant_theme
            .clone()
            .unwrap_or_else(|| "Your dreams".to_string()),
        body: snapshot.main_insight.clone(),
    }];

    feed.extend(snapshot.sub_insights.iter().map(|sub| Insight::Reflection {
        title: sub.title.clone(),
        body: sub.body.clone(),
    }));

    feed.extend(
        aggregate
            .pattern_summary
            .iter()
            .take(FEED_SYMBOLS)
            .map(|p| Insight::Symbol {
                name: p.symbol.clone(),
                frequency_percent: p.frequency_percent,
            }),
    );

    if let Some(top) = aggregate.emotion_distribution.first() {
        feed.push(Insight::Emotion {
            label: top.label.clone(),
            normalized: top.normalized,
        });
    }

    if !snapshot.pattern.trim().is_empty() {
        feed.push(Insight::Pattern {
            body: snapshot.pattern.clone(),
        });
    }

    if aggregate.lucidity_rate > 0.0 {
        feed.push(Insight::Lucidity {
            rate: aggregate.lucidity_rate,
        });
    }

    if !snapshot.suggestion.trim().is_empty() || !snapshot.next_focus.is_empty() {
        feed.push(Insight::Suggestion {
            body: snapshot.suggestion.clone(),
            next_focus: snapshot.next_focus.clone(),
        });
    }

    feed
}
