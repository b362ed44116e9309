use somnia_journal::{Journal, Paths};
use somnia_stats::{next_milestone, StatsAggregate};

pub async fn run() -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let store = super::open_store(&paths);
    let records = Journal::new(store.as_ref()).load().await;
    let aggregate = StatsAggregate::compute(&records);
    println!("{}", build_report(&aggregate));
    Ok(())
}

fn build_report(aggregate: &StatsAggregate) -> String {
    if aggregate.is_empty() {
        return "No dreams recorded yet.".to_string();
    }

    let mut sections = Vec::new();

    // Section 1: Summary
    sections.push(format!(
        "Dream Journal Report\n====================\n\
         Dreams recorded: {}\nLucid: {:.0}%\nNext milestone: {} dreams{}",
        aggregate.record_count,
        aggregate.lucidity_rate * 100.0,
        next_milestone(aggregate.record_count),
        aggregate
            .dominant_theme
            .as_ref()
            .map(|t| format!("\nDominant theme: {t}"))
            .unwrap_or_default()
    ));

    // Section 2: Symbols
    if !aggregate.pattern_summary.is_empty() {
        let lines: Vec<String> = aggregate
            .pattern_summary
            .iter()
            .map(|p| {
                format!(
                    "  {} - {} times, {:.0}% of dreams",
                    p.symbol,
                    aggregate.symbol_frequency.get(&p.symbol).copied().unwrap_or(0),
                    p.frequency_percent
                )
            })
            .collect();
        sections.push(format!(
            "\nRecurring Symbols\n-----------------\n{}",
            lines.join("\n")
        ));
    }

    // Section 3: Emotions
    if !aggregate.emotion_distribution.is_empty() {
        let lines: Vec<String> = aggregate
            .emotion_distribution
            .iter()
            .map(|e| format!("  {} {:.0}%", e.label, e.normalized * 100.0))
            .collect();
        sections.push(format!(
            "\nEmotional Intensity\n-------------------\n{}",
            lines.join("\n")
        ));
    }

    // Section 4: When
    let histogram_lines = |buckets: &[somnia_stats::Bucket]| -> String {
        buckets
            .iter()
            .filter(|b| b.count > 0)
            .map(|b| format!("  {:<14}{}", b.name, b.count))
            .collect::<Vec<_>>()
            .join("\n")
    };
    sections.push(format!(
        "\nBy Day\n------\n{}\n\nBy Time of Day\n--------------\n{}",
        histogram_lines(&aggregate.time_patterns.day_of_week.buckets),
        histogram_lines(&aggregate.time_patterns.time_of_day.buckets)
    ));

    sections.join("\n")
}
