use somnia_insight::{
    build_feed, ApiKey, EngineConfig, Insight, InsightCache, InsightSnapshot, LlmInsightGenerator,
    RefreshCoordinator,
};
use somnia_journal::{Journal, Paths};
use somnia_stats::StatsAggregate;
use std::sync::Arc;

fn render_feed(cards: &[Insight]) -> String {
    cards
        .iter()
        .map(|card| {
            let mut block = format!("## {}\n{}", card.title(), card.body());
            if let Insight::Suggestion { next_focus, .. } = card {
                for focus in next_focus {
                    block.push_str(&format!("\n  - {focus}"));
                }
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn print_snapshot(snapshot: &InsightSnapshot, aggregate: &StatsAggregate) {
    println!("{}", render_feed(&build_feed(snapshot, aggregate)));
    println!(
        "\n(generated {} from {} dreams)",
        snapshot.generated_at.format("%Y-%m-%d %H:%M"),
        snapshot.dream_count_at_generation
    );
}

fn not_enough_data(record_count: usize, min_records: usize) -> String {
    format!(
        "Not enough dreams for insights yet: record at least {} ({} so far).",
        min_records, record_count
    )
}

pub async fn run(force: bool) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let config = EngineConfig::load(&paths.config_file())?;
    let store = super::open_store(&paths);

    let records = Journal::new(store.as_ref()).load().await;
    let aggregate = StatsAggregate::compute(&records);
    let cache = InsightCache::new(store, config.staleness);
    let min_records = config.staleness.min_records;

    let api_key = match ApiKey::from_env() {
        Ok(key) => key,
        Err(e) if force => return Err(e.into()),
        Err(e) => {
            tracing::warn!(error = %e, "insight generation unavailable, showing cached insights");
            match cache.load().await {
                Some(snapshot) => print_snapshot(&snapshot, &aggregate),
                None => println!("{}", not_enough_data(records.len(), min_records)),
            }
            return Ok(());
        }
    };

    let generator = LlmInsightGenerator::from_config(&config.generator, api_key)?;
    let coordinator = RefreshCoordinator::new(cache, Arc::new(generator));

    let result = if force {
        coordinator.force_refresh(&records).await.map(Some)
    } else {
        coordinator.get_or_refresh(&records).await
    };

    match result {
        Ok(Some(snapshot)) => print_snapshot(&snapshot, &aggregate),
        Ok(None) => println!("{}", not_enough_data(records.len(), min_records)),
        Err(e) => match coordinator.cached().await {
            Some(previous) => {
                print_snapshot(&previous, &aggregate);
                eprintln!("\nRefreshing insights failed: {e}");
            }
            None => return Err(e.into()),
        },
    }
    Ok(())
}
