use somnia_insight::{ApiKey, EngineConfig, InsightCache};
use somnia_journal::{Journal, Paths};
use somnia_stats::{compute_lucidity_rate, next_milestone};

pub async fn run() -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let config = EngineConfig::load(&paths.config_file())?;
    let store = super::open_store(&paths);

    let records = Journal::new(store.as_ref()).load().await;
    let cache = InsightCache::new(store, config.staleness);
    let snapshot = cache.load().await;
    let stale = config.staleness.is_stale(snapshot.as_ref(), records.len());

    let mut output = serde_json::json!({
        "dreams": records.len(),
        "lucid_rate": compute_lucidity_rate(&records),
        "next_milestone": next_milestone(records.len()),
        "insights_stale": stale,
        "generator_configured": ApiKey::from_env().is_ok(),
    });

    if let Some(snapshot) = snapshot {
        output["insights_generated_at"] = serde_json::json!(snapshot.generated_at.to_rfc3339());
        output["insights_dream_count"] = serde_json::json!(snapshot.dream_count_at_generation);
    }

    println!("{output}");
    Ok(())
}
