use anyhow::{bail, Context};
use somnia_journal::{DreamRecord, Emotion, Journal, Paths, Symbol, MAX_INTENSITY};
use somnia_stats::{next_milestone, records_until_next_milestone};

/// Parse `label:intensity`
fn parse_emotion(raw: &str) -> anyhow::Result<Emotion> {
    let (label, intensity) = raw
        .rsplit_once(':')
        .with_context(|| format!("emotion `{raw}` must look like label:intensity"))?;
    let label = label.trim();
    if label.is_empty() {
        bail!("emotion `{raw}` has no label");
    }
    let intensity: u8 = intensity
        .trim()
        .parse()
        .with_context(|| format!("emotion `{raw}` has a non-numeric intensity"))?;
    if intensity > MAX_INTENSITY {
        bail!("emotion `{raw}` intensity must be 0-{MAX_INTENSITY}");
    }
    Ok(Emotion::new(label, intensity))
}

/// Parse `name` or `name:meaning`
fn parse_symbol(raw: &str) -> anyhow::Result<Symbol> {
    let (name, meaning) = match raw.split_once(':') {
        Some((name, meaning)) => (name.trim(), Some(meaning.trim())),
        None => (raw.trim(), None),
    };
    if name.is_empty() {
        bail!("symbol `{raw}` has no name");
    }
    Ok(match meaning.filter(|m| !m.is_empty()) {
        Some(meaning) => Symbol::with_meaning(name, meaning),
        None => Symbol::new(name),
    })
}

fn build_record(
    content: &str,
    lucid: bool,
    emotions: &[String],
    symbols: &[String],
    theme: Option<&str>,
) -> anyhow::Result<DreamRecord> {
    if content.trim().is_empty() {
        bail!("dream content is empty");
    }

    let mut record = DreamRecord::new(content.trim()).lucid(lucid);
    for raw in emotions {
        record = record.with_emotion(parse_emotion(raw)?);
    }
    for raw in symbols {
        record = record.with_symbol(parse_symbol(raw)?);
    }
    if let Some(theme) = theme {
        record = record.with_theme(theme.trim());
    }
    Ok(record)
}

pub async fn run(
    content: &str,
    lucid: bool,
    emotions: &[String],
    symbols: &[String],
    theme: Option<&str>,
) -> anyhow::Result<()> {
    let record = build_record(content, lucid, emotions, symbols, theme)?;
    let paths = Paths::new()?;
    let store = super::open_store(&paths);

    let count = Journal::new(store.as_ref()).append(record).await?;
    println!("Dream recorded ({count} total).");
    println!(
        "{} more until your {}-dream milestone.",
        records_until_next_milestone(count),
        next_milestone(count)
    );
    Ok(())
}
