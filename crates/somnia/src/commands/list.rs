use somnia_journal::{DreamRecord, Journal, Paths};

const PREVIEW_CHARS: usize = 60;

fn format_entry(record: &DreamRecord) -> String {
    let mut preview: String = record.content.chars().take(PREVIEW_CHARS).collect();
    if record.content.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }

    let mut line = format!("{}  ", record.captured_at.format("%Y-%m-%d %H:%M"));
    if record.is_lucid {
        line.push_str("[lucid] ");
    }
    if !record.theme.is_empty() {
        line.push_str(&format!("({}) ", record.theme));
    }
    line.push_str(&preview);
    line
}

pub async fn run(limit: usize) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let store = super::open_store(&paths);
    let records = Journal::new(store.as_ref()).load().await;

    if records.is_empty() {
        println!("No dreams recorded yet.");
        return Ok(());
    }

    println!("Dreams: {}", records.len());
    for record in records.iter().rev().take(limit) {
        println!("  {}", format_entry(record));
    }
    Ok(())
}
