use somnia_stats::{Quote, QuoteRotator};

fn format_quote(quote: &Quote) -> String {
    format!("\"{}\"\n    - {}\n", quote.text, quote.author)
}

pub fn run(count: usize) -> anyhow::Result<()> {
    let mut rotator = QuoteRotator::default();
    for _ in 0..count.max(1) {
        if let Some(quote) = rotator.next() {
            println!("{}", format_quote(quote));
        }
    }
    Ok(())
}
