pub fn run() -> anyhow::Result<()> {
    println!("somnia {}", env!("CARGO_PKG_VERSION"));
    println!("Dream journal with locally aggregated, generated insights");
    Ok(())
}
