use anyhow::Result;
use artwalk_core::data::DataLoader;
use artwalk_core::phase::refresh_phases;
use chrono::Local;
use owo_colors::OwoColorize;

pub async fn run(loader: DataLoader) -> Result<()> {
    // a failed load must not be saved back as an empty document
    let mut events = loader.try_fetch_events().await?;

    let outcome = refresh_phases(&mut events, Local::now().date_naive());

    if outcome.updated > 0 {
        loader.save_events(&events).await?;
        println!(
            "{}",
            format!("Moved {} {} to past", outcome.updated, pluralize("event", outcome.updated)).green()
        );
    } else {
        println!("{}", "No changes".dimmed());
    }

    if outcome.skipped > 0 {
        println!(
            "{}",
            format!("Skipped {} {} with unreadable end dates", outcome.skipped, pluralize("event", outcome.skipped))
                .yellow()
        );
    }

    Ok(())
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 { word.to_string() } else { format!("{word}s") }
}
