use std::path::Path;

use anyhow::{Context, Result};
use artwalk_core::calendar::{CalendarEntry, CalendarKind};
use artwalk_core::data::DataLoader;
use artwalk_core::format::notify_dates_text;
use artwalk_core::{ClassifiedEvent, Classifier};
use owo_colors::OwoColorize;

pub async fn run(loader: DataLoader, event: &str, kind: CalendarKind, ics: Option<&Path>) -> Result<()> {
    let events = loader.fetch_events().await;
    let sorted = Classifier::local().sort(&events);

    let classified = find_event(&sorted, event)?;
    let entry = CalendarEntry::for_event(classified, kind)?;

    println!("{}", classified.event.name.bold());
    println!("@ {}", classified.event.venue_name());
    println!("{}", notify_dates_text(&classified.event).dimmed());
    println!();
    println!("{}", entry.google_calendar_url()?);

    if let Some(path) = ics {
        std::fs::write(path, entry.to_ics())
            .with_context(|| format!("Could not write {}", path.display()))?;
        println!("{} {}", "Wrote".green(), path.display());
    }

    Ok(())
}

/// By id, falling back to a unique case-insensitive name match.
fn find_event<'a>(sorted: &'a [ClassifiedEvent], query: &str) -> Result<&'a ClassifiedEvent> {
    if let Some(found) = sorted.iter().find(|c| c.id == query) {
        return Ok(found);
    }

    let by_name: Vec<_> = sorted
        .iter()
        .filter(|c| c.event.name.eq_ignore_ascii_case(query))
        .collect();

    match by_name.as_slice() {
        [only] => Ok(*only),
        [] => anyhow::bail!("Event '{}' not found. Run `artwalk list` to see event ids", query),
        many => {
            let ids: Vec<_> = many.iter().map(|c| c.id.as_str()).collect();
            anyhow::bail!("'{}' matches several events. Use one of: {}", query, ids.join(", "))
        }
    }
}
