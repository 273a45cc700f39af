use anyhow::Result;
use artwalk_core::Classifier;
use artwalk_core::data::DataLoader;
use artwalk_core::filter::EventFilter;
use owo_colors::OwoColorize;

use super::create_spinner;
use crate::render::{Render, render_links};

pub async fn run(mut loader: DataLoader, filter: EventFilter, json: bool) -> Result<()> {
    let spinner = create_spinner(format!("Loading {} listings", loader.region()));
    let events = loader.fetch_events().await;
    let venues = loader.fetch_venues().await;
    spinner.finish_and_clear();

    let sorted = Classifier::local().sort(&events);
    let shown = filter.apply(&sorted);

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for classified in shown {
        println!("{}", classified.render());
        for line in render_links(classified, &venues) {
            println!("    {}", line);
        }
    }

    Ok(())
}
