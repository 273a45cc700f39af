//! Terminal rendering for listing rows.
//!
//! Extension traits that add colored output to artwalk-core types using
//! owo_colors.

use artwalk_core::links::venue_map_url;
use artwalk_core::{ClassifiedEvent, Phase, Venues, format_event_date};
use owo_colors::OwoColorize;

/// Width of the date column
const DATE_WIDTH: usize = 24;

/// Width of the link labels under a row
const LABEL_WIDTH: usize = 11;

pub trait Render {
    fn render(&self) -> String;
}

/// Colorize text according to the event's phase
fn colorize_phase(phase: Option<Phase>, text: &str) -> String {
    match phase {
        Some(Phase::Current) => text.green().to_string(),
        Some(Phase::Future) => text.cyan().to_string(),
        Some(Phase::Past) => text.dimmed().to_string(),
        None => text.to_string(),
    }
}

impl Render for ClassifiedEvent {
    fn render(&self) -> String {
        let event = &self.event;

        // pad before coloring so escape codes don't count toward the width
        let date = format!("{:<width$}", format_event_date(event), width = DATE_WIDTH);
        let tags = if event.tags.is_empty() {
            String::new()
        } else {
            format!("[{}]", event.tags.join(", "))
        };

        format!(
            "{} {} {}",
            colorize_phase(event.phase(), &date),
            event.title().bold(),
            tags.dimmed()
        )
    }
}

fn label(text: &str) -> String {
    format!("{:<width$}", text, width = LABEL_WIDTH).dimmed().to_string()
}

/// Event page, map, image and notify lines shown under a row.
pub fn render_links(classified: &ClassifiedEvent, venues: &Venues) -> Vec<String> {
    let event = &classified.event;
    let mut lines = Vec::new();

    if let Some(page) = event.event_page() {
        lines.push(format!("{} {}", label("Event Page"), page));
    }

    if let Some(map) = venue_map_url(event, venues) {
        lines.push(format!("{} {}", label("Map"), map));
    }

    if let Some(image) = event.image() {
        lines.push(format!("{} {}", label("Image"), image));
    }

    if event.can_notify() {
        lines.push(format!(
            "{} artwalk notify \"{}\" --kind <opening|closing|full>",
            label("Notify Me"),
            classified.id
        ));
    }

    lines
}
