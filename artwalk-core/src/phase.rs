//! Retire events whose run has ended.
//!
//! Scraped data goes stale between scrapes: an exhibition tagged "current"
//! keeps that tag after it closes. Refreshing moves such events to "past".

use chrono::NaiveDate;
use tracing::{debug, error};

use crate::event::{Event, EventsByVenue, Phase};

/// Outcome of a refresh pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseRefresh {
    pub updated: usize,
    /// Events whose end date could not be read
    pub skipped: usize,
}

/// Mark every event that closed before `today` as past.
pub fn refresh_phases(events: &mut EventsByVenue, today: NaiveDate) -> PhaseRefresh {
    let mut outcome = PhaseRefresh::default();

    for (venue, venue_events) in events.iter_mut() {
        for (id, event) in venue_events.iter_mut() {
            let Some(text) = event.dates.end.text() else {
                continue;
            };

            let Some(end) = event.dates.end.parse() else {
                error!(venue = %venue, event = %id, end = text, "Could not parse end date");
                outcome.skipped += 1;
                continue;
            };

            if end < today && mark_past(event) {
                debug!(venue = %venue, event = %id, "Moved to past");
                outcome.updated += 1;
            }
        }
    }

    outcome
}

/// Returns whether anything changed.
fn mark_past(event: &mut Event) -> bool {
    let before = event.clone();
    let past = Phase::Past.as_str();

    event.phase = Some(past.to_string());
    event.ongoing = Some(false);
    event.tags.retain(|t| t != Phase::Current.as_str());
    if !event.has_tag(past) {
        event.tags.push(past.to_string());
    }

    *event != before
}
