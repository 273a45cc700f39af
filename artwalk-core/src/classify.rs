//! Event classification and display ordering.
//!
//! Flattens the venue -> event mapping, ranks every event by its phase
//! tags and produces the ordering the listing is rendered in. The input
//! mapping is left untouched; each output record owns a normalized copy.

use std::cmp::Ordering;

use chrono::{Local, NaiveDate};
use serde::{Serialize, Serializer};
use tracing::warn;

use crate::event::{DateField, Event, EventsByVenue, NULL_SENTINEL, Phase};

/// Sort date for events without a closing date
pub const FAR_FUTURE: &str = "9999-12-31";

/// Stand-in end date for past events that never had one
pub const FAR_PAST: &str = "0000-01-01";

/// Keys this module adds to serialized events
const DERIVED_KEYS: [&str; 3] = ["id", "sortDate", "sortPriority"];

/// Display rank, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortPriority {
    /// Current with a closing date (or no `ongoing` flag at all)
    Current = 1,
    CurrentOngoing = 2,
    Future = 3,
    Past = 4,
    Unclassified = 5,
}

impl SortPriority {
    pub fn of(event: &Event) -> Self {
        match Phase::from_tags(&event.tags) {
            Some(Phase::Current) if event.is_ongoing() => SortPriority::CurrentOngoing,
            Some(Phase::Current) => SortPriority::Current,
            Some(Phase::Future) => SortPriority::Future,
            Some(Phase::Past) => SortPriority::Past,
            None => SortPriority::Unclassified,
        }
    }

    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl Serialize for SortPriority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.rank())
    }
}

/// An event with its derived ordering fields.
///
/// Serializes as the event itself plus `id`, `sortDate` and `sortPriority`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedEvent {
    pub id: String,
    #[serde(flatten)]
    pub event: Event,
    pub sort_date: String,
    pub sort_priority: SortPriority,
}

impl ClassifiedEvent {
    fn start_key(&self) -> &str {
        sort_key(&self.event.dates.start, FAR_FUTURE)
    }

    fn end_key(&self) -> &str {
        sort_key(&self.event.dates.end, FAR_PAST)
    }
}

/// Secondary sort keys compare the raw text. The sentinel keeps its literal
/// `"null"`, which sorts after every ISO date; only a missing or blank field
/// takes the fallback.
fn sort_key<'a>(field: &'a DateField, missing: &'static str) -> &'a str {
    match field {
        DateField::Sentinel => NULL_SENTINEL,
        _ => field.text().unwrap_or(missing),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    today: NaiveDate,
}

impl Classifier {
    pub fn new(today: NaiveDate) -> Self {
        Classifier { today }
    }

    /// Classifier for the local calendar date.
    pub fn local() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Replace a start date that is today or earlier with the sentinel.
    ///
    /// Returns whether the event changed. Unparseable starts are left alone.
    pub fn normalize_start(&self, event: &mut Event) -> bool {
        match event.dates.start.parse() {
            Some(start) if start <= self.today => {
                event.dates.start = DateField::Sentinel;
                true
            }
            _ => false,
        }
    }

    pub fn classify(&self, venue: &str, id: &str, event: &Event) -> ClassifiedEvent {
        warn_invalid_dates(id, event);

        let mut event = event.clone();
        self.normalize_start(&mut event);
        event.venue = Some(venue.to_string());
        for key in DERIVED_KEYS {
            event.extra.remove(key);
        }

        let sort_date = event.dates.end.text().unwrap_or(FAR_FUTURE).to_string();
        let sort_priority = SortPriority::of(&event);

        ClassifiedEvent {
            id: id.to_string(),
            event,
            sort_date,
            sort_priority,
        }
    }

    /// Flatten, classify and order every event.
    pub fn sort(&self, events: &EventsByVenue) -> Vec<ClassifiedEvent> {
        let mut classified: Vec<ClassifiedEvent> = events
            .iter()
            .flat_map(|(venue, venue_events)| {
                venue_events
                    .iter()
                    .map(move |(id, event)| self.classify(venue, id, event))
            })
            .collect();

        order(&mut classified);
        classified
    }
}

/// Set date text that is not a calendar date renders as absent.
fn warn_invalid_dates(id: &str, event: &Event) {
    for (which, field) in [("start", &event.dates.start), ("end", &event.dates.end)] {
        let Some(text) = field.text() else {
            continue;
        };
        if field.parse().is_none() {
            warn!(event = %id, field = which, value = text, "Invalid date string");
        }
    }
}

/// Classify and order with "today" fixed to the given date.
pub fn sort_events(events: &EventsByVenue, today: NaiveDate) -> Vec<ClassifiedEvent> {
    Classifier::new(today).sort(events)
}

/// Stable in-place sort into display order.
pub fn order(events: &mut [ClassifiedEvent]) {
    events.sort_by(compare);
}

/// Priority first; future by start ascending, past by end descending,
/// everything else by sort date ascending.
pub fn compare(a: &ClassifiedEvent, b: &ClassifiedEvent) -> Ordering {
    a.sort_priority
        .cmp(&b.sort_priority)
        .then_with(|| match (a.sort_priority, b.sort_priority) {
            (SortPriority::Future, SortPriority::Future) => a.start_key().cmp(b.start_key()),
            (SortPriority::Past, SortPriority::Past) => b.end_key().cmp(a.end_key()),
            _ => a.sort_date.cmp(&b.sort_date),
        })
}
