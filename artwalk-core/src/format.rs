//! Human-readable date phrasing for the listing.

use chrono::NaiveDate;
use tracing::debug;

use crate::event::{DateField, Event, Phase};

pub const DATES_TBA: &str = "Dates TBA";

/// "Mar 1, 2024"
///
/// Dates are calendar dates with no time zone attached, so there is no
/// local-time conversion that could shift them by a day.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "March 1, 2024"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// A date field that is set and parses. The classifier already warned about
/// unparseable text once per listing.
fn valid_date(field: &DateField, which: &str, event: &Event) -> Option<NaiveDate> {
    let text = field.text()?;
    let date = field.parse();
    if date.is_none() {
        debug!(event = %event.name, field = which, value = text, "Invalid date string");
    }
    date
}

/// Short phrase describing where an event is in its run.
///
/// Phase comes from tags (and the `ongoing` flag) only; dates just fill in
/// the phrase.
pub fn format_event_date(event: &Event) -> String {
    let start = valid_date(&event.dates.start, "start", event);
    let end = valid_date(&event.dates.end, "end", event);

    let is_current = event.has_tag(Phase::Current.as_str());
    let is_future = event.has_tag(Phase::Future.as_str());
    let is_past = event.has_tag(Phase::Past.as_str());

    if event.is_ongoing() && is_current {
        return "Ongoing".to_string();
    }

    if is_past {
        if let Some(end) = end {
            return format!("Closed {}", display_date(end));
        }
    }

    if is_current {
        return match (end, start) {
            (Some(end), _) => format!("Through {}", display_date(end)),
            (None, Some(start)) => format!("Started on {}", display_date(start)),
            (None, None) => DATES_TBA.to_string(),
        };
    }

    if is_future {
        if let Some(start) = start {
            return format!("Opens {}", display_date(start));
        }
    }

    DATES_TBA.to_string()
}

/// Opening/closing summary shown before adding an event to a calendar,
/// e.g. "Opens: March 1, 2024 | Closes: April 2, 2024".
pub fn notify_dates_text(event: &Event) -> String {
    let start = event.dates.start.parse().map(|d| format!("Opens: {}", long_date(d)));
    let end = event.dates.end.parse().map(|d| format!("Closes: {}", long_date(d)));

    match (start, end) {
        (Some(start), Some(end)) => format!("{start} | {end}"),
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => DATES_TBA.to_string(),
    }
}
