//! "Add to calendar" entries for an event's opening day, closing day or
//! full run, as a Google Calendar template link or an .ics file.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, Utc};
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger, ValueType};
use url::Url;

use crate::classify::ClassifiedEvent;
use crate::error::{ArtwalkError, ArtwalkResult};

const GOOGLE_CALENDAR_URL: &str = "https://calendar.google.com/calendar/render";

const PRODID: &str = "PRODID:ARTWALK";

const REMINDER_TIP: &str = "\n\nTip: Set a reminder for 1 week before this event!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarKind {
    Opening,
    Closing,
    Full,
}

impl CalendarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarKind::Opening => "opening",
            CalendarKind::Closing => "closing",
            CalendarKind::Full => "full",
        }
    }
}

impl fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "opening" => Ok(CalendarKind::Opening),
            "closing" => Ok(CalendarKind::Closing),
            "full" => Ok(CalendarKind::Full),
            other => Err(format!(
                "Unknown calendar event type '{other}'. Expected opening, closing or full"
            )),
        }
    }
}

/// An all-day calendar entry. `end` is exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub uid: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub url: Option<String>,
}

impl CalendarEntry {
    pub fn for_event(classified: &ClassifiedEvent, kind: CalendarKind) -> ArtwalkResult<Self> {
        let event = &classified.event;
        let name = &event.name;
        let venue = event.venue_name();

        let missing = |which: &'static str| ArtwalkError::MissingDate {
            event: name.clone(),
            kind: which,
        };
        let start = event.dates.start.parse();
        let end = event.dates.end.parse();

        let (title, description, first, last) = match kind {
            CalendarKind::Opening => {
                let day = start.ok_or_else(|| missing("Opening"))?;
                (
                    format!("{name} - Opening Day"),
                    format!("Opening day of {name} at {venue}"),
                    day,
                    day,
                )
            }
            CalendarKind::Closing => {
                let day = end.ok_or_else(|| missing("Closing"))?;
                (
                    format!("{name} - Closing Day"),
                    format!("Last day to see {name} at {venue}"),
                    day,
                    day,
                )
            }
            CalendarKind::Full => {
                let first = start.ok_or_else(|| missing("Opening"))?;
                let last = end.ok_or_else(|| missing("Closing"))?;
                if last < first {
                    return Err(ArtwalkError::InvalidArgument(format!(
                        "'{name}' closes before it opens"
                    )));
                }
                (name.clone(), format!("{name} at {venue}"), first, last)
            }
        };

        let url = event.event_page().map(str::to_string);
        let description = match &url {
            Some(link) => format!("{description}\n\nEvent Details: {link}"),
            None => description,
        };

        Ok(CalendarEntry {
            uid: format!("{}-{}@artwalk", classified.id, kind),
            title,
            description,
            location: venue.to_string(),
            start: first,
            end: last + Duration::days(1),
            url,
        })
    }

    /// Google Calendar "create event" template link.
    pub fn google_calendar_url(&self) -> ArtwalkResult<Url> {
        let dates = format!("{}/{}", self.start.format("%Y%m%d"), self.end.format("%Y%m%d"));
        let details = format!("{}{}", self.description, REMINDER_TIP);

        Url::parse_with_params(
            GOOGLE_CALENDAR_URL,
            &[
                ("action", "TEMPLATE"),
                ("text", self.title.as_str()),
                ("dates", dates.as_str()),
                ("details", details.as_str()),
                ("location", self.location.as_str()),
            ],
        )
        .map_err(|e| ArtwalkError::InvalidArgument(e.to_string()))
    }

    /// .ics content with a single all-day event and a reminder a week ahead.
    pub fn to_ics(&self) -> String {
        let mut cal = Calendar::new();

        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&self.uid);
        ics_event.summary(&self.title);
        ics_event.description(&self.description);
        ics_event.location(&self.location);
        ics_event.add_property("DTSTAMP", Utc::now().format("%Y%m%dT%H%M%SZ").to_string());

        add_date_property(&mut ics_event, "DTSTART", self.start);
        add_date_property(&mut ics_event, "DTEND", self.end);

        if let Some(ref url) = self.url {
            ics_event.add_property("URL", url);
        }

        // all-day events never block time
        ics_event.add_property("TRANSP", "TRANSPARENT");

        let trigger = Trigger::before_start(Duration::weeks(1));
        ics_event.alarm(Alarm::display(&self.title, trigger));

        cal.push(ics_event.done());
        tidy_ics(&cal.done().to_string())
    }
}

fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

/// icalendar adds its own PRODID, the implied CALSCALE and a UID/DTSTAMP
/// inside VALARM, none of which a single downloaded reminder needs.
fn tidy_ics(ics: &str) -> String {
    let mut in_alarm = false;

    ics.lines()
        .filter_map(|line| {
            match line {
                "BEGIN:VALARM" => in_alarm = true,
                "END:VALARM" => in_alarm = false,
                _ => {}
            }

            if line.starts_with("PRODID:") {
                return Some(PRODID);
            }
            let alarm_stamp = in_alarm && (line.starts_with("UID:") || line.starts_with("DTSTAMP:"));
            (line != "CALSCALE:GREGORIAN" && !alarm_stamp).then_some(line)
        })
        .map(|line| format!("{line}\r\n"))
        .collect()
}
