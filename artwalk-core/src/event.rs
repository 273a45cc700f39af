//! Venue event types.
//!
//! These mirror the static `{region}_events.json` documents: a mapping of
//! venue name to event id to [`Event`]. Deserialization is where the loose
//! JSON gets validated, so missing `tags`, `dates` or `links` become empty
//! defaults here instead of being checked at every use site.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Literal string the data uses to mean "no date".
pub const NULL_SENTINEL: &str = "null";

/// Link description of the venue's page for an event.
pub const EVENT_PAGE: &str = "Event Page";

/// Link description of an event's thumbnail.
pub const IMAGE: &str = "Image";

/// venue name -> event id -> event, in document order
pub type EventsByVenue = IndexMap<String, IndexMap<String, Event>>;

/// venue name -> street address
pub type Venues = IndexMap<String, String>;

/// A venue event (exhibition, show, installation)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub name: String,

    /// Filled in from the enclosing mapping key by the classifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,

    #[serde(default)]
    pub dates: EventDates,

    /// Display order is preserved
    #[serde(default)]
    pub tags: Vec<String>,

    /// No fixed closing date; shown as perpetually active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ongoing: Option<bool>,

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    /// Fields this crate doesn't interpret (e.g. the scraper's content hash)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDates {
    #[serde(default, skip_serializing_if = "DateField::is_absent")]
    pub start: DateField,

    #[serde(default, skip_serializing_if = "DateField::is_absent")]
    pub end: DateField,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
}

/// One of an event's date fields.
///
/// The data distinguishes a missing key from the `"null"` sentinel, and both
/// from an actual date string. The original form is kept so that documents
/// survive a load/save cycle unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DateField {
    /// Key missing or JSON `null`
    #[default]
    Absent,
    /// The string `"null"`
    Sentinel,
    Text(String),
}

impl DateField {
    pub fn from_text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s == NULL_SENTINEL {
            DateField::Sentinel
        } else {
            DateField::Text(s)
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, DateField::Absent)
    }

    /// The date text, if there is any (not absent, not the sentinel, not blank).
    pub fn text(&self) -> Option<&str> {
        match self {
            DateField::Text(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }

    pub fn is_set(&self) -> bool {
        self.text().is_some()
    }

    /// Parse into a calendar date. Unparseable text yields `None`.
    pub fn parse(&self) -> Option<NaiveDate> {
        self.text().and_then(parse_date)
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::Absent => Ok(()),
            DateField::Sentinel => f.write_str(NULL_SENTINEL),
            DateField::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for DateField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DateField::Absent => serializer.serialize_none(),
            DateField::Sentinel => serializer.serialize_str(NULL_SENTINEL),
            DateField::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for DateField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?
            .map(DateField::from_text)
            .unwrap_or_default())
    }
}

/// Parse a date-only string, falling back to the date part of an ISO date-time.
///
/// Date-times with an offset are converted to UTC first.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// Coarse lifecycle bucket, driven by tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Current,
    Future,
    Past,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Current => "current",
            Phase::Future => "future",
            Phase::Past => "past",
        }
    }

    /// First recognised phase tag, checked current -> future -> past.
    pub fn from_tags(tags: &[String]) -> Option<Phase> {
        [Phase::Current, Phase::Future, Phase::Past]
            .into_iter()
            .find(|phase| tags.iter().any(|t| t == phase.as_str()))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "current" => Ok(Phase::Current),
            "future" => Ok(Phase::Future),
            "past" => Ok(Phase::Past),
            other => Err(format!("Unknown phase '{other}'")),
        }
    }
}

impl Event {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_ongoing(&self) -> bool {
        self.ongoing == Some(true)
    }

    /// The stored `phase` when it is recognised, else the phase derived from tags.
    pub fn phase(&self) -> Option<Phase> {
        self.phase
            .as_deref()
            .and_then(|p| p.parse().ok())
            .or_else(|| Phase::from_tags(&self.tags))
    }

    pub fn venue_name(&self) -> &str {
        self.venue.as_deref().unwrap_or_default()
    }

    /// "{name} @ {venue}"
    pub fn title(&self) -> String {
        format!("{} @ {}", self.name, self.venue_name())
    }

    fn find_link(&self, description: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.description == description && !l.link.is_empty())
            .map(|l| l.link.as_str())
    }

    pub fn event_page(&self) -> Option<&str> {
        self.find_link(EVENT_PAGE)
    }

    pub fn image(&self) -> Option<&str> {
        self.find_link(IMAGE)
    }

    /// Whether there is any date to put on a calendar.
    pub fn can_notify(&self) -> bool {
        self.dates.start.is_set() || self.dates.end.is_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_minimal_event_uses_defaults() {
        let event: Event = serde_json::from_value(json!({ "name": "Untitled" })).unwrap();

        assert_eq!(event.name, "Untitled");
        assert!(event.tags.is_empty());
        assert!(event.links.is_empty());
        assert_eq!(event.dates.start, DateField::Absent);
        assert_eq!(event.dates.end, DateField::Absent);
        assert_eq!(event.ongoing, None);
    }

    #[test]
    fn test_date_field_distinguishes_sentinel_from_missing() {
        let event: Event = serde_json::from_value(json!({
            "name": "A",
            "dates": { "start": "null", "end": null }
        }))
        .unwrap();

        assert_eq!(event.dates.start, DateField::Sentinel);
        assert_eq!(event.dates.end, DateField::Absent);
        assert!(!event.dates.start.is_set());
    }

    #[test]
    fn test_sentinel_and_extra_fields_survive_serialization() {
        let raw = json!({
            "name": "A",
            "dates": { "start": "null", "end": "2024-03-01" },
            "tags": ["past"],
            "links": [],
            "hash": "abc123"
        });
        let event: Event = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(serde_json::to_value(&event).unwrap(), raw);
    }

    #[test]
    fn test_parse_date_accepts_date_times() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(parse_date("2024-03-01"), expected);
        assert_eq!(parse_date("2024-03-01T00:00:00"), expected);
        assert_eq!(parse_date("2024-03-01 12:30:00"), expected);
        assert_eq!(parse_date("2024-03-01T10:00:00Z"), expected);
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn test_blank_text_is_not_set() {
        assert!(!DateField::Text("  ".into()).is_set());
        assert!(DateField::Text("2024-01-01".into()).is_set());
    }

    #[test]
    fn test_phase_from_tags_prefers_current() {
        let tags = vec!["past".to_string(), "current".to_string()];
        assert_eq!(Phase::from_tags(&tags), Some(Phase::Current));
        assert_eq!(Phase::from_tags(&["photography".to_string()]), None);
    }

    #[test]
    fn test_phase_field_overrides_tags() {
        let event = Event {
            tags: vec!["current".into()],
            phase: Some("past".into()),
            ..Default::default()
        };
        assert_eq!(event.phase(), Some(Phase::Past));

        let unknown = Event {
            tags: vec!["future".into()],
            phase: Some("someday".into()),
            ..Default::default()
        };
        assert_eq!(unknown.phase(), Some(Phase::Future));
    }

    #[test]
    fn test_links_lookup_skips_empty_targets() {
        let event = Event {
            links: vec![
                Link { description: IMAGE.into(), link: String::new() },
                Link { description: EVENT_PAGE.into(), link: "https://example.org/show".into() },
            ],
            ..Default::default()
        };

        assert_eq!(event.image(), None);
        assert_eq!(event.event_page(), Some("https://example.org/show"));
    }
}
