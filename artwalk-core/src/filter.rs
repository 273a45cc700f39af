//! Search term and phase filtering over a sorted listing.

use std::fmt;
use std::str::FromStr;

use crate::classify::ClassifiedEvent;
use crate::event::Phase;
use crate::format::format_event_date;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PhaseFilter {
    #[default]
    All,
    Only(Phase),
}

impl PhaseFilter {
    pub fn matches(&self, phase: Option<Phase>) -> bool {
        match self {
            PhaseFilter::All => true,
            PhaseFilter::Only(wanted) => phase == Some(*wanted),
        }
    }
}

impl FromStr for PhaseFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(PhaseFilter::All);
        }
        s.parse::<Phase>()
            .map(PhaseFilter::Only)
            .map_err(|_| format!("Unknown phase filter '{s}'. Expected all, current, future or past"))
    }
}

impl fmt::Display for PhaseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseFilter::All => f.write_str("all"),
            PhaseFilter::Only(phase) => fmt::Display::fmt(phase, f),
        }
    }
}

/// Current search term and phase selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    term: String,
    phase: PhaseFilter,
}

impl EventFilter {
    pub fn new(term: &str, phase: PhaseFilter) -> Self {
        EventFilter {
            term: term.to_lowercase(),
            phase,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn phase(&self) -> PhaseFilter {
        self.phase
    }

    pub fn set_term(&mut self, term: &str) {
        self.term = term.to_lowercase();
    }

    pub fn set_phase(&mut self, phase: PhaseFilter) {
        self.phase = phase;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Search text matches the title, date phrase, venue or tags, and the
    /// event is in the selected phase.
    pub fn matches(&self, classified: &ClassifiedEvent) -> bool {
        let event = &classified.event;

        if !self.phase.matches(event.phase()) {
            return false;
        }

        if self.term.is_empty() {
            return true;
        }

        [
            event.title(),
            format_event_date(event),
            event.venue_name().to_string(),
            event.tags.join(", "),
        ]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&self.term))
    }

    pub fn apply<'a>(&self, events: &'a [ClassifiedEvent]) -> Vec<&'a ClassifiedEvent> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::event::{DateField, Event};
    use chrono::NaiveDate;

    fn classified(name: &str, venue: &str, tags: &[&str], end: Option<&str>) -> ClassifiedEvent {
        let event = Event {
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            dates: crate::event::EventDates {
                start: DateField::Absent,
                end: end.map(DateField::from_text).unwrap_or_default(),
            },
            ..Default::default()
        };
        Classifier::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()).classify(venue, name, &event)
    }

    fn sample() -> Vec<ClassifiedEvent> {
        vec![
            classified("Ansel Adams", "de Young", &["current", "photography"], Some("2025-04-01")),
            classified("Rothko", "SFMOMA", &["future", "painting"], None),
            classified("Kahlo", "SFMOMA", &["past"], Some("2024-04-01")),
        ]
    }

    fn names(events: Vec<&ClassifiedEvent>) -> Vec<&str> {
        events.into_iter().map(|c| c.event.name.as_str()).collect()
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let events = sample();
        assert_eq!(EventFilter::default().apply(&events).len(), 3);
    }

    #[test]
    fn test_term_is_case_insensitive_across_fields() {
        let events = sample();

        assert_eq!(names(EventFilter::new("ROTHKO", PhaseFilter::All).apply(&events)), vec!["Rothko"]);
        assert_eq!(names(EventFilter::new("sfmoma", PhaseFilter::All).apply(&events)), vec!["Rothko", "Kahlo"]);
        assert_eq!(names(EventFilter::new("photo", PhaseFilter::All).apply(&events)), vec!["Ansel Adams"]);
        assert_eq!(names(EventFilter::new("closed apr", PhaseFilter::All).apply(&events)), vec!["Kahlo"]);
    }

    #[test]
    fn test_phase_and_term_combine() {
        let events = sample();
        let filter = EventFilter::new("sfmoma", PhaseFilter::Only(Phase::Past));

        assert_eq!(names(filter.apply(&events)), vec!["Kahlo"]);
    }

    #[test]
    fn test_clear_resets_filter() {
        let mut filter = EventFilter::new("x", PhaseFilter::Only(Phase::Future));
        filter.clear();
        assert_eq!(filter, EventFilter::default());
    }

    #[test]
    fn test_parse_phase_filter() {
        assert_eq!("all".parse::<PhaseFilter>(), Ok(PhaseFilter::All));
        assert_eq!("Current".parse::<PhaseFilter>(), Ok(PhaseFilter::Only(Phase::Current)));
        assert!("someday".parse::<PhaseFilter>().is_err());
    }
}
