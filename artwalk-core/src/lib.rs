//! Core types for artwalk.
//!
//! - `event`: the venue/event data model read from the static JSON documents
//! - `classify`: phase ranking and display ordering
//! - `format`: date phrasing ("Through Dec 31, 2024", "Opens Jun 15, 2025")
//! - `filter`, `links`, `calendar`: what the listing does with a sorted event
//! - `data`, `config`: where the documents come from

pub mod calendar;
pub mod classify;
pub mod config;
pub mod data;
pub mod error;
pub mod event;
pub mod filter;
pub mod format;
pub mod links;
pub mod phase;
pub mod region;

pub use classify::{ClassifiedEvent, Classifier, SortPriority, sort_events};
pub use error::{ArtwalkError, ArtwalkResult};
pub use event::{DateField, Event, EventDates, EventsByVenue, Link, Phase, Venues};
pub use format::format_event_date;
pub use region::Region;
