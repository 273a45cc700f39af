//! Outbound links for a listing row.

use url::Url;

use crate::error::{ArtwalkError, ArtwalkResult};
use crate::event::{Event, Venues};

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

/// Google Maps search for a street address.
pub fn map_search_url(address: &str) -> ArtwalkResult<Url> {
    let url = Url::parse_with_params(MAPS_SEARCH_URL, &[("api", "1"), ("query", address)])
        .map_err(|e| ArtwalkError::InvalidArgument(e.to_string()))?;
    Ok(url)
}

/// Map link for the event's venue, when the venue has a known address.
pub fn venue_map_url(event: &Event, venues: &Venues) -> Option<Url> {
    let address = venues.get(event.venue.as_deref()?)?;
    map_search_url(address).ok()
}
