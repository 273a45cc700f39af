//! Listing regions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// San Francisco Bay Area
    #[default]
    Sf,
    /// Los Angeles
    La,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Sf => "sf",
            Region::La => "la",
        }
    }

    /// Pick the region from a page path such as `/site/la/index.html`.
    /// Defaults to SF.
    pub fn from_path(path: &str) -> Self {
        if path.contains("/sf/") {
            Region::Sf
        } else if path.contains("/la/") {
            Region::La
        } else {
            Region::default()
        }
    }

    pub fn venues_file(&self) -> String {
        format!("{}_venues.json", self.as_str())
    }

    pub fn events_file(&self) -> String {
        format!("{}_events.json", self.as_str())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sf" => Ok(Region::Sf),
            "la" => Ok(Region::La),
            other => Err(format!("Unknown region '{other}'. Expected sf or la")),
        }
    }
}
