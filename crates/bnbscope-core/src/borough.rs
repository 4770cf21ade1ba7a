//! The closed five-borough enumeration and its static display data.
//!
//! Boroughs are validated at the system boundary: anything arriving as a
//! string (CLI flags, event streams, database rows) goes through
//! [`Borough::parse`], and an unrecognized name is a hard error rather than
//! a silently dropped row.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScopeError};

/// One of the five NYC boroughs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Borough {
    Manhattan,
    Brooklyn,
    Queens,
    Bronx,
    StatenIsland,
}

/// Pixel position of a borough marker on the 320x256 base map image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapPosition {
    pub x: u32,
    pub y: u32,
}

impl Borough {
    /// The full enumeration, in canonical display order.
    pub const ALL: [Borough; 5] = [
        Borough::Manhattan,
        Borough::Brooklyn,
        Borough::Queens,
        Borough::Bronx,
        Borough::StatenIsland,
    ];

    /// Canonical display name, as used in the database and event payloads.
    pub fn name(&self) -> &'static str {
        match self {
            Borough::Manhattan => "Manhattan",
            Borough::Brooklyn => "Brooklyn",
            Borough::Queens => "Queens",
            Borough::Bronx => "Bronx",
            Borough::StatenIsland => "Staten Island",
        }
    }

    /// Parse a display name into a borough.
    ///
    /// Fails with [`ScopeError::UnknownBorough`] for anything outside the
    /// enumeration; callers must not swallow this, it signals that the
    /// upstream map/UI and the reference data have drifted apart.
    pub fn parse(name: &str) -> Result<Borough> {
        match name {
            "Manhattan" => Ok(Borough::Manhattan),
            "Brooklyn" => Ok(Borough::Brooklyn),
            "Queens" => Ok(Borough::Queens),
            "Bronx" => Ok(Borough::Bronx),
            "Staten Island" => Ok(Borough::StatenIsland),
            other => Err(ScopeError::UnknownBorough {
                name: other.to_string(),
            }),
        }
    }

    /// Display color on the map and in chart series.
    pub fn color(&self) -> &'static str {
        match self {
            Borough::Manhattan => "#ff928b",
            Borough::Brooklyn => "#efe9ae",
            Borough::Queens => "#cdeac0",
            Borough::Bronx => "#ffac81",
            Borough::StatenIsland => "#fec3a6",
        }
    }

    /// Marker position on the base map image.
    pub fn map_position(&self) -> MapPosition {
        match self {
            Borough::Manhattan => MapPosition { x: 120, y: 110 },
            Borough::Brooklyn => MapPosition { x: 140, y: 185 },
            Borough::Queens => MapPosition { x: 230, y: 140 },
            Borough::Bronx => MapPosition { x: 185, y: 55 },
            Borough::StatenIsland => MapPosition { x: 55, y: 220 },
        }
    }
}

impl fmt::Display for Borough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Borough {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self> {
        Borough::parse(s)
    }
}

impl Serialize for Borough {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Borough {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Borough::parse(&name).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_display_names() {
        for borough in Borough::ALL {
            assert_eq!(Borough::parse(borough.name()).unwrap(), borough);
        }
    }

    #[test]
    fn test_parse_unknown_name_fails() {
        let err = Borough::parse("Jersey City").unwrap_err();
        assert!(matches!(err, ScopeError::UnknownBorough { .. }));
    }

    #[test]
    fn test_serde_round_trip_uses_display_names() {
        let json = serde_json::to_string(&Borough::StatenIsland).unwrap();
        assert_eq!(json, "\"Staten Island\"");
        let back: Borough = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Borough::StatenIsland);
    }
}
