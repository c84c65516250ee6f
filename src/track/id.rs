//! Track identifiers and track requests

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ChargenError;

/// The closed set of career tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrackId {
    Random,
    Worker,
    Crafts,
    Army,
    Navy,
    Merchant,
    Ranger,
    Officer,
    Magic,
}

impl TrackId {
    pub const ALL: [TrackId; 9] = [
        TrackId::Random,
        TrackId::Worker,
        TrackId::Crafts,
        TrackId::Army,
        TrackId::Navy,
        TrackId::Merchant,
        TrackId::Ranger,
        TrackId::Officer,
        TrackId::Magic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TrackId::Random => "Random",
            TrackId::Worker => "Worker",
            TrackId::Crafts => "Crafts",
            TrackId::Army => "Army",
            TrackId::Navy => "Navy",
            TrackId::Merchant => "Merchant",
            TrackId::Ranger => "Ranger",
            TrackId::Officer => "Officer",
            TrackId::Magic => "Magic",
        }
    }

    /// Case-insensitive lookup
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        TrackId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackId {
    type Err = ChargenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackId::parse(s).ok_or_else(|| ChargenError::TrackNotFound(s.to_string()))
    }
}

/// What the caller asked for: automatic selection by priority, a uniform
/// pick among every track that accepts, or a named track.
///
/// Named requests keep the raw text so that unrecognized names can be
/// reported back rather than rejected up front.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrackRequest {
    #[default]
    Auto,
    /// Check every track, then roll among those that accepted
    RandomEligible,
    Named(String),
}

impl TrackRequest {
    const AUTO: &'static str = "auto";
    const RANDOM_ELIGIBLE: &'static str = "random-eligible";

    pub fn named(name: impl Into<String>) -> Self {
        TrackRequest::Named(name.into())
    }
}

impl From<String> for TrackRequest {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(TrackRequest::AUTO) {
            TrackRequest::Auto
        } else if trimmed.eq_ignore_ascii_case(TrackRequest::RANDOM_ELIGIBLE) {
            TrackRequest::RandomEligible
        } else {
            TrackRequest::Named(value)
        }
    }
}

impl From<&str> for TrackRequest {
    fn from(value: &str) -> Self {
        TrackRequest::from(value.to_string())
    }
}

impl From<TrackId> for TrackRequest {
    fn from(id: TrackId) -> Self {
        TrackRequest::Named(id.as_str().to_string())
    }
}

impl From<TrackRequest> for String {
    fn from(request: TrackRequest) -> Self {
        match request {
            TrackRequest::Auto => TrackRequest::AUTO.to_string(),
            TrackRequest::RandomEligible => TrackRequest::RANDOM_ELIGIBLE.to_string(),
            TrackRequest::Named(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(TrackId::parse("army"), Some(TrackId::Army));
        assert_eq!(TrackId::parse(" NAVY "), Some(TrackId::Navy));
        assert_eq!(TrackId::parse("Pirate"), None);
        assert!("Pirate".parse::<TrackId>().is_err());
    }

    #[test]
    fn test_track_request_from_string() {
        assert_eq!(TrackRequest::from("auto"), TrackRequest::Auto);
        assert_eq!(TrackRequest::from("AUTO"), TrackRequest::Auto);
        assert_eq!(
            TrackRequest::from("Ranger"),
            TrackRequest::Named("Ranger".to_string())
        );
        assert_eq!(String::from(TrackRequest::Auto), "auto");
        assert_eq!(TrackRequest::from("Random-Eligible"), TrackRequest::RandomEligible);
        assert_eq!(String::from(TrackRequest::RandomEligible), "random-eligible");
        // the Random track itself is still a named request
        assert_eq!(
            TrackRequest::from("Random"),
            TrackRequest::Named("Random".to_string())
        );
    }

    #[test]
    fn test_track_request_serde() {
        let request: TrackRequest = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(request, TrackRequest::Auto);
        let json = serde_json::to_string(&TrackRequest::from(TrackId::Magic)).unwrap();
        assert_eq!(json, "\"Magic\"");
    }
}
