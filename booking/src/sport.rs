//! Sport configuration table.
//!
//! Every bookable sport has a fixed player range and a per-player rate. The
//! table is static; lookups by typed [`SportKind`] cannot fail, lookups by
//! free-form identifier can.

use crate::error::SportError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sport used when an identifier cannot be resolved
pub const FALLBACK_SPORT: SportKind = SportKind::Badminton;

/// The sports a venue can be booked for
///
/// Serialized as the lowercase identifiers used by the bookings table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SportKind {
    /// Football
    Football,
    /// Cricket
    Cricket,
    /// Basketball
    Basketball,
    /// Tennis
    Tennis,
    /// Badminton
    Badminton,
    /// Volleyball
    Volleyball,
}

impl SportKind {
    /// Every sport, in the order the assistant lists them
    pub const ALL: [Self; 6] = [
        Self::Football,
        Self::Cricket,
        Self::Basketball,
        Self::Tennis,
        Self::Badminton,
        Self::Volleyball,
    ];

    /// Lowercase identifier
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Football => "football",
            Self::Cricket => "cricket",
            Self::Basketball => "basketball",
            Self::Tennis => "tennis",
            Self::Badminton => "badminton",
            Self::Volleyball => "volleyball",
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Football => "Football",
            Self::Cricket => "Cricket",
            Self::Basketball => "Basketball",
            Self::Tennis => "Tennis",
            Self::Badminton => "Badminton",
            Self::Volleyball => "Volleyball",
        }
    }

    /// The first sport whose name occurs anywhere in `text` (case-insensitive)
    #[must_use]
    pub fn mentioned_in(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        Self::ALL.into_iter().find(|kind| lower.contains(kind.id()))
    }
}

impl fmt::Display for SportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SportKind {
    type Err = SportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SportError::UnknownSportKind(wanted.to_string()))
    }
}

/// Player range and rate for one sport
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SportConfig {
    /// Which sport
    pub kind: SportKind,
    /// Fewest players a booking may have (at least 1)
    pub min_players: u32,
    /// Most players a booking may have (at least `min_players`)
    pub max_players: u32,
    /// Charge per player
    pub rate_per_player: Money,
}

impl SportConfig {
    const fn new(kind: SportKind, min_players: u32, max_players: u32, rate: u64) -> Self {
        Self {
            kind,
            min_players,
            max_players,
            rate_per_player: Money::from_rupees(rate),
        }
    }

    /// Human-readable sport name
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        self.kind.display_name()
    }

    /// Whether `count` players is allowed
    #[must_use]
    pub const fn allows(&self, count: u32) -> bool {
        count >= self.min_players && count <= self.max_players
    }
}

/// Static lookup for a typed sport
#[must_use]
pub const fn config_for(kind: SportKind) -> SportConfig {
    match kind {
        SportKind::Badminton => SportConfig::new(kind, 2, 4, 600),
        SportKind::Tennis => SportConfig::new(kind, 2, 4, 800),
        SportKind::Basketball => SportConfig::new(kind, 6, 10, 300),
        SportKind::Volleyball => SportConfig::new(kind, 6, 12, 250),
        SportKind::Football => SportConfig::new(kind, 10, 22, 200),
        SportKind::Cricket => SportConfig::new(kind, 12, 22, 150),
    }
}

/// Lookup by identifier (case-insensitive)
///
/// # Errors
///
/// Returns [`SportError::UnknownSportKind`] when `id` names no sport.
pub fn try_config_for(id: &str) -> Result<SportConfig, SportError> {
    id.parse().map(config_for)
}

/// Lookup by identifier, falling back to [`FALLBACK_SPORT`]
#[must_use]
pub fn config_for_id(id: &str) -> SportConfig {
    try_config_for(id).unwrap_or_else(|error| {
        tracing::warn!(%error, fallback = %FALLBACK_SPORT, "Unknown sport, using fallback");
        config_for(FALLBACK_SPORT)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_ranges_are_well_formed() {
        for kind in SportKind::ALL {
            let config = config_for(kind);
            assert_eq!(config.kind, kind);
            assert!(config.min_players >= 1, "{kind} min");
            assert!(config.max_players >= config.min_players, "{kind} max");
            assert!(!config.rate_per_player.is_zero(), "{kind} rate");
        }
    }

    #[test]
    fn badminton_matches_booking_page() {
        let config = config_for(SportKind::Badminton);
        assert_eq!(
            (config.min_players, config.max_players, config.rate_per_player),
            (2, 4, Money::from_rupees(600))
        );
    }

    #[test]
    fn identifiers_parse_case_insensitively() {
        assert_eq!("Tennis".parse::<SportKind>().ok(), Some(SportKind::Tennis));
        assert_eq!(" CRICKET ".parse::<SportKind>().ok(), Some(SportKind::Cricket));
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        assert_eq!(
            try_config_for("curling"),
            Err(SportError::UnknownSportKind("curling".to_string()))
        );
    }

    #[test]
    fn unknown_identifier_falls_back() {
        assert_eq!(config_for_id("curling").kind, FALLBACK_SPORT);
        assert_eq!(config_for_id("football").kind, SportKind::Football);
    }

    #[test]
    fn mention_uses_listing_order() {
        assert_eq!(
            SportKind::mentioned_in("Let's play BASKETBALL tonight"),
            Some(SportKind::Basketball)
        );
        assert_eq!(SportKind::mentioned_in("anything"), None);
    }
}
