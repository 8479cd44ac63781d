//! Domain types for QuickCourt bookings.
//!
//! Identifiers, the player roster, time slots, the in-progress booking draft
//! and the finalized request handed to persistence.

use crate::error::ValidationError;
use crate::money::Money;
use crate::pricing::{PricingResult, compute_pricing, duration_hours};
use crate::sport::{SportConfig, SportKind, config_for};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            #[doc = concat!("Creates a new random `", stringify!($name), "`")]
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[doc = concat!("Create a `", stringify!($name), "` from a `Uuid`")]
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the inner UUID
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a venue
    VenueId
);
uuid_id!(
    /// Unique identifier for a stored booking
    BookingId
);
uuid_id!(
    /// Unique identifier for a user account
    UserId
);
uuid_id!(
    /// Identifies one submission attempt; outcomes for other attempts are stale
    SubmissionId
);

// ============================================================================
// Players
// ============================================================================

/// Editable field of a [`PlayerDetail`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerField {
    /// Player name (required)
    Name,
    /// Phone number (required)
    Phone,
    /// Email address (optional)
    Email,
}

impl fmt::Display for PlayerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
        })
    }
}

/// One roster entry; index 0 is the lead player
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDetail {
    /// Zero-based roster position
    pub index: usize,
    /// Player name
    pub name: String,
    /// Phone number
    pub phone: String,
    /// Optional email
    pub email: Option<String>,
}

impl PlayerDetail {
    /// Blank entry at `index`
    #[must_use]
    pub fn blank(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Whether this is the lead player
    #[must_use]
    pub const fn is_lead(&self) -> bool {
        self.index == 0
    }

    /// First required field that is empty, if any
    #[must_use]
    pub fn missing_field(&self) -> Option<PlayerField> {
        if self.name.trim().is_empty() {
            Some(PlayerField::Name)
        } else if self.phone.trim().is_empty() {
            Some(PlayerField::Phone)
        } else {
            None
        }
    }

    /// Set one field; an empty email clears it
    pub fn set(&mut self, field: PlayerField, value: String) {
        match field {
            PlayerField::Name => self.name = value,
            PlayerField::Phone => self.phone = value,
            PlayerField::Email => {
                self.email = if value.trim().is_empty() { None } else { Some(value) };
            },
        }
    }
}

// ============================================================================
// Time slots
// ============================================================================

/// Start and end hours of the slots the booking page offers
const OFFERED_SLOT_HOURS: [(u32, u32); 9] = [
    (6, 7),
    (7, 8),
    (8, 9),
    (16, 17),
    (17, 18),
    (18, 19),
    (19, 20),
    (20, 21),
    (21, 22),
];

/// A wall-clock time range within one day
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Start time
    pub start: NaiveTime,
    /// End time (after `start`)
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Slot from start/end, if `end` is after `start`
    #[must_use]
    pub fn new(start: NaiveTime, end: NaiveTime) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    /// Parse `"HH:MM - HH:MM"` or `"h:MM AM - h:MM PM"`
    ///
    /// The separator may be `-`, `–` or `—`, with any surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimeSlot`] when either end is not a
    /// time or the range is empty.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidTimeSlot {
            input: input.to_string(),
        };

        let mut parts = input.split(['-', '–', '—']);
        let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let start = parse_clock_time(start).ok_or_else(invalid)?;
        let end = parse_clock_time(end).ok_or_else(invalid)?;
        Self::new(start, end).ok_or_else(invalid)
    }

    /// Length in minutes
    #[must_use]
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Slots offered by the booking page, in display order
    #[must_use]
    pub fn offered() -> Vec<Self> {
        OFFERED_SLOT_HOURS
            .iter()
            .filter_map(|&(start, end)| {
                Self::new(
                    NaiveTime::from_hms_opt(start, 0, 0)?,
                    NaiveTime::from_hms_opt(end, 0, 0)?,
                )
            })
            .collect()
    }

    /// Whether this slot is one of [`TimeSlot::offered`]
    #[must_use]
    pub fn is_offered(&self) -> bool {
        Self::offered().contains(self)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

fn parse_clock_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(&text.to_uppercase(), "%I:%M %p"))
        .ok()
}

// ============================================================================
// Draft
// ============================================================================

/// The in-progress booking form
///
/// Owned by one booking flow; discarded on navigation away or after a
/// confirmed submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookingDraft {
    /// Venue being booked
    pub venue_id: VenueId,
    /// Sport being played
    pub sport: SportKind,
    /// Selected date
    pub date: Option<NaiveDate>,
    /// Selected slot
    pub time_slot: Option<TimeSlot>,
    /// Chosen player count
    pub player_count: Option<u32>,
    /// Roster; always `player_count` entries long
    pub players: Vec<PlayerDetail>,
    /// Free-text requests for the venue
    pub special_requests: Option<String>,
}

impl BookingDraft {
    /// Empty draft for a venue and sport
    #[must_use]
    pub const fn new(venue_id: VenueId, sport: SportKind) -> Self {
        Self {
            venue_id,
            sport,
            date: None,
            time_slot: None,
            player_count: None,
            players: Vec::new(),
            special_requests: None,
        }
    }

    /// Same venue and sport, everything else cleared
    #[must_use]
    pub const fn emptied(&self) -> Self {
        Self::new(self.venue_id, self.sport)
    }

    /// Configuration of the draft's sport
    #[must_use]
    pub const fn sport_config(&self) -> SportConfig {
        config_for(self.sport)
    }

    /// Pricing for the current player count (at least one player charged)
    #[must_use]
    pub fn pricing(&self) -> PricingResult {
        compute_pricing(
            self.sport_config().rate_per_player,
            self.player_count.unwrap_or(0),
        )
    }

    /// Set the player count and resize the roster to match
    ///
    /// Growing appends blank entries; shrinking truncates from the end.
    /// Entries at retained positions are untouched.
    pub fn set_player_count(&mut self, count: u32) {
        let len = count as usize;
        self.player_count = Some(count);
        if len < self.players.len() {
            self.players.truncate(len);
        } else {
            let start = self.players.len();
            self.players.extend((start..len).map(PlayerDetail::blank));
        }
    }

    /// Lowest-index player missing a required field
    #[must_use]
    pub fn first_incomplete_player(&self) -> Option<(usize, PlayerField)> {
        self.players
            .iter()
            .enumerate()
            .find_map(|(index, player)| player.missing_field().map(|field| (index, field)))
    }

    /// Assemble the submission payload
    ///
    /// # Errors
    ///
    /// The first blocking problem, checked in form order: date, slot,
    /// player count, then the lowest-index incomplete player.
    pub fn to_request(&self) -> Result<BookingRequest, ValidationError> {
        let date = self.date.ok_or(ValidationError::MissingDate)?;
        let slot = self.time_slot.ok_or(ValidationError::MissingTimeSlot)?;
        let player_count = self.player_count.ok_or(ValidationError::MissingPlayerCount)?;
        if let Some((index, field)) = self.first_incomplete_player() {
            return Err(ValidationError::IncompletePlayer { index, field });
        }

        let pricing = self.pricing();
        Ok(BookingRequest {
            venue_id: self.venue_id,
            sport: self.sport,
            date,
            start_time: slot.start,
            end_time: slot.end,
            duration_hours: duration_hours(&slot),
            player_count,
            total_amount: pricing.total_amount,
            service_fee: pricing.service_fee,
            final_amount: pricing.final_amount,
            special_requests: self.special_requests.clone(),
            players: self.players.clone(),
        })
    }
}

// ============================================================================
// Submission
// ============================================================================

/// The finalized booking, immutable once assembled
///
/// The acting user is attached when the request reaches the backend, since
/// the session is only read at that point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    /// Venue
    pub venue_id: VenueId,
    /// Sport
    pub sport: SportKind,
    /// Booking date
    pub date: NaiveDate,
    /// Slot start
    pub start_time: NaiveTime,
    /// Slot end
    pub end_time: NaiveTime,
    /// Whole hours, at least 1
    pub duration_hours: u32,
    /// Number of players
    pub player_count: u32,
    /// Rate × players
    pub total_amount: Money,
    /// 5% of total
    pub service_fee: Money,
    /// Total plus fee
    pub final_amount: Money,
    /// Free-text requests
    pub special_requests: Option<String>,
    /// Full roster
    pub players: Vec<PlayerDetail>,
}

/// What the user sees after a confirmed submission
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookingConfirmation {
    /// Stored booking
    pub booking_id: BookingId,
    /// Amount charged
    pub final_amount: Money,
    /// False when the roster insert failed after the booking was stored
    pub roster_saved: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn slot_parses_every_dash() {
        let expected = TimeSlot::new(hm(18, 0), hm(19, 0)).unwrap();
        for text in ["18:00 - 19:00", "18:00–19:00", "18:00 — 19:00", " 18:00-19:00 "] {
            assert_eq!(TimeSlot::parse(text), Ok(expected), "{text}");
        }
    }

    #[test]
    fn slot_parses_twelve_hour_clock() {
        let slot = TimeSlot::parse("6:00 PM - 8:00 PM").unwrap();
        assert_eq!(slot, TimeSlot::new(hm(18, 0), hm(20, 0)).unwrap());
        assert_eq!(slot.to_string(), "18:00 - 20:00");
    }

    #[test]
    fn slot_rejects_backwards_or_garbled_input() {
        assert!(TimeSlot::parse("19:00 - 18:00").is_err());
        assert!(TimeSlot::parse("evening").is_err());
        assert!(TimeSlot::parse("1:00 - 2:00 - 3:00").is_err());
    }

    #[test]
    fn nine_slots_are_offered() {
        let offered = TimeSlot::offered();
        assert_eq!(offered.len(), 9);
        assert_eq!(offered[0].to_string(), "06:00 - 07:00");
        assert_eq!(offered[8].to_string(), "21:00 - 22:00");
        assert!(!TimeSlot::new(hm(12, 0), hm(13, 0)).unwrap().is_offered());
    }

    #[test]
    fn email_is_optional_for_completeness() {
        let mut player = PlayerDetail::blank(0);
        assert_eq!(player.missing_field(), Some(PlayerField::Name));
        player.set(PlayerField::Name, "Asha".into());
        assert_eq!(player.missing_field(), Some(PlayerField::Phone));
        player.set(PlayerField::Phone, "98200 00000".into());
        assert_eq!(player.missing_field(), None);
        player.set(PlayerField::Email, "  ".into());
        assert_eq!(player.email, None);
        assert!(player.is_lead());
    }

    #[test]
    fn request_reports_first_missing_step() {
        let mut draft = BookingDraft::new(VenueId::new(), SportKind::Badminton);
        assert_eq!(draft.to_request(), Err(ValidationError::MissingDate));

        draft.date = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(draft.to_request(), Err(ValidationError::MissingTimeSlot));

        draft.time_slot = TimeSlot::parse("18:00 - 19:00").ok();
        assert_eq!(draft.to_request(), Err(ValidationError::MissingPlayerCount));

        draft.set_player_count(2);
        assert_eq!(
            draft.to_request(),
            Err(ValidationError::IncompletePlayer {
                index: 0,
                field: PlayerField::Name
            })
        );
    }
}
