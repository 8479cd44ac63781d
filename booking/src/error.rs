//! Error types for the booking domain.

use crate::session::{Route, UserRole};
use crate::sport::SportKind;
use crate::types::PlayerField;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// A rejected edit or submission attempt
///
/// Carried in state as an inline message; never returned from a reducer.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationError {
    /// No date selected
    #[error("Please select a date")]
    MissingDate,

    /// Date outside the bookable window
    #[error("{date} is not available for booking")]
    DateNotOffered {
        /// The rejected date
        date: NaiveDate,
    },

    /// No time slot selected
    #[error("Please select a time slot")]
    MissingTimeSlot,

    /// Text that does not read as a time range
    #[error("Could not read \"{input}\" as a time slot")]
    InvalidTimeSlot {
        /// The rejected text
        input: String,
    },

    /// A well-formed slot that is not on offer
    #[error("{slot} is not an available time slot")]
    SlotNotOffered {
        /// The rejected slot, normalised
        slot: String,
    },

    /// No player count chosen
    #[error("Please choose the number of players")]
    MissingPlayerCount,

    /// Player count outside the sport's range
    #[error("{sport} allows {min} to {max} players, not {requested}")]
    PlayerCountOutOfRange {
        /// Sport being booked
        sport: SportKind,
        /// Requested count
        requested: u32,
        /// Sport minimum
        min: u32,
        /// Sport maximum
        max: u32,
    },

    /// Edit addressed to a roster position that does not exist
    #[error("There is no player {}", .index + 1)]
    UnknownPlayer {
        /// Zero-based roster position
        index: usize,
    },

    /// The lowest-index player missing a required field
    #[error("Please enter the {field} for player {}", .index + 1)]
    IncompletePlayer {
        /// Zero-based roster position
        index: usize,
        /// First missing field
        field: PlayerField,
    },
}

/// Sport lookup failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SportError {
    /// Identifier names no configured sport
    #[error("Unknown sport: {0}")]
    UnknownSportKind(String),
}

/// Catalog query parameter that could not be read
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Unrecognised price band identifier
    #[error("Unknown price range: {0}")]
    UnknownPriceBand(String),

    /// Unrecognised sort identifier
    #[error("Unknown sort order: {0}")]
    UnknownSort(String),
}

/// Failure reported by the persistence backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// No signed-in user
    #[error("no active session")]
    NoSession,

    /// The backend refused the write
    #[error("{message}")]
    Rejected {
        /// Backend-provided reason (may be empty)
        message: String,
    },

    /// The backend could not be reached
    #[error("backend unavailable")]
    Unavailable,
}

/// Why a submission failed, phrased for the user
///
/// Every variant is retry-eligible; the draft is kept.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SubmissionError {
    /// No active session at submit time
    #[error("Please log in to book a venue")]
    NotLoggedIn,

    /// Persistence failed with a message
    #[error("Booking failed: {message}")]
    Backend {
        /// Backend-provided reason
        message: String,
    },

    /// Persistence failed without a usable message
    #[error("Booking failed. Please try again.")]
    Unknown,
}

impl From<BackendError> for SubmissionError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::NoSession => Self::NotLoggedIn,
            BackendError::Rejected { message } if !message.trim().is_empty() => {
                Self::Backend { message }
            },
            BackendError::Rejected { .. } | BackendError::Unavailable => Self::Unknown,
        }
    }
}

/// Route guard refusal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    /// The route needs a session and there is none
    #[error("log in to open {route}")]
    NotLoggedIn {
        /// The guarded route
        route: Route,
    },

    /// The session's role may not open the route
    #[error("{role} accounts cannot open {route}")]
    Forbidden {
        /// The guarded route
        route: Route,
        /// Role of the signed-in user
        role: UserRole,
    },
}
