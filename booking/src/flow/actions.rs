//! Actions for the court booking wizard.

use crate::error::SubmissionError;
use crate::types::{BookingConfirmation, PlayerField, SubmissionId};
use chrono::NaiveDate;
use quickcourt_macros::Action;

/// Everything the booking wizard reacts to
///
/// Commands come from the presentation layer; events are outcomes of the
/// persistence effect.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum BookingFlowAction {
    // ========== Commands ==========
    /// Pick a date from the offered window
    #[command]
    SelectDate {
        /// Chosen day
        date: NaiveDate,
    },

    /// Pick a time slot by its label (e.g. `"18:00 - 19:00"`)
    #[command]
    SelectTimeSlot {
        /// Slot label as shown
        label: String,
    },

    /// One more player, clamped to the sport maximum
    #[command]
    IncrementPlayers,

    /// One fewer player, clamped to the sport minimum
    #[command]
    DecrementPlayers,

    /// Set the player count directly
    #[command]
    SetPlayerCount {
        /// New count
        count: u32,
    },

    /// Edit one roster field
    #[command]
    EditPlayer {
        /// Zero-based roster position
        index: usize,
        /// Field being edited
        field: PlayerField,
        /// New value
        value: String,
    },

    /// Replace the special requests text
    #[command]
    SetSpecialRequests {
        /// New text; blank clears it
        text: String,
    },

    /// Validate and hand the draft to the backend
    #[command]
    Submit,

    /// Navigation away: drop the draft and any in-flight attempt
    #[command]
    Discard,

    // ========== Events ==========
    /// The backend stored the booking
    #[event]
    BookingConfirmed {
        /// Attempt this outcome belongs to
        submission: SubmissionId,
        /// Stored booking
        confirmation: BookingConfirmation,
    },

    /// The backend refused the booking
    #[event]
    SubmissionFailed {
        /// Attempt this outcome belongs to
        submission: SubmissionId,
        /// User-facing reason
        error: SubmissionError,
    },
}
