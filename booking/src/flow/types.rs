//! State for the court booking wizard.

use crate::catalog::Venue;
use crate::error::{SubmissionError, ValidationError};
use crate::pricing::PricingResult;
use crate::sport::SportKind;
use crate::types::{BookingConfirmation, BookingDraft, BookingRequest, SubmissionId, VenueId};
use serde::Serialize;

/// Where the wizard is, derived from the draft and submission status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FlowStep {
    /// Waiting for a date
    SelectingDate,
    /// Waiting for a time slot
    SelectingTime,
    /// Waiting for a player count
    SelectingPlayerCount,
    /// Some player lacks a name or phone
    EnteringPlayerDetails,
    /// Everything filled in
    ReadyToSubmit,
    /// Waiting on the backend
    Submitting,
    /// Stored
    Confirmed,
    /// Backend refused; the draft is kept for a retry
    Failed,
}

/// Submission lifecycle
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub enum SubmissionStatus {
    /// Draft is being edited
    #[default]
    Editing,
    /// A submission is in flight
    Submitting {
        /// Attempt whose outcome is awaited
        submission: SubmissionId,
    },
    /// The last submission was stored
    Confirmed(BookingConfirmation),
    /// The last submission failed
    Failed {
        /// User-facing reason
        error: SubmissionError,
    },
}

/// State of one booking wizard
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookingFlowState {
    /// The form
    pub draft: BookingDraft,
    /// Submission lifecycle
    pub status: SubmissionStatus,
    /// Inline message for the last rejected edit or submit
    pub last_error: Option<ValidationError>,
    /// The most recently submitted request
    pub last_request: Option<BookingRequest>,
}

impl BookingFlowState {
    /// Fresh wizard for a venue and sport
    #[must_use]
    pub const fn new(venue_id: VenueId, sport: SportKind) -> Self {
        Self {
            draft: BookingDraft::new(venue_id, sport),
            status: SubmissionStatus::Editing,
            last_error: None,
            last_request: None,
        }
    }

    /// Fresh wizard for a catalog venue
    #[must_use]
    pub const fn for_venue(venue: &Venue) -> Self {
        Self::new(venue.id, venue.sport)
    }

    /// Current pricing, recomputed from the draft
    #[must_use]
    pub fn pricing(&self) -> PricingResult {
        self.draft.pricing()
    }

    /// Whether a submission is in flight
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.status, SubmissionStatus::Submitting { .. })
    }

    /// The in-flight attempt, if any
    #[must_use]
    pub const fn in_flight(&self) -> Option<SubmissionId> {
        match self.status {
            SubmissionStatus::Submitting { submission } => Some(submission),
            _ => None,
        }
    }

    /// Current step
    #[must_use]
    pub fn step(&self) -> FlowStep {
        match &self.status {
            SubmissionStatus::Submitting { .. } => FlowStep::Submitting,
            SubmissionStatus::Confirmed(_) => FlowStep::Confirmed,
            SubmissionStatus::Failed { .. } => FlowStep::Failed,
            SubmissionStatus::Editing => {
                let draft = &self.draft;
                if draft.date.is_none() {
                    FlowStep::SelectingDate
                } else if draft.time_slot.is_none() {
                    FlowStep::SelectingTime
                } else if draft.player_count.is_none() {
                    FlowStep::SelectingPlayerCount
                } else if draft.first_incomplete_player().is_some() {
                    FlowStep::EnteringPlayerDetails
                } else {
                    FlowStep::ReadyToSubmit
                }
            },
        }
    }
}
