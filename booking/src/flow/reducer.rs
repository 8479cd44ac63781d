//! Booking wizard reducer.
//!
//! Edits are validated against the draft before anything changes; a rejected
//! edit leaves the draft untouched and records the reason in `last_error`.
//! `Submit` assembles the [`BookingRequest`](crate::types::BookingRequest)
//! and hands it to the backend as a single future effect whose outcome comes
//! back tagged with the attempt's [`SubmissionId`].

use super::actions::BookingFlowAction;
use super::environment::BookingFlowEnvironment;
use super::types::{BookingFlowState, SubmissionStatus};
use crate::backend::persist_booking;
use crate::error::{SubmissionError, ValidationError};
use crate::types::{BookingConfirmation, BookingDraft, PlayerField, SubmissionId, TimeSlot};
use chrono::NaiveDate;
use quickcourt_core::effect::Effect;
use quickcourt_core::reducer::Reducer;
use quickcourt_core::{SmallVec, async_effect, smallvec};
use std::sync::Arc;

type Effects = SmallVec<[Effect<BookingFlowAction>; 4]>;

/// Reducer driving one booking wizard
#[derive(Clone, Debug, Default)]
pub struct BookingFlowReducer;

impl BookingFlowReducer {
    /// Creates a new booking flow reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    // ========================================================================
    // Edits
    // ========================================================================

    /// Apply a draft edit, recording the outcome in state
    fn edit(
        state: &mut BookingFlowState,
        apply: impl FnOnce(&mut BookingDraft) -> Result<(), ValidationError>,
    ) -> Effects {
        if state.is_submitting() {
            tracing::debug!("Ignoring edit while a submission is in flight");
            return smallvec![Effect::None];
        }

        match apply(&mut state.draft) {
            Ok(()) => {
                state.last_error = None;
                if !matches!(state.status, SubmissionStatus::Editing) {
                    state.status = SubmissionStatus::Editing;
                }
            },
            Err(error) => {
                tracing::debug!(%error, "Edit rejected");
                state.last_error = Some(error);
            },
        }

        smallvec![Effect::None]
    }

    fn select_date(
        draft: &mut BookingDraft,
        date: NaiveDate,
        env: &BookingFlowEnvironment,
    ) -> Result<(), ValidationError> {
        if !env.offered_dates().contains(&date) {
            return Err(ValidationError::DateNotOffered { date });
        }
        draft.date = Some(date);
        Ok(())
    }

    fn select_time_slot(draft: &mut BookingDraft, label: &str) -> Result<(), ValidationError> {
        if draft.date.is_none() {
            return Err(ValidationError::MissingDate);
        }
        let slot = TimeSlot::parse(label)?;
        if !slot.is_offered() {
            return Err(ValidationError::SlotNotOffered {
                slot: slot.to_string(),
            });
        }
        draft.time_slot = Some(slot);
        Ok(())
    }

    /// Move the count by one step, clamped to the sport range
    ///
    /// From an unset count either direction lands on the sport minimum.
    fn step_players(draft: &mut BookingDraft, up: bool) -> Result<(), ValidationError> {
        if draft.time_slot.is_none() {
            return Err(ValidationError::MissingTimeSlot);
        }
        let config = draft.sport_config();
        let next = match draft.player_count {
            None => config.min_players,
            Some(n) if up => n.saturating_add(1).min(config.max_players),
            Some(n) => n.saturating_sub(1).max(config.min_players),
        };
        if draft.player_count != Some(next) {
            draft.set_player_count(next);
        }
        Ok(())
    }

    fn set_player_count(draft: &mut BookingDraft, count: u32) -> Result<(), ValidationError> {
        if draft.time_slot.is_none() {
            return Err(ValidationError::MissingTimeSlot);
        }
        let config = draft.sport_config();
        if !config.allows(count) {
            return Err(ValidationError::PlayerCountOutOfRange {
                sport: config.kind,
                requested: count,
                min: config.min_players,
                max: config.max_players,
            });
        }
        draft.set_player_count(count);
        Ok(())
    }

    fn edit_player(
        draft: &mut BookingDraft,
        index: usize,
        field: PlayerField,
        value: String,
    ) -> Result<(), ValidationError> {
        if draft.player_count.is_none() {
            return Err(ValidationError::MissingPlayerCount);
        }
        draft
            .players
            .get_mut(index)
            .ok_or(ValidationError::UnknownPlayer { index })?
            .set(field, value);
        Ok(())
    }

    fn set_special_requests(draft: &mut BookingDraft, text: String) {
        draft.special_requests = if text.trim().is_empty() { None } else { Some(text) };
    }

    // ========================================================================
    // Submission
    // ========================================================================

    fn submit(state: &mut BookingFlowState, env: &BookingFlowEnvironment) -> Effects {
        if state.is_submitting() {
            tracing::debug!("Submit ignored; already submitting");
            return smallvec![Effect::None];
        }

        let request = match state.draft.to_request() {
            Ok(request) => request,
            Err(error) => {
                tracing::debug!(%error, "Submission blocked");
                state.last_error = Some(error);
                return smallvec![Effect::None];
            },
        };

        let submission = SubmissionId::new();
        tracing::debug!(
            %submission,
            venue_id = %request.venue_id,
            sport = %request.sport,
            final_amount = %request.final_amount,
            "Submitting booking"
        );

        state.status = SubmissionStatus::Submitting { submission };
        state.last_error = None;
        state.last_request = Some(request.clone());

        let backend = Arc::clone(&env.backend);
        smallvec![async_effect! {
            Some(match persist_booking(backend, request).await {
                Ok(confirmation) => BookingFlowAction::BookingConfirmed {
                    submission,
                    confirmation,
                },
                Err(error) => BookingFlowAction::SubmissionFailed { submission, error },
            })
        }]
    }

    /// Whether an outcome belongs to the in-flight attempt
    fn is_current(state: &BookingFlowState, submission: SubmissionId) -> bool {
        if state.in_flight() == Some(submission) {
            return true;
        }
        tracing::warn!(%submission, "Ignoring outcome of a stale submission");
        metrics::counter!("booking.submissions", "outcome" => "stale").increment(1);
        false
    }

    fn confirmed(
        state: &mut BookingFlowState,
        submission: SubmissionId,
        confirmation: BookingConfirmation,
    ) {
        if !Self::is_current(state, submission) {
            return;
        }
        tracing::info!(
            booking_id = %confirmation.booking_id,
            final_amount = %confirmation.final_amount,
            roster_saved = confirmation.roster_saved,
            "Booking confirmed"
        );
        metrics::counter!("booking.submissions", "outcome" => "confirmed").increment(1);
        state.draft = state.draft.emptied();
        state.status = SubmissionStatus::Confirmed(confirmation);
    }

    fn failed(state: &mut BookingFlowState, submission: SubmissionId, error: SubmissionError) {
        if !Self::is_current(state, submission) {
            return;
        }
        tracing::warn!(%error, "Booking submission failed; draft kept");
        metrics::counter!("booking.submissions", "outcome" => "failed").increment(1);
        state.status = SubmissionStatus::Failed { error };
    }

    fn discard(state: &mut BookingFlowState) {
        if let Some(submission) = state.in_flight() {
            tracing::debug!(%submission, "Dropping in-flight submission");
        }
        state.draft = state.draft.emptied();
        state.status = SubmissionStatus::Editing;
        state.last_error = None;
        state.last_request = None;
    }
}

impl Reducer for BookingFlowReducer {
    type State = BookingFlowState;
    type Action = BookingFlowAction;
    type Environment = BookingFlowEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::debug!(action = action.name(), step = ?state.step(), "Booking flow action");

        match action {
            BookingFlowAction::SelectDate { date } => {
                Self::edit(state, |draft| Self::select_date(draft, date, env))
            },
            BookingFlowAction::SelectTimeSlot { label } => {
                Self::edit(state, |draft| Self::select_time_slot(draft, &label))
            },
            BookingFlowAction::IncrementPlayers => {
                Self::edit(state, |draft| Self::step_players(draft, true))
            },
            BookingFlowAction::DecrementPlayers => {
                Self::edit(state, |draft| Self::step_players(draft, false))
            },
            BookingFlowAction::SetPlayerCount { count } => {
                Self::edit(state, |draft| Self::set_player_count(draft, count))
            },
            BookingFlowAction::EditPlayer {
                index,
                field,
                value,
            } => Self::edit(state, |draft| Self::edit_player(draft, index, field, value)),
            BookingFlowAction::SetSpecialRequests { text } => Self::edit(state, |draft| {
                Self::set_special_requests(draft, text);
                Ok(())
            }),
            BookingFlowAction::Submit => Self::submit(state, env),
            BookingFlowAction::Discard => {
                Self::discard(state);
                smallvec![Effect::None]
            },
            BookingFlowAction::BookingConfirmed {
                submission,
                confirmation,
            } => {
                Self::confirmed(state, submission, confirmation);
                smallvec![Effect::None]
            },
            BookingFlowAction::SubmissionFailed { submission, error } => {
                Self::failed(state, submission, error);
                smallvec![Effect::None]
            },
        }
    }
}
