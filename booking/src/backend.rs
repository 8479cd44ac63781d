//! Persistence port for bookings.
//!
//! The hosted backend owns sessions and the `bookings` / `booking_players`
//! tables. This module defines the port, the row shapes, and the submission
//! sequence run by the booking flow's effect.

use crate::error::{BackendError, SubmissionError};
use crate::money::Money;
use crate::session::Session;
use crate::sport::SportKind;
use crate::types::{BookingConfirmation, BookingId, BookingRequest, PlayerDetail, UserId, VenueId};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Backend call result
pub type BackendResult<T> = Result<T, BackendError>;

/// Boxed future returned by [`BookingBackend`] calls
pub type BackendFuture<T> = Pin<Box<dyn Future<Output = BackendResult<T>> + Send>>;

/// Lifecycle of a stored booking
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting confirmation
    Pending,
    /// Confirmed
    Confirmed,
    /// Cancelled
    Cancelled,
    /// Played
    Completed,
}

/// Payment state of a stored booking
///
/// Payment is collected at the venue, so new bookings start `Pending`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Not yet paid
    Pending,
    /// Paid
    Paid,
}

/// Row for the `bookings` table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookingRecord {
    /// Acting user
    pub user_id: UserId,
    /// Venue
    pub venue_id: VenueId,
    /// Sport
    pub sport: SportKind,
    /// Date played
    pub booking_date: NaiveDate,
    /// Slot start
    pub start_time: NaiveTime,
    /// Slot end
    pub end_time: NaiveTime,
    /// Whole hours
    pub duration_hours: u32,
    /// Number of players
    pub player_count: u32,
    /// Rate × players
    pub total_amount: Money,
    /// Service fee
    pub service_fee: Money,
    /// Amount due
    pub final_amount: Money,
    /// Free-text requests
    pub special_requests: Option<String>,
    /// Booking status
    pub status: BookingStatus,
    /// Payment status
    pub payment_status: PaymentStatus,
}

impl NewBookingRecord {
    /// Row for `request` made by `user_id`
    #[must_use]
    pub fn new(user_id: UserId, request: &BookingRequest) -> Self {
        Self {
            user_id,
            venue_id: request.venue_id,
            sport: request.sport,
            booking_date: request.date,
            start_time: request.start_time,
            end_time: request.end_time,
            duration_hours: request.duration_hours,
            player_count: request.player_count,
            total_amount: request.total_amount,
            service_fee: request.service_fee,
            final_amount: request.final_amount,
            special_requests: request.special_requests.clone(),
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Pending,
        }
    }
}

/// Row for the `booking_players` table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookingPlayer {
    /// Player name
    pub player_name: String,
    /// Phone number
    pub player_phone: String,
    /// Optional email
    pub player_email: Option<String>,
    /// Lead player flag
    pub is_primary: bool,
}

impl From<&PlayerDetail> for NewBookingPlayer {
    fn from(player: &PlayerDetail) -> Self {
        Self {
            player_name: player.name.trim().to_string(),
            player_phone: player.phone.trim().to_string(),
            player_email: player.email.clone(),
            is_primary: player.is_lead(),
        }
    }
}

/// Persistence and auth operations the booking flow needs
pub trait BookingBackend: Send + Sync {
    /// Current session, `None` when signed out
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be reached
    fn get_session(&self) -> BackendFuture<Option<Session>>;

    /// Insert a booking row and return its id
    ///
    /// # Errors
    ///
    /// Returns error if the insert is rejected
    fn insert_booking(&self, record: NewBookingRecord) -> BackendFuture<BookingId>;

    /// Insert the roster rows for a stored booking
    ///
    /// # Errors
    ///
    /// Returns error if the insert is rejected
    fn insert_booking_players(
        &self,
        booking_id: BookingId,
        players: Vec<NewBookingPlayer>,
    ) -> BackendFuture<()>;
}

/// Persist `request`: session, then booking row, then roster rows
///
/// The roster insert is best effort. If it fails the booking stays stored,
/// the failure is logged, and the confirmation reports `roster_saved: false`.
///
/// # Errors
///
/// [`SubmissionError::NotLoggedIn`] without a session; otherwise the
/// translated backend error from the session read or booking insert.
pub async fn persist_booking(
    backend: Arc<dyn BookingBackend>,
    request: BookingRequest,
) -> Result<BookingConfirmation, SubmissionError> {
    let session = backend
        .get_session()
        .await?
        .ok_or(SubmissionError::NotLoggedIn)?;

    let record = NewBookingRecord::new(session.user_id, &request);
    let booking_id = backend.insert_booking(record).await?;

    let roster = request.players.iter().map(NewBookingPlayer::from).collect();
    let roster_saved = match backend.insert_booking_players(booking_id, roster).await {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(
                %booking_id,
                %error,
                "Roster insert failed; booking kept without players"
            );
            metrics::counter!("booking.roster_failures").increment(1);
            false
        },
    };

    Ok(BookingConfirmation {
        booking_id,
        final_amount: request.final_amount,
        roster_saved,
    })
}
