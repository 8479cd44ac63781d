//! In-memory backend for the demo binary and tests.

use crate::backend::{BackendFuture, BookingBackend, NewBookingPlayer, NewBookingRecord};
use crate::error::BackendError;
use crate::session::Session;
use crate::types::BookingId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
struct Inner {
    session: Option<Session>,
    bookings: Vec<(BookingId, NewBookingRecord)>,
    players: HashMap<BookingId, Vec<NewBookingPlayer>>,
    attempts: Vec<NewBookingRecord>,
    booking_failure: Option<String>,
    roster_failure: bool,
    latency: Option<Duration>,
}

/// Backend that keeps rows in memory
///
/// Clones share the same storage, so a test can keep one handle for
/// inspection and give another to the environment. Failure switches stay
/// set until cleared.
#[derive(Clone, Debug, Default)]
pub struct InMemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryBackend {
    /// Empty backend with nobody signed in
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty backend with `session` signed in
    #[must_use]
    pub fn signed_in(session: Session) -> Self {
        let backend = Self::new();
        backend.sign_in(session);
        backend
    }

    fn with_inner<T>(&self, f: impl FnOnce(&mut Inner) -> T) -> Result<T, BackendError> {
        let mut inner = self.inner.lock().map_err(|_| BackendError::Unavailable)?;
        Ok(f(&mut inner))
    }

    fn update(&self, f: impl FnOnce(&mut Inner)) {
        if self.with_inner(f).is_err() {
            tracing::error!("In-memory backend lock poisoned");
        }
    }

    /// Replace the current session
    pub fn sign_in(&self, session: Session) {
        self.update(|inner| inner.session = Some(session));
    }

    /// Clear the current session
    pub fn sign_out(&self) {
        self.update(|inner| inner.session = None);
    }

    /// Reject every booking insert with `message`
    pub fn fail_bookings_with(&self, message: impl Into<String>) {
        let message = message.into();
        self.update(|inner| inner.booking_failure = Some(message));
    }

    /// Accept booking inserts again
    pub fn heal(&self) {
        self.update(|inner| inner.booking_failure = None);
    }

    /// Reject (or accept) roster inserts
    pub fn fail_roster(&self, fail: bool) {
        self.update(|inner| inner.roster_failure = fail);
    }

    /// Delay every call by `latency`
    #[must_use]
    pub fn with_latency(self, latency: Duration) -> Self {
        self.update(|inner| inner.latency = Some(latency));
        self
    }

    /// Stored booking rows, in insert order
    #[must_use]
    pub fn bookings(&self) -> Vec<(BookingId, NewBookingRecord)> {
        self.with_inner(|inner| inner.bookings.clone())
            .unwrap_or_default()
    }

    /// Every booking insert received, including rejected ones
    #[must_use]
    pub fn attempts(&self) -> Vec<NewBookingRecord> {
        self.with_inner(|inner| inner.attempts.clone())
            .unwrap_or_default()
    }

    /// Roster stored for `booking_id`
    #[must_use]
    pub fn players_for(&self, booking_id: BookingId) -> Vec<NewBookingPlayer> {
        self.with_inner(|inner| inner.players.get(&booking_id).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    fn latency(&self) -> Option<Duration> {
        self.with_inner(|inner| inner.latency).ok().flatten()
    }
}

async fn simulate(latency: Option<Duration>) {
    if let Some(latency) = latency {
        tokio::time::sleep(latency).await;
    }
}

impl BookingBackend for InMemoryBackend {
    fn get_session(&self) -> BackendFuture<Option<Session>> {
        let backend = self.clone();
        Box::pin(async move {
            simulate(backend.latency()).await;
            backend.with_inner(|inner| inner.session.clone())
        })
    }

    fn insert_booking(&self, record: NewBookingRecord) -> BackendFuture<BookingId> {
        let backend = self.clone();
        Box::pin(async move {
            simulate(backend.latency()).await;
            backend.with_inner(|inner| {
                inner.attempts.push(record.clone());
                if let Some(message) = &inner.booking_failure {
                    return Err(BackendError::Rejected {
                        message: message.clone(),
                    });
                }
                let id = BookingId::new();
                inner.bookings.push((id, record));
                tracing::debug!(booking_id = %id, "Stored booking row");
                Ok(id)
            })?
        })
    }

    fn insert_booking_players(
        &self,
        booking_id: BookingId,
        players: Vec<NewBookingPlayer>,
    ) -> BackendFuture<()> {
        let backend = self.clone();
        Box::pin(async move {
            simulate(backend.latency()).await;
            backend.with_inner(|inner| {
                if inner.roster_failure {
                    return Err(BackendError::Rejected {
                        message: "booking_players insert rejected".to_string(),
                    });
                }
                inner.players.insert(booking_id, players);
                Ok(())
            })?
        })
    }
}
