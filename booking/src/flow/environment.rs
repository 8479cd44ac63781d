//! Dependencies of the booking wizard.

use crate::backend::BookingBackend;
use chrono::{Days, NaiveDate};
use quickcourt_core::environment::Clock;
use std::sync::Arc;

/// Number of bookable days when not configured
pub const DEFAULT_OFFERED_DAYS: u32 = 7;

/// Environment for the booking flow reducer
#[derive(Clone)]
pub struct BookingFlowEnvironment {
    /// Clock for the offered date window
    pub clock: Arc<dyn Clock>,
    /// Persistence and session port
    pub backend: Arc<dyn BookingBackend>,
    /// Bookable days starting today
    pub offered_days: u32,
}

impl BookingFlowEnvironment {
    /// Creates a new booking flow environment
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, backend: Arc<dyn BookingBackend>) -> Self {
        Self {
            clock,
            backend,
            offered_days: DEFAULT_OFFERED_DAYS,
        }
    }

    /// Override the bookable window
    #[must_use]
    pub fn with_offered_days(mut self, days: u32) -> Self {
        self.offered_days = days;
        self
    }

    /// Today and the following days, `offered_days` in total
    #[must_use]
    pub fn offered_dates(&self) -> Vec<NaiveDate> {
        let today = self.clock.now().date_naive();
        (0..u64::from(self.offered_days))
            .filter_map(|offset| today.checked_add_days(Days::new(offset)))
            .collect()
    }
}
