//! # QuickCourt Testing
//!
//! Testing utilities for QuickCourt reducers.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`FixedClock`]: deterministic time for environments
//! - Effect assertion helpers
//!
//! ## Example
//!
//! ```ignore
//! use quickcourt_testing::{ReducerTest, test_clock};
//!
//! ReducerTest::new(BookingFlowReducer::new())
//!     .with_env(test_environment())
//!     .given_state(BookingFlowState::default())
//!     .when_action(BookingFlowAction::SelectDate { date })
//!     .then_state(|s| assert_eq!(s.draft.date, Some(date)))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use quickcourt_core::environment::Clock;

mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use chrono::{NaiveDate, NaiveTime};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use quickcourt_testing::mocks::FixedClock;
    /// use quickcourt_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }

        /// Fixed clock at noon UTC on the given calendar day
        #[must_use]
        pub fn on_date(date: NaiveDate) -> Self {
            Self::new(date.and_time(NaiveTime::MIN).and_utc() + chrono::Duration::hours(12))
        }

        /// The calendar day this clock reports
        #[must_use]
        pub fn today(&self) -> NaiveDate {
            self.time.date_naive()
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 12:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Never in practice; the timestamp is hardcoded.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T12:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

pub use mocks::{FixedClock, test_clock};
