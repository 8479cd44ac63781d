//! The court booking wizard.
//!
//! ```text
//! SelectingDate → SelectingTime → SelectingPlayerCount
//!     → EnteringPlayerDetails → ReadyToSubmit
//!     → Submitting → Confirmed | Failed
//! ```
//!
//! Steps are derived from the draft rather than stored, so the step can
//! never disagree with the data. Each step's input is rejected until the
//! previous step is filled in. A failed submission keeps the draft; the
//! user retries by submitting again.

pub mod actions;
pub mod environment;
pub mod reducer;
pub mod types;

pub use actions::BookingFlowAction;
pub use environment::{BookingFlowEnvironment, DEFAULT_OFFERED_DAYS};
pub use reducer::BookingFlowReducer;
pub use types::{BookingFlowState, FlowStep, SubmissionStatus};
