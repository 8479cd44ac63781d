//! QuickCourt - sports court booking
//!
//! The interactive core of the QuickCourt booking site, written as
//! reducers on top of `quickcourt-core`:
//!
//! - **Booking flow** ([`flow`]): the multi-step wizard that turns a date,
//!   a time slot and a player roster into a priced booking request and
//!   hands it to the hosted backend
//! - **Booking assistant** ([`chatbot`]): a scripted chat widget that walks
//!   users through a lightweight in-chat booking
//!
//! Everything the reducers touch outside their own state is injected: the
//! clock, the [`backend::BookingBackend`] port and the [`catalog::VenueCatalog`].
//!
//! # Pricing
//!
//! ```text
//! total_amount = rate_per_player × max(1, player_count)
//! service_fee  = (total_amount × 5 + 50) / 100
//! final_amount = total_amount + service_fee
//! ```
//!
//! Amounts are whole rupees; the fee is 5% rounded half up. Duration does
//! not affect price.
//!
//! # Usage
//!
//! See the `demo` binary for both state machines running in a `Store`.

#![forbid(unsafe_code)]

pub mod backend;
pub mod catalog;
pub mod chatbot;
pub mod config;
pub mod error;
pub mod flow;
pub mod mocks;
pub mod money;
pub mod pricing;
pub mod session;
pub mod sport;
pub mod types;

pub use backend::{BookingBackend, persist_booking};
pub use catalog::{FixtureCatalog, Venue, VenueCatalog, VenueQuery};
pub use chatbot::{ChatbotAction, ChatbotEnvironment, ChatbotReducer, ChatbotState};
pub use config::Config;
pub use error::{BackendError, SubmissionError, ValidationError};
pub use flow::{BookingFlowAction, BookingFlowEnvironment, BookingFlowReducer, BookingFlowState};
pub use mocks::InMemoryBackend;
pub use money::Money;
pub use pricing::{PricingResult, compute_pricing};
pub use session::{Session, SessionContext, UserRole};
pub use sport::{SportConfig, SportKind, config_for};
pub use types::{BookingDraft, BookingRequest, PlayerDetail, TimeSlot};
