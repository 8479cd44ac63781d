//! The booking assistant chat widget.
//!
//! A scripted assistant that walks the user through a lightweight in-chat
//! booking:
//!
//! ```text
//! AwaitingSport → AwaitingDate → AwaitingTime → AwaitingPlayerCount
//!     → AwaitingVenue → AwaitingConfirmation → Completed
//! ```
//!
//! Replies are computed by [`rules::respond`] and shown after a simulated
//! typing delay, which the reducer expresses as an `Effect::Delay`. The
//! in-chat booking is never persisted.

pub mod actions;
pub mod environment;
pub mod reducer;
pub mod rules;
#[cfg(test)]
mod tests;
pub mod types;

pub use actions::ChatbotAction;
pub use environment::ChatbotEnvironment;
pub use reducer::{ChatbotReducer, ChatbotState, PendingReply};
pub use rules::{GREETING, QUICK_REPLIES};
pub use types::{BotReply, ChatMessage, ChatSlot, ChatStep, MessageKind, Sender, SubFlow};
