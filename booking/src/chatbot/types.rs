//! Conversation types for the booking assistant.

use crate::sport::SportKind;
use crate::types::TimeSlot;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use std::fmt;

/// Who wrote a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person chatting
    User,
    /// The assistant
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Bot => "bot",
        })
    }
}

/// How a message is rendered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    /// Plain bubble
    #[default]
    Text,
    /// Highlighted booking card
    BookingSummary,
}

/// One entry in the chat history
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Sequential id, unique within one conversation
    pub id: u64,
    /// Message body
    pub text: String,
    /// Author
    pub sender: Sender,
    /// When it was added
    pub timestamp: DateTime<Utc>,
    /// Rendering hint
    pub kind: MessageKind,
}

/// A bot message waiting to be shown
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BotReply {
    /// Message body
    pub text: String,
    /// Rendering hint
    pub kind: MessageKind,
}

impl BotReply {
    /// Plain text reply
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Text,
        }
    }

    /// Booking card reply
    #[must_use]
    pub fn summary(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::BookingSummary,
        }
    }
}

// ============================================================================
// In-chat booking
// ============================================================================

/// Pending question in the in-chat booking
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ChatStep {
    /// Which sport
    #[default]
    AwaitingSport,
    /// Which date
    AwaitingDate,
    /// Which slot
    AwaitingTime,
    /// How many players
    AwaitingPlayerCount,
    /// Which venue
    AwaitingVenue,
    /// Waiting for "confirm"
    AwaitingConfirmation,
    /// Last booking confirmed; details cleared
    Completed,
}

impl ChatStep {
    /// Whether a booking is underway (sport chosen, not yet confirmed)
    #[must_use]
    pub const fn is_mid_booking(self) -> bool {
        !matches!(self, Self::AwaitingSport | Self::Completed)
    }
}

/// Answers collected so far in the in-chat booking
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SubFlow {
    /// Pending question
    pub step: ChatStep,
    /// Chosen sport
    pub sport: Option<SportKind>,
    /// Chosen date
    pub date: Option<NaiveDate>,
    /// Chosen slot
    pub slot: Option<ChatSlot>,
    /// Player count
    pub players: Option<u32>,
    /// Venue name
    pub venue: Option<String>,
}

impl SubFlow {
    /// Details cleared, step `Completed`
    #[must_use]
    pub fn completed() -> Self {
        Self {
            step: ChatStep::Completed,
            ..Self::default()
        }
    }
}

/// Start and end hours of the slots the assistant offers
const CHAT_SLOT_HOURS: [(u32, u32); 6] = [(6, 8), (8, 10), (10, 12), (14, 16), (16, 18), (18, 20)];

/// A two-hour slot offered in chat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChatSlot(TimeSlot);

impl ChatSlot {
    /// Every slot, earliest first
    #[must_use]
    pub fn all() -> Vec<Self> {
        CHAT_SLOT_HOURS
            .iter()
            .filter_map(|&(start, end)| {
                TimeSlot::new(
                    NaiveTime::from_hms_opt(start, 0, 0)?,
                    NaiveTime::from_hms_opt(end, 0, 0)?,
                )
            })
            .map(Self)
            .collect()
    }

    /// Underlying time range
    #[must_use]
    pub const fn time_slot(self) -> TimeSlot {
        self.0
    }

    /// The slot beginning at `time`, else the slot ending at it
    #[must_use]
    pub fn at(time: NaiveTime) -> Option<Self> {
        let slots = Self::all();
        slots
            .iter()
            .find(|slot| slot.0.start == time)
            .or_else(|| slots.iter().find(|slot| slot.0.end == time))
            .copied()
    }

    /// Every slot label, comma separated
    #[must_use]
    pub fn listing() -> String {
        Self::all()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ChatSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.0.start.format("%-I:%M %p"),
            self.0.end.format("%-I:%M %p")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap_or_default()
    }

    #[test]
    fn slots_render_on_twelve_hour_clock() {
        let labels: Vec<String> = ChatSlot::all().iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            [
                "6:00 AM - 8:00 AM",
                "8:00 AM - 10:00 AM",
                "10:00 AM - 12:00 PM",
                "2:00 PM - 4:00 PM",
                "4:00 PM - 6:00 PM",
                "6:00 PM - 8:00 PM",
            ]
        );
    }

    #[test]
    fn shared_boundary_prefers_the_slot_that_starts_there() {
        let at_eight = ChatSlot::at(hm(8)).map(|slot| slot.to_string());
        assert_eq!(at_eight.as_deref(), Some("8:00 AM - 10:00 AM"));

        let at_noon = ChatSlot::at(hm(12)).map(|slot| slot.to_string());
        assert_eq!(at_noon.as_deref(), Some("10:00 AM - 12:00 PM"));

        assert_eq!(ChatSlot::at(hm(13)), None);
    }

    #[test]
    fn mid_booking_excludes_idle_steps() {
        assert!(!ChatStep::AwaitingSport.is_mid_booking());
        assert!(!ChatStep::Completed.is_mid_booking());
        assert!(ChatStep::AwaitingVenue.is_mid_booking());
    }
}
