//! Booking assistant reducer.
//!
//! A user message is answered immediately (the new sub-flow is applied at
//! once) but the bot messages are held back behind a typing delay. Only one
//! reply is pending at a time and input is ignored until it lands.

use super::actions::ChatbotAction;
use super::environment::ChatbotEnvironment;
use super::rules::{ChatContext, GREETING, QUICK_REPLIES, ReplyDelay, respond};
use super::types::{BotReply, ChatMessage, MessageKind, Sender, SubFlow};
use chrono::{DateTime, Utc};
use quickcourt_core::effect::Effect;
use quickcourt_core::reducer::Reducer;
use quickcourt_core::{SmallVec, delay, smallvec};
use serde::Serialize;

/// Quick replies are offered while the history is at most this long
const QUICK_REPLY_HISTORY: usize = 2;

/// Bot messages waiting for their typing delay
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PendingReply {
    /// Turn the reply answers
    pub turn: u64,
    /// Messages to append
    pub replies: Vec<BotReply>,
}

/// State of one assistant widget
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatbotState {
    /// Widget visible
    pub open: bool,
    /// History, oldest first
    pub messages: Vec<ChatMessage>,
    /// Typing indicator shown (input disabled)
    pub typing: bool,
    /// In-chat booking progress
    pub sub_flow: SubFlow,
    /// Reply waiting for its delay
    pub pending: Option<PendingReply>,
    /// Position in the canned response rotation
    pub canned_cursor: usize,
    next_message_id: u64,
    next_turn: u64,
}

impl ChatbotState {
    /// Closed widget holding only the greeting
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        let mut state = Self {
            open: false,
            messages: Vec::new(),
            typing: false,
            sub_flow: SubFlow::default(),
            pending: None,
            canned_cursor: 0,
            next_message_id: 1,
            next_turn: 1,
        };
        state.push(GREETING.to_string(), Sender::Bot, MessageKind::Text, now);
        state
    }

    /// Suggestions to show under the history
    #[must_use]
    pub fn quick_replies(&self) -> &'static [&'static str] {
        if self.messages.len() <= QUICK_REPLY_HISTORY {
            &QUICK_REPLIES
        } else {
            &[]
        }
    }

    /// Most recent message
    #[must_use]
    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    fn push(&mut self, text: String, sender: Sender, kind: MessageKind, now: DateTime<Utc>) {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.messages.push(ChatMessage {
            id,
            text,
            sender,
            timestamp: now,
            kind,
        });
        metrics::counter!("chatbot.messages", "sender" => sender.to_string()).increment(1);
    }

    fn drop_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::debug!(turn = pending.turn, "Dropping pending reply");
        }
        self.typing = false;
    }
}

/// Reducer driving the assistant widget
#[derive(Clone, Debug, Default)]
pub struct ChatbotReducer;

impl ChatbotReducer {
    /// Creates a new chatbot reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn send(
        state: &mut ChatbotState,
        text: &str,
        env: &ChatbotEnvironment,
    ) -> SmallVec<[Effect<ChatbotAction>; 4]> {
        let text = text.trim();
        if text.is_empty() || !state.open || state.typing {
            tracing::debug!(
                open = state.open,
                typing = state.typing,
                "Ignoring chat input"
            );
            return smallvec![Effect::None];
        }

        let now = env.clock.now();
        state.push(text.to_string(), Sender::User, MessageKind::Text, now);

        let ctx = ChatContext {
            catalog: env.catalog.as_ref(),
            canned_index: state.canned_cursor,
        };
        let response = respond(&state.sub_flow, text, &ctx);

        if response.next.step != state.sub_flow.step {
            tracing::debug!(
                from = ?state.sub_flow.step,
                to = ?response.next.step,
                "Chat booking advanced"
            );
        }
        state.sub_flow = response.next;
        if response.used_canned {
            state.canned_cursor = state.canned_cursor.wrapping_add(1);
        }

        let turn = state.next_turn;
        state.next_turn += 1;
        state.pending = Some(PendingReply {
            turn,
            replies: response.replies,
        });
        state.typing = true;

        let duration = match response.delay {
            ReplyDelay::Typing => env.typing_delay,
            ReplyDelay::Summary => env.summary_delay,
        };
        smallvec![delay! {
            duration: duration,
            action: ChatbotAction::ReplyReady { turn }
        }]
    }

    fn deliver(state: &mut ChatbotState, turn: u64, env: &ChatbotEnvironment) {
        let Some(pending) = state.pending.take_if(|pending| pending.turn == turn) else {
            tracing::debug!(turn, "Ignoring reply for a dropped turn");
            return;
        };

        let now = env.clock.now();
        for reply in pending.replies {
            state.push(reply.text, Sender::Bot, reply.kind, now);
        }
        state.typing = false;
    }
}

impl Reducer for ChatbotReducer {
    type State = ChatbotState;
    type Action = ChatbotAction;
    type Environment = ChatbotEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::debug!(action = action.name(), step = ?state.sub_flow.step, "Chatbot action");

        match action {
            ChatbotAction::Open => {
                state.open = true;
            },
            ChatbotAction::Close => {
                state.open = false;
                state.drop_pending();
            },
            ChatbotAction::Reset => {
                state.drop_pending();
                state.messages.clear();
                state.sub_flow = SubFlow::default();
                state.push(
                    GREETING.to_string(),
                    Sender::Bot,
                    MessageKind::Text,
                    env.clock.now(),
                );
            },
            ChatbotAction::SendMessage { text } => return Self::send(state, &text, env),
            ChatbotAction::ReplyReady { turn } => Self::deliver(state, turn, env),
        }

        smallvec![Effect::None]
    }
}
