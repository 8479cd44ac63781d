//! Unit tests for `ChatbotReducer`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code

use super::*;
use crate::catalog::FixtureCatalog;
use crate::sport::SportKind;
use chrono::NaiveDate;
use quickcourt_core::effect::Effect;
use quickcourt_core::environment::Clock;
use quickcourt_core::reducer::Reducer;
use quickcourt_testing::{FixedClock, ReducerTest, assertions};
use std::sync::Arc;
use std::time::Duration;

const TYPING: Duration = Duration::from_millis(1000);
const SUMMARY: Duration = Duration::from_millis(1500);

fn clock() -> FixedClock {
    FixedClock::on_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
}

fn test_env() -> ChatbotEnvironment {
    ChatbotEnvironment::new(Arc::new(clock()), Arc::new(FixtureCatalog::new()))
}

fn fresh() -> ChatbotState {
    ChatbotState::new(clock().now())
}

fn open() -> ChatbotState {
    let mut state = fresh();
    state.open = true;
    state
}

fn say(text: &str) -> ChatbotAction {
    ChatbotAction::SendMessage {
        text: text.to_string(),
    }
}

/// Send each message and let its reply land before the next one
fn converse(state: &mut ChatbotState, texts: &[&str], env: &ChatbotEnvironment) -> Vec<Duration> {
    let reducer = ChatbotReducer::new();
    let mut delays = Vec::new();
    for text in texts {
        let effects = reducer.reduce(state, say(text), env);
        let Some(Effect::Delay { duration, action }) = effects.into_iter().next() else {
            panic!("expected a typing delay for {text:?}");
        };
        delays.push(duration);
        let _ = reducer.reduce(state, *action, env);
    }
    delays
}

fn bot_texts(state: &ChatbotState) -> Vec<&str> {
    state
        .messages
        .iter()
        .filter(|message| message.sender == Sender::Bot)
        .map(|message| message.text.as_str())
        .collect()
}

// ============================================================================
// Widget
// ============================================================================

#[test]
fn test_new_conversation_has_greeting_and_quick_replies() {
    let state = fresh();
    assert!(!state.open);
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].id, 1);
    assert_eq!(state.messages[0].sender, Sender::Bot);
    assert_eq!(state.messages[0].text, GREETING);
    assert_eq!(state.quick_replies(), &QUICK_REPLIES);
    assert_eq!(state.sub_flow, SubFlow::default());
}

#[test]
fn test_closed_widget_ignores_input() {
    ReducerTest::new(ChatbotReducer::new())
        .with_env(test_env())
        .given_state(fresh())
        .when_action(say("hello"))
        .then_state(|state| {
            assert_eq!(state.messages.len(), 1);
            assert!(!state.typing);
        })
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn test_blank_input_is_ignored() {
    ReducerTest::new(ChatbotReducer::new())
        .with_env(test_env())
        .given_state(open())
        .when_action(say("   "))
        .then_state(|state| assert_eq!(state.messages.len(), 1))
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn test_message_shows_typing_then_schedules_reply() {
    ReducerTest::new(ChatbotReducer::new())
        .with_env(test_env())
        .given_state(open())
        .when_action(say("  I want to book a venue "))
        .then_state(|state| {
            assert!(state.typing);
            assert_eq!(state.messages.len(), 2);
            let last = state.last_message().unwrap();
            assert_eq!(last.sender, Sender::User);
            assert_eq!(last.text, "I want to book a venue");
            assert_eq!(last.id, 2);
            assert_eq!(state.pending.as_ref().map(|p| p.turn), Some(1));
        })
        .then_effects(|effects| {
            let action = assertions::assert_has_delay(effects, TYPING);
            assert_eq!(*action, ChatbotAction::ReplyReady { turn: 1 });
        })
        .run();
}

#[test]
fn test_input_is_ignored_while_typing() {
    ReducerTest::new(ChatbotReducer::new())
        .with_env(test_env())
        .given_state(open())
        .given_actions(vec![say("hello")])
        .when_action(say("are you there?"))
        .then_state(|state| {
            assert_eq!(state.messages.len(), 2);
            assert_eq!(state.pending.as_ref().map(|p| p.turn), Some(1));
        })
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn test_reply_lands_after_delay() {
    ReducerTest::new(ChatbotReducer::new())
        .with_env(test_env())
        .given_state(open())
        .given_actions(vec![say("I want to book a venue")])
        .when_action(ChatbotAction::ReplyReady { turn: 1 })
        .then_state(|state| {
            assert!(!state.typing);
            assert!(state.pending.is_none());
            let last = state.last_message().unwrap();
            assert_eq!(last.sender, Sender::Bot);
            assert_eq!(last.id, 3);
            assert_eq!(
                last.text,
                "Great! I'd love to help you book a venue. Which sport would you like to play?"
            );
            assert!(state.quick_replies().is_empty());
        })
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn test_reply_for_unknown_turn_is_ignored() {
    ReducerTest::new(ChatbotReducer::new())
        .with_env(test_env())
        .given_state(open())
        .given_actions(vec![say("hello")])
        .when_action(ChatbotAction::ReplyReady { turn: 7 })
        .then_state(|state| {
            assert!(state.typing);
            assert_eq!(state.messages.len(), 2);
        })
        .run();
}

#[test]
fn test_close_drops_pending_reply_but_keeps_progress() {
    ReducerTest::new(ChatbotReducer::new())
        .with_env(test_env())
        .given_state(open())
        .given_actions(vec![say("badminton"), ChatbotAction::Close])
        .when_action(ChatbotAction::ReplyReady { turn: 1 })
        .then_state(|state| {
            assert!(!state.open);
            assert!(!state.typing);
            assert_eq!(state.messages.len(), 2);
            assert_eq!(state.sub_flow.step, ChatStep::AwaitingDate);
            assert_eq!(state.sub_flow.sport, Some(SportKind::Badminton));
        })
        .run();
}

#[test]
fn test_history_survives_close_and_open() {
    let env = test_env();
    let mut state = open();
    converse(&mut state, &["hello"], &env);
    let reducer = ChatbotReducer::new();
    let _ = reducer.reduce(&mut state, ChatbotAction::Close, &env);
    let _ = reducer.reduce(&mut state, ChatbotAction::Open, &env);

    assert!(state.open);
    assert_eq!(state.messages.len(), 3);
}

#[test]
fn test_reset_starts_over() {
    let env = test_env();
    let mut state = open();
    converse(&mut state, &["badminton", "15/01/2024"], &env);

    ReducerTest::new(ChatbotReducer::new())
        .with_env(env)
        .given_state(state)
        .when_action(ChatbotAction::Reset)
        .then_state(|state| {
            assert!(state.open);
            assert_eq!(state.messages.len(), 1);
            assert_eq!(state.messages[0].text, GREETING);
            assert_eq!(state.sub_flow, SubFlow::default());
            assert_eq!(state.quick_replies(), &QUICK_REPLIES);
        })
        .run();
}

#[test]
fn test_message_ids_keep_increasing() {
    let env = test_env();
    let mut state = open();
    converse(&mut state, &["hello", "help"], &env);
    let ids: Vec<u64> = state.messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_canned_replies_rotate_across_turns() {
    let env = test_env();
    let mut state = open();
    converse(&mut state, &["qwerty", "asdf", "zxcv"], &env);

    assert_eq!(state.canned_cursor, 3);
    let bot = bot_texts(&state);
    assert_eq!(bot[1], rules::CANNED_RESPONSES[0]);
    assert_eq!(bot[2], rules::CANNED_RESPONSES[1]);
    assert_eq!(bot[3], rules::CANNED_RESPONSES[2]);
}

// ============================================================================
// In-chat booking
// ============================================================================

#[test]
fn test_full_booking_conversation() {
    let env = test_env();
    let mut state = open();
    let delays = converse(
        &mut state,
        &[
            "I want to book a venue",
            "Badminton",
            "15/01/2024",
            "6:00 PM",
            "3",
            "Royal Badminton Center",
            "confirm",
        ],
        &env,
    );

    assert_eq!(
        delays,
        vec![TYPING, TYPING, TYPING, TYPING, TYPING, SUMMARY, SUMMARY]
    );
    assert_eq!(state.messages.len(), 17);
    assert_eq!(state.sub_flow, SubFlow::completed());

    let summary = state
        .messages
        .iter()
        .find(|m| m.kind == MessageKind::BookingSummary)
        .unwrap();
    assert!(summary.text.contains("Venue: Royal Badminton Center"));
    assert!(summary.text.contains("Time: 6:00 PM - 8:00 PM"));
    assert!(summary.text.contains("Players: 3"));

    let last = state.last_message().unwrap();
    assert_eq!(last.kind, MessageKind::BookingSummary);
    assert!(last.text.starts_with("🎉 Booking Confirmed!"));
}

#[test]
fn test_wrong_answer_repeats_the_question() {
    let env = test_env();
    let mut state = open();
    converse(&mut state, &["Tennis", "tomorrow"], &env);

    assert_eq!(state.sub_flow.step, ChatStep::AwaitingDate);
    assert_eq!(state.canned_cursor, 0);
    assert!(
        state
            .last_message()
            .unwrap()
            .text
            .contains("DD/MM/YYYY")
    );
}

#[test]
fn test_rebooking_after_completion() {
    let env = test_env();
    let mut state = open();
    converse(
        &mut state,
        &[
            "volleyball",
            "20/01/2024",
            "8:00 AM",
            "8",
            "Elite Sports Complex",
            "confirm",
            "book another one",
        ],
        &env,
    );
    assert_eq!(state.sub_flow, SubFlow::default());
}
