//! Scripted replies.
//!
//! [`respond`] is pure: the same sub-flow, input and context always give the
//! same reply. During a booking, input is first read as an answer to the
//! pending question and only matched against [`RULES`] when it does not fit.
//! Outside a booking the rules come first; a sport mention starts a booking
//! only when booking intent or no rule matches. Nothing the user types is
//! ever an error.

use super::types::{BotReply, ChatSlot, ChatStep, SubFlow};
use crate::catalog::VenueCatalog;
use crate::pricing::{SERVICE_FEE_PERCENT, compute_pricing};
use crate::sport::{SportKind, config_for};
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

/// Opening message of every conversation
pub const GREETING: &str =
    "Hi! I'm your sports venue booking assistant. How can I help you today?";

/// Suggestions shown under a fresh conversation
pub const QUICK_REPLIES: [&str; 4] = [
    "I want to book a venue",
    "Show available sports",
    "Check my bookings",
    "Cancel booking",
];

/// Replies used when nothing else applies, taken in rotation
pub const CANNED_RESPONSES: [&str; 5] = [
    "I can help you book sports venues! Just say 'I want to book' to get started.",
    "Looking for a venue? I can help you find and book the perfect sports facility.",
    "I'm here to assist with your sports venue bookings. What would you like to know?",
    "Need help with booking? I can guide you through finding the right venue for your sport!",
    "I can help you book venues for Football, Cricket, Basketball, Tennis, Badminton, and Volleyball!",
];

const CONFIRMED: &str = "🎉 Booking Confirmed! Your venue has been successfully booked. \
You'll receive a confirmation shortly. You can view your bookings in the \"My Bookings\" section.";

#[allow(clippy::expect_used)]
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").expect("date pattern is valid")
});

#[allow(clippy::expect_used)]
static CLOCK_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2}):(\d{2})\s*([ap]m)?\b").expect("time pattern is valid")
});

#[allow(clippy::expect_used)]
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("number pattern is valid"));

/// How long the typing indicator shows before a reply
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyDelay {
    /// Ordinary reply
    Typing,
    /// Booking summary or confirmation
    Summary,
}

/// What the assistant reads from besides the conversation
#[derive(Clone, Copy)]
pub struct ChatContext<'a> {
    /// Venue names come from here
    pub catalog: &'a dyn VenueCatalog,
    /// Position in [`CANNED_RESPONSES`] for the next fallback
    pub canned_index: usize,
}

/// The assistant's answer to one user message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// Messages to show, in order (never empty)
    pub replies: Vec<BotReply>,
    /// Typing indicator duration
    pub delay: ReplyDelay,
    /// Sub-flow after this message
    pub next: SubFlow,
    /// Whether a canned response was used (advances the rotation)
    pub used_canned: bool,
}

impl Response {
    fn typed(replies: Vec<BotReply>, next: SubFlow) -> Self {
        Self {
            replies,
            delay: ReplyDelay::Typing,
            next,
            used_canned: false,
        }
    }

    fn say(text: impl Into<String>, next: SubFlow) -> Self {
        Self::typed(vec![BotReply::text(text)], next)
    }
}

// ============================================================================
// Keyword rules
// ============================================================================

/// Topics recognised by keyword
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Where to find existing bookings
    MyBookings,
    /// How to cancel
    Cancel,
    /// Start an in-chat booking
    Book,
    /// List the sports
    Sports,
    /// Explain rates
    Pricing,
    /// Say hello
    Greeting,
    /// Explain what the assistant does
    Help,
}

/// Keyword rules in priority order; the first rule with a matching keyword wins
pub const RULES: [(Intent, &[&str]); 7] = [
    (Intent::MyBookings, &["my booking"]),
    (Intent::Cancel, &["cancel"]),
    (Intent::Book, &["book", "reserve", "reservation", "i want to play"]),
    (Intent::Sports, &["sport"]),
    (Intent::Pricing, &["price", "cost", "rate"]),
    (Intent::Greeting, &["hello", "namaste"]),
    (Intent::Help, &["help"]),
];

/// First rule whose keyword occurs in `input` (case-insensitive)
#[must_use]
pub fn classify(input: &str) -> Option<Intent> {
    let lower = input.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(intent, _)| *intent)
}

// ============================================================================
// Responder
// ============================================================================

/// Reply to `input` given the in-chat booking so far
///
/// Outside a booking, a sport mention only starts one when no rule other
/// than booking intent matches.
#[must_use]
pub fn respond(flow: &SubFlow, input: &str, ctx: &ChatContext<'_>) -> Response {
    let intent = classify(input);
    let reads_as_answer = flow.step.is_mid_booking() || matches!(intent, None | Some(Intent::Book));
    if let Some(response) = reads_as_answer
        .then(|| answer_pending(flow, input, ctx))
        .flatten()
    {
        return response;
    }

    match intent {
        Some(intent) => reply_to(intent, flow, ctx),
        None => fallback(flow, ctx),
    }
}

/// Read `input` as the answer to the pending question
fn answer_pending(flow: &SubFlow, input: &str, ctx: &ChatContext<'_>) -> Option<Response> {
    match flow.step {
        ChatStep::AwaitingSport | ChatStep::Completed => {
            let sport = SportKind::mentioned_in(input)?;
            Some(Response::say(
                format!(
                    "Perfect! {sport} it is. Which date would you prefer? \
                     (Please provide in DD/MM/YYYY format)"
                ),
                SubFlow {
                    step: ChatStep::AwaitingDate,
                    sport: Some(sport),
                    ..SubFlow::default()
                },
            ))
        },
        ChatStep::AwaitingDate => {
            let date = parse_date(input)?;
            Some(Response::typed(
                vec![
                    BotReply::text(format!(
                        "Great! Date set for {}. What time slot would you prefer?",
                        date.format("%d/%m/%Y")
                    )),
                    BotReply::text(format!("Available slots: {}", ChatSlot::listing())),
                ],
                SubFlow {
                    step: ChatStep::AwaitingTime,
                    date: Some(date),
                    ..flow.clone()
                },
            ))
        },
        ChatStep::AwaitingTime => {
            let slot = parse_slot(input)?;
            Some(Response::say(
                format!("Time slot {slot} selected! How many players will be playing?"),
                SubFlow {
                    step: ChatStep::AwaitingPlayerCount,
                    slot: Some(slot),
                    ..flow.clone()
                },
            ))
        },
        ChatStep::AwaitingPlayerCount => {
            let config = config_for(flow.sport?);
            let players = NUMBER
                .find(input)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .filter(|n| config.allows(*n))?;
            Some(Response::typed(
                vec![
                    BotReply::text(format!(
                        "{players} players noted! Which venue would you prefer?"
                    )),
                    BotReply::text(format!(
                        "Available venues: {}",
                        venue_names(flow, ctx).join(", ")
                    )),
                ],
                SubFlow {
                    step: ChatStep::AwaitingVenue,
                    players: Some(players),
                    ..flow.clone()
                },
            ))
        },
        ChatStep::AwaitingVenue => {
            let lower = input.to_lowercase();
            let venue = venue_names(flow, ctx)
                .into_iter()
                .find(|name| lower.contains(&name.to_lowercase()))?;
            let next = SubFlow {
                step: ChatStep::AwaitingConfirmation,
                venue: Some(venue),
                ..flow.clone()
            };
            Some(Response {
                replies: vec![BotReply::summary(summary(&next))],
                delay: ReplyDelay::Summary,
                next,
                used_canned: false,
            })
        },
        ChatStep::AwaitingConfirmation => {
            if !input.to_lowercase().contains("confirm") {
                return None;
            }
            Some(Response {
                replies: vec![BotReply::summary(CONFIRMED)],
                delay: ReplyDelay::Summary,
                next: SubFlow::completed(),
                used_canned: false,
            })
        },
    }
}

fn reply_to(intent: Intent, flow: &SubFlow, ctx: &ChatContext<'_>) -> Response {
    let unchanged = flow.clone();
    match intent {
        Intent::MyBookings => Response::say(
            "You can see all your bookings in the \"My Bookings\" section of your dashboard.",
            unchanged,
        ),
        Intent::Cancel => Response::say(
            "To cancel a booking, open \"My Bookings\" and select the booking you want to cancel.",
            unchanged,
        ),
        Intent::Book if flow.step.is_mid_booking() => Response::say(nudge(flow, ctx), unchanged),
        Intent::Book => Response::say(
            "Great! I'd love to help you book a venue. Which sport would you like to play?",
            SubFlow::default(),
        ),
        Intent::Sports => Response::say(
            format!(
                "We have venues for {}. Which one would you like to play?",
                sport_names()
            ),
            unchanged,
        ),
        Intent::Pricing => Response::say(
            format!(
                "Courts are charged per player: {}, plus a {SERVICE_FEE_PERCENT}% service fee.",
                SportKind::ALL
                    .iter()
                    .map(|kind| format!("{kind} {}", config_for(*kind).rate_per_player))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            unchanged,
        ),
        Intent::Greeting => Response::say(
            "Hello! I can help you find and book a sports venue. Say \"I want to book\" to get started.",
            unchanged,
        ),
        Intent::Help => Response::say(
            "I can help you book a venue, check prices or find your bookings. What would you like to do?",
            unchanged,
        ),
    }
}

fn fallback(flow: &SubFlow, ctx: &ChatContext<'_>) -> Response {
    if flow.step.is_mid_booking() {
        return Response::say(nudge(flow, ctx), flow.clone());
    }
    let text = CANNED_RESPONSES[ctx.canned_index % CANNED_RESPONSES.len()];
    Response {
        used_canned: true,
        ..Response::say(text, flow.clone())
    }
}

/// Re-ask the pending question
fn nudge(flow: &SubFlow, ctx: &ChatContext<'_>) -> String {
    match flow.step {
        ChatStep::AwaitingDate => {
            "Please tell me the date in DD/MM/YYYY format, for example 15/01/2024.".to_string()
        },
        ChatStep::AwaitingTime => {
            format!("Please pick one of the available slots: {}", ChatSlot::listing())
        },
        ChatStep::AwaitingPlayerCount => match flow.sport.map(config_for) {
            Some(config) => format!(
                "How many players will be playing? {} allows {} to {} players.",
                config.kind, config.min_players, config.max_players
            ),
            None => "How many players will be playing?".to_string(),
        },
        ChatStep::AwaitingVenue => format!(
            "Please choose one of the available venues: {}",
            venue_names(flow, ctx).join(", ")
        ),
        ChatStep::AwaitingConfirmation => {
            "Type \"confirm\" to complete your booking!".to_string()
        },
        ChatStep::AwaitingSport | ChatStep::Completed => {
            format!("Which sport would you like to play? We have {}.", sport_names())
        },
    }
}

// ============================================================================
// Parsing helpers
// ============================================================================

/// First `DD/MM/YYYY` in `input` naming a real calendar day
fn parse_date(input: &str) -> Option<NaiveDate> {
    DATE.captures_iter(input).find_map(|caps| {
        let day = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let year = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

/// First clock time in `input` that starts or ends an offered slot
fn parse_slot(input: &str) -> Option<ChatSlot> {
    CLOCK_TIME.captures_iter(input).find_map(|caps| {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        let hour = match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()) {
            None => hour,
            Some(meridiem) if (1..=12).contains(&hour) => match (meridiem.as_str(), hour) {
                ("am", 12) => 0,
                ("pm", 12) => 12,
                ("pm", h) => h + 12,
                (_, h) => h,
            },
            Some(_) => return None,
        };
        ChatSlot::at(NaiveTime::from_hms_opt(hour, minute, 0)?)
    })
}

/// Venue names offered for the chosen sport; every venue if none match
fn venue_names(flow: &SubFlow, ctx: &ChatContext<'_>) -> Vec<String> {
    let venues = ctx.catalog.venues();
    let for_sport: Vec<String> = venues
        .iter()
        .filter(|venue| Some(venue.sport) == flow.sport)
        .map(|venue| venue.name.clone())
        .collect();
    if for_sport.is_empty() {
        venues.iter().map(|venue| venue.name.clone()).collect()
    } else {
        for_sport
    }
}

fn sport_names() -> String {
    SportKind::ALL
        .iter()
        .map(|kind| kind.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn summary(flow: &SubFlow) -> String {
    let sport = flow.sport.map_or("-", SportKind::display_name);
    let players = flow.players.unwrap_or(0);
    let estimate = flow
        .sport
        .map(|kind| compute_pricing(config_for(kind).rate_per_player, players).final_amount);

    let mut text = format!(
        "Perfect! Here's your booking summary:\n\n\
         🏟️ Venue: {}\n\
         ⚽ Sport: {sport}\n\
         📅 Date: {}\n\
         ⏰ Time: {}\n\
         👥 Players: {players}\n",
        flow.venue.as_deref().unwrap_or("-"),
        flow.date
            .map_or_else(|| "-".to_string(), |date| date.format("%d/%m/%Y").to_string()),
        flow.slot.map_or_else(|| "-".to_string(), |slot| slot.to_string()),
    );
    if let Some(amount) = estimate {
        text.push_str(&format!("💰 Estimated total: {amount}\n"));
    }
    text.push_str("\nType \"confirm\" to complete your booking!");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FixtureCatalog;
    use crate::chatbot::types::MessageKind;

    fn ctx(catalog: &FixtureCatalog) -> ChatContext<'_> {
        ChatContext {
            catalog,
            canned_index: 0,
        }
    }

    fn at(step: ChatStep) -> SubFlow {
        SubFlow {
            step,
            sport: Some(SportKind::Badminton),
            ..SubFlow::default()
        }
    }

    #[test]
    fn booking_management_beats_booking_intent() {
        assert_eq!(classify("Check my bookings"), Some(Intent::MyBookings));
        assert_eq!(classify("Cancel booking"), Some(Intent::Cancel));
        assert_eq!(classify("I want to book a venue"), Some(Intent::Book));
        assert_eq!(classify("Show available sports"), Some(Intent::Sports));
        assert_eq!(classify("what does it cost?"), Some(Intent::Pricing));
        assert_eq!(classify("Namaste"), Some(Intent::Greeting));
        assert_eq!(classify("HELP"), Some(Intent::Help));
        assert_eq!(classify("weather today"), None);
    }

    #[test]
    fn sport_answer_starts_booking() {
        let catalog = FixtureCatalog::new();
        let response = respond(&SubFlow::default(), "tennis please", &ctx(&catalog));
        assert_eq!(response.next.step, ChatStep::AwaitingDate);
        assert_eq!(response.next.sport, Some(SportKind::Tennis));
        assert_eq!(
            response.replies[0].text,
            "Perfect! Tennis it is. Which date would you prefer? (Please provide in DD/MM/YYYY format)"
        );
    }

    #[test]
    fn impossible_dates_are_not_answers() {
        let catalog = FixtureCatalog::new();
        let flow = at(ChatStep::AwaitingDate);
        let response = respond(&flow, "31/02/2024", &ctx(&catalog));
        assert_eq!(response.next, flow);
        assert!(response.replies[0].text.contains("DD/MM/YYYY"));

        let response = respond(&flow, "on 5/3/2024 please", &ctx(&catalog));
        assert_eq!(response.next.date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(response.replies.len(), 2);
        assert!(response.replies[0].text.contains("05/03/2024"));
    }

    #[test]
    fn slots_match_by_either_endpoint() {
        assert_eq!(
            parse_slot("6:00 PM - 8:00 PM").map(|s| s.to_string()).as_deref(),
            Some("6:00 PM - 8:00 PM")
        );
        assert_eq!(
            parse_slot("ending at 12:00 pm").map(|s| s.to_string()).as_deref(),
            Some("10:00 AM - 12:00 PM")
        );
        assert_eq!(
            parse_slot("2:00 pm works").map(|s| s.to_string()).as_deref(),
            Some("2:00 PM - 4:00 PM")
        );
        assert_eq!(parse_slot("1:00 pm"), None);
        assert_eq!(parse_slot("13:00 pm"), None);
    }

    #[test]
    fn player_count_must_fit_the_sport() {
        let catalog = FixtureCatalog::new();
        let flow = at(ChatStep::AwaitingPlayerCount);

        let too_many = respond(&flow, "we are 6", &ctx(&catalog));
        assert_eq!(too_many.next, flow);
        assert!(too_many.replies[0].text.contains("2 to 4"));

        let ok = respond(&flow, "3", &ctx(&catalog));
        assert_eq!(ok.next.players, Some(3));
        assert_eq!(
            ok.replies[1].text,
            "Available venues: Elite Sports Complex, Royal Badminton Center"
        );
    }

    #[test]
    fn sports_without_venues_list_everything() {
        let catalog = FixtureCatalog::new();
        let flow = SubFlow {
            sport: Some(SportKind::Cricket),
            ..at(ChatStep::AwaitingPlayerCount)
        };
        let response = respond(&flow, "12", &ctx(&catalog));
        assert!(response.replies[1].text.contains("Supreme Football Ground"));
        assert!(response.replies[1].text.contains("Ace Tennis Academy"));
    }

    #[test]
    fn venue_answer_produces_summary_with_estimate() {
        let catalog = FixtureCatalog::new();
        let flow = SubFlow {
            date: NaiveDate::from_ymd_opt(2024, 1, 15),
            slot: ChatSlot::all().last().copied(),
            players: Some(3),
            ..at(ChatStep::AwaitingVenue)
        };
        let response = respond(&flow, "elite sports complex", &ctx(&catalog));

        assert_eq!(response.delay, ReplyDelay::Summary);
        assert_eq!(response.next.step, ChatStep::AwaitingConfirmation);
        let card = &response.replies[0];
        assert_eq!(card.kind, MessageKind::BookingSummary);
        assert!(card.text.contains("Venue: Elite Sports Complex"));
        assert!(card.text.contains("Date: 15/01/2024"));
        assert!(card.text.contains("Time: 6:00 PM - 8:00 PM"));
        assert!(card.text.contains("Estimated total: ₹1890"));
        assert!(card.text.ends_with("Type \"confirm\" to complete your booking!"));
    }

    #[test]
    fn confirm_completes_and_clears() {
        let catalog = FixtureCatalog::new();
        let flow = SubFlow {
            venue: Some("Elite Sports Complex".to_string()),
            players: Some(2),
            ..at(ChatStep::AwaitingConfirmation)
        };
        let response = respond(&flow, "Confirm!", &ctx(&catalog));
        assert_eq!(response.next, SubFlow::completed());
        assert_eq!(response.delay, ReplyDelay::Summary);
        assert!(response.replies[0].text.starts_with("🎉 Booking Confirmed!"));
    }

    #[test]
    fn unmatched_input_still_gets_a_reply() {
        let catalog = FixtureCatalog::new();
        for step in [
            ChatStep::AwaitingSport,
            ChatStep::AwaitingDate,
            ChatStep::AwaitingTime,
            ChatStep::AwaitingPlayerCount,
            ChatStep::AwaitingVenue,
            ChatStep::AwaitingConfirmation,
            ChatStep::Completed,
        ] {
            let flow = at(step);
            let response = respond(&flow, "qwerty", &ctx(&catalog));
            assert_eq!(response.next, flow, "{step:?}");
            assert!(!response.replies.is_empty(), "{step:?}");
            assert!(response.replies.iter().all(|r| !r.text.is_empty()), "{step:?}");
            assert_eq!(response.used_canned, !step.is_mid_booking(), "{step:?}");
        }
    }

    #[test]
    fn canned_responses_rotate() {
        let catalog = FixtureCatalog::new();
        let flow = SubFlow::default();
        let texts: Vec<String> = (0..6)
            .map(|canned_index| {
                let ctx = ChatContext {
                    catalog: &catalog,
                    canned_index,
                };
                respond(&flow, "qwerty", &ctx).replies[0].text.clone()
            })
            .collect();
        assert_eq!(texts[0], CANNED_RESPONSES[0]);
        assert_eq!(texts[4], CANNED_RESPONSES[4]);
        assert_eq!(texts[5], CANNED_RESPONSES[0]);
    }

    #[test]
    fn booking_intent_mid_flow_repeats_the_question() {
        let catalog = FixtureCatalog::new();
        let flow = at(ChatStep::AwaitingTime);
        let response = respond(&flow, "I want to book", &ctx(&catalog));
        assert_eq!(response.next, flow);
        assert!(response.replies[0].text.starts_with("Please pick one of the available slots"));
    }

    #[test]
    fn booking_intent_after_completion_restarts() {
        let catalog = FixtureCatalog::new();
        let response = respond(&SubFlow::completed(), "book again", &ctx(&catalog));
        assert_eq!(response.next, SubFlow::default());
    }

    #[test]
    fn rules_beat_sport_names_outside_a_booking() {
        let catalog = FixtureCatalog::new();
        for flow in [SubFlow::default(), SubFlow::completed()] {
            let cancel = respond(&flow, "Cancel my tennis booking", &ctx(&catalog));
            assert_eq!(cancel.next, flow);
            assert!(cancel.replies[0].text.starts_with("To cancel a booking"));

            let pricing = respond(&flow, "How much does tennis cost?", &ctx(&catalog));
            assert_eq!(pricing.next, flow);
            assert!(pricing.replies[0].text.starts_with("Courts are charged per player"));

            let mine = respond(&flow, "Check my bookings for cricket", &ctx(&catalog));
            assert_eq!(mine.next, flow);
            assert!(mine.replies[0].text.contains("\"My Bookings\" section"));
        }
    }

    #[test]
    fn booking_intent_with_a_sport_skips_the_sport_question() {
        let catalog = FixtureCatalog::new();
        for flow in [SubFlow::default(), SubFlow::completed()] {
            let response = respond(&flow, "book tennis", &ctx(&catalog));
            assert_eq!(response.next.step, ChatStep::AwaitingDate);
            assert_eq!(response.next.sport, Some(SportKind::Tennis));
            assert!(response.replies[0].text.starts_with("Perfect! Tennis it is."));
        }
    }

    #[test]
    fn pricing_lists_every_rate() {
        let catalog = FixtureCatalog::new();
        let response = respond(&SubFlow::default(), "what are your prices", &ctx(&catalog));
        let text = &response.replies[0].text;
        assert!(text.contains("Badminton ₹600"));
        assert!(text.contains("Cricket ₹150"));
        assert!(text.contains("5% service fee"));
    }
}
