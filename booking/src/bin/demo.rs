//! QuickCourt demo.
//!
//! Runs the booking wizard and the booking assistant in a `Store` against
//! the in-memory backend and the fixture venue listing.

use anyhow::Context;
use quickcourt_booking::catalog::{FixtureCatalog, VenueCatalog, VenueQuery, VenueSort};
use quickcourt_booking::chatbot::{ChatbotAction, ChatbotEnvironment, ChatbotReducer, ChatbotState};
use quickcourt_booking::flow::{
    BookingFlowAction, BookingFlowEnvironment, BookingFlowReducer, BookingFlowState,
};
use quickcourt_booking::mocks::InMemoryBackend;
use quickcourt_booking::session::{Session, UserRole};
use quickcourt_booking::types::PlayerField;
use quickcourt_booking::Config;
use quickcourt_core::environment::{Clock, SystemClock};
use quickcourt_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const EFFECT_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(&config.log_level)
                .unwrap_or_else(|_| EnvFilter::new("quickcourt_booking=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        offered_days = config.booking.offered_days,
        typing_delay_ms = config.chat.typing_delay_ms,
        "Configuration loaded"
    );

    let catalog = Arc::new(FixtureCatalog::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    println!("=== QuickCourt ===\n");
    list_venues(catalog.as_ref());

    book_a_court(&config, catalog.as_ref(), Arc::clone(&clock)).await?;
    chat(&config, catalog, clock).await?;

    Ok(())
}

fn list_venues(catalog: &dyn VenueCatalog) {
    println!("Venues by rating:");
    for venue in catalog.search(&VenueQuery::new().sort(VenueSort::Rating)) {
        println!(
            "  {} ({}) ₹{}/hr ★{}{}",
            venue.name,
            venue.sport,
            venue.price_per_hour.rupees(),
            venue.rating(),
            if venue.available { "" } else { " [unavailable]" }
        );
    }
    println!();
}

async fn book_a_court(
    config: &Config,
    catalog: &FixtureCatalog,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<()> {
    let venue = catalog
        .by_name("Elite Sports Complex")
        .context("fixture venue missing")?;
    let backend = InMemoryBackend::signed_in(Session::new("lead@example.com", UserRole::User));
    let env = BookingFlowEnvironment::new(Arc::clone(&clock), Arc::new(backend.clone()))
        .with_offered_days(config.booking.offered_days);

    let store = Store::new(
        BookingFlowState::for_venue(venue),
        BookingFlowReducer::new(),
        env,
    );

    println!(">>> Booking {} for {}", venue.name, venue.sport);
    let today = clock.now().date_naive();
    let mut actions = vec![
        BookingFlowAction::SelectDate { date: today },
        BookingFlowAction::SelectTimeSlot {
            label: "18:00 - 19:00".to_string(),
        },
        BookingFlowAction::SetPlayerCount { count: 3 },
    ];
    for (index, name) in ["Asha", "Rohan", "Meera"].into_iter().enumerate() {
        actions.push(BookingFlowAction::EditPlayer {
            index,
            field: PlayerField::Name,
            value: name.to_string(),
        });
        actions.push(BookingFlowAction::EditPlayer {
            index,
            field: PlayerField::Phone,
            value: format!("98200 1000{index}"),
        });
    }
    actions.push(BookingFlowAction::SetSpecialRequests {
        text: "Extra shuttlecocks".to_string(),
    });

    for action in actions {
        let _ = store.send(action).await?;
    }

    let pricing = store.state(BookingFlowState::pricing).await;
    println!(
        "    total {} + fee {} = {}",
        pricing.total_amount, pricing.service_fee, pricing.final_amount
    );

    let mut handle = store.send(BookingFlowAction::Submit).await?;
    handle.wait_with_timeout(EFFECT_TIMEOUT).await?;

    let state = store.state(Clone::clone).await;
    println!("    step: {:?}", state.step());
    println!("{}\n", serde_json::to_string_pretty(&state.status)?);
    info!(stored = backend.bookings().len(), "Booking flow finished");
    Ok(())
}

async fn chat(
    config: &Config,
    catalog: Arc<FixtureCatalog>,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<()> {
    let env = ChatbotEnvironment::new(Arc::clone(&clock), catalog).with_config(&config.chat);
    let store = Store::new(ChatbotState::new(clock.now()), ChatbotReducer::new(), env);

    let _ = store.send(ChatbotAction::Open).await?;
    let today = clock.now().date_naive().format("%d/%m/%Y").to_string();

    for text in [
        "I want to book a venue",
        "Badminton",
        today.as_str(),
        "6:00 PM",
        "4",
        "Royal Badminton Center",
        "confirm",
    ] {
        let mut handle = store
            .send(ChatbotAction::SendMessage {
                text: text.to_string(),
            })
            .await?;
        handle.wait_with_timeout(EFFECT_TIMEOUT).await?;
    }

    for message in store.state(|s| s.messages.clone()).await {
        println!("[{}] {}", message.sender, message.text);
    }
    Ok(())
}
