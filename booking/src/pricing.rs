//! Booking price and duration.
//!
//! Pure functions of the draft; nothing here is cached or stored.

use crate::money::Money;
use crate::types::TimeSlot;
use serde::Serialize;

/// Service fee as a percentage of the total
pub const SERVICE_FEE_PERCENT: u64 = 5;

/// Derived amounts for a booking
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PricingResult {
    /// Rate × charged players
    pub total_amount: Money,
    /// 5% of total, rounded half up
    pub service_fee: Money,
    /// Total plus fee
    pub final_amount: Money,
}

/// Price `player_count` players at `rate_per_player`
///
/// At least one player is always charged, so an unset (zero) count never
/// yields a free booking.
#[must_use]
pub const fn compute_pricing(rate_per_player: Money, player_count: u32) -> PricingResult {
    let charged = if player_count == 0 { 1 } else { player_count as u64 };
    let total_amount = rate_per_player.saturating_mul(charged);
    let service_fee = total_amount.percent_rounded(SERVICE_FEE_PERCENT);
    PricingResult {
        total_amount,
        service_fee,
        final_amount: total_amount.saturating_add(service_fee),
    }
}

/// Whole hours covered by `slot`, rounded half up, never less than 1
#[must_use]
pub fn duration_hours(slot: &TimeSlot) -> u32 {
    let minutes = u32::try_from(slot.minutes().max(0)).unwrap_or(u32::MAX);
    ((minutes.saturating_add(30)) / 60).max(1)
}
