//! Core award pricing calculation functions.
//!
//! Pure functions for chart lookups and the ratio / transfer-bonus math.
//! Multipliers are `Decimal` so that a ratio like 1.05 scales exactly and
//! the ceiling lands where a person doing the sum by hand expects it.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use tracing::warn;

use super::models::RateBand;

/// Look up (economy, business) prices for a distance.
///
/// Returns the first band whose inclusive upper bound covers `distance`; a
/// distance exactly on a boundary belongs to the lower band. If no band
/// covers it the last band's prices are used. Returns `None` only for an
/// empty chart.
pub fn band_price(bands: &[RateBand], distance: f64) -> Option<(u64, u64)> {
    if let Some(band) = bands.iter().find(|band| distance <= band.max_distance) {
        return Some((band.economy, band.business));
    }
    let last = bands.last()?;
    warn!(
        "Distance {:.0} mi exceeds every band (last max {}), using last band",
        distance, last.max_distance
    );
    Some((last.economy, last.business))
}

/// Combine the program's default ratio with the user's ratio.
///
/// A user ratio of zero or less counts as 1.0. `None` if the product
/// overflows.
pub fn final_ratio(program_ratio: Decimal, user_ratio: Decimal) -> Option<Decimal> {
    let user_ratio = if user_ratio > Decimal::ZERO {
        user_ratio
    } else {
        Decimal::ONE
    };
    program_ratio.checked_mul(user_ratio)
}

/// Miles per person after applying the future ratio, rounded up.
///
/// `None` if the result does not fit in a `u64`.
pub fn apply_ratio(base_per_person: u64, ratio: Decimal) -> Option<u64> {
    Decimal::from(base_per_person)
        .checked_mul(ratio)?
        .ceil()
        .to_u64()
}

/// Points → miles conversion factor for a transfer bonus percentage.
///
/// A bonus of 20 means 1 point becomes 1.2 miles. No bonus (or a negative
/// one) is a factor of exactly 1.
pub fn bonus_factor(bonus_percent: Decimal) -> Decimal {
    if bonus_percent > Decimal::ZERO {
        Decimal::ONE + bonus_percent / Decimal::ONE_HUNDRED
    } else {
        Decimal::ONE
    }
}

/// Points per person needed to cover `miles_per_person`, rounded up
pub fn points_needed(miles_per_person: u64, bonus_percent: Decimal) -> Option<u64> {
    Decimal::from(miles_per_person)
        .checked_div(bonus_factor(bonus_percent))?
        .ceil()
        .to_u64()
}

/// Per-person value times passenger count
pub fn total_for(per_person: u64, passengers: u32) -> Option<u64> {
    per_person.checked_mul(u64::from(passengers))
}
