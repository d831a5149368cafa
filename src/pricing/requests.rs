//! Pricing request DTOs.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::models::Cabin;

/// How the base miles per person are obtained
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PriceSource {
    /// Estimate from the great-circle distance, unless a business override
    /// applies to the destination
    Distance { origin: String, destination: String },
    /// Miles per person as typed by the user, e.g. "50,000"
    Manual { miles: String },
}

/// A single quote request from the presentation layer
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PricingRequest {
    pub program: String,
    pub cabin: Cabin,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub bonus_percent: Decimal,
    #[serde(default = "default_ratio", with = "rust_decimal::serde::str")]
    pub ratio: Decimal,
    #[serde(default)]
    pub airline: String,
    /// `YYYY-MM-DD`
    pub exchange_date: String,
    pub source: PriceSource,
}

fn default_passengers() -> u32 {
    1
}

fn default_ratio() -> Decimal {
    Decimal::ONE
}

impl PricingRequest {
    /// Distance-mode request with no bonus, a 1.0 ratio and one passenger
    pub fn distance(
        program: impl Into<String>,
        cabin: Cabin,
        origin: impl Into<String>,
        destination: impl Into<String>,
        exchange_date: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            cabin,
            passengers: 1,
            bonus_percent: Decimal::ZERO,
            ratio: Decimal::ONE,
            airline: String::new(),
            exchange_date: exchange_date.into(),
            source: PriceSource::Distance {
                origin: origin.into(),
                destination: destination.into(),
            },
        }
    }

    /// Manual-mode request with no bonus, a 1.0 ratio and one passenger
    pub fn manual(
        program: impl Into<String>,
        cabin: Cabin,
        miles: impl Into<String>,
        exchange_date: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            cabin,
            passengers: 1,
            bonus_percent: Decimal::ZERO,
            ratio: Decimal::ONE,
            airline: String::new(),
            exchange_date: exchange_date.into(),
            source: PriceSource::Manual {
                miles: miles.into(),
            },
        }
    }

    pub fn with_passengers(mut self, passengers: u32) -> Self {
        self.passengers = passengers;
        self
    }

    pub fn with_bonus_percent(mut self, bonus_percent: Decimal) -> Self {
        self.bonus_percent = bonus_percent;
        self
    }

    pub fn with_ratio(mut self, ratio: Decimal) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn with_airline(mut self, airline: impl Into<String>) -> Self {
        self.airline = airline.into();
        self
    }
}

/// Parse a manually entered miles value, allowing thousands separators.
pub fn parse_manual_miles(input: &str) -> Option<u64> {
    let cleaned: String = input.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}
