//! Pricing result DTOs and the human-readable quote report.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use super::calendar::DATE_FORMAT;
use super::models::{Cabin, Chart};

/// Which pricing rule produced the base miles per person
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum PricingRule {
    /// Miles per person typed in by the user
    Manual,
    /// Fixed business-class price for a destination group
    Override { group: String },
    /// Distance chart estimate
    DistanceBand {
        origin: String,
        destination: String,
        distance_miles: f64,
        chart: Chart,
    },
}

impl PricingRule {
    pub fn describe(&self, program: &str) -> String {
        match self {
            PricingRule::Manual => "Manual miles per person".to_string(),
            PricingRule::Override { group } => {
                format!("Fixed Business Class override for {} ({})", program, group)
            }
            PricingRule::DistanceBand {
                origin,
                destination,
                distance_miles,
                chart,
            } => format!(
                "Distance-based estimate: {}→{} ~ {} mi; {} chart",
                origin,
                destination,
                group_thousands(distance_miles.round() as u64),
                chart
            ),
        }
    }
}

/// Fully adjusted quote for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingResult {
    pub program: String,
    pub cabin: Cabin,
    pub passengers: u32,
    pub airline: String,
    pub rule: PricingRule,
    /// Miles per person before the ratio is applied
    pub base_per_person: u64,
    #[serde(with = "rust_decimal::serde::str")]
    pub final_ratio: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub bonus_percent: Decimal,
    pub miles_per_person: u64,
    pub points_per_person: u64,
    pub total_miles: u64,
    pub total_points: u64,
    pub exchange_date: NaiveDate,
    pub validity_months: u32,
    pub expiry_date: NaiveDate,
}

impl PricingResult {
    /// Distance in whole miles, when the distance chart was used
    pub fn rounded_distance(&self) -> Option<u64> {
        match &self.rule {
            PricingRule::DistanceBand { distance_miles, .. } => Some(distance_miles.round() as u64),
            _ => None,
        }
    }
}

impl fmt::Display for PricingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let airline = if self.airline.trim().is_empty() {
            "(unspecified)"
        } else {
            self.airline.as_str()
        };

        writeln!(
            f,
            "Program: {}   Cabin: {}   Passengers: {}",
            self.program, self.cabin, self.passengers
        )?;
        writeln!(
            f,
            "Airline: {}   Future ratio ×: {:.2}",
            airline, self.final_ratio
        )?;
        writeln!(f, "{}", self.rule.describe(&self.program))?;
        writeln!(f)?;
        writeln!(
            f,
            "Miles per person (after ratio): {}",
            group_thousands(self.miles_per_person)
        )?;
        if self.bonus_percent > Decimal::ZERO {
            writeln!(
                f,
                "Transfer bonus: +{}% → Points per person needed: {}",
                self.bonus_percent.round(),
                group_thousands(self.points_per_person)
            )?;
        } else {
            writeln!(
                f,
                "Points per person needed: {}",
                group_thousands(self.points_per_person)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "TOTAL miles:  {}", group_thousands(self.total_miles))?;
        writeln!(f, "TOTAL points: {}", group_thousands(self.total_points))?;
        writeln!(f)?;
        write!(
            f,
            "Exchange date: {} → Expiry in {} months: {}",
            self.exchange_date.format(DATE_FORMAT),
            self.validity_months,
            self.expiry_date.format(DATE_FORMAT)
        )
    }
}

/// Format an integer with comma thousands separators
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
