//! The award pricing engine.
//!
//! Resolves the base miles per person for a request (manual entry, fixed
//! business override, or distance chart, in that order), then applies the
//! ratio, transfer bonus, passenger count and validity period. The engine
//! only borrows reference data, so the same request against the same data
//! always produces the same result.

use std::collections::BTreeMap;
use tracing::debug;

use super::calculators::{apply_ratio, band_price, final_ratio, points_needed, total_for};
use super::calendar::{add_months, parse_exchange_date};
use super::geo::haversine_miles;
use super::models::{override_price, AirportRegistry, Cabin, DestinationGroups, Program};
use super::requests::{parse_manual_miles, PriceSource, PricingRequest};
use super::responses::{PricingResult, PricingRule};

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PricingError {
    fn invalid(message: impl Into<String>) -> Self {
        PricingError::InvalidInput(message.into())
    }
}

/// Immutable reference data a quote is priced against
#[derive(Debug, Clone, Copy)]
pub struct PricingEngine<'a> {
    programs: &'a BTreeMap<String, Program>,
    airports: &'a AirportRegistry,
    groups: &'a DestinationGroups,
}

impl<'a> PricingEngine<'a> {
    pub fn new(
        programs: &'a BTreeMap<String, Program>,
        airports: &'a AirportRegistry,
        groups: &'a DestinationGroups,
    ) -> Self {
        Self {
            programs,
            airports,
            groups,
        }
    }

    /// Price a request.
    ///
    /// Either returns a complete, fully adjusted result or a single
    /// `InvalidInput` error; nothing is partially computed.
    pub fn price(&self, request: &PricingRequest) -> Result<PricingResult, PricingError> {
        let program_name = request.program.trim();
        if program_name.is_empty() {
            return Err(PricingError::invalid("Please select a program."));
        }
        let program = self
            .programs
            .get(program_name)
            .ok_or_else(|| PricingError::invalid(format!("Unknown program '{}'.", program_name)))?;

        let exchange_date = parse_exchange_date(&request.exchange_date)
            .ok_or_else(|| PricingError::invalid("Exchange date must be YYYY-MM-DD."))?;

        if request.passengers == 0 {
            return Err(PricingError::invalid("Passengers must be at least 1."));
        }

        let (base_per_person, rule) = self.resolve_base(program_name, program, request)?;
        debug!(
            "Resolved {} {} base price {} via {:?}",
            program_name, request.cabin, base_per_person, rule
        );

        let ratio = final_ratio(program.ratio_multiplier, request.ratio)
            .ok_or_else(|| PricingError::invalid("Ratio multiplier is out of range."))?;
        let miles_per_person = apply_ratio(base_per_person, ratio)
            .ok_or_else(|| PricingError::invalid("Miles per person is out of range."))?;
        let points_per_person = points_needed(miles_per_person, request.bonus_percent)
            .ok_or_else(|| PricingError::invalid("Points per person is out of range."))?;
        let total_miles = total_for(miles_per_person, request.passengers)
            .ok_or_else(|| PricingError::invalid("Total miles is out of range."))?;
        let total_points = total_for(points_per_person, request.passengers)
            .ok_or_else(|| PricingError::invalid("Total points is out of range."))?;

        let expiry_date = add_months(exchange_date, program.validity_months)
            .ok_or_else(|| PricingError::invalid("Expiry date is out of range."))?;

        Ok(PricingResult {
            program: program_name.to_string(),
            cabin: request.cabin,
            passengers: request.passengers,
            airline: request.airline.trim().to_string(),
            rule,
            base_per_person,
            final_ratio: ratio,
            bonus_percent: request.bonus_percent,
            miles_per_person,
            points_per_person,
            total_miles,
            total_points,
            exchange_date,
            validity_months: program.validity_months,
            expiry_date,
        })
    }

    /// Base miles per person and the rule that produced it
    fn resolve_base(
        &self,
        program_name: &str,
        program: &Program,
        request: &PricingRequest,
    ) -> Result<(u64, PricingRule), PricingError> {
        let (origin_code, destination_code) = match &request.source {
            PriceSource::Manual { miles } => {
                if miles.trim().is_empty() {
                    return Err(PricingError::invalid(
                        "Enter 'miles per person' or enable distance-based estimate.",
                    ));
                }
                let miles = parse_manual_miles(miles)
                    .ok_or_else(|| PricingError::invalid("Miles per person must be a number."))?;
                return Ok((miles, PricingRule::Manual));
            }
            PriceSource::Distance {
                origin,
                destination,
            } => (origin.trim(), destination.trim()),
        };

        let (origin, destination) = match (
            self.airports.get(origin_code),
            self.airports.get(destination_code),
        ) {
            (Some(origin), Some(destination)) => (origin, destination),
            _ => {
                return Err(PricingError::invalid(
                    "Please choose valid origin/destination IATA codes.",
                ))
            }
        };

        if request.cabin == Cabin::Business {
            if let Some(miles) = override_price(program, self.groups, &destination.iata) {
                let group = self
                    .groups
                    .resolve_group(&destination.iata)
                    .unwrap_or_default()
                    .to_string();
                return Ok((miles, PricingRule::Override { group }));
            }
        }

        let distance = haversine_miles(origin.coordinate(), destination.coordinate());
        let (chart, bands) = program.chart_for(&request.airline);
        let (economy, business) = band_price(bands, distance).ok_or_else(|| {
            PricingError::invalid(format!("Program '{}' has an empty {} chart.", program_name, chart))
        })?;
        let base = match request.cabin {
            Cabin::Economy => economy,
            Cabin::Business => business,
        };

        Ok((
            base,
            PricingRule::DistanceBand {
                origin: origin.iata.clone(),
                destination: destination.iata.clone(),
                distance_miles: distance,
                chart,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::Chart;
    use crate::settings::defaults;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    struct Fixture {
        programs: BTreeMap<String, Program>,
        airports: AirportRegistry,
        groups: DestinationGroups,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                programs: defaults::programs(),
                airports: defaults::airports(),
                groups: defaults::destination_groups(),
            }
        }

        fn engine(&self) -> PricingEngine<'_> {
            PricingEngine::new(&self.programs, &self.airports, &self.groups)
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ==================== end-to-end examples ====================

    #[test]
    fn test_partner_economy_by_distance() {
        let fixture = Fixture::new();
        let request = PricingRequest::distance("Asia Miles", Cabin::Economy, "BKK", "HND", "2025-06-15")
            .with_airline("Thai Airways");

        let result = fixture.engine().price(&request).unwrap();

        match &result.rule {
            PricingRule::DistanceBand { chart, .. } => assert_eq!(*chart, Chart::Partner),
            other => panic!("expected distance band, got {:?}", other),
        }
        assert_eq!(result.rounded_distance(), Some(2851));
        assert_eq!(result.base_per_person, 26000);
        assert_eq!(result.miles_per_person, 26000);
        assert_eq!(result.points_per_person, 26000);
        assert_eq!(result.total_miles, 26000);
        assert_eq!(result.total_points, 26000);
        assert_eq!(result.expiry_date, ymd(2028, 6, 15));
    }

    #[test]
    fn test_home_airline_uses_own_chart() {
        let fixture = Fixture::new();
        let request = PricingRequest::distance("Asia Miles", Cabin::Economy, "BKK", "HND", "2025-06-15")
            .with_airline("cathay pacific");

        let result = fixture.engine().price(&request).unwrap();

        match &result.rule {
            PricingRule::DistanceBand { chart, .. } => assert_eq!(*chart, Chart::Own),
            other => panic!("expected distance band, got {:?}", other),
        }
        assert_eq!(result.miles_per_person, 20000);
    }

    #[test]
    fn test_business_override_wins_over_distance() {
        let fixture = Fixture::new();
        let request = PricingRequest::distance("Asia Miles", Cabin::Business, "BKK", "HND", "2025-06-15")
            .with_airline("Thai Airways")
            .with_passengers(2);

        let result = fixture.engine().price(&request).unwrap();

        // The partner chart would have charged 60,000 for this distance
        assert_eq!(
            result.rule,
            PricingRule::Override {
                group: "HND NRT CTS".to_string()
            }
        );
        assert_eq!(result.miles_per_person, 58000);
        assert_eq!(result.total_miles, 116000);
        assert_eq!(result.total_points, 116000);
        assert_eq!(result.rounded_distance(), None);
    }

    #[test]
    fn test_override_ignored_for_economy() {
        let fixture = Fixture::new();
        let request = PricingRequest::distance("Asia Miles", Cabin::Economy, "BKK", "NRT", "2025-06-15")
            .with_airline("Thai Airways");

        let result = fixture.engine().price(&request).unwrap();

        assert!(matches!(result.rule, PricingRule::DistanceBand { .. }));
    }

    #[test]
    fn test_business_without_override_uses_chart() {
        let fixture = Fixture::new();
        // Qatar Privilege Club has no overrides
        let request =
            PricingRequest::distance("Qatar Privilege Club", Cabin::Business, "BKK", "HND", "2025-06-15");

        let result = fixture.engine().price(&request).unwrap();

        assert!(matches!(result.rule, PricingRule::DistanceBand { .. }));
        assert_eq!(result.base_per_person, 60000);
    }

    #[test]
    fn test_manual_with_ratio_and_bonus() {
        let fixture = Fixture::new();
        let request = PricingRequest::manual("KrisFlyer", Cabin::Economy, "50,000", "2025-06-15")
            .with_ratio(dec!(1.05))
            .with_bonus_percent(dec!(10));

        let result = fixture.engine().price(&request).unwrap();

        assert_eq!(result.rule, PricingRule::Manual);
        assert_eq!(result.final_ratio, dec!(1.05));
        assert_eq!(result.miles_per_person, 52500);
        assert_eq!(result.points_per_person, 47728);
        assert_eq!(result.total_miles, 52500);
        assert_eq!(result.total_points, 47728);
    }

    #[test]
    fn test_manual_mode_skips_airport_lookup() {
        let fixture = Fixture::new();
        let request = PricingRequest::manual("KrisFlyer", Cabin::Business, "30000", "2025-06-15");

        let result = fixture.engine().price(&request).unwrap();

        assert_eq!(result.miles_per_person, 30000);
    }

    #[test]
    fn test_program_ratio_multiplies_user_ratio() {
        let mut fixture = Fixture::new();
        fixture.programs.get_mut("KrisFlyer").unwrap().ratio_multiplier = dec!(1.10);
        let request = PricingRequest::manual("KrisFlyer", Cabin::Economy, "10000", "2025-06-15")
            .with_ratio(dec!(2));

        let result = fixture.engine().price(&request).unwrap();

        assert_eq!(result.final_ratio, dec!(2.20));
        assert_eq!(result.miles_per_person, 22000);
    }

    #[test]
    fn test_non_positive_user_ratio_counts_as_one() {
        let fixture = Fixture::new();
        let request = PricingRequest::manual("KrisFlyer", Cabin::Economy, "10000", "2025-06-15")
            .with_ratio(Decimal::ZERO);

        let result = fixture.engine().price(&request).unwrap();

        assert_eq!(result.final_ratio, dec!(1));
        assert_eq!(result.miles_per_person, 10000);
    }

    #[test]
    fn test_expiry_clamps_to_month_end() {
        let mut fixture = Fixture::new();
        let program = fixture.programs.get_mut("Royal Orchid Plus").unwrap();
        program.validity_months = 1;
        let request = PricingRequest::manual("Royal Orchid Plus", Cabin::Economy, "10000", "2024-01-31");
        assert_eq!(fixture.engine().price(&request).unwrap().expiry_date, ymd(2024, 2, 29));

        fixture.programs.get_mut("Royal Orchid Plus").unwrap().validity_months = 13;
        assert_eq!(fixture.engine().price(&request).unwrap().expiry_date, ymd(2025, 2, 28));
    }

    #[test]
    fn test_price_is_deterministic() {
        let fixture = Fixture::new();
        let request = PricingRequest::distance("Royal Orchid Plus", Cabin::Business, "BKK", "LHR", "2025-06-15")
            .with_airline("Thai Airways")
            .with_bonus_percent(dec!(15))
            .with_ratio(dec!(1.2))
            .with_passengers(3);

        let first = fixture.engine().price(&request).unwrap();
        let second = fixture.engine().price(&request).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_points_never_exceed_miles_with_bonus() {
        let fixture = Fixture::new();
        for percent in [0, 5, 10, 25, 50, 100] {
            let request = PricingRequest::distance("KrisFlyer", Cabin::Business, "BKK", "LHR", "2025-06-15")
                .with_bonus_percent(Decimal::from(percent));
            let result = fixture.engine().price(&request).unwrap();
            if percent == 0 {
                assert_eq!(result.points_per_person, result.miles_per_person);
            } else {
                assert!(result.points_per_person < result.miles_per_person);
            }
        }
    }

    // ==================== invalid input ====================

    fn expect_invalid(request: &PricingRequest) -> String {
        let fixture = Fixture::new();
        match fixture.engine().price(request) {
            Err(PricingError::InvalidInput(message)) => message,
            Ok(result) => panic!("expected InvalidInput, got {:?}", result),
        }
    }

    #[test]
    fn test_invalid_exchange_date() {
        let request = PricingRequest::manual("KrisFlyer", Cabin::Economy, "10000", "15/06/2025");
        assert!(expect_invalid(&request).contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_unknown_program() {
        let request = PricingRequest::manual("Miles&More", Cabin::Economy, "10000", "2025-06-15");
        assert!(expect_invalid(&request).contains("Miles&More"));
    }

    #[test]
    fn test_missing_program() {
        let request = PricingRequest::manual("  ", Cabin::Economy, "10000", "2025-06-15");
        assert!(expect_invalid(&request).contains("select a program"));
    }

    #[test]
    fn test_unknown_airport() {
        let request = PricingRequest::distance("Asia Miles", Cabin::Economy, "BKK", "XXX", "2025-06-15");
        assert!(expect_invalid(&request).contains("IATA"));

        // Unknown origin fails even when a business override would apply
        let request = PricingRequest::distance("Asia Miles", Cabin::Business, "ZZZ", "HND", "2025-06-15");
        assert!(expect_invalid(&request).contains("IATA"));
    }

    #[test]
    fn test_manual_miles_not_numeric() {
        let request = PricingRequest::manual("KrisFlyer", Cabin::Economy, "lots", "2025-06-15");
        assert!(expect_invalid(&request).contains("must be a number"));
    }

    #[test]
    fn test_manual_miles_empty() {
        let request = PricingRequest::manual("KrisFlyer", Cabin::Economy, "", "2025-06-15");
        assert!(expect_invalid(&request).contains("miles per person"));
    }

    #[test]
    fn test_zero_passengers() {
        let request =
            PricingRequest::manual("KrisFlyer", Cabin::Economy, "10000", "2025-06-15").with_passengers(0);
        assert!(expect_invalid(&request).contains("Passengers"));
    }

    #[test]
    fn test_huge_user_ratio_is_rejected() {
        let mut fixture = Fixture::new();
        fixture.programs.get_mut("KrisFlyer").unwrap().ratio_multiplier = dec!(1.10);
        let request = PricingRequest::manual("KrisFlyer", Cabin::Economy, "10000", "2025-06-15")
            .with_ratio(Decimal::MAX);

        match fixture.engine().price(&request) {
            Err(PricingError::InvalidInput(message)) => assert!(message.contains("Ratio")),
            Ok(result) => panic!("expected InvalidInput, got {:?}", result),
        }
    }

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::InvalidInput("Exchange date must be YYYY-MM-DD.".to_string());
        assert_eq!(err.to_string(), "Invalid input: Exchange date must be YYYY-MM-DD.");
    }
}
