//! Reference data models for award pricing.
//!
//! These are loaded once from the settings file and are read-only while a
//! quote is being calculated.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A point on the globe, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Airport from the registry, keyed by IATA code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub iata: String,
    pub city: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl Airport {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

/// Airport registry (IATA -> Airport)
pub type AirportRegistry = BTreeMap<String, Airport>;

/// Cabin class of the redemption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cabin {
    Economy,
    Business,
}

impl fmt::Display for Cabin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cabin::Economy => write!(f, "Economy"),
            Cabin::Business => write!(f, "Business"),
        }
    }
}

impl FromStr for Cabin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "economy" => Ok(Cabin::Economy),
            "business" => Ok(Cabin::Business),
            other => Err(format!("unknown cabin '{}' (expected Economy or Business)", other)),
        }
    }
}

/// One row of a distance chart.
///
/// `max_distance` is an inclusive upper bound in statute miles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    #[serde(rename = "max")]
    pub max_distance: f64,
    #[serde(rename = "Y")]
    pub economy: u64,
    #[serde(rename = "J")]
    pub business: u64,
}

impl RateBand {
    pub fn new(max_distance: f64, economy: u64, business: u64) -> Self {
        Self {
            max_distance,
            economy,
            business,
        }
    }

    /// Price of this band for the given cabin
    pub fn price_for(&self, cabin: Cabin) -> u64 {
        match cabin {
            Cabin::Economy => self.economy,
            Cabin::Business => self.business,
        }
    }
}

/// Which of a program's two charts priced a flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Chart {
    /// Flight operated by the program's home airline
    Own,
    Partner,
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chart::Own => write!(f, "own"),
            Chart::Partner => write!(f, "partner"),
        }
    }
}

fn default_validity_months() -> u32 {
    36
}

fn default_ratio_multiplier() -> Decimal {
    dec!(1.00)
}

/// A loyalty program: its two distance charts, metadata and fixed
/// business-class prices per destination group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub own: Vec<RateBand>,
    pub partner: Vec<RateBand>,
    #[serde(rename = "homeAirline", default)]
    pub home_airline: String,
    #[serde(default = "default_validity_months")]
    pub validity_months: u32,
    #[serde(
        default = "default_ratio_multiplier",
        with = "rust_decimal::serde::float"
    )]
    pub ratio_multiplier: Decimal,
    /// Destination group label -> business-class miles
    #[serde(default)]
    pub business_overrides: BTreeMap<String, u64>,
}

impl Program {
    /// Whether `airline` is this program's home airline.
    ///
    /// Plain case-insensitive comparison of the free-text name; "Thai" does
    /// not match "Thai Airways".
    pub fn is_home_airline(&self, airline: &str) -> bool {
        airline.trim().to_lowercase() == self.home_airline.trim().to_lowercase()
    }

    /// Chart that applies to a flight operated by `airline`
    pub fn chart_for(&self, airline: &str) -> (Chart, &[RateBand]) {
        if self.is_home_airline(airline) {
            (Chart::Own, self.own.as_slice())
        } else {
            (Chart::Partner, self.partner.as_slice())
        }
    }

    /// Check the chart invariants: non-empty and strictly ascending.
    pub fn validate_charts(&self) -> Result<(), String> {
        for (label, bands) in [("own", &self.own), ("partner", &self.partner)] {
            if bands.is_empty() {
                return Err(format!("{} chart has no bands", label));
            }
            for pair in bands.windows(2) {
                if pair[1].max_distance <= pair[0].max_distance {
                    return Err(format!(
                        "{} chart bands must ascend (found {} after {})",
                        label, pair[1].max_distance, pair[0].max_distance
                    ));
                }
            }
        }
        Ok(())
    }
}

/// A named set of airports sharing a fixed business-class price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationGroup {
    pub label: String,
    pub airports: Vec<String>,
}

/// Destination groups in declaration order.
///
/// Lookup returns the first group containing an airport. The settings
/// loader rejects files where an airport is listed in two groups, so in
/// practice the match is unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationGroups(Vec<DestinationGroup>);

impl DestinationGroups {
    pub fn new(groups: Vec<DestinationGroup>) -> Self {
        Self(groups)
    }

    /// Label of the first group containing `iata`
    pub fn resolve_group(&self, iata: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|group| group.airports.iter().any(|code| code == iata))
            .map(|group| group.label.as_str())
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.0.iter().any(|group| group.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DestinationGroup> {
        self.0.iter()
    }

    /// Airports listed in more than one group, with the two labels involved
    pub fn duplicate_memberships(&self) -> Vec<(String, String, String)> {
        let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
        let mut duplicates = Vec::new();
        for group in &self.0 {
            for code in &group.airports {
                match seen.get(code.as_str()) {
                    Some(first) if *first != group.label.as_str() => {
                        duplicates.push((code.clone(), first.to_string(), group.label.clone()));
                    }
                    Some(_) => {}
                    None => {
                        seen.insert(code.as_str(), group.label.as_str());
                    }
                }
            }
        }
        duplicates
    }
}

/// Fixed business-class price for `program` flying to `iata`, if any
pub fn override_price(program: &Program, groups: &DestinationGroups, iata: &str) -> Option<u64> {
    let label = groups.resolve_group(iata)?;
    program.business_overrides.get(label).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> DestinationGroups {
        DestinationGroups::new(vec![
            DestinationGroup {
                label: "SHANGHAI".to_string(),
                airports: vec!["PVG".to_string(), "SHA".to_string()],
            },
            DestinationGroup {
                label: "KOREA".to_string(),
                airports: vec!["ICN".to_string(), "GMP".to_string()],
            },
        ])
    }

    fn program() -> Program {
        Program {
            own: vec![RateBand::new(1e12, 10000, 20000)],
            partner: vec![RateBand::new(1e12, 12000, 24000)],
            home_airline: "Cathay Pacific".to_string(),
            validity_months: 36,
            ratio_multiplier: dec!(1.00),
            business_overrides: BTreeMap::from([("SHANGHAI".to_string(), 28000)]),
        }
    }

    #[test]
    fn test_resolve_group() {
        let groups = groups();
        assert_eq!(groups.resolve_group("SHA"), Some("SHANGHAI"));
        assert_eq!(groups.resolve_group("GMP"), Some("KOREA"));
        assert_eq!(groups.resolve_group("LHR"), None);
    }

    #[test]
    fn test_resolve_group_first_declared_wins() {
        let mut list = groups().0;
        list.push(DestinationGroup {
            label: "EAST CHINA".to_string(),
            airports: vec!["PVG".to_string()],
        });
        let groups = DestinationGroups::new(list);
        assert_eq!(groups.resolve_group("PVG"), Some("SHANGHAI"));
        assert_eq!(
            groups.duplicate_memberships(),
            vec![("PVG".to_string(), "SHANGHAI".to_string(), "EAST CHINA".to_string())]
        );
    }

    #[test]
    fn test_override_price() {
        let groups = groups();
        let program = program();
        assert_eq!(override_price(&program, &groups, "PVG"), Some(28000));
        // Group exists but program has no entry for it
        assert_eq!(override_price(&program, &groups, "ICN"), None);
        // Airport in no group
        assert_eq!(override_price(&program, &groups, "LHR"), None);
    }

    #[test]
    fn test_home_airline_is_case_insensitive_exact() {
        let program = program();
        assert!(program.is_home_airline("cathay pacific"));
        assert!(program.is_home_airline("  CATHAY PACIFIC "));
        assert!(!program.is_home_airline("Cathay"));
        assert_eq!(program.chart_for("Thai Airways").0, Chart::Partner);
        assert_eq!(program.chart_for("Cathay Pacific").0, Chart::Own);
    }

    #[test]
    fn test_validate_charts() {
        let mut program = program();
        assert!(program.validate_charts().is_ok());

        program.own = vec![RateBand::new(2750.0, 1, 2), RateBand::new(750.0, 3, 4)];
        assert!(program.validate_charts().unwrap_err().contains("ascend"));

        program.own = vec![];
        assert!(program.validate_charts().unwrap_err().contains("no bands"));
    }

    #[test]
    fn test_cabin_parse() {
        assert_eq!("Economy".parse::<Cabin>(), Ok(Cabin::Economy));
        assert_eq!("business".parse::<Cabin>(), Ok(Cabin::Business));
        assert!("First".parse::<Cabin>().is_err());
        assert!("Y".parse::<Cabin>().is_err());
        assert!("j".parse::<Cabin>().is_err());
    }

    #[test]
    fn test_band_json_keys() {
        let band: RateBand = serde_json::from_str(r#"{"max": 1e12, "Y": 42000, "J": 90000}"#).unwrap();
        assert_eq!(band, RateBand::new(1e12, 42000, 90000));
    }
}
