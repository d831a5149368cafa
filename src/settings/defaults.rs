//! Built-in demo content written on first run.
//!
//! Charts are sample data; replace them with real award charts as needed.

use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use crate::pricing::models::{
    Airport, AirportRegistry, DestinationGroup, DestinationGroups, Program, RateBand,
};

use super::Settings;

/// Upper bound of the last band in every chart
pub const UNBOUNDED_MILES: f64 = 1e12;

pub const DEFAULT_ORIGIN: &str = "BKK";

pub fn settings() -> Settings {
    Settings {
        programs: programs(),
        airports: airports(),
        destination_groups: destination_groups(),
        origin: DEFAULT_ORIGIN.to_string(),
    }
}

fn chart(rows: [(f64, u64, u64); 5]) -> Vec<RateBand> {
    rows.iter()
        .map(|&(max, economy, business)| RateBand::new(max, economy, business))
        .collect()
}

fn program(
    own: [(f64, u64, u64); 5],
    partner: [(f64, u64, u64); 5],
    home_airline: &str,
    overrides: &[(&str, u64)],
) -> Program {
    Program {
        own: chart(own),
        partner: chart(partner),
        home_airline: home_airline.to_string(),
        validity_months: 36,
        ratio_multiplier: dec!(1.00),
        business_overrides: overrides
            .iter()
            .map(|(label, miles)| (label.to_string(), *miles))
            .collect(),
    }
}

pub fn programs() -> BTreeMap<String, Program> {
    let mut programs = BTreeMap::new();

    programs.insert(
        "Asia Miles".to_string(),
        program(
            [
                (750.0, 7500, 16000),
                (2750.0, 12000, 30000),
                (5000.0, 20000, 50000),
                (7500.0, 30000, 70000),
                (UNBOUNDED_MILES, 42000, 90000),
            ],
            [
                (750.0, 9000, 20000),
                (2750.0, 16000, 36000),
                (5000.0, 26000, 60000),
                (7500.0, 36000, 80000),
                (UNBOUNDED_MILES, 52000, 100000),
            ],
            "Cathay Pacific",
            &[
                ("SHANGHAI", 28000),
                ("BEIJING", 28000),
                ("KIX FUK NGO", 32000),
                ("HND NRT CTS", 58000),
                ("KOREA", 28000),
            ],
        ),
    );

    programs.insert(
        "KrisFlyer".to_string(),
        program(
            [
                (750.0, 8500, 17000),
                (2750.0, 14000, 34000),
                (5000.0, 22000, 52000),
                (7500.0, 32000, 76000),
                (UNBOUNDED_MILES, 50000, 98000),
            ],
            [
                (750.0, 10000, 22000),
                (2750.0, 18000, 38000),
                (5000.0, 28000, 64000),
                (7500.0, 38000, 88000),
                (UNBOUNDED_MILES, 56000, 110000),
            ],
            "Singapore Airlines",
            &[
                ("SHANGHAI", 43000),
                ("BEIJING", 43000),
                ("KIX FUK NGO", 52000),
                ("HND NRT CTS", 52000),
                ("KOREA", 52000),
            ],
        ),
    );

    programs.insert(
        "Qatar Privilege Club".to_string(),
        program(
            [
                (750.0, 9000, 18000),
                (2750.0, 14000, 32000),
                (5000.0, 22000, 52000),
                (7500.0, 32000, 72000),
                (UNBOUNDED_MILES, 46000, 92000),
            ],
            [
                (750.0, 10000, 20000),
                (2750.0, 16000, 36000),
                (5000.0, 26000, 60000),
                (7500.0, 34000, 82000),
                (UNBOUNDED_MILES, 50000, 102000),
            ],
            "Qatar Airways",
            &[],
        ),
    );

    programs.insert(
        "Royal Orchid Plus".to_string(),
        program(
            [
                (750.0, 10000, 20000),
                (2750.0, 16000, 38000),
                (5000.0, 26000, 64000),
                (7500.0, 36000, 90000),
                (UNBOUNDED_MILES, 52000, 120000),
            ],
            [
                (750.0, 11000, 22000),
                (2750.0, 18000, 42000),
                (5000.0, 30000, 70000),
                (7500.0, 42000, 100000),
                (UNBOUNDED_MILES, 58000, 130000),
            ],
            "Thai Airways",
            &[
                ("SHANGHAI", 30000),
                ("BEIJING", 47500),
                ("KIX FUK NGO", 47500),
                ("HND NRT CTS", 47500),
                ("KOREA", 47500),
            ],
        ),
    );

    programs
}

pub fn destination_groups() -> DestinationGroups {
    let group = |label: &str, airports: &[&str]| DestinationGroup {
        label: label.to_string(),
        airports: airports.iter().map(|code| code.to_string()).collect(),
    };
    DestinationGroups::new(vec![
        group("SHANGHAI", &["PVG", "SHA"]),
        group("BEIJING", &["PEK", "PKX"]),
        group("KIX FUK NGO", &["KIX", "FUK", "NGO"]),
        group("HND NRT CTS", &["HND", "NRT", "CTS"]),
        group("KOREA", &["ICN", "GMP"]),
    ])
}

pub fn airports() -> AirportRegistry {
    [
        ("BKK", "Bangkok", "Thailand", 13.690, 100.750),
        ("HND", "Tokyo (Haneda)", "Japan", 35.5494, 139.7798),
        ("NRT", "Tokyo (Narita)", "Japan", 35.7647, 140.3864),
        ("KIX", "Osaka", "Japan", 34.4273, 135.2440),
        ("ICN", "Seoul", "South Korea", 37.4602, 126.4407),
        ("HKG", "Hong Kong", "Hong Kong", 22.3080, 113.9185),
        ("SIN", "Singapore", "Singapore", 1.3644, 103.9915),
        ("DOH", "Doha", "Qatar", 25.2731, 51.6081),
        ("HEL", "Helsinki", "Finland", 60.3172, 24.9633),
        ("LHR", "London", "United Kingdom", 51.4700, -0.4543),
        ("CDG", "Paris", "France", 49.0097, 2.5479),
        ("FRA", "Frankfurt", "Germany", 50.0379, 8.5622),
        ("SYD", "Sydney", "Australia", -33.9399, 151.1753),
        ("MEL", "Melbourne", "Australia", -37.6690, 144.8410),
        ("TPE", "Taipei", "Taiwan", 25.0797, 121.2340),
        ("DEL", "Delhi", "India", 28.5562, 77.1000),
        ("JNB", "Johannesburg", "South Africa", -26.1392, 28.2460),
        ("IST", "Istanbul", "Türkiye", 41.2753, 28.7519),
        ("LAX", "Los Angeles", "United States", 33.9416, -118.4085),
        ("PVG", "Shanghai (Pudong)", "China", 31.1434, 121.8052),
        ("SHA", "Shanghai (Hongqiao)", "China", 31.1979, 121.3363),
        ("PEK", "Beijing (Capital)", "China", 40.0799, 116.6031),
        ("PKX", "Beijing (Daxing)", "China", 39.5099, 116.4108),
        ("FUK", "Fukuoka", "Japan", 33.5859, 130.4500),
        ("NGO", "Nagoya (Chubu)", "Japan", 34.8584, 136.8054),
        ("CTS", "Sapporo (Chitose)", "Japan", 42.7752, 141.6923),
        ("GMP", "Seoul (Gimpo)", "South Korea", 37.5583, 126.7906),
    ]
    .into_iter()
    .map(|(iata, city, country, lat, lon)| {
        (
            iata.to_string(),
            Airport {
                iata: iata.to_string(),
                city: city.to_string(),
                country: country.to_string(),
                lat,
                lon,
            },
        )
    })
    .collect()
}
