//! Award pricing engine.
//!
//! Turns a program's distance charts and fixed business-class prices into
//! miles and points requirements for a redemption. Everything here is pure:
//! reference data is borrowed, never mutated, and no I/O happens.

pub mod calculators;
pub mod calendar;
pub mod geo;
pub mod models;
pub mod requests;
pub mod responses;
pub mod services;

// Re-export commonly used items
pub use models::{Cabin, Chart, Program};
pub use requests::{PriceSource, PricingRequest};
pub use responses::{PricingResult, PricingRule};
pub use services::{PricingEngine, PricingError};
