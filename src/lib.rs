//! Frequent-flyer award calculator.
//!
//! Computes the miles and transferable points needed for an award ticket
//! from a program's distance charts, fixed business-class prices, a future
//! devaluation ratio, transfer bonus and passenger count, and keeps the
//! per-program configuration in a local JSON settings file.
//!
//! ```no_run
//! use mileage_calc::pricing::{Cabin, PricingRequest};
//! use mileage_calc::settings::SettingsStore;
//!
//! let settings = SettingsStore::new("settings.json").load_or_init()?;
//! let request = PricingRequest::distance("Asia Miles", Cabin::Business, "BKK", "HND", "2025-06-15")
//!     .with_passengers(2);
//! let result = settings.engine().price(&request)?;
//! println!("{}", result);
//! # Ok::<(), mileage_calc::error::AppError>(())
//! ```

pub mod error;
pub mod pricing;
pub mod settings;

pub use error::{AppError, Result};
