//! Settings store: programs, airports, destination groups and the default
//! origin, kept in a single JSON file.
//!
//! The file is read entirely into memory at startup and only written back
//! on an explicit save. A missing file is not an error; it is created with
//! the built-in demo content.

pub mod defaults;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::pricing::models::{AirportRegistry, DestinationGroups, Program};
use crate::pricing::PricingEngine;

/// Everything the settings file holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub programs: BTreeMap<String, Program>,
    pub airports: AirportRegistry,
    #[serde(default = "defaults::destination_groups")]
    pub destination_groups: DestinationGroups,
    #[serde(default = "default_origin")]
    pub origin: String,
}

fn default_origin() -> String {
    defaults::DEFAULT_ORIGIN.to_string()
}

/// One row of the program listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramSummary {
    pub name: String,
    pub validity_months: u32,
    pub ratio_multiplier: Decimal,
}

impl Settings {
    /// Pricing engine borrowing this configuration
    pub fn engine(&self) -> PricingEngine<'_> {
        PricingEngine::new(&self.programs, &self.airports, &self.destination_groups)
    }

    /// All programs sorted by name
    pub fn program_summaries(&self) -> Vec<ProgramSummary> {
        self.programs
            .iter()
            .map(|(name, program)| ProgramSummary {
                name: name.clone(),
                validity_months: program.validity_months,
                ratio_multiplier: program.ratio_multiplier,
            })
            .collect()
    }

    /// Update a program's validity period and default ratio.
    ///
    /// Both values must be positive. Nothing is changed on error.
    pub fn update_program(
        &mut self,
        name: &str,
        validity_months: u32,
        ratio_multiplier: Decimal,
    ) -> Result<()> {
        if validity_months == 0 {
            return Err(AppError::InvalidSetting(
                "Validity must be a positive number of months.".to_string(),
            ));
        }
        if ratio_multiplier <= Decimal::ZERO {
            return Err(AppError::InvalidSetting(
                "Ratio must be a positive number.".to_string(),
            ));
        }
        let program = self
            .programs
            .get_mut(name)
            .ok_or_else(|| AppError::UnknownProgram(name.to_string()))?;

        program.validity_months = validity_months;
        program.ratio_multiplier = ratio_multiplier;
        info!(
            "Updated {}: validity {} months, ratio {}",
            name, validity_months, ratio_multiplier
        );
        Ok(())
    }

    /// Parse a settings document.
    ///
    /// A program saved without a `business_overrides` key picks up the
    /// built-in fixed prices for the same program name. An explicit empty
    /// table is kept as it is.
    pub fn from_json(raw: &str) -> Result<Settings> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let missing: Vec<String> = value
            .get("programs")
            .and_then(|programs| programs.as_object())
            .map(|programs| {
                programs
                    .iter()
                    .filter(|(_, program)| program.get("business_overrides").is_none())
                    .map(|(name, _)| name.clone())
                    .collect()
            })
            .unwrap_or_default();

        let mut settings: Settings = serde_json::from_value(value)?;
        settings.fill_builtin_overrides(&missing);
        Ok(settings)
    }

    /// Copy built-in overrides into the named programs, skipping labels the
    /// file's destination groups do not define
    fn fill_builtin_overrides(&mut self, names: &[String]) {
        let builtin = defaults::programs();
        for name in names {
            let (Some(program), Some(known)) = (self.programs.get_mut(name), builtin.get(name))
            else {
                continue;
            };
            program.business_overrides = known
                .business_overrides
                .iter()
                .filter(|(label, _)| self.destination_groups.contains_label(label))
                .map(|(label, miles)| (label.clone(), *miles))
                .collect();
            debug!(
                "{}: no business_overrides in file, using {} built-in",
                name,
                program.business_overrides.len()
            );
        }
    }

    /// Check the invariants the pricing engine relies on
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(AppError::InvalidConfiguration(message));

        for (name, program) in &self.programs {
            if let Err(message) = program.validate_charts() {
                return invalid(format!("program '{}': {}", name, message));
            }
            if program.validity_months == 0 {
                return invalid(format!("program '{}': validity_months must be > 0", name));
            }
            if program.ratio_multiplier <= Decimal::ZERO {
                return invalid(format!("program '{}': ratio_multiplier must be > 0", name));
            }
            for label in program.business_overrides.keys() {
                if !self.destination_groups.contains_label(label) {
                    return invalid(format!(
                        "program '{}': override for unknown destination group '{}'",
                        name, label
                    ));
                }
            }
        }

        if let Some((code, first, second)) =
            self.destination_groups.duplicate_memberships().into_iter().next()
        {
            return invalid(format!(
                "airport {} is in both destination groups '{}' and '{}'",
                code, first, second
            ));
        }

        if !self.airports.contains_key(&self.origin) {
            return invalid(format!("default origin {} is not a known airport", self.origin));
        }

        Ok(())
    }
}

/// Settings file on disk
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the settings, writing the demo content first if the file does
    /// not exist yet.
    pub fn load_or_init(&self) -> Result<Settings> {
        if !self.path.exists() {
            let settings = defaults::settings();
            self.save(&settings)?;
            info!("Created default settings at {}", self.path.display());
            return Ok(settings);
        }
        self.load()
    }

    /// Load and validate an existing settings file
    pub fn load(&self) -> Result<Settings> {
        let raw = fs::read_to_string(&self.path).map_err(|e| AppError::io(&self.path, e))?;
        let settings = Settings::from_json(&raw)?;
        settings.validate()?;
        debug!(
            "Loaded {} programs and {} airports from {}",
            settings.programs.len(),
            settings.airports.len(),
            self.path.display()
        );
        Ok(settings)
    }

    /// Write the whole configuration, replacing the file atomically
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let json = serde_json::to_string_pretty(settings)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(|e| AppError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| AppError::io(&self.path, e))?;

        info!("Settings saved to {}", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "settings.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
