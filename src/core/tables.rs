//! Empirical rate tables of the age-structured model.
//!
//! All tables are read once per run and are immutable afterwards. Time-varying rates are indexed
//! by calendar year, which is the number of whole 365-day years since the start of the simulation.

use derive_more::{Deref, From};
use regex::Regex;
use std::collections::HashMap;

use crate::config::{Category, TableSources, compile_pattern};
use crate::errors::{RateError, Result, TableError};
use crate::readwrite::TableIO;

pub const DAYS_PER_YEAR: usize = 365;

/// Calendar year bucket of a simulation time given in days.
#[inline]
pub fn calendar_year(time: f64) -> usize {
    time.trunc() as usize / DAYS_PER_YEAR
}

/// Rates indexed by calendar year.
#[derive(Clone, Debug, Default, PartialEq, Deref, From)]
pub struct YearlyTable(Vec<f64>);

impl YearlyTable {
    pub fn get(&self, year: usize) -> Option<f64> {
        self.0.get(year).copied()
    }
}

/// Death rates, one yearly table per age class code.
#[derive(Clone, Debug, Default, PartialEq, Deref, From)]
pub struct DeathTable(HashMap<String, YearlyTable>);

/// Base contact rate associated with a transition name pattern.
#[derive(Clone, Debug)]
pub struct ContactRate {
    pub key: String,
    pattern: Regex,
    pub rate: f64,
}

impl ContactRate {
    pub fn new(key: String, rate: f64) -> std::result::Result<Self, TableError> {
        Ok(Self {
            pattern: compile_pattern(&key)?,
            key,
            rate,
        })
    }

    /// Whether the key is found in a transition name.
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}

impl PartialEq for ContactRate {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.rate == other.rate
    }
}

/// Contact rates in first-match priority order.
#[derive(Clone, Debug, Default, PartialEq, Deref, From)]
pub struct ContactPattern(Vec<ContactRate>);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Probabilities {
    pub boost: f64,
    pub primary: f64,
    pub secondary: f64,
    pub vaccine_failure: f64,
}

impl Probabilities {
    pub fn of(&self, category: Category) -> f64 {
        match category {
            Category::Boost => self.boost,
            Category::PrimaryInfection => self.primary,
            Category::SecondaryInfection => self.secondary,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DataTables {
    birth: YearlyTable,
    vaccination: YearlyTable,
    death: DeathTable,
    contacts: ContactPattern,
    probabilities: Probabilities,
}

impl DataTables {
    pub fn new(
        birth: YearlyTable,
        vaccination: YearlyTable,
        death: DeathTable,
        contacts: ContactPattern,
        probabilities: Probabilities,
    ) -> Self {
        Self {
            birth,
            vaccination,
            death,
            contacts,
            probabilities,
        }
    }

    /// Read all tables. Fails on the first missing or malformed source.
    pub fn load(sources: &TableSources) -> std::result::Result<Self, TableError> {
        log::info!("Loading rate tables...");
        let tables = Self::new(
            YearlyTable::read(&sources.birth_rates)?,
            YearlyTable::read(&sources.vaccination_rates)?,
            DeathTable::read(&sources.death_rates)?,
            ContactPattern::read(&sources.contact_rates)?,
            Probabilities::read(&sources.probabilities)?,
        );
        log::info!(
            "Loaded {} birth rates, {} vaccination rates, {} death tables and {} contact rates.",
            tables.birth.len(),
            tables.vaccination.len(),
            tables.death.len(),
            tables.contacts.len()
        );
        Ok(tables)
    }

    pub fn birth_rate(&self, year: usize) -> Result<f64> {
        self.birth.get(year).ok_or(RateError::UnknownYearRate {
            table: "birth",
            year,
        })
    }

    pub fn vaccination_rate(&self, year: usize) -> Result<f64> {
        self.vaccination.get(year).ok_or(RateError::UnknownYearRate {
            table: "vaccination",
            year,
        })
    }

    /// Death rate of an age class, given by its code (`a1`, `a2`, ...).
    pub fn death_rate(&self, age_class: &str, year: usize) -> Result<f64> {
        self.death
            .get(age_class)
            .ok_or_else(|| RateError::UnknownAgeClass(age_class.to_string()))?
            .get(year)
            .ok_or(RateError::UnknownYearRate {
                table: "death",
                year,
            })
    }

    pub fn contacts(&self) -> &ContactPattern {
        &self.contacts
    }

    pub fn probabilities(&self) -> &Probabilities {
        &self.probabilities
    }
}
