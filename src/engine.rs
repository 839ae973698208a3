//! Rate engine of the age-structured pertussis model.
//!
//! One engine is constructed per simulation run and passed by reference into every rate call.
//! It owns the rate tables, which are read on the first call, together with the per-run caches:
//! age class memberships and sizes, and transition classifications. The outcome of the first
//! read is final: after a failed read every call returns the same configuration error.
//!
//! All callbacks share the signature `(net, marking, transition, time)`, where `time` is the
//! simulation time in days. It is expected to be non-decreasing within a run.

use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::config::{Settings, ZeroPopulationPolicy};
use crate::core::classifier::TransitionClassifier;
use crate::core::kinetics::mass_action;
use crate::core::net::Net;
use crate::core::tables::{DataTables, calendar_year};
use crate::errors::{RateError, Result, TableError};
use crate::stats::AgeClassRegistry;

pub struct RateEngine {
    settings: Settings,
    tables: OnceCell<std::result::Result<DataTables, Arc<TableError>>>,
    registry: AgeClassRegistry,
    classifier: TransitionClassifier,
}

impl RateEngine {
    /// Create an engine. Tables are read lazily from `settings.sources` on the first rate call.
    pub fn new(settings: Settings) -> std::result::Result<Self, TableError> {
        let registry = AgeClassRegistry::new(&settings.rules)?;
        let classifier = TransitionClassifier::new(&settings.rules)?;
        Ok(Self {
            settings,
            tables: OnceCell::new(),
            registry,
            classifier,
        })
    }

    /// Create an engine from tables that are already in memory.
    pub fn with_tables(
        settings: Settings,
        tables: DataTables,
    ) -> std::result::Result<Self, TableError> {
        let mut engine = Self::new(settings)?;
        engine.tables = OnceCell::with_value(Ok(tables));
        Ok(engine)
    }

    /// Load the rate tables if this has not been attempted yet.
    pub fn ensure_loaded(&self) -> Result<&DataTables> {
        let loaded = self.tables.get_or_init(|| {
            DataTables::load(&self.settings.sources).map_err(|err| {
                log::error!("Unable to load rate tables: {err}");
                Arc::new(err)
            })
        });
        match loaded {
            Ok(tables) => Ok(tables),
            Err(err) => Err(RateError::Config(Arc::clone(err))),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &AgeClassRegistry {
        &self.registry
    }

    pub fn classifier(&self) -> &TransitionClassifier {
        &self.classifier
    }

    /// Forget cached memberships, sizes and classifications. Loaded tables are kept.
    pub fn reset(&self) {
        self.registry.reset();
        self.classifier.reset();
    }

    /// Birth rate of the current year, scaled by the size of the whole population.
    pub fn born(&self, net: &Net, marking: &[f64], _transition: usize, time: f64) -> Result<f64> {
        let tables = self.ensure_loaded()?;
        let population = self.registry.total_population(net, marking, time)?;
        Ok(tables.birth_rate(calendar_year(time))? * population)
    }

    /// Death rate of the age class encoded in the transition name.
    pub fn death(&self, net: &Net, marking: &[f64], transition: usize, time: f64) -> Result<f64> {
        let tables = self.ensure_loaded()?;
        let name = net.transition_name(transition)?;
        let age_class = self
            .settings
            .rules
            .death_code(name)
            .ok_or_else(|| RateError::UnknownAgeClass(name.clone()))?;
        let intensity = mass_action(net.transition(transition)?, marking);
        Ok(tables.death_rate(age_class, calendar_year(time))? * intensity)
    }

    /// Force of infection of a contact between a susceptible and an infectant.
    ///
    /// The category adjusted contact rate is normalized by the population size of the
    /// infectant's age class.
    pub fn lambda(&self, net: &Net, marking: &[f64], transition: usize, time: f64) -> Result<f64> {
        let tables = self.ensure_loaded()?;
        let name = net.transition_name(transition)?;
        let classified = self.classifier.classify(name, tables)?;
        let intensity = mass_action(net.transition(transition)?, marking);
        let owner = self.classifier.owner(name)?;
        let population = self.registry.population_of(owner, net, marking, time)?;

        if population == 0. {
            match self.settings.zero_population {
                ZeroPopulationPolicy::Propagate => {
                    log::warn!("Age class {} is empty at time {time} ({name}).", owner + 1);
                }
                ZeroPopulationPolicy::Fail => return Err(RateError::EmptyAgeClass(owner)),
                ZeroPopulationPolicy::Zero => return Ok(0.),
            }
        }

        Ok(classified.rate * (intensity / population))
    }

    /// Vaccination rate of the current year before splitting into success and failure.
    pub fn vaccine_base(
        &self,
        net: &Net,
        marking: &[f64],
        transition: usize,
        time: f64,
    ) -> Result<f64> {
        let tables = self.ensure_loaded()?;
        let intensity = mass_action(net.transition(transition)?, marking);
        Ok(tables.vaccination_rate(calendar_year(time))? * intensity)
    }

    /// Rate of successful vaccinations.
    pub fn vaccine(&self, net: &Net, marking: &[f64], transition: usize, time: f64) -> Result<f64> {
        let p = self.ensure_loaded()?.probabilities().vaccine_failure;
        Ok((1. - p) * self.vaccine_base(net, marking, transition, time)?)
    }

    /// Rate of primary vaccine failures.
    pub fn vaccine_failure(
        &self,
        net: &Net,
        marking: &[f64],
        transition: usize,
        time: f64,
    ) -> Result<f64> {
        let p = self.ensure_loaded()?.probabilities().vaccine_failure;
        Ok(p * self.vaccine_base(net, marking, transition, time)?)
    }
}
