//! Predator-prey model with a Holling type II functional response.

use crate::callbacks::RateFunction;
use crate::core::net::Net;
use crate::errors::{Result, TableError};
use crate::readwrite::read_constants;

const PREY: &str = "Prey";
const PREDATOR: &str = "Predator";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PredatorPreyParameters {
    /// Attack rate.
    pub a: f64,
    /// Handling time.
    pub h: f64,
    /// Conversion efficiency of consumed prey into predators.
    pub eps: f64,
}

impl PredatorPreyParameters {
    /// Read the three lines `a`, `h` and `eps` from `path`.
    pub fn read(path: &str) -> std::result::Result<Self, TableError> {
        let values = read_constants(path, 3)?;
        let parameters = Self {
            a: values[0],
            h: values[1],
            eps: values[2],
        };
        log::info!("Loaded {parameters:?} from {path}");
        Ok(parameters)
    }

    /// Prey consumed per predator and unit of time.
    fn functional_response(&self, prey: f64) -> f64 {
        self.a * prey / (1. + self.a * self.h * prey)
    }

    fn populations(net: &Net, marking: &[f64]) -> Result<(f64, f64)> {
        Ok((marking[net.place(PREY)?], marking[net.place(PREDATOR)?]))
    }
}

/// Birth of predators from consumed prey.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BirthPredator {
    pub parameters: PredatorPreyParameters,
}

impl BirthPredator {
    pub fn load(path: &str) -> std::result::Result<Self, TableError> {
        Ok(Self {
            parameters: PredatorPreyParameters::read(path)?,
        })
    }
}

impl RateFunction for BirthPredator {
    fn rate(&self, net: &Net, marking: &[f64], _transition: usize, _time: f64) -> Result<f64> {
        let (prey, predator) = PredatorPreyParameters::populations(net, marking)?;
        let p = &self.parameters;
        Ok(p.eps * p.functional_response(prey) * predator)
    }
}

/// Death of prey by predation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeathPrey {
    pub parameters: PredatorPreyParameters,
}

impl DeathPrey {
    pub fn load(path: &str) -> std::result::Result<Self, TableError> {
        Ok(Self {
            parameters: PredatorPreyParameters::read(path)?,
        })
    }
}

impl RateFunction for DeathPrey {
    fn rate(&self, net: &Net, marking: &[f64], _transition: usize, _time: f64) -> Result<f64> {
        let (prey, predator) = PredatorPreyParameters::populations(net, marking)?;
        Ok(self.parameters.functional_response(prey) * predator)
    }
}
