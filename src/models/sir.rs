use crate::callbacks::RateFunction;
use crate::core::kinetics::mass_action;
use crate::core::net::Net;
use crate::errors::{Result, TableError};
use crate::readwrite::read_column;

const DEFAULT_INFECTION_RATE: f64 = 1.428;

/// Infection rate of an SIR model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SirInfection {
    pub infection_rate: f64,
}

impl Default for SirInfection {
    fn default() -> Self {
        Self {
            infection_rate: DEFAULT_INFECTION_RATE,
        }
    }
}

impl SirInfection {
    /// Read the infection rate from the first line of `path`. An empty file keeps the default.
    pub fn load(path: &str) -> std::result::Result<Self, TableError> {
        let infection_rate = read_column(path)?
            .first()
            .copied()
            .unwrap_or(DEFAULT_INFECTION_RATE);
        log::info!("Infection rate: {infection_rate}");
        Ok(Self { infection_rate })
    }
}

impl RateFunction for SirInfection {
    fn rate(&self, net: &Net, marking: &[f64], transition: usize, _time: f64) -> Result<f64> {
        Ok(self.infection_rate * mass_action(net.transition(transition)?, marking))
    }
}
