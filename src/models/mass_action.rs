use crate::callbacks::RateFunction;
use crate::core::kinetics::mass_action;
use crate::core::net::Net;
use crate::errors::Result;

/// Plain mass-action rate with a constant rate factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassAction {
    pub rate: f64,
}

impl Default for MassAction {
    fn default() -> Self {
        Self { rate: 1. }
    }
}

impl RateFunction for MassAction {
    fn rate(&self, net: &Net, marking: &[f64], transition: usize, _time: f64) -> Result<f64> {
        Ok(self.rate * mass_action(net.transition(transition)?, marking))
    }
}
