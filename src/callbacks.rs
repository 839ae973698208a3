//! Callback contract shared by all rate functions.
//!
//! The host binds transitions to rate functions by name. Every rate function receives the net,
//! the current marking, the index of the transition being evaluated and the simulation time.

use phf::phf_map;

use crate::core::net::Net;
use crate::engine::RateEngine;
use crate::errors::Result;

pub trait RateFunction {
    /// Instantaneous firing rate of `transition`.
    fn rate(&self, net: &Net, marking: &[f64], transition: usize, time: f64) -> Result<f64>;
}

/// Rate functions of the age-structured pertussis model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PertussisRate {
    Born,
    Death,
    Lambda,
    Vaccine,
    VaccineFailure,
}

pub static RATE_FUNCTIONS: phf::Map<&'static str, PertussisRate> = phf_map! {
    "Born" => PertussisRate::Born,
    "Death" => PertussisRate::Death,
    "lambda" => PertussisRate::Lambda,
    "vaccine" => PertussisRate::Vaccine,
    "vaccine_failure" => PertussisRate::VaccineFailure,
};

impl PertussisRate {
    pub fn from_name(name: &str) -> Option<Self> {
        RATE_FUNCTIONS.get(name).copied()
    }
}

/// A pertussis rate function bound to the engine of a run.
#[derive(Clone, Copy)]
pub struct Callback<'a> {
    engine: &'a RateEngine,
    kind: PertussisRate,
}

impl RateEngine {
    pub fn callback(&self, kind: PertussisRate) -> Callback<'_> {
        Callback { engine: self, kind }
    }

    /// Bind a rate function by the name used in the net description.
    pub fn callback_by_name(&self, name: &str) -> Option<Callback<'_>> {
        PertussisRate::from_name(name).map(|kind| self.callback(kind))
    }
}

impl RateFunction for Callback<'_> {
    fn rate(&self, net: &Net, marking: &[f64], transition: usize, time: f64) -> Result<f64> {
        let engine = self.engine;
        match self.kind {
            PertussisRate::Born => engine.born(net, marking, transition, time),
            PertussisRate::Death => engine.death(net, marking, transition, time),
            PertussisRate::Lambda => engine.lambda(net, marking, transition, time),
            PertussisRate::Vaccine => engine.vaccine(net, marking, transition, time),
            PertussisRate::VaccineFailure => engine.vaccine_failure(net, marking, transition, time),
        }
    }
}
