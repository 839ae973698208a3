//! Stand-alone rate functions of simpler example models.
//!
//! They follow the same callback contract as the pertussis engine, but only need a handful of
//! constants that are read once when the model is constructed.

mod lotka_volterra;
mod mass_action;
mod sir;

pub use lotka_volterra::{BirthPredator, DeathPrey, PredatorPreyParameters};
pub use mass_action::MassAction;
pub use sir::SirInfection;
