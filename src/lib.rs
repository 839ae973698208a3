//! Transition rate callbacks for marking-based epidemic simulations.
//!
//! A host simulator evaluates, for every transition of its net and at every step, a rate function
//! on the current marking. This crate provides these functions for an age-structured pertussis
//! model, driven by empirical birth, death, vaccination and contact tables, as well as for a few
//! simpler example models.

pub mod callbacks;
pub mod config;
pub mod core;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod models;
pub mod readwrite;
pub mod stats;

pub use callbacks::{PertussisRate, RateFunction};
pub use engine::RateEngine;
pub use errors::{RateError, TableError};
