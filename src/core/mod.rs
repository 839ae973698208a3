//! This module contains the core datatypes of the library.

mod cache;

pub mod classifier;
pub mod kinetics;
pub mod net;
pub mod tables;

/// Number of age classes the population is partitioned into.
pub const N_AGE_CLASSES: usize = 3;

pub use classifier::{ClassifiedTransition, TransitionClassifier};
pub use kinetics::mass_action;
pub use net::{InputArc, Net, TransitionRecord};
pub use tables::{DataTables, Probabilities, YearlyTable, calendar_year};
