//! Configuration data structures for rate engine setups.

mod rules;
mod settings;

pub use rules::{Category, CategoryRule, NamingRules};
pub(crate) use rules::compile_pattern;
pub use settings::{Settings, TableSources, ZeroPopulationPolicy};
