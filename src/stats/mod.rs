//! Population statistics shared by the rate functions

pub mod age_classes;

pub use age_classes::AgeClassRegistry;
