//! Provides several implementations of [`Brancher`]s.

pub mod independent_variable_value_brancher;

pub use independent_variable_value_brancher::IndependentVariableValueBrancher;

#[cfg(doc)]
use super::Brancher;
