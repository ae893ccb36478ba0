//! Provides structures and traits to define the decision making procedure of the solver.
//!
//! A [`Brancher`] produces the [`Decision`]s which drive the search; the branchers provided in
//! [`branchers`] are built from a [`VariableSelector`] and a [`ValueSelector`] (see
//! [`variable_selection`] and [`value_selection`] for the provided implementations).
//!
//! [`VariableSelector`]: variable_selection::VariableSelector
//! [`ValueSelector`]: value_selection::ValueSelector

mod brancher;
pub mod branchers;
mod selection_context;
pub mod tie_breaking;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::Brancher;
pub use selection_context::SelectionContext;
pub use tie_breaking::*;
pub use value_selection::*;
pub use variable_selection::*;

pub use crate::engine::search::Decision;
pub use crate::engine::search::DecisionOperator;
