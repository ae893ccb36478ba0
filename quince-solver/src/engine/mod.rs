mod constraint_satisfaction_solver;
pub(crate) mod cp;
mod debug_helper;
pub(crate) mod search;
pub mod termination;
pub mod variables;

pub use constraint_satisfaction_solver::ConstraintSatisfactionSolver;
pub use constraint_satisfaction_solver::SatisfactionSolverOptions;
pub(crate) use debug_helper::DebugDyn;
pub(crate) use debug_helper::DebugHelper;
