pub(crate) mod sequence_generators;

mod constraint_operation_error;
mod csp_solver_execution_flag;
mod propagation_status_cp;
mod random;
mod solution;
mod stopwatch;
pub(crate) mod trail;

pub use constraint_operation_error::ConstraintOperationError;
pub use csp_solver_execution_flag::CSPSolverExecutionFlag;
pub(crate) use propagation_status_cp::Inconsistency;
pub(crate) use propagation_status_cp::PropagationStatusCP;
pub use random::Random;
#[cfg(test)]
pub(crate) use random::tests;
pub use solution::ProblemSolution;
pub use solution::Solution;
pub use solution::SolutionReference;
pub(crate) use stopwatch::Stopwatch;
pub(crate) use trail::Trail;
