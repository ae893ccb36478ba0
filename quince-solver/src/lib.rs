//! # Quince
//! Quince is a constraint satisfaction solver core built on trailed state restoration. It
//! performs a depth-first search which propagates the posted constraints to fixpoint at every
//! node; the domains of the variables and the incremental state of the propagators are recorded
//! on trails so that backtracking restores them in constant time per change.
//!
//! A distinguishing feature of the solver is that the search is driven by a resumable state
//! machine: when a solution is found the solver *parks* on it, and the search for the next
//! solution continues from that exact point without blocking clauses and without redoing any
//! work.
//!
//! The solver currently supports integer variables and the following constraints:
//! * Linear inequalities and disequalities: [`Solver::add_linear_less_than_or_equals`],
//!   [`Solver::add_linear_not_equals`].
//! * Binary comparisons: [`Solver::add_greater_than_or_equals`], [`Solver::add_greater_than`].
//! * Membership in a fixed set of values: [`Solver::add_member`].
//!
//! # Using Quince
//! The first step to solving a problem is **adding variables**:
//! ```rust
//! # use quince_solver::Solver;
//! // We create the solver with default options
//! let mut solver = Solver::default();
//!
//! // We create 2 variables
//! let x = solver.new_bounded_integer(5, 10);
//! let y = solver.new_bounded_integer(-3, 15);
//! ```
//!
//! Then we can **add constraints** supported by the [`Solver`]:
//! ```rust
//! # use quince_solver::Solver;
//! # let mut solver = Solver::default();
//! # let x = solver.new_bounded_integer(5, 10);
//! # let y = solver.new_bounded_integer(-3, 15);
//! // We create the constraint x + y <= 17
//! solver
//!     .add_linear_less_than_or_equals(vec![x, y], 17)
//!     .expect("the constraint is satisfiable at the root");
//! ```
//!
//! For finding a solution, a [`termination::TerminationCondition`] and a [`branching::Brancher`]
//! should be specified, which determine when the solver should stop searching and the
//! variable/value selection strategy which should be used:
//! ```rust
//! # use quince_solver::Solver;
//! # use quince_solver::termination::Indefinite;
//! # let mut solver = Solver::default();
//! // We create a termination condition which allows the solver to run indefinitely
//! let mut termination = Indefinite;
//! // And we create a search strategy (in this case, simply the default)
//! let mut brancher = solver.default_brancher();
//! ```
//!
//! **Finding a solution** to this problem can be done by using [`Solver::satisfy`]:
//! ```rust
//! # use quince_solver::Solver;
//! # use quince_solver::results::ProblemSolution;
//! # use quince_solver::results::SatisfactionResult;
//! # use quince_solver::termination::Indefinite;
//! # let mut solver = Solver::default();
//! # let x = solver.new_bounded_integer(5, 10);
//! # let y = solver.new_bounded_integer(-3, 15);
//! # solver.add_linear_less_than_or_equals(vec![x, y], 17).expect("satisfiable at the root");
//! # let mut termination = Indefinite;
//! # let mut brancher = solver.default_brancher();
//! // Then we find a solution to the problem
//! let result = solver.satisfy(&mut brancher, &mut termination);
//!
//! if let SatisfactionResult::Satisfiable(solution) = result {
//!     let value_x = solution.get_integer_value(x);
//!     let value_y = solution.get_integer_value(y);
//!
//!     // The constraint should hold for this solution
//!     assert!(value_x + value_y <= 17);
//! } else {
//!     panic!("This problem should have a solution")
//! }
//! ```
//!
//! **Optimising an objective** can be done in a similar way using [`Solver::minimise`] or
//! [`Solver::maximise`]:
//! ```rust
//! # use quince_solver::Solver;
//! # use quince_solver::results::OptimisationResult;
//! # use quince_solver::results::ProblemSolution;
//! # use quince_solver::termination::Indefinite;
//! # let mut solver = Solver::default();
//! # let x = solver.new_bounded_integer(5, 10);
//! # let y = solver.new_bounded_integer(-3, 15);
//! # solver.add_linear_less_than_or_equals(vec![x, y], 17).expect("satisfiable at the root");
//! # let mut termination = Indefinite;
//! # let mut brancher = solver.default_brancher();
//! // Then we minimise x
//! let result = solver.minimise(&mut brancher, &mut termination, x);
//!
//! if let OptimisationResult::Optimal(optimal_solution) = result {
//!     // The smallest value in the domain of x satisfies the constraint
//!     assert_eq!(optimal_solution.get_integer_value(x), 5);
//! } else {
//!     panic!("This problem should have an optimal solution")
//! }
//! ```
//!
//! # Obtaining multiple solutions
//! Quince supports obtaining multiple solutions from the [`Solver`] when solving satisfaction
//! problems. The search parks on every solution and resumes from that point, so the same
//! solution is never reported twice:
//! ```rust
//! # use quince_solver::Solver;
//! # use quince_solver::results::solution_iterator::IteratedSolution;
//! # use quince_solver::results::ProblemSolution;
//! # use quince_solver::termination::Indefinite;
//! // We create the solver with default options
//! let mut solver = Solver::default();
//!
//! // We create 2 variables with domains within the range [1, 3]
//! let x = solver.new_bounded_integer(1, 3);
//! let y = solver.new_bounded_integer(1, 3);
//!
//! // We create the constraint x > y
//! solver
//!     .add_greater_than(x, y)
//!     .expect("the constraint is satisfiable at the root");
//!
//! let mut termination = Indefinite;
//! let mut brancher = solver.default_brancher();
//!
//! let mut solution_iterator = solver.solution_iterator(&mut brancher, &mut termination);
//!
//! let mut number_of_solutions = 0;
//! loop {
//!     match solution_iterator.next_solution() {
//!         IteratedSolution::Solution(solution) => {
//!             // We have found another solution, the constraint should hold for it
//!             assert!(solution.get_integer_value(x) > solution.get_integer_value(y));
//!             number_of_solutions += 1;
//!         }
//!         IteratedSolution::Finished => {
//!             // No more solutions exist
//!             break;
//!         }
//!         IteratedSolution::Unknown => {
//!             // Our termination condition has caused the solver to terminate
//!             break;
//!         }
//!         IteratedSolution::Unsatisfiable => {
//!             panic!("Problem should be satisfiable")
//!         }
//!     }
//! }
//! // There are three possible solutions to this problem
//! assert_eq!(number_of_solutions, 3);
//! ```
//!
//! ## Feature Flags
//! - `debug-checks`: Enable expensive assertions in the solver. Turning this on slows down the
//!   solver by several orders of magnitude, so it is turned off by default.

pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod math;
pub(crate) mod propagators;
pub(crate) mod quince_asserts;

pub mod branching;
pub mod statistics;

pub use convert_case;
pub use rand;

// We declare a private module with public use, so that all exports from the API are exports
// directly from the crate.
//
// Example:
// `use quince_solver::Solver;`
// vs.
// `use quince_solver::api::Solver;`
mod api;

pub use api::*;

pub use crate::api::solver::DefaultBrancher;
pub use crate::api::solver::Solver;
pub use crate::basic_types::CSPSolverExecutionFlag;
pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::Random;
pub use crate::engine::ConstraintSatisfactionSolver;
