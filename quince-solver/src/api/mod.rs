pub(crate) mod outputs;
pub(crate) mod solver;

pub mod results {
    //! Contains the outputs of solving using the [`Solver`].
    //!
    //! We differentiate between 2 different types of results:
    //! - For a **satisfaction** problem ([`SatisfactionResult`])
    //! - For an **optimisation** problem ([`OptimisationResult`])
    //!
    //! Multiple solutions to a satisfaction problem can be retrieved through the
    //! [`solution_iterator`].
    pub use crate::api::outputs::solution_iterator;
    pub use crate::api::outputs::OptimisationResult;
    pub use crate::api::outputs::ProblemSolution;
    pub use crate::api::outputs::SatisfactionResult;
    pub use crate::api::outputs::SolutionReference;
    pub use crate::basic_types::Solution;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod variables {
    //! Contains the variables which are used by the [`Solver`].
    //!
    //! A variable, in the context of the solver, is a view onto a domain. It may forward domain
    //! information unaltered, or apply transformations which can be performed without the need of
    //! constraints.
    //!
    //! Integer variables are represented by [`DomainId`]s when interacting with the [`Solver`].
    //! They can be created using [`Solver::new_bounded_integer`] when creating a variable with the
    //! domain between a lower-bound and an upper-bound, or using [`Solver::new_sparse_integer`]
    //! when creating a variable with holes in the domain. These variables can be transformed
    //! (according to the trait [`TransformableVariable`]) to create an [`AffineView`].
    pub use crate::engine::variables::AffineView;
    pub use crate::engine::variables::DomainId;
    pub use crate::engine::variables::IntegerVariable;
    pub use crate::engine::variables::TransformableVariable;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod options {
    //! Contains the options which can be passed to the [`Solver`].
    //!
    //! These influence the following aspects:
    //! - The restart strategy of the solver
    //! - Whether the solver parks on every solution or enumerates eagerly
    pub use crate::basic_types::sequence_generators::SequenceGeneratorType;
    pub use crate::engine::search::RestartOptions;
    pub use crate::engine::SatisfactionSolverOptions as SolverOptions;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod termination {
    //! Contains the conditions which are used to determine when the [`Solver`] should terminate
    //! even when the state of the satisfaction/optimisation problem is unknown.
    //!
    //! The main [`TerminationCondition`] is a condition which is polled by the [`Solver`] during
    //! the search process. It indicates when the [`Solver`] should stop, even if no definitive
    //! conclusions have been made.
    //!
    //! The most common example would be [`TimeBudget`], which terminates the [`Solver`] whenever
    //! the time budget is exceeded.
    pub use crate::engine::termination::combinator::*;
    pub use crate::engine::termination::decision_budget::*;
    pub use crate::engine::termination::indefinite::*;
    pub use crate::engine::termination::time_budget::*;
    pub use crate::engine::termination::TerminationCondition;
    #[cfg(doc)]
    use crate::Solver;
}

#[doc(hidden)]
pub mod asserts {
    pub use crate::quince_assert_advanced;
    pub use crate::quince_assert_eq_simple;
    pub use crate::quince_assert_extreme;
    pub use crate::quince_assert_moderate;
    pub use crate::quince_assert_ne_simple;
    pub use crate::quince_assert_simple;
    pub use crate::quince_asserts::QUINCE_ASSERT_ADVANCED;
    pub use crate::quince_asserts::QUINCE_ASSERT_EXTREME;
    pub use crate::quince_asserts::QUINCE_ASSERT_LEVEL_DEFINITION;
    pub use crate::quince_asserts::QUINCE_ASSERT_MODERATE;
    pub use crate::quince_asserts::QUINCE_ASSERT_SIMPLE;
}
