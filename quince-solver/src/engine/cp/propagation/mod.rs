//! Contains the main building blocks for propagators.
//!
//! # Theoretical
//!
//! A propagator takes as input a set of variables (`x_i ∈ X`) and for each variable a
//! corresponding domain (`D_i ∈ D`); it can then be seen as a function which maps `D ↦ D'` such
//! that `D'_i ⊆ D_i` for all variables (i.e. the domain of a variable either remains the same
//! after applying the propagator or it becomes a subset of the domain before applying the
//! propagator).
//!
//! An example of a propagator can be the simple not equal (`!=`) propagator, suppose that
//! we have two variables `x ∈ {0}` and `y ∈ {0, 1}` and the constraint `x != y`. The not equal
//! propagator will then take as input the variables `x` and `y` and their respective domains
//! `D = {D_x = {0}, D_y = {0, 1}}` and produce a new domain `D' = {D'_x = {0}, D'_y = {1}}` for
//! which we can see that `D_x = D'_x` and `D'_y ⊆ D_y`.
//!
//! A propagator is said to be at fix-point if `D_x = D'_x` meaning that no further propagations
//! can take place when applying the propagator. A propagator is said to be "idempotent" if a
//! single call to it will result in it being at fix-point.
//!
//! For more information about the construction of these types of propagation-based solvers, we
//! refer to [\[1\]](https://dl.acm.org/doi/pdf/10.1145/1452044.1452046).
//!
//! # Practical
//!
//! Each concrete propagator implements the [`Propagator`] trait. The main function to implement
//! is [`Propagator::propagate`], which performs the domain reduction.
//!
//! In [`Propagator::initialise_at_root`] the propagator subscribes to the domain events of its
//! variables and allocates the reversible integers which back its incremental state. It is
//! provided a [`PropagatorInitialisationContext`], which has all the available functions allowing
//! the propagator to hook into the solver state.
//!
//! We do not require propagators to be idempotent (see the previous section for a definition)
//! and it can be assumed that if a propagator is not at fix-point after propagating that it will
//! be called again by the solver until no further propagations happen.
//!
//! See the [`crate::propagators`] folder for concrete propagator implementations.
//!
//! # How to implement a new propagator?
//!
//! We recommend the following workflow:
//! 1. Implement a propagator struct that implements the [`Propagator`] trait. For now only
//!    implement the required functions, i.e., [`Propagator::debug_propagate_from_scratch`],
//!    [`Propagator::initialise_at_root`], and [`Propagator::name`].
//! 2. Following the procedure above gives an initial version of the propagator that is likely not
//!    efficient, but has an important role for testing. Now is a good time to write tests using
//!    the test solver. **We strongly discourage skipping this step**.
//! 3. Implement [`Propagator::notify`] for more control on when the propagator is enqueued.
//!    Depending on the concrete propagator, this may only make sense when done together with the
//!    next step.
//! 4. Implement the remaining hooks, i.e., [`Propagator::propagate`] and
//!    [`Propagator::synchronise`], to exploit incrementality. These are all interdependent.
//! 5. Decide on the priority of the propagator, i.e., implement [`Propagator::priority`].
//! 6. Make sure to write new tests and run all tests throughout the process.
//! 7. The propagator implementation is now done!
//!
//! # Bibliography
//!
//! \[1\] C. Schulte and P. J. Stuckey, ‘Efficient constraint propagation engines’, ACM
//! Transactions on Programming Languages and Systems (TOPLAS), vol. 31, no. 1, pp. 1–43, 2008.

pub(crate) mod contexts;
pub(crate) mod local_id;
pub(crate) mod propagator;
pub(crate) mod propagator_id;
pub(crate) mod propagator_var_id;
pub(crate) mod store;

pub(crate) use contexts::*;
pub(crate) use local_id::LocalId;
pub(crate) use propagator::EnqueueDecision;
pub(crate) use propagator::Entailment;
pub(crate) use propagator::Propagator;
pub use propagator_id::PropagatorId;
pub(crate) use propagator_var_id::PropagatorVarId;
pub(crate) use store::PropagatorStore;
