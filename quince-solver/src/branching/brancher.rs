#[cfg(doc)]
use crate::basic_types::Random;
use crate::basic_types::SolutionReference;
#[cfg(doc)]
use crate::branching;
#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// A trait for defining a branching strategy (oftentimes utilising a [`VariableSelector`] and a
/// [`ValueSelector`]).
///
/// In general, implementations of this trait define how the search of the solver proceeds (i.e.
/// it controls which part of the search space the solver explores next). It is required that the
/// returned decision restricts the domain of at least 1 of the variables (and more domains can be
/// affected due to subsequent inference). See [`branching`] for example usages.
///
/// If the [`Brancher`] (or any component thereof) is implemented incorrectly then the behaviour
/// of the solver is undefined.
pub trait Brancher {
    /// Returns the next [`Decision`] concerning a single variable and value (or [`None`] if all
    /// variables under consideration are assigned, which makes the current assignment a
    /// solution).
    ///
    /// Note that this method **cannot** apply the decision itself; the [`SelectionContext`] is
    /// only mutable to account for the usage of random generators (e.g. see [`Random`]).
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Decision>;

    /// A function which is called after a [`DomainId`] is unassigned during backtracking (i.e.
    /// when it was fixed but is no longer), specifically, it provides `variable` which is the
    /// [`DomainId`] which has been reset and `value` which is the value to which the variable was
    /// previously fixed. This method could thus be called multiple times in a single backtracking
    /// operation by the solver.
    fn on_unassign_integer(&mut self, _variable: DomainId, _value: i32) {}

    /// This method is called when a solution is found; this will either be called when a new
    /// incumbent solution is found during optimisation or when a new solution is found while
    /// iterating over solutions.
    fn on_solution(&mut self, _solution: SolutionReference) {}

    /// This method is called whenever a restart is performed.
    fn on_restart(&mut self) {}

    /// This method returns whether a restart is *currently* pointless for the [`Brancher`].
    ///
    /// For example, if a [`Brancher`] is using a static search strategy then a restart is
    /// pointless; however, if a [`Brancher`] is using a variable selector which changes
    /// throughout the search process then restarting is not pointless.
    ///
    /// Note that even if the [`Brancher`] has indicated that a restart is pointless, it could be
    /// that the restart is still performed (e.g. if this [`Brancher`] is a subcomponent of
    /// another [`Brancher`] and it is not the only `is_restart_pointless` response which is taken
    /// into account).
    fn is_restart_pointless(&mut self) -> bool {
        true
    }
}
