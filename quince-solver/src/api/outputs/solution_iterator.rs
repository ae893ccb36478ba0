//! Contains the structures corresponding to solution iterations.

use super::SolutionReference;
use crate::basic_types::CSPSolverExecutionFlag;
use crate::branching::Brancher;
use crate::engine::ConstraintSatisfactionSolver;
use crate::termination::TerminationCondition;
#[cfg(doc)]
use crate::Solver;

/// A struct which allows the retrieval of multiple solutions to a satisfaction problem.
///
/// The search is parked on every solution and resumed from that exact point for the next one, so
/// no part of the tree is ever explored twice and no solution is reported twice.
#[derive(Debug)]
pub struct SolutionIterator<'solver, 'brancher, 'termination, B: Brancher, T> {
    solver: &'solver mut ConstraintSatisfactionSolver,
    brancher: &'brancher mut B,
    termination: &'termination mut T,
    started: bool,
    has_solution: bool,
}

impl<'solver, 'brancher, 'termination, B: Brancher, T: TerminationCondition>
    SolutionIterator<'solver, 'brancher, 'termination, B, T>
{
    pub(crate) fn new(
        solver: &'solver mut ConstraintSatisfactionSolver,
        brancher: &'brancher mut B,
        termination: &'termination mut T,
    ) -> Self {
        SolutionIterator {
            solver,
            brancher,
            termination,
            started: false,
            has_solution: false,
        }
    }

    /// Find a new solution by resuming the search which is parked on the previous one.
    ///
    /// Once [`IteratedSolution::Finished`], [`IteratedSolution::Unknown`], or
    /// [`IteratedSolution::Unsatisfiable`] has been returned, the iterator is depleted and every
    /// subsequent call returns [`IteratedSolution::Finished`].
    pub fn next_solution(&mut self) -> IteratedSolution<'_> {
        let flag = if !self.started {
            self.started = true;
            self.solver.solve(self.termination, self.brancher)
        } else if self.solver.is_parked_on_solution() {
            self.solver.next_solution(self.termination, self.brancher)
        } else {
            return IteratedSolution::Finished;
        };

        match flag {
            CSPSolverExecutionFlag::Feasible if self.solver.is_parked_on_solution() => {
                self.has_solution = true;
                IteratedSolution::Solution(self.solver.get_solution_reference())
            }
            CSPSolverExecutionFlag::Feasible => IteratedSolution::Finished,
            CSPSolverExecutionFlag::Infeasible if !self.has_solution => {
                IteratedSolution::Unsatisfiable
            }
            CSPSolverExecutionFlag::Infeasible => IteratedSolution::Finished,
            CSPSolverExecutionFlag::Timeout => IteratedSolution::Unknown,
        }
    }
}

/// Enum which specifies the status of the call to [`SolutionIterator::next_solution`].
#[derive(Debug)]
pub enum IteratedSolution<'solver> {
    /// A new solution was identified.
    Solution(SolutionReference<'solver>),

    /// No more solutions exist.
    Finished,

    /// The solver was terminated during search.
    Unknown,

    /// There exists no solution.
    Unsatisfiable,
}
