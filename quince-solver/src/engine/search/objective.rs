use std::fmt::Debug;

use crate::basic_types::ProblemSolution;
use crate::basic_types::SolutionReference;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::variables::DomainId;

/// Maintains the bound on the objective variable while searching for improving solutions.
///
/// Whenever the solver applies a branch it also calls [`ObjectiveManager::apply`] which excludes
/// all solutions which do not improve on the best solution found so far; since the bound is
/// posted on the trail it is undone by backtracking and reposted on the next descent.
pub(crate) trait ObjectiveManager: Debug {
    /// Tightens the domain of the objective variable such that only improving solutions remain;
    /// called directly after a branch has been applied and before propagating to fixpoint.
    fn apply(&mut self, assignments: &mut Assignments) -> Result<(), EmptyDomain>;

    /// Records the objective value of a newly found solution.
    fn on_solution(&mut self, solution: SolutionReference<'_>);
}

/// The [`ObjectiveManager`] of a satisfaction problem; it never constrains anything.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NoObjective;

impl ObjectiveManager for NoObjective {
    fn apply(&mut self, _assignments: &mut Assignments) -> Result<(), EmptyDomain> {
        Ok(())
    }

    fn on_solution(&mut self, _solution: SolutionReference<'_>) {}
}

/// An [`ObjectiveManager`] which minimises the provided objective variable by requiring each
/// solution to be strictly below the previous one.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MinimiseObjective {
    objective: DomainId,
    best_objective_value: Option<i32>,
}

impl MinimiseObjective {
    pub(crate) fn new(objective: DomainId) -> Self {
        MinimiseObjective {
            objective,
            best_objective_value: None,
        }
    }
}

impl ObjectiveManager for MinimiseObjective {
    fn apply(&mut self, assignments: &mut Assignments) -> Result<(), EmptyDomain> {
        match self.best_objective_value {
            Some(best) => assignments.tighten_upper_bound(self.objective, best - 1, None),
            None => Ok(()),
        }
    }

    fn on_solution(&mut self, solution: SolutionReference<'_>) {
        self.best_objective_value = Some(solution.get_integer_value(self.objective));
    }
}

/// An [`ObjectiveManager`] which maximises the provided objective variable by requiring each
/// solution to be strictly above the previous one.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MaximiseObjective {
    objective: DomainId,
    best_objective_value: Option<i32>,
}

impl MaximiseObjective {
    pub(crate) fn new(objective: DomainId) -> Self {
        MaximiseObjective {
            objective,
            best_objective_value: None,
        }
    }
}

impl ObjectiveManager for MaximiseObjective {
    fn apply(&mut self, assignments: &mut Assignments) -> Result<(), EmptyDomain> {
        match self.best_objective_value {
            Some(best) => assignments.tighten_lower_bound(self.objective, best + 1, None),
            None => Ok(()),
        }
    }

    fn on_solution(&mut self, solution: SolutionReference<'_>) {
        self.best_objective_value = Some(solution.get_integer_value(self.objective));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_bound_is_posted_before_the_first_solution() {
        let mut assignments = Assignments::default();
        let objective = assignments.grow(0, 10);

        let mut manager = MinimiseObjective::new(objective);
        assert!(manager.apply(&mut assignments).is_ok());
        assert_eq!(assignments.get_upper_bound(objective), 10);
    }

    #[test]
    fn minimisation_requires_strictly_improving_solutions() {
        let mut assignments = Assignments::default();
        let objective = assignments.grow(0, 10);
        let mut manager = MinimiseObjective::new(objective);

        let mut solution_assignments = Assignments::default();
        let solution_objective = solution_assignments.grow(7, 7);
        assert_eq!(solution_objective, objective);
        manager.on_solution(SolutionReference::new(&solution_assignments));

        assert!(manager.apply(&mut assignments).is_ok());
        assert_eq!(assignments.get_upper_bound(objective), 6);
    }

    #[test]
    fn maximisation_requires_strictly_improving_solutions() {
        let mut assignments = Assignments::default();
        let objective = assignments.grow(0, 10);
        let mut manager = MaximiseObjective::new(objective);

        let mut solution_assignments = Assignments::default();
        let solution_objective = solution_assignments.grow(4, 4);
        assert_eq!(solution_objective, objective);
        manager.on_solution(SolutionReference::new(&solution_assignments));

        assert!(manager.apply(&mut assignments).is_ok());
        assert_eq!(assignments.get_lower_bound(objective), 5);
    }

    #[test]
    fn an_unsatisfiable_bound_reports_an_empty_domain() {
        let mut assignments = Assignments::default();
        let objective = assignments.grow(5, 5);
        let mut manager = MinimiseObjective::new(objective);

        let mut solution_assignments = Assignments::default();
        let _ = solution_assignments.grow(5, 5);
        manager.on_solution(SolutionReference::new(&solution_assignments));

        assert!(manager.apply(&mut assignments).is_err());
    }
}
