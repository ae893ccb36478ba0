use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::cp::domain_events::DomainEvents;
use crate::engine::cp::propagation::Entailment;
use crate::engine::cp::propagation::LocalId;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// Propagator for the membership constraint `x in S`, where `S` is a fixed set of values.
///
/// The complement of `S` is removed in closed runs the first time the propagator runs, after
/// which it marks itself passive: a domain only ever shrinks, so membership can never be
/// violated again. Backtracking reactivates the propagator together with the restored domain.
#[derive(Clone, Debug)]
pub(crate) struct MemberPropagator<Var> {
    variable: Var,
    /// The admissible values, sorted and deduplicated.
    values: Vec<i32>,
}

impl<Var: IntegerVariable> MemberPropagator<Var> {
    pub(crate) fn new(variable: Var, mut values: Vec<i32>) -> Self {
        values.sort_unstable();
        values.dedup();

        MemberPropagator { variable, values }
    }
}

impl<Var> Propagator for MemberPropagator<Var>
where
    Var: IntegerVariable + 'static,
{
    fn name(&self) -> &str {
        "Member"
    }

    fn priority(&self) -> u32 {
        1
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> PropagationStatusCP {
        if self.values.is_empty() {
            return Err(Inconsistency::Conflict);
        }

        let _ = context.register(self.variable.clone(), DomainEvents::ANY_INT, LocalId::from(0));

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let lower_bound = context.lower_bound(&self.variable);
        let upper_bound = context.upper_bound(&self.variable);

        // The complement of the admissible set within the current bounds, removed run by run.
        let mut start_of_run = lower_bound;
        for &value in self
            .values
            .iter()
            .filter(|&&value| value >= lower_bound && value <= upper_bound)
        {
            if value > start_of_run {
                context.remove_interval(&self.variable, start_of_run, value - 1)?;
            }
            start_of_run = value + 1;
        }
        if start_of_run <= upper_bound {
            context.remove_interval(&self.variable, start_of_run, upper_bound)?;
        }

        context.set_passive();
        Ok(())
    }

    fn debug_propagate_from_scratch(
        &self,
        mut context: PropagationContextMut,
    ) -> PropagationStatusCP {
        let inadmissible = context
            .iterate_domain(&self.variable)
            .filter(|value| self.values.binary_search(value).is_err())
            .collect::<Vec<_>>();

        for value in inadmissible {
            context.remove(&self.variable, value)?;
        }

        Ok(())
    }

    fn is_entailed(&self, context: PropagationContext) -> Entailment {
        let mut all_admissible = true;
        let mut any_admissible = false;

        for value in context.iterate_domain(&self.variable) {
            if self.values.binary_search(&value).is_ok() {
                any_admissible = true;
            } else {
                all_admissible = false;
            }
        }

        if all_admissible {
            Entailment::Satisfied
        } else if !any_admissible {
            Entailment::Violated
        } else {
            Entailment::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cp::test_solver::TestSolver;

    #[test]
    fn inadmissible_values_are_removed_in_runs() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);

        let _ = solver
            .new_propagator(MemberPropagator::new(x, vec![2, 3, 7]))
            .expect("no empty domains");

        solver.assert_bounds(x, 2, 7);
        assert!(solver.contains(x, 3));
        assert!(!solver.contains(x, 4));
        assert!(!solver.contains(x, 5));
        assert!(!solver.contains(x, 6));
    }

    #[test]
    fn the_propagator_is_passive_after_filtering() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);

        let propagator = solver
            .new_propagator(MemberPropagator::new(x, vec![0, 1]))
            .expect("no empty domains");

        assert!(!solver.is_propagator_active(propagator));
    }

    #[test]
    fn a_disjoint_set_is_a_conflict_at_the_root() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 5);

        let result = solver.new_propagator(MemberPropagator::new(x, vec![8, 9]));

        assert!(result.is_err());
    }

    #[test]
    fn an_empty_set_is_rejected() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 5);

        let result = solver.new_propagator(MemberPropagator::new(x, vec![]));

        assert!(result.is_err());
    }

    #[test]
    fn membership_over_a_sparse_domain() {
        let mut solver = TestSolver::default();
        let x = solver.new_sparse_variable(vec![1, 4, 6, 9]);

        let _ = solver
            .new_propagator(MemberPropagator::new(x, vec![4, 5, 6]))
            .expect("no empty domains");

        solver.assert_bounds(x, 4, 6);
        assert!(!solver.contains(x, 5));
    }
}
