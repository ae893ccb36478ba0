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

/// Bounds-consistent propagator for the constraint `x >= y + c`.
///
/// With `c = 1` this is the strict comparison `x > y`. Once the constraint is entailed, i.e.
/// when even the smallest value of `x` dominates the largest value of `y`, the propagator marks
/// itself passive; backtracking reactivates it.
#[derive(Clone, Debug)]
pub(crate) struct BinaryGreaterOrEqualPropagator<Var> {
    x: Var,
    y: Var,
    c: i32,
}

impl<Var: IntegerVariable> BinaryGreaterOrEqualPropagator<Var> {
    pub(crate) fn new(x: Var, y: Var, c: i32) -> Self {
        BinaryGreaterOrEqualPropagator { x, y, c }
    }
}

impl<Var> Propagator for BinaryGreaterOrEqualPropagator<Var>
where
    Var: IntegerVariable + 'static,
{
    fn name(&self) -> &str {
        "BinaryGeq"
    }

    fn priority(&self) -> u32 {
        0
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> PropagationStatusCP {
        let _ = context.register(self.x.clone(), DomainEvents::UPPER_BOUND, LocalId::from(0));
        let _ = context.register(self.y.clone(), DomainEvents::LOWER_BOUND, LocalId::from(1));

        Ok(())
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let lower_bound_x = context.lower_bound(&self.y) + self.c;
        context.set_lower_bound(&self.x, lower_bound_x)?;

        let upper_bound_y = context.upper_bound(&self.x) - self.c;
        context.set_upper_bound(&self.y, upper_bound_y)?;

        if context.lower_bound(&self.x) >= context.upper_bound(&self.y) + self.c {
            context.set_passive();
        }

        Ok(())
    }

    fn debug_propagate_from_scratch(
        &self,
        mut context: PropagationContextMut,
    ) -> PropagationStatusCP {
        let lower_bound_x = context.lower_bound(&self.y) + self.c;
        context.set_lower_bound(&self.x, lower_bound_x)?;

        let upper_bound_y = context.upper_bound(&self.x) - self.c;
        context.set_upper_bound(&self.y, upper_bound_y)?;

        Ok(())
    }

    fn is_entailed(&self, context: PropagationContext) -> Entailment {
        if context.lower_bound(&self.x) >= context.upper_bound(&self.y) + self.c {
            Entailment::Satisfied
        } else if context.upper_bound(&self.x) < context.lower_bound(&self.y) + self.c {
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
    fn bounds_are_propagated_in_both_directions() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 3);
        let y = solver.new_variable(1, 3);

        let _ = solver
            .new_propagator(BinaryGreaterOrEqualPropagator::new(x, y, 1))
            .expect("no empty domains");

        solver.assert_bounds(x, 2, 3);
        solver.assert_bounds(y, 1, 2);
    }

    #[test]
    fn an_unsatisfiable_comparison_is_a_conflict_at_the_root() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 2);
        let y = solver.new_variable(5, 7);

        let result = solver.new_propagator(BinaryGreaterOrEqualPropagator::new(x, y, 0));

        assert!(result.is_err());
    }

    #[test]
    fn an_entailed_propagator_becomes_passive() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(5, 7);
        let y = solver.new_variable(0, 2);

        let propagator = solver
            .new_propagator(BinaryGreaterOrEqualPropagator::new(x, y, 1))
            .expect("no empty domains");

        assert!(!solver.is_propagator_active(propagator));
    }

    #[test]
    fn a_pending_propagator_stays_active() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 3);
        let y = solver.new_variable(1, 3);

        let propagator = solver
            .new_propagator(BinaryGreaterOrEqualPropagator::new(x, y, 1))
            .expect("no empty domains");

        assert!(solver.is_propagator_active(propagator));
    }
}
