use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::cp::domain_events::DomainEvents;
use crate::engine::cp::opaque_domain_event::OpaqueDomainEvent;
use crate::engine::cp::propagation::EnqueueDecision;
use crate::engine::cp::propagation::Entailment;
use crate::engine::cp::propagation::LocalId;
use crate::engine::cp::propagation::ManipulateTrailedValues;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::PropagationContextWithTrailedValues;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::cp::TrailedInteger;
use crate::engine::variables::IntegerVariable;
use crate::quince_assert_simple;

/// Bounds-consistent propagator for the constraint `\sum x_i <= c`.
///
/// The lower bound of the left-hand side is maintained incrementally in a reversible integer;
/// [`LinearLessOrEqualPropagator::notify`] folds every lower-bound tightening of a term into the
/// running sum so that [`LinearLessOrEqualPropagator::propagate`] never has to recompute it.
#[derive(Clone, Debug)]
pub(crate) struct LinearLessOrEqualPropagator<Var> {
    x: Box<[Var]>,
    c: i32,
    /// The lower bound of the sum of the left-hand side. This is incremental state.
    lower_bound_left_hand_side: TrailedInteger,
    /// The value at index `i` is the lower bound of `x[i]` which has been accumulated into
    /// [`LinearLessOrEqualPropagator::lower_bound_left_hand_side`].
    current_bounds: Box<[TrailedInteger]>,
}

impl<Var: IntegerVariable> LinearLessOrEqualPropagator<Var> {
    pub(crate) fn new(x: Box<[Var]>, c: i32) -> Self {
        LinearLessOrEqualPropagator {
            x,
            c,
            lower_bound_left_hand_side: TrailedInteger::default(),
            current_bounds: Box::default(),
        }
    }
}

impl<Var> Propagator for LinearLessOrEqualPropagator<Var>
where
    Var: IntegerVariable + 'static,
{
    fn name(&self) -> &str {
        "LinearLeq"
    }

    fn priority(&self) -> u32 {
        0
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> PropagationStatusCP {
        let mut lower_bound_left_hand_side = 0_i64;
        let mut current_bounds = Vec::with_capacity(self.x.len());

        for (i, x_i) in self.x.iter().enumerate() {
            let _ = context.register(
                x_i.clone(),
                DomainEvents::LOWER_BOUND,
                LocalId::from(i as u32),
            );

            let bound = context.lower_bound(x_i) as i64;
            lower_bound_left_hand_side += bound;
            current_bounds.push(context.new_trailed_integer(bound));
        }

        self.lower_bound_left_hand_side =
            context.new_trailed_integer(lower_bound_left_hand_side);
        self.current_bounds = current_bounds.into();

        if (self.c as i64) < lower_bound_left_hand_side {
            return Err(Inconsistency::Conflict);
        }

        Ok(())
    }

    fn notify(
        &mut self,
        mut context: PropagationContextWithTrailedValues,
        local_id: LocalId,
        _event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        let index = local_id.unpack() as usize;

        let old_bound = context.value(self.current_bounds[index]);
        let new_bound = context.lower_bound(&self.x[index]) as i64;

        quince_assert_simple!(
            old_bound < new_bound,
            "the propagator is only subscribed to lower-bound tightenings, old_bound={old_bound}, new_bound={new_bound}"
        );

        context.add_assign(self.lower_bound_left_hand_side, new_bound - old_bound);
        context.assign(self.current_bounds[index], new_bound);

        EnqueueDecision::Enqueue
    }

    fn propagate(&mut self, context: PropagationContextMut) -> PropagationStatusCP {
        let lower_bound_left_hand_side = context.value(self.lower_bound_left_hand_side);
        perform_propagation(context, &self.x, self.c, lower_bound_left_hand_side)
    }

    fn debug_propagate_from_scratch(&self, context: PropagationContextMut) -> PropagationStatusCP {
        let lower_bound_left_hand_side = self
            .x
            .iter()
            .map(|x_i| context.lower_bound(x_i) as i64)
            .sum::<i64>();
        perform_propagation(context, &self.x, self.c, lower_bound_left_hand_side)
    }

    fn is_entailed(&self, context: PropagationContext) -> Entailment {
        let lower_bound = self
            .x
            .iter()
            .map(|x_i| context.lower_bound(x_i) as i64)
            .sum::<i64>();
        let upper_bound = self
            .x
            .iter()
            .map(|x_i| context.upper_bound(x_i) as i64)
            .sum::<i64>();

        if upper_bound <= self.c as i64 {
            Entailment::Satisfied
        } else if lower_bound > self.c as i64 {
            Entailment::Violated
        } else {
            Entailment::Unknown
        }
    }
}

fn perform_propagation<Var: IntegerVariable>(
    mut context: PropagationContextMut,
    x: &[Var],
    c: i32,
    lower_bound_left_hand_side: i64,
) -> PropagationStatusCP {
    if (c as i64) < lower_bound_left_hand_side {
        return Err(Inconsistency::Conflict);
    }

    for x_i in x.iter() {
        let bound = c as i64 - (lower_bound_left_hand_side - context.lower_bound(x_i) as i64);

        let bound = match i32::try_from(bound) {
            Ok(bound) => bound,
            // The other terms alone exceed c; no value of x_i can compensate.
            Err(_) if bound < i32::MIN as i64 => return Err(Inconsistency::Conflict),
            // The bound exceeds any representable upper bound, nothing to filter.
            Err(_) => continue,
        };

        if context.upper_bound(x_i) > bound {
            context.set_upper_bound(x_i, bound)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cp::test_solver::TestSolver;

    #[test]
    fn bounds_are_propagated() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 5);
        let y = solver.new_variable(0, 10);

        let _ = solver
            .new_propagator(LinearLessOrEqualPropagator::new([x, y].into(), 7))
            .expect("no empty domains");

        solver.assert_bounds(x, 1, 5);
        solver.assert_bounds(y, 0, 6);
    }

    #[test]
    fn an_exceeded_right_hand_side_is_a_conflict_at_the_root() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(3, 5);
        let y = solver.new_variable(4, 10);

        let result = solver.new_propagator(LinearLessOrEqualPropagator::new([x, y].into(), 6));

        assert!(result.is_err());
    }

    #[test]
    fn the_incremental_sum_follows_lower_bound_tightenings() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let y = solver.new_variable(0, 10);

        let propagator = solver
            .new_propagator(LinearLessOrEqualPropagator::new([x, y].into(), 7))
            .expect("no empty domains");

        let decision = solver.increase_lower_bound_and_notify(propagator, 0, x, 4);
        assert_eq!(decision, EnqueueDecision::Enqueue);

        solver
            .propagate(propagator)
            .expect("the bounds remain consistent");
        solver.assert_bounds(y, 0, 3);
    }

    #[test]
    fn entailment_follows_the_bounds() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 4);
        let y = solver.new_variable(0, 4);

        let propagator = LinearLessOrEqualPropagator::new([x, y].into(), 8);
        let context = PropagationContext::new(&solver.assignments);

        assert_eq!(propagator.is_entailed(context), Entailment::Satisfied);

        let propagator = LinearLessOrEqualPropagator::new([x, y].into(), 5);
        assert_eq!(propagator.is_entailed(context), Entailment::Unknown);
    }
}
