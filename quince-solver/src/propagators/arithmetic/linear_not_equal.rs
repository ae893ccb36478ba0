use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::cp::domain_events::DomainEvents;
use crate::engine::cp::opaque_domain_event::OpaqueDomainEvent;
use crate::engine::cp::propagation::EnqueueDecision;
use crate::engine::cp::propagation::Entailment;
use crate::engine::cp::propagation::LocalId;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::PropagationContextWithTrailedValues;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;
use crate::quince_assert_extreme;

/// Propagator for the constraint `\sum x_i != rhs`.
///
/// The constraint can only propagate when a single term is unfixed, and can only detect a
/// conflict once every term is fixed. The number of fixed terms and their sum are therefore the
/// only state the propagator keeps; they are updated when a term is assigned and rebuilt from
/// the domains when the solver backtracks.
#[derive(Clone, Debug)]
pub(crate) struct LinearNotEqualPropagator<Var> {
    terms: Box<[Var]>,
    rhs: i32,

    /// The number of fixed terms.
    number_of_fixed_terms: usize,
    /// The sum of the values of the fixed terms.
    fixed_lhs: i32,
    /// Whether the conflicting value has already been removed from the single unfixed term; in
    /// that case there is no reason to enqueue again until backtracking invalidates the removal.
    unfixed_variable_has_been_updated: bool,
}

impl<Var: IntegerVariable> LinearNotEqualPropagator<Var> {
    pub(crate) fn new(terms: Box<[Var]>, rhs: i32) -> Self {
        LinearNotEqualPropagator {
            terms,
            rhs,
            number_of_fixed_terms: 0,
            fixed_lhs: 0,
            unfixed_variable_has_been_updated: false,
        }
    }

    fn recalculate_fixed_terms(&mut self, context: PropagationContext) {
        self.number_of_fixed_terms = 0;
        self.fixed_lhs = 0;
        self.unfixed_variable_has_been_updated = false;

        for term in self.terms.iter() {
            if context.is_fixed(term) {
                self.number_of_fixed_terms += 1;
                self.fixed_lhs += context.lower_bound(term);
            }
        }
    }

    /// Whether the incrementally maintained counters agree with the domains.
    fn is_state_consistent(&self, context: PropagationContext) -> bool {
        let number_of_fixed_terms = self
            .terms
            .iter()
            .filter(|&term| context.is_fixed(term))
            .count();
        let fixed_lhs = self
            .terms
            .iter()
            .filter(|&term| context.is_fixed(term))
            .map(|term| context.lower_bound(term))
            .sum::<i32>();

        self.number_of_fixed_terms == number_of_fixed_terms && self.fixed_lhs == fixed_lhs
    }
}

impl<Var> Propagator for LinearNotEqualPropagator<Var>
where
    Var: IntegerVariable + 'static,
{
    fn name(&self) -> &str {
        "LinearNe"
    }

    fn priority(&self) -> u32 {
        0
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> PropagationStatusCP {
        for (i, x_i) in self.terms.iter().enumerate() {
            let _ = context.register(x_i.clone(), DomainEvents::ASSIGN, LocalId::from(i as u32));
        }

        self.recalculate_fixed_terms(context.as_readonly());

        if self.number_of_fixed_terms == self.terms.len() && self.fixed_lhs == self.rhs {
            return Err(Inconsistency::Conflict);
        }

        Ok(())
    }

    fn notify(
        &mut self,
        context: PropagationContextWithTrailedValues,
        local_id: LocalId,
        _event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        self.number_of_fixed_terms += 1;
        self.fixed_lhs += context.lower_bound(&self.terms[local_id.unpack() as usize]);

        let can_propagate = self.number_of_fixed_terms == self.terms.len() - 1
            && !self.unfixed_variable_has_been_updated;
        let is_conflicting =
            self.number_of_fixed_terms == self.terms.len() && self.fixed_lhs == self.rhs;

        if can_propagate || is_conflicting {
            EnqueueDecision::Enqueue
        } else {
            EnqueueDecision::Skip
        }
    }

    fn synchronise(&mut self, context: PropagationContext) {
        self.recalculate_fixed_terms(context);
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        quince_assert_extreme!(self.is_state_consistent(context.as_readonly()));

        if self.number_of_fixed_terms == self.terms.len() - 1 {
            let value_to_remove = self.rhs - self.fixed_lhs;

            if let Some(unfixed_term) = self
                .terms
                .iter()
                .position(|term| !context.is_fixed(term))
            {
                if context.contains(&self.terms[unfixed_term], value_to_remove) {
                    self.unfixed_variable_has_been_updated = true;
                    context.remove(&self.terms[unfixed_term], value_to_remove)?;
                }
            }
        } else if self.number_of_fixed_terms == self.terms.len() && self.fixed_lhs == self.rhs {
            return Err(Inconsistency::Conflict);
        }

        Ok(())
    }

    fn debug_propagate_from_scratch(
        &self,
        mut context: PropagationContextMut,
    ) -> PropagationStatusCP {
        let number_of_fixed_terms = self
            .terms
            .iter()
            .filter(|&term| context.is_fixed(term))
            .count();
        let fixed_lhs = self
            .terms
            .iter()
            .filter(|&term| context.is_fixed(term))
            .map(|term| context.lower_bound(term))
            .sum::<i32>();

        if number_of_fixed_terms == self.terms.len() - 1 {
            let value_to_remove = self.rhs - fixed_lhs;

            if let Some(unfixed_term) = self
                .terms
                .iter()
                .position(|term| !context.is_fixed(term))
            {
                if context.contains(&self.terms[unfixed_term], value_to_remove) {
                    context.remove(&self.terms[unfixed_term], value_to_remove)?;
                }
            }
        } else if number_of_fixed_terms == self.terms.len() && fixed_lhs == self.rhs {
            return Err(Inconsistency::Conflict);
        }

        Ok(())
    }

    fn is_entailed(&self, context: PropagationContext) -> Entailment {
        let number_of_fixed_terms = self
            .terms
            .iter()
            .filter(|&term| context.is_fixed(term))
            .count();
        let fixed_lhs = self
            .terms
            .iter()
            .filter(|&term| context.is_fixed(term))
            .map(|term| context.lower_bound(term))
            .sum::<i32>();

        if number_of_fixed_terms == self.terms.len() {
            if fixed_lhs != self.rhs {
                Entailment::Satisfied
            } else {
                Entailment::Violated
            }
        } else if number_of_fixed_terms == self.terms.len() - 1 {
            let value_to_remove = self.rhs - fixed_lhs;
            let unfixed_term = self
                .terms
                .iter()
                .find(|&term| !context.is_fixed(term));

            match unfixed_term {
                Some(term) if !context.contains(term, value_to_remove) => Entailment::Satisfied,
                _ => Entailment::Unknown,
            }
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
    fn the_conflicting_value_is_removed_from_the_last_unfixed_term() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(2, 2);
        let y = solver.new_variable(0, 5);

        let _ = solver
            .new_propagator(LinearNotEqualPropagator::new([x, y].into(), 5))
            .expect("no empty domains");

        assert!(!solver.contains(y, 3));
        solver.assert_bounds(y, 0, 5);
    }

    #[test]
    fn a_fully_fixed_equal_sum_is_a_conflict_at_the_root() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(2, 2);
        let y = solver.new_variable(3, 3);

        let result = solver.new_propagator(LinearNotEqualPropagator::new([x, y].into(), 5));

        assert!(result.is_err());
    }

    #[test]
    fn fixing_a_term_through_an_event_triggers_the_removal() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 5);
        let y = solver.new_variable(0, 5);

        let propagator = solver
            .new_propagator(LinearNotEqualPropagator::new([x, y].into(), 5))
            .expect("no empty domains");

        let decision = solver.increase_lower_bound_and_notify(propagator, 0, x, 5);
        assert_eq!(decision, EnqueueDecision::Enqueue);

        solver.propagate(propagator).expect("the domain is not empty");
        assert!(!solver.contains(y, 0));
        solver.assert_bounds(y, 1, 5);
    }

    #[test]
    fn entailment_of_a_fully_fixed_sum_depends_on_its_value() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(2, 2);
        let y = solver.new_variable(3, 3);

        let propagator = LinearNotEqualPropagator::new([x, y].into(), 6);
        let context = PropagationContext::new(&solver.assignments);
        assert_eq!(propagator.is_entailed(context), Entailment::Satisfied);

        let propagator = LinearNotEqualPropagator::new([x, y].into(), 5);
        assert_eq!(propagator.is_entailed(context), Entailment::Violated);
    }

    #[test]
    fn entailment_is_reported_once_the_conflicting_value_is_gone() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(2, 2);
        let y = solver.new_variable(0, 5);

        let propagator = LinearNotEqualPropagator::new([x, y].into(), 8);
        let context = PropagationContext::new(&solver.assignments);

        // y cannot reach 6, the constraint can never be violated
        assert_eq!(propagator.is_entailed(context), Entailment::Satisfied);

        let propagator = LinearNotEqualPropagator::new([x, y].into(), 5);
        assert_eq!(propagator.is_entailed(context), Entailment::Unknown);
    }
}
