#![cfg(any(test, doc))]
//! This module exposes helpers that aid testing of CP propagators. The [`TestSolver`] allows
//! setting up specific scenarios under which to test the various operations of a propagator.

use super::propagation::store::PropagatorStore;
use super::propagation::EnqueueDecision;
use super::propagation::PropagatorInitialisationContext;
use crate::basic_types::Inconsistency;
use crate::containers::KeyedVec;
use crate::engine::cp::opaque_domain_event::OpaqueDomainEvent;
use crate::engine::cp::propagation::LocalId;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::PropagationContextWithTrailedValues;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::IntDomainEvent;
use crate::engine::cp::TrailedInteger;
use crate::engine::cp::TrailedValues;
use crate::engine::cp::WatchListCP;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;

/// A container for CP variables, which can be used to test propagators.
#[derive(Debug, Default)]
pub(crate) struct TestSolver {
    pub(crate) assignments: Assignments,
    pub(crate) propagator_store: PropagatorStore,
    pub(crate) trailed_values: TrailedValues,
    watch_list: WatchListCP,
    propagator_activity: KeyedVec<PropagatorId, TrailedInteger>,
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lb: i32, ub: i32) -> DomainId {
        self.watch_list.grow();
        self.assignments.grow(lb, ub)
    }

    pub(crate) fn new_sparse_variable(&mut self, values: Vec<i32>) -> DomainId {
        self.watch_list.grow();
        self.assignments.create_new_integer_variable_sparse(values)
    }

    pub(crate) fn new_propagator(
        &mut self,
        propagator: impl Propagator + 'static,
    ) -> Result<PropagatorId, Inconsistency> {
        let propagator_id = self.propagator_store.alloc(Box::new(propagator));
        let activity = self.trailed_values.grow(1);
        let _ = self.propagator_activity.push(activity);

        let mut initialisation_context = PropagatorInitialisationContext::new(
            &mut self.watch_list,
            &mut self.trailed_values,
            propagator_id,
            &mut self.assignments,
        );

        self.propagator_store[propagator_id].initialise_at_root(&mut initialisation_context)?;
        self.propagate(propagator_id)?;

        Ok(propagator_id)
    }

    pub(crate) fn contains<Var: IntegerVariable>(&self, var: Var, value: i32) -> bool {
        var.contains(&self.assignments, value)
    }

    pub(crate) fn lower_bound(&self, var: DomainId) -> i32 {
        self.assignments.get_lower_bound(var)
    }

    pub(crate) fn upper_bound(&self, var: DomainId) -> i32 {
        self.assignments.get_upper_bound(var)
    }

    pub(crate) fn set_lower_bound(&mut self, var: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        self.assignments.tighten_lower_bound(var, bound, None)
    }

    pub(crate) fn set_upper_bound(&mut self, var: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        self.assignments.tighten_upper_bound(var, bound, None)
    }

    pub(crate) fn remove(&mut self, var: DomainId, value: i32) -> Result<(), EmptyDomain> {
        self.assignments.remove_value_from_domain(var, value, None)
    }

    /// Returns whether the propagator has not marked itself passive.
    pub(crate) fn is_propagator_active(&self, propagator: PropagatorId) -> bool {
        self.trailed_values.read(self.propagator_activity[propagator]) == 1
    }

    pub(crate) fn increase_lower_bound_and_notify(
        &mut self,
        propagator: PropagatorId,
        local_id: u32,
        var: DomainId,
        value: i32,
    ) -> EnqueueDecision {
        let result = self.assignments.tighten_lower_bound(var, value, None);
        assert!(result.is_ok(), "The provided value to `increase_lower_bound_and_notify` caused an empty domain, generally the propagator should not be notified of this change!");
        let context = PropagationContextWithTrailedValues::new(
            &mut self.trailed_values,
            &self.assignments,
        );
        self.propagator_store[propagator].notify(
            context,
            LocalId::from(local_id),
            IntDomainEvent::LowerBound.into(),
        )
    }

    pub(crate) fn decrease_upper_bound_and_notify(
        &mut self,
        propagator: PropagatorId,
        local_id: u32,
        var: DomainId,
        value: i32,
    ) -> EnqueueDecision {
        let result = self.assignments.tighten_upper_bound(var, value, None);
        assert!(result.is_ok(), "The provided value to `decrease_upper_bound_and_notify` caused an empty domain, generally the propagator should not be notified of this change!");
        let context = PropagationContextWithTrailedValues::new(
            &mut self.trailed_values,
            &self.assignments,
        );
        self.propagator_store[propagator].notify(
            context,
            LocalId::from(local_id),
            IntDomainEvent::UpperBound.into(),
        )
    }

    pub(crate) fn propagate(&mut self, propagator: PropagatorId) -> Result<(), Inconsistency> {
        let context = PropagationContextMut::new(
            &mut self.trailed_values,
            &mut self.assignments,
            propagator,
            self.propagator_activity[propagator],
        );
        self.propagator_store[propagator].propagate(context)
    }

    pub(crate) fn propagate_until_fixed_point(
        &mut self,
        propagator: PropagatorId,
    ) -> Result<(), Inconsistency> {
        let mut num_trail_entries = self.assignments.num_trail_entries();
        self.notify_propagator(propagator);
        loop {
            {
                let context = PropagationContextMut::new(
                    &mut self.trailed_values,
                    &mut self.assignments,
                    propagator,
                    self.propagator_activity[propagator],
                );
                self.propagator_store[propagator].propagate(context)?;
                self.notify_propagator(propagator);
            }
            if self.assignments.num_trail_entries() == num_trail_entries {
                break;
            }
            num_trail_entries = self.assignments.num_trail_entries();
        }
        Ok(())
    }

    /// Drains the pending domain events and delivers each of them to every subscribed
    /// propagator, like the solver does between propagator runs.
    pub(crate) fn notify_all_propagators(&mut self) {
        let events = self.assignments.drain_domain_events().collect::<Vec<_>>();
        for (event, domain) in events {
            for propagator_var in self.watch_list.get_affected_propagators(event, domain) {
                let context = PropagationContextWithTrailedValues::new(
                    &mut self.trailed_values,
                    &self.assignments,
                );
                let _ = self.propagator_store[propagator_var.propagator].notify(
                    context,
                    propagator_var.variable,
                    OpaqueDomainEvent::from(event),
                );
            }
        }
    }

    pub(crate) fn notify_propagator(&mut self, propagator: PropagatorId) {
        let events = self.assignments.drain_domain_events().collect::<Vec<_>>();
        for (event, domain) in events {
            for propagator_var in self.watch_list.get_affected_propagators(event, domain) {
                if propagator_var.propagator != propagator {
                    continue;
                }
                let context = PropagationContextWithTrailedValues::new(
                    &mut self.trailed_values,
                    &self.assignments,
                );
                let _ = self.propagator_store[propagator].notify(
                    context,
                    propagator_var.variable,
                    OpaqueDomainEvent::from(event),
                );
            }
        }
    }

    pub(crate) fn assert_bounds(&self, var: DomainId, lb: i32, ub: i32) {
        let actual_lb = self.lower_bound(var);
        let actual_ub = self.upper_bound(var);

        assert_eq!(
            (lb, ub), (actual_lb, actual_ub),
            "The expected bounds [{lb}..{ub}] did not match the actual bounds [{actual_lb}..{actual_ub}]"
        );
    }
}
