use std::fmt::Debug;
use std::fmt::Formatter;

use log::warn;

use super::cp::propagation::store::PropagatorStore;
use super::cp::TrailedInteger;
use super::cp::TrailedValues;
use crate::containers::KeyedVec;
use crate::engine::cp::propagation::contexts::PropagationContext;
use crate::engine::cp::propagation::Entailment;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::Assignments;

#[derive(Copy, Clone)]
pub(crate) struct DebugDyn<'a> {
    trait_name: &'a str,
}

impl<'a> DebugDyn<'a> {
    pub(crate) fn from(trait_name: &'a str) -> Self {
        DebugDyn { trait_name }
    }
}

impl Debug for DebugDyn<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<dyn {}>", self.trait_name)
    }
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct DebugHelper {}

impl DebugHelper {
    /// Method which checks whether the reported fixed point is correct (i.e. whether any
    /// propagations/conflicts were missed)
    ///
    /// This method is only to be called after the solver completed propagation until a fixed
    /// point and no conflict was detected
    pub(crate) fn debug_fixed_point_propagation(
        trailed_values: &TrailedValues,
        assignments: &Assignments,
        propagators: &PropagatorStore,
        propagator_activity: &KeyedVec<PropagatorId, TrailedInteger>,
    ) -> bool {
        let mut assignments_clone = assignments.clone();
        let mut trailed_values_clone = trailed_values.clone();
        // Check whether propagators missed anything
        //
        //  It works by asking each propagator to propagate from scratch, and checking whether any
        // new propagations took place
        //
        //  If a new propagation took place, then the main propagation loop
        //  missed at least one propagation, indicating buggy behaviour
        //
        //  Two notes:
        //      1. It could still be that the main propagation loop propagates more than it
        //         should; this will not be detected with this debug check
        //      2. we assume fixed-point propagation, it could be in the future that this may
        //         change
        for (propagator_id, propagator) in propagators.iter_propagators().enumerate() {
            let num_entries_on_trail_before_propagation = assignments_clone.num_trail_entries();

            let propagator_id = PropagatorId(propagator_id as u32);
            let context = PropagationContextMut::new(
                &mut trailed_values_clone,
                &mut assignments_clone,
                propagator_id,
                propagator_activity[propagator_id],
            );
            let propagation_status_cp = propagator.debug_propagate_from_scratch(context);

            if let Err(ref failure_reason) = propagation_status_cp {
                warn!(
                    "Propagator '{}' with id '{propagator_id}' seems to have missed a conflict in its regular propagation algorithms!
                     Aborting!\n
                     Failure: {failure_reason:?}", propagator.name()
                );
                panic!();
            }

            let num_missed_propagations =
                assignments_clone.num_trail_entries() - num_entries_on_trail_before_propagation;

            if num_missed_propagations > 0 {
                eprintln!(
                    "Propagator '{}' with id '{propagator_id}' missed domain changes:",
                    propagator.name(),
                );

                for idx in
                    num_entries_on_trail_before_propagation..assignments_clone.num_trail_entries()
                {
                    let trail_entry = assignments_clone.get_trail_entry(idx);
                    eprintln!("  - {:?}: {:?}", trail_entry.domain_id, trail_entry.change);
                }

                panic!("missed propagations");
            }
        }
        true
    }

    /// Checks that no propagator reports its constraint as violated. To be called whenever the
    /// solver declares the current assignments a solution.
    pub(crate) fn debug_no_propagator_violated(
        assignments: &Assignments,
        propagators: &PropagatorStore,
    ) -> bool {
        for (propagator_id, propagator) in propagators.iter_propagators().enumerate() {
            let entailment = propagator.is_entailed(PropagationContext::new(assignments));

            if entailment == Entailment::Violated {
                warn!(
                    "Propagator '{}' with id '{propagator_id}' reports a violated constraint in a state which was declared a solution!",
                    propagator.name()
                );
                panic!();
            }
        }
        true
    }
}
