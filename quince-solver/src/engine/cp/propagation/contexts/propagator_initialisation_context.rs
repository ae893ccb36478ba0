use super::PropagationContext;
use super::PropagationContextWithTrailedValues;
use super::ReadDomains;
use crate::engine::cp::domain_events::DomainEvents;
use crate::engine::cp::propagation::LocalId;
#[cfg(doc)]
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::propagation::PropagatorVarId;
use crate::engine::cp::Assignments;
use crate::engine::cp::TrailedValues;
use crate::engine::cp::WatchListCP;
use crate::engine::cp::Watchers;
use crate::engine::variables::IntegerVariable;

/// [`PropagatorInitialisationContext`] is used when [`Propagator`]s are initialised after
/// creation.
///
/// It is the communication point between the solver and the [`Propagator`] during
/// initialisation. Propagators use the [`PropagatorInitialisationContext`] to register to domain
/// changes of variables, to allocate reversible integers, and to retrieve the current bounds of
/// variables.
#[derive(Debug)]
pub(crate) struct PropagatorInitialisationContext<'a> {
    watch_list: &'a mut WatchListCP,
    pub(crate) trailed_values: &'a mut TrailedValues,
    propagator_id: PropagatorId,

    pub(crate) assignments: &'a mut Assignments,
}

impl PropagatorInitialisationContext<'_> {
    pub(crate) fn new<'a>(
        watch_list: &'a mut WatchListCP,
        trailed_values: &'a mut TrailedValues,
        propagator_id: PropagatorId,
        assignments: &'a mut Assignments,
    ) -> PropagatorInitialisationContext<'a> {
        PropagatorInitialisationContext {
            watch_list,
            trailed_values,
            propagator_id,

            assignments,
        }
    }

    pub(crate) fn as_trailed_readonly(&mut self) -> PropagationContextWithTrailedValues {
        PropagationContextWithTrailedValues::new(self.trailed_values, self.assignments)
    }

    pub(crate) fn as_readonly(&self) -> PropagationContext {
        PropagationContext::new(self.assignments)
    }

    /// Subscribes the propagator to the given [`DomainEvents`].
    ///
    /// The domain events determine when [`Propagator::notify()`] will be called on the
    /// propagator. The [`LocalId`] is internal information related to the propagator,
    /// which is used when calling [`Propagator::notify()`] to identify the variable.
    ///
    /// Each variable *must* have a unique [`LocalId`]. Most often this would be its index of the
    /// variable in the internal array of variables.
    ///
    /// Note that the [`LocalId`] is used to differentiate between [`DomainId`]s and
    /// [`AffineView`]s.
    ///
    /// A variable which is already fixed will never change again, so no watcher is installed for
    /// it.
    ///
    /// [`DomainId`]: crate::engine::variables::DomainId
    /// [`AffineView`]: crate::engine::variables::AffineView
    pub(crate) fn register<Var: IntegerVariable>(
        &mut self,
        var: Var,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) -> Var {
        if PropagationContext::new(self.assignments).is_fixed(&var) {
            return var;
        }

        let propagator_var = PropagatorVarId {
            propagator: self.propagator_id,
            variable: local_id,
        };

        let mut watchers = Watchers::new(propagator_var, self.watch_list);
        var.watch_all(&mut watchers, domain_events.get_int_events());

        var
    }
}

mod private {
    use super::*;
    use crate::engine::cp::propagation::contexts::HasAssignments;
    use crate::engine::cp::propagation::contexts::HasTrailedValues;

    impl HasAssignments for PropagatorInitialisationContext<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }

    impl HasTrailedValues for PropagatorInitialisationContext<'_> {
        fn trailed_values(&self) -> &TrailedValues {
            self.trailed_values
        }

        fn trailed_values_mut(&mut self) -> &mut TrailedValues {
            self.trailed_values
        }
    }
}
