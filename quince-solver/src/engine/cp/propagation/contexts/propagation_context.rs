use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::TrailedInteger;
use crate::engine::cp::TrailedValues;
use crate::engine::variables::IntegerVariable;

/// The context provided to [`Propagator::notify`][super::super::Propagator::notify]. It exposes
/// the current domains read-only, together with mutable access to the reversible integers so
/// that incremental state can be updated before deciding whether to enqueue.
#[derive(Debug)]
pub(crate) struct PropagationContextWithTrailedValues<'a> {
    trailed_values: &'a mut TrailedValues,
    assignments: &'a Assignments,
}

impl<'a> PropagationContextWithTrailedValues<'a> {
    pub(crate) fn new(trailed_values: &'a mut TrailedValues, assignments: &'a Assignments) -> Self {
        Self {
            trailed_values,
            assignments,
        }
    }
}

/// [`PropagationContext`] is a read-only view of the current domains, used for entailment
/// checks, synchronisation after backtracking, and from-scratch debug propagation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PropagationContext<'a> {
    assignments: &'a Assignments,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> Self {
        PropagationContext { assignments }
    }
}

/// [`PropagationContextMut`] is passed to propagators during propagation. It may be queried to
/// retrieve information about the current variable domains, and used to apply changes to the
/// domain of a variable. Every change made through it records the owning propagator as the
/// cause on the trail.
///
/// Note that the [`PropagationContextMut`] is the only point of communication between the
/// propagators and the solver during propagation.
#[derive(Debug)]
pub(crate) struct PropagationContextMut<'a> {
    trailed_values: &'a mut TrailedValues,
    assignments: &'a mut Assignments,
    propagator_id: PropagatorId,
    activity: TrailedInteger,
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(
        trailed_values: &'a mut TrailedValues,
        assignments: &'a mut Assignments,
        propagator_id: PropagatorId,
        activity: TrailedInteger,
    ) -> Self {
        PropagationContextMut {
            trailed_values,
            assignments,
            propagator_id,
            activity,
        }
    }

    pub(crate) fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext {
            assignments: self.assignments,
        }
    }

    /// Marks the propagator as passive for the remainder of the current decision level and all
    /// levels below it. A passive propagator receives no notifications and is never enqueued;
    /// backtracking past the level of this call reactivates it.
    pub(crate) fn set_passive(&mut self) {
        let activity = self.activity;
        self.trailed_values.assign(activity, 0);
    }
}

/// A trait which defines common methods for retrieving the [`Assignments`] from the structure
/// which implements this trait.
pub trait HasAssignments {
    /// Returns the stored [`Assignments`].
    fn assignments(&self) -> &Assignments;
}

pub(crate) trait HasTrailedValues {
    fn trailed_values(&self) -> &TrailedValues;
    fn trailed_values_mut(&mut self) -> &mut TrailedValues;
}

mod private {
    use super::*;

    impl HasTrailedValues for PropagationContextWithTrailedValues<'_> {
        fn trailed_values(&self) -> &TrailedValues {
            self.trailed_values
        }

        fn trailed_values_mut(&mut self) -> &mut TrailedValues {
            self.trailed_values
        }
    }

    impl HasTrailedValues for PropagationContextMut<'_> {
        fn trailed_values(&self) -> &TrailedValues {
            self.trailed_values
        }

        fn trailed_values_mut(&mut self) -> &mut TrailedValues {
            self.trailed_values
        }
    }

    impl HasAssignments for PropagationContext<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }

    impl HasAssignments for PropagationContextWithTrailedValues<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }

    impl HasAssignments for PropagationContextMut<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }
}

pub(crate) trait ManipulateTrailedValues: HasTrailedValues {
    fn new_trailed_integer(&mut self, initial_value: i64) -> TrailedInteger {
        self.trailed_values_mut().grow(initial_value)
    }

    fn value(&self, trailed_integer: TrailedInteger) -> i64 {
        self.trailed_values().read(trailed_integer)
    }

    fn add_assign(&mut self, trailed_integer: TrailedInteger, addition: i64) {
        self.trailed_values_mut()
            .add_assign(trailed_integer, addition);
    }

    fn assign(&mut self, trailed_integer: TrailedInteger, value: i64) {
        self.trailed_values_mut().assign(trailed_integer, value);
    }
}

impl<T: HasTrailedValues> ManipulateTrailedValues for T {}

pub(crate) trait ReadDomains: HasAssignments {
    /// Returns `true` if the domain of the given variable is singleton.
    fn is_fixed<Var: IntegerVariable>(&self, var: &Var) -> bool {
        self.lower_bound(var) == self.upper_bound(var)
    }

    fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.assignments())
    }

    fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.assignments())
    }

    fn contains<Var: IntegerVariable>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.assignments(), value)
    }

    fn iterate_domain<Var: IntegerVariable>(&self, var: &Var) -> impl Iterator<Item = i32> {
        var.iterate_domain(self.assignments())
    }
}

impl<T: HasAssignments> ReadDomains for T {}

impl PropagationContextMut<'_> {
    pub(crate) fn remove<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        var.remove(self.assignments, value, Some(self.propagator_id))
    }

    pub(crate) fn remove_interval<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        lower: i32,
        upper: i32,
    ) -> Result<(), EmptyDomain> {
        var.remove_interval(self.assignments, lower, upper, Some(self.propagator_id))
    }

    pub(crate) fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        var.set_upper_bound(self.assignments, bound, Some(self.propagator_id))
    }

    pub(crate) fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        var.set_lower_bound(self.assignments, bound, Some(self.propagator_id))
    }
}
