use enumset::EnumSet;

use crate::engine::cp::opaque_domain_event::OpaqueDomainEvent;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::IntDomainEvent;
use crate::engine::cp::Watchers;

pub trait IntegerVariable: Clone {
    type AffineView: IntegerVariable;

    /// Get the lower bound of the variable.
    fn lower_bound(&self, assignment: &Assignments) -> i32;

    /// Get the upper bound of the variable.
    fn upper_bound(&self, assignment: &Assignments) -> i32;

    /// Determine whether the value is in the domain of this variable.
    fn contains(&self, assignment: &Assignments, value: i32) -> bool;

    /// Iterate over the values of the domain of this variable.
    fn iterate_domain(&self, assignment: &Assignments) -> impl Iterator<Item = i32>;

    /// Remove a value from the domain of this variable.
    fn remove(
        &self,
        assignment: &mut Assignments,
        value: i32,
        cause: Option<PropagatorId>,
    ) -> Result<(), EmptyDomain>;

    /// Remove all values in the closed interval `lower..=upper` from the domain of this
    /// variable. An interval that covers no representable value of the variable is a no-op.
    fn remove_interval(
        &self,
        assignment: &mut Assignments,
        lower: i32,
        upper: i32,
        cause: Option<PropagatorId>,
    ) -> Result<(), EmptyDomain>;

    /// Tighten the lower bound of the domain of this variable.
    fn set_lower_bound(
        &self,
        assignment: &mut Assignments,
        value: i32,
        cause: Option<PropagatorId>,
    ) -> Result<(), EmptyDomain>;

    /// Tighten the upper bound of the domain of this variable.
    fn set_upper_bound(
        &self,
        assignment: &mut Assignments,
        value: i32,
        cause: Option<PropagatorId>,
    ) -> Result<(), EmptyDomain>;

    /// Register a watch for this variable on the given domain events.
    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<IntDomainEvent>);

    /// Decode a domain event for this variable.
    fn unpack_event(&self, event: OpaqueDomainEvent) -> IntDomainEvent;
}
