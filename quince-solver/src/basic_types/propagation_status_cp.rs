use crate::engine::cp::EmptyDomain;

/// The result of invoking a constraint programming propagator. The propagation can either succeed
/// or identify a conflict.
pub(crate) type PropagationStatusCP = Result<(), Inconsistency>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inconsistency {
    /// A domain was narrowed past the point where it was empty.
    EmptyDomain,
    /// A propagator determined that its constraint cannot be satisfied under the current
    /// assignments, without narrowing a domain to observe it.
    Conflict,
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}
