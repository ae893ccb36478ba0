use downcast_rs::impl_downcast;
use downcast_rs::Downcast;

use super::contexts::PropagationContextWithTrailedValues;
use super::contexts::PropagatorInitialisationContext;
use super::PropagationContext;
use super::PropagationContextMut;
#[cfg(doc)]
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
#[cfg(doc)]
use crate::create_statistics_struct;
use crate::engine::cp::opaque_domain_event::OpaqueDomainEvent;
use crate::engine::cp::propagation::local_id::LocalId;
#[cfg(doc)]
use crate::engine::ConstraintSatisfactionSolver;
use crate::statistics::statistic_logger::StatisticLogger;

// Used to cast `Box<dyn Propagator>` back to a concrete propagator type; rust inherently does
// not allow downcasting from the trait definition to its concrete type.
impl_downcast!(Propagator);

/// All propagators implement the [`Propagator`] trait, which defines the main propagator logic
/// with regards to filtering domains and detecting conflicts.
///
/// The only required functions are [`Propagator::name`], [`Propagator::initialise_at_root`], and
/// [`Propagator::debug_propagate_from_scratch`]; all other functions have default
/// implementations. For initial development, the required functions are enough, but a more mature
/// implementation considers all functions in most cases.
///
/// See the [`crate::engine::cp::propagation`] documentation for more details.
pub(crate) trait Propagator: Downcast {
    /// Return the name of the propagator, this is a convenience method that is used for printing.
    fn name(&self) -> &str;

    /// Initialises the propagator and performs root propagation. This method is called only once
    /// by the solver when the propagator is added, and the solver is guaranteed to be at the
    /// root level at that point.
    ///
    /// The propagator subscribes to domain changes of its variables here, through
    /// [`PropagatorInitialisationContext::register`], and allocates the reversible integers which
    /// back its incremental state. The return value is the same as for
    /// [`Propagator::propagate`].
    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext,
    ) -> PropagationStatusCP;

    /// A propagation method that is used to help debugging.
    ///
    /// This method propagates without relying on internal data structures, hence the immutable
    /// &self parameter. It is usually best to implement this propagation method in the simplest
    /// but correct way. When the `debug-checks` feature is enabled this method is used to double
    /// check the fixed point reached during search and the conflicts that have been reported.
    ///
    /// Propagators are not required to propagate until a fixed point. It will be called again by
    /// the solver until no further propagations happen.
    fn debug_propagate_from_scratch(&self, context: PropagationContextMut) -> PropagationStatusCP;

    /// Propagate method that will be called during search (e.g. in
    /// [`ConstraintSatisfactionSolver::solve`]).
    ///
    /// This method extends the current partial assignments with inferred domain changes found by
    /// the [`Propagator`]. In case no conflict has been detected it should return [`Result::Ok`],
    /// otherwise it should return a [`Result::Err`] with an [`Inconsistency`]; either because a
    /// propagation caused an empty domain ([`Inconsistency::EmptyDomain`]) or because the logic
    /// of the propagator found the current state to be inconsistent
    /// ([`Inconsistency::Conflict`]).
    ///
    /// Propagators are not required to propagate until a fixed point. It will be called
    /// again by the solver until no further propagations happen.
    ///
    /// By default, this function calls [`Propagator::debug_propagate_from_scratch`].
    fn propagate(&mut self, context: PropagationContextMut) -> PropagationStatusCP {
        self.debug_propagate_from_scratch(context)
    }

    /// Called when an event happens to one of the variables the propagator is subscribed to. It
    /// indicates whether the provided event should cause the propagator to be enqueued.
    ///
    /// This can be used to incrementally maintain data structures or perform propagations, and
    /// should only be used for computationally cheap logic. Expensive computation should be
    /// performed in the [`Propagator::propagate()`] method.
    ///
    /// By default the propagator is always enqueued for every event. Not all propagators will
    /// benefit from implementing this, so it is not required to do so.
    ///
    /// Note that the variables and events to which the propagator is subscribed are determined
    /// upon propagator initialisation via [`Propagator::initialise_at_root`] by calling
    /// [`PropagatorInitialisationContext::register()`].
    fn notify(
        &mut self,
        _context: PropagationContextWithTrailedValues,
        _local_id: LocalId,
        _event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }

    /// Called each time the [`ConstraintSatisfactionSolver`] backtracks, the propagator can then
    /// update its internal data structures given the new variable domains.
    ///
    /// Note that data stored in reversible integers is restored by the solver itself and does
    /// not need to be repaired here.
    ///
    /// By default this function does nothing.
    fn synchronise(&mut self, _context: PropagationContext) {}

    /// Returns the priority of the propagator represented as an integer. Lower values mean higher
    /// priority and the priority determines the order in which propagators will be asked to
    /// propagate. It is custom for simpler propagators to have lower priority values.
    ///
    /// By default the priority is set to 3. It is expected that propagator implementations would
    /// set this value to some appropriate value.
    fn priority(&self) -> u32 {
        // setting an arbitrary priority by default
        3
    }

    /// Returns whether the constraint enforced by this propagator is satisfied by every
    /// combination of values left in the domains ([`Entailment::Satisfied`]), violated by every
    /// combination ([`Entailment::Violated`]), or neither can be concluded yet
    /// ([`Entailment::Unknown`]).
    ///
    /// A propagator which reports [`Entailment::Satisfied`] may mark itself passive through
    /// [`PropagationContextMut::set_passive`] since it can never filter again. An implementation
    /// is not needed for correctness, as [`Propagator::propagate`] should still detect conflicts
    /// on its own.
    fn is_entailed(&self, _context: PropagationContext) -> Entailment {
        Entailment::Unknown
    }

    /// Logs statistics of the propagator using the provided [`StatisticLogger`].
    ///
    /// It is recommended to create a struct through the [`create_statistics_struct!`] macro!
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}
}

/// Indicator of what to do when a propagator is notified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EnqueueDecision {
    /// The propagator should be enqueued.
    Enqueue,
    /// The propagator should not be enqueued.
    Skip,
}

/// The result of [`Propagator::is_entailed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Entailment {
    /// The constraint holds under every assignment in the current domains.
    Satisfied,
    /// The constraint is violated under every assignment in the current domains.
    Violated,
    /// Neither of the other two cases could be established.
    Unknown,
}
