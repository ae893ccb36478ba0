pub(crate) mod propagation_context;
pub(crate) mod propagator_initialisation_context;

pub use propagation_context::HasAssignments;
pub(crate) use propagation_context::HasTrailedValues;
pub(crate) use propagation_context::ManipulateTrailedValues;
pub(crate) use propagation_context::PropagationContext;
pub(crate) use propagation_context::PropagationContextMut;
pub(crate) use propagation_context::PropagationContextWithTrailedValues;
pub(crate) use propagation_context::ReadDomains;
pub(crate) use propagator_initialisation_context::PropagatorInitialisationContext;
