mod assignments;
pub(crate) mod domain_events;
pub(crate) mod event_sink;
pub(crate) mod opaque_domain_event;
pub(crate) mod propagation;
mod propagator_queue;
pub(crate) mod test_solver;
mod trailed;
mod watch_list_cp;

pub use assignments::Assignments;
pub use assignments::EmptyDomain;
pub(crate) use propagator_queue::PropagatorQueue;
pub(crate) use trailed::*;
pub use watch_list_cp::IntDomainEvent;
pub(crate) use watch_list_cp::WatchListCP;
pub use watch_list_cp::Watchers;
