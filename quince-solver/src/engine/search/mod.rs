mod decision;
mod measures;
mod objective;
mod restart_strategy;

pub use decision::Decision;
pub use decision::DecisionOperator;
pub(crate) use measures::Measures;
pub(crate) use objective::MaximiseObjective;
pub(crate) use objective::MinimiseObjective;
pub(crate) use objective::NoObjective;
pub(crate) use objective::ObjectiveManager;
pub use restart_strategy::RestartOptions;
pub(crate) use restart_strategy::RestartStrategy;
