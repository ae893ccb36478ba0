use crate::create_statistics_struct;

create_statistics_struct!(
    /// Measures of the search process, tracked over the entire lifetime of the solver (i.e. they
    /// are not reset after a restart or after a solution is found).
    Measures {
        /// The number of nodes visited, where a node is a single application of a branch of a
        /// decision; both the left and the right branch of a decision count as a node.
        num_nodes: u64,
        /// The number of decisions taken by the solver.
        num_decisions: u64,
        /// The number of times propagation (or the application of a branch) has derived an empty
        /// domain.
        num_conflicts: u64,
        /// The number of times a single decision level has been removed during search.
        num_backtracks: u64,
        /// The number of restarts which have been performed.
        num_restarts: u64,
        /// The number of solutions which have been found.
        num_solutions: u64,
        /// The number of (propagation) engine entries which have been pushed to the trail.
        num_propagations: u64,
        /// The amount of time (in milliseconds) spent in the solve call(s).
        time_spent_in_solver: u64,
    }
);
