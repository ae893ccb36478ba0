use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::basic_types::CSPSolverExecutionFlag;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::SolutionReference;
use crate::basic_types::Stopwatch;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::containers::KeyedVec;
use crate::engine::cp::opaque_domain_event::OpaqueDomainEvent;
use crate::engine::cp::propagation::EnqueueDecision;
use crate::engine::cp::propagation::LocalId;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::PropagationContextWithTrailedValues;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::propagation::PropagatorInitialisationContext;
use crate::engine::cp::propagation::PropagatorStore;
use crate::engine::cp::Assignments;
use crate::engine::cp::IntDomainEvent;
use crate::engine::cp::PropagatorQueue;
use crate::engine::cp::TrailedInteger;
use crate::engine::cp::TrailedValues;
use crate::engine::cp::WatchListCP;
use crate::engine::DebugHelper;
use crate::engine::search::Decision;
use crate::engine::search::Measures;
use crate::engine::search::NoObjective;
use crate::engine::search::ObjectiveManager;
use crate::engine::search::RestartOptions;
use crate::engine::search::RestartStrategy;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::DomainId;
use crate::quince_assert_extreme;
use crate::quince_assert_moderate;
use crate::quince_assert_simple;
use crate::statistics::statistic_logging::should_log_statistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// A solver which attempts to find a solution to the constraint satisfaction problem which has
/// been posted to it, using a depth-first search which propagates to fixpoint at every node.
///
/// The domains of the variables and the internal state of the propagators are both recorded on
/// trails, so that all of the work performed below a decision is undone by a single backtrack
/// step (see [\[1\]](https://link.springer.com/chapter/10.1007/10704567_16) for a discussion of
/// this technique). The search itself is driven by a small state machine which makes it possible
/// to park the solver on a solution and resume the search for the next solution later without
/// redoing any work; see [`ConstraintSatisfactionSolver::solve`] and
/// [`ConstraintSatisfactionSolver::next_solution`].
///
/// # Bibliography
/// \[1\] C. Schulte, ‘Comparing trailing and copying for constraint programming’, Proceedings of
/// the 1999 International Conference on Logic Programming, pp. 275–289, 1999.
#[derive(Debug)]
pub struct ConstraintSatisfactionSolver {
    /// The solver continuously changes states during the search. This state is the
    /// externally observable one; it records the outcome of the most recent operation and guards
    /// the call protocol of the solver.
    state: CSPSolverState,
    /// The phase of the search state machine at which the search loop continues.
    search_state: SearchState,
    /// The list of propagators. Propagators live here and are queried when events (domain
    /// changes) happen.
    propagators: PropagatorStore,
    /// Tracks information about all integer variables, including the trail of domain changes
    /// that were made since the last backtrack point.
    pub(crate) assignments: Assignments,
    /// The reversible integers which propagators use to back their incremental state.
    trailed_values: TrailedValues,
    /// Contains information on which propagator to notify upon integer events, e.g., lower or
    /// upper bound change of a variable.
    watch_list_cp: WatchListCP,
    /// Dictates the order in which propagators will be called to propagate.
    propagator_queue: PropagatorQueue,
    /// One reversible flag per propagator; a propagator whose flag is zero has detected that it
    /// can no longer propagate at the current node and is not notified of events until
    /// backtracking reactivates it.
    propagator_activity: KeyedVec<PropagatorId, TrailedInteger>,
    /// A buffer into which domain events are drained before they are dispatched to the watching
    /// propagators.
    event_drain: Vec<(IntDomainEvent, DomainId)>,
    /// The decisions along the current branch of the search tree. The decision at index `i`
    /// produces the branches of decision level `i + 1`; a slot is reused once the subtree of its
    /// decision has been fully explored.
    decision_arena: Vec<Decision>,
    /// Decides when a restart may take place; if absent the solver never restarts on its own.
    restart_strategy: Option<RestartStrategy>,
    /// Tightens the bound on the objective variable after every solution during optimisation.
    objective_manager: Box<dyn ObjectiveManager>,
    /// A set of counters updated during the search.
    counters: Measures,
    /// Miscellaneous constant parameters used by the solver.
    internal_parameters: SatisfactionSolverOptions,
}

/// Options for the [`ConstraintSatisfactionSolver`].
pub struct SatisfactionSolverOptions {
    /// The options used by the restart strategy; when this is `None` the solver never restarts
    /// of its own accord.
    pub restart_options: Option<RestartOptions>,
    /// Whether the solver parks after a solution is found, so that the search can be resumed
    /// from that point, or keeps enumerating solutions until the search tree is exhausted.
    pub stop_at_first_solution: bool,
    /// Whether the search is unwound all the way to the root after every solution instead of
    /// climbing to the deepest decision with an untried branch.
    pub restart_after_each_solution: bool,
    /// The random generator which is handed to the brancher whenever a decision is requested.
    pub random_generator: SmallRng,
}

impl Default for SatisfactionSolverOptions {
    fn default() -> Self {
        SatisfactionSolverOptions {
            restart_options: None,
            stop_at_first_solution: true,
            restart_after_each_solution: false,
            random_generator: SmallRng::seed_from_u64(42),
        }
    }
}

impl std::fmt::Debug for SatisfactionSolverOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SatisfactionSolverOptions").finish()
    }
}

/// The phase at which the search loop continues when it is (re)entered.
///
/// The loop moves from [`SearchState::Init`] through repeated
/// [`SearchState::OpenNode`]/[`SearchState::DownLeftBranch`]/[`SearchState::DownRightBranch`]/
/// [`SearchState::UpBranch`] steps until the tree is exhausted, a solution parks the solver in
/// [`SearchState::Resume`], or a restart unwinds it through [`SearchState::Restart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchState {
    /// Propagate the root once before any decision is taken.
    Init,
    /// Poll the termination condition and the restart strategy, then ask the brancher for the
    /// next decision; a node for which the brancher has no decision left is a solution.
    OpenNode,
    /// Push a new decision level and apply the first branch of the newest decision.
    DownLeftBranch,
    /// Push a new decision level and apply the remaining branch of the decision which was
    /// backtracked over last.
    DownRightBranch,
    /// Pop the current decision level; either the undone decision still has a branch to try or
    /// the climb continues. At the root the search tree is exhausted.
    UpBranch,
    /// Parked on a solution; only [`ConstraintSatisfactionSolver::next_solution`] re-arms the
    /// loop.
    Resume,
    /// Unwind to the root, repost the objective bound, and reopen a node there.
    Restart,
}

// The solver is in at most one state at any point in time.
#[derive(Default, Debug)]
enum CSPSolverStateInternal {
    #[default]
    Ready,
    Solving,
    ContainsSolution,
    Exhausted,
    Infeasible,
    Timeout,
}

/// The outcome of the most recent operation performed by the solver.
///
/// Note that infeasibility is sticky: once the problem is known to admit no solution at all, the
/// solver never leaves that state. Exhaustion, by contrast, only means that the search tree has
/// been fully explored with the solutions found so far; the solver can be reset through
/// [`ConstraintSatisfactionSolver::restore_state_at_root`].
#[derive(Default, Debug)]
struct CSPSolverState {
    internal_state: CSPSolverStateInternal,
}

impl CSPSolverState {
    fn is_ready(&self) -> bool {
        matches!(self.internal_state, CSPSolverStateInternal::Ready)
    }

    fn has_solution(&self) -> bool {
        matches!(
            self.internal_state,
            CSPSolverStateInternal::ContainsSolution
        )
    }

    fn is_exhausted(&self) -> bool {
        matches!(self.internal_state, CSPSolverStateInternal::Exhausted)
    }

    fn is_infeasible(&self) -> bool {
        matches!(self.internal_state, CSPSolverStateInternal::Infeasible)
    }

    fn declare_ready(&mut self) {
        quince_assert_simple!(!self.is_infeasible());
        self.internal_state = CSPSolverStateInternal::Ready;
    }

    fn declare_solving(&mut self) {
        quince_assert_simple!(self.is_ready() || self.has_solution());
        self.internal_state = CSPSolverStateInternal::Solving;
    }

    fn declare_solution_found(&mut self) {
        quince_assert_simple!(!self.is_infeasible());
        self.internal_state = CSPSolverStateInternal::ContainsSolution;
    }

    fn declare_exhausted(&mut self) {
        quince_assert_simple!(!self.is_infeasible());
        self.internal_state = CSPSolverStateInternal::Exhausted;
    }

    fn declare_infeasible(&mut self) {
        self.internal_state = CSPSolverStateInternal::Infeasible;
    }

    fn declare_timeout(&mut self) {
        quince_assert_simple!(!self.is_infeasible());
        self.internal_state = CSPSolverStateInternal::Timeout;
    }
}

impl Default for ConstraintSatisfactionSolver {
    fn default() -> Self {
        ConstraintSatisfactionSolver::new(SatisfactionSolverOptions::default())
    }
}

// Main API.
impl ConstraintSatisfactionSolver {
    pub fn new(solver_options: SatisfactionSolverOptions) -> Self {
        ConstraintSatisfactionSolver {
            state: CSPSolverState::default(),
            search_state: SearchState::Init,
            propagators: PropagatorStore::default(),
            assignments: Assignments::default(),
            trailed_values: TrailedValues::default(),
            watch_list_cp: WatchListCP::default(),
            propagator_queue: PropagatorQueue::new(5),
            propagator_activity: KeyedVec::default(),
            event_drain: vec![],
            decision_arena: vec![],
            restart_strategy: solver_options.restart_options.map(RestartStrategy::new),
            objective_manager: Box::new(NoObjective),
            counters: Measures::default(),
            internal_parameters: solver_options,
        }
    }

    /// Creates an integer variable with the domain `lower_bound..=upper_bound`.
    pub fn create_new_integer_variable(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        quince_assert_simple!(
            !self.state.is_infeasible(),
            "Variables cannot be created in an infeasible state"
        );

        let domain_id = self.assignments.grow(lower_bound, upper_bound);
        self.watch_list_cp.grow();

        domain_id
    }

    /// Creates an integer variable whose domain holds exactly the given values.
    pub fn create_new_integer_variable_sparse(&mut self, values: Vec<i32>) -> DomainId {
        quince_assert_simple!(
            !self.state.is_infeasible(),
            "Variables cannot be created in an infeasible state"
        );

        let domain_id = self.assignments.create_new_integer_variable_sparse(values);
        self.watch_list_cp.grow();

        domain_id
    }

    /// Posts a propagator to the solver and propagates it to fixpoint together with the
    /// propagators which were already present.
    ///
    /// If the solver is already known to be infeasible, or posting the propagator makes it so,
    /// an error is returned and the solver is unusable except for
    /// [`ConstraintSatisfactionSolver::solve`] reporting infeasibility.
    pub(crate) fn add_propagator(
        &mut self,
        propagator_to_add: impl Propagator + 'static,
    ) -> Result<(), ConstraintOperationError> {
        if self.state.is_infeasible() {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        quince_assert_simple!(
            self.get_decision_level() == 0,
            "Propagators can only be added at the root level"
        );
        quince_assert_simple!(
            propagator_to_add.priority() <= 3,
            "The propagator priority exceeds 3. Currently we only support values up to 3."
        );

        let new_propagator_id = self.propagators.alloc(Box::new(propagator_to_add));
        // A propagator starts out active; it may mark itself passive during propagation.
        let activity = self.trailed_values.grow(1);
        let _ = self.propagator_activity.push(activity);

        let new_propagator = &mut self.propagators[new_propagator_id];
        let mut initialisation_context = PropagatorInitialisationContext::new(
            &mut self.watch_list_cp,
            &mut self.trailed_values,
            new_propagator_id,
            &mut self.assignments,
        );

        if new_propagator
            .initialise_at_root(&mut initialisation_context)
            .is_err()
        {
            self.state.declare_infeasible();
            return Err(ConstraintOperationError::InfeasiblePropagator);
        }

        self.propagator_queue
            .enqueue_propagator(new_propagator_id, new_propagator.priority());

        if self.propagate_to_fixpoint().is_err() {
            self.counters.num_conflicts += 1;
            self.state.declare_infeasible();
            return Err(ConstraintOperationError::InfeasiblePropagator);
        }

        Ok(())
    }

    /// Installs the objective manager which is consulted on every branch and every solution.
    pub(crate) fn set_objective(&mut self, objective_manager: impl ObjectiveManager + 'static) {
        quince_assert_simple!(
            self.get_decision_level() == 0,
            "The objective can only be changed at the root level"
        );
        self.objective_manager = Box::new(objective_manager);
    }

    /// Searches for a solution from a fresh state.
    ///
    /// When a solution is found and
    /// [`SatisfactionSolverOptions::stop_at_first_solution`] is set, the solver parks on the
    /// solution and [`ConstraintSatisfactionSolver::next_solution`] continues the search from
    /// that point. Otherwise the search runs until the tree is exhausted or `termination`
    /// indicates that the solver should stop, and the brancher observes every solution through
    /// [`Brancher::on_solution`].
    ///
    /// The returned flag is [`CSPSolverExecutionFlag::Feasible`] if this call found at least one
    /// solution.
    pub fn solve(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> CSPSolverExecutionFlag {
        if self.state.is_infeasible() {
            return CSPSolverExecutionFlag::Infeasible;
        }

        quince_assert_simple!(
            self.state.is_ready(),
            "solve requires a fresh state; see restore_state_at_root"
        );

        self.search_state = SearchState::Init;
        self.start_search(termination, brancher)
    }

    /// Continues a search which is parked on a solution.
    ///
    /// Calling this when the solver is not parked on a solution is an error.
    pub fn next_solution(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> CSPSolverExecutionFlag {
        if self.state.is_infeasible() {
            return CSPSolverExecutionFlag::Infeasible;
        }

        quince_assert_simple!(
            self.search_state == SearchState::Resume,
            "next_solution can only be called when the solver is parked on a solution"
        );

        self.search_state = if self.internal_parameters.restart_after_each_solution {
            SearchState::Restart
        } else {
            SearchState::UpBranch
        };
        self.start_search(termination, brancher)
    }

    /// Backtracks to the root and makes the solver ready for a new [`solve`] call.
    ///
    /// This is a no-op on an infeasible solver since infeasibility is a property of the problem
    /// rather than of the search.
    ///
    /// [`solve`]: ConstraintSatisfactionSolver::solve
    pub fn restore_state_at_root(&mut self, brancher: &mut impl Brancher) {
        if self.state.is_infeasible() {
            return;
        }

        if self.get_decision_level() > 0 {
            self.backtrack(0, brancher);
        }

        self.search_state = SearchState::Init;
        self.state.declare_ready();
    }

    /// Returns the solution the solver is currently parked on.
    pub fn get_solution_reference(&self) -> SolutionReference<'_> {
        quince_assert_simple!(
            self.state.has_solution(),
            "The solver is not parked on a solution"
        );
        SolutionReference::new(&self.assignments)
    }

    /// Returns whether the solver is parked on a solution, i.e. whether
    /// [`ConstraintSatisfactionSolver::next_solution`] may be called.
    pub(crate) fn is_parked_on_solution(&self) -> bool {
        self.search_state == SearchState::Resume
    }

    pub(crate) fn get_decision_level(&self) -> usize {
        self.assignments.get_decision_level()
    }

    /// Logs the statistics of the solver and of every posted propagator.
    pub fn log_statistics(&self) {
        if should_log_statistics() {
            self.counters.log(StatisticLogger::default());
            for (index, propagator) in self.propagators.iter_propagators().enumerate() {
                propagator.log_statistics(StatisticLogger::new([
                    propagator.name(),
                    "number",
                    index.to_string().as_str(),
                ]));
            }
        }
    }
}

// Measure accessors.
impl ConstraintSatisfactionSolver {
    /// The number of nodes visited; both branches of a decision count as a node.
    pub fn num_nodes(&self) -> u64 {
        self.counters.num_nodes
    }

    /// The number of decisions taken by the solver.
    pub fn num_decisions(&self) -> u64 {
        self.counters.num_decisions
    }

    /// The number of times propagation (or the application of a branch) derived an empty domain.
    pub fn num_conflicts(&self) -> u64 {
        self.counters.num_conflicts
    }

    /// The number of times a single decision level was removed during search.
    pub fn num_backtracks(&self) -> u64 {
        self.counters.num_backtracks
    }

    /// The number of restarts which have been performed.
    pub fn num_restarts(&self) -> u64 {
        self.counters.num_restarts
    }

    /// The number of solutions which have been found, over all solve calls.
    pub fn num_solutions(&self) -> u64 {
        self.counters.num_solutions
    }

    /// The number of trail entries pushed by propagators.
    pub fn num_propagations(&self) -> u64 {
        self.counters.num_propagations
    }

    /// The wall-clock time (in milliseconds) spent inside the solve calls.
    pub fn time_spent_in_solver(&self) -> u64 {
        self.counters.time_spent_in_solver
    }
}

// The search loop.
impl ConstraintSatisfactionSolver {
    fn start_search(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> CSPSolverExecutionFlag {
        let start_time = Stopwatch::starting_now();
        let num_solutions_at_entry = self.counters.num_solutions;

        self.state.declare_solving();
        let result = self.solve_internal(termination, brancher, num_solutions_at_entry);

        self.counters.time_spent_in_solver += start_time.elapsed().as_millis() as u64;

        result
    }

    fn solve_internal(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
        num_solutions_at_entry: u64,
    ) -> CSPSolverExecutionFlag {
        loop {
            match self.search_state {
                SearchState::Init => {
                    if self.propagate_to_fixpoint().is_err() {
                        self.counters.num_conflicts += 1;
                        self.state.declare_infeasible();
                        return CSPSolverExecutionFlag::Infeasible;
                    }
                    self.search_state = SearchState::OpenNode;
                }
                SearchState::OpenNode => {
                    if let Some(flag) = self.open_node(termination, brancher) {
                        return flag;
                    }
                }
                SearchState::DownLeftBranch | SearchState::DownRightBranch => {
                    self.descend_branch();
                }
                SearchState::UpBranch => {
                    if let Some(flag) = self.climb_up(brancher, num_solutions_at_entry) {
                        return flag;
                    }
                }
                SearchState::Restart => {
                    if let Some(flag) = self.restart_during_search(brancher, num_solutions_at_entry)
                    {
                        return flag;
                    }
                }
                SearchState::Resume => {
                    unreachable!("the search loop is re-armed before it is resumed")
                }
            }
        }
    }

    /// Polls the termination condition and the restart strategy, then asks the brancher for the
    /// next decision. A node for which the brancher has no decision left is a solution.
    fn open_node(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> Option<CSPSolverExecutionFlag> {
        if termination.should_stop() {
            self.state.declare_timeout();
            return Some(CSPSolverExecutionFlag::Timeout);
        }

        if self.get_decision_level() > 0
            && self
                .restart_strategy
                .as_ref()
                .is_some_and(|strategy| strategy.should_restart())
            && !brancher.is_restart_pointless()
        {
            self.search_state = SearchState::Restart;
            return None;
        }

        let mut context = SelectionContext::new(
            &self.assignments,
            &mut self.internal_parameters.random_generator,
        );

        match brancher.next_decision(&mut context) {
            Some(decision) => {
                termination.decision_has_been_made();
                self.counters.num_decisions += 1;

                let decision_level = self.get_decision_level();
                if decision_level < self.decision_arena.len() {
                    self.decision_arena[decision_level] = decision;
                } else {
                    quince_assert_moderate!(decision_level == self.decision_arena.len());
                    self.decision_arena.push(decision);
                }

                self.search_state = SearchState::DownLeftBranch;
                None
            }
            None => self.handle_solution(brancher),
        }
    }

    fn handle_solution(&mut self, brancher: &mut impl Brancher) -> Option<CSPSolverExecutionFlag> {
        quince_assert_extreme!(DebugHelper::debug_no_propagator_violated(
            &self.assignments,
            &self.propagators,
        ));

        self.counters.num_solutions += 1;
        self.state.declare_solution_found();

        let solution = SolutionReference::new(&self.assignments);
        brancher.on_solution(solution);
        self.objective_manager.on_solution(solution);

        if self.internal_parameters.stop_at_first_solution {
            self.search_state = SearchState::Resume;
            return Some(CSPSolverExecutionFlag::Feasible);
        }

        self.search_state = if self.internal_parameters.restart_after_each_solution {
            SearchState::Restart
        } else {
            SearchState::UpBranch
        };
        None
    }

    /// Pushes a new decision level and applies the next untried branch of the decision directly
    /// below it, followed by propagation to fixpoint.
    fn descend_branch(&mut self) {
        self.counters.num_nodes += 1;
        self.declare_new_decision_level();

        match self.apply_next_branch() {
            Ok(()) => self.search_state = SearchState::OpenNode,
            Err(_) => {
                // The empty domain is left in place; the climb which follows cleans it up.
                self.counters.num_conflicts += 1;
                if let Some(strategy) = &mut self.restart_strategy {
                    strategy.notify_conflict();
                }
                self.search_state = SearchState::UpBranch;
            }
        }
    }

    fn apply_next_branch(&mut self) -> PropagationStatusCP {
        let decision_index = self.get_decision_level() - 1;
        self.decision_arena[decision_index].build_next(&mut self.assignments)?;
        self.objective_manager.apply(&mut self.assignments)?;
        self.propagate_to_fixpoint()
    }

    /// Pops the current decision level. At the root the search tree is exhausted; otherwise the
    /// undone decision is re-branched if it still has an untried branch.
    fn climb_up(
        &mut self,
        brancher: &mut impl Brancher,
        num_solutions_at_entry: u64,
    ) -> Option<CSPSolverExecutionFlag> {
        let decision_level = self.get_decision_level();
        if decision_level == 0 {
            return Some(self.conclude_search_exhausted(num_solutions_at_entry));
        }

        self.backtrack(decision_level - 1, brancher);
        self.counters.num_backtracks += 1;

        if self.decision_arena[decision_level - 1].has_next() {
            self.search_state = SearchState::DownRightBranch;
        }

        None
    }

    /// Unwinds the search to the root and reopens a node there.
    fn restart_during_search(
        &mut self,
        brancher: &mut impl Brancher,
        num_solutions_at_entry: u64,
    ) -> Option<CSPSolverExecutionFlag> {
        self.counters.num_restarts += 1;

        if self.get_decision_level() > 0 {
            self.backtrack(0, brancher);
        }
        if let Some(strategy) = &mut self.restart_strategy {
            strategy.notify_restart();
        }
        brancher.on_restart();

        // The objective bound from the incumbent solution has to be reposted now that the root
        // is reopened; it failing means no improving solution exists.
        let root_status = match self.objective_manager.apply(&mut self.assignments) {
            Ok(()) => self.propagate_to_fixpoint(),
            Err(empty_domain) => Err(empty_domain.into()),
        };

        match root_status {
            Ok(()) => {
                self.search_state = SearchState::OpenNode;
                None
            }
            Err(_) => {
                self.counters.num_conflicts += 1;
                Some(self.conclude_search_exhausted(num_solutions_at_entry))
            }
        }
    }

    fn conclude_search_exhausted(
        &mut self,
        num_solutions_at_entry: u64,
    ) -> CSPSolverExecutionFlag {
        if self.counters.num_solutions == 0 {
            self.state.declare_infeasible();
            return CSPSolverExecutionFlag::Infeasible;
        }

        self.state.declare_exhausted();

        if self.counters.num_solutions > num_solutions_at_entry {
            CSPSolverExecutionFlag::Feasible
        } else {
            CSPSolverExecutionFlag::Infeasible
        }
    }

    fn declare_new_decision_level(&mut self) {
        self.assignments.increase_decision_level();
        self.trailed_values.increase_decision_level();
    }

    /// Changes the state based on the propagation results. Any unprocessed events which remain
    /// after a failing propagation are discarded by the backtrack which must follow it.
    fn propagate_to_fixpoint(&mut self) -> PropagationStatusCP {
        let num_trail_entries_before = self.assignments.num_trail_entries();
        let mut status = Ok(());

        self.notify_propagators_about_domain_events();

        while let Some(propagator_id) = self.propagator_queue.pop() {
            let propagator = &mut self.propagators[propagator_id];
            let context = PropagationContextMut::new(
                &mut self.trailed_values,
                &mut self.assignments,
                propagator_id,
                self.propagator_activity[propagator_id],
            );

            match propagator.propagate(context) {
                Ok(()) => self.notify_propagators_about_domain_events(),
                Err(inconsistency) => {
                    status = Err(inconsistency);
                    break;
                }
            }
        }

        self.counters.num_propagations +=
            (self.assignments.num_trail_entries() - num_trail_entries_before) as u64;

        if status.is_ok() {
            quince_assert_extreme!(DebugHelper::debug_fixed_point_propagation(
                &self.trailed_values,
                &self.assignments,
                &self.propagators,
                &self.propagator_activity,
            ));
        }

        status
    }

    /// Drains the domain events which accumulated in the assignments and notifies every watching
    /// propagator, including the propagator which caused the event. Passive propagators are
    /// skipped.
    fn notify_propagators_about_domain_events(&mut self) {
        quince_assert_simple!(self.event_drain.is_empty());
        self.event_drain.extend(self.assignments.drain_domain_events());

        for (event, domain) in self.event_drain.drain(..) {
            for propagator_var in self.watch_list_cp.get_affected_propagators(event, domain) {
                if self
                    .trailed_values
                    .read(self.propagator_activity[propagator_var.propagator])
                    != 1
                {
                    continue;
                }

                let propagator = &mut self.propagators[propagator_var.propagator];
                let context = PropagationContextWithTrailedValues::new(
                    &mut self.trailed_values,
                    &self.assignments,
                );

                Self::notify_propagator(
                    &mut self.propagator_queue,
                    propagator_var.propagator,
                    propagator,
                    context,
                    propagator_var.variable,
                    event.into(),
                );
            }
        }
    }

    fn notify_propagator(
        propagator_queue: &mut PropagatorQueue,
        propagator_id: PropagatorId,
        propagator: &mut dyn Propagator,
        context: PropagationContextWithTrailedValues,
        local_id: LocalId,
        event: OpaqueDomainEvent,
    ) {
        let enqueue_decision = propagator.notify(context, local_id, event);

        if enqueue_decision == EnqueueDecision::Enqueue {
            propagator_queue.enqueue_propagator(propagator_id, propagator.priority());
        }
    }

    /// Restores the domains and the reversible values to `backtrack_level` and reports every
    /// unassignment to the brancher. The propagator queue and any pending events are discarded.
    fn backtrack(&mut self, backtrack_level: usize, brancher: &mut impl Brancher) {
        quince_assert_simple!(backtrack_level < self.get_decision_level());

        self.assignments
            .synchronise(backtrack_level)
            .iter()
            .for_each(|&(domain_id, previous_value)| {
                brancher.on_unassign_integer(domain_id, previous_value)
            });
        self.trailed_values.synchronise(backtrack_level);

        self.propagator_queue.clear();
        self.event_drain.clear();

        for propagator in self.propagators.iter_propagators_mut() {
            propagator.synchronise(PropagationContext::new(&self.assignments));
        }
    }
}
