use super::results::OptimisationResult;
use super::results::SatisfactionResult;
use crate::basic_types::CSPSolverExecutionFlag;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Solution;
use crate::branching::branchers::IndependentVariableValueBrancher;
use crate::branching::value_selection::InDomainMin;
#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::Smallest;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::branching::InOrderTieBreaker;
use crate::engine::search::MaximiseObjective;
use crate::engine::search::MinimiseObjective;
use crate::engine::search::NoObjective;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::ConstraintSatisfactionSolver;
use crate::options::SolverOptions;
use crate::propagators::BinaryGreaterOrEqualPropagator;
use crate::propagators::LinearLessOrEqualPropagator;
use crate::propagators::LinearNotEqualPropagator;
use crate::propagators::MemberPropagator;
use crate::results::solution_iterator::SolutionIterator;
use crate::results::ProblemSolution;
use crate::results::SolutionReference;
use crate::statistics::log_statistic;
use crate::statistics::log_statistic_postfix;

/// The main interaction point which allows the creation of variables, the addition of constraints,
/// and solving problems.
///
/// # Creating Variables
/// ```rust
/// # use quince_solver::Solver;
/// # use quince_solver::variables::TransformableVariable;
/// let mut solver = Solver::default();
///
/// // We can create an integer variable with a domain in the range [0, 10]
/// let integer_between_bounds = solver.new_bounded_integer(0, 10);
///
/// // We can also create an integer variable with a non-continuous domain
/// let sparse_integer = solver.new_sparse_integer(vec![0, 3, 5]);
///
/// // Additionally, we can create an affine view over a variable with both a scale and an offset
/// let view_over_integer = integer_between_bounds.scaled(-1).offset(15);
/// ```
///
/// # Using the Solver
/// For examples on how to use the solver, see the [root-level crate documentation](crate).
pub struct Solver {
    /// The internal [`ConstraintSatisfactionSolver`] which is used to solve the problems.
    satisfaction_solver: ConstraintSatisfactionSolver,
    /// The function is called whenever an optimisation run finds a solution; see
    /// [`Solver::with_solution_callback`].
    solution_callback: Box<dyn Fn(&Solution)>,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            satisfaction_solver: Default::default(),
            solution_callback: create_empty_function(),
        }
    }
}

/// Creates a place-holder empty function which does not do anything when a solution is found.
fn create_empty_function() -> Box<dyn Fn(&Solution)> {
    Box::new(|_| {})
}

impl std::fmt::Debug for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("satisfaction_solver", &self.satisfaction_solver)
            .finish()
    }
}

impl Solver {
    /// Creates a solver with the provided [`SolverOptions`].
    pub fn with_options(solver_options: SolverOptions) -> Self {
        Solver {
            satisfaction_solver: ConstraintSatisfactionSolver::new(solver_options),
            solution_callback: create_empty_function(),
        }
    }

    /// Adds a call-back to the [`Solver`] which is called every time that a solution is found when
    /// optimising using [`Solver::maximise`] or [`Solver::minimise`].
    ///
    /// Note that this will also perform the call-back on the optimal solution which is returned in
    /// [`OptimisationResult::Optimal`].
    pub fn with_solution_callback(&mut self, solution_callback: impl Fn(&Solution) + 'static) {
        self.solution_callback = Box::new(solution_callback);
    }

    /// Logs the statistics currently present in the solver with the provided objective value.
    pub fn log_statistics_with_objective(&self, objective_value: i64) {
        log_statistic("objective", objective_value);
        self.log_statistics();
    }

    /// Logs the statistics currently present in the solver.
    pub fn log_statistics(&self) {
        self.satisfaction_solver.log_statistics();
        log_statistic_postfix();
    }
}

/// Methods to retrieve information about variables.
impl Solver {
    /// Get the lower-bound of the given [`IntegerVariable`] at the root level (after propagation).
    pub fn lower_bound(&self, variable: &impl IntegerVariable) -> i32 {
        variable.lower_bound(&self.satisfaction_solver.assignments)
    }

    /// Get the upper-bound of the given [`IntegerVariable`] at the root level (after propagation).
    pub fn upper_bound(&self, variable: &impl IntegerVariable) -> i32 {
        variable.upper_bound(&self.satisfaction_solver.assignments)
    }
}

/// Functions to create integer variables.
impl Solver {
    /// Create a new integer variable with the given bounds.
    ///
    /// # Example
    /// ```rust
    /// # use quince_solver::Solver;
    /// let mut solver = Solver::default();
    ///
    /// // We can create an integer variable with a domain in the range [0, 10]
    /// let integer_between_bounds = solver.new_bounded_integer(0, 10);
    /// ```
    pub fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.satisfaction_solver
            .create_new_integer_variable(lower_bound, upper_bound)
    }

    /// Create a new integer variable which has a domain of predefined values. Duplicate values
    /// are removed.
    ///
    /// # Example
    /// ```rust
    /// # use quince_solver::Solver;
    /// let mut solver = Solver::default();
    ///
    /// // We can create an integer variable with a non-continuous domain in the following way
    /// let sparse_integer = solver.new_sparse_integer(vec![0, 3, 5]);
    /// ```
    pub fn new_sparse_integer(&mut self, values: impl Into<Vec<i32>>) -> DomainId {
        self.satisfaction_solver
            .create_new_integer_variable_sparse(values.into())
    }
}

/// Functions for adding new constraints to the solver.
impl Solver {
    /// Adds the constraint `\sum terms_i <= rhs`.
    ///
    /// If the constraint makes the problem trivially unsatisfiable, a
    /// [`ConstraintOperationError`] is returned and the solver is unusable except for reporting
    /// infeasibility.
    pub fn add_linear_less_than_or_equals<Var: IntegerVariable + 'static>(
        &mut self,
        terms: impl Into<Box<[Var]>>,
        rhs: i32,
    ) -> Result<(), ConstraintOperationError> {
        self.satisfaction_solver
            .add_propagator(LinearLessOrEqualPropagator::new(terms.into(), rhs))
    }

    /// Adds the constraint `\sum terms_i != rhs`.
    pub fn add_linear_not_equals<Var: IntegerVariable + 'static>(
        &mut self,
        terms: impl Into<Box<[Var]>>,
        rhs: i32,
    ) -> Result<(), ConstraintOperationError> {
        self.satisfaction_solver
            .add_propagator(LinearNotEqualPropagator::new(terms.into(), rhs))
    }

    /// Adds the constraint `x >= y`.
    pub fn add_greater_than_or_equals<Var: IntegerVariable + 'static>(
        &mut self,
        x: Var,
        y: Var,
    ) -> Result<(), ConstraintOperationError> {
        self.satisfaction_solver
            .add_propagator(BinaryGreaterOrEqualPropagator::new(x, y, 0))
    }

    /// Adds the constraint `x > y`.
    pub fn add_greater_than<Var: IntegerVariable + 'static>(
        &mut self,
        x: Var,
        y: Var,
    ) -> Result<(), ConstraintOperationError> {
        self.satisfaction_solver
            .add_propagator(BinaryGreaterOrEqualPropagator::new(x, y, 1))
    }

    /// Adds the constraint `variable in values`.
    pub fn add_member<Var: IntegerVariable + 'static>(
        &mut self,
        variable: Var,
        values: impl Into<Vec<i32>>,
    ) -> Result<(), ConstraintOperationError> {
        self.satisfaction_solver
            .add_propagator(MemberPropagator::new(variable, values.into()))
    }
}

/// Functions for solving with the constraints that have been added to the [`Solver`].
impl Solver {
    /// Searches for a solution from a fresh state and returns whether one was found.
    ///
    /// On `true` the solver is parked on the solution: it can be inspected through
    /// [`Solver::solution`], and the search continues from this exact point through
    /// [`Solver::next_solution`].
    pub fn solve(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> bool {
        self.satisfaction_solver.solve(termination, brancher)
            == CSPSolverExecutionFlag::Feasible
    }

    /// Resumes the search which is parked on a solution and returns whether another solution was
    /// found. Calling this when the solver is not parked on a solution is an error.
    pub fn next_solution(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> bool {
        self.satisfaction_solver.next_solution(termination, brancher)
            == CSPSolverExecutionFlag::Feasible
    }

    /// Returns the solution the solver is currently parked on.
    pub fn solution(&self) -> SolutionReference<'_> {
        self.satisfaction_solver.get_solution_reference()
    }

    /// Solves the current model in the [`Solver`] until it finds a solution (or is indicated to
    /// terminate by the provided [`TerminationCondition`]) and returns a [`SatisfactionResult`]
    /// which can be used to obtain the found solution.
    ///
    /// The solver is reset to the root afterwards; use [`Solver::solution_iterator`] or the
    /// [`Solver::solve`]/[`Solver::next_solution`] pair to enumerate several solutions.
    pub fn satisfy<B: Brancher, T: TerminationCondition>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
    ) -> SatisfactionResult {
        match self.satisfaction_solver.solve(termination, brancher) {
            CSPSolverExecutionFlag::Feasible => {
                let solution: Solution = self.satisfaction_solver.get_solution_reference().into();
                self.satisfaction_solver.restore_state_at_root(brancher);
                SatisfactionResult::Satisfiable(solution)
            }
            CSPSolverExecutionFlag::Infeasible => {
                self.satisfaction_solver.restore_state_at_root(brancher);
                SatisfactionResult::Unsatisfiable
            }
            CSPSolverExecutionFlag::Timeout => {
                self.satisfaction_solver.restore_state_at_root(brancher);
                SatisfactionResult::Unknown
            }
        }
    }

    /// Returns an iterator-like structure which parks the solver on every solution of the current
    /// model and never reports the same solution twice.
    pub fn solution_iterator<'this, 'brancher, 'termination, B: Brancher, T: TerminationCondition>(
        &'this mut self,
        brancher: &'brancher mut B,
        termination: &'termination mut T,
    ) -> SolutionIterator<'this, 'brancher, 'termination, B, T> {
        SolutionIterator::new(&mut self.satisfaction_solver, brancher, termination)
    }

    /// Solves the model currently in the [`Solver`] to optimality where the provided
    /// `objective_variable` is minimised (or is indicated to terminate by the provided
    /// [`TerminationCondition`]).
    ///
    /// It returns an [`OptimisationResult`] which can be used to retrieve the optimal solution if
    /// it exists.
    pub fn minimise(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
        objective_variable: DomainId,
    ) -> OptimisationResult {
        self.satisfaction_solver
            .set_objective(MinimiseObjective::new(objective_variable));
        self.optimise_internal(brancher, termination, objective_variable, false)
    }

    /// Solves the model currently in the [`Solver`] to optimality where the provided
    /// `objective_variable` is maximised (or is indicated to terminate by the provided
    /// [`TerminationCondition`]).
    ///
    /// It returns an [`OptimisationResult`] which can be used to retrieve the optimal solution if
    /// it exists.
    pub fn maximise(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
        objective_variable: DomainId,
    ) -> OptimisationResult {
        self.satisfaction_solver
            .set_objective(MaximiseObjective::new(objective_variable));
        self.optimise_internal(brancher, termination, objective_variable, true)
    }

    /// Finds increasingly good solutions by resuming the search after every one; the installed
    /// objective manager excludes all solutions which do not improve on the incumbent, so the
    /// solution the search is exhausted with is optimal.
    fn optimise_internal(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
        objective_variable: DomainId,
        is_maximising: bool,
    ) -> OptimisationResult {
        let objective_multiplier = if is_maximising { -1_i64 } else { 1_i64 };
        let mut best_solution: Option<Solution> = None;

        let mut flag = self.satisfaction_solver.solve(termination, brancher);
        while flag == CSPSolverExecutionFlag::Feasible
            && self.satisfaction_solver.is_parked_on_solution()
        {
            let solution: Solution = self.satisfaction_solver.get_solution_reference().into();
            self.log_statistics_with_objective(
                objective_multiplier
                    * i64::from(self.solution().get_integer_value(objective_variable)),
            );
            (self.solution_callback)(&solution);
            best_solution = Some(solution);

            flag = self.satisfaction_solver.next_solution(termination, brancher);
        }

        self.satisfaction_solver.restore_state_at_root(brancher);
        self.satisfaction_solver.set_objective(NoObjective);

        match (flag, best_solution) {
            (CSPSolverExecutionFlag::Timeout, Some(solution)) => {
                OptimisationResult::Satisfiable(solution)
            }
            (CSPSolverExecutionFlag::Timeout, None) => OptimisationResult::Unknown,
            (_, Some(solution)) => OptimisationResult::Optimal(solution),
            (_, None) => OptimisationResult::Unsatisfiable,
        }
    }
}

/// Default brancher implementation.
impl Solver {
    /// Creates a default [`IndependentVariableValueBrancher`] which uses [`Smallest`] as
    /// [`VariableSelector`] and [`InDomainMin`] as its [`ValueSelector`]; it searches over all
    /// integer variables defined in the solver so far.
    pub fn default_brancher(&self) -> DefaultBrancher {
        let variables = self
            .satisfaction_solver
            .assignments
            .get_domains()
            .collect::<Vec<_>>();
        IndependentVariableValueBrancher::new(Smallest::new(&variables), InDomainMin)
    }
}

/// The type of [`Brancher`] which is created by [`Solver::default_brancher`]. It selects the
/// variable with the smallest lower bound and assigns it its minimum value.
pub type DefaultBrancher = IndependentVariableValueBrancher<
    DomainId,
    Smallest<DomainId, InOrderTieBreaker<DomainId, i32>>,
    InDomainMin,
>;
