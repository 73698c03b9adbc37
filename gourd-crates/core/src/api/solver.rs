use std::ops::ControlFlow;

use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::outputs::EnumerationResult;
use super::outputs::OptimisationResult;
use super::outputs::SatisfactionResult;
use crate::basic_types::ConflictClause;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Contradiction;
use crate::basic_types::Interval;
use crate::basic_types::ModelError;
use crate::basic_types::Solution;
use crate::basic_types::Value;
use crate::branching::branchers::DefaultBrancher;
use crate::branching::value_selection::InDomainMin;
use crate::branching::variable_selection::InputOrder;
use crate::branching::Brancher;
use crate::constraints::Constraint;
use crate::constraints::ConstraintPoster;
use crate::engine::explanation::explain;
use crate::engine::predicates::Predicate;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::Domain;
use crate::engine::variables::DomainSpec;
use crate::engine::variables::VarId;
use crate::engine::variables::VariableKind;
use crate::engine::ConstraintId;
use crate::engine::Decision;
use crate::engine::SearchOutcome;
use crate::engine::SearchSession;
use crate::engine::SearchState;
use crate::engine::SolverOptions;
use crate::engine::State;
use crate::engine::VariableOrigin;
use crate::optimisation::branch_and_bound::BranchAndBound;
use crate::optimisation::improvement_over;
use crate::optimisation::OptimisationDirection;
use crate::optimisation::OptimisationProcedure;
use crate::statistics::log_statistic;
use crate::statistics::StatisticLogger;

/// The main interaction point which allows the creation of variables, the addition of constraints,
/// and solving problems.
///
/// # Creating Variables
/// As stated in [`crate::variables`], we can create two kinds of variables: integer variables and
/// real variables.
///
/// ```rust
/// # use gourd_core::Solver;
/// # use gourd_core::variables::DomainSpec;
/// let mut solver = Solver::default();
///
/// // We can create an integer variable with a domain in the range [0, 10]
/// let integer_between_bounds = solver.new_integer(DomainSpec::interval(0, 10)).unwrap();
///
/// // We can also create such a variable with a name, and look it up later on
/// let named = solver
///     .new_named_integer("x", DomainSpec::interval(0, 10))
///     .unwrap();
/// assert_eq!(solver.variable_by_name("x"), Ok(named));
///
/// // We can also create an integer variable with a non-continuous domain
/// let sparse_integer = solver.new_integer(DomainSpec::values([0, 3, 5])).unwrap();
/// assert_eq!(
///     solver.format_domain(sparse_integer).as_deref(),
///     Ok("x2 = {0, 3, 5}")
/// );
///
/// // Real variables are given bounds and the precision at which they count as instantiated
/// let real = solver.new_real(0.0, 10.0, 0.01).unwrap();
/// assert_eq!(solver.is_instantiated(real), Ok(false));
/// ```
///
/// # Using the Solver
/// For examples on how to use the solver, see the [root-level crate documentation](crate).
#[derive(Debug, Clone)]
pub struct Solver {
    /// The variables, constraints and statistics of the model.
    state: State,
    /// The search which is currently running, if any.
    search: SearchSession,
    random_generator: SmallRng,
    options: SolverOptions,
    /// The objective installed by [`Solver::set_objective`].
    objective: Option<Objective>,
}

#[derive(Debug, Clone, Copy)]
struct Objective {
    variable: VarId,
    direction: OptimisationDirection,
    /// Only admits solutions better than the last one found in the current search.
    bound: Option<Predicate>,
}

impl Default for Solver {
    fn default() -> Self {
        Solver::with_options(SolverOptions::default())
    }
}

impl Solver {
    /// Creates a solver with the provided [`SolverOptions`].
    pub fn with_options(solver_options: SolverOptions) -> Self {
        Solver {
            state: State::default(),
            search: SearchSession::default(),
            random_generator: SmallRng::seed_from_u64(solver_options.random_seed),
            options: solver_options,
            objective: None,
        }
    }

    /// Logs the statistics currently present in the solver with the provided objective value.
    pub fn log_statistics_with_objective(&self, objective_value: impl std::fmt::Display) {
        log_statistic("objective", objective_value);
        self.log_statistics();
    }

    /// Logs the statistics currently present in the solver.
    pub fn log_statistics(&self) {
        self.state
            .statistics
            .log(StatisticLogger::default(), self.options.verbose_statistics);
    }
}

/// Functions to create and retrieve variables.
impl Solver {
    /// Creates an integer variable with the given initial domain.
    pub fn new_integer(&mut self, domain: DomainSpec) -> Result<VarId, ModelError> {
        self.state.new_integer(&domain, None)
    }

    /// Creates an integer variable with the given initial domain, which can be looked up with
    /// [`Solver::variable_by_name`].
    pub fn new_named_integer(
        &mut self,
        name: impl Into<String>,
        domain: DomainSpec,
    ) -> Result<VarId, ModelError> {
        self.state.new_integer(&domain, Some(name.into()))
    }

    /// Creates a real variable over `[lower_bound, upper_bound]`. It counts as instantiated once
    /// its interval is at most `epsilon` wide.
    pub fn new_real(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        epsilon: f64,
    ) -> Result<VarId, ModelError> {
        self.state.new_real(lower_bound, upper_bound, epsilon, None)
    }

    /// Creates a real variable, see [`Solver::new_real`], which can be looked up with
    /// [`Solver::variable_by_name`].
    pub fn new_named_real(
        &mut self,
        name: impl Into<String>,
        lower_bound: f64,
        upper_bound: f64,
        epsilon: f64,
    ) -> Result<VarId, ModelError> {
        self.state
            .new_real(lower_bound, upper_bound, epsilon, Some(name.into()))
    }

    pub fn variable_by_name(&self, name: &str) -> Result<VarId, ModelError> {
        self.state.variable_by_name(name)
    }

    pub fn name(&self, variable: VarId) -> Option<&str> {
        self.state.names.get_name(variable)
    }

    /// The number of variables, including the truth variables of constraints.
    pub fn num_variables(&self) -> usize {
        self.state.variables.num_variables()
    }
}

/// Methods to retrieve information about variables.
///
/// Unless stated otherwise, these methods describe the domains as they are now: at the root when
/// no search is running, or at the current node of the search. A variable which was not created
/// by this solver is reported as [`ModelError::UnknownVariable`].
impl Solver {
    pub fn kind(&self, variable: VarId) -> Result<VariableKind, ModelError> {
        self.state.check_known(variable)?;
        Ok(self.state.variables.kind(variable))
    }

    pub fn is_instantiated(&self, variable: VarId) -> Result<bool, ModelError> {
        self.state.check_known(variable)?;
        Ok(self.state.variables.is_instantiated(variable))
    }

    pub fn bounds(&self, variable: VarId) -> Result<Interval, ModelError> {
        self.state.check_known(variable)?;
        Ok(self.state.variables.bounds(variable))
    }

    pub fn domain(&self, variable: VarId) -> Result<Domain, ModelError> {
        self.state.check_known(variable)?;
        Ok(self.state.variables.domain(variable))
    }

    /// The value of an instantiated variable.
    pub fn value(&self, variable: VarId) -> Result<Value, ModelError> {
        self.state.check_known(variable)?;
        self.state
            .variables
            .value(variable)
            .ok_or(ModelError::NotInstantiated(variable))
    }

    /// The value of an instantiated integer variable.
    pub fn integer_value(&self, variable: VarId) -> Result<i32, ModelError> {
        self.value(variable)?
            .as_integer()
            .ok_or(ModelError::NotInteger(variable))
    }

    /// Formats the domain of the variable as `name = value` once it is instantiated, and as
    /// `name = [lower, upper]` or `name = {a, b, c}` otherwise. Unnamed variables are shown by
    /// their handle.
    pub fn format_domain(&self, variable: VarId) -> Result<String, ModelError> {
        let domain = self.domain(variable)?;
        Ok(format!("{} = {domain}", self.label(variable)))
    }

    /// Formats the domain of an integer variable whose values index into `labels`, e.g. the
    /// colours of a map. Values without a label are shown as numbers, and domains too large to
    /// list are formatted as by [`Solver::format_domain`].
    ///
    /// # Example
    /// ```rust
    /// # use gourd_core::Solver;
    /// # use gourd_core::variables::DomainSpec;
    /// let mut solver = Solver::default();
    /// let colour = solver
    ///     .new_named_integer("colour", DomainSpec::values([0, 2]))
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     solver
    ///         .format_labelled_domain(colour, &["red", "green", "blue"])
    ///         .as_deref(),
    ///     Ok("colour = {red, blue}")
    /// );
    /// ```
    pub fn format_labelled_domain(
        &self,
        variable: VarId,
        labels: &[&str],
    ) -> Result<String, ModelError> {
        let domain = self.domain(variable)?;
        let values = match domain.integer_values() {
            Some(values) if domain.is_listable() => values,
            _ => return self.format_domain(variable),
        };

        let labelled = values
            .map(|value| {
                usize::try_from(value)
                    .ok()
                    .and_then(|index| labels.get(index))
                    .map(|label| label.to_string())
                    .unwrap_or_else(|| value.to_string())
            })
            .collect::<Vec<_>>();

        Ok(match labelled.as_slice() {
            [single] => format!("{} = {single}", self.label(variable)),
            _ => format!("{} = {{{}}}", self.label(variable), labelled.iter().join(", ")),
        })
    }

    fn label(&self, variable: VarId) -> String {
        self.name(variable)
            .map(|name| name.to_owned())
            .unwrap_or_else(|| variable.to_string())
    }
}

/// Functions for adding new constraints to the solver.
impl Solver {
    /// Add a constraint to the solver. This returns a [`ConstraintPoster`] which enables control
    /// on whether to post the constraint, or whether to reify it.
    ///
    /// The constraint is checked and becomes part of the model right away; it is propagated on the
    /// next call which propagates. Constraints can be added at any time, also during a search.
    ///
    /// # Example
    /// ```
    /// # use gourd_core::constraints;
    /// # use gourd_core::Solver;
    /// # use gourd_core::variables::DomainSpec;
    /// let mut solver = Solver::default();
    ///
    /// let a = solver.new_integer(DomainSpec::interval(0, 3)).unwrap();
    /// let b = solver.new_integer(DomainSpec::interval(0, 3)).unwrap();
    ///
    /// let _ = solver
    ///     .add_constraint(constraints::not_equals(a, b))
    ///     .unwrap()
    ///     .post();
    ///
    /// // `a < b` holds exactly when `less` is 1
    /// let less = solver
    ///     .add_constraint(constraints::less_than(a, b))
    ///     .unwrap()
    ///     .reify();
    /// assert_eq!(solver.is_instantiated(less), Ok(false));
    /// ```
    pub fn add_constraint(
        &mut self,
        constraint: Constraint,
    ) -> Result<ConstraintPoster<'_>, ModelError> {
        let (id, truth) = self.state.add_constraint(constraint)?;
        Ok(ConstraintPoster::new(self, id, truth))
    }

    pub(crate) fn post_constraint(&mut self, id: ConstraintId) -> Result<(), ConstraintOperationError> {
        self.state.post_constraint(id)
    }
}

/// Functions which propagate and search.
impl Solver {
    /// Propagates every constraint until no domain changes. Outside a search this happens at the
    /// root, where a contradiction means that the model has no solution.
    pub fn propagate(&mut self) -> Result<(), Contradiction> {
        self.search.propagate(&mut self.state)
    }

    /// Ends the current search and propagates with `assumptions` forced above the root. When this
    /// fails, [`Solver::get_explanation`] explains the failure in terms of the assumptions.
    ///
    /// The assumptions stay in place until the search is reset; [`Solver::solve_one`] searches
    /// for solutions in which they hold.
    ///
    /// # Example
    /// ```rust
    /// # use gourd_core::constraints;
    /// # use gourd_core::predicate;
    /// # use gourd_core::Solver;
    /// # use gourd_core::variables::DomainSpec;
    /// let mut solver = Solver::default();
    /// let a = solver.new_integer(DomainSpec::interval(0, 2)).unwrap();
    /// let b = solver.new_integer(DomainSpec::interval(0, 2)).unwrap();
    /// let c = solver.new_integer(DomainSpec::interval(0, 2)).unwrap();
    /// let _ = solver
    ///     .add_constraint(constraints::not_equals(a, b))
    ///     .unwrap()
    ///     .post();
    ///
    /// let result = solver.propagate_under_assumptions(&[
    ///     predicate![c == 0],
    ///     predicate![a == 1],
    ///     predicate![b == 1],
    /// ]);
    /// assert!(result.is_err());
    ///
    /// let explanation = solver.get_explanation().unwrap();
    /// assert_eq!(explanation.literals(), &[predicate![a == 1], predicate![b == 1]]);
    /// ```
    pub fn propagate_under_assumptions(
        &mut self,
        assumptions: &[Predicate],
    ) -> Result<(), Contradiction> {
        self.clear_objective_bound();
        self.search
            .propagate_under_assumptions(&mut self.state, assumptions)
    }

    /// Continues the search until the next solution.
    ///
    /// The first call searches from the root. Each following call treats the previous solution as
    /// a failure and continues after it, so repeated calls enumerate every solution once and then
    /// return [`SatisfactionResult::Exhausted`]. When an objective is set (see
    /// [`Solver::set_objective`]) only solutions which improve on the previous one are found.
    pub fn solve_one(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
    ) -> SatisfactionResult {
        let bound = self.objective.and_then(|objective| objective.bound);

        match self.next_solution(brancher, termination, bound) {
            SearchOutcome::Solution(solution) => {
                self.tighten_objective_bound(&solution);
                SatisfactionResult::Satisfiable(solution)
            }
            SearchOutcome::Exhausted => SatisfactionResult::Exhausted,
            SearchOutcome::Unknown => SatisfactionResult::Unknown,
        }
    }

    /// Calls `on_solution` for every solution which [`Solver::solve_one`] finds.
    ///
    /// # Example
    /// ```rust
    /// # use gourd_core::constraints;
    /// # use gourd_core::results::EnumerationResult;
    /// # use gourd_core::termination::Indefinite;
    /// # use gourd_core::variables::DomainSpec;
    /// # use gourd_core::Solver;
    /// let mut solver = Solver::default();
    /// let variables = (0..3)
    ///     .map(|_| solver.new_integer(DomainSpec::interval(0, 2)).unwrap())
    ///     .collect::<Vec<_>>();
    /// let _ = solver
    ///     .add_constraint(constraints::all_different(&variables))
    ///     .unwrap()
    ///     .post();
    ///
    /// let mut brancher = solver.default_brancher();
    /// let result = solver.solve_all(&mut brancher, &mut Indefinite, |_| {});
    /// assert_eq!(result, EnumerationResult::Complete { num_solutions: 6 });
    /// ```
    pub fn solve_all(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
        mut on_solution: impl FnMut(&Solution),
    ) -> EnumerationResult {
        let mut num_solutions = 0;
        loop {
            match self.solve_one(brancher, termination) {
                SatisfactionResult::Satisfiable(solution) => {
                    num_solutions += 1;
                    on_solution(&solution);
                }
                SatisfactionResult::Exhausted => {
                    return EnumerationResult::Complete { num_solutions };
                }
                SatisfactionResult::Unknown => {
                    return EnumerationResult::Incomplete { num_solutions };
                }
            }
        }
    }

    /// Optimises `objective` in the given direction with [`BranchAndBound`]. Fails only when
    /// `objective` is not a variable of this solver.
    ///
    /// When the result is [`OptimisationResult::Optimal`], the optimal solution is restored in the
    /// solver (see [`Solver::restore`]).
    ///
    /// # Example
    /// ```rust
    /// # use gourd_core::constraints;
    /// # use gourd_core::options::OptimisationDirection;
    /// # use gourd_core::results::OptimisationResult;
    /// # use gourd_core::termination::Indefinite;
    /// # use gourd_core::variables::DomainSpec;
    /// # use gourd_core::Solver;
    /// let mut solver = Solver::default();
    /// let x = solver.new_integer(DomainSpec::interval(0, 10)).unwrap();
    /// let y = solver.new_integer(DomainSpec::interval(0, 10)).unwrap();
    /// let _ = solver
    ///     .add_constraint(constraints::less_than_or_equals(constraints::sum(x, y), 7))
    ///     .unwrap()
    ///     .post();
    /// let _ = solver
    ///     .add_constraint(constraints::less_than(x, y))
    ///     .unwrap()
    ///     .post();
    ///
    /// let mut brancher = solver.default_brancher();
    /// let result = solver
    ///     .optimise(x, OptimisationDirection::Maximise, &mut brancher, &mut Indefinite)
    ///     .unwrap();
    ///
    /// let OptimisationResult::Optimal(solution) = result else {
    ///     panic!("expected an optimal solution");
    /// };
    /// assert_eq!(solution.integer_value(x), Some(3));
    /// assert_eq!(solver.integer_value(x), Ok(3));
    /// ```
    pub fn optimise<B: Brancher>(
        &mut self,
        objective: VarId,
        direction: OptimisationDirection,
        brancher: &mut B,
        termination: &mut impl TerminationCondition,
    ) -> Result<OptimisationResult, ModelError> {
        let mut procedure = BranchAndBound::new(
            direction,
            objective,
            |_: &Solver, _: &Solution| -> ControlFlow<()> { ControlFlow::Continue(()) },
        );
        procedure.optimise(brancher, termination, self)
    }

    /// Makes [`Solver::solve_one`] only find solutions which improve `objective` in the given
    /// direction over the previous solution of the same search. A loop of [`Solver::solve_one`]
    /// then reports strictly improving solutions, of which the last one is optimal.
    pub fn set_objective(
        &mut self,
        direction: OptimisationDirection,
        objective: VarId,
    ) -> Result<(), ModelError> {
        self.state.check_known(objective)?;
        self.objective = Some(Objective {
            variable: objective,
            direction,
            bound: None,
        });
        Ok(())
    }

    pub fn clear_objective(&mut self) {
        self.objective = None;
    }

    /// Ends the current search; every domain is restored to the root. The next call to
    /// [`Solver::solve_one`] starts over.
    pub fn reset_search(&mut self) {
        self.search.end(&mut self.state);
        self.clear_objective_bound();
    }

    /// Creates an instance of the [`DefaultBrancher`]: the variables created by the client in
    /// creation order, smallest value first.
    pub fn default_brancher(&self) -> DefaultBrancher {
        let variables = self
            .state
            .variables
            .variables()
            .filter(|&variable| self.state.variables.origin(variable) == VariableOrigin::Model)
            .collect::<Vec<_>>();
        DefaultBrancher::new(InputOrder::new(&variables), InDomainMin)
    }

    pub fn search_state(&self) -> SearchState {
        self.search.search_state()
    }

    /// The decisions of the current branch of the search, oldest first.
    pub fn decisions(&self) -> &[Decision] {
        self.search.decisions()
    }

    /// The number of checkpoints which are open. It is 0 at the root.
    pub fn decision_level(&self) -> usize {
        self.state.decision_level()
    }

    pub(crate) fn next_solution<B: Brancher + ?Sized>(
        &mut self,
        brancher: &mut B,
        termination: &mut impl TerminationCondition,
        bound: Option<Predicate>,
    ) -> SearchOutcome {
        self.search.next_solution(
            &mut self.state,
            brancher,
            termination,
            &mut self.random_generator,
            bound,
        )
    }

    fn tighten_objective_bound(&mut self, solution: &Solution) {
        let Some(objective) = self.objective.as_mut() else {
            return;
        };
        let kind = self.state.variables.kind(objective.variable);
        objective.bound = solution
            .value(objective.variable)
            .map(|value| improvement_over(objective.variable, kind, objective.direction, value));
    }

    fn clear_objective_bound(&mut self) {
        if let Some(objective) = self.objective.as_mut() {
            objective.bound = None;
        }
    }
}

/// Functions to record and restore solutions.
impl Solver {
    /// Snapshots the current solution. Only valid while the search is at a solution.
    pub fn record(&self) -> Result<Solution, ModelError> {
        if self.search.search_state() != SearchState::Solution {
            return Err(ModelError::NotInSolutionState);
        }
        self.state
            .variables
            .solution()
            .ok_or(ModelError::NotInSolutionState)
    }

    /// Ends the current search and instantiates every variable to its value in `solution`,
    /// without searching. Afterwards the solver is at that solution: [`Solver::record`] returns
    /// it, and [`Solver::solve_one`] starts a new search.
    pub fn restore(&mut self, solution: &Solution) -> Result<(), ModelError> {
        self.clear_objective_bound();
        self.search.restore_solution(&mut self.state, solution)
    }
}

/// Functions to explain contradictions.
impl Solver {
    /// Explains the most recent contradiction as a [`ConflictClause`]: predicates which cannot
    /// hold together. Forcing all of them and propagating reproduces a contradiction, and no
    /// predicate can be left out. An empty clause means that the model has no solution.
    ///
    /// Unless [`crate::options::LearningOptions::learn_explanations`] is turned off, the clause
    /// is added to the model as a nogood. A contradiction which cannot be reproduced from its
    /// predicates is reported with the predicates as they were recorded, and is not learned.
    pub fn get_explanation(&mut self) -> Result<ConflictClause, ModelError> {
        let conflict = self
            .search
            .last_conflict()
            .cloned()
            .ok_or(ModelError::NoConflict)?;

        let explanation = explain(&self.state, &conflict.literals, conflict.contradiction);
        let verified = explanation.is_verified();
        let clause = explanation.into_clause();

        let statistics = &mut self.state.statistics.learned_clause_statistics;
        statistics.num_explanations += 1;
        statistics.num_removed_literals += (conflict.literals.len() - clause.len()) as u64;

        if self.options.learning.learn_explanations && verified && !clause.is_empty() {
            statistics.num_learned_clauses += 1;
            if clause.len() == 1 {
                statistics.num_unit_nogoods_learned += 1;
            }
            let _ = self.state.add_nogood(clause.literals().to_vec());
        }

        Ok(clause)
    }
}
