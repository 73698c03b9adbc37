use std::fmt::Display;
use std::fmt::Formatter;

use log::debug;
use log::trace;

use crate::basic_types::Contradiction;
use crate::basic_types::ModelError;
use crate::basic_types::Random;
use crate::basic_types::Solution;
use crate::basic_types::Value;
use crate::branching::value_selection::InDomainMin;
use crate::branching::value_selection::ValueSelector;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::engine::predicates::Predicate;
use crate::engine::predicates::PredicateConstructor;
use crate::engine::termination::TerminationCondition;
use crate::engine::State;
use crate::gourd_assert_moderate;
use crate::gourd_assert_simple;

/// The state of the depth-first search of a [`crate::Solver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchState {
    /// The search has not finished; it may not have started yet.
    Exploring,
    /// The current domains are a solution.
    Solution,
    /// Every part of the search space has been explored.
    Exhausted,
}

impl Display for SearchState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchState::Exploring => write!(f, "exploring"),
            SearchState::Solution => write!(f, "solution"),
            SearchState::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// A choice made by the search: the predicate which was posted and the trail checkpoint opened
/// for it. Undoing the decision restores the domains to the moment before the checkpoint and
/// posts the negated predicate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decision {
    predicate: Predicate,
    checkpoint: usize,
}

impl Decision {
    pub fn predicate(&self) -> Predicate {
        self.predicate
    }

    pub fn checkpoint(&self) -> usize {
        self.checkpoint
    }
}

/// The result of looking for the next solution.
#[derive(Debug)]
pub(crate) enum SearchOutcome {
    Solution(Solution),
    Exhausted,
    /// The termination condition stopped the search; it can be resumed.
    Unknown,
}

/// The most recent contradiction, with the predicates which were forced when it happened.
#[derive(Clone, Debug)]
pub(crate) struct RecordedConflict {
    pub(crate) literals: Vec<Predicate>,
    pub(crate) contradiction: Contradiction,
}

/// The decision stack of one search.
///
/// A session opens a checkpoint above the root when it starts, so every change it makes is
/// undone when it ends. Reporting a solution leaves the domains at that solution; asking for the
/// next one treats the solution as a failure.
#[derive(Clone, Debug)]
pub(crate) struct SearchSession {
    search_state: SearchState,
    started: bool,
    /// The domains were set from a recorded solution rather than by search.
    restored: bool,
    /// Propagation failed outside of [`SearchSession::next_solution`]; the node is backtracked
    /// from before the search continues.
    node_failed: bool,
    /// Predicates forced at the checkpoint of the session, before any decision.
    assumptions: Vec<Predicate>,
    decisions: Vec<Decision>,
    /// Negated decisions which hold in the current branch, with the checkpoint they were
    /// posted at.
    refutations: Vec<(usize, Predicate)>,
    last_conflict: Option<RecordedConflict>,
}

impl Default for SearchSession {
    fn default() -> Self {
        SearchSession {
            search_state: SearchState::Exploring,
            started: false,
            restored: false,
            node_failed: false,
            assumptions: vec![],
            decisions: vec![],
            refutations: vec![],
            last_conflict: None,
        }
    }
}

impl SearchSession {
    pub(crate) fn search_state(&self) -> SearchState {
        self.search_state
    }

    pub(crate) fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    pub(crate) fn last_conflict(&self) -> Option<&RecordedConflict> {
        self.last_conflict.as_ref()
    }

    pub(crate) fn record_conflict(&mut self, literals: Vec<Predicate>, contradiction: Contradiction) {
        self.last_conflict = Some(RecordedConflict {
            literals,
            contradiction,
        });
    }

    /// The predicates forced in the current branch, in the order they were posted.
    pub(crate) fn path_literals(&self) -> Vec<Predicate> {
        let mut literals = self
            .decisions
            .iter()
            .map(|decision| (decision.checkpoint, decision.predicate))
            .chain(self.refutations.iter().copied())
            .collect::<Vec<_>>();
        literals.sort_by_key(|&(checkpoint, _)| checkpoint);
        self.assumptions
            .iter()
            .copied()
            .chain(literals.into_iter().map(|(_, predicate)| predicate))
            .collect()
    }

    /// Undoes everything the session changed.
    pub(crate) fn end(&mut self, state: &mut State) {
        if self.started {
            state.restore_to(0);
        }
        self.decisions.clear();
        self.refutations.clear();
        self.assumptions.clear();
        self.started = false;
        self.restored = false;
        self.node_failed = false;
        self.search_state = SearchState::Exploring;
    }

    /// Propagates the current domains; outside a search this happens at the root.
    pub(crate) fn propagate(&mut self, state: &mut State) -> Result<(), Contradiction> {
        state.propagate_to_fixed_point().inspect_err(|&contradiction| {
            state.statistics.engine_statistics.num_conflicts += 1;
            self.record_conflict(self.path_literals(), contradiction);
            self.node_failed = self.started;
        })
    }

    /// Ends the current search and starts a new one in which `assumptions` hold. The assumptions
    /// are part of every conflict recorded in this search.
    pub(crate) fn propagate_under_assumptions(
        &mut self,
        state: &mut State,
        assumptions: &[Predicate],
    ) -> Result<(), Contradiction> {
        self.end(state);
        if !self.begin(state) {
            return Err(self.root_conflict());
        }
        self.assumptions = assumptions.to_vec();

        let result = assumptions
            .iter()
            .try_for_each(|&assumption| state.post_predicate(assumption))
            .and_then(|()| state.propagate_to_fixed_point());
        if let Err(contradiction) = result {
            state.statistics.engine_statistics.num_conflicts += 1;
            self.record_conflict(assumptions.to_vec(), contradiction);
            self.node_failed = true;
        }
        result
    }

    /// Ends the current search and sets every variable to its value in `solution`, without
    /// propagating. The session is left in the [`SearchState::Solution`] state; continuing the
    /// search starts over from the root.
    pub(crate) fn restore_solution(
        &mut self,
        state: &mut State,
        solution: &Solution,
    ) -> Result<(), ModelError> {
        if solution.num_variables() != state.variables.num_variables() {
            return Err(ModelError::IncompatibleSolution);
        }

        self.end(state);
        state.restore_to(0);
        state.new_checkpoint();
        self.started = true;

        for (variable, value) in solution.iter() {
            let fixed = match value {
                Value::Integer(value) => state.post_predicate(variable.equality_predicate(value)),
                Value::Real { lower, upper } => state
                    .post_predicate(variable.lower_bound_predicate(lower))
                    .and_then(|()| state.post_predicate(variable.upper_bound_predicate(upper))),
            };
            if fixed.is_err() {
                self.end(state);
                return Err(ModelError::IncompatibleSolution);
            }
        }

        self.restored = true;
        self.search_state = SearchState::Solution;
        Ok(())
    }

    /// Continues the search until the next solution, exhaustion of the search space, or until
    /// `termination` stops it.
    ///
    /// `cut` is posted at every node; branch and bound uses it to exclude solutions which do not
    /// improve the objective.
    pub(crate) fn next_solution<B: Brancher + ?Sized>(
        &mut self,
        state: &mut State,
        brancher: &mut B,
        termination: &mut impl TerminationCondition,
        random: &mut dyn Random,
        cut: Option<Predicate>,
    ) -> SearchOutcome {
        if self.restored {
            self.end(state);
        }

        match self.search_state {
            SearchState::Exhausted => return SearchOutcome::Exhausted,
            SearchState::Solution => {
                self.search_state = SearchState::Exploring;
                self.node_failed = false;
                if !self.backtrack(state, brancher, cut) {
                    return self.exhaust(state);
                }
            }
            SearchState::Exploring if self.node_failed => {
                self.node_failed = false;
                if !self.backtrack(state, brancher, cut) {
                    return self.exhaust(state);
                }
            }
            SearchState::Exploring => {
                if !self.started && !self.begin(state) {
                    return self.exhaust(state);
                }
            }
        }

        loop {
            if termination.should_stop() {
                debug!("search stopped by the termination condition");
                return SearchOutcome::Unknown;
            }

            let result = match cut {
                Some(cut) => state.post_predicate(cut),
                None => Ok(()),
            }
            .and_then(|()| state.propagate_to_fixed_point());

            if let Err(contradiction) = result {
                if !self.resolve_conflict(state, brancher, contradiction, cut) {
                    return self.exhaust(state);
                }
                continue;
            }

            let decision = {
                let mut context = SelectionContext::new(&state.variables, random);
                brancher
                    .next_decision(&mut context)
                    .or_else(|| decide_in_creation_order(&mut context))
            };

            let Some(predicate) = decision else {
                let solution = state.variables.solution();
                gourd_assert_simple!(
                    solution.is_some(),
                    "no decision is left while some variable is not instantiated"
                );
                let Some(solution) = solution else {
                    return SearchOutcome::Unknown;
                };

                debug!("solution found at depth {}", self.decisions.len());
                state.statistics.engine_statistics.num_solutions += 1;
                brancher.on_solution(&solution);
                self.search_state = SearchState::Solution;
                return SearchOutcome::Solution(solution);
            };

            gourd_assert_moderate!(
                state.variables.evaluate_predicate(predicate) != Some(true),
                "the decision {predicate} already holds"
            );

            state.new_checkpoint();
            self.decisions.push(Decision {
                predicate,
                checkpoint: state.decision_level(),
            });
            termination.decision_has_been_made();

            let statistics = &mut state.statistics.engine_statistics;
            statistics.num_decisions += 1;
            statistics.peak_depth = statistics.peak_depth.max(self.decisions.len() as u64);
            trace!("decision {predicate} at depth {}", self.decisions.len());

            if let Err(contradiction) = state.post_predicate(predicate) {
                if !self.resolve_conflict(state, brancher, contradiction, cut) {
                    return self.exhaust(state);
                }
            }
        }
    }

    /// Propagates at the root and opens the checkpoint of the session.
    fn begin(&mut self, state: &mut State) -> bool {
        state.restore_to(0);
        self.started = true;

        if let Err(contradiction) = state.propagate_to_fixed_point() {
            state.statistics.engine_statistics.num_conflicts += 1;
            self.record_conflict(vec![], contradiction);
            return false;
        }
        state.new_checkpoint();
        true
    }

    fn root_conflict(&self) -> Contradiction {
        self.last_conflict
            .as_ref()
            .map(|conflict| conflict.contradiction)
            .unwrap_or(Contradiction {
                constraint: None,
                variable: None,
            })
    }

    /// Records the conflict and backtracks; returns false when no alternative is left.
    fn resolve_conflict<B: Brancher + ?Sized>(
        &mut self,
        state: &mut State,
        brancher: &mut B,
        contradiction: Contradiction,
        cut: Option<Predicate>,
    ) -> bool {
        state.statistics.engine_statistics.num_conflicts += 1;
        brancher.on_conflict();

        let mut literals = self.path_literals();
        literals.extend(cut);
        self.record_conflict(literals, contradiction);

        self.backtrack(state, brancher, cut)
    }

    /// Undoes the most recent decision and posts its negation. A negation which fails right away
    /// is a conflict as well, and backtracking continues.
    fn backtrack<B: Brancher + ?Sized>(
        &mut self,
        state: &mut State,
        brancher: &mut B,
        cut: Option<Predicate>,
    ) -> bool {
        while let Some(decision) = self.decisions.pop() {
            let checkpoint = decision.checkpoint - 1;
            state.restore_to(checkpoint);
            self.refutations
                .retain(|&(posted_at, _)| posted_at <= checkpoint);
            brancher.on_backtrack();

            let refutation = !decision.predicate;
            self.refutations.push((checkpoint, refutation));
            trace!("refutation {refutation} at depth {}", self.decisions.len());

            match state.post_predicate(refutation) {
                Ok(()) => return true,
                Err(contradiction) => {
                    state.statistics.engine_statistics.num_conflicts += 1;
                    brancher.on_conflict();
                    let mut literals = self.path_literals();
                    literals.extend(cut);
                    self.record_conflict(literals, contradiction);
                }
            }
        }
        false
    }

    fn exhaust(&mut self, state: &mut State) -> SearchOutcome {
        debug!("search space exhausted");
        self.end(state);
        self.search_state = SearchState::Exhausted;
        SearchOutcome::Exhausted
    }
}

/// Decides the first variable which is not instantiated in creation order, client variables
/// before truth variables of constraints.
pub(crate) fn decide_in_creation_order(context: &mut SelectionContext) -> Option<Predicate> {
    let variable = context
        .model_variables()
        .chain(context.all_variables())
        .find(|&variable| !context.is_instantiated(variable))?;
    Some(InDomainMin.select_value(context, variable))
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::branching::branchers::IndependentVariableValueBrancher;
    use crate::branching::variable_selection::InputOrder;
    use crate::constraints;
    use crate::engine::termination::DecisionBudget;
    use crate::engine::termination::Indefinite;
    use crate::engine::variables::DomainSpec;
    use crate::predicate;

    fn solve_all(state: &mut State, session: &mut SearchSession) -> Vec<Solution> {
        let variables = state.variables.variables().collect::<Vec<_>>();
        let mut brancher =
            IndependentVariableValueBrancher::new(InputOrder::new(&variables), InDomainMin);
        let mut random = SmallRng::seed_from_u64(42);
        let mut solutions = vec![];

        while let SearchOutcome::Solution(solution) =
            session.next_solution(state, &mut brancher, &mut Indefinite, &mut random, None)
        {
            solutions.push(solution);
        }
        solutions
    }

    #[test]
    fn every_assignment_of_an_unconstrained_model_is_enumerated() {
        let mut state = State::default();
        let x = state
            .new_integer(&DomainSpec::interval(0, 2), None)
            .expect("valid domain");
        let y = state
            .new_integer(&DomainSpec::values([4, 7]), None)
            .expect("valid domain");
        let mut session = SearchSession::default();

        let solutions = solve_all(&mut state, &mut session);

        let assignments = solutions
            .iter()
            .map(|solution| (solution.integer_value(x), solution.integer_value(y)))
            .collect::<Vec<_>>();
        assert_eq!(
            assignments,
            vec![
                (Some(0), Some(4)),
                (Some(0), Some(7)),
                (Some(1), Some(4)),
                (Some(1), Some(7)),
                (Some(2), Some(4)),
                (Some(2), Some(7)),
            ]
        );
        assert_eq!(session.search_state(), SearchState::Exhausted);
    }

    #[test]
    fn exhaustion_restores_the_root_domains() {
        let mut state = State::default();
        let x = state
            .new_integer(&DomainSpec::interval(0, 3), None)
            .expect("valid domain");
        let mut session = SearchSession::default();

        let _ = solve_all(&mut state, &mut session);

        assert_eq!(state.decision_level(), 0);
        assert_eq!(state.variables.bounds(x).lower, 0.0);
        assert_eq!(state.variables.bounds(x).upper, 3.0);
    }

    #[test]
    fn conflicts_record_the_path() {
        let mut state = State::default();
        let x = state
            .new_integer(&DomainSpec::interval(0, 1), None)
            .expect("valid domain");
        let y = state
            .new_integer(&DomainSpec::interval(0, 1), None)
            .expect("valid domain");
        let (id, _) = state
            .add_constraint(
                constraints::equals(x, 0)
                    .implies(constraints::equals(y, 1).and(constraints::equals(y, 0))),
            )
            .expect("valid constraint");
        state.post_constraint(id).expect("feasible");
        let mut session = SearchSession::default();

        let solutions = solve_all(&mut state, &mut session);

        assert_eq!(solutions.len(), 2);
        let conflict = session.last_conflict().expect("x = 0 fails");
        assert_eq!(conflict.literals, vec![predicate![x == 0]]);
    }

    #[test]
    fn stopped_search_resumes_where_it_left_off() {
        let mut state = State::default();
        let x = state
            .new_integer(&DomainSpec::interval(0, 4), None)
            .expect("valid domain");
        let mut brancher =
            IndependentVariableValueBrancher::new(InputOrder::new(&[x]), InDomainMin);
        let mut random = SmallRng::seed_from_u64(42);
        let mut session = SearchSession::default();

        let outcome = session.next_solution(
            &mut state,
            &mut brancher,
            &mut DecisionBudget::new(0),
            &mut random,
            None,
        );
        assert!(matches!(outcome, SearchOutcome::Unknown));

        let outcome =
            session.next_solution(&mut state, &mut brancher, &mut Indefinite, &mut random, None);
        let SearchOutcome::Solution(solution) = outcome else {
            panic!("expected a solution");
        };
        assert_eq!(solution.integer_value(x), Some(0));
    }

    #[test]
    fn a_node_which_fails_outside_the_search_is_backtracked_from() {
        let mut state = State::default();
        let x = state
            .new_integer(&DomainSpec::interval(0, 2), None)
            .expect("valid domain");
        let y = state
            .new_integer(&DomainSpec::interval(0, 2), None)
            .expect("valid domain");
        let mut brancher =
            IndependentVariableValueBrancher::new(InputOrder::new(&[x, y]), InDomainMin);
        let mut random = SmallRng::seed_from_u64(42);
        let mut session = SearchSession::default();

        let outcome = session.next_solution(
            &mut state,
            &mut brancher,
            &mut DecisionBudget::new(1),
            &mut random,
            None,
        );
        assert!(matches!(outcome, SearchOutcome::Unknown));
        assert_eq!(session.decisions()[0].predicate(), predicate![x == 0]);

        let (id, _) = state
            .add_constraint(constraints::not_equals(x, 0))
            .expect("valid constraint");
        state.post_constraint(id).expect("not yet falsified");
        let _ = session
            .propagate(&mut state)
            .expect_err("x is 0 at the current node");

        let outcome =
            session.next_solution(&mut state, &mut brancher, &mut Indefinite, &mut random, None);
        let SearchOutcome::Solution(solution) = outcome else {
            panic!("expected a solution");
        };
        assert_eq!(solution.integer_value(x), Some(1));
        assert_eq!(solution.integer_value(y), Some(0));
    }

    #[test]
    fn failed_assumptions_exhaust_the_search() {
        let mut state = State::default();
        let x = state
            .new_integer(&DomainSpec::interval(0, 2), None)
            .expect("valid domain");
        let y = state
            .new_integer(&DomainSpec::interval(0, 2), None)
            .expect("valid domain");
        let (id, _) = state
            .add_constraint(constraints::not_equals(x, y))
            .expect("valid constraint");
        state.post_constraint(id).expect("feasible");
        let mut session = SearchSession::default();

        let _ = session
            .propagate_under_assumptions(&mut state, &[predicate![x == 1], predicate![y == 1]])
            .expect_err("x and y must differ");

        assert!(solve_all(&mut state, &mut session).is_empty());
        assert_eq!(session.search_state(), SearchState::Exhausted);
        assert_eq!(state.decision_level(), 0);
        assert!(session.last_conflict().is_some());
    }
}
