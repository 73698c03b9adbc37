//! Contains structures related to optimisation.
//!
//! Optimisation is done by branch and bound: every solution found tightens the bound on the
//! objective variable, so that the remaining search only finds strictly better solutions. Once the
//! search space is exhausted, the last solution is optimal.
pub mod branch_and_bound;
pub mod solution_callback;

use crate::basic_types::ModelError;
use crate::basic_types::Value;
use crate::branching::Brancher;
use crate::engine::predicates::Predicate;
use crate::engine::predicates::PredicateConstructor;
use crate::engine::variables::VarId;
use crate::engine::variables::VariableKind;
use crate::results::OptimisationResult;
use crate::termination::TerminationCondition;
use crate::Solver;

pub trait OptimisationProcedure<B: Brancher> {
    /// Fails when the objective is not a variable of `solver`.
    fn optimise(
        &mut self,
        brancher: &mut B,
        termination: &mut impl TerminationCondition,
        solver: &mut Solver,
    ) -> Result<OptimisationResult, ModelError>;
}

/// The direction of the optimisation, either maximising or minimising.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OptimisationDirection {
    Maximise,
    Minimise,
}

/// The predicate which only admits objective values strictly better than `value`.
///
/// Integer objectives improve by at least 1, real objectives by at least their precision.
pub(crate) fn improvement_over(
    objective: VarId,
    kind: VariableKind,
    direction: OptimisationDirection,
    value: Value,
) -> Predicate {
    match (kind, direction, value) {
        (
            VariableKind::Real { epsilon },
            OptimisationDirection::Maximise,
            Value::Real { lower, .. },
        ) => objective.lower_bound_predicate(lower + epsilon),
        (
            VariableKind::Real { epsilon },
            OptimisationDirection::Minimise,
            Value::Real { upper, .. },
        ) => objective.upper_bound_predicate(upper - epsilon),
        (_, OptimisationDirection::Maximise, value) => {
            objective.lower_bound_predicate(value.as_f64() + 1.0)
        }
        (_, OptimisationDirection::Minimise, value) => {
            objective.upper_bound_predicate(value.as_f64() - 1.0)
        }
    }
}
