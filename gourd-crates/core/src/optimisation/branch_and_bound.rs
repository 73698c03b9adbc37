use std::ops::ControlFlow;

use log::debug;

use super::improvement_over;
use super::solution_callback::SolutionCallback;
use super::OptimisationDirection;
use super::OptimisationProcedure;
use crate::basic_types::ModelError;
use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::engine::variables::VarId;
use crate::engine::SearchOutcome;
use crate::results::OptimisationResult;
use crate::termination::TerminationCondition;
use crate::Solver;

/// Implements branch and bound over a single objective variable.
///
/// The search starts over from the root. After every solution, the bound on the objective is
/// tightened to exclude solutions which are not strictly better, and the search continues from
/// where it was. When the search space is exhausted the last solution is optimal; it is restored
/// in the solver so that it can be inspected.
#[derive(Debug, Clone, Copy)]
pub struct BranchAndBound<Callback> {
    direction: OptimisationDirection,
    objective: VarId,
    solution_callback: Callback,
}

impl<Callback> BranchAndBound<Callback> {
    /// Create a new instance of [`BranchAndBound`].
    pub fn new(
        direction: OptimisationDirection,
        objective: VarId,
        solution_callback: Callback,
    ) -> Self {
        Self {
            direction,
            objective,
            solution_callback,
        }
    }
}

impl<Callback, B> OptimisationProcedure<B> for BranchAndBound<Callback>
where
    Callback: SolutionCallback,
    B: Brancher,
{
    fn optimise(
        &mut self,
        brancher: &mut B,
        termination: &mut impl TerminationCondition,
        solver: &mut Solver,
    ) -> Result<OptimisationResult, ModelError> {
        let kind = solver.kind(self.objective)?;
        solver.reset_search();
        let mut best_solution: Option<Solution> = None;

        loop {
            let bound = best_solution.as_ref().and_then(|solution| {
                solution
                    .value(self.objective)
                    .map(|value| improvement_over(self.objective, kind, self.direction, value))
            });

            match solver.next_solution(brancher, termination, bound) {
                SearchOutcome::Solution(solution) => {
                    debug!(
                        "found a solution with objective value {}",
                        solution
                            .value(self.objective)
                            .map(|value| value.to_string())
                            .unwrap_or_default()
                    );

                    let callback_result =
                        self.solution_callback.on_solution_callback(solver, &solution);
                    if let ControlFlow::Break(()) = callback_result {
                        solver.reset_search();
                        return Ok(OptimisationResult::Satisfiable(solution));
                    }
                    best_solution = Some(solution);
                }
                SearchOutcome::Exhausted => {
                    return Ok(match best_solution {
                        Some(solution) => {
                            if solver.restore(&solution).is_err() {
                                debug!("the optimal solution could not be restored");
                            }
                            OptimisationResult::Optimal(solution)
                        }
                        None => OptimisationResult::Infeasible,
                    });
                }
                SearchOutcome::Unknown => {
                    solver.reset_search();
                    return Ok(match best_solution {
                        Some(solution) => OptimisationResult::Satisfiable(solution),
                        None => OptimisationResult::Unknown,
                    });
                }
            }
        }
    }
}
