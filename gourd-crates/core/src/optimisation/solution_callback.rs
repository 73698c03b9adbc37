use std::ops::ControlFlow;

use crate::basic_types::Solution;
use crate::Solver;

/// Called by an [`super::OptimisationProcedure`] for every improving solution. Returning
/// [`ControlFlow::Break`] stops the optimisation with the solution as the best known one.
pub trait SolutionCallback {
    fn on_solution_callback(&mut self, solver: &Solver, solution: &Solution) -> ControlFlow<()>;
}

impl<T> SolutionCallback for T
where
    T: FnMut(&Solver, &Solution) -> ControlFlow<()>,
{
    fn on_solution_callback(&mut self, solver: &Solver, solution: &Solution) -> ControlFlow<()> {
        (self)(solver, solution)
    }
}
