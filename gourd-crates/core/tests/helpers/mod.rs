//! Shared setup for the integration tests of the solver.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use gourd_core::constraints::Constraint;
use gourd_core::results::Solution;
use gourd_core::termination::Indefinite;
use gourd_core::variables::DomainSpec;
use gourd_core::variables::VarId;
use gourd_core::Solver;
use itertools::Itertools;

/// Routes the `log` output of the solver to the test harness; set `RUST_LOG` to see it.
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn integers(solver: &mut Solver, count: usize, lower: i32, upper: i32) -> Vec<VarId> {
    (0..count)
        .map(|_| {
            solver
                .new_integer(DomainSpec::interval(lower, upper))
                .expect("valid domain")
        })
        .collect()
}

pub(crate) fn post(solver: &mut Solver, constraint: Constraint) {
    let _ = solver
        .add_constraint(constraint)
        .expect("well-formed constraint")
        .post()
        .expect("constraint is not trivially false");
}

/// The values of `variables` in every solution, in the order the default brancher finds them.
pub(crate) fn enumerate(solver: &mut Solver, variables: &[VarId]) -> Vec<Vec<i32>> {
    let mut brancher = solver.default_brancher();
    let mut assignments = vec![];
    let _ = solver.solve_all(&mut brancher, &mut Indefinite, |solution: &Solution| {
        assignments.push(values_of(solution, variables));
    });
    assignments
}

pub(crate) fn values_of(solution: &Solution, variables: &[VarId]) -> Vec<i32> {
    variables
        .iter()
        .map(|&variable| {
            solution
                .integer_value(variable)
                .expect("every variable has a value")
        })
        .collect()
}

/// Every assignment to the given integer ranges which satisfies `accepts`, in lexicographic
/// order.
pub(crate) fn brute_force(
    ranges: &[(i32, i32)],
    accepts: impl Fn(&[i32]) -> bool,
) -> Vec<Vec<i32>> {
    ranges
        .iter()
        .map(|&(lower, upper)| lower..=upper)
        .multi_cartesian_product()
        .filter(|assignment| accepts(assignment))
        .collect()
}
