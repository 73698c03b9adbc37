#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

//! Compares the solutions the solver enumerates on small models with those found by trying every
//! assignment.

mod helpers;

use gourd_core::constraints;
use gourd_core::constraints::Constraint;
use gourd_core::options::OptimisationDirection;
use gourd_core::results::OptimisationResult;
use gourd_core::termination::Indefinite;
use gourd_core::variables::DomainSpec;
use gourd_core::variables::VarId;
use gourd_core::Solver;
use helpers::brute_force;
use helpers::enumerate;
use helpers::init_logging;
use helpers::integers;
use helpers::post;

/// Posts the constraint built from three variables in `0..=upper`, and checks that the solver
/// finds exactly the assignments accepted by `accepts`.
fn check_against_brute_force(
    upper: i32,
    build: impl Fn(&[VarId]) -> Constraint,
    accepts: impl Fn(&[i32]) -> bool,
) {
    init_logging();
    let mut solver = Solver::default();
    let variables = integers(&mut solver, 3, 0, upper);
    post(&mut solver, build(&variables));

    let mut found = enumerate(&mut solver, &variables);
    found.sort();

    let expected = brute_force(&[(0, upper); 3], accepts);
    assert_eq!(found, expected);
}

#[test]
fn sum() {
    check_against_brute_force(
        3,
        |v| constraints::equals(constraints::sum(v[0], v[1]), v[2]),
        |a| a[0] + a[1] == a[2],
    );
}

#[test]
fn scaled_difference() {
    check_against_brute_force(
        4,
        |v| {
            constraints::equals(
                constraints::difference(constraints::scaled(v[0], 2.0), v[1]),
                v[2],
            )
        },
        |a| 2 * a[0] - a[1] == a[2],
    );
}

#[test]
fn quotient() {
    init_logging();
    let mut solver = Solver::default();
    let dividend = solver
        .new_integer(DomainSpec::interval(0, 6))
        .expect("valid domain");
    let divisor = solver
        .new_integer(DomainSpec::interval(1, 3))
        .expect("valid domain");
    let result = solver
        .new_integer(DomainSpec::interval(0, 6))
        .expect("valid domain");
    post(
        &mut solver,
        constraints::equals(constraints::quotient(dividend, divisor), result),
    );

    let variables = [dividend, divisor, result];
    let mut found = enumerate(&mut solver, &variables);
    found.sort();

    let expected = brute_force(&[(0, 6), (1, 3), (0, 6)], |a| a[0] == a[1] * a[2]);
    assert_eq!(found, expected);
}

#[test]
fn implication() {
    check_against_brute_force(
        2,
        |v| constraints::less_than(v[0], v[1]).implies(constraints::equals(v[2], 2)),
        |a| a[0] >= a[1] || a[2] == 2,
    );
}

#[test]
fn equivalence() {
    check_against_brute_force(
        3,
        |v| constraints::greater_than_or_equals(v[0], 2).iff(constraints::not_equals(v[1], v[2])),
        |a| (a[0] >= 2) == (a[1] != a[2]),
    );
}

#[test]
fn disjunction() {
    check_against_brute_force(
        3,
        |v| {
            constraints::disjunction([
                constraints::equals(v[0], v[1]),
                constraints::greater_than(constraints::sum(v[1], v[2]), 4),
                constraints::less_than_or_equals(constraints::sum(v[0], v[2]), 0),
            ])
        },
        |a| a[0] == a[1] || a[1] + a[2] > 4 || a[0] + a[2] <= 0,
    );
}

#[test]
fn negated_conjunction() {
    check_against_brute_force(
        2,
        |v| !(constraints::equals(v[0], 1).and(constraints::not_equals(v[1], v[2]))),
        |a| !(a[0] == 1 && a[1] != a[2]),
    );
}

#[test]
fn all_different() {
    check_against_brute_force(
        3,
        constraints::all_different,
        |a| a[0] != a[1] && a[1] != a[2] && a[0] != a[2],
    );
}

#[test]
fn counting_reified_constraints() {
    init_logging();
    let mut solver = Solver::default();
    let variables = integers(&mut solver, 3, 0, 2);

    let conditions = [
        constraints::equals(variables[0], variables[1]),
        constraints::less_than(variables[1], variables[2]),
        constraints::not_equals(variables[2], 1),
    ];
    let truths = conditions
        .into_iter()
        .map(|condition| {
            solver
                .add_constraint(condition)
                .expect("well-formed constraint")
                .reify()
        })
        .collect::<Vec<_>>();
    post(
        &mut solver,
        constraints::equals(constraints::sum(truths[0], constraints::sum(truths[1], truths[2])), 2),
    );

    let mut found = enumerate(&mut solver, &variables);
    found.sort();

    let expected = brute_force(&[(0, 2); 3], |a| {
        let count = [a[0] == a[1], a[1] < a[2], a[2] != 1]
            .into_iter()
            .filter(|&holds| holds)
            .count();
        count == 2
    });
    assert_eq!(found, expected);
}

/// Optimises `3x + 2y` subject to `x + y <= 4` and `x - y <= 2`, and compares the optimum with
/// the best assignment found by trying all of them.
fn check_optimum(direction: OptimisationDirection) {
    init_logging();
    let mut solver = Solver::default();
    let variables = integers(&mut solver, 2, 0, 4);
    let objective = solver
        .new_integer(DomainSpec::interval(-50, 50))
        .expect("valid domain");
    post(
        &mut solver,
        constraints::less_than_or_equals(constraints::sum(variables[0], variables[1]), 4),
    );
    post(
        &mut solver,
        constraints::less_than_or_equals(constraints::difference(variables[0], variables[1]), 2),
    );
    post(
        &mut solver,
        constraints::equals(
            objective,
            constraints::sum(
                constraints::scaled(variables[0], 3.0),
                constraints::scaled(variables[1], 2.0),
            ),
        ),
    );

    let mut brancher = solver.default_brancher();
    let result = solver
        .optimise(objective, direction, &mut brancher, &mut Indefinite)
        .expect("the objective is a variable of this solver");
    let OptimisationResult::Optimal(solution) = result else {
        panic!("expected an optimal solution, got {result:?}");
    };

    let values = brute_force(&[(0, 4), (0, 4)], |a| a[0] + a[1] <= 4 && a[0] - a[1] <= 2)
        .into_iter()
        .map(|a| 3 * a[0] + 2 * a[1]);
    let expected = match direction {
        OptimisationDirection::Maximise => values.max(),
        OptimisationDirection::Minimise => values.min(),
    };

    assert_eq!(solution.integer_value(objective), expected);
    assert_eq!(solver.integer_value(objective).ok(), expected);
}

#[test]
fn maximum_matches_brute_force() {
    check_optimum(OptimisationDirection::Maximise);
}

#[test]
fn minimum_matches_brute_force() {
    check_optimum(OptimisationDirection::Minimise);
}
