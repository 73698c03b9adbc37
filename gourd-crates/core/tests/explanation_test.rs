#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use gourd_core::constraints;
use gourd_core::options::LearningOptions;
use gourd_core::options::SolverOptions;
use gourd_core::predicate;
use gourd_core::predicates::Predicate;
use gourd_core::results::SatisfactionResult;
use gourd_core::termination::Indefinite;
use gourd_core::variables::DomainSpec;
use gourd_core::variables::VarId;
use gourd_core::ConflictClause;
use gourd_core::Solver;
use helpers::init_logging;
use helpers::integers;
use helpers::post;

fn without_learning() -> Solver {
    Solver::with_options(SolverOptions {
        learning: LearningOptions {
            learn_explanations: false,
        },
        ..Default::default()
    })
}

fn fails_under(solver: &mut Solver, assumptions: &[Predicate]) -> bool {
    let failed = solver.propagate_under_assumptions(assumptions).is_err();
    solver.reset_search();
    failed
}

/// Replaying the clause fails again, and dropping any one of its predicates does not.
fn assert_minimal_and_sufficient(solver: &mut Solver, clause: &ConflictClause) {
    assert!(
        fails_under(solver, clause.literals()),
        "{clause} does not explain a failure"
    );

    for index in 0..clause.len() {
        let mut weakened = clause.literals().to_vec();
        let _ = weakened.remove(index);
        assert!(
            !fails_under(solver, &weakened),
            "{clause} is not minimal, {:?} fails as well",
            weakened
        );
    }
}

/// Western Australia, Northern Territory, South Australia, Queensland, New South Wales and
/// Victoria, in that order, with three colours.
fn australia(solver: &mut Solver) -> Vec<VarId> {
    let regions = integers(solver, 6, 0, 2);
    for (first, second) in [
        (0, 1),
        (0, 2),
        (1, 2),
        (1, 3),
        (2, 3),
        (2, 4),
        (2, 5),
        (3, 4),
        (4, 5),
    ] {
        post(solver, constraints::not_equals(regions[first], regions[second]));
    }
    regions
}

#[test]
fn propagation_chains_are_explained_by_their_sources() {
    init_logging();
    let mut solver = without_learning();
    let regions = australia(&mut solver);
    let (wa, nt, v) = (regions[0], regions[1], regions[5]);

    let assumptions = [predicate![wa == 0], predicate![nt == 1], predicate![v == 1]];
    let _ = solver
        .propagate_under_assumptions(&assumptions)
        .expect_err("the colouring cannot be completed");
    let clause = solver.get_explanation().expect("a conflict was recorded");

    assert_eq!(clause.literals(), &[predicate![wa == 0], predicate![v == 1]]);
    assert!(clause.constraint().is_some());
    assert_minimal_and_sufficient(&mut solver, &clause);
}

#[test]
fn unrelated_assumptions_are_left_out() {
    init_logging();
    let mut solver = without_learning();
    let regions = australia(&mut solver);

    for (first, second) in [(0, 1), (2, 5), (3, 4)] {
        for colour in 0..3 {
            let unrelated = if first == 0 { regions[5] } else { regions[0] };
            let assumptions = [
                predicate![unrelated >= 0],
                predicate![regions[first] == colour],
                predicate![regions[second] == colour],
            ];
            let _ = solver
                .propagate_under_assumptions(&assumptions)
                .expect_err("neighbours share a colour");
            let clause = solver.get_explanation().expect("a conflict was recorded");

            assert_eq!(clause.literals(), &assumptions[1..]);
            assert_minimal_and_sufficient(&mut solver, &clause);
        }
    }
}

#[test]
fn the_last_conflict_of_an_exhausted_search_is_explained() {
    init_logging();
    let mut solver = without_learning();
    let pigeons = integers(&mut solver, 4, 0, 2);
    post(&mut solver, constraints::all_different(&pigeons));

    let mut brancher = solver.default_brancher();
    assert_eq!(
        solver.solve_one(&mut brancher, &mut Indefinite),
        SatisfactionResult::Exhausted
    );

    let clause = solver.get_explanation().expect("the search failed");
    assert!(!clause.is_empty());
    assert_minimal_and_sufficient(&mut solver, &clause);
}

#[test]
fn learned_nogoods_propagate() {
    init_logging();
    let mut solver = Solver::default();
    let x = solver
        .new_integer(DomainSpec::interval(0, 3))
        .expect("valid domain");
    let y = solver
        .new_integer(DomainSpec::interval(0, 3))
        .expect("valid domain");
    post(
        &mut solver,
        constraints::equals(constraints::sum(x, y), 3).or(constraints::equals(x, y)),
    );

    solver
        .propagate_under_assumptions(&[predicate![x == 0]])
        .expect("y can still be 0 or 3");
    assert_eq!(solver.format_domain(y).as_deref(), Ok("x1 = [0, 3]"));

    let _ = solver
        .propagate_under_assumptions(&[predicate![x == 0], predicate![y == 1]])
        .expect_err("neither disjunct holds");
    let clause = solver.get_explanation().expect("a conflict was recorded");
    assert_eq!(clause.literals(), &[predicate![x == 0], predicate![y == 1]]);

    solver
        .propagate_under_assumptions(&[predicate![x == 0]])
        .expect("y can still be 0 or 3");
    assert_eq!(solver.format_domain(y).as_deref(), Ok("x1 = {0, 2, 3}"));
}

#[test]
fn learning_keeps_every_solution() {
    init_logging();
    let mut solver = Solver::default();
    let regions = australia(&mut solver);
    let (wa, nt, v) = (regions[0], regions[1], regions[5]);

    let _ = solver
        .propagate_under_assumptions(&[predicate![wa == 0], predicate![nt == 1], predicate![v == 1]])
        .expect_err("the colouring cannot be completed");
    let _ = solver.get_explanation().expect("a conflict was recorded");
    solver.reset_search();

    let solutions = helpers::enumerate(&mut solver, &regions);
    assert_eq!(solutions.len(), 6);
    assert!(solutions
        .iter()
        .all(|colours| !(colours[0] == 0 && colours[5] == 1)));
}
