#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use std::time::Duration;

use quince_solver::results::solution_iterator::IteratedSolution;
use quince_solver::results::OptimisationResult;
use quince_solver::results::ProblemSolution;
use quince_solver::results::SatisfactionResult;
use quince_solver::termination::Indefinite;
use quince_solver::termination::TimeBudget;
use quince_solver::Solver;

#[test]
fn parking_and_resuming_enumerates_every_solution_exactly_once() {
    let mut solver = Solver::default();

    let x = solver.new_bounded_integer(1, 3);
    let y = solver.new_bounded_integer(1, 3);

    solver
        .add_greater_than(x, y)
        .expect("the constraint is satisfiable at the root");

    // The propagator is bounds-consistent, so the bounds are already tight at the root.
    assert_eq!(solver.lower_bound(&x), 2);
    assert_eq!(solver.upper_bound(&y), 2);

    let mut termination = Indefinite;
    let mut brancher = solver.default_brancher();

    let mut found = Vec::new();
    let mut has_solution = solver.solve(&mut termination, &mut brancher);
    while has_solution {
        let solution = solver.solution();
        found.push((solution.get_integer_value(x), solution.get_integer_value(y)));
        has_solution = solver.next_solution(&mut termination, &mut brancher);
    }

    found.sort();
    assert_eq!(found, vec![(2, 1), (3, 1), (3, 2)]);
}

#[test]
fn a_contradictory_constraint_is_rejected_and_the_problem_is_unsatisfiable() {
    let mut solver = Solver::default();

    let x = solver.new_bounded_integer(1, 3);
    let y = solver.new_bounded_integer(1, 3);

    solver
        .add_greater_than(x, y)
        .expect("the constraint is satisfiable at the root");
    assert!(solver.add_greater_than(y, x).is_err());

    let mut brancher = solver.default_brancher();
    assert!(matches!(
        solver.satisfy(&mut brancher, &mut Indefinite),
        SatisfactionResult::Unsatisfiable
    ));
}

#[test]
fn satisfy_returns_a_solution_which_respects_all_constraints() {
    let mut solver = Solver::default();

    let x = solver.new_bounded_integer(0, 10);
    let y = solver.new_bounded_integer(0, 10);

    solver
        .add_linear_less_than_or_equals(vec![x, y], 7)
        .expect("the constraint is satisfiable at the root");
    solver
        .add_linear_not_equals(vec![x, y], 0)
        .expect("the constraint is satisfiable at the root");
    solver
        .add_member(x, vec![2, 3, 5])
        .expect("the constraint is satisfiable at the root");

    let mut brancher = solver.default_brancher();
    match solver.satisfy(&mut brancher, &mut Indefinite) {
        SatisfactionResult::Satisfiable(solution) => {
            let value_x = solution.get_integer_value(x);
            let value_y = solution.get_integer_value(y);

            assert!(value_x + value_y <= 7);
            assert_ne!(value_x + value_y, 0);
            assert!([2, 3, 5].contains(&value_x));
        }
        other => panic!("expected a solution, got {other:?}"),
    }
}

#[test]
fn an_exhausted_time_budget_reports_unknown() {
    let mut solver = Solver::default();

    let x = solver.new_bounded_integer(1, 3);
    let y = solver.new_bounded_integer(1, 3);
    solver
        .add_greater_than(x, y)
        .expect("the constraint is satisfiable at the root");

    let mut termination = TimeBudget::starting_now(Duration::from_secs(0));
    let mut brancher = solver.default_brancher();

    assert!(matches!(
        solver.satisfy(&mut brancher, &mut termination),
        SatisfactionResult::Unknown
    ));
}

#[test]
fn minimisation_finds_the_smallest_objective_value() {
    let mut solver = Solver::default();

    let x = solver.new_bounded_integer(1, 3);
    let y = solver.new_bounded_integer(1, 3);
    solver
        .add_greater_than(x, y)
        .expect("the constraint is satisfiable at the root");

    let mut brancher = solver.default_brancher();
    match solver.minimise(&mut brancher, &mut Indefinite, x) {
        OptimisationResult::Optimal(solution) => {
            assert_eq!(solution.get_integer_value(x), 2);
            assert_eq!(solution.get_integer_value(y), 1);
        }
        other => panic!("expected an optimal solution, got {other:?}"),
    }
}

#[test]
fn maximisation_finds_the_largest_objective_value() {
    let mut solver = Solver::default();

    let x = solver.new_bounded_integer(1, 3);
    let y = solver.new_bounded_integer(1, 3);
    solver
        .add_greater_than(x, y)
        .expect("the constraint is satisfiable at the root");

    let mut brancher = solver.default_brancher();
    match solver.maximise(&mut brancher, &mut Indefinite, y) {
        OptimisationResult::Optimal(solution) => {
            assert_eq!(solution.get_integer_value(y), 2);
            assert_eq!(solution.get_integer_value(x), 3);
        }
        other => panic!("expected an optimal solution, got {other:?}"),
    }
}

#[test]
fn optimising_an_unsatisfiable_problem_reports_unsatisfiable() {
    let mut solver = Solver::default();

    let x = solver.new_bounded_integer(1, 3);
    let y = solver.new_bounded_integer(1, 3);
    solver
        .add_greater_than(x, y)
        .expect("the constraint is satisfiable at the root");
    assert!(solver.add_greater_than(y, x).is_err());

    let mut brancher = solver.default_brancher();
    assert!(matches!(
        solver.minimise(&mut brancher, &mut Indefinite, x),
        OptimisationResult::Unsatisfiable
    ));
}

#[test]
fn iterator_finds_all_solutions_over_a_sparse_domain() {
    let mut solver = Solver::default();

    let x = solver.new_sparse_integer(vec![1, 3, 5]);
    let y = solver.new_bounded_integer(0, 5);

    solver
        .add_greater_than(y, x)
        .expect("the constraint is satisfiable at the root");
    solver
        .add_linear_less_than_or_equals(vec![x, y], 6)
        .expect("the constraint is satisfiable at the root");

    let mut termination = Indefinite;
    let mut brancher = solver.default_brancher();
    let mut solution_iterator = solver.solution_iterator(&mut brancher, &mut termination);

    // We keep track of a list of known solutions
    let mut known_solutions = Vec::new();

    loop {
        match solution_iterator.next_solution() {
            IteratedSolution::Solution(solution) => {
                let value_x = solution.get_integer_value(x);
                let value_y = solution.get_integer_value(y);

                assert!(value_y > value_x);
                assert!(value_x + value_y <= 6);

                // It should also be the case that we have not found this solution before
                assert!(!known_solutions.contains(&(value_x, value_y)));
                known_solutions.push((value_x, value_y));
            }
            IteratedSolution::Finished => {
                // No more solutions exist
                break;
            }
            IteratedSolution::Unknown => {
                // Our termination condition has caused the solver to terminate
                break;
            }
            IteratedSolution::Unsatisfiable => {
                panic!("Problem should be satisfiable")
            }
        }
    }

    known_solutions.sort();
    assert_eq!(known_solutions, vec![(1, 2), (1, 3), (1, 4), (1, 5)]);
}

#[test]
fn an_iterator_over_an_unsatisfiable_problem_reports_unsatisfiable() {
    let mut solver = Solver::default();

    let x = solver.new_bounded_integer(0, 2);
    let y = solver.new_bounded_integer(0, 2);
    solver
        .add_linear_less_than_or_equals(vec![x, y], 4)
        .expect("the constraint is satisfiable at the root");
    solver
        .add_member(x, vec![1])
        .expect("the constraint is satisfiable at the root");
    // x is now fixed to 1, so forbidding x = 1 wipes out the problem at the root.
    assert!(solver.add_linear_not_equals(vec![x], 1).is_err());

    let mut termination = Indefinite;
    let mut brancher = solver.default_brancher();
    let mut solution_iterator = solver.solution_iterator(&mut brancher, &mut termination);

    assert!(matches!(
        solution_iterator.next_solution(),
        IteratedSolution::Unsatisfiable
    ));
}
