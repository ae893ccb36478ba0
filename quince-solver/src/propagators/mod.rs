//! Contains the propagator implementations which ship with the solver.
//!
//! See the [`crate::engine::cp::propagation`] documentation for an explanation of what a
//! propagator is and how to implement a new one.

pub(crate) mod arithmetic;
mod member;

pub(crate) use arithmetic::*;
pub(crate) use member::MemberPropagator;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cp::test_solver::TestSolver;

    /// Posts `x + y + z <= 12`, `x >= y + 1` and `z in {4, 6, 9}` in the given order and runs
    /// the propagators round-robin in that same order until none of them changes a domain,
    /// returning the final bounds of every variable.
    fn propagate_to_fixpoint_in_order(order: [u32; 3]) -> Vec<(i32, i32)> {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let y = solver.new_variable(0, 10);
        let z = solver.new_variable(0, 10);

        let mut propagators = Vec::new();
        for constraint in order {
            let result = match constraint {
                0 => solver.new_propagator(LinearLessOrEqualPropagator::new([x, y, z].into(), 12)),
                1 => solver.new_propagator(BinaryGreaterOrEqualPropagator::new(x, y, 1)),
                _ => solver.new_propagator(MemberPropagator::new(z, vec![4, 6, 9])),
            };
            propagators.push(result.expect("no empty domains"));
            solver.notify_all_propagators();
        }

        loop {
            let trail_size = solver.assignments.num_trail_entries();
            for &propagator in &propagators {
                solver
                    .propagate(propagator)
                    .expect("the domains stay consistent");
                solver.notify_all_propagators();
            }
            if solver.assignments.num_trail_entries() == trail_size {
                break;
            }
        }

        [x, y, z]
            .iter()
            .map(|&var| (solver.lower_bound(var), solver.upper_bound(var)))
            .collect()
    }

    #[test]
    fn the_fixpoint_is_the_same_for_every_propagation_order() {
        let expected = propagate_to_fixpoint_in_order([0, 1, 2]);
        assert_eq!(expected, vec![(1, 8), (0, 7), (4, 9)]);

        for order in [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
            assert_eq!(propagate_to_fixpoint_in_order(order), expected);
        }
    }
}
