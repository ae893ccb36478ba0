use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::variables::DomainId;
use crate::quince_assert_moderate;

/// A two-way branching decision over a single variable.
///
/// A [`Decision`] is created by a [`Brancher`] and applied by the solver; its left branch
/// restricts the domain of the variable and its right branch restricts the domain with the
/// complementary operation. For example, [`Decision::assign`] assigns the variable to the value
/// on the left branch and removes the value from the domain on the right branch.
///
/// The solver keeps the decision alive while backtracking so that the right branch can be
/// applied after the left branch has been refuted.
///
/// [`Brancher`]: crate::branching::Brancher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    variable: DomainId,
    operator: DecisionOperator,
    value: i32,
    /// The number of branches which have been applied (0, 1, or 2).
    branches_tried: u8,
}

/// The domain operation performed by the left branch of a [`Decision`]; the right branch
/// performs the complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOperator {
    /// Left branch: `variable = value`; right branch: `variable != value`.
    Assign,
    /// Left branch: `variable <= value`; right branch: `variable > value`.
    SplitAtValue,
}

impl Decision {
    /// Creates the decision which assigns `variable` to `value` on its left branch and removes
    /// `value` from the domain of `variable` on its right branch.
    pub fn assign(variable: DomainId, value: i32) -> Self {
        Decision {
            variable,
            operator: DecisionOperator::Assign,
            value,
            branches_tried: 0,
        }
    }

    /// Creates the decision which constrains `variable <= value` on its left branch and
    /// `variable > value` on its right branch.
    pub fn split_at(variable: DomainId, value: i32) -> Self {
        Decision {
            variable,
            operator: DecisionOperator::SplitAtValue,
            value,
            branches_tried: 0,
        }
    }

    /// Returns whether there is a branch left which has not yet been applied.
    pub(crate) fn has_next(&self) -> bool {
        self.branches_tried < 2
    }

    /// Applies the next untried branch to `assignments`.
    ///
    /// The first call applies the left branch and the second call applies the right branch;
    /// calling it when [`Decision::has_next`] is false is a logic error.
    pub(crate) fn build_next(&mut self, assignments: &mut Assignments) -> Result<(), EmptyDomain> {
        quince_assert_moderate!(self.has_next());

        let branch = self.branches_tried;
        self.branches_tried += 1;

        match (self.operator, branch) {
            (DecisionOperator::Assign, 0) => {
                assignments.make_assignment(self.variable, self.value, None)
            }
            (DecisionOperator::Assign, _) => {
                assignments.remove_value_from_domain(self.variable, self.value, None)
            }
            (DecisionOperator::SplitAtValue, 0) => {
                assignments.tighten_upper_bound(self.variable, self.value, None)
            }
            (DecisionOperator::SplitAtValue, _) => {
                assignments.tighten_lower_bound(self.variable, self.value + 1, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_decision_applies_both_branches() {
        let mut assignments = Assignments::default();
        let variable = assignments.grow(1, 5);
        let mut decision = Decision::assign(variable, 3);

        assignments.increase_decision_level();
        assert!(decision.build_next(&mut assignments).is_ok());
        assert_eq!(assignments.get_assigned_value(&variable), Some(3));

        let _ = assignments.synchronise(0);
        assignments.increase_decision_level();

        assert!(decision.has_next());
        assert!(decision.build_next(&mut assignments).is_ok());
        assert!(!assignments.is_value_in_domain(variable, 3));
        assert!(!decision.has_next());
    }

    #[test]
    fn split_decision_applies_both_branches() {
        let mut assignments = Assignments::default();
        let variable = assignments.grow(1, 10);
        let mut decision = Decision::split_at(variable, 5);

        assignments.increase_decision_level();
        assert!(decision.build_next(&mut assignments).is_ok());
        assert_eq!(assignments.get_upper_bound(variable), 5);

        let _ = assignments.synchronise(0);
        assignments.increase_decision_level();

        assert!(decision.build_next(&mut assignments).is_ok());
        assert_eq!(assignments.get_lower_bound(variable), 6);
    }

    #[test]
    fn branch_application_reports_empty_domain() {
        let mut assignments = Assignments::default();
        let variable = assignments.grow(3, 3);
        let mut decision = Decision::split_at(variable, 3);

        assignments.increase_decision_level();
        assert!(decision.build_next(&mut assignments).is_ok());

        let _ = assignments.synchronise(0);
        assignments.increase_decision_level();

        // the right branch demands variable > 3 which empties the domain
        assert!(decision.build_next(&mut assignments).is_err());
    }
}
