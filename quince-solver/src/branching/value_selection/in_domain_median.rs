use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::search::Decision;
use crate::engine::variables::DomainId;

/// [`ValueSelector`] which chooses to assign the provided variable to the median value of its
/// domain; holes in the domain are taken into account.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMedian;

impl ValueSelector<DomainId> for InDomainMedian {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Decision {
        let values_in_domain = (context.lower_bound(decision_variable)
            ..=context.upper_bound(decision_variable))
            .filter(|bound| context.contains(decision_variable, *bound))
            .collect::<Vec<_>>();
        Decision::assign(
            decision_variable,
            values_in_domain[values_in_domain.len() / 2],
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::basic_types::tests::TestRandom;
    use crate::branching::value_selection::InDomainMedian;
    use crate::branching::value_selection::ValueSelector;
    use crate::branching::Decision;
    use crate::branching::SelectionContext;

    #[test]
    fn test_returns_correct_decision() {
        let assignments = SelectionContext::create_for_testing(vec![(0, 10)]);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&assignments, &mut test_rng);
        let domain_ids = context.get_domains().collect::<Vec<_>>();

        let mut selector = InDomainMedian;

        let selected_decision = selector.select_value(&mut context, domain_ids[0]);
        assert_eq!(selected_decision, Decision::assign(domain_ids[0], 5))
    }

    #[test]
    fn test_holes_are_not_selected() {
        let mut assignments = SelectionContext::create_for_testing(vec![(0, 10)]);
        let domain_ids = assignments.get_domains().collect::<Vec<_>>();
        let _ = assignments.remove_value_from_domain(domain_ids[0], 4, None);
        let _ = assignments.remove_value_from_domain(domain_ids[0], 5, None);

        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&assignments, &mut test_rng);

        let mut selector = InDomainMedian;

        let selected_decision = selector.select_value(&mut context, domain_ids[0]);
        assert_eq!(selected_decision, Decision::assign(domain_ids[0], 6))
    }
}
