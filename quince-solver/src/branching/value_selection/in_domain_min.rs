use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::search::Decision;
use crate::engine::variables::DomainId;

/// [`ValueSelector`] which chooses to assign the provided variable to its lowest-bound.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMin;

impl ValueSelector<DomainId> for InDomainMin {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Decision {
        Decision::assign(decision_variable, context.lower_bound(decision_variable))
    }
}

#[cfg(test)]
mod tests {
    use crate::basic_types::tests::TestRandom;
    use crate::branching::value_selection::InDomainMin;
    use crate::branching::value_selection::ValueSelector;
    use crate::branching::Decision;
    use crate::branching::SelectionContext;

    #[test]
    fn test_returns_correct_decision() {
        let assignments = SelectionContext::create_for_testing(vec![(0, 10)]);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&assignments, &mut test_rng);
        let domain_ids = context.get_domains().collect::<Vec<_>>();

        let mut selector = InDomainMin;

        let selected_decision = selector.select_value(&mut context, domain_ids[0]);
        assert_eq!(selected_decision, Decision::assign(domain_ids[0], 0))
    }
}
