use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::search::Decision;
use crate::engine::variables::DomainId;
use crate::quince_assert_advanced;

/// A [`ValueSelector`] which splits the domain in half (based on the lower-bound and upper-bound,
/// disregarding holes) and removes the upper-half from the domain.
///
/// Note that this strategy will not necessarily result in an equal split if there are holes in the
/// domain.
#[derive(Debug, Copy, Clone)]
pub struct InDomainSplit;

impl ValueSelector<DomainId> for InDomainSplit {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Decision {
        // Note that the domain of the variable should always have at least 2 values in it
        // (otherwise it should have been reported as fixed and not selected)
        let bound = context.lower_bound(decision_variable)
            + (context.get_size_of_domain(decision_variable) as f64 / 2.0).floor() as i32;
        quince_assert_advanced!(
            bound >= context.lower_bound(decision_variable)
                && bound < context.upper_bound(decision_variable),
            "It should hold that {} <= {bound} < {}",
            context.lower_bound(decision_variable),
            context.upper_bound(decision_variable)
        );
        Decision::split_at(decision_variable, bound)
    }
}

#[cfg(test)]
mod tests {
    use crate::basic_types::tests::TestRandom;
    use crate::branching::value_selection::InDomainSplit;
    use crate::branching::value_selection::ValueSelector;
    use crate::branching::Decision;
    use crate::branching::SelectionContext;

    #[test]
    fn test_returns_correct_decision() {
        let assignments = SelectionContext::create_for_testing(vec![(0, 10)]);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&assignments, &mut test_rng);
        let domain_ids = context.get_domains().collect::<Vec<_>>();

        let mut selector = InDomainSplit;

        let selected_decision = selector.select_value(&mut context, domain_ids[0]);

        assert_eq!(selected_decision, Decision::split_at(domain_ids[0], 5))
    }

    #[test]
    fn test_domain_of_size_two() {
        let assignments = SelectionContext::create_for_testing(vec![(1, 2)]);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&assignments, &mut test_rng);
        let domain_ids = context.get_domains().collect::<Vec<_>>();

        let mut selector = InDomainSplit;

        let selected_decision = selector.select_value(&mut context, domain_ids[0]);

        assert_eq!(selected_decision, Decision::split_at(domain_ids[0], 1))
    }
}
