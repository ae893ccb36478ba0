use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::engine::cp::event_sink::EventSink;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::IntDomainEvent;
use crate::engine::variables::DomainGeneratorIterator;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::quince_assert_moderate;
use crate::quince_assert_simple;

/// The central store of integer domains. All domain changes go through its narrowing
/// operations, each of which logs a [`ConstraintProgrammingTrailEntry`] so that
/// [`Assignments::synchronise`] can restore the state of a previous decision level.
#[derive(Clone, Default, Debug)]
pub struct Assignments {
    trail: Trail<ConstraintProgrammingTrailEntry>,
    domains: KeyedVec<DomainId, IntegerDomainExplicit>,

    events: EventSink,
}

/// The error returned when a narrowing operation wipes out a domain. The domain is left in
/// its empty state (lower bound above upper bound) until the solver backtracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

impl Assignments {
    pub fn increase_decision_level(&mut self) {
        self.trail.increase_decision_level()
    }

    pub fn get_decision_level(&self) -> usize {
        self.trail.get_decision_level()
    }

    pub fn num_domains(&self) -> u32 {
        self.domains.len() as u32
    }

    pub fn get_domains(&self) -> DomainGeneratorIterator {
        DomainGeneratorIterator::new(0, self.num_domains())
    }

    pub fn num_trail_entries(&self) -> usize {
        self.trail.len()
    }

    pub fn get_trail_entry(&self, index: usize) -> ConstraintProgrammingTrailEntry {
        self.trail[index]
    }

    // Registers the domain of a new integer variable. Note that this is an internal method:
    // it does not allocate the watch list and propagator bookkeeping that accompanies a
    // domain, for that use the creation methods of the ConstraintSatisfactionSolver.
    pub fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        quince_assert_simple!(
            self.get_decision_level() == 0,
            "domains can only be created at the root level"
        );

        let id = DomainId {
            id: self.num_domains(),
        };

        let _ = self
            .domains
            .push(IntegerDomainExplicit::new(lower_bound, upper_bound, id));

        self.events.grow();

        id
    }

    /// Creates a domain containing exactly the given values, registering the gaps between
    /// them as holes at the root level.
    pub fn create_new_integer_variable_sparse(&mut self, mut values: Vec<i32>) -> DomainId {
        assert!(
            !values.is_empty(),
            "cannot create a variable with an empty domain"
        );

        values.sort();
        values.dedup();

        let lower_bound = values[0];
        let upper_bound = values[values.len() - 1];

        let domain_id = self.grow(lower_bound, upper_bound);

        let mut next_idx = 0;
        for value in lower_bound..=upper_bound {
            if value == values[next_idx] {
                next_idx += 1;
            } else {
                self.remove_value_from_domain(domain_id, value, None)
                    .expect("the domain should not be empty");
            }
        }
        quince_assert_simple!(next_idx == values.len());

        domain_id
    }

    pub fn drain_domain_events(&mut self) -> impl Iterator<Item = (IntDomainEvent, DomainId)> + '_ {
        self.events.drain()
    }
}

// methods for getting info about the domains
impl Assignments {
    pub fn get_lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound
    }

    pub fn get_upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound
    }

    pub fn get_assigned_value<Var: IntegerVariable>(&self, var: &Var) -> Option<i32> {
        self.is_domain_assigned(var).then(|| var.lower_bound(self))
    }

    /// Iterates over the values currently in the domain, in increasing order.
    pub fn domain_iterator(&self, domain_id: DomainId) -> impl Iterator<Item = i32> + '_ {
        let domain = &self.domains[domain_id];
        (domain.lower_bound..=domain.upper_bound).filter(move |&value| domain.contains(value))
    }

    pub fn is_value_in_domain(&self, domain_id: DomainId, value: i32) -> bool {
        self.domains[domain_id].contains(value)
    }

    pub fn is_domain_assigned<Var: IntegerVariable>(&self, var: &Var) -> bool {
        var.lower_bound(self) == var.upper_bound(self)
    }

    pub fn is_domain_assigned_to_value(&self, domain_id: DomainId, value: i32) -> bool {
        self.is_domain_assigned(&domain_id) && self.get_lower_bound(domain_id) == value
    }
}

// methods to change the domains
impl Assignments {
    pub fn tighten_lower_bound(
        &mut self,
        domain_id: DomainId,
        new_lower_bound: i32,
        cause: Option<PropagatorId>,
    ) -> Result<(), EmptyDomain> {
        if new_lower_bound <= self.get_lower_bound(domain_id) {
            return self.domains[domain_id].verify_consistency();
        }

        self.trail.push(ConstraintProgrammingTrailEntry {
            domain_id,
            change: DomainChange::LowerBound(new_lower_bound),
            old_lower_bound: self.get_lower_bound(domain_id),
            old_upper_bound: self.get_upper_bound(domain_id),
            cause,
        });

        let domain = &mut self.domains[domain_id];
        domain.set_lower_bound(new_lower_bound, &mut self.events);

        domain.verify_consistency()
    }

    pub fn tighten_upper_bound(
        &mut self,
        domain_id: DomainId,
        new_upper_bound: i32,
        cause: Option<PropagatorId>,
    ) -> Result<(), EmptyDomain> {
        if new_upper_bound >= self.get_upper_bound(domain_id) {
            return self.domains[domain_id].verify_consistency();
        }

        self.trail.push(ConstraintProgrammingTrailEntry {
            domain_id,
            change: DomainChange::UpperBound(new_upper_bound),
            old_lower_bound: self.get_lower_bound(domain_id),
            old_upper_bound: self.get_upper_bound(domain_id),
            cause,
        });

        let domain = &mut self.domains[domain_id];
        domain.set_upper_bound(new_upper_bound, &mut self.events);

        domain.verify_consistency()
    }

    pub fn make_assignment(
        &mut self,
        domain_id: DomainId,
        assigned_value: i32,
        cause: Option<PropagatorId>,
    ) -> Result<(), EmptyDomain> {
        quince_assert_moderate!(!self.is_domain_assigned_to_value(domain_id, assigned_value));

        // only tighten the lower bound if needed
        if self.get_lower_bound(domain_id) < assigned_value {
            self.tighten_lower_bound(domain_id, assigned_value, cause)?;
        }

        // only tighten the upper bound if needed
        if self.get_upper_bound(domain_id) > assigned_value {
            self.tighten_upper_bound(domain_id, assigned_value, cause)?;
        }

        self.domains[domain_id].verify_consistency()
    }

    pub fn remove_value_from_domain(
        &mut self,
        domain_id: DomainId,
        removed_value_from_domain: i32,
        cause: Option<PropagatorId>,
    ) -> Result<(), EmptyDomain> {
        if !self.domains[domain_id].contains(removed_value_from_domain) {
            return self.domains[domain_id].verify_consistency();
        }

        self.trail.push(ConstraintProgrammingTrailEntry {
            domain_id,
            change: DomainChange::Removal(removed_value_from_domain),
            old_lower_bound: self.get_lower_bound(domain_id),
            old_upper_bound: self.get_upper_bound(domain_id),
            cause,
        });

        let domain = &mut self.domains[domain_id];
        domain.remove_value(removed_value_from_domain, &mut self.events);

        domain.verify_consistency()
    }

    /// Removes all values in the closed interval `lower..=upper` from the domain. Intervals
    /// overlapping a bound collapse into a single bound tightening, only an interval strictly
    /// inside the domain is recorded value by value.
    pub fn remove_interval_from_domain(
        &mut self,
        domain_id: DomainId,
        lower: i32,
        upper: i32,
        cause: Option<PropagatorId>,
    ) -> Result<(), EmptyDomain> {
        if lower > upper {
            return self.domains[domain_id].verify_consistency();
        }

        if lower <= self.get_lower_bound(domain_id) {
            self.tighten_lower_bound(domain_id, upper + 1, cause)
        } else if upper >= self.get_upper_bound(domain_id) {
            self.tighten_upper_bound(domain_id, lower - 1, cause)
        } else {
            for value in lower..=upper {
                self.remove_value_from_domain(domain_id, value, cause)?;
            }
            Ok(())
        }
    }

    /// Synchronises the internal structures of [`Assignments`] based on the fact that
    /// backtracking to `new_decision_level` is taking place. This method returns the list of
    /// [`DomainId`]s and their values which were fixed (i.e. domain of size one) before
    /// backtracking and are unfixed (i.e. domain of two or more values) after synchronisation.
    pub fn synchronise(&mut self, new_decision_level: usize) -> Vec<(DomainId, i32)> {
        let mut unfixed_variables = Vec::new();

        self.trail.synchronise(new_decision_level).for_each(|entry| {
            let domain = &mut self.domains[entry.domain_id];

            let fixed_before = domain.lower_bound == domain.upper_bound;
            let value_before = domain.lower_bound;

            domain.undo_trail_entry(&entry);

            if fixed_before && domain.lower_bound != domain.upper_bound {
                // Variable used to be fixed but is not after backtracking
                unfixed_variables.push((entry.domain_id, value_before));
            }
        });

        // Pending events belong to the popped part of the trail.
        let _ = self.events.drain().count();

        unfixed_variables
    }

    /// Verifies that the given domain is in a consistent (non-empty) state.
    pub fn verify_consistency(&self, domain_id: DomainId) -> Result<(), EmptyDomain> {
        self.domains[domain_id].verify_consistency()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ConstraintProgrammingTrailEntry {
    pub domain_id: DomainId,
    pub change: DomainChange,
    /// Explicitly store the bounds before the change was applied so that it is easier later
    /// on to update the bounds when backtracking.
    pub old_lower_bound: i32,
    pub old_upper_bound: i32,
    /// The propagator that performed the change; [`None`] for decisions and root-level work.
    pub cause: Option<PropagatorId>,
}

/// An atomic change to a single domain as recorded on the trail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomainChange {
    LowerBound(i32),
    UpperBound(i32),
    Removal(i32),
}

/// This is the CP representation of a domain. It stores the current bounds, alongside the
/// individual values that are in the domain. To support negative values, and to prevent
/// allocating more memory than the size of the domain, an offset is determined which is used
/// to index into the slice that keeps track of whether an individual value is in the domain.
///
/// When the domain is in an empty state, `lower_bound > upper_bound` and the state of the
/// `is_value_in_domain` field is undefined.
#[derive(Clone, Debug)]
struct IntegerDomainExplicit {
    id: DomainId,

    lower_bound: i32,
    upper_bound: i32,

    offset: i32,
    is_value_in_domain: Box<[bool]>,
}

impl IntegerDomainExplicit {
    fn new(lower_bound: i32, upper_bound: i32, id: DomainId) -> IntegerDomainExplicit {
        quince_assert_simple!(lower_bound <= upper_bound, "Cannot create an empty domain.");

        let size = upper_bound - lower_bound + 1;
        let is_value_in_domain = vec![true; size as usize];

        let offset = -lower_bound;

        IntegerDomainExplicit {
            id,
            lower_bound,
            upper_bound,
            offset,
            is_value_in_domain: is_value_in_domain.into(),
        }
    }

    fn contains(&self, value: i32) -> bool {
        self.lower_bound <= value
            && value <= self.upper_bound
            && self.is_value_in_domain[self.get_index(value)]
    }

    fn remove_value(&mut self, removed_value: i32, events: &mut EventSink) {
        if removed_value < self.lower_bound || removed_value > self.upper_bound {
            return;
        }

        let idx = self.get_index(removed_value);

        if !self.is_value_in_domain[idx] {
            return;
        }

        events.event_occurred(IntDomainEvent::Removal, self.id);

        self.is_value_in_domain[idx] = false;

        // check if removing the value triggers a lower bound update
        if self.lower_bound == removed_value {
            self.set_lower_bound(removed_value + 1, events);
        }
        // check if removing the value triggers an upper bound update
        if self.upper_bound == removed_value {
            self.set_upper_bound(removed_value - 1, events);
        }

        if self.lower_bound == self.upper_bound {
            events.event_occurred(IntDomainEvent::Assign, self.id);
        }
    }

    fn set_upper_bound(&mut self, new_upper_bound: i32, events: &mut EventSink) {
        if new_upper_bound >= self.upper_bound {
            return;
        }

        events.event_occurred(IntDomainEvent::UpperBound, self.id);

        self.upper_bound = new_upper_bound;
        self.update_upper_bound_with_respect_to_holes();

        if self.lower_bound == self.upper_bound {
            events.event_occurred(IntDomainEvent::Assign, self.id);
        }
    }

    fn update_upper_bound_with_respect_to_holes(&mut self) {
        // the first check ensures that we do not access a vector location with negative index
        while self.upper_bound + self.offset >= 0
            && !self.is_value_in_domain[self.get_index(self.upper_bound)]
        {
            self.upper_bound -= 1;
        }
    }

    fn set_lower_bound(&mut self, new_lower_bound: i32, events: &mut EventSink) {
        if new_lower_bound <= self.lower_bound {
            return;
        }

        events.event_occurred(IntDomainEvent::LowerBound, self.id);

        self.lower_bound = new_lower_bound;
        self.update_lower_bound_with_respect_to_holes();

        if self.lower_bound == self.upper_bound {
            events.event_occurred(IntDomainEvent::Assign, self.id);
        }
    }

    fn update_lower_bound_with_respect_to_holes(&mut self) {
        while self.get_index(self.lower_bound) < self.is_value_in_domain.len()
            && !self.is_value_in_domain[self.get_index(self.lower_bound)]
        {
            self.lower_bound += 1;
        }
    }

    fn get_index(&self, value: i32) -> usize {
        (value + self.offset) as usize
    }

    fn debug_bounds_check(&self) -> bool {
        // If the domain is empty, the lower bound will be greater than the upper bound.
        if self.lower_bound > self.upper_bound {
            true
        } else {
            let lb_idx = self.get_index(self.lower_bound);
            let ub_idx = self.get_index(self.upper_bound);

            lb_idx < self.is_value_in_domain.len()
                && ub_idx < self.is_value_in_domain.len()
                && self.is_value_in_domain[lb_idx]
                && self.is_value_in_domain[ub_idx]
        }
    }

    fn verify_consistency(&self) -> Result<(), EmptyDomain> {
        if self.lower_bound > self.upper_bound {
            Err(EmptyDomain)
        } else {
            Ok(())
        }
    }

    /// Rolls back a single trail entry. Entries must be undone in the reverse order in which
    /// they were pushed, the stored old bounds then restore both bounds in one step.
    fn undo_trail_entry(&mut self, entry: &ConstraintProgrammingTrailEntry) {
        quince_assert_moderate!(entry.domain_id == self.id);

        if let DomainChange::Removal(removed_value) = entry.change {
            let value_idx = self.get_index(removed_value);
            self.is_value_in_domain[value_idx] = true;
        }

        self.lower_bound = entry.old_lower_bound;
        self.upper_bound = entry.old_upper_bound;

        quince_assert_moderate!(self.debug_bounds_check());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_in_bound_change_lower_and_upper_bound_event_backtrack() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assignments.increase_decision_level();

        assignments
            .remove_value_from_domain(d1, 2, None)
            .expect("non-empty domain");
        assignments
            .remove_value_from_domain(d1, 1, None)
            .expect("non-empty domain");

        assert_eq!(assignments.get_lower_bound(d1), 3);

        let _ = assignments.synchronise(0);

        assert_eq!(assignments.get_lower_bound(d1), 1);
        assert!(assignments.is_value_in_domain(d1, 1));
        assert!(assignments.is_value_in_domain(d1, 2));
    }

    #[test]
    fn lower_bound_change_lower_bound_event() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assignments
            .tighten_lower_bound(d1, 2, None)
            .expect("non-empty domain");

        let events = assignments.drain_domain_events().collect::<Vec<_>>();
        assert_eq!(events.len(), 1);
        assert!(events.contains(&(IntDomainEvent::LowerBound, d1)));
    }

    #[test]
    fn upper_bound_change_triggers_upper_bound_event() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assignments
            .tighten_upper_bound(d1, 2, None)
            .expect("non-empty domain");

        let events = assignments.drain_domain_events().collect::<Vec<_>>();
        assert_eq!(events.len(), 1);
        assert!(events.contains(&(IntDomainEvent::UpperBound, d1)));
    }

    #[test]
    fn bounds_change_can_also_trigger_assign_event() {
        let mut assignments = Assignments::default();

        let d1 = assignments.grow(1, 5);
        let d2 = assignments.grow(1, 5);

        assignments
            .tighten_lower_bound(d1, 5, None)
            .expect("non-empty domain");
        assignments
            .tighten_upper_bound(d2, 1, None)
            .expect("non-empty domain");

        let events = assignments.drain_domain_events().collect::<Vec<_>>();
        assert_eq!(events.len(), 4);

        assert!(events.contains(&(IntDomainEvent::LowerBound, d1)));
        assert!(events.contains(&(IntDomainEvent::Assign, d1)));
        assert!(events.contains(&(IntDomainEvent::UpperBound, d2)));
        assert!(events.contains(&(IntDomainEvent::Assign, d2)));
    }

    #[test]
    fn making_assignment_triggers_appropriate_events() {
        let mut assignments = Assignments::default();

        let d1 = assignments.grow(1, 5);
        let d2 = assignments.grow(1, 5);
        let d3 = assignments.grow(1, 5);

        assignments
            .make_assignment(d1, 1, None)
            .expect("non-empty domain");
        assignments
            .make_assignment(d2, 5, None)
            .expect("non-empty domain");
        assignments
            .make_assignment(d3, 3, None)
            .expect("non-empty domain");

        let events = assignments.drain_domain_events().collect::<Vec<_>>();
        assert_eq!(events.len(), 7);

        assert!(events.contains(&(IntDomainEvent::Assign, d1)));
        assert!(events.contains(&(IntDomainEvent::UpperBound, d1)));

        assert!(events.contains(&(IntDomainEvent::Assign, d2)));
        assert!(events.contains(&(IntDomainEvent::LowerBound, d2)));

        assert!(events.contains(&(IntDomainEvent::Assign, d3)));
        assert!(events.contains(&(IntDomainEvent::LowerBound, d3)));
        assert!(events.contains(&(IntDomainEvent::UpperBound, d3)));
    }

    #[test]
    fn removal_triggers_removal_event() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assignments
            .remove_value_from_domain(d1, 2, None)
            .expect("non-empty domain");

        let events = assignments.drain_domain_events().collect::<Vec<_>>();
        assert_eq!(events.len(), 1);
        assert!(events.contains(&(IntDomainEvent::Removal, d1)));
    }

    #[test]
    fn removal_at_the_bound_tightens_the_bound_over_holes() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assignments
            .remove_value_from_domain(d1, 4, None)
            .expect("non-empty domain");
        assignments
            .remove_value_from_domain(d1, 5, None)
            .expect("non-empty domain");

        // the upper bound jumps over the hole at 4
        assert_eq!(assignments.get_upper_bound(d1), 3);
    }

    #[test]
    fn an_empty_domain_is_left_in_place_until_backtracking() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assignments.increase_decision_level();

        let result = assignments.tighten_lower_bound(d1, 6, None);
        assert_eq!(result, Err(EmptyDomain));

        assert!(assignments.get_lower_bound(d1) > assignments.get_upper_bound(d1));

        let _ = assignments.synchronise(0);

        assert_eq!(assignments.get_lower_bound(d1), 1);
        assert_eq!(assignments.get_upper_bound(d1), 5);
    }

    #[test]
    fn trail_entries_are_popped_down_to_the_target_level() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(0, 10);
        let d2 = assignments.grow(0, 10);

        assignments.increase_decision_level();
        assignments
            .tighten_lower_bound(d1, 3, None)
            .expect("non-empty domain");

        assignments.increase_decision_level();
        assignments
            .tighten_upper_bound(d2, 6, None)
            .expect("non-empty domain");
        assignments
            .tighten_lower_bound(d1, 5, None)
            .expect("non-empty domain");

        assert_eq!(assignments.num_trail_entries(), 3);

        let _ = assignments.synchronise(1);

        assert_eq!(assignments.num_trail_entries(), 1);
        assert_eq!(assignments.get_lower_bound(d1), 3);
        assert_eq!(assignments.get_upper_bound(d2), 10);

        let _ = assignments.synchronise(0);

        assert_eq!(assignments.num_trail_entries(), 0);
        assert_eq!(assignments.get_lower_bound(d1), 0);
    }

    #[test]
    fn synchronise_reports_unfixed_variables() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);
        let d2 = assignments.grow(1, 5);

        assignments.increase_decision_level();
        assignments
            .make_assignment(d1, 4, None)
            .expect("non-empty domain");
        assignments
            .tighten_lower_bound(d2, 2, None)
            .expect("non-empty domain");

        let unfixed = assignments.synchronise(0);

        assert_eq!(unfixed, vec![(d1, 4)]);
    }

    #[test]
    fn sparse_domain_has_root_level_holes() {
        let mut assignments = Assignments::default();
        let d1 = assignments.create_new_integer_variable_sparse(vec![7, 1, 3]);

        assert_eq!(assignments.get_lower_bound(d1), 1);
        assert_eq!(assignments.get_upper_bound(d1), 7);
        assert!(!assignments.is_value_in_domain(d1, 2));
        assert!(!assignments.is_value_in_domain(d1, 4));
        assert!(assignments.is_value_in_domain(d1, 3));

        let collected: Vec<i32> = assignments.domain_iterator(d1).collect();
        assert_eq!(collected, vec![1, 3, 7]);
    }

    #[test]
    fn interval_removal_overlapping_the_lower_bound_tightens_it() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 10);

        assignments
            .remove_interval_from_domain(d1, 1, 4, None)
            .expect("non-empty domain");

        assert_eq!(assignments.get_lower_bound(d1), 5);
        // a single bound change is recorded rather than four removals
        assert_eq!(assignments.num_trail_entries(), 1);
    }

    #[test]
    fn interval_removal_strictly_inside_punches_holes() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 10);

        assignments
            .remove_interval_from_domain(d1, 3, 5, None)
            .expect("non-empty domain");

        assert_eq!(assignments.get_lower_bound(d1), 1);
        assert_eq!(assignments.get_upper_bound(d1), 10);
        assert!(!assignments.is_value_in_domain(d1, 3));
        assert!(!assignments.is_value_in_domain(d1, 4));
        assert!(!assignments.is_value_in_domain(d1, 5));
    }
}
