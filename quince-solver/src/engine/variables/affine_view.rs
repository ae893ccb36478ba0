use std::cmp::Ordering;

use enumset::EnumSet;

use super::TransformableVariable;
use crate::engine::cp::opaque_domain_event::OpaqueDomainEvent;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::IntDomainEvent;
use crate::engine::cp::Watchers;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::math::num_ext::NumExt;

/// Models the constraint `y = ax + b`, by expressing the domain of `y` as a transformation of the
/// domain of `x`.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct AffineView<Inner> {
    inner: Inner,
    scale: i32,
    offset: i32,
}

impl<Inner> AffineView<Inner> {
    pub fn new(inner: Inner, scale: i32, offset: i32) -> Self {
        AffineView {
            inner,
            scale,
            offset,
        }
    }

    /// Apply the inverse transformation of this view on a value, to go from the value in the
    /// domain of `self` to a value in the domain of `self.inner`.
    fn invert(&self, value: i32, rounding: Rounding) -> i32 {
        let inverted_translation = value - self.offset;

        match rounding {
            Rounding::Up => <i32 as NumExt>::div_ceil(inverted_translation, self.scale),
            Rounding::Down => <i32 as NumExt>::div_floor(inverted_translation, self.scale),
        }
    }

    fn map(&self, value: i32) -> i32 {
        self.scale * value + self.offset
    }
}

impl<View> IntegerVariable for AffineView<View>
where
    View: IntegerVariable,
{
    type AffineView = Self;

    fn lower_bound(&self, assignment: &Assignments) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.upper_bound(assignment))
        } else {
            self.map(self.inner.lower_bound(assignment))
        }
    }

    fn upper_bound(&self, assignment: &Assignments) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.lower_bound(assignment))
        } else {
            self.map(self.inner.upper_bound(assignment))
        }
    }

    fn contains(&self, assignment: &Assignments, value: i32) -> bool {
        if (value - self.offset) % self.scale == 0 {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.contains(assignment, inverted)
        } else {
            false
        }
    }

    fn iterate_domain(&self, assignment: &Assignments) -> impl Iterator<Item = i32> {
        self.inner
            .iterate_domain(assignment)
            .map(|value| self.map(value))
    }

    fn remove(
        &self,
        assignment: &mut Assignments,
        value: i32,
        cause: Option<PropagatorId>,
    ) -> Result<(), EmptyDomain> {
        if (value - self.offset) % self.scale == 0 {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.remove(assignment, inverted, cause)
        } else {
            Ok(())
        }
    }

    fn remove_interval(
        &self,
        assignment: &mut Assignments,
        lower: i32,
        upper: i32,
        cause: Option<PropagatorId>,
    ) -> Result<(), EmptyDomain> {
        // Rounding inward keeps unrepresentable endpoints out of the inner interval.
        let (inner_lower, inner_upper) = if self.scale < 0 {
            (
                self.invert(upper, Rounding::Up),
                self.invert(lower, Rounding::Down),
            )
        } else {
            (
                self.invert(lower, Rounding::Up),
                self.invert(upper, Rounding::Down),
            )
        };
        self.inner
            .remove_interval(assignment, inner_lower, inner_upper, cause)
    }

    fn set_lower_bound(
        &self,
        assignment: &mut Assignments,
        value: i32,
        cause: Option<PropagatorId>,
    ) -> Result<(), EmptyDomain> {
        if self.scale >= 0 {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.set_lower_bound(assignment, inverted, cause)
        } else {
            let inverted = self.invert(value, Rounding::Down);
            self.inner.set_upper_bound(assignment, inverted, cause)
        }
    }

    fn set_upper_bound(
        &self,
        assignment: &mut Assignments,
        value: i32,
        cause: Option<PropagatorId>,
    ) -> Result<(), EmptyDomain> {
        if self.scale >= 0 {
            let inverted = self.invert(value, Rounding::Down);
            self.inner.set_upper_bound(assignment, inverted, cause)
        } else {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.set_lower_bound(assignment, inverted, cause)
        }
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, mut events: EnumSet<IntDomainEvent>) {
        let bound = IntDomainEvent::LowerBound | IntDomainEvent::UpperBound;
        let intersection = events.intersection(bound);
        if intersection.len() == 1 && self.scale.is_negative() {
            events = events.symmetric_difference(bound);
        }
        self.inner.watch_all(watchers, events);
    }

    fn unpack_event(&self, event: OpaqueDomainEvent) -> IntDomainEvent {
        if self.scale.is_negative() {
            match self.inner.unpack_event(event) {
                IntDomainEvent::LowerBound => IntDomainEvent::UpperBound,
                IntDomainEvent::UpperBound => IntDomainEvent::LowerBound,
                event => event,
            }
        } else {
            self.inner.unpack_event(event)
        }
    }
}

impl<View> TransformableVariable<AffineView<View>> for AffineView<View>
where
    View: IntegerVariable,
{
    fn scaled(&self, scale: i32) -> AffineView<View> {
        let mut result = self.clone();
        result.scale *= scale;
        result.offset *= scale;
        result
    }

    fn offset(&self, offset: i32) -> AffineView<View> {
        let mut result = self.clone();
        result.offset += offset;
        result
    }
}

impl<Var: std::fmt::Debug> std::fmt::Debug for AffineView<Var> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.scale == -1 {
            write!(f, "-")?;
        } else if self.scale != 1 {
            write!(f, "{} * ", self.scale)?;
        }

        write!(f, "({:?})", self.inner)?;

        match self.offset.cmp(&0) {
            Ordering::Less => write!(f, " - {}", -self.offset)?,
            Ordering::Equal => {}
            Ordering::Greater => write!(f, " + {}", self.offset)?,
        }

        Ok(())
    }
}

impl From<DomainId> for AffineView<DomainId> {
    fn from(value: DomainId) -> Self {
        AffineView::new(value, 1, 0)
    }
}

enum Rounding {
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_an_affine_view() {
        let view = AffineView::new(DomainId::new(0), 3, 4);
        assert_eq!(3, view.scale);
        assert_eq!(4, view.offset);
        let scaled_view = view.scaled(6);
        assert_eq!(18, scaled_view.scale);
        assert_eq!(24, scaled_view.offset);
    }

    #[test]
    fn offsetting_an_affine_view() {
        let view = AffineView::new(DomainId::new(0), 3, 4);
        assert_eq!(3, view.scale);
        assert_eq!(4, view.offset);
        let scaled_view = view.offset(6);
        assert_eq!(3, scaled_view.scale);
        assert_eq!(10, scaled_view.offset);
    }

    #[test]
    fn negative_scale_flips_the_bounds() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(1, 5);

        let view = domain.scaled(-1);

        assert_eq!(-5, view.lower_bound(&assignments));
        assert_eq!(-1, view.upper_bound(&assignments));
    }

    #[test]
    fn scaled_view_only_contains_multiples() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(1, 5);

        let view = domain.scaled(2);

        assert!(view.contains(&assignments, 4));
        assert!(!view.contains(&assignments, 3));
        assert_eq!(
            vec![2, 4, 6, 8, 10],
            view.iterate_domain(&assignments).collect::<Vec<_>>()
        );
    }

    #[test]
    fn tightening_a_scaled_view_rounds_into_the_inner_domain() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(1, 5);

        let view = domain.scaled(2);

        view.set_upper_bound(&mut assignments, 7, None)
            .expect("no empty domain");
        assert_eq!(3, domain.upper_bound(&assignments));
        assert_eq!(6, view.upper_bound(&assignments));

        view.set_lower_bound(&mut assignments, 3, None)
            .expect("no empty domain");
        assert_eq!(2, domain.lower_bound(&assignments));
        assert_eq!(4, view.lower_bound(&assignments));
    }

    #[test]
    fn tightening_a_negated_view_updates_the_opposite_bound() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(1, 5);

        let view = domain.scaled(-1);

        view.set_lower_bound(&mut assignments, -3, None)
            .expect("no empty domain");
        assert_eq!(3, domain.upper_bound(&assignments));

        view.set_upper_bound(&mut assignments, -2, None)
            .expect("no empty domain");
        assert_eq!(2, domain.lower_bound(&assignments));
    }

    #[test]
    fn removing_an_unrepresentable_value_is_a_no_op() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(1, 5);

        let view = domain.scaled(2);

        view.remove(&mut assignments, 5, None)
            .expect("no empty domain");
        assert_eq!(1, domain.lower_bound(&assignments));
        assert_eq!(5, domain.upper_bound(&assignments));

        view.remove(&mut assignments, 6, None)
            .expect("no empty domain");
        assert!(!domain.contains(&assignments, 3));
    }
}
