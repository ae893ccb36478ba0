use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::Range;

use rand::Rng;
use rand::SeedableRng;

use crate::quince_assert_moderate;

/// A trait for generating random values; an example of where this is used is in the
/// [`InDomainRandom`](crate::branching::value_selection::InDomainRandom) value selector where it
/// is used to determine which value in the domain to select.
///
/// The randomness in the solver is controlled by the solver itself, which hands the generator to
/// the [`SelectionContext`](crate::branching::SelectionContext).
pub trait Random: Debug {
    /// Generates a bool with probability `probability` of being true. It should hold that
    /// `probability ∈ [0, 1]`, this method will panic if this is not the case.
    fn generate_bool(&mut self, probability: f64) -> bool;

    /// Generates a random usize in the provided range with equal probability; this can be seen as
    /// sampling from a uniform distribution in the range `[range.start, range.end)`.
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize;
}

// We provide a blanket implementation of the trait for any type which implements `SeedableRng`,
// `Rng` and `Debug` to ensure that we can use any "regular" random generator where we expect an
// implementation of Random.
impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_bool(&mut self, probability: f64) -> bool {
        quince_assert_moderate!(
            !matches!(probability.partial_cmp(&0.0), Some(Ordering::Less))
                && !matches!(probability.partial_cmp(&1.0), Some(Ordering::Greater)),
            "It should hold that 0.0 <= {probability} <= 1.0"
        );
        self.gen_bool(probability)
    }

    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
        self.gen_range(range)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cmp::Ordering;
    use std::ops::Range;

    use super::Random;
    use crate::quince_assert_simple;

    /// A test "random" generator which takes as input a list of elements of [`usize`] and [`bool`]
    /// and returns them in order. If more values are attempted to be generated than are provided
    /// then this will result in panicking.
    #[derive(Debug, Default)]
    pub(crate) struct TestRandom {
        pub(crate) usizes: Vec<usize>,
        pub(crate) bools: Vec<bool>,
    }

    impl Random for TestRandom {
        fn generate_bool(&mut self, probability: f64) -> bool {
            let selected = self.bools.remove(0);
            quince_assert_simple!(
                if matches!(probability.partial_cmp(&1.0), Some(Ordering::Equal)) {
                    selected
                } else if matches!(probability.partial_cmp(&0.0), Some(Ordering::Equal)) {
                    !selected
                } else {
                    true
                },
                "The probability is {probability} but the selected value is {selected}, this should not be possible, please ensure that your test cases are correctly defined"
            );
            selected
        }

        fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
            let selected = self.usizes.remove(0);
            quince_assert_simple!(
                range.contains(&selected),
                "The selected element by `TestRandom` ({selected}) is not in the provided range ({range:?}) and thus should not be returned, please ensure that your test cases are correctly defined"
            );
            selected
        }
    }
}
