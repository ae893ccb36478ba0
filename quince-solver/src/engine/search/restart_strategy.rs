use std::fmt::Debug;

use crate::basic_types::sequence_generators::ConstantSequence;
use crate::basic_types::sequence_generators::GeometricSequence;
use crate::basic_types::sequence_generators::LubySequence;
use crate::basic_types::sequence_generators::SequenceGenerator;
use crate::basic_types::sequence_generators::SequenceGeneratorType;

/// The options which are used by the solver to determine when a restart should occur.
///
/// A restart becomes possible once the number of conflicts since the previous restart passes a
/// threshold drawn from a restart sequence; the supported sequences are constant restarts
/// (see [Section 3 of \[1\]](https://fmv.jku.at/papers/BiereFroehlich-POS15.pdf)), geometric
/// restarts and Luby restarts
/// (see [\[2\]](https://www.sciencedirect.com/science/article/pii/0020019093900299)).
///
/// # Bibliography
/// \[1\] A. Biere and A. Fröhlich, ‘Evaluating CDCL restart schemes’, Proceedings of Pragmatics of
/// SAT, pp. 1–17, 2015.
///
/// \[2\] M. Luby, A. Sinclair, and D. Zuckerman, ‘Optimal speedup of Las Vegas algorithms’,
/// Information Processing Letters, vol. 47, no. 4, pp. 173–180, 1993.
#[derive(Debug, Clone, Copy)]
pub struct RestartOptions {
    /// Decides the sequence based on which the restarts are performed.
    /// To be used in combination with [`RestartOptions::base_interval`]
    pub sequence_generator_type: SequenceGeneratorType,
    /// The base interval length is used as a multiplier to the restart sequence.
    /// For example, constant restarts with base interval 100 means a restart is triggered every
    /// 100 conflicts.
    pub base_interval: u64,
    /// The minimum number of conflicts to be reached before the first restart is considered
    pub min_num_conflicts_before_first_restart: u64,
    /// The coefficient in the geometric sequence `x_i = x_{i-1} * geometric-coef` where `x_1 =
    /// `[`RestartOptions::base_interval`]. Used only if
    /// [`RestartOptions::sequence_generator_type`] is assigned to
    /// [`SequenceGeneratorType::Geometric`].
    pub geometric_coef: Option<f64>,
}

impl Default for RestartOptions {
    fn default() -> Self {
        Self {
            sequence_generator_type: SequenceGeneratorType::Constant,
            base_interval: 50,
            min_num_conflicts_before_first_restart: 10000,
            geometric_coef: None,
        }
    }
}

/// Tracks conflicts between restarts and decides when the next restart may take place.
///
/// The solver reports every conflict through [`RestartStrategy::notify_conflict`] and consults
/// [`RestartStrategy::should_restart`] before opening a node; once a restart is performed the
/// strategy is told through [`RestartStrategy::notify_restart`] and draws the next threshold
/// from its sequence.
#[derive(Debug)]
pub(crate) struct RestartStrategy {
    /// A generator for determining how many conflicts should be found before the next restart is
    /// able to take place (one example of such a generator is [`LubySequence`]).
    sequence_generator: Box<dyn SequenceGenerator>,
    /// The number of conflicts encountered since the last restart took place
    number_of_conflicts_encountered_since_restart: u64,
    /// The number of conflicts until the next restart is able to take place
    number_of_conflicts_until_restart: u64,
    /// The minimum number of conflicts until the first restart is able to take place
    minimum_number_of_conflicts_before_first_restart: u64,
    /// The number of restarts which have been performed.
    number_of_restarts: u64,
}

impl RestartStrategy {
    pub(crate) fn new(options: RestartOptions) -> Self {
        let mut sequence_generator: Box<dyn SequenceGenerator> =
            match options.sequence_generator_type {
                SequenceGeneratorType::Constant => {
                    Box::new(ConstantSequence::new(options.base_interval as i64))
                }
                SequenceGeneratorType::Geometric => Box::new(GeometricSequence::new(
                    options.base_interval as i64,
                    options.geometric_coef.expect(
                        "Using the geometric sequence for restarts, but the parameter geometric-coef is not defined.",
                    ),
                )),
                SequenceGeneratorType::Luby => {
                    Box::new(LubySequence::new(options.base_interval as i64))
                }
            };

        let number_of_conflicts_until_restart =
            sequence_generator.next().try_into().expect(
                "Expected restart generator to generate a positive value but it generated a negative one",
            );

        RestartStrategy {
            sequence_generator,
            number_of_conflicts_encountered_since_restart: 0,
            number_of_conflicts_until_restart,
            minimum_number_of_conflicts_before_first_restart: options
                .min_num_conflicts_before_first_restart,
            number_of_restarts: 0,
        }
    }

    /// Determines whether the restart strategy indicates that a restart should take place; note
    /// that it is up to the solver to decide whether the restart is actually performed.
    pub(crate) fn should_restart(&self) -> bool {
        // Do not restart until a certain number of conflicts has taken place before the first
        // restart
        if self.number_of_restarts == 0
            && self.number_of_conflicts_encountered_since_restart
                < self.minimum_number_of_conflicts_before_first_restart
        {
            return false;
        }

        self.number_of_conflicts_until_restart
            <= self.number_of_conflicts_encountered_since_restart
    }

    /// Notifies the restart strategy that a conflict has taken place.
    pub(crate) fn notify_conflict(&mut self) {
        self.number_of_conflicts_encountered_since_restart += 1;
    }

    /// Notifies the restart strategy that a restart has taken place so that it can adjust its
    /// internal values.
    pub(crate) fn notify_restart(&mut self) {
        self.number_of_restarts += 1;
        self.reset_values();
    }

    /// Resets the conflict count and draws the next restart threshold from the sequence.
    fn reset_values(&mut self) {
        self.number_of_conflicts_until_restart =
            self.sequence_generator.next().try_into().expect(
                "Expected restart generator to generate a positive value but it generated a negative one",
            );
        self.number_of_conflicts_encountered_since_restart = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_options(base_interval: u64, min_num_conflicts: u64) -> RestartOptions {
        RestartOptions {
            sequence_generator_type: SequenceGeneratorType::Constant,
            base_interval,
            min_num_conflicts_before_first_restart: min_num_conflicts,
            geometric_coef: None,
        }
    }

    #[test]
    fn no_restart_before_the_first_minimum_is_reached() {
        let mut strategy = RestartStrategy::new(test_options(2, 10));

        for _ in 0..9 {
            strategy.notify_conflict();
        }
        assert!(!strategy.should_restart());

        strategy.notify_conflict();
        assert!(strategy.should_restart());
    }

    #[test]
    fn the_minimum_only_applies_to_the_first_restart() {
        let mut strategy = RestartStrategy::new(test_options(2, 5));

        for _ in 0..5 {
            strategy.notify_conflict();
        }
        assert!(strategy.should_restart());
        strategy.notify_restart();

        assert!(!strategy.should_restart());
        strategy.notify_conflict();
        strategy.notify_conflict();
        assert!(strategy.should_restart());
    }

    #[test]
    fn luby_sequence_drives_the_thresholds() {
        let mut strategy = RestartStrategy::new(RestartOptions {
            sequence_generator_type: SequenceGeneratorType::Luby,
            base_interval: 1,
            min_num_conflicts_before_first_restart: 0,
            geometric_coef: None,
        });

        // Luby with base 1 starts as 1, 1, 2
        strategy.notify_conflict();
        assert!(strategy.should_restart());
        strategy.notify_restart();

        strategy.notify_conflict();
        assert!(strategy.should_restart());
        strategy.notify_restart();

        strategy.notify_conflict();
        assert!(!strategy.should_restart());
        strategy.notify_conflict();
        assert!(strategy.should_restart());
    }
}
