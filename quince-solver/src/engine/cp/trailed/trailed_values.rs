use super::TrailedChange;
use super::TrailedInteger;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;

/// Reversible integers for propagators that maintain incremental state across decision levels.
///
/// Each cell carries a stamp holding the decision level of its last logged write. Only the
/// first write on a level pushes a [`TrailedChange`], later writes on the same level overwrite
/// the live value directly. [`TrailedValues::synchronise`] undoes the logged writes in reverse
/// order, restoring both the value and the stamp of each touched cell.
#[derive(Default, Debug, Clone)]
pub(crate) struct TrailedValues {
    trail: Trail<TrailedChange>,
    values: KeyedVec<TrailedInteger, i64>,
    stamps: KeyedVec<TrailedInteger, usize>,
}

impl TrailedValues {
    pub(crate) fn grow(&mut self, initial_value: i64) -> TrailedInteger {
        let _ = self.stamps.push(self.trail.get_decision_level());
        self.values.push(initial_value)
    }

    pub(crate) fn increase_decision_level(&mut self) {
        self.trail.increase_decision_level()
    }

    pub(crate) fn read(&self, trailed_integer: TrailedInteger) -> i64 {
        self.values[trailed_integer]
    }

    pub(crate) fn synchronise(&mut self, new_decision_level: usize) {
        self.trail
            .synchronise(new_decision_level)
            .for_each(|state_change| {
                self.values[state_change.reference] = state_change.old_value;
                self.stamps[state_change.reference] = state_change.old_stamp;
            })
    }

    fn write(&mut self, trailed_integer: TrailedInteger, value: i64) {
        if self.values[trailed_integer] == value {
            return;
        }

        let current_decision_level = self.trail.get_decision_level();
        if self.stamps[trailed_integer] != current_decision_level {
            self.trail.push(TrailedChange {
                old_value: self.values[trailed_integer],
                old_stamp: self.stamps[trailed_integer],
                reference: trailed_integer,
            });
            self.stamps[trailed_integer] = current_decision_level;
        }

        self.values[trailed_integer] = value;
    }

    pub(crate) fn add_assign(&mut self, trailed_integer: TrailedInteger, addition: i64) {
        self.write(trailed_integer, self.values[trailed_integer] + addition);
    }

    pub(crate) fn assign(&mut self, trailed_integer: TrailedInteger, value: i64) {
        self.write(trailed_integer, value);
    }
}

#[cfg(test)]
mod tests {
    use super::TrailedValues;

    #[test]
    fn test_write_resets() {
        let mut trailed_values = TrailedValues::default();
        let trailed_integer = trailed_values.grow(0);

        assert_eq!(trailed_values.read(trailed_integer), 0);

        trailed_values.increase_decision_level();
        trailed_values.add_assign(trailed_integer, 5);

        assert_eq!(trailed_values.read(trailed_integer), 5);

        trailed_values.add_assign(trailed_integer, 5);
        assert_eq!(trailed_values.read(trailed_integer), 10);

        trailed_values.increase_decision_level();
        trailed_values.add_assign(trailed_integer, 1);

        assert_eq!(trailed_values.read(trailed_integer), 11);

        trailed_values.synchronise(1);
        assert_eq!(trailed_values.read(trailed_integer), 10);

        trailed_values.synchronise(0);
        assert_eq!(trailed_values.read(trailed_integer), 0);
    }

    #[test]
    fn only_the_first_write_on_a_level_is_logged() {
        let mut trailed_values = TrailedValues::default();
        let trailed_integer = trailed_values.grow(3);

        trailed_values.increase_decision_level();
        trailed_values.assign(trailed_integer, 10);
        trailed_values.assign(trailed_integer, 20);
        trailed_values.assign(trailed_integer, 30);

        // all three writes collapse into the single logged pre-level value
        trailed_values.synchronise(0);
        assert_eq!(trailed_values.read(trailed_integer), 3);
    }

    #[test]
    fn root_level_writes_survive_synchronisation() {
        let mut trailed_values = TrailedValues::default();
        let trailed_integer = trailed_values.grow(0);

        trailed_values.assign(trailed_integer, 7);

        trailed_values.increase_decision_level();
        trailed_values.assign(trailed_integer, 9);

        trailed_values.synchronise(0);
        assert_eq!(trailed_values.read(trailed_integer), 7);
    }

    #[test]
    fn a_cell_can_be_relogged_after_backtracking() {
        let mut trailed_values = TrailedValues::default();
        let trailed_integer = trailed_values.grow(1);

        trailed_values.increase_decision_level();
        trailed_values.assign(trailed_integer, 2);

        trailed_values.synchronise(0);
        assert_eq!(trailed_values.read(trailed_integer), 1);

        trailed_values.increase_decision_level();
        trailed_values.assign(trailed_integer, 4);

        trailed_values.synchronise(0);
        assert_eq!(trailed_values.read(trailed_integer), 1);
    }
}
