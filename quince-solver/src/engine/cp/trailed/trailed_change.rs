use super::TrailedInteger;

/// The log record for the first write to a [`TrailedInteger`] on a decision level. Restoring
/// both the value and the stamp keeps later first-write checks exact after backtracking.
#[derive(Debug, Clone)]
pub(crate) struct TrailedChange {
    pub(crate) old_value: i64,
    pub(crate) old_stamp: usize,
    pub(crate) reference: TrailedInteger,
}
