//! Bounded calculation history.
//!
//! The history is an ordered log of [`Calculation`] records with a fixed
//! capacity. Appending past capacity evicts the oldest record first.

use super::record::Calculation;
use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Ordered, capacity-bounded sequence of calculation records.
///
/// Insertion order is chronological order. The store never holds more than
/// `max_history` records after an [`append`](Self::append).
///
/// # Example
///
/// ```rust
/// use reckoner::core::{Calculation, CalculationHistory};
/// use std::num::NonZeroUsize;
///
/// let mut history = CalculationHistory::new(NonZeroUsize::new(2).unwrap());
/// history.append(Calculation::new(1.0, 1.0, "add", 2.0));
/// history.append(Calculation::new(2.0, 2.0, "add", 4.0));
/// history.append(Calculation::new(3.0, 3.0, "add", 6.0));
///
/// let records = history.get_all();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].operand_a(), 2.0);
/// ```
#[derive(Clone, Debug)]
pub struct CalculationHistory {
    records: VecDeque<Calculation>,
    max_history: NonZeroUsize,
}

impl CalculationHistory {
    /// Create an empty history with the given capacity.
    pub fn new(max_history: NonZeroUsize) -> Self {
        Self {
            records: VecDeque::with_capacity(max_history.get().min(1024)),
            max_history,
        }
    }

    /// Append a record, evicting the oldest one if capacity is exceeded.
    pub fn append(&mut self, record: Calculation) {
        self.records.push_back(record);
        while self.records.len() > self.max_history.get() {
            self.records.pop_front();
        }
    }

    /// Copy of every record, oldest first.
    pub fn get_all(&self) -> Vec<Calculation> {
        self.records.iter().cloned().collect()
    }

    /// Replace the whole sequence with a copy of `records`.
    ///
    /// Capacity is not enforced here: restored states were valid when they
    /// were captured.
    pub fn replace(&mut self, records: &[Calculation]) {
        self.records = records.iter().cloned().collect();
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_history(&self) -> NonZeroUsize {
        self.max_history
    }

    /// Most recent record, if any.
    pub fn latest(&self) -> Option<&Calculation> {
        self.records.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Calculation> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn calc(a: f64) -> Calculation {
        Calculation::new(a, a, "add", a + a)
    }

    #[test]
    fn new_history_is_empty() {
        let history = CalculationHistory::new(capacity(5));
        assert!(history.is_empty());
        assert!(history.get_all().is_empty());
        assert!(history.latest().is_none());
    }

    #[test]
    fn append_evicts_oldest_when_full() {
        let mut history = CalculationHistory::new(capacity(2));
        history.append(calc(1.0));
        history.append(calc(2.0));
        assert_eq!(history.len(), 2);

        history.append(calc(3.0));

        let records = history.get_all();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].operand_a(), 2.0);
        assert_eq!(records[1].operand_a(), 3.0);
    }

    #[test]
    fn capacity_of_one_keeps_only_latest() {
        let mut history = CalculationHistory::new(capacity(1));
        history.append(calc(1.0));
        history.append(calc(7.0));

        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().unwrap().operand_a(), 7.0);
    }

    #[test]
    fn get_all_is_a_copy() {
        let mut history = CalculationHistory::new(capacity(5));
        history.append(calc(1.0));

        let mut copy = history.get_all();
        copy.clear();

        assert_eq!(history.len(), 1);
    }

    #[test]
    fn replace_does_not_enforce_capacity() {
        let mut history = CalculationHistory::new(capacity(1));
        history.replace(&[calc(1.0), calc(2.0), calc(3.0)]);

        assert_eq!(history.len(), 3);
        assert_eq!(history.get_all()[2].operand_a(), 3.0);
    }

    #[test]
    fn clear_empties_history() {
        let mut history = CalculationHistory::new(capacity(5));
        history.append(calc(1.0));
        history.clear();

        assert!(history.is_empty());
    }

    #[test]
    fn duplicate_records_are_kept() {
        let record = calc(4.0);
        let mut history = CalculationHistory::new(capacity(5));
        history.append(record.clone());
        history.append(record);

        assert_eq!(history.len(), 2);
        assert_eq!(history.iter().filter(|c| c.operand_a() == 4.0).count(), 2);
    }
}
