//! Append-only log storage
//!
//! Entries are only ever pushed; there is no update or delete.

use serde::Serialize;

use crate::models::{FoodLogEntry, SupplementLogEntry, WeightLogEntry};

/// An ordered, append-only sequence of entries (oldest first)
#[derive(Debug, Clone)]
pub struct LogStore<T> {
    entries: Vec<T>,
}

impl<T> Default for LogStore<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T: Clone> LogStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry at the end. Never rejects and never deduplicates.
    pub fn append(&mut self, entry: T) {
        self.entries.push(entry);
    }

    /// Borrowed view of every entry, in insertion order
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Owned copy of the current entries; later appends do not affect it
    pub fn snapshot(&self) -> Vec<T> {
        self.entries.clone()
    }

    pub fn last(&self) -> Option<&T> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The three kinds of log a session keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Food,
    Supplement,
    Weight,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Food => "food",
            LogKind::Supplement => "supplement",
            LogKind::Weight => "weight",
        }
    }
}

/// Read-only view of one log
#[derive(Debug, Clone, Copy)]
pub enum LogView<'a> {
    Food(&'a [FoodLogEntry]),
    Supplement(&'a [SupplementLogEntry]),
    Weight(&'a [WeightLogEntry]),
}

impl LogView<'_> {
    pub fn kind(&self) -> LogKind {
        match self {
            LogView::Food(_) => LogKind::Food,
            LogView::Supplement(_) => LogKind::Supplement,
            LogView::Weight(_) => LogKind::Weight,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LogView::Food(e) => e.len(),
            LogView::Supplement(e) => e.len(),
            LogView::Weight(e) => e.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Number of entries in each log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LogCounts {
    pub food: usize,
    pub supplement: usize,
    pub weight: usize,
}

/// State of one user session: the three logs
///
/// Created when a session starts and dropped when it ends. Every operation
/// that reads or appends takes it explicitly.
#[derive(Debug, Clone, Default)]
pub struct Session {
    food: LogStore<FoodLogEntry>,
    supplements: LogStore<SupplementLogEntry>,
    weights: LogStore<WeightLogEntry>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_food(&mut self, entry: FoodLogEntry) {
        self.food.append(entry);
    }

    pub fn append_supplement(&mut self, entry: SupplementLogEntry) {
        self.supplements.append(entry);
    }

    pub fn append_weight(&mut self, entry: WeightLogEntry) {
        self.weights.append(entry);
    }

    pub fn food(&self) -> &LogStore<FoodLogEntry> {
        &self.food
    }

    pub fn supplements(&self) -> &LogStore<SupplementLogEntry> {
        &self.supplements
    }

    pub fn weights(&self) -> &LogStore<WeightLogEntry> {
        &self.weights
    }

    pub fn entries_for_kind(&self, kind: LogKind) -> LogView<'_> {
        match kind {
            LogKind::Food => LogView::Food(self.food.entries()),
            LogKind::Supplement => LogView::Supplement(self.supplements.entries()),
            LogKind::Weight => LogView::Weight(self.weights.entries()),
        }
    }

    pub fn counts(&self) -> LogCounts {
        LogCounts {
            food: self.food.len(),
            supplement: self.supplements.len(),
            weight: self.weights.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn weight(d: u32, kg: f64) -> WeightLogEntry {
        WeightLogEntry { date: day(d), weight_kg: kg }
    }

    #[test]
    fn test_append_preserves_order_and_count() {
        let mut store = LogStore::new();
        for i in 0..50 {
            store.append(i);
        }
        assert_eq!(store.len(), 50);
        assert_eq!(store.entries(), (0..50).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn test_no_deduplication() {
        let mut store = LogStore::new();
        store.append(weight(1, 80.0));
        store.append(weight(1, 80.0));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_snapshot_unaffected_by_later_appends() {
        let mut store = LogStore::new();
        store.append(weight(1, 80.0));
        let snapshot = store.snapshot();
        store.append(weight(2, 79.5));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_session_logs_are_independent() {
        let mut session = Session::new();
        session.append_weight(weight(1, 80.0));
        session.append_weight(weight(2, 79.5));

        assert_eq!(
            session.counts(),
            LogCounts { food: 0, supplement: 0, weight: 2 }
        );
        assert!(session.entries_for_kind(LogKind::Food).is_empty());

        match session.entries_for_kind(LogKind::Weight) {
            LogView::Weight(entries) => {
                assert_eq!(entries[0].weight_kg, 80.0);
                assert_eq!(entries[1].weight_kg, 79.5);
            }
            other => panic!("wrong view: {:?}", other.kind()),
        }
    }

    #[test]
    fn test_out_of_date_order_kept_as_inserted() {
        let mut session = Session::new();
        session.append_weight(weight(5, 78.0));
        session.append_weight(weight(2, 80.0));
        let dates: Vec<_> = session.weights().entries().iter().map(|w| w.date).collect();
        assert_eq!(dates, vec![day(5), day(2)]);
    }
}
