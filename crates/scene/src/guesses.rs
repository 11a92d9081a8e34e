use std::collections::HashMap;

use crate::country::CountryId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn from_correct(is_correct: bool) -> Self {
        if is_correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }
}

/// Per-country memory of guess outcomes.
///
/// Entries are overwritten on re-guess and never removed for the lifetime
/// of the store.
pub trait GuessStore {
    fn record_outcome(&mut self, id: &CountryId, outcome: Outcome);
    fn lookup(&self, id: &CountryId) -> Option<Outcome>;
}

/// In-memory store; resets with the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessStateStore {
    outcomes: HashMap<CountryId, Outcome>,
}

impl GuessStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcomes sorted by country id.
    pub fn entries(&self) -> Vec<(&CountryId, Outcome)> {
        let mut out: Vec<_> = self.outcomes.iter().map(|(k, v)| (k, *v)).collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }
}

impl GuessStore for GuessStateStore {
    fn record_outcome(&mut self, id: &CountryId, outcome: Outcome) {
        self.outcomes.insert(id.clone(), outcome);
    }

    fn lookup(&self, id: &CountryId) -> Option<Outcome> {
        self.outcomes.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{GuessStateStore, GuessStore, Outcome};
    use crate::country::CountryId;

    #[test]
    fn repeated_identical_records_are_idempotent() {
        let mut store = GuessStateStore::new();
        let de = CountryId::from("Germany");
        store.record_outcome(&de, Outcome::Correct);
        let snapshot = store.clone();
        store.record_outcome(&de, Outcome::Correct);
        assert_eq!(store, snapshot);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn last_write_wins() {
        let mut store = GuessStateStore::new();
        let fr = CountryId::from("France");
        store.record_outcome(&fr, Outcome::Incorrect);
        store.record_outcome(&fr, Outcome::Correct);
        assert_eq!(store.lookup(&fr), Some(Outcome::Correct));
        store.record_outcome(&fr, Outcome::Incorrect);
        assert_eq!(store.lookup(&fr), Some(Outcome::Incorrect));
    }

    #[test]
    fn unknown_country_has_no_outcome() {
        let store = GuessStateStore::new();
        assert_eq!(store.lookup(&CountryId::from("Chad")), None);
        assert!(store.is_empty());
    }

    #[test]
    fn entries_are_sorted() {
        let mut store = GuessStateStore::new();
        store.record_outcome(&CountryId::from("Peru"), Outcome::Correct);
        store.record_outcome(&CountryId::from("Chile"), Outcome::Incorrect);
        let names: Vec<&str> = store.entries().iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(names, vec!["Chile", "Peru"]);
    }
}
