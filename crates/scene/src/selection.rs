use tracing::debug;

use crate::country::{Country, CountryId};
use crate::guesses::{GuessStateStore, GuessStore, Outcome};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum GuessPhase {
    #[default]
    None,
    Waiting,
    Correct,
    Incorrect,
}

/// Color role of a country; the palette turns it into RGBA.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CountryColor {
    Neutral,
    Highlight,
    Correct,
    Incorrect,
}

impl From<Outcome> for CountryColor {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Correct => CountryColor::Correct,
            Outcome::Incorrect => CountryColor::Incorrect,
        }
    }
}

/// Styling class of a feedback message.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FeedbackClass {
    Waiting,
    Correct,
    Incorrect,
}

impl FeedbackClass {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackClass::Waiting => "waiting",
            FeedbackClass::Correct => "correct",
            FeedbackClass::Incorrect => "incorrect",
        }
    }
}

/// User-facing result of a selection or guess.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Fresh selection with no prior outcome.
    Selected,
    PreviouslyCorrect,
    PreviouslyIncorrect,
    Correct,
    Incorrect,
    /// Empty guess; clears the message.
    Cleared,
    SelectCountryFirst,
}

impl Feedback {
    pub fn message(self) -> &'static str {
        match self {
            Feedback::Selected => "Selected! Guess the country name.",
            Feedback::PreviouslyCorrect => "Previously correct! Try again.",
            Feedback::PreviouslyIncorrect => "Previously incorrect! Try again.",
            Feedback::Correct => "✓ Correct!",
            Feedback::Incorrect => "✗ Try again",
            Feedback::Cleared => "",
            Feedback::SelectCountryFirst => "Click a country first",
        }
    }

    pub fn class(self) -> FeedbackClass {
        match self {
            Feedback::PreviouslyCorrect | Feedback::Correct => FeedbackClass::Correct,
            Feedback::PreviouslyIncorrect | Feedback::Incorrect => FeedbackClass::Incorrect,
            Feedback::Selected | Feedback::Cleared | Feedback::SelectCountryFirst => {
                FeedbackClass::Waiting
            }
        }
    }
}

/// Current selection plus guess phase, backed by a persistent [`GuessStore`].
///
/// Invariant: `phase` is `None` exactly when nothing is selected.
#[derive(Debug, Clone, Default)]
pub struct SelectionController<S = GuessStateStore> {
    selected: Option<CountryId>,
    phase: GuessPhase,
    store: S,
}

impl SelectionController<GuessStateStore> {
    pub fn new() -> Self {
        Self::with_store(GuessStateStore::new())
    }
}

impl<S: GuessStore> SelectionController<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            selected: None,
            phase: GuessPhase::None,
            store,
        }
    }

    pub fn selected(&self) -> Option<&CountryId> {
        self.selected.as_ref()
    }

    pub fn phase(&self) -> GuessPhase {
        self.phase
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Opens `country` for guessing. The returned feedback reflects any
    /// outcome recorded earlier for it.
    pub fn select(&mut self, country: &Country) -> Feedback {
        self.selected = Some(country.id().clone());
        self.phase = GuessPhase::Waiting;

        match self.store.lookup(country.id()) {
            Some(Outcome::Correct) => Feedback::PreviouslyCorrect,
            Some(Outcome::Incorrect) => Feedback::PreviouslyIncorrect,
            None => Feedback::Selected,
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
        self.phase = GuessPhase::None;
    }

    /// Compares `text` (trimmed, case-insensitive) with the selected name
    /// and records the outcome.
    pub fn evaluate_guess(&mut self, text: &str) -> Feedback {
        let Some(id) = self.selected.clone() else {
            return Feedback::SelectCountryFirst;
        };

        let guess = text.trim().to_lowercase();
        if guess.is_empty() {
            return Feedback::Cleared;
        }

        let is_correct = guess == id.as_str().to_lowercase();
        let outcome = Outcome::from_correct(is_correct);
        debug!(country = %id, guess = %guess, ?outcome, "guess evaluated");
        self.store.record_outcome(&id, outcome);

        if is_correct {
            self.phase = GuessPhase::Correct;
            Feedback::Correct
        } else {
            self.phase = GuessPhase::Incorrect;
            Feedback::Incorrect
        }
    }

    /// Color role of `country`. A recorded outcome wins over the selection.
    pub fn color_for(&self, country: &Country) -> CountryColor {
        if let Some(outcome) = self.store.lookup(country.id()) {
            return outcome.into();
        }

        if self.selected.as_ref() == Some(country.id()) {
            return match self.phase {
                GuessPhase::Correct => CountryColor::Correct,
                GuessPhase::Incorrect => CountryColor::Incorrect,
                GuessPhase::Waiting | GuessPhase::None => CountryColor::Highlight,
            };
        }

        CountryColor::Neutral
    }
}
