//! Routes raw input events to motion, selection and the collaborators.
//!
//! Ordering contract:
//! - A press that travels less than the click threshold before release is a
//!   click; anything longer is only a drag.
//! - Every state change that can alter a country's color recolors the whole
//!   dataset before the call returns.
//! - The debounced guess fires from [`InteractionDispatcher::on_frame`], so
//!   it is judged against whatever is selected at that moment.

use std::path::Path;

use foundation::Time;
use foundation::math::{Vec2, lat_lng_from_local};
use formats::DatasetError;
use layers::CountryColorLayer;
use render::GlobeRenderer;
use runtime::Debouncer;
use scene::guesses::{GuessStateStore, GuessStore};
use scene::resolve::CountryResolver;
use scene::selection::{Feedback, SelectionController};
use scene::{CountryCollection, CountryId};
use tracing::{debug, info};

use crate::config::QuizConfig;
use crate::globe_controller::MotionController;
use crate::presentation::GuessPanel;

/// What a completed click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No dataset loaded yet.
    NotReady,
    Selected { country: CountryId, feedback: Feedback },
    /// Missed the globe or hit no country; any selection was cleared.
    Missed,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Press {
    last_px: Vec2,
    travelled_px: f64,
}

pub struct InteractionDispatcher<R, P, S = GuessStateStore> {
    renderer: R,
    panel: P,
    countries: Option<CountryCollection>,
    resolver: CountryResolver,
    color_layer: CountryColorLayer,
    selection: SelectionController<S>,
    motion: MotionController,
    press: Option<Press>,
    click_threshold_px: f64,
    pointer_over_globe: bool,
    grid_visible: bool,
    guess_debounce: Debouncer,
    pending_guess: String,
}

impl<R: GlobeRenderer, P: GuessPanel> InteractionDispatcher<R, P, GuessStateStore> {
    pub fn new(config: &QuizConfig, renderer: R, panel: P) -> Self {
        Self::with_store(config, renderer, panel, GuessStateStore::new())
    }
}

impl<R: GlobeRenderer, P: GuessPanel, S: GuessStore> InteractionDispatcher<R, P, S> {
    pub fn with_store(config: &QuizConfig, renderer: R, panel: P, store: S) -> Self {
        Self {
            renderer,
            panel,
            countries: None,
            resolver: CountryResolver::new(config.resolve),
            color_layer: CountryColorLayer::new(config.palette),
            selection: SelectionController::with_store(store),
            motion: MotionController::new(config.motion),
            press: None,
            click_threshold_px: config.interaction.click_threshold_px,
            pointer_over_globe: false,
            grid_visible: false,
            guess_debounce: Debouncer::new(config.interaction.guess_debounce_s),
            pending_guess: String::new(),
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn selection(&self) -> &SelectionController<S> {
        &self.selection
    }

    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut MotionController {
        &mut self.motion
    }

    pub fn countries(&self) -> Option<&CountryCollection> {
        self.countries.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.countries.is_some()
    }

    pub fn pointer_over_globe(&self) -> bool {
        self.pointer_over_globe
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn guess_pending(&self) -> bool {
        self.guess_debounce.is_pending()
    }

    /// Loads the dataset from disk. On failure the session stays unready and
    /// the error is handed back for the caller to surface.
    pub fn load_countries(&mut self, path: impl AsRef<Path>) -> Result<usize, DatasetError> {
        let countries = formats::load_countries(path)?;
        let count = countries.len();
        self.set_countries(countries);
        Ok(count)
    }

    pub fn set_countries(&mut self, countries: CountryCollection) {
        info!(countries = countries.len(), "dataset ready");
        self.countries = Some(countries);
        self.recolor();
    }

    pub fn pointer_down(&mut self, pos_px: Vec2) {
        self.press = Some(Press {
            last_px: pos_px,
            travelled_px: 0.0,
        });
        if !self.motion.begin_drag() {
            debug!("drag refused during reset");
        }
    }

    pub fn pointer_move(&mut self, pos_px: Vec2) {
        self.pointer_over_globe = self.hits_globe(pos_px);

        let Some(press) = self.press.as_mut() else {
            return;
        };
        let delta = pos_px - press.last_px;
        press.travelled_px += delta.manhattan();
        press.last_px = pos_px;
        self.motion.drag_by(delta);
    }

    /// Returns the click result when the press qualified as a click.
    pub fn pointer_up(&mut self, pos_px: Vec2) -> Option<ClickOutcome> {
        let press = self.press.take();
        let outcome = match press {
            Some(press) if press.travelled_px < self.click_threshold_px => {
                Some(self.handle_click(pos_px))
            }
            _ => None,
        };
        self.motion.end_drag();
        outcome
    }

    /// Zooms only while the pointer is over the globe. Returns whether the
    /// wheel event was consumed.
    pub fn wheel(&mut self, pos_px: Vec2, delta_y: f64) -> bool {
        self.pointer_over_globe = self.hits_globe(pos_px);
        if !self.pointer_over_globe {
            return false;
        }
        self.motion.zoom(delta_y);
        true
    }

    pub fn double_click(&mut self) -> bool {
        self.motion.start_reset()
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.grid_visible = !self.grid_visible;
        debug!(visible = self.grid_visible, "grid toggled");
        self.renderer.set_grid_visible(self.grid_visible);
        self.grid_visible
    }

    /// A keystroke in the guess input. Judged once typing pauses.
    pub fn guess_input(&mut self, text: &str, now: Time) {
        self.pending_guess.clear();
        self.pending_guess.push_str(text);
        self.guess_debounce.schedule(now);
    }

    /// Explicit submit: judged immediately, superseding any pending input.
    pub fn guess_submit(&mut self, text: &str) -> Feedback {
        self.guess_debounce.cancel();
        self.pending_guess.clear();
        self.evaluate(text)
    }

    pub fn on_frame(&mut self, now: Time) {
        if self.guess_debounce.poll(now) {
            let text = std::mem::take(&mut self.pending_guess);
            self.evaluate(&text);
        }
        self.motion.step();
        self.renderer.render(&self.motion.view());
    }

    fn hits_globe(&self, pos_px: Vec2) -> bool {
        if self.countries.is_none() {
            return false;
        }
        let ndc = self.renderer.viewport().ndc(pos_px);
        self.renderer.intersect(ndc, &self.motion.view()).is_some()
    }

    fn handle_click(&mut self, pos_px: Vec2) -> ClickOutcome {
        let Some(countries) = self.countries.as_ref() else {
            debug!("click ignored, dataset not loaded");
            return ClickOutcome::NotReady;
        };

        let ndc = self.renderer.viewport().ndc(pos_px);
        let at = self
            .renderer
            .intersect(ndc, &self.motion.view())
            .and_then(|hit| hit.nearest_local())
            .map(lat_lng_from_local);
        let picked = at.and_then(|at| self.resolver.resolve(countries.as_slice(), at));
        debug!(?at, country = ?picked.map(|c| c.id()), "click");

        let outcome = match picked {
            Some(country) => {
                let feedback = self.selection.select(country);
                ClickOutcome::Selected {
                    country: country.id().clone(),
                    feedback,
                }
            }
            None => {
                self.selection.deselect();
                ClickOutcome::Missed
            }
        };

        match &outcome {
            ClickOutcome::Selected { feedback, .. } => {
                self.guess_debounce.cancel();
                self.pending_guess.clear();
                self.panel.clear_input();
                self.panel.set_feedback(feedback.message(), feedback.class());
                self.panel.show();
                self.panel.focus_input();
            }
            ClickOutcome::Missed | ClickOutcome::NotReady => self.panel.hide(),
        }
        self.recolor();
        outcome
    }

    fn evaluate(&mut self, text: &str) -> Feedback {
        let feedback = self.selection.evaluate_guess(text);
        self.panel.set_feedback(feedback.message(), feedback.class());
        if matches!(feedback, Feedback::Correct | Feedback::Incorrect) {
            self.recolor();
        }
        feedback
    }

    fn recolor(&mut self) {
        if let Some(countries) = self.countries.as_ref() {
            let snapshot = self.color_layer.extract(countries, &self.selection);
            self.renderer.apply_colors(&snapshot);
        }
    }
}
