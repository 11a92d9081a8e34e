//! Scripted quiz sessions for the `play` command.
//!
//! One step per line, `#` starts a comment:
//!
//! ```text
//! face 51 10        # turn the globe so lat 51, lng 10 faces the camera
//! click 640 360     # press and release at a pixel
//! drag 30 -5        # press at the center and move by a pixel delta
//! wheel 120         # wheel delta over the center
//! guess germany     # type into the guess box (debounced)
//! submit germany    # press enter
//! reset             # double click
//! grid              # toggle the lat/lng grid
//! frames 60         # advance 60 frames
//! ```

use foundation::math::{Euler, Vec2};
use quiz::{ClickOutcome, GuessPanel, InteractionDispatcher};
use render::GlobeRenderer;
use runtime::Frame;
use scene::guesses::{GuessStateStore, Outcome};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Face { lat_deg: f64, lng_deg: f64 },
    Click(Vec2),
    Drag(Vec2),
    Wheel(f64),
    Guess(String),
    Submit(String),
    Reset,
    Grid,
    Frames(u32),
}

#[derive(Debug, Error, PartialEq)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

pub fn parse_script(source: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (i, raw) in source.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let err = |message: String| ScriptError {
            line: i + 1,
            message,
        };
        let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let step = match cmd {
            "face" => {
                let [lat_deg, lng_deg] = numbers::<2>(rest).map_err(err)?;
                Step::Face { lat_deg, lng_deg }
            }
            "click" => {
                let [x, y] = numbers::<2>(rest).map_err(err)?;
                Step::Click(Vec2::new(x, y))
            }
            "drag" => {
                let [dx, dy] = numbers::<2>(rest).map_err(err)?;
                Step::Drag(Vec2::new(dx, dy))
            }
            "wheel" => {
                let [dy] = numbers::<1>(rest).map_err(err)?;
                Step::Wheel(dy)
            }
            "guess" => Step::Guess(rest.to_string()),
            "submit" => Step::Submit(rest.to_string()),
            "reset" => Step::Reset,
            "grid" => Step::Grid,
            "frames" => {
                let n = rest
                    .parse::<u32>()
                    .map_err(|e| err(format!("bad frame count {rest:?}: {e}")))?;
                Step::Frames(n)
            }
            other => return Err(err(format!("unknown step {other:?}"))),
        };
        steps.push(step);
    }
    Ok(steps)
}

fn numbers<const N: usize>(args: &str) -> Result<[f64; N], String> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() != N {
        return Err(format!("expected {N} numbers, got {:?}", args));
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("bad number {part:?}: {e}"))?;
    }
    Ok(out)
}

/// Final state of a played session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayReport {
    pub frames: u64,
    pub selected: Option<String>,
    pub phase: String,
    pub feedback: Option<String>,
    pub outcomes: Vec<(String, String)>,
    pub rotation: Euler,
    pub camera_distance: f64,
    pub grid_visible: bool,
}

/// Drives a session at a fixed frame rate.
pub struct Player {
    frame: Frame,
}

impl Player {
    pub fn new(fps: f64) -> Self {
        Self {
            frame: Frame::first(fps),
        }
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn run<R: GlobeRenderer, P: GuessPanel>(
        &mut self,
        session: &mut InteractionDispatcher<R, P, GuessStateStore>,
        steps: &[Step],
    ) {
        let vp = session.renderer().viewport();
        let center = Vec2::new(vp.width * 0.5, vp.height * 0.5);

        for step in steps {
            match step {
                Step::Face { lat_deg, lng_deg } => {
                    session.motion_mut().set_rotation(Euler::new(
                        lat_deg.to_radians(),
                        -lng_deg.to_radians(),
                        0.0,
                    ));
                }
                Step::Click(pos) => {
                    session.pointer_down(*pos);
                    match session.pointer_up(*pos) {
                        Some(ClickOutcome::Selected { country, feedback }) => {
                            info!(%country, feedback = feedback.message(), "selected");
                        }
                        Some(outcome) => info!(?outcome, "click"),
                        None => {}
                    }
                }
                Step::Drag(delta) => {
                    session.pointer_down(center);
                    session.pointer_move(center + *delta);
                    session.pointer_up(center + *delta);
                }
                Step::Wheel(dy) => {
                    session.wheel(center, *dy);
                }
                Step::Guess(text) => session.guess_input(text, self.frame.time),
                Step::Submit(text) => {
                    let feedback = session.guess_submit(text);
                    info!(guess = %text, feedback = feedback.message(), "submitted");
                }
                Step::Reset => {
                    session.double_click();
                }
                Step::Grid => {
                    session.toggle_grid();
                }
                Step::Frames(n) => {
                    for _ in 0..*n {
                        self.frame = self.frame.next();
                        session.on_frame(self.frame.time);
                    }
                }
            }
        }
    }

    pub fn report<R: GlobeRenderer, P: GuessPanel>(
        &self,
        session: &InteractionDispatcher<R, P, GuessStateStore>,
        feedback: Option<String>,
    ) -> PlayReport {
        let selection = session.selection();
        PlayReport {
            frames: self.frame.index,
            selected: selection.selected().map(|id| id.to_string()),
            phase: format!("{:?}", selection.phase()),
            feedback,
            outcomes: selection
                .store()
                .entries()
                .into_iter()
                .map(|(id, outcome)| {
                    let label = match outcome {
                        Outcome::Correct => "correct",
                        Outcome::Incorrect => "incorrect",
                    };
                    (id.to_string(), label.to_string())
                })
                .collect(),
            rotation: session.motion().rotation(),
            camera_distance: session.motion().camera_distance(),
            grid_visible: session.grid_visible(),
        }
    }
}
