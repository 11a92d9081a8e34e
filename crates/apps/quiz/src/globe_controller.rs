//! Euler-angle globe controller with drag, inertia, idle auto-rotation and an
//! eased reset animation.
//!
//! Everything is frame-based: [`MotionController::step`] is called once per
//! rendered frame and all rates below are per frame, not per second.

use foundation::math::{Euler, Vec2};
use scene::picking::GlobeView;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Radians of rotation per pixel of pointer travel.
    pub drag_sensitivity: f64,
    /// A release keeps spinning only if either velocity axis exceeds this.
    pub momentum_threshold: f64,
    /// Per-frame multiplier applied to momentum.
    pub momentum_decay: f64,
    /// Momentum components below this snap to zero.
    pub momentum_epsilon: f64,
    /// Motionless frames required before auto-rotation kicks in.
    pub idle_frames: u32,
    /// Radians subtracted from the yaw per auto-rotating frame.
    pub auto_rotate_speed: f64,
    /// Reset progress added per frame.
    pub reset_step: f64,
    pub home_rotation: Euler,
    pub default_distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    /// Camera distance per unit of wheel delta.
    pub zoom_factor: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.005,
            momentum_threshold: 0.02,
            momentum_decay: 0.94,
            momentum_epsilon: 0.001,
            idle_frames: 180,
            auto_rotate_speed: 0.001,
            reset_step: 0.02,
            home_rotation: Euler::new(0.5, -0.3, 0.0),
            default_distance: 300.0,
            min_distance: 150.0,
            max_distance: 500.0,
            zoom_factor: 0.2,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MotionMode {
    /// Coasting on momentum, or idle.
    Inertial,
    Dragging,
    Resetting,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct ResetAnimation {
    progress: f64,
    start_rotation: Euler,
    start_distance: f64,
}

/// Owns the globe orientation and camera distance.
///
/// Invariants:
/// - at most one of dragging and resetting is active;
/// - `camera_distance` stays within `[min_distance, max_distance]` outside
///   of a reset, and a reset always ends exactly on `default_distance`.
#[derive(Debug, Clone)]
pub struct MotionController {
    cfg: MotionConfig,
    rotation: Euler,
    camera_distance: f64,
    /// Rotation rate while coasting: `x` drives yaw, `y` drives pitch.
    momentum: Vec2,
    /// Last drag step, promoted to momentum on release.
    drag_velocity: Vec2,
    cooldown_frames: u32,
    dragging: bool,
    reset: Option<ResetAnimation>,
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

impl MotionController {
    pub fn new(cfg: MotionConfig) -> Self {
        Self {
            cfg,
            rotation: Euler::default(),
            camera_distance: cfg.default_distance,
            momentum: Vec2::ZERO,
            drag_velocity: Vec2::ZERO,
            cooldown_frames: 0,
            dragging: false,
            reset: None,
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.cfg
    }

    pub fn mode(&self) -> MotionMode {
        if self.reset.is_some() {
            MotionMode::Resetting
        } else if self.dragging {
            MotionMode::Dragging
        } else {
            MotionMode::Inertial
        }
    }

    pub fn rotation(&self) -> Euler {
        self.rotation
    }

    /// Jump to an orientation, dropping any motion in flight.
    pub fn set_rotation(&mut self, rotation: Euler) {
        self.rotation = rotation;
        self.momentum = Vec2::ZERO;
        self.cooldown_frames = 0;
        self.reset = None;
    }

    pub fn camera_distance(&self) -> f64 {
        self.camera_distance
    }

    pub fn momentum(&self) -> Vec2 {
        self.momentum
    }

    pub fn cooldown_frames(&self) -> u32 {
        self.cooldown_frames
    }

    pub fn view(&self) -> GlobeView {
        GlobeView {
            rotation: self.rotation,
            camera_distance: self.camera_distance,
        }
    }

    /// Starts a drag. Refused while a reset is animating.
    pub fn begin_drag(&mut self) -> bool {
        if self.reset.is_some() {
            return false;
        }
        self.dragging = true;
        self.momentum = Vec2::ZERO;
        self.drag_velocity = Vec2::ZERO;
        self.cooldown_frames = 0;
        true
    }

    /// Applies a pointer delta (pixels) to the rotation immediately.
    pub fn drag_by(&mut self, delta_px: Vec2) {
        if !self.dragging {
            return;
        }
        let v = delta_px.scale(self.cfg.drag_sensitivity);
        self.rotation.y += v.x;
        self.rotation.x += v.y;
        self.drag_velocity = v;
    }

    /// Ends a drag, converting the last drag step into momentum when it is
    /// fast enough. Returns whether the globe keeps coasting.
    pub fn end_drag(&mut self) -> bool {
        if !self.dragging {
            return false;
        }
        self.dragging = false;

        let v = self.drag_velocity;
        let threshold = self.cfg.momentum_threshold;
        self.momentum = if v.x.abs() > threshold || v.y.abs() > threshold {
            v
        } else {
            Vec2::ZERO
        };
        self.drag_velocity = Vec2::ZERO;
        !self.momentum.is_zero()
    }

    pub fn zoom(&mut self, delta_y: f64) {
        self.camera_distance = (self.camera_distance + delta_y * self.cfg.zoom_factor)
            .clamp(self.cfg.min_distance, self.cfg.max_distance);
    }

    /// Starts animating back to the home orientation. Ignored when a reset
    /// is already running.
    pub fn start_reset(&mut self) -> bool {
        if self.reset.is_some() {
            return false;
        }
        debug!(from = ?self.rotation, "reset started");
        self.reset = Some(ResetAnimation {
            progress: 0.0,
            start_rotation: self.rotation,
            start_distance: self.camera_distance,
        });
        self.dragging = false;
        self.drag_velocity = Vec2::ZERO;
        self.momentum = Vec2::ZERO;
        self.cooldown_frames = 0;
        true
    }

    /// Advances one frame.
    pub fn step(&mut self) {
        if let Some(anim) = self.reset.as_mut() {
            anim.progress += self.cfg.reset_step;
            if anim.progress >= 1.0 {
                self.rotation = self.cfg.home_rotation;
                self.camera_distance = self.cfg.default_distance;
                self.reset = None;
                debug!("reset finished");
            } else {
                let t = ease_out_cubic(anim.progress);
                self.rotation = anim.start_rotation.lerp(self.cfg.home_rotation, t);
                self.camera_distance =
                    anim.start_distance + (self.cfg.default_distance - anim.start_distance) * t;
            }
            return;
        }

        if self.dragging {
            self.cooldown_frames = 0;
            return;
        }

        self.rotation.y += self.momentum.x;
        self.rotation.x += self.momentum.y;

        let decay = self.cfg.momentum_decay;
        let eps = self.cfg.momentum_epsilon;
        self.momentum = self.momentum.scale(decay);
        if self.momentum.x.abs() < eps {
            self.momentum.x = 0.0;
        }
        if self.momentum.y.abs() < eps {
            self.momentum.y = 0.0;
        }

        if self.momentum.is_zero() {
            self.cooldown_frames = self.cooldown_frames.saturating_add(1);
            if self.cooldown_frames > self.cfg.idle_frames {
                self.rotation.y -= self.cfg.auto_rotate_speed;
            }
        } else {
            self.cooldown_frames = 0;
        }
    }
}

/// `1 - (1 - t)^3`: fast start, gentle landing.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::{MotionConfig, MotionController, MotionMode, ease_out_cubic};
    use foundation::math::{Euler, Vec2};

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "{a} != {b} (eps={eps})");
    }

    #[test]
    fn drag_rotates_immediately() {
        let mut m = MotionController::default();
        assert!(m.begin_drag());
        m.drag_by(Vec2::new(10.0, -4.0));
        assert_eq!(m.mode(), MotionMode::Dragging);
        assert_close(m.rotation().y, 0.05, 1e-12);
        assert_close(m.rotation().x, -0.02, 1e-12);
    }

    #[test]
    fn slow_release_stops_dead() {
        let mut m = MotionController::default();
        m.begin_drag();
        m.drag_by(Vec2::new(3.0, 2.0));
        assert!(!m.end_drag());
        let before = m.rotation();
        m.step();
        assert_eq!(m.momentum(), Vec2::ZERO);
        assert_eq!(m.rotation(), before);
    }

    #[test]
    fn fast_release_coasts_then_settles() {
        let mut m = MotionController::default();
        m.begin_drag();
        m.drag_by(Vec2::new(20.0, 0.0));
        assert!(m.end_drag());
        assert_close(m.momentum().x, 0.1, 1e-12);

        let mut last = m.momentum().x;
        let mut frames = 0;
        while !m.momentum().is_zero() {
            m.step();
            frames += 1;
            assert!(m.momentum().x < last);
            last = m.momentum().x;
            assert!(frames < 100, "momentum never settled");
        }
        assert_eq!(m.cooldown_frames(), 1);
    }

    #[test]
    fn auto_rotates_only_after_idle_period() {
        let mut m = MotionController::default();
        for _ in 0..180 {
            m.step();
        }
        assert_eq!(m.rotation().y, 0.0);
        m.step();
        assert_close(m.rotation().y, -0.001, 1e-15);
    }

    #[test]
    fn dragging_holds_cooldown_at_zero() {
        let mut m = MotionController::default();
        for _ in 0..100 {
            m.step();
        }
        m.begin_drag();
        m.step();
        assert_eq!(m.cooldown_frames(), 0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut m = MotionController::default();
        m.zoom(100.0);
        assert_close(m.camera_distance(), 320.0, 1e-12);
        m.zoom(10_000.0);
        assert_eq!(m.camera_distance(), 500.0);
        m.zoom(-10_000.0);
        assert_eq!(m.camera_distance(), 150.0);
    }

    #[test]
    fn reset_eases_and_lands_exactly_on_home() {
        let cfg = MotionConfig::default();
        let mut m = MotionController::new(cfg);
        m.set_rotation(Euler::new(-1.2, 4.0, 0.3));
        m.zoom(-1000.0);
        assert!(m.start_reset());
        assert!(!m.start_reset());
        assert!(!m.begin_drag());

        m.step();
        let t = ease_out_cubic(0.02);
        assert_close(m.rotation().x, -1.2 + (0.5 + 1.2) * t, 1e-12);
        assert_close(m.camera_distance(), 150.0 + 150.0 * t, 1e-9);

        for _ in 0..100 {
            if m.mode() != MotionMode::Resetting {
                break;
            }
            m.step();
        }
        assert_eq!(m.mode(), MotionMode::Inertial);
        assert_eq!(m.rotation(), cfg.home_rotation);
        assert_eq!(m.camera_distance(), cfg.default_distance);
    }

    #[test]
    fn reset_cancels_momentum() {
        let mut m = MotionController::default();
        m.begin_drag();
        m.drag_by(Vec2::new(50.0, 50.0));
        m.end_drag();
        m.start_reset();
        assert_eq!(m.momentum(), Vec2::ZERO);
        assert_eq!(m.cooldown_frames(), 0);
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }
}
