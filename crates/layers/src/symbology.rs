use std::fmt;

use scene::selection::CountryColor;
use serde::{Deserialize, Serialize};

/// 8-bit RGB with a float alpha, the shape CSS `rgba()` takes.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Linear `[0, 1]` components for GPU-side consumers.
    pub fn to_linear_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a,
        ]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub neutral: Rgba,
    pub highlight: Rgba,
    pub correct: Rgba,
    pub incorrect: Rgba,
}

impl Palette {
    pub const fn new(neutral: Rgba, highlight: Rgba, correct: Rgba, incorrect: Rgba) -> Self {
        Self {
            neutral,
            highlight,
            correct,
            incorrect,
        }
    }

    pub fn color(&self, role: CountryColor) -> Rgba {
        match role {
            CountryColor::Neutral => self.neutral,
            CountryColor::Highlight => self.highlight,
            CountryColor::Correct => self.correct,
            CountryColor::Incorrect => self.incorrect,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(
            Rgba::new(255, 255, 255, 0.15),
            Rgba::new(255, 235, 59, 0.6),
            Rgba::new(76, 175, 80, 0.6),
            Rgba::new(244, 67, 54, 0.6),
        )
    }
}
