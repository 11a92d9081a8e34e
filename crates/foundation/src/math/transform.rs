//! Affine transforms for the globe's local frame.
//!
//! Matrices are column-major (`m[col][row]`), matching the renderer side.

use serde::{Deserialize, Serialize};

use super::Vec3;

/// Intrinsic Euler rotation in radians, applied in X, Y, Z order.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Euler {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Euler {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component-wise `self + (to - self) * t`.
    pub fn lerp(self, to: Self, t: f64) -> Self {
        Self::new(
            self.x + (to.x - self.x) * t,
            self.y + (to.y - self.y) * t,
            self.z + (to.z - self.z) * t,
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub m: [[f64; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn translation(t: Vec3) -> Self {
        let mut out = Self::IDENTITY;
        out.m[3] = [t.x, t.y, t.z, 1.0];
        out
    }

    /// Rotation matrix equal to `Rx * Ry * Rz`.
    pub fn from_euler(r: Euler) -> Self {
        let (a, b) = (r.x.cos(), r.x.sin());
        let (c, d) = (r.y.cos(), r.y.sin());
        let (e, f) = (r.z.cos(), r.z.sin());

        let ae = a * e;
        let af = a * f;
        let be = b * e;
        let bf = b * f;

        Self {
            m: [
                [c * e, af + be * d, bf - ae * d, 0.0],
                [-c * f, ae - bf * d, be + af * d, 0.0],
                [d, -b * c, a * c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation followed by translation: `T * R`.
    pub fn from_rotation_translation(r: Euler, t: Vec3) -> Self {
        let mut out = Self::from_euler(r);
        out.m[3] = [t.x, t.y, t.z, 1.0];
        out
    }

    pub fn mul(&self, other: &Self) -> Self {
        let a = &self.m;
        let b = &other.m;
        let mut c = [[0.0f64; 4]; 4];
        for col in 0..4 {
            for row in 0..4 {
                c[col][row] = a[0][row] * b[col][0]
                    + a[1][row] * b[col][1]
                    + a[2][row] * b[col][2]
                    + a[3][row] * b[col][3];
            }
        }
        Self { m: c }
    }

    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
            m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
            m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
        )
    }

    /// Inverse of an affine matrix (bottom row `0 0 0 1`).
    ///
    /// Returns `None` when the linear part is singular.
    pub fn inverse_affine(&self) -> Option<Self> {
        let m = &self.m;
        // Row-major view of the 3x3 linear part.
        let r = [
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ];

        let c00 = r[1][1] * r[2][2] - r[1][2] * r[2][1];
        let c01 = r[1][2] * r[2][0] - r[1][0] * r[2][2];
        let c02 = r[1][0] * r[2][1] - r[1][1] * r[2][0];
        let det = r[0][0] * c00 + r[0][1] * c01 + r[0][2] * c02;
        if det.abs() < 1e-12 {
            return None;
        }
        let inv_det = 1.0 / det;

        let inv = [
            [
                c00 * inv_det,
                (r[0][2] * r[2][1] - r[0][1] * r[2][2]) * inv_det,
                (r[0][1] * r[1][2] - r[0][2] * r[1][1]) * inv_det,
            ],
            [
                c01 * inv_det,
                (r[0][0] * r[2][2] - r[0][2] * r[2][0]) * inv_det,
                (r[0][2] * r[1][0] - r[0][0] * r[1][2]) * inv_det,
            ],
            [
                c02 * inv_det,
                (r[0][1] * r[2][0] - r[0][0] * r[2][1]) * inv_det,
                (r[0][0] * r[1][1] - r[0][1] * r[1][0]) * inv_det,
            ],
        ];

        let t = [m[3][0], m[3][1], m[3][2]];
        let it = [
            -(inv[0][0] * t[0] + inv[0][1] * t[1] + inv[0][2] * t[2]),
            -(inv[1][0] * t[0] + inv[1][1] * t[1] + inv[1][2] * t[2]),
            -(inv[2][0] * t[0] + inv[2][1] * t[1] + inv[2][2] * t[2]),
        ];

        Some(Self {
            m: [
                [inv[0][0], inv[1][0], inv[2][0], 0.0],
                [inv[0][1], inv[1][1], inv[2][1], 0.0],
                [inv[0][2], inv[1][2], inv[2][2], 0.0],
                [it[0], it[1], it[2], 1.0],
            ],
        })
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}
