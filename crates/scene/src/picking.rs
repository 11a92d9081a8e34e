use foundation::math::{Euler, Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.dir.scale(t)
    }
}

/// Canvas size in pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Pixel position (origin top-left) to normalized device coordinates in
    /// `[-1, 1]`, +Y up.
    pub fn ndc(&self, pos_px: Vec2) -> Vec2 {
        Vec2::new(
            (pos_px.x / self.width) * 2.0 - 1.0,
            -(pos_px.y / self.height) * 2.0 + 1.0,
        )
    }
}

/// Orientation of the globe and distance of the camera on +Z.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlobeView {
    pub rotation: Euler,
    pub camera_distance: f64,
}

/// Result of the intersection primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeHit {
    /// World-space intersection points, nearest first.
    pub points: Vec<Vec3>,
    /// Maps world space back to the globe's untransformed frame.
    pub inverse_world: Mat4,
}

impl GlobeHit {
    /// Nearest hit expressed in the globe's local frame.
    pub fn nearest_local(&self) -> Option<Vec3> {
        self.points
            .first()
            .map(|p| self.inverse_world.transform_point(*p))
    }
}

/// Ray/sphere intersection distances (`t >= 0`), nearest first.
///
/// `ray.dir` must be normalized.
pub fn ray_sphere(ray: Ray, center: Vec3, radius: f64) -> Vec<f64> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return Vec::new();
    }
    let s = disc.sqrt();
    let mut out: Vec<f64> = [-b - s, -b + s].into_iter().filter(|t| *t >= 0.0).collect();
    out.dedup();
    out
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Sphere radius in scene units.
    pub radius: f64,
    /// Vertical field of view of the perspective camera (degrees).
    pub fov_y_deg: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            fov_y_deg: 75.0,
        }
    }
}

/// Intersection primitive for a sphere at the origin seen by a perspective
/// camera on +Z looking at the origin with +Y up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SphereRaycaster {
    pub globe: GlobeConfig,
}

impl SphereRaycaster {
    pub fn new(globe: GlobeConfig) -> Self {
        Self { globe }
    }

    pub fn world_transform(&self, view: &GlobeView) -> Mat4 {
        Mat4::from_euler(view.rotation)
    }

    pub fn ray_from_ndc(&self, ndc: Vec2, aspect: f64, view: &GlobeView) -> Option<Ray> {
        let tan = (0.5 * self.globe.fov_y_deg.to_radians()).tan();
        let dir = Vec3::new(ndc.x * tan * aspect, ndc.y * tan, -1.0).normalized()?;
        Some(Ray::new(Vec3::new(0.0, 0.0, view.camera_distance), dir))
    }

    pub fn intersect(&self, ndc: Vec2, aspect: f64, view: &GlobeView) -> Option<GlobeHit> {
        let ray = self.ray_from_ndc(ndc, aspect, view)?;
        let ts = ray_sphere(ray, Vec3::ZERO, self.globe.radius);
        if ts.is_empty() {
            return None;
        }
        let inverse_world = self.world_transform(view).inverse_affine()?;
        Some(GlobeHit {
            points: ts.into_iter().map(|t| ray.at(t)).collect(),
            inverse_world,
        })
    }
}
