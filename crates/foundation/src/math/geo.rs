//! Conversions between the globe's local frame and latitude/longitude.
//!
//! Local frame convention: +Y is the north pole, the prime meridian on the
//! equator lies on +Z and 90°E lies on +X.

use super::Vec3;

/// Geographic coordinates in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLng {
    pub lat_deg: f64,
    pub lng_deg: f64,
}

impl LatLng {
    pub fn new(lat_deg: f64, lng_deg: f64) -> Self {
        Self { lat_deg, lng_deg }
    }
}

/// Wraps a longitude into `[-180, 180)`.
///
/// Values already in range are returned untouched, so the function is
/// idempotent bit-for-bit.
pub fn normalize_lng_deg(lng_deg: f64) -> f64 {
    if (-180.0..180.0).contains(&lng_deg) {
        return lng_deg;
    }
    let wrapped = (lng_deg + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid may round up to exactly 360 for tiny negative inputs.
    if wrapped >= 180.0 { -180.0 } else { wrapped }
}

/// Projects a point on (or near) the globe surface, expressed in the globe's
/// untransformed frame, to latitude/longitude.
///
/// Latitude is `90° - polar angle`, longitude the azimuth around +Y measured
/// from +Z. The radius of the point does not matter.
pub fn lat_lng_from_local(p: Vec3) -> LatLng {
    let radius = p.length();
    let (theta, phi) = if radius == 0.0 {
        (0.0, 0.0)
    } else {
        (p.x.atan2(p.z), (p.y / radius).clamp(-1.0, 1.0).acos())
    };

    let lat = 90.0 - phi.to_degrees();
    let lng = normalize_lng_deg(theta.to_degrees());
    LatLng::new(lat, lng)
}

/// Inverse of [`lat_lng_from_local`] for a sphere of `radius`.
pub fn local_from_lat_lng(at: LatLng, radius: f64) -> Vec3 {
    let phi = (90.0 - at.lat_deg).to_radians();
    let theta = at.lng_deg.to_radians();
    Vec3::new(
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
        radius * phi.sin() * theta.cos(),
    )
}
