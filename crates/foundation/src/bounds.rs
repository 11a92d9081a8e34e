use crate::math::LatLng;

/// Axis-aligned longitude/latitude box in degrees.
///
/// Stored in GeoJSON `bbox` order: `[min_lng, min_lat, max_lng, max_lat]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoBounds {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl GeoBounds {
    pub fn new(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Self {
        GeoBounds {
            min_lng,
            min_lat,
            max_lng,
            max_lat,
        }
    }

    pub fn from_bbox(bbox: [f64; 4]) -> Self {
        Self::new(bbox[0], bbox[1], bbox[2], bbox[3])
    }

    /// Smallest box covering every `(lng, lat)` pair, or `None` when empty.
    pub fn from_lng_lat_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut out: Option<Self> = None;
        for (lng, lat) in points {
            out = Some(match out {
                None => Self::new(lng, lat, lng, lat),
                Some(b) => Self::new(
                    b.min_lng.min(lng),
                    b.min_lat.min(lat),
                    b.max_lng.max(lng),
                    b.max_lat.max(lat),
                ),
            });
        }
        out
    }

    /// Average of the min and max corners.
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Planar distance in degree space from `at` to [`Self::center`].
    pub fn center_distance_deg(&self, at: LatLng) -> f64 {
        let c = self.center();
        let d_lat = at.lat_deg - c.lat_deg;
        let d_lng = at.lng_deg - c.lng_deg;
        (d_lat * d_lat + d_lng * d_lng).sqrt()
    }
}
