use foundation::math::{LatLng, normalize_lng_deg};
use serde::{Deserialize, Serialize};

use crate::country::{Country, CountryGeometry};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Maximum degree-space distance to a bounding-box center accepted by
    /// the fallback when no polygon contains the point.
    pub fallback_tolerance_deg: f64,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            fallback_tolerance_deg: 5.0,
        }
    }
}

/// Maps a latitude/longitude to the country under it.
///
/// Ordering contract:
/// - The first country in dataset order whose polygon contains the point wins.
/// - Otherwise the country with the nearest bounding-box center strictly
///   within tolerance wins; ties keep the earlier country.
///
/// Distances are planar in degree space. This is an approximation meant for
/// picking, not for geodesy.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct CountryResolver {
    pub opts: ResolveOptions,
}

impl CountryResolver {
    pub fn new(opts: ResolveOptions) -> Self {
        Self { opts }
    }

    pub fn resolve<'a>(&self, countries: &'a [Country], at: LatLng) -> Option<&'a Country> {
        countries
            .iter()
            .find(|c| country_contains(c, at))
            .or_else(|| nearest_center_within(countries, at, self.opts.fallback_tolerance_deg))
    }
}

/// Point-in-country test against the exterior ring of every polygon.
pub fn country_contains(country: &Country, at: LatLng) -> bool {
    match &country.geometry {
        CountryGeometry::Polygon(rings) => rings.first().is_some_and(|r| ring_contains(r, at)),
        CountryGeometry::MultiPolygon(polys) => polys
            .iter()
            .any(|rings| rings.first().is_some_and(|r| ring_contains(r, at))),
    }
}

/// Even-odd ray casting against a `[lng, lat]` ring.
///
/// Edge longitudes are wrapped into `[-180, 180)`. When the two ends of an
/// edge are more than 180° apart, the end with positive longitude is shifted
/// by -360° so the edge takes the short way across the antimeridian.
pub fn ring_contains(ring: &[[f64; 2]], at: LatLng) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let lat = at.lat_deg;
    let lng = normalize_lng_deg(at.lng_deg);
    let mut inside = false;

    let mut j = n - 1;
    for i in 0..n {
        let mut xi = normalize_lng_deg(ring[i][0]);
        let yi = ring[i][1];
        let mut xj = normalize_lng_deg(ring[j][0]);
        let yj = ring[j][1];

        if (xi - xj).abs() > 180.0 {
            if xi > 0.0 {
                xi -= 360.0;
            } else if xj > 0.0 {
                xj -= 360.0;
            }
        }

        if (yi > lat) != (yj > lat) && lng < (xj - xi) * (lat - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

fn nearest_center_within(countries: &[Country], at: LatLng, tolerance_deg: f64) -> Option<&Country> {
    let mut best: Option<(f64, &Country)> = None;
    for country in countries {
        let Some(bbox) = country.bbox() else {
            continue;
        };
        let d = bbox.center_distance_deg(at);
        if d >= tolerance_deg {
            continue;
        }
        if best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, country));
        }
    }
    best.map(|(_, c)| c)
}

#[cfg(test)]
mod tests {
    use super::{CountryResolver, ResolveOptions, ring_contains};
    use crate::country::{Country, CountryGeometry, CountryProperties};
    use foundation::bounds::GeoBounds;
    use foundation::math::LatLng;

    fn rect(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Vec<[f64; 2]> {
        vec![
            [min_lng, min_lat],
            [max_lng, min_lat],
            [max_lng, max_lat],
            [min_lng, max_lat],
            [min_lng, min_lat],
        ]
    }

    fn country(name: &str, geometry: CountryGeometry, bbox: Option<GeoBounds>) -> Country {
        Country::new(
            CountryProperties {
                name: Some(name.to_string()),
                ..Default::default()
            },
            geometry,
            bbox,
        )
        .expect("named")
    }

    fn europe() -> Vec<Country> {
        vec![
            country(
                "France",
                CountryGeometry::Polygon(vec![rect(-4.0, 43.0, 5.0, 50.0)]),
                None,
            ),
            country(
                "Germany",
                CountryGeometry::Polygon(vec![rect(6.0, 47.0, 15.0, 55.0)]),
                None,
            ),
        ]
    }

    #[test]
    fn inside_simple_polygon_resolves() {
        let all = europe();
        let r = CountryResolver::default();
        for (lat, lng) in [(51.0, 10.0), (47.5, 6.5), (54.9, 14.9)] {
            let hit = r.resolve(&all, LatLng::new(lat, lng)).map(|c| c.name());
            assert_eq!(hit, Some("Germany"), "({lat}, {lng})");
        }
        let hit = r.resolve(&all, LatLng::new(46.0, 2.0)).map(|c| c.name());
        assert_eq!(hit, Some("France"));
    }

    #[test]
    fn far_from_everything_is_no_match() {
        let all = europe();
        let r = CountryResolver::default();
        assert!(r.resolve(&all, LatLng::new(-30.0, -40.0)).is_none());
        assert!(r.resolve(&all, LatLng::new(0.0, 10.0)).is_none());
    }

    #[test]
    fn near_miss_falls_back_to_closest_center() {
        let all = europe();
        let r = CountryResolver::default();
        // Germany's box center is (51, 10.5); this point is outside every
        // polygon and about 4.53 degrees from that center.
        let hit = r.resolve(&all, LatLng::new(55.5, 11.0)).map(|c| c.name());
        assert_eq!(hit, Some("Germany"));

        let strict = CountryResolver::new(ResolveOptions {
            fallback_tolerance_deg: 4.0,
        });
        assert!(strict.resolve(&all, LatLng::new(55.5, 11.0)).is_none());
    }

    #[test]
    fn multipolygon_matches_any_part() {
        let all = vec![country(
            "Archipelago",
            CountryGeometry::MultiPolygon(vec![
                vec![rect(100.0, -10.0, 102.0, -8.0)],
                vec![rect(120.0, 5.0, 125.0, 9.0)],
            ]),
            None,
        )];
        let r = CountryResolver::new(ResolveOptions {
            fallback_tolerance_deg: 0.0,
        });
        assert!(r.resolve(&all, LatLng::new(-9.0, 101.0)).is_some());
        assert!(r.resolve(&all, LatLng::new(7.0, 122.0)).is_some());
        assert!(r.resolve(&all, LatLng::new(0.0, 110.0)).is_none());
    }

    #[test]
    fn holes_are_ignored() {
        let ring = rect(0.0, 0.0, 10.0, 10.0);
        let hole = rect(4.0, 4.0, 6.0, 6.0);
        let all = vec![country(
            "Donut",
            CountryGeometry::Polygon(vec![ring, hole]),
            None,
        )];
        let r = CountryResolver::new(ResolveOptions {
            fallback_tolerance_deg: 0.0,
        });
        assert!(r.resolve(&all, LatLng::new(5.0, 5.0)).is_some());
    }

    #[test]
    fn first_match_in_dataset_order_wins() {
        let all = vec![
            country("A", CountryGeometry::Polygon(vec![rect(0.0, 0.0, 10.0, 10.0)]), None),
            country("B", CountryGeometry::Polygon(vec![rect(0.0, 0.0, 10.0, 10.0)]), None),
        ];
        let hit = CountryResolver::default().resolve(&all, LatLng::new(5.0, 5.0));
        assert_eq!(hit.map(|c| c.name()), Some("A"));
    }

    #[test]
    fn ring_crossing_antimeridian_stays_short() {
        // Diamond straddling the antimeridian. Without the edge shift the
        // 175 -> 180 edges would span the whole globe.
        let ring = vec![
            [175.0, 10.0],
            [180.0, 15.0],
            [-175.0, 10.0],
            [180.0, 5.0],
            [175.0, 10.0],
        ];
        assert!(ring_contains(&ring, LatLng::new(10.0, -178.0)));
        assert!(ring_contains(&ring, LatLng::new(12.0, -179.0)));
        assert!(!ring_contains(&ring, LatLng::new(10.0, 0.0)));
        assert!(!ring_contains(&ring, LatLng::new(12.0, 90.0)));
        assert!(!ring_contains(&ring, LatLng::new(10.0, -90.0)));
    }

    #[test]
    fn degenerate_ring_contains_nothing() {
        assert!(!ring_contains(&[[0.0, 0.0], [1.0, 1.0]], LatLng::new(0.5, 0.5)));
        assert!(!ring_contains(&[], LatLng::new(0.0, 0.0)));
    }

    #[test]
    fn country_without_bbox_is_skipped_by_fallback() {
        let all = vec![country("Empty", CountryGeometry::Polygon(vec![]), None)];
        assert!(
            CountryResolver::default()
                .resolve(&all, LatLng::new(0.0, 0.0))
                .is_none()
        );
    }
}
