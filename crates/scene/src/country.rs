//! Country model consumed by hit-testing and the quiz state.
//!
//! Countries are immutable once loaded and live for the whole session.

use std::fmt;

use foundation::bounds::GeoBounds;

/// Identity of a country: its display name (`NAME`, falling back to `ADMIN`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryId(String);

impl CountryId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CountryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Closed or open ring of `[lng, lat]` pairs in degrees.
pub type Ring = Vec<[f64; 2]>;

#[derive(Debug, Clone, PartialEq)]
pub enum CountryGeometry {
    /// Exterior ring first, then holes.
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl CountryGeometry {
    /// Exterior ring of every constituent polygon.
    pub fn exterior_rings(&self) -> Vec<&Ring> {
        match self {
            CountryGeometry::Polygon(rings) => rings.first().into_iter().collect(),
            CountryGeometry::MultiPolygon(polys) => {
                polys.iter().filter_map(|rings| rings.first()).collect()
            }
        }
    }

    pub fn polygon_count(&self) -> usize {
        match self {
            CountryGeometry::Polygon(_) => 1,
            CountryGeometry::MultiPolygon(polys) => polys.len(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryProperties {
    pub name: Option<String>,
    pub admin: Option<String>,
    pub continent: Option<String>,
    pub subregion: Option<String>,
    pub pop_est: Option<f64>,
}

impl CountryProperties {
    /// `NAME` unless missing or empty, then `ADMIN`.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.admin.as_deref().filter(|s| !s.is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    id: CountryId,
    pub properties: CountryProperties,
    pub geometry: CountryGeometry,
    bbox: Option<GeoBounds>,
}

impl Country {
    /// Builds a country, deriving the bounding box from the exterior rings
    /// when none is supplied.
    ///
    /// Returns `None` when the properties carry neither `NAME` nor `ADMIN`.
    pub fn new(
        properties: CountryProperties,
        geometry: CountryGeometry,
        bbox: Option<GeoBounds>,
    ) -> Option<Self> {
        let id = CountryId::new(properties.display_name()?);
        let bbox = bbox.or_else(|| {
            GeoBounds::from_lng_lat_points(
                geometry
                    .exterior_rings()
                    .into_iter()
                    .flat_map(|ring| ring.iter().map(|p| (p[0], p[1]))),
            )
        });
        Some(Self {
            id,
            properties,
            geometry,
            bbox,
        })
    }

    pub fn id(&self) -> &CountryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.id.as_str()
    }

    pub fn bbox(&self) -> Option<GeoBounds> {
        self.bbox
    }

    /// One-line summary, e.g. `Continent: Europe • Region: Western Europe • Population: 83,132,799`.
    pub fn details(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(c) = self.properties.continent.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("Continent: {c}"));
        }
        if let Some(r) = self.properties.subregion.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("Region: {r}"));
        }
        if let Some(pop) = self.properties.pop_est.filter(|p| *p > 0.0) {
            parts.push(format!("Population: {}", group_thousands(pop.trunc() as u64)));
        }
        parts.join(" • ")
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// The loaded country dataset, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryCollection {
    countries: Vec<Country>,
}

impl CountryCollection {
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn as_slice(&self) -> &[Country] {
        &self.countries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Country> {
        self.countries.iter()
    }

    pub fn get(&self, id: &CountryId) -> Option<&Country> {
        self.countries.iter().find(|c| c.id() == id)
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Country> {
        let needle = name.trim().to_lowercase();
        self.countries
            .iter()
            .find(|c| c.name().to_lowercase() == needle)
    }
}

impl<'a> IntoIterator for &'a CountryCollection {
    type Item = &'a Country;
    type IntoIter = std::slice::Iter<'a, Country>;

    fn into_iter(self) -> Self::IntoIter {
        self.countries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Country, CountryCollection, CountryGeometry, CountryProperties, group_thousands};
    use foundation::bounds::GeoBounds;
    use pretty_assertions::assert_eq;

    fn square(min_lng: f64, min_lat: f64, size: f64) -> Vec<[f64; 2]> {
        vec![
            [min_lng, min_lat],
            [min_lng + size, min_lat],
            [min_lng + size, min_lat + size],
            [min_lng, min_lat + size],
            [min_lng, min_lat],
        ]
    }

    #[test]
    fn name_falls_back_to_admin() {
        let props = CountryProperties {
            name: Some(String::new()),
            admin: Some("Kosovo".to_string()),
            ..Default::default()
        };
        let c = Country::new(props, CountryGeometry::Polygon(vec![square(20.0, 42.0, 1.0)]), None)
            .expect("has identity");
        assert_eq!(c.name(), "Kosovo");

        let anonymous = Country::new(
            CountryProperties::default(),
            CountryGeometry::Polygon(vec![square(0.0, 0.0, 1.0)]),
            None,
        );
        assert!(anonymous.is_none());
    }

    #[test]
    fn bbox_is_derived_from_exterior_rings() {
        let props = CountryProperties {
            name: Some("Twin".to_string()),
            ..Default::default()
        };
        let geom = CountryGeometry::MultiPolygon(vec![
            vec![square(0.0, 0.0, 2.0)],
            vec![square(10.0, -5.0, 1.0)],
        ]);
        let c = Country::new(props, geom, None).expect("country");
        assert_eq!(c.bbox(), Some(GeoBounds::new(0.0, -5.0, 11.0, 2.0)));
    }

    #[test]
    fn details_skip_missing_fields() {
        let props = CountryProperties {
            name: Some("Germany".to_string()),
            continent: Some("Europe".to_string()),
            subregion: Some("Western Europe".to_string()),
            pop_est: Some(83_132_799.0),
            ..Default::default()
        };
        let c = Country::new(props, CountryGeometry::Polygon(vec![]), None).expect("country");
        assert_eq!(
            c.details(),
            "Continent: Europe • Region: Western Europe • Population: 83,132,799"
        );
        assert_eq!(c.bbox(), None);

        let bare = Country::new(
            CountryProperties {
                admin: Some("Nowhere".to_string()),
                ..Default::default()
            },
            CountryGeometry::Polygon(vec![]),
            None,
        )
        .expect("country");
        assert_eq!(bare.details(), "");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn collection_lookup_is_case_insensitive() {
        let c = Country::new(
            CountryProperties {
                name: Some("France".to_string()),
                ..Default::default()
            },
            CountryGeometry::Polygon(vec![square(-4.0, 43.0, 7.0)]),
            None,
        )
        .expect("country");
        let all = CountryCollection::new(vec![c]);
        assert_eq!(all.find_by_name("  fRANCE ").map(|c| c.name()), Some("France"));
        assert!(all.find_by_name("Spain").is_none());
    }
}
