use scene::selection::{CountryColor, SelectionController};
use scene::{CountryCollection, CountryId, guesses::GuessStore};

use crate::symbology::{Palette, Rgba};

/// Per-country fill colors, parallel to the dataset order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CountryColorSnapshot {
    pub colors: Vec<(CountryId, Rgba)>,
}

impl CountryColorSnapshot {
    pub fn color_of(&self, id: &CountryId) -> Option<Rgba> {
        self.colors.iter().find(|(c, _)| c == id).map(|(_, rgba)| *rgba)
    }
}

/// Recolors the whole dataset from the selection state.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct CountryColorLayer {
    pub palette: Palette,
}

impl CountryColorLayer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn roles<S: GuessStore>(
        &self,
        countries: &CountryCollection,
        selection: &SelectionController<S>,
    ) -> Vec<CountryColor> {
        countries.iter().map(|c| selection.color_for(c)).collect()
    }

    pub fn extract<S: GuessStore>(
        &self,
        countries: &CountryCollection,
        selection: &SelectionController<S>,
    ) -> CountryColorSnapshot {
        CountryColorSnapshot {
            colors: countries
                .iter()
                .map(|c| (c.id().clone(), self.palette.color(selection.color_for(c))))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CountryColorLayer;
    use crate::symbology::Palette;
    use formats::countries_from_geojson_str;
    use pretty_assertions::assert_eq;
    use scene::CountryId;
    use scene::selection::{CountryColor, SelectionController};

    const SAMPLE: &str = include_str!("../../formats/tests/data/countries.geojson");

    #[test]
    fn extracts_one_color_per_country() {
        let all = countries_from_geojson_str(SAMPLE).expect("parse");
        let mut sel = SelectionController::new();
        let layer = CountryColorLayer::default();
        let palette = Palette::default();

        let snap = layer.extract(&all, &sel);
        assert_eq!(snap.colors.len(), all.len());
        assert!(snap.colors.iter().all(|(_, c)| *c == palette.neutral));

        let de = all.find_by_name("Germany").expect("germany");
        sel.select(de);
        let snap = layer.extract(&all, &sel);
        assert_eq!(snap.color_of(&CountryId::from("Germany")), Some(palette.highlight));
        assert_eq!(snap.color_of(&CountryId::from("France")), Some(palette.neutral));

        sel.evaluate_guess("germany");
        let fr = all.find_by_name("France").expect("france");
        sel.select(fr);
        sel.evaluate_guess("Belgium");
        sel.deselect();
        assert_eq!(
            layer.roles(&all, &sel),
            vec![
                CountryColor::Incorrect,
                CountryColor::Correct,
                CountryColor::Neutral,
                CountryColor::Neutral,
            ]
        );
    }
}
