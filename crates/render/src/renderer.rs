use foundation::math::Vec2;
use layers::{CountryColorSnapshot, Rgba};
use scene::CountryId;
use scene::picking::{GlobeConfig, GlobeHit, GlobeView, SphereRaycaster, Viewport};
use tracing::trace;

/// Rendering collaborator driven by the interaction core.
///
/// The core never touches vertex data; it only asks for intersections and
/// pushes colors, overlay state and one render call per frame.
pub trait GlobeRenderer {
    fn viewport(&self) -> Viewport;

    /// Intersects the rendered globe under a pointer given in normalized
    /// device coordinates.
    fn intersect(&self, ndc: Vec2, view: &GlobeView) -> Option<GlobeHit>;

    /// Replaces every country's fill color.
    fn apply_colors(&mut self, colors: &CountryColorSnapshot);

    fn set_grid_visible(&mut self, visible: bool);

    fn render(&mut self, view: &GlobeView);
}

/// Renderer without a GPU: analytic sphere intersection and recorded state.
#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
    raycaster: SphereRaycaster,
    viewport: Viewport,
    colors: CountryColorSnapshot,
    grid_visible: bool,
    color_updates: u64,
    frames_rendered: u64,
    last_view: Option<GlobeView>,
}

impl HeadlessRenderer {
    pub fn new(globe: GlobeConfig, viewport: Viewport) -> Self {
        Self {
            raycaster: SphereRaycaster::new(globe),
            viewport,
            colors: CountryColorSnapshot::default(),
            grid_visible: false,
            color_updates: 0,
            frames_rendered: 0,
            last_view: None,
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn colors(&self) -> &CountryColorSnapshot {
        &self.colors
    }

    pub fn color_of(&self, id: &CountryId) -> Option<Rgba> {
        self.colors.color_of(id)
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn color_updates(&self) -> u64 {
        self.color_updates
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn last_view(&self) -> Option<GlobeView> {
        self.last_view
    }
}

impl GlobeRenderer for HeadlessRenderer {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn intersect(&self, ndc: Vec2, view: &GlobeView) -> Option<GlobeHit> {
        self.raycaster.intersect(ndc, self.viewport.aspect(), view)
    }

    fn apply_colors(&mut self, colors: &CountryColorSnapshot) {
        self.colors = colors.clone();
        self.color_updates += 1;
    }

    fn set_grid_visible(&mut self, visible: bool) {
        self.grid_visible = visible;
    }

    fn render(&mut self, view: &GlobeView) {
        trace!(frame = self.frames_rendered, ?view, "render");
        self.frames_rendered += 1;
        self.last_view = Some(*view);
    }
}

#[cfg(test)]
mod tests {
    use super::{GlobeRenderer, HeadlessRenderer};
    use foundation::math::{Euler, Vec2};
    use layers::{CountryColorSnapshot, Rgba};
    use scene::CountryId;
    use scene::picking::{GlobeConfig, GlobeView, Viewport};

    fn view() -> GlobeView {
        GlobeView {
            rotation: Euler::default(),
            camera_distance: 300.0,
        }
    }

    #[test]
    fn intersects_center_and_misses_corner() {
        let r = HeadlessRenderer::new(GlobeConfig::default(), Viewport::new(1280.0, 720.0));
        let hit = r.intersect(Vec2::new(0.0, 0.0), &view()).expect("hit");
        assert_eq!(hit.points.len(), 2);
        assert!(r.intersect(Vec2::new(1.0, 1.0), &view()).is_none());
    }

    #[test]
    fn records_colors_grid_and_frames() {
        let mut r = HeadlessRenderer::new(GlobeConfig::default(), Viewport::new(100.0, 100.0));
        let de = CountryId::from("Germany");
        let snap = CountryColorSnapshot {
            colors: vec![(de.clone(), Rgba::new(1, 2, 3, 0.5))],
        };
        r.apply_colors(&snap);
        r.set_grid_visible(true);
        r.render(&view());

        assert_eq!(r.color_of(&de), Some(Rgba::new(1, 2, 3, 0.5)));
        assert_eq!(r.color_updates(), 1);
        assert!(r.grid_visible());
        assert_eq!(r.frames_rendered(), 1);
        assert_eq!(r.last_view(), Some(view()));
    }
}
