//! View-specific halves of the orbit editor.
//!
//! A `Projection` decides how the orbit maps onto a viewport, which handle a
//! press lands on, and what a pointer move means for the orbit. `TopDown`
//! edits size and shape, `Side` edits inclination.

use crate::config::EditorConfig;
use crate::drawing::{draw_side, draw_top_down, Canvas};
use crate::geometry::{Corner, SideGeometry, TopDownGeometry, Viewport};
use crate::interaction::{DragSession, DragUpdate, Handle};
use crate::orbit::{clamp_eccentricity, OrbitState, MAX_ECCENTRICITY, MIN_SEMI_MAJOR_AXIS};
use crate::smoothing::OrbitTarget;
use nalgebra::{distance, Point2};

pub trait Projection {
    type Geometry;

    fn title(&self) -> &'static str;

    fn geometry(&self, viewport: Viewport, state: &OrbitState, config: &EditorConfig) -> Option<Self::Geometry>;

    fn hit_test(&self, pointer: Point2<f64>, geometry: &Self::Geometry, config: &EditorConfig) -> Option<Handle>;

    fn resolve_drag(
        &self,
        session: &DragSession,
        pointer: Point2<f64>,
        geometry: &Self::Geometry,
        state: &OrbitState,
    ) -> Option<DragUpdate>;

    fn paint(&self, canvas: &Canvas<'_>, geometry: &Self::Geometry, state: &OrbitState, active: Option<Handle>);
}

/// Semi-major axis and eccentricity implied by dragging a corner to the
/// unscaled offset `(dx, dy)` from the view center.
pub fn corner_drag_target(corner: Corner, dx: f64, dy: f64, eccentricity: f64) -> OrbitTarget {
    let e = eccentricity.min(MAX_ECCENTRICITY);
    let reach = if corner.is_east() { 1.0 + e } else { 1.0 - e };
    let a = (dx.abs() / reach).max(MIN_SEMI_MAJOR_AXIS);
    let e = clamp_eccentricity(1.0 - (dy / a).powi(2));
    OrbitTarget::shape(a, e)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TopDown;

impl Projection for TopDown {
    type Geometry = TopDownGeometry;

    fn title(&self) -> &'static str {
        "Top-down View"
    }

    fn geometry(&self, viewport: Viewport, state: &OrbitState, config: &EditorConfig) -> Option<TopDownGeometry> {
        TopDownGeometry::new(viewport, state, config.fill_factor)
    }

    fn hit_test(&self, pointer: Point2<f64>, geometry: &TopDownGeometry, config: &EditorConfig) -> Option<Handle> {
        let corner = Corner::ALL
            .into_iter()
            .find(|c| distance(&geometry.corner(*c), &pointer) < config.handle_radius_px);
        if let Some(corner) = corner {
            return Some(Handle::Corner(corner));
        }
        let (inner, outer) = config.path_band;
        let r = geometry.normalized_radius(pointer);
        (r > inner && r < outer).then_some(Handle::PanBody)
    }

    fn resolve_drag(
        &self,
        session: &DragSession,
        pointer: Point2<f64>,
        geometry: &TopDownGeometry,
        state: &OrbitState,
    ) -> Option<DragUpdate> {
        match session.handle {
            Handle::Corner(corner) => {
                let offset = geometry.unscaled_offset(pointer);
                let target = corner_drag_target(corner, offset.x, offset.y, state.eccentricity());
                Some(DragUpdate::Retarget(target))
            }
            Handle::PanBody => Some(DragUpdate::Pan(session.pointer_delta(pointer))),
            Handle::Inclination => None,
        }
    }

    fn paint(&self, canvas: &Canvas<'_>, geometry: &TopDownGeometry, state: &OrbitState, active: Option<Handle>) {
        draw_top_down(canvas, geometry, state, active);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Side;

impl Projection for Side {
    type Geometry = SideGeometry;

    fn title(&self) -> &'static str {
        "Side View"
    }

    fn geometry(&self, viewport: Viewport, state: &OrbitState, config: &EditorConfig) -> Option<SideGeometry> {
        SideGeometry::new(viewport, state, config.fill_factor)
    }

    fn hit_test(&self, pointer: Point2<f64>, geometry: &SideGeometry, config: &EditorConfig) -> Option<Handle> {
        (distance(&geometry.inclination_handle(), &pointer) < config.handle_radius_px).then_some(Handle::Inclination)
    }

    fn resolve_drag(
        &self,
        session: &DragSession,
        pointer: Point2<f64>,
        geometry: &SideGeometry,
        _state: &OrbitState,
    ) -> Option<DragUpdate> {
        match session.handle {
            Handle::Inclination => {
                Some(DragUpdate::Retarget(OrbitTarget::inclination(geometry.inclination_from_pointer(pointer.y))))
            }
            _ => None,
        }
    }

    fn paint(&self, canvas: &Canvas<'_>, geometry: &SideGeometry, state: &OrbitState, active: Option<Handle>) {
        draw_side(canvas, geometry, state, active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector2;

    fn unit_scale_viewport() -> Viewport {
        Viewport::new(220.0, 220.0)
    }

    fn target_of(update: Option<DragUpdate>) -> OrbitTarget {
        match update {
            Some(DragUpdate::Retarget(target)) => target,
            other => panic!("expected a retarget, got {other:?}"),
        }
    }

    #[test]
    fn press_on_each_corner_grabs_it() {
        let config = EditorConfig::default();
        let mut state = OrbitState::default();
        state.set_eccentricity(0.3);
        state.set_inclination_deg(25.0);
        let g = TopDown.geometry(unit_scale_viewport(), &state, &config).unwrap();
        for corner in Corner::ALL {
            let near = g.corner(corner) + Vector2::new(4.0, -5.0);
            assert_eq!(TopDown.hit_test(near, &g, &config), Some(Handle::Corner(corner)));
        }
    }

    #[test]
    fn press_on_orbit_band_pans_and_elsewhere_misses() {
        let config = EditorConfig::default();
        let state = OrbitState::default();
        let g = TopDown.geometry(unit_scale_viewport(), &state, &config).unwrap();
        let center = g.center;
        assert_eq!(TopDown.hit_test(center + Vector2::new(0.0, 90.0), &g, &config), Some(Handle::PanBody));
        assert_eq!(TopDown.hit_test(center + Vector2::new(-87.0, 0.0), &g, &config), Some(Handle::PanBody));
        assert_eq!(TopDown.hit_test(center + Vector2::new(0.0, 50.0), &g, &config), None);
        assert_eq!(TopDown.hit_test(center + Vector2::new(0.0, 99.0), &g, &config), None);
        assert_eq!(TopDown.hit_test(center + Vector2::new(0.0, 79.0), &g, &config), None);
        assert_relative_eq!(g.normalized_radius(center + Vector2::new(0.0, 80.0)), 0.8, epsilon = 1e-9);
        assert_relative_eq!(g.normalized_radius(center + Vector2::new(0.0, 95.0)), 0.95, epsilon = 1e-9);
    }

    #[test]
    fn southeast_drag_scenario() {
        let config = EditorConfig::default();
        let state = OrbitState::default();
        let g = TopDown.geometry(unit_scale_viewport(), &state, &config).unwrap();
        assert_relative_eq!(g.ellipse.scale, 1.0, epsilon = 1e-9);

        let session = DragSession::new(Handle::Corner(Corner::SouthEast), g.corner(Corner::SouthEast));
        let pointer = g.center + Vector2::new(150.0, 50.0);
        let target = target_of(TopDown.resolve_drag(&session, pointer, &g, &state));
        assert_relative_eq!(target.semi_major_axis.unwrap(), 150.0, epsilon = 1e-9);
        assert_relative_eq!(target.eccentricity.unwrap(), 1.0 - (50.0_f64 / 150.0).powi(2), epsilon = 1e-9);
        assert!((target.eccentricity.unwrap() - 0.889).abs() < 1e-3);
        assert_eq!(target.inclination_deg, None);
    }

    #[test]
    fn east_and_west_corners_divide_by_opposite_reach() {
        let east = corner_drag_target(Corner::NorthEast, 150.0, 0.0, 0.5);
        assert_relative_eq!(east.semi_major_axis.unwrap(), 100.0, epsilon = 1e-9);
        let west = corner_drag_target(Corner::NorthWest, -50.0, 0.0, 0.5);
        assert_relative_eq!(west.semi_major_axis.unwrap(), 100.0, epsilon = 1e-9);
        // Horizontal drags collapse the minor axis.
        assert_relative_eq!(east.eccentricity.unwrap(), MAX_ECCENTRICITY, epsilon = 1e-9);
    }

    #[test]
    fn northeast_drag_to_periapsis_reach_recovers_axis() {
        let (a, e) = (80.0, 0.4);
        let target = corner_drag_target(Corner::NorthEast, a * (1.0 + e), -a * (1.0 - e).sqrt(), e);
        assert_relative_eq!(target.semi_major_axis.unwrap(), a, epsilon = 1e-12);
        assert_relative_eq!(target.eccentricity.unwrap(), e, epsilon = 1e-12);
    }

    #[test]
    fn drag_to_center_clamps_axis_to_epsilon() {
        let target = corner_drag_target(Corner::SouthWest, 0.0, 0.0, 0.2);
        assert_eq!(target.semi_major_axis, Some(MIN_SEMI_MAJOR_AXIS));
        assert!(target.eccentricity.unwrap() <= MAX_ECCENTRICITY);
    }

    #[test]
    fn pan_is_raw_pixel_delta() {
        let config = EditorConfig::default();
        for a in [1.0, 100.0, 50_000.0] {
            let mut state = OrbitState::default();
            state.set_semi_major_axis(a);
            let g = TopDown.geometry(Viewport::new(400.0, 300.0), &state, &config).unwrap();
            let session = DragSession::new(Handle::PanBody, Point2::new(100.0, 100.0));
            let update = TopDown.resolve_drag(&session, Point2::new(120.0, 90.0), &g, &state);
            assert_eq!(update, Some(DragUpdate::Pan(Vector2::new(20.0, -10.0))));
        }
    }

    #[test]
    fn side_view_handle_and_inclination_scenario() {
        let config = EditorConfig::default();
        let state = OrbitState::default();
        let g = Side.geometry(unit_scale_viewport(), &state, &config).unwrap();
        let handle = g.inclination_handle();
        assert_eq!(Side.hit_test(handle + Vector2::new(3.0, 3.0), &g, &config), Some(Handle::Inclination));
        assert_eq!(Side.hit_test(g.center, &g, &config), None);

        let session = DragSession::new(Handle::Inclination, handle);
        let b = g.ellipse.semi_minor_px;
        let up = target_of(Side.resolve_drag(&session, Point2::new(handle.x, g.center.y - b), &g, &state));
        assert_relative_eq!(up.inclination_deg.unwrap(), 90.0, epsilon = 1e-9);
        let down = target_of(Side.resolve_drag(&session, Point2::new(handle.x, g.center.y + b), &g, &state));
        assert_relative_eq!(down.inclination_deg.unwrap(), -90.0, epsilon = 1e-9);
        assert_eq!(up.semi_major_axis, None);
    }
}
