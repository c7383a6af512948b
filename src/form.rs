//! Host form state: the canonical orbit plus the numeric fields mirroring it.
//!
//! The form is the single owner of `OrbitState`. Views borrow it for one
//! callback at a time and report back through `FieldSync`.

use crate::config::PlanetConfig;
use crate::geometry::{EllipseGeometry, Viewport};
use crate::orbit::{clamp_eccentricity, clamp_semi_major_axis, wrap_inclination, OrbitSnapshot, OrbitState};
use nalgebra::Vector2;

/// Receives the orbit after every animation tick and committed drag.
pub trait FieldSync {
    fn sync_fields(&mut self, snapshot: &OrbitSnapshot);
}

/// Values shown in (and edited through) the numeric widgets.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitFields {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    /// Always displayed in `[0, 360)`.
    pub inclination_deg: f64,
    pub center_offset_px: Vector2<f64>,
    pub parent_body: String,
    pub planet_name: String,
}

impl OrbitFields {
    pub fn from_state(state: &OrbitState) -> Self {
        let mut fields = Self {
            semi_major_axis_km: 0.0,
            eccentricity: 0.0,
            inclination_deg: 0.0,
            center_offset_px: Vector2::zeros(),
            parent_body: state.parent_body_name.clone(),
            planet_name: state.planet_name.clone(),
        };
        fields.sync_fields(&state.snapshot());
        fields
    }

    /// Center offset converted to kilometres with the top-down view's scale.
    pub fn center_offset_km(&self, viewport: Viewport, fill_factor: f64) -> Vector2<f64> {
        match EllipseGeometry::new(viewport, self.semi_major_axis_km, self.eccentricity, fill_factor) {
            Some(g) => self.center_offset_px / g.scale,
            None => Vector2::zeros(),
        }
    }
}

impl FieldSync for OrbitFields {
    fn sync_fields(&mut self, snapshot: &OrbitSnapshot) {
        self.semi_major_axis_km = snapshot.semi_major_axis;
        self.eccentricity = snapshot.eccentricity;
        self.inclination_deg = snapshot.inclination_deg.rem_euclid(360.0);
        self.center_offset_px = snapshot.center_offset;
    }
}

#[derive(Clone, Debug)]
pub struct HostForm {
    pub state: OrbitState,
    pub fields: OrbitFields,
    pub planet: PlanetConfig,
    /// Size of the top-down view at its last paint, for pixel → km display.
    pub top_down_viewport: Option<Viewport>,
}

impl Default for HostForm {
    fn default() -> Self {
        let state = OrbitState::default();
        Self {
            fields: OrbitFields::from_state(&state),
            state,
            planet: PlanetConfig::default(),
            top_down_viewport: None,
        }
    }
}

impl HostForm {
    /// Pushes field values into the orbit. Returns false when the clamped
    /// values match what is already stored. In-flight animation targets are
    /// left alone.
    pub fn set_orbit_state(&mut self, semi_major_axis: f64, eccentricity: f64, inclination_deg: f64, parent: &str, planet: &str) -> bool {
        let (parent, planet) = (parent.trim(), planet.trim());
        let a = clamp_semi_major_axis(semi_major_axis);
        let e = clamp_eccentricity(eccentricity);
        let i = wrap_inclination(inclination_deg);
        let s = &self.state;
        // Same angle modulo a turn counts as unchanged so a stored -90° is
        // not rewritten as 270° under a running side-view animation.
        let same_inclination = s.inclination_deg().rem_euclid(360.0) == i.rem_euclid(360.0);
        let unchanged = s.semi_major_axis() == a
            && s.eccentricity() == e
            && same_inclination
            && s.parent_body_name == parent
            && s.planet_name == planet;
        if unchanged {
            return false;
        }
        log::debug!("orbit set from fields: a={a} e={e} i={i}");
        self.state.set_semi_major_axis(a);
        self.state.set_eccentricity(e);
        if !same_inclination {
            self.state.set_inclination_deg(i);
        }
        self.state.parent_body_name = parent.to_string();
        self.state.planet_name = planet.to_string();
        self.fields.sync_fields(&self.state.snapshot());
        true
    }

    /// Applies whatever the numeric widgets currently hold.
    pub fn apply_fields(&mut self) -> bool {
        let f = self.fields.clone();
        self.set_orbit_state(f.semi_major_axis_km, f.eccentricity, f.inclination_deg, &f.parent_body, &f.planet_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn same_values_twice_is_a_no_op() {
        let mut form = HostForm::default();
        assert!(form.set_orbit_state(250.0, 0.3, 12.0, "Kerbol", "Dres"));
        let before = form.state.clone();
        assert!(!form.set_orbit_state(250.0, 0.3, 12.0, "Kerbol", "Dres"));
        assert_eq!(form.state, before);
    }

    #[test]
    fn field_values_are_clamped_and_echoed_back() {
        let mut form = HostForm::default();
        form.fields.eccentricity = 1.0;
        form.fields.semi_major_axis_km = 0.0;
        assert!(form.apply_fields());
        assert_eq!(form.state.eccentricity(), 0.99);
        assert_eq!(form.fields.eccentricity, 0.99);
        assert_eq!(form.fields.semi_major_axis_km, crate::orbit::MIN_SEMI_MAJOR_AXIS);
    }

    #[test]
    fn negative_inclination_displays_within_one_turn() {
        let mut fields = OrbitFields::from_state(&OrbitState::default());
        let mut state = OrbitState::default();
        state.set_inclination_deg(-90.0);
        fields.sync_fields(&state.snapshot());
        assert_eq!(fields.inclination_deg, 270.0);

        // 270° in the field is the same orbit as the stored -90°.
        let mut form = HostForm { state, fields, ..HostForm::default() };
        assert!(!form.apply_fields());
    }

    #[test]
    fn names_are_stored_trimmed() {
        let mut form = HostForm::default();
        assert!(form.set_orbit_state(100.0, 0.0, 0.0, " Kerbol", "Vall  "));
        assert_eq!(form.state.parent_body_name, "Kerbol");
        assert_eq!(form.state.planet_name, "Vall");
        assert!(!form.set_orbit_state(100.0, 0.0, 0.0, "Kerbol ", " Vall"));
    }

    #[test]
    fn center_offset_converts_with_view_scale() {
        let mut fields = OrbitFields::from_state(&OrbitState::default());
        fields.center_offset_px = Vector2::new(44.0, -22.0);
        let km = fields.center_offset_km(Viewport::new(440.0, 440.0), 2.2);
        assert_relative_eq!(km.x, 22.0, epsilon = 1e-9);
        assert_relative_eq!(km.y, -11.0, epsilon = 1e-9);
        assert_eq!(fields.center_offset_km(Viewport::new(0.0, 0.0), 2.2), Vector2::zeros());
    }
}
