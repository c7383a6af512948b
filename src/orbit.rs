//! Canonical orbital elements edited by the views and the host form.
//!
//! `OrbitState` is the only authoritative copy of the orbit. Every setter
//! clamps instead of rejecting, so the stored ellipse is always renderable.

use nalgebra::Vector2;

pub const MIN_SEMI_MAJOR_AXIS: f64 = 0.01;
pub const MAX_ECCENTRICITY: f64 = 0.99;

pub fn clamp_semi_major_axis(a: f64) -> f64 {
    if a.is_finite() { a.max(MIN_SEMI_MAJOR_AXIS) } else { MIN_SEMI_MAJOR_AXIS }
}

pub fn clamp_eccentricity(e: f64) -> f64 {
    if e.is_finite() { e.clamp(0.0, MAX_ECCENTRICITY) } else { 0.0 }
}

/// Folds a full turn away while keeping the sign, so an animation from 0°
/// towards -90° is not wrapped to 270° halfway through.
pub fn wrap_inclination(deg: f64) -> f64 {
    if deg.is_finite() { deg % 360.0 } else { 0.0 }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitState {
    semi_major_axis: f64,
    eccentricity: f64,
    inclination_deg: f64,
    pub center_offset: Vector2<f64>,
    pub parent_body_name: String,
    pub planet_name: String,
}

impl Default for OrbitState {
    fn default() -> Self {
        Self {
            semi_major_axis: 100.0,
            eccentricity: 0.0,
            inclination_deg: 0.0,
            center_offset: Vector2::zeros(),
            parent_body_name: "Parent".to_string(),
            planet_name: "Planet".to_string(),
        }
    }
}

impl OrbitState {
    /// Default orbit around `parent` for a planet called `planet`.
    pub fn named(parent: &str, planet: &str) -> Self {
        Self { parent_body_name: parent.to_string(), planet_name: planet.to_string(), ..Self::default() }
    }

    /// Planet name as used for file, folder and config identifiers.
    pub fn body_name(&self) -> &str {
        self.planet_name.trim()
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination_deg(&self) -> f64 {
        self.inclination_deg
    }

    pub fn set_semi_major_axis(&mut self, a: f64) {
        self.semi_major_axis = clamp_semi_major_axis(a);
    }

    pub fn set_eccentricity(&mut self, e: f64) {
        self.eccentricity = clamp_eccentricity(e);
    }

    pub fn set_inclination_deg(&mut self, deg: f64) {
        self.inclination_deg = wrap_inclination(deg);
    }

    pub fn translate(&mut self, delta: Vector2<f64>) {
        self.center_offset += delta;
    }

    pub fn snapshot(&self) -> OrbitSnapshot {
        OrbitSnapshot {
            semi_major_axis: self.semi_major_axis,
            eccentricity: self.eccentricity,
            inclination_deg: self.inclination_deg,
            center_offset: self.center_offset,
        }
    }
}

/// Values handed to the host form's field-sync callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSnapshot {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub center_offset: Vector2<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eccentricity_of_one_is_stored_as_max() {
        let mut state = OrbitState::default();
        state.set_eccentricity(1.0);
        assert_eq!(state.eccentricity(), MAX_ECCENTRICITY);
        state.set_eccentricity(7.5);
        assert_eq!(state.eccentricity(), MAX_ECCENTRICITY);
        state.set_eccentricity(-0.3);
        assert_eq!(state.eccentricity(), 0.0);
    }

    #[test]
    fn semi_major_axis_never_reaches_zero() {
        let mut state = OrbitState::default();
        state.set_semi_major_axis(0.0);
        assert_eq!(state.semi_major_axis(), MIN_SEMI_MAJOR_AXIS);
        state.set_semi_major_axis(-42.0);
        assert_eq!(state.semi_major_axis(), MIN_SEMI_MAJOR_AXIS);
        state.set_semi_major_axis(f64::NAN);
        assert_eq!(state.semi_major_axis(), MIN_SEMI_MAJOR_AXIS);
    }

    #[test]
    fn inclination_keeps_sign_within_one_turn() {
        let mut state = OrbitState::default();
        state.set_inclination_deg(-90.0);
        assert_eq!(state.inclination_deg(), -90.0);
        state.set_inclination_deg(360.0);
        assert_eq!(state.inclination_deg(), 0.0);
        state.set_inclination_deg(400.0);
        assert_eq!(state.inclination_deg(), 40.0);
    }

    #[test]
    fn named_orbit_starts_from_defaults() {
        let state = OrbitState::named("Kerbol", " Vall ");
        assert_eq!(state.semi_major_axis(), 100.0);
        assert_eq!(state.parent_body_name, "Kerbol");
        assert_eq!(state.body_name(), "Vall");
    }
}
