//! Screen-space ellipse geometry for the two orbit projections.
//!
//! Everything here is a pure function of the orbital elements and the
//! viewport size. Screen coordinates follow egui: origin top-left, y down.

use crate::orbit::OrbitState;
use nalgebra::{Point2, Rotation2, Vector2};
use std::f64::consts::TAU;

pub const PATH_SEGMENTS: usize = 128;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Pixel sizes of the orbit ellipse for one viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EllipseGeometry {
    pub scale: f64,
    pub semi_major_px: f64,
    pub semi_minor_px: f64,
    /// Center-to-focus distance, where the parent body sits.
    pub focus_offset_px: f64,
}

impl EllipseGeometry {
    pub fn new(viewport: Viewport, semi_major_axis: f64, eccentricity: f64, fill_factor: f64) -> Option<Self> {
        if viewport.is_degenerate() {
            return None;
        }
        let scale = viewport.width.min(viewport.height) / (fill_factor * semi_major_axis);
        if !(scale.is_finite() && scale > 0.0) {
            return None;
        }
        let a = semi_major_axis * scale;
        let b = a * (1.0 - eccentricity * eccentricity).sqrt();
        let c = eccentricity * a;
        Some(Self { scale, semi_major_px: a, semi_minor_px: b, focus_offset_px: c })
    }

    pub fn from_state(viewport: Viewport, state: &OrbitState, fill_factor: f64) -> Option<Self> {
        Self::new(viewport, state.semi_major_axis(), state.eccentricity(), fill_factor)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Corner {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::SouthEast, Corner::SouthWest, Corner::NorthEast, Corner::NorthWest];

    pub fn label(&self) -> &'static str {
        match self {
            Corner::NorthEast => "NE",
            Corner::NorthWest => "NW",
            Corner::SouthEast => "SE",
            Corner::SouthWest => "SW",
        }
    }

    /// East corners sit past periapsis, west corners past apoapsis.
    pub fn is_east(&self) -> bool {
        matches!(self, Corner::NorthEast | Corner::SouthEast)
    }
}

pub fn ellipse_points(center: Vector2<f64>, rx: f64, ry: f64) -> impl Iterator<Item = Vector2<f64>> {
    (0..PATH_SEGMENTS).map(move |i| {
        let theta = TAU * i as f64 / PATH_SEGMENTS as f64;
        center + Vector2::new(rx * theta.cos(), ry * theta.sin())
    })
}

/// Top-down projection: the ellipse rotated by `-inclination` about the
/// (panned) view center, with the parent body at that center.
#[derive(Clone, Copy, Debug)]
pub struct TopDownGeometry {
    pub ellipse: EllipseGeometry,
    pub center: Point2<f64>,
    pub rotation: Rotation2<f64>,
}

impl TopDownGeometry {
    pub fn new(viewport: Viewport, state: &OrbitState, fill_factor: f64) -> Option<Self> {
        let ellipse = EllipseGeometry::from_state(viewport, state, fill_factor)?;
        Some(Self {
            ellipse,
            center: viewport.center() + state.center_offset,
            rotation: Rotation2::new(-state.inclination_deg().to_radians()),
        })
    }

    pub fn to_screen(&self, local: Vector2<f64>) -> Point2<f64> {
        self.center + self.rotation * local
    }

    pub fn to_local(&self, screen: Point2<f64>) -> Vector2<f64> {
        self.rotation.inverse() * (screen - self.center)
    }

    pub fn corner_local(&self, corner: Corner) -> Vector2<f64> {
        let EllipseGeometry { semi_major_px: a, semi_minor_px: b, focus_offset_px: c, .. } = self.ellipse;
        match corner {
            Corner::NorthEast => Vector2::new(a - c, -b),
            Corner::NorthWest => Vector2::new(-a - c, -b),
            Corner::SouthEast => Vector2::new(a - c, b),
            Corner::SouthWest => Vector2::new(-a - c, b),
        }
    }

    pub fn corner(&self, corner: Corner) -> Point2<f64> {
        self.to_screen(self.corner_local(corner))
    }

    pub fn ellipse_center_local(&self) -> Vector2<f64> {
        Vector2::new(-self.ellipse.focus_offset_px, 0.0)
    }

    pub fn parent_body(&self) -> Point2<f64> {
        self.center
    }

    pub fn planet(&self) -> Point2<f64> {
        let e = &self.ellipse;
        self.to_screen(Vector2::new(e.semi_major_px - e.focus_offset_px, 0.0))
    }

    pub fn path(&self) -> Vec<Point2<f64>> {
        ellipse_points(self.ellipse_center_local(), self.ellipse.semi_major_px, self.ellipse.semi_minor_px)
            .map(|p| self.to_screen(p))
            .collect()
    }

    /// Anisotropic distance from the ellipse center: 1.0 on the orbit path.
    pub fn normalized_radius(&self, screen: Point2<f64>) -> f64 {
        let p = self.to_local(screen) - self.ellipse_center_local();
        let nx = p.x / self.ellipse.semi_major_px;
        let ny = p.y / self.ellipse.semi_minor_px;
        (nx * nx + ny * ny).sqrt()
    }

    /// Pointer offset from the view center in orbit units, in the unrotated frame.
    pub fn unscaled_offset(&self, screen: Point2<f64>) -> Vector2<f64> {
        self.to_local(screen) / self.ellipse.scale
    }
}

/// Side projection: an unrotated ellipse squashed by `cos(inclination)` and
/// the inclination line `y = x tan(inclination)` through the view center.
#[derive(Clone, Copy, Debug)]
pub struct SideGeometry {
    pub ellipse: EllipseGeometry,
    pub center: Point2<f64>,
    pub inclination_rad: f64,
    pub viewport: Viewport,
}

impl SideGeometry {
    pub fn new(viewport: Viewport, state: &OrbitState, fill_factor: f64) -> Option<Self> {
        let ellipse = EllipseGeometry::from_state(viewport, state, fill_factor)?;
        Some(Self {
            ellipse,
            center: viewport.center(),
            inclination_rad: state.inclination_deg().to_radians(),
            viewport,
        })
    }

    pub fn squashed_minor_px(&self) -> f64 {
        (self.ellipse.semi_minor_px * self.inclination_rad.cos()).abs()
    }

    /// Height of the handle above the center, pinned to the viewport edge so
    /// it stays grabbable near ±90°.
    fn handle_rise_px(&self) -> f64 {
        let rise = self.ellipse.semi_major_px * self.inclination_rad.tan();
        let limit = self.viewport.height / 2.0;
        if rise.is_finite() {
            rise.clamp(-limit, limit)
        } else {
            0.0
        }
    }

    pub fn inclination_handle(&self) -> Point2<f64> {
        self.center + Vector2::new(self.ellipse.semi_major_px, -self.handle_rise_px())
    }

    pub fn inclination_line(&self) -> [Point2<f64>; 2] {
        let rise = self.handle_rise_px();
        let a = self.ellipse.semi_major_px;
        [self.center + Vector2::new(-a, rise), self.center + Vector2::new(a, -rise)]
    }

    pub fn path(&self) -> Vec<Point2<f64>> {
        ellipse_points(Vector2::zeros(), self.ellipse.semi_major_px, self.squashed_minor_px())
            .map(|p| self.center + p)
            .collect()
    }

    pub fn axes(&self) -> [[Point2<f64>; 2]; 2] {
        let viewport = self.viewport;
        [
            [Point2::new(0.0, self.center.y), Point2::new(viewport.width, self.center.y)],
            [Point2::new(self.center.x, 0.0), Point2::new(self.center.x, viewport.height)],
        ]
    }

    pub fn inclination_from_pointer(&self, pointer_y: f64) -> f64 {
        let ratio = (self.center.y - pointer_y) / self.ellipse.semi_minor_px;
        ratio.clamp(-1.0, 1.0).asin().to_degrees()
    }
}
