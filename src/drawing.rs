//! 2D drawing routines for the orbit views.
//!
//! Renders the top-down ellipse with its four corner handles, the side
//! inclination view, and the parent body / planet markers on an egui painter.

use crate::geometry::{Corner, SideGeometry, TopDownGeometry};
use crate::interaction::Handle;
use crate::orbit::OrbitState;
use eframe::egui;
use nalgebra::Point2;

pub const COLOR_HANDLE: egui::Color32 = egui::Color32::from_rgb(220, 60, 60);
pub const COLOR_HANDLE_ACTIVE: egui::Color32 = egui::Color32::from_rgb(255, 170, 60);
pub const COLOR_PARENT: egui::Color32 = egui::Color32::from_rgb(70, 120, 255);
pub const COLOR_PLANET: egui::Color32 = egui::Color32::from_rgb(60, 200, 90);

const HANDLE_HALF_SIZE: f32 = 3.0;
const INCLINATION_HALF_SIZE: f32 = 4.0;
const BODY_RADIUS: f32 = 4.0;
const LABEL_OFFSET: egui::Vec2 = egui::Vec2::new(5.0, -5.0);

/// A painter plus the screen position of the view's local origin.
pub struct Canvas<'a> {
    pub painter: &'a egui::Painter,
    pub origin: egui::Pos2,
    pub dark_mode: bool,
}

impl Canvas<'_> {
    pub fn pos(&self, p: Point2<f64>) -> egui::Pos2 {
        self.origin + egui::Vec2::new(p.x as f32, p.y as f32)
    }

    fn ink(&self) -> egui::Color32 {
        if self.dark_mode { egui::Color32::from_gray(210) } else { egui::Color32::from_gray(40) }
    }

    fn faint(&self) -> egui::Color32 {
        if self.dark_mode { egui::Color32::from_gray(80) } else { egui::Color32::from_gray(190) }
    }

    fn path(&self, points: &[Point2<f64>], color: egui::Color32, width: f32) {
        let pts: Vec<egui::Pos2> = points.iter().map(|p| self.pos(*p)).collect();
        self.painter.add(egui::Shape::closed_line(pts, egui::Stroke::new(width, color)));
    }

    fn handle(&self, at: Point2<f64>, half: f32, active: bool) {
        let color = if active { COLOR_HANDLE_ACTIVE } else { COLOR_HANDLE };
        let rect = egui::Rect::from_center_size(self.pos(at), egui::Vec2::splat(half * 2.0));
        self.painter.rect_filled(rect, egui::CornerRadius::ZERO, color);
    }

    fn body(&self, at: Point2<f64>, color: egui::Color32, label: &str) {
        let pos = self.pos(at);
        self.painter.circle_filled(pos, BODY_RADIUS, color);
        self.painter.text(
            pos + LABEL_OFFSET,
            egui::Align2::LEFT_BOTTOM,
            label,
            egui::FontId::proportional(12.0),
            self.ink(),
        );
    }
}

pub fn draw_top_down(canvas: &Canvas<'_>, geometry: &TopDownGeometry, state: &OrbitState, active: Option<Handle>) {
    canvas.path(&geometry.path(), canvas.ink(), 1.5);
    for corner in Corner::ALL {
        canvas.handle(geometry.corner(corner), HANDLE_HALF_SIZE, active == Some(Handle::Corner(corner)));
    }
    canvas.body(geometry.parent_body(), COLOR_PARENT, &state.parent_body_name);
    canvas.body(geometry.planet(), COLOR_PLANET, &state.planet_name);
}

pub fn draw_side(canvas: &Canvas<'_>, geometry: &SideGeometry, state: &OrbitState, active: Option<Handle>) {
    let axis_stroke = egui::Stroke::new(1.0, canvas.faint());
    for [from, to] in geometry.axes() {
        canvas.painter.line_segment([canvas.pos(from), canvas.pos(to)], axis_stroke);
    }
    canvas.path(&geometry.path(), canvas.ink(), 1.5);

    let [from, to] = geometry.inclination_line();
    canvas.painter.line_segment([canvas.pos(from), canvas.pos(to)], egui::Stroke::new(2.0, COLOR_HANDLE));
    let handle = geometry.inclination_handle();
    canvas.handle(handle, INCLINATION_HALF_SIZE, active == Some(Handle::Inclination));

    canvas.body(geometry.center, COLOR_PARENT, &state.parent_body_name);
    canvas.body(handle, COLOR_PLANET, &state.planet_name);
}
