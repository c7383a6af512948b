//! The orbit view core shared by the top-down and side views.
//!
//! `OrbitView` owns only transient state: the open gesture and its smoothing
//! scheduler. The orbit itself is borrowed from the host form for each call,
//! so both views always render the same state.

use crate::config::EditorConfig;
use crate::drawing::Canvas;
use crate::form::{FieldSync, HostForm};
use crate::geometry::Viewport;
use crate::interaction::{DragUpdate, Handle, Interaction, PointerEvent};
use crate::orbit::OrbitState;
use crate::projection::{Projection, Side, TopDown};
use crate::smoothing::SmoothingScheduler;
use eframe::egui;
use nalgebra::Point2;
use std::time::Duration;

pub struct OrbitView<P: Projection> {
    projection: P,
    interaction: Interaction,
    scheduler: SmoothingScheduler,
    config: EditorConfig,
}

impl<P: Projection> OrbitView<P> {
    pub fn new(projection: P, config: EditorConfig) -> Self {
        Self {
            projection,
            interaction: Interaction::Idle,
            scheduler: SmoothingScheduler::new(&config),
            config,
        }
    }

    pub fn title(&self) -> &'static str {
        self.projection.title()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn scheduler(&self) -> &SmoothingScheduler {
        &self.scheduler
    }

    pub fn geometry(&self, viewport: Viewport, state: &OrbitState) -> Option<P::Geometry> {
        self.projection.geometry(viewport, state, &self.config)
    }

    /// Feeds one pointer event through the gesture state machine. Returns
    /// true when something visible changed.
    pub fn handle_event(
        &mut self,
        event: PointerEvent,
        viewport: Viewport,
        state: &mut OrbitState,
        now: f64,
        sync: &mut impl FieldSync,
    ) -> bool {
        match event {
            PointerEvent::Release => match self.interaction.end() {
                Some(session) => {
                    log::debug!("{}: released {}", self.title(), session.handle.label());
                    true
                }
                None => false,
            },
            PointerEvent::Press(pointer) => {
                let Some(geometry) = self.geometry(viewport, state) else {
                    return false;
                };
                match self.projection.hit_test(pointer, &geometry, &self.config) {
                    Some(handle) => {
                        log::debug!("{}: grabbed {}", self.title(), handle.label());
                        self.interaction.begin(handle, pointer);
                        true
                    }
                    None => false,
                }
            }
            PointerEvent::Move(pointer) => {
                let Some(geometry) = self.geometry(viewport, state) else {
                    return false;
                };
                let Some(session) = self.interaction.session_mut() else {
                    return false;
                };
                let update = self.projection.resolve_drag(session, pointer, &geometry, state);
                session.anchor = pointer;
                match update {
                    Some(DragUpdate::Retarget(target)) => {
                        self.scheduler.retarget(target, now);
                        false
                    }
                    Some(DragUpdate::Pan(delta)) => {
                        state.translate(delta);
                        sync.sync_fields(&state.snapshot());
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Runs the animation tick if one is due, then syncs the host's fields.
    pub fn poll(&mut self, now: f64, state: &mut OrbitState, sync: &mut impl FieldSync) -> bool {
        if self.scheduler.poll(now, state) {
            sync.sync_fields(&state.snapshot());
            if !self.scheduler.is_pending() {
                log::trace!("{}: settled after {} ticks", self.title(), self.scheduler.ticks_run());
            }
            true
        } else {
            false
        }
    }

    pub fn time_until_tick(&self, now: f64) -> Option<Duration> {
        self.scheduler().time_until_due(now)
    }

    /// Lays out, routes pointer input and paints the view into the rest of `ui`.
    pub fn show(&mut self, ui: &mut egui::Ui, form: &mut HostForm, dark_mode: bool) -> Viewport {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
        let rect = response.rect;
        let viewport = Viewport::new(rect.width() as f64, rect.height() as f64);
        let now = ui.input(|i| i.time);
        let local = |pos: egui::Pos2| Point2::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);

        let mut events = Vec::new();
        if response.drag_started() {
            if let Some(origin) = ui.input(|i| i.pointer.press_origin()) {
                events.push(PointerEvent::Press(local(origin)));
            }
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(PointerEvent::Move(local(pos)));
            }
        }
        if response.drag_stopped() {
            events.push(PointerEvent::Release);
        }
        for event in events {
            self.handle_event(event, viewport, &mut form.state, now, &mut form.fields);
        }

        let Some(geometry) = self.geometry(viewport, &form.state) else {
            log::trace!("{}: degenerate viewport {viewport:?}, skipping paint", self.title());
            return viewport;
        };

        let active = self.interaction.active_handle();
        if active.is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if let Some(hover) = response.hover_pos() {
            match self.projection.hit_test(local(hover), &geometry, &self.config) {
                Some(Handle::PanBody) => ui.ctx().set_cursor_icon(egui::CursorIcon::Move),
                Some(_) => ui.ctx().set_cursor_icon(egui::CursorIcon::Grab),
                None => {}
            }
        }

        let canvas = Canvas { painter: &painter, origin: rect.min, dark_mode };
        self.projection.paint(&canvas, &geometry, &form.state, active);
        viewport
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ViewTab {
    TopDown,
    Side,
}

/// Both presentations of the one orbit held by the host form.
pub struct OrbitViews {
    pub top_down: OrbitView<TopDown>,
    pub side: OrbitView<Side>,
}

impl OrbitViews {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            top_down: OrbitView::new(TopDown, config.clone()),
            side: OrbitView::new(Side, config.clone()),
        }
    }

    pub fn title(&self, tab: ViewTab) -> &'static str {
        match tab {
            ViewTab::TopDown => self.top_down.title(),
            ViewTab::Side => self.side.title(),
        }
    }

    /// Advances both animations, visible or not. Returns true if either ticked.
    pub fn poll(&mut self, now: f64, form: &mut HostForm) -> bool {
        let top = self.top_down.poll(now, &mut form.state, &mut form.fields);
        let side = self.side.poll(now, &mut form.state, &mut form.fields);
        top || side
    }

    /// Handle being dragged in either view.
    pub fn active_handle(&self) -> Option<Handle> {
        self.top_down.interaction().active_handle().or(self.side.interaction().active_handle())
    }

    pub fn time_until_tick(&self, now: f64) -> Option<Duration> {
        match (self.top_down.time_until_tick(now), self.side.time_until_tick(now)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn show(&mut self, tab: ViewTab, ui: &mut egui::Ui, form: &mut HostForm, dark_mode: bool) {
        match tab {
            ViewTab::TopDown => {
                let viewport = self.top_down.show(ui, form, dark_mode);
                form.top_down_viewport = Some(viewport);
            }
            ViewTab::Side => {
                self.side.show(ui, form, dark_mode);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Corner;
    use crate::orbit::{OrbitSnapshot, MIN_SEMI_MAJOR_AXIS};
    use approx::assert_relative_eq;
    use nalgebra::Vector2;

    const FRAME: f64 = 0.016;

    #[derive(Default)]
    struct Recorder(Vec<OrbitSnapshot>);

    impl FieldSync for Recorder {
        fn sync_fields(&mut self, snapshot: &OrbitSnapshot) {
            self.0.push(*snapshot);
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(220.0, 220.0)
    }

    fn settle(views: &mut OrbitViews, form: &mut HostForm, mut now: f64) -> f64 {
        let mut frames = 0;
        while views.time_until_tick(now).is_some() {
            now += FRAME;
            views.poll(now, form);
            frames += 1;
            assert!(frames < 10_000, "animation did not settle");
        }
        now
    }

    #[test]
    fn southeast_drag_settles_and_mirrors_fields() {
        let mut form = HostForm::default();
        let mut views = OrbitViews::new(&EditorConfig::default());
        let g = views.top_down.geometry(viewport(), &form.state).unwrap();

        let press = g.corner(Corner::SouthEast);
        let pointer = g.center + Vector2::new(150.0, 50.0);
        assert!(views.top_down.handle_event(PointerEvent::Press(press), viewport(), &mut form.state, 0.0, &mut form.fields));
        views.top_down.handle_event(PointerEvent::Move(pointer), viewport(), &mut form.state, 0.0, &mut form.fields);
        views.top_down.handle_event(PointerEvent::Release, viewport(), &mut form.state, 0.0, &mut form.fields);

        // Releasing ends the gesture but not the animation.
        assert_eq!(views.top_down.interaction().active_handle(), None);
        assert!(views.top_down.scheduler().is_pending());
        assert_eq!(form.state.semi_major_axis(), 100.0);

        views.poll(FRAME, &mut form);
        assert_relative_eq!(form.state.semi_major_axis(), 110.0, epsilon = 1e-9);
        assert_eq!(form.fields.semi_major_axis_km, form.state.semi_major_axis());

        settle(&mut views, &mut form, FRAME);
        assert!((form.state.semi_major_axis() - 150.0).abs() <= 0.01);
        assert!((form.state.eccentricity() - 0.889).abs() <= 0.002);
        assert_eq!(form.fields.eccentricity, form.state.eccentricity());

        // The side view renders from the same state without its own copy.
        let side = views.side.geometry(viewport(), &form.state).unwrap();
        let top = views.top_down.geometry(viewport(), &form.state).unwrap();
        assert_eq!(side.ellipse, top.ellipse);
    }

    #[test]
    fn every_tick_syncs_fields() {
        let mut state = OrbitState::default();
        let mut view = OrbitView::new(TopDown, EditorConfig::default());
        let mut recorder = Recorder::default();
        let g = view.geometry(viewport(), &state).unwrap();
        view.handle_event(PointerEvent::Press(g.corner(Corner::NorthWest)), viewport(), &mut state, 0.0, &mut recorder);
        view.handle_event(PointerEvent::Move(g.center + Vector2::new(-60.0, -20.0)), viewport(), &mut state, 0.0, &mut recorder);
        assert!(recorder.0.is_empty());

        let mut now = 0.0;
        let mut ticks = 0;
        while view.scheduler().is_pending() {
            now += FRAME;
            if view.poll(now, &mut state, &mut recorder) {
                ticks += 1;
            }
        }
        assert_eq!(recorder.0.len(), ticks);
        assert_eq!(recorder.0.last().unwrap().semi_major_axis, state.semi_major_axis());
    }

    #[test]
    fn moves_without_a_grab_are_ignored() {
        let mut state = OrbitState::default();
        let mut view = OrbitView::new(TopDown, EditorConfig::default());
        let mut recorder = Recorder::default();
        let g = view.geometry(viewport(), &state).unwrap();
        assert!(!view.handle_event(PointerEvent::Press(g.center), viewport(), &mut state, 0.0, &mut recorder));
        view.handle_event(PointerEvent::Move(g.center + Vector2::new(30.0, 30.0)), viewport(), &mut state, 0.0, &mut recorder);
        assert!(!view.scheduler().is_pending());
        assert_eq!(state, OrbitState::default());
    }

    #[test]
    fn degenerate_viewport_skips_updates() {
        let mut state = OrbitState::default();
        let mut view = OrbitView::new(TopDown, EditorConfig::default());
        let mut recorder = Recorder::default();
        let g = view.geometry(viewport(), &state).unwrap();
        view.handle_event(PointerEvent::Press(g.corner(Corner::SouthEast)), viewport(), &mut state, 0.0, &mut recorder);
        view.handle_event(PointerEvent::Move(Point2::new(5.0, 5.0)), Viewport::new(0.0, 0.0), &mut state, 0.0, &mut recorder);
        assert!(!view.scheduler().is_pending());
    }

    #[test]
    fn pan_commits_pixel_delta_immediately() {
        let mut state = OrbitState::default();
        state.set_semi_major_axis(12_345.0);
        let mut view = OrbitView::new(TopDown, EditorConfig::default());
        let mut recorder = Recorder::default();
        let g = view.geometry(viewport(), &state).unwrap();
        let on_path = g.center + Vector2::new(0.0, 90.0);
        view.handle_event(PointerEvent::Press(on_path), viewport(), &mut state, 0.0, &mut recorder);
        assert_eq!(view.interaction().active_handle(), Some(Handle::PanBody));
        view.handle_event(PointerEvent::Move(on_path + Vector2::new(20.0, -10.0)), viewport(), &mut state, 0.0, &mut recorder);

        assert_eq!(state.center_offset, Vector2::new(20.0, -10.0));
        assert_eq!(recorder.0.len(), 1);
        assert!(!view.scheduler().is_pending());
    }

    #[test]
    fn drag_toward_center_keeps_axis_positive() {
        let mut form = HostForm::default();
        let mut views = OrbitViews::new(&EditorConfig::default());
        let g = views.top_down.geometry(viewport(), &form.state).unwrap();
        views.top_down.handle_event(PointerEvent::Press(g.corner(Corner::SouthWest)), viewport(), &mut form.state, 0.0, &mut form.fields);
        views.top_down.handle_event(PointerEvent::Move(g.center), viewport(), &mut form.state, 0.0, &mut form.fields);
        settle(&mut views, &mut form, 0.0);
        assert!(form.state.semi_major_axis() >= MIN_SEMI_MAJOR_AXIS);
        assert!(views.top_down.geometry(viewport(), &form.state).is_some());
    }

    #[test]
    fn side_drag_animates_inclination_only() {
        let mut form = HostForm::default();
        let mut views = OrbitViews::new(&EditorConfig::default());
        let g = views.side.geometry(viewport(), &form.state).unwrap();
        let handle = g.inclination_handle();
        let top = Point2::new(handle.x, g.center.y - g.ellipse.semi_minor_px);
        views.side.handle_event(PointerEvent::Press(handle), viewport(), &mut form.state, 0.0, &mut form.fields);
        views.side.handle_event(PointerEvent::Move(top), viewport(), &mut form.state, 0.0, &mut form.fields);
        views.side.handle_event(PointerEvent::Release, viewport(), &mut form.state, 0.0, &mut form.fields);
        settle(&mut views, &mut form, 0.0);

        assert!((form.state.inclination_deg() - 90.0).abs() <= 0.01);
        assert_eq!(form.state.semi_major_axis(), 100.0);
        assert_eq!(form.fields.inclination_deg, form.state.inclination_deg());
    }

    #[test]
    fn repeated_field_push_schedules_nothing() {
        let mut form = HostForm::default();
        let views = OrbitViews::new(&EditorConfig::default());
        assert!(form.set_orbit_state(300.0, 0.2, 10.0, "Kerbol", "Eve"));
        let before = views.top_down.geometry(viewport(), &form.state).unwrap();
        assert!(!form.set_orbit_state(300.0, 0.2, 10.0, "Kerbol", "Eve"));
        let after = views.top_down.geometry(viewport(), &form.state).unwrap();

        assert_eq!(views.time_until_tick(0.0), None);
        assert_eq!(before.ellipse, after.ellipse);
        assert_eq!(before.center, after.center);
    }
}
