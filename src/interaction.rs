//! Pointer gestures on an orbit view.
//!
//! A gesture is `Press → Move* → Release`. Pressing on a handle opens a
//! `DragSession`; releasing drops it. The session holds the grabbed handle
//! and the last pointer position, never the committed orbit.

use crate::geometry::Corner;
use crate::smoothing::OrbitTarget;
use nalgebra::{Point2, Vector2};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Handle {
    Corner(Corner),
    Inclination,
    /// The orbit path itself, grabbed to pan the whole drawing.
    PanBody,
}

impl Handle {
    pub fn label(&self) -> &'static str {
        match self {
            Handle::Corner(corner) => corner.label(),
            Handle::Inclination => "inclination",
            Handle::PanBody => "orbit path",
        }
    }
}

/// Pointer positions are relative to the view's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Press(Point2<f64>),
    Move(Point2<f64>),
    Release,
}

/// What one pointer move asks of the orbit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragUpdate {
    Retarget(OrbitTarget),
    /// Pixel translation applied to the center offset as-is.
    Pan(Vector2<f64>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub handle: Handle,
    /// Pointer position of the previous event in this gesture.
    pub anchor: Point2<f64>,
}

impl DragSession {
    pub fn new(handle: Handle, anchor: Point2<f64>) -> Self {
        Self { handle, anchor }
    }

    pub fn pointer_delta(&self, pointer: Point2<f64>) -> Vector2<f64> {
        pointer - self.anchor
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl Interaction {
    pub fn active_handle(&self) -> Option<Handle> {
        match self {
            Interaction::Idle => None,
            Interaction::Dragging(session) => Some(session.handle),
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut DragSession> {
        match self {
            Interaction::Idle => None,
            Interaction::Dragging(session) => Some(session),
        }
    }

    pub fn begin(&mut self, handle: Handle, pointer: Point2<f64>) {
        *self = Interaction::Dragging(DragSession::new(handle, pointer));
    }

    /// Ends the gesture, returning the session that was open.
    pub fn end(&mut self) -> Option<DragSession> {
        match std::mem::take(self) {
            Interaction::Idle => None,
            Interaction::Dragging(session) => Some(session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_lifecycle() {
        let mut interaction = Interaction::default();
        assert_eq!(interaction.active_handle(), None);
        assert!(interaction.end().is_none());

        interaction.begin(Handle::Corner(Corner::SouthEast), Point2::new(4.0, 5.0));
        assert_eq!(interaction.active_handle(), Some(Handle::Corner(Corner::SouthEast)));

        let session = interaction.session_mut().unwrap();
        assert_eq!(session.pointer_delta(Point2::new(10.0, 1.0)), Vector2::new(6.0, -4.0));

        let ended = interaction.end().unwrap();
        assert_eq!(ended.handle, Handle::Corner(Corner::SouthEast));
        assert_eq!(interaction, Interaction::Idle);
    }
}
