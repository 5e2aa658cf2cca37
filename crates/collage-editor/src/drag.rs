//! Drag tool: the interaction state machine.
//!
//! Translates a pointer gesture on one image into `CanvasMutation`s that the
//! `FloatingCanvas` applies live. The grabbed part decides the mode:
//!
//! | Grabbed | Mode | Effect of pointer delta `(dx, dy)` |
//! |---------|------|------------------------------------|
//! | body | `Move` | position = start position + delta |
//! | rotate handle | `Rotate` | rotation = start rotation + swept angle about the start center |
//! | corner handle | `Resize(corner)` | width ± dx, height from aspect, opposite corner pinned |
//!
//! All geometry is computed from the snapshot taken at pointer-down, never
//! from the previous move, so rounding does not accumulate.

use crate::canvas::CanvasMutation;
use crate::input::InputEvent;
use collage_core::id::ImageId;
use collage_core::model::{Corner, Geometry};
use kurbo::Point;
use serde::Serialize;
use smallvec::{SmallVec, smallvec};
use std::f64::consts::{PI, TAU};

/// What a drag gesture does. New handle kinds are added here and matched
/// exhaustively in [`DragTool::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DragMode {
    Move,
    Rotate,
    Resize(Corner),
}

/// The image and part under the pointer at pointer-down, with its geometry
/// at that instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grab {
    pub id: ImageId,
    pub mode: DragMode,
    pub geometry: Geometry,
}

/// Bookkeeping for the gesture in progress. Not rendered; reset on release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub id: ImageId,
    pub mode: DragMode,
    /// Pointer position at pointer-down.
    pub start: Point,
    /// Image geometry at pointer-down.
    pub initial: Geometry,
    /// Rotation pivot, fixed at the initial center for the whole gesture.
    pivot: Point,
    /// Angle of the pointer about `pivot` at the last move, radians.
    last_angle: f64,
    /// Total angle swept since pointer-down, unwrapped across ±π.
    swept: f64,
}

impl DragSession {
    fn new(grab: Grab, start: Point) -> Self {
        let pivot = grab.geometry.center();
        Self {
            id: grab.id,
            mode: grab.mode,
            start,
            initial: grab.geometry,
            pivot,
            last_angle: (start - pivot).atan2(),
            swept: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging(DragSession),
}

pub type Mutations = SmallVec<[CanvasMutation; 2]>;

#[derive(Debug, Default)]
pub struct DragTool {
    state: Interaction,
}

impl DragTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Interaction {
        &self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            Interaction::Dragging(session) => Some(session),
            Interaction::Idle => None,
        }
    }

    pub fn active_id(&self) -> Option<ImageId> {
        self.session().map(|s| s.id)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, Interaction::Dragging(_))
    }

    /// Drop any gesture in progress without emitting mutations.
    pub fn cancel(&mut self) {
        if let Interaction::Dragging(session) = self.state {
            log::debug!("drag cancelled on {}", session.id);
        }
        self.state = Interaction::Idle;
    }

    /// Handle an input event. `grab` is only consulted on pointer-down.
    pub fn handle(&mut self, event: &InputEvent, grab: Option<Grab>) -> Mutations {
        if event.ends_gesture() {
            if let Interaction::Dragging(session) = self.state {
                log::debug!("drag end on {}", session.id);
            }
            self.state = Interaction::Idle;
            return SmallVec::new();
        }
        match event {
            InputEvent::PointerDown { x, y } => match grab {
                // Last pointer-down wins; a gesture already in flight is replaced.
                Some(grab) => {
                    let session = DragSession::new(grab, Point::new(*x, *y));
                    log::debug!("drag start {:?} on {}", session.mode, session.id);
                    self.state = Interaction::Dragging(session);
                    smallvec![CanvasMutation::BringToFront { id: grab.id }]
                }
                None => {
                    self.state = Interaction::Idle;
                    SmallVec::new()
                }
            },
            InputEvent::PointerMove { x, y } => match &mut self.state {
                Interaction::Dragging(session) => {
                    smallvec![drag_to(session, Point::new(*x, *y))]
                }
                Interaction::Idle => SmallVec::new(),
            },
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave | InputEvent::PointerCancel => {
                SmallVec::new()
            }
        }
    }
}

fn drag_to(session: &mut DragSession, pointer: Point) -> CanvasMutation {
    let delta = pointer - session.start;
    let id = session.id;
    match session.mode {
        DragMode::Move => CanvasMutation::SetPosition {
            id,
            position: session.initial.position + delta,
        },
        DragMode::Rotate => {
            let angle = (pointer - session.pivot).atan2();
            session.swept += wrap_angle(angle - session.last_angle);
            session.last_angle = angle;
            CanvasMutation::SetRotation {
                id,
                degrees: session.initial.rotation_degrees + session.swept.to_degrees(),
            }
        }
        DragMode::Resize(corner) => {
            let dw = if corner.is_left() { -delta.x } else { delta.x };
            CanvasMutation::SetWidth {
                id,
                width: session.initial.size.width + dw,
                anchor: corner.opposite(),
            }
        }
    }
}

/// Fold an angle difference into `(-π, π]`.
fn wrap_angle(mut a: f64) -> f64 {
    while a > PI {
        a -= TAU;
    }
    while a <= -PI {
        a += TAU;
    }
    a
}
