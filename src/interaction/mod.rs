use serde::{Deserialize, Serialize};

/// Pointer sample forwarded by the host, in surface-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    /// Pressed-button bitmask as reported by the host (bit 0 = primary).
    pub buttons: u8,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(x: f64, y: f64, buttons: u8) -> Self {
        Self { x, y, buttons }
    }
}

/// Wheel sample forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub dx: f64,
    pub dy: f64,
}

impl WheelEvent {
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Closed set of interaction events fanned out by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerMove(PointerEvent),
    PointerDown(PointerEvent),
    PointerUp(PointerEvent),
    PointerLeave,
    Wheel(WheelEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    PointerMove,
    PointerDown,
    PointerUp,
    PointerLeave,
    Wheel,
}

impl InputEvent {
    #[must_use]
    pub fn kind(self) -> EventKind {
        match self {
            Self::PointerMove(_) => EventKind::PointerMove,
            Self::PointerDown(_) => EventKind::PointerDown,
            Self::PointerUp(_) => EventKind::PointerUp,
            Self::PointerLeave => EventKind::PointerLeave,
            Self::Wheel(_) => EventKind::Wheel,
        }
    }
}

/// Scroll interaction modes for an axis drag.
///
/// The zoom-drag slots are dormant: no input path arms them, pointer drags
/// always pan. They stay reserved until the intended zoom gesture is
/// decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScrollMode {
    #[default]
    Pan,
    ZoomX,
    ZoomY,
}

/// Per-axis drag tracking: armed by pointer-down, fed pixel deltas by
/// pointer-move, disarmed by pointer-up/leave.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragState {
    pub armed: bool,
    pub mode: ScrollMode,
    last_x: f64,
    last_y: f64,
}

impl DragState {
    pub fn arm(&mut self, x: f64, y: f64) {
        self.armed = true;
        self.mode = ScrollMode::Pan;
        self.last_x = x;
        self.last_y = y;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Advances the drag anchor and returns the pixel delta since the
    /// previous move, or `None` when not armed.
    pub fn advance(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !self.armed {
            return None;
        }
        let delta = (x - self.last_x, y - self.last_y);
        self.last_x = x;
        self.last_y = y;
        Some(delta)
    }
}

/// Raw pointer position tracked for crosshair drawing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CursorState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
}

impl CursorState {
    pub fn on_pointer_move(&mut self, event: PointerEvent) {
        self.visible = true;
        self.x = event.x;
        self.y = event.y;
    }

    pub fn on_pointer_leave(&mut self) {
        self.visible = false;
    }
}
