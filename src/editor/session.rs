use crate::geometry::{BufferPoint, BufferRect, DragRect};
use thiserror::Error;

pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Lifecycle of one interactive crop attempt. `Applied` and `Cancelled` are
/// terminal; a fresh session must be created for further cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Dragging,
    Ready,
    Applied,
    Cancelled,
}

impl SessionPhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Applied | Self::Cancelled)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid crop session action: {action} while {phase:?}")]
    InvalidAction {
        action: &'static str,
        phase: SessionPhase,
    },
}

/// State machine for a single crop selection: pointer-down anchors the
/// rectangle, pointer-move grows it (optionally ratio-constrained),
/// pointer-up freezes it until the user applies or cancels.
#[derive(Debug, Clone)]
pub struct CropSession {
    phase: SessionPhase,
    ratio: Option<f64>,
    anchor: Option<BufferPoint>,
    rect: Option<DragRect>,
}

impl CropSession {
    /// Starts a session in `Idle` with no rectangle. `ratio` is the optional
    /// width/height aspect constraint applied on every drag update.
    pub fn new(ratio: Option<f64>) -> Self {
        Self {
            phase: SessionPhase::Idle,
            ratio: ratio.filter(|r| *r > 0.0),
            anchor: None,
            rect: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn drag_rect(&self) -> Option<DragRect> {
        self.rect
    }

    /// The current selection in normalized form, if any.
    pub fn selection(&self) -> Option<BufferRect> {
        self.rect.map(|rect| rect.normalized())
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        tracing::warn!(phase = ?self.phase, action, "invalid crop session action");
        SessionError::InvalidAction {
            action,
            phase: self.phase,
        }
    }

    /// Anchors a new drag. Valid from `Idle` or `Ready`; a pointer-down in
    /// `Ready` discards the frozen rectangle and starts over.
    pub fn pointer_down(&mut self, at: BufferPoint) -> SessionResult<()> {
        match self.phase {
            SessionPhase::Idle | SessionPhase::Ready => {
                tracing::debug!(from = ?self.phase, x = at.x, y = at.y, "crop drag start");
                self.anchor = Some(at);
                self.rect = Some(DragRect::at_point(at));
                self.phase = SessionPhase::Dragging;
                Ok(())
            }
            _ => Err(self.invalid("pointer_down")),
        }
    }

    /// Updates the live rectangle from the current pointer position and
    /// returns it. Valid only while `Dragging`.
    pub fn pointer_move(&mut self, to: BufferPoint) -> SessionResult<DragRect> {
        if self.phase != SessionPhase::Dragging {
            return Err(self.invalid("pointer_move"));
        }
        let Some(anchor) = self.anchor else {
            return Err(self.invalid("pointer_move"));
        };

        let mut width = to.x - anchor.x;
        let mut height = to.y - anchor.y;
        if let Some(ratio) = self.ratio {
            (width, height) = constrain_delta(width, height, ratio);
        }

        let rect = DragRect::new(anchor.x, anchor.y, width, height);
        self.rect = Some(rect);
        Ok(rect)
    }

    /// Freezes the rectangle. Valid only while `Dragging`; pointer events no
    /// longer mutate the selection until the next pointer-down.
    pub fn pointer_up(&mut self) -> SessionResult<()> {
        if self.phase != SessionPhase::Dragging {
            return Err(self.invalid("pointer_up"));
        }
        tracing::debug!(rect = ?self.rect, "crop drag frozen");
        self.anchor = None;
        self.phase = SessionPhase::Ready;
        Ok(())
    }

    /// Marks the session as successfully applied. Valid only from `Ready`;
    /// the editor performs extraction before calling this.
    pub(crate) fn mark_applied(&mut self) -> SessionResult<()> {
        if self.phase != SessionPhase::Ready {
            return Err(self.invalid("apply"));
        }
        self.phase = SessionPhase::Applied;
        Ok(())
    }

    /// Discards the selection. Valid from any non-terminal phase; a no-op on
    /// terminal phases.
    pub fn cancel(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        tracing::debug!(from = ?self.phase, "crop session cancelled");
        self.anchor = None;
        self.rect = None;
        self.phase = SessionPhase::Cancelled;
    }
}

/// Applies the aspect constraint `ratio` (width/height) to a free drag
/// delta, deriving one axis from the other so the constrained rectangle
/// never exceeds the freely dragged extent on both axes. Signs of the
/// original deltas are preserved, so drag direction survives the constraint.
fn constrain_delta(dx: f64, dy: f64, ratio: f64) -> (f64, f64) {
    if dx.abs() > dy.abs() * ratio {
        ((dy * ratio).abs().copysign(dx), dy)
    } else {
        (dx, (dx / ratio).abs().copysign(dy))
    }
}
