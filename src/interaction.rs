//! Drag and resize gestures on the calendar grid.
//!
//! An explicit state machine over abstract gesture events (start, move,
//! release, cancel), independent of any input-device API. The controller
//! only snaps times and emits persistence requests; it never reaches into
//! route optimization or auto-scheduling, which are user-invoked actions.

use chrono::NaiveDate;
use tracing::warn;
use uuid::Uuid;

use crate::defaults::MIN_APPOINTMENT_MINUTES;
use crate::grid::CalendarGrid;
use crate::persistence::AppointmentStore;
use crate::services::time_math::format_minutes;
use crate::types::AppointmentUpdate;

/// Which edge of an appointment block a resize gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Start,
    End,
}

/// An appointment's displayed slot on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub date: NaiveDate,
    pub start_minutes: i32,
    pub duration_minutes: i32,
}

impl Slot {
    pub fn end_minutes(&self) -> i32 {
        self.start_minutes + self.duration_minutes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureState {
    Idle,
    Dragging {
        appointment_id: Uuid,
        origin: Slot,
        /// Minutes between the pointer and the block's start at grab time,
        /// so the block does not jump under the cursor.
        grab_offset_minutes: i32,
    },
    Resizing {
        appointment_id: Uuid,
        edge: ResizeEdge,
        origin: Slot,
    },
}

/// A persistence request produced by a finished gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureCommit {
    pub appointment_id: Uuid,
    /// The slot the gesture produced (already displayed optimistically).
    pub slot: Slot,
    /// Pre-gesture slot to fall back to if the write fails.
    pub revert: Slot,
    pub update: AppointmentUpdate,
}

/// Stateful handler for one active gesture at a time.
pub struct InteractionController {
    grid: CalendarGrid,
    state: GestureState,
}

impl InteractionController {
    pub fn new(grid: CalendarGrid) -> Self {
        Self {
            grid,
            state: GestureState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    /// Start dragging an appointment block. Refused while a resize is in
    /// progress: the edge affordance wins over the block body.
    pub fn begin_drag(&mut self, appointment_id: Uuid, slot: Slot, pointer_px: f32) -> bool {
        if self.state != GestureState::Idle {
            return false;
        }
        let pointer_minutes = self.grid.time_at_pixel(pointer_px);
        self.state = GestureState::Dragging {
            appointment_id,
            origin: slot,
            grab_offset_minutes: pointer_minutes - slot.start_minutes,
        };
        true
    }

    /// Start resizing at one of the block's edges. Only from `Idle`.
    pub fn begin_resize(&mut self, appointment_id: Uuid, edge: ResizeEdge, slot: Slot) -> bool {
        if self.state != GestureState::Idle {
            return false;
        }
        self.state = GestureState::Resizing {
            appointment_id,
            edge,
            origin: slot,
        };
        true
    }

    /// Slot to display while the pointer moves (optimistic preview).
    /// Returns `None` when no gesture is active.
    pub fn preview(&self, pointer_date: NaiveDate, pointer_px: f32) -> Option<Slot> {
        match self.state {
            GestureState::Idle => None,
            GestureState::Dragging { origin, grab_offset_minutes, .. } => {
                Some(self.dragged_slot(origin, grab_offset_minutes, pointer_date, pointer_px))
            }
            GestureState::Resizing { edge, origin, .. } => {
                Some(self.resized_slot(origin, edge, pointer_px))
            }
        }
    }

    /// Finish the active gesture at the release position. Emits the
    /// persistence request; the controller returns to `Idle` either way.
    pub fn release(&mut self, pointer_date: NaiveDate, pointer_px: f32) -> Option<GestureCommit> {
        let state = std::mem::replace(&mut self.state, GestureState::Idle);
        match state {
            GestureState::Idle => None,
            GestureState::Dragging { appointment_id, origin, grab_offset_minutes } => {
                let slot = self.dragged_slot(origin, grab_offset_minutes, pointer_date, pointer_px);
                Some(Self::commit(appointment_id, origin, slot))
            }
            GestureState::Resizing { appointment_id, edge, origin } => {
                let slot = self.resized_slot(origin, edge, pointer_px);
                Some(Self::commit(appointment_id, origin, slot))
            }
        }
    }

    /// Abort the active gesture (escape). Returns the slot to restore so
    /// the optimistic preview can be reverted; no persistence request.
    pub fn cancel(&mut self) -> Option<Slot> {
        let state = std::mem::replace(&mut self.state, GestureState::Idle);
        match state {
            GestureState::Idle => None,
            GestureState::Dragging { origin, .. } | GestureState::Resizing { origin, .. } => {
                Some(origin)
            }
        }
    }

    fn dragged_slot(
        &self,
        origin: Slot,
        grab_offset_minutes: i32,
        pointer_date: NaiveDate,
        pointer_px: f32,
    ) -> Slot {
        let pointer_minutes = self.grid.time_at_pixel(pointer_px);
        let start = self.grid.snap_to_grid(pointer_minutes - grab_offset_minutes);
        Slot {
            date: pointer_date,
            start_minutes: start,
            // Moving never changes duration.
            duration_minutes: origin.duration_minutes,
        }
    }

    fn resized_slot(&self, origin: Slot, edge: ResizeEdge, pointer_px: f32) -> Slot {
        let pointer_minutes = self.grid.snap_to_grid(self.grid.time_at_pixel(pointer_px));
        match edge {
            // Start edge moves; end stays fixed.
            ResizeEdge::Start => {
                let start = pointer_minutes.min(origin.end_minutes() - MIN_APPOINTMENT_MINUTES);
                Slot {
                    date: origin.date,
                    start_minutes: start,
                    duration_minutes: origin.end_minutes() - start,
                }
            }
            // End edge moves; start stays fixed.
            ResizeEdge::End => {
                let end = pointer_minutes.max(origin.start_minutes + MIN_APPOINTMENT_MINUTES);
                Slot {
                    date: origin.date,
                    start_minutes: origin.start_minutes,
                    duration_minutes: end - origin.start_minutes,
                }
            }
        }
    }

    fn commit(appointment_id: Uuid, origin: Slot, slot: Slot) -> GestureCommit {
        let update = AppointmentUpdate {
            time: Some(format_minutes(slot.start_minutes)),
            end_time: Some(format_minutes(slot.end_minutes())),
            duration_minutes: Some(slot.duration_minutes),
            date: (slot.date != origin.date).then_some(slot.date),
        };
        GestureCommit {
            appointment_id,
            slot,
            revert: origin,
            update,
        }
    }
}

/// Write a finished gesture through the persistence collaborator.
///
/// Returns the slot the UI should display afterwards: the committed slot on
/// success, the pre-gesture slot when the write fails.
pub async fn persist_gesture(store: &dyn AppointmentStore, commit: &GestureCommit) -> Slot {
    match store
        .update_appointment(commit.appointment_id, &commit.update)
        .await
    {
        Ok(()) => commit.slot,
        Err(e) => {
            warn!(
                "Failed to persist gesture for {}: {e:#}; reverting",
                commit.appointment_id
            );
            commit.revert
        }
    }
}
