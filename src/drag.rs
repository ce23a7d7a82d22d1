//! Drag protocol for moving cards between columns.
//!
//! A pure state machine: feeding it an input yields the next state plus
//! at most one `MoveTask` effect. The caller (the board view) applies
//! effects through the task store; the machine itself never touches
//! storage, so an abandoned drag leaves no trace.

use uuid::Uuid;

use crate::task::Status;

/// Where an in-flight drag currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A card is grabbed but not over any column's drop region.
    Dragging { task: Uuid },
    /// A grabbed card is over a candidate column.
    Hovering { task: Uuid, column: Status },
}

impl DragState {
    /// The card being dragged, if any.
    pub fn dragged_task(&self) -> Option<Uuid> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { task } | DragState::Hovering { task, .. } => Some(*task),
        }
    }

    /// The candidate drop column, if one is hovered.
    pub fn hovered_column(&self) -> Option<Status> {
        match self {
            DragState::Hovering { column, .. } => Some(*column),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, DragState::Idle)
    }

    /// Advance the machine. Returns the next state and the move to
    /// apply, if this input completed a drop.
    pub fn step(self, input: DragInput) -> (DragState, Option<MoveTask>) {
        match (self, input) {
            // Grabbing replaces any drag already in flight.
            (_, DragInput::Grab(task)) => (DragState::Dragging { task }, None),

            (DragState::Dragging { task }, DragInput::EnterColumn(column))
            | (DragState::Hovering { task, .. }, DragInput::EnterColumn(column)) => {
                (DragState::Hovering { task, column }, None)
            }
            (DragState::Idle, DragInput::EnterColumn(_)) => (DragState::Idle, None),

            (DragState::Hovering { task, .. }, DragInput::LeaveColumn) => {
                (DragState::Dragging { task }, None)
            }
            (state, DragInput::LeaveColumn) => (state, None),

            (DragState::Hovering { task, column }, DragInput::Drop) => {
                (DragState::Idle, Some(MoveTask { task, to: column }))
            }
            // Dropping without a hovered column abandons the drag.
            (_, DragInput::Drop) => (DragState::Idle, None),

            (_, DragInput::Cancel) => (DragState::Idle, None),
        }
    }
}

/// Inputs the view feeds into the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragInput {
    Grab(Uuid),
    EnterColumn(Status),
    LeaveColumn,
    Drop,
    Cancel,
}

/// The single effect a completed drop produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTask {
    pub task: Uuid,
    pub to: Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grab_hover_drop_emits_one_move() {
        let task = Uuid::new_v4();
        let (state, effect) = DragState::Idle.step(DragInput::Grab(task));
        assert_eq!(state, DragState::Dragging { task });
        assert_eq!(effect, None);

        let (state, effect) = state.step(DragInput::EnterColumn(Status::Done));
        assert_eq!(
            state,
            DragState::Hovering {
                task,
                column: Status::Done
            }
        );
        assert_eq!(effect, None);

        let (state, effect) = state.step(DragInput::Drop);
        assert_eq!(state, DragState::Idle);
        assert_eq!(
            effect,
            Some(MoveTask {
                task,
                to: Status::Done
            })
        );
    }

    #[test]
    fn grab_replaces_an_active_drag() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let (state, _) = DragState::Idle.step(DragInput::Grab(first));
        let (state, _) = state.step(DragInput::EnterColumn(Status::Doing));
        let (state, effect) = state.step(DragInput::Grab(second));
        assert_eq!(state, DragState::Dragging { task: second });
        assert_eq!(effect, None);
    }

    #[test]
    fn hover_updates_follow_the_pointer() {
        let task = Uuid::new_v4();
        let (state, _) = DragState::Idle.step(DragInput::Grab(task));
        let (state, _) = state.step(DragInput::EnterColumn(Status::Todo));
        let (state, _) = state.step(DragInput::EnterColumn(Status::Doing));
        assert_eq!(state.hovered_column(), Some(Status::Doing));
    }

    #[test]
    fn leaving_a_column_keeps_the_drag_alive() {
        let task = Uuid::new_v4();
        let (state, _) = DragState::Idle.step(DragInput::Grab(task));
        let (state, _) = state.step(DragInput::EnterColumn(Status::Doing));
        let (state, effect) = state.step(DragInput::LeaveColumn);
        assert_eq!(state, DragState::Dragging { task });
        assert_eq!(effect, None);
        assert!(state.is_active());
    }

    #[test]
    fn drop_without_hover_abandons_without_effect() {
        let task = Uuid::new_v4();
        let (state, _) = DragState::Idle.step(DragInput::Grab(task));
        let (state, effect) = state.step(DragInput::Drop);
        assert_eq!(state, DragState::Idle);
        assert_eq!(effect, None);
    }

    #[test]
    fn cancel_always_returns_to_idle() {
        let task = Uuid::new_v4();
        let (state, _) = DragState::Idle.step(DragInput::Grab(task));
        let (state, _) = state.step(DragInput::EnterColumn(Status::Done));
        let (state, effect) = state.step(DragInput::Cancel);
        assert_eq!(state, DragState::Idle);
        assert_eq!(effect, None);
        assert_eq!(state.dragged_task(), None);
    }

    #[test]
    fn stray_inputs_while_idle_are_ignored() {
        let (state, effect) = DragState::Idle.step(DragInput::EnterColumn(Status::Todo));
        assert_eq!(state, DragState::Idle);
        assert_eq!(effect, None);

        let (state, effect) = DragState::Idle.step(DragInput::Drop);
        assert_eq!(state, DragState::Idle);
        assert_eq!(effect, None);

        let (state, effect) = DragState::Idle.step(DragInput::LeaveColumn);
        assert_eq!(state, DragState::Idle);
        assert_eq!(effect, None);
    }
}
