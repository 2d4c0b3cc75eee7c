use crate::conflict::validate_placement;
use thiserror::Error;
use types::{
    CalendarConfig, ConflictKind, EditRequest, EntrySelector, Room, RoomKind, TimetableEntry,
};

#[derive(Debug, Error)]
pub enum EditError {
    #[error("placement conflict: {kind:?}")]
    Conflict {
        kind: ConflictKind,
        conflicting: Option<TimetableEntry>,
    },
    #[error("swap is not legal in both directions")]
    InvalidSwap,
    #[error("no entry matches the selector")]
    NotFound,
}

/// An entry with a batch is a lab session; everything else is theory.
fn required_room_kind(entry: &TimetableEntry) -> RoomKind {
    if entry.batch.is_some() {
        RoomKind::Lab
    } else {
        RoomKind::Classroom
    }
}

fn conflict_err(res: types::ValidationResult) -> EditError {
    match res.conflict {
        Some(c) => EditError::Conflict {
            kind: c.kind,
            conflicting: c.conflicting,
        },
        None => EditError::Conflict {
            kind: ConflictKind::Grid,
            conflicting: None,
        },
    }
}

/// Applies one validated mutation and returns the new schedule. On any
/// rejection the input schedule is untouched; the returned error names the
/// specific conflict.
///
/// A move whose target cell already holds an entry for the same schedulable
/// unit becomes a swap, and the swap is validated in both directions: if
/// placing the displaced entry back at the source cell is illegal, the whole
/// edit is rejected.
pub fn apply_edit(
    schedule: &[TimetableEntry],
    edit: EditRequest,
    calendar: &CalendarConfig,
    rooms: &[Room],
) -> Result<Vec<TimetableEntry>, EditError> {
    match edit {
        EditRequest::Move { from, to_day, to_slot } => {
            apply_move(schedule, &from, to_day, to_slot, calendar, rooms)
        }
        EditRequest::Add { entry } => {
            let res = validate_placement(
                schedule,
                &entry,
                required_room_kind(&entry),
                rooms,
                calendar,
                None,
            );
            if !res.valid {
                return Err(conflict_err(res));
            }
            let mut next = schedule.to_vec();
            next.push(entry);
            Ok(next)
        }
        EditRequest::Clear { at } => {
            let idx = schedule
                .iter()
                .position(|e| at.matches(e))
                .ok_or(EditError::NotFound)?;
            let mut next = schedule.to_vec();
            next.remove(idx);
            Ok(next)
        }
    }
}

fn apply_move(
    schedule: &[TimetableEntry],
    from: &EntrySelector,
    to_day: types::Day,
    to_slot: types::SlotLabel,
    calendar: &CalendarConfig,
    rooms: &[Room],
) -> Result<Vec<TimetableEntry>, EditError> {
    let src_idx = schedule
        .iter()
        .position(|e| from.matches(e))
        .ok_or(EditError::NotFound)?;
    let source = &schedule[src_idx];

    let mut moved = source.clone();
    moved.day = to_day.clone();
    moved.time_slot = to_slot.clone();

    // A displaced occupant exists when the target cell holds an entry whose
    // schedulable unit overlaps the moved one.
    let occupant_idx = schedule.iter().position(|e| {
        e != source
            && e.day == to_day
            && e.time_slot == to_slot
            && e.unit().conflicts_with(&moved.unit())
    });

    match occupant_idx {
        None => {
            let res = validate_placement(
                schedule,
                &moved,
                required_room_kind(&moved),
                rooms,
                calendar,
                Some(source),
            );
            if !res.valid {
                return Err(conflict_err(res));
            }
            let mut next = schedule.to_vec();
            next[src_idx] = moved;
            Ok(next)
        }
        Some(occ_idx) => {
            let mut displaced = schedule[occ_idx].clone();
            displaced.day = source.day.clone();
            displaced.time_slot = source.time_slot.clone();

            // Validate both directions against the schedule with both
            // participants removed, plus the other participant's new cell.
            let mut rest: Vec<TimetableEntry> = schedule
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != src_idx && *i != occ_idx)
                .map(|(_, e)| e.clone())
                .collect();

            rest.push(displaced.clone());
            let forward = validate_placement(
                &rest,
                &moved,
                required_room_kind(&moved),
                rooms,
                calendar,
                None,
            );
            rest.pop();
            if !forward.valid {
                return Err(conflict_err(forward));
            }

            rest.push(moved.clone());
            let reverse = validate_placement(
                &rest,
                &displaced,
                required_room_kind(&displaced),
                rooms,
                calendar,
                None,
            );
            rest.pop();
            if !reverse.valid {
                return Err(EditError::InvalidSwap);
            }

            let mut next = schedule.to_vec();
            next[src_idx] = moved;
            next[occ_idx] = displaced;
            Ok(next)
        }
    }
}
