use types::{
    CalendarConfig, ConflictKind, Room, RoomKind, TimetableEntry, ValidationResult,
};

/// Whether two slot spans on the same day share at least one slot.
fn spans_overlap(a_start: usize, a_dur: u8, b_start: usize, b_dur: u8) -> bool {
    a_start < b_start + b_dur as usize && b_start < a_start + a_dur as usize
}

/// The single source of truth for placement legality. Both the automatic
/// Slot Placer and the interactive editor call this; neither re-implements
/// any rule.
///
/// Checks, in order: grid bounds (day and slot exist, the span fits inside
/// one day), room kind, then per overlapping entry: room, faculty, and
/// schedulable-unit conflicts. `ignore` excludes one nominated entry, used
/// when re-validating an entry that is being moved.
pub fn validate_placement(
    schedule: &[TimetableEntry],
    candidate: &TimetableEntry,
    required_room: RoomKind,
    rooms: &[Room],
    calendar: &CalendarConfig,
    ignore: Option<&TimetableEntry>,
) -> ValidationResult {
    // a zero-length span would occupy nothing and conflict with nothing
    if candidate.duration == 0 {
        return ValidationResult::rejected(ConflictKind::Grid, None);
    }
    if calendar.day_index(&candidate.day).is_none() {
        return ValidationResult::rejected(ConflictKind::Grid, None);
    }
    let start = match calendar.slot_index(&candidate.time_slot) {
        Some(i) => i,
        None => return ValidationResult::rejected(ConflictKind::Grid, None),
    };
    if start + candidate.duration as usize > calendar.slots_per_day() {
        return ValidationResult::rejected(ConflictKind::Grid, None);
    }

    match rooms.iter().find(|r| r.room_number == candidate.room_number) {
        Some(room) if room.room_type == required_room => {}
        _ => return ValidationResult::rejected(ConflictKind::RoomType, None),
    }

    let unit = candidate.unit();
    for entry in schedule {
        if let Some(ignored) = ignore {
            if entry == ignored {
                continue;
            }
        }
        if entry.day != candidate.day {
            continue;
        }
        let Some(other_start) = calendar.slot_index(&entry.time_slot) else {
            continue;
        };
        if !spans_overlap(start, candidate.duration, other_start, entry.duration) {
            continue;
        }
        if entry.room_number == candidate.room_number {
            return ValidationResult::rejected(ConflictKind::Room, Some(entry.clone()));
        }
        if entry.faculty_name == candidate.faculty_name {
            return ValidationResult::rejected(ConflictKind::Faculty, Some(entry.clone()));
        }
        if entry.unit().conflicts_with(&unit) {
            return ValidationResult::rejected(ConflictKind::Unit, Some(entry.clone()));
        }
    }

    ValidationResult::ok()
}
