use tracing::debug;
use tt_core::conflict::validate_placement;
use types::{
    AllocationEntry, BlockId, CalendarConfig, Room, RoomKind, TimetableEntry,
};

#[derive(Clone, Debug, Default)]
pub struct Placement {
    pub timetable: Vec<TimetableEntry>,
    pub unassigned_blocks: Vec<BlockId>,
}

/// Greedy slot assignment. Blocks are taken longest first so double labs are
/// not starved by single hours, and each block gets the first legal
/// (day, start slot, room) in soft-preference order. Placed blocks are never
/// revisited to make room for a stuck one; a stuck block is reported in
/// `unassigned_blocks` instead.
pub fn place(blocks: &[AllocationEntry], rooms: &[Room], calendar: &CalendarConfig) -> Placement {
    let mut order: Vec<usize> = (0..blocks.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(blocks[i].duration));

    let mut timetable: Vec<TimetableEntry> = Vec::new();
    let mut unassigned_blocks: Vec<BlockId> = Vec::new();

    for &bi in &order {
        let block = &blocks[bi];
        let duration = block.duration as usize;
        if duration == 0 || duration > calendar.slots_per_day() {
            unassigned_blocks.push(block.id.clone());
            continue;
        }
        let max_start = calendar.slots_per_day() - duration;

        let mut candidates: Vec<(u8, usize, usize, usize)> = Vec::new();
        for di in 0..calendar.working_days.len() {
            for si in 0..=max_start {
                let penalty = soft_penalty(block, di, si, calendar, &timetable);
                for (ri, room) in rooms.iter().enumerate() {
                    if room.room_type != block.room_type {
                        continue;
                    }
                    candidates.push((penalty, di, si, ri));
                }
            }
        }
        candidates.sort_by_key(|&(p, di, si, ri)| (p, di, si, ri));

        let mut placed = false;
        for &(_, di, si, ri) in &candidates {
            let candidate = TimetableEntry {
                subject_code: block.subject_code.clone(),
                faculty_name: block.faculty_name.clone(),
                room_number: rooms[ri].room_number.clone(),
                division_name: block.division_name.clone(),
                batch: block.batch,
                day: calendar.working_days[di].clone(),
                time_slot: calendar.time_slots[si].clone(),
                duration: block.duration,
            };
            let res = validate_placement(
                &timetable,
                &candidate,
                block.room_type,
                rooms,
                calendar,
                None,
            );
            if res.valid {
                timetable.push(candidate);
                placed = true;
                break;
            }
        }

        if !placed {
            debug!(block = %block.id, subject = %block.subject_code, "no legal slot");
            unassigned_blocks.push(block.id.clone());
        }
    }

    Placement {
        timetable,
        unassigned_blocks,
    }
}

/// Tie-break score for a candidate start. Lower is better; hard rules are
/// not decided here.
fn soft_penalty(
    block: &AllocationEntry,
    day_idx: usize,
    start: usize,
    calendar: &CalendarConfig,
    timetable: &[TimetableEntry],
) -> u8 {
    let mut penalty = 0u8;
    let span = start..start + block.duration as usize;

    if block.room_type == RoomKind::Lab
        && calendar.prefer_afternoon_labs
        && span.clone().any(|i| !calendar.is_afternoon(i))
    {
        penalty += 1;
    }

    if block.room_type == RoomKind::Classroom {
        let day = &calendar.working_days[day_idx];
        let clustered = timetable.iter().any(|e| {
            e.batch.is_none()
                && e.day == *day
                && e.subject_code == block.subject_code
                && e.division_name == block.division_name
                && calendar.slot_index(&e.time_slot).is_some_and(|es| {
                    let e_end = es + e.duration as usize;
                    // touching spans: existing ends where the candidate
                    // starts, or vice versa
                    e_end == span.start || span.end == es
                })
        });
        if clustered {
            penalty += 1;
        }
    }

    penalty
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{BlockId, Day, RoomNumber, SchedulableUnit, SlotLabel, SubjectCode};

    fn calendar(prefer_afternoon_labs: bool) -> CalendarConfig {
        CalendarConfig {
            working_days: vec![Day("Monday".into()), Day("Tuesday".into())],
            time_slots: vec![
                SlotLabel("09:00-10:00".into()),
                SlotLabel("10:00-11:00".into()),
                SlotLabel("11:00-12:00".into()),
                SlotLabel("13:00-14:00".into()),
                SlotLabel("14:00-15:00".into()),
            ],
            afternoon_start: 3,
            prefer_afternoon_labs,
        }
    }

    fn rooms() -> Vec<Room> {
        vec![
            Room {
                room_number: RoomNumber("101".into()),
                room_type: RoomKind::Classroom,
                capacity: 60,
                building: "Main".into(),
            },
            Room {
                room_number: RoomNumber("L1".into()),
                room_type: RoomKind::Lab,
                capacity: 30,
                building: "Annex".into(),
            },
        ]
    }

    fn theory_block(id: &str, subject: &str, division: &str, faculty: &str) -> AllocationEntry {
        AllocationEntry {
            id: BlockId(id.into()),
            subject_code: SubjectCode(subject.into()),
            subject_name: format!("{subject} name"),
            faculty_name: faculty.into(),
            division_name: division.into(),
            batch: None,
            room_type: RoomKind::Classroom,
            unit: SchedulableUnit::Division {
                division: division.into(),
            },
            duration: 1,
        }
    }

    fn lab_block(
        id: &str,
        subject: &str,
        division: &str,
        batch: u8,
        faculty: &str,
        duration: u8,
    ) -> AllocationEntry {
        AllocationEntry {
            id: BlockId(id.into()),
            subject_code: SubjectCode(subject.into()),
            subject_name: format!("{subject} name"),
            faculty_name: faculty.into(),
            division_name: division.into(),
            batch: Some(batch),
            room_type: RoomKind::Lab,
            unit: SchedulableUnit::Batch {
                division: division.into(),
                batch,
            },
            duration,
        }
    }

    #[test]
    fn places_single_block_at_first_cell() {
        let p = place(
            &[theory_block("b1", "DSA", "CE-SE-A", "Smith")],
            &rooms(),
            &calendar(false),
        );
        assert!(p.unassigned_blocks.is_empty());
        assert_eq!(p.timetable[0].day.0, "Monday");
        assert_eq!(p.timetable[0].time_slot.0, "09:00-10:00");
        assert_eq!(p.timetable[0].room_number.0, "101");
    }

    #[test]
    fn double_lab_occupies_consecutive_slots() {
        let p = place(
            &[lab_block("b1", "OSL", "CE-SE-A", 1, "Jones", 2)],
            &rooms(),
            &calendar(false),
        );
        let e = &p.timetable[0];
        assert_eq!(e.duration, 2);
        assert_eq!(e.room_number.0, "L1");
        // span must fit the grid, regardless of where it starts
        let cal = calendar(false);
        let start = cal.slot_index(&e.time_slot).unwrap();
        assert!(start + 2 <= cal.slots_per_day());
    }

    #[test]
    fn afternoon_preference_steers_labs_past_lunch() {
        let p = place(
            &[lab_block("b1", "OSL", "CE-SE-A", 1, "Jones", 2)],
            &rooms(),
            &calendar(true),
        );
        let cal = calendar(true);
        let start = cal.slot_index(&p.timetable[0].time_slot).unwrap();
        assert!(cal.is_afternoon(start));
        assert_eq!(p.timetable[0].day.0, "Monday");
    }

    #[test]
    fn theory_hours_of_one_subject_avoid_adjacent_slots() {
        let p = place(
            &[
                theory_block("b1", "DSA", "CE-SE-A", "Smith"),
                theory_block("b2", "DSA", "CE-SE-A", "Smith"),
            ],
            &rooms(),
            &calendar(false),
        );
        assert!(p.unassigned_blocks.is_empty());
        let cal = calendar(false);
        let (a, b) = (&p.timetable[0], &p.timetable[1]);
        if a.day == b.day {
            let sa = cal.slot_index(&a.time_slot).unwrap();
            let sb = cal.slot_index(&b.time_slot).unwrap();
            assert!(sa.abs_diff(sb) > 1, "same-subject theory placed adjacent");
        }
    }

    #[test]
    fn sibling_batches_share_a_slot_but_not_a_room() {
        let mut rs = rooms();
        rs.push(Room {
            room_number: RoomNumber("L2".into()),
            room_type: RoomKind::Lab,
            capacity: 30,
            building: "Annex".into(),
        });
        let p = place(
            &[
                lab_block("b1", "OSL", "CE-SE-A", 1, "Jones", 2),
                lab_block("b2", "DBL", "CE-SE-A", 2, "Patel", 2),
            ],
            &rs,
            &calendar(false),
        );
        assert!(p.unassigned_blocks.is_empty());
        let (a, b) = (&p.timetable[0], &p.timetable[1]);
        assert_eq!(a.day, b.day);
        assert_eq!(a.time_slot, b.time_slot);
        assert_ne!(a.room_number, b.room_number);
    }

    #[test]
    fn stuck_blocks_are_reported_not_dropped_silently() {
        // One classroom, two divisions, but the same instructor everywhere:
        // a tiny one-day grid cannot hold all five hours.
        let cal = CalendarConfig {
            working_days: vec![Day("Monday".into())],
            time_slots: vec![
                SlotLabel("09:00-10:00".into()),
                SlotLabel("10:00-11:00".into()),
            ],
            afternoon_start: 2,
            prefer_afternoon_labs: false,
        };
        let blocks: Vec<_> = (0..3)
            .map(|i| theory_block(&format!("b{i}"), "DSA", &format!("CE-SE-{i}"), "Smith"))
            .collect();
        let p = place(&blocks, &rooms(), &cal);
        assert_eq!(p.timetable.len(), 2);
        assert_eq!(p.unassigned_blocks.len(), 1);
    }
}
