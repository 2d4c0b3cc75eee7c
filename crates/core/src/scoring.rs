use std::collections::HashMap;
use types::{CalendarConfig, TimetableEntry};

/// Soft-quality accounting for a schedule. None of these are hard failures;
/// the placer uses them as tie-breaks and callers surface them for review.
#[derive(Clone, Debug, Default)]
pub struct SoftScores {
    /// Lab sessions with at least one occupied slot before the afternoon.
    pub labs_outside_afternoon: i64,
    /// Same-subject theory hours sitting in adjacent slots of one day for
    /// the same division.
    pub adjacent_theory_pairs: i64,
    /// Assigned hours per faculty name, summed across the schedule.
    pub faculty_load: HashMap<String, u32>,
    pub objective: i64,
}

pub fn compute_soft_scores(calendar: &CalendarConfig, timetable: &[TimetableEntry]) -> SoftScores {
    let is_lab_session = |e: &TimetableEntry| e.batch.is_some();

    let mut labs_outside_afternoon = 0i64;
    let mut faculty_load: HashMap<String, u32> = HashMap::new();

    for e in timetable {
        *faculty_load.entry(e.faculty_name.clone()).or_default() += e.duration as u32;

        if is_lab_session(e) {
            if let Some(start) = calendar.slot_index(&e.time_slot) {
                let any_morning =
                    (start..start + e.duration as usize).any(|i| !calendar.is_afternoon(i));
                if any_morning {
                    labs_outside_afternoon += 1;
                }
            }
        }
    }

    let mut adjacent_theory_pairs = 0i64;
    for (i, a) in timetable.iter().enumerate() {
        if is_lab_session(a) {
            continue;
        }
        let Some(sa) = calendar.slot_index(&a.time_slot) else {
            continue;
        };
        for b in &timetable[i + 1..] {
            if is_lab_session(b)
                || b.day != a.day
                || b.subject_code != a.subject_code
                || b.division_name != a.division_name
            {
                continue;
            }
            let Some(sb) = calendar.slot_index(&b.time_slot) else {
                continue;
            };
            if sa.abs_diff(sb) == 1 {
                adjacent_theory_pairs += 1;
            }
        }
    }

    let objective = labs_outside_afternoon + adjacent_theory_pairs;
    SoftScores {
        labs_outside_afternoon,
        adjacent_theory_pairs,
        faculty_load,
        objective,
    }
}
