use std::collections::HashMap;
use tracing::debug;
use types::{AllocatableUnit, AllocationEntry, BlockId, Faculty, SessionKind};

#[derive(Clone, Debug, Default)]
pub struct Allocation {
    pub blocks: Vec<AllocationEntry>,
    pub unassigned_units: Vec<AllocatableUnit>,
}

/// Assigns a qualified faculty member to every unit it can, then folds
/// consecutive lab hours of one unit group into contiguous blocks. Workload
/// and sticky-assignment state are explicit accumulators local to this fold;
/// nothing survives between runs, and identical inputs give identical output.
///
/// Lab hours scan faculty in lab priority order (lab-preferring staff first,
/// then junior designations). Theory hours scan the other way around, so lab
/// staff are kept free for labs. Theory hours never merge into multi-hour
/// blocks; the placer must be able to spread them across days.
pub fn allocate(units: &[AllocatableUnit], faculty: &[Faculty]) -> Allocation {
    let mut lab_order: Vec<usize> = (0..faculty.len()).collect();
    lab_order.sort_by_key(|&i| (!faculty[i].prefer_labs, faculty[i].designation.lab_rank(), i));

    let mut theory_order: Vec<usize> = (0..faculty.len()).collect();
    theory_order.sort_by_key(|&i| (faculty[i].prefer_labs, i));

    let mut remaining: Vec<u8> = faculty.iter().map(|f| f.max_weekly_hours).collect();
    let mut sticky: HashMap<String, usize> = HashMap::new();
    let mut open_lab_block: HashMap<String, usize> = HashMap::new();
    let mut group_seq: HashMap<String, u32> = HashMap::new();

    let mut blocks: Vec<AllocationEntry> = Vec::new();
    let mut unassigned_units: Vec<AllocatableUnit> = Vec::new();

    for u in units {
        let order = match u.kind {
            SessionKind::Lab => &lab_order,
            SessionKind::Theory => &theory_order,
        };

        let chosen = sticky
            .get(&u.group)
            .copied()
            .filter(|&i| remaining[i] >= 1)
            .or_else(|| {
                order
                    .iter()
                    .copied()
                    .find(|&i| faculty[i].is_qualified(&u.subject_code) && remaining[i] >= 1)
            });

        let Some(fi) = chosen else {
            debug!(subject = %u.subject_code, unit = %u.unit, "no qualified faculty with capacity");
            unassigned_units.push(u.clone());
            continue;
        };

        remaining[fi] -= 1;
        sticky.insert(u.group.clone(), fi);
        let faculty_name = faculty[fi].faculty_name.clone();

        if u.kind == SessionKind::Lab {
            if let Some(&bi) = open_lab_block.get(&u.group) {
                if blocks[bi].faculty_name == faculty_name {
                    blocks[bi].duration += 1;
                    continue;
                }
            }
        }

        let seq = group_seq
            .entry(u.group.clone())
            .and_modify(|s| *s += 1)
            .or_insert(1);
        blocks.push(AllocationEntry {
            id: BlockId(format!("{}#{}", u.group, seq)),
            subject_code: u.subject_code.clone(),
            subject_name: u.subject_name.clone(),
            faculty_name,
            division_name: u.division_name.clone(),
            batch: u.batch,
            room_type: u.kind.required_room_kind(),
            unit: u.unit.clone(),
            duration: 1,
        });
        if u.kind == SessionKind::Lab {
            open_lab_block.insert(u.group.clone(), blocks.len() - 1);
        }
    }

    Allocation {
        blocks,
        unassigned_units,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose::decompose;
    use types::{
        Designation, Division, FacultyId, RoomKind, SubjectCode, SubjectKind, SubjectRequirement,
    };

    fn subject(code: &str, theory: u8, practical: u8) -> SubjectRequirement {
        SubjectRequirement {
            subject_code: SubjectCode(code.into()),
            subject_name: format!("{code} name"),
            branch: "CE".into(),
            year: "SE".into(),
            semester: "III".into(),
            theory_hours_per_week: theory,
            practical_hours_per_week: practical,
            kind: if practical > 0 {
                SubjectKind::Lab
            } else {
                SubjectKind::Core
            },
        }
    }

    fn division(name: &str, batches: u8) -> Division {
        Division {
            branch: "CE".into(),
            year: "SE".into(),
            semester: "III".into(),
            division_name: name.into(),
            number_of_batches: batches,
            student_count: 60,
        }
    }

    fn member(
        name: &str,
        designation: Designation,
        max_hours: u8,
        prefer_labs: bool,
        codes: &[&str],
    ) -> Faculty {
        Faculty {
            faculty_name: name.into(),
            employee_id: FacultyId(name.into()),
            designation,
            max_weekly_hours: max_hours,
            qualified_subjects: codes.iter().map(|c| SubjectCode(c.to_string())).collect(),
            prefer_labs,
        }
    }

    #[test]
    fn labs_go_to_lab_preferring_staff_theory_to_the_rest() {
        let units = decompose(&[subject("DSA", 3, 2)], &[division("A", 2)]);
        let smith = member("Dr. Smith", Designation::Professor, 18, false, &["DSA"]);
        let jones = member("TA Jones", Designation::TeachingAssistant, 10, true, &["DSA"]);
        let alloc = allocate(&units, &[smith, jones]);

        assert!(alloc.unassigned_units.is_empty());
        let theory: Vec<_> = alloc
            .blocks
            .iter()
            .filter(|b| b.room_type == RoomKind::Classroom)
            .collect();
        let labs: Vec<_> = alloc
            .blocks
            .iter()
            .filter(|b| b.room_type == RoomKind::Lab)
            .collect();
        assert_eq!(theory.len(), 3);
        assert!(theory.iter().all(|b| b.faculty_name == "Dr. Smith"));
        assert!(theory.iter().all(|b| b.duration == 1));
        assert_eq!(labs.len(), 2);
        assert!(labs.iter().all(|b| b.faculty_name == "TA Jones"));
        assert!(labs.iter().all(|b| b.duration == 2));
    }

    #[test]
    fn consecutive_lab_hours_merge_into_one_block() {
        let units = decompose(&[subject("OSL", 0, 2)], &[division("A", 1)]);
        let alloc = allocate(
            &units,
            &[member("TA Jones", Designation::TeachingAssistant, 10, true, &["OSL"])],
        );
        assert_eq!(alloc.blocks.len(), 1);
        assert_eq!(alloc.blocks[0].duration, 2);
        assert_eq!(alloc.blocks[0].unit.to_string(), "CE-SE-A_B1");
    }

    #[test]
    fn sticky_assignment_keeps_one_instructor_per_group() {
        let units = decompose(&[subject("DSA", 3, 0)], &[division("A", 1)]);
        // Both are equally qualified; once the first hour lands on one of
        // them, the rest of the group follows.
        let a = member("Dr. A", Designation::Professor, 18, false, &["DSA"]);
        let b = member("Dr. B", Designation::Professor, 18, false, &["DSA"]);
        let alloc = allocate(&units, &[a, b]);
        let names: Vec<_> = alloc.blocks.iter().map(|b| b.faculty_name.as_str()).collect();
        assert_eq!(names, vec!["Dr. A"; 3]);
    }

    #[test]
    fn capacity_cap_is_never_exceeded() {
        let units = decompose(&[subject("DSA", 5, 0)], &[division("A", 1)]);
        let alloc = allocate(
            &units,
            &[member("Dr. A", Designation::Professor, 3, false, &["DSA"])],
        );
        let assigned: u32 = alloc.blocks.iter().map(|b| b.duration as u32).sum();
        assert_eq!(assigned, 3);
        assert_eq!(alloc.unassigned_units.len(), 2);
    }

    #[test]
    fn sticky_faculty_over_capacity_falls_back_to_next_qualified() {
        let units = decompose(&[subject("OSL", 0, 3)], &[division("A", 1)]);
        let tight = member("TA Tight", Designation::TeachingAssistant, 2, true, &["OSL"]);
        let backup = member("Dr. Backup", Designation::Professor, 18, false, &["OSL"]);
        let alloc = allocate(&units, &[tight, backup]);
        // The 3-hour lab group splits: two hours with the preferred TA, the
        // remainder opens a fresh block under the fallback.
        assert_eq!(alloc.blocks.len(), 2);
        assert_eq!(alloc.blocks[0].faculty_name, "TA Tight");
        assert_eq!(alloc.blocks[0].duration, 2);
        assert_eq!(alloc.blocks[1].faculty_name, "Dr. Backup");
        assert_eq!(alloc.blocks[1].duration, 1);
        assert_ne!(alloc.blocks[0].id, alloc.blocks[1].id);
    }

    #[test]
    fn unqualified_faculty_is_skipped() {
        let units = decompose(&[subject("DSA", 1, 0)], &[division("A", 1)]);
        let alloc = allocate(
            &units,
            &[member("Dr. Wrong", Designation::Professor, 18, false, &["DBMS_X"])],
        );
        assert!(alloc.blocks.is_empty());
        assert_eq!(alloc.unassigned_units.len(), 1);
    }
}
