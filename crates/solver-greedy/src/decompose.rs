use types::{AllocatableUnit, Division, SchedulableUnit, SessionKind, SubjectRequirement};

/// Expands subject requirements into atomic 1-hour demand units, one per
/// theory hour of each matching division and one per practical hour of each
/// batch. Pure; output order is subject input order, then matching division
/// order, then hour index (theory) and batch-then-hour (labs). The allocator
/// consumes units in exactly this order, so the order is part of the
/// contract.
pub fn decompose(subjects: &[SubjectRequirement], divisions: &[Division]) -> Vec<AllocatableUnit> {
    let mut units = Vec::new();

    for s in subjects {
        for d in divisions
            .iter()
            .filter(|d| d.branch == s.branch && d.year == s.year)
        {
            let division_name = d.display_name();

            for _ in 0..s.theory_hours_per_week {
                units.push(AllocatableUnit {
                    subject_code: s.subject_code.clone(),
                    subject_name: s.subject_name.clone(),
                    division_name: division_name.clone(),
                    kind: SessionKind::Theory,
                    batch: None,
                    unit: SchedulableUnit::Division {
                        division: division_name.clone(),
                    },
                    group: format!("{}_{}_Theory", s.subject_code, division_name),
                });
            }

            for batch in 1..=d.number_of_batches {
                for _ in 0..s.practical_hours_per_week {
                    units.push(AllocatableUnit {
                        subject_code: s.subject_code.clone(),
                        subject_name: s.subject_name.clone(),
                        division_name: division_name.clone(),
                        kind: SessionKind::Lab,
                        batch: Some(batch),
                        unit: SchedulableUnit::Batch {
                            division: division_name.clone(),
                            batch,
                        },
                        group: format!("{}_{}_B{}_Lab", s.subject_code, division_name, batch),
                    });
                }
            }
        }
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{SubjectCode, SubjectKind};

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

    #[test]
    fn emits_theory_per_division_and_labs_per_batch() {
        // The spec scenario: DSA with 3 theory + 2 practical hours for a
        // two-batch division yields 3 theory units and 2x2 lab units.
        let units = decompose(&[subject("DSA", 3, 2)], &[division("A", 2)]);
        assert_eq!(units.len(), 7);

        let theory: Vec<_> = units.iter().filter(|u| u.kind == SessionKind::Theory).collect();
        assert_eq!(theory.len(), 3);
        for u in &theory {
            assert_eq!(u.unit.to_string(), "CE-SE-A");
            assert_eq!(u.group, "DSA_CE-SE-A_Theory");
        }

        let lab_units: Vec<_> = units.iter().filter(|u| u.kind == SessionKind::Lab).collect();
        assert_eq!(lab_units.len(), 4);
        assert_eq!(lab_units[0].unit.to_string(), "CE-SE-A_B1");
        assert_eq!(lab_units[2].unit.to_string(), "CE-SE-A_B2");
        assert_eq!(lab_units[2].group, "DSA_CE-SE-A_B2_Lab");
    }

    #[test]
    fn skips_divisions_of_other_branch_or_year() {
        let mut other = division("A", 1);
        other.branch = "IT".into();
        let mut junior = division("B", 1);
        junior.year = "TE".into();
        let units = decompose(&[subject("DSA", 2, 0)], &[other, junior, division("C", 1)]);
        assert_eq!(units.len(), 2);
        assert!(units.iter().all(|u| u.division_name == "CE-SE-C"));
    }

    #[test]
    fn preserves_subject_then_division_order() {
        let units = decompose(
            &[subject("DSA", 1, 0), subject("DBMS", 1, 0)],
            &[division("A", 1), division("B", 1)],
        );
        let seen: Vec<_> = units
            .iter()
            .map(|u| (u.subject_code.0.as_str(), u.division_name.as_str()))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("DSA", "CE-SE-A"),
                ("DSA", "CE-SE-B"),
                ("DBMS", "CE-SE-A"),
                ("DBMS", "CE-SE-B"),
            ]
        );
    }

    #[test]
    fn single_batch_division_still_gets_a_batch_identity() {
        let units = decompose(&[subject("OSL", 0, 2)], &[division("A", 1)]);
        assert_eq!(units.len(), 2);
        assert!(units.iter().all(|u| u.batch == Some(1)));
        assert!(units.iter().all(|u| u.unit.to_string() == "CE-SE-A_B1"));
    }
}
