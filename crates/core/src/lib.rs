pub mod conflict;
pub mod edit;
pub mod scoring;

use async_trait::async_trait;
use thiserror::Error;

pub use types::{
    CalendarConfig, GenerateRequest, Instance, ScheduleResult, SubjectRequirement, TimetableEntry,
};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid instance: {0}")]
    Msg(String),
}

/// Precondition validation for an instance. Malformed input is rejected here,
/// before any scheduling runs; the engine itself assumes referential
/// integrity.
pub fn validate(inst: &Instance) -> Result<(), ValidationError> {
    let mut errors: Vec<String> = Vec::new();

    if inst.calendar.working_days.is_empty() {
        errors.push("workingDays is empty".into());
    }
    if inst.calendar.time_slots.is_empty() {
        errors.push("timeSlots is empty".into());
    }
    if inst.calendar.afternoon_start > inst.calendar.time_slots.len() {
        errors.push(format!(
            "afternoonStart {} is past the last slot",
            inst.calendar.afternoon_start
        ));
    }

    fn chk_unique<I: ToString>(name: &str, ids: impl Iterator<Item = I>, errors: &mut Vec<String>) {
        use std::collections::HashSet;
        let mut seen = HashSet::new();
        for id in ids {
            let s = id.to_string();
            if !seen.insert(s.clone()) {
                errors.push(format!("duplicate {name}: {s}"));
            }
        }
    }
    chk_unique(
        "subject code",
        inst.subjects.iter().map(|s| &s.subject_code.0),
        &mut errors,
    );
    chk_unique(
        "employee id",
        inst.faculty.iter().map(|f| &f.employee_id.0),
        &mut errors,
    );
    chk_unique(
        "room number",
        inst.rooms.iter().map(|r| &r.room_number.0),
        &mut errors,
    );
    chk_unique(
        "division",
        inst.divisions.iter().map(|d| d.display_name()),
        &mut errors,
    );

    use std::collections::HashSet;
    let codes: HashSet<_> = inst.subjects.iter().map(|s| &s.subject_code.0).collect();

    for s in &inst.subjects {
        if s.weekly_hours() == 0 {
            errors.push(format!(
                "subject {} has zero theory and practical hours",
                s.subject_code.0
            ));
        }
        if s.practical_hours_per_week > 0
            && !inst
                .rooms
                .iter()
                .any(|r| r.room_type == types::RoomKind::Lab)
        {
            errors.push(format!(
                "subject {} needs a lab but no lab room exists",
                s.subject_code.0
            ));
        }
        if s.theory_hours_per_week > 0
            && !inst
                .rooms
                .iter()
                .any(|r| r.room_type == types::RoomKind::Classroom)
        {
            errors.push(format!(
                "subject {} needs a classroom but no classroom exists",
                s.subject_code.0
            ));
        }
    }

    for d in &inst.divisions {
        if d.number_of_batches == 0 {
            errors.push(format!("division {} has zero batches", d.display_name()));
        }
        if d.student_count == 0 {
            errors.push(format!("division {} has zero students", d.display_name()));
        }
        if !inst
            .subjects
            .iter()
            .any(|s| s.branch == d.branch && s.year == d.year)
        {
            errors.push(format!(
                "division {} references branch {} year {} with no subjects",
                d.display_name(),
                d.branch,
                d.year
            ));
        }
    }

    for s in &inst.subjects {
        if !inst
            .divisions
            .iter()
            .any(|d| d.branch == s.branch && d.year == s.year)
        {
            errors.push(format!(
                "subject {} has no division in branch {} year {}",
                s.subject_code.0, s.branch, s.year
            ));
        }
    }

    for f in &inst.faculty {
        if f.max_weekly_hours == 0 {
            errors.push(format!("faculty {} has zero weekly hours", f.employee_id.0));
        }
        if f.qualified_subjects.is_empty() {
            errors.push(format!(
                "faculty {} has no qualified subjects",
                f.employee_id.0
            ));
        }
        for code in &f.qualified_subjects {
            if !codes.contains(&code.0) {
                errors.push(format!(
                    "faculty {} references unknown subject {}",
                    f.employee_id.0, code.0
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Msg(errors.join("; ")))
    }
}

/// Total demand hours across all (subject, division) pairs versus total
/// faculty capacity. Used by callers to surface an overload warning; a
/// shortfall is not a validation error because the run still produces a
/// best-effort schedule plus an unassigned list.
pub fn demand_vs_capacity(inst: &Instance) -> (u32, u32) {
    let mut demand: u32 = 0;
    for s in &inst.subjects {
        for d in &inst.divisions {
            if d.branch == s.branch && d.year == s.year {
                demand += s.theory_hours_per_week as u32;
                demand += s.practical_hours_per_week as u32 * d.number_of_batches as u32;
            }
        }
    }
    let capacity = inst.faculty.iter().map(|f| f.max_weekly_hours as u32).sum();
    (demand, capacity)
}

#[async_trait]
pub trait Scheduler: Send + Sync + 'static {
    async fn generate(&self, req: GenerateRequest) -> anyhow::Result<ScheduleResult>;
}
