pub mod allocate;
pub mod decompose;
pub mod place;

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::info;
use tt_core::{GenerateRequest, ScheduleResult, Scheduler};
use types::{Instance, SubjectCode};

pub use allocate::{allocate, Allocation};
pub use decompose::decompose;
pub use place::{place, Placement};

pub struct GreedyScheduler;

impl GreedyScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GreedyScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// The whole scheduling run as one pure function: decompose demand into
/// hour units, attach faculty, then slot the resulting blocks. Subjects that
/// lose any unit or block along the way are surfaced in
/// `unassigned_subjects`; the run itself never fails.
pub fn run_pipeline(inst: &Instance) -> ScheduleResult {
    let units = decompose(&inst.subjects, &inst.divisions);
    let alloc = allocate(&units, &inst.faculty);
    let placement = place(&alloc.blocks, &inst.rooms, &inst.calendar);

    let mut unassigned_subjects: Vec<SubjectCode> = Vec::new();
    let mut push_unique = |code: &SubjectCode, list: &mut Vec<SubjectCode>| {
        if !list.contains(code) {
            list.push(code.clone());
        }
    };
    for u in &alloc.unassigned_units {
        push_unique(&u.subject_code, &mut unassigned_subjects);
    }
    let subject_of_block: HashMap<_, _> = alloc
        .blocks
        .iter()
        .map(|b| (&b.id, &b.subject_code))
        .collect();
    for id in &placement.unassigned_blocks {
        if let Some(code) = subject_of_block.get(id) {
            push_unique(code, &mut unassigned_subjects);
        }
    }

    info!(
        units = units.len(),
        blocks = alloc.blocks.len(),
        placed = placement.timetable.len(),
        unassigned_subjects = unassigned_subjects.len(),
        "scheduling run finished"
    );

    let status = if unassigned_subjects.is_empty() {
        "complete"
    } else {
        "partial"
    };
    ScheduleResult {
        status: status.into(),
        timetable: placement.timetable,
        unassigned_subjects,
        stats: serde_json::json!({
            "method": "greedy",
            "units": units.len(),
            "blocks": alloc.blocks.len(),
            "unassignedUnits": alloc.unassigned_units.len(),
            "unassignedBlocks": placement.unassigned_blocks.len(),
        }),
    }
}

#[async_trait]
impl Scheduler for GreedyScheduler {
    async fn generate(&self, req: GenerateRequest) -> anyhow::Result<ScheduleResult> {
        tt_core::validate(&req.instance)?;
        Ok(run_pipeline(&req.instance))
    }
}
