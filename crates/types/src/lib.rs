pub mod unit;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

pub use unit::SchedulableUnit;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash,
            PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}
id_newtype!(SubjectCode);
id_newtype!(FacultyId);
id_newtype!(RoomNumber);
id_newtype!(BlockId);
id_newtype!(Day);
id_newtype!(SlotLabel);

/// Faculty designations, ordered by seniority on the wire but ranked the
/// opposite way for lab assignment: junior staff get labs first.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash)]
pub enum Designation {
    #[serde(rename = "HOD")]
    Hod,
    #[serde(rename = "Professor")]
    Professor,
    #[serde(rename = "Associate Professor")]
    AssociateProfessor,
    #[serde(rename = "Assistant Professor")]
    AssistantProfessor,
    #[serde(rename = "Teaching Assistant")]
    TeachingAssistant,
}

impl Designation {
    /// Lower rank wins when steering lab hours toward faculty.
    pub fn lab_rank(self) -> u8 {
        match self {
            Designation::TeachingAssistant => 0,
            Designation::AssistantProfessor => 1,
            Designation::AssociateProfessor => 2,
            Designation::Professor => 3,
            Designation::Hod => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash)]
pub enum SubjectKind {
    Core,
    Lab,
    Elective,
    Minor,
    Project,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash)]
pub enum RoomKind {
    Lab,
    Classroom,
}

/// What a single demand hour is: a theory hour busies the whole division,
/// a lab hour busies one batch.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash)]
pub enum SessionKind {
    Theory,
    Lab,
}

impl SessionKind {
    pub fn required_room_kind(self) -> RoomKind {
        match self {
            SessionKind::Theory => RoomKind::Classroom,
            SessionKind::Lab => RoomKind::Lab,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRequirement {
    pub subject_code: SubjectCode,
    pub subject_name: String,
    pub branch: String,
    pub year: String,
    pub semester: String,
    pub theory_hours_per_week: u8,
    pub practical_hours_per_week: u8,
    pub kind: SubjectKind,
}

impl SubjectRequirement {
    pub fn weekly_hours(&self) -> u8 {
        self.theory_hours_per_week + self.practical_hours_per_week
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub branch: String,
    pub year: String,
    pub semester: String,
    pub division_name: String,
    pub number_of_batches: u8,
    pub student_count: u32,
}

impl Division {
    /// The name the rest of the pipeline keys on, e.g. `CE-SE-A`.
    pub fn display_name(&self) -> String {
        format!("{}-{}-{}", self.branch, self.year, self.division_name)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub faculty_name: String,
    pub employee_id: FacultyId,
    pub designation: Designation,
    pub max_weekly_hours: u8,
    #[serde(default)]
    pub qualified_subjects: Vec<SubjectCode>,
    #[serde(default)]
    pub prefer_labs: bool,
}

impl Faculty {
    pub fn is_qualified(&self, code: &SubjectCode) -> bool {
        self.qualified_subjects.contains(code)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_number: RoomNumber,
    pub room_type: RoomKind,
    pub capacity: u32,
    pub building: String,
}

/// The weekly grid: ordered days, ordered slot labels, and where the
/// afternoon begins (index of the first slot after the lunch gap).
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarConfig {
    pub working_days: Vec<Day>,
    pub time_slots: Vec<SlotLabel>,
    pub afternoon_start: usize,
    #[serde(default)]
    pub prefer_afternoon_labs: bool,
}

impl CalendarConfig {
    pub fn day_index(&self, day: &Day) -> Option<usize> {
        self.working_days.iter().position(|d| d == day)
    }

    pub fn slot_index(&self, slot: &SlotLabel) -> Option<usize> {
        self.time_slots.iter().position(|s| s == slot)
    }

    pub fn is_afternoon(&self, slot_idx: usize) -> bool {
        slot_idx >= self.afternoon_start
    }

    pub fn slots_per_day(&self) -> usize {
        self.time_slots.len()
    }
}

/// One hour of demand, derived fresh per generation run. `unit` carries the
/// busy-resource identity and `group` merges hours that must form one block.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocatableUnit {
    pub subject_code: SubjectCode,
    pub subject_name: String,
    pub division_name: String,
    pub kind: SessionKind,
    #[serde(default)]
    pub batch: Option<u8>,
    pub unit: SchedulableUnit,
    pub group: String,
}

/// A contiguous run of hours for one subject/unit with a faculty member
/// attached, still awaiting a day, slot, and room.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllocationEntry {
    pub id: BlockId,
    pub subject_code: SubjectCode,
    pub subject_name: String,
    pub faculty_name: String,
    pub division_name: String,
    #[serde(default)]
    pub batch: Option<u8>,
    pub room_type: RoomKind,
    pub unit: SchedulableUnit,
    pub duration: u8,
}

/// The persisted, editable schedule row. `duration` > 1 means the entry also
/// occupies the slots immediately following `time_slot` on the same day.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub subject_code: SubjectCode,
    pub faculty_name: String,
    pub room_number: RoomNumber,
    pub division_name: String,
    #[serde(default)]
    pub batch: Option<u8>,
    pub day: Day,
    pub time_slot: SlotLabel,
    #[serde(default = "one")]
    pub duration: u8,
}

fn one() -> u8 {
    1
}

impl TimetableEntry {
    pub fn unit(&self) -> SchedulableUnit {
        match self.batch {
            Some(b) => SchedulableUnit::Batch {
                division: self.division_name.clone(),
                batch: b,
            },
            None => SchedulableUnit::Division {
                division: self.division_name.clone(),
            },
        }
    }

    /// Wire form of the batch, e.g. `B1`.
    pub fn batch_label(&self) -> Option<String> {
        self.batch.map(|b| format!("B{b}"))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub calendar: CalendarConfig,
    pub subjects: Vec<SubjectRequirement>,
    pub divisions: Vec<Division>,
    pub faculty: Vec<Faculty>,
    pub rooms: Vec<Room>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub instance: Instance,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    pub status: String,
    pub timetable: Vec<TimetableEntry>,
    pub unassigned_subjects: Vec<SubjectCode>,
    pub stats: serde_json::Value,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    Room,
    Faculty,
    Unit,
    RoomType,
    Grid,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub kind: ConflictKind,
    #[serde(default)]
    pub conflicting: Option<TimetableEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default)]
    pub conflict: Option<Conflict>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            conflict: None,
        }
    }

    pub fn rejected(kind: ConflictKind, conflicting: Option<TimetableEntry>) -> Self {
        Self {
            valid: false,
            conflict: Some(Conflict { kind, conflicting }),
        }
    }
}

/// Identifies one schedule row for edits: the same cell can hold entries for
/// several batches, so the batch is part of the key.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntrySelector {
    pub day: Day,
    pub time_slot: SlotLabel,
    pub division_name: String,
    #[serde(default)]
    pub batch: Option<u8>,
}

impl EntrySelector {
    pub fn matches(&self, e: &TimetableEntry) -> bool {
        e.day == self.day
            && e.time_slot == self.time_slot
            && e.division_name == self.division_name
            && e.batch == self.batch
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditRequest {
    /// Drag-move an entry to a new cell. Becomes a swap when the target cell
    /// already holds an entry for the same schedulable unit.
    Move {
        from: EntrySelector,
        to_day: Day,
        to_slot: SlotLabel,
    },
    /// Manually place a new entry.
    Add { entry: TimetableEntry },
    /// Remove the exact entry the selector names.
    Clear { at: EntrySelector },
}
