use axum::Json;
use serde::{Deserialize, Serialize};
use tt_core::scoring::compute_soft_scores;
use types::{CalendarConfig, TimetableEntry};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExplainIn {
    pub calendar: CalendarConfig,
    pub timetable: Vec<TimetableEntry>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacultyLoad {
    pub faculty_name: String,
    pub hours: u32,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExplainOut {
    pub labs_outside_afternoon: i64,
    pub adjacent_theory_pairs: i64,
    pub faculty_load: Vec<FacultyLoad>,
    pub objective: i64,
}

#[utoipa::path(
    post,
    path = "/v1/explain",
    request_body = ExplainIn,
    responses((status = 200, description = "Soft-quality report", body = ExplainOut))
)]
pub async fn explain(Json(input): Json<ExplainIn>) -> Json<ExplainOut> {
    let scores = compute_soft_scores(&input.calendar, &input.timetable);
    let mut faculty_load: Vec<FacultyLoad> = scores
        .faculty_load
        .into_iter()
        .map(|(faculty_name, hours)| FacultyLoad {
            faculty_name,
            hours,
        })
        .collect();
    faculty_load.sort_by(|a, b| a.faculty_name.cmp(&b.faculty_name));

    Json(ExplainOut {
        labs_outside_afternoon: scores.labs_outside_afternoon,
        adjacent_theory_pairs: scores.adjacent_theory_pairs,
        faculty_load,
        objective: scores.objective,
    })
}
