use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use types::GenerateRequest;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobCreated {
    pub job_id: String,
    pub status: &'static str,
}

#[utoipa::path(
        post,
        path = "/v1/generate",
        request_body = GenerateRequest,
        responses((status = 200, description = "Scheduling run enqueued", body = JobCreated))
    )]
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Json<JobCreated> {
    let id = state.jobs.enqueue(req);
    Json(JobCreated {
        job_id: id.0,
        status: "queued",
    })
}
