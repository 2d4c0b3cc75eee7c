use crate::error::ApiError;
use axum::{http::StatusCode, Json};
use serde::Deserialize;
use tt_core::edit::{apply_edit, EditError};
use types::{CalendarConfig, EditRequest, Room, TimetableEntry};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditIn {
    pub schedule: Vec<TimetableEntry>,
    pub edit: EditRequest,
    pub calendar: CalendarConfig,
    pub rooms: Vec<Room>,
}

#[utoipa::path(
    post,
    path = "/v1/edit",
    request_body = EditIn,
    responses(
        (status = 200, description = "New schedule after the edit", body = [TimetableEntry]),
        (status = 404, description = "Selector matched no entry"),
        (status = 409, description = "Edit rejected with the specific conflict"),
    )
)]
pub async fn edit(Json(input): Json<EditIn>) -> Result<Json<Vec<TimetableEntry>>, ApiError> {
    match apply_edit(&input.schedule, input.edit, &input.calendar, &input.rooms) {
        Ok(next) => Ok(Json(next)),
        Err(EditError::NotFound) => Err(ApiError(
            StatusCode::NOT_FOUND,
            serde_json::json!({"error": "no entry matches the selector"}),
        )),
        Err(EditError::InvalidSwap) => Err(ApiError(
            StatusCode::CONFLICT,
            serde_json::json!({"error": "invalid_swap"}),
        )),
        Err(EditError::Conflict { kind, conflicting }) => Err(ApiError(
            StatusCode::CONFLICT,
            serde_json::json!({
                "error": "conflict",
                "kind": kind,
                "conflicting": conflicting,
            }),
        )),
    }
}
