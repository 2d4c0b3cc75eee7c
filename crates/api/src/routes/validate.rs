use axum::{http::StatusCode, Json};
use serde::Serialize;
use tt_core::{demand_vs_capacity, validate, ValidationError};
use types::Instance;

#[derive(Serialize, utoipa::ToSchema)]
pub struct ValidationReport {
    pub ok: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/v1/validate",
    request_body = Instance,
    responses(
    (status = 200, description = "Validation result", body = ValidationReport)
    )
)]
pub async fn validate_handler(Json(inst): Json<Instance>) -> (StatusCode, Json<ValidationReport>) {
    let mut warnings = Vec::new();
    let (demand, capacity) = demand_vs_capacity(&inst);
    if demand > capacity {
        warnings.push(format!(
            "department load of {demand}h exceeds faculty capacity of {capacity}h"
        ));
    }

    match validate(&inst) {
        Ok(()) => (
            StatusCode::OK,
            Json(ValidationReport {
                ok: true,
                errors: vec![],
                warnings,
            }),
        ),
        Err(ValidationError::Msg(msg)) => {
            let errors = msg
                .split(';')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            (
                StatusCode::OK,
                Json(ValidationReport {
                    ok: false,
                    errors,
                    warnings,
                }),
            )
        }
    }
}
