mod error;
mod state;
mod telemetry;
pub mod routes {
    pub mod edit;
    pub mod explain;
    pub mod generate;
    pub mod health;
    pub mod jobs;
    pub mod validate;
}

use axum::{
    routing::{get, post},
    Router,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            routes::health::health,
            routes::generate::generate,
            routes::jobs::status,
            routes::jobs::result,
            routes::validate::validate_handler,
            routes::edit::edit,
            routes::explain::explain,
        ),
        components(schemas(
            types::Instance, types::SubjectRequirement, types::Division, types::Faculty,
            types::Room, types::CalendarConfig, types::GenerateRequest, types::ScheduleResult,
            types::TimetableEntry, types::AllocationEntry, types::AllocatableUnit,
            types::SchedulableUnit, types::EditRequest, types::EntrySelector,
            types::Conflict, types::ConflictKind, types::ValidationResult,
            types::Designation, types::SubjectKind, types::SessionKind, types::RoomKind,
            types::SubjectCode, types::FacultyId, types::RoomNumber, types::BlockId,
            types::Day, types::SlotLabel,
            jobs::JobId, jobs::JobStatus,
            routes::validate::ValidationReport,
            routes::generate::JobCreated,
            routes::edit::EditIn,
            routes::explain::ExplainIn,
            routes::explain::ExplainOut,
            routes::explain::FacultyLoad,
        )),
        tags(
            (name = "deptsched", description = "Department timetable API")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let app_state = state::AppState::new_default();

    let app = Router::new()
        .route("/v1/health", get(routes::health::health))
        .route("/v1/generate", post(routes::generate::generate))
        .route("/v1/validate", post(routes::validate::validate_handler))
        .route("/v1/edit", post(routes::edit::edit))
        .route("/v1/explain", post(routes::explain::explain))
        .route("/v1/jobs/:id", get(routes::jobs::status))
        .route("/v1/jobs/:id/result", get(routes::jobs::result))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(telemetry::stack())
        .with_state(app_state);

    let port = std::env::var("DEPTSCHED__SERVER__PORT").unwrap_or_else(|_| "8080".into());
    let addr: std::net::SocketAddr = format!("0.0.0.0:{}", port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen addr: {e}"))?;
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
