use parking_lot::RwLock;
use std::time::Duration;
use tracing::error;
use tt_core::{GenerateRequest, ScheduleResult, Scheduler};
use utoipa::ToSchema;
use uuid::Uuid;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct JobId(pub String);

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(tag = "status")]
pub enum JobStatus {
    Queued,
    Running,
    Done { result: ScheduleResult },
    TimedOut,
    Failed { message: String },
}

/// In-memory registry of scheduling runs. Each run is one spawned task with
/// a bounded timeout; a run that cannot finish in time is marked timed out
/// rather than left hanging.
#[derive(Clone)]
pub struct InMemJobs<S: Scheduler> {
    inner: std::sync::Arc<RwLock<std::collections::HashMap<String, JobStatus>>>,
    scheduler: std::sync::Arc<S>,
}

impl<S: Scheduler> InMemJobs<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            inner: Default::default(),
            scheduler: std::sync::Arc::new(scheduler),
        }
    }

    pub fn enqueue(&self, req: GenerateRequest) -> JobId {
        let id = Uuid::new_v4().to_string();
        self.inner.write().insert(id.clone(), JobStatus::Queued);

        let map = self.inner.clone();
        let scheduler = self.scheduler.clone();
        let id_for_task = id.clone();
        let timeout = Duration::from_secs(req.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        tokio::spawn(async move {
            {
                let mut w = map.write();
                w.insert(id_for_task.clone(), JobStatus::Running);
            }
            match tokio::time::timeout(timeout, scheduler.generate(req)).await {
                Ok(Ok(result)) => {
                    map.write().insert(id_for_task, JobStatus::Done { result });
                }
                Ok(Err(e)) => {
                    error!(?e, "scheduling run failed");
                    map.write().insert(
                        id_for_task,
                        JobStatus::Failed {
                            message: e.to_string(),
                        },
                    );
                }
                Err(_) => {
                    error!(job = %id_for_task, "scheduling run timed out");
                    map.write().insert(id_for_task, JobStatus::TimedOut);
                }
            }
        });

        JobId(id)
    }

    pub fn get(&self, id: &str) -> Option<JobStatus> {
        self.inner.read().get(id).cloned()
    }
}
