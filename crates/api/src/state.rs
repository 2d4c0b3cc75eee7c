use jobs::InMemJobs;
use solver_greedy::GreedyScheduler;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<InMemJobs<GreedyScheduler>>,
}

impl AppState {
    pub fn new_default() -> Self {
        Self {
            jobs: Arc::new(InMemJobs::new(GreedyScheduler::new())),
        }
    }
}
