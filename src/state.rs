// src/state.rs
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::report::ReportEngine;
use crate::repository::ProductRepository;
use crate::workflow::CatalogSession;

/// Shared application state. The single editing session sits behind a
/// mutex so operations serialize the same way the legacy event thread
/// did; the repository and report engine are also reachable directly
/// for the stateless read endpoints.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<CatalogSession>>,
    pub repo: Arc<dyn ProductRepository>,
    pub reports: Arc<dyn ReportEngine>,
}

impl AppState {
    pub fn new(repo: Arc<dyn ProductRepository>, reports: Arc<dyn ReportEngine>) -> Self {
        let session = CatalogSession::new(repo.clone(), reports.clone());
        Self {
            session: Arc::new(Mutex::new(session)),
            repo,
            reports,
        }
    }
}
