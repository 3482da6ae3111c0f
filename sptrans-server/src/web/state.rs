//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::sptrans::{SptransClient, SptransError, within_deadline};

use super::routes::AppError;

/// Shared application state.
///
/// Holds the single SPTrans client for the process.
#[derive(Clone)]
pub struct AppState {
    /// Authenticated Olho Vivo client
    pub client: Arc<SptransClient>,

    /// Deadline applied to each query as a whole
    pub request_deadline: Duration,
}

impl AppState {
    /// Create a new app state.
    pub fn new(client: SptransClient, request_deadline: Duration) -> Self {
        Self {
            client: Arc::new(client),
            request_deadline,
        }
    }

    /// Run a client operation under the request deadline.
    pub async fn run<T, F>(&self, operation: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, SptransError>>,
    {
        within_deadline(self.request_deadline, operation)
            .await
            .map_err(AppError::from)
    }
}
