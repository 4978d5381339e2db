use crate::error::CohortError;
use crate::task::CohortResult;

use tokio::task::JoinHandle;
use tracing::warn;

/// A handle to a cohort run spawned on a Tokio runtime via
/// [`spawn_on`](crate::spawn_on).
///
/// Allows awaiting the run's terminal outcome away from the spawning call
/// site.
#[derive(Debug)]
pub struct CohortHandle<R: Send + 'static, E: Send + 'static> {
  join: JoinHandle<CohortResult<R, E>>,
}

impl<R: Send + 'static, E: Send + 'static> CohortHandle<R, E> {
  pub(crate) fn new(join: JoinHandle<CohortResult<R, E>>) -> Self {
    Self { join }
  }

  /// Whether the spawned run has already produced its outcome.
  pub fn is_finished(&self) -> bool {
    self.join.is_finished()
  }

  /// Awaits the run and returns its terminal outcome.
  ///
  /// # Errors
  /// Returns `CohortError::RunPanicked` if a task future panicked and took
  /// the run down with it, or `CohortError::RunAborted` if the runtime
  /// dropped the run before it could report.
  pub async fn await_outcome(self) -> Result<CohortResult<R, E>, CohortError> {
    match self.join.await {
      Ok(outcome) => Ok(outcome),
      Err(join_error) => {
        warn!("cohort run did not complete: {}", join_error);
        if join_error.is_panic() {
          Err(CohortError::RunPanicked)
        } else {
          Err(CohortError::RunAborted)
        }
      }
    }
  }
}
