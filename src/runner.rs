use crate::aggregate::AggregateError;
use crate::error::CohortError;
use crate::handle::CohortHandle;
use crate::limit::ConcurrencyLimit;
use crate::task::{CohortResult, CohortTask};

use std::collections::BTreeMap;
use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::runtime::Handle as TokioHandle;
use tracing::{debug, debug_span, trace, Instrument};

/// Runs every task in `tasks` with at most `limit` in flight at a time and
/// resolves once the whole batch has been accounted for.
///
/// Results come back in input order regardless of completion order. On the
/// first failure no further tasks are admitted; tasks already in flight still
/// run to completion, and successes arriving after the failure are dropped.
/// The returned future is inert until polled, so no outcome is ever
/// observable within the synchronous extent of this call, even for a batch
/// of immediately-ready tasks.
///
/// # Errors
/// Returns `CohortError::InvalidLimit` right away if `limit` resolves to
/// `Bounded(0)`. Failures of the tasks themselves are not errors of `run`;
/// they surface through the resolved [`CohortResult`].
///
/// # Panics
/// A panicking task future is outside the task contract and propagates its
/// panic out of the returned future.
pub fn run<R, E>(
  tasks: Vec<CohortTask<R, E>>,
  limit: impl Into<ConcurrencyLimit>,
) -> Result<impl Future<Output = CohortResult<R, E>> + Send + 'static, CohortError>
where
  R: Send + 'static,
  E: Send + 'static,
{
  let total = tasks.len();
  let limit: ConcurrencyLimit = limit.into();
  let window = limit.window(total)?;
  let span = debug_span!("cohort_run", total, window);
  Ok(drive(tasks, window).instrument(span))
}

/// Runs every task in `tasks` with unbounded concurrency.
///
/// Equivalent to [`run`] with [`ConcurrencyLimit::Unbounded`], but infallible
/// at the call boundary since there is no limit to validate.
pub fn run_all<R, E>(
  tasks: Vec<CohortTask<R, E>>,
) -> impl Future<Output = CohortResult<R, E>> + Send + 'static
where
  R: Send + 'static,
  E: Send + 'static,
{
  let total = tasks.len();
  let span = debug_span!("cohort_run", total, window = total);
  drive(tasks, total).instrument(span)
}

/// Spawns the cohort run onto a Tokio runtime and returns a handle to await
/// its outcome later.
///
/// # Errors
/// Returns `CohortError::InvalidLimit` if `limit` resolves to `Bounded(0)`;
/// nothing is spawned in that case.
pub fn spawn_on<R, E>(
  handle: &TokioHandle,
  tasks: Vec<CohortTask<R, E>>,
  limit: impl Into<ConcurrencyLimit>,
) -> Result<CohortHandle<R, E>, CohortError>
where
  R: Send + 'static,
  E: Send + 'static,
{
  let join = handle.spawn(run(tasks, limit)?);
  Ok(CohortHandle::new(join))
}

// Gives both admission sites one concrete future type for the in-flight set.
fn tag<R, E>(
  index: usize,
  task: CohortTask<R, E>,
) -> impl Future<Output = (usize, Result<R, E>)> {
  async move { (index, task.await) }
}

async fn drive<R, E>(tasks: Vec<CohortTask<R, E>>, window: usize) -> CohortResult<R, E> {
  let total = tasks.len();
  if total == 0 {
    debug!("empty cohort, nothing to admit");
    return Ok(Vec::new());
  }

  let mut results: Vec<Option<R>> = std::iter::repeat_with(|| None).take(total).collect();
  let mut failures: Option<BTreeMap<usize, E>> = None;
  let mut pending = total;
  let mut cursor = 0usize;
  let mut queue = tasks.into_iter();
  let mut in_flight = FuturesUnordered::new();

  for _ in 0..window {
    match queue.next() {
      Some(task) => {
        trace!(index = cursor, "admitting task");
        in_flight.push(tag(cursor, task));
        cursor += 1;
      }
      None => break,
    }
  }

  while let Some((index, outcome)) = in_flight.next().await {
    match outcome {
      Ok(value) => {
        if failures.is_none() {
          trace!(index, "task completed");
          results[index] = Some(value);
        } else {
          trace!(index, "task completed after a failure, result dropped");
        }
      }
      Err(error) => {
        if failures.is_none() {
          // Tasks past the cursor will never be admitted from here on; take
          // them out of the pending count so the run can still finish once
          // every task actually launched has reported.
          let excused = total - cursor;
          pending -= excused;
          debug!(index, excused, "first failure, no further tasks will be admitted");
          failures = Some(BTreeMap::new());
        } else {
          trace!(index, "task failed");
        }
        if let Some(recorded) = failures.as_mut() {
          recorded.insert(index, error);
        }
      }
    }

    pending -= 1;
    if pending == 0 {
      break;
    }

    // One completion admits at most one replacement, which keeps the
    // in-flight count capped at the window size.
    if failures.is_none() {
      if let Some(task) = queue.next() {
        trace!(index = cursor, "admitting task");
        in_flight.push(tag(cursor, task));
        cursor += 1;
      }
    }
  }

  debug_assert_eq!(pending, 0, "every launched task must report exactly once");

  match failures {
    Some(recorded) => {
      debug!(failed = recorded.len(), "cohort finished with failures");
      Err(AggregateError::from_indexed(recorded))
    }
    None => {
      let values: Vec<R> = results.into_iter().flatten().collect();
      debug_assert_eq!(values.len(), total, "every result slot must be filled on success");
      debug!(total, "cohort finished");
      Ok(values)
    }
  }
}
