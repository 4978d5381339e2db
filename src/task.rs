use crate::aggregate::AggregateError;

use std::future::Future;
use std::pin::Pin;

/// A single unit of work in a cohort.
///
/// A task is any future producing `Result<R, E>`. Completion is reported
/// exactly once, when the future resolves; a task may be immediately ready or
/// take arbitrarily long. The runner assumes nothing else about it.
pub type CohortTask<R, E> = Pin<Box<dyn Future<Output = Result<R, E>> + Send + 'static>>;

/// The terminal outcome of a cohort run: every task's result in input order,
/// or all recorded failures combined into one [`AggregateError`].
pub type CohortResult<R, E> = Result<Vec<R>, AggregateError<E>>;
