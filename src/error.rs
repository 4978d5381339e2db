use thiserror::Error;

/// Errors reported by `futures_cohort` itself, as opposed to failures of the
/// caller's own tasks (those are carried by [`AggregateError`](crate::AggregateError)).
#[derive(Error, Debug, PartialEq)]
pub enum CohortError {
  #[error("the limit argument must be at least 1, got {0}")]
  InvalidLimit(usize),

  #[error("cohort run panicked before reporting an outcome")]
  RunPanicked,

  #[error("cohort run was aborted before reporting an outcome")]
  RunAborted,
}
