use crate::error::CohortError;

/// Upper bound on how many tasks of one cohort may be in flight at a time.
///
/// `Bounded(1)` runs the batch strictly one task at a time; `Unbounded`
/// admits every task up front. Plain integers convert via `From`, so call
/// sites can pass `4` instead of `ConcurrencyLimit::Bounded(4)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrencyLimit {
  /// Admit every task immediately.
  Unbounded,
  /// At most this many tasks in flight. Must be at least 1.
  Bounded(usize),
}

impl ConcurrencyLimit {
  /// Resolves the limit against a batch of `total` tasks: rejects a zero
  /// bound and clamps the rest, so the initial admission window never exceeds
  /// the number of tasks that exist.
  pub(crate) fn window(self, total: usize) -> Result<usize, CohortError> {
    match self {
      ConcurrencyLimit::Unbounded => Ok(total),
      ConcurrencyLimit::Bounded(0) => Err(CohortError::InvalidLimit(0)),
      ConcurrencyLimit::Bounded(limit) => Ok(limit.min(total)),
    }
  }
}

impl From<usize> for ConcurrencyLimit {
  fn from(limit: usize) -> Self {
    ConcurrencyLimit::Bounded(limit)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bounded_limit_is_clamped_to_batch_length() {
    assert_eq!(ConcurrencyLimit::Bounded(10).window(3), Ok(3));
    assert_eq!(ConcurrencyLimit::Bounded(2).window(3), Ok(2));
  }

  #[test]
  fn unbounded_limit_covers_the_whole_batch() {
    assert_eq!(ConcurrencyLimit::Unbounded.window(7), Ok(7));
    assert_eq!(ConcurrencyLimit::Unbounded.window(0), Ok(0));
  }

  #[test]
  fn zero_limit_is_rejected_even_for_an_empty_batch() {
    assert_eq!(
      ConcurrencyLimit::Bounded(0).window(0),
      Err(CohortError::InvalidLimit(0))
    );
    assert_eq!(
      ConcurrencyLimit::Bounded(0).window(5),
      Err(CohortError::InvalidLimit(0))
    );
  }

  #[test]
  fn plain_integers_convert_to_bounded() {
    assert_eq!(ConcurrencyLimit::from(4), ConcurrencyLimit::Bounded(4));
  }
}
