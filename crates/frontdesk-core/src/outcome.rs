//! Results of transitions that keep going past persistence failures.

use crate::Error;

/// The value a transition produced, plus every persistence failure it
/// absorbed on the way. The in-memory change described by `value` has
/// happened either way; a non-empty `problems` means some store may be stale.
#[derive(Debug)]
pub struct Outcome<T> {
  pub value:    T,
  pub problems: Vec<Error>,
}

impl<T> Outcome<T> {
  pub fn clean(value: T) -> Self { Self { value, problems: Vec::new() } }

  pub fn is_clean(&self) -> bool { self.problems.is_empty() }

  pub fn push(&mut self, problem: Error) { self.problems.push(problem) }

  /// Move `other`'s problems into `self` and return its value.
  pub fn absorb<U>(&mut self, other: Outcome<U>) -> U {
    self.problems.extend(other.problems);
    other.value
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
    Outcome { value: f(self.value), problems: self.problems }
  }
}
