use ufmt_macros::uDebug;

use crate::Direction;

/// Underlying type representing the number of steps.
type StepRepr = i32;

/// Absolute axis position, in steps.
///
/// `Steps` is careful to prevent overflows, so that it can be used safely to
/// track axis positions across the whole representable range.
#[derive(Debug, uDebug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub struct Steps(StepRepr);
impl Steps {
    /// Create a new number of steps.
    pub fn new(steps: StepRepr) -> Self {
        Self(steps)
    }

    /// Zero steps.
    pub fn zero() -> Self {
        Steps(0)
    }

    /// Returns the value represented by `Steps`.
    pub fn get_value(&self) -> StepRepr {
        self.0
    }

    /// Increment the value if it's safe to do so without an overflow.
    pub fn inc(&self) -> Option<Self> {
        self.0.checked_add(1).map(Steps)
    }

    /// Decrement the value if it's safe to do so without an overflow.
    pub fn dec(&self) -> Option<Self> {
        self.0.checked_sub(1).map(Steps)
    }

    /// Returns the neighbouring position one step in `direction`, if it is
    /// representable.
    pub fn step(&self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Positive => self.inc(),
            Direction::Negative => self.dec(),
        }
    }

    /// Signed distance from this position to `target`.
    ///
    /// Computed in `i64`, so it never overflows even between the extremes of
    /// the step range.
    pub fn distance_to(&self, target: Steps) -> i64 {
        target.0 as i64 - self.0 as i64
    }
}
