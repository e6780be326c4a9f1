use crate::protocol::{MoveRequest, Response};
use crate::AxisDriver;
use crate::MicroSeconds;

use ufmt_macros::uDebug;

/// Joint motion state of both axes.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub enum MotionState {
    Idle,
    Moving,
}

/// Outcome of submitting a move.
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub enum Submission {
    /// Both targets were forwarded to the axes.
    Accepted,
    /// A move is still in progress; nothing changed.
    Busy,
}
impl From<Submission> for Response {
    fn from(submission: Submission) -> Self {
        match submission {
            Submission::Accepted => Response::Ok,
            Submission::Busy => Response::Busy,
        }
    }
}

/// Event reported by [MotionCoordinator::poll].
#[derive(Debug, uDebug, PartialEq, Eq, Copy, Clone)]
pub enum MotionEvent {
    /// Both axes reached their targets.
    Completed,
}
impl From<MotionEvent> for Response {
    fn from(event: MotionEvent) -> Self {
        match event {
            MotionEvent::Completed => Response::Complete,
        }
    }
}

/// Drives two axes as a single actuator.
///
/// A move is accepted for both axes at once, and completes only when both
/// have arrived. While a move is running further moves are refused.
///
/// # Type Parameters
///
/// - `A`: driver of axis A.
/// - `B`: driver of axis B.
pub struct MotionCoordinator<A, B> {
    axis_a: A,
    axis_b: B,
    state: MotionState,
}
impl<A: AxisDriver, B: AxisDriver> MotionCoordinator<A, B> {
    /// Creates a new, idle `MotionCoordinator`.
    pub fn new(axis_a: A, axis_b: B) -> Self {
        Self {
            axis_a,
            axis_b,
            state: MotionState::Idle,
        }
    }

    /// Returns the joint motion state.
    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Returns the driver of axis A.
    pub fn axis_a(&self) -> &A {
        &self.axis_a
    }

    /// Returns the driver of axis B.
    pub fn axis_b(&self) -> &B {
        &self.axis_b
    }

    /// Submits a move.
    ///
    /// The move is refused only while the state is [MotionState::Moving]
    /// and at least one axis still has distance to go. A move that has
    /// arrived but whose completion has not been polled yet does not block
    /// a new one.
    ///
    /// # Parameters
    ///
    /// - `request`: Absolute targets for both axes.
    pub fn submit(&mut self, request: MoveRequest) -> Submission {
        if self.state == MotionState::Moving && !self.both_arrived() {
            return Submission::Busy;
        }
        self.axis_a.set_target(request.target_a);
        self.axis_b.set_target(request.target_b);
        self.state = MotionState::Moving;
        Submission::Accepted
    }

    /// Services axis A, then axis B.
    pub fn service(&mut self, now: MicroSeconds) {
        self.axis_a.service(now);
        self.axis_b.service(now);
    }

    /// Checks for joint completion.
    ///
    /// # Returns
    ///
    /// - `Some(MotionEvent::Completed)`: once per move, on the first poll
    ///   that finds both axes at their targets.
    /// - `None`: otherwise, including every poll while idle.
    pub fn poll(&mut self) -> Option<MotionEvent> {
        if self.state == MotionState::Moving && self.both_arrived() {
            self.state = MotionState::Idle;
            Some(MotionEvent::Completed)
        } else {
            None
        }
    }

    fn both_arrived(&self) -> bool {
        self.axis_a.remaining_distance() == 0 && self.axis_b.remaining_distance() == 0
    }
}
