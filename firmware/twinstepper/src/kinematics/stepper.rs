use crate::Direction;

/// Stepper motor.
///
/// This is the lowest level of motion: a device that moves one step when
/// told to. It has no notion of position, speed or timing; see
/// [crate::AccelAxis] for those.
pub trait Stepper {
    /// Takes a single step in the supplied direction.
    ///
    /// # Parameters
    ///
    /// - `direction`: Direction in which to take the step.
    fn step(&mut self, direction: Direction);
}
