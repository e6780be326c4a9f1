use crate::MicroSeconds;
use crate::Steps;

/// Motion axis driver.
///
/// An axis driver owns a stepper and moves it towards an absolute target at
/// whatever speed profile it implements. It never blocks: motion only
/// advances when [AxisDriver::service] is called, which must happen often
/// enough (at least once per step interval) to hold the configured speed.
pub trait AxisDriver {
    /// Begins motion towards a new absolute target.
    ///
    /// # Parameters
    ///
    /// - `position`: The absolute target, in steps.
    fn set_target(&mut self, position: Steps);

    /// Advances pulse generation by one scheduling quantum.
    ///
    /// # Parameters
    ///
    /// - `now`: The current time.
    fn service(&mut self, now: MicroSeconds);

    /// Returns the signed distance from the current position to the target.
    ///
    /// Zero means the axis is at its target.
    fn remaining_distance(&self) -> i64;
}
