use ufmt_macros::uDebug;

/// Default capacity of the line buffer, including the terminator slot.
///
/// Lines of up to `DEFAULT_LINE_CAPACITY - 1` characters are accepted.
pub const DEFAULT_LINE_CAPACITY: usize = 64;

/// Speed limits for one axis, fixed at startup.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct AxisConfig {
    max_speed: f32,
    acceleration: f32,
}
impl AxisConfig {
    /// 15 RPM on a 2048 step/rev 28BYJ-48.
    pub const DEFAULT_MAX_SPEED: f32 = 512.0;
    pub const DEFAULT_ACCELERATION: f32 = 500.0;

    /// Creates a new `AxisConfig`.
    ///
    /// # Parameters
    ///
    /// - `max_speed`: Maximum speed, in steps per second.
    /// - `acceleration`: Acceleration and deceleration rate, in steps per
    ///   second per second.
    ///
    /// # Returns
    ///
    /// - `Ok(config)`: if both values are finite and positive.
    /// - `Err(error)`: naming the first value that is not.
    pub fn new(max_speed: f32, acceleration: f32) -> Result<Self, ConfigError> {
        if !(max_speed.is_finite() && max_speed > 0.0) {
            return Err(ConfigError::InvalidMaxSpeed);
        }
        if !(acceleration.is_finite() && acceleration > 0.0) {
            return Err(ConfigError::InvalidAcceleration);
        }
        Ok(Self {
            max_speed,
            acceleration,
        })
    }

    /// Maximum speed, in steps per second.
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Acceleration, in steps per second per second.
    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }
}
impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            max_speed: Self::DEFAULT_MAX_SPEED,
            acceleration: Self::DEFAULT_ACCELERATION,
        }
    }
}

/// Errors from building a configuration.
#[derive(Debug, uDebug, PartialEq, Copy, Clone)]
pub enum ConfigError {
    /// Maximum speed was zero, negative or not finite.
    InvalidMaxSpeed,
    /// Acceleration was zero, negative or not finite.
    InvalidAcceleration,
}
