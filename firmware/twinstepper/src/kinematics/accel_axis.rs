use crate::AxisConfig;
use crate::AxisDriver;
use crate::Direction;
use crate::MicroSeconds;
use crate::Stepper;
use crate::Steps;

/// Stepper axis with a trapezoidal speed profile.
///
/// An `AccelAxis` tracks the position of the [Stepper] it wraps and moves it
/// to an absolute target, accelerating from rest up to the configured
/// maximum speed and decelerating so that it stops on the target.
///
/// Step intervals follow David Austin's recurrence ("Generate stepper-motor
/// speed profiles in real time"), as used by most embedded stepper
/// libraries:
///
/// - from rest the first interval is `c0 = 0.676 * sqrt(2 / a)` seconds,
/// - each following interval is `cn - 2 cn / (4 n + 1)`, never shorter
///   than the interval at maximum speed,
/// - `n` is negated to start decelerating once the stopping distance
///   `v^2 / 2a` reaches the remaining distance.
///
/// Intervals are whole microseconds and never shorter than one, so speeds
/// above 1 000 000 steps per second are capped there.
///
/// # Type Parameters
///
/// - `S`: type of the [Stepper].
pub struct AccelAxis<S> {
    stepper: S,
    position: Steps,
    target: Steps,
    direction: Direction,
    /// Signed speed in steps per second.
    speed: f32,
    acceleration: f32,
    /// Step index along the current ramp; negative while decelerating.
    n: i32,
    /// Interval of the first step from rest, in microseconds.
    c0: f32,
    /// Current step interval, in microseconds.
    cn: f32,
    /// Step interval at maximum speed, in microseconds.
    cmin: f32,
    /// Whole-microsecond interval until the next step; zero when stopped.
    step_interval_us: u32,
    last_step: MicroSeconds,
}
impl<S: Stepper> AccelAxis<S> {
    /// Creates a new `AccelAxis` at rest at position zero.
    ///
    /// # Parameters
    ///
    /// - `stepper`: The underlying stepper to drive.
    /// - `config`: Speed limits for the axis.
    pub fn new(stepper: S, config: AxisConfig) -> Self {
        Self {
            stepper,
            position: Steps::zero(),
            target: Steps::zero(),
            direction: Direction::Positive,
            speed: 0.0,
            acceleration: config.acceleration(),
            n: 0,
            c0: initial_interval_us(config.acceleration()).max(MIN_INTERVAL_US),
            cn: 0.0,
            cmin: (1_000_000.0 / config.max_speed()).max(MIN_INTERVAL_US),
            step_interval_us: 0,
            last_step: MicroSeconds::zero(),
        }
    }

    /// Returns the current position of the axis.
    pub fn position(&self) -> Steps {
        self.position
    }

    /// Returns the current target of the axis.
    pub fn target(&self) -> Steps {
        self.target
    }

    /// Returns the current speed in steps per second; negative when moving
    /// in the negative direction.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Checks whether the axis is still moving or has distance left to go.
    pub fn is_running(&self) -> bool {
        self.speed != 0.0 || self.distance_to_go() != 0
    }

    fn distance_to_go(&self) -> i64 {
        self.position.distance_to(self.target)
    }

    /// Takes a step if one is due.
    ///
    /// # Returns
    ///
    /// - `true`: if a step was due (and taken, unless it would overflow the
    ///   step count).
    /// - `false`: if the axis is stopped or the step interval has not yet
    ///   elapsed.
    fn step_if_due(&mut self, now: MicroSeconds) -> bool {
        if self.step_interval_us == 0 {
            return false;
        }
        if now.elapsed_since(self.last_step) < self.step_interval_us {
            return false;
        }

        if let Some(next_position) = self.position.step(self.direction) {
            self.stepper.step(self.direction);
            self.position = next_position;
        }
        self.last_step = now;
        true
    }

    /// Computes the interval and speed for the next step.
    ///
    /// Called after every step and whenever the target changes.
    fn compute_new_speed(&mut self) {
        let distance = self.distance_to_go();
        let steps_to_stop =
            ((self.speed * self.speed) / (2.0 * self.acceleration)) as i64;

        if distance == 0 && steps_to_stop <= 1 {
            // On target and slow enough to stop dead.
            self.step_interval_us = 0;
            self.speed = 0.0;
            self.n = 0;
            return;
        }

        let remaining = distance.abs();
        match Direction::towards(distance) {
            Some(wanted) if self.n > 0 => {
                // Accelerating or cruising: start to decelerate if we would
                // overshoot, or if we are heading the wrong way.
                if steps_to_stop >= remaining || self.direction != wanted {
                    self.n = -(i32::try_from(steps_to_stop).unwrap_or(i32::MAX));
                }
            }
            Some(wanted) if self.n < 0 => {
                // Decelerating: accelerate again if there is room and we are
                // heading the right way.
                if steps_to_stop < remaining && self.direction == wanted {
                    self.n = -self.n;
                }
            }
            _ => {}
        }

        if self.n == 0 {
            // First step from rest.
            self.cn = self.c0;
            self.direction = Direction::towards(distance).unwrap_or(Direction::Negative);
        } else {
            self.cn -= (2.0 * self.cn) / (4.0 * self.n as f32 + 1.0);
            self.cn = self.cn.max(self.cmin);
        }
        self.n = self.n.saturating_add(1);
        // Zero means stopped, so a moving axis always waits at least 1 µs.
        self.step_interval_us = (self.cn as u32).max(1);
        self.speed = 1_000_000.0 / self.cn;
        if self.direction == Direction::Negative {
            self.speed = -self.speed;
        }
    }
}
impl<S: Stepper> AxisDriver for AccelAxis<S> {
    fn set_target(&mut self, position: Steps) {
        if self.target != position {
            self.target = position;
            self.compute_new_speed();
        }
    }

    fn service(&mut self, now: MicroSeconds) {
        if self.step_if_due(now) {
            self.compute_new_speed();
        }
    }

    fn remaining_distance(&self) -> i64 {
        self.distance_to_go()
    }
}

/// Shortest step interval, in microseconds.
const MIN_INTERVAL_US: f32 = 1.0;

/// Interval of the first step from rest, `0.676 * sqrt(2 / a)` seconds,
/// in microseconds.
fn initial_interval_us(acceleration: f32) -> f32 {
    let root = ((2.0e12 / acceleration) as u64).isqrt();
    0.676 * root as f32
}
