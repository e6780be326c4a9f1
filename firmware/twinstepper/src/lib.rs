#![cfg_attr(not(test), no_std)]

mod config;
mod controller;
mod coordinator;
mod kinematics;
mod microseconds;
pub mod protocol;

pub use config::AxisConfig;
pub use config::ConfigError;
pub use config::DEFAULT_LINE_CAPACITY;
pub use controller::Controller;
pub use coordinator::MotionCoordinator;
pub use coordinator::MotionEvent;
pub use coordinator::MotionState;
pub use coordinator::Submission;
pub use kinematics::AccelAxis;
pub use kinematics::AxisDriver;
pub use kinematics::Direction;
pub use kinematics::Stepper;
pub use kinematics::Steps;
pub use microseconds::MicroSeconds;

#[cfg(test)]
pub use kinematics::TestAxis;
#[cfg(test)]
pub use kinematics::TestStepper;
