mod accel_axis;
mod axis_driver;
mod direction;
mod stepper;
mod steps;

pub use accel_axis::AccelAxis;
pub use axis_driver::AxisDriver;
pub use direction::Direction;
pub use stepper::Stepper;
pub use steps::Steps;

#[cfg(test)]
pub use axis_driver::test::TestAxis;
#[cfg(test)]
pub use stepper::test::TestStepper;
