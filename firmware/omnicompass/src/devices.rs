mod clock;
mod four_wire_stepper;
mod serial_rx;

pub use clock::Clock;
pub use four_wire_stepper::FourWireStepper;
pub use serial_rx::{SerialRx, UnoSerial};
