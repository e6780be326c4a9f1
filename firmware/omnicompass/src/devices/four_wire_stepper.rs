use arduino_hal::{
    port::{mode::Output, Pin},
    prelude::_unwrap_infallible_UnwrapInfallible,
};
use embedded_hal::digital::{OutputPin, PinState};
use twinstepper::Direction;

/// Coil patterns for full-step drive. Bit `i` drives `pins[i]`.
const FULL_STEP_SEQUENCE: [u8; 4] = [0b0101, 0b0110, 0b1010, 0b1001];

/// Unipolar stepper (28BYJ-48) behind a ULN2003 driver board.
///
/// Each step energizes the next coil pattern of the full-step sequence, so
/// there are no pulse or direction pins and no delays.
pub struct FourWireStepper {
    /// Coil pins in drive order: IN1, IN3, IN2, IN4.
    pins: [Pin<Output>; 4],
    /// Index into [FULL_STEP_SEQUENCE].
    phase: usize,
}

impl FourWireStepper {
    /// Creates a new `FourWireStepper` and energizes its first pattern.
    ///
    /// # Parameters
    ///
    /// - `in1`, `in2`, `in3`, `in4`: Pins wired to the driver inputs of
    ///   the same name.
    pub fn new(
        in1: Pin<Output>,
        in2: Pin<Output>,
        in3: Pin<Output>,
        in4: Pin<Output>,
    ) -> Self {
        let mut stepper = Self {
            pins: [in1, in3, in2, in4],
            phase: 0,
        };
        stepper.energize();
        stepper
    }

    /// Drive the pins with the pattern for the current phase.
    fn energize(&mut self) {
        let pattern = FULL_STEP_SEQUENCE[self.phase];
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            let state = PinState::from(pattern & (1 << bit) != 0);
            pin.set_state(state).unwrap_infallible();
        }
    }
}

/// The `Stepper` interface that allows the stepper to be driven by a
/// `twinstepper` axis.
impl twinstepper::Stepper for FourWireStepper {
    fn step(&mut self, direction: Direction) {
        let len = FULL_STEP_SEQUENCE.len();
        self.phase = match direction {
            Direction::Positive => (self.phase + 1) % len,
            Direction::Negative => (self.phase + len - 1) % len,
        };
        self.energize();
    }
}
