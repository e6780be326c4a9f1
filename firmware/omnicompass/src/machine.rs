use crate::devices::{Clock, FourWireStepper, SerialRx, UnoSerial};
use arduino_hal::{
    default_serial, delay_ms, pins, prelude::*, Peripherals, Pins,
};
use heapless::Vec;
use twinstepper::{
    protocol::OverflowPolicy, AccelAxis, AxisConfig, Controller,
    DEFAULT_LINE_CAPACITY,
};

type Axis = AccelAxis<FourWireStepper>;

/// Most bytes taken from the receive queue in one tick.
const RX_BURST: usize = 64;

pub struct Machine {
    serial: UnoSerial,
    serial_rx: SerialRx,
    clock: Clock,
    controller: Controller<Axis, Axis, DEFAULT_LINE_CAPACITY>,
}

impl Machine {
    const BAUD_RATE: u32 = 115200;

    pub fn new() -> Self {
        let peripherals: Peripherals = unsafe { Peripherals::steal() };
        let pins: Pins = pins!(peripherals);
        let mut serial = default_serial!(peripherals, pins, Self::BAUD_RATE);

        let clock = Clock::new(peripherals.TC1);

        // Motor A on D2..D5, motor B on D6..D9, as IN1..IN4.
        let motor_a = FourWireStepper::new(
            pins.d2.into_output().downgrade(),
            pins.d3.into_output().downgrade(),
            pins.d4.into_output().downgrade(),
            pins.d5.into_output().downgrade(),
        );
        let motor_b = FourWireStepper::new(
            pins.d6.into_output().downgrade(),
            pins.d7.into_output().downgrade(),
            pins.d8.into_output().downgrade(),
            pins.d9.into_output().downgrade(),
        );

        let controller = Controller::new(
            AccelAxis::new(motor_a, AxisConfig::default()),
            AccelAxis::new(motor_b, AxisConfig::default()),
            OverflowPolicy::default(),
        );

        // Announce the machine!
        delay_ms(100);
        controller.announce(&mut serial).unwrap_infallible();
        let serial_rx = SerialRx::listen(&mut serial);

        Self {
            serial,
            serial_rx,
            clock,
            controller,
        }
    }

    /// Run one tick of the poll loop.
    pub fn service(&mut self) {
        let input: Vec<u8, RX_BURST> = core::iter::from_fn(|| self.read_byte())
            .take(RX_BURST)
            .collect();
        let now = self.clock.now();
        self.controller
            .run_iteration(input, &mut self.serial, now)
            .unwrap_infallible();
    }

    /// Read a received byte, if one has arrived.
    fn read_byte(&mut self) -> Option<u8> {
        match self.serial_rx.read() {
            Ok(byte) => Some(byte),
            Err(nb::Error::WouldBlock) => None,
            Err(nb::Error::Other(never)) => match never {},
        }
    }
}
