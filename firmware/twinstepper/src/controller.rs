use crate::coordinator::{MotionCoordinator, Submission};
use crate::protocol::{parse_line, LineAssembler, OverflowPolicy, ParseError, Response};
use crate::AxisDriver;
use crate::MicroSeconds;

use ufmt::uWrite;

/// Write an info line, expanding its arguments.
///
/// Only compiled in with the `diagnostics` feature; otherwise the wire
/// carries nothing but responses.
macro_rules! info {
    ($out:expr, $($arg:tt)*) => {{
        #[cfg(feature = "diagnostics")]
        {
            ufmt::uwrite!(&mut *$out, "INFO: ")?;
            ufmt::uwrite!(&mut *$out, $($arg)*)?;
            ufmt::uwrite!(&mut *$out, "\r\n")?;
        }
        #[cfg(not(feature = "diagnostics"))]
        {
            let _ = &$out;
        }
    }};
}

/// Serial command loop for two axes.
///
/// Owns everything the loop needs: the line buffer, the joint motion state
/// and both axes. Each call to [Controller::run_iteration] is one service
/// tick.
///
/// # Type Parameters
///
/// - `A`: driver of axis A.
/// - `B`: driver of axis B.
/// - `N`: line buffer capacity; see [LineAssembler].
pub struct Controller<A, B, const N: usize> {
    assembler: LineAssembler<N>,
    coordinator: MotionCoordinator<A, B>,
}
impl<A: AxisDriver, B: AxisDriver, const N: usize> Controller<A, B, N> {
    /// Creates a new, idle `Controller` with an empty line buffer.
    pub fn new(axis_a: A, axis_b: B, policy: OverflowPolicy) -> Self {
        Self {
            assembler: LineAssembler::new(policy),
            coordinator: MotionCoordinator::new(axis_a, axis_b),
        }
    }

    /// Returns the motion coordinator, which owns both axes.
    pub fn coordinator(&self) -> &MotionCoordinator<A, B> {
        &self.coordinator
    }

    /// Writes the startup banner, if diagnostics are enabled.
    pub fn announce<W: uWrite + ?Sized>(&self, out: &mut W) -> Result<(), W::Error> {
        info!(out, "OMNICOMPASS");
        Ok(())
    }

    /// Runs one service tick.
    ///
    /// Every byte of `input` is handled first, so a move accepted here is
    /// already in place when completion is checked. Then both axes are
    /// serviced and joint completion is polled.
    ///
    /// # Parameters
    ///
    /// - `input`: Bytes received since the previous tick.
    /// - `out`: Serial output for responses.
    /// - `now`: The current time.
    pub fn run_iteration<I, W>(
        &mut self,
        input: I,
        out: &mut W,
        now: MicroSeconds,
    ) -> Result<(), W::Error>
    where
        I: IntoIterator<Item = u8>,
        W: uWrite + ?Sized,
    {
        for byte in input {
            self.handle_byte(byte, out)?;
        }
        self.coordinator.service(now);
        if let Some(event) = self.coordinator.poll() {
            Response::from(event).emit(out)?;
        }
        Ok(())
    }

    fn handle_byte<W: uWrite + ?Sized>(&mut self, byte: u8, out: &mut W) -> Result<(), W::Error> {
        match self.assembler.feed(byte) {
            Ok(None) => Ok(()),
            Ok(Some(line)) => self.handle_line(&line, out),
            Err(error) => Response::Error(error.into()).emit(out),
        }
    }

    fn handle_line<W: uWrite + ?Sized>(&mut self, line: &[u8], out: &mut W) -> Result<(), W::Error> {
        let parsed = core::str::from_utf8(line)
            .map_err(|_| ParseError::InvalidCommand)
            .and_then(parse_line);
        match parsed {
            Ok(None) => Ok(()),
            Ok(Some(request)) => {
                let submission = self.coordinator.submit(request);
                if submission == Submission::Accepted {
                    info!(
                        out,
                        "Move: A={}, B={}",
                        request.target_a.get_value(),
                        request.target_b.get_value()
                    );
                }
                Response::from(submission).emit(out)
            }
            Err(error) => Response::Error(error.into()).emit(out),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::protocol::TestSerial;
    use crate::{AccelAxis, AxisConfig, Steps, TestAxis, TestStepper};

    type AccelController = Controller<AccelAxis<TestStepper>, AccelAxis<TestStepper>, 64>;

    const TICK_US: u32 = 200;

    /// A controller on two simulated motors, and their steppers.
    fn accel_controller() -> (AccelController, TestStepper, TestStepper) {
        let stepper_a = TestStepper::new(0);
        let stepper_b = TestStepper::new(0);
        let controller = Controller::new(
            AccelAxis::new(stepper_a.clone(), AxisConfig::default()),
            AccelAxis::new(stepper_b.clone(), AxisConfig::default()),
            OverflowPolicy::default(),
        );
        (controller, stepper_a, stepper_b)
    }

    /// Protocol responses written so far, skipping any diagnostics.
    fn responses(serial: &TestSerial) -> Vec<&str> {
        serial
            .lines()
            .into_iter()
            .filter(|line| !line.starts_with("INFO: "))
            .collect()
    }

    /// Drives a controller with scripted input and a simulated clock.
    struct Harness<A, B, const N: usize> {
        controller: Controller<A, B, N>,
        serial: TestSerial,
        now: MicroSeconds,
    }
    impl<A: AxisDriver, B: AxisDriver, const N: usize> Harness<A, B, N> {
        fn new(controller: Controller<A, B, N>) -> Self {
            Self {
                controller,
                serial: TestSerial::new(),
                now: MicroSeconds::zero(),
            }
        }

        /// Runs one tick with `input`.
        fn send(&mut self, input: &[u8]) {
            self.now = self.now.wrapping_add(TICK_US);
            self.controller
                .run_iteration(input.iter().copied(), &mut self.serial, self.now)
                .unwrap();
        }

        /// Runs `ticks` ticks with no input.
        fn idle(&mut self, ticks: u32) {
            for _ in 0..ticks {
                self.send(b"");
            }
        }

        /// Runs ticks with no input until a response appears, returning the
        /// number of ticks it took.
        fn idle_until_response(&mut self, max_ticks: u32) -> u32 {
            for tick in 1..=max_ticks {
                self.send(b"");
                if !responses(&self.serial).is_empty() {
                    return tick;
                }
            }
            panic!("no response after {} ticks", max_ticks);
        }

        fn take_responses(&mut self) -> Vec<String> {
            let taken = responses(&self.serial)
                .into_iter()
                .map(String::from)
                .collect();
            self.serial.clear();
            taken
        }
    }

    #[test]
    fn test_goto_busy_complete() {
        let (controller, stepper_a, stepper_b) = accel_controller();
        let mut harness = Harness::new(controller);

        harness.send(b"GOTO 2048 -2048\n");
        assert_eq!(vec!["ok"], harness.take_responses());

        // A fifth of a second in, both motors are under way.
        harness.idle(1_000);
        assert!(harness.take_responses().is_empty());
        assert!(stepper_a.pulses() > 0);
        assert!(stepper_b.pulses() > 0);

        harness.send(b"GOTO 10 10\n");
        assert_eq!(vec!["busy"], harness.take_responses());
        assert_eq!(Steps::new(2048), harness.controller.coordinator().axis_a().target());
        assert_eq!(Steps::new(-2048), harness.controller.coordinator().axis_b().target());

        harness.idle_until_response(200_000);
        assert_eq!(vec!["complete"], harness.take_responses());
        assert_eq!(2048, stepper_a.get_position());
        assert_eq!(-2048, stepper_b.get_position());

        harness.idle(5_000);
        assert!(harness.take_responses().is_empty());

        harness.send(b"GOTO 10 10\n");
        assert_eq!(vec!["ok"], harness.take_responses());
    }

    #[test]
    fn test_goto_current_position_completes_at_once() {
        let (controller, stepper_a, _) = accel_controller();
        let mut harness = Harness::new(controller);

        harness.send(b"GOTO 0 0\r\n");
        assert_eq!(vec!["ok", "complete"], harness.take_responses());
        assert_eq!(0, stepper_a.pulses());

        harness.idle(10);
        assert!(harness.take_responses().is_empty());
    }

    #[test]
    fn test_errors_and_noops() {
        let (controller, _, _) = accel_controller();
        let mut harness = Harness::new(controller);

        harness.send(b"GOTO 100\nFOO 1 2\n\n   \n\t\r\nGOTO abc 5\n");
        assert_eq!(
            vec![
                "error invalid command",
                "error invalid command",
                "error invalid command"
            ],
            harness.take_responses()
        );

        harness.send(b"GOTO \xff 1\n");
        assert_eq!(vec!["error invalid command"], harness.take_responses());
        assert_eq!(
            crate::coordinator::MotionState::Idle,
            harness.controller.coordinator().state()
        );
    }

    #[test]
    fn test_line_too_long() {
        let (controller, _, _) = accel_controller();
        let mut harness = Harness::new(controller);

        let mut long_line = b"GOTO 1 2 ".repeat(10);
        long_line.push(b'\n');
        harness.send(&long_line);
        assert_eq!(vec!["error line too long"], harness.take_responses());

        harness.send(b"GOTO 0 0\n");
        assert_eq!(vec!["ok", "complete"], harness.take_responses());
    }

    #[test]
    fn test_line_split_across_ticks() {
        let mut harness: Harness<TestAxis, TestAxis, 64> = Harness::new(Controller::new(
            TestAxis::new(0, 1),
            TestAxis::new(0, 1),
            OverflowPolicy::Restart,
        ));

        harness.send(b"go");
        harness.send(b"to 2 ");
        assert!(harness.take_responses().is_empty());
        harness.send(b"1\n");
        assert_eq!(vec!["ok"], harness.take_responses());
        assert_eq!(1, harness.idle_until_response(10));
        assert_eq!(vec!["complete"], harness.take_responses());
    }

    #[test]
    fn test_queued_burst_in_one_tick() {
        let mut harness: Harness<TestAxis, TestAxis, 64> = Harness::new(Controller::new(
            TestAxis::new(0, 1),
            TestAxis::new(0, 1),
            OverflowPolicy::default(),
        ));

        // Everything a 64-slot receive queue can hold between two ticks.
        let burst = b"GOTO 4 4\r\n\nFOO 1 2\nGOTO 9 9\ngoto 7\nGOTO 3 3\nGOTO -1 -2\r\n";
        assert!(burst.len() <= 63);
        harness.send(burst);
        assert_eq!(
            vec!["ok", "error invalid command", "busy", "error invalid command", "busy", "busy"],
            harness.take_responses()
        );
        assert_eq!(&[Steps::new(4)], harness.controller.coordinator().axis_a().targets_set());
    }

    #[test]
    fn test_moves_are_handled_before_completion() {
        let mut harness: Harness<TestAxis, TestAxis, 64> = Harness::new(Controller::new(
            TestAxis::new(0, 1),
            TestAxis::new(0, 1),
            OverflowPolicy::default(),
        ));

        harness.send(b"GOTO 1 1\n");
        assert_eq!(vec!["ok", "complete"], harness.take_responses());

        // Both lines arrive in one tick: the first is accepted, the second
        // finds it still in flight.
        harness.send(b"GOTO 3 3\nGOTO 4 4\n");
        assert_eq!(vec!["ok", "busy"], harness.take_responses());
        assert_eq!(
            &[Steps::new(1), Steps::new(3)],
            harness.controller.coordinator().axis_a().targets_set()
        );
    }

    #[cfg(feature = "diagnostics")]
    #[test]
    fn test_diagnostics() {
        let (controller, _, _) = accel_controller();
        let mut serial = TestSerial::new();
        controller.announce(&mut serial).unwrap();
        assert_eq!("INFO: OMNICOMPASS\r\n", serial.written());

        let mut harness = Harness::new(controller);
        harness.send(b"GOTO 5 -5\n");
        assert_eq!(
            vec!["INFO: Move: A=5, B=-5", "ok"],
            harness.serial.lines()
        );
    }

    #[cfg(not(feature = "diagnostics"))]
    #[test]
    fn test_no_diagnostics() {
        let (controller, _, _) = accel_controller();
        let mut serial = TestSerial::new();
        controller.announce(&mut serial).unwrap();
        assert_eq!("", serial.written());
    }
}
