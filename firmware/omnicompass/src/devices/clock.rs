use arduino_hal::pac::TC1;
use twinstepper::MicroSeconds;

/// Microsecond clock on the free-running 16-bit timer.
///
/// The counter wraps every 262 ms, so [Clock::now] must be called at least
/// that often. The poll loop calls it on every tick.
pub struct Clock {
    timer: TC1,
    last_count: u16,
    now: MicroSeconds,
}

impl Clock {
    /// 16 MHz with a /64 prescaler.
    const US_PER_COUNT: u32 = 4;

    /// Starts the timer in normal mode and creates a new `Clock`.
    pub fn new(timer: TC1) -> Self {
        timer.tccr1a().reset();
        timer.tccr1b().write(|w| w.cs1().prescale_64());
        let last_count = timer.tcnt1().read().bits();
        Self {
            timer,
            last_count,
            now: MicroSeconds::zero(),
        }
    }

    /// Returns the current time.
    pub fn now(&mut self) -> MicroSeconds {
        let count = self.timer.tcnt1().read().bits();
        let elapsed = count.wrapping_sub(self.last_count);
        self.last_count = count;
        self.now = self
            .now
            .wrapping_add(u32::from(elapsed) * Self::US_PER_COUNT);
        self.now
    }
}
