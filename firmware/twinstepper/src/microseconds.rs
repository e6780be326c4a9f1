/// An instant in microseconds, read from a free-running counter.
///
/// The counter is 32 bits wide and wraps after roughly 71 minutes, so two
/// instants are only ever compared through [MicroSeconds::elapsed_since].
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct MicroSeconds(u32);
impl MicroSeconds {
    /// Creates a new `MicroSeconds`.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// The instant at which the counter starts.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Returns the value as a `u32`.
    pub fn get_value(&self) -> u32 {
        self.0
    }

    /// Returns the number of microseconds from `earlier` to this instant.
    ///
    /// This is correct across one wrap of the counter.
    pub fn elapsed_since(&self, earlier: MicroSeconds) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Returns the instant `us` microseconds after this one.
    pub fn wrapping_add(&self, us: u32) -> MicroSeconds {
        MicroSeconds(self.0.wrapping_add(us))
    }
}
