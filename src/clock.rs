//! Machine-cycle counters. Every component that needs to pace itself owns a
//! [`Clock`] and feeds it the cycle cost of each CPU step; a clock with a
//! modulus wraps and raises a one-shot flag the owner polls for period
//! boundaries (frame complete, divider tick, timer tick).

/// Dots per machine cycle. The PPU works in dots; everything else counts
/// machine cycles.
pub const DOTS_PER_M_CYCLE: u32 = 4;

/// A machine-cycle counter with an optional modulus.
#[derive(Clone, Debug, Default)]
pub struct Clock {
    value: u32,
    max: Option<u32>,
    wrapped: bool,
}

impl Clock {
    /// A free-running counter with no modulus.
    pub fn new() -> Self {
        Self::default()
    }

    /// A counter that wraps back into `0..max`.
    pub fn with_max(max: u32) -> Self {
        Self { value: 0, max: Some(max), wrapped: false }
    }

    /// Advance by `delta` machine cycles. The wrap flag reports whether this
    /// particular increment crossed the modulus; it is cleared again by the
    /// next increment that does not.
    pub fn increment(&mut self, delta: u32) {
        self.value += delta;
        match self.max {
            Some(max) if self.value >= max => {
                self.value %= max;
                self.wrapped = true;
            }
            _ => self.wrapped = false,
        }
    }

    pub fn reset(&mut self) {
        self.value = 0;
        self.wrapped = false;
    }

    /// Change the modulus. Takes effect on the next increment.
    pub fn set_max(&mut self, max: u32) {
        self.max = Some(max);
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// The counter value in dots.
    pub fn dots(&self) -> u32 {
        self.value * DOTS_PER_M_CYCLE
    }

    pub fn wrapped(&self) -> bool {
        self.wrapped
    }
}
