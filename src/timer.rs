//! Divider/timer unit. Two modulo clocks: a fixed-rate one for DIV and a
//! TAC-selected one for TIMA. TIMA overflow reloads from TMA and raises the
//! timer interrupt.

use log::debug;

use crate::clock::Clock;
use crate::interrupts::Interrupt;
use crate::memory::Memory;

/// DIV ticks once per 64 machine cycles.
const DIV_PERIOD: u32 = 64;

/// TIMA periods in machine cycles, indexed by the TAC rate select.
const TIMA_PERIODS: [u32; 4] = [256, 4, 16, 64];

pub struct Timer {
    div_clock: Clock,
    tima_clock: Clock,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self {
            div_clock: Clock::with_max(DIV_PERIOD),
            tima_clock: Clock::with_max(TIMA_PERIODS[0]),
        }
    }

    /// Advance by the given machine-cycle cost.
    pub fn step(&mut self, cycles: u8, memory: &mut Memory) {
        self.div_clock.increment(cycles as u32);
        if self.div_clock.wrapped() {
            memory.set_div(memory.div().wrapping_add(1));
        }

        let control = memory.timer_control();
        if !control.enabled {
            return;
        }
        self.tima_clock.set_max(TIMA_PERIODS[control.select as usize]);
        self.tima_clock.increment(cycles as u32);
        if !self.tima_clock.wrapped() {
            return;
        }
        if memory.tima() == 0xFF {
            let tma = memory.tma();
            memory.set_tima(tma);
            memory.request_interrupt(Interrupt::Timer);
            debug!("TIMA overflow, reloaded from TMA={tma:#04X}");
        } else {
            memory.set_tima(memory.tima().wrapping_add(1));
        }
    }
}
