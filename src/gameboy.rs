//! The machine facade. Owns the CPU, memory, PPU, timer and joypad and
//! advances them in lockstep: each CPU step's cycle cost is fed to the PPU
//! and timer, and the boot ROM overlay is unloaded the first time execution
//! leaves it.

use log::debug;

use crate::cpu::Cpu;
use crate::input::Input;
use crate::memory::{BIOS_SIZE, Memory};
use crate::ppu::Ppu;
use crate::timer::Timer;

pub struct GameBoy {
    pub cpu: Cpu,
    pub memory: Memory,
    pub ppu: Ppu,
    pub timer: Timer,
    pub input: Input,
    stop_requested: bool,
}

impl GameBoy {
    /// A machine booting through the given boot ROM.
    pub fn new(bios: &[u8], rom: &[u8]) -> Self {
        Self {
            cpu: Cpu::new(),
            memory: Memory::new(bios, rom),
            ppu: Ppu::new(),
            timer: Timer::new(),
            input: Input::new(),
            stop_requested: false,
        }
    }

    /// A machine starting directly at the cartridge entry point with the
    /// register state a boot ROM would leave behind.
    pub fn without_bios(rom: &[u8]) -> Self {
        Self {
            cpu: Cpu::new_post_boot(),
            memory: Memory::without_bios(rom),
            ppu: Ppu::new(),
            timer: Timer::new(),
            input: Input::new(),
            stop_requested: false,
        }
    }

    /// Run one CPU step and advance the PPU and timer by its cost. Returns
    /// the cost in machine cycles; zero means the CPU is halted or stopped
    /// with nothing to service, and no state changed.
    pub fn step(&mut self) -> u8 {
        let cycles = self.cpu.step(&mut self.memory);
        if self.memory.bios_mapped() && self.cpu.registers.pc as usize >= BIOS_SIZE {
            self.memory.unload_bios();
        }
        self.ppu.step(cycles, &mut self.memory);
        self.timer.step(cycles, &mut self.memory);
        cycles
    }

    /// Step until the PPU finishes the current frame. Returns the machine
    /// cycles consumed, or `None` if the machine parked before the frame
    /// completed.
    pub fn run_frame(&mut self) -> Option<u32> {
        let mut total = 0u32;
        loop {
            let cycles = self.step();
            total += cycles as u32;
            if self.ppu.frame_complete() {
                return Some(total);
            }
            if cycles == 0 {
                return None;
            }
        }
    }

    /// Run until a stop is requested or the machine parks (halted or stopped
    /// with no interrupt that could ever wake it).
    pub fn run(&mut self) {
        loop {
            if self.stop_requested {
                self.stop_requested = false;
                debug!("stop requested");
                return;
            }
            if self.step() == 0 {
                debug!("machine parked");
                return;
            }
        }
    }

    /// Ask [`run`](Self::run) to return before its next step. The request is
    /// consumed when honored.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }
}
