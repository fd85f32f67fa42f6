//! The LR35902 CPU core. Each step either services one pending interrupt or
//! fetches and executes one instruction through the opcode tables in
//! [`crate::ops`], and reports its cost in machine cycles so the caller can
//! advance the rest of the machine by the same amount.

use log::debug;
#[cfg(feature = "cpu-trace")]
use log::trace;

use crate::interrupts::Interrupt;
use crate::memory::Memory;
use crate::ops::{self, Operation};
use crate::registers::{Reg8, Reg16, Registers};

/// Cost of servicing an interrupt, in machine cycles.
const INTERRUPT_DISPATCH_CYCLES: u8 = 5;

/// The prefix byte selecting the secondary opcode table.
const CB_PREFIX: u8 = 0xCB;

pub struct Cpu {
    pub registers: Registers,
    /// Total machine cycles executed since power-on.
    pub cycles: u64,
    /// Interrupt master enable.
    pub ime: bool,
    pub halted: bool,
    pub stopped: bool,
    /// Set by a conditional operation when it takes its branch; selects the
    /// branch cycle cost for the current instruction.
    branch_taken: bool,
    /// EI countdown. IME turns on after the instruction following EI.
    ime_enable_delay: u8,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Power-on state with the boot ROM mapped: everything zeroed, execution
    /// starting at 0x0000.
    pub fn new() -> Self {
        Self {
            registers: Registers::new(),
            cycles: 0,
            ime: false,
            halted: false,
            stopped: false,
            branch_taken: false,
            ime_enable_delay: 0,
        }
    }

    /// The register state the boot ROM leaves behind, for running without
    /// one. Execution starts at the cartridge entry point.
    pub fn new_post_boot() -> Self {
        let mut cpu = Self::new();
        cpu.registers.a = 0x01;
        cpu.registers.set_byte(Reg8::F, 0xB0);
        cpu.registers.c = 0x13;
        cpu.registers.e = 0xD8;
        cpu.registers.h = 0x01;
        cpu.registers.l = 0x4D;
        cpu.registers.sp = 0xFFFE;
        cpu.registers.pc = 0x0100;
        cpu
    }

    /// Run one step and return its cost in machine cycles. A halted or
    /// stopped CPU with nothing to service costs zero.
    pub fn step(&mut self, memory: &mut Memory) -> u8 {
        if self.service_interrupts(memory) {
            self.cycles += INTERRUPT_DISPATCH_CYCLES as u64;
            return INTERRUPT_DISPATCH_CYCLES;
        }
        if self.halted || self.stopped {
            return 0;
        }

        // EI takes effect after the instruction that follows it, so latch
        // the decision before executing this one.
        let enable_ime_after = self.ime_enable_delay == 1;

        let opcode = self.fetch_byte(memory);
        let (operation, opcode) = if opcode == CB_PREFIX {
            let opcode = self.fetch_byte(memory);
            (table_entry(ops::prefixed(), opcode, self.registers.pc, "CB-prefixed"), opcode)
        } else {
            (table_entry(ops::unprefixed(), opcode, self.registers.pc, "unprefixed"), opcode)
        };

        #[cfg(feature = "cpu-trace")]
        trace!("execute {opcode:#04X} {}", self.debug_state());

        operation.execute(self, memory);

        let cycles = if self.branch_taken {
            self.branch_taken = false;
            operation.branch_cycles.unwrap_or_else(|| {
                panic!("opcode {opcode:#04X} took a branch but has no branch cycle cost")
            })
        } else {
            operation.cycles
        };

        if self.ime_enable_delay > 0 {
            if enable_ime_after {
                self.ime = true;
            }
            self.ime_enable_delay -= 1;
        }

        self.cycles += cycles as u64;
        cycles
    }

    /// Dispatch the highest-priority enabled-and-pending interrupt, if the
    /// master enable allows it. A halted CPU with the master enable clear is
    /// woken by any pending flag but dispatches nothing.
    fn service_interrupts(&mut self, memory: &mut Memory) -> bool {
        if !self.ime {
            if self.halted && memory.interrupt_flags().any() {
                self.halted = false;
            }
            return false;
        }
        let enabled = memory.interrupt_enable();
        let pending = memory.interrupt_flags();
        for kind in Interrupt::ALL {
            if enabled.contains(kind) && pending.contains(kind) {
                debug!("dispatching {kind:?} interrupt to {:#06X}", kind.vector());
                self.ime = false;
                self.ime_enable_delay = 0;
                self.halted = false;
                memory.clear_interrupt(kind);
                let pc = self.registers.pc;
                self.push_word(memory, pc);
                self.registers.set_word(Reg16::PC, kind.vector());
                return true;
            }
        }
        false
    }

    /// Read the byte at PC and advance past it.
    pub fn fetch_byte(&mut self, memory: &Memory) -> u8 {
        let byte = memory.get_byte(self.registers.pc);
        self.registers.increment_word(Reg16::PC, 1);
        byte
    }

    /// Read the little-endian word at PC and advance past it.
    pub fn fetch_word(&mut self, memory: &Memory) -> u16 {
        let word = memory.get_word(self.registers.pc);
        self.registers.increment_word(Reg16::PC, 2);
        word
    }

    pub fn push_word(&mut self, memory: &mut Memory, value: u16) {
        self.registers.decrement_word(Reg16::SP, 2);
        memory.set_word(self.registers.sp, value);
    }

    pub fn pop_word(&mut self, memory: &Memory) -> u16 {
        let value = memory.get_word(self.registers.sp);
        self.registers.increment_word(Reg16::SP, 2);
        value
    }

    /// Called by conditional operations when their condition holds.
    pub fn take_branch(&mut self) {
        self.branch_taken = true;
    }

    /// EI: arm the delayed master enable.
    pub fn request_ime(&mut self) {
        self.ime_enable_delay = 2;
    }

    /// DI: clear the master enable and cancel a pending EI.
    pub fn clear_ime(&mut self) {
        self.ime = false;
        self.ime_enable_delay = 0;
    }

    /// RETI: enable the master enable with no delay.
    pub fn set_ime(&mut self) {
        self.ime = true;
    }

    #[cfg(feature = "cpu-trace")]
    fn debug_state(&self) -> String {
        let r = &self.registers;
        format!(
            "AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X} PC={:04X}",
            r.get_word(Reg16::AF),
            r.get_word(Reg16::BC),
            r.get_word(Reg16::DE),
            r.get_word(Reg16::HL),
            r.sp,
            r.pc,
        )
    }
}

fn table_entry(
    table: &'static ops::OpcodeTable,
    opcode: u8,
    pc: u16,
    kind: &str,
) -> &'static Operation {
    table[opcode as usize].as_ref().unwrap_or_else(|| {
        panic!(
            "unknown {kind} opcode {opcode:#04X} at {:#06X}",
            pc.wrapping_sub(1)
        )
    })
}
