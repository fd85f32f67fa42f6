//! The instruction set as data. Each opcode maps to an [`Operation`] holding
//! its length, machine-cycle costs and a callback; the CPU looks the entry up
//! and runs it, so dispatch is a table walk rather than a match over every
//! encoding. Entries are contributed by the family submodules and collected
//! into two lazily-built 256-entry tables, one for plain opcodes and one for
//! the CB-prefixed set.

mod alu8;
mod alu16;
mod control;
mod load8;
mod load16;
mod misc;
mod prefix;
mod rotate;

use std::sync::OnceLock;

use crate::cpu::Cpu;
use crate::memory::Memory;
use crate::registers::{Reg8, Reg16};

type Callback = Box<dyn Fn(&mut Cpu, &mut Memory) + Send + Sync>;

/// One opcode table entry.
pub struct Operation {
    /// Instruction length in bytes, immediate operands included.
    pub length: u8,
    /// Base cost in machine cycles.
    pub cycles: u8,
    /// Cost when a conditional operation takes its branch.
    pub branch_cycles: Option<u8>,
    callback: Callback,
}

impl Operation {
    pub(crate) fn new(
        length: u8,
        cycles: u8,
        callback: impl Fn(&mut Cpu, &mut Memory) + Send + Sync + 'static,
    ) -> Self {
        Self { length, cycles, branch_cycles: None, callback: Box::new(callback) }
    }

    pub(crate) fn branching(
        length: u8,
        cycles: u8,
        branch_cycles: u8,
        callback: impl Fn(&mut Cpu, &mut Memory) + Send + Sync + 'static,
    ) -> Self {
        Self {
            length,
            cycles,
            branch_cycles: Some(branch_cycles),
            callback: Box::new(callback),
        }
    }

    pub fn execute(&self, cpu: &mut Cpu, memory: &mut Memory) {
        (self.callback)(cpu, memory)
    }
}

/// An 8-bit operand slot: a register, or the byte HL points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Operand {
    Reg(Reg8),
    HlIndirect,
}

impl Operand {
    /// Operand order used by the register-matrix encodings: B, C, D, E, H,
    /// L, (HL), A.
    pub(crate) const ORDERED: [Operand; 8] = [
        Operand::Reg(Reg8::B),
        Operand::Reg(Reg8::C),
        Operand::Reg(Reg8::D),
        Operand::Reg(Reg8::E),
        Operand::Reg(Reg8::H),
        Operand::Reg(Reg8::L),
        Operand::HlIndirect,
        Operand::Reg(Reg8::A),
    ];

    pub(crate) fn get(self, cpu: &Cpu, memory: &Memory) -> u8 {
        match self {
            Operand::Reg(reg) => cpu.registers.get_byte(reg),
            Operand::HlIndirect => memory.get_byte(cpu.registers.get_word(Reg16::HL)),
        }
    }

    pub(crate) fn set(self, cpu: &mut Cpu, memory: &mut Memory, value: u8) {
        match self {
            Operand::Reg(reg) => cpu.registers.set_byte(reg, value),
            Operand::HlIndirect => {
                memory.set_byte(cpu.registers.get_word(Reg16::HL), value)
            }
        }
    }

    pub(crate) fn is_indirect(self) -> bool {
        self == Operand::HlIndirect
    }
}

pub type OpcodeTable = [Option<Operation>; 256];

fn collect(families: Vec<Vec<(u8, Operation)>>) -> OpcodeTable {
    let mut table: OpcodeTable = std::array::from_fn(|_| None);
    for (opcode, operation) in families.into_iter().flatten() {
        assert!(
            table[opcode as usize].is_none(),
            "duplicate opcode table entry {opcode:#04X}"
        );
        table[opcode as usize] = Some(operation);
    }
    table
}

/// The primary opcode table. Undefined encodings stay `None`.
pub fn unprefixed() -> &'static OpcodeTable {
    static TABLE: OnceLock<OpcodeTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        collect(vec![
            misc::operations(),
            rotate::operations(),
            alu8::operations(),
            alu16::operations(),
            load8::operations(),
            load16::operations(),
            control::operations(),
        ])
    })
}

/// The secondary table reached through the 0xCB prefix byte. Fully populated.
pub fn prefixed() -> &'static OpcodeTable {
    static TABLE: OnceLock<OpcodeTable> = OnceLock::new();
    TABLE.get_or_init(|| collect(vec![prefix::operations()]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unprefixed_table_covers_every_defined_encoding() {
        // 256 encodings minus the 11 undefined ones and the CB prefix byte.
        assert_eq!(unprefixed().iter().flatten().count(), 244);
        let undefined = [
            0xCB, 0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
        ];
        for opcode in undefined {
            assert!(unprefixed()[opcode as usize].is_none(), "{opcode:#04X}");
        }
    }

    #[test]
    fn prefixed_table_is_full() {
        assert_eq!(prefixed().iter().flatten().count(), 256);
    }

    #[test]
    fn lengths_and_cycles_are_sane() {
        for entry in unprefixed().iter().flatten() {
            assert!((1..=3).contains(&entry.length));
            assert!(entry.cycles >= 1);
            if let Some(branch) = entry.branch_cycles {
                assert!(branch > entry.cycles);
            }
        }
        for entry in prefixed().iter().flatten() {
            assert_eq!(entry.length, 2);
            assert!(entry.cycles >= 2);
        }
    }
}
