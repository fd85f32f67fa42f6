//! 8-bit loads: the register matrix at 0x40-0x7F, immediates, the indirect
//! forms through BC/DE/HL, and the high-page accesses at 0xFF00+.

use crate::registers::{Reg8, Reg16};

use super::{Operand, Operation};

const HIGH_PAGE: u16 = 0xFF00;

pub(super) fn operations() -> Vec<(u8, Operation)> {
    let mut ops = Vec::new();

    // LD r,r' matrix. 0x76 is HALT, not LD (HL),(HL).
    for (d, dst) in Operand::ORDERED.into_iter().enumerate() {
        for (s, src) in Operand::ORDERED.into_iter().enumerate() {
            let opcode = 0x40 + (d as u8) * 8 + s as u8;
            if opcode == 0x76 {
                continue;
            }
            let cycles = if dst.is_indirect() || src.is_indirect() { 2 } else { 1 };
            ops.push((
                opcode,
                Operation::new(1, cycles, move |cpu, memory| {
                    let value = src.get(cpu, memory);
                    dst.set(cpu, memory, value);
                }),
            ));
        }
    }

    // LD r,d8
    for (i, dst) in Operand::ORDERED.into_iter().enumerate() {
        let cycles = if dst.is_indirect() { 3 } else { 2 };
        ops.push((
            0x06 + (i as u8) * 8,
            Operation::new(2, cycles, move |cpu, memory| {
                let value = cpu.fetch_byte(memory);
                dst.set(cpu, memory, value);
            }),
        ));
    }

    // A through the BC/DE indirections.
    for (opcode, pair) in [(0x02u8, Reg16::BC), (0x12, Reg16::DE)] {
        ops.push((
            opcode,
            Operation::new(1, 2, move |cpu, memory| {
                memory.set_byte(cpu.registers.get_word(pair), cpu.registers.a);
            }),
        ));
        ops.push((
            opcode + 0x08,
            Operation::new(1, 2, move |cpu, memory| {
                cpu.registers.a = memory.get_byte(cpu.registers.get_word(pair));
            }),
        ));
    }

    // A through HL with post-increment/post-decrement.
    ops.push((
        0x22,
        Operation::new(1, 2, |cpu, memory| {
            memory.set_byte(cpu.registers.get_word(Reg16::HL), cpu.registers.a);
            cpu.registers.increment_word(Reg16::HL, 1);
        }),
    ));
    ops.push((
        0x32,
        Operation::new(1, 2, |cpu, memory| {
            memory.set_byte(cpu.registers.get_word(Reg16::HL), cpu.registers.a);
            cpu.registers.decrement_word(Reg16::HL, 1);
        }),
    ));
    ops.push((
        0x2A,
        Operation::new(1, 2, |cpu, memory| {
            cpu.registers.a = memory.get_byte(cpu.registers.get_word(Reg16::HL));
            cpu.registers.increment_word(Reg16::HL, 1);
        }),
    ));
    ops.push((
        0x3A,
        Operation::new(1, 2, |cpu, memory| {
            cpu.registers.a = memory.get_byte(cpu.registers.get_word(Reg16::HL));
            cpu.registers.decrement_word(Reg16::HL, 1);
        }),
    ));

    // High-page accesses at 0xFF00 + offset.
    ops.push((
        0xE0,
        Operation::new(2, 3, |cpu, memory| {
            let offset = cpu.fetch_byte(memory);
            memory.set_byte(HIGH_PAGE + offset as u16, cpu.registers.a);
        }),
    ));
    ops.push((
        0xF0,
        Operation::new(2, 3, |cpu, memory| {
            let offset = cpu.fetch_byte(memory);
            cpu.registers.a = memory.get_byte(HIGH_PAGE + offset as u16);
        }),
    ));
    ops.push((
        0xE2,
        Operation::new(1, 2, |cpu, memory| {
            memory.set_byte(
                HIGH_PAGE + cpu.registers.get_byte(Reg8::C) as u16,
                cpu.registers.a,
            );
        }),
    ));
    ops.push((
        0xF2,
        Operation::new(1, 2, |cpu, memory| {
            cpu.registers.a =
                memory.get_byte(HIGH_PAGE + cpu.registers.get_byte(Reg8::C) as u16);
        }),
    ));

    // A through an absolute address.
    ops.push((
        0xEA,
        Operation::new(3, 4, |cpu, memory| {
            let address = cpu.fetch_word(memory);
            memory.set_byte(address, cpu.registers.a);
        }),
    ));
    ops.push((
        0xFA,
        Operation::new(3, 4, |cpu, memory| {
            let address = cpu.fetch_word(memory);
            cpu.registers.a = memory.get_byte(address);
        }),
    ));

    ops
}
