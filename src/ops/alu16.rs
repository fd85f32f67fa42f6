//! 16-bit arithmetic: INC/DEC on the register pairs, ADD HL, and the two
//! signed-displacement stack-pointer forms.

use crate::bits;
use crate::cpu::Cpu;
use crate::registers::{FlagUpdate, Reg16};

use super::Operation;

const PAIRS: [Reg16; 4] = [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::SP];

/// ADD SP,r8 and LD HL,SP+r8 compute carries from the low byte of SP and the
/// unsigned displacement byte, not from the 16-bit sum.
fn stack_offset_flags(cpu: &mut Cpu, sp: u16, byte: u8) {
    cpu.registers.set_flags(FlagUpdate {
        zero: Some(false),
        negative: Some(false),
        half_carry: Some(bits::byte_sum_half_carry(bits::low_byte(sp), byte, 0)),
        carry: Some(bits::byte_sum_carry(bits::low_byte(sp), byte, 0)),
    });
}

pub(super) fn operations() -> Vec<(u8, Operation)> {
    let mut ops = Vec::new();

    for (i, pair) in PAIRS.into_iter().enumerate() {
        let column = i as u8 * 0x10;
        ops.push((
            0x03 + column,
            Operation::new(1, 2, move |cpu, _| {
                cpu.registers.increment_word(pair, 1);
            }),
        ));
        ops.push((
            0x0B + column,
            Operation::new(1, 2, move |cpu, _| {
                cpu.registers.decrement_word(pair, 1);
            }),
        ));
        ops.push((
            0x09 + column,
            Operation::new(1, 2, move |cpu, _| {
                let hl = cpu.registers.get_word(Reg16::HL);
                let value = cpu.registers.get_word(pair);
                cpu.registers.increment_word(Reg16::HL, value);
                cpu.registers.set_flags(FlagUpdate {
                    zero: None,
                    negative: Some(false),
                    half_carry: Some(bits::word_sum_half_carry(hl, value)),
                    carry: Some(bits::word_sum_carry(hl, value)),
                });
            }),
        ));
    }

    ops.push((
        0xE8,
        Operation::new(2, 4, |cpu, memory| {
            let sp = cpu.registers.sp;
            let byte = cpu.fetch_byte(memory);
            cpu.registers.offset_word(Reg16::SP, bits::to_signed(byte));
            stack_offset_flags(cpu, sp, byte);
        }),
    ));
    ops.push((
        0xF8,
        Operation::new(2, 3, |cpu, memory| {
            let sp = cpu.registers.sp;
            let byte = cpu.fetch_byte(memory);
            let sum = sp.wrapping_add_signed(bits::to_signed(byte) as i16);
            cpu.registers.set_word(Reg16::HL, sum);
            stack_offset_flags(cpu, sp, byte);
        }),
    ));

    ops
}
