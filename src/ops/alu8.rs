//! 8-bit arithmetic and logic: INC/DEC, the accumulator matrix at 0x80-0xBF,
//! the immediate forms, and the accumulator adjustments DAA/CPL/SCF/CCF.

use crate::bits;
use crate::cpu::Cpu;
use crate::memory::Memory;
use crate::registers::FlagUpdate;

use super::{Operand, Operation};

fn add(cpu: &mut Cpu, value: u8, with_carry: bool) {
    let a = cpu.registers.a;
    let carry = (with_carry && cpu.registers.flags().carry) as u8;
    let result = a.wrapping_add(value).wrapping_add(carry);
    cpu.registers.a = result;
    cpu.registers.set_flags(FlagUpdate {
        zero: Some(result == 0),
        negative: Some(false),
        half_carry: Some(bits::byte_sum_half_carry(a, value, carry)),
        carry: Some(bits::byte_sum_carry(a, value, carry)),
    });
}

/// SUB/SBC and CP share everything except whether the result lands in A.
fn subtract(cpu: &mut Cpu, value: u8, with_carry: bool, keep_result: bool) {
    let a = cpu.registers.a;
    let carry = (with_carry && cpu.registers.flags().carry) as u8;
    let result = a.wrapping_sub(value).wrapping_sub(carry);
    if keep_result {
        cpu.registers.a = result;
    }
    cpu.registers.set_flags(FlagUpdate {
        zero: Some(result == 0),
        negative: Some(true),
        half_carry: Some(bits::byte_difference_half_carry(a, value, carry)),
        carry: Some(bits::byte_difference_carry(a, value, carry)),
    });
}

fn and(cpu: &mut Cpu, value: u8) {
    let result = cpu.registers.a & value;
    cpu.registers.a = result;
    cpu.registers.set_flags(FlagUpdate {
        zero: Some(result == 0),
        negative: Some(false),
        half_carry: Some(true),
        carry: Some(false),
    });
}

fn xor(cpu: &mut Cpu, value: u8) {
    let result = cpu.registers.a ^ value;
    cpu.registers.a = result;
    cpu.registers.set_flags(FlagUpdate {
        zero: Some(result == 0),
        negative: Some(false),
        half_carry: Some(false),
        carry: Some(false),
    });
}

fn or(cpu: &mut Cpu, value: u8) {
    let result = cpu.registers.a | value;
    cpu.registers.a = result;
    cpu.registers.set_flags(FlagUpdate {
        zero: Some(result == 0),
        negative: Some(false),
        half_carry: Some(false),
        carry: Some(false),
    });
}

/// INC leaves the carry flag alone.
fn increment(cpu: &mut Cpu, memory: &mut Memory, operand: Operand) {
    let old = operand.get(cpu, memory);
    let result = old.wrapping_add(1);
    operand.set(cpu, memory, result);
    cpu.registers.set_flags(FlagUpdate {
        zero: Some(result == 0),
        negative: Some(false),
        half_carry: Some(bits::byte_sum_half_carry(old, 1, 0)),
        carry: None,
    });
}

/// DEC leaves the carry flag alone.
fn decrement(cpu: &mut Cpu, memory: &mut Memory, operand: Operand) {
    let old = operand.get(cpu, memory);
    let result = old.wrapping_sub(1);
    operand.set(cpu, memory, result);
    cpu.registers.set_flags(FlagUpdate {
        zero: Some(result == 0),
        negative: Some(true),
        half_carry: Some(bits::byte_difference_half_carry(old, 1, 0)),
        carry: None,
    });
}

/// DAA: adjust A back to packed BCD after an addition or subtraction.
fn decimal_adjust(cpu: &mut Cpu) {
    let flags = cpu.registers.flags();
    let mut a = cpu.registers.a;
    let mut carry = flags.carry;
    if !flags.negative {
        if flags.carry || a > 0x99 {
            a = a.wrapping_add(0x60);
            carry = true;
        }
        if flags.half_carry || (a & 0x0F) > 0x09 {
            a = a.wrapping_add(0x06);
        }
    } else {
        if flags.carry {
            a = a.wrapping_sub(0x60);
        }
        if flags.half_carry {
            a = a.wrapping_sub(0x06);
        }
    }
    cpu.registers.a = a;
    cpu.registers.set_flags(FlagUpdate {
        zero: Some(a == 0),
        negative: None,
        half_carry: Some(false),
        carry: Some(carry),
    });
}

pub(super) fn operations() -> Vec<(u8, Operation)> {
    let mut ops = Vec::new();

    for (i, operand) in Operand::ORDERED.into_iter().enumerate() {
        let column = i as u8 * 8;
        let step_cycles = if operand.is_indirect() { 3 } else { 1 };
        ops.push((
            0x04 + column,
            Operation::new(1, step_cycles, move |cpu, memory| {
                increment(cpu, memory, operand)
            }),
        ));
        ops.push((
            0x05 + column,
            Operation::new(1, step_cycles, move |cpu, memory| {
                decrement(cpu, memory, operand)
            }),
        ));

        let cycles = if operand.is_indirect() { 2 } else { 1 };
        let row = i as u8;
        ops.push((
            0x80 + row,
            Operation::new(1, cycles, move |cpu, memory| {
                let value = operand.get(cpu, memory);
                add(cpu, value, false);
            }),
        ));
        ops.push((
            0x88 + row,
            Operation::new(1, cycles, move |cpu, memory| {
                let value = operand.get(cpu, memory);
                add(cpu, value, true);
            }),
        ));
        ops.push((
            0x90 + row,
            Operation::new(1, cycles, move |cpu, memory| {
                let value = operand.get(cpu, memory);
                subtract(cpu, value, false, true);
            }),
        ));
        ops.push((
            0x98 + row,
            Operation::new(1, cycles, move |cpu, memory| {
                let value = operand.get(cpu, memory);
                subtract(cpu, value, true, true);
            }),
        ));
        ops.push((
            0xA0 + row,
            Operation::new(1, cycles, move |cpu, memory| {
                let value = operand.get(cpu, memory);
                and(cpu, value);
            }),
        ));
        ops.push((
            0xA8 + row,
            Operation::new(1, cycles, move |cpu, memory| {
                let value = operand.get(cpu, memory);
                xor(cpu, value);
            }),
        ));
        ops.push((
            0xB0 + row,
            Operation::new(1, cycles, move |cpu, memory| {
                let value = operand.get(cpu, memory);
                or(cpu, value);
            }),
        ));
        ops.push((
            0xB8 + row,
            Operation::new(1, cycles, move |cpu, memory| {
                let value = operand.get(cpu, memory);
                subtract(cpu, value, false, false);
            }),
        ));
    }

    ops.push((
        0xC6,
        Operation::new(2, 2, |cpu, memory| {
            let value = cpu.fetch_byte(memory);
            add(cpu, value, false);
        }),
    ));
    ops.push((
        0xCE,
        Operation::new(2, 2, |cpu, memory| {
            let value = cpu.fetch_byte(memory);
            add(cpu, value, true);
        }),
    ));
    ops.push((
        0xD6,
        Operation::new(2, 2, |cpu, memory| {
            let value = cpu.fetch_byte(memory);
            subtract(cpu, value, false, true);
        }),
    ));
    ops.push((
        0xDE,
        Operation::new(2, 2, |cpu, memory| {
            let value = cpu.fetch_byte(memory);
            subtract(cpu, value, true, true);
        }),
    ));
    ops.push((
        0xE6,
        Operation::new(2, 2, |cpu, memory| {
            let value = cpu.fetch_byte(memory);
            and(cpu, value);
        }),
    ));
    ops.push((
        0xEE,
        Operation::new(2, 2, |cpu, memory| {
            let value = cpu.fetch_byte(memory);
            xor(cpu, value);
        }),
    ));
    ops.push((
        0xF6,
        Operation::new(2, 2, |cpu, memory| {
            let value = cpu.fetch_byte(memory);
            or(cpu, value);
        }),
    ));
    ops.push((
        0xFE,
        Operation::new(2, 2, |cpu, memory| {
            let value = cpu.fetch_byte(memory);
            subtract(cpu, value, false, false);
        }),
    ));

    ops.push((0x27, Operation::new(1, 1, |cpu, _| decimal_adjust(cpu))));
    ops.push((
        0x2F,
        Operation::new(1, 1, |cpu, _| {
            cpu.registers.a = !cpu.registers.a;
            cpu.registers.set_flags(FlagUpdate {
                negative: Some(true),
                half_carry: Some(true),
                ..Default::default()
            });
        }),
    ));
    ops.push((
        0x37,
        Operation::new(1, 1, |cpu, _| {
            cpu.registers.set_flags(FlagUpdate {
                negative: Some(false),
                half_carry: Some(false),
                carry: Some(true),
                ..Default::default()
            });
        }),
    ));
    ops.push((
        0x3F,
        Operation::new(1, 1, |cpu, _| {
            let carry = cpu.registers.flags().carry;
            cpu.registers.set_flags(FlagUpdate {
                negative: Some(false),
                half_carry: Some(false),
                carry: Some(!carry),
                ..Default::default()
            });
        }),
    ));

    ops
}
