//! The CB-prefixed table: rotates, shifts, SWAP, and the single-bit
//! BIT/RES/SET families. All 256 encodings are defined, each covering the
//! eight operand slots in matrix order.
//!
//! Cycle costs here include the prefix fetch.

use crate::bits;
use crate::registers::FlagUpdate;

use super::{Operand, Operation};

/// A shift step: takes the operand value and the incoming carry flag,
/// returns the result and the outgoing carry.
type ShiftFn = fn(u8, bool) -> (u8, bool);

fn rotate_left_circular(value: u8, _: bool) -> (u8, bool) {
    (value.rotate_left(1), bits::bit(value, 7))
}

fn rotate_right_circular(value: u8, _: bool) -> (u8, bool) {
    (value.rotate_right(1), bits::bit(value, 0))
}

fn rotate_left(value: u8, carry: bool) -> (u8, bool) {
    ((value << 1) | carry as u8, bits::bit(value, 7))
}

fn rotate_right(value: u8, carry: bool) -> (u8, bool) {
    ((value >> 1) | ((carry as u8) << 7), bits::bit(value, 0))
}

fn shift_left(value: u8, _: bool) -> (u8, bool) {
    (value << 1, bits::bit(value, 7))
}

/// Arithmetic shift right keeps the sign bit.
fn shift_right_arithmetic(value: u8, _: bool) -> (u8, bool) {
    ((value >> 1) | (value & 0x80), bits::bit(value, 0))
}

fn swap(value: u8, _: bool) -> (u8, bool) {
    (bits::swap_nibbles(value), false)
}

fn shift_right_logical(value: u8, _: bool) -> (u8, bool) {
    (value >> 1, bits::bit(value, 0))
}

/// Rows 0x00-0x38, in encoding order.
const SHIFTS: [ShiftFn; 8] = [
    rotate_left_circular,
    rotate_right_circular,
    rotate_left,
    rotate_right,
    shift_left,
    shift_right_arithmetic,
    swap,
    shift_right_logical,
];

fn shift(operand: Operand, step: ShiftFn) -> Operation {
    let cycles = if operand.is_indirect() { 4 } else { 2 };
    Operation::new(2, cycles, move |cpu, memory| {
        let value = operand.get(cpu, memory);
        let (result, carry_out) = step(value, cpu.registers.flags().carry);
        operand.set(cpu, memory, result);
        cpu.registers.set_flags(FlagUpdate {
            zero: Some(result == 0),
            negative: Some(false),
            half_carry: Some(false),
            carry: Some(carry_out),
        });
    })
}

fn test_bit(operand: Operand, index: u8) -> Operation {
    let cycles = if operand.is_indirect() { 3 } else { 2 };
    Operation::new(2, cycles, move |cpu, memory| {
        let value = operand.get(cpu, memory);
        cpu.registers.set_flags(FlagUpdate {
            zero: Some(!bits::bit(value, index)),
            negative: Some(false),
            half_carry: Some(true),
            carry: None,
        });
    })
}

fn write_bit(operand: Operand, index: u8, on: bool) -> Operation {
    let cycles = if operand.is_indirect() { 4 } else { 2 };
    Operation::new(2, cycles, move |cpu, memory| {
        let value = operand.get(cpu, memory);
        operand.set(cpu, memory, bits::set_bit(value, index, on));
    })
}

pub(super) fn operations() -> Vec<(u8, Operation)> {
    let mut ops = Vec::new();

    for (row, step) in SHIFTS.into_iter().enumerate() {
        for (column, operand) in Operand::ORDERED.into_iter().enumerate() {
            ops.push(((row * 8 + column) as u8, shift(operand, step)));
        }
    }

    for index in 0..8u8 {
        for (column, operand) in Operand::ORDERED.into_iter().enumerate() {
            let column = column as u8;
            ops.push((0x40 + index * 8 + column, test_bit(operand, index)));
            ops.push((0x80 + index * 8 + column, write_bit(operand, index, false)));
            ops.push((0xC0 + index * 8 + column, write_bit(operand, index, true)));
        }
    }

    ops
}
