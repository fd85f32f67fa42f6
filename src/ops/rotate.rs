//! The four one-byte accumulator rotates. Unlike their CB-prefixed
//! counterparts these always clear the zero flag.

use crate::bits;
use crate::cpu::Cpu;
use crate::registers::FlagUpdate;

use super::Operation;

fn set_rotate_flags(cpu: &mut Cpu, carry_out: bool) {
    cpu.registers.set_flags(FlagUpdate {
        zero: Some(false),
        negative: Some(false),
        half_carry: Some(false),
        carry: Some(carry_out),
    });
}

pub(super) fn operations() -> Vec<(u8, Operation)> {
    vec![
        // RLCA
        (
            0x07,
            Operation::new(1, 1, |cpu, _| {
                let a = cpu.registers.a;
                cpu.registers.a = a.rotate_left(1);
                set_rotate_flags(cpu, bits::bit(a, 7));
            }),
        ),
        // RRCA
        (
            0x0F,
            Operation::new(1, 1, |cpu, _| {
                let a = cpu.registers.a;
                cpu.registers.a = a.rotate_right(1);
                set_rotate_flags(cpu, bits::bit(a, 0));
            }),
        ),
        // RLA
        (
            0x17,
            Operation::new(1, 1, |cpu, _| {
                let a = cpu.registers.a;
                let carry_in = cpu.registers.flags().carry as u8;
                cpu.registers.a = (a << 1) | carry_in;
                set_rotate_flags(cpu, bits::bit(a, 7));
            }),
        ),
        // RRA
        (
            0x1F,
            Operation::new(1, 1, |cpu, _| {
                let a = cpu.registers.a;
                let carry_in = cpu.registers.flags().carry as u8;
                cpu.registers.a = (a >> 1) | (carry_in << 7);
                set_rotate_flags(cpu, bits::bit(a, 0));
            }),
        ),
    ]
}
