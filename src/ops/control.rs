//! Control flow: relative and absolute jumps, calls, returns and resets.
//! Conditional forms report through [`Cpu::take_branch`] so the dispatcher
//! charges the branch-taken cycle cost; the unconditional forms share the
//! same entries with an always-true condition.

use crate::bits;
use crate::cpu::Cpu;
use crate::registers::Reg16;

use super::Operation;

#[derive(Clone, Copy)]
enum Condition {
    Always,
    NotZero,
    Zero,
    NotCarry,
    Carry,
}

impl Condition {
    fn holds(self, cpu: &Cpu) -> bool {
        let flags = cpu.registers.flags();
        match self {
            Condition::Always => true,
            Condition::NotZero => !flags.zero,
            Condition::Zero => flags.zero,
            Condition::NotCarry => !flags.carry,
            Condition::Carry => flags.carry,
        }
    }
}

fn jump_relative(condition: Condition) -> Operation {
    Operation::branching(2, 2, 3, move |cpu, memory| {
        let offset = bits::to_signed(cpu.fetch_byte(memory));
        if condition.holds(cpu) {
            cpu.registers.offset_word(Reg16::PC, offset);
            cpu.take_branch();
        }
    })
}

fn jump_absolute(condition: Condition) -> Operation {
    Operation::branching(3, 3, 4, move |cpu, memory| {
        let target = cpu.fetch_word(memory);
        if condition.holds(cpu) {
            cpu.registers.pc = target;
            cpu.take_branch();
        }
    })
}

fn call(condition: Condition) -> Operation {
    Operation::branching(3, 3, 6, move |cpu, memory| {
        let target = cpu.fetch_word(memory);
        if condition.holds(cpu) {
            let pc = cpu.registers.pc;
            cpu.push_word(memory, pc);
            cpu.registers.pc = target;
            cpu.take_branch();
        }
    })
}

fn conditional_return(condition: Condition) -> Operation {
    Operation::branching(1, 2, 5, move |cpu, memory| {
        if condition.holds(cpu) {
            cpu.registers.pc = cpu.pop_word(memory);
            cpu.take_branch();
        }
    })
}

fn reset(vector: u16) -> Operation {
    Operation::new(1, 4, move |cpu, memory| {
        let pc = cpu.registers.pc;
        cpu.push_word(memory, pc);
        cpu.registers.pc = vector;
    })
}

pub(super) fn operations() -> Vec<(u8, Operation)> {
    let mut ops = vec![
        (0x18, jump_relative(Condition::Always)),
        (0x20, jump_relative(Condition::NotZero)),
        (0x28, jump_relative(Condition::Zero)),
        (0x30, jump_relative(Condition::NotCarry)),
        (0x38, jump_relative(Condition::Carry)),
        (0xC3, jump_absolute(Condition::Always)),
        (0xC2, jump_absolute(Condition::NotZero)),
        (0xCA, jump_absolute(Condition::Zero)),
        (0xD2, jump_absolute(Condition::NotCarry)),
        (0xDA, jump_absolute(Condition::Carry)),
        (0xCD, call(Condition::Always)),
        (0xC4, call(Condition::NotZero)),
        (0xCC, call(Condition::Zero)),
        (0xD4, call(Condition::NotCarry)),
        (0xDC, call(Condition::Carry)),
        (0xC0, conditional_return(Condition::NotZero)),
        (0xC8, conditional_return(Condition::Zero)),
        (0xD0, conditional_return(Condition::NotCarry)),
        (0xD8, conditional_return(Condition::Carry)),
    ];

    // JP (HL) jumps to the value of HL, no memory access.
    ops.push((
        0xE9,
        Operation::new(1, 1, |cpu, _| {
            cpu.registers.pc = cpu.registers.get_word(Reg16::HL);
        }),
    ));

    ops.push((
        0xC9,
        Operation::new(1, 4, |cpu, memory| {
            cpu.registers.pc = cpu.pop_word(memory);
        }),
    ));

    // RETI re-enables interrupts with no EI-style delay.
    ops.push((
        0xD9,
        Operation::new(1, 4, |cpu, memory| {
            cpu.registers.pc = cpu.pop_word(memory);
            cpu.set_ime();
        }),
    ));

    for i in 0..8u8 {
        ops.push((0xC7 + i * 8, reset(i as u16 * 8)));
    }

    ops
}
