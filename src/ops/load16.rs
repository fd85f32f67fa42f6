//! 16-bit loads and the stack operations PUSH/POP.

use crate::registers::Reg16;

use super::Operation;

pub(super) fn operations() -> Vec<(u8, Operation)> {
    let mut ops = Vec::new();

    // LD rr,d16
    for (i, pair) in [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::SP]
        .into_iter()
        .enumerate()
    {
        ops.push((
            0x01 + (i as u8) * 0x10,
            Operation::new(3, 3, move |cpu, memory| {
                let value = cpu.fetch_word(memory);
                cpu.registers.set_word(pair, value);
            }),
        ));
    }

    // LD (a16),SP
    ops.push((
        0x08,
        Operation::new(3, 5, |cpu, memory| {
            let address = cpu.fetch_word(memory);
            memory.set_word(address, cpu.registers.sp);
        }),
    ));

    // LD SP,HL
    ops.push((
        0xF9,
        Operation::new(1, 2, |cpu, _| {
            cpu.registers.sp = cpu.registers.get_word(Reg16::HL);
        }),
    ));

    // PUSH/POP. Writing AF through the pair view keeps the low nibble of F
    // zero, so POP AF cannot smuggle flag bits in.
    for (i, pair) in [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::AF]
        .into_iter()
        .enumerate()
    {
        let column = (i as u8) * 0x10;
        ops.push((
            0xC5 + column,
            Operation::new(1, 4, move |cpu, memory| {
                let value = cpu.registers.get_word(pair);
                cpu.push_word(memory, value);
            }),
        ));
        ops.push((
            0xC1 + column,
            Operation::new(1, 3, move |cpu, memory| {
                let value = cpu.pop_word(memory);
                cpu.registers.set_word(pair, value);
            }),
        ));
    }

    ops
}
