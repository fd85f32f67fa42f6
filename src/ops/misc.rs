//! NOP, HALT, STOP and the interrupt master-enable instructions.

use super::Operation;

pub(super) fn operations() -> Vec<(u8, Operation)> {
    vec![
        (0x00, Operation::new(1, 1, |_, _| {})),
        (
            0x10,
            Operation::new(1, 1, |cpu, _| {
                cpu.stopped = true;
            }),
        ),
        (
            0x76,
            Operation::new(1, 1, |cpu, _| {
                cpu.halted = true;
            }),
        ),
        (
            0xF3,
            Operation::new(1, 1, |cpu, _| {
                cpu.clear_ime();
            }),
        ),
        (
            0xFB,
            Operation::new(1, 1, |cpu, _| {
                cpu.request_ime();
            }),
        ),
    ]
}
