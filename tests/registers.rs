use dmg_core::registers::{FlagUpdate, Reg8, Reg16, Registers};

#[test]
fn pair_views_track_their_halves() {
    let mut registers = Registers::new();
    registers.set_word(Reg16::BC, 0x1234);
    assert_eq!(registers.get_byte(Reg8::B), 0x12);
    assert_eq!(registers.get_byte(Reg8::C), 0x34);

    registers.set_byte(Reg8::H, 0xAB);
    registers.set_byte(Reg8::L, 0xCD);
    assert_eq!(registers.get_word(Reg16::HL), 0xABCD);
}

#[test]
fn f_low_nibble_always_reads_zero() {
    let mut registers = Registers::new();
    registers.set_byte(Reg8::F, 0xFF);
    assert_eq!(registers.get_byte(Reg8::F), 0xF0);

    registers.set_word(Reg16::AF, 0xABCD);
    assert_eq!(registers.get_word(Reg16::AF), 0xABC0);
}

#[test]
fn partial_flag_update_leaves_other_flags_alone() {
    let mut registers = Registers::new();
    registers.set_flags(FlagUpdate {
        zero: Some(true),
        carry: Some(true),
        ..Default::default()
    });
    assert!(registers.flags().zero);
    assert!(registers.flags().carry);

    registers.set_flags(FlagUpdate { zero: Some(false), ..Default::default() });
    let flags = registers.flags();
    assert!(!flags.zero);
    assert!(!flags.negative);
    assert!(!flags.half_carry);
    assert!(flags.carry);
}

#[test]
fn word_arithmetic_wraps() {
    let mut registers = Registers::new();
    registers.set_word(Reg16::SP, 0xFFFF);
    registers.increment_word(Reg16::SP, 2);
    assert_eq!(registers.sp, 0x0001);

    registers.set_word(Reg16::HL, 0x0000);
    registers.decrement_word(Reg16::HL, 1);
    assert_eq!(registers.get_word(Reg16::HL), 0xFFFF);
}

#[test]
fn byte_arithmetic_wraps() {
    let mut registers = Registers::new();
    registers.set_byte(Reg8::A, 0xFF);
    registers.increment_byte(Reg8::A, 1);
    assert_eq!(registers.a, 0x00);

    registers.decrement_byte(Reg8::A, 1);
    assert_eq!(registers.a, 0xFF);
}

#[test]
fn signed_displacement_moves_both_ways() {
    let mut registers = Registers::new();
    registers.set_word(Reg16::PC, 0x0150);
    registers.offset_word(Reg16::PC, -2);
    assert_eq!(registers.pc, 0x014E);
    registers.offset_word(Reg16::PC, 0x10);
    assert_eq!(registers.pc, 0x015E);
}
