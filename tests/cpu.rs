use dmg_core::cpu::Cpu;
use dmg_core::memory::Memory;
use dmg_core::registers::{Reg8, Reg16};

/// A machine with `program` at the cartridge entry point and no boot ROM.
fn machine(program: &[u8]) -> (Cpu, Memory) {
    let mut rom = vec![0u8; 0x8000];
    rom[0x100..0x100 + program.len()].copy_from_slice(program);
    (Cpu::new_post_boot(), Memory::without_bios(&rom))
}

#[test]
fn inc_a_wraps_and_leaves_carry_alone() {
    let (mut cpu, mut memory) = machine(&[0x3C]);
    cpu.registers.a = 0xFF;
    cpu.registers.set_byte(Reg8::F, 0x10);

    let cycles = cpu.step(&mut memory);

    assert_eq!(cycles, 1);
    assert_eq!(cpu.registers.a, 0x00);
    let flags = cpu.registers.flags();
    assert!(flags.zero);
    assert!(flags.half_carry);
    assert!(!flags.negative);
    assert!(flags.carry);
    assert_eq!(cpu.registers.pc, 0x101);
}

#[test]
fn sub_sets_borrow_flags() {
    // SUB B
    let (mut cpu, mut memory) = machine(&[0x90]);
    cpu.registers.a = 0x10;
    cpu.registers.b = 0x01;

    cpu.step(&mut memory);

    assert_eq!(cpu.registers.a, 0x0F);
    let flags = cpu.registers.flags();
    assert!(!flags.zero);
    assert!(flags.negative);
    assert!(flags.half_carry);
    assert!(!flags.carry);
}

#[test]
fn adc_chains_the_carry_flag() {
    // ADC A,0xFF with carry set
    let (mut cpu, mut memory) = machine(&[0xCE, 0xFF]);
    cpu.registers.a = 0x01;
    cpu.registers.set_byte(Reg8::F, 0x10);

    let cycles = cpu.step(&mut memory);

    assert_eq!(cycles, 2);
    assert_eq!(cpu.registers.a, 0x01);
    assert!(cpu.registers.flags().carry);
    assert!(cpu.registers.flags().half_carry);
}

#[test]
fn cp_compares_without_writing_a() {
    // CP 0x42
    let (mut cpu, mut memory) = machine(&[0xFE, 0x42]);
    cpu.registers.a = 0x42;

    cpu.step(&mut memory);

    assert_eq!(cpu.registers.a, 0x42);
    assert!(cpu.registers.flags().zero);
    assert!(cpu.registers.flags().negative);
}

#[test]
fn daa_adjusts_a_bcd_sum() {
    // ADD A,B; DAA  (0x15 + 0x27 should read 42 in BCD)
    let (mut cpu, mut memory) = machine(&[0x80, 0x27]);
    cpu.registers.a = 0x15;
    cpu.registers.b = 0x27;

    cpu.step(&mut memory);
    cpu.step(&mut memory);

    assert_eq!(cpu.registers.a, 0x42);
    assert!(!cpu.registers.flags().carry);
    assert!(!cpu.registers.flags().zero);
}

#[test]
fn jr_backwards_lands_before_the_instruction() {
    // JR -2 jumps back onto itself.
    let (mut cpu, mut memory) = machine(&[0x18, 0xFE]);

    let cycles = cpu.step(&mut memory);

    assert_eq!(cycles, 3);
    assert_eq!(cpu.registers.pc, 0x100);
}

#[test]
fn conditional_jump_costs_depend_on_the_branch() {
    // JR NZ,+2 twice, first with the zero flag set.
    let (mut cpu, mut memory) = machine(&[0x20, 0x02, 0x20, 0x02]);
    cpu.registers.set_byte(Reg8::F, 0x80);

    let not_taken = cpu.step(&mut memory);
    assert_eq!(not_taken, 2);
    assert_eq!(cpu.registers.pc, 0x102);

    cpu.registers.set_byte(Reg8::F, 0x00);
    let taken = cpu.step(&mut memory);
    assert_eq!(taken, 3);
    assert_eq!(cpu.registers.pc, 0x106);
}

#[test]
fn call_pushes_the_return_address() {
    // CALL 0x0180; at 0x0180 a RET.
    let mut program = vec![0xCD, 0x80, 0x01];
    program.resize(0x81, 0x00);
    program[0x80] = 0xC9;
    let (mut cpu, mut memory) = machine(&program);

    let call_cycles = cpu.step(&mut memory);
    assert_eq!(call_cycles, 6);
    assert_eq!(cpu.registers.pc, 0x0180);
    assert_eq!(cpu.registers.sp, 0xFFFC);
    assert_eq!(memory.get_word(0xFFFC), 0x0103);

    let ret_cycles = cpu.step(&mut memory);
    assert_eq!(ret_cycles, 4);
    assert_eq!(cpu.registers.pc, 0x0103);
    assert_eq!(cpu.registers.sp, 0xFFFE);
}

#[test]
fn rst_jumps_through_its_vector() {
    // RST 0x28
    let (mut cpu, mut memory) = machine(&[0xEF]);

    let cycles = cpu.step(&mut memory);

    assert_eq!(cycles, 4);
    assert_eq!(cpu.registers.pc, 0x0028);
    assert_eq!(memory.get_word(0xFFFC), 0x0101);
}

#[test]
fn pop_af_cannot_set_the_low_flag_bits() {
    // PUSH BC; POP AF
    let (mut cpu, mut memory) = machine(&[0xC5, 0xF1]);
    cpu.registers.set_word(Reg16::BC, 0x12FF);

    cpu.step(&mut memory);
    cpu.step(&mut memory);

    assert_eq!(cpu.registers.get_word(Reg16::AF), 0x12F0);
}

#[test]
fn ld_hl_sp_offset_sets_carries_from_the_low_byte() {
    // LD HL,SP+1 with SP = 0x00FF
    let (mut cpu, mut memory) = machine(&[0xF8, 0x01]);
    cpu.registers.sp = 0x00FF;

    let cycles = cpu.step(&mut memory);

    assert_eq!(cycles, 3);
    assert_eq!(cpu.registers.get_word(Reg16::HL), 0x0100);
    let flags = cpu.registers.flags();
    assert!(flags.half_carry);
    assert!(flags.carry);
    assert!(!flags.zero);
    assert_eq!(cpu.registers.sp, 0x00FF);
}

#[test]
fn hl_postincrement_loads_move_the_pointer() {
    // LD (HL+),A; LD A,(HL-)
    let (mut cpu, mut memory) = machine(&[0x22, 0x3A]);
    cpu.registers.a = 0x99;
    cpu.registers.set_word(Reg16::HL, 0xC000);

    cpu.step(&mut memory);
    assert_eq!(memory.get_byte(0xC000), 0x99);
    assert_eq!(cpu.registers.get_word(Reg16::HL), 0xC001);

    memory.set_byte(0xC001, 0x77);
    cpu.step(&mut memory);
    assert_eq!(cpu.registers.a, 0x77);
    assert_eq!(cpu.registers.get_word(Reg16::HL), 0xC000);
}

#[test]
fn cb_swap_exchanges_nibbles() {
    // SWAP A
    let (mut cpu, mut memory) = machine(&[0xCB, 0x37]);
    cpu.registers.a = 0xF3;

    let cycles = cpu.step(&mut memory);

    assert_eq!(cycles, 2);
    assert_eq!(cpu.registers.a, 0x3F);
    assert!(!cpu.registers.flags().carry);
    assert!(!cpu.registers.flags().zero);
    assert_eq!(cpu.registers.pc, 0x102);
}

#[test]
fn cb_bit_tests_memory_through_hl() {
    // BIT 7,(HL)
    let (mut cpu, mut memory) = machine(&[0xCB, 0x7E]);
    cpu.registers.set_word(Reg16::HL, 0xC000);
    memory.set_byte(0xC000, 0x80);

    let cycles = cpu.step(&mut memory);

    assert_eq!(cycles, 3);
    assert!(!cpu.registers.flags().zero);
    assert!(cpu.registers.flags().half_carry);
    assert!(!cpu.registers.flags().negative);
}

#[test]
fn cb_set_writes_back_through_hl() {
    // SET 0,(HL)
    let (mut cpu, mut memory) = machine(&[0xCB, 0xC6]);
    cpu.registers.set_word(Reg16::HL, 0xC000);
    memory.set_byte(0xC000, 0x40);

    let cycles = cpu.step(&mut memory);

    assert_eq!(cycles, 4);
    assert_eq!(memory.get_byte(0xC000), 0x41);
}

#[test]
fn cb_srl_shifts_into_carry() {
    // SRL B
    let (mut cpu, mut memory) = machine(&[0xCB, 0x38]);
    cpu.registers.b = 0x01;

    cpu.step(&mut memory);

    assert_eq!(cpu.registers.b, 0x00);
    assert!(cpu.registers.flags().zero);
    assert!(cpu.registers.flags().carry);
}

#[test]
#[should_panic(expected = "unknown")]
fn undefined_opcodes_are_fatal() {
    let (mut cpu, mut memory) = machine(&[0xD3]);
    cpu.step(&mut memory);
}

#[test]
fn halt_parks_the_cpu_at_zero_cost() {
    let (mut cpu, mut memory) = machine(&[0x76, 0x00]);

    assert_eq!(cpu.step(&mut memory), 1);
    assert!(cpu.halted);
    assert_eq!(cpu.step(&mut memory), 0);
    assert!(cpu.halted);
    assert_eq!(cpu.registers.pc, 0x101);
}

#[test]
fn ei_takes_effect_after_the_following_instruction() {
    // EI; NOP; NOP
    let (mut cpu, mut memory) = machine(&[0xFB, 0x00, 0x00]);

    cpu.step(&mut memory);
    assert!(!cpu.ime);
    cpu.step(&mut memory);
    assert!(cpu.ime);
}

#[test]
fn di_cancels_a_pending_enable() {
    // EI; DI; NOP
    let (mut cpu, mut memory) = machine(&[0xFB, 0xF3, 0x00]);

    cpu.step(&mut memory);
    cpu.step(&mut memory);
    cpu.step(&mut memory);
    assert!(!cpu.ime);
}

#[test]
fn cycle_counter_accumulates_costs() {
    // NOP; LD A,0x12; LD (0xC000),A
    let (mut cpu, mut memory) = machine(&[0x00, 0x3E, 0x12, 0xEA, 0x00, 0xC0]);

    cpu.step(&mut memory);
    cpu.step(&mut memory);
    cpu.step(&mut memory);

    assert_eq!(cpu.cycles, 1 + 2 + 4);
    assert_eq!(memory.get_byte(0xC000), 0x12);
}
