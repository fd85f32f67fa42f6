use dmg_core::gameboy::GameBoy;
use dmg_core::ppu::FRAME_M_CYCLES;

#[test]
fn boot_overlay_unloads_when_execution_leaves_it() {
    // 256 NOPs walk the CPU off the end of the overlay.
    let bios = [0x00u8; 0x100];
    let mut rom = vec![0u8; 0x8000];
    rom[0x0000] = 0xAA;
    // At the entry point, jump straight back into the old overlay range.
    rom[0x0100] = 0xC3;
    let mut gb = GameBoy::new(&bios, &rom);

    assert!(gb.memory.bios_mapped());
    for _ in 0..255 {
        gb.step();
    }
    assert!(gb.memory.bios_mapped());

    gb.step();
    assert_eq!(gb.cpu.registers.pc, 0x0100);
    assert!(!gb.memory.bios_mapped());
    assert_eq!(gb.memory.get_byte(0x0000), 0xAA);

    // Unloading is permanent even with PC back inside the range.
    gb.step();
    assert_eq!(gb.cpu.registers.pc, 0x0000);
    assert!(!gb.memory.bios_mapped());
    assert_eq!(gb.memory.get_byte(0x0000), 0xAA);
}

#[test]
fn run_frame_consumes_one_frame_of_cycles() {
    // A ROM of NOPs; each step costs exactly one machine cycle.
    let mut gb = GameBoy::without_bios(&[]);

    assert_eq!(gb.run_frame(), Some(FRAME_M_CYCLES));
    assert!(gb.ppu.frame_complete());
    assert_eq!(gb.cpu.cycles, FRAME_M_CYCLES as u64);
}

#[test]
fn run_returns_when_the_machine_parks() {
    let mut rom = vec![0u8; 0x8000];
    rom[0x100] = 0x76;
    let mut gb = GameBoy::without_bios(&rom);

    gb.run();
    assert!(gb.cpu.halted);
}

#[test]
fn run_frame_reports_a_parked_machine() {
    let mut rom = vec![0u8; 0x8000];
    rom[0x100] = 0x76;
    let mut gb = GameBoy::without_bios(&rom);

    assert_eq!(gb.run_frame(), None);
}

#[test]
fn a_requested_stop_is_honored_before_stepping() {
    let mut gb = GameBoy::without_bios(&[]);

    gb.request_stop();
    gb.run();
    assert_eq!(gb.cpu.cycles, 0);

    // The request was consumed; a later run proceeds.
    let mut rom = vec![0u8; 0x8000];
    rom[0x100] = 0x76;
    let mut gb = GameBoy::without_bios(&rom);
    gb.request_stop();
    gb.run();
    gb.run();
    assert!(gb.cpu.halted);
}

#[test]
fn a_small_program_runs_end_to_end() {
    // LD A,0x05; ADD A,0x03; LD (0xC000),A; HALT
    let program = [0x3E, 0x05, 0xC6, 0x03, 0xEA, 0x00, 0xC0, 0x76];
    let mut rom = vec![0u8; 0x8000];
    rom[0x100..0x100 + program.len()].copy_from_slice(&program);
    let mut gb = GameBoy::without_bios(&rom);

    gb.run();

    assert_eq!(gb.memory.get_byte(0xC000), 0x08);
    assert!(gb.cpu.halted);
    assert_eq!(gb.cpu.registers.a, 0x08);
}

#[test]
fn ppu_and_timer_advance_with_the_cpu() {
    let mut gb = GameBoy::without_bios(&[]);

    // 64 NOPs: one DIV tick, and the PPU well into line 0's drawing mode.
    for _ in 0..64 {
        gb.step();
    }
    assert_eq!(gb.memory.div(), 1);
    assert_eq!(gb.ppu.line_dot(), 256);
}
