use dmg_core::memory::Memory;
use dmg_core::ppu::{FRAME_M_CYCLES, Mode, Ppu, RGBA, SCREEN_WIDTH};

const LINE_M_CYCLES: u32 = 114;

fn step_cycles(ppu: &mut Ppu, memory: &mut Memory, mut cycles: u32) {
    while cycles > 0 {
        let chunk = cycles.min(4) as u8;
        ppu.step(chunk, memory);
        cycles -= chunk as u32;
    }
}

#[test]
fn modes_progress_across_a_scanline() {
    let mut memory = Memory::without_bios(&[]);
    let mut ppu = Ppu::new();

    ppu.step(4, &mut memory);
    assert_eq!(ppu.mode(), Mode::OamScan);

    // OAM scan covers the first 80 dots.
    step_cycles(&mut ppu, &mut memory, 16);
    assert_eq!(ppu.line_dot(), 80);
    assert_eq!(ppu.mode(), Mode::Drawing);

    // Drawing covers the next 172 dots.
    step_cycles(&mut ppu, &mut memory, 42);
    assert_eq!(ppu.line_dot(), 248);
    assert_eq!(ppu.mode(), Mode::Drawing);
    ppu.step(1, &mut memory);
    assert_eq!(ppu.mode(), Mode::HBlank);

    // HBlank runs out the 456-dot line.
    step_cycles(&mut ppu, &mut memory, 51);
    assert_eq!(ppu.scanline(), 1);
    assert_eq!(ppu.mode(), Mode::OamScan);
    assert_eq!(memory.ly(), 1);
}

#[test]
fn stat_register_tracks_the_mode() {
    let mut memory = Memory::without_bios(&[]);
    let mut ppu = Ppu::new();

    ppu.step(4, &mut memory);
    assert_eq!(memory.get_byte(0xFF41) & 0x03, Mode::OamScan as u8);

    step_cycles(&mut ppu, &mut memory, 20);
    assert_eq!(memory.get_byte(0xFF41) & 0x03, Mode::Drawing as u8);
}

#[test]
fn vblank_is_requested_once_per_frame() {
    let mut memory = Memory::without_bios(&[]);
    let mut ppu = Ppu::new();

    // Step through all 144 visible lines.
    for _ in 0..144 {
        step_cycles(&mut ppu, &mut memory, LINE_M_CYCLES);
    }
    assert_eq!(ppu.mode(), Mode::VBlank);
    assert_eq!(memory.ly(), 144);
    assert!(memory.interrupt_flags().vblank);

    // Still in VBlank: the request does not repeat.
    memory.clear_interrupt(dmg_core::interrupts::Interrupt::VBlank);
    step_cycles(&mut ppu, &mut memory, LINE_M_CYCLES * 5);
    assert_eq!(ppu.mode(), Mode::VBlank);
    assert!(!memory.interrupt_flags().vblank);

    // Run out the frame; the clock wraps and a new one begins.
    step_cycles(&mut ppu, &mut memory, LINE_M_CYCLES * 5);
    assert!(ppu.frame_complete());
    assert_eq!(ppu.mode(), Mode::OamScan);
    assert_eq!(memory.ly(), 0);
    assert_eq!(ppu.scanline(), 0);
}

#[test]
fn frame_clock_wraps_at_the_frame_length() {
    let mut memory = Memory::without_bios(&[]);
    let mut ppu = Ppu::new();

    step_cycles(&mut ppu, &mut memory, FRAME_M_CYCLES - 1);
    assert!(!ppu.frame_complete());
    ppu.step(1, &mut memory);
    assert!(ppu.frame_complete());
    ppu.step(1, &mut memory);
    assert!(!ppu.frame_complete());
}

#[test]
fn background_renders_through_the_palette() {
    let mut memory = Memory::without_bios(&[]);
    let mut ppu = Ppu::new();

    // LCD and background on, unsigned tile data, map at 0x9800.
    memory.set_byte(0xFF40, 0b1001_0001);
    // Identity palette: color N maps to shade N.
    memory.set_byte(0xFF47, 0b1110_0100);
    // Tile 0, row 0: low plane all ones, high plane zero. Color 1 across.
    memory.set_byte(0x8000, 0xFF);
    memory.set_byte(0x8001, 0x00);

    // Into line 0's HBlank, which renders the line.
    step_cycles(&mut ppu, &mut memory, 64);
    assert_eq!(ppu.mode(), Mode::HBlank);

    // Shade 1 is the light green of the DMG palette.
    assert_eq!(&ppu.frame()[0..RGBA], &[152, 188, 60, 255]);
    // The whole line got the same color.
    let last = (SCREEN_WIDTH - 1) * RGBA;
    assert_eq!(&ppu.frame()[last..last + RGBA], &[152, 188, 60, 255]);
}

#[test]
fn scx_shifts_the_background() {
    let mut memory = Memory::without_bios(&[]);
    let mut ppu = Ppu::new();

    memory.set_byte(0xFF40, 0b1001_0001);
    memory.set_byte(0xFF47, 0b1110_0100);
    // Tile 0 row 0: leftmost pixel color 1, rest color 0. Only map
    // column 0 uses tile 0; the rest point at blank tile 1.
    memory.set_byte(0x8000, 0x80);
    for column in 1..32u16 {
        memory.set_byte(0x9800 + column, 1);
    }
    memory.set_byte(0xFF43, 1);

    step_cycles(&mut ppu, &mut memory, 64);

    // SCX=1 scrolls the colored pixel off the left edge, so column 0
    // samples tile 0's second pixel, which is blank.
    assert_eq!(&ppu.frame()[0..RGBA], &[170, 204, 66, 255]);
}

#[test]
fn sprites_overlay_the_background() {
    let mut memory = Memory::without_bios(&[]);
    let mut ppu = Ppu::new();

    // LCD, background and sprites on.
    memory.set_byte(0xFF40, 0b1001_0011);
    memory.set_byte(0xFF47, 0b1110_0100);
    memory.set_byte(0xFF48, 0b1110_0100);
    // Sprite tile 1, row 0: pixel 0 has color 3.
    memory.set_byte(0x8010, 0x80);
    memory.set_byte(0x8011, 0x80);
    // OAM entry 0: top-left corner of the screen.
    memory.set_byte(0xFE00, 16);
    memory.set_byte(0xFE01, 8);
    memory.set_byte(0xFE02, 1);
    memory.set_byte(0xFE03, 0);

    step_cycles(&mut ppu, &mut memory, 64);

    // Pixel 0 comes from the sprite, pixel 1 from the (blank) background.
    assert_eq!(&ppu.frame()[0..RGBA], &[23, 61, 12, 255]);
    assert_eq!(&ppu.frame()[RGBA..2 * RGBA], &[170, 204, 66, 255]);
}

#[test]
fn lyc_match_raises_stat_once() {
    let mut memory = Memory::without_bios(&[]);
    let mut ppu = Ppu::new();

    // Enable the LYC source, match on line 1.
    memory.set_byte(0xFF41, 0x40);
    memory.set_byte(0xFF45, 1);

    step_cycles(&mut ppu, &mut memory, LINE_M_CYCLES);
    assert_eq!(memory.ly(), 1);
    assert!(memory.interrupt_flags().stat);
    assert!(memory.get_byte(0xFF41) & 0x04 != 0);

    // Level stays high within the line; no second request.
    memory.clear_interrupt(dmg_core::interrupts::Interrupt::Stat);
    step_cycles(&mut ppu, &mut memory, 8);
    assert!(!memory.interrupt_flags().stat);
}
