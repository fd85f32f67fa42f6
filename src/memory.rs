//! The DMG memory map as an ordered list of address segments. Reads and
//! writes scan the active segments in order and use the first one covering
//! the address, which is how the boot ROM overlay shadows the cartridge:
//! it sits first in the scan order until it is unloaded.
//!
//! On top of raw byte access this module exposes semantic accessors for the
//! hardware registers (LCDC, STAT, palettes, timer, interrupt enable/flags)
//! so the PPU and timer never pick bits apart themselves.

use log::debug;

use crate::bits;
use crate::interrupts::{Interrupt, InterruptSet, InterruptUpdate};

pub const BIOS_SIZE: usize = 0x100;

pub const ROM_START: u16 = 0x0000;
pub const VRAM_START: u16 = 0x8000;
pub const ERAM_START: u16 = 0xA000;
pub const WRAM_START: u16 = 0xC000;
pub const ECHO_START: u16 = 0xE000;
pub const OAM_START: u16 = 0xFE00;
pub const IO_START: u16 = 0xFF00;
pub const HRAM_START: u16 = 0xFF80;

pub const ROM_SIZE: usize = 0x8000;
pub const VRAM_SIZE: usize = 0x2000;
pub const ERAM_SIZE: usize = 0x2000;
pub const WRAM_SIZE: usize = 0x2000;
pub const ECHO_SIZE: usize = 0x1E00;
pub const OAM_SIZE: usize = 0x100;
pub const IO_SIZE: usize = 0x80;
pub const HRAM_SIZE: usize = 0x80;

pub const JOYP_ADDRESS: u16 = 0xFF00;
pub const DIV_ADDRESS: u16 = 0xFF04;
pub const TIMA_ADDRESS: u16 = 0xFF05;
pub const TMA_ADDRESS: u16 = 0xFF06;
pub const TAC_ADDRESS: u16 = 0xFF07;
pub const IF_ADDRESS: u16 = 0xFF0F;
pub const LCDC_ADDRESS: u16 = 0xFF40;
pub const STAT_ADDRESS: u16 = 0xFF41;
pub const SCY_ADDRESS: u16 = 0xFF42;
pub const SCX_ADDRESS: u16 = 0xFF43;
pub const LY_ADDRESS: u16 = 0xFF44;
pub const LYC_ADDRESS: u16 = 0xFF45;
pub const BGP_ADDRESS: u16 = 0xFF47;
pub const OBP0_ADDRESS: u16 = 0xFF48;
pub const OBP1_ADDRESS: u16 = 0xFF49;
pub const WY_ADDRESS: u16 = 0xFF4A;
pub const WX_ADDRESS: u16 = 0xFF4B;
pub const IE_ADDRESS: u16 = 0xFFFF;

pub const TILE_DATA_UNSIGNED: u16 = 0x8000;
pub const TILE_DATA_SIGNED: u16 = 0x8800;
pub const TILE_MAP_0: u16 = 0x9800;
pub const TILE_MAP_1: u16 = 0x9C00;

const SEG_BIOS: usize = 0;
const SEG_WRAM: usize = 4;

enum Backing {
    Ram(Vec<u8>),
    /// Reads and writes forward to another segment at the same offset.
    Mirror(usize),
}

pub struct Segment {
    start: u16,
    len: usize,
    backing: Backing,
}

impl Segment {
    fn ram(start: u16, len: usize) -> Self {
        Self { start, len, backing: Backing::Ram(vec![0; len]) }
    }

    /// RAM segment seeded from `data`, zero-padded out to `len`.
    fn with_data(start: u16, len: usize, data: &[u8]) -> Self {
        let mut bytes = vec![0; len];
        let copied = data.len().min(len);
        bytes[..copied].copy_from_slice(&data[..copied]);
        Self { start, len, backing: Backing::Ram(bytes) }
    }

    fn mirror(start: u16, len: usize, target: usize) -> Self {
        Self { start, len, backing: Backing::Mirror(target) }
    }

    fn contains(&self, address: u16) -> bool {
        address >= self.start && (address as usize) < self.start as usize + self.len
    }
}

pub struct Memory {
    segments: Vec<Segment>,
    /// Segment indexes in scan order. The boot overlay is removed from here
    /// when unloaded; the segment itself stays behind so indexes are stable.
    active: Vec<usize>,
    bios_mapped: bool,
}

impl Memory {
    /// A machine with the boot ROM overlay mapped over the start of the
    /// cartridge. The ROM image is zero-padded to the full 32 KiB window.
    pub fn new(bios: &[u8], rom: &[u8]) -> Self {
        let segments = vec![
            Segment::with_data(ROM_START, BIOS_SIZE, bios),
            Segment::with_data(ROM_START, ROM_SIZE, rom),
            Segment::ram(VRAM_START, VRAM_SIZE),
            Segment::ram(ERAM_START, ERAM_SIZE),
            Segment::ram(WRAM_START, WRAM_SIZE),
            Segment::mirror(ECHO_START, ECHO_SIZE, SEG_WRAM),
            Segment::ram(OAM_START, OAM_SIZE),
            Segment::ram(IO_START, IO_SIZE),
            Segment::ram(HRAM_START, HRAM_SIZE),
        ];
        let active = (0..segments.len()).collect();
        Self { segments, active, bios_mapped: true }
    }

    /// A machine with no boot ROM: the overlay is already unloaded.
    pub fn without_bios(rom: &[u8]) -> Self {
        let mut memory = Self::new(&[], rom);
        memory.unload_bios();
        memory
    }

    /// Remove the boot overlay from the scan order. One-way; calling again
    /// is a no-op.
    pub fn unload_bios(&mut self) {
        if !self.bios_mapped {
            return;
        }
        self.bios_mapped = false;
        self.active.retain(|&index| index != SEG_BIOS);
        debug!("boot ROM overlay unloaded");
    }

    pub fn bios_mapped(&self) -> bool {
        self.bios_mapped
    }

    fn segment_index(&self, address: u16) -> usize {
        self.active
            .iter()
            .copied()
            .find(|&index| self.segments[index].contains(address))
            .unwrap_or_else(|| panic!("no memory segment covers address {address:#06X}"))
    }

    fn read_at(&self, index: usize, offset: usize) -> u8 {
        let segment = &self.segments[index];
        if offset >= segment.len {
            panic!(
                "offset {offset:#06X} out of range for segment at {:#06X}",
                segment.start
            );
        }
        match &segment.backing {
            Backing::Ram(bytes) => bytes[offset],
            Backing::Mirror(target) => self.read_at(*target, offset),
        }
    }

    fn write_at(&mut self, index: usize, offset: usize, value: u8) {
        if offset >= self.segments[index].len {
            panic!(
                "offset {offset:#06X} out of range for segment at {:#06X}",
                self.segments[index].start
            );
        }
        match &mut self.segments[index].backing {
            Backing::Ram(bytes) => bytes[offset] = value,
            Backing::Mirror(target) => {
                let target = *target;
                self.write_at(target, offset, value);
            }
        }
    }

    pub fn get_byte(&self, address: u16) -> u8 {
        let index = self.segment_index(address);
        let offset = (address - self.segments[index].start) as usize;
        self.read_at(index, offset)
    }

    pub fn set_byte(&mut self, address: u16, value: u8) {
        let index = self.segment_index(address);
        let offset = (address - self.segments[index].start) as usize;
        self.write_at(index, offset, value);
    }

    /// Little-endian word read. Both bytes must fall in the same segment.
    pub fn get_word(&self, address: u16) -> u16 {
        let index = self.segment_index(address);
        let offset = (address - self.segments[index].start) as usize;
        let low = self.read_at(index, offset);
        let high = self.read_at(index, offset + 1);
        bits::word_from_bytes(high, low)
    }

    /// Little-endian word write. Both bytes must fall in the same segment.
    pub fn set_word(&mut self, address: u16, value: u16) {
        let index = self.segment_index(address);
        let offset = (address - self.segments[index].start) as usize;
        self.write_at(index, offset, bits::low_byte(value));
        self.write_at(index, offset + 1, bits::high_byte(value));
    }

    // --- interrupt registers ---

    pub fn interrupt_enable(&self) -> InterruptSet {
        InterruptSet::from_byte(self.get_byte(IE_ADDRESS))
    }

    pub fn interrupt_flags(&self) -> InterruptSet {
        InterruptSet::from_byte(self.get_byte(IF_ADDRESS))
    }

    pub fn set_interrupt_flags(&mut self, update: InterruptUpdate) {
        let byte = update.apply(self.get_byte(IF_ADDRESS));
        self.set_byte(IF_ADDRESS, byte);
    }

    pub fn request_interrupt(&mut self, kind: Interrupt) {
        self.set_interrupt_flags(InterruptUpdate::single(kind, true));
    }

    pub fn clear_interrupt(&mut self, kind: Interrupt) {
        self.set_interrupt_flags(InterruptUpdate::single(kind, false));
    }

    // --- PPU registers ---

    pub fn lcd_control(&self) -> LcdControl {
        LcdControl::from_byte(self.get_byte(LCDC_ADDRESS))
    }

    /// STAT interrupt-source enable bits (bits 3-6).
    pub fn stat_interrupts(&self) -> StatInterrupts {
        let stat = self.get_byte(STAT_ADDRESS);
        StatInterrupts {
            hblank: bits::bit(stat, 3),
            vblank: bits::bit(stat, 4),
            oam: bits::bit(stat, 5),
            lyc: bits::bit(stat, 6),
        }
    }

    /// Write the mode into STAT bits 0-1, leaving the rest intact.
    pub fn set_stat_mode(&mut self, mode: u8) {
        let stat = self.get_byte(STAT_ADDRESS);
        self.set_byte(STAT_ADDRESS, (stat & !0x03) | (mode & 0x03));
    }

    /// Write the LY == LYC comparison into STAT bit 2.
    pub fn set_stat_lyc_match(&mut self, matched: bool) {
        let stat = self.get_byte(STAT_ADDRESS);
        self.set_byte(STAT_ADDRESS, bits::set_bit(stat, 2, matched));
    }

    pub fn ly(&self) -> u8 {
        self.get_byte(LY_ADDRESS)
    }

    pub fn set_ly(&mut self, value: u8) {
        self.set_byte(LY_ADDRESS, value);
    }

    pub fn lyc(&self) -> u8 {
        self.get_byte(LYC_ADDRESS)
    }

    pub fn scy(&self) -> u8 {
        self.get_byte(SCY_ADDRESS)
    }

    pub fn scx(&self) -> u8 {
        self.get_byte(SCX_ADDRESS)
    }

    pub fn wy(&self) -> u8 {
        self.get_byte(WY_ADDRESS)
    }

    pub fn wx(&self) -> u8 {
        self.get_byte(WX_ADDRESS)
    }

    pub fn background_palette(&self) -> [u8; 4] {
        decode_palette(self.get_byte(BGP_ADDRESS))
    }

    pub fn object_palette_0(&self) -> [u8; 4] {
        decode_palette(self.get_byte(OBP0_ADDRESS))
    }

    pub fn object_palette_1(&self) -> [u8; 4] {
        decode_palette(self.get_byte(OBP1_ADDRESS))
    }

    // --- timer registers ---

    pub fn div(&self) -> u8 {
        self.get_byte(DIV_ADDRESS)
    }

    pub fn set_div(&mut self, value: u8) {
        self.set_byte(DIV_ADDRESS, value);
    }

    pub fn tima(&self) -> u8 {
        self.get_byte(TIMA_ADDRESS)
    }

    pub fn set_tima(&mut self, value: u8) {
        self.set_byte(TIMA_ADDRESS, value);
    }

    pub fn tma(&self) -> u8 {
        self.get_byte(TMA_ADDRESS)
    }

    pub fn timer_control(&self) -> TimerControl {
        let tac = self.get_byte(TAC_ADDRESS);
        TimerControl { enabled: bits::bit(tac, 2), select: tac & 0x03 }
    }
}

/// A decoded view of the LCDC register.
#[derive(Clone, Copy, Debug, Default)]
pub struct LcdControl {
    pub bg_enabled: bool,
    pub obj_enabled: bool,
    /// Set selects 8x16 sprites.
    pub obj_tall: bool,
    /// Set selects the 0x9C00 background tile map.
    pub bg_tile_map: bool,
    /// Set selects unsigned tile indexing from 0x8000.
    pub unsigned_tile_data: bool,
    pub window_enabled: bool,
    /// Set selects the 0x9C00 window tile map.
    pub window_tile_map: bool,
    pub lcd_enabled: bool,
}

impl LcdControl {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            bg_enabled: bits::bit(byte, 0),
            obj_enabled: bits::bit(byte, 1),
            obj_tall: bits::bit(byte, 2),
            bg_tile_map: bits::bit(byte, 3),
            unsigned_tile_data: bits::bit(byte, 4),
            window_enabled: bits::bit(byte, 5),
            window_tile_map: bits::bit(byte, 6),
            lcd_enabled: bits::bit(byte, 7),
        }
    }
}

/// Which STAT sources may raise the STAT interrupt.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatInterrupts {
    pub hblank: bool,
    pub vblank: bool,
    pub oam: bool,
    pub lyc: bool,
}

/// A decoded view of the TAC register.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimerControl {
    pub enabled: bool,
    /// Rate select, bits 0-1.
    pub select: u8,
}

/// Split a palette byte into four 2-bit shade indexes, entry 0 first.
fn decode_palette(byte: u8) -> [u8; 4] {
    [byte & 0x03, (byte >> 2) & 0x03, (byte >> 4) & 0x03, (byte >> 6) & 0x03]
}
