//! Pixel Processing Unit. A frame-long modulo clock drives a four-mode
//! scanline state machine; the current mode and line are derived from the
//! clock value rather than stored transitions, so the PPU can absorb any
//! cycle delta in one call. A full scanline is rendered into the RGBA frame
//! buffer on each Drawing to HBlank edge.

use log::debug;
#[cfg(feature = "ppu-trace")]
use log::trace;

use crate::bits;
use crate::clock::{self, Clock};
use crate::interrupts::{Interrupt, InterruptUpdate};
use crate::memory::{self, LcdControl, Memory};

pub const SCREEN_WIDTH: usize = 160;
pub const SCREEN_HEIGHT: usize = 144;

/// Bytes per pixel in the frame buffer.
pub const RGBA: usize = 4;

const LINE_DOTS: u32 = 456;
const OAM_SCAN_DOTS: u32 = 80;
const DRAWING_DOTS: u32 = 172;
const VBLANK_LINES: u32 = 10;

pub const FRAME_DOTS: u32 = (SCREEN_HEIGHT as u32 + VBLANK_LINES) * LINE_DOTS;
pub const FRAME_M_CYCLES: u32 = FRAME_DOTS / clock::DOTS_PER_M_CYCLE;

const TILE_BYTES: u16 = 16;
const TILE_MAP_WIDTH: u16 = 32;
const OAM_ENTRY_BYTES: u16 = 4;
const OAM_ENTRIES: u16 = 40;

/// The four DMG shades as RGBA, lightest first.
const SHADES: [[u8; RGBA]; 4] = [
    [170, 204, 66, 255],
    [152, 188, 60, 255],
    [65, 112, 45, 255],
    [23, 61, 12, 255],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Drawing = 3,
}

pub struct Ppu {
    clock: Clock,
    mode: Mode,
    frame: Vec<u8>,
    frame_complete: bool,
    /// Level of the STAT interrupt line after the previous step. The STAT
    /// interrupt fires on the rising edge only.
    stat_line: bool,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            clock: Clock::with_max(FRAME_M_CYCLES),
            mode: Mode::OamScan,
            frame: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT * RGBA],
            frame_complete: false,
            stat_line: false,
        }
    }

    /// Advance by the given machine-cycle cost and maintain LY, STAT and the
    /// VBlank/STAT interrupt flags.
    pub fn step(&mut self, cycles: u8, memory: &mut Memory) {
        self.clock.increment(cycles as u32);
        self.frame_complete = self.clock.wrapped();

        let previous = self.mode;
        if self.clock.wrapped() {
            debug!("frame complete at {} cycles", FRAME_M_CYCLES);
            self.frame.fill(0);
            self.mode = Mode::OamScan;
            memory.set_interrupt_flags(InterruptUpdate::single(Interrupt::VBlank, false));
        } else if self.scanline() >= SCREEN_HEIGHT as u32 {
            self.mode = Mode::VBlank;
            if previous != Mode::VBlank {
                memory.request_interrupt(Interrupt::VBlank);
            }
        } else if self.line_dot() < OAM_SCAN_DOTS {
            self.mode = Mode::OamScan;
        } else if self.line_dot() < OAM_SCAN_DOTS + DRAWING_DOTS {
            self.mode = Mode::Drawing;
        } else {
            self.mode = Mode::HBlank;
            if previous == Mode::Drawing {
                self.render_scanline(memory);
            }
        }

        memory.set_ly(self.scanline() as u8);
        memory.set_stat_mode(self.mode as u8);
        let lyc_match = memory.ly() == memory.lyc();
        memory.set_stat_lyc_match(lyc_match);

        let sources = memory.stat_interrupts();
        let line = (sources.hblank && self.mode == Mode::HBlank)
            || (sources.vblank && self.mode == Mode::VBlank)
            || (sources.oam && self.mode == Mode::OamScan)
            || (sources.lyc && lyc_match);
        if line && !self.stat_line {
            memory.request_interrupt(Interrupt::Stat);
        }
        self.stat_line = line;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The line the dot clock is currently on, including VBlank lines.
    pub fn scanline(&self) -> u32 {
        self.clock.dots() / LINE_DOTS
    }

    /// Dot position within the current line.
    pub fn line_dot(&self) -> u32 {
        self.clock.dots() % LINE_DOTS
    }

    /// Whether the most recent step crossed the frame boundary.
    pub fn frame_complete(&self) -> bool {
        self.frame_complete
    }

    /// The RGBA frame buffer, rows top to bottom.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    fn render_scanline(&mut self, memory: &Memory) {
        let y = self.scanline() as usize;
        let lcd = memory.lcd_control();

        // Per-column shade indexes for this line, plus the pre-palette
        // background color used for sprite priority.
        let mut shades = [0u8; SCREEN_WIDTH];
        let mut bg_color = [0u8; SCREEN_WIDTH];

        if lcd.lcd_enabled {
            if lcd.bg_enabled {
                self.draw_background(memory, &lcd, y, &mut shades, &mut bg_color);
            }
            if lcd.window_enabled {
                self.draw_window(memory, &lcd, y, &mut shades, &mut bg_color);
            }
            if lcd.obj_enabled {
                self.draw_sprites(memory, &lcd, y, &mut shades, &bg_color);
            }
        }

        #[cfg(feature = "ppu-trace")]
        trace!("rendered line {y}");

        let row = &mut self.frame[y * SCREEN_WIDTH * RGBA..(y + 1) * SCREEN_WIDTH * RGBA];
        for (x, shade) in shades.iter().enumerate() {
            row[x * RGBA..(x + 1) * RGBA].copy_from_slice(&SHADES[*shade as usize]);
        }
    }

    fn draw_background(
        &self,
        memory: &Memory,
        lcd: &LcdControl,
        y: usize,
        shades: &mut [u8; SCREEN_WIDTH],
        bg_color: &mut [u8; SCREEN_WIDTH],
    ) {
        let palette = memory.background_palette();
        let scx = memory.scx() as usize;
        let scy = memory.scy() as usize;
        let map = tile_map_base(lcd.bg_tile_map);
        let py = (y + scy) & 0xFF;

        for x in 0..SCREEN_WIDTH {
            let px = (x + scx) & 0xFF;
            let index = tile_index(memory, map, px as u16 / 8, py as u16 / 8);
            let color = tile_color(memory, lcd, index, px as u8 & 7, py as u8 & 7);
            bg_color[x] = color;
            shades[x] = palette[color as usize];
        }
    }

    fn draw_window(
        &self,
        memory: &Memory,
        lcd: &LcdControl,
        y: usize,
        shades: &mut [u8; SCREEN_WIDTH],
        bg_color: &mut [u8; SCREEN_WIDTH],
    ) {
        let wy = memory.wy() as usize;
        if y < wy {
            return;
        }
        let palette = memory.background_palette();
        let map = tile_map_base(lcd.window_tile_map);
        let start = memory.wx().saturating_sub(7) as usize;
        if start >= SCREEN_WIDTH {
            return;
        }
        let window_y = y - wy;

        for x in start..SCREEN_WIDTH {
            let window_x = x - start;
            let index = tile_index(memory, map, window_x as u16 / 8, window_y as u16 / 8);
            let color =
                tile_color(memory, lcd, index, window_x as u8 & 7, window_y as u8 & 7);
            bg_color[x] = color;
            shades[x] = palette[color as usize];
        }
    }

    fn draw_sprites(
        &self,
        memory: &Memory,
        lcd: &LcdControl,
        y: usize,
        shades: &mut [u8; SCREEN_WIDTH],
        bg_color: &[u8; SCREEN_WIDTH],
    ) {
        let height = if lcd.obj_tall { 16 } else { 8 };
        // Earlier OAM entries win overlaps.
        let mut occupied = [false; SCREEN_WIDTH];

        for entry in 0..OAM_ENTRIES {
            let base = memory::OAM_START + entry * OAM_ENTRY_BYTES;
            let sprite_y = memory.get_byte(base) as i32 - 16;
            let sprite_x = memory.get_byte(base + 1) as i32 - 8;
            let tile = memory.get_byte(base + 2);
            let attributes = memory.get_byte(base + 3);

            let mut line = y as i32 - sprite_y;
            if line < 0 || line >= height {
                continue;
            }
            let behind_bg = bits::bit(attributes, 7);
            if bits::bit(attributes, 6) {
                line = height - 1 - line;
            }
            let x_flip = bits::bit(attributes, 5);
            let palette = if bits::bit(attributes, 4) {
                memory.object_palette_1()
            } else {
                memory.object_palette_0()
            };
            // Tall sprites ignore the low index bit and span two tiles.
            let tile = if lcd.obj_tall { tile & 0xFE } else { tile };
            let data = memory::TILE_DATA_UNSIGNED + tile as u16 * TILE_BYTES + line as u16 * 2;
            let low = memory.get_byte(data);
            let high = memory.get_byte(data + 1);

            for pixel in 0..8i32 {
                let x = sprite_x + pixel;
                if !(0..SCREEN_WIDTH as i32).contains(&x) {
                    continue;
                }
                let x = x as usize;
                if occupied[x] {
                    continue;
                }
                let bit = if x_flip { pixel } else { 7 - pixel } as u8;
                let color = (bits::bit(high, bit) as u8) << 1 | bits::bit(low, bit) as u8;
                // Color 0 is transparent for sprites.
                if color == 0 {
                    continue;
                }
                if behind_bg && bg_color[x] != 0 {
                    continue;
                }
                shades[x] = palette[color as usize];
                occupied[x] = true;
            }
        }
    }
}

fn tile_map_base(high_map: bool) -> u16 {
    if high_map { memory::TILE_MAP_1 } else { memory::TILE_MAP_0 }
}

fn tile_index(memory: &Memory, map: u16, column: u16, row: u16) -> u8 {
    memory.get_byte(map + row * TILE_MAP_WIDTH + column)
}

/// Resolve one pixel of a background/window tile to its 2-bit color.
fn tile_color(memory: &Memory, lcd: &LcdControl, index: u8, px: u8, py: u8) -> u8 {
    let base = if lcd.unsigned_tile_data {
        memory::TILE_DATA_UNSIGNED + index as u16 * TILE_BYTES
    } else {
        memory::TILE_DATA_SIGNED + (bits::to_signed(index) as i16 + 128) as u16 * TILE_BYTES
    };
    let low = memory.get_byte(base + py as u16 * 2);
    let high = memory.get_byte(base + py as u16 * 2 + 1);
    let bit = 7 - px;
    (bits::bit(high, bit) as u8) << 1 | bits::bit(low, bit) as u8
}
