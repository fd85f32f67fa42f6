//! Cycle-accurate Game Boy (DMG) emulation core.
//!
//! This crate contains the platform-agnostic machine logic (CPU, memory map,
//! PPU, timer, joypad). Frontends own windows, audio and files, and drive the
//! core via the [`gameboy`] facade.

/// Byte/word packing, signed decode and carry predicates.
pub mod bits;

/// Modulo machine-cycle counter used as the timing authority.
pub mod clock;

/// LR35902 CPU core.
pub mod cpu;

/// High-level facade that wires the CPU, memory, PPU and timer into a single
/// machine.
pub mod gameboy;

/// Joypad input register and edge-triggered interrupt behavior.
pub mod input;

/// Interrupt kinds, vectors and the IE/IF boolean maps.
pub mod interrupts;

/// Memory map: ordered address segments and hardware register accessors.
pub mod memory;

/// The immutable opcode tables (unprefixed and CB-prefixed).
pub mod ops;

/// Pixel Processing Unit (PPU) emulation.
pub mod ppu;

/// Register file with 16-bit pair views and the flags register.
pub mod registers;

/// Divider/timer unit.
pub mod timer;
