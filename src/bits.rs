//! Small helpers for byte/word packing and the carry predicates the ALU
//! needs. Arithmetic that may overflow goes through [`to_byte`] / [`to_word`]
//! so the wraparound point is explicit at the call site.

/// Mask a wider sum down to an unsigned byte.
#[inline]
pub const fn to_byte(value: u32) -> u8 {
    (value & 0xFF) as u8
}

/// Mask a wider sum down to an unsigned word.
#[inline]
pub const fn to_word(value: u32) -> u16 {
    (value & 0xFFFF) as u16
}

/// Reinterpret a byte as a signed displacement.
#[inline]
pub const fn to_signed(byte: u8) -> i8 {
    byte as i8
}

#[inline]
pub const fn high_byte(word: u16) -> u8 {
    (word >> 8) as u8
}

#[inline]
pub const fn low_byte(word: u16) -> u8 {
    (word & 0xFF) as u8
}

#[inline]
pub const fn word_from_bytes(high: u8, low: u8) -> u16 {
    ((high as u16) << 8) | low as u16
}

#[inline]
pub const fn high_nibble(byte: u8) -> u8 {
    byte >> 4
}

#[inline]
pub const fn low_nibble(byte: u8) -> u8 {
    byte & 0x0F
}

/// Swap the high and low nibbles of a byte.
#[inline]
pub const fn swap_nibbles(byte: u8) -> u8 {
    (byte << 4) | (byte >> 4)
}

#[inline]
pub const fn bit(value: u8, index: u8) -> bool {
    (value >> index) & 1 != 0
}

#[inline]
pub const fn set_bit(value: u8, index: u8, on: bool) -> u8 {
    if on { value | (1 << index) } else { value & !(1 << index) }
}

/// Whether `a + b + carry` carries out of bit 3.
#[inline]
pub fn byte_sum_half_carry(a: u8, b: u8, carry: u8) -> bool {
    (a & 0x0F) + (b & 0x0F) + carry > 0x0F
}

/// Whether `a + b + carry` carries out of bit 7.
#[inline]
pub fn byte_sum_carry(a: u8, b: u8, carry: u8) -> bool {
    a as u16 + b as u16 + carry as u16 > 0xFF
}

/// Whether `a - b - carry` borrows into bit 3.
#[inline]
pub fn byte_difference_half_carry(a: u8, b: u8, carry: u8) -> bool {
    ((a & 0x0F) as u16) < (b & 0x0F) as u16 + carry as u16
}

/// Whether `a - b - carry` borrows into bit 7.
#[inline]
pub fn byte_difference_carry(a: u8, b: u8, carry: u8) -> bool {
    (a as u16) < b as u16 + carry as u16
}

/// Whether `a + b` carries out of bit 11.
#[inline]
pub fn word_sum_half_carry(a: u16, b: u16) -> bool {
    (a & 0x0FFF) + (b & 0x0FFF) > 0x0FFF
}

/// Whether `a + b` carries out of bit 15.
#[inline]
pub fn word_sum_carry(a: u16, b: u16) -> bool {
    a as u32 + b as u32 > 0xFFFF
}
