//! The LR35902 register file. The eight 8-bit registers are stored as bytes
//! and the AF/BC/DE/HL pair views are derived on access, so a pair write is
//! always visible through its halves and vice versa. The low nibble of F
//! always reads as zero.

use crate::bits;

const FLAG_ZERO: u8 = 0x80;
const FLAG_NEGATIVE: u8 = 0x40;
const FLAG_HALF_CARRY: u8 = 0x20;
const FLAG_CARRY: u8 = 0x10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg8 {
    A,
    F,
    B,
    C,
    D,
    E,
    H,
    L,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg16 {
    AF,
    BC,
    DE,
    HL,
    SP,
    PC,
}

/// A decoded view of the F register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    pub zero: bool,
    pub negative: bool,
    pub half_carry: bool,
    pub carry: bool,
}

/// A partial flag write: `None` fields keep their current value. Instructions
/// describe exactly the flags they touch and leave the rest alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlagUpdate {
    pub zero: Option<bool>,
    pub negative: Option<bool>,
    pub half_carry: Option<bool>,
    pub carry: Option<bool>,
}

#[derive(Clone, Debug, Default)]
pub struct Registers {
    pub a: u8,
    f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    /// All registers zeroed, as at power-on with the boot ROM mapped.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_byte(&self, reg: Reg8) -> u8 {
        match reg {
            Reg8::A => self.a,
            Reg8::F => self.f,
            Reg8::B => self.b,
            Reg8::C => self.c,
            Reg8::D => self.d,
            Reg8::E => self.e,
            Reg8::H => self.h,
            Reg8::L => self.l,
        }
    }

    pub fn set_byte(&mut self, reg: Reg8, value: u8) {
        match reg {
            Reg8::A => self.a = value,
            Reg8::F => self.f = value & 0xF0,
            Reg8::B => self.b = value,
            Reg8::C => self.c = value,
            Reg8::D => self.d = value,
            Reg8::E => self.e = value,
            Reg8::H => self.h = value,
            Reg8::L => self.l = value,
        }
    }

    pub fn get_word(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::AF => bits::word_from_bytes(self.a, self.f),
            Reg16::BC => bits::word_from_bytes(self.b, self.c),
            Reg16::DE => bits::word_from_bytes(self.d, self.e),
            Reg16::HL => bits::word_from_bytes(self.h, self.l),
            Reg16::SP => self.sp,
            Reg16::PC => self.pc,
        }
    }

    pub fn set_word(&mut self, reg: Reg16, value: u16) {
        let high = bits::high_byte(value);
        let low = bits::low_byte(value);
        match reg {
            Reg16::AF => {
                self.a = high;
                self.f = low & 0xF0;
            }
            Reg16::BC => {
                self.b = high;
                self.c = low;
            }
            Reg16::DE => {
                self.d = high;
                self.e = low;
            }
            Reg16::HL => {
                self.h = high;
                self.l = low;
            }
            Reg16::SP => self.sp = value,
            Reg16::PC => self.pc = value,
        }
    }

    pub fn increment_byte(&mut self, reg: Reg8, delta: u8) {
        let value = self.get_byte(reg).wrapping_add(delta);
        self.set_byte(reg, value);
    }

    pub fn decrement_byte(&mut self, reg: Reg8, delta: u8) {
        let value = self.get_byte(reg).wrapping_sub(delta);
        self.set_byte(reg, value);
    }

    pub fn increment_word(&mut self, reg: Reg16, delta: u16) {
        let value = self.get_word(reg).wrapping_add(delta);
        self.set_word(reg, value);
    }

    pub fn decrement_word(&mut self, reg: Reg16, delta: u16) {
        let value = self.get_word(reg).wrapping_sub(delta);
        self.set_word(reg, value);
    }

    /// Displace a word register by a signed byte.
    pub fn offset_word(&mut self, reg: Reg16, delta: i8) {
        let value = self.get_word(reg).wrapping_add_signed(delta as i16);
        self.set_word(reg, value);
    }

    pub fn flags(&self) -> Flags {
        Flags {
            zero: self.f & FLAG_ZERO != 0,
            negative: self.f & FLAG_NEGATIVE != 0,
            half_carry: self.f & FLAG_HALF_CARRY != 0,
            carry: self.f & FLAG_CARRY != 0,
        }
    }

    pub fn set_flags(&mut self, update: FlagUpdate) {
        let mut f = self.f;
        let mut apply = |mask: u8, value: Option<bool>| {
            if let Some(on) = value {
                f = if on { f | mask } else { f & !mask };
            }
        };
        apply(FLAG_ZERO, update.zero);
        apply(FLAG_NEGATIVE, update.negative);
        apply(FLAG_HALF_CARRY, update.half_carry);
        apply(FLAG_CARRY, update.carry);
        self.f = f;
    }
}
