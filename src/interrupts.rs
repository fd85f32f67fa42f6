//! The five interrupt kinds, their vectors and their bit positions in the
//! IE (0xFFFF) and IF (0xFF0F) registers.

/// Interrupt kinds in dispatch priority order. The discriminant is the bit
/// position in IE/IF.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupt {
    VBlank = 0,
    Stat = 1,
    Timer = 2,
    Serial = 3,
    Joypad = 4,
}

impl Interrupt {
    /// Highest priority first.
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::Stat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    pub const fn mask(self) -> u8 {
        1 << self as u8
    }

    pub const fn vector(self) -> u16 {
        match self {
            Interrupt::VBlank => 0x0040,
            Interrupt::Stat => 0x0048,
            Interrupt::Timer => 0x0050,
            Interrupt::Serial => 0x0058,
            Interrupt::Joypad => 0x0060,
        }
    }
}

/// A decoded view of an IE or IF byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InterruptSet {
    pub vblank: bool,
    pub stat: bool,
    pub timer: bool,
    pub serial: bool,
    pub joypad: bool,
}

impl InterruptSet {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            vblank: byte & Interrupt::VBlank.mask() != 0,
            stat: byte & Interrupt::Stat.mask() != 0,
            timer: byte & Interrupt::Timer.mask() != 0,
            serial: byte & Interrupt::Serial.mask() != 0,
            joypad: byte & Interrupt::Joypad.mask() != 0,
        }
    }

    pub fn to_byte(self) -> u8 {
        let mut byte = 0;
        for kind in Interrupt::ALL {
            if self.contains(kind) {
                byte |= kind.mask();
            }
        }
        byte
    }

    pub fn contains(self, kind: Interrupt) -> bool {
        match kind {
            Interrupt::VBlank => self.vblank,
            Interrupt::Stat => self.stat,
            Interrupt::Timer => self.timer,
            Interrupt::Serial => self.serial,
            Interrupt::Joypad => self.joypad,
        }
    }

    pub fn any(self) -> bool {
        self.to_byte() != 0
    }
}

/// A partial IE/IF write: `None` fields keep their current value.
#[derive(Clone, Copy, Debug, Default)]
pub struct InterruptUpdate {
    pub vblank: Option<bool>,
    pub stat: Option<bool>,
    pub timer: Option<bool>,
    pub serial: Option<bool>,
    pub joypad: Option<bool>,
}

impl InterruptUpdate {
    /// An update that sets or clears a single kind.
    pub fn single(kind: Interrupt, on: bool) -> Self {
        let mut update = Self::default();
        match kind {
            Interrupt::VBlank => update.vblank = Some(on),
            Interrupt::Stat => update.stat = Some(on),
            Interrupt::Timer => update.timer = Some(on),
            Interrupt::Serial => update.serial = Some(on),
            Interrupt::Joypad => update.joypad = Some(on),
        }
        update
    }

    /// Apply to an existing register byte. Bits 5-7 pass through untouched.
    pub fn apply(self, byte: u8) -> u8 {
        let mut byte = byte;
        let mut apply_bit = |mask: u8, value: Option<bool>| {
            if let Some(on) = value {
                byte = if on { byte | mask } else { byte & !mask };
            }
        };
        apply_bit(Interrupt::VBlank.mask(), self.vblank);
        apply_bit(Interrupt::Stat.mask(), self.stat);
        apply_bit(Interrupt::Timer.mask(), self.timer);
        apply_bit(Interrupt::Serial.mask(), self.serial);
        apply_bit(Interrupt::Joypad.mask(), self.joypad);
        byte
    }
}
