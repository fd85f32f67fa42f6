//! Joypad input. Button state is kept as two active-high nibbles (directions
//! and action buttons); when the polled group's select bit is set in JOYP the
//! corresponding nibble is written into the register's low bits, and a press
//! edge while polled raises the joypad interrupt.

use log::debug;

use crate::bits;
use crate::interrupts::Interrupt;
use crate::memory::{JOYP_ADDRESS, Memory};

const DIRECTION_SELECT_BIT: u8 = 4;
const BUTTON_SELECT_BIT: u8 = 5;

/// The eight joypad inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

impl Button {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "right" => Some(Button::Right),
            "left" => Some(Button::Left),
            "up" => Some(Button::Up),
            "down" => Some(Button::Down),
            "a" => Some(Button::A),
            "b" => Some(Button::B),
            "select" => Some(Button::Select),
            "start" => Some(Button::Start),
            _ => None,
        }
    }

    /// Select bit gating this button's group, and its bit within the nibble.
    fn select_and_bit(self) -> (u8, u8) {
        match self {
            Button::Right => (DIRECTION_SELECT_BIT, 0),
            Button::Left => (DIRECTION_SELECT_BIT, 1),
            Button::Up => (DIRECTION_SELECT_BIT, 2),
            Button::Down => (DIRECTION_SELECT_BIT, 3),
            Button::A => (BUTTON_SELECT_BIT, 0),
            Button::B => (BUTTON_SELECT_BIT, 1),
            Button::Select => (BUTTON_SELECT_BIT, 2),
            Button::Start => (BUTTON_SELECT_BIT, 3),
        }
    }
}

#[derive(Default)]
pub struct Input {
    directions: u8,
    buttons: u8,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update a button by frontend key name. Returns false for names that do
    /// not map to a button.
    pub fn set_key(&mut self, name: &str, pressed: bool, memory: &mut Memory) -> bool {
        match Button::from_name(name) {
            Some(button) => {
                self.set_button(button, pressed, memory);
                true
            }
            None => false,
        }
    }

    pub fn set_button(&mut self, button: Button, pressed: bool, memory: &mut Memory) {
        let (select_bit, bit) = button.select_and_bit();
        let nibble = if select_bit == DIRECTION_SELECT_BIT {
            &mut self.directions
        } else {
            &mut self.buttons
        };
        if bits::bit(*nibble, bit) == pressed {
            return;
        }
        *nibble = bits::set_bit(*nibble, bit, pressed);
        let nibble = *nibble;

        let joyp = memory.get_byte(JOYP_ADDRESS);
        if !bits::bit(joyp, select_bit) {
            return;
        }
        memory.set_byte(JOYP_ADDRESS, (joyp & 0xF0) | (nibble & 0x0F));
        if pressed {
            debug!("joypad interrupt from {button:?}");
            memory.request_interrupt(Interrupt::Joypad);
        }
    }
}
