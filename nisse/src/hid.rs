//! HID report types.

use nisse_types::keycode::{ConsumerKey, KeyCode};
use nisse_types::modifier::HidModifiers;
use usbd_hid::descriptor::generator_prelude::*;

pub use usbd_hid::descriptor::MediaKeyboardReport;

/// Number of key slots in a boot keyboard report
pub const REPORT_KEYS: usize = 6;
/// Serialized size of [`KeyboardReport`]
pub const KEYBOARD_REPORT_SIZE: usize = 2 + REPORT_KEYS;

/// Boot keyboard report, modifier byte, reserved byte and six keys.
///
/// The LED byte is the host's output report and never serialized with the keys.
#[gen_hid_descriptor(
    (collection = APPLICATION, usage_page = GENERIC_DESKTOP, usage = KEYBOARD) = {
        (usage_page = KEYBOARD, usage_min = 0xE0, usage_max = 0xE7) = {
            #[packed_bits = 8] #[item_settings(data,variable,absolute)] modifier=input;
        };
        (logical_min = 0,) = {
            #[item_settings(constant,variable,absolute)] reserved=input;
        };
        (usage_page = LEDS, usage_min = 0x01, usage_max = 0x05) = {
            #[packed_bits = 5] #[item_settings(data,variable,absolute)] leds=output;
        };
        (usage_page = KEYBOARD, usage_min = 0x00, usage_max = 0xDD) = {
            #[item_settings(data,array,absolute)] keycodes=input;
        };
    }
)]
#[derive(Default)] // Debug, Clone, Copy, PartialEq, Eq are derived by gen_hid_descriptor
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    pub modifier: u8, // HidModifiers
    pub reserved: u8,
    pub leds: u8, // LedIndicator
    pub keycodes: [u8; 6], // REPORT_KEYS; the descriptor macro requires a literal length
}

impl KeyboardReport {
    pub fn modifiers(&self) -> HidModifiers {
        HidModifiers::from_bits(self.modifier)
    }

    pub fn set_modifiers(&mut self, modifiers: HidModifiers) {
        self.modifier = modifiers.into_bits();
    }

    pub fn add_modifiers(&mut self, modifiers: HidModifiers) {
        self.modifier |= modifiers.into_bits();
    }

    /// Key in slot `i`, [`KeyCode::No`] past the last key
    pub fn key(&self, i: usize) -> KeyCode {
        self.keycodes.get(i).map(|&k| KeyCode::from(k)).unwrap_or_default()
    }

    /// Whether any key is in the report, modifiers aside
    pub fn has_key(&self) -> bool {
        self.keycodes[0] != 0
    }

    pub fn contains(&self, key: KeyCode) -> bool {
        key != KeyCode::No && self.keycodes.contains(&(key as u8))
    }

    /// Append a key, returns `false` when all six slots are taken
    pub fn push(&mut self, key: KeyCode) -> bool {
        match self.keycodes.iter_mut().find(|k| **k == 0) {
            Some(slot) => {
                *slot = key as u8;
                true
            }
            None => false,
        }
    }

    /// Replace every occurrence of `from` with `to`
    pub fn replace(&mut self, from: KeyCode, to: KeyCode) {
        for k in self.keycodes.iter_mut().filter(|k| **k == from as u8) {
            *k = to as u8;
        }
    }

    /// Drop slot `i`, moving the keys after it down
    pub fn remove(&mut self, i: usize) {
        if i < REPORT_KEYS {
            self.keycodes.copy_within(i + 1.., i);
            self.keycodes[REPORT_KEYS - 1] = 0;
        }
    }

    pub fn clear_keys(&mut self) {
        self.keycodes = [0; REPORT_KEYS];
    }

    pub fn clear(&mut self) {
        self.modifier = 0;
        self.clear_keys();
    }

    /// Wire layout of the input report
    pub fn to_bytes(&self) -> [u8; KEYBOARD_REPORT_SIZE] {
        let mut bytes = [0; KEYBOARD_REPORT_SIZE];
        bytes[0] = self.modifier;
        bytes[1] = self.reserved;
        bytes[2..].copy_from_slice(&self.keycodes);
        bytes
    }
}

/// Consumer report carrying `key`
pub fn media_report(key: ConsumerKey) -> MediaKeyboardReport {
    MediaKeyboardReport { usage_id: key.usage() }
}

/// Wire layout of a consumer report, the usage in little endian
pub fn consumer_bytes(key: ConsumerKey) -> [u8; 2] {
    key.usage().to_le_bytes()
}
