//! Keycode resolution.
//!
//! A confirmed matrix position turns into a HID keycode under the active base
//! layout and modifier scheme. Num Lock lays a keypad over the right hand and
//! the Japanese and Apple schemes move Alt and GUI around.

mod tables;

pub use tables::{FN_LAYER, FnKey, Layer, NUM_LOCK_OVERLAY};
use tables::{COLEMAK, COLEMAK_DHM, DVORAK, EDGE_ROW_REMAP, JIS, NICOLA_F, QWERTY};

use nisse_types::keycode::KeyCode;

use crate::config::{BaseLayout, ModifierScheme};
use crate::{MATRIX_COLS, MATRIX_ROWS};

impl BaseLayout {
    /// Key table of the layout
    pub fn layer(self) -> &'static Layer {
        match self {
            BaseLayout::Qwerty => &QWERTY,
            BaseLayout::Dvorak => &DVORAK,
            BaseLayout::Jis => &JIS,
            BaseLayout::NicolaF => &NICOLA_F,
            BaseLayout::Colemak => &COLEMAK,
            BaseLayout::ColemakDhm => &COLEMAK_DHM,
        }
    }
}

/// Everything besides the position that decides what a key sends
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResolveContext {
    pub base: BaseLayout,
    pub scheme: ModifierScheme,
    /// Host Num Lock LED
    pub num_lock: bool,
    /// A BLE host is waiting for a passkey
    pub passkey_entry: bool,
}

/// Unmodified entry of a base layout table, [`KeyCode::No`] outside the matrix
pub fn base_keycode(base: BaseLayout, row: usize, col: usize) -> KeyCode {
    if row < MATRIX_ROWS && col < MATRIX_COLS {
        base.layer()[row][col]
    } else {
        KeyCode::No
    }
}

/// Keypad overlay entry, [`KeyCode::No`] when the overlay is inactive.
///
/// While a passkey is being entered the keypad digits type number row digits
/// and keypad Enter types Enter, whatever the Num Lock state is.
pub fn keypad_keycode(ctx: &ResolveContext, row: usize, col: usize) -> KeyCode {
    if row >= MATRIX_ROWS || col >= MATRIX_COLS {
        return KeyCode::No;
    }
    let key = NUM_LOCK_OVERLAY[row][col];
    if ctx.passkey_entry {
        match key {
            k if (KeyCode::Kp1..=KeyCode::Kp0).contains(&k) => {
                KeyCode::from(k as u8 - KeyCode::Kp1 as u8 + KeyCode::Kc1 as u8)
            }
            KeyCode::KpEnter => KeyCode::Enter,
            _ => KeyCode::No,
        }
    } else if ctx.num_lock {
        key
    } else {
        KeyCode::No
    }
}

/// Keys moved by the Japanese and Apple modifier schemes
pub fn substitute_for_scheme(scheme: ModifierScheme, key: KeyCode) -> KeyCode {
    if scheme.is_mac() {
        match key {
            KeyCode::RAlt => KeyCode::Language1,
            KeyCode::LAlt => KeyCode::Language2,
            KeyCode::Application => KeyCode::LAlt,
            _ => key,
        }
    } else if scheme.is_japanese() {
        match key {
            KeyCode::RAlt => KeyCode::Language1,
            KeyCode::LAlt => KeyCode::Language2,
            KeyCode::LGui => KeyCode::LAlt,
            _ => key,
        }
    } else {
        key
    }
}

/// Resolve a matrix position to the keycode it sends outside the Fn layer
pub fn keycode_at(ctx: &ResolveContext, row: usize, col: usize) -> KeyCode {
    if row >= MATRIX_ROWS || col >= MATRIX_COLS {
        return KeyCode::No;
    }
    let keypad = keypad_keycode(ctx, row, col);
    if keypad != KeyCode::No {
        return keypad;
    }
    let table_row = if col == 0 || col == MATRIX_COLS - 1 {
        EDGE_ROW_REMAP[ctx.scheme.base() as usize][row]
    } else {
        row
    };
    substitute_for_scheme(ctx.scheme, ctx.base.layer()[table_row][col])
}

/// Where each keycode sits on the QWERTY layout.
///
/// Lets other code ask whether a key is down by keycode. Codes that are not on
/// the layout point at an empty cell, so they never read as pressed.
pub struct KeyMapping {
    positions: [(u8, u8); 256],
}

impl Default for KeyMapping {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMapping {
    /// An empty cell of the QWERTY table
    pub const UNUSED: (usize, usize) = (1, 2);

    pub fn new() -> Self {
        let mut positions = [(Self::UNUSED.0 as u8, Self::UNUSED.1 as u8); 256];
        for (row, keys) in QWERTY.iter().enumerate() {
            for (col, &key) in keys.iter().enumerate() {
                if key != KeyCode::No {
                    positions[key as usize] = (row as u8, col as u8);
                }
            }
        }
        Self { positions }
    }

    /// Position of `key` as `(row, col)`
    pub fn position(&self, key: KeyCode) -> (usize, usize) {
        let (row, col) = self.positions[key as usize];
        (row as usize, col as usize)
    }
}
