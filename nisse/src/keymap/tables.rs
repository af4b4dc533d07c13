//! Key tables of the 8x12 matrix.
//!
//! Rows 0 and 4 carry the function and number keys on every layout. The edge
//! columns hold the modifier and layer keys, rows 1 to 3 the symbol keys in the
//! thumb and pinky areas.

use nisse_types::keycode::KeyCode::{self, *};
use nisse_types::modifier::HidModifiers;

use crate::{MATRIX_COLS, MATRIX_ROWS};

pub type Layer = [[KeyCode; MATRIX_COLS]; MATRIX_ROWS];

const FUNCTION_ROW: [KeyCode; MATRIX_COLS] = [F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12];
const NUMBER_ROW: [KeyCode; MATRIX_COLS] = [LeftFn, Kc1, Kc2, Kc3, Kc4, Kc5, Kc6, Kc7, Kc8, Kc9, Kc0, RightFn];

pub const QWERTY: Layer = [
    FUNCTION_ROW,
    [CapsLock, LeftBracket, No, No, No, No, No, No, No, No, Equal, Quote],
    [LCtrl, RightBracket, No, No, No, Escape, Application, No, No, No, Minus, RCtrl],
    [LGui, Grave, No, No, No, Tab, Enter, No, No, No, Backslash, RGui],
    NUMBER_ROW,
    [Backspace, Q, W, E, R, T, Y, U, I, O, P, Space],
    [LShift, A, S, D, F, G, H, J, K, L, Semicolon, RShift],
    [LAlt, Z, X, C, V, B, N, M, Comma, Dot, Slash, RAlt],
];

pub const DVORAK: Layer = [
    FUNCTION_ROW,
    [CapsLock, LeftBracket, No, No, No, No, No, No, No, No, Backslash, Minus],
    [LCtrl, RightBracket, No, No, No, Escape, Application, No, No, No, Slash, RCtrl],
    [LGui, Grave, No, No, No, Tab, Enter, No, No, No, Equal, RGui],
    NUMBER_ROW,
    [Backspace, Quote, Comma, Dot, P, Y, F, G, C, R, L, Space],
    [LShift, A, O, E, U, I, D, H, T, N, S, RShift],
    [LAlt, Semicolon, Q, J, K, X, B, M, W, V, Z, RAlt],
];

/// Symbols in the host's JIS keymap: `[` is RightBracket, `]` NonusHash,
/// `\` International3 and `@` LeftBracket
pub const JIS: Layer = [
    FUNCTION_ROW,
    [CapsLock, RightBracket, No, No, No, No, No, No, No, No, Equal, Quote],
    [LCtrl, NonusHash, No, No, No, Escape, Application, No, No, No, Minus, RCtrl],
    [LGui, International3, No, No, No, Tab, Enter, No, No, No, LeftBracket, RGui],
    NUMBER_ROW,
    [Backspace, Q, W, E, R, T, Y, U, I, O, P, Space],
    [LShift, A, S, D, F, G, H, J, K, L, Semicolon, RShift],
    [LAlt, Z, X, C, V, B, N, M, Comma, Dot, Slash, RAlt],
];

pub const NICOLA_F: Layer = [
    FUNCTION_ROW,
    [Equal, RightBracket, No, No, No, No, No, No, No, No, Minus, Backspace],
    [LCtrl, NonusHash, No, No, No, Escape, Application, No, No, No, Quote, RCtrl],
    [LGui, International3, No, No, No, Tab, Enter, No, No, No, LeftBracket, RGui],
    NUMBER_ROW,
    [KpEnter, Q, W, E, R, T, Y, U, I, O, P, Space],
    [LShift, A, S, D, F, G, H, J, K, L, Semicolon, RShift],
    [LAlt, Z, X, C, V, B, N, M, Comma, Dot, Slash, RAlt],
];

pub const COLEMAK: Layer = [
    FUNCTION_ROW,
    [CapsLock, LeftBracket, No, No, No, No, No, No, No, No, Equal, Quote],
    [LCtrl, RightBracket, No, No, No, Escape, Application, No, No, No, Minus, RCtrl],
    [LGui, Grave, No, No, No, Tab, Enter, No, No, No, Backslash, RGui],
    NUMBER_ROW,
    [Backspace, Q, W, F, P, G, J, L, U, Y, Semicolon, Space],
    [LShift, A, R, S, T, D, H, N, E, I, O, RShift],
    [LAlt, Z, X, C, V, B, K, M, Comma, Dot, Slash, RAlt],
];

pub const COLEMAK_DHM: Layer = [
    FUNCTION_ROW,
    [CapsLock, LeftBracket, No, No, No, No, No, No, No, No, Equal, Quote],
    [LCtrl, RightBracket, No, No, No, Escape, Application, No, No, No, Minus, RCtrl],
    [LGui, Grave, No, No, No, Tab, Enter, No, No, No, Backslash, RGui],
    NUMBER_ROW,
    [Backspace, Q, W, F, P, B, J, L, U, Y, Semicolon, Space],
    [LShift, A, R, S, T, G, M, N, E, I, O, RShift],
    [LAlt, Z, X, C, D, V, K, H, Comma, Dot, Slash, RAlt],
];

/// Keypad keys laid over the right hand while Num Lock is on
pub const NUM_LOCK_OVERLAY: Layer = [
    [No; MATRIX_COLS],
    [No; MATRIX_COLS],
    [No; MATRIX_COLS],
    [No, No, No, No, No, No, No, No, No, No, No, KpDot],
    [No, No, No, No, No, No, Calc, Tab, KpSlash, KpAsterisk, Backspace, No],
    [No, No, No, No, No, No, No, Kp7, Kp8, Kp9, KpMinus, Kp0],
    [No, No, No, No, No, No, No, Kp4, Kp5, Kp6, KpPlus, No],
    [No, No, No, No, No, No, No, Kp1, Kp2, Kp3, KpEnter, No],
];

/// Rows looked up for the two edge columns, indexed by modifier scheme mod 4.
///
/// Row 2 is Control, row 5 Backspace/Space and row 6 Shift.
pub const EDGE_ROW_REMAP: [[usize; MATRIX_ROWS]; 4] = [
    [0, 1, 2, 3, 4, 5, 6, 7], // XC
    [0, 1, 6, 3, 4, 5, 2, 7], // XS
    [0, 1, 2, 3, 4, 6, 5, 7], // C
    [0, 1, 6, 3, 4, 2, 5, 7], // S
];

/// A key of the Fn layer, sent together with its modifiers
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FnKey {
    pub modifiers: HidModifiers,
    pub key: KeyCode,
}

impl FnKey {
    pub const NONE: FnKey = FnKey::key(No);

    pub const fn key(key: KeyCode) -> Self {
        Self {
            modifiers: HidModifiers::new(),
            key,
        }
    }

    pub const fn with(modifiers: HidModifiers, key: KeyCode) -> Self {
        Self { modifiers, key }
    }

    pub fn is_none(&self) -> bool {
        self.key == No
    }
}

const __: FnKey = FnKey::NONE;
const CTRL: HidModifiers = HidModifiers::LCTRL;
const SHIFT: HidModifiers = HidModifiers::LSHIFT;
const CTRL_SHIFT: HidModifiers = HidModifiers::new().with_left_ctrl(true).with_left_shift(true);

/// Editing and navigation keys of the Fn layer
#[rustfmt::skip]
pub const FN_LAYER: [[FnKey; MATRIX_COLS]; MATRIX_ROWS] = [
    [__; MATRIX_COLS],
    [
        FnKey::key(Delete), __, __, __, __, __,
        __, __, __, __, __, FnKey::key(NumLock),
    ],
    [
        __, FnKey::with(CTRL_SHIFT, Z), __, __, __, __,
        FnKey::key(CapsLock), __, __, __, FnKey::key(PrintScreen), __,
    ],
    [
        __, FnKey::key(Insert), __, __, __, __,
        __, __, __, __, FnKey::key(ScrollLock), __,
    ],
    [__; MATRIX_COLS],
    [
        __, __, __, FnKey::key(PageUp), __, __,
        FnKey::with(CTRL, Home), FnKey::with(CTRL, Left), FnKey::key(Up), FnKey::with(CTRL, Right), FnKey::with(CTRL, End), __,
    ],
    [
        __, __, __, FnKey::key(PageDown), __, __,
        FnKey::key(Home), FnKey::key(Left), FnKey::key(Down), FnKey::key(Right), FnKey::key(End), __,
    ],
    [
        __, __, __, __, __, __,
        __, FnKey::with(SHIFT, Left), FnKey::with(SHIFT, Down), FnKey::with(SHIFT, Right), FnKey::with(SHIFT, End), __,
    ],
];
