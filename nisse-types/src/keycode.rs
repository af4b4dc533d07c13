use serde::{Deserialize, Serialize};
use strum::FromRepr;

use crate::modifier::HidModifiers;

/// Key codes emitted by the keyboard core.
///
/// Values up to `RGui` are usages of the HID keyboard page. The codes from
/// `LeftFn` on are firmware pseudo keys that never leave the keyboard as-is.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord, FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    /// Reserved, no-key.
    #[default]
    No = 0x00,
    /// Keyboard roll over error, too many keys are pressed simultaneously, not a physical key.
    ErrorRollover = 0x01,
    /// Keyboard post fail error, not a physical key.
    PostFail = 0x02,
    /// An undefined error, not a physical key.
    ErrorUndefined = 0x03,
    A = 0x04,
    B = 0x05,
    C = 0x06,
    D = 0x07,
    E = 0x08,
    F = 0x09,
    G = 0x0A,
    H = 0x0B,
    I = 0x0C,
    J = 0x0D,
    K = 0x0E,
    L = 0x0F,
    M = 0x10,
    N = 0x11,
    O = 0x12,
    P = 0x13,
    Q = 0x14,
    R = 0x15,
    S = 0x16,
    T = 0x17,
    U = 0x18,
    V = 0x19,
    W = 0x1A,
    X = 0x1B,
    Y = 0x1C,
    Z = 0x1D,
    /// `1` and `!`
    Kc1 = 0x1E,
    /// `2` and `@`
    Kc2 = 0x1F,
    /// `3` and `#`
    Kc3 = 0x20,
    /// `4` and `$`
    Kc4 = 0x21,
    /// `5` and `%`
    Kc5 = 0x22,
    /// `6` and `^`
    Kc6 = 0x23,
    /// `7` and `&`
    Kc7 = 0x24,
    /// `8` and `*`
    Kc8 = 0x25,
    /// `9` and `(`
    Kc9 = 0x26,
    /// `0` and `)`
    Kc0 = 0x27,
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    /// `-` and `_`
    Minus = 0x2D,
    /// `=` and `+`
    Equal = 0x2E,
    /// `[` and `{`
    LeftBracket = 0x2F,
    /// `]` and `}`
    RightBracket = 0x30,
    /// `\` and `|`
    Backslash = 0x31,
    /// Non-US `#` and `~`, `]` on JIS keyboards
    NonusHash = 0x32,
    /// `;` and `:`
    Semicolon = 0x33,
    /// `'` and `"`
    Quote = 0x34,
    /// `` ` `` and `~`, Zenkaku/Hankaku on JIS keyboards
    Grave = 0x35,
    /// `,` and `<`
    Comma = 0x36,
    /// `.` and `>`
    Dot = 0x37,
    /// `/` and `?`
    Slash = 0x38,
    CapsLock = 0x39,
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,
    PrintScreen = 0x46,
    ScrollLock = 0x47,
    Pause = 0x48,
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    Right = 0x4F,
    Left = 0x50,
    Down = 0x51,
    Up = 0x52,
    NumLock = 0x53,
    KpSlash = 0x54,
    KpAsterisk = 0x55,
    KpMinus = 0x56,
    KpPlus = 0x57,
    KpEnter = 0x58,
    Kp1 = 0x59,
    Kp2 = 0x5A,
    Kp3 = 0x5B,
    Kp4 = 0x5C,
    Kp5 = 0x5D,
    Kp6 = 0x5E,
    Kp7 = 0x5F,
    Kp8 = 0x60,
    Kp9 = 0x61,
    Kp0 = 0x62,
    KpDot = 0x63,
    NonusBackslash = 0x64,
    Application = 0x65,
    /// `_` and `\` (Ro) on JIS keyboards
    International1 = 0x87,
    /// Katakana/Hiragana
    International2 = 0x88,
    /// Yen
    International3 = 0x89,
    /// Henkan
    International4 = 0x8A,
    /// Muhenkan
    International5 = 0x8B,
    International6 = 0x8C,
    International7 = 0x8D,
    International8 = 0x8E,
    International9 = 0x8F,
    /// Kana on Apple keyboards, Hangul/English toggle elsewhere
    Language1 = 0x90,
    /// Eisu on Apple keyboards, Hanja conversion elsewhere
    Language2 = 0x91,
    Language3 = 0x92,
    Language4 = 0x93,
    Language5 = 0x94,
    /// Left Control
    LCtrl = 0xE0,
    /// Left Shift
    LShift = 0xE1,
    /// Left Alt
    LAlt = 0xE2,
    /// Left GUI
    LGui = 0xE3,
    /// Right Control
    RCtrl = 0xE4,
    /// Right Shift
    RShift = 0xE5,
    /// Right Alt
    RAlt = 0xE6,
    /// Right GUI
    RGui = 0xE7,
    /// Left Fn layer key
    LeftFn = 0xF0,
    /// Right Fn layer key
    RightFn = 0xF1,
    /// Voiced sound mark produced by the kana tables
    Dakuten = 0xF3,
    /// Semi-voiced sound mark produced by the kana tables
    Handaku = 0xF4,
    /// Calculator launcher on the Num Lock overlay
    Calc = 0xFB,
}

impl KeyCode {
    /// Returns `true` if the keycode is a modifier keycode
    pub fn is_modifier(self) -> bool {
        KeyCode::LCtrl <= self && self <= KeyCode::RGui
    }

    /// Returns `true` for F1 to F12
    pub fn is_function_key(self) -> bool {
        KeyCode::F1 <= self && self <= KeyCode::F12
    }

    /// Returns `true` for the two Fn layer keys
    pub fn is_layer_key(self) -> bool {
        matches!(self, KeyCode::LeftFn | KeyCode::RightFn)
    }

    /// Zero-based index of a function key, F1 is 0
    pub fn function_index(self) -> Option<usize> {
        if self.is_function_key() {
            Some((self as u8 - KeyCode::F1 as u8) as usize)
        } else {
            None
        }
    }

    /// Returns the modifier bit of a modifier keycode, or an empty set for other keys.
    pub fn to_hid_modifiers(self) -> HidModifiers {
        if self.is_modifier() {
            HidModifiers::from_bits(1 << (self as u8 - KeyCode::LCtrl as u8))
        } else {
            HidModifiers::new()
        }
    }

    /// Number row key for a single decimal digit
    pub fn digit(n: u8) -> KeyCode {
        match n {
            0 => KeyCode::Kc0,
            1..=9 => KeyCode::from(KeyCode::Kc1 as u8 + n - 1),
            _ => KeyCode::Space,
        }
    }

    /// The unshifted key that types `c` on a US layout.
    ///
    /// Letters map to their key regardless of case, `\n` maps to Enter.
    pub fn from_ascii(c: u8) -> Option<KeyCode> {
        let key = match c {
            b'a'..=b'z' => KeyCode::from(KeyCode::A as u8 + (c - b'a')),
            b'A'..=b'Z' => KeyCode::from(KeyCode::A as u8 + (c - b'A')),
            b'0'..=b'9' => KeyCode::digit(c - b'0'),
            b' ' => KeyCode::Space,
            b'\n' => KeyCode::Enter,
            b'-' => KeyCode::Minus,
            b'.' => KeyCode::Dot,
            b',' => KeyCode::Comma,
            b'/' => KeyCode::Slash,
            _ => return None,
        };
        Some(key)
    }
}

impl ::postcard::experimental::max_size::MaxSize for KeyCode {
    const POSTCARD_MAX_SIZE: usize = 1usize;
}

impl From<u8> for KeyCode {
    fn from(value: u8) -> Self {
        Self::from_repr(value).unwrap_or(KeyCode::No)
    }
}

/// Keys in consumer page
/// Ref: <https://www.usb.org/sites/default/files/documents/hut1_12v2.pdf#page=75>
#[repr(u16)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsumerKey {
    #[default]
    No = 0x00,
    /// The collection usage itself, never pressed. Used as the "nothing sent yet" state.
    ConsumerControl = 0x01,
    // 15.9.1 Audio Controls - Volume
    Mute = 0xE2,
    VolumeIncrement = 0xE9,
    VolumeDecrement = 0xEA,
    // 15.15 Application Launch Buttons
    Calculator = 0x192,
}

impl ConsumerKey {
    pub fn usage(self) -> u16 {
        self as u16
    }
}
