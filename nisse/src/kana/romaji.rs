//! Romaji units and their key sequences.
//!
//! A kana layout cell holds a one-byte romaji unit. Units below 161 combine a
//! consonant cluster with a vowel (`code = consonant * 7 + vowel`), the higher
//! ranges index fixed tables for M-type digraphs, symbols and IME brackets.

use heapless::Vec;
use nisse_types::keycode::KeyCode::{self, *};

use crate::config::ImeFlavor;

/// Up to three keystrokes produced by one kana key
pub type Expansion = Vec<KeyCode, 3>;

/// One kana layout cell
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Roma(pub u8);

/// Decoded form of a [`Roma`] code
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RomajiUnit {
    /// Empty cell
    None,
    /// Consonant cluster followed by a vowel, either may be empty
    Syllable { consonant: u8, vowel: u8 },
    /// Fixed M-type digraph
    MType(u8),
    /// Punctuation and JIS kana keys
    Common(u8),
    /// Symbol whose keys depend on the host IME
    Ime(u8),
}

const SYLLABLE_END: u8 = 161;
const MTYPE_START: u8 = SYLLABLE_END;
const MTYPE_END: u8 = 182;
const COMMON_START: u8 = 200;
const COMMON_END: u8 = 226;
const IME_START: u8 = 230;
const IME_END: u8 = 241;

impl Roma {
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn decode(self) -> RomajiUnit {
        match self.0 {
            0 => RomajiUnit::None,
            c if c < SYLLABLE_END => RomajiUnit::Syllable {
                consonant: c / 7,
                vowel: c % 7,
            },
            c @ MTYPE_START..=MTYPE_END => RomajiUnit::MType(c - MTYPE_START),
            c @ COMMON_START..=COMMON_END => RomajiUnit::Common(c - COMMON_START),
            c @ IME_START..=IME_END => RomajiUnit::Ime(c - IME_START),
            _ => RomajiUnit::None,
        }
    }

    /// Keys typed for this unit.
    ///
    /// `jis` selects the JIS host keymap for the IME symbol table.
    pub fn expand(self, ime: ImeFlavor, jis: bool) -> Expansion {
        match self.decode() {
            RomajiUnit::None => Expansion::new(),
            RomajiUnit::Syllable { consonant, vowel } => {
                let mut keys: Expansion = CONSONANTS[consonant as usize].iter().copied().collect();
                let vowel = VOWELS[vowel as usize];
                if vowel != No {
                    keys.push(vowel).ok();
                }
                keys
            }
            RomajiUnit::MType(i) => MTYPE[i as usize].iter().copied().collect(),
            RomajiUnit::Common(i) => COMMON[i as usize].iter().copied().collect(),
            RomajiUnit::Ime(i) => {
                let keys = ime_table(ime)[i as usize].iter().copied();
                if jis {
                    keys.map(ansi_to_jis).collect()
                } else {
                    keys.collect()
                }
            }
        }
    }
}

/// The JIS key typing the same symbol as an ANSI key, at most one step
fn ansi_to_jis(key: KeyCode) -> KeyCode {
    ANSI_TO_JIS
        .iter()
        .find(|(from, _)| *from == key)
        .map(|&(_, to)| to)
        .unwrap_or(key)
}

fn ime_table(ime: ImeFlavor) -> &'static [&'static [KeyCode]; 12] {
    match ime {
        ImeFlavor::Ms => &MS_SYMBOLS,
        ImeFlavor::Atok => &ATOK_SYMBOLS,
        ImeFlavor::Google => &GOOGLE_SYMBOLS,
        ImeFlavor::Apple => &APPLE_SYMBOLS,
    }
}

const CONSONANTS: [&[KeyCode]; 23] = [
    &[],
    &[K],
    &[S],
    &[T],
    &[N],
    &[H],
    &[M],
    &[Y],
    &[R],
    &[W],
    &[P],
    &[G],
    &[Z],
    &[D],
    &[B],
    &[X],
    &[X, K],
    &[X, T],
    &[X, Y],
    &[X, W],
    &[W, Y],
    &[V],
    &[L],
];

const VOWELS: [KeyCode; 7] = [No, A, I, U, E, O, Y];

const MTYPE: [&[KeyCode]; 22] = [
    &[A, N, N],
    &[A, K, U],
    &[A, T, U],
    &[A, I],
    &[I, N, N],
    &[I, K, U],
    &[I, T, U],
    &[U, N, N],
    &[U, K, U],
    &[U, T, U],
    &[E, N, N],
    &[E, K, I],
    &[E, T, U],
    &[E, I],
    &[O, N, N],
    &[O, K, U],
    &[O, T, U],
    &[O, U],
    &[C],
    &[F],
    &[J],
    &[Q],
];

const COMMON: [&[KeyCode]; 27] = [
    &[N, N],
    &[Minus],
    &[Dakuten],
    &[Handaku],
    &[LShift, Slash],
    &[Comma],
    &[Dot],
    &[LShift, Comma],
    &[LShift, Dot],
    // JIS kana keys
    &[LeftBracket],
    &[RightBracket],
    &[LShift, RightBracket],
    &[LShift, NonusHash],
    &[Quote],
    &[Equal],
    &[Minus],
    &[Kc1],
    &[Slash],
    &[NonusHash],
    &[LShift, Kc0],
    &[International1],
    &[LShift, Comma],
    &[LShift, Dot],
    &[LShift, Slash],
    &[International3],
    &[LShift, Kc1],
    &[Space],
];

const MS_SYMBOLS: [&[KeyCode]; 12] = [
    &[LeftBracket],
    &[RightBracket],
    &[LeftBracket],
    &[RightBracket],
    &[LeftBracket],
    &[RightBracket],
    &[Slash],
    &[Slash],
    &[Slash, Slash, Slash],
    &[Comma],
    &[Dot],
    &[LShift, Grave],
];

const ATOK_SYMBOLS: [&[KeyCode]; 12] = MS_SYMBOLS;

const GOOGLE_SYMBOLS: [&[KeyCode]; 12] = [
    &[LeftBracket],
    &[RightBracket],
    &[Z, LeftBracket],
    &[Z, RightBracket],
    &[LeftBracket],
    &[RightBracket],
    &[Z, Slash],
    &[Slash],
    &[Z, Dot],
    &[Comma],
    &[Dot],
    &[LShift, Grave],
];

const APPLE_SYMBOLS: [&[KeyCode]; 12] = [
    &[LeftBracket],
    &[RightBracket],
    &[LShift, LeftBracket],
    &[LShift, RightBracket],
    &[LAlt, LShift, Kc9],
    &[LAlt, LShift, Kc0],
    &[Slash],
    &[Slash],
    &[Slash, Slash, Slash],
    &[Comma],
    &[Dot],
    &[LShift, Grave],
];

const ANSI_TO_JIS: [(KeyCode, KeyCode); 5] = [
    (LeftBracket, RightBracket),
    (RightBracket, NonusHash),
    (Grave, Equal),
    (Kc9, Kc8),
    (Kc0, Kc9),
];

/// Named romaji units used by the kana layouts
pub mod codes {
    use super::Roma;

    macro_rules! roma_codes {
        ($($name:ident = $value:literal),+ $(,)?) => {
            $(pub const $name: Roma = Roma($value);)+
        };
    }

    roma_codes! {
        A = 1, I = 2, U = 3, E = 4, O = 5,
        K = 7, KA = 8, KI = 9, KU = 10, KE = 11, KO = 12, KY = 13,
        S = 14, SA = 15, SI = 16, SU = 17, SE = 18, SO = 19, SY = 20,
        T = 21, TA = 22, TI = 23, TU = 24, TE = 25, TO = 26, TY = 27,
        N = 28, NA = 29, NI = 30, NU = 31, NE = 32, NO = 33, NY = 34,
        H = 35, HA = 36, HI = 37, HU = 38, HE = 39, HO = 40, HY = 41,
        M = 42, MA = 43, MI = 44, MU = 45, ME = 46, MO = 47, MY = 48,
        Y = 49, YA = 50, YU = 52, YO = 54,
        R = 56, RA = 57, RI = 58, RU = 59, RE = 60, RO = 61, RY = 62,
        W = 63, WA = 64, WO = 68,
        P = 70, PA = 71, PI = 72, PU = 73, PE = 74, PO = 75, PY = 76,
        G = 77, GA = 78, GI = 79, GU = 80, GE = 81, GO = 82, GY = 83,
        Z = 84, ZA = 85, ZI = 86, ZU = 87, ZE = 88, ZO = 89, ZY = 90,
        D = 91, DA = 92, DI = 93, DU = 94, DE = 95, DO = 96, DY = 97,
        B = 98, BA = 99, BI = 100, BU = 101, BE = 102, BO = 103, BY = 104,
        X = 105, XA = 106, XI = 107, XU = 108, XE = 109, XO = 110,
        XKA = 113, XKE = 116, XTU = 122,
        XYA = 127, XYU = 129, XYO = 131, XWA = 134,
        WYI = 142, WYE = 144,
        V = 147, VU = 150, L = 154,

        ANN = 161, AKU = 162, ATU = 163, AI = 164,
        INN = 165, IKU = 166, ITU = 167,
        UNN = 168, UKU = 169, UTU = 170,
        ENN = 171, EKI = 172, ETU = 173, EI = 174,
        ONN = 175, OKU = 176, OTU = 177, OU = 178,
        C = 179, F = 180, J = 181, Q = 182,

        NN = 200, CHOUON = 201, DAKUTEN = 202, HANDAKU = 203, QUESTION = 204,
        TOUTEN = 205, KUTEN = 206, LAB = 207, RAB = 208,
        JIS_DAKUTEN = 209, JIS_HANDAKU = 210, JIS_LCB = 211, JIS_RCB = 212,
        JIS_KE = 213, JIS_HE = 214, JIS_HO = 215, JIS_NU = 216, JIS_ME = 217,
        JIS_MU = 218, JIS_WO = 219, JIS_RO = 220, JIS_TOUTEN = 221, JIS_KUTEN = 222,
        JIS_NAKAGURO = 223, JIS_CHOUON = 224,
        BANG = 225, SPACE = 226,

        LCB = 230, RCB = 231, LWCB = 232, RWCB = 233, LSB = 234, RSB = 235,
        NAKAGURO = 236, SLASH = 237, SANTEN = 238, COMMA = 239, PERIOD = 240, NAMI = 241,
    }

    /// JIS kana keys that share a key with a romaji letter
    pub const JIS_SE: Roma = P;
    pub const JIS_SO: Roma = C;
}
