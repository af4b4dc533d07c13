//! Kana layout grids.
//!
//! Cells left empty fall back to the base layout key. Stickney leaves most of
//! the board to the host's JIS kana keymap and only moves a few keys.

use super::romaji::Roma;
use super::romaji::codes::*;
use crate::config::KanaLayout;
use crate::{MATRIX_COLS, MATRIX_ROWS};

pub type KanaGrid = [[Roma; MATRIX_COLS]; MATRIX_ROWS];

/// Tables of one kana layout, picked by the shift key held
#[derive(Debug, Copy, Clone)]
pub struct KanaTables {
    pub normal: &'static KanaGrid,
    pub left: &'static KanaGrid,
    pub right: &'static KanaGrid,
}

impl KanaLayout {
    /// Tables of the layout, `None` for romaji input
    pub fn tables(self) -> Option<KanaTables> {
        let (normal, left, right) = match self {
            KanaLayout::Romaji => return None,
            KanaLayout::Nicola => (&NICOLA, &NICOLA_LEFT, &NICOLA_RIGHT),
            KanaLayout::Tron => (&TRON, &TRON_LEFT, &TRON_RIGHT),
            KanaLayout::Stickney => (&STICKNEY, &STICKNEY_SHIFT, &STICKNEY_SHIFT),
            KanaLayout::X6004 => (&X6004, &X6004_SHIFT, &X6004_SHIFT),
            KanaLayout::Mtype => (&MTYPE, &MTYPE_SHIFT, &MTYPE_SHIFT),
            KanaLayout::NewStickney => (&NEW_STICKNEY, &NEW_STICKNEY_SHIFT, &NEW_STICKNEY_SHIFT),
        };
        Some(KanaTables { normal, left, right })
    }
}

const __: Roma = Roma(0);
const BLANK: [Roma; MATRIX_COLS] = [__; MATRIX_COLS];

#[rustfmt::skip]
const STICKNEY: KanaGrid = [
    BLANK,
    [__, JIS_LCB, __, __, __, __, __, __, __, __, __, JIS_TOUTEN],
    [__, JIS_RCB, __, __, __, __, __, __, __, __, JIS_KUTEN, __],
    BLANK,
    [__, JIS_HO, __, __, __, __, __, __, __, __, __, __],
    [__, __, __, __, __, __, __, __, __, __, JIS_DAKUTEN, __],
    BLANK,
    [__, __, __, JIS_WO, __, __, __, __, __, __, JIS_CHOUON, __],
];

#[rustfmt::skip]
const STICKNEY_SHIFT: KanaGrid = [
    BLANK,
    [__, JIS_LCB, __, __, __, __, __, __, __, __, __, __],
    [__, JIS_RCB, __, __, __, __, __, __, __, __, JIS_KUTEN, __],
    BLANK,
    BLANK,
    [__, __, __, __, JIS_SO, __, __, __, __, __, JIS_HANDAKU, __],
    [__, __, __, JIS_SE, JIS_HE, JIS_KE, __, JIS_ME, JIS_NU, JIS_RO, __, __],
    [__, __, __, __, __, __, __, JIS_MU, __, __, __, __],
];

#[rustfmt::skip]
const TRON: KanaGrid = [
    BLANK,
    [__, LCB, __, __, __, __, __, __, __, __, __, __],
    [__, RCB, __, __, __, __, __, __, __, __, __, __],
    BLANK,
    BLANK,
    [__, RA, RU, KO, HA, XYO, KI, NO, KU, A, RE, __],
    [__, TA, TO, KA, TE, MO, WO, I, U, SI, NN, __],
    [__, MA, RI, NI, SA, NA, SU, TU, TOUTEN, KUTEN, XTU, __],
];

#[rustfmt::skip]
const TRON_LEFT: KanaGrid = [
    BLANK,
    [__, LCB, __, __, __, __, __, __, __, __, __, __],
    [__, RCB, __, __, __, __, __, __, __, __, __, __],
    [__, SANTEN, __, __, __, __, __, __, __, __, __, __],
    BLANK,
    [__, HI, SO, NAKAGURO, XYA, HO, GI, GE, GU, QUESTION, WYI, __],
    [__, NU, NE, XYU, YO, HU, DAKUTEN, DI, VU, ZI, WYE, __],
    [__, XE, XO, SE, YU, HE, ZU, DU, COMMA, PERIOD, XWA, __],
];

#[rustfmt::skip]
const TRON_RIGHT: KanaGrid = [
    BLANK,
    [__, LWCB, __, __, __, __, __, __, __, __, __, __],
    [__, RWCB, __, __, __, __, __, __, __, __, __, __],
    BLANK,
    BLANK,
    [__, BI, ZO, GO, BA, BO, E, KE, ME, MU, RO, __],
    [__, DA, DO, GA, DE, BU, O, TI, CHOUON, MI, YA, __],
    [__, XKA, XKE, ZE, ZA, BE, WA, XI, XA, HANDAKU, XU, __],
];

#[rustfmt::skip]
const NICOLA: KanaGrid = [
    BLANK,
    [__, LCB, __, __, __, __, __, __, __, __, DAKUTEN, __],
    [__, RCB, __, __, __, __, __, __, __, __, TOUTEN, __],
    BLANK,
    BLANK,
    [__, KUTEN, KA, TA, KO, SA, RA, TI, KU, TU, TOUTEN, __],
    [__, U, SI, TE, KE, SE, HA, TO, KI, I, NN, __],
    [__, KUTEN, HI, SU, HU, HE, ME, SO, NE, HO, NAKAGURO, __],
];

#[rustfmt::skip]
const NICOLA_LEFT: KanaGrid = [
    BLANK,
    [__, LCB, __, __, __, __, __, __, __, __, DAKUTEN, __],
    [__, RCB, __, __, __, __, __, __, __, __, TOUTEN, __],
    BLANK,
    [__, QUESTION, SLASH, NAMI, LCB, RCB, LSB, RSB, __, __, __, __],
    [__, XA, E, RI, XYA, RE, PA, DI, GU, DU, PI, __],
    [__, WO, A, NA, XYU, MO, BA, DO, GI, PO, NN, __],
    [__, XU, CHOUON, RO, YA, XI, PU, ZO, PE, BO, NAKAGURO, __],
];

#[rustfmt::skip]
const NICOLA_RIGHT: KanaGrid = [
    BLANK,
    [__, LWCB, __, __, __, __, __, __, __, __, HANDAKU, __],
    [__, RWCB, __, __, __, __, __, __, __, __, TOUTEN, __],
    BLANK,
    [__, QUESTION, SLASH, NAMI, LCB, RCB, LSB, RSB, __, __, __, __],
    [__, KUTEN, GA, DA, GO, ZA, YO, NI, RU, MA, XE, __],
    [__, VU, ZI, DE, GE, ZE, MI, O, NO, XYO, XTU, __],
    [__, KUTEN, BI, ZU, BU, BE, NU, YU, MU, WA, XO, __],
];

#[rustfmt::skip]
const X6004: KanaGrid = [
    BLANK,
    [__, LCB, __, __, __, __, __, __, __, __, __, NA],
    [__, RCB, __, __, __, __, __, __, __, __, TI, __],
    BLANK,
    BLANK,
    [__, SO, KE, SE, TE, XYO, TU, NN, NO, WO, RI, __],
    [__, HA, KA, SI, TO, TA, KU, U, I, DAKUTEN, KI, __],
    [__, SU, KO, NI, SA, A, XTU, RU, TOUTEN, KUTEN, RE, __],
];

#[rustfmt::skip]
const X6004_SHIFT: KanaGrid = [
    BLANK,
    [__, LWCB, __, __, __, __, __, __, __, __, __, RCB],
    [__, RWCB, __, __, __, __, __, __, __, __, LCB, __],
    BLANK,
    BLANK,
    [__, XA, HANDAKU, HO, HU, ME, HI, E, MI, YA, NU, __],
    [__, XI, HE, RA, XYU, YO, MA, O, MO, WA, YU, __],
    [__, XU, XE, XO, NE, XYA, MU, RO, NAKAGURO, CHOUON, QUESTION, __],
];

#[rustfmt::skip]
const MTYPE: KanaGrid = [
    BLANK,
    BLANK,
    BLANK,
    BLANK,
    BLANK,
    [__, Q, L, J, F, C, M, Y, R, W, P, __],
    [__, E, U, I, A, O, K, S, T, N, H, __],
    [__, EI, X, V, AI, OU, G, Z, D, TOUTEN, B, __],
];

#[rustfmt::skip]
const MTYPE_SHIFT: KanaGrid = [
    BLANK,
    BLANK,
    BLANK,
    BLANK,
    BLANK,
    [__, EKI, UKU, IKU, AKU, OKU, MY, XTU, RY, NN, PY, __],
    [__, ENN, UNN, INN, ANN, ONN, KY, SY, TY, NY, HY, __],
    [__, ETU, UTU, ITU, ATU, OTU, GY, ZY, DY, KUTEN, BY, __],
];

#[rustfmt::skip]
const NEW_STICKNEY: KanaGrid = [
    BLANK,
    [__, LCB, __, __, __, __, __, __, __, __, __, SPACE],
    [__, RCB, __, __, __, __, __, __, __, __, __, __],
    BLANK,
    BLANK,
    [__, KE, KU, SU, SA, TU, NU, O, NO, NI, NE, __],
    [__, HA, KA, SI, TA, TE, RA, U, I, DAKUTEN, NA, __],
    [__, YO, KI, KO, TO, TI, XTU, NN, TOUTEN, KUTEN, NAKAGURO, __],
];

#[rustfmt::skip]
const NEW_STICKNEY_SHIFT: KanaGrid = [
    BLANK,
    [__, LWCB, __, __, __, __, __, __, __, __, __, __],
    [__, RWCB, __, __, __, __, __, __, __, __, __, __],
    BLANK,
    BLANK,
    [__, __, HANDAKU, HI, HU, __, MU, E, MO, MI, ME, __],
    [__, YA, SO, SE, HE, HO, RE, RU, RI, A, MA, __],
    [__, YU, WYI, __, WYE, __, RO, CHOUON, WO, WA, QUESTION, __],
];
