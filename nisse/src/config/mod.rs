//! Profile settings selectable from the Fn layer.
//!
//! Each setting is stored as one byte in the active profile. The enums here
//! give those bytes names, a display label typed back by the Fn layer, and a
//! fallback for bytes that are out of range.

use strum::FromRepr;

use crate::profile::ProfileStore;

macro_rules! profile_setting {
    (
        $(#[$meta:meta])*
        $name:ident (default $default:ident) {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(u8)]
        #[derive(Debug, Copy, Clone, PartialEq, Eq, FromRepr)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl $name {
            pub const VARIANTS: &'static [Self] = &[$(Self::$variant),+];
            /// Largest stored value
            pub const MAX: u8 = (Self::VARIANTS.len() - 1) as u8;

            /// Decodes a stored byte, out of range values give the default.
            pub fn from_stored(value: u8) -> Self {
                Self::from_repr(value).unwrap_or_default()
            }

            /// Name typed by the Fn layer when the setting is shown or changed
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }
    };
}

profile_setting! {
    /// Physical base layout
    BaseLayout (default Qwerty) {
        Qwerty = 0 => "US",
        Dvorak = 1 => "US-D",
        Jis = 2 => "JP",
        NicolaF = 3 => "JP-N",
        Colemak = 4 => "US-C",
        ColemakDhm = 5 => "US-M",
    }
}

impl BaseLayout {
    /// Layouts whose host keymap is JIS
    pub fn is_japanese(self) -> bool {
        matches!(self, BaseLayout::Jis | BaseLayout::NicolaF)
    }
}

profile_setting! {
    /// Kana input method used while kana mode is on
    KanaLayout (default Romaji) {
        /// Keys pass through, the host IME does the conversion
        Romaji = 0 => "ROMA",
        Nicola = 1 => "NICO",
        Tron = 2 => "TRON",
        Stickney = 3 => "STICK",
        X6004 = 4 => "X6004",
        Mtype = 5 => "MTYPE",
        NewStickney = 6 => "NEW",
    }
}

profile_setting! {
    /// Host OS family, decides which keys switch the IME on and off
    OsFamily (default Pc) {
        /// No language keys
        Pc = 0 => "PC",
        /// Kana / Eisu
        Mac = 1 => "MAC",
        /// Shift-Ctrl-Space / Shift-Ctrl-Backspace
        Us104A = 2 => "104A",
        /// Alt-`
        Us104B = 3 => "104B",
        /// Henkan / Muhenkan
        Jp109 = 4 => "109",
        /// Shift-Ctrl-Henkan / Shift-Ctrl-Muhenkan
        Jp109A = 5 => "109A",
        /// Zenkaku/Hankaku
        Jp109B = 6 => "109B",
        AltSpace = 7 => "A-SP",
        ShiftSpace = 8 => "S-SP",
        CtrlSpace = 9 => "C-SP",
        CapsLock = 10 => "CAPS",
    }
}

profile_setting! {
    /// Debounce delay tier, one step is one 12 ms sample
    DelayTier (default D0) {
        D0 = 0 => "D0",
        D12 = 1 => "D12",
        D24 = 2 => "D24",
        D36 = 3 => "D36",
        D48 = 4 => "D48",
    }
}

impl DelayTier {
    /// Distance in ring slots between the newest sample and the sample used for debouncing
    pub fn ticks(self) -> usize {
        self as usize
    }
}

profile_setting! {
    /// Which edge-column keys act as Control and Shift.
    ///
    /// `X` swaps the Shift and Control rows, `S` puts Shift on the Backspace/Space row,
    /// `J` adds Japanese language keys and `A` is the Apple flavor of that.
    ModifierScheme (default Xc) {
        Xc = 0 => "XC",
        Xs = 1 => "XS",
        C = 2 => "C",
        S = 3 => "S",
        Xcj = 4 => "XCJ",
        Xsj = 5 => "XSJ",
        Cj = 6 => "CJ",
        Sj = 7 => "SJ",
        Xcja = 8 => "XCJA",
        Xsja = 9 => "XSJA",
        Cja = 10 => "CJA",
        Sja = 11 => "SJA",
    }
}

impl ModifierScheme {
    /// Edge-column arrangement shared by the plain, Japanese and Apple variants
    pub fn base(self) -> ModifierScheme {
        ModifierScheme::from_stored(self as u8 % 4)
    }

    pub fn is_japanese(self) -> bool {
        self as u8 >= ModifierScheme::Xcj as u8
    }

    pub fn is_mac(self) -> bool {
        self as u8 >= ModifierScheme::Xcja as u8
    }

    /// Row whose edge-column keys are debounced as layer-shift keys
    pub fn layer_shift_row(self) -> usize {
        match self.base() {
            ModifierScheme::S | ModifierScheme::Xs => 2,
            ModifierScheme::C => 5,
            _ => 6,
        }
    }
}

profile_setting! {
    /// Which LED shows the kana state
    IndicatorMode (default Off) {
        /// Kana replaces Num Lock
        Left = 0 => "L",
        /// Kana replaces Caps Lock
        Center = 1 => "C",
        /// Kana replaces Scroll Lock
        Right = 2 => "R",
        /// Kana shares the Num Lock LED
        LeftNum = 3 => "L-N",
        /// Kana shares the Caps Lock LED
        CenterCaps = 4 => "C-C",
        /// Kana shares the Scroll Lock LED
        RightScroll = 5 => "R-S",
        Off = 6 => "OFF",
    }
}

profile_setting! {
    /// Host IME, selects the key sequences for brackets and other symbols
    ImeFlavor (default Ms) {
        Ms = 0 => "MS",
        Atok = 1 => "ATOK",
        Google = 2 => "GOOG",
        Apple = 3 => "APPL",
    }
}

profile_setting! {
    /// Touch pad sensitivity, only read by the touch subsystem
    PadSensitivity (default S1) {
        S1 = 0 => "1",
        S2 = 1 => "2",
        S3 = 2 => "3",
        S4 = 3 => "4",
    }
}

profile_setting! {
    /// Prefix shift: tapping Shift shifts the next kana key
    PrefixShift (default Off) {
        Off = 0 => "OFF",
        On = 1 => "ON",
        /// On, and the Scroll Lock LED shows a pending shift
        Led = 2 => "LED",
    }
}

/// Byte offsets of the settings inside one stored profile
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfileKey {
    BaseLayout = 0,
    KanaLayout = 1,
    OsFamily = 2,
    DelayTier = 3,
    ModifierScheme = 4,
    IndicatorMode = 5,
    ImeFlavor = 6,
    PadSensitivity = 7,
    PrefixShift = 8,
}

impl ProfileKey {
    pub const ALL: [ProfileKey; 9] = [
        ProfileKey::BaseLayout,
        ProfileKey::KanaLayout,
        ProfileKey::OsFamily,
        ProfileKey::DelayTier,
        ProfileKey::ModifierScheme,
        ProfileKey::IndicatorMode,
        ProfileKey::ImeFlavor,
        ProfileKey::PadSensitivity,
        ProfileKey::PrefixShift,
    ];

    pub fn offset(self) -> usize {
        self as usize
    }

    /// Largest value the setting accepts
    pub fn max(self) -> u8 {
        match self {
            ProfileKey::BaseLayout => BaseLayout::MAX,
            ProfileKey::KanaLayout => KanaLayout::MAX,
            ProfileKey::OsFamily => OsFamily::MAX,
            ProfileKey::DelayTier => DelayTier::MAX,
            ProfileKey::ModifierScheme => ModifierScheme::MAX,
            ProfileKey::IndicatorMode => IndicatorMode::MAX,
            ProfileKey::ImeFlavor => ImeFlavor::MAX,
            ProfileKey::PadSensitivity => PadSensitivity::MAX,
            ProfileKey::PrefixShift => PrefixShift::MAX,
        }
    }

    /// Display label of a stored value
    pub fn label(self, value: u8) -> &'static str {
        match self {
            ProfileKey::BaseLayout => BaseLayout::from_stored(value).label(),
            ProfileKey::KanaLayout => KanaLayout::from_stored(value).label(),
            ProfileKey::OsFamily => OsFamily::from_stored(value).label(),
            ProfileKey::DelayTier => DelayTier::from_stored(value).label(),
            ProfileKey::ModifierScheme => ModifierScheme::from_stored(value).label(),
            ProfileKey::IndicatorMode => IndicatorMode::from_stored(value).label(),
            ProfileKey::ImeFlavor => ImeFlavor::from_stored(value).label(),
            ProfileKey::PadSensitivity => PadSensitivity::from_stored(value).label(),
            ProfileKey::PrefixShift => PrefixShift::from_stored(value).label(),
        }
    }
}

/// Settings of the active profile, read once per tick
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProfileSettings {
    pub base: BaseLayout,
    pub kana: KanaLayout,
    pub os: OsFamily,
    pub delay: DelayTier,
    pub scheme: ModifierScheme,
    pub indicator: IndicatorMode,
    pub ime: ImeFlavor,
    pub pad: PadSensitivity,
    pub prefix: PrefixShift,
}

impl ProfileSettings {
    pub fn from_store<P: ProfileStore + ?Sized>(store: &P) -> Self {
        Self {
            base: BaseLayout::from_stored(store.read(ProfileKey::BaseLayout)),
            kana: KanaLayout::from_stored(store.read(ProfileKey::KanaLayout)),
            os: OsFamily::from_stored(store.read(ProfileKey::OsFamily)),
            delay: DelayTier::from_stored(store.read(ProfileKey::DelayTier)),
            scheme: ModifierScheme::from_stored(store.read(ProfileKey::ModifierScheme)),
            indicator: IndicatorMode::from_stored(store.read(ProfileKey::IndicatorMode)),
            ime: ImeFlavor::from_stored(store.read(ProfileKey::ImeFlavor)),
            pad: PadSensitivity::from_stored(store.read(ProfileKey::PadSensitivity)),
            prefix: PrefixShift::from_stored(store.read(ProfileKey::PrefixShift)),
        }
    }

    /// Raw profile bytes, unused trailing bytes are zero
    pub fn to_bytes(&self) -> [u8; crate::PROFILE_DATA_SIZE] {
        let mut data = [0; crate::PROFILE_DATA_SIZE];
        data[ProfileKey::BaseLayout.offset()] = self.base as u8;
        data[ProfileKey::KanaLayout.offset()] = self.kana as u8;
        data[ProfileKey::OsFamily.offset()] = self.os as u8;
        data[ProfileKey::DelayTier.offset()] = self.delay as u8;
        data[ProfileKey::ModifierScheme.offset()] = self.scheme as u8;
        data[ProfileKey::IndicatorMode.offset()] = self.indicator as u8;
        data[ProfileKey::ImeFlavor.offset()] = self.ime as u8;
        data[ProfileKey::PadSensitivity.offset()] = self.pad as u8;
        data[ProfileKey::PrefixShift.offset()] = self.prefix as u8;
        data
    }
}
