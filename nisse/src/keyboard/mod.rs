//! The keyboard engine.
//!
//! [`KeyboardEngine`] owns all state of the input core. The firmware calls
//! [`KeyboardEngine::task`] once per polling tick, then collects the reports it
//! wants to send with [`KeyboardEngine::keyboard_report`] and
//! [`KeyboardEngine::consumer_report`].

mod ime;
mod led;
mod report;

use nisse_types::keycode::{ConsumerKey, KeyCode};
use nisse_types::led_indicator::LedIndicator;
use nisse_types::modifier::HidModifiers;

use crate::DEFAULT_BOARD_REVISION;
use crate::config::ProfileSettings;
use crate::debounce::ConfirmedMatrix;
use crate::hid::KeyboardReport;
use crate::kana::KanaEngine;
use crate::keymap::{KeyMapping, ResolveContext};
use crate::macro_queue::MacroQueue;
use crate::matrix::{MatrixReader, Scanner};
use crate::profile::ProfileStore;

/// What the report assembler produced this tick
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transmission {
    /// No tick has run yet
    #[default]
    None,
    /// A report built from the keys held now
    Normal,
    /// An all-zero report that releases everything
    Break,
    /// Kana keys are being typed one report at a time, scanning is paused
    InOrder,
    /// Fn layer output is being typed one report at a time, scanning is paused
    Macro,
}

impl Transmission {
    /// Queued keys are being typed
    pub fn is_typing(self) -> bool {
        matches!(self, Transmission::InOrder | Transmission::Macro)
    }
}

/// Revision and state of the BLE co-processor
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModuleInfo {
    pub revision: u8,
    /// One nibble per version digit, `0x123` is 1.23
    pub version: u16,
    /// LE secure connections in use
    pub lesc: bool,
    /// Battery voltage in 10 mV
    pub battery_voltage: u16,
    /// Battery level in percent
    pub battery_level: u8,
    /// USB bus power present
    pub vbus: bool,
}

/// The parts of the firmware outside the core that the report assembler asks about
pub trait HostLink {
    /// A BLE host is waiting for a passkey
    fn is_passkey_entry(&self) -> bool {
        false
    }

    /// Forget the bonding of the active BLE profile
    fn clear_bonding(&mut self) {}

    /// The installed BLE module, `None` for USB-only boards
    fn module_info(&self) -> Option<ModuleInfo> {
        None
    }

    fn has_touch_pad(&self) -> bool {
        false
    }

    fn board_revision(&self) -> u8 {
        DEFAULT_BOARD_REVISION
    }
}

/// USB-only board without a BLE module or touch pad
#[derive(Debug, Default, Copy, Clone)]
pub struct NoHost;

impl HostLink for NoHost {}

/// Receives the indicator bitmask, bit 0 is the left LED
pub trait LedDriver {
    fn set_indicators(&mut self, leds: LedIndicator);
}

impl<T: LedDriver + ?Sized> LedDriver for &mut T {
    fn set_indicators(&mut self, leds: LedIndicator) {
        (**self).set_indicators(leds);
    }
}

/// Dual-role Fn keys tapped since the Fn layer was entered
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
struct DualRoleFn {
    left: bool,
    right: bool,
}

impl DualRoleFn {
    fn is_set(&self) -> bool {
        self.left || self.right
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

pub struct KeyboardEngine<M: MatrixReader, P: ProfileStore, H: HostLink, L: LedDriver> {
    scanner: Scanner<M>,
    confirmed: ConfirmedMatrix,
    store: P,
    host: H,
    leds: L,
    key_mapping: KeyMapping,

    /// Settings of the active profile, refreshed every tick
    settings: ProfileSettings,

    /// Keys waiting to be typed
    queue: MacroQueue,
    kana: KanaEngine,
    xmit: Transmission,

    /// Report being assembled, and the last one handed out
    report: KeyboardReport,
    sent: KeyboardReport,
    consumer: ConsumerKey,
    consumer_sent: ConsumerKey,

    kana_mode: bool,
    /// Shift keys tapped since the last key was sent
    prefix: HidModifiers,
    dual_role: DualRoleFn,
    /// Profile requested from the Fn layer
    profile: u8,

    /// LED state set by the host
    host_leds: LedIndicator,
    leds_enabled: bool,
    touch_active: bool,
}

impl<M: MatrixReader, P: ProfileStore, H: HostLink, L: LedDriver> KeyboardEngine<M, P, H, L> {
    /// Create the engine and light all lock LEDs
    pub fn new(reader: M, store: P, host: H, leds: L) -> Self {
        let settings = store.settings();
        let profile = store.current();
        let mut engine = Self {
            scanner: Scanner::new(reader),
            confirmed: ConfirmedMatrix::new(),
            store,
            host,
            leds,
            key_mapping: KeyMapping::new(),
            settings,
            queue: MacroQueue::new(),
            kana: KanaEngine::new(),
            xmit: Transmission::None,
            report: KeyboardReport::default(),
            sent: KeyboardReport::default(),
            consumer: ConsumerKey::No,
            consumer_sent: ConsumerKey::ConsumerControl,
            kana_mode: false,
            prefix: HidModifiers::new(),
            dual_role: DualRoleFn::default(),
            profile,
            host_leds: LedIndicator::new(),
            leds_enabled: false,
            touch_active: false,
        };
        engine.enable_leds(true);
        engine.set_leds(LedIndicator::NUM_LOCK | LedIndicator::CAPS_LOCK | LedIndicator::SCROLL_LOCK);
        engine
    }

    /// Sample the matrix into the next ring slot, returns `true` if any key is down
    pub fn scan(&mut self) -> bool {
        self.scanner.scan()
    }

    /// Debounce the newest samples, returns `false` when the last scan was a ghost
    pub fn resolve(&mut self) -> bool {
        self.confirmed
            .update(&self.scanner, self.settings.delay, self.settings.scheme)
    }

    /// Run one polling tick.
    ///
    /// While queued keys are being typed the matrix is not scanned. Returns
    /// `false` when the tick's sample was dropped as a ghost.
    pub fn task(&mut self) -> bool {
        self.settings = self.store.settings();
        self.update_leds();
        if !self.xmit.is_typing() {
            self.scan();
            if !self.resolve() {
                return false;
            }
            self.xmit = self.assemble();
            if self.xmit == Transmission::Normal && self.touch_active {
                self.report.clear_keys();
            }
        }
        true
    }

    /// State of the report assembler
    pub fn transmission(&self) -> Transmission {
        self.xmit
    }

    pub(crate) fn resolve_context(&self) -> ResolveContext {
        ResolveContext {
            base: self.settings.base,
            scheme: self.settings.scheme,
            num_lock: self.host_leds.num_lock(),
            passkey_entry: self.host.is_passkey_entry(),
        }
    }

    /// Keycode of a position under the active profile, outside the Fn layer
    pub fn keycode_at(&self, row: usize, col: usize) -> KeyCode {
        crate::keymap::keycode_at(&self.resolve_context(), row, col)
    }

    /// Debounced state of a position
    pub fn is_pressed(&self, row: usize, col: usize) -> bool {
        self.confirmed.is_pressed(row, col)
    }

    /// Position went down this tick
    pub fn is_make(&self, row: usize, col: usize) -> bool {
        self.confirmed.is_make(row, col)
    }

    /// Debounced state of the key at `key`'s QWERTY position
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        let (row, col) = self.key_mapping.position(key);
        self.confirmed.is_pressed(row, col)
    }

    /// Newest raw sample of the key at `key`'s QWERTY position
    pub fn is_raw_key_pressed(&self, key: KeyCode) -> bool {
        let (row, col) = self.key_mapping.position(key);
        self.scanner.is_raw_pressed(row, col)
    }

    /// A touch pad gesture is in progress, keys other than modifiers are held back
    pub fn set_touch_active(&mut self, active: bool) {
        self.touch_active = active;
    }

    pub fn set_kana_mode(&mut self, on: bool) {
        if self.kana_mode != on {
            debug!("Kana mode {}", on);
        }
        self.kana_mode = on;
    }

    pub fn kana_mode(&self) -> bool {
        self.kana_mode
    }

    /// Select the profile requested with Fn+Shift+F1..F4.
    ///
    /// Returns the new profile index once, the firmware restarts its transport after that.
    pub fn take_profile_switch(&mut self) -> Option<u8> {
        if self.profile == self.store.current() {
            return None;
        }
        info!("Switching to profile {}", self.profile);
        self.store.select(self.profile);
        self.settings = self.store.settings();
        self.profile = self.store.current();
        Some(self.profile)
    }

    pub fn settings(&self) -> &ProfileSettings {
        &self.settings
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut P {
        &mut self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn led_driver(&self) -> &L {
        &self.leds
    }

    pub fn reader_mut(&mut self) -> &mut M {
        self.scanner.reader_mut()
    }

    /// Keys still waiting to be typed
    pub fn pending_keys(&self) -> usize {
        self.queue.len()
    }
}
