use nisse_types::keycode::{ConsumerKey, KeyCode};
use nisse_types::modifier::HidModifiers;

use super::{KeyboardEngine, HostLink, LedDriver, Transmission};
use crate::config::{KanaLayout, OsFamily, PrefixShift};
use crate::fn_layer;
use crate::hid::{KeyboardReport, MediaKeyboardReport, media_report};
use crate::keymap::{FN_LAYER, base_keycode, keycode_at};
use crate::matrix::MatrixReader;
use crate::profile::ProfileStore;
use crate::{MATRIX_COLS, MATRIX_ROWS};

/// Row of the two Fn keys
const FN_ROW: usize = 4;
/// Rows whose edge keys count as Shift while the Fn layer is held
const FN_SHIFT_ROWS: [usize; 3] = [2, 5, 6];
const EDGE_COLS: [usize; 2] = [0, MATRIX_COLS - 1];

impl<M: MatrixReader, P: ProfileStore, H: HostLink, L: LedDriver> KeyboardEngine<M, P, H, L> {
    fn is_fn_layer(&self) -> bool {
        EDGE_COLS.iter().any(|&col| self.confirmed.is_pressed(FN_ROW, col))
    }

    fn is_fn_shift_layer(&self) -> bool {
        FN_SHIFT_ROWS
            .iter()
            .any(|&row| EDGE_COLS.iter().any(|&col| self.confirmed.is_pressed(row, col)))
    }

    /// Modifiers held on the edge columns.
    ///
    /// A Shift that went down this tick toggles its prefix shift bit.
    fn held_modifiers(&mut self) -> HidModifiers {
        let ctx = self.resolve_context();
        let mut modifiers = HidModifiers::new();
        for row in 0..MATRIX_ROWS {
            for col in EDGE_COLS {
                if !self.confirmed.is_pressed(row, col) {
                    continue;
                }
                let key = keycode_at(&ctx, row, col);
                if !key.is_modifier() {
                    continue;
                }
                let bit = key.to_hid_modifiers();
                modifiers |= bit;
                if bit.shift() && self.confirmed.is_make(row, col) {
                    self.prefix ^= bit;
                }
            }
        }
        modifiers
    }

    /// Build the report for the keys confirmed this tick
    pub(super) fn assemble(&mut self) -> Transmission {
        let modifiers = self.held_modifiers();
        self.report.clear();
        self.consumer = ConsumerKey::No;

        if self.is_fn_layer() {
            return self.assemble_fn_layer();
        }

        let ctx = self.resolve_context();
        if !self.kana_mode
            || modifiers.intersects(HidModifiers::CTRL_ALT_GUI)
            || self.settings.kana == KanaLayout::Romaji
        {
            for row in 0..MATRIX_ROWS {
                for col in 0..MATRIX_COLS {
                    if !self.confirmed.is_pressed(row, col) {
                        continue;
                    }
                    match keycode_at(&ctx, row, col) {
                        KeyCode::No => {}
                        KeyCode::Calc => self.consumer = ConsumerKey::Calculator,
                        key if key.is_modifier() => self.report.add_modifiers(key.to_hid_modifiers()),
                        key if key.is_layer_key() => {}
                        key => {
                            self.report.push(key);
                        }
                    }
                }
            }
        } else {
            let mut shift = modifiers;
            if self.settings.prefix != PrefixShift::Off {
                shift |= self.prefix;
            }
            if self
                .kana
                .process(&self.confirmed, &ctx, &self.settings, shift, &mut self.queue)
            {
                self.prefix = HidModifiers::new();
                return Transmission::InOrder;
            }
        }

        self.finish_report();
        Transmission::Normal
    }

    fn assemble_fn_layer(&mut self) -> Transmission {
        if self.confirmed.is_make(FN_ROW, 0) {
            self.dual_role.left = true;
        }
        if self.confirmed.is_make(FN_ROW, MATRIX_COLS - 1) {
            self.dual_role.right = true;
        }
        let fn_shift = self.is_fn_shift_layer();
        let base = self.settings.base;

        for row in 0..MATRIX_ROWS {
            for col in 0..MATRIX_COLS {
                if !self.confirmed.is_pressed(row, col) {
                    continue;
                }
                let key = base_keycode(base, row, col);
                if key == KeyCode::No {
                    continue;
                }
                let fn_key = FN_LAYER[row][col];
                if !fn_key.is_none() {
                    self.report.add_modifiers(fn_key.modifiers);
                    self.report.push(fn_key.key);
                } else if key.is_function_key() {
                    if fn_shift {
                        if let Some(profile) = fn_layer::profile_for(key)
                            && profile != self.profile
                        {
                            info!("Profile {} requested", profile);
                            self.profile = profile;
                            self.enable_leds(true);
                            self.report.clear();
                            self.dual_role.clear();
                            return Transmission::Normal;
                        }
                    } else if fn_layer::consumer_key(key) != ConsumerKey::No {
                        self.consumer = fn_layer::consumer_key(key);
                    } else if self.confirmed.is_make(row, col)
                        && fn_layer::execute(key, &mut self.store, &self.host, &mut self.queue)
                    {
                        self.settings = self.store.settings();
                        self.dual_role.clear();
                        return Transmission::Macro;
                    }
                } else if key == KeyCode::Escape {
                    if fn_shift && !self.store.is_usb_mode() {
                        if self.confirmed.is_make(row, col) {
                            info!("Clearing bonding of profile {}", self.store.current());
                            self.host.clear_bonding();
                        }
                        self.report.clear();
                        return Transmission::Break;
                    }
                } else if key.is_modifier() {
                    self.report.add_modifiers(key.to_hid_modifiers());
                } else if !key.is_layer_key() && self.report.push(key) {
                    self.report.add_modifiers(HidModifiers::LCTRL);
                }
            }
        }
        if self.report.modifier != 0 || self.report.has_key() {
            self.dual_role.clear();
        }
        Transmission::Normal
    }

    /// Fixups applied to every live report outside the Fn layer
    fn finish_report(&mut self) {
        // Shift-0 types nothing on a JIS host, send Ro instead
        if self.settings.base.is_japanese() && self.report.modifiers().shift() && self.report.contains(KeyCode::Kc0) {
            self.report.replace(KeyCode::Kc0, KeyCode::International1);
        }

        // A lone tap of a Fn key switches the IME
        if self.dual_role.is_set() {
            if self.settings.os != OsFamily::Pc
                && !self.settings.scheme.is_japanese()
                && self.report.modifier == 0
                && !self.report.has_key()
            {
                let lang = if self.dual_role.left {
                    KeyCode::Language2
                } else {
                    KeyCode::Language1
                };
                self.report.push(lang);
            }
            self.dual_role.clear();
        }

        if self.report.has_key() {
            self.prefix = HidModifiers::new();
        }
    }

    /// Type the next queued key.
    ///
    /// Modifiers queued in front of a key are sent with it. A key equal to the
    /// one last sent is preceded by a release. The queue running empty ends
    /// typing.
    fn drain_step(&mut self) {
        let mut modifiers = HidModifiers::new();
        let mut leading = 0;
        let mut key = self.queue.peek();
        while key.is_modifier() {
            modifiers |= key.to_hid_modifiers();
            leading += 1;
            key = self.queue.peek_at(leading);
        }

        if key != KeyCode::No && self.sent.key(0) == key {
            self.report.set_modifiers(HidModifiers::new());
            self.report.keycodes[0] = 0;
            return;
        }

        for _ in 0..leading {
            self.queue.take();
        }
        self.report.clear();
        self.report.set_modifiers(modifiers);
        if key != KeyCode::No {
            self.queue.take();
            self.report.push(key);
        }
        if self.queue.is_empty() {
            trace!("Macro queue drained");
            self.xmit = Transmission::Normal;
        }
    }

    /// The keyboard report, if it changed since the last call.
    ///
    /// While queued keys are being typed every call types the next one. A
    /// language key in the report switches kana mode and is replaced with the
    /// key the host OS expects for that.
    pub fn keyboard_report(&mut self) -> Option<KeyboardReport> {
        if self.xmit.is_typing() {
            self.drain_step();
        }
        if self.report == self.sent {
            return None;
        }
        self.sent = self.report;
        let mut report = self.report;
        self.toggle_kana_mode(&mut report);
        Some(report)
    }

    /// Type the next queued key and return the report, `None` unless typing
    pub fn macro_report(&mut self) -> Option<KeyboardReport> {
        if !self.xmit.is_typing() {
            return None;
        }
        self.drain_step();
        self.sent = self.report;
        Some(self.report)
    }

    /// The consumer report, if the media key changed since the last call
    pub fn consumer_report(&mut self) -> Option<MediaKeyboardReport> {
        if self.consumer == self.consumer_sent {
            return None;
        }
        self.consumer_sent = self.consumer;
        Some(media_report(self.consumer))
    }
}
