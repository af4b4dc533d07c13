use nisse_types::keycode::KeyCode;
use nisse_types::modifier::HidModifiers;

use super::{HostLink, KeyboardEngine, LedDriver};
use crate::config::OsFamily;
use crate::hid::KeyboardReport;
use crate::keymap::FnKey;
use crate::matrix::MatrixReader;
use crate::profile::ProfileStore;

const CTRL_SHIFT: HidModifiers = HidModifiers::new().with_left_ctrl(true).with_left_shift(true);

impl OsFamily {
    /// Keys that turn the host IME off and on
    pub fn ime_keys(self) -> [FnKey; 2] {
        match self {
            OsFamily::Pc => [FnKey::NONE, FnKey::NONE],
            OsFamily::Mac => [FnKey::key(KeyCode::Language2), FnKey::key(KeyCode::Language1)],
            OsFamily::Us104A => [
                FnKey::with(CTRL_SHIFT, KeyCode::Backspace),
                FnKey::with(CTRL_SHIFT, KeyCode::Space),
            ],
            OsFamily::Us104B => [FnKey::with(HidModifiers::LALT, KeyCode::Grave); 2],
            OsFamily::Jp109 => [FnKey::key(KeyCode::International5), FnKey::key(KeyCode::International4)],
            OsFamily::Jp109A => [
                FnKey::with(CTRL_SHIFT, KeyCode::International5),
                FnKey::with(CTRL_SHIFT, KeyCode::International4),
            ],
            OsFamily::Jp109B => [FnKey::key(KeyCode::Grave); 2],
            OsFamily::AltSpace => [FnKey::with(HidModifiers::LALT, KeyCode::Space); 2],
            OsFamily::ShiftSpace => [FnKey::with(HidModifiers::LSHIFT, KeyCode::Space); 2],
            OsFamily::CtrlSpace => [FnKey::with(HidModifiers::LCTRL, KeyCode::Space); 2],
            OsFamily::CapsLock => [FnKey::key(KeyCode::CapsLock); 2],
        }
    }
}

impl<M: MatrixReader, P: ProfileStore, H: HostLink, L: LedDriver> KeyboardEngine<M, P, H, L> {
    /// Follow Lang2/Lang1 in an outgoing report.
    ///
    /// Lang2 turns kana mode off and Lang1 turns it on. The key is rewritten to
    /// the IME key of the host OS. Under [`OsFamily::CapsLock`] Caps Lock is only
    /// sent when its LED disagrees with the new mode.
    pub(super) fn toggle_kana_mode(&mut self, report: &mut KeyboardReport) {
        let os = self.settings.os;
        if os == OsFamily::Pc {
            return;
        }
        let ime_keys = os.ime_keys();
        for (i, lang) in [KeyCode::Language2, KeyCode::Language1].into_iter().enumerate() {
            let Some(pos) = report.keycodes.iter().position(|&k| k == lang as u8) else {
                continue;
            };
            let on = i == 1;
            self.set_kana_mode(on);
            if os != OsFamily::CapsLock {
                report.keycodes[pos] = ime_keys[i].key as u8;
                report.add_modifiers(ime_keys[i].modifiers);
            } else if on != self.host_leds.caps_lock() {
                report.keycodes[pos] = KeyCode::CapsLock as u8;
            } else {
                report.remove(pos);
            }
        }
    }
}
