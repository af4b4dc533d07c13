//! Function keys of the Fn layer.
//!
//! F1 types a summary of the keyboard and its settings, F2 to F9 each step one
//! profile setting and type its new name. F10 to F12 are media keys and, with
//! Shift also held, F1 to F4 switch profiles.

use nisse_types::keycode::{ConsumerKey, KeyCode};

use crate::config::{PadSensitivity, ProfileKey};
use crate::keyboard::{HostLink, ModuleInfo};
use crate::macro_queue::MacroQueue;
use crate::profile::ProfileStore;
use crate::FIRMWARE_VERSION;

/// Settings stepped by F2 to F9, in key order
pub const SETTING_KEYS: [ProfileKey; 8] = [
    ProfileKey::OsFamily,
    ProfileKey::BaseLayout,
    ProfileKey::KanaLayout,
    ProfileKey::DelayTier,
    ProfileKey::ModifierScheme,
    ProfileKey::ImeFlavor,
    ProfileKey::IndicatorMode,
    ProfileKey::PrefixShift,
];

/// Setting stepped by a function key, `None` for F1 and F10 to F12
pub fn setting_for(key: KeyCode) -> Option<ProfileKey> {
    let index = key.function_index()?.checked_sub(1)?;
    SETTING_KEYS.get(index).copied()
}

/// Media key of a function key on the Fn layer
pub fn consumer_key(key: KeyCode) -> ConsumerKey {
    match key {
        KeyCode::F10 => ConsumerKey::Mute,
        KeyCode::F11 => ConsumerKey::VolumeDecrement,
        KeyCode::F12 => ConsumerKey::VolumeIncrement,
        _ => ConsumerKey::No,
    }
}

/// Profile picked by Fn+Shift+F1..F4. F4 is the USB profile.
pub fn profile_for(key: KeyCode) -> Option<u8> {
    match key {
        KeyCode::F1 => Some(1),
        KeyCode::F2 => Some(2),
        KeyCode::F3 => Some(3),
        KeyCode::F4 => Some(0),
        _ => None,
    }
}

/// Advance a setting of the active profile, wrapping past its largest value
pub fn cycle_setting<P: ProfileStore + ?Sized>(store: &mut P, key: ProfileKey) -> u8 {
    let value = store.read(key).wrapping_add(1);
    let value = if value > key.max() { 0 } else { value };
    store.write(key, value);
    info!("Setting {} changed to {}", key.offset(), key.label(value));
    value
}

/// Run the command of a function key made on the Fn layer.
///
/// Returns `true` when keys were queued for typing.
pub fn execute<P: ProfileStore + ?Sized, H: HostLink + ?Sized>(
    key: KeyCode,
    store: &mut P,
    host: &H,
    queue: &mut MacroQueue,
) -> bool {
    if key == KeyCode::F1 {
        about(store, host, queue);
        return true;
    }
    match setting_for(key) {
        Some(setting) => {
            let value = cycle_setting(store, setting);
            queue.puts(setting.label(value));
            queue.put(KeyCode::Enter);
            true
        }
        None => false,
    }
}

/// Type the board, firmware and settings summary
pub fn about<P: ProfileStore + ?Sized, H: HostLink + ?Sized>(store: &P, host: &H, queue: &mut MacroQueue) {
    queue.puts("ESRILLE NISSE\n");

    queue.puts("REV. ");
    queue.put_number(host.board_revision() as u16);
    queue.puts(" - SAMD21\n");

    let (major, minor, patch) = FIRMWARE_VERSION;
    queue.puts("VER. ");
    queue.put_number(major as u16);
    queue.put(KeyCode::Dot);
    queue.put_number(minor as u16);
    queue.put(KeyCode::Dot);
    queue.put_number(patch as u16);
    queue.put(KeyCode::Enter);

    match host.module_info() {
        None => queue.puts(COPYRIGHT),
        Some(module) => about_module(&module, store, queue),
    }

    for (i, &setting) in SETTING_KEYS.iter().enumerate() {
        queue.put(KeyCode::F);
        queue.put_number(i as u16 + 2);
        queue.put(KeyCode::Space);
        queue.puts(setting.label(store.read(setting)));
        queue.put(KeyCode::Enter);
    }

    if host.has_touch_pad() {
        let sensitivity = PadSensitivity::from_stored(store.read(ProfileKey::PadSensitivity));
        queue.puts("TSAP ");
        queue.put_number(sensitivity as u16 + 1);
        queue.put(KeyCode::Enter);
    }
}

const COPYRIGHT: &str = "COPYRIGHT 2013-2025 ESRILLE INC.\n";

fn about_module<P: ProfileStore + ?Sized>(module: &ModuleInfo, store: &P, queue: &mut MacroQueue) {
    queue.puts("BLE MODULE\n");

    queue.puts("REV. ");
    queue.put_number((module.revision & 0xf) as u16);
    queue.put(KeyCode::Enter);

    queue.puts("VER. ");
    queue.put_number((module.version >> 8) & 0xf);
    queue.put(KeyCode::Dot);
    queue.put_number((module.version >> 4) & 0xf);
    queue.put_number(module.version & 0xf);
    queue.put(KeyCode::Enter);

    queue.puts(COPYRIGHT);

    if !store.is_usb_mode() {
        queue.puts("LESC ");
        queue.put_number(module.lesc as u16);
        queue.put(KeyCode::Enter);
    }

    queue.puts("KVM ");
    queue.put_number(store.current() as u16);
    queue.put(KeyCode::Enter);

    // Battery as "3.05V 80%"
    let voltage = module.battery_voltage;
    queue.put_number(voltage / 100);
    queue.put(KeyCode::Dot);
    if voltage % 100 < 10 {
        queue.put(KeyCode::Kc0);
    }
    queue.put_number(voltage % 100);
    queue.put(KeyCode::V);
    queue.put(KeyCode::Space);
    queue.put_number(module.battery_level as u16);
    queue.put_keys(&[KeyCode::LShift, KeyCode::Kc5]);
    queue.put(KeyCode::Enter);

    queue.puts("VBUS ");
    queue.put_number(module.vbus as u16);
    queue.put(KeyCode::Enter);
}
