pub mod common;

use nisse::config::{ModifierScheme, OsFamily, ProfileKey};
use nisse::keyboard::Transmission;
use nisse::profile::ProfileStore;
use nisse::{ConsumerKey, HidModifiers, KeyCode, LedIndicator};

use crate::common::*;

const LEFT_FN: (usize, usize) = (4, 0);
const RIGHT_FN: (usize, usize) = (4, 11);
const LEFT_SHIFT: (usize, usize) = (6, 0);

fn consumer_usage(engine: &mut TestEngine) -> Option<u16> {
    engine.consumer_report().map(|r| r.usage_id)
}

#[test]
fn test_profile_switch() {
    let mut engine = engine();
    let reports = hold(&mut engine, &[LEFT_FN, LEFT_SHIFT, (0, 0)]);
    // Everything is released while the transport restarts
    assert!(reports.is_empty());
    assert_eq!(engine.transmission(), Transmission::Normal);
    assert_eq!(engine.take_profile_switch(), Some(1));
    assert_eq!(engine.store().current(), 1);
    assert_eq!(engine.take_profile_switch(), None);

    // F4 goes back to USB
    release(&mut engine, &[(0, 0)]);
    hold(&mut engine, &[(0, 3)]);
    assert_eq!(engine.take_profile_switch(), Some(0));
    assert!(engine.store().is_usb_mode());
}

#[test]
fn test_profile_settings_follow_switch() {
    let mut engine = engine();
    engine.store_mut().select(2);
    engine.store_mut().write(ProfileKey::OsFamily, OsFamily::Mac as u8);
    engine.store_mut().select(0);

    hold(&mut engine, &[LEFT_FN, LEFT_SHIFT, (0, 1)]);
    assert_eq!(engine.take_profile_switch(), Some(2));
    assert_eq!(engine.settings().os, OsFamily::Mac);
}

#[test]
fn test_clear_bonding() {
    let mut engine = engine();
    engine.store_mut().select(1);
    hold(&mut engine, &[LEFT_FN, LEFT_SHIFT, (2, 5)]);
    assert_eq!(engine.transmission(), Transmission::Break);
    assert_eq!(engine.host().bonding_cleared, 1);

    // Holding the keys does not clear again
    for _ in 0..10 {
        assert_eq!(tick(&mut engine), None);
    }
    assert_eq!(engine.transmission(), Transmission::Break);
    assert_eq!(engine.host().bonding_cleared, 1);

    release(&mut engine, &[(2, 5)]);
    hold(&mut engine, &[(2, 5)]);
    assert_eq!(engine.host().bonding_cleared, 2);
}

#[test]
fn test_no_bonding_over_usb() {
    let mut engine = engine();
    let reports = hold(&mut engine, &[LEFT_FN, LEFT_SHIFT, (2, 5)]);
    assert_eq!(engine.host().bonding_cleared, 0);
    assert_eq!(reports, vec![report(HidModifiers::LSHIFT.into_bits(), &[])]);
}

#[test]
fn test_media_keys() {
    let mut engine = engine();
    // The first report after power up clears the consumer page
    tick(&mut engine);
    assert_eq!(consumer_usage(&mut engine), Some(0));

    hold(&mut engine, &[LEFT_FN, (0, 9)]);
    assert_eq!(consumer_usage(&mut engine), Some(ConsumerKey::Mute.usage()));
    tick(&mut engine);
    assert_eq!(consumer_usage(&mut engine), None);

    release(&mut engine, &[(0, 9)]);
    assert_eq!(consumer_usage(&mut engine), Some(0));

    hold(&mut engine, &[(0, 11)]);
    assert_eq!(consumer_usage(&mut engine), Some(ConsumerKey::VolumeIncrement.usage()));
}

#[test]
fn test_calculator_key() {
    let mut engine = engine();
    tick(&mut engine);
    engine.consumer_report();
    engine.set_leds(LedIndicator::NUM_LOCK);
    let reports = hold(&mut engine, &[(4, 6)]);
    assert!(reports.is_empty());
    assert_eq!(consumer_usage(&mut engine), Some(ConsumerKey::Calculator.usage()));
}

#[test]
fn test_fn_tap_switches_ime_on_mac() {
    let mut engine = engine_with(&[(ProfileKey::OsFamily, OsFamily::Mac as u8)]);
    assert!(hold(&mut engine, &[RIGHT_FN]).is_empty());
    let reports = release(&mut engine, &[RIGHT_FN]);
    assert_eq!(reports, vec![report(0, &[KeyCode::Language1])]);
    assert!(engine.kana_mode());
    assert_eq!(tick(&mut engine), Some(report(0, &[])));

    let reports = tap(&mut engine, &[LEFT_FN]);
    assert_eq!(typed(&reports), vec![KeyCode::Language2]);
    assert!(!engine.kana_mode());
}

#[test]
fn test_fn_tap_ignored_on_pc() {
    let mut engine = engine();
    let reports = tap(&mut engine, &[RIGHT_FN]);
    assert!(reports.is_empty());
    assert!(!engine.kana_mode());
}

#[test]
fn test_fn_chord_is_not_a_tap() {
    let mut engine = engine_with(&[(ProfileKey::OsFamily, OsFamily::Mac as u8)]);
    hold(&mut engine, &[RIGHT_FN, (6, 7)]);
    release(&mut engine, &[(6, 7)]);
    let reports = release(&mut engine, &[RIGHT_FN]);
    assert!(typed(&reports).is_empty());
    assert!(!engine.kana_mode());
}

#[test]
fn test_fn_tap_under_japanese_scheme() {
    // Japanese schemes have their own language keys
    let mut engine = engine_with(&[
        (ProfileKey::OsFamily, OsFamily::Mac as u8),
        (ProfileKey::ModifierScheme, ModifierScheme::Xcj as u8),
    ]);
    assert!(tap(&mut engine, &[RIGHT_FN]).is_empty());
    assert!(!engine.kana_mode());
}

#[test]
fn test_ime_keys_of_host_os() {
    let mut engine = engine_with(&[(ProfileKey::OsFamily, OsFamily::Jp109A as u8)]);
    let reports = tap(&mut engine, &[RIGHT_FN]);
    let ctrl_shift = (HidModifiers::LCTRL | HidModifiers::LSHIFT).into_bits();
    assert_eq!(reports[0], report(ctrl_shift, &[KeyCode::International4]));
    assert!(engine.kana_mode());
}

#[test]
fn test_caps_lock_host() {
    let mut engine = engine_with(&[(ProfileKey::OsFamily, OsFamily::CapsLock as u8)]);
    let reports = tap(&mut engine, &[RIGHT_FN]);
    assert_eq!(reports[0], report(0, &[KeyCode::CapsLock]));
    assert!(engine.kana_mode());

    // Caps Lock already shows kana, nothing to send
    engine.set_leds(LedIndicator::CAPS_LOCK);
    engine.set_kana_mode(false);
    let reports = tap(&mut engine, &[RIGHT_FN]);
    assert!(typed(&reports).is_empty());
    assert!(engine.kana_mode());
}

#[test]
fn test_language_keys_of_japanese_scheme() {
    let mut engine = engine_with(&[
        (ProfileKey::OsFamily, OsFamily::Jp109 as u8),
        (ProfileKey::ModifierScheme, ModifierScheme::Xcj as u8),
    ]);
    let reports = tap(&mut engine, &[(7, 11)]);
    assert_eq!(typed(&reports), vec![KeyCode::International4]);
    assert!(engine.kana_mode());
    let reports = tap(&mut engine, &[(7, 0)]);
    assert_eq!(typed(&reports), vec![KeyCode::International5]);
    assert!(!engine.kana_mode());
}
