pub mod common;

use nisse::config::{BaseLayout, OsFamily, ProfileKey};
use nisse::fn_layer;
use nisse::keyboard::{ModuleInfo, NoHost, Transmission};
use nisse::macro_queue::MacroQueue;
use nisse::profile::{ProfilePage, ProfileStore};
use nisse::{HidModifiers, KeyCode, MACRO_CAPACITY};

use crate::common::*;

const LEFT_FN: (usize, usize) = (4, 0);

const ABOUT: &str = "ESRILLE NISSE\nREV. 8 - SAMD21\nVER. 2.1.2\nCOPYRIGHT 2013-2025 ESRILLE INC.\n\
                     F2 PC\nF3 US\nF4 ROMA\nF5 D0\nF6 XC\nF7 MS\nF8 OFF\nF9 OFF\n";

#[test]
fn test_about_is_typed() {
    let mut engine = engine();
    let reports = hold(&mut engine, &[LEFT_FN, (0, 0)]);
    assert_eq!(typed(&reports), keys_of(ABOUT));
    assert_eq!(engine.transmission(), Transmission::Normal);
}

#[test]
fn test_repeated_key_is_released_in_between() {
    let mut engine = engine();
    engine.reader_mut().press(LEFT_FN.0, LEFT_FN.1);
    engine.reader_mut().press(0, 0);
    tick(&mut engine);
    engine.task();
    assert_eq!(engine.transmission(), Transmission::Macro);

    let keys = keys_of(ABOUT);
    assert_eq!(engine.pending_keys(), keys.len());
    let repeats = keys.windows(2).filter(|w| w[0] == w[1]).count();
    assert!(repeats > 0);

    let mut reports = Vec::new();
    while engine.transmission().is_typing() {
        let report = engine.keyboard_report().expect("each step changes the report");
        reports.push(report.to_bytes());
        assert!(reports.len() <= keys.len() + repeats);
    }
    assert_eq!(reports.len(), keys.len() + repeats);
    assert_eq!(engine.pending_keys(), 0);
    assert_eq!(typed(&reports), keys);

    // "LL" in ESRILLE
    let l = KeyCode::L as u8;
    let pos = reports.windows(3).position(|w| w[0][2] == l && w[2][2] == l);
    assert_eq!(pos.map(|i| reports[i + 1]), Some(report(0, &[])));
}

#[test]
fn test_macro_report() {
    let mut engine = engine();
    assert_eq!(engine.macro_report(), None);
    engine.reader_mut().press(LEFT_FN.0, LEFT_FN.1);
    engine.reader_mut().press(0, 4);
    tick(&mut engine);
    engine.task();
    let mut keys = Vec::new();
    while let Some(report) = engine.macro_report() {
        keys.push(report.to_bytes());
    }
    assert_eq!(typed(&keys), keys_of("D12\n"));
    // Nothing new for the keyboard endpoint once the macro is out
    assert_eq!(engine.keyboard_report(), None);
}

#[test]
fn test_setting_cycle() {
    let mut engine = engine();
    let reports = hold(&mut engine, &[LEFT_FN, (0, 2)]);
    assert_eq!(typed(&reports), keys_of("US-D\n"));
    assert_eq!(engine.settings().base, BaseLayout::Dvorak);
    assert_eq!(engine.store().read(ProfileKey::BaseLayout), BaseLayout::Dvorak as u8);

    // Holding the key does not step again
    for _ in 0..5 {
        tick(&mut engine);
    }
    assert_eq!(engine.settings().base, BaseLayout::Dvorak);

    release(&mut engine, &[(0, 2)]);
    let reports = hold(&mut engine, &[(0, 2)]);
    assert_eq!(typed(&reports), keys_of("JP\n"));
    assert_eq!(engine.settings().base, BaseLayout::Jis);
}

#[test]
fn test_setting_wraps() {
    let mut engine = engine_with(&[(ProfileKey::OsFamily, OsFamily::CapsLock as u8)]);
    let reports = hold(&mut engine, &[LEFT_FN, (0, 1)]);
    assert_eq!(typed(&reports), keys_of("PC\n"));
    assert_eq!(engine.settings().os, OsFamily::Pc);
}

#[test]
fn test_about_with_module() {
    let mut engine = engine();
    engine.store_mut().select(2);
    engine.host_mut().module = Some(ModuleInfo {
        revision: 3,
        version: 0x123,
        lesc: true,
        battery_voltage: 305,
        battery_level: 80,
        vbus: false,
    });
    engine.host_mut().touch_pad = true;
    let reports = hold(&mut engine, &[LEFT_FN, (0, 0)]);

    let mut expected = keys_of(
        "ESRILLE NISSE\nREV. 8 - SAMD21\nVER. 2.1.2\nBLE MODULE\nREV. 3\nVER. 1.23\n\
         COPYRIGHT 2013-2025 ESRILLE INC.\nLESC 1\nKVM 2\n3.05V 80",
    );
    expected.push(KeyCode::Kc5);
    expected.extend(keys_of(
        "\nVBUS 0\nF2 PC\nF3 US\nF4 ROMA\nF5 D0\nF6 XC\nF7 MS\nF8 OFF\nF9 OFF\nTSAP 1\n",
    ));
    assert_eq!(typed(&reports), expected);

    // The percent sign is typed with Shift
    assert!(reports.contains(&report(HidModifiers::LSHIFT.into_bits(), &[KeyCode::Kc5])));
}

#[test]
fn test_scanning_resumes_after_macro() {
    let mut engine = engine();
    hold(&mut engine, &[LEFT_FN, (0, 2)]);
    release(&mut engine, &[LEFT_FN, (0, 2)]);
    // Dvorak now
    assert_eq!(hold(&mut engine, &[(5, 1)]), vec![report(0, &[KeyCode::Quote])]);
}

#[test]
fn test_full_queue_keeps_the_head() {
    let mut page = ProfilePage::new();
    let mut queue = MacroQueue::new();
    for n in 0..100 {
        queue.put_number(10000 + n);
    }
    assert_eq!(queue.len(), 500);

    assert!(fn_layer::execute(KeyCode::F1, &mut page, &NoHost, &mut queue));
    assert_eq!(queue.len(), MACRO_CAPACITY);
    assert_eq!(queue.peek(), KeyCode::Kc1);

    let keys: Vec<KeyCode> = (0..MACRO_CAPACITY).map(|_| queue.take()).collect();
    assert_eq!(keys[500..], keys_of("ESRILLE NISS")[..]);
    assert!(queue.is_empty());

    // The queue takes keys again once drained
    queue.put(KeyCode::A);
    assert_eq!(queue.take(), KeyCode::A);
}
