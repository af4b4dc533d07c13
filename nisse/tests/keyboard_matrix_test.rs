pub mod common;

use nisse::KeyCode;
use nisse::config::{DelayTier, ModifierScheme, ProfileKey};

use crate::common::*;

#[test]
fn test_ghost_sample_is_dropped() {
    let mut engine = engine();
    assert_eq!(hold(&mut engine, &[(5, 1)]), vec![report(0, &[KeyCode::Q])]);

    // Three corners of a rectangle make the fourth read as pressed
    for (row, col) in [(5, 2), (6, 1), (6, 2)] {
        engine.reader_mut().press(row, col);
    }
    for _ in 0..4 {
        assert!(!engine.task());
        assert_eq!(engine.keyboard_report(), None);
    }
    assert!(engine.is_pressed(5, 1));
    assert!(!engine.is_pressed(5, 2));

    // Lifting one key ends the ghost
    engine.reader_mut().release(6, 2);
    assert!(engine.task());
    assert!(engine.task());
    assert!(engine.is_pressed(5, 2));
    assert!(engine.is_pressed(6, 1));
    assert_eq!(
        engine.keyboard_report().map(|r| r.to_bytes()),
        Some(report(0, &[KeyCode::Q, KeyCode::W, KeyCode::A]))
    );
}

#[test]
fn test_bounce_is_ignored() {
    let mut engine = engine();
    for _ in 0..3 {
        engine.reader_mut().press(5, 1);
        assert_eq!(tick(&mut engine), None);
        engine.reader_mut().release(5, 1);
        assert_eq!(tick(&mut engine), None);
    }
    assert!(!engine.is_pressed(5, 1));
}

#[test]
fn test_release_waits_for_two_samples() {
    let mut engine = engine();
    hold(&mut engine, &[(5, 1)]);
    engine.reader_mut().release(5, 1);
    assert_eq!(tick(&mut engine), None);
    assert!(engine.is_pressed(5, 1));
    assert_eq!(tick(&mut engine), Some(report(0, &[])));
}

#[test]
fn test_delay_tier_slows_letters() {
    let mut engine = engine_with(&[(ProfileKey::DelayTier, DelayTier::D12 as u8)]);
    engine.reader_mut().press(5, 1);
    assert_eq!(tick(&mut engine), None);
    assert_eq!(tick(&mut engine), None);
    assert_eq!(tick(&mut engine), Some(report(0, &[KeyCode::Q])));
}

#[test]
fn test_layer_shift_row_skips_delay() {
    let mut engine = engine_with(&[(ProfileKey::DelayTier, DelayTier::D24 as u8)]);
    engine.reader_mut().press(6, 0);
    tick(&mut engine);
    tick(&mut engine);
    assert!(engine.is_pressed(6, 0));

    // Under C the Shift keys sit on row 5
    let mut engine = engine_with(&[
        (ProfileKey::DelayTier, DelayTier::D24 as u8),
        (ProfileKey::ModifierScheme, ModifierScheme::C as u8),
    ]);
    engine.reader_mut().press(5, 11);
    tick(&mut engine);
    tick(&mut engine);
    assert!(engine.is_pressed(5, 11));
    assert!(engine.is_make(5, 11));
}
