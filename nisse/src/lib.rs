//! Input-processing core of the Esrille NISSE keyboard.
//!
//! The core turns the raw state of the 8x12 key matrix into HID keyboard and
//! consumer reports. It is driven once per polling tick through
//! [`keyboard::KeyboardEngine::task`] and talks to the rest of the firmware
//! through a few narrow traits: [`matrix::MatrixReader`],
//! [`profile::ProfileStore`], [`keyboard::HostLink`] and [`keyboard::LedDriver`].
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
pub(crate) mod fmt;

pub mod config;
pub mod debounce;
pub mod fn_layer;
pub mod hid;
pub mod kana;
pub mod keyboard;
pub mod keymap;
pub mod macro_queue;
pub mod matrix;
pub mod profile;
pub mod tick;

pub use nisse_types::keycode::{ConsumerKey, KeyCode};
pub use nisse_types::led_indicator::LedIndicator;
pub use nisse_types::modifier::HidModifiers;

pub const MATRIX_ROWS: usize = 8;
pub const MATRIX_COLS: usize = 12;
/// Number of matrix snapshots kept for debouncing, the longest delay tier plus two
pub const DELAY_SLOTS: usize = 6;
/// Capacity of the synthetic keystroke FIFO
pub const MACRO_CAPACITY: usize = 512;
/// Number of stored profiles, slot 0 is USB and 1..=3 are BLE hosts
pub const PROFILE_COUNT: usize = 4;
/// Bytes stored per profile
pub const PROFILE_DATA_SIZE: usize = 10;
pub const PROFILE_VERSION: u8 = 1;

pub const FIRMWARE_VERSION: (u8, u8, u8) = (2, 1, 2);
pub const DEFAULT_BOARD_REVISION: u8 = 8;
