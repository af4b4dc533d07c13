//! # NISSE Types
//!
//! Value types shared by the NISSE keyboard core and the code around it.
//!
//! - [`keycode`] - HID keyboard usages, firmware pseudo keys and consumer usages
//! - [`modifier`] - The modifier byte of a keyboard report
//! - [`led_indicator`] - Host LED state and the indicator bitmask handed to the LED driver

#![cfg_attr(not(test), no_std)]

pub mod keycode;
pub mod led_indicator;
pub mod modifier;
