use nisse_types::led_indicator::{LedIndicator, LedIndicatorType};

use super::{HostLink, KeyboardEngine, LedDriver};
use crate::config::{IndicatorMode, PrefixShift};
use crate::matrix::MatrixReader;
use crate::profile::ProfileStore;

impl<M: MatrixReader, P: ProfileStore, H: HostLink, L: LedDriver> KeyboardEngine<M, P, H, L> {
    pub fn enable_leds(&mut self, enable: bool) {
        self.leds_enabled = enable;
    }

    /// Set one host LED
    pub fn set_led(&mut self, led: LedIndicatorType, on: bool) {
        let bit = LedIndicator::of(led);
        if on {
            self.host_leds |= bit;
        } else {
            self.host_leds &= !bit;
        }
    }

    /// Take the LED byte of a host output report
    pub fn set_leds(&mut self, leds: LedIndicator) {
        let bits = (self.host_leds.into_bits() & !LedIndicator::HOST_MASK) | (leds.into_bits() & LedIndicator::HOST_MASK);
        self.host_leds = LedIndicator::from_bits(bits);
    }

    /// LED state last set by the host
    pub fn host_leds(&self) -> LedIndicator {
        self.host_leds
    }

    /// Indicator bits for the LEDs on the board
    pub fn indicators(&self) -> LedIndicator {
        if !self.leds_enabled {
            return LedIndicator::new();
        }
        let kana = self.kana_mode;
        let mut leds = self.host_leds;
        match self.settings.indicator {
            IndicatorMode::Left => leds.set_num_lock(kana),
            IndicatorMode::Center => leds.set_caps_lock(kana),
            IndicatorMode::Right => leds.set_scroll_lock(kana),
            IndicatorMode::LeftNum if kana => leds.set_num_lock(true),
            IndicatorMode::CenterCaps if kana => leds.set_caps_lock(true),
            IndicatorMode::RightScroll if kana => leds.set_scroll_lock(true),
            _ => {}
        }
        if self.touch_active {
            leds.set_scroll_lock(true);
        }
        if kana && !self.prefix.is_empty() && self.settings.prefix == PrefixShift::Led {
            leds.set_scroll_lock(true);
        }
        leds
    }

    /// Hand the indicator bits to the LED driver
    pub fn update_leds(&mut self) -> LedIndicator {
        let leds = self.indicators();
        self.leds.set_indicators(leds);
        leds
    }
}
