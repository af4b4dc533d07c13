//! FIFO of synthetic keystrokes.
//!
//! Kana expansions and Fn layer output are queued here and sent one key per
//! report. Modifiers in the queue apply to the key that follows them.

use heapless::Deque;
use nisse_types::keycode::KeyCode;

use crate::MACRO_CAPACITY;

pub struct MacroQueue {
    keys: Deque<KeyCode, MACRO_CAPACITY>,
    /// Keys dropped since the queue last ran empty
    dropped: usize,
}

impl Default for MacroQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroQueue {
    pub const fn new() -> Self {
        Self {
            keys: Deque::new(),
            dropped: 0,
        }
    }

    /// Queue a key, dropping it if the queue is full
    pub fn put(&mut self, key: KeyCode) {
        if key == KeyCode::No {
            return;
        }
        if self.keys.push_back(key).is_err() {
            if self.dropped == 0 {
                warn!("Macro queue full, dropping keys");
            }
            self.dropped += 1;
        }
    }

    pub fn put_keys(&mut self, keys: &[KeyCode]) {
        for &key in keys {
            self.put(key);
        }
    }

    /// Queue the unshifted keys typing `s`, characters without a key are skipped
    pub fn puts(&mut self, s: &str) {
        for c in s.bytes() {
            if let Some(key) = KeyCode::from_ascii(c) {
                self.put(key);
            }
        }
    }

    /// Queue `n` in decimal without leading zeros
    pub fn put_number(&mut self, mut n: u16) {
        let mut started = false;
        let mut divisor = 10000;
        while divisor > 0 {
            let digit = n / divisor;
            if digit != 0 || divisor == 1 || started {
                started = true;
                self.put(KeyCode::digit(digit as u8));
            }
            n %= divisor;
            divisor /= 10;
        }
    }

    /// Next key, [`KeyCode::No`] when empty
    pub fn peek(&self) -> KeyCode {
        self.keys.front().copied().unwrap_or_default()
    }

    /// The key `index` places after the next one, [`KeyCode::No`] past the end
    pub fn peek_at(&self, index: usize) -> KeyCode {
        self.keys.iter().nth(index).copied().unwrap_or_default()
    }

    /// Remove and return the next key, [`KeyCode::No`] when empty
    pub fn take(&mut self) -> KeyCode {
        let key = self.keys.pop_front().unwrap_or_default();
        if self.keys.is_empty() && self.dropped > 0 {
            debug!("Macro queue drained, {} keys were dropped", self.dropped);
            self.dropped = 0;
        }
        key
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.dropped = 0;
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
