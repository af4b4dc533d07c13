//! Kana input.
//!
//! While kana mode is on and no Control, Alt or GUI is held, each newly pressed
//! key is looked up in the active kana layout and typed as romaji through the
//! macro queue. The host IME does the actual conversion.

mod layouts;
pub mod romaji;

pub use layouts::{KanaGrid, KanaTables};
pub use romaji::{Expansion, Roma, RomajiUnit};

use nisse_types::keycode::KeyCode;
use nisse_types::modifier::HidModifiers;

use crate::config::ProfileSettings;
use crate::debounce::ConfirmedMatrix;
use crate::keymap::{ResolveContext, keycode_at};
use crate::macro_queue::MacroQueue;

/// Consonants that take the voiced mark, and what they become
const VOICED: [(KeyCode, KeyCode); 4] = [
    (KeyCode::K, KeyCode::G),
    (KeyCode::S, KeyCode::Z),
    (KeyCode::T, KeyCode::D),
    (KeyCode::H, KeyCode::B),
];

/// Vowels turned into small kana by the voiced mark
const VOWELS: [KeyCode; 5] = [KeyCode::A, KeyCode::I, KeyCode::U, KeyCode::E, KeyCode::O];

/// State kept between kana keys
#[derive(Debug, Default, Clone)]
pub struct KanaEngine {
    /// Keys of the most recent non-empty expansion
    last: [KeyCode; 3],
}

impl KanaEngine {
    pub const fn new() -> Self {
        Self { last: [KeyCode::No; 3] }
    }

    /// Keys typed by the previous kana key
    pub fn last(&self) -> &[KeyCode; 3] {
        &self.last
    }

    pub fn reset(&mut self) {
        self.last = [KeyCode::No; 3];
    }

    /// Queue the keys of every key made this tick.
    ///
    /// `modifiers` are the held modifiers plus pending prefix shift; the shift
    /// side picks the kana table. Returns `true` if anything was queued.
    pub fn process(
        &mut self,
        confirmed: &ConfirmedMatrix,
        ctx: &ResolveContext,
        settings: &ProfileSettings,
        modifiers: HidModifiers,
        queue: &mut MacroQueue,
    ) -> bool {
        let Some(tables) = settings.kana.tables() else {
            return false;
        };
        let grid = if modifiers.left_shift() {
            tables.left
        } else if modifiers.right_shift() {
            tables.right
        } else {
            tables.normal
        };
        let jis = settings.base.is_japanese();

        let mut queued = false;
        for (row, col) in confirmed.pressed() {
            if !confirmed.is_make(row, col) {
                continue;
            }
            let roma = grid[row][col];
            let expansion = if roma.is_none() {
                Self::fallback(keycode_at(ctx, row, col), modifiers)
            } else {
                roma.expand(settings.ime, jis)
            };
            queued |= self.feed(&expansion, queue);
        }
        queued
    }

    /// Keys typed for a cell without a kana entry
    fn fallback(key: KeyCode, modifiers: HidModifiers) -> Expansion {
        let mut keys = Expansion::new();
        if key == KeyCode::No || key.is_modifier() {
            return keys;
        }
        if modifiers.shift() {
            keys.push(KeyCode::LShift).ok();
        }
        keys.push(key).ok();
        keys
    }

    /// Queue one expansion, applying the diacritic marks to the previous kana.
    ///
    /// Returns `true` if anything was queued.
    pub fn feed(&mut self, expansion: &[KeyCode], queue: &mut MacroQueue) -> bool {
        let mut queued = false;
        for &key in expansion.iter().take_while(|k| **k != KeyCode::No) {
            match key {
                KeyCode::Dakuten => {
                    if let Some((keys, len)) = self.voiced() {
                        queue.put_keys(&keys[..len]);
                        queued = true;
                    }
                }
                KeyCode::Handaku => {
                    if self.last[0] == KeyCode::H {
                        queue.put_keys(&[KeyCode::Backspace, KeyCode::P, self.last[1]]);
                        queued = true;
                    }
                }
                _ => {
                    queue.put(key);
                    queued = true;
                }
            }
        }
        if let Some(&first) = expansion.first()
            && first != KeyCode::No
        {
            self.last = [KeyCode::No; 3];
            for (slot, &key) in self.last.iter_mut().zip(expansion) {
                *slot = key;
            }
        }
        queued
    }

    /// Correction typed for a voiced mark after the last kana
    fn voiced(&self) -> Option<([KeyCode; 4], usize)> {
        let [first, second, _] = self.last;
        if first == KeyCode::No {
            return None;
        }
        if let Some(&(_, to)) = VOICED.iter().find(|(from, _)| *from == first) {
            Some(([KeyCode::Backspace, to, second, KeyCode::No], 3))
        } else if VOWELS.contains(&first) {
            Some(([KeyCode::Backspace, KeyCode::X, first, KeyCode::No], 3))
        } else if first == KeyCode::Y && VOWELS.contains(&second) {
            Some(([KeyCode::Backspace, KeyCode::X, KeyCode::Y, second], 4))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut MacroQueue) -> Vec<KeyCode> {
        let mut keys = Vec::new();
        while !queue.is_empty() {
            keys.push(queue.take());
        }
        keys
    }

    #[test]
    fn test_dakuten_voices_consonant() {
        let mut engine = KanaEngine::new();
        let mut queue = MacroQueue::new();
        assert!(engine.feed(&[KeyCode::K, KeyCode::A], &mut queue));
        assert!(engine.feed(&[KeyCode::Dakuten], &mut queue));
        assert_eq!(
            drain(&mut queue),
            vec![KeyCode::K, KeyCode::A, KeyCode::Backspace, KeyCode::G, KeyCode::A]
        );
        // The mark itself became the last expansion
        assert_eq!(engine.last(), &[KeyCode::Dakuten, KeyCode::No, KeyCode::No]);
        assert!(!engine.feed(&[KeyCode::Dakuten], &mut queue));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dakuten_makes_small_vowels() {
        let mut engine = KanaEngine::new();
        let mut queue = MacroQueue::new();
        engine.feed(&[KeyCode::U], &mut queue);
        engine.feed(&[KeyCode::Dakuten], &mut queue);
        engine.feed(&[KeyCode::Y, KeyCode::O], &mut queue);
        engine.feed(&[KeyCode::Dakuten], &mut queue);
        assert_eq!(
            drain(&mut queue),
            vec![
                KeyCode::U,
                KeyCode::Backspace,
                KeyCode::X,
                KeyCode::U,
                KeyCode::Y,
                KeyCode::O,
                KeyCode::Backspace,
                KeyCode::X,
                KeyCode::Y,
                KeyCode::O
            ]
        );
    }

    #[test]
    fn test_handaku_only_after_h() {
        let mut engine = KanaEngine::new();
        let mut queue = MacroQueue::new();
        engine.feed(&[KeyCode::K, KeyCode::I], &mut queue);
        assert!(!engine.feed(&[KeyCode::Handaku], &mut queue));
        engine.reset();
        drain(&mut queue);
        engine.feed(&[KeyCode::H, KeyCode::U], &mut queue);
        assert!(engine.feed(&[KeyCode::Handaku], &mut queue));
        assert_eq!(
            drain(&mut queue),
            vec![KeyCode::H, KeyCode::U, KeyCode::Backspace, KeyCode::P, KeyCode::U]
        );
    }

    #[test]
    fn test_fallback() {
        assert_eq!(
            KanaEngine::fallback(KeyCode::Kc1, HidModifiers::RSHIFT).as_slice(),
            &[KeyCode::LShift, KeyCode::Kc1]
        );
        assert_eq!(KanaEngine::fallback(KeyCode::Kc1, HidModifiers::new()).as_slice(), &[KeyCode::Kc1]);
        assert!(KanaEngine::fallback(KeyCode::LShift, HidModifiers::new()).is_empty());
        assert!(KanaEngine::fallback(KeyCode::No, HidModifiers::LSHIFT).is_empty());
    }
}
