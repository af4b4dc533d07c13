//! Debouncing of the sampled matrix.
//!
//! Each key compares two neighbouring samples taken `delay` ticks back. Layer
//! shift keys always use the two newest samples so layer changes stay snappy.

use crate::config::{DelayTier, ModifierScheme};
use crate::matrix::{MatrixReader, Scanner, Snapshot};
use crate::{MATRIX_COLS, MATRIX_ROWS};

/// Outcome of comparing the two samples of one key
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// Both samples show the key down
    Pressed,
    /// Both samples show the key up
    Released,
    /// The samples disagree, the key keeps its confirmed state
    Bouncing,
}

impl DebounceState {
    fn of(newer: bool, older: bool) -> Self {
        match (newer, older) {
            (true, true) => DebounceState::Pressed,
            (false, false) => DebounceState::Released,
            _ => DebounceState::Bouncing,
        }
    }

    fn apply(self, confirmed: bool) -> bool {
        match self {
            DebounceState::Pressed => true,
            DebounceState::Released => false,
            DebounceState::Bouncing => confirmed,
        }
    }
}

/// Debounced key state of this tick and the one before
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmedMatrix {
    current: Snapshot,
    previous: Snapshot,
}

/// Edge columns of the layer-shift row
const LAYER_SHIFT_MASK: u16 = 1 | 1 << (MATRIX_COLS - 1);

impl ConfirmedMatrix {
    pub const fn new() -> Self {
        Self {
            current: [0; MATRIX_ROWS],
            previous: [0; MATRIX_ROWS],
        }
    }

    /// Recompute the confirmed state from the scanner's ring.
    ///
    /// Returns `false` and leaves both grids untouched when the last scan was a ghost.
    pub fn update<M: MatrixReader>(&mut self, scanner: &Scanner<M>, delay: DelayTier, scheme: ModifierScheme) -> bool {
        if scanner.is_ghost() {
            return false;
        }
        self.previous = self.current;

        let head = scanner.head();
        let delayed = head.sub(delay.ticks());
        let (newer, older) = (scanner.sample(delayed), scanner.sample(delayed.prev()));
        let (fast_newer, fast_older) = (scanner.sample(head), scanner.sample(head.prev()));
        let layer_row = scheme.layer_shift_row();

        for row in 0..MATRIX_ROWS {
            let fast = if row == layer_row { LAYER_SHIFT_MASK } else { 0 };
            let mut bits = self.current[row];
            for col in 0..MATRIX_COLS {
                let bit = 1 << col;
                let (a, b) = if fast & bit != 0 {
                    (fast_newer[row], fast_older[row])
                } else {
                    (newer[row], older[row])
                };
                let state = DebounceState::of(a & bit != 0, b & bit != 0);
                if state.apply(bits & bit != 0) {
                    bits |= bit;
                } else {
                    bits &= !bit;
                }
            }
            self.current[row] = bits;
        }
        true
    }

    pub fn is_pressed(&self, row: usize, col: usize) -> bool {
        row < MATRIX_ROWS && col < MATRIX_COLS && self.current[row] & (1 << col) != 0
    }

    /// Pressed this tick but not the tick before
    pub fn is_make(&self, row: usize, col: usize) -> bool {
        row < MATRIX_ROWS && col < MATRIX_COLS && (self.current[row] & !self.previous[row]) & (1 << col) != 0
    }

    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    pub fn previous(&self) -> &Snapshot {
        &self.previous
    }

    /// Iterate over the confirmed pressed keys in row-major order
    pub fn pressed(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..MATRIX_ROWS).flat_map(move |row| {
            (0..MATRIX_COLS).filter_map(move |col| self.is_pressed(row, col).then_some((row, col)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rows(Snapshot);

    impl MatrixReader for Rows {
        fn read_row(&mut self, row: usize) -> u16 {
            self.0[row]
        }
    }

    fn step(scanner: &mut Scanner<Rows>, confirmed: &mut ConfirmedMatrix, row5: u16, delay: DelayTier) -> bool {
        scanner.reader_mut().0[5] = row5;
        scanner.scan();
        confirmed.update(scanner, delay, ModifierScheme::Xc)
    }

    #[test]
    fn test_press_needs_two_samples() {
        let mut scanner = Scanner::new(Rows([0; MATRIX_ROWS]));
        let mut confirmed = ConfirmedMatrix::new();
        step(&mut scanner, &mut confirmed, 0b10, DelayTier::D0);
        assert!(!confirmed.is_pressed(5, 1));
        step(&mut scanner, &mut confirmed, 0b10, DelayTier::D0);
        assert!(confirmed.is_pressed(5, 1));
        assert!(confirmed.is_make(5, 1));
        step(&mut scanner, &mut confirmed, 0b10, DelayTier::D0);
        assert!(confirmed.is_pressed(5, 1));
        assert!(!confirmed.is_make(5, 1));
    }

    #[test]
    fn test_single_disagreement_holds() {
        let mut scanner = Scanner::new(Rows([0; MATRIX_ROWS]));
        let mut confirmed = ConfirmedMatrix::new();
        for _ in 0..3 {
            step(&mut scanner, &mut confirmed, 0b10, DelayTier::D0);
        }
        // One bounce: newest sample up, the one before still down
        step(&mut scanner, &mut confirmed, 0, DelayTier::D0);
        assert!(confirmed.is_pressed(5, 1));
        step(&mut scanner, &mut confirmed, 0b10, DelayTier::D0);
        assert!(confirmed.is_pressed(5, 1));
        step(&mut scanner, &mut confirmed, 0, DelayTier::D0);
        step(&mut scanner, &mut confirmed, 0, DelayTier::D0);
        assert!(!confirmed.is_pressed(5, 1));
    }

    #[test]
    fn test_delay_tier_lags() {
        let mut scanner = Scanner::new(Rows([0; MATRIX_ROWS]));
        let mut confirmed = ConfirmedMatrix::new();
        for _ in 0..2 {
            step(&mut scanner, &mut confirmed, 0b10, DelayTier::D12);
            assert!(!confirmed.is_pressed(5, 1));
        }
        step(&mut scanner, &mut confirmed, 0b10, DelayTier::D12);
        assert!(confirmed.is_pressed(5, 1));
    }

    #[test]
    fn test_layer_shift_keys_ignore_delay() {
        let mut scanner = Scanner::new(Rows([0; MATRIX_ROWS]));
        let mut confirmed = ConfirmedMatrix::new();
        scanner.reader_mut().0[6] = 1;
        scanner.reader_mut().0[7] = 1;
        for _ in 0..2 {
            scanner.scan();
            confirmed.update(&scanner, DelayTier::D48, ModifierScheme::Xc);
        }
        // Row 6 is the layer-shift row under XC, row 7 is not
        assert!(confirmed.is_pressed(6, 0));
        assert!(!confirmed.is_pressed(7, 0));
        assert_eq!(confirmed.pressed().collect::<Vec<_>>(), vec![(6, 0)]);
    }

    #[test]
    fn test_ghost_keeps_state() {
        let mut scanner = Scanner::new(Rows([0; MATRIX_ROWS]));
        let mut confirmed = ConfirmedMatrix::new();
        step(&mut scanner, &mut confirmed, 0b10, DelayTier::D0);
        step(&mut scanner, &mut confirmed, 0b10, DelayTier::D0);
        let before = confirmed.clone();

        scanner.reader_mut().0[6] = 0b110;
        assert!(!step(&mut scanner, &mut confirmed, 0b110, DelayTier::D0));
        assert_eq!(confirmed, before);
    }
}
