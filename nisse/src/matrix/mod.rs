//! Matrix scanning.
//!
//! [`Scanner`] samples the whole key matrix once per tick into a small ring of
//! snapshots which the debouncer reads with a configurable delay. Samples that
//! show the rectangle pattern of a diode-less ghost are thrown away.

mod pin_matrix;
mod ring;

pub use pin_matrix::PinMatrix;
pub use ring::RingIndex;

use crate::{DELAY_SLOTS, MATRIX_COLS, MATRIX_ROWS};

/// One sample of the key matrix, one `u16` column bitmap per row
pub type Snapshot = [u16; MATRIX_ROWS];

/// Source of raw key matrix state.
pub trait MatrixReader {
    /// Read one row, bit `n` set means the key in column `n` is down
    fn read_row(&mut self, row: usize) -> u16;
}

impl<T: MatrixReader + ?Sized> MatrixReader for &mut T {
    fn read_row(&mut self, row: usize) -> u16 {
        (**self).read_row(row)
    }
}

/// Keeps the last [`DELAY_SLOTS`] matrix samples
pub struct Scanner<M: MatrixReader> {
    reader: M,
    ring: [Snapshot; DELAY_SLOTS],
    /// Slot holding the newest sample
    head: RingIndex<DELAY_SLOTS>,
    /// Keys down per row in the last sample
    row_counts: [u8; MATRIX_ROWS],
    /// Keys down per column in the last sample
    col_counts: [u8; MATRIX_COLS],
    ghost: bool,
}

impl<M: MatrixReader> Scanner<M> {
    pub fn new(reader: M) -> Self {
        Self {
            reader,
            ring: [[0; MATRIX_ROWS]; DELAY_SLOTS],
            head: RingIndex::new(0),
            row_counts: [0; MATRIX_ROWS],
            col_counts: [0; MATRIX_COLS],
            ghost: false,
        }
    }

    pub fn reader(&self) -> &M {
        &self.reader
    }

    pub fn reader_mut(&mut self) -> &mut M {
        &mut self.reader
    }

    /// Take one sample of the matrix.
    ///
    /// Returns `true` if any key is down in the new sample. A ghosted sample is
    /// dropped right away and [`Scanner::is_ghost`] reports it until the next scan.
    pub fn scan(&mut self) -> bool {
        self.head = self.head.next();
        let mask = (1u16 << MATRIX_COLS) - 1;
        let mut any = false;
        for row in 0..MATRIX_ROWS {
            let bits = self.reader.read_row(row) & mask;
            self.ring[self.head.get()][row] = bits;
            self.row_counts[row] = bits.count_ones() as u8;
            for (col, count) in self.col_counts.iter_mut().enumerate() {
                if bits & (1 << col) != 0 {
                    *count += 1;
                }
            }
            any |= bits != 0;
        }
        self.ghost = self.detect_ghost();
        any
    }

    /// Evaluates and resets the row and column counters
    fn detect_ghost(&mut self) -> bool {
        let rows = self.row_counts.iter().filter(|&&n| n >= 2).count();
        let cols = self.col_counts.iter().filter(|&&n| n >= 2).count();
        self.row_counts = [0; MATRIX_ROWS];
        self.col_counts = [0; MATRIX_COLS];
        if rows >= 2 && cols >= 2 {
            warn!("Ghost detected in slot {}, dropping sample", self.head.get());
            self.head = self.head.prev();
            true
        } else {
            false
        }
    }

    /// Whether the last scan was dropped as a ghost
    pub fn is_ghost(&self) -> bool {
        self.ghost
    }

    pub fn head(&self) -> RingIndex<DELAY_SLOTS> {
        self.head
    }

    /// The sample stored in `slot`
    pub fn sample(&self, slot: RingIndex<DELAY_SLOTS>) -> &Snapshot {
        &self.ring[slot.get()]
    }

    /// The newest accepted sample
    pub fn latest(&self) -> &Snapshot {
        self.sample(self.head)
    }

    /// Undebounced state of a key in the newest accepted sample
    pub fn is_raw_pressed(&self, row: usize, col: usize) -> bool {
        row < MATRIX_ROWS && col < MATRIX_COLS && self.latest()[row] & (1 << col) != 0
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

    #[test]
    fn test_scan_writes_next_slot() {
        let mut scanner = Scanner::new(Rows([0; MATRIX_ROWS]));
        assert!(!scanner.scan());
        assert_eq!(scanner.head().get(), 1);

        scanner.reader_mut().0[5] = 1 << 1;
        assert!(scanner.scan());
        assert_eq!(scanner.head().get(), 2);
        assert!(scanner.is_raw_pressed(5, 1));
        assert!(!scanner.is_raw_pressed(5, 2));
        assert!(!scanner.is_raw_pressed(9, 1));
    }

    #[test]
    fn test_columns_outside_matrix_are_ignored() {
        let mut scanner = Scanner::new(Rows([0xF000; MATRIX_ROWS]));
        assert!(!scanner.scan());
        assert_eq!(*scanner.latest(), [0; MATRIX_ROWS]);
    }

    #[test]
    fn test_ghost_rewinds_head() {
        let mut scanner = Scanner::new(Rows([0; MATRIX_ROWS]));
        scanner.scan();
        let head = scanner.head();

        scanner.reader_mut().0[1] = 0b0110;
        scanner.reader_mut().0[3] = 0b0110;
        assert!(scanner.scan());
        assert!(scanner.is_ghost());
        assert_eq!(scanner.head(), head);

        // Three keys in an L shape are not a ghost
        scanner.reader_mut().0[3] = 0b0010;
        scanner.scan();
        assert!(!scanner.is_ghost());
        assert_eq!(scanner.head(), head.next());
    }

    #[test]
    fn test_ring_wraps() {
        let mut scanner = Scanner::new(Rows([0; MATRIX_ROWS]));
        for _ in 0..DELAY_SLOTS {
            scanner.scan();
        }
        assert_eq!(scanner.head().get(), 0);
    }
}
