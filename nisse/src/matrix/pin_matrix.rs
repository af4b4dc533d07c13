use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use super::MatrixReader;

/// Key matrix wired to GPIO pins.
///
/// Rows are outputs that idle high and are pulled low while the row is read.
/// Columns are pulled-up inputs, so a pressed key reads low.
pub struct PinMatrix<In: InputPin, Out: OutputPin, D: DelayNs, const COL: usize, const ROW: usize> {
    col_pins: [In; COL],
    row_pins: [Out; ROW],
    delay: D,
}

impl<In: InputPin, Out: OutputPin, D: DelayNs, const COL: usize, const ROW: usize> PinMatrix<In, Out, D, COL, ROW> {
    /// Create a matrix from column inputs and row outputs, releasing every row
    pub fn new(col_pins: [In; COL], mut row_pins: [Out; ROW], delay: D) -> Self {
        for pin in row_pins.iter_mut() {
            pin.set_high().ok();
        }
        Self {
            col_pins,
            row_pins,
            delay,
        }
    }
}

impl<In: InputPin, Out: OutputPin, D: DelayNs, const COL: usize, const ROW: usize> MatrixReader
    for PinMatrix<In, Out, D, COL, ROW>
{
    fn read_row(&mut self, row: usize) -> u16 {
        let Some(row_pin) = self.row_pins.get_mut(row) else {
            return 0;
        };
        row_pin.set_low().ok();
        // Let the line settle before sampling
        self.delay.delay_us(1);
        let mut bits = 0;
        for (col, pin) in self.col_pins.iter_mut().enumerate() {
            // A failed read counts as released
            if pin.is_low().ok().unwrap_or_default() {
                bits |= 1 << col;
            }
        }
        row_pin.set_high().ok();
        bits
    }
}
