//! Data-parallel CPU launch using rayon.
//!
//! Column spans are computed in parallel first. The output buffer is then split
//! into disjoint bands of whole rows, one rayon task per band, and each task paints
//! the part of every column's span that falls inside its band.

use rayon::prelude::*;

use super::frame::{Frame, RasterError, BAR_COLOR, BYTES_PER_PIXEL};
use super::kernel::{column_span, Span};

const DEFAULT_BAND_ROWS: usize = 16;

/// CPU launcher for the column kernel.
#[derive(Debug, Clone)]
pub struct CpuRasterizer {
    band_rows: usize,
}

impl Default for CpuRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuRasterizer {
    pub fn new() -> Self {
        Self {
            band_rows: DEFAULT_BAND_ROWS,
        }
    }

    /// Use bands of `rows` rows per task (at least one).
    pub fn with_band_rows(rows: usize) -> Self {
        Self {
            band_rows: rows.max(1),
        }
    }

    pub fn band_rows(&self) -> usize {
        self.band_rows
    }

    /// Compute every column's span in parallel.
    pub fn spans(&self, frame: &Frame<'_>) -> Vec<Span> {
        (0..frame.width())
            .into_par_iter()
            .map(|x| column_span(frame, x))
            .collect()
    }

    /// Paint all columns of `frame` into `res`.
    pub fn rasterize(&self, frame: &Frame<'_>, res: &mut [u8]) -> Result<(), RasterError> {
        frame.check_output(res)?;

        let spans = self.spans(frame);
        let width = frame.width();
        let row_bytes = width * BYTES_PER_PIXEL;
        // A band never needs more rows than the frame has.
        let band_rows = self.band_rows.min(frame.height());

        res.par_chunks_mut(row_bytes * band_rows)
            .enumerate()
            .for_each(|(band, chunk)| {
                let first_row = band * band_rows;
                let last_row = first_row + chunk.len() / row_bytes;
                for (x, span) in spans.iter().enumerate() {
                    let rows = span.rows();
                    for y in rows.start.max(first_row)..rows.end.min(last_row) {
                        let idx = (x + (y - first_row) * width) * BYTES_PER_PIXEL;
                        chunk[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&BAR_COLOR);
                    }
                }
            });

        Ok(())
    }
}
