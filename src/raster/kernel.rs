//! The column rasterization kernel.
//!
//! One invocation handles one pixel column `x`: it folds the column's bins into a
//! single min/max pair, maps that pair to a row span and paints the span. An
//! invocation reads only `offsets[x..=x + 1]` and the bins they delimit, and writes
//! only pixels whose linear index is `x + y * width`.

use super::frame::{Frame, FrameParams, BAR_COLOR, BYTES_PER_PIXEL};

/// Half-open row interval `[begin, end)` painted for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub begin: u32,
    pub end: u32,
}

impl Span {
    /// The empty span, used for columns with no bins.
    pub const EMPTY: Span = Span { begin: 0, end: 0 };

    /// Map a combined `(min, max)` pair to rows. Larger amplitudes sit higher up.
    pub fn from_extrema(min: f32, max: f32, params: &FrameParams) -> Self {
        Self {
            begin: params.row_of(max),
            end: params.row_of(min),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.begin >= self.end
    }

    /// Number of painted rows.
    pub fn height(&self) -> u32 {
        self.end.saturating_sub(self.begin)
    }

    pub fn contains(&self, y: u32) -> bool {
        y >= self.begin && y < self.end
    }

    /// The painted rows as a `usize` range (empty when `begin >= end`).
    pub fn rows(&self) -> std::ops::Range<usize> {
        self.begin as usize..self.end.max(self.begin) as usize
    }
}

/// Combined `(min, max)` over column `x`'s bins, or `None` for an empty range.
///
/// # Panics
/// If `x >= frame.width()`.
pub fn column_extrema(frame: &Frame<'_>, x: usize) -> Option<(f32, f32)> {
    let begin = frame.offsets[x] as usize;
    let end = frame.offsets[x + 1] as usize;
    if begin >= end {
        return None;
    }

    let mins = &frame.mins[begin..end];
    let maxs = &frame.maxs[begin..end];
    let min = mins[1..].iter().copied().fold(mins[0], f32::min);
    let max = maxs[1..].iter().copied().fold(maxs[0], f32::max);
    Some((min, max))
}

/// Row span painted for column `x`.
pub fn column_span(frame: &Frame<'_>, x: usize) -> Span {
    match column_extrema(frame, x) {
        Some((min, max)) => Span::from_extrema(min, max, &frame.params),
        None => Span::EMPTY,
    }
}

/// Run the kernel for a single column, writing into the full output buffer.
///
/// `res` must be `frame.params.buffer_len()` bytes; see [`Frame::check_output`].
pub fn paint_column(frame: &Frame<'_>, x: usize, res: &mut [u8]) {
    let width = frame.width();
    for y in column_span(frame, x).rows() {
        let idx = (x + y * width) * BYTES_PER_PIXEL;
        res[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&BAR_COLOR);
    }
}

/// Reference launch: every column in order on the calling thread.
pub fn rasterize_serial(frame: &Frame<'_>, res: &mut [u8]) -> Result<(), super::RasterError> {
    frame.check_output(res)?;
    for x in 0..frame.width() {
        paint_column(frame, x, res);
    }
    Ok(())
}
