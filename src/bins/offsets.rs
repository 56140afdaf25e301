//! Time ranges and per-column bin-offset tables.

use std::borrow::Cow;
use std::ops::Range;

use super::extrema::BinnedExtrema;
use super::BinError;
use crate::raster::{Frame, FrameParams, RasterError};

/// A span of audio to render, in seconds or in samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeRange {
    Seconds(f64, f64),
    Samples(usize, usize),
}

impl TimeRange {
    /// Convert to a sample index range. Negative seconds saturate to 0.
    pub fn to_samples(&self, sample_rate: u32) -> Result<Range<usize>, BinError> {
        let (begin, end) = match *self {
            TimeRange::Seconds(b, e) => (
                (b * sample_rate as f64) as usize,
                (e * sample_rate as f64) as usize,
            ),
            TimeRange::Samples(b, e) => (b, e),
        };
        if begin > end {
            return Err(BinError::InvalidTimeRange { begin, end });
        }
        Ok(begin..end)
    }
}

/// Spread `bin_count` bins over `width` columns.
///
/// `offsets[x] = floor(x * bin_count / width)`, so the table is non-decreasing,
/// starts at 0, ends at `bin_count`, and every column gets at least one bin
/// whenever `bin_count >= width`.
pub fn build_offsets(bin_count: u32, width: u32) -> Vec<u32> {
    if width == 0 {
        return vec![0];
    }
    (0..=width as u64)
        .map(|x| (x * bin_count as u64 / width as u64) as u32)
        .collect()
}

/// Kernel inputs for one frame: the offset table and the bins it indexes.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBins<'a> {
    /// Offsets into `mins`/`maxs`, `width + 1` entries.
    pub offsets: Vec<u32>,
    /// Bin indices in the full extrema arrays that the frame draws from.
    pub bins: Range<usize>,
    pub mins: Cow<'a, [f32]>,
    pub maxs: Cow<'a, [f32]>,
}

impl<'a> FrameBins<'a> {
    /// Spread `requested` bins starting at `first` over `width` columns.
    ///
    /// The time axis always follows `requested`; bins past the end of `extrema`
    /// leave their columns empty. With fewer bins than columns, every column is
    /// given the bin under it, so neighbouring columns may repeat a bin.
    pub fn new(
        extrema: &'a BinnedExtrema,
        first: usize,
        requested: usize,
        width: u32,
    ) -> Result<Self, BinError> {
        let count = u32::try_from(requested).map_err(|_| BinError::TooManyBins(requested))?;
        let end = first.saturating_add(requested).min(extrema.len());
        let bins = first.min(end)..end;
        let mins = &extrema.mins()[bins.clone()];
        let maxs = &extrema.maxs()[bins.clone()];
        // `bins.len() <= requested`, which fits in u32.
        let available = bins.len() as u32;

        if count >= width {
            let offsets = build_offsets(count, width)
                .into_iter()
                .map(|offset| offset.min(available))
                .collect();
            return Ok(Self {
                offsets,
                bins,
                mins: Cow::Borrowed(mins),
                maxs: Cow::Borrowed(maxs),
            });
        }

        let columns = width as usize;
        let mut offsets = Vec::with_capacity(columns + 1);
        let mut column_mins = Vec::with_capacity(columns);
        let mut column_maxs = Vec::with_capacity(columns);
        offsets.push(0);
        for bin in build_offsets(count, width).into_iter().take(columns) {
            let bin = bin as usize;
            if bin < mins.len() {
                column_mins.push(mins[bin]);
                column_maxs.push(maxs[bin]);
            }
            offsets.push(column_mins.len() as u32);
        }

        Ok(Self {
            offsets,
            bins,
            mins: Cow::Owned(column_mins),
            maxs: Cow::Owned(column_maxs),
        })
    }

    /// Number of columns left without any bin.
    pub fn empty_columns(&self) -> usize {
        self.offsets.windows(2).filter(|w| w[0] == w[1]).count()
    }

    /// Borrow the kernel inputs for this frame.
    pub fn frame(&self, params: FrameParams) -> Result<Frame<'_>, RasterError> {
        Frame::new(params, &self.offsets, &self.mins, &self.maxs)
    }
}
