//! Per-bin amplitude extrema.

use rayon::prelude::*;

use super::offsets::{FrameBins, TimeRange};
use super::BinError;

/// Min/max amplitude of every full `bin_size`-sample bin of a signal.
#[derive(Debug, Clone)]
pub struct BinnedExtrema {
    bin_size: usize,
    sample_rate: u32,
    mins: Vec<f32>,
    maxs: Vec<f32>,
}

impl BinnedExtrema {
    /// Bin `samples` into consecutive runs of `bin_size` samples.
    ///
    /// A trailing partial bin is dropped. Fails if `bin_size` is zero or larger
    /// than the signal.
    pub fn from_samples(
        samples: &[f32],
        sample_rate: u32,
        bin_size: usize,
    ) -> Result<Self, BinError> {
        if bin_size == 0 || bin_size > samples.len() {
            return Err(BinError::InvalidBinSize {
                bin_size,
                samples: samples.len(),
            });
        }

        let (mins, maxs): (Vec<f32>, Vec<f32>) = samples
            .par_chunks_exact(bin_size)
            .map(|bin| {
                bin.iter()
                    .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &s| {
                        (lo.min(s), hi.max(s))
                    })
            })
            .unzip();

        Ok(Self {
            bin_size,
            sample_rate,
            mins,
            maxs,
        })
    }

    pub fn bin_size(&self) -> usize {
        self.bin_size
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.mins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mins.is_empty()
    }

    pub fn mins(&self) -> &[f32] {
        &self.mins
    }

    pub fn maxs(&self) -> &[f32] {
        &self.maxs
    }

    /// Bins covering `range`, spread over `width` columns.
    ///
    /// The bin range starts at the bin holding the first sample and ends after the
    /// bin holding the last one. Columns that fall past the end of the signal get
    /// no bins.
    pub fn frame_bins(&self, range: TimeRange, width: u32) -> Result<FrameBins<'_>, BinError> {
        let samples = range.to_samples(self.sample_rate)?;
        let first = samples.start / self.bin_size;
        if first >= self.len() {
            return Err(BinError::RangeOutOfBounds {
                first,
                available: self.len(),
            });
        }
        let requested = samples.end.div_ceil(self.bin_size) - first;
        FrameBins::new(self, first, requested, width)
    }
}
