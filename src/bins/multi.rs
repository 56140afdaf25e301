//! Several binned resolutions of one signal.

use super::extrema::BinnedExtrema;
use super::BinError;

/// `BinnedExtrema` at several bin sizes, sorted by bin size.
///
/// Coarser bins make wide zoomed-out frames cheap; finer bins keep zoomed-in
/// frames accurate.
#[derive(Debug, Clone)]
pub struct MultiResolution {
    levels: Vec<BinnedExtrema>,
    sample_rate: u32,
}

impl MultiResolution {
    /// Bin `samples` at every size in `bin_sizes`.
    ///
    /// Sizes of zero or larger than the signal are skipped. Fails with
    /// `NoBinSizes` if nothing usable remains.
    pub fn new(samples: &[f32], sample_rate: u32, bin_sizes: &[usize]) -> Result<Self, BinError> {
        let mut sizes = bin_sizes.to_vec();
        sizes.sort_unstable();
        sizes.dedup();

        let mut levels = Vec::with_capacity(sizes.len());
        for bin_size in sizes {
            match BinnedExtrema::from_samples(samples, sample_rate, bin_size) {
                Ok(extrema) => levels.push(extrema),
                Err(e) => log::debug!("Skipping bin size {}: {}", bin_size, e),
            }
        }

        if levels.is_empty() {
            return Err(BinError::NoBinSizes);
        }

        Ok(Self {
            levels,
            sample_rate,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Available bin sizes, ascending.
    pub fn bin_sizes(&self) -> Vec<usize> {
        self.levels.iter().map(BinnedExtrema::bin_size).collect()
    }

    pub fn get(&self, bin_size: usize) -> Option<&BinnedExtrema> {
        self.levels.iter().find(|level| level.bin_size() == bin_size)
    }

    /// The largest bin size not exceeding `samples_per_pixel`, or the smallest
    /// one if every size is larger.
    pub fn select(&self, samples_per_pixel: f64) -> &BinnedExtrema {
        let fitting = self
            .levels
            .partition_point(|level| level.bin_size() as f64 <= samples_per_pixel);
        // `new` rejects an empty set.
        &self.levels[fitting.saturating_sub(1)]
    }
}
