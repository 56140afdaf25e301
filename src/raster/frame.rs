//! Per-launch kernel inputs and their contract checks.

/// Bytes per RGBA pixel in the output buffer.
pub const BYTES_PER_PIXEL: usize = 4;

/// Color painted for every row inside a column's span.
pub const BAR_COLOR: [u8; 4] = [0, 0, 0, 255];

/// Errors raised when a launch's inputs break the kernel contract.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RasterError {
    #[error("Image dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
    #[error("Offset table must hold width + 1 = {expected} entries, got {got}")]
    OffsetTableLength { expected: usize, got: usize },
    #[error("Offsets decrease at column {column}: {begin} > {end}")]
    NonMonotonicOffsets { column: usize, begin: u32, end: u32 },
    #[error("Last offset {last} does not match the bin count {bins}")]
    OffsetTableEnd { last: u32, bins: usize },
    #[error("Extrema arrays differ in length: {mins} mins, {maxs} maxs")]
    ExtremaLengthMismatch { mins: usize, maxs: usize },
    #[error("Output buffer must be {expected} bytes, got {got}")]
    OutputLength { expected: usize, got: usize },
    #[error("Frame exceeds GPU limits: {0}")]
    GpuLimit(String),
    #[error("GPU launch failed: {0}")]
    Gpu(String),
}

/// Scalar parameters shared by every column of one launch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub width: u32,
    pub height: u32,
    /// Pixels per amplitude unit.
    pub scale: f32,
    /// Amplitude that sits on row `height / 2`.
    pub global_min: f32,
}

impl FrameParams {
    /// Map an amplitude to a pixel row, clamped to `[0, height]`.
    ///
    /// The subtraction happens in `f32` so amplitudes above the top edge land on
    /// a negative row and clamp to 0 instead of wrapping. NaN maps to row 0.
    pub fn row_of(&self, amplitude: f32) -> u32 {
        let center = (self.height / 2) as f32;
        let row = center - (self.scale * (amplitude - self.global_min)).floor();
        row.clamp(0.0, self.height as f32) as u32
    }

    /// Byte length of an RGBA buffer with these dimensions.
    pub fn buffer_len(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }
}

/// Borrowed, validated inputs for one kernel launch.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub params: FrameParams,
    pub offsets: &'a [u32],
    pub mins: &'a [f32],
    pub maxs: &'a [f32],
}

impl<'a> Frame<'a> {
    /// Check the offset table and extrema arrays against `params`.
    ///
    /// Empty column ranges are accepted; those columns paint nothing.
    pub fn new(
        params: FrameParams,
        offsets: &'a [u32],
        mins: &'a [f32],
        maxs: &'a [f32],
    ) -> Result<Self, RasterError> {
        if params.width == 0 || params.height == 0 {
            return Err(RasterError::ZeroDimension {
                width: params.width,
                height: params.height,
            });
        }

        let expected = params.width as usize + 1;
        if offsets.len() != expected {
            return Err(RasterError::OffsetTableLength {
                expected,
                got: offsets.len(),
            });
        }

        if mins.len() != maxs.len() {
            return Err(RasterError::ExtremaLengthMismatch {
                mins: mins.len(),
                maxs: maxs.len(),
            });
        }

        if let Some((column, pair)) = offsets
            .windows(2)
            .enumerate()
            .find(|(_, pair)| pair[0] > pair[1])
        {
            return Err(RasterError::NonMonotonicOffsets {
                column,
                begin: pair[0],
                end: pair[1],
            });
        }

        let last = offsets[params.width as usize];
        if last as usize != mins.len() {
            return Err(RasterError::OffsetTableEnd {
                last,
                bins: mins.len(),
            });
        }

        Ok(Self {
            params,
            offsets,
            mins,
            maxs,
        })
    }

    pub fn width(&self) -> usize {
        self.params.width as usize
    }

    pub fn height(&self) -> usize {
        self.params.height as usize
    }

    pub fn bin_count(&self) -> usize {
        self.mins.len()
    }

    /// Fail unless `res` is exactly `width * height * 4` bytes.
    pub fn check_output(&self, res: &[u8]) -> Result<(), RasterError> {
        let expected = self.params.buffer_len();
        if res.len() != expected {
            return Err(RasterError::OutputLength {
                expected,
                got: res.len(),
            });
        }
        Ok(())
    }
}
