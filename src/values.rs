//! Chain-array layout.
//!
//! Chain values live in caller-owned flat slices with `3 × chain_length`
//! elements. The slot for IC `n` (1-based) channel `k` (0..=2) is
//! `(n - 1) * 3 + k`; all index arithmetic lives here.

use crate::CHANNELS_PER_IC;

mod seal {
    pub trait Sealed {}
}

/// Per-channel value of one of the A6281's register kinds.
///
/// Implemented for `u8` (7-bit dot correction) and `u16` (10-bit PWM
/// intensity). Writes through this trait always mask to the valid width,
/// an over-range value is truncated rather than rejected.
pub trait ChannelValue: Copy + seal::Sealed {
    /// Mask covering the bits the device actually uses.
    const MASK: Self;

    fn masked(self) -> Self;
}

impl ChannelValue for u8 {
    const MASK: u8 = 0x7F;

    fn masked(self) -> u8 {
        self & Self::MASK
    }
}
impl seal::Sealed for u8 {}

impl ChannelValue for u16 {
    const MASK: u16 = 0x3FF;

    fn masked(self) -> u16 {
        self & Self::MASK
    }
}
impl seal::Sealed for u16 {}

/// Index of the first slot belonging to 1-based IC `ic`.
pub(crate) const fn ic_base(ic: usize) -> usize {
    (ic - 1) * CHANNELS_PER_IC
}

/// Writes the three masked channel values of one IC into `array`.
///
/// The caller has already range-checked `ic`; a slice shorter than the
/// chain layout panics on indexing.
pub(crate) fn write_ic<V: ChannelValue>(array: &mut [V], ic: usize, channels: [V; 3]) {
    let base = ic_base(ic);
    array[base] = channels[0].masked();
    array[base + 1] = channels[1].masked();
    array[base + 2] = channels[2].masked();
}

/// Reads the three channel slots of one IC back out of `array`.
pub(crate) fn read_ic<V: ChannelValue>(array: &[V], ic: usize) -> [V; 3] {
    let base = ic_base(ic);
    [array[base], array[base + 1], array[base + 2]]
}
