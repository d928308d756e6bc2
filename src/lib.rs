//! Driver for the Allegro MicroSystems A6281 3-channel constant-current
//! LED driver, controlled over its 4-wire serial shift interface (clock,
//! data, latch, output enable).
//!
//! Datasheet: <https://www.allegromicro.com/en/Products/Part_Numbers/6281/6281.pdf>
//!
//! Up to [`MAX_CHAIN_LENGTH`] ICs can be daisy-chained on one link. Per-channel
//! dot-correction (7 bit) and PWM intensity (10 bit) values live in flat,
//! caller-owned arrays of `3 × chain_length` elements; the driver fills them
//! with [`A6281::set_dot_correction`] and friends and serializes them to the
//! chain with [`A6281::write_dot_correction`] / [`A6281::write_intensity`].
//! The physical link is injected through the [`interface::ChainLink`] trait;
//! [`interface::BitBangLink`] provides it over four `embedded-hal` output
//! pins and a delay.

#![cfg_attr(not(test), no_std)]

pub mod interface;
mod packet;
mod values;

use interface::ChainLink;
pub use values::ChannelValue;

/// Error enum for the A6281 driver
#[derive(Debug)]
pub enum Error<LE> {
    /// An error on the physical link has occured
    Link(LE),
}

/// Maximum number of ICs in one daisy-chain.
pub const MAX_CHAIN_LENGTH: usize = 250;

/// LED channels per IC.
pub const CHANNELS_PER_IC: usize = 3;

/// Latch pulse width and hold time in microseconds (t_su(L), t_w(L)).
pub const T_LATCH_US: u32 = 2;

/// Driver for a chain of A6281 ICs sharing one physical link.
///
/// One instance exclusively owns its link; the chain length is fixed at
/// construction.
pub struct A6281<L> {
    link: L,
    chain_length: usize,
}

impl<L, LE> A6281<L>
where
    L: ChainLink<Error = Error<LE>>,
{
    /// Create a new A6281 driver for a chain of `num_ics` ICs on `link`.
    ///
    /// `num_ics` is silently clamped to `1..=250`. The latch line is
    /// driven low and the chain outputs start out disabled; programmed
    /// values only become visible after [`A6281::set_enabled`]`(true)`.
    pub fn new(link: L, num_ics: usize) -> Result<A6281<L>, Error<LE>> {
        let mut driver = A6281 {
            link,
            chain_length: num_ics.clamp(1, MAX_CHAIN_LENGTH),
        };
        driver.link.set_latch(false)?;
        driver.set_enabled(false)?;

        Ok(driver)
    }

    /// Number of ICs in the chain.
    pub const fn chain_length(&self) -> usize {
        self.chain_length
    }

    /// Number of elements a value array for this chain must hold.
    pub const fn array_len(&self) -> usize {
        self.chain_length * CHANNELS_PER_IC
    }

    /// Enable or disable the outputs of the whole chain.
    ///
    /// Disabling blanks all LEDs regardless of the programmed values; the
    /// values themselves are retained and can be reprogrammed in either
    /// state.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), Error<LE>> {
        // OEI is active-low: a low level turns the outputs on.
        self.link.set_enable(!enabled)
    }

    /// Writes the masked 7-bit dot-correction values of one IC into `dc`.
    ///
    /// `ic` counts from 1. An `ic` outside `1..=chain_length` is silently
    /// ignored and leaves the array untouched.
    pub fn set_dot_correction(&self, dc: &mut [u8], ic: usize, channels: [u8; 3]) {
        if (1..=self.chain_length).contains(&ic) {
            values::write_ic(dc, ic, channels);
        }
    }

    /// Writes the same masked dot-correction values into every IC's slots.
    pub fn set_dot_correction_all(&self, dc: &mut [u8], channels: [u8; 3]) {
        for ic in 1..=self.chain_length {
            values::write_ic(dc, ic, channels);
        }
    }

    /// Writes the masked 10-bit intensity values of one IC into `intensity`.
    ///
    /// Same semantics as [`A6281::set_dot_correction`].
    pub fn set_intensity(&self, intensity: &mut [u16], ic: usize, channels: [u16; 3]) {
        if (1..=self.chain_length).contains(&ic) {
            values::write_ic(intensity, ic, channels);
        }
    }

    /// Writes the same masked intensity values into every IC's slots.
    pub fn set_intensity_all(&self, intensity: &mut [u16], channels: [u16; 3]) {
        for ic in 1..=self.chain_length {
            values::write_ic(intensity, ic, channels);
        }
    }

    /// Serializes the dot-correction array to the chain and latches it.
    ///
    /// `dc` must hold [`A6281::array_len`] elements; a shorter slice
    /// panics.
    pub fn write_dot_correction(&mut self, dc: &[u8]) -> Result<(), Error<LE>> {
        // The physically last IC receives its packet first; data shifts
        // through every downstream IC before the chain-wide latch.
        for ic in (1..=self.chain_length).rev() {
            self.send_packet(packet::dot_correction(values::read_ic(dc, ic)))?;
        }

        self.latch()
    }

    /// Serializes the intensity array to the chain and latches it.
    pub fn write_intensity(&mut self, intensity: &[u16]) -> Result<(), Error<LE>> {
        for ic in (1..=self.chain_length).rev() {
            self.send_packet(packet::intensity(values::read_ic(intensity, ic)))?;
        }

        self.latch()
    }

    /// Shifts one IC's 32-bit packet out, most significant byte first.
    fn send_packet(&mut self, packet: u32) -> Result<(), Error<LE>> {
        for byte in packet.to_be_bytes() {
            self.link.shift_out(byte)?;
        }

        Ok(())
    }

    /// One latch pulse for the whole chain.
    fn latch(&mut self) -> Result<(), Error<LE>> {
        self.link.set_latch(true)?;
        self.link.delay_us(T_LATCH_US);
        self.link.set_latch(false)?;
        self.link.delay_us(T_LATCH_US);

        Ok(())
    }

    /// Destroys the driver and releases the owned link.
    pub fn release(self) -> L {
        self.link
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interface::mock::{MockLink, Op};

    /// Link operations every `A6281::new` performs.
    fn construction_ops() -> Vec<Op> {
        vec![Op::SetLatch(false), Op::SetEnable(true)]
    }

    fn latch_ops() -> Vec<Op> {
        vec![
            Op::SetLatch(true),
            Op::DelayUs(T_LATCH_US),
            Op::SetLatch(false),
            Op::DelayUs(T_LATCH_US),
        ]
    }

    #[test]
    fn test_create_new() {
        let link = MockLink::new(construction_ops());

        let driver = A6281::new(link, 5).unwrap();

        assert_eq!(driver.chain_length(), 5);
        assert_eq!(driver.array_len(), 15);
        driver.release().done();
    }

    #[test]
    fn test_chain_length_clamped() {
        let driver = A6281::new(MockLink::new(construction_ops()), 255).unwrap();
        assert_eq!(driver.chain_length(), 250);
        driver.release().done();

        let driver = A6281::new(MockLink::new(construction_ops()), 0).unwrap();
        assert_eq!(driver.chain_length(), 1);
        driver.release().done();
    }

    #[test]
    fn test_set_enabled_drives_active_low_line() {
        let mut ops = construction_ops();
        ops.extend([Op::SetEnable(false), Op::SetEnable(true)]);
        let link = MockLink::new(ops);

        let mut driver = A6281::new(link, 1).unwrap();
        driver.set_enabled(true).unwrap();
        driver.set_enabled(false).unwrap();

        driver.release().done();
    }

    #[test]
    fn test_set_dot_correction_masks_and_places_values() {
        let driver = A6281::new(MockLink::new(construction_ops()), 2).unwrap();
        let mut dc = [0u8; 6];

        driver.set_dot_correction(&mut dc, 2, [9, 0x82, 0xFF]);

        assert_eq!(dc, [0, 0, 0, 9, 0x02, 0x7F]);
        driver.release().done();
    }

    #[test]
    fn test_set_dot_correction_ignores_out_of_range_ic() {
        let driver = A6281::new(MockLink::new(construction_ops()), 2).unwrap();
        let mut dc = [0u8; 6];

        driver.set_dot_correction(&mut dc, 0, [1, 2, 3]);
        driver.set_dot_correction(&mut dc, 3, [1, 2, 3]);

        assert_eq!(dc, [0u8; 6]);
        driver.release().done();
    }

    #[test]
    fn test_set_intensity_masks_and_ignores_out_of_range_ic() {
        let driver = A6281::new(MockLink::new(construction_ops()), 2).unwrap();
        let mut intensity = [0u16; 6];

        driver.set_intensity(&mut intensity, 1, [0x3FF, 0x400, 1000]);
        driver.set_intensity(&mut intensity, 3, [7, 7, 7]);

        assert_eq!(intensity, [0x3FF, 0, 1000, 0, 0, 0]);
        driver.release().done();
    }

    #[test]
    fn test_set_all_fills_every_ic() {
        let driver = A6281::new(MockLink::new(construction_ops()), 3).unwrap();
        let mut dc = [0u8; 9];
        let mut intensity = [0u16; 9];

        driver.set_dot_correction_all(&mut dc, [0x81, 2, 3]);
        driver.set_intensity_all(&mut intensity, [1, 0x402, 3]);

        assert_eq!(dc, [1, 2, 3, 1, 2, 3, 1, 2, 3]);
        assert_eq!(intensity, [1, 2, 3, 1, 2, 3, 1, 2, 3]);
        driver.release().done();
    }

    #[test]
    fn test_write_dot_correction_sends_last_ic_first() {
        let mut ops = construction_ops();
        ops.extend([
            // IC 3
            Op::ShiftOut(0x40),
            Op::ShiftOut(0x90),
            Op::ShiftOut(0x20),
            Op::ShiftOut(0x07),
            // IC 2
            Op::ShiftOut(0x40),
            Op::ShiftOut(0x60),
            Op::ShiftOut(0x14),
            Op::ShiftOut(0x04),
            // IC 1
            Op::ShiftOut(0x40),
            Op::ShiftOut(0x30),
            Op::ShiftOut(0x08),
            Op::ShiftOut(0x01),
        ]);
        ops.extend(latch_ops());
        let link = MockLink::new(ops);

        let mut driver = A6281::new(link, 3).unwrap();
        driver
            .write_dot_correction(&[1, 2, 3, 4, 5, 6, 7, 8, 9])
            .unwrap();

        driver.release().done();
    }

    #[test]
    fn test_write_intensity_sends_last_ic_first() {
        let mut ops = construction_ops();
        ops.extend([
            // IC 2: channels (1000, 1001, 1002)
            Op::ShiftOut(0x3E),
            Op::ShiftOut(0xAF),
            Op::ShiftOut(0xA7),
            Op::ShiftOut(0xE8),
            // IC 1: channels (10, 20, 30)
            Op::ShiftOut(0x01),
            Op::ShiftOut(0xE0),
            Op::ShiftOut(0x50),
            Op::ShiftOut(0x0A),
        ]);
        ops.extend(latch_ops());
        let link = MockLink::new(ops);

        let mut driver = A6281::new(link, 2).unwrap();
        driver
            .write_intensity(&[10, 20, 30, 1000, 1001, 1002])
            .unwrap();

        driver.release().done();
    }

    #[test]
    fn test_single_latch_pulse_per_transmit() {
        let mut ops = construction_ops();
        ops.extend([
            Op::ShiftOut(0x40),
            Op::ShiftOut(0x00),
            Op::ShiftOut(0x00),
            Op::ShiftOut(0x00),
        ]);
        ops.extend(latch_ops());
        let link = MockLink::new(ops);

        let mut driver = A6281::new(link, 1).unwrap();
        driver.write_dot_correction(&[0, 0, 0]).unwrap();

        driver.release().done();
    }
}
