use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::Error;

/// Trait for driving the physical 4-wire link of an A6281 chain.
///
/// The chain transmitter only needs a byte-wide shift-out plus level
/// control of the latch and output-enable lines. There is no read path,
/// the A6281 has no acknowledgment or status channel.
pub trait ChainLink {
    type Error;

    /// Shifts one byte out on the data line, most significant bit first,
    /// clocking each bit on the clock line.
    fn shift_out(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Drives the latch line high (`true`) or low (`false`).
    fn set_latch(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Drives the output-enable line high (`true`) or low (`false`).
    fn set_enable(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Busy-waits for at least `us` microseconds.
    fn delay_us(&mut self, us: u32);
}

/// Bit-banged [`ChainLink`] over four GPIO output pins and a delay.
///
/// All pins must share one error type. The clock line is expected to
/// idle low; data is sampled by the A6281 on the rising clock edge.
pub struct BitBangLink<CLK, EN, LAT, DAT, D> {
    clock: CLK,
    enable: EN,
    latch: LAT,
    data: DAT,
    delay: D,
}

impl<CLK, EN, LAT, DAT, D, E> BitBangLink<CLK, EN, LAT, DAT, D>
where
    CLK: OutputPin<Error = E>,
    EN: OutputPin<Error = E>,
    LAT: OutputPin<Error = E>,
    DAT: OutputPin<Error = E>,
    D: DelayNs,
{
    pub fn new(clock: CLK, enable: EN, latch: LAT, data: DAT, delay: D) -> Self {
        Self {
            clock,
            enable,
            latch,
            data,
            delay,
        }
    }

    /// Destroys the link and releases the owned pins and delay.
    pub fn release(self) -> (CLK, EN, LAT, DAT, D) {
        (self.clock, self.enable, self.latch, self.data, self.delay)
    }
}

impl<CLK, EN, LAT, DAT, D, E> ChainLink for BitBangLink<CLK, EN, LAT, DAT, D>
where
    CLK: OutputPin<Error = E>,
    EN: OutputPin<Error = E>,
    LAT: OutputPin<Error = E>,
    DAT: OutputPin<Error = E>,
    D: DelayNs,
{
    type Error = Error<E>;

    fn shift_out(&mut self, byte: u8) -> Result<(), Self::Error> {
        for bit in (0..8).rev() {
            self.data
                .set_state((byte >> bit & 1 == 1).into())
                .map_err(Error::Link)?;
            self.clock.set_high().map_err(Error::Link)?;
            self.clock.set_low().map_err(Error::Link)?;
        }

        Ok(())
    }

    fn set_latch(&mut self, high: bool) -> Result<(), Self::Error> {
        self.latch.set_state(high.into()).map_err(Error::Link)
    }

    fn set_enable(&mut self, high: bool) -> Result<(), Self::Error> {
        self.enable.set_state(high.into()).map_err(Error::Link)
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}
