//! Bit layout of the two A6281 shift-register packets.
//!
//! Every packet is 32 bits, assembled most-significant-field-first from
//! fixed-width fields. Packet layout: datasheet, "Serial Data Format".

/// Builds a 32-bit packet by appending fixed-width fields, first field
/// ending up in the most significant bits.
///
/// Values are masked to their declared width before insertion, so an
/// over-range value can never spill into the neighboring field.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PacketBuilder {
    bits: u32,
}

impl PacketBuilder {
    pub(crate) const fn new() -> Self {
        Self { bits: 0 }
    }

    pub(crate) const fn field(self, value: u32, width: u32) -> Self {
        let mask = (1 << width) - 1;
        Self {
            bits: (self.bits << width) | (value & mask),
        }
    }

    pub(crate) const fn finish(self) -> u32 {
        self.bits
    }
}

/// Address bits selecting the dot-correction register.
const ADDRESS_DOT_CORRECTION: u32 = 0b01;
/// Address bits selecting the PWM counter (intensity) register.
const ADDRESS_INTENSITY: u32 = 0b00;

/// Dot-correction packet for one IC:
/// `01` · ATB/don't-care (3) · ch2 (7) · don't-care (3) · ch1 (7) ·
/// don't-care (1) · clock mode (2) · ch0 (7).
///
/// Reserved fields and the clock mode are always sent as zero.
pub(crate) const fn dot_correction(channels: [u8; 3]) -> u32 {
    PacketBuilder::new()
        .field(ADDRESS_DOT_CORRECTION, 2)
        .field(0, 3)
        .field(channels[2] as u32, 7)
        .field(0, 3)
        .field(channels[1] as u32, 7)
        .field(0, 1)
        .field(0, 2)
        .field(channels[0] as u32, 7)
        .finish()
}

/// Intensity packet for one IC: `00` · ch2 (10) · ch1 (10) · ch0 (10).
pub(crate) const fn intensity(channels: [u16; 3]) -> u32 {
    PacketBuilder::new()
        .field(ADDRESS_INTENSITY, 2)
        .field(channels[2] as u32, 10)
        .field(channels[1] as u32, 10)
        .field(channels[0] as u32, 10)
        .finish()
}
