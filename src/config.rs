use serde::{Deserialize, Serialize};

/// Represents the errors that can occur when validating a configuration.
///
/// All of them are raised at construction. A valid [`Config`] never leads
/// to an evaluation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The output data width is out of range.
    #[error("Invalid data width")]
    DataBits,
    /// The table address width is out of range.
    #[error("Invalid table address width")]
    TableAddrBits,
    /// The phase does not leave room for quadrant, index and remainder bits.
    #[error("Invalid phase width")]
    PhaseBits,
    /// Only first and second order corrections are implemented.
    #[error("Invalid Taylor order")]
    TaylorOrder,
    /// A fixed point intermediate would not fit 64 bits.
    #[error("Intermediate width exceeds 64 bits")]
    Width,
}

/// Order of the Taylor correction applied to the table lookup.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    /// `sin(x + d) = sin(x) + d cos(x)`
    #[default]
    First,
    /// Second order through a half step midpoint.
    Second,
}

impl Order {
    /// Number of enabled clock cycles between accepting a phase and
    /// emitting its result.
    pub const fn latency(&self) -> usize {
        match self {
            Self::First => 6,
            Self::Second => 9,
        }
    }
}

impl TryFrom<u8> for Order {
    type Error = Error;
    fn try_from(order: u8) -> Result<Self, Error> {
        match order {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            _ => Err(Error::TaylorOrder),
        }
    }
}

impl From<Order> for u8 {
    fn from(order: Order) -> Self {
        match order {
            Order::First => 1,
            Order::Second => 2,
        }
    }
}

/// Unvalidated configuration parameters as they appear on the wire or in
/// a settings file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    /// Width of the signed sine and cosine outputs.
    pub data_bits: u32,
    /// Width of the unsigned phase input. `1 << phase_bits` is a full turn.
    pub phase_bits: u32,
    /// log2 of the number of table entries.
    pub table_addr_bits: u32,
    /// 1 or 2
    pub taylor_order: u8,
}

/// Validated generator configuration.
///
/// Fixed point layout (all widths in bits):
///
/// ```text
/// phase:  | quadrant (2) | index (table_addr_bits) | remainder (R) |
/// dphi:   aligned remainder scaled by pi/2, data_bits + 7 fractional radian bits
/// table:  unsigned data_bits, 2 * amplitude full scale
/// coeff:  table entry >> k, coeff_bits = data_bits - k
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Parameters", into = "Parameters")]
pub struct Config {
    data_bits: u32,
    phase_bits: u32,
    table_addr_bits: u32,
    order: Order,
}

impl Config {
    pub const MIN_DATA_BITS: u32 = 4;
    pub const MAX_DATA_BITS: u32 = 32;
    pub const MAX_TABLE_ADDR_BITS: u32 = 20;

    /// 18 bit data, 20 bit phase, 1024 entry table, first order. Latency 6.
    pub const NARROW: Self = Self {
        data_bits: 18,
        phase_bits: 20,
        table_addr_bits: 10,
        order: Order::First,
    };

    /// 24 bit data, 26 bit phase, 1024 entry table, second order. Latency 9.
    pub const WIDE: Self = Self {
        data_bits: 24,
        phase_bits: 26,
        table_addr_bits: 10,
        order: Order::Second,
    };

    /// Validate a configuration.
    ///
    /// # Args
    /// * `data_bits` - Output width, `4..=32`.
    /// * `phase_bits` - Phase width, `table_addr_bits + 2 < phase_bits <= 64`.
    /// * `table_addr_bits` - Table address width, `1..=20`.
    /// * `taylor_order` - 1 or 2.
    pub fn new(
        data_bits: u32,
        phase_bits: u32,
        table_addr_bits: u32,
        taylor_order: u8,
    ) -> Result<Self, Error> {
        let order = Order::try_from(taylor_order)?;
        if !(Self::MIN_DATA_BITS..=Self::MAX_DATA_BITS).contains(&data_bits) {
            return Err(Error::DataBits);
        }
        if !(1..=Self::MAX_TABLE_ADDR_BITS).contains(&table_addr_bits) {
            return Err(Error::TableAddrBits);
        }
        if phase_bits <= table_addr_bits + 2 || phase_bits > u64::BITS {
            return Err(Error::PhaseBits);
        }
        let config = Self {
            data_bits,
            phase_bits,
            table_addr_bits,
            order,
        };
        // The widest intermediate is the table entry aligned to the
        // product, plus the halving bit and sign.
        if config.data_bits + config.product_shift() + 2 > i64::BITS - 1 {
            return Err(Error::Width);
        }
        Ok(config)
    }

    pub fn data_bits(&self) -> u32 {
        self.data_bits
    }

    pub fn phase_bits(&self) -> u32 {
        self.phase_bits
    }

    pub fn table_addr_bits(&self) -> u32 {
        self.table_addr_bits
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn latency(&self) -> usize {
        self.order.latency()
    }

    pub fn table_size(&self) -> usize {
        1 << self.table_addr_bits
    }

    /// Mask of the valid phase bits.
    pub fn phase_mask(&self) -> u64 {
        u64::MAX >> (u64::BITS - self.phase_bits)
    }

    /// Position of the quadrant bits in the phase.
    pub fn quadrant_shift(&self) -> u32 {
        self.phase_bits - 2
    }

    /// Phase bits below the table index.
    pub fn remainder_bits(&self) -> u32 {
        self.phase_bits - 2 - self.table_addr_bits
    }

    /// Alignment of the remainder to the scaled phase remainder.
    /// Negative if the phase carries more remainder bits than the output
    /// resolution can use.
    pub fn remainder_shift(&self) -> i32 {
        self.dphi_bits() as i32
            - (self.table_addr_bits + self.remainder_bits()) as i32
    }

    /// Table entry bits dropped from the multiplicand.
    pub fn coeff_shift(&self) -> u32 {
        self.table_addr_bits.saturating_sub(4)
    }

    /// Width of the truncated table entry used as multiplicand.
    pub fn coeff_bits(&self) -> u32 {
        self.data_bits - self.coeff_shift()
    }

    /// Fractional radian bits of the scaled phase remainder.
    pub fn dphi_bits(&self) -> u32 {
        self.data_bits + 7
    }

    /// Alignment of a table entry to the correction product.
    pub fn product_shift(&self) -> u32 {
        self.dphi_bits() - self.coeff_shift()
    }

    /// Output full scale: `(1 << (data_bits - 1)) - 1`.
    pub fn amplitude(&self) -> i32 {
        ((1i64 << (self.data_bits - 1)) - 1) as i32
    }

    /// Table full scale. Twice the output amplitude: the table carries one
    /// fractional output bit.
    pub fn table_scale(&self) -> u32 {
        ((1u64 << self.data_bits) - 2) as u32
    }
}

impl TryFrom<Parameters> for Config {
    type Error = Error;
    fn try_from(p: Parameters) -> Result<Self, Error> {
        Self::new(p.data_bits, p.phase_bits, p.table_addr_bits, p.taylor_order)
    }
}

impl From<Config> for Parameters {
    fn from(c: Config) -> Self {
        Self {
            data_bits: c.data_bits,
            phase_bits: c.phase_bits,
            table_addr_bits: c.table_addr_bits,
            taylor_order: c.order.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference() {
        assert_eq!(Config::new(18, 20, 10, 1), Ok(Config::NARROW));
        assert_eq!(Config::new(24, 26, 10, 2), Ok(Config::WIDE));
        assert_eq!(Config::NARROW.latency(), 6);
        assert_eq!(Config::WIDE.latency(), 9);
    }

    #[test]
    fn layout() {
        let c = Config::NARROW;
        assert_eq!(c.remainder_bits(), 8);
        assert_eq!(c.remainder_shift(), 7);
        assert_eq!(c.coeff_bits(), 12);
        assert_eq!(c.product_shift(), 19);
        assert_eq!(c.amplitude(), 131071);
        assert_eq!(c.table_scale(), 262142);
        assert_eq!(c.phase_mask(), (1 << 20) - 1);

        let c = Config::WIDE;
        assert_eq!(c.remainder_bits(), 14);
        assert_eq!(c.coeff_bits(), 18);
        assert_eq!(c.product_shift(), 25);
        assert_eq!(c.amplitude(), 8388607);
    }

    #[test]
    fn reject() {
        assert_eq!(Config::new(18, 20, 10, 0), Err(Error::TaylorOrder));
        assert_eq!(Config::new(18, 20, 10, 3), Err(Error::TaylorOrder));
        assert_eq!(Config::new(3, 20, 10, 1), Err(Error::DataBits));
        assert_eq!(Config::new(33, 40, 10, 1), Err(Error::DataBits));
        assert_eq!(Config::new(18, 20, 0, 1), Err(Error::TableAddrBits));
        assert_eq!(Config::new(18, 20, 21, 1), Err(Error::TableAddrBits));
        assert_eq!(Config::new(18, 12, 10, 1), Err(Error::PhaseBits));
        assert_eq!(Config::new(18, 65, 10, 1), Err(Error::PhaseBits));
        assert_eq!(Config::new(32, 64, 10, 1), Err(Error::Width));
    }

    #[test]
    fn full_width_phase() {
        let c = Config::new(16, 64, 10, 1).unwrap();
        assert_eq!(c.phase_mask(), u64::MAX);
        assert_eq!(c.remainder_shift(), -39);
        assert_eq!(c.product_shift(), 17);
    }

    #[test]
    fn parameters() {
        let p = Parameters::from(Config::WIDE);
        assert_eq!(p.taylor_order, 2);
        assert_eq!(Config::try_from(p), Ok(Config::WIDE));
    }
}
