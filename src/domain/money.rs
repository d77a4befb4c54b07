use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::Error;

/// A strictly positive amount of money, normalised to a fixed scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    pub const DEFAULT_SCALE: u32 = 4; // 4 decimal places

    pub fn new(value: Decimal) -> Result<Self, Error> {
        Self::with_scale(value, Self::DEFAULT_SCALE)
    }

    /// Rounds half to even at `scale`, then rejects anything not above zero.
    pub fn with_scale(value: Decimal, scale: u32) -> Result<Self, Error> {
        let rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven);

        if rounded <= Decimal::ZERO {
            return Err(Error::InvalidAmount(format!(
                "{} is not a positive amount",
                value
            )));
        }

        Ok(Self(rounded))
    }

    pub fn parse(s: &str, scale: u32) -> Result<Self, Error> {
        let s = s.trim();

        if s.is_empty() {
            return Err(Error::InvalidAmount("amount is missing".to_string()));
        }

        let value = Decimal::from_str(s)
            .map_err(|_| Error::InvalidAmount(format!("{} is not a number", s)))?;

        Self::with_scale(value, scale)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
