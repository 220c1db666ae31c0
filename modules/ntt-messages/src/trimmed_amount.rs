//! Token amounts as they travel between chains.
//!
//! Chains disagree on token precision, so a message never carries more than
//! [`TRIMMED_DECIMALS`] decimals, nor more than either side can represent. A
//! [`TrimmedAmount`] keeps the value together with the precision it is
//! expressed in. Whatever [`trim`] cuts off is dust and stays with the sender;
//! [`TrimmedAmount::trim_exact`] rejects such amounts instead.

use std::io;

#[cfg(feature = "borsh")]
use borsh::{BorshDeserialize, BorshSerialize};

use wormhole_io::{Readable, Writeable};

use crate::errors::ScalingError;

pub const TRIMMED_DECIMALS: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
pub struct TrimmedAmount {
    pub amount: u64,
    pub decimals: u8,
}

/// Trims `amount` from `from_decimals` to at most [`TRIMMED_DECIMALS`].
pub fn trim(amount: u64, from_decimals: u8) -> Result<TrimmedAmount, ScalingError> {
    TrimmedAmount::trim(amount, from_decimals, TRIMMED_DECIMALS)
}

/// Scales a trimmed amount back to `to_decimals`, flooring when precision is
/// reduced.
pub fn untrim(amount: TrimmedAmount, to_decimals: u8) -> Result<u64, ScalingError> {
    amount.untrim(to_decimals)
}

impl TrimmedAmount {
    pub fn new(amount: u64, decimals: u8) -> Self {
        Self { amount, decimals }
    }

    pub fn zero(decimals: u8) -> Self {
        Self {
            amount: 0,
            decimals,
        }
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    pub fn change_decimals(&self, new_decimals: u8) -> Result<Self, ScalingError> {
        if new_decimals == self.decimals {
            return Ok(*self);
        }
        let amount = self.untrim(new_decimals)?;
        Ok(Self {
            amount,
            decimals: new_decimals,
        })
    }

    /// Moves `amount` between precisions. Going down floors; going up fails
    /// rather than wrap.
    #[allow(clippy::integer_division)]
    fn scale(amount: u64, from_decimals: u8, to_decimals: u8) -> Result<u64, ScalingError> {
        let power = u32::from(from_decimals.abs_diff(to_decimals));
        // 10^20 no longer fits in a u64
        let factor = 10u64
            .checked_pow(power)
            .ok_or(ScalingError::OverflowExponent)?;

        if from_decimals >= to_decimals {
            Ok(amount / factor)
        } else {
            amount
                .checked_mul(factor)
                .ok_or(ScalingError::OverflowScaledAmount)
        }
    }

    /// Trims `amount` to `min(8, from_decimals, to_decimals)` decimals, where
    /// `to_decimals` is the precision of the token on the destination chain.
    pub fn trim(
        amount: u64,
        from_decimals: u8,
        to_decimals: u8,
    ) -> Result<TrimmedAmount, ScalingError> {
        let to_decimals = TRIMMED_DECIMALS.min(from_decimals).min(to_decimals);
        let amount = Self::scale(amount, from_decimals, to_decimals)?;
        Ok(Self {
            amount,
            decimals: to_decimals,
        })
    }

    /// Like [`TrimmedAmount::trim`], but refuses amounts that would lose dust.
    pub fn trim_exact(
        amount: u64,
        from_decimals: u8,
        to_decimals: u8,
    ) -> Result<TrimmedAmount, ScalingError> {
        let trimmed = Self::trim(amount, from_decimals, to_decimals)?;
        let without_dust = trimmed.untrim(from_decimals)?;
        if without_dust != amount {
            return Err(ScalingError::AmountHasDust {
                dust: amount - without_dust,
            });
        }
        Ok(trimmed)
    }

    pub fn untrim(&self, to_decimals: u8) -> Result<u64, ScalingError> {
        Self::scale(self.amount, self.decimals, to_decimals)
    }

    /// Trims `amount` and rewrites it in place to the part that survives,
    /// still in `from_decimals`. This is what actually leaves the sender.
    pub fn remove_dust(
        amount: &mut u64,
        from_decimals: u8,
        to_decimals: u8,
    ) -> Result<TrimmedAmount, ScalingError> {
        let trimmed = Self::trim(*amount, from_decimals, to_decimals)?;
        *amount = trimmed.untrim(from_decimals)?;
        Ok(trimmed)
    }

    /// Adds `other` after rescaling it to `self.decimals`.
    pub fn checked_add(&self, other: TrimmedAmount) -> Result<Self, ScalingError> {
        let other = other.change_decimals(self.decimals)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(ScalingError::OverflowScaledAmount)?;
        Ok(Self::new(amount, self.decimals))
    }

    /// Subtracts `other` after rescaling it to `self.decimals`. Returns `None`
    /// when `other` is larger than `self`.
    pub fn checked_sub(&self, other: TrimmedAmount) -> Result<Option<Self>, ScalingError> {
        let other = other.change_decimals(self.decimals)?;
        Ok(self
            .amount
            .checked_sub(other.amount)
            .map(|amount| Self::new(amount, self.decimals)))
    }
}

impl Readable for TrimmedAmount {
    const SIZE: Option<usize> = Some(1 + 8);

    fn read<R>(reader: &mut R) -> io::Result<Self>
    where
        Self: Sized,
        R: io::Read,
    {
        // decimals come first on the wire
        let decimals = Readable::read(reader)?;
        let amount = Readable::read(reader)?;
        Ok(Self { amount, decimals })
    }
}

impl Writeable for TrimmedAmount {
    fn write<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        let TrimmedAmount { amount, decimals } = self;
        decimals.write(writer)?;
        amount.write(writer)?;

        Ok(())
    }

    fn written_size(&self) -> usize {
        1 + 8
    }
}
