//! The token side of the manager. The manager never holds balances itself: it
//! asks a [`TokenCustody`] to lock, unlock, burn or mint, depending on its
//! [`Mode`], and only records a transfer as done once that call succeeded.

use std::collections::BTreeMap;

use ntt_messages::mode::Mode;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustodyError {
    #[error("InsufficientFunds: {available} available, {requested} requested")]
    InsufficientFunds { available: u64, requested: u64 },
    #[error("SupplyOverflow")]
    SupplyOverflow,
    #[error("Rejected: {0}")]
    Rejected(String),
}

pub trait TokenCustody {
    fn token_address(&self) -> [u8; 32];

    fn decimals(&self) -> u8;

    /// Moves `amount` from `owner` into the manager's custody.
    fn lock(&mut self, owner: &[u8; 32], amount: u64) -> Result<(), CustodyError>;

    /// Moves `amount` out of the manager's custody to `recipient`.
    fn unlock(&mut self, recipient: &[u8; 32], amount: u64) -> Result<(), CustodyError>;

    fn burn(&mut self, owner: &[u8; 32], amount: u64) -> Result<(), CustodyError>;

    fn mint(&mut self, recipient: &[u8; 32], amount: u64) -> Result<(), CustodyError>;
}

/// Takes `amount` from `owner` the way `mode` prescribes.
pub fn debit<T: TokenCustody + ?Sized>(
    custody: &mut T,
    mode: Mode,
    owner: &[u8; 32],
    amount: u64,
) -> Result<(), CustodyError> {
    match mode {
        Mode::Locking => custody.lock(owner, amount),
        Mode::Burning => custody.burn(owner, amount),
    }
}

/// Hands `amount` to `recipient` the way `mode` prescribes.
pub fn credit<T: TokenCustody + ?Sized>(
    custody: &mut T,
    mode: Mode,
    recipient: &[u8; 32],
    amount: u64,
) -> Result<(), CustodyError> {
    match mode {
        Mode::Locking => custody.unlock(recipient, amount),
        Mode::Burning => custody.mint(recipient, amount),
    }
}

/// A token ledger kept in memory, for local deployments and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryToken {
    pub address: [u8; 32],
    pub decimals: u8,
    pub balances: BTreeMap<[u8; 32], u64>,
    pub custody_balance: u64,
    pub total_supply: u64,
}

impl InMemoryToken {
    pub fn new(address: [u8; 32], decimals: u8) -> Self {
        Self {
            address,
            decimals,
            ..Default::default()
        }
    }

    pub fn balance_of(&self, owner: &[u8; 32]) -> u64 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    /// Credits `owner` out of thin air, as a faucet would.
    pub fn fund(&mut self, owner: [u8; 32], amount: u64) -> Result<(), CustodyError> {
        self.total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(CustodyError::SupplyOverflow)?;
        self.add(&owner, amount)
    }

    fn add(&mut self, owner: &[u8; 32], amount: u64) -> Result<(), CustodyError> {
        let balance = self.balances.entry(*owner).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(CustodyError::SupplyOverflow)?;
        Ok(())
    }

    fn sub(&mut self, owner: &[u8; 32], amount: u64) -> Result<(), CustodyError> {
        let available = self.balance_of(owner);
        let remaining = available
            .checked_sub(amount)
            .ok_or(CustodyError::InsufficientFunds {
                available,
                requested: amount,
            })?;
        self.balances.insert(*owner, remaining);
        Ok(())
    }
}

impl TokenCustody for InMemoryToken {
    fn token_address(&self) -> [u8; 32] {
        self.address
    }

    fn decimals(&self) -> u8 {
        self.decimals
    }

    fn lock(&mut self, owner: &[u8; 32], amount: u64) -> Result<(), CustodyError> {
        let custody_balance = self
            .custody_balance
            .checked_add(amount)
            .ok_or(CustodyError::SupplyOverflow)?;
        self.sub(owner, amount)?;
        self.custody_balance = custody_balance;
        Ok(())
    }

    fn unlock(&mut self, recipient: &[u8; 32], amount: u64) -> Result<(), CustodyError> {
        let custody_balance =
            self.custody_balance
                .checked_sub(amount)
                .ok_or(CustodyError::InsufficientFunds {
                    available: self.custody_balance,
                    requested: amount,
                })?;
        self.add(recipient, amount)?;
        self.custody_balance = custody_balance;
        Ok(())
    }

    fn burn(&mut self, owner: &[u8; 32], amount: u64) -> Result<(), CustodyError> {
        self.sub(owner, amount)?;
        self.total_supply = self.total_supply.saturating_sub(amount);
        Ok(())
    }

    fn mint(&mut self, recipient: &[u8; 32], amount: u64) -> Result<(), CustodyError> {
        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(CustodyError::SupplyOverflow)?;
        self.add(recipient, amount)?;
        self.total_supply = total_supply;
        Ok(())
    }
}
