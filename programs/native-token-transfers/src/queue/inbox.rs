use std::ops::{Deref, DerefMut};

use borsh::{BorshDeserialize, BorshSerialize};
use ntt_messages::{chain_id::ChainId, trimmed_amount::TrimmedAmount};

use crate::{
    bitmap::Bitmap,
    error::{NTTError, Result},
};

use super::{rate_limit::RateLimitState, release::ReleaseStatus};

/// One entry of the attestation ledger, keyed by message digest. Entries are
/// never removed: a released entry is what makes redeeming the same message
/// again a no-op.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InboxItem {
    pub source_chain: ChainId,
    pub amount: TrimmedAmount,
    pub recipient_address: [u8; 32],
    pub votes: Bitmap,
    /// Set once the threshold is first met and never cleared, so a later
    /// threshold increase or transceiver removal cannot revoke an approval.
    pub approved: bool,
    pub release_status: ReleaseStatus,
}

impl InboxItem {
    pub fn new(source_chain: ChainId, amount: TrimmedAmount, recipient_address: [u8; 32]) -> Self {
        Self {
            source_chain,
            amount,
            recipient_address,
            votes: Bitmap::new(),
            approved: false,
            release_status: ReleaseStatus::NotApproved,
        }
    }

    /// Records the vote of transceiver `transceiver_id` and returns the number
    /// of votes so far.
    pub fn attest(&mut self, transceiver_id: u8) -> Result<u8> {
        if self.votes.get(transceiver_id)? {
            return Err(NTTError::AlreadyAttested);
        }
        self.votes.set(transceiver_id, true)?;
        Ok(self.votes.count_ones())
    }

    /// Approves the item if the enabled votes reach `threshold`. Returns
    /// whether the item is approved, now or from before.
    pub fn try_approve(&mut self, threshold: u8, enabled: Bitmap) -> bool {
        if !self.approved && threshold > 0 && self.votes.count_enabled_votes(enabled) >= threshold
        {
            self.approved = true;
            self.release_status = ReleaseStatus::Initiated;
        }
        self.approved
    }

    pub fn is_approved(&self) -> bool {
        self.approved
    }
}

/// Inbound rate limit for one source chain.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InboxRateLimit {
    pub rate_limit: RateLimitState,
}

impl Deref for InboxRateLimit {
    type Target = RateLimitState;
    fn deref(&self) -> &Self::Target {
        &self.rate_limit
    }
}

impl DerefMut for InboxRateLimit {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.rate_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> InboxItem {
        InboxItem::new(ChainId { id: 2 }, TrimmedAmount::new(10, 8), [1; 32])
    }

    #[test]
    fn test_attest_counts_and_rejects_duplicates() {
        let mut item = item();
        assert_eq!(item.attest(0), Ok(1));
        assert_eq!(item.attest(3), Ok(2));
        assert_eq!(item.attest(0), Err(NTTError::AlreadyAttested));
        assert_eq!(item.attest(200), Err(NTTError::BitmapIndexOutOfBounds));
    }

    #[test]
    fn test_approval_is_monotonic() {
        let enabled = Bitmap::from_value(0b111);
        let mut item = item();
        item.attest(0).unwrap();
        assert!(!item.try_approve(2, enabled));
        assert_eq!(item.release_status, ReleaseStatus::NotApproved);
        item.attest(1).unwrap();
        assert!(item.try_approve(2, enabled));
        assert_eq!(item.release_status, ReleaseStatus::Initiated);

        // raising the threshold or disabling a voter later changes nothing
        assert!(item.try_approve(3, enabled));
        assert!(item.try_approve(3, Bitmap::from_value(0b100)));
        assert!(item.is_approved());
    }

    #[test]
    fn test_votes_of_disabled_transceivers_do_not_count() {
        let mut item = item();
        item.attest(0).unwrap();
        item.attest(1).unwrap();
        assert!(!item.try_approve(2, Bitmap::from_value(0b01)));
    }

    #[test]
    fn test_zero_threshold_never_approves() {
        let mut item = item();
        assert!(!item.try_approve(0, Bitmap::from_value(u128::MAX)));
    }
}
