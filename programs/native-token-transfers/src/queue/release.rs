//! The release state machine shared by inbound and outbound transfers.
//!
//! A transfer moves forward through [`ReleaseStatus`] and never backwards.
//! There is no scheduler: [`ReleaseStatus::advance`] is called by whoever
//! submits the next operation for the transfer, as often as they like, and it
//! re-checks the rate limiter every time.

use borsh::{BorshDeserialize, BorshSerialize};
use ntt_messages::trimmed_amount::TrimmedAmount;

use crate::{
    clock::UnixTimestamp,
    error::{NTTError, Result},
};

use super::rate_limit::{RateLimitResult, RateLimitState};

#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseStatus {
    /// Inbound only: the attestation threshold has not been reached yet.
    NotApproved,
    /// Eligible for release, the rate limiter has not been consulted yet.
    Initiated,
    /// Capacity was insufficient. Capacity is not reserved while queued, it is
    /// consumed when the transfer is finally released.
    Queued(UnixTimestamp),
    Released,
}

/// What a call to [`ReleaseStatus::advance`] achieved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Capacity was consumed just now.
    Released,
    /// The transfer waits until the given timestamp.
    Queued(UnixTimestamp),
    /// The transfer had been released by an earlier call.
    AlreadyReleased,
}

/// The rate limiters touched by a release: the one the amount is taken from,
/// and the one on the opposite direction that gets the same amount back.
pub struct Limiters<'a> {
    pub consume: &'a mut RateLimitState,
    pub backflow: Option<&'a mut RateLimitState>,
}

impl ReleaseStatus {
    pub fn release_timestamp(&self) -> Option<UnixTimestamp> {
        match self {
            ReleaseStatus::Queued(release_timestamp) => Some(*release_timestamp),
            _ => None,
        }
    }

    pub fn is_released(&self) -> bool {
        *self == ReleaseStatus::Released
    }

    /// Moves the transfer forward as far as `now` and the rate limiter allow.
    ///
    /// When `queue` is false, a transfer that does not fit the current capacity
    /// fails with [`NTTError::TransferExceedsRateLimit`] instead of being
    /// queued.
    pub fn advance(
        &mut self,
        amount: TrimmedAmount,
        now: UnixTimestamp,
        limiters: Limiters<'_>,
        queue: bool,
    ) -> Result<Advance> {
        let result = match *self {
            ReleaseStatus::NotApproved => return Err(NTTError::TransferNotApproved),
            ReleaseStatus::Released => return Ok(Advance::AlreadyReleased),
            ReleaseStatus::Queued(release_timestamp) if release_timestamp > now => {
                return Ok(Advance::Queued(release_timestamp))
            }
            ReleaseStatus::Queued(_) => limiters.consume.consume_queued(amount, now)?,
            ReleaseStatus::Initiated => limiters.consume.consume_or_delay(amount, now)?,
        };

        match result {
            RateLimitResult::Consumed(_) => {
                if let Some(backflow) = limiters.backflow {
                    backflow.refill(amount, now)?;
                }
                *self = ReleaseStatus::Released;
                Ok(Advance::Released)
            }
            RateLimitResult::Delayed(release_timestamp) => {
                if !queue && *self == ReleaseStatus::Initiated {
                    return Err(NTTError::TransferExceedsRateLimit);
                }
                *self = ReleaseStatus::Queued(release_timestamp);
                Ok(Advance::Queued(release_timestamp))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: UnixTimestamp = RateLimitState::RATE_LIMIT_DURATION;

    fn amount(amount: u64) -> TrimmedAmount {
        TrimmedAmount::new(amount, 8)
    }

    fn limiters<'a>(
        consume: &'a mut RateLimitState,
        backflow: &'a mut RateLimitState,
    ) -> Limiters<'a> {
        Limiters {
            consume,
            backflow: Some(backflow),
        }
    }

    #[test]
    fn test_immediate_release_refills_backflow() {
        let mut outbound = RateLimitState::new(amount(100), 0, DAY);
        let mut inbound = RateLimitState::new(amount(100), 0, DAY);
        inbound.consume_or_delay(amount(60), 0).unwrap();

        let mut status = ReleaseStatus::Initiated;
        let advance = status
            .advance(amount(50), 0, limiters(&mut outbound, &mut inbound), false)
            .unwrap();
        assert_eq!(advance, Advance::Released);
        assert_eq!(status, ReleaseStatus::Released);
        assert_eq!(outbound.capacity_at(0), amount(50));
        assert_eq!(inbound.capacity_at(0), amount(90));

        // releasing again is a no-op
        let again = status
            .advance(amount(50), 0, limiters(&mut outbound, &mut inbound), false)
            .unwrap();
        assert_eq!(again, Advance::AlreadyReleased);
        assert_eq!(outbound.capacity_at(0), amount(50));
    }

    #[test]
    fn test_queue_then_release_after_delay() {
        let mut outbound = RateLimitState::new(amount(100), 0, DAY);
        let mut inbound = RateLimitState::new(amount(100), 0, DAY);
        let mut status = ReleaseStatus::Initiated;

        assert_eq!(
            status
                .advance(amount(101), 0, limiters(&mut outbound, &mut inbound), false)
                .unwrap_err(),
            NTTError::TransferExceedsRateLimit
        );
        assert_eq!(status, ReleaseStatus::Initiated);

        // 80 fits, so nothing is queued even though queueing is allowed
        assert_eq!(
            status
                .advance(amount(80), 10, limiters(&mut outbound, &mut inbound), true)
                .unwrap(),
            Advance::Released
        );

        let mut status = ReleaseStatus::Initiated;
        assert_eq!(
            status
                .advance(amount(30), 10, limiters(&mut outbound, &mut inbound), true)
                .unwrap(),
            Advance::Queued(10 + DAY)
        );
        // capacity is not reserved while queued
        assert_eq!(outbound.capacity_at(10), amount(20));

        // too early
        assert_eq!(
            status
                .advance(amount(30), DAY, limiters(&mut outbound, &mut inbound), true)
                .unwrap(),
            Advance::Queued(10 + DAY)
        );

        assert_eq!(
            status
                .advance(amount(30), 10 + DAY, limiters(&mut outbound, &mut inbound), true)
                .unwrap(),
            Advance::Released
        );
        assert_eq!(outbound.capacity_at(10 + DAY), amount(70));
    }

    #[test]
    fn test_matured_item_is_delayed_again_without_capacity() {
        let mut outbound = RateLimitState::new(amount(100), 0, DAY);
        let mut status = ReleaseStatus::Queued(5);
        // someone else drained the bucket just before
        outbound.consume_or_delay(amount(100), 5).unwrap();
        let advance = status
            .advance(
                amount(50),
                5,
                Limiters {
                    consume: &mut outbound,
                    backflow: None,
                },
                false,
            )
            .unwrap();
        assert_eq!(advance, Advance::Queued(5 + DAY));
        assert_eq!(status, ReleaseStatus::Queued(5 + DAY));
    }

    #[test]
    fn test_not_approved_cannot_advance() {
        let mut limiter = RateLimitState::new(amount(100), 0, DAY);
        let mut status = ReleaseStatus::NotApproved;
        assert_eq!(
            status.advance(
                amount(1),
                0,
                Limiters {
                    consume: &mut limiter,
                    backflow: None
                },
                true
            ),
            Err(NTTError::TransferNotApproved)
        );
    }
}
