use borsh::{BorshDeserialize, BorshSerialize};
use ntt_messages::trimmed_amount::TrimmedAmount;

use crate::{
    clock::UnixTimestamp,
    error::{NTTError, Result},
};

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RateLimitState {
    /// The maximum capacity of the rate limiter.
    limit: TrimmedAmount,
    /// The capacity of the rate limiter at `last_tx_timestamp`.
    /// The actual current capacity is calculated in `capacity_at`, by
    /// accounting for the time that has passed since `last_tx_timestamp` and
    /// the refill rate.
    capacity_at_last_tx: TrimmedAmount,
    /// The timestamp of the last transaction that counted towards the current
    /// capacity. Transactions that exceeded the capacity do not count, they are
    /// just delayed.
    last_tx_timestamp: UnixTimestamp,
    /// Seconds it takes to refill from empty to `limit`.
    duration: UnixTimestamp,
}

/// The result of attempting to consume from a rate limiter.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RateLimitResult {
    /// If the rate limit is not exceeded, the transfer is immediate,
    /// and the capacity is reduced.
    Consumed(UnixTimestamp),
    /// If the rate limit is exceeded, the transfer is delayed until the
    /// given timestamp.
    Delayed(UnixTimestamp),
}

impl RateLimitState {
    pub const RATE_LIMIT_DURATION: UnixTimestamp = 60 * 60 * 24; // 24 hours

    pub fn new(limit: TrimmedAmount, now: UnixTimestamp, duration: UnixTimestamp) -> Self {
        Self {
            limit,
            capacity_at_last_tx: limit,
            last_tx_timestamp: now,
            duration,
        }
    }

    pub fn limit(&self) -> TrimmedAmount {
        self.limit
    }

    pub fn duration(&self) -> UnixTimestamp {
        self.duration
    }

    pub fn last_tx_timestamp(&self) -> UnixTimestamp {
        self.last_tx_timestamp
    }

    /// Returns the capacity of the rate limiter at `now`.
    pub fn capacity_at(&self, now: UnixTimestamp) -> TrimmedAmount {
        let limit = u128::from(self.limit.amount);
        let TrimmedAmount {
            amount: capacity_at_last_tx,
            decimals,
        } = self.capacity_at_last_tx;

        // morally this is
        // capacity = old_capacity + (limit / rate_limit_duration) * time_passed
        //
        // but we instead write it as
        // capacity = old_capacity + (limit * time_passed) / rate_limit_duration
        // as it has better numerical stability. A clock that went backwards
        // refills nothing, and a product that overflows u128 means the bucket
        // has long been full.
        let time_passed = u128::try_from(now.saturating_sub(self.last_tx_timestamp)).unwrap_or(0);
        let calculated_capacity = match u128::try_from(self.duration) {
            Ok(duration) if duration > 0 => time_passed
                .checked_mul(limit)
                .map(|refill| u128::from(capacity_at_last_tx).saturating_add(refill / duration))
                .unwrap_or(limit),
            _ => limit,
        };

        // bounded by the u64 limit
        let capacity = u64::try_from(calculated_capacity.min(limit)).unwrap_or(self.limit.amount);
        TrimmedAmount::new(capacity, decimals)
    }

    /// Computes the timestamp at which the given amount can be consumed.
    /// If it fits within the current capacity, the current timestamp is
    /// returned, and the remaining capacity is reduced.
    /// Otherwise, the timestamp at which the capacity will be available is
    /// returned and nothing is consumed.
    pub fn consume_or_delay(
        &mut self,
        amount: TrimmedAmount,
        now: UnixTimestamp,
    ) -> Result<RateLimitResult> {
        let capacity = self.capacity_at(now);
        match capacity.checked_sub(amount)? {
            Some(remaining) => {
                self.capacity_at_last_tx = remaining;
                self.last_tx_timestamp = now;
                Ok(RateLimitResult::Consumed(now))
            }
            None => Ok(RateLimitResult::Delayed(self.delay_from(now))),
        }
    }

    /// Like [`RateLimitState::consume_or_delay`], except that a full bucket
    /// always admits the transfer, draining it completely. Matured queue items
    /// use this so that an amount above the limit is not stuck forever.
    pub fn consume_queued(
        &mut self,
        amount: TrimmedAmount,
        now: UnixTimestamp,
    ) -> Result<RateLimitResult> {
        let capacity = self.capacity_at(now);
        if capacity.checked_sub(amount)?.is_none() && capacity.amount == self.limit.amount {
            self.capacity_at_last_tx = TrimmedAmount::zero(capacity.decimals);
            self.last_tx_timestamp = now;
            return Ok(RateLimitResult::Consumed(now));
        }
        self.consume_or_delay(amount, now)
    }

    /// Refills the capacity by the given amount.
    /// This is used to replenish the capacity via backflows.
    pub fn refill(&mut self, amount: TrimmedAmount, now: UnixTimestamp) -> Result<()> {
        let capacity = self.capacity_at(now);
        let amount = amount.change_decimals(capacity.decimals)?;
        let refilled = capacity
            .amount
            .saturating_add(amount.amount)
            .min(self.limit.amount);
        self.capacity_at_last_tx = TrimmedAmount::new(refilled, capacity.decimals);
        self.last_tx_timestamp = now;
        Ok(())
    }

    /// Changes the limit, clamping the current capacity to it right away.
    pub fn set_limit(&mut self, limit: TrimmedAmount, now: UnixTimestamp) -> Result<()> {
        let current_capacity = self.capacity_at(now).change_decimals(limit.decimals)?;
        self.limit = limit;
        self.capacity_at_last_tx = TrimmedAmount::new(
            current_capacity.amount.min(limit.amount),
            limit.decimals,
        );
        self.last_tx_timestamp = now;
        Ok(())
    }

    pub fn set_duration(&mut self, duration: UnixTimestamp, now: UnixTimestamp) -> Result<()> {
        if duration <= 0 {
            return Err(NTTError::InvalidRateLimitDuration);
        }
        self.capacity_at_last_tx = self.capacity_at(now);
        self.last_tx_timestamp = now;
        self.duration = duration;
        Ok(())
    }

    fn delay_from(&self, now: UnixTimestamp) -> UnixTimestamp {
        now.saturating_add(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: UnixTimestamp = RateLimitState::RATE_LIMIT_DURATION;

    fn amount(amount: u64) -> TrimmedAmount {
        TrimmedAmount::new(amount, 8)
    }

    #[test]
    fn test_rate_limit() {
        let now = 1_000;
        let mut rate_limit_state = RateLimitState::new(amount(100_000), now, DAY);

        // consume 30k. should be immediate
        let immediately = rate_limit_state.consume_or_delay(amount(30_000), now).unwrap();

        assert_eq!(immediately, RateLimitResult::Consumed(now));
        assert_eq!(rate_limit_state.capacity_at(now), amount(70_000));
        assert_eq!(rate_limit_state.limit(), amount(100_000)); // unchanged
        assert_eq!(rate_limit_state.last_tx_timestamp(), now);

        // replenish 1/4 of the limit, i.e. 25k
        let now = now + DAY / 4;
        assert_eq!(rate_limit_state.capacity_at(now), amount(70_000 + 25_000));

        // now consume 150k. should be delayed
        let tomorrow = rate_limit_state.consume_or_delay(amount(150_000), now).unwrap();
        assert_eq!(tomorrow, RateLimitResult::Delayed(now + DAY));

        // the capacity is not changed, since the tx was delayed
        assert_eq!(rate_limit_state.capacity_at(now), amount(95_000));

        // lowering the limit clamps the capacity immediately
        rate_limit_state.set_limit(amount(50_000), now).unwrap();
        assert_eq!(rate_limit_state.capacity_at(now), amount(50_000));

        // raising it again does not hand out capacity for free
        rate_limit_state.set_limit(amount(100_000), now).unwrap();
        assert_eq!(rate_limit_state.capacity_at(now), amount(50_000));

        // now refill 2k
        rate_limit_state.refill(amount(2_000), now).unwrap();
        assert_eq!(rate_limit_state.capacity_at(now), amount(52_000));

        // refills saturate at the limit
        rate_limit_state.refill(amount(70_000), now).unwrap();
        assert_eq!(rate_limit_state.capacity_at(now), amount(100_000));
    }

    #[test]
    fn test_exact_limit_then_one_more() {
        let now = 0;
        let mut state = RateLimitState::new(amount(1_000), now, DAY);
        assert_eq!(
            state.consume_or_delay(amount(600), now).unwrap(),
            RateLimitResult::Consumed(now)
        );
        assert_eq!(
            state.consume_or_delay(amount(400), now).unwrap(),
            RateLimitResult::Consumed(now)
        );
        assert_eq!(
            state.consume_or_delay(amount(1), now).unwrap(),
            RateLimitResult::Delayed(now + DAY)
        );
        assert!(state.capacity_at(now).is_zero());
    }

    #[test]
    fn test_full_refill_after_duration() {
        let mut state = RateLimitState::new(amount(1_000), 0, DAY);
        state.consume_or_delay(amount(1_000), 0).unwrap();
        assert_eq!(state.capacity_at(DAY / 2), amount(500));
        assert_eq!(state.capacity_at(DAY), amount(1_000));
        assert_eq!(state.capacity_at(10 * DAY), amount(1_000));
    }

    #[test]
    fn test_capacity_does_not_overflow() {
        let mut state = RateLimitState::new(amount(u64::MAX), 0, DAY);
        state.consume_or_delay(amount(u64::MAX), 0).unwrap();
        assert_eq!(state.capacity_at(i64::MAX), amount(u64::MAX));
        // a clock that moved backwards refills nothing
        assert_eq!(state.capacity_at(-5), amount(0));
    }

    #[test]
    fn test_amounts_are_rescaled_to_the_limit() {
        let mut state = RateLimitState::new(amount(1_000), 0, DAY);
        // 6 decimals: 5 units of 10^-6 are 500 units of 10^-8
        state
            .consume_or_delay(TrimmedAmount::new(5, 6), 0)
            .unwrap();
        assert_eq!(state.capacity_at(0), amount(500));
    }

    #[test]
    fn test_queued_consumption_drains_a_full_bucket() {
        let mut state = RateLimitState::new(amount(1_000), 0, DAY);
        assert_eq!(
            state.consume_queued(amount(5_000), 0).unwrap(),
            RateLimitResult::Consumed(0)
        );
        assert!(state.capacity_at(0).is_zero());
        // not full anymore, so the next one waits
        assert_eq!(
            state.consume_queued(amount(5_000), 10).unwrap(),
            RateLimitResult::Delayed(10 + DAY)
        );
    }

    #[test]
    fn test_set_duration() {
        let mut state = RateLimitState::new(amount(1_000), 0, DAY);
        assert_eq!(
            state.set_duration(0, 0),
            Err(NTTError::InvalidRateLimitDuration)
        );
        state.consume_or_delay(amount(1_000), 0).unwrap();
        state.set_duration(100, 0).unwrap();
        assert_eq!(state.capacity_at(50), amount(500));
    }
}
