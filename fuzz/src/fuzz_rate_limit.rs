use honggfuzz::fuzz;
use native_token_transfers::queue::rate_limit::RateLimitState;
use ntt_messages::trimmed_amount::TrimmedAmount;

const DURATION: i64 = 86_400;

fn main() {
    loop {
        fuzz!(|input: (u64, u64, u64, u64, u32)| {
            let (limit, new_limit, consumed, refilled, elapsed) = input;
            let elapsed = i64::from(elapsed);

            let mut rls = RateLimitState::new(TrimmedAmount::new(limit, 8), 0, DURATION);
            if rls.consume_or_delay(TrimmedAmount::new(consumed, 8), 0).is_err() {
                return;
            }
            assert!(rls.capacity_at(elapsed).amount() <= limit);

            if rls.set_limit(TrimmedAmount::new(new_limit, 8), elapsed).is_err() {
                return;
            }
            assert!(rls.capacity_at(elapsed).amount() <= new_limit);

            if rls.refill(TrimmedAmount::new(refilled, 8), elapsed).is_err() {
                return;
            }
            assert!(rls.capacity_at(elapsed + DURATION).amount() <= new_limit);
        });
    }
}
