use honggfuzz::fuzz;
use ntt_messages::trimmed_amount::{TrimmedAmount, TRIMMED_DECIMALS};

fn main() {
    loop {
        fuzz!(|input: (u64, u8, u8)| {
            let (amount, from_decimals, to_decimals) = input;

            let Ok(trimmed) = TrimmedAmount::trim(amount, from_decimals, to_decimals) else {
                return;
            };
            assert!(trimmed.decimals() <= TRIMMED_DECIMALS);
            assert!(trimmed.decimals() <= from_decimals.max(to_decimals));

            // trimming only ever drops dust
            if let Ok(untrimmed) = trimmed.untrim(from_decimals) {
                assert!(untrimmed <= amount);
            }
        });
    }
}
