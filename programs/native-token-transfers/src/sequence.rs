use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::{NTTError, Result};

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence {
    pub sequence: u64,
}

impl Sequence {
    pub fn next(&mut self) -> Result<u64> {
        let next = self.sequence;
        self.sequence = next.checked_add(1).ok_or(NTTError::SequenceOverflow)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let mut sequence = Sequence::default();
        assert_eq!(sequence.next(), Ok(0));
        assert_eq!(sequence.next(), Ok(1));
        sequence.sequence = u64::MAX;
        assert_eq!(sequence.next(), Err(NTTError::SequenceOverflow));
    }
}
