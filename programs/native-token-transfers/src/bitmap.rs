use bitmaps::Bitmap as BM;
use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::NTTError;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, BorshSerialize, BorshDeserialize)]
pub struct Bitmap {
    map: u128,
}

impl Bitmap {
    pub const BITS: u8 = 128;

    pub fn new() -> Self {
        Bitmap { map: 0 }
    }

    pub fn from_value(value: u128) -> Self {
        Bitmap { map: value }
    }

    pub fn value(self) -> u128 {
        self.map
    }

    pub fn set(&mut self, index: u8, value: bool) -> Result<(), NTTError> {
        if index >= Self::BITS {
            return Err(NTTError::BitmapIndexOutOfBounds);
        }
        let mut bm = BM::<128>::from_value(self.map);
        bm.set(usize::from(index), value);
        self.map = *bm.as_value();
        Ok(())
    }

    pub fn get(&self, index: u8) -> Result<bool, NTTError> {
        if index >= Self::BITS {
            return Err(NTTError::BitmapIndexOutOfBounds);
        }
        Ok(BM::<128>::from_value(self.map).get(usize::from(index)))
    }

    /// Number of bits set in both `self` and `enabled`.
    pub fn count_enabled_votes(&self, enabled: Bitmap) -> u8 {
        Self::from_value(self.map & enabled.map).count_ones()
    }

    pub fn count_ones(self) -> u8 {
        // at most 128 bits are set
        u8::try_from(BM::<128>::from_value(self.map).len()).unwrap_or(Self::BITS)
    }

    /// Whether every bit set in `other` is also set in `self`.
    pub fn contains_all(self, other: Bitmap) -> bool {
        self.map & other.map == other.map
    }

    pub fn len(self) -> usize {
        BM::<128>::from_value(self.map).len()
    }

    pub fn is_empty(self) -> bool {
        BM::<128>::from_value(self.map).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap() {
        let mut enabled = Bitmap::from_value(u128::MAX);
        let mut bm = Bitmap::new();
        assert_eq!(bm.count_enabled_votes(enabled), 0);
        bm.set(0, true).unwrap();
        assert_eq!(bm.count_enabled_votes(enabled), 1);
        assert!(bm.get(0).unwrap());
        assert!(!bm.get(1).unwrap());
        bm.set(1, true).unwrap();
        assert_eq!(bm.count_enabled_votes(enabled), 2);
        bm.set(0, false).unwrap();
        assert_eq!(bm.count_enabled_votes(enabled), 1);
        assert!(!bm.get(0).unwrap());
        bm.set(18, true).unwrap();
        assert_eq!(bm.count_enabled_votes(enabled), 2);

        enabled.set(18, false).unwrap();
        assert_eq!(bm.count_enabled_votes(enabled), 1);
        assert_eq!(bm.count_ones(), 2);
    }

    #[test]
    fn test_bitmap_full() {
        let max_bitmap = Bitmap::from_value(u128::MAX);
        assert_eq!(128, max_bitmap.count_enabled_votes(max_bitmap));
        assert_eq!(128, max_bitmap.len());
    }

    #[test]
    fn test_contains_all() {
        let released = Bitmap::from_value(0b1011);
        assert!(released.contains_all(Bitmap::from_value(0b0011)));
        assert!(!released.contains_all(Bitmap::from_value(0b0111)));
        assert!(released.contains_all(Bitmap::new()));
    }

    #[test]
    fn test_bitmap_out_of_bounds() {
        let mut bm = Bitmap::new();
        assert_eq!(bm.get(128), Err(NTTError::BitmapIndexOutOfBounds));
        assert_eq!(bm.set(129, false), Err(NTTError::BitmapIndexOutOfBounds));
    }
}
