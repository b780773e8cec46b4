use super::Field;
use rand::Rng;

/// An element of GF(2).
///
/// Addition is XOR; multiplication is AND; the only invertible element is
/// one, which is its own inverse. Stored as a `u8` holding 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binary(u8);

impl Field for Binary {
    const ZERO: Self = Binary(0);
    const ONE: Self = Binary(1);
    const BITS: usize = 1;

    #[inline]
    fn from_byte(byte: u8) -> Self {
        Binary(byte & 1)
    }

    #[inline]
    fn to_byte(self) -> u8 {
        self.0
    }

    #[inline]
    fn add(self, other: Self) -> Self {
        Binary(self.0 ^ other.0)
    }

    #[inline]
    fn mul(self, other: Self) -> Self {
        Binary(self.0 & other.0)
    }

    #[inline]
    fn invert(self) -> Option<Self> {
        if self.0 == 0 {
            None
        } else {
            Some(Self::ONE)
        }
    }

    #[inline]
    fn mul_byte(self, byte: u8) -> u8 {
        if self.0 == 0 {
            0
        } else {
            byte
        }
    }

    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Binary(rng.gen::<u8>() & 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_xor() {
        assert_eq!(Binary::ZERO.add(Binary::ZERO), Binary::ZERO);
        assert_eq!(Binary::ZERO.add(Binary::ONE), Binary::ONE);
        assert_eq!(Binary::ONE.add(Binary::ZERO), Binary::ONE);
        assert_eq!(Binary::ONE.add(Binary::ONE), Binary::ZERO);
    }

    #[test]
    fn test_mul_is_and() {
        assert_eq!(Binary::ONE.mul(Binary::ONE), Binary::ONE);
        assert_eq!(Binary::ONE.mul(Binary::ZERO), Binary::ZERO);
        assert_eq!(Binary::ZERO.mul(Binary::ZERO), Binary::ZERO);
    }

    #[test]
    fn test_invert() {
        assert_eq!(Binary::ONE.invert(), Some(Binary::ONE));
        assert_eq!(Binary::ZERO.invert(), None);
    }

    #[test]
    fn test_from_byte_reduces() {
        assert_eq!(Binary::from_byte(0xFE), Binary::ZERO);
        assert_eq!(Binary::from_byte(0xFF), Binary::ONE);
    }

    #[test]
    fn test_mul_byte() {
        assert_eq!(Binary::ONE.mul_byte(0xA5), 0xA5);
        assert_eq!(Binary::ZERO.mul_byte(0xA5), 0);
    }
}
