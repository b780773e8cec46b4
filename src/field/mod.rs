//! Finite-field arithmetic for network coding.
//!
//! All coding layers are generic over [`Field`]. Two fields are provided:
//! [`Binary`] (GF(2), one bit per coefficient) and [`Binary8`] (GF(2^8),
//! one byte per coefficient, log/antilog tables over the 0x11D polynomial).

mod binary;
mod binary8;

pub use binary::Binary;
pub use binary8::Binary8;

use rand::Rng;
use std::fmt::Debug;

/// A finite-field element usable as an encoding-vector coefficient.
///
/// Addition and multiplication are total; only `invert` has an undefined
/// input (zero), reported as `None`. Both provided fields have
/// characteristic 2, so addition doubles as subtraction.
pub trait Field: Copy + Clone + Debug + PartialEq + Eq + Send + Sync + 'static {
    /// The additive identity.
    const ZERO: Self;

    /// The multiplicative identity.
    const ONE: Self;

    /// Wire width of one coefficient in bits (1 for GF(2), 8 for GF(2^8)).
    const BITS: usize;

    /// Build an element from a byte, reducing it into the element range.
    fn from_byte(byte: u8) -> Self;

    /// The element's canonical byte representation.
    fn to_byte(self) -> u8;

    /// Field addition.
    #[must_use]
    fn add(self, other: Self) -> Self;

    /// Field multiplication.
    #[must_use]
    fn mul(self, other: Self) -> Self;

    /// Multiplicative inverse, `None` for the zero element.
    fn invert(self) -> Option<Self>;

    /// Scale a raw data byte by this coefficient.
    ///
    /// Symbol buffers store packed data, not field elements, so scaling a
    /// symbol goes through this instead of `from_byte`/`mul`/`to_byte`
    /// round trips. For GF(2) the byte is either kept or zeroed; for
    /// GF(2^8) each byte is an element and is multiplied directly.
    fn mul_byte(self, byte: u8) -> u8;

    /// Draw an element uniformly from the full field, zero included.
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Whether this is the zero element.
    #[inline]
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

/// Number of bytes a packed vector of `symbols` coefficients occupies.
#[inline]
pub fn packed_len<F: Field>(symbols: usize) -> usize {
    (symbols * F::BITS + 7) / 8
}

/// Pack a coefficient vector into bytes, `F::BITS` bits per coefficient,
/// least-significant bits first.
pub fn pack_coefficients<F: Field>(coefficients: &[F]) -> Vec<u8> {
    let mut out = Vec::with_capacity(packed_len::<F>(coefficients.len()));
    let mut acc: u16 = 0;
    let mut filled = 0;

    for coeff in coefficients {
        acc |= (coeff.to_byte() as u16) << filled;
        filled += F::BITS;
        while filled >= 8 {
            out.push(acc as u8);
            acc >>= 8;
            filled -= 8;
        }
    }
    if filled > 0 {
        out.push(acc as u8);
    }
    out
}

/// Unpack `symbols` coefficients from bytes written by [`pack_coefficients`].
///
/// Returns `None` if `bytes` is shorter than the packed length.
pub fn unpack_coefficients<F: Field>(bytes: &[u8], symbols: usize) -> Option<Vec<F>> {
    if bytes.len() < packed_len::<F>(symbols) {
        return None;
    }

    let mask: u16 = if F::BITS >= 8 { 0xFF } else { (1 << F::BITS) - 1 };
    let mut out = Vec::with_capacity(symbols);
    let mut acc: u16 = 0;
    let mut filled = 0;
    let mut next = bytes.iter();

    for _ in 0..symbols {
        while filled < F::BITS {
            acc |= (*next.next()? as u16) << filled;
            filled += 8;
        }
        out.push(F::from_byte((acc & mask) as u8));
        acc >>= F::BITS;
        filled -= F::BITS;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_len() {
        assert_eq!(packed_len::<Binary>(8), 1);
        assert_eq!(packed_len::<Binary>(9), 2);
        assert_eq!(packed_len::<Binary>(42), 6);
        assert_eq!(packed_len::<Binary8>(8), 8);
        assert_eq!(packed_len::<Binary8>(42), 42);
    }

    #[test]
    fn test_pack_unpack_binary() {
        let coeffs: Vec<Binary> = [1u8, 0, 1, 1, 0, 0, 1, 0, 1, 1]
            .iter()
            .map(|&b| Binary::from_byte(b))
            .collect();
        let packed = pack_coefficients(&coeffs);
        assert_eq!(packed.len(), 2);
        assert_eq!(packed[0], 0b0100_1101);
        assert_eq!(packed[1], 0b0000_0011);

        let unpacked = unpack_coefficients::<Binary>(&packed, coeffs.len()).unwrap();
        assert_eq!(unpacked, coeffs);
    }

    #[test]
    fn test_pack_unpack_binary8() {
        let coeffs: Vec<Binary8> = (0..=255u8).map(Binary8::from_byte).collect();
        let packed = pack_coefficients(&coeffs);
        assert_eq!(packed.len(), 256);

        let unpacked = unpack_coefficients::<Binary8>(&packed, coeffs.len()).unwrap();
        assert_eq!(unpacked, coeffs);
    }

    #[test]
    fn test_unpack_short_input() {
        assert!(unpack_coefficients::<Binary8>(&[1, 2, 3], 4).is_none());
        assert!(unpack_coefficients::<Binary>(&[], 1).is_none());
    }
}
