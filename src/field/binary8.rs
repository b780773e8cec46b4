use super::Field;
use rand::Rng;

/// x^8 + x^4 + x^3 + x^2 + 1, the reduction polynomial for GF(2^8).
const PRIM: u16 = 0x11D;

/// Log/antilog tables built at compile time. The exponent table is doubled
/// so products of two logs index it without a modular reduction.
const fn build_tables() -> ([u8; 512], [u8; 256]) {
    let mut exp = [0u8; 512];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIM;
        }
        i += 1;
    }
    let mut j = 255;
    while j < 512 {
        exp[j] = exp[j - 255];
        j += 1;
    }
    (exp, log)
}

const TABLES: ([u8; 512], [u8; 256]) = build_tables();
const EXP: [u8; 512] = TABLES.0;
const LOG: [u8; 256] = TABLES.1;

/// An element of GF(2^8) reduced by the 0x11D polynomial.
///
/// Addition is XOR; multiplication and inversion go through the log/antilog
/// tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binary8(u8);

impl Field for Binary8 {
    const ZERO: Self = Binary8(0);
    const ONE: Self = Binary8(1);
    const BITS: usize = 8;

    #[inline]
    fn from_byte(byte: u8) -> Self {
        Binary8(byte)
    }

    #[inline]
    fn to_byte(self) -> u8 {
        self.0
    }

    #[inline]
    fn add(self, other: Self) -> Self {
        Binary8(self.0 ^ other.0)
    }

    #[inline]
    fn mul(self, other: Self) -> Self {
        if self.0 == 0 || other.0 == 0 {
            return Self::ZERO;
        }
        let la = LOG[self.0 as usize] as usize;
        let lb = LOG[other.0 as usize] as usize;
        Binary8(EXP[la + lb])
    }

    #[inline]
    fn invert(self) -> Option<Self> {
        if self.0 == 0 {
            return None;
        }
        Some(Binary8(EXP[255 - LOG[self.0 as usize] as usize]))
    }

    #[inline]
    fn mul_byte(self, byte: u8) -> u8 {
        self.mul(Binary8(byte)).0
    }

    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Binary8(rng.gen())
    }
}
