//! Packet wire format.
//!
//! A payload is either a coded packet — the packed encoding vector
//! (`max_symbols` coefficients at the field's wire width) followed by the
//! coded symbol — or a systematic packet, which uses the shorter
//! index-plus-raw-bytes representation. A systematic packet is equivalent
//! to a coded packet whose vector is the standard basis vector for its
//! index, and the decoder treats it as exactly that.

use crate::coding::traits::CodingError;
use crate::field::{pack_coefficients, packed_len, unpack_coefficients, Field};

const TAG_CODED: u8 = 0;
const TAG_SYSTEMATIC: u8 = 1;

/// A parsed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<F: Field> {
    /// An uncoded original symbol with its slot index.
    Systematic {
        /// Slot index of the symbol.
        index: usize,
        /// The raw symbol bytes.
        symbol: Vec<u8>,
    },
    /// A linear combination of original symbols.
    Coded {
        /// One coefficient per symbol slot of the generation.
        coefficients: Vec<F>,
        /// The combined symbol bytes.
        symbol: Vec<u8>,
    },
}

impl<F: Field> Payload<F> {
    /// Serialize into wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Payload::Systematic { index, symbol } => {
                let mut out = Vec::with_capacity(1 + 4 + symbol.len());
                out.push(TAG_SYSTEMATIC);
                out.extend_from_slice(&(*index as u32).to_le_bytes());
                out.extend_from_slice(symbol);
                out
            }
            Payload::Coded {
                coefficients,
                symbol,
            } => {
                let mut out =
                    Vec::with_capacity(1 + packed_len::<F>(coefficients.len()) + symbol.len());
                out.push(TAG_CODED);
                out.extend_from_slice(&pack_coefficients(coefficients));
                out.extend_from_slice(symbol);
                out
            }
        }
    }

    /// Parse a payload produced for a generation with the given shape.
    pub fn from_bytes(
        bytes: &[u8],
        max_symbols: usize,
        symbol_size: usize,
    ) -> Result<Self, CodingError> {
        let (&tag, rest) = bytes
            .split_first()
            .ok_or(CodingError::InvalidPayloadFormat)?;

        match tag {
            TAG_SYSTEMATIC => {
                if rest.len() != 4 + symbol_size {
                    return Err(CodingError::InvalidPayloadFormat);
                }
                let mut index_bytes = [0u8; 4];
                index_bytes.copy_from_slice(&rest[..4]);
                let index = u32::from_le_bytes(index_bytes) as usize;
                if index >= max_symbols {
                    return Err(CodingError::InvalidPayloadFormat);
                }
                Ok(Payload::Systematic {
                    index,
                    symbol: rest[4..].to_vec(),
                })
            }
            TAG_CODED => {
                let vector_len = packed_len::<F>(max_symbols);
                if rest.len() != vector_len + symbol_size {
                    return Err(CodingError::InvalidPayloadFormat);
                }
                let coefficients = unpack_coefficients::<F>(&rest[..vector_len], max_symbols)
                    .ok_or(CodingError::InvalidPayloadFormat)?;
                Ok(Payload::Coded {
                    coefficients,
                    symbol: rest[vector_len..].to_vec(),
                })
            }
            _ => Err(CodingError::InvalidPayloadFormat),
        }
    }

    /// The encoding vector as a full coefficient slice, materializing the
    /// basis vector for systematic payloads.
    pub fn coefficients(&self, max_symbols: usize) -> Vec<F> {
        match self {
            Payload::Systematic { index, .. } => {
                let mut coeffs = vec![F::ZERO; max_symbols];
                coeffs[*index] = F::ONE;
                coeffs
            }
            Payload::Coded { coefficients, .. } => coefficients.clone(),
        }
    }

    /// The symbol bytes.
    pub fn symbol(&self) -> &[u8] {
        match self {
            Payload::Systematic { symbol, .. } => symbol,
            Payload::Coded { symbol, .. } => symbol,
        }
    }
}
