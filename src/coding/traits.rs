use thiserror::Error;

/// Error type for encoding and decoding operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodingError {
    /// Construction parameters are invalid (zero symbols or symbol size).
    #[error("Invalid parameters provided")]
    InvalidParameters,

    /// Input data length does not match the declared block or symbol size.
    #[error("Size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Required length in bytes.
        expected: usize,
        /// Length actually provided.
        actual: usize,
    },

    /// A symbol index is outside the generation.
    #[error("Symbol index {index} out of range (max {max})")]
    SymbolIndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Number of symbol slots in the generation.
        max: usize,
    },

    /// A payload was requested before any symbol was assigned.
    #[error("No symbols assigned")]
    NoSymbolsSet,

    /// `copy_from_symbols` was called before the decoder completed.
    #[error("Decoding is not complete")]
    NotComplete,

    /// A received payload could not be parsed.
    #[error("Invalid payload format")]
    InvalidPayloadFormat,

    /// A received feedback message could not be parsed.
    #[error("Invalid feedback format")]
    InvalidFeedbackFormat,

    /// The operation requires the sliding-window stack.
    #[error("Operation requires the sliding-window stack")]
    SlidingWindowOnly,

    /// Internal elimination failure. Unreachable when pivots are selected
    /// from non-zero coefficients; kept as a propagated error rather than
    /// a panic path.
    #[error("Decoding failed")]
    DecodingFailed,
}

/// The payload-production contract.
///
/// Implemented by encoders and by decoders acting as recoders, so relay
/// code can treat both as one coded-node abstraction.
pub trait PayloadWriter {
    /// Produce one payload in wire format.
    fn write_payload(&mut self) -> Result<Vec<u8>, CodingError>;
}

/// The payload-consumption contract.
pub trait PayloadReader {
    /// Consume one payload in wire format.
    fn read_payload(&mut self, payload: &[u8]) -> Result<(), CodingError>;
}

/// Rank bookkeeping shared by both ends of a generation.
pub trait RankState {
    /// Number of linearly independent symbols known (decoder) or symbol
    /// slots assigned (encoder).
    fn rank(&self) -> usize;

    /// Number of symbol slots in the generation.
    fn symbols(&self) -> usize;

    /// Size of each symbol in bytes.
    fn symbol_size(&self) -> usize;

    /// Total block size in bytes.
    fn block_size(&self) -> usize {
        self.symbols() * self.symbol_size()
    }
}
