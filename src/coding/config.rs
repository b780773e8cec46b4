use crate::coding::traits::CodingError;

/// Window policy of a coding stack.
///
/// Full-vector generations require every symbol up front and complete on a
/// single global rank check. Sliding-window generations accept symbols
/// incrementally and exchange feedback so resolved slots leave the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowPolicy {
    /// All symbols are addressable up front; no feedback channel.
    #[default]
    FullVector,
    /// Symbols arrive incrementally and the window advances on feedback.
    SlidingWindow,
}

/// Construction parameters shared by the encoder and decoder of one
/// generation. Both sides must agree on all fields, including the field
/// type they are instantiated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodingConfig {
    /// Number of symbol slots in the generation.
    pub max_symbols: usize,
    /// Size of each symbol in bytes.
    pub max_symbol_size: usize,
    /// Full-vector or sliding-window stack.
    pub window: WindowPolicy,
}

impl CodingConfig {
    /// Create a full-vector configuration.
    pub fn new(max_symbols: usize, max_symbol_size: usize) -> Self {
        Self {
            max_symbols,
            max_symbol_size,
            window: WindowPolicy::FullVector,
        }
    }

    /// Switch the configuration to the sliding-window stack.
    pub fn sliding_window(mut self) -> Self {
        self.window = WindowPolicy::SlidingWindow;
        self
    }

    /// Total block size in bytes.
    pub fn block_size(&self) -> usize {
        self.max_symbols * self.max_symbol_size
    }

    /// Validate the parameters.
    pub fn validate(&self) -> Result<(), CodingError> {
        if self.max_symbols == 0 || self.max_symbol_size == 0 {
            return Err(CodingError::InvalidParameters);
        }
        Ok(())
    }
}
