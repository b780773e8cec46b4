//! Sliding-window feedback wire format.
//!
//! The decoder reports one status per symbol slot. The encoder only acts
//! on [`SlotStatus::Resolved`] slots, and only for slots it has itself
//! already included in at least one payload, so lost or stale feedback can
//! never corrupt the session.

use crate::coding::traits::CodingError;

/// Resolution status of one symbol slot, as seen by the decoder.
///
/// Slots move `Unknown -> Partial -> Resolved` and never regress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotStatus {
    /// No pivot touches this slot yet.
    Unknown,
    /// A pivot row exists for this slot but still mixes other symbols.
    Partial,
    /// The slot is fully resolved: its row is an exact basis vector.
    Resolved,
}

impl SlotStatus {
    fn to_byte(self) -> u8 {
        match self {
            SlotStatus::Unknown => 0,
            SlotStatus::Partial => 1,
            SlotStatus::Resolved => 2,
        }
    }

    fn from_byte(byte: u8) -> Result<Self, CodingError> {
        match byte {
            0 => Ok(SlotStatus::Unknown),
            1 => Ok(SlotStatus::Partial),
            2 => Ok(SlotStatus::Resolved),
            _ => Err(CodingError::InvalidFeedbackFormat),
        }
    }
}

/// A decoder-to-encoder feedback message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Feedback {
    statuses: Vec<SlotStatus>,
}

impl Feedback {
    /// Build a message from per-slot statuses.
    pub fn new(statuses: Vec<SlotStatus>) -> Self {
        Self { statuses }
    }

    /// Per-slot statuses, indexed by symbol slot.
    pub fn statuses(&self) -> &[SlotStatus] {
        &self.statuses
    }

    /// Number of resolved slots.
    pub fn resolved(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| **s == SlotStatus::Resolved)
            .count()
    }

    /// Serialize into wire format: a little-endian `u32` slot count
    /// followed by one status byte per slot.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.statuses.len());
        out.extend_from_slice(&(self.statuses.len() as u32).to_le_bytes());
        out.extend(self.statuses.iter().map(|s| s.to_byte()));
        out
    }

    /// Parse a feedback message for a generation with `max_symbols` slots.
    pub fn from_bytes(bytes: &[u8], max_symbols: usize) -> Result<Self, CodingError> {
        if bytes.len() < 4 {
            return Err(CodingError::InvalidFeedbackFormat);
        }
        let mut count_bytes = [0u8; 4];
        count_bytes.copy_from_slice(&bytes[..4]);
        let count = u32::from_le_bytes(count_bytes) as usize;

        if count > max_symbols || bytes.len() != 4 + count {
            return Err(CodingError::InvalidFeedbackFormat);
        }

        let statuses = bytes[4..]
            .iter()
            .map(|&b| SlotStatus::from_byte(b))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { statuses })
    }
}
