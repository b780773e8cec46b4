//! Network coding implementations.

/// Construction parameters and window policy.
pub mod config;
/// Gaussian-elimination decoder, doubling as a recoder.
pub mod decoder;
/// RLNC encoder, full-vector and sliding-window.
pub mod encoder;
/// Sliding-window feedback messages.
pub mod feedback;
/// Packet wire format.
pub mod payload;
/// Core coding traits and error types.
pub mod traits;

pub use config::{CodingConfig, WindowPolicy};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use feedback::{Feedback, SlotStatus};
pub use payload::Payload;
pub use traits::{CodingError, PayloadReader, PayloadWriter, RankState};
