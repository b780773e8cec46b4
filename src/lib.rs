#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![allow(clippy::needless_range_loop)]

pub mod coding;
pub mod field;
pub mod storage;
pub mod trace;
pub mod utils;

pub use coding::{
    CodingConfig, CodingError, Decoder, Encoder, PayloadReader, PayloadWriter, RankState,
    WindowPolicy,
};
pub use field::{Binary, Binary8, Field};
pub use trace::{TraceEvent, Tracer};
