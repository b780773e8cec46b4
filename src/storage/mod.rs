//! Symbol storage primitives.

mod symbol;

pub use symbol::Symbol;
