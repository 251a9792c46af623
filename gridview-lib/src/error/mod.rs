//! Error types

mod field;

pub use field::*;
