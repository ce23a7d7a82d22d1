//! Terminal user interfaces.

pub mod board;
