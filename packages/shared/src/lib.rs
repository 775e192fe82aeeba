//! Utilities shared between the Hiroba binaries and libraries.

pub mod logger;
pub mod time;
