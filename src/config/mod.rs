//! Configuration: audit constants, CLI option types, and request header sets.

mod constants;
mod headers;
mod types;

pub use constants::*;
pub use headers::*;
pub use types::{LogFormat, LogLevel};
