//! Command-line surfaces of the two binaries.
//!
//! Argument structs live here rather than in the binaries so the parsing
//! rules and the workflows they drive can be tested without spawning them.

pub mod refresh;
pub mod tag;
