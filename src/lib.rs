pub mod boundary;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod git;
pub mod manifest;
pub mod process;
pub mod release;
pub mod ui;
pub mod version;

pub use error::{ReleaseError, Result};
