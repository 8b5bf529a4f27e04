//! File-backed repositories.

mod log;

pub use log::FileResultLog;
