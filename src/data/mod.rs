//! Data acquisition: the remote listings feed and the synthetic fallback.

pub mod remote;
pub mod sample;

pub use remote::{ListingsClient, LoadError};
pub use sample::generate;
