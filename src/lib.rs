//! cinemabin library
//!
//! Exposes the configuration, library scanner, CSV store and sync driver so
//! that the binary and the integration tests share one code path.

pub mod config;
pub mod scanner;
pub mod store;
pub mod sync;
