//! # wadash-common
//!
//! Configuration, error types, and the serde models exchanged with the bot
//! backend. No I/O beyond reading configuration.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

pub use error::{Error, Result};
