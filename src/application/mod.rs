//! # Application Layer
//!
//! Ports the connectors implement and the use case that drives them.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
