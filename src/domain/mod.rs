//! # Domain Layer
//!
//! Request/result models, the retry policy and the error taxonomy.
//! This layer is independent of external frameworks and infrastructure.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
