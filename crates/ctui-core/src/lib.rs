//! Core logic for ctui
//!
//! This crate provides:
//! - Command builders that validate input and emit exact CLI argument vectors
//! - Shell detection with a per-container cache
//! - Confirmation protocols for reversible and destructive operations

mod builders;
mod confirm;
mod error;
mod policy;
mod shell;

pub use builders::*;
pub use confirm::*;
pub use error::*;
pub use policy::*;
pub use shell::*;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
