//! Document model shared by every phase: rules, processes and their parts.

pub mod process;
pub mod rule;
pub mod validate;

pub use process::*;
pub use rule::*;
pub use validate::{ValidationError, validate_process, validate_rule};
