//! Error handling module
//!
//! This module reshapes source parser failures into the target contract:
//! - Failure categories with fixed target wording
//! - Location recovery from either line/column or offset
//! - Optional plain-text code frames

mod codes;
mod error;
mod frame;

pub use codes::FailureCategory;
pub use error::{Error, SyntaxError, normalize};
pub use frame::code_frame;
