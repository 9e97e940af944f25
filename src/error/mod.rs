// src/error/mod.rs
//
// Error types
//
// - AppError: a backing collaborator failed
// - ImportError: one input record could not be imported

pub mod import_error;
pub mod types;

pub use import_error::{ImportError, ImportErrorKind, ImportErrors};
pub use types::{AppError, AppResult};
