use super::entity::NewDerivedFile;
use crate::domain::{DomainError, DomainResult};
use std::path::Path;

/// Validates all NewDerivedFile invariants
pub fn validate_derived_file(file: &NewDerivedFile) -> DomainResult<()> {
    validate_name(file)?;
    validate_relative_path(file)?;
    Ok(())
}

/// Name must be a single non-empty path segment
fn validate_name(file: &NewDerivedFile) -> DomainResult<()> {
    if file.name.is_empty() {
        return Err(DomainError::InvariantViolation(
            "Derived file name cannot be empty".to_string(),
        ));
    }

    if file.name.contains('/') {
        return Err(DomainError::InvariantViolation(format!(
            "Derived file name must not contain '/': {}",
            file.name
        )));
    }

    Ok(())
}

/// Backing path is stored relative to the case directory
fn validate_relative_path(file: &NewDerivedFile) -> DomainResult<()> {
    if file.relative_path.is_empty() {
        return Err(DomainError::InvariantViolation(
            "Derived file local path cannot be empty".to_string(),
        ));
    }

    if Path::new(&file.relative_path).is_absolute() {
        return Err(DomainError::InvariantViolation(format!(
            "Derived file local path must be relative to the case directory: {}",
            file.relative_path
        )));
    }

    Ok(())
}
