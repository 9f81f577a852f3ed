use crate::utils::error::{CartError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| CartError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Slot names become file names in the file backend, so they must stay a
/// single path component.
pub fn validate_slot_name(field_name: &str, slot: &str) -> Result<()> {
    validate_non_empty_string(field_name, slot)?;

    if slot.contains(['/', '\\', '\0']) || slot == "." || slot == ".." {
        return Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: slot.to_string(),
            reason: "Slot name must be a single path component".to_string(),
        });
    }
    Ok(())
}
