use crate::utils::error::{CurriculumError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CurriculumError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CurriculumError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CurriculumError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 角色代號只允許小寫英數與連字號 (例如 `research-leader`)
pub fn validate_role_id(field_name: &str, role: &str) -> Result<()> {
    validate_non_empty_string(field_name, role)?;

    let valid = role
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid || role.starts_with('-') || role.ends_with('-') {
        return Err(CurriculumError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: role.to_string(),
            reason: "Role id must be lowercase kebab-case".to_string(),
        });
    }
    Ok(())
}
