//! Tool name validation.

use crate::{Error, Result};

/// Validates a tool name: lowercase alphanumeric, 3-100 characters.
///
/// Enforced at creation and rename. The store itself never validates.
pub fn validate_tool_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::Validation("Tool name is required".to_string()));
    }
    if name.len() < 3 {
        return Err(Error::Validation(
            "Tool name must be at least 3 characters long".to_string(),
        ));
    }
    if name.len() > 100 {
        return Err(Error::Validation(
            "Tool name must be at most 100 characters long".to_string(),
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Err(Error::Validation(
            "Tool name must contain only lowercase letters and numbers".to_string(),
        ));
    }
    Ok(())
}
