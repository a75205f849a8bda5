//! Ref name validation, narrowed from git's full check-ref-format rule set
//! to what the store actually needs to keep safe: no escaping the refs
//! directory, no embedded NUL, nothing that would collide with the lock
//! file suffix.

use crate::error::RefError;

pub fn validate(name: &str) -> Result<(), RefError> {
    if name.is_empty() {
        return Err(RefError::InvalidName("ref name is empty".into()));
    }
    if name.contains('\0') {
        return Err(RefError::InvalidName(format!("{name}: contains NUL byte")));
    }
    if name.starts_with('/') || name.ends_with('/') {
        return Err(RefError::InvalidName(format!(
            "{name}: cannot start or end with '/'"
        )));
    }
    if name.split('/').any(|part| part.is_empty() || part == "." || part == "..") {
        return Err(RefError::InvalidName(format!(
            "{name}: contains an empty, '.', or '..' path component"
        )));
    }
    if name.ends_with(".lock") {
        return Err(RefError::InvalidName(format!("{name}: ends with '.lock'")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        assert!(validate("HEAD").is_ok());
        assert!(validate("refs/heads/main").is_ok());
        assert!(validate("refs/tags/v1.0").is_ok());
    }

    #[test]
    fn rejects_escape_attempts() {
        assert!(validate("refs/heads/../../etc/passwd").is_err());
        assert!(validate("refs/heads/").is_err());
        assert!(validate("").is_err());
    }
}
