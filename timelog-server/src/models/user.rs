//! User input validation
//!
//! Email and name only need to be present and non-blank; stored values
//! are kept exactly as sent.

use std::fmt;

use serde::Serialize;

use super::ValidationError;

/// Maximum length for email addresses (RFC 5321 path limit)
const MAX_EMAIL_LEN: usize = 254;

/// Maximum length for display names
const MAX_NAME_LEN: usize = 256;

/// Validated user identifier (positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Zero counts as absent, matching a JSON body that omits `user_id`.
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        match id {
            0 => Err(ValidationError::Required { field: "User ID" }),
            n if n < 0 => Err(ValidationError::InvalidFormat {
                field: "User ID",
                reason: "must be a positive integer",
            }),
            n => Ok(Self(n)),
        }
    }

    /// Parse an identifier from a query-string value.
    ///
    /// # Example
    /// ```
    /// use timelog_server::models::UserId;
    ///
    /// assert_eq!(UserId::parse(Some("42")).unwrap().get(), 42);
    /// assert!(UserId::parse(Some("")).is_err());
    /// assert!(UserId::parse(Some("abc")).is_err());
    /// assert!(UserId::parse(None).is_err());
    /// ```
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        let raw = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::Required { field: "User ID" })?;

        let id = raw.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
            field: "User ID",
            reason: "must be a positive integer",
        })?;

        Self::new(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn required_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ValidationError::Required { field })?;

    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(value.to_owned())
}

/// Validated email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn new(value: Option<&str>) -> Result<Self, ValidationError> {
        required_text("Email", value, MAX_EMAIL_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    pub fn new(value: Option<&str>) -> Result<Self, ValidationError> {
        required_text("Name", value, MAX_NAME_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fields for a user insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: Email,
    pub name: UserName,
}

impl NewUser {
    pub fn new(email: Option<&str>, name: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            name: UserName::new(name)?,
        })
    }
}

/// Fields for a user update (full replacement of name and email)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: UserName,
    pub email: Email,
}

impl UserUpdate {
    pub fn new(name: Option<&str>, email: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: UserName::new(name)?,
            email: Email::new(email)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rules() {
        assert_eq!(UserId::new(7).unwrap().get(), 7);
        assert_eq!(
            UserId::new(0).unwrap_err(),
            ValidationError::Required { field: "User ID" }
        );
        assert!(matches!(
            UserId::new(-3).unwrap_err(),
            ValidationError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn user_id_from_query() {
        assert_eq!(UserId::parse(Some(" 12 ")).unwrap().get(), 12);
        assert!(matches!(
            UserId::parse(Some("   ")).unwrap_err(),
            ValidationError::Required { .. }
        ));
        assert!(matches!(
            UserId::parse(Some("1.5")).unwrap_err(),
            ValidationError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn email_and_name_required() {
        assert_eq!(
            NewUser::new(None, Some("Ann")).unwrap_err(),
            ValidationError::Required { field: "Email" }
        );
        assert_eq!(
            NewUser::new(Some("a@b.com"), Some("  ")).unwrap_err(),
            ValidationError::Required { field: "Name" }
        );

        let user = NewUser::new(Some("a@b.com"), Some("Ann")).unwrap();
        assert_eq!(user.email.as_str(), "a@b.com");
        assert_eq!(user.name.as_str(), "Ann");
    }

    #[test]
    fn length_limits() {
        let long_name = "n".repeat(257);
        assert!(matches!(
            UserName::new(Some(&long_name)).unwrap_err(),
            ValidationError::TooLong { max: 256, .. }
        ));
        assert!(UserName::new(Some(&"n".repeat(256))).is_ok());

        let long_email = format!("{}@b.com", "a".repeat(250));
        assert!(matches!(
            Email::new(Some(&long_email)).unwrap_err(),
            ValidationError::TooLong { max: 254, .. }
        ));
    }
}
