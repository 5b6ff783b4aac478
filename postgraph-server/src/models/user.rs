//! User records and identifier validation

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Post, ValidationError};

/// Maximum length for record identifiers
const MAX_ID_LEN: usize = 64;

/// Maximum length for user names
const MAX_NAME_LEN: usize = 256;

/// User record.
///
/// `posts` is only populated when the store was asked to include them;
/// it is omitted from JSON otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<Post>>,
}

/// Validated record identifier (user ids, post ids)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Create an identifier from caller input.
    ///
    /// # Rules
    /// - Must not be empty
    /// - Max 64 bytes
    ///
    /// # Example
    /// ```
    /// use postgraph_server::models::RecordId;
    ///
    /// assert!(RecordId::new("userId", "u1").is_ok());
    /// assert!(RecordId::new("userId", "").is_err());
    /// ```
    pub fn new(field: &'static str, s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        if s.len() > MAX_ID_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_ID_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Generate a fresh identifier (hyphenated UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        if trimmed.len() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Input for seeding a user out of band
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Explicit id; a UUID is generated when absent
    pub id: Option<RecordId>,
    pub name: UserName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_rules() {
        assert!(RecordId::new("userId", "u1").is_ok());
        assert_eq!(
            RecordId::new("userId", "").unwrap_err(),
            ValidationError::Empty { field: "userId" }
        );

        let long = "x".repeat(65);
        assert!(matches!(
            RecordId::new("userId", &long).unwrap_err(),
            ValidationError::TooLong { max: 64, .. }
        ));
        assert!(RecordId::new("userId", &"x".repeat(64)).is_ok());
    }

    #[test]
    fn generated_ids_are_uuids() {
        let id = RecordId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_ne!(id, RecordId::generate());
    }

    #[test]
    fn user_name_is_trimmed() {
        assert_eq!(UserName::new("  Alice ").unwrap().as_str(), "Alice");
        assert!(matches!(
            UserName::new("   ").unwrap_err(),
            ValidationError::Empty { field: "name" }
        ));
    }

    #[test]
    fn posts_omitted_unless_included() {
        let user = User {
            id: "u1".into(),
            name: "Alice".into(),
            posts: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "u1", "name": "Alice" }));
    }
}
