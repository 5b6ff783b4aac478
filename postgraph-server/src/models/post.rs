//! Post records and content validation

use serde::{Deserialize, Serialize};

use super::{RecordId, User, ValidationError};

/// Maximum length for post text (64KB)
const MAX_TEXT_LEN: usize = 65536;

/// Post record.
///
/// `user` is only populated when the store was asked to include the
/// owning user; it is omitted from JSON otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub text: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Box<User>>,
}

/// Validated post text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostText(String);

impl PostText {
    /// Create new post text.
    ///
    /// # Rules
    /// - Max 64KB (65536 bytes)
    /// - Empty text is allowed
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.len() > MAX_TEXT_LEN {
            return Err(ValidationError::TooLong {
                field: "text",
                max: MAX_TEXT_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated input for creating a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub text: PostText,
    pub user_id: RecordId,
}

impl NewPost {
    pub fn new(text: &str, user_id: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            text: PostText::new(text)?,
            user_id: RecordId::new("userId", user_id)?,
        })
    }
}
