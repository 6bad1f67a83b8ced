//! Validated action identifiers
//!
//! Action identifiers are opaque, caller-defined names such as `"delete"` or
//! `"update:profile"`. The only structural rule is that they are non-empty.
//! Comparison is exact, so `"Delete"` and `"delete"` are different actions.

use crate::error::{AuthzError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// A non-empty, case-sensitive action name
///
/// # Examples
///
/// ```
/// use authz::ActionId;
///
/// let action = ActionId::new("update:profile").unwrap();
/// assert_eq!(action.as_str(), "update:profile");
///
/// assert!(ActionId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActionId(String);

impl ActionId {
    /// Create a new validated action identifier
    ///
    /// # Errors
    ///
    /// Returns `InvalidAction` if the identifier is empty.
    pub fn new(action: impl Into<String>) -> Result<Self> {
        let action = action.into();
        if action.is_empty() {
            return Err(AuthzError::InvalidAction(
                "action identifier cannot be empty".to_string(),
            ));
        }
        Ok(ActionId(action))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to String
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ActionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets the registry map be queried with a plain `&str`.
impl Borrow<str> for ActionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ActionId {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        ActionId::new(s)
    }
}

impl TryFrom<String> for ActionId {
    type Error = AuthzError;

    fn try_from(value: String) -> Result<Self> {
        ActionId::new(value)
    }
}

impl TryFrom<&str> for ActionId {
    type Error = AuthzError;

    fn try_from(value: &str) -> Result<Self> {
        ActionId::new(value)
    }
}

impl From<ActionId> for String {
    fn from(action: ActionId) -> Self {
        action.0
    }
}

/// Conversion into a validated [`ActionId`]
///
/// Implemented for string types and for `ActionId` itself, so registration
/// calls accept whichever form the caller already holds.
pub trait IntoActionId {
    fn into_action_id(self) -> Result<ActionId>;
}

impl IntoActionId for ActionId {
    fn into_action_id(self) -> Result<ActionId> {
        Ok(self)
    }
}

impl IntoActionId for &ActionId {
    fn into_action_id(self) -> Result<ActionId> {
        Ok(self.clone())
    }
}

impl IntoActionId for &str {
    fn into_action_id(self) -> Result<ActionId> {
        ActionId::new(self)
    }
}

impl IntoActionId for String {
    fn into_action_id(self) -> Result<ActionId> {
        ActionId::new(self)
    }
}

impl IntoActionId for &String {
    fn into_action_id(self) -> Result<ActionId> {
        ActionId::new(self.as_str())
    }
}
