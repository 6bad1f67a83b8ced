//! Error types for policy registration and enforcement

use crate::action::ActionId;
use thiserror::Error;

/// Authorization registry errors
///
/// Every variant is a programming or configuration mistake, never a decision.
/// Callers are expected to propagate these to the top of start-up or request
/// handling and stop, not to fall back to allowing or denying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// Two code paths tried to define a policy for the same action
    #[error("a policy already exists for action {0}")]
    DuplicatePolicy(ActionId),

    /// Enforcement asked for an action nobody registered
    #[error("no policy for action {0}")]
    MissingPolicy(String),

    /// Action identifier failed validation
    #[error("invalid action identifier: {0}")]
    InvalidAction(String),
}

pub type Result<T> = std::result::Result<T, AuthzError>;
