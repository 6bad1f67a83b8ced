//! Policy registry: one decision function per action
//!
//! A [`PolicyRegistry`] is bound to a subject type `S` and a target type `T`
//! when it is created. Every policy registered in it decides whether some `S`
//! may perform an action on some `T`.
//!
//! Key properties:
//! - One action maps to exactly one effector, and that never changes
//! - Registering an action twice is an error, the first effector stays
//! - Enforcing an unregistered action is an error, never a default decision
//! - Effector results are returned verbatim

use crate::action::{ActionId, IntoActionId};
use crate::error::{AuthzError, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// A decision function: `true` permits the action, `false` denies it
///
/// Effectors are the code equivalent of authorization policies. They should be
/// deterministic in their inputs; the registry does not check this.
pub type Effector<S, T> = Arc<dyn Fn(&S, &T) -> bool + Send + Sync>;

/// Collection of effectors for a subject/target type pair, keyed by action
pub struct PolicyRegistry<S, T> {
    name: Option<String>,
    policies: HashMap<ActionId, Effector<S, T>>,
}

impl<S, T> PolicyRegistry<S, T> {
    /// Create an empty registry
    pub fn new() -> Self {
        PolicyRegistry {
            name: None,
            policies: HashMap::new(),
        }
    }

    /// Create an empty registry with a label for log output
    ///
    /// The name has no effect on decisions.
    pub fn named(name: impl Into<String>) -> Self {
        PolicyRegistry {
            name: Some(name.into()),
            policies: HashMap::new(),
        }
    }

    /// Registry label, if one was given
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Associate an effector with an action
    ///
    /// # Errors
    ///
    /// - `InvalidAction` if `action` is empty
    /// - `DuplicatePolicy` if the action already has an effector; the existing
    ///   one is kept
    ///
    /// Both indicate a bug in the code defining the policies and should abort
    /// start-up rather than be handled.
    ///
    /// # Examples
    ///
    /// ```
    /// use authz::{AuthzError, PolicyRegistry};
    ///
    /// struct User { is_admin: bool }
    /// struct Document;
    ///
    /// let mut registry = PolicyRegistry::<User, Document>::new();
    /// registry.add_policy("delete", |user, _doc| user.is_admin).unwrap();
    ///
    /// let err = registry.add_policy("delete", |_, _| true).unwrap_err();
    /// assert!(matches!(err, AuthzError::DuplicatePolicy(_)));
    /// ```
    pub fn add_policy<F>(&mut self, action: impl IntoActionId, effect: F) -> Result<()>
    where
        F: Fn(&S, &T) -> bool + Send + Sync + 'static,
    {
        self.add_effector(action.into_action_id()?, Arc::new(effect))
    }

    /// Associate an already shared effector with an action
    ///
    /// Same rules as [`add_policy`](Self::add_policy). Useful when one decision
    /// function backs several actions.
    pub fn add_effector(&mut self, action: ActionId, effect: Effector<S, T>) -> Result<()> {
        match self.policies.entry(action) {
            Entry::Occupied(entry) => Err(duplicate(self.name.as_deref(), entry.key())),
            Entry::Vacant(entry) => {
                debug!(
                    "Registered policy for action '{}' in registry '{}'",
                    entry.key(),
                    self.name.as_deref().unwrap_or("unnamed")
                );
                entry.insert(effect);
                Ok(())
            }
        }
    }

    /// Run the effector for `action` against `subject` and `target`
    ///
    /// Returns exactly what the effector returns. A panic inside the effector
    /// propagates to the caller.
    ///
    /// # Errors
    ///
    /// `MissingPolicy` if nothing is registered for `action`. The caller must
    /// not treat this as a deny: it means the policy set is incomplete.
    ///
    /// # Examples
    ///
    /// ```
    /// use authz::PolicyRegistry;
    ///
    /// struct User { id: String, is_admin: bool }
    ///
    /// let mut registry = PolicyRegistry::<User, User>::new();
    /// registry
    ///     .add_policy("update:profile", |actor, profile| {
    ///         actor.is_admin || actor.id == profile.id
    ///     })
    ///     .unwrap();
    ///
    /// let alice = User { id: "u1".into(), is_admin: false };
    /// let bob = User { id: "u2".into(), is_admin: false };
    ///
    /// assert!(registry.enforce(&alice, "update:profile", &alice).unwrap());
    /// assert!(!registry.enforce(&alice, "update:profile", &bob).unwrap());
    /// assert!(registry.enforce(&alice, "archive", &bob).is_err());
    /// ```
    pub fn enforce(&self, subject: &S, action: &str, target: &T) -> Result<bool> {
        let effect = self.policies.get(action).ok_or_else(|| {
            warn!(
                "No policy for action '{}' in registry '{}'",
                action,
                self.name.as_deref().unwrap_or("unnamed")
            );
            AuthzError::MissingPolicy(action.to_string())
        })?;

        Ok(effect(subject, target))
    }

    /// Error for a rejected second registration of `action`
    pub(crate) fn duplicate_error(&self, action: &ActionId) -> AuthzError {
        duplicate(self.name.as_deref(), action)
    }

    /// Check whether an effector is registered for `action`
    pub fn contains(&self, action: &str) -> bool {
        self.policies.contains_key(action)
    }

    /// Registered actions, in no particular order
    pub fn actions(&self) -> impl Iterator<Item = &ActionId> {
        self.policies.keys()
    }

    /// Number of registered actions
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Check if no action is registered
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

fn duplicate(name: Option<&str>, action: &ActionId) -> AuthzError {
    warn!(
        "Rejected duplicate policy for action '{}' in registry '{}'",
        action,
        name.unwrap_or("unnamed")
    );
    AuthzError::DuplicatePolicy(action.clone())
}

impl<S, T> Default for PolicyRegistry<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

// Effectors are shared, so a clone is a new map of the same functions.
impl<S, T> Clone for PolicyRegistry<S, T> {
    fn clone(&self) -> Self {
        PolicyRegistry {
            name: self.name.clone(),
            policies: self.policies.clone(),
        }
    }
}

impl<S, T> fmt::Debug for PolicyRegistry<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut actions: Vec<&str> = self.policies.keys().map(ActionId::as_str).collect();
        actions.sort_unstable();

        f.debug_struct("PolicyRegistry")
            .field("name", &self.name)
            .field("actions", &actions)
            .finish()
    }
}
