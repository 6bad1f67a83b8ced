//! Builder for populating a registry at start-up

use crate::action::{ActionId, IntoActionId};
use crate::error::Result;
use crate::registry::{Effector, PolicyRegistry};
use std::sync::Arc;
use tracing::info;

/// Builder for creating a [`PolicyRegistry`] with its full policy set
///
/// Policies are recorded in order and registered on [`build`](Self::build),
/// so the whole set is accepted or rejected in one place.
///
/// # Examples
///
/// ```
/// use authz::PolicyRegistryBuilder;
///
/// struct User { id: u32, is_admin: bool }
/// struct Resource { owner: u32 }
///
/// let registry = PolicyRegistryBuilder::<User, Resource>::new()
///     .name("user-resource")
///     .policy("read", |_, _| true)
///     .policy("delete", |user, resource| user.is_admin || user.id == resource.owner)
///     .build()
///     .unwrap();
///
/// let user = User { id: 1, is_admin: false };
/// assert!(registry.enforce(&user, "delete", &Resource { owner: 1 }).unwrap());
/// assert!(!registry.enforce(&user, "delete", &Resource { owner: 2 }).unwrap());
/// ```
pub struct PolicyRegistryBuilder<S, T> {
    name: Option<String>,
    policies: Vec<(Result<ActionId>, Effector<S, T>)>,
}

impl<S, T> PolicyRegistryBuilder<S, T> {
    /// Create a new builder with no policies
    pub fn new() -> Self {
        PolicyRegistryBuilder {
            name: None,
            policies: Vec::new(),
        }
    }

    /// Set the registry label used in log output
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Record a policy for `action`
    pub fn policy<F>(mut self, action: impl IntoActionId, effect: F) -> Self
    where
        F: Fn(&S, &T) -> bool + Send + Sync + 'static,
    {
        self.policies.push((action.into_action_id(), Arc::new(effect)));
        self
    }

    /// Record an already shared effector for `action`
    pub fn effector(mut self, action: impl IntoActionId, effect: Effector<S, T>) -> Self {
        self.policies.push((action.into_action_id(), effect));
        self
    }

    /// Build the registry
    ///
    /// # Errors
    ///
    /// The first invalid or duplicate action, exactly as
    /// [`PolicyRegistry::add_policy`] would report it.
    pub fn build(self) -> Result<PolicyRegistry<S, T>> {
        let mut registry = match self.name {
            Some(name) => PolicyRegistry::named(name),
            None => PolicyRegistry::new(),
        };

        for (action, effect) in self.policies {
            registry.add_effector(action?, effect)?;
        }

        info!(
            "Built policy registry '{}' with {} actions",
            registry.name().unwrap_or("unnamed"),
            registry.len()
        );

        Ok(registry)
    }
}

impl<S, T> Default for PolicyRegistryBuilder<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AuthzError;

    struct Caller {
        level: u8,
    }

    struct Record {
        min_level: u8,
    }

    #[test]
    fn test_builder_basic() {
        let registry = PolicyRegistryBuilder::<Caller, Record>::new()
            .name("caller-record")
            .policy("read", |caller, record| caller.level >= record.min_level)
            .policy("purge", |caller, _| caller.level == u8::MAX)
            .build()
            .unwrap();

        assert_eq!(registry.name(), Some("caller-record"));
        assert_eq!(registry.len(), 2);

        let record = Record { min_level: 3 };
        assert!(registry.enforce(&Caller { level: 3 }, "read", &record).unwrap());
        assert!(!registry.enforce(&Caller { level: 2 }, "read", &record).unwrap());
        assert!(!registry.enforce(&Caller { level: 3 }, "purge", &record).unwrap());
    }

    #[test]
    fn test_builder_duplicate_fails_build() {
        let result = PolicyRegistryBuilder::<Caller, Record>::new()
            .policy("read", |_, _| true)
            .policy("write", |_, _| true)
            .policy("read", |_, _| false)
            .build();

        assert!(matches!(
            result,
            Err(AuthzError::DuplicatePolicy(action)) if action.as_str() == "read"
        ));
    }

    #[test]
    fn test_builder_invalid_action_fails_build() {
        let result = PolicyRegistryBuilder::<Caller, Record>::new()
            .policy("read", |_, _| true)
            .policy("", |_, _| true)
            .build();

        assert!(matches!(result, Err(AuthzError::InvalidAction(_))));
    }

    #[test]
    fn test_builder_shared_effector() {
        let always: Effector<Caller, Record> = Arc::new(|_: &Caller, _: &Record| true);

        let registry = PolicyRegistryBuilder::new()
            .effector("read", always.clone())
            .effector("list", always)
            .build()
            .unwrap();

        let record = Record { min_level: 0 };
        assert!(registry.enforce(&Caller { level: 0 }, "list", &record).unwrap());
        assert!(registry.name().is_none());
    }

    #[test]
    fn test_empty_builder() {
        let registry = PolicyRegistryBuilder::<Caller, Record>::default()
            .build()
            .unwrap();
        assert!(registry.is_empty());
    }
}
