//! Shared registry for interleaved registration and enforcement
//!
//! [`PolicyRegistry`] needs `&mut self` to register, which confines population
//! to a single owner. When policies must be added while other threads are
//! already enforcing (hot reload, plugins registering late), use
//! [`SharedRegistry`] instead.
//!
//! Readers never evaluate an effector while holding the lock: `enforce` clones
//! the current snapshot `Arc` under a read lock, releases it, and runs the
//! effector against that snapshot. Registration publishes a new snapshot under
//! the write lock, copying the map only if a reader still holds the old one.

use crate::action::IntoActionId;
use crate::error::Result;
use crate::registry::PolicyRegistry;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Cloneable, thread-safe handle to a policy registry
pub struct SharedRegistry<S, T> {
    inner: Arc<RwLock<Arc<PolicyRegistry<S, T>>>>,
}

impl<S, T> SharedRegistry<S, T> {
    /// Create an empty shared registry
    pub fn new() -> Self {
        Self::from_registry(PolicyRegistry::new())
    }

    /// Wrap an already populated registry
    pub fn from_registry(registry: PolicyRegistry<S, T>) -> Self {
        SharedRegistry {
            inner: Arc::new(RwLock::new(Arc::new(registry))),
        }
    }

    /// Associate an effector with an action
    ///
    /// Same rules as [`PolicyRegistry::add_policy`]. On error no policy is
    /// added or replaced.
    pub fn add_policy<F>(&self, action: impl IntoActionId, effect: F) -> Result<()>
    where
        F: Fn(&S, &T) -> bool + Send + Sync + 'static,
    {
        let action = action.into_action_id()?;

        let mut current = self.inner.write();
        if current.contains(action.as_str()) {
            return Err(current.duplicate_error(&action));
        }
        // Copies the map only while a reader still holds the published snapshot
        Arc::make_mut(&mut *current).add_effector(action, Arc::new(effect))
    }

    /// Run the effector for `action` against the current snapshot
    ///
    /// # Errors
    ///
    /// `MissingPolicy` if nothing is registered for `action`.
    pub fn enforce(&self, subject: &S, action: &str, target: &T) -> Result<bool> {
        self.snapshot().enforce(subject, action, target)
    }

    /// Current immutable snapshot
    ///
    /// Policies registered afterwards are not visible through it.
    pub fn snapshot(&self) -> Arc<PolicyRegistry<S, T>> {
        self.inner.read().clone()
    }

    /// Check whether an effector is registered for `action`
    pub fn contains(&self, action: &str) -> bool {
        self.inner.read().contains(action)
    }

    /// Number of registered actions
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if no action is registered
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl<S, T> PolicyRegistry<S, T> {
    /// Convert into a [`SharedRegistry`] for concurrent registration
    pub fn into_shared(self) -> SharedRegistry<S, T> {
        SharedRegistry::from_registry(self)
    }
}

impl<S, T> From<PolicyRegistry<S, T>> for SharedRegistry<S, T> {
    fn from(registry: PolicyRegistry<S, T>) -> Self {
        SharedRegistry::from_registry(registry)
    }
}

impl<S, T> Default for SharedRegistry<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T> Clone for SharedRegistry<S, T> {
    fn clone(&self) -> Self {
        SharedRegistry {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, T> fmt::Debug for SharedRegistry<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedRegistry")
            .field(&*self.snapshot())
            .finish()
    }
}
