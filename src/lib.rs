//! # authz - Code-Defined Authorization
//!
//! `authz` answers one question: may this subject perform this action on this
//! target? The answer comes from a decision function (an *effector*) that the
//! embedding application registers under the action's name. Authentication is
//! not part of this crate in any way.
//!
//! Defining policies as code keeps them testable and auditable: every decision
//! for an action lives in exactly one function, collected in one place at
//! start-up.
//!
//! - **One registry per type pair**: a [`PolicyRegistry<S, T>`] decides for
//!   subjects of type `S` acting on targets of type `T` (possibly the same type)
//! - **One effector per action**: registering an action twice is an error
//! - **No defaults**: enforcing an unregistered action is an error, never an
//!   implicit allow or deny
//! - **Concurrent reads**: a populated registry is `Sync`; use
//!   [`SharedRegistry`] when registration continues while others enforce
//!
//! ## Quick Start
//!
//! ```rust
//! use authz::{PolicyRegistry, Result};
//!
//! struct User { id: String, is_admin: bool }
//! struct Resource { owner: String }
//!
//! # fn main() -> Result<()> {
//! let mut auth = PolicyRegistry::<User, Resource>::new();
//!
//! // Can User "delete" Resource?
//! auth.add_policy("delete", |user, resource| {
//!     user.is_admin || resource.owner == user.id
//! })?;
//!
//! let user = User { id: "u1".into(), is_admin: false };
//! let resource = Resource { owner: "u1".into() };
//!
//! if auth.enforce(&user, "delete", &resource)? {
//!     // delete the resource
//! } else {
//!     // access denied
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Both errors ([`AuthzError::DuplicatePolicy`] and
//! [`AuthzError::MissingPolicy`]) mean the policy set itself is wrong.
//! Propagate them and stop; do not map them to a decision.

pub mod action;
pub mod builder;
pub mod error;
pub mod registry;
pub mod shared;

pub use action::{ActionId, IntoActionId};
pub use builder::PolicyRegistryBuilder;
pub use error::{AuthzError, Result};
pub use registry::{Effector, PolicyRegistry};
pub use shared::SharedRegistry;
