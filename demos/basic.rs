//! Basic authz usage
//!
//! Run with `RUST_LOG=debug cargo run --example basic` to see registration logs.

use authz::{AuthzError, PolicyRegistry, PolicyRegistryBuilder};
use tracing::info;

#[derive(Debug)]
struct User {
    id: &'static str,
    team: &'static str,
    is_admin: bool,
}

#[derive(Debug)]
struct Resource {
    owner: &'static str,
}

/// All user/resource policies, defined in one place
fn user_resource_policies() -> authz::Result<PolicyRegistry<User, Resource>> {
    PolicyRegistryBuilder::new()
        .name("user-resource")
        .policy("read", |_: &User, _: &Resource| true)
        .policy("delete", |user: &User, resource: &Resource| {
            user.is_admin || user.id == resource.owner || user.team == "ResourceManagers"
        })
        .build()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let auth = user_resource_policies()?;

    let alice = User {
        id: "alice",
        team: "Support",
        is_admin: false,
    };
    let bob = User {
        id: "bob",
        team: "ResourceManagers",
        is_admin: false,
    };
    let report = Resource { owner: "carol" };

    for user in [&alice, &bob] {
        if auth.enforce(user, "delete", &report)? {
            info!("{} may delete {:?}", user.id, report);
        } else {
            info!("{} is denied delete on {:?}", user.id, report);
        }
    }

    // An action nobody defined is a bug, not a deny
    match auth.enforce(&alice, "archive", &report) {
        Err(AuthzError::MissingPolicy(action)) => info!("No policy for '{}'", action),
        other => anyhow::bail!("expected a missing policy, got {:?}", other),
    }

    Ok(())
}
