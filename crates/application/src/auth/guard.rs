//! Synchronous authentication and role predicates.

use std::sync::Arc;

use exjobnet_domain::UserRole;

use crate::auth::SessionStore;

/// Pure predicate layer consumed by route-level gating.
///
/// Reads the store's in-memory mirror only; no side effects, no I/O.
#[derive(Clone)]
pub struct AccessGuard {
    store: Arc<SessionStore>,
}

/// What a gated route should do for the current visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session restoration is still in flight; render a neutral loading
    /// state.
    Loading,
    /// Render the requested page.
    Allow,
    /// Not signed in; go to the login entry point and come back afterwards.
    RedirectToLogin {
        /// The originally requested location, for post-login return.
        return_to: String,
    },
    /// Signed in but lacking a required role; go to the default landing
    /// area instead of erroring.
    RedirectToHome,
}

impl AccessGuard {
    /// Creates a guard over the session store.
    #[must_use]
    pub const fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// True while a session is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    /// True when the current user's role equals `role`.
    #[must_use]
    pub fn has_role(&self, role: UserRole) -> bool {
        self.store
            .current_user()
            .is_some_and(|user| user.role == role)
    }

    /// True when the current user's role is one of `roles`.
    ///
    /// False for the empty list and false whenever unauthenticated.
    #[must_use]
    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        self.store
            .current_user()
            .is_some_and(|user| roles.contains(&user.role))
    }

    /// Route-level decision for a page that requires one of `required`.
    ///
    /// An empty `required` list means "any signed-in user".
    #[must_use]
    pub fn authorize(&self, required: &[UserRole], requested_path: &str) -> RouteDecision {
        if !self.store.restoration_resolved() {
            return RouteDecision::Loading;
        }
        match self.store.current_user() {
            None => RouteDecision::RedirectToLogin {
                return_to: requested_path.to_string(),
            },
            Some(user) if required.is_empty() || required.contains(&user.role) => {
                RouteDecision::Allow
            }
            Some(_) => RouteDecision::RedirectToHome,
        }
    }
}
