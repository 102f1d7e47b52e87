//! Navigation guards over the session snapshot.
//!
//! Guards never act on the session themselves; they map the current
//! snapshot plus the requested path to a [`GuardDecision`] and leave the
//! navigation side effects to the shell.

use blablabil_core::session::SessionSnapshot;

/// Outcome of evaluating a guard for one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session restore has not finished; show a placeholder, decide later.
    Waiting,
    /// Requirements met, render the requested view.
    Render,
    /// Send the user to the login page. `return_to` carries the path to
    /// come back to after a successful sign-in, when the guard wants one.
    RedirectToLogin { return_to: Option<String> },
    /// Signed in but lacking the admin flag; show access-denied in place.
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Authenticated,
    Admin,
}

/// Capability check in front of a route.
///
/// Both variants wait out the restore phase before deciding, so a user
/// with a stored session is never bounced to login by a race with
/// restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGuard {
    access: Access,
}

impl RouteGuard {
    /// Guard for routes any signed-in user may open.
    pub fn authenticated() -> Self {
        Self {
            access: Access::Authenticated,
        }
    }

    /// Guard for admin-only routes.
    pub fn admin() -> Self {
        Self {
            access: Access::Admin,
        }
    }

    pub fn evaluate(&self, session: &SessionSnapshot, requested_path: &str) -> GuardDecision {
        if session.loading {
            return GuardDecision::Waiting;
        }

        if !session.is_authenticated() {
            // Only the plain authenticated guard restores the original
            // destination; the admin guard sends the user to login bare.
            let return_to = match self.access {
                Access::Authenticated => Some(requested_path.to_string()),
                Access::Admin => None,
            };
            return GuardDecision::RedirectToLogin { return_to };
        }

        match self.access {
            Access::Admin if !session.is_admin() => GuardDecision::Denied,
            _ => GuardDecision::Render,
        }
    }
}
