//! Per-page access policy and role-based navigation visibility.
//!
//! The guard only decides; the router collaborator performs the navigation.
//! Role checks redirect silently to the landing page rather than erroring.

use super::types::{Role, SessionState};

/// Access requirement a page declares.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PageAccess {
    /// Anyone, session or not.
    Public,
    /// A live session of any role.
    Authenticated,
    /// A live session with exactly this role.
    Role(Role),
    /// Only without a session (login, signup).
    GuestOnly,
}

/// Where a denied page sends the visitor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RedirectTarget {
    Login,
    Landing,
}

impl RedirectTarget {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            RedirectTarget::Login => "/login",
            RedirectTarget::Landing => "/dashboard",
        }
    }
}

/// Guard verdict for one page entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RouteDecision {
    /// Session state not ready yet; render nothing, do not redirect.
    Wait,
    Allow,
    Redirect(RedirectTarget),
}

/// Evaluate the policy for a page entry.
#[must_use]
pub fn evaluate(state: &SessionState, access: PageAccess) -> RouteDecision {
    let session = match state {
        SessionState::Restoring => return RouteDecision::Wait,
        SessionState::Ready(session) => session.as_ref(),
    };
    match (access, session) {
        (PageAccess::Public, _) => RouteDecision::Allow,
        (PageAccess::GuestOnly, None) => RouteDecision::Allow,
        (PageAccess::GuestOnly, Some(_)) => RouteDecision::Redirect(RedirectTarget::Landing),
        (PageAccess::Authenticated | PageAccess::Role(_), None) => {
            RouteDecision::Redirect(RedirectTarget::Login)
        }
        (PageAccess::Authenticated, Some(_)) => RouteDecision::Allow,
        (PageAccess::Role(required), Some(session)) => {
            if session.identity.role == required {
                RouteDecision::Allow
            } else {
                RouteDecision::Redirect(RedirectTarget::Landing)
            }
        }
    }
}

/// A page and the access it declares.
#[derive(Clone, Copy, Debug)]
pub struct PageSpec {
    pub path: &'static str,
    pub access: PageAccess,
}

/// Every page of the dashboard with its declared access requirement.
pub const PAGES: &[PageSpec] = &[
    PageSpec {
        path: "/login",
        access: PageAccess::GuestOnly,
    },
    PageSpec {
        path: "/signup",
        access: PageAccess::GuestOnly,
    },
    PageSpec {
        path: "/dashboard",
        access: PageAccess::Authenticated,
    },
    PageSpec {
        path: "/assessment",
        access: PageAccess::Authenticated,
    },
    PageSpec {
        path: "/diet",
        access: PageAccess::Authenticated,
    },
    PageSpec {
        path: "/workouts",
        access: PageAccess::Authenticated,
    },
    PageSpec {
        path: "/progress",
        access: PageAccess::Authenticated,
    },
    PageSpec {
        path: "/food-db",
        access: PageAccess::Authenticated,
    },
    PageSpec {
        path: "/chat",
        access: PageAccess::Authenticated,
    },
    PageSpec {
        path: "/profile",
        access: PageAccess::Authenticated,
    },
    PageSpec {
        path: "/admin",
        access: PageAccess::Role(Role::Admin),
    },
];

/// The declared access for a path, if it is a known page.
#[must_use]
pub fn page_access(path: &str) -> Option<PageAccess> {
    PAGES
        .iter()
        .find(|page| page.path == path)
        .map(|page| page.access)
}

/// One sidebar entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

impl NavItem {
    /// Advisory visibility filter; page-level checks are the enforcement.
    #[must_use]
    pub fn visible_to(&self, role: Role) -> bool {
        match role {
            Role::Nutritionist => matches!(
                self.label,
                "Dashboard" | "Health Assessment" | "Diet Plans" | "Workouts" | "Profile"
            ),
            Role::Standard | Role::Admin => true,
        }
    }
}

/// The full navigation set shown to standard and admin roles.
pub const NAVIGATION: &[NavItem] = &[
    NavItem {
        label: "Dashboard",
        path: "/dashboard",
    },
    NavItem {
        label: "Health Assessment",
        path: "/assessment",
    },
    NavItem {
        label: "Diet Plans",
        path: "/diet",
    },
    NavItem {
        label: "Workouts",
        path: "/workouts",
    },
    NavItem {
        label: "Progress Tracking",
        path: "/progress",
    },
    NavItem {
        label: "Food Database",
        path: "/food-db",
    },
    NavItem {
        label: "Health Chat",
        path: "/chat",
    },
    NavItem {
        label: "Profile",
        path: "/profile",
    },
];

/// Navigation items a role may see.
pub fn visible_navigation(role: Role) -> impl Iterator<Item = &'static NavItem> {
    NAVIGATION.iter().filter(move |item| item.visible_to(role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::CredentialStore;
    use crate::auth::token::TokenIssuer;
    use crate::auth::types::{Session, SessionState};
    use anyhow::{Context, Result};

    fn ready_with(role: Role) -> Result<SessionState> {
        let store = CredentialStore::with_demo_identities()?;
        let demo = crate::auth::store::demo_credentials(role);
        let identity = store
            .find_by_email(demo.email)
            .context("seeded identity missing")?;
        let token = TokenIssuer.issue(identity.id)?;
        Ok(SessionState::Ready(Some(Session::new(identity, token))))
    }

    #[test]
    fn not_ready_state_always_waits() {
        let state = SessionState::Restoring;
        assert_eq!(
            evaluate(&state, PageAccess::Authenticated),
            RouteDecision::Wait
        );
        assert_eq!(evaluate(&state, PageAccess::GuestOnly), RouteDecision::Wait);
    }

    #[test]
    fn unauthenticated_visitor_is_sent_to_login() {
        let state = SessionState::Ready(None);
        assert_eq!(
            evaluate(&state, PageAccess::Authenticated),
            RouteDecision::Redirect(RedirectTarget::Login)
        );
        assert_eq!(
            evaluate(&state, PageAccess::Role(Role::Admin)),
            RouteDecision::Redirect(RedirectTarget::Login)
        );
        assert_eq!(evaluate(&state, PageAccess::GuestOnly), RouteDecision::Allow);
    }

    #[test]
    fn authenticated_visitor_leaves_guest_pages() -> Result<()> {
        let state = ready_with(Role::Standard)?;
        assert_eq!(
            evaluate(&state, PageAccess::GuestOnly),
            RouteDecision::Redirect(RedirectTarget::Landing)
        );
        assert_eq!(
            evaluate(&state, PageAccess::Authenticated),
            RouteDecision::Allow
        );
        Ok(())
    }

    #[test]
    fn nutritionist_on_admin_page_lands_on_dashboard() -> Result<()> {
        let state = ready_with(Role::Nutritionist)?;
        let access = page_access("/admin").context("admin page declared")?;
        assert_eq!(
            evaluate(&state, access),
            RouteDecision::Redirect(RedirectTarget::Landing)
        );
        Ok(())
    }

    #[test]
    fn admin_reaches_the_admin_page() -> Result<()> {
        let state = ready_with(Role::Admin)?;
        assert_eq!(
            evaluate(&state, PageAccess::Role(Role::Admin)),
            RouteDecision::Allow
        );
        Ok(())
    }

    #[test]
    fn redirect_targets_map_to_fixed_paths() {
        assert_eq!(RedirectTarget::Login.path(), "/login");
        assert_eq!(RedirectTarget::Landing.path(), "/dashboard");
    }

    #[test]
    fn nutritionist_sees_the_reduced_navigation_set() {
        let labels: Vec<&str> = visible_navigation(Role::Nutritionist)
            .map(|item| item.label)
            .collect();
        assert_eq!(
            labels,
            [
                "Dashboard",
                "Health Assessment",
                "Diet Plans",
                "Workouts",
                "Profile"
            ]
        );
    }

    #[test]
    fn other_roles_see_the_full_navigation_set() {
        for role in [Role::Standard, Role::Admin] {
            assert_eq!(visible_navigation(role).count(), NAVIGATION.len());
        }
    }

    #[test]
    fn unknown_paths_have_no_declared_access() {
        assert_eq!(page_access("/nowhere"), None);
        assert_eq!(page_access("/dashboard"), Some(PageAccess::Authenticated));
    }
}
