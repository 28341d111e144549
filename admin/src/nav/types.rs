//! Navigation header state and its rendered model.

use crate::config::PathsConfig;
use crate::session::SessionState;
use marquee_core::routing::RoutePath;

/// Label on the auth button while a session exists.
pub const SIGN_OUT_LABEL: &str = "Sign Out";

/// Label on the auth button while signed out.
pub const SIGN_IN_LABEL: &str = "Sign In";

/// One static entry in the navigation header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavEntry {
    /// Text shown for the entry
    pub label: String,
    /// Exact path the entry links to
    pub path: RoutePath,
}

impl NavEntry {
    /// Create an entry.
    #[must_use]
    pub fn new(label: impl Into<String>, path: RoutePath) -> Self {
        Self {
            label: label.into(),
            path,
        }
    }
}

/// Standard header entries: Home, About and Contact from `paths`.
#[must_use]
pub fn default_entries(paths: &PathsConfig) -> Vec<NavEntry> {
    vec![
        NavEntry::new("Home", paths.home.clone()),
        NavEntry::new("About", paths.about.clone()),
        NavEntry::new("Contact", paths.contact.clone()),
    ]
}

/// Navigation state: the static entries plus the path currently in effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavState {
    /// Entries in display order
    pub entries: Vec<NavEntry>,
    /// Path currently in effect, as last reported by the router
    pub current: RoutePath,
}

impl NavState {
    /// Header positioned at `current` with these entries.
    #[must_use]
    pub const fn new(entries: Vec<NavEntry>, current: RoutePath) -> Self {
        Self { entries, current }
    }
}

/// One entry as rendered: label, target and whether it is the active one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderEntry {
    /// Text shown for the entry
    pub label: String,
    /// Exact path the entry links to
    pub path: RoutePath,
    /// Whether this entry's path equals the current path
    pub active: bool,
}

/// Everything the header shows for one session and navigation state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderModel {
    /// Entries in display order, the active one marked
    pub entries: Vec<HeaderEntry>,
    /// Whether the admin dashboard link is shown
    pub admin_link: bool,
    /// Label on the auth button
    pub auth_label: &'static str,
    /// Whether the orders affordance is shown
    pub show_orders: bool,
}

/// Derive the rendered header from the session and navigation state.
///
/// Active-entry matching is exact: `/about` does not highlight for
/// `/about/team`, and no entry highlights when the current path matches
/// none of them. The dashboard link is a role gate, not a sign-in gate:
/// only admins see it, whatever the sign-in flag says.
#[must_use]
pub fn header_model(session: &SessionState, nav: &NavState) -> HeaderModel {
    let entries = nav
        .entries
        .iter()
        .map(|entry| HeaderEntry {
            label: entry.label.clone(),
            path: entry.path.clone(),
            active: entry.path == nav.current,
        })
        .collect();

    HeaderModel {
        entries,
        admin_link: session.role.is_admin(),
        auth_label: if session.is_login {
            SIGN_OUT_LABEL
        } else {
            SIGN_IN_LABEL
        },
        show_orders: !session.orders.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::auth::{Credentials, Role, UserId};
    use marquee_core::collection::RecordId;

    fn entries() -> Vec<NavEntry> {
        vec![
            NavEntry::new("Home", RoutePath::new("/")),
            NavEntry::new("About", RoutePath::new("/about")),
            NavEntry::new("Contact", RoutePath::new("/contact")),
        ]
    }

    fn signed_in(role: Role) -> SessionState {
        let mut state = SessionState::new();
        state.role = role;
        state.is_login = true;
        state.credentials = Some(Credentials::new(UserId::new("usr-1"), "ops@marquee.dev"));
        state.is_loading = false;
        state
    }

    #[test]
    fn active_entry_requires_an_exact_match() {
        let nav = NavState::new(entries(), RoutePath::new("/about"));
        let model = header_model(&SessionState::new(), &nav);

        let active: Vec<&str> = model
            .entries
            .iter()
            .filter(|entry| entry.active)
            .map(|entry| entry.label.as_str())
            .collect();
        assert_eq!(active, vec!["About"]);
    }

    #[test]
    fn nested_path_highlights_nothing() {
        let nav = NavState::new(entries(), RoutePath::new("/about/team"));
        let model = header_model(&SessionState::new(), &nav);

        assert!(model.entries.iter().all(|entry| !entry.active));
    }

    #[test]
    fn dashboard_link_is_a_role_gate() {
        let nav = NavState::new(entries(), RoutePath::new("/"));

        assert!(header_model(&signed_in(Role::Admin), &nav).admin_link);
        assert!(!header_model(&signed_in(Role::User), &nav).admin_link);
        assert!(!header_model(&SessionState::new(), &nav).admin_link);
    }

    #[test]
    fn auth_label_follows_the_session() {
        let nav = NavState::new(entries(), RoutePath::new("/"));

        assert_eq!(
            header_model(&signed_in(Role::User), &nav).auth_label,
            SIGN_OUT_LABEL
        );
        assert_eq!(
            header_model(&SessionState::new(), &nav).auth_label,
            SIGN_IN_LABEL
        );
    }

    #[test]
    fn orders_affordance_needs_orders() {
        let nav = NavState::new(entries(), RoutePath::new("/"));
        let mut session = signed_in(Role::User);
        assert!(!header_model(&session, &nav).show_orders);

        session.orders = vec![RecordId::new("ord-1")];
        assert!(header_model(&session, &nav).show_orders);
    }
}
