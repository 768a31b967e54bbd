//! Route table and session-based navigation guard.
//!
//! Each view is either public or protected. The guard is evaluated on every
//! navigation and depends only on the target's access class and whether a
//! session exists; it keeps no history and makes no network calls.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::session::SessionStore;

/// Reachability class attached to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reachable without a session.
    Public,
    /// Requires a session.
    Protected,
}

/// Named views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    /// Sign-in screen; the public entry view.
    Login,
    /// Landing view after sign-in.
    Dashboard,
    /// Sent and received compliments.
    ComplimentsHistory,
    /// Tasks completed by one user.
    UserTasksHistory,
}

/// Static description of one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDefinition {
    /// View name.
    pub name: RouteName,
    /// Path pattern; `:name` segments capture parameters.
    pub path: &'static str,
    /// Reachability class.
    pub access: Access,
}

/// Routes of the application, in match order.
pub const ROUTES: &[RouteDefinition] = &[
    RouteDefinition {
        name: RouteName::Login,
        path: "/login",
        access: Access::Public,
    },
    RouteDefinition {
        name: RouteName::Dashboard,
        path: "/",
        access: Access::Protected,
    },
    RouteDefinition {
        name: RouteName::ComplimentsHistory,
        path: "/compliments-history",
        access: Access::Protected,
    },
    RouteDefinition {
        name: RouteName::UserTasksHistory,
        path: "/user/:userId/tasks",
        access: Access::Protected,
    },
];

/// A resolved path: the matching route plus captured parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Matched route.
    pub route: RouteDefinition,
    /// Values captured by `:name` segments.
    pub params: BTreeMap<String, String>,
}

/// Lookup over a fixed set of route definitions.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    routes: &'static [RouteDefinition],
    entry: RouteName,
    home: RouteName,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            routes: ROUTES,
            entry: RouteName::Login,
            home: RouteName::Dashboard,
        }
    }
}

impl RouteTable {
    /// Definition of a named route.
    pub fn get(&self, name: RouteName) -> Option<RouteDefinition> {
        self.routes.iter().copied().find(|route| route.name == name)
    }

    /// Public entry view that unauthenticated navigation is sent to.
    pub fn entry(&self) -> RouteName {
        self.entry
    }

    /// Default protected view that signed-in users land on.
    pub fn home(&self) -> RouteName {
        self.home
    }

    /// Match a concrete path such as `/user/4/tasks`.
    ///
    /// Query strings and fragments are ignored; a trailing slash is optional.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let wanted = segments(path);
        self.routes.iter().find_map(|route| {
            let pattern = segments(route.path);
            if pattern.len() != wanted.len() {
                return None;
            }
            let mut params = BTreeMap::new();
            for (expected, actual) in pattern.iter().zip(&wanted) {
                match expected.strip_prefix(':') {
                    Some(name) => {
                        params.insert(name.to_owned(), (*actual).to_owned());
                    }
                    None if expected == actual => {}
                    None => return None,
                }
            }
            Some(RouteMatch {
                route: *route,
                params,
            })
        })
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Outcome of a navigation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Continue to the requested view unchanged.
    Proceed,
    /// Go to this view instead.
    Redirect(RouteName),
}

/// Pure guard rule over the target view and session presence.
pub fn decide(
    table: &RouteTable,
    target: &RouteDefinition,
    has_session: bool,
) -> NavigationDecision {
    match (target.access, has_session) {
        (Access::Protected, false) => NavigationDecision::Redirect(table.entry()),
        (_, true) if target.name == table.entry() => NavigationDecision::Redirect(table.home()),
        _ => NavigationDecision::Proceed,
    }
}

/// Navigation guard consulting the session store.
pub struct RouteGuard {
    table: RouteTable,
    sessions: Arc<SessionStore>,
}

impl RouteGuard {
    /// Guard the default route table.
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self::with_table(RouteTable::default(), sessions)
    }

    /// Guard a custom route table.
    pub fn with_table(table: RouteTable, sessions: Arc<SessionStore>) -> Self {
        Self { table, sessions }
    }

    /// Route table in use.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Decide a navigation from `from` (unused by the rule) to `to`.
    pub fn check(&self, from: Option<&RouteDefinition>, to: &RouteDefinition) -> NavigationDecision {
        let decision = decide(&self.table, to, self.sessions.has_session());
        debug!(
            from = ?from.map(|route| route.name),
            to = ?to.name,
            ?decision,
            "navigation checked"
        );
        decision
    }

    /// Resolve `path` and decide the navigation; unknown paths yield `None`.
    pub fn check_path(&self, path: &str) -> Option<(RouteMatch, NavigationDecision)> {
        let matched = self.table.resolve(path)?;
        let decision = self.check(None, &matched.route);
        Some((matched, decision))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the guard rule and path matching.

    use super::*;
    use crate::domain::ids::{TenantId, UserId};
    use crate::domain::localization::{Locale, Localizer};
    use crate::domain::session::{BearerToken, Session};
    use crate::outbound::storage::InMemoryKeyValueStore;
    use rstest::rstest;

    fn route(name: RouteName) -> RouteDefinition {
        RouteTable::default().get(name).expect("route defined")
    }

    fn guard(signed_in: bool) -> RouteGuard {
        let store = Arc::new(InMemoryKeyValueStore::default());
        let localizer = Arc::new(Localizer::with_locale(store.clone(), Locale::PtBr));
        let sessions = Arc::new(SessionStore::new(store, localizer));
        if signed_in {
            sessions
                .save_session(&Session::new(
                    BearerToken::new("t"),
                    UserId::new(1),
                    "Ana",
                    TenantId::new(2),
                ))
                .expect("save session");
        }
        RouteGuard::new(sessions)
    }

    #[rstest]
    #[case(RouteName::Dashboard, false, NavigationDecision::Redirect(RouteName::Login))]
    #[case(RouteName::ComplimentsHistory, false, NavigationDecision::Redirect(RouteName::Login))]
    #[case(RouteName::UserTasksHistory, false, NavigationDecision::Redirect(RouteName::Login))]
    #[case(RouteName::Login, false, NavigationDecision::Proceed)]
    #[case(RouteName::Login, true, NavigationDecision::Redirect(RouteName::Dashboard))]
    #[case(RouteName::Dashboard, true, NavigationDecision::Proceed)]
    #[case(RouteName::ComplimentsHistory, true, NavigationDecision::Proceed)]
    #[case(RouteName::UserTasksHistory, true, NavigationDecision::Proceed)]
    fn guard_rule(
        #[case] target: RouteName,
        #[case] signed_in: bool,
        #[case] expected: NavigationDecision,
    ) {
        let decision = guard(signed_in).check(Some(&route(RouteName::Dashboard)), &route(target));
        assert_eq!(decision, expected);
    }

    #[rstest]
    #[case("/", RouteName::Dashboard)]
    #[case("/login", RouteName::Login)]
    #[case("/login/", RouteName::Login)]
    #[case("/compliments-history?page=2", RouteName::ComplimentsHistory)]
    #[case("/user/42/tasks", RouteName::UserTasksHistory)]
    fn resolves_known_paths(#[case] path: &str, #[case] expected: RouteName) {
        let matched = RouteTable::default().resolve(path).expect("path resolves");
        assert_eq!(matched.route.name, expected);
    }

    #[test]
    fn captures_path_parameters() {
        let matched = RouteTable::default()
            .resolve("/user/42/tasks")
            .expect("path resolves");
        assert_eq!(matched.params.get("userId").map(String::as_str), Some("42"));
    }

    #[rstest]
    #[case("/nowhere")]
    #[case("/user/42")]
    #[case("/user/42/tasks/extra")]
    fn unknown_paths_do_not_resolve(#[case] path: &str) {
        assert_eq!(RouteTable::default().resolve(path), None);
    }

    #[test]
    fn check_path_combines_resolution_and_guard() {
        let (matched, decision) = guard(false)
            .check_path("/user/7/tasks")
            .expect("path resolves");
        assert_eq!(matched.route.name, RouteName::UserTasksHistory);
        assert_eq!(decision, NavigationDecision::Redirect(RouteName::Login));
    }
}
